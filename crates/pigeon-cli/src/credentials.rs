//! Loading the signing key.
//!
//! Two sources are supported: a plain file holding the hex private key, and
//! an encrypted keystore. Keystores encrypt the hex key with AES-256-GCM
//! under a key derived from the password via Argon2id.
//!
//! Keystore format (JSON):
//! ```json
//! {
//!   "version": 1,
//!   "salt": "<base64>",
//!   "nonce": "<base64>",
//!   "ciphertext": "<base64>"
//! }
//! ```

use aes_gcm::{aead::Aead, Aes256Gcm, KeyInit, Nonce};
use anyhow::{bail, Context, Result};
use argon2::Argon2;
use base64::{engine::general_purpose::STANDARD as B64, Engine};
use pigeon::crypto::Ed25519PrivateKey;
use serde::{Deserialize, Serialize};
use std::path::Path;
use zeroize::Zeroize;

use crate::common::KeyOpts;

const KEYSTORE_VERSION: u32 = 1;
const SALT_LEN: usize = 32;
const NONCE_LEN: usize = 12;
// Argon2 parameters, tuned for interactive use
const ARGON2_MEM_KIB: u32 = 64 * 1024; // 64 MiB
const ARGON2_ITERS: u32 = 3;
const ARGON2_PARALLEL: u32 = 1;

#[derive(Serialize, Deserialize)]
struct KeystoreFile {
    version: u32,
    salt: String,
    nonce: String,
    ciphertext: String,
}

/// Loads the signing key named by the key options.
///
/// Returns `Ok(None)` when neither a key file nor a keystore is given.
pub fn load_signing_key(opts: &KeyOpts) -> Result<Option<Ed25519PrivateKey>> {
    match (&opts.private_key_file, &opts.keystore_file) {
        (Some(_), Some(_)) => {
            bail!("cannot use both --private-key-file and --keystore-file")
        }
        (Some(path), None) => read_private_key_file(path)
            .context("failed to load private key from file")
            .map(Some),
        (None, Some(path)) => {
            let mut password = match &opts.password_file {
                Some(password_file) => read_password_file(password_file)?,
                None => prompt_password("Enter password for keystore file: ")?,
            };
            let key = read_keystore_file(path, &password);
            password.zeroize();
            key.context("failed to load private key from keystore").map(Some)
        }
        (None, None) => Ok(None),
    }
}

/// Reads a hex private key file. Surrounding whitespace and `0x` are ignored.
pub fn read_private_key_file(path: &Path) -> Result<Ed25519PrivateKey> {
    let mut data = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let key = Ed25519PrivateKey::from_hex(&data);
    data.zeroize();
    Ok(key?)
}

/// Reads and decrypts a keystore file.
pub fn read_keystore_file(path: &Path, password: &str) -> Result<Ed25519PrivateKey> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    decrypt_keystore(&data, password)
}

/// Decrypts a keystore document.
pub fn decrypt_keystore(json: &str, password: &str) -> Result<Ed25519PrivateKey> {
    let file: KeystoreFile = serde_json::from_str(json).context("corrupt keystore file")?;
    if file.version != KEYSTORE_VERSION {
        bail!("unsupported keystore version {}", file.version);
    }

    let salt = B64.decode(&file.salt).context("invalid salt")?;
    if salt.len() != SALT_LEN {
        bail!("invalid salt length");
    }
    let nonce_bytes = B64.decode(&file.nonce).context("invalid nonce")?;
    if nonce_bytes.len() != NONCE_LEN {
        bail!("invalid nonce length");
    }
    let ciphertext = B64.decode(&file.ciphertext).context("invalid ciphertext")?;

    let cipher = derive_cipher(password, &salt)?;
    let mut plaintext = cipher
        .decrypt(Nonce::from_slice(&nonce_bytes), ciphertext.as_slice())
        .map_err(|_| anyhow::anyhow!("wrong password or corrupt keystore"))?;

    let key = std::str::from_utf8(&plaintext)
        .context("decrypted key is not valid UTF-8")
        .and_then(|hex_key| Ed25519PrivateKey::from_hex(hex_key).map_err(Into::into));
    plaintext.zeroize();
    key
}

/// Encrypts a hex private key into a keystore document.
#[cfg(test)]
pub fn encrypt_keystore(private_key_hex: &str, password: &str) -> Result<String> {
    use aes_gcm::aead::OsRng;
    use rand::RngCore;

    let mut salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);
    let mut nonce_bytes = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut nonce_bytes);

    let cipher = derive_cipher(password, &salt)?;
    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&nonce_bytes), private_key_hex.as_bytes())
        .map_err(|e| anyhow::anyhow!("encryption failed: {e}"))?;

    let file = KeystoreFile {
        version: KEYSTORE_VERSION,
        salt: B64.encode(salt),
        nonce: B64.encode(nonce_bytes),
        ciphertext: B64.encode(ciphertext),
    };
    Ok(serde_json::to_string_pretty(&file)?)
}

fn derive_cipher(password: &str, salt: &[u8]) -> Result<Aes256Gcm> {
    let params = argon2::Params::new(ARGON2_MEM_KIB, ARGON2_ITERS, ARGON2_PARALLEL, Some(32))
        .map_err(|e| anyhow::anyhow!("invalid Argon2 parameters: {e}"))?;
    let argon2 = Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params);

    let mut key = [0u8; 32];
    argon2
        .hash_password_into(password.as_bytes(), salt, &mut key)
        .map_err(|e| anyhow::anyhow!("key derivation failed: {e}"))?;

    let cipher = Aes256Gcm::new_from_slice(&key)
        .map_err(|e| anyhow::anyhow!("cipher creation failed: {e}"))?;

    key.zeroize();
    Ok(cipher)
}

fn read_password_file(path: &Path) -> Result<String> {
    let mut data = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read password file {}", path.display()))?;
    let password = data.trim().to_string();
    data.zeroize();
    Ok(password)
}

/// Prompt for a password without echoing.
pub fn prompt_password(prompt: &str) -> Result<String> {
    rpassword::prompt_password(prompt).context("failed to read password")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pigeon::crypto::TransactionSigner;
    use pigeon::types::NetworkId;
    use std::fs;

    fn key_hex() -> String {
        "07".repeat(32)
    }

    fn expected_public_key() -> Vec<u8> {
        Ed25519PrivateKey::from_hex(&key_hex()).unwrap().public_key()
    }

    #[test]
    fn test_keystore_round_trip() {
        let json = encrypt_keystore(&key_hex(), "hunter2").unwrap();
        let key = decrypt_keystore(&json, "hunter2").unwrap();
        assert_eq!(key.public_key(), expected_public_key());
    }

    #[test]
    fn test_keystore_wrong_password() {
        let json = encrypt_keystore(&key_hex(), "hunter2").unwrap();
        let err = decrypt_keystore(&json, "hunter3").unwrap_err();
        assert!(err.to_string().contains("wrong password"));
    }

    #[test]
    fn test_keystore_rejects_unknown_version() {
        let json = encrypt_keystore(&key_hex(), "pw").unwrap();
        let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
        value["version"] = serde_json::json!(2);
        let err = decrypt_keystore(&value.to_string(), "pw").unwrap_err();
        assert!(err.to_string().contains("unsupported keystore version"));
    }

    #[test]
    fn test_private_key_file_with_prefix_and_newline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("key.txt");
        fs::write(&path, format!("0x{}\n", key_hex())).unwrap();

        let key = read_private_key_file(&path).unwrap();
        assert_eq!(key.public_key(), expected_public_key());
        assert!(key.address(NetworkId::MAINNET).to_hex().starts_with("cb"));
    }

    #[test]
    fn test_load_from_keystore_with_password_file() {
        let dir = tempfile::tempdir().unwrap();
        let keystore = dir.path().join("keystore.json");
        let password = dir.path().join("password.txt");
        fs::write(&keystore, encrypt_keystore(&key_hex(), "s3cret").unwrap()).unwrap();
        fs::write(&password, "  s3cret\n").unwrap();

        let opts = KeyOpts {
            keystore_file: Some(keystore),
            password_file: Some(password),
            ..Default::default()
        };
        let key = load_signing_key(&opts).unwrap().unwrap();
        assert_eq!(key.public_key(), expected_public_key());
    }

    #[test]
    fn test_both_sources_is_an_error() {
        let opts = KeyOpts {
            private_key_file: Some("a".into()),
            keystore_file: Some("b".into()),
            password_file: None,
        };
        let err = load_signing_key(&opts).unwrap_err();
        assert!(err.to_string().contains("cannot use both"));
    }

    #[test]
    fn test_no_source() {
        assert!(load_signing_key(&KeyOpts::default()).unwrap().is_none());
    }
}
