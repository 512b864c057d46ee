//! Ed25519 transaction signer.

use crate::crypto::traits::TransactionSigner;
use crate::error::SigningError;
use crate::transaction::{SignedTransaction, UnsignedTransaction};
use crate::types::{Address, NetworkId};
use ed25519_dalek::{Signer as DalekSigner, Verifier as DalekVerifier};
use std::fmt;

/// Ed25519 private key length in bytes.
pub const ED25519_PRIVATE_KEY_LENGTH: usize = 32;

/// An Ed25519 private key.
///
/// The inner signing key zeroizes its memory when dropped.
#[derive(Clone)]
pub struct Ed25519PrivateKey {
    inner: ed25519_dalek::SigningKey,
}

impl Ed25519PrivateKey {
    /// Creates a private key from raw bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if `bytes` is not exactly 32 bytes long.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SigningError> {
        let key_bytes: [u8; ED25519_PRIVATE_KEY_LENGTH] = bytes.try_into().map_err(|_| {
            SigningError::InvalidPrivateKey(format!(
                "expected {} bytes, got {}",
                ED25519_PRIVATE_KEY_LENGTH,
                bytes.len()
            ))
        })?;
        Ok(Self {
            inner: ed25519_dalek::SigningKey::from_bytes(&key_bytes),
        })
    }

    /// Creates a private key from a hex string, with or without `0x`.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not hex or has the wrong length.
    pub fn from_hex(hex_str: &str) -> Result<Self, SigningError> {
        let hex_str = hex_str.trim();
        let hex_str = hex_str.strip_prefix("0x").unwrap_or(hex_str);
        let bytes =
            hex::decode(hex_str).map_err(|e| SigningError::InvalidPrivateKey(e.to_string()))?;
        Self::from_bytes(&bytes)
    }

    /// Returns the address controlled by this key on `network`.
    pub fn address(&self, network: NetworkId) -> Address {
        Address::from_public_key(network, self.inner.verifying_key().as_bytes())
    }
}

impl TransactionSigner for Ed25519PrivateKey {
    fn public_key(&self) -> Vec<u8> {
        self.inner.verifying_key().to_bytes().to_vec()
    }

    fn sign_transaction(
        &self,
        txn: UnsignedTransaction,
        network: NetworkId,
    ) -> Result<SignedTransaction, SigningError> {
        let message = txn.signing_message(network)?;
        let signature = self.inner.sign(&message);
        Ok(SignedTransaction::new(
            txn,
            network,
            self.public_key(),
            signature.to_bytes().to_vec(),
        ))
    }
}

impl fmt::Debug for Ed25519PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ed25519PrivateKey([REDACTED])")
    }
}

/// Checks the Ed25519 signature carried by a signed transaction.
///
/// # Errors
///
/// Returns [`SigningError::Crypto`] if the key or signature is malformed or
/// the signature does not match.
pub fn verify_signed_transaction(txn: &SignedTransaction) -> Result<(), SigningError> {
    let key_bytes: [u8; 32] = txn
        .public_key()
        .try_into()
        .map_err(|_| SigningError::Crypto("public key must be 32 bytes".into()))?;
    let public_key = ed25519_dalek::VerifyingKey::from_bytes(&key_bytes)
        .map_err(|e| SigningError::Crypto(e.to_string()))?;
    let signature = ed25519_dalek::Signature::from_slice(txn.signature())
        .map_err(|e| SigningError::Crypto(e.to_string()))?;
    let message = txn.raw().signing_message(txn.network())?;
    public_key
        .verify(&message, &signature)
        .map_err(|e| SigningError::Crypto(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transfer(nonce: u64) -> UnsignedTransaction {
        let to = Address::from_hex("cb751111111111111111111111111111111111111111").unwrap();
        UnsignedTransaction::transfer(nonce, 1u8.into(), 21_000, to, 1000u32.into())
    }

    #[test]
    fn test_from_hex_accepts_prefix_and_whitespace() {
        let hex_key = format!("0x{}\n", "01".repeat(32));
        let key = Ed25519PrivateKey::from_hex(&hex_key).unwrap();
        let other = Ed25519PrivateKey::from_bytes(&[1u8; 32]).unwrap();
        assert_eq!(key.public_key(), other.public_key());
    }

    #[test]
    fn test_from_bytes_rejects_wrong_length() {
        let err = Ed25519PrivateKey::from_bytes(&[1u8; 31]).unwrap_err();
        assert!(err.to_string().contains("expected 32 bytes"));
        assert!(Ed25519PrivateKey::from_hex("zz").is_err());
    }

    #[test]
    fn test_sign_and_verify() {
        let key = Ed25519PrivateKey::from_bytes(&[9u8; 32]).unwrap();
        let signed = key.sign_transaction(transfer(3), NetworkId::MAINNET).unwrap();
        assert_eq!(signed.public_key(), key.public_key().as_slice());
        assert!(verify_signed_transaction(&signed).is_ok());
    }

    #[test]
    fn test_signature_is_bound_to_network() {
        let key = Ed25519PrivateKey::from_bytes(&[9u8; 32]).unwrap();
        let mainnet = key.sign_transaction(transfer(3), NetworkId::MAINNET).unwrap();
        let devin = key.sign_transaction(transfer(3), NetworkId::DEVIN).unwrap();
        assert_ne!(mainnet.signature(), devin.signature());

        let forged = SignedTransaction::new(
            transfer(3),
            NetworkId::DEVIN,
            mainnet.public_key().to_vec(),
            mainnet.signature().to_vec(),
        );
        assert!(verify_signed_transaction(&forged).is_err());
    }

    #[test]
    fn test_debug_redacts_key() {
        let key = Ed25519PrivateKey::from_bytes(&[9u8; 32]).unwrap();
        assert_eq!(format!("{key:?}"), "Ed25519PrivateKey([REDACTED])");
    }
}
