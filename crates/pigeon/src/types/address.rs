//! Account address type.
//!
//! Core addresses are 22-byte values displayed as 44 hexadecimal characters:
//! a two-character network prefix, two decimal checksum digits, and a
//! 20-byte body.

use crate::error::SigningError;
use crate::types::NetworkId;
use serde::{Deserialize, Serialize};
use sha3::{Digest, Sha3_256};
use std::fmt;
use std::str::FromStr;

/// The length of an address in bytes.
pub const ADDRESS_LENGTH: usize = 22;

const BODY_LENGTH: usize = 20;

/// A 22-byte Core account address.
///
/// The checksum follows ISO 13616: moving the prefix and checksum to the end
/// and reading letters as `10..35` gives a number equal to 1 modulo 97.
///
/// # Example
///
/// ```rust
/// use pigeon::types::Address;
///
/// let addr = Address::from_hex("cb751111111111111111111111111111111111111111").unwrap();
/// assert_eq!(addr.to_string(), "cb751111111111111111111111111111111111111111");
///
/// // A corrupted checksum is rejected
/// assert!(Address::from_hex("cb761111111111111111111111111111111111111111").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Address([u8; ADDRESS_LENGTH]);

impl Address {
    /// Parses an address from its hex form (with or without `0x` prefix).
    ///
    /// # Errors
    ///
    /// Returns [`SigningError::InvalidAddress`] if the input has the wrong
    /// length, is not hex, or fails the checksum.
    pub fn from_hex(input: &str) -> Result<Self, SigningError> {
        let invalid = |reason: &str| SigningError::InvalidAddress {
            value: input.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = input.trim();
        let hex_str = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed)
            .to_ascii_lowercase();

        if !hex_str.is_ascii() {
            return Err(invalid("not a hex string"));
        }
        if hex_str.len() != ADDRESS_LENGTH * 2 {
            return Err(invalid(&format!(
                "expected {} hex characters, got {}",
                ADDRESS_LENGTH * 2,
                hex_str.len()
            )));
        }
        if !hex_str[2..4].bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("checksum must be two decimal digits"));
        }

        let bytes = hex::decode(&hex_str).map_err(|e| invalid(&e.to_string()))?;
        if mod97(&hex_str[4..], &hex_str[..4]) != 1 {
            return Err(invalid("checksum mismatch"));
        }

        let mut address = [0u8; ADDRESS_LENGTH];
        address.copy_from_slice(&bytes);
        Ok(Self(address))
    }

    /// Builds an address from a network prefix and a 20-byte body,
    /// computing the checksum.
    pub fn from_body(network: NetworkId, body: [u8; BODY_LENGTH]) -> Self {
        let prefix = network.address_prefix();
        let body_hex = hex::encode(body);
        let checksum = 98 - mod97(&body_hex, &format!("{prefix}00"));
        // Both parts are valid hex by construction.
        let head = format!("{prefix}{checksum:02}");

        let mut address = [0u8; ADDRESS_LENGTH];
        for (i, pair) in head.as_bytes().chunks(2).enumerate() {
            address[i] = (hex_nibble(pair[0]) << 4) | hex_nibble(pair[1]);
        }
        address[2..].copy_from_slice(&body);
        Self(address)
    }

    /// Derives the address controlled by a public key on the given network.
    ///
    /// The body is the last 20 bytes of the SHA3-256 hash of the key.
    pub fn from_public_key(network: NetworkId, public_key: &[u8]) -> Self {
        let digest = Sha3_256::digest(public_key);
        let mut body = [0u8; BODY_LENGTH];
        body.copy_from_slice(&digest[digest.len() - BODY_LENGTH..]);
        Self::from_body(network, body)
    }

    /// Returns the address as a byte slice.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the address as a lowercase hex string without prefix.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_hex())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for Address {
    type Err = SigningError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

/// Reads `body || head` as a base-36 digit string and reduces it modulo 97.
fn mod97(body: &str, head: &str) -> u32 {
    body.bytes().chain(head.bytes()).fold(0u32, |acc, c| {
        if c.is_ascii_digit() {
            (acc * 10 + u32::from(c - b'0')) % 97
        } else {
            (acc * 100 + u32::from(c.to_ascii_lowercase() - b'a') + 10) % 97
        }
    })
}

fn hex_nibble(c: u8) -> u8 {
    match c {
        b'0'..=b'9' => c - b'0',
        _ => c.to_ascii_lowercase() - b'a' + 10,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAINNET_ADDR: &str = "cb690123456789abcdef0123456789abcdef01234567";
    const DEVIN_ADDR: &str = "ab0400000000000000000000000000000000000000ff";

    #[test]
    fn test_parse_valid_addresses() {
        let addr = Address::from_hex(MAINNET_ADDR).unwrap();
        assert_eq!(addr.to_hex(), MAINNET_ADDR);

        let addr = Address::from_hex(DEVIN_ADDR).unwrap();
        assert_eq!(addr.as_bytes()[0], 0xab);
        assert_eq!(addr.as_bytes()[ADDRESS_LENGTH - 1], 0xff);
    }

    #[test]
    fn test_parse_accepts_prefix_and_uppercase() {
        let upper = format!("0x{}", MAINNET_ADDR.to_uppercase());
        assert_eq!(
            Address::from_hex(&upper).unwrap(),
            Address::from_hex(MAINNET_ADDR).unwrap()
        );
    }

    #[test]
    fn test_parse_rejects_bad_checksum() {
        let err = Address::from_hex("cb000123456789abcdef0123456789abcdef01234567").unwrap_err();
        assert!(err.to_string().contains("checksum mismatch"));
    }

    #[test]
    fn test_parse_rejects_bad_length_and_hex() {
        assert!(Address::from_hex("").is_err());
        assert!(Address::from_hex("cb69").is_err());
        assert!(Address::from_hex("cb69zz23456789abcdef0123456789abcdef01234567").is_err());
    }

    #[test]
    fn test_from_body_computes_checksum() {
        let body = [0x11u8; BODY_LENGTH];
        let addr = Address::from_body(NetworkId::MAINNET, body);
        assert_eq!(addr.to_hex(), "cb751111111111111111111111111111111111111111");
    }

    #[test]
    fn test_from_public_key_round_trips_through_parse() {
        let addr = Address::from_public_key(NetworkId::DEVIN, &[7u8; 32]);
        assert!(addr.to_hex().starts_with("ab"));
        assert_eq!(Address::from_hex(&addr.to_hex()).unwrap(), addr);
    }
}
