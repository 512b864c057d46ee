//! Signing and encoding capabilities.
//!
//! The pipeline never signs or encodes directly. It goes through the
//! [`TransactionSigner`] and [`Canonicalizer`] traits so the signature scheme
//! and wire encoding can be swapped without touching the batch logic.
//!
//! # Example
//!
//! ```rust
//! use pigeon::crypto::{BcsCanonicalizer, Canonicalizer, Ed25519PrivateKey, TransactionSigner};
//! use pigeon::transaction::UnsignedTransaction;
//! use pigeon::types::{Address, NetworkId};
//!
//! let key = Ed25519PrivateKey::from_bytes(&[1u8; 32]).unwrap();
//! let to = Address::from_hex("cb751111111111111111111111111111111111111111").unwrap();
//! let txn = UnsignedTransaction::transfer(0, 1u8.into(), 21_000, to, 10u8.into());
//!
//! let signed = key.sign_transaction(txn, NetworkId::MAINNET).unwrap();
//! let bytes = BcsCanonicalizer.canonicalize(&signed).unwrap();
//! assert!(!bytes.is_empty());
//! ```

mod codec;
mod ed25519;
mod hash;
mod traits;

pub use codec::BcsCanonicalizer;
pub use ed25519::{verify_signed_transaction, Ed25519PrivateKey, ED25519_PRIVATE_KEY_LENGTH};
pub use hash::sha3_256;
pub use traits::{Canonicalizer, TransactionSigner};
