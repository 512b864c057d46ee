//! Capability traits for signing and wire encoding.

use crate::error::SigningError;
use crate::transaction::{SignedTransaction, UnsignedTransaction};
use crate::types::NetworkId;

/// Something that can turn an unsigned transaction into a signed one.
///
/// Implementations hold the private key; the signature must cover the
/// network identifier.
pub trait TransactionSigner {
    /// Returns the public key bytes embedded in signed transactions.
    fn public_key(&self) -> Vec<u8>;

    /// Signs `txn` for `network`.
    fn sign_transaction(
        &self,
        txn: UnsignedTransaction,
        network: NetworkId,
    ) -> Result<SignedTransaction, SigningError>;
}

/// Something that renders a signed transaction in the chain's wire format.
pub trait Canonicalizer {
    /// Returns the canonical bytes of `txn`.
    fn canonicalize(&self, txn: &SignedTransaction) -> Result<Vec<u8>, SigningError>;
}
