//! BCS wire encoding.

use crate::crypto::traits::Canonicalizer;
use crate::error::SigningError;
use crate::transaction::SignedTransaction;

/// Encodes signed transactions with BCS.
#[derive(Clone, Copy, Debug, Default)]
pub struct BcsCanonicalizer;

impl Canonicalizer for BcsCanonicalizer {
    fn canonicalize(&self, txn: &SignedTransaction) -> Result<Vec<u8>, SigningError> {
        txn.to_bcs()
    }
}
