//! Hash helpers.

use sha3::{Digest, Sha3_256};

/// Computes the SHA3-256 hash of the input.
///
/// ```rust
/// use pigeon::crypto::sha3_256;
///
/// let hash = sha3_256(b"abc");
/// assert_eq!(
///     hex::encode(hash),
///     "3a985da74fe225b2045c172d6bd390bd855f086e3e9d525b46bfe24511431532"
/// );
/// ```
pub fn sha3_256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha3_256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}
