//! Turning resolved records into signed wire blobs.

use crate::crypto::{Canonicalizer, TransactionSigner};
use crate::error::{PigeonError, SigningError};
use crate::transaction::batch::BatchOutcome;
use crate::transaction::record::ResolvedTransaction;
use crate::transaction::types::UnsignedTransaction;
use crate::types::{Address, NetworkId};
use num_bigint::BigUint;
use std::str::FromStr;

/// Signs one resolved record and returns its `0x`-prefixed wire blob.
///
/// # Errors
///
/// Returns an error if the destination is not a valid address, if nonce,
/// energy limit, or energy price are not unsigned integers, or if signing
/// or encoding fails.
pub fn sign_transaction(
    record: &ResolvedTransaction,
    signer: &dyn TransactionSigner,
    codec: &dyn Canonicalizer,
    network: NetworkId,
) -> Result<String, SigningError> {
    let to = Address::from_hex(&record.to)?;
    let nonce = parse_u64("nonce", &record.nonce)?;
    let energy_limit = parse_u64("energy_limit", &record.energy_limit)?;
    let energy_price = BigUint::from_str(record.energy_price.trim()).map_err(|_| {
        SigningError::InvalidNumber {
            field: "energy_price",
            value: record.energy_price.clone(),
        }
    })?;
    let amount = record.amount.to_smallest_unit();

    let unsigned = UnsignedTransaction::transfer(nonce, energy_price, energy_limit, to, amount);
    let signed = signer.sign_transaction(unsigned, network)?;
    let bytes = codec.canonicalize(&signed)?;
    Ok(format!("0x{}", hex::encode(bytes)))
}

/// Signs records in order, stopping at the first failure.
///
/// The outcome holds the blobs signed before the failure. The error names
/// the index of the record that failed.
pub fn sign_transactions(
    records: &[ResolvedTransaction],
    signer: &dyn TransactionSigner,
    codec: &dyn Canonicalizer,
    network: NetworkId,
) -> BatchOutcome<String> {
    let mut signed = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        match sign_transaction(record, signer, codec, network) {
            Ok(blob) => {
                tracing::debug!(index, to = %record.to, nonce = %record.nonce, "signed transaction");
                signed.push(blob);
            }
            Err(source) => {
                return BatchOutcome::failed(signed, PigeonError::Signing { index, source });
            }
        }
    }
    BatchOutcome::success(signed)
}

fn parse_u64(field: &'static str, value: &str) -> Result<u64, SigningError> {
    value
        .trim()
        .parse()
        .map_err(|_| SigningError::InvalidNumber {
            field,
            value: value.to_string(),
        })
}
