//! Filling in missing transaction fields.
//!
//! Records may leave nonce, energy price, and energy limit empty. The
//! resolver fills them in order:
//!
//! - nonce: the sender's pending transaction count the first time the sender
//!   appears without a nonce, then one more than the last nonce the resolver
//!   assigned to that sender
//! - energy price: the node's current price, queried for every record
//! - energy limit: [`DEFAULT_ENERGY_LIMIT`]
//!
//! Explicit nonces in the input are left alone and do not move the counter.

use crate::api::{BlockTag, NodeReader};
use crate::config::DEFAULT_ENERGY_LIMIT;
use crate::error::{PigeonError, PigeonResult};
use crate::transaction::record::{ResolvedTransaction, TransactionRecord};
use std::collections::HashMap;

/// Last nonce assigned to each sender during one resolver run.
#[derive(Debug, Default)]
struct NonceTracker {
    last_assigned: HashMap<String, u64>,
}

impl NonceTracker {
    async fn next(&mut self, sender: &str, node: &dyn NodeReader) -> PigeonResult<u64> {
        let key = sender_key(sender);
        let nonce = match self.last_assigned.get(&key) {
            Some(last) => last
                .checked_add(1)
                .ok_or_else(|| PigeonError::NonceOverflow {
                    sender: sender.to_string(),
                })?,
            None => node.get_transaction_count(sender, BlockTag::Pending).await?,
        };
        self.last_assigned.insert(key, nonce);
        Ok(nonce)
    }
}

/// Normalizes a sender so different spellings of one address share a counter.
fn sender_key(sender: &str) -> String {
    let sender = sender.trim();
    sender
        .strip_prefix("0x")
        .or_else(|| sender.strip_prefix("0X"))
        .unwrap_or(sender)
        .to_ascii_lowercase()
}

/// Resolves every record in order, returning one resolved transaction per
/// input record.
///
/// A record that already carries all three optional fields causes no remote
/// call.
///
/// # Errors
///
/// Returns [`PigeonError::NodeQuery`] on the first failed lookup, or
/// [`PigeonError::NonceOverflow`] if a sender's counter runs past `u64::MAX`.
/// No partial result is returned.
pub async fn resolve_transactions(
    records: Vec<TransactionRecord>,
    node: &dyn NodeReader,
) -> PigeonResult<Vec<ResolvedTransaction>> {
    let mut nonces = NonceTracker::default();
    let mut resolved = Vec::with_capacity(records.len());

    for record in records {
        let nonce = match record.nonce {
            Some(nonce) => nonce,
            None => nonces.next(&record.from, node).await?.to_string(),
        };
        let energy_price = match record.energy_price {
            Some(price) => price,
            None => node.energy_price().await?.to_string(),
        };
        let energy_limit = record
            .energy_limit
            .unwrap_or_else(|| DEFAULT_ENERGY_LIMIT.to_string());

        tracing::debug!(
            from = %record.from,
            to = %record.to,
            %nonce,
            %energy_price,
            %energy_limit,
            "resolved transaction"
        );

        resolved.push(ResolvedTransaction {
            to: record.to,
            from: record.from,
            amount: record.amount,
            energy_limit,
            energy_price,
            nonce,
        });
    }

    Ok(resolved)
}
