//! Streaming signed transactions to the node.

use crate::api::NodeWriter;
use crate::error::PigeonError;
use crate::transaction::BatchOutcome;

/// Submits signed blobs one at a time, in order.
///
/// Stops at the first rejected submission. The outcome holds the identifiers
/// returned before the failure, and the error names the failing index. No
/// submission is retried or reordered.
pub async fn stream_signed_transactions(
    blobs: &[String],
    node: &dyn NodeWriter,
) -> BatchOutcome<String> {
    let mut ids = Vec::with_capacity(blobs.len());
    for (index, blob) in blobs.iter().enumerate() {
        match node.send_raw_transaction(blob).await {
            Ok(id) => {
                tracing::debug!(index, tx_id = %id, "transaction streamed");
                ids.push(id);
            }
            Err(source) => {
                return BatchOutcome::failed(ids, PigeonError::Broadcast { index, source });
            }
        }
    }
    BatchOutcome::success(ids)
}
