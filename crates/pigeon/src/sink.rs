//! Writing identifiers and signed blobs.
//!
//! Files hold a JSON list of strings, readable back with
//! [`read_string_list`](crate::loader::read_string_list). Console output goes
//! through `tracing` at info level.

use crate::error::{PigeonError, PigeonResult};
use std::fs;
use std::path::Path;

/// Writes transaction identifiers to `path` as a JSON list.
///
/// An empty list is written as `[]`.
///
/// # Errors
///
/// Returns [`PigeonError::Io`] if the file cannot be written.
pub fn write_tx_ids_to_file(ids: &[String], path: impl AsRef<Path>) -> PigeonResult<()> {
    let path = path.as_ref();
    write_string_list(ids, path)?;
    tracing::info!(path = %path.display(), count = ids.len(), "transaction ids saved");
    Ok(())
}

/// Writes signed transaction blobs to `path` as a JSON list.
///
/// # Errors
///
/// Returns [`PigeonError::Io`] if the file cannot be written.
pub fn write_signed_txs_to_file(blobs: &[String], path: impl AsRef<Path>) -> PigeonResult<()> {
    let path = path.as_ref();
    write_string_list(blobs, path)?;
    tracing::info!(path = %path.display(), count = blobs.len(), "signed transactions saved");
    Ok(())
}

/// Logs a summary of streamed identifiers.
pub fn write_tx_ids_to_console(ids: &[String]) {
    if ids.is_empty() {
        tracing::debug!("no transaction ids to display");
    }
    for line in console_summary(ids) {
        tracing::info!("{line}");
    }
}

/// Builds the console summary for streamed identifiers.
///
/// No lines for an empty list, a single line for one identifier, and a
/// header followed by a numbered list otherwise.
pub fn console_summary(ids: &[String]) -> Vec<String> {
    match ids {
        [] => Vec::new(),
        [id] => vec![format!("Transaction {id} was streamed successfully")],
        _ => std::iter::once("Transactions were streamed successfully:".to_string())
            .chain(numbered(ids))
            .collect(),
    }
}

/// Builds the lines reporting identifiers streamed before a failure.
///
/// Returns no lines if nothing was streamed.
pub fn report_partial_broadcast(ids: &[String]) -> Vec<String> {
    if ids.is_empty() {
        return Vec::new();
    }
    std::iter::once("Some transactions were streamed before the error:".to_string())
        .chain(numbered(ids))
        .collect()
}

fn numbered(ids: &[String]) -> impl Iterator<Item = String> + '_ {
    ids.iter()
        .enumerate()
        .map(|(i, id)| format!("{}: {id}", i + 1))
}

fn write_string_list(items: &[String], path: &Path) -> PigeonResult<()> {
    let json = serde_json::to_string(items)?;
    fs::write(path, json).map_err(|source| PigeonError::Io {
        path: path.to_path_buf(),
        source,
    })
}
