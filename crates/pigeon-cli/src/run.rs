//! The top-level sign and stream flow.

use anyhow::{bail, Context, Result};
use pigeon::api::NodeWriter;
use pigeon::crypto::BcsCanonicalizer;
use pigeon::transaction::SignedTransaction;
use pigeon::{broadcast, loader, sink, transaction};
use std::path::Path;

use crate::Cli;
use crate::credentials;

/// Runs the command described by `cli`.
///
/// With `--stream-file`, pre-signed blobs are streamed as they are. With
/// `--file`, records are loaded, resolved, signed, and then either written to
/// `--output` or streamed.
pub async fn run(cli: &Cli) -> Result<()> {
    if let Some(path) = &cli.stream_file {
        return stream_file(cli, path).await;
    }
    let Some(path) = &cli.file else {
        bail!("nothing to do: pass --file to sign transactions or --stream-file to stream them");
    };
    sign_file(cli, path).await
}

async fn stream_file(cli: &Cli, path: &Path) -> Result<()> {
    let blobs = loader::load_signed_transactions(path)
        .context("failed to get signed transactions from file")?;
    tracing::info!("Successfully got signed transactions from file {}", path.display());

    if cli.global.dry_run {
        tracing::info!("Transactions were not streamed because of dry run!");
        return Ok(());
    }

    let client = cli.global.build_client()?;
    stream_and_export(&blobs, &client, cli.tx_ids_file.as_deref()).await
}

async fn sign_file(cli: &Cli, path: &Path) -> Result<()> {
    let key = credentials::load_signing_key(&cli.keys)?.context(
        "no signing key given: pass --private-key-file or --keystore-file",
    )?;
    let network = cli.global.network();
    tracing::info!(network = %network, address = %key.address(network), "loaded signing key");

    let records = loader::load_transactions(path, cli.titles)
        .context("failed to get transactions from file")?;
    tracing::info!("Successfully got transactions from file {}", path.display());

    let client = cli.global.build_client()?;
    let resolved = transaction::resolve_transactions(records, &client)
        .await
        .context("failed to fill in transaction fields")?;

    let (blobs, error) =
        transaction::sign_transactions(&resolved, &key, &BcsCanonicalizer, network).into_parts();
    if let Some(err) = error {
        if let (Some(output), false) = (&cli.output, blobs.is_empty()) {
            match sink::write_signed_txs_to_file(&blobs, output) {
                Ok(()) => tracing::warn!(
                    "{} transactions signed before the error were saved to {}",
                    blobs.len(),
                    output.display()
                ),
                Err(e) => {
                    tracing::error!("failed to save transactions signed before the error: {e}")
                }
            }
        }
        return Err(err).context("failed to sign transactions");
    }
    tracing::info!("Successfully signed transactions");

    if let Some(output) = &cli.output {
        sink::write_signed_txs_to_file(&blobs, output)?;
        tracing::info!("Successfully saved signed transactions into a file {}", output.display());
        return Ok(());
    }

    if cli.global.dry_run {
        for blob in &blobs {
            let bytes = hex::decode(blob.trim_start_matches("0x"))?;
            let signed = SignedTransaction::from_bcs(&bytes)?;
            tracing::info!("Signed transaction {}", signed.hash_hex()?);
        }
        tracing::info!("Transactions were not streamed because of dry run!");
        return Ok(());
    }

    stream_and_export(&blobs, &client, cli.tx_ids_file.as_deref()).await
}

async fn stream_and_export(
    blobs: &[String],
    node: &dyn NodeWriter,
    tx_ids_file: Option<&Path>,
) -> Result<()> {
    let (ids, error) = broadcast::stream_signed_transactions(blobs, node)
        .await
        .into_parts();

    if let Some(err) = error {
        for line in sink::report_partial_broadcast(&ids) {
            tracing::error!("{line}");
        }
        if !ids.is_empty() {
            if let Err(e) = export_tx_ids(&ids, tx_ids_file) {
                tracing::error!("{e:#}");
            }
        }
        return Err(err).context("failed to stream transactions");
    }

    tracing::info!("Successfully streamed signed transactions");
    export_tx_ids(&ids, tx_ids_file)
}

fn export_tx_ids(ids: &[String], tx_ids_file: Option<&Path>) -> Result<()> {
    match tx_ids_file {
        Some(path) => {
            sink::write_tx_ids_to_file(ids, path).context("failed to export transaction ids")
        }
        None => {
            sink::write_tx_ids_to_console(ids);
            Ok(())
        }
    }
}
