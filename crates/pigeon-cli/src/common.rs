//! Shared options and helpers for the CLI.

use anyhow::{Context, Result};
use pigeon::api::NodeClient;
use pigeon::config::{ClientConfig, LOCAL_NODE_URL};
use pigeon::types::NetworkId;
use std::path::PathBuf;

/// Options that affect logging and node access.
#[derive(clap::Args, Debug)]
pub struct GlobalOpts {
    /// Verbosity from 1 (debug) to 7 (errors only)
    #[arg(short = 'v', long, default_value_t = 2)]
    pub verbosity: u8,

    /// Network id to sign for
    #[arg(short = 'n', long, default_value_t = 1)]
    pub network: u64,

    /// Node JSON-RPC endpoint; an empty value works offline
    #[arg(short = 'g', long, alias = "gocore", default_value = LOCAL_NODE_URL)]
    pub node_url: String,

    /// Check the input without streaming anything
    #[arg(short = 'd', long, default_value_t = false)]
    pub dry_run: bool,
}

/// Where the signing key comes from.
#[derive(clap::Args, Debug, Default)]
pub struct KeyOpts {
    /// File with a hex-encoded private key
    #[arg(short = 'k', long)]
    pub private_key_file: Option<PathBuf>,

    /// Encrypted keystore file
    #[arg(short = 'u', long, alias = "utc-file")]
    pub keystore_file: Option<PathBuf>,

    /// File with the keystore password; prompts when omitted
    #[arg(short = 'p', long)]
    pub password_file: Option<PathBuf>,
}

impl GlobalOpts {
    /// Returns the network transactions are signed for.
    pub fn network(&self) -> NetworkId {
        NetworkId::new(self.network)
    }

    /// Build a `ClientConfig` from the global options.
    pub fn build_config(&self) -> Result<ClientConfig> {
        let config = ClientConfig::custom(&self.node_url)
            .with_context(|| format!("invalid node URL {:?}", self.node_url))?;
        Ok(config.with_network(self.network()))
    }

    /// Build a node client from the global options.
    pub fn build_client(&self) -> Result<NodeClient> {
        let config = self.build_config()?;
        NodeClient::new(config).context("failed to create node client")
    }
}
