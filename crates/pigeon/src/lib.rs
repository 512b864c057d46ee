//! # Pigeon
//!
//! Batch signing and broadcasting of Core Blockchain transactions.
//!
//! Pigeon reads transaction descriptions from a CSV or JSON file, fills in
//! missing nonces, energy prices and energy limits from a node, signs each
//! transaction, and streams the signed blobs to the node one at a time.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pigeon::api::NodeClient;
//! use pigeon::config::ClientConfig;
//! use pigeon::crypto::{BcsCanonicalizer, Ed25519PrivateKey};
//! use pigeon::{broadcast, loader, sink, transaction};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ClientConfig::local();
//!     let network = config.network();
//!     let node = NodeClient::new(config)?;
//!     let key = Ed25519PrivateKey::from_hex(&std::fs::read_to_string("key.txt")?)?;
//!
//!     let records = loader::load_transactions("txs.csv", true)?;
//!     let resolved = transaction::resolve_transactions(records, &node).await?;
//!     let blobs = transaction::sign_transactions(&resolved, &key, &BcsCanonicalizer, network)
//!         .into_result()?;
//!
//!     let ids = broadcast::stream_signed_transactions(&blobs, &node)
//!         .await
//!         .into_result()?;
//!     sink::write_tx_ids_to_console(&ids);
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`loader`] - Reading records and pre-signed blobs from files
//! - [`transaction`] - Records, field resolution and signing
//! - [`broadcast`] - Streaming signed blobs to the node
//! - [`sink`] - Writing identifiers and signed blobs
//! - [`api`] - Node client and capability traits
//! - [`crypto`] - Signature scheme and wire encoding
//! - [`types`] - Addresses, amounts and network identifiers

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]

pub mod api;
pub mod broadcast;
pub mod config;
pub mod crypto;
pub mod error;
pub mod loader;
pub mod sink;
pub mod transaction;
pub mod types;

pub use config::ClientConfig;
pub use error::{PigeonError, PigeonResult, RpcError, SigningError};
pub use transaction::BatchOutcome;
