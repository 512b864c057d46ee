//! Node access.
//!
//! The pipeline reaches the node only through two capability traits:
//!
//! - [`NodeReader`] - nonce and energy price lookups used by the resolver
//! - [`NodeWriter`] - raw transaction submission used by the streamer
//!
//! [`NodeClient`] implements both over JSON-RPC. Tests substitute in-memory
//! fakes.

mod rpc;

pub use rpc::NodeClient;

use crate::error::RpcResult;
use async_trait::async_trait;
use num_bigint::BigUint;
use std::fmt;

/// Block to evaluate account state against.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BlockTag {
    /// Latest block plus the node's pending pool.
    #[default]
    Pending,
    /// Latest mined block.
    Latest,
}

impl BlockTag {
    /// Returns the JSON-RPC spelling of the tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Latest => "latest",
        }
    }
}

impl fmt::Display for BlockTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read-only node queries used to fill in missing transaction fields.
#[async_trait]
pub trait NodeReader: Send + Sync {
    /// Returns the number of transactions sent from `address` as of `block`.
    async fn get_transaction_count(&self, address: &str, block: BlockTag) -> RpcResult<u64>;

    /// Returns the node's current energy price in the smallest unit.
    async fn energy_price(&self) -> RpcResult<BigUint>;
}

/// Transaction submission.
#[async_trait]
pub trait NodeWriter: Send + Sync {
    /// Submits a `0x`-prefixed signed transaction blob and returns its
    /// identifier as reported by the node.
    async fn send_raw_transaction(&self, blob: &str) -> RpcResult<String>;
}
