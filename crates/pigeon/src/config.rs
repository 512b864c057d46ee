//! Client and network configuration.
//!
//! The node client talks to a single JSON-RPC endpoint. When no endpoint is
//! configured the client is offline and every remote call fails with
//! [`RpcError::NotConnected`](crate::error::RpcError::NotConnected) without
//! touching the network.

use crate::types::NetworkId;
use std::time::Duration;
use url::Url;

/// Default per-request timeout for node calls.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 5;

/// Default node endpoint used by the CLI.
pub const LOCAL_NODE_URL: &str = "http://127.0.0.1:8545";

/// Energy limit assigned to records that leave it empty.
pub const DEFAULT_ENERGY_LIMIT: u64 = 21_000;

/// Configuration for the node client.
///
/// # Example
///
/// ```rust
/// use pigeon::config::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig::local().with_timeout(Duration::from_secs(10));
/// assert!(config.is_online());
///
/// let offline = ClientConfig::offline();
/// assert!(!offline.is_online());
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// JSON-RPC endpoint, `None` when offline
    pub(crate) endpoint: Option<Url>,
    /// Request timeout
    pub(crate) timeout: Duration,
    /// Network the transactions are bound to
    pub(crate) network: NetworkId,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::local()
    }
}

impl ClientConfig {
    /// Configuration for a node on the local machine.
    pub fn local() -> Self {
        Self {
            endpoint: Url::parse(LOCAL_NODE_URL).ok(),
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            network: NetworkId::MAINNET,
        }
    }

    /// Configuration without an endpoint.
    pub fn offline() -> Self {
        Self {
            endpoint: None,
            ..Self::local()
        }
    }

    /// Configuration for a custom endpoint.
    ///
    /// An empty string yields an offline configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed.
    pub fn custom(url: &str) -> Result<Self, url::ParseError> {
        let url = url.trim();
        if url.is_empty() {
            return Ok(Self::offline());
        }
        Ok(Self::local().with_endpoint(Url::parse(url)?))
    }

    /// Sets the endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: Url) -> Self {
        self.endpoint = Some(endpoint);
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the network identifier.
    #[must_use]
    pub fn with_network(mut self, network: NetworkId) -> Self {
        self.network = network;
        self
    }

    /// Returns the endpoint, if any.
    pub fn endpoint(&self) -> Option<&Url> {
        self.endpoint.as_ref()
    }

    /// Returns the request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the network identifier.
    pub fn network(&self) -> NetworkId {
        self.network
    }

    /// Returns true if an endpoint is configured.
    pub fn is_online(&self) -> bool {
        self.endpoint.is_some()
    }
}
