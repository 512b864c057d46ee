//! JSON-RPC node client.

use crate::api::{BlockTag, NodeReader, NodeWriter};
use crate::config::ClientConfig;
use crate::error::{RpcError, RpcResult};
use async_trait::async_trait;
use num_bigint::BigUint;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

const JSON_CONTENT_TYPE: &str = "application/json";

const SEND_RAW_TRANSACTION: &str = "xcb_sendRawTransaction";
const GET_TRANSACTION_COUNT: &str = "xcb_getTransactionCount";
const ENERGY_PRICE: &str = "xcb_energyPrice";

/// JSON-RPC request body.
#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    method: &'a str,
    params: Vec<serde_json::Value>,
    id: u64,
}

/// JSON-RPC response body.
#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<String>,
    #[serde(default)]
    error: Option<RpcErrorObject>,
}

/// JSON-RPC error object.
#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

/// Client for a node's JSON-RPC interface.
///
/// Calls are issued one at a time and each is bounded by the configured
/// timeout. A client built from an offline configuration fails every call
/// with [`RpcError::NotConnected`] before doing any I/O.
///
/// # Example
///
/// ```rust,no_run
/// use pigeon::api::{NodeClient, NodeReader};
/// use pigeon::config::ClientConfig;
///
/// #[tokio::main]
/// async fn main() -> anyhow::Result<()> {
///     let client = NodeClient::new(ClientConfig::local())?;
///     let price = client.energy_price().await?;
///     println!("energy price: {price}");
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct NodeClient {
    config: ClientConfig,
    client: Client,
}

impl NodeClient {
    /// Creates a new node client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: ClientConfig) -> RpcResult<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self { config, client })
    }

    /// Returns the endpoint, if the client is online.
    pub fn endpoint(&self) -> Option<&Url> {
        self.config.endpoint()
    }

    /// Returns the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn call(&self, method: &str, params: Vec<serde_json::Value>) -> RpcResult<String> {
        let url = self.endpoint().cloned().ok_or(RpcError::NotConnected)?;
        let request = RpcRequest {
            jsonrpc: "2.0",
            method,
            params,
            id: 0,
        };

        tracing::trace!(method, %url, "sending JSON-RPC request");
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .header(ACCEPT, JSON_CONTENT_TYPE)
            .json(&request)
            .send()
            .await?;

        Self::handle_response(response).await
    }

    async fn handle_response(response: reqwest::Response) -> RpcResult<String> {
        let status = response.status();
        let body = response.text().await?;

        let parsed: Result<RpcResponse, _> = serde_json::from_str(&body);
        if !status.is_success() {
            // Some nodes report JSON-RPC errors with a non-2xx status.
            if let Ok(RpcResponse {
                error: Some(err), ..
            }) = parsed
            {
                return Err(RpcError::Server {
                    code: err.code,
                    message: err.message,
                });
            }
            return Err(RpcError::Status {
                status_code: status.as_u16(),
                body,
            });
        }

        match parsed? {
            RpcResponse {
                error: Some(err), ..
            } => Err(RpcError::Server {
                code: err.code,
                message: err.message,
            }),
            RpcResponse {
                result: Some(result),
                ..
            } => Ok(result),
            RpcResponse { result: None, .. } => {
                Err(RpcError::InvalidResponse("missing result".into()))
            }
        }
    }
}

#[async_trait]
impl NodeReader for NodeClient {
    async fn get_transaction_count(&self, address: &str, block: BlockTag) -> RpcResult<u64> {
        let result = self
            .call(
                GET_TRANSACTION_COUNT,
                vec![address.into(), block.as_str().into()],
            )
            .await?;
        parse_quantity_u64(&result)
    }

    async fn energy_price(&self) -> RpcResult<BigUint> {
        let result = self.call(ENERGY_PRICE, Vec::new()).await?;
        parse_quantity(&result)
    }
}

#[async_trait]
impl NodeWriter for NodeClient {
    async fn send_raw_transaction(&self, blob: &str) -> RpcResult<String> {
        self.call(SEND_RAW_TRANSACTION, vec![blob.into()]).await
    }
}

/// Parses a `0x`-prefixed hex quantity.
fn parse_quantity(value: &str) -> RpcResult<BigUint> {
    let digits = value
        .strip_prefix("0x")
        .ok_or_else(|| RpcError::InvalidResponse(format!("expected hex quantity, got {value:?}")))?;
    BigUint::parse_bytes(digits.as_bytes(), 16)
        .ok_or_else(|| RpcError::InvalidResponse(format!("invalid hex quantity {value:?}")))
}

fn parse_quantity_u64(value: &str) -> RpcResult<u64> {
    let quantity = parse_quantity(value)?;
    u64::try_from(&quantity)
        .map_err(|_| RpcError::InvalidResponse(format!("quantity {value} does not fit in u64")))
}
