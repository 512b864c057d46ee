//! Error types for the pigeon pipeline.
//!
//! [`PigeonError`] is the error surfaced by every pipeline stage. The remote
//! node layer reports [`RpcError`] and the signer reports [`SigningError`];
//! both are wrapped by the stage that observed them so the caller can tell a
//! failed lookup from a failed broadcast.

use std::path::PathBuf;
use thiserror::Error;

/// A specialized Result type for pigeon operations.
pub type PigeonResult<T> = Result<T, PigeonError>;

/// A specialized Result type for remote node calls.
pub type RpcResult<T> = Result<T, RpcError>;

/// The main error type for the pipeline.
#[derive(Error, Debug)]
pub enum PigeonError {
    /// The input file is unreadable, has an unknown extension, or is malformed.
    #[error("failed to parse {}: {reason}", .path.display())]
    Parse {
        /// The file being loaded
        path: PathBuf,
        /// What was wrong with it
        reason: String,
    },

    /// A nonce or energy price lookup against the node failed.
    #[error("node query failed: {0}")]
    NodeQuery(#[from] RpcError),

    /// The local nonce counter for a sender passed `u64::MAX`.
    #[error("nonce counter overflow for sender {sender}")]
    NonceOverflow {
        /// The sender whose counter overflowed
        sender: String,
    },

    /// A record could not be turned into a signed transaction.
    #[error("failed to sign transaction #{index}: {source}")]
    Signing {
        /// Zero-based position of the record in the batch
        index: usize,
        /// The underlying failure
        #[source]
        source: SigningError,
    },

    /// The node rejected a submission or could not be reached.
    #[error("failed to broadcast transaction #{index}: {source}")]
    Broadcast {
        /// Zero-based position of the blob in the batch
        index: usize,
        /// The underlying failure
        #[source]
        source: RpcError,
    },

    /// An output file could not be written.
    #[error("failed to write {}: {source}", .path.display())]
    Io {
        /// The file being written
        path: PathBuf,
        /// The underlying failure
        #[source]
        source: std::io::Error,
    },

    /// An output list could not be serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PigeonError {
    /// Creates a new parse error for the given file.
    pub fn parse(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Returns true if this is a parse error.
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }

    /// Returns true if the failure happened because no node endpoint is configured.
    pub fn is_not_connected(&self) -> bool {
        match self {
            Self::NodeQuery(e) | Self::Broadcast { source: e, .. } => e.is_not_connected(),
            _ => false,
        }
    }

    /// Returns the batch index of the failing item, if the error is tied to one.
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::Signing { index, .. } | Self::Broadcast { index, .. } => Some(*index),
            _ => None,
        }
    }
}

/// Errors from the JSON-RPC transport.
#[derive(Error, Debug)]
pub enum RpcError {
    /// No endpoint is configured, so no request was attempted.
    #[error("not connected: no node RPC endpoint configured, try adding --node-url")]
    NotConnected,

    /// HTTP transport failure, including timeouts.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The node answered with a non-success HTTP status and no JSON-RPC body.
    #[error("HTTP status {status_code}: {body}")]
    Status {
        /// HTTP status code
        status_code: u16,
        /// Response body, possibly empty
        body: String,
    },

    /// The node answered with a JSON-RPC error object.
    #[error("RPC error ({code}): {message}")]
    Server {
        /// JSON-RPC error code
        code: i64,
        /// Server supplied message
        message: String,
    },

    /// The response was not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The response was valid JSON-RPC but the result had the wrong shape.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl RpcError {
    /// Returns true if this is the offline condition.
    pub fn is_not_connected(&self) -> bool {
        matches!(self, Self::NotConnected)
    }

    /// Returns true if the request timed out.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Http(e) if e.is_timeout())
    }
}

/// Errors turning a resolved record into a signed wire blob.
#[derive(Error, Debug)]
pub enum SigningError {
    /// The destination is not a valid address.
    #[error("invalid address {value:?}: {reason}")]
    InvalidAddress {
        /// The offending input
        value: String,
        /// Why it was rejected
        reason: String,
    },

    /// A numeric field is not an unsigned integer.
    #[error("invalid {field} {value:?}")]
    InvalidNumber {
        /// Field name as it appears in input files
        field: &'static str,
        /// The offending input
        value: String,
    },

    /// The private key material is malformed.
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    /// The signature primitive failed.
    #[error("signature failed: {0}")]
    Crypto(String),

    /// The canonical encoding failed.
    #[error("encoding failed: {0}")]
    Encoding(String),
}

impl SigningError {
    /// Creates a new encoding error
    pub fn encoding<E: std::fmt::Display>(err: E) -> Self {
        Self::Encoding(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = PigeonError::parse("txs.xml", "unsupported file extension");
        assert_eq!(
            err.to_string(),
            "failed to parse txs.xml: unsupported file extension"
        );
        assert!(err.is_parse());
        assert_eq!(err.index(), None);
    }

    #[test]
    fn test_not_connected_is_detected_through_wrappers() {
        assert!(PigeonError::NodeQuery(RpcError::NotConnected).is_not_connected());
        assert!(PigeonError::Broadcast {
            index: 2,
            source: RpcError::NotConnected,
        }
        .is_not_connected());
        assert!(!PigeonError::NodeQuery(RpcError::InvalidResponse("x".into())).is_not_connected());
    }

    #[test]
    fn test_broadcast_error_names_index_and_message() {
        let err = PigeonError::Broadcast {
            index: 2,
            source: RpcError::Server {
                code: -32000,
                message: "nonce too low".to_string(),
            },
        };
        assert_eq!(err.index(), Some(2));
        let msg = err.to_string();
        assert!(msg.contains("#2"));
        assert!(msg.contains("nonce too low"));
    }

    #[test]
    fn test_signing_error_display() {
        let err = PigeonError::Signing {
            index: 0,
            source: SigningError::InvalidNumber {
                field: "nonce",
                value: "abc".to_string(),
            },
        };
        assert!(err.to_string().contains("invalid nonce \"abc\""));
    }
}
