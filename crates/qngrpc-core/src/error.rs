//! Error taxonomy shared by the invoker, the providers and the bridge.

use thiserror::Error;

use crate::request::JsonRpcError;

/// Message carried by [`BridgeError::Protocol`] when a node answers with
/// neither a result nor an error.
pub const NETWORK_REQUEST_EXCEPTION: &str = "network request exception";

/// Errors returned by qngrpc operations.
///
/// Nothing here is fatal to the process; every variant is handed back to the
/// immediate caller.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// HTTP request failed (connection refused, timeout, unreadable body).
    #[error("transport error: {0}")]
    Transport(String),

    /// The node answered with an envelope that carries no usable result.
    #[error("{0}")]
    Protocol(String),

    /// The node reported an application error. Displays the node's message verbatim.
    #[error("{}", .0.message)]
    Rpc(JsonRpcError),

    /// Malformed hex or address input, detected before any network call.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// The primary chain rejected, or could not be asked to accept, a transaction.
    #[error("transaction submission failed: {source}")]
    Submission {
        #[source]
        source: Box<BridgeError>,
    },

    /// Local transaction signing failed.
    #[error("signing error: {0}")]
    Signing(String),

    /// A result could not be decoded into the requested type.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Positional params did not match what the method expects.
    #[error("invalid params for {method}: {reason}")]
    InvalidParams { method: String, reason: String },

    /// The method name is not routed by the adapter.
    #[error("method not found: {0}")]
    MethodNotFound(String),

    /// Cross-chain send was requested but no bridge is wired in.
    #[error("cross-chain bridge is not configured")]
    BridgeUnavailable,

    /// Error raised by an external estimation/lookup subsystem, passed through as is.
    #[error(transparent)]
    Backend(Box<dyn std::error::Error + Send + Sync>),
}

impl BridgeError {
    /// Wrap any failure that happened while submitting a transaction.
    pub fn submission(source: BridgeError) -> Self {
        Self::Submission {
            source: Box::new(source),
        }
    }

    /// Wrap an error coming from an external subsystem.
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Box::new(err))
    }

    /// Returns `true` if the node itself reported the error.
    pub fn is_rpc_error(&self) -> bool {
        matches!(self, Self::Rpc(_))
    }

    /// Returns the node-reported error object, if any.
    pub fn rpc_error(&self) -> Option<&JsonRpcError> {
        match self {
            Self::Rpc(err) => Some(err),
            _ => None,
        }
    }

    /// Short stable label for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport",
            Self::Protocol(_) => "protocol",
            Self::Rpc(_) => "rpc",
            Self::Encoding(_) => "encoding",
            Self::Submission { .. } => "submission",
            Self::Signing(_) => "signing",
            Self::Decode(_) => "decode",
            Self::InvalidParams { .. } => "invalid_params",
            Self::MethodNotFound(_) => "method_not_found",
            Self::BridgeUnavailable => "bridge_unavailable",
            Self::Backend(_) => "backend",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rpc_error_displays_node_message() {
        let err = BridgeError::Rpc(JsonRpcError {
            code: 1,
            message: "bad address".into(),
            data: None,
        });
        assert_eq!(err.to_string(), "bad address");
        assert!(err.is_rpc_error());
        assert_eq!(err.rpc_error().map(|e| e.code), Some(1));
    }

    #[test]
    fn submission_keeps_source() {
        let err = BridgeError::submission(BridgeError::Transport("connection refused".into()));
        assert_eq!(err.kind(), "submission");
        assert_eq!(
            err.to_string(),
            "transaction submission failed: transport error: connection refused"
        );
        let source = std::error::Error::source(&err).map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("transport error: connection refused"));
    }

    #[test]
    fn backend_is_transparent() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "indexer offline");
        let err = BridgeError::backend(io);
        assert_eq!(err.to_string(), "indexer offline");
        assert_eq!(err.kind(), "backend");
    }
}
