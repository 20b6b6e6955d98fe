//! JSON-RPC 2.0 wire types for the QNG dialect.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{BridgeError, NETWORK_REQUEST_EXCEPTION};

/// Protocol version written into every request.
pub const JSONRPC_VERSION: &str = "2.0";

/// Request id used for every call. Calls are never pipelined, so one fixed id is enough.
pub const DEFAULT_REQUEST_ID: u64 = 1;

/// JSON-RPC request ID: string, number or null.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RpcId {
    Number(u64),
    String(String),
    #[default]
    Null,
}

impl std::fmt::Display for RpcId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "{s}"),
            Self::Null => write!(f, "null"),
        }
    }
}

/// A single JSON-RPC parameter value.
pub type RpcParam = Value;

/// A JSON-RPC 2.0 request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub method: String,
    pub params: Vec<RpcParam>,
    pub id: RpcId,
    pub jsonrpc: String,
}

impl JsonRpcRequest {
    /// Create a new JSON-RPC 2.0 request.
    pub fn new(id: u64, method: impl Into<String>, params: Vec<RpcParam>) -> Self {
        Self {
            method: method.into(),
            params,
            id: RpcId::Number(id),
            jsonrpc: JSONRPC_VERSION.into(),
        }
    }
}

/// A JSON-RPC 2.0 error object.
///
/// Missing fields decode to zero values; a zero `code` means "no error".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcError {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl std::fmt::Display for JsonRpcError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "JSON-RPC error {}: {}", self.code, self.message)
    }
}

/// A JSON-RPC 2.0 response envelope.
///
/// QNG nodes are loose about the envelope, so every field is optional on decode.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    #[serde(default)]
    pub id: RpcId,
    #[serde(default)]
    pub jsonrpc: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    /// Successful response carrying `result`.
    pub fn success(id: RpcId, result: Value) -> Self {
        Self {
            id,
            jsonrpc: JSONRPC_VERSION.into(),
            result: Some(result),
            ..Default::default()
        }
    }

    /// Failed response carrying `error`.
    pub fn failure(id: RpcId, error: JsonRpcError) -> Self {
        Self {
            id,
            jsonrpc: JSONRPC_VERSION.into(),
            error: Some(error),
            ..Default::default()
        }
    }

    /// The node-reported error, ignoring error objects with a zero code.
    pub fn node_error(&self) -> Option<&JsonRpcError> {
        self.error.as_ref().filter(|e| e.code != 0)
    }

    /// Returns `true` if this is a successful response (has result, no error).
    pub fn is_ok(&self) -> bool {
        self.node_error().is_none() && self.result.as_ref().is_some_and(|v| !v.is_null())
    }

    /// Unwrap the result value or classify the failure.
    ///
    /// A non-zero error code wins over any result. An envelope with neither
    /// an error nor a non-null result is a protocol violation.
    pub fn into_result(self) -> Result<Value, BridgeError> {
        if let Some(err) = self.node_error() {
            return Err(BridgeError::Rpc(err.clone()));
        }
        match self.result {
            Some(value) if !value.is_null() => Ok(value),
            _ => Err(BridgeError::Protocol(NETWORK_REQUEST_EXCEPTION.into())),
        }
    }
}
