//! The `RpcTransport` trait, the core abstraction for every JSON-RPC endpoint.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::BridgeError;
use crate::request::{JsonRpcRequest, JsonRpcResponse, DEFAULT_REQUEST_ID};

/// The central async trait every JSON-RPC transport must implement.
///
/// Both the QNG node and the primary-chain node are reached through it.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` for use across Tokio tasks.
///
/// # Object Safety
/// The trait is object-safe and can be stored as `Arc<dyn RpcTransport>`.
#[async_trait]
pub trait RpcTransport: Send + Sync + 'static {
    /// Send a single JSON-RPC request and return the decoded envelope.
    ///
    /// Implementations make exactly one attempt.
    async fn send(&self, req: JsonRpcRequest) -> Result<JsonRpcResponse, BridgeError>;

    /// Return the transport's identifier (URL or name).
    fn url(&self) -> &str;

    /// Generic invoker: call `method` with `params` and return the raw result.
    ///
    /// The request always carries id 1. The result is returned unchanged;
    /// callers know the shape each method produces.
    async fn invoke(&self, method: &str, params: Vec<Value>) -> Result<Value, BridgeError> {
        let req = JsonRpcRequest::new(DEFAULT_REQUEST_ID, method, params);
        tracing::debug!(method, url = self.url(), "invoking JSON-RPC method");
        let resp = self.send(req).await?;
        resp.into_result().inspect_err(|e| {
            tracing::warn!(method, url = self.url(), kind = e.kind(), error = %e, "JSON-RPC call failed");
        })
    }
}

/// Typed calls on top of [`RpcTransport`], available on `dyn RpcTransport` too.
#[async_trait]
pub trait RpcTransportExt: RpcTransport {
    /// Convenience: call a method and deserialize the result.
    async fn call<T: DeserializeOwned + Send>(
        &self,
        id: u64,
        method: &str,
        params: Vec<Value>,
    ) -> Result<T, BridgeError>;
}

#[async_trait]
impl<R: RpcTransport + ?Sized> RpcTransportExt for R {
    async fn call<T: DeserializeOwned + Send>(
        &self,
        id: u64,
        method: &str,
        params: Vec<Value>,
    ) -> Result<T, BridgeError> {
        let req = JsonRpcRequest::new(id, method, params);
        tracing::debug!(method, url = self.url(), "calling JSON-RPC method");
        let resp = self.send(req).await?;
        let result = resp.into_result()?;
        serde_json::from_value(result).map_err(BridgeError::Decode)
    }
}
