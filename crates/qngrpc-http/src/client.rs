//! HTTP JSON-RPC client backed by `reqwest`.
//!
//! Every call is a single POST with `Content-Type: application/json`. Errors
//! are surfaced to the caller immediately; backoff, if wanted, belongs to
//! whoever calls the transport.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;

use qngrpc_core::error::BridgeError;
use qngrpc_core::request::{JsonRpcRequest, JsonRpcResponse};
use qngrpc_core::transport::RpcTransport;

/// Longest slice of an unreadable body quoted in an error message.
const BODY_SNIPPET_LEN: usize = 256;

/// Configuration for `HttpRpcClient`.
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Overall deadline for one request, connect through body read.
    pub request_timeout: Duration,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// HTTP JSON-RPC client.
///
/// Holds one `reqwest::Client` for its lifetime, so connections are reused
/// across calls and the client can be shared between tasks.
#[derive(Debug, Clone)]
pub struct HttpRpcClient {
    url: String,
    http: reqwest::Client,
}

impl HttpRpcClient {
    /// Create a new client for the given JSON-RPC endpoint URL.
    pub fn new(url: impl Into<String>, config: HttpClientConfig) -> Result<Self, BridgeError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| BridgeError::Transport(format!("failed to build HTTP client: {e}")))?;
        Ok(Self::with_client(url, http))
    }

    /// Create with default configuration.
    pub fn default_for(url: impl Into<String>) -> Result<Self, BridgeError> {
        Self::new(url, HttpClientConfig::default())
    }

    /// Wrap an existing `reqwest::Client`, e.g. one shared by several endpoints.
    pub fn with_client(url: impl Into<String>, http: reqwest::Client) -> Self {
        Self {
            url: url.into(),
            http,
        }
    }
}

#[async_trait]
impl RpcTransport for HttpRpcClient {
    async fn send(&self, req: JsonRpcRequest) -> Result<JsonRpcResponse, BridgeError> {
        let body = serde_json::to_vec(&req).map_err(encode_error)?;

        let resp = self
            .http
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| BridgeError::Transport(e.to_string()))?;

        let status = resp.status();
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| BridgeError::Transport(e.to_string()))?;

        // Nodes often pair a JSON-RPC error with a 4xx/5xx status, so the
        // envelope is decoded before the status is looked at.
        match serde_json::from_slice::<JsonRpcResponse>(&bytes) {
            Ok(envelope) => Ok(envelope),
            Err(e) if status.is_success() => Err(BridgeError::Transport(format!(
                "malformed response body: {e}"
            ))),
            Err(_) => {
                let text = String::from_utf8_lossy(&bytes);
                let snippet: String = text.chars().take(BODY_SNIPPET_LEN).collect();
                Err(BridgeError::Transport(format!(
                    "HTTP {}: {snippet}",
                    status.as_u16()
                )))
            }
        }
    }

    fn url(&self) -> &str {
        &self.url
    }
}

/// A request that cannot be serialized never reaches the node.
fn encode_error(err: serde_json::Error) -> BridgeError {
    BridgeError::Transport(format!("failed to encode request: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_timeout() {
        assert_eq!(
            HttpClientConfig::default().request_timeout,
            Duration::from_secs(30)
        );
    }

    #[test]
    fn url_is_kept() {
        let client = HttpRpcClient::default_for("http://127.0.0.1:18131").unwrap();
        assert_eq!(client.url(), "http://127.0.0.1:18131");
    }

    #[test]
    fn request_encoding_failure_is_transport_error() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = encode_error(err);
        assert_eq!(err.kind(), "transport");
        assert!(err.to_string().starts_with("transport error: failed to encode request"));
    }

    #[tokio::test]
    async fn connection_refused_is_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = HttpRpcClient::with_client(
            format!("http://{addr}"),
            reqwest::Client::builder().no_proxy().build().unwrap(),
        );
        let err = client.invoke("qng_getBalance", vec![]).await.unwrap_err();
        assert!(matches!(err, BridgeError::Transport(_)), "got {err:?}");
    }
}
