//! In-process JSON-RPC node stub for integration tests.
//!
//! [`serve_once`] starts an axum server on an ephemeral loopback port that
//! answers every POST with a canned status and body, and hands the first
//! request it sees back to the test.

use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::Router;
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// What the stub saw on the wire.
#[derive(Debug)]
pub struct CapturedRequest {
    pub method: Method,
    pub path: String,
    pub headers: HeaderMap,
    /// Parsed JSON body, `Value::Null` if the body was not JSON.
    pub body: Value,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

#[derive(Clone)]
struct Stub {
    status: StatusCode,
    body: Arc<str>,
    first: Arc<Mutex<Option<oneshot::Sender<CapturedRequest>>>>,
}

async fn reply(
    State(stub): State<Stub>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let captured = CapturedRequest {
        method,
        path: uri.path().to_string(),
        headers,
        body: serde_json::from_slice(&body).unwrap_or(Value::Null),
    };
    if let Some(tx) = stub.first.lock().unwrap().take() {
        let _ = tx.send(captured);
    }

    (
        stub.status,
        [(header::CONTENT_TYPE, "application/json")],
        stub.body.to_string(),
    )
}

/// Serve `status` and `body` for every POST to `/`.
///
/// Returns the base URL and a receiver for the first captured request.
pub async fn serve_once(status: u16, body: &str) -> (String, oneshot::Receiver<CapturedRequest>) {
    let (tx, rx) = oneshot::channel();
    let stub = Stub {
        status: StatusCode::from_u16(status).unwrap(),
        body: Arc::from(body),
        first: Arc::new(Mutex::new(Some(tx))),
    };
    let router = Router::new().route("/", post(reply)).with_state(stub);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });

    (format!("http://{addr}"), rx)
}

/// A reqwest client that never routes loopback traffic through a proxy.
pub fn direct_client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
