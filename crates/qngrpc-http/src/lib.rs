//! qngrpc-http — HTTP JSON-RPC transport backed by `reqwest`.
//!
//! [`HttpRpcClient`] implements [`qngrpc_core::RpcTransport`]: one POST per
//! request, no retry. The same client type serves the QNG node and the
//! primary-chain node.

pub mod client;

pub use client::{HttpClientConfig, HttpRpcClient};
