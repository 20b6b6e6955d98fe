//! qngrpc-core — foundation traits and types for the QNG bridge.
//!
//! # Overview
//!
//! The bundler talks to two chains: an EVM-compatible primary chain and the
//! QNG chain, which speaks its own `qng_*` JSON-RPC dialect. This crate
//! defines what both sides share:
//!
//! - [`RpcTransport`]: the async trait every JSON-RPC endpoint implements,
//!   including the generic [`RpcTransport::invoke`] call
//! - [`JsonRpcRequest`] / [`JsonRpcResponse`]: wire types
//! - [`BridgeError`]: the error taxonomy used by every qngrpc crate
//! - [`methods`]: the recognised `qng_*` method names

pub mod error;
pub mod methods;
pub mod request;
pub mod transport;

pub use error::BridgeError;
pub use request::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, RpcId, RpcParam};
pub use transport::{RpcTransport, RpcTransportExt};
