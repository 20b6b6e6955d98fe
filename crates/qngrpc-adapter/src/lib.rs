//! qngrpc-adapter — the `qng_*` method surface seen by the bundler.
//!
//! [`RpcAdapter`] forwards balance, UTXO and raw-transaction calls to the QNG
//! node unchanged and hands cross-chain sends to a [`CrossChainBridge`].
//! [`RpcAdapter::dispatch`] does the same for a method name plus positional
//! params, as received from a JSON-RPC front end.
//!
//! [`CrossChainBridge`]: qngrpc_meerchange::CrossChainBridge

pub mod adapter;
pub mod router;

pub use adapter::RpcAdapter;
