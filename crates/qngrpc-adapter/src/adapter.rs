//! Adapter facade over the QNG invoker and the cross-chain bridge.

use std::sync::Arc;

use serde_json::{json, Value};

use qngrpc_core::{methods, BridgeError, RpcTransport};
use qngrpc_meerchange::{CrossChainBridge, CrossOp};

/// The five operations the bundler exposes in the `qng_*` namespace.
///
/// Node-bound calls pass their arguments through untouched and return the
/// node's result as is. Cheap to clone; clones share the transport and bridge.
#[derive(Clone)]
pub struct RpcAdapter {
    qng: Arc<dyn RpcTransport>,
    bridge: Option<Arc<dyn CrossChainBridge>>,
}

impl std::fmt::Debug for RpcAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcAdapter")
            .field("qng", &self.qng.url())
            .field("bridge", &self.bridge.is_some())
            .finish()
    }
}

impl RpcAdapter {
    /// Adapter without a bridge; `cross_send` fails with [`BridgeError::BridgeUnavailable`].
    pub fn new(qng: Arc<dyn RpcTransport>) -> Self {
        Self { qng, bridge: None }
    }

    pub fn with_bridge(mut self, bridge: Arc<dyn CrossChainBridge>) -> Self {
        self.bridge = Some(bridge);
        self
    }

    pub fn has_bridge(&self) -> bool {
        self.bridge.is_some()
    }

    /// The QNG node this adapter talks to.
    pub fn qng_url(&self) -> &str {
        self.qng.url()
    }

    /// `qng_getBalance(address, coinId)`.
    pub async fn get_balance(&self, address: &str, coin_id: i64) -> Result<Value, BridgeError> {
        self.qng
            .invoke(methods::GET_BALANCE, vec![json!(address), json!(coin_id)])
            .await
    }

    /// `qng_addBalance(address)`.
    pub async fn add_balance(&self, address: &str) -> Result<Value, BridgeError> {
        self.qng
            .invoke(methods::ADD_BALANCE, vec![json!(address)])
            .await
    }

    /// `qng_getUTXOs(address, limit, locked)`.
    pub async fn get_utxos(
        &self,
        address: &str,
        limit: i64,
        locked: bool,
    ) -> Result<Value, BridgeError> {
        self.qng
            .invoke(
                methods::GET_UTXOS,
                vec![json!(address), json!(limit), json!(locked)],
            )
            .await
    }

    /// `qng_sendRawTransaction(rawTxHex, allowHighFee)`.
    pub async fn send_raw_transaction(
        &self,
        raw_tx: &str,
        allow_high_fee: bool,
    ) -> Result<Value, BridgeError> {
        self.qng
            .invoke(
                methods::SEND_RAW_TRANSACTION,
                vec![json!(raw_tx), json!(allow_high_fee)],
            )
            .await
    }

    /// Replay a QNG export on the primary chain.
    ///
    /// Waits for submission and returns the transaction hash as a JSON string.
    pub async fn cross_send(
        &self,
        txid: &str,
        idx: u32,
        fee: u64,
        sig: &str,
    ) -> Result<Value, BridgeError> {
        let bridge = self.bridge.as_ref().ok_or(BridgeError::BridgeUnavailable)?;
        tracing::debug!(txid, idx, fee, "cross-chain send requested");
        let tx_hash = bridge.bridge_send(CrossOp::new(txid, idx, fee, sig)).await?;
        Ok(Value::String(tx_hash))
    }
}
