//! Cross-chain bridge invoker.
//!
//! Submission mirrors what a keyed contract transactor does on an EVM node:
//!
//! ```text
//! CrossOp → txid bytes → export4337 calldata
//!         → nonce (pending) → fee model (EIP-1559 if the head has a base fee, else legacy)
//!         → eth_estimateGas → sign → eth_sendRawTransaction
//! ```
//!
//! Hex decoding happens before the first network call. Anything that fails
//! after that point is reported as [`BridgeError::Submission`].

use std::str::FromStr;
use std::sync::Arc;

use alloy_consensus::{SignableTransaction, TxEip1559, TxEnvelope, TxLegacy};
use alloy_eips::eip2718::Encodable2718;
use alloy_primitives::{keccak256, Address, Bytes, TxKind, B256, U256, U64};
use alloy_signer::SignerSync;
use alloy_signer_local::PrivateKeySigner;
use alloy_sol_types::SolCall;
use async_trait::async_trait;
use serde_json::{json, Value};

use qngrpc_core::{BridgeError, RpcTransport, RpcTransportExt};

use crate::config::MeerchangeConfig;
use crate::contract::IMeerchange;
use crate::op::CrossOp;

/// Request id used for primary-chain calls.
const ETH_REQUEST_ID: u64 = 1;

/// Submits cross-chain operations to the primary chain.
#[async_trait]
pub trait CrossChainBridge: Send + Sync + 'static {
    /// Submit `op` and return the `0x`-prefixed hash of the submitted transaction.
    async fn bridge_send(&self, op: CrossOp) -> Result<String, BridgeError>;
}

/// [`CrossChainBridge`] backed by the meerchange `export4337` method.
pub struct MeerchangeBridge {
    eth: Arc<dyn RpcTransport>,
    signer: PrivateKeySigner,
    contract: Address,
    chain_id: u64,
}

impl std::fmt::Debug for MeerchangeBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MeerchangeBridge")
            .field("eth", &self.eth.url())
            .field("sender", &self.signer.address())
            .field("contract", &self.contract)
            .field("chain_id", &self.chain_id)
            .finish()
    }
}

impl MeerchangeBridge {
    /// Bind the contract at `config.contract_address` on the chain behind `eth`.
    pub fn new(
        eth: Arc<dyn RpcTransport>,
        signer: PrivateKeySigner,
        config: &MeerchangeConfig,
    ) -> Result<Self, BridgeError> {
        let contract = Address::from_str(&config.contract_address).map_err(|e| {
            BridgeError::Encoding(format!(
                "invalid meerchange address {:?}: {e}",
                config.contract_address
            ))
        })?;
        Ok(Self {
            eth,
            signer,
            contract,
            chain_id: config.chain_id,
        })
    }

    /// Parse a hex private key (optional `0x`). The key text never appears in errors.
    pub fn signer_from_hex(key: &str) -> Result<PrivateKeySigner, BridgeError> {
        PrivateKeySigner::from_str(key.trim())
            .map_err(|_| BridgeError::Encoding("private key is not a valid secp256k1 key".into()))
    }

    /// Address the bridge signs as.
    pub fn sender(&self) -> Address {
        self.signer.address()
    }

    pub fn contract(&self) -> Address {
        self.contract
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// ABI-encoded `export4337` call for `op`.
    pub fn export_calldata(op: &CrossOp) -> Result<Bytes, BridgeError> {
        let call = IMeerchange::export4337Call {
            txid: op.txid_bytes()?,
            idx: op.idx,
            fee: op.fee,
            sig: op.sig.clone(),
        };
        Ok(call.abi_encode().into())
    }

    async fn submit(&self, input: Bytes) -> Result<B256, BridgeError> {
        let from = self.signer.address();

        let nonce: U64 = self
            .eth
            .call(
                ETH_REQUEST_ID,
                "eth_getTransactionCount",
                vec![json!(from), json!("pending")],
            )
            .await?;

        let gas_limit: U64 = self
            .eth
            .call(
                ETH_REQUEST_ID,
                "eth_estimateGas",
                vec![json!({ "from": from, "to": self.contract, "data": input })],
            )
            .await?;

        let head = self
            .eth
            .invoke("eth_getBlockByNumber", vec![json!("latest"), json!(false)])
            .await?;

        let envelope = match base_fee(&head)? {
            Some(base_fee) => {
                let tip: U256 = self
                    .eth
                    .call(ETH_REQUEST_ID, "eth_maxPriorityFeePerGas", vec![])
                    .await?;
                let fee_cap = tip.saturating_add(base_fee.saturating_mul(U256::from(2)));
                let tx = TxEip1559 {
                    chain_id: self.chain_id,
                    nonce: nonce.to::<u64>(),
                    gas_limit: gas_limit.to::<u64>(),
                    max_fee_per_gas: to_u128(fee_cap, "maxFeePerGas")?,
                    max_priority_fee_per_gas: to_u128(tip, "maxPriorityFeePerGas")?,
                    to: TxKind::Call(self.contract),
                    value: U256::ZERO,
                    input,
                    ..Default::default()
                };
                let signature = self
                    .signer
                    .sign_hash_sync(&tx.signature_hash())
                    .map_err(|e| BridgeError::Signing(e.to_string()))?;
                TxEnvelope::from(tx.into_signed(signature))
            }
            None => {
                let gas_price: U256 = self
                    .eth
                    .call(ETH_REQUEST_ID, "eth_gasPrice", vec![])
                    .await?;
                let tx = TxLegacy {
                    chain_id: Some(self.chain_id),
                    nonce: nonce.to::<u64>(),
                    gas_price: to_u128(gas_price, "gasPrice")?,
                    gas_limit: gas_limit.to::<u64>(),
                    to: TxKind::Call(self.contract),
                    value: U256::ZERO,
                    input,
                };
                let signature = self
                    .signer
                    .sign_hash_sync(&tx.signature_hash())
                    .map_err(|e| BridgeError::Signing(e.to_string()))?;
                TxEnvelope::from(tx.into_signed(signature))
            }
        };

        let raw = envelope.encoded_2718();
        let tx_hash = keccak256(&raw);

        let node_hash = self
            .eth
            .invoke(
                "eth_sendRawTransaction",
                vec![json!(format!("0x{}", hex::encode(&raw)))],
            )
            .await?;
        tracing::debug!(%tx_hash, node_hash = %node_hash, "raw transaction relayed");

        Ok(tx_hash)
    }
}

#[async_trait]
impl CrossChainBridge for MeerchangeBridge {
    async fn bridge_send(&self, op: CrossOp) -> Result<String, BridgeError> {
        let input = Self::export_calldata(&op)?;

        let tx_hash = self.submit(input).await.map_err(|e| {
            tracing::warn!(
                txid = %op.txid,
                idx = op.idx,
                kind = e.kind(),
                error = %e,
                "meerchange export submission failed"
            );
            BridgeError::submission(e)
        })?;

        let tx_hash = format!("0x{}", hex::encode(tx_hash));
        tracing::info!(
            txid = %op.txid,
            idx = op.idx,
            fee = op.fee,
            tx_hash = %tx_hash,
            "meerchange export submitted"
        );
        Ok(tx_hash)
    }
}

/// `baseFeePerGas` of a block object, if the chain has one.
fn base_fee(block: &Value) -> Result<Option<U256>, BridgeError> {
    match block.get("baseFeePerGas") {
        None | Some(Value::Null) => Ok(None),
        Some(v) => Ok(Some(serde_json::from_value(v.clone())?)),
    }
}

fn to_u128(value: U256, field: &str) -> Result<u128, BridgeError> {
    u128::try_from(value)
        .map_err(|_| BridgeError::Protocol(format!("{field} {value} does not fit in 128 bits")))
}
