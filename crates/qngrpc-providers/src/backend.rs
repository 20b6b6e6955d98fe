//! Narrow interfaces to the external subsystems behind the live providers.
//!
//! Fee-market computation, receipt scanning, op indexing and gas estimation
//! are implemented elsewhere. A node connection that offers them implements
//! these traits; the live providers hold it as `Arc<dyn …>` and never add
//! retry or caching on top.

use alloy_primitives::{Address, B256, U256};
use async_trait::async_trait;

use qngrpc_core::BridgeError;

use crate::types::{EstimateInput, GasPrices, HashLookupResult, UserOperationReceipt};

/// Source of current `maxFeePerGas` / `maxPriorityFeePerGas` values.
#[async_trait]
pub trait FeeOracle: Send + Sync + 'static {
    async fn gas_prices(&self) -> Result<GasPrices, BridgeError>;
}

/// Scans entry-point logs for the receipt of a user operation.
#[async_trait]
pub trait ReceiptIndex: Send + Sync + 'static {
    async fn user_operation_receipt(
        &self,
        hash: B256,
        entry_point: Address,
        block_range: u64,
    ) -> Result<Option<UserOperationReceipt>, BridgeError>;
}

/// Finds a user operation, and where it was included, by its hash.
#[async_trait]
pub trait UserOpIndex: Send + Sync + 'static {
    async fn user_operation_by_hash(
        &self,
        hash: B256,
        entry_point: Address,
        chain_id: U256,
        block_range: u64,
    ) -> Result<Option<HashLookupResult>, BridgeError>;
}

/// Simulates a user operation and returns `(verificationGas, callGas)`.
#[async_trait]
pub trait GasEstimator: Send + Sync + 'static {
    async fn estimate_gas(&self, input: EstimateInput<'_>) -> Result<(u64, u64), BridgeError>;
}
