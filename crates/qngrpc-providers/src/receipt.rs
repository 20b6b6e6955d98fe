//! Receipt lookup capability.

use std::sync::Arc;

use alloy_primitives::{Address, B256};
use async_trait::async_trait;

use qngrpc_core::BridgeError;

use crate::backend::ReceiptIndex;
use crate::types::UserOperationReceipt;

/// Fetches a [`UserOperationReceipt`] given a userOpHash, entry point and
/// how many blocks back to search.
#[async_trait]
pub trait UserOpReceiptProvider: Send + Sync + 'static {
    async fn user_operation_receipt(
        &self,
        hash: B256,
        entry_point: Address,
        block_range: u64,
    ) -> Result<Option<UserOperationReceipt>, BridgeError>;
}

/// Never finds a receipt.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopReceiptProvider;

#[async_trait]
impl UserOpReceiptProvider for NoopReceiptProvider {
    async fn user_operation_receipt(
        &self,
        _hash: B256,
        _entry_point: Address,
        _block_range: u64,
    ) -> Result<Option<UserOperationReceipt>, BridgeError> {
        Ok(None)
    }
}

/// Looks receipts up through a live receipt index.
#[derive(Clone)]
pub struct LiveReceiptProvider {
    index: Arc<dyn ReceiptIndex>,
}

impl LiveReceiptProvider {
    pub fn new(index: Arc<dyn ReceiptIndex>) -> Self {
        Self { index }
    }
}

#[async_trait]
impl UserOpReceiptProvider for LiveReceiptProvider {
    async fn user_operation_receipt(
        &self,
        hash: B256,
        entry_point: Address,
        block_range: u64,
    ) -> Result<Option<UserOperationReceipt>, BridgeError> {
        self.index
            .user_operation_receipt(hash, entry_point, block_range)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, b256, U256};
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingIndex {
        calls: Mutex<Vec<(B256, Address, u64)>>,
    }

    #[async_trait]
    impl ReceiptIndex for RecordingIndex {
        async fn user_operation_receipt(
            &self,
            hash: B256,
            entry_point: Address,
            block_range: u64,
        ) -> Result<Option<UserOperationReceipt>, BridgeError> {
            self.calls.lock().unwrap().push((hash, entry_point, block_range));
            Ok(Some(UserOperationReceipt {
                user_op_hash: hash,
                sender: Address::ZERO,
                paymaster: Address::ZERO,
                nonce: U256::from(3),
                success: true,
                actual_gas_cost: U256::from(21_000),
                actual_gas_used: U256::from(21_000),
                from: Address::ZERO,
                receipt: serde_json::json!({"status": "0x1"}),
                logs: vec![],
            }))
        }
    }

    struct UnreachableIndex;

    #[async_trait]
    impl ReceiptIndex for UnreachableIndex {
        async fn user_operation_receipt(
            &self,
            _hash: B256,
            _entry_point: Address,
            _block_range: u64,
        ) -> Result<Option<UserOperationReceipt>, BridgeError> {
            Err(BridgeError::Transport("connection reset by peer".into()))
        }
    }

    const HASH: B256 = b256!("00000000000000000000000000000000000000000000000000000000000000aa");
    const ENTRY_POINT: Address = address!("5FF137D4b0FDCD49DcA30c7CF57E578a026d2789");

    #[tokio::test]
    async fn noop_finds_nothing() {
        let found = NoopReceiptProvider
            .user_operation_receipt(HASH, ENTRY_POINT, 2_000)
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn live_forwards_arguments() {
        let index = Arc::new(RecordingIndex::default());
        let provider = LiveReceiptProvider::new(index.clone());

        let receipt = provider
            .user_operation_receipt(HASH, ENTRY_POINT, 2_000)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(receipt.user_op_hash, HASH);
        assert!(receipt.success);
        assert_eq!(
            index.calls.lock().unwrap().as_slice(),
            &[(HASH, ENTRY_POINT, 2_000)]
        );
    }

    #[tokio::test]
    async fn live_passes_index_error_through() {
        let provider = LiveReceiptProvider::new(Arc::new(UnreachableIndex));
        let err = provider
            .user_operation_receipt(HASH, ENTRY_POINT, 2_000)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "transport");
        assert_eq!(err.to_string(), "transport error: connection reset by peer");
    }
}
