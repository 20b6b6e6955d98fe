//! Operation-by-hash lookup capability.

use std::sync::Arc;

use alloy_primitives::{Address, B256, U256};
use async_trait::async_trait;

use qngrpc_core::BridgeError;

use crate::backend::UserOpIndex;
use crate::types::HashLookupResult;

/// Fetches a user operation given its hash, entry point, chain ID and block range.
#[async_trait]
pub trait UserOpByHashProvider: Send + Sync + 'static {
    async fn user_operation_by_hash(
        &self,
        hash: B256,
        entry_point: Address,
        chain_id: U256,
        block_range: u64,
    ) -> Result<Option<HashLookupResult>, BridgeError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopUserOpByHashProvider;

#[async_trait]
impl UserOpByHashProvider for NoopUserOpByHashProvider {
    async fn user_operation_by_hash(
        &self,
        _hash: B256,
        _entry_point: Address,
        _chain_id: U256,
        _block_range: u64,
    ) -> Result<Option<HashLookupResult>, BridgeError> {
        Ok(None)
    }
}

#[derive(Clone)]
pub struct LiveUserOpByHashProvider {
    index: Arc<dyn UserOpIndex>,
}

impl LiveUserOpByHashProvider {
    pub fn new(index: Arc<dyn UserOpIndex>) -> Self {
        Self { index }
    }
}

#[async_trait]
impl UserOpByHashProvider for LiveUserOpByHashProvider {
    async fn user_operation_by_hash(
        &self,
        hash: B256,
        entry_point: Address,
        chain_id: U256,
        block_range: u64,
    ) -> Result<Option<HashLookupResult>, BridgeError> {
        self.index
            .user_operation_by_hash(hash, entry_point, chain_id, block_range)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Answers every lookup with an inclusion record and keeps the arguments.
    #[derive(Default)]
    struct RecordingIndex {
        calls: Mutex<Vec<(B256, Address, U256, u64)>>,
    }

    #[async_trait]
    impl UserOpIndex for RecordingIndex {
        async fn user_operation_by_hash(
            &self,
            hash: B256,
            entry_point: Address,
            chain_id: U256,
            block_range: u64,
        ) -> Result<Option<HashLookupResult>, BridgeError> {
            self.calls
                .lock()
                .unwrap()
                .push((hash, entry_point, chain_id, block_range));
            Ok(Some(HashLookupResult {
                user_operation: Default::default(),
                entry_point,
                block_number: U256::from(0x10),
                block_hash: B256::repeat_byte(0x22),
                transaction_hash: B256::repeat_byte(0x33),
            }))
        }
    }

    struct FailingIndex;

    #[async_trait]
    impl UserOpIndex for FailingIndex {
        async fn user_operation_by_hash(
            &self,
            _hash: B256,
            _entry_point: Address,
            _chain_id: U256,
            _block_range: u64,
        ) -> Result<Option<HashLookupResult>, BridgeError> {
            Err(BridgeError::backend(std::io::Error::new(
                std::io::ErrorKind::TimedOut,
                "log query timed out",
            )))
        }
    }

    #[tokio::test]
    async fn noop_finds_nothing_for_any_input() {
        for chain in [1u64, 813, 8131] {
            let found = NoopUserOpByHashProvider
                .user_operation_by_hash(B256::repeat_byte(0xab), Address::ZERO, U256::from(chain), u64::MAX)
                .await
                .unwrap();
            assert!(found.is_none());
        }
    }

    #[tokio::test]
    async fn live_passes_backend_error_through() {
        let provider = LiveUserOpByHashProvider::new(Arc::new(FailingIndex));
        let err = provider
            .user_operation_by_hash(B256::ZERO, Address::ZERO, U256::from(1), 10)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "backend");
        assert_eq!(err.to_string(), "log query timed out");
    }

    #[tokio::test]
    async fn live_forwards_arguments_and_result() {
        let index = Arc::new(RecordingIndex::default());
        let provider = LiveUserOpByHashProvider::new(index.clone());
        let hash = B256::repeat_byte(0xab);
        let entry_point = Address::repeat_byte(0x5f);

        let found = provider
            .user_operation_by_hash(hash, entry_point, U256::from(8131), 5_000)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.entry_point, entry_point);
        assert_eq!(found.block_number, U256::from(0x10));
        assert_eq!(found.transaction_hash, B256::repeat_byte(0x33));

        assert_eq!(
            index.calls.lock().unwrap().as_slice(),
            &[(hash, entry_point, U256::from(8131), 5_000)]
        );
    }
}
