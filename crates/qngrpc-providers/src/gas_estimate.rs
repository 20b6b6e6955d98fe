//! Gas estimate capability.
//!
//! The live provider carries the execution environment the estimator needs
//! (overhead schedule, chain id, gas ceiling, tracer) so callers only pass
//! the per-operation inputs.

use std::sync::Arc;

use alloy_primitives::{Address, U256};
use async_trait::async_trait;

use qngrpc_core::BridgeError;

use crate::backend::GasEstimator;
use crate::types::{EstimateInput, GasOverhead, StateOverrideSet, UserOperation};

/// Estimates `(verificationGasLimit, callGasLimit)` for a user operation.
#[async_trait]
pub trait GasEstimateProvider: Send + Sync + 'static {
    async fn estimate_gas(
        &self,
        entry_point: Address,
        op: &UserOperation,
        overrides: &StateOverrideSet,
    ) -> Result<(u64, u64), BridgeError>;
}

/// Always estimates `(0, 0)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopGasEstimateProvider;

#[async_trait]
impl GasEstimateProvider for NoopGasEstimateProvider {
    async fn estimate_gas(
        &self,
        _entry_point: Address,
        _op: &UserOperation,
        _overrides: &StateOverrideSet,
    ) -> Result<(u64, u64), BridgeError> {
        Ok((0, 0))
    }
}

/// Delegates to a live estimator with a fixed execution environment.
#[derive(Clone)]
pub struct LiveGasEstimateProvider {
    estimator: Arc<dyn GasEstimator>,
    overhead: GasOverhead,
    chain_id: U256,
    max_gas_limit: U256,
    tracer: Option<String>,
}

impl LiveGasEstimateProvider {
    pub fn new(
        estimator: Arc<dyn GasEstimator>,
        overhead: GasOverhead,
        chain_id: U256,
        max_gas_limit: U256,
        tracer: Option<String>,
    ) -> Self {
        Self {
            estimator,
            overhead,
            chain_id,
            max_gas_limit,
            tracer,
        }
    }
}

#[async_trait]
impl GasEstimateProvider for LiveGasEstimateProvider {
    async fn estimate_gas(
        &self,
        entry_point: Address,
        op: &UserOperation,
        overrides: &StateOverrideSet,
    ) -> Result<(u64, u64), BridgeError> {
        let input = EstimateInput {
            entry_point,
            op,
            overrides,
            overhead: &self.overhead,
            chain_id: self.chain_id,
            max_gas_limit: self.max_gas_limit,
            tracer: self.tracer.as_deref(),
        };
        tracing::debug!(%entry_point, sender = %op.sender, "estimating user operation gas");
        self.estimator.estimate_gas(input).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Records the environment it was handed and answers with fixed limits.
    #[derive(Default)]
    struct EchoEstimator {
        seen: Mutex<Option<(U256, U256, Option<String>, u64, usize)>>,
    }

    #[async_trait]
    impl GasEstimator for EchoEstimator {
        async fn estimate_gas(&self, input: EstimateInput<'_>) -> Result<(u64, u64), BridgeError> {
            *self.seen.lock().unwrap() = Some((
                input.chain_id,
                input.max_gas_limit,
                input.tracer.map(str::to_string),
                input.overhead.fixed,
                input.overrides.len(),
            ));
            Ok((120_000, 45_000))
        }
    }

    struct RevertingEstimator;

    #[async_trait]
    impl GasEstimator for RevertingEstimator {
        async fn estimate_gas(&self, _input: EstimateInput<'_>) -> Result<(u64, u64), BridgeError> {
            Err(BridgeError::Rpc(qngrpc_core::JsonRpcError {
                code: -32500,
                message: "AA21 didn't pay prefund".into(),
                data: None,
            }))
        }
    }

    #[tokio::test]
    async fn noop_estimates_zero() {
        let op = UserOperation {
            call_gas_limit: U256::from(1_000_000),
            ..Default::default()
        };
        let (verification, call) = NoopGasEstimateProvider
            .estimate_gas(Address::ZERO, &op, &StateOverrideSet::new())
            .await
            .unwrap();
        assert_eq!((verification, call), (0, 0));
    }

    #[tokio::test]
    async fn live_passes_environment_to_estimator() {
        let estimator = Arc::new(EchoEstimator::default());
        let provider = LiveGasEstimateProvider::new(
            estimator.clone(),
            GasOverhead::default(),
            U256::from(8131),
            U256::from(25_000_000),
            Some("bundlerCollectorTracer".into()),
        );

        let mut overrides = StateOverrideSet::new();
        overrides.insert(Address::repeat_byte(0x11), Default::default());

        let gas = provider
            .estimate_gas(Address::ZERO, &UserOperation::default(), &overrides)
            .await
            .unwrap();
        assert_eq!(gas, (120_000, 45_000));

        let seen = estimator.seen.lock().unwrap().clone().unwrap();
        assert_eq!(
            seen,
            (
                U256::from(8131),
                U256::from(25_000_000),
                Some("bundlerCollectorTracer".to_string()),
                21_000,
                1
            )
        );
    }

    #[tokio::test]
    async fn live_propagates_estimator_error() {
        let provider = LiveGasEstimateProvider::new(
            Arc::new(RevertingEstimator),
            GasOverhead::default(),
            U256::from(1),
            U256::from(30_000_000),
            None,
        );
        let err = provider
            .estimate_gas(Address::ZERO, &UserOperation::default(), &StateOverrideSet::new())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "AA21 didn't pay prefund");
    }
}
