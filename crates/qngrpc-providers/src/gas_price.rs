//! Gas price capability.

use std::sync::Arc;

use async_trait::async_trait;

use qngrpc_core::BridgeError;

use crate::backend::FeeOracle;
use crate::types::GasPrices;

/// Fetches values for `maxFeePerGas` and `maxPriorityFeePerGas`.
#[async_trait]
pub trait GasPriceProvider: Send + Sync + 'static {
    async fn gas_prices(&self) -> Result<GasPrices, BridgeError>;
}

/// Always reports zero for both fees.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopGasPriceProvider;

#[async_trait]
impl GasPriceProvider for NoopGasPriceProvider {
    async fn gas_prices(&self) -> Result<GasPrices, BridgeError> {
        Ok(GasPrices::default())
    }
}

/// Reads fees from a live fee oracle.
#[derive(Clone)]
pub struct LiveGasPriceProvider {
    oracle: Arc<dyn FeeOracle>,
}

impl LiveGasPriceProvider {
    pub fn new(oracle: Arc<dyn FeeOracle>) -> Self {
        Self { oracle }
    }
}

#[async_trait]
impl GasPriceProvider for LiveGasPriceProvider {
    async fn gas_prices(&self) -> Result<GasPrices, BridgeError> {
        self.oracle.gas_prices().await
    }
}
