//! Provider registry: one provider per capability, fixed at startup.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use qngrpc_providers::{LiveGasPriceProvider, ProviderRegistry, FeeOracle};
//!
//! fn wire(oracle: Arc<dyn FeeOracle>) -> ProviderRegistry {
//!     ProviderRegistry::builder()
//!         .gas_prices(LiveGasPriceProvider::new(oracle))
//!         .build()
//! }
//! ```

use std::sync::Arc;

use crate::gas_estimate::{GasEstimateProvider, NoopGasEstimateProvider};
use crate::gas_price::{GasPriceProvider, NoopGasPriceProvider};
use crate::receipt::{NoopReceiptProvider, UserOpReceiptProvider};
use crate::userop_lookup::{NoopUserOpByHashProvider, UserOpByHashProvider};

/// The four capability slots the bundler pipeline reads from.
///
/// Cloning is cheap and shares the underlying providers. A built registry
/// cannot be changed; build a new one to pick different providers.
#[derive(Clone)]
pub struct ProviderRegistry {
    receipt: Arc<dyn UserOpReceiptProvider>,
    gas_prices: Arc<dyn GasPriceProvider>,
    gas_estimate: Arc<dyn GasEstimateProvider>,
    userop_by_hash: Arc<dyn UserOpByHashProvider>,
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        ProviderRegistryBuilder::default().build()
    }
}

impl ProviderRegistry {
    pub fn builder() -> ProviderRegistryBuilder {
        ProviderRegistryBuilder::default()
    }

    pub fn receipt(&self) -> &dyn UserOpReceiptProvider {
        self.receipt.as_ref()
    }

    pub fn gas_prices(&self) -> &dyn GasPriceProvider {
        self.gas_prices.as_ref()
    }

    pub fn gas_estimate(&self) -> &dyn GasEstimateProvider {
        self.gas_estimate.as_ref()
    }

    pub fn userop_by_hash(&self) -> &dyn UserOpByHashProvider {
        self.userop_by_hash.as_ref()
    }
}

/// Fluent builder for [`ProviderRegistry`]. Unset slots stay no-op.
pub struct ProviderRegistryBuilder {
    receipt: Arc<dyn UserOpReceiptProvider>,
    gas_prices: Arc<dyn GasPriceProvider>,
    gas_estimate: Arc<dyn GasEstimateProvider>,
    userop_by_hash: Arc<dyn UserOpByHashProvider>,
}

impl Default for ProviderRegistryBuilder {
    fn default() -> Self {
        Self {
            receipt: Arc::new(NoopReceiptProvider),
            gas_prices: Arc::new(NoopGasPriceProvider),
            gas_estimate: Arc::new(NoopGasEstimateProvider),
            userop_by_hash: Arc::new(NoopUserOpByHashProvider),
        }
    }
}

impl ProviderRegistryBuilder {
    /// Set the receipt lookup provider.
    pub fn receipt(mut self, provider: impl UserOpReceiptProvider) -> Self {
        self.receipt = Arc::new(provider);
        self
    }

    /// Set the gas price provider.
    pub fn gas_prices(mut self, provider: impl GasPriceProvider) -> Self {
        self.gas_prices = Arc::new(provider);
        self
    }

    /// Set the gas estimate provider.
    pub fn gas_estimate(mut self, provider: impl GasEstimateProvider) -> Self {
        self.gas_estimate = Arc::new(provider);
        self
    }

    /// Set the operation-by-hash provider.
    pub fn userop_by_hash(mut self, provider: impl UserOpByHashProvider) -> Self {
        self.userop_by_hash = Arc::new(provider);
        self
    }

    pub fn build(self) -> ProviderRegistry {
        tracing::debug!("capability providers wired");
        ProviderRegistry {
            receipt: self.receipt,
            gas_prices: self.gas_prices,
            gas_estimate: self.gas_estimate,
            userop_by_hash: self.userop_by_hash,
        }
    }
}
