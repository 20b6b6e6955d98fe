//! qngrpc-providers — backend-agnostic capability providers.
//!
//! The bundler's validation and estimation pipeline needs four lookups that
//! depend on the backend chain. Each one is a small async trait with two
//! implementations:
//!
//! | Capability | Trait | No-op | Live |
//! |---|---|---|---|
//! | receipt lookup | [`UserOpReceiptProvider`] | [`NoopReceiptProvider`] | [`LiveReceiptProvider`] |
//! | gas prices | [`GasPriceProvider`] | [`NoopGasPriceProvider`] | [`LiveGasPriceProvider`] |
//! | gas estimate | [`GasEstimateProvider`] | [`NoopGasEstimateProvider`] | [`LiveGasEstimateProvider`] |
//! | op-by-hash lookup | [`UserOpByHashProvider`] | [`NoopUserOpByHashProvider`] | [`LiveUserOpByHashProvider`] |
//!
//! Live providers forward to the external subsystems declared in [`backend`]
//! and pass their errors through untouched. The choice is made once, when the
//! [`ProviderRegistry`] is built.

pub mod backend;
pub mod gas_estimate;
pub mod gas_price;
pub mod receipt;
pub mod registry;
pub mod types;
pub mod userop_lookup;

pub use backend::{FeeOracle, GasEstimator, ReceiptIndex, UserOpIndex};
pub use gas_estimate::{GasEstimateProvider, LiveGasEstimateProvider, NoopGasEstimateProvider};
pub use gas_price::{GasPriceProvider, LiveGasPriceProvider, NoopGasPriceProvider};
pub use receipt::{LiveReceiptProvider, NoopReceiptProvider, UserOpReceiptProvider};
pub use registry::{ProviderRegistry, ProviderRegistryBuilder};
pub use types::{
    AccountOverride, EstimateInput, GasOverhead, GasPrices, HashLookupResult, StateOverrideSet,
    UserOperation, UserOperationReceipt,
};
pub use userop_lookup::{LiveUserOpByHashProvider, NoopUserOpByHashProvider, UserOpByHashProvider};
