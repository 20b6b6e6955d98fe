//! Data shapes exchanged between the pipeline and its providers.

use std::collections::BTreeMap;

use alloy_primitives::{Address, Bytes, B256, U256, U64};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An ERC-4337 user operation (entry point v0.6 layout).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserOperation {
    pub sender: Address,
    pub nonce: U256,
    pub init_code: Bytes,
    pub call_data: Bytes,
    pub call_gas_limit: U256,
    pub verification_gas_limit: U256,
    pub pre_verification_gas: U256,
    pub max_fee_per_gas: U256,
    pub max_priority_fee_per_gas: U256,
    pub paymaster_and_data: Bytes,
    pub signature: Bytes,
}

/// Receipt of an included user operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserOperationReceipt {
    pub user_op_hash: B256,
    pub sender: Address,
    pub paymaster: Address,
    pub nonce: U256,
    pub success: bool,
    pub actual_gas_cost: U256,
    pub actual_gas_used: U256,
    pub from: Address,
    /// Primary-chain transaction receipt, as returned by the node.
    pub receipt: Value,
    #[serde(default)]
    pub logs: Vec<Value>,
}

/// A user operation found by hash, with the block that included it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HashLookupResult {
    pub user_operation: UserOperation,
    pub entry_point: Address,
    pub block_number: U256,
    pub block_hash: B256,
    pub transaction_hash: B256,
}

/// `maxFeePerGas` / `maxPriorityFeePerGas` pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GasPrices {
    pub max_fee_per_gas: U256,
    pub max_priority_fee_per_gas: U256,
}

impl GasPrices {
    pub fn new(max_fee_per_gas: U256, max_priority_fee_per_gas: U256) -> Self {
        Self {
            max_fee_per_gas,
            max_priority_fee_per_gas,
        }
    }
}

/// Per-account state override, in `eth_call` override format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<U64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<Bytes>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance: Option<U256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<BTreeMap<B256, B256>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_diff: Option<BTreeMap<B256, B256>>,
}

/// State overrides applied during simulation, keyed by account.
pub type StateOverrideSet = BTreeMap<Address, AccountOverride>;

/// Fixed gas overheads charged on top of a user operation's own execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GasOverhead {
    pub fixed: u64,
    pub per_user_op: u64,
    pub per_user_op_word: u64,
    pub zero_byte: u64,
    pub non_zero_byte: u64,
    pub min_bundle_size: u64,
}

impl Default for GasOverhead {
    fn default() -> Self {
        Self {
            fixed: 21_000,
            per_user_op: 18_300,
            per_user_op_word: 4,
            zero_byte: 4,
            non_zero_byte: 16,
            min_bundle_size: 1,
        }
    }
}

/// Everything the external gas estimator needs for one operation.
#[derive(Debug, Clone, Copy)]
pub struct EstimateInput<'a> {
    pub entry_point: Address,
    pub op: &'a UserOperation,
    pub overrides: &'a StateOverrideSet,
    pub overhead: &'a GasOverhead,
    pub chain_id: U256,
    /// Ceiling for any single gas limit the estimator may return.
    pub max_gas_limit: U256,
    /// Execution tracer name; `None` uses the node default.
    pub tracer: Option<&'a str>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;
    use serde_json::json;

    #[test]
    fn user_operation_uses_camel_case() {
        let value = serde_json::to_value(UserOperation::default()).unwrap();
        assert!(value.get("callGasLimit").is_some());
        assert!(value.get("paymasterAndData").is_some());
    }

    #[test]
    fn state_override_round_trips_sparse_fields() {
        let raw = json!({
            "0x1111111111111111111111111111111111111111": { "balance": "0x64" }
        });
        let set: StateOverrideSet = serde_json::from_value(raw.clone()).unwrap();
        let ov = &set[&address!("1111111111111111111111111111111111111111")];
        assert_eq!(ov.balance, Some(U256::from(100)));
        assert!(ov.code.is_none());
        assert_eq!(serde_json::to_value(&set).unwrap(), raw);
    }
}
