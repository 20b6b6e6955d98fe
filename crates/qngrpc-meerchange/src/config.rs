//! Bridge configuration.

use serde::{Deserialize, Serialize};

/// Where the meerchange contract lives and which chain to sign for.
///
/// The signing key is supplied separately and never stored here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeerchangeConfig {
    /// Hex address of the meerchange contract on the primary chain.
    pub contract_address: String,
    /// EIP-155 chain id of the primary chain.
    pub chain_id: u64,
}
