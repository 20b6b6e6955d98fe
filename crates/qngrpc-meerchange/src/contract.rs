//! Meerchange contract binding.

use alloy_sol_types::sol;

sol! {
    /// The part of the meerchange contract the bundler calls.
    interface IMeerchange {
        function export4337(bytes32 txid, uint32 idx, uint64 fee, string sig) external;
    }
}
