//! `qng_*` method names understood by the QNG node and the adapter.

pub const GET_BALANCE: &str = "qng_getBalance";
pub const ADD_BALANCE: &str = "qng_addBalance";
pub const GET_UTXOS: &str = "qng_getUTXOs";
pub const SEND_RAW_TRANSACTION: &str = "qng_sendRawTransaction";
/// Served by the adapter itself through the cross-chain bridge, never sent to the QNG node.
pub const CROSS_SEND: &str = "qng_crossSend";

/// Every method routed by the adapter.
pub const ALL: &[&str] = &[
    GET_BALANCE,
    ADD_BALANCE,
    GET_UTXOS,
    SEND_RAW_TRANSACTION,
    CROSS_SEND,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_methods_are_namespaced() {
        assert!(ALL.iter().all(|m| m.starts_with("qng_")));
    }
}
