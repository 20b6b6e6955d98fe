//! The cross-chain operation descriptor.

use alloy_primitives::B256;
use serde::{Deserialize, Serialize};

use qngrpc_core::BridgeError;

const TXID_LEN: usize = 32;

/// One QNG export to be replayed on the primary chain.
///
/// Transient: built by the caller, consumed by a single bridge call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossOp {
    /// QNG transaction id, hex encoded (optional `0x`).
    pub txid: String,
    /// Output index within that transaction.
    pub idx: u32,
    pub fee: u64,
    /// Signature over the export, passed to the contract untouched.
    pub sig: String,
}

impl CrossOp {
    pub fn new(txid: impl Into<String>, idx: u32, fee: u64, sig: impl Into<String>) -> Self {
        Self {
            txid: txid.into(),
            idx,
            fee,
            sig: sig.into(),
        }
    }

    /// Decode `txid` into the contract's `bytes32` argument.
    ///
    /// Shorter ids are left-padded with zeros; anything that is not hex or
    /// is longer than 32 bytes is rejected.
    pub fn txid_bytes(&self) -> Result<B256, BridgeError> {
        let text = self.txid.strip_prefix("0x").unwrap_or(&self.txid);
        let raw = hex::decode(text)
            .map_err(|e| BridgeError::Encoding(format!("txid {:?} is not hex: {e}", self.txid)))?;
        if raw.len() > TXID_LEN {
            return Err(BridgeError::Encoding(format!(
                "txid is {} bytes, expected at most {TXID_LEN}",
                raw.len()
            )));
        }
        Ok(B256::left_padding_from(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::b256;

    #[test]
    fn decodes_full_hash_with_and_without_prefix() {
        let expected = b256!("4f3c0a7f1b1d9c5e8a2b6d4e0f1a3c5e7b9d1f3a5c7e9b1d3f5a7c9e1b3d5f7a");
        let bare = CrossOp::new(
            "4f3c0a7f1b1d9c5e8a2b6d4e0f1a3c5e7b9d1f3a5c7e9b1d3f5a7c9e1b3d5f7a",
            0,
            0,
            "",
        );
        let prefixed = CrossOp {
            txid: format!("0x{}", bare.txid),
            ..bare.clone()
        };
        assert_eq!(bare.txid_bytes().unwrap(), expected);
        assert_eq!(prefixed.txid_bytes().unwrap(), expected);
    }

    #[test]
    fn short_id_is_left_padded() {
        let op = CrossOp::new("abcd", 0, 0, "");
        let bytes = op.txid_bytes().unwrap();
        assert_eq!(&bytes[30..], &[0xab, 0xcd]);
        assert!(bytes[..30].iter().all(|b| *b == 0));
    }

    #[test]
    fn non_hex_is_encoding_error() {
        let err = CrossOp::new("zz", 1, 1, "sig").txid_bytes().unwrap_err();
        assert!(matches!(err, BridgeError::Encoding(_)));
    }

    #[test]
    fn odd_length_is_encoding_error() {
        assert!(matches!(
            CrossOp::new("abc", 0, 0, "").txid_bytes(),
            Err(BridgeError::Encoding(_))
        ));
    }

    #[test]
    fn oversized_id_is_encoding_error() {
        let op = CrossOp::new("00".repeat(33), 0, 0, "");
        assert!(matches!(op.txid_bytes(), Err(BridgeError::Encoding(_))));
    }

    #[test]
    fn serde_field_names() {
        let op = CrossOp::new("aa", 3, 500, "sig");
        let value = serde_json::to_value(&op).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"txid": "aa", "idx": 3, "fee": 500, "sig": "sig"})
        );
    }
}
