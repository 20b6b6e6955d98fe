//! Method-name routing for the adapter.
//!
//! Params are positional, in the order the QNG node documents them:
//!
//! | method                   | params                         |
//! |--------------------------|--------------------------------|
//! | `qng_getBalance`         | `[address, coinId]`            |
//! | `qng_addBalance`         | `[address]`                    |
//! | `qng_getUTXOs`           | `[address, limit, locked]`     |
//! | `qng_sendRawTransaction` | `[rawTxHex, allowHighFee]`     |
//! | `qng_crossSend`          | `[txid, idx, fee, sig]`        |

use serde::de::DeserializeOwned;
use serde_json::Value;

use qngrpc_core::{methods, BridgeError};

use crate::adapter::RpcAdapter;

impl RpcAdapter {
    /// Route `method` to the matching operation.
    pub async fn dispatch(&self, method: &str, params: Vec<Value>) -> Result<Value, BridgeError> {
        let params = Params::new(method, params);
        match method {
            methods::GET_BALANCE => {
                params.expect_len(2)?;
                self.get_balance(&params.get::<String>(0)?, params.get(1)?)
                    .await
            }
            methods::ADD_BALANCE => {
                params.expect_len(1)?;
                self.add_balance(&params.get::<String>(0)?).await
            }
            methods::GET_UTXOS => {
                params.expect_len(3)?;
                self.get_utxos(&params.get::<String>(0)?, params.get(1)?, params.get(2)?)
                    .await
            }
            methods::SEND_RAW_TRANSACTION => {
                params.expect_len(2)?;
                self.send_raw_transaction(&params.get::<String>(0)?, params.get(1)?)
                    .await
            }
            methods::CROSS_SEND => {
                params.expect_len(4)?;
                self.cross_send(
                    &params.get::<String>(0)?,
                    params.get(1)?,
                    params.get(2)?,
                    &params.get::<String>(3)?,
                )
                .await
            }
            other => {
                tracing::debug!(method = other, "unrouted method");
                Err(BridgeError::MethodNotFound(other.to_string()))
            }
        }
    }
}

/// Positional params of one call, tagged with the method for error messages.
struct Params<'a> {
    method: &'a str,
    values: Vec<Value>,
}

impl<'a> Params<'a> {
    fn new(method: &'a str, values: Vec<Value>) -> Self {
        Self { method, values }
    }

    fn expect_len(&self, n: usize) -> Result<(), BridgeError> {
        if self.values.len() == n {
            Ok(())
        } else {
            Err(self.invalid(format!("expected {n} params, got {}", self.values.len())))
        }
    }

    fn get<T: DeserializeOwned>(&self, i: usize) -> Result<T, BridgeError> {
        let value = self
            .values
            .get(i)
            .ok_or_else(|| self.invalid(format!("missing param {i}")))?;
        serde_json::from_value(value.clone()).map_err(|e| self.invalid(format!("param {i}: {e}")))
    }

    fn invalid(&self, reason: String) -> BridgeError {
        BridgeError::InvalidParams {
            method: self.method.to_string(),
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn wrong_arity_is_rejected() {
        let params = Params::new("qng_addBalance", vec![]);
        let err = params.expect_len(1).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid params for qng_addBalance: expected 1 params, got 0"
        );
    }

    #[test]
    fn wrong_type_is_rejected() {
        let params = Params::new("qng_getUTXOs", vec![json!("0xABC"), json!("ten"), json!(false)]);
        assert_eq!(params.get::<String>(0).unwrap(), "0xABC");
        let err = params.get::<i64>(1).unwrap_err();
        assert!(matches!(err, BridgeError::InvalidParams { .. }));
        assert!(!params.get::<bool>(2).unwrap());
    }

    #[test]
    fn negative_index_does_not_fit_u32() {
        let params = Params::new("qng_crossSend", vec![json!(-1)]);
        assert!(params.get::<u32>(0).is_err());
    }
}
