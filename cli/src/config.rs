//! CLI configuration: optional YAML file, overridden by flags and env.
//!
//! ```yaml
//! qng_url: http://127.0.0.1:1234
//! evm_url: http://127.0.0.1:8545
//! meerchange: "0x422f6a8c9f3b1c1a9f3a0bf6a1ce4b5ad8e6f1b2"
//! chain_id: 813
//! request_timeout_secs: 30
//! log:
//!   level: info
//!   components:
//!     qngrpc-meerchange: debug
//!   json: false
//! ```
//!
//! The signing key is never read from the file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Args;
use serde::{Deserialize, Serialize};

use qngrpc_http::HttpClientConfig;

use crate::logging::LogConfig;

/// File-backed settings. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub qng_url: Option<String>,
    pub evm_url: Option<String>,
    /// Meerchange contract address on the primary chain.
    pub meerchange: Option<String>,
    pub chain_id: Option<u64>,
    pub request_timeout_secs: Option<u64>,
    pub log: LogConfig,
}

/// Connection flags shared by every subcommand.
#[derive(Args, Default)]
pub struct ConnectionArgs {
    /// YAML config file; flags and environment variables take precedence
    #[arg(long, global = true, env = "QNGRPC_CONFIG")]
    pub config: Option<PathBuf>,

    /// QNG node JSON-RPC endpoint
    #[arg(long, global = true, env = "QNGRPC_QNG_URL")]
    pub qng_url: Option<String>,

    /// Primary-chain (EVM) JSON-RPC endpoint, used by cross-send
    #[arg(long, global = true, env = "QNGRPC_EVM_URL")]
    pub evm_url: Option<String>,

    /// Meerchange contract address
    #[arg(long, global = true, env = "QNGRPC_MEERCHANGE")]
    pub meerchange: Option<String>,

    /// Primary-chain id used for transaction signing
    #[arg(long, global = true, env = "QNGRPC_CHAIN_ID")]
    pub chain_id: Option<u64>,

    /// Hex private key that signs cross-chain exports
    #[arg(long, global = true, env = "QNGRPC_PRIVATE_KEY", hide_env_values = true)]
    pub private_key: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Global log level (overridden by RUST_LOG)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub json_logs: bool,
}

/// Everything needed to build a meerchange bridge.
pub struct BridgeSettings {
    pub evm_url: String,
    pub meerchange: String,
    pub chain_id: u64,
    pub private_key: String,
}

impl CliConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_yaml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Load the file named by `args` (if any) and apply the flag overrides.
    pub fn resolve(args: &ConnectionArgs) -> Result<Self> {
        let base = match &args.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        Ok(base.with_overrides(args))
    }

    pub fn with_overrides(mut self, args: &ConnectionArgs) -> Self {
        if let Some(url) = &args.qng_url {
            self.qng_url = Some(url.clone());
        }
        if let Some(url) = &args.evm_url {
            self.evm_url = Some(url.clone());
        }
        if let Some(address) = &args.meerchange {
            self.meerchange = Some(address.clone());
        }
        if args.chain_id.is_some() {
            self.chain_id = args.chain_id;
        }
        if args.timeout.is_some() {
            self.request_timeout_secs = args.timeout;
        }
        if let Some(level) = &args.log_level {
            self.log.level = level.clone();
        }
        if args.json_logs {
            self.log.json = true;
        }
        self
    }

    pub fn qng_url(&self) -> Result<&str> {
        self.qng_url
            .as_deref()
            .context("no QNG endpoint: pass --qng-url or set QNGRPC_QNG_URL")
    }

    pub fn http_config(&self) -> HttpClientConfig {
        match self.request_timeout_secs {
            Some(secs) => HttpClientConfig {
                request_timeout: Duration::from_secs(secs),
            },
            None => HttpClientConfig::default(),
        }
    }

    /// Settings for the meerchange bridge. Only cross-chain sends ask for them.
    ///
    /// Fails naming every missing flag.
    pub fn bridge(&self, private_key: Option<&str>) -> Result<BridgeSettings> {
        match (&self.evm_url, &self.meerchange, self.chain_id, private_key) {
            (Some(evm_url), Some(meerchange), Some(chain_id), Some(key)) => Ok(BridgeSettings {
                evm_url: evm_url.clone(),
                meerchange: meerchange.clone(),
                chain_id,
                private_key: key.to_string(),
            }),
            (evm_url, meerchange, chain_id, key) => {
                let missing: Vec<&str> = [
                    (evm_url.is_none(), "--evm-url"),
                    (meerchange.is_none(), "--meerchange"),
                    (chain_id.is_none(), "--chain-id"),
                    (key.is_none(), "--private-key"),
                ]
                .into_iter()
                .filter_map(|(absent, flag)| absent.then_some(flag))
                .collect();
                bail!("cross-chain send needs {}", missing.join(", "))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const YAML: &str = r#"
qng_url: http://127.0.0.1:1234
evm_url: http://127.0.0.1:8545
meerchange: "0x422f6a8c9f3b1c1a9f3a0bf6a1ce4b5ad8e6f1b2"
chain_id: 813
log:
  level: info
  components:
    qngrpc-meerchange: debug
"#;

    #[test]
    fn parses_yaml_file_contents() {
        let config: CliConfig = serde_yaml::from_str(YAML).unwrap();
        assert_eq!(config.qng_url.as_deref(), Some("http://127.0.0.1:1234"));
        assert_eq!(config.chain_id, Some(813));
        assert_eq!(config.request_timeout_secs, None);
        assert_eq!(config.log.level, "info");
        assert_eq!(config.log.components["qngrpc-meerchange"], "debug");
        assert_eq!(config.http_config().request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn flags_override_file() {
        let config: CliConfig = serde_yaml::from_str(YAML).unwrap();
        let args = ConnectionArgs {
            qng_url: Some("http://qng.example:1234".into()),
            chain_id: Some(1),
            timeout: Some(5),
            json_logs: true,
            ..Default::default()
        };
        let config = config.with_overrides(&args);
        assert_eq!(config.qng_url().unwrap(), "http://qng.example:1234");
        assert_eq!(config.evm_url.as_deref(), Some("http://127.0.0.1:8545"));
        assert_eq!(config.chain_id, Some(1));
        assert_eq!(config.http_config().request_timeout, Duration::from_secs(5));
        assert!(config.log.json);
    }

    #[test]
    fn missing_qng_url_is_reported() {
        let err = CliConfig::default().qng_url().unwrap_err();
        assert!(err.to_string().contains("--qng-url"));
    }

    #[test]
    fn bridge_settings_name_missing_flags() {
        let err = CliConfig::default().bridge(None).err().unwrap();
        assert_eq!(
            err.to_string(),
            "cross-chain send needs --evm-url, --meerchange, --chain-id, --private-key"
        );

        let config: CliConfig = serde_yaml::from_str(YAML).unwrap();
        let err = config.bridge(None).err().unwrap();
        assert_eq!(err.to_string(), "cross-chain send needs --private-key");

        let settings = config.bridge(Some("0xkey")).unwrap();
        assert_eq!(settings.chain_id, 813);
        assert_eq!(settings.private_key, "0xkey");
    }
}
