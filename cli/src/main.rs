//! qngrpc CLI — talk to a QNG node and submit cross-chain exports from the terminal.
//!
//! Usage:
//! ```bash
//! # Balance of an address for coin id 0
//! qngrpc --qng-url http://127.0.0.1:1234 balance 0xABC --coin-id 0
//!
//! # UTXOs, at most 10, unlocked only
//! qngrpc utxos 0xABC --limit 10
//!
//! # Replay an export on the primary chain (key from QNGRPC_PRIVATE_KEY)
//! qngrpc --evm-url http://127.0.0.1:8545 --meerchange 0x... --chain-id 813 \
//!     cross-send <txid> 0 1000 <sig>
//!
//! # Any routed method with raw JSON params
//! qngrpc call qng_getBalance '["0xABC", 0]'
//! ```

mod config;
mod logging;

use std::process;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;

use qngrpc_adapter::RpcAdapter;
use qngrpc_core::methods;
use qngrpc_http::HttpRpcClient;
use qngrpc_meerchange::{CrossChainBridge, CrossOp, MeerchangeBridge, MeerchangeConfig};

use crate::config::{CliConfig, ConnectionArgs};

#[derive(Parser)]
#[command(
    name = "qngrpc",
    about = "Query a QNG node and bridge exports to the primary chain",
    long_about = "
qngrpc: forward qng_* calls to a QNG node and replay exports through meerchange.

ENVIRONMENT VARIABLES:
  QNGRPC_QNG_URL       QNG node JSON-RPC URL
  QNGRPC_EVM_URL       Primary-chain JSON-RPC URL
  QNGRPC_MEERCHANGE    Meerchange contract address
  QNGRPC_CHAIN_ID      Primary-chain id
  QNGRPC_PRIVATE_KEY   Signing key for cross-send
  RUST_LOG             Log filter, overrides --log-level
",
    version
)]
struct Cli {
    #[command(flatten)]
    connection: ConnectionArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// qng_getBalance: balance of an address for one coin id
    Balance {
        address: String,
        #[arg(long, default_value_t = 0)]
        coin_id: i64,
    },

    /// qng_addBalance: top up an address
    #[command(name = "add-balance")]
    AddBalance { address: String },

    /// qng_getUTXOs: list spendable outputs of an address
    Utxos {
        address: String,
        /// Maximum number of outputs
        #[arg(long, default_value_t = 10)]
        limit: i64,
        /// Include locked outputs
        #[arg(long)]
        locked: bool,
    },

    /// qng_sendRawTransaction: relay a signed QNG transaction
    #[command(name = "send-raw")]
    SendRaw {
        /// Signed transaction, hex encoded
        raw_tx: String,
        #[arg(long)]
        allow_high_fee: bool,
    },

    /// Replay a QNG export on the primary chain via meerchange.export4337
    #[command(name = "cross-send")]
    CrossSend {
        /// QNG transaction id (hex)
        txid: String,
        /// Output index
        idx: u32,
        fee: u64,
        /// Export signature
        sig: String,
    },

    /// Call any routed method with a JSON array of positional params (needs the QNG endpoint)
    Call {
        method: String,
        #[arg(default_value = "[]")]
        params: String,
    },

    /// List routed method names
    Methods,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = CliConfig::resolve(&cli.connection)?;
    logging::init_tracing(&config.log);
    let private_key = cli.connection.private_key.as_deref();

    let result = match cli.command {
        Commands::Methods => {
            for method in methods::ALL {
                println!("{method}");
            }
            return Ok(());
        }
        Commands::Balance { address, coin_id } => {
            qng_adapter(&config)?.get_balance(&address, coin_id).await?
        }
        Commands::AddBalance { address } => qng_adapter(&config)?.add_balance(&address).await?,
        Commands::Utxos {
            address,
            limit,
            locked,
        } => {
            qng_adapter(&config)?
                .get_utxos(&address, limit, locked)
                .await?
        }
        Commands::SendRaw {
            raw_tx,
            allow_high_fee,
        } => {
            qng_adapter(&config)?
                .send_raw_transaction(&raw_tx, allow_high_fee)
                .await?
        }
        Commands::CrossSend { txid, idx, fee, sig } => {
            let bridge = meerchange_bridge(&config, private_key)?;
            let tx_hash = bridge.bridge_send(CrossOp::new(txid, idx, fee, sig)).await?;
            Value::String(tx_hash)
        }
        Commands::Call { method, params } => {
            let params: Vec<Value> =
                serde_json::from_str(&params).context("params must be a JSON array")?;
            let mut adapter = qng_adapter(&config)?;
            if method == methods::CROSS_SEND {
                adapter = adapter.with_bridge(Arc::new(meerchange_bridge(&config, private_key)?));
            }
            adapter.dispatch(&method, params).await?
        }
    };

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

/// Adapter for node-bound commands. Bridge settings are not consulted.
fn qng_adapter(config: &CliConfig) -> Result<RpcAdapter> {
    let qng = HttpRpcClient::new(config.qng_url()?, config.http_config())?;
    Ok(RpcAdapter::new(Arc::new(qng)))
}

/// Bridge for cross-chain sends. The QNG endpoint is not needed.
fn meerchange_bridge(config: &CliConfig, private_key: Option<&str>) -> Result<MeerchangeBridge> {
    let settings = config.bridge(private_key)?;

    let eth = HttpRpcClient::new(settings.evm_url, config.http_config())?;
    let signer = MeerchangeBridge::signer_from_hex(&settings.private_key)?;
    let bridge = MeerchangeBridge::new(
        Arc::new(eth),
        signer,
        &MeerchangeConfig {
            contract_address: settings.meerchange,
            chain_id: settings.chain_id,
        },
    )?;
    tracing::info!(
        sender = %bridge.sender(),
        contract = %bridge.contract(),
        chain_id = bridge.chain_id(),
        "meerchange bridge ready"
    );
    Ok(bridge)
}
