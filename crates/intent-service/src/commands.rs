//! Subcommands of the `intent` binary.

use std::path::{Path, PathBuf};
use std::time::Duration;

use alloy_primitives::{Address, B256};
use clap::{Subcommand, ValueEnum};
use intent_config::Config;
use intent_core::{IntentClient, PrepareUserIntentParameters, SendUserIntentParameters, WaitOptions};
use intent_types::{
	truncate_id, GaslessCrossChainOrder, GetCabParameters, IntentQuote, NetworkType, ReceiptKind,
};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::factory::{build_client, create_hasher};

#[derive(Subcommand, Debug)]
pub enum Command {
	/// Print the hash of an order read from a JSON file
	Hash {
		/// JSON file holding a gasless cross-chain order
		order: PathBuf,
	},
	/// Quote an intent described in a JSON file
	Quote {
		/// JSON file holding the intent parameters
		input: PathBuf,
	},
	/// Sign and submit an intent
	Send {
		/// JSON file holding the intent parameters to quote first
		#[arg(long, required_unless_present = "quote", conflicts_with = "quote")]
		input: Option<PathBuf>,
		/// JSON file holding a quote returned by `quote`
		#[arg(long)]
		quote: Option<PathBuf>,
		/// Serialized Solana transaction forwarded to the relayer
		#[arg(long)]
		solana_transaction: Option<String>,
	},
	/// Print the relayer status of a submitted intent
	Status {
		ui_hash: B256,
	},
	/// Wait for a receipt of a submitted intent
	Wait {
		ui_hash: B256,
		#[arg(long, value_enum, default_value_t = ReceiptArg::Fill)]
		kind: ReceiptArg,
		/// Delay between polls; defaults to the configured interval
		#[arg(long)]
		interval_ms: Option<u64>,
		/// Maximum number of polls, 0 for no limit
		#[arg(long)]
		retry_count: Option<u32>,
		/// Give up after this many milliseconds, 0 to wait forever
		#[arg(long, default_value_t = 120_000)]
		timeout_ms: u64,
	},
	/// Print the consolidated balances of an account
	Cab {
		account: Address,
		/// Comma separated token tickers
		#[arg(long, value_delimiter = ',')]
		tickers: Vec<String>,
		/// Comma separated chain ids
		#[arg(long, value_delimiter = ',', conflicts_with = "network_type")]
		networks: Vec<u64>,
		#[arg(long, value_enum)]
		network_type: Option<NetworkArg>,
	},
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReceiptArg {
	Open,
	Execution,
	Fill,
}

impl From<ReceiptArg> for ReceiptKind {
	fn from(arg: ReceiptArg) -> Self {
		match arg {
			ReceiptArg::Open => ReceiptKind::Open,
			ReceiptArg::Execution => ReceiptKind::Execution,
			ReceiptArg::Fill => ReceiptKind::Fill,
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum NetworkArg {
	Mainnet,
	Testnet,
}

impl From<NetworkArg> for NetworkType {
	fn from(arg: NetworkArg) -> Self {
		match arg {
			NetworkArg::Mainnet => NetworkType::Mainnet,
			NetworkArg::Testnet => NetworkType::Testnet,
		}
	}
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, Box<dyn std::error::Error>> {
	let content = tokio::fs::read_to_string(path).await?;
	Ok(serde_json::from_str(&content)?)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
	println!("{}", serde_json::to_string_pretty(value)?);
	Ok(())
}

fn wait_options(interval_ms: Option<u64>, retry_count: Option<u32>, timeout_ms: u64) -> WaitOptions {
	WaitOptions {
		polling_interval: interval_ms.map(Duration::from_millis),
		retry_count,
		timeout: Some(Duration::from_millis(timeout_ms)),
	}
}

fn cab_parameters(
	account: Address,
	tickers: Vec<String>,
	networks: Vec<u64>,
	network_type: Option<NetworkArg>,
) -> GetCabParameters {
	GetCabParameters {
		account_address: account,
		token_tickers: (!tickers.is_empty()).then_some(tickers),
		networks: (!networks.is_empty()).then_some(networks),
		network_type: network_type.map(NetworkType::from),
	}
}

/// Runs `command` against the configured peers.
pub async fn run(command: Command, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
	if let Command::Hash { order } = &command {
		let order: GaslessCrossChainOrder = read_json(order).await?;
		return print_json(&serde_json::json!({ "orderHash": create_hasher(config).hash(&order) }));
	}

	let client = build_client(config)?;
	run_with_client(command, &client).await
}

async fn run_with_client(
	command: Command,
	client: &IntentClient,
) -> Result<(), Box<dyn std::error::Error>> {
	match command {
		Command::Hash { .. } => Ok(()),
		Command::Quote { input } => {
			let parameters: PrepareUserIntentParameters = read_json(&input).await?;
			print_json(&client.prepare_user_intent(&parameters).await?)
		},
		Command::Send {
			input,
			quote,
			solana_transaction,
		} => {
			let mut parameters = match (quote, input) {
				(Some(quote), _) => SendUserIntentParameters::from(read_json::<IntentQuote>(&quote).await?),
				(None, Some(input)) => {
					SendUserIntentParameters::from(read_json::<PrepareUserIntentParameters>(&input).await?)
				},
				(None, None) => SendUserIntentParameters::default(),
			};
			parameters.solana_transaction = solana_transaction;

			let results = client.send_user_intent(&parameters).await?;
			for result in &results {
				tracing::info!(ui_hash = %truncate_id(&result.ui_hash.to_string()), "Intent submitted");
			}
			print_json(&results)
		},
		Command::Status { ui_hash } => print_json(&client.get_user_intent_status(ui_hash).await?),
		Command::Wait {
			ui_hash,
			kind,
			interval_ms,
			retry_count,
			timeout_ms,
		} => {
			let options = wait_options(interval_ms, retry_count, timeout_ms);
			let receipt = match ReceiptKind::from(kind) {
				ReceiptKind::Open => client.wait_for_user_intent_open_receipt(ui_hash, options).await?,
				ReceiptKind::Execution => {
					client.wait_for_user_intent_execution_receipt(ui_hash, options).await?
				},
				ReceiptKind::Fill => client.wait_for_user_intent_fill_receipt(ui_hash, options).await?,
			};
			print_json(&receipt)
		},
		Command::Cab {
			account,
			tickers,
			networks,
			network_type,
		} => {
			let parameters = cab_parameters(account, tickers, networks, network_type);
			print_json(&client.get_cab(&parameters).await?)
		},
	}
}
