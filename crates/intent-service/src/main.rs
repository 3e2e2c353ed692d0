//! Command-line front end of the intent client.
//!
//! Loads a TOML configuration, wires transports, account and signing policy,
//! then runs one subcommand and prints its result as JSON on stdout. Logs go
//! to stderr so the output stays machine readable.

use clap::Parser;
use intent_config::Config;
use std::path::PathBuf;

mod commands;
mod factory;

use commands::Command;

/// Command-line arguments for the intent client.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
	/// Path to configuration file
	#[arg(short, long, default_value = "config.toml")]
	config: PathBuf,

	/// Log level (trace, debug, info, warn, error)
	#[arg(short, long, default_value = "info")]
	log_level: String,

	#[command(subcommand)]
	command: Command,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	use tracing_subscriber::{fmt, EnvFilter};

	let env_filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

	fmt()
		.with_env_filter(env_filter)
		.with_writer(std::io::stderr)
		.with_thread_ids(true)
		.with_target(true)
		.init();

	let config = Config::from_file(&args.config).await?;
	tracing::debug!(
		path = %args.config.display(),
		version = %config.client.version,
		"Loaded configuration"
	);

	commands::run(args.command, &config).await
}
