use std::path::PathBuf;

use clap::Parser;

use circles::config::{RegistryConfig, StorageConfig};
use circles::model::Principal;

/// Circle Registry - create and inspect expense-sharing circles
#[derive(Parser)]
#[command(name = "circles")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, env = "CIRCLES_CONFIG")]
    config: Option<PathBuf>,

    /// Database file path (overrides the configured storage; default: in-memory)
    #[arg(short, long, env = "CIRCLES_DB")]
    file: Option<PathBuf>,

    /// Principal that signs submitted transactions
    #[arg(short, long, env = "CIRCLES_SENDER", default_value = "ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM")]
    sender: String,

    /// Height of the block before the first transaction
    #[arg(long)]
    genesis_height: Option<u64>,

    /// Log level (used when RUST_LOG is unset)
    #[arg(long, env = "CIRCLES_LOG_LEVEL")]
    log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,

    /// Print circle and receipt details as JSON
    #[arg(long)]
    json: bool,
}

fn main() {
    let cli = Cli::parse();

    let mut config = match RegistryConfig::load(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if let Some(path) = cli.file {
        config.storage = StorageConfig::File { path };
    }
    if let Some(h) = cli.genesis_height {
        config.chain.genesis_height = h;
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    if cli.log_json {
        config.logging.json = true;
    }

    circles::telemetry::init(&config.logging);

    let sender = match Principal::parse(&cli.sender) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: --sender: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = circles::cli::run(&config, sender, cli.json) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
