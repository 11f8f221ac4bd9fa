//! # Snapshot Runner
//!
//! One-shot CLI wrapper around the batch engine: loads address pairs from a
//! JSON file, runs a single batch against the configured RPC endpoint, and
//! prints the result set as JSON on stdout.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin snapshot_runner -- --pairs wallets.json
//! ```
//!
//! The pairs file is an array of `{ "primary": "0x..", "derived": "0x.." }`
//! objects, optionally carrying a `remark`.

use anyhow::Context;
use clap::Parser;
use log::info;
use std::path::PathBuf;

use staking_snapshot_sdk::batch_runner::BatchRunner;
use staking_snapshot_sdk::rpc;
use staking_snapshot_sdk::settings::Settings;
use staking_snapshot_sdk::snapshot::SnapshotFetcher;
use staking_snapshot_sdk::types::AddressPair;

#[derive(Parser, Debug)]
#[command(name = "snapshot_runner", about = "Run one staking snapshot batch")]
struct Args {
    /// Path to the JSON file of address pairs to snapshot.
    #[arg(short, long)]
    pairs: PathBuf,

    /// RPC endpoint override (otherwise Config.toml / SNAPSHOT_SDK_RPC_URL).
    #[arg(long)]
    rpc_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut settings = Settings::new().context("loading settings")?;
    if let Some(url) = args.rpc_url {
        settings.rpc.url = url;
    }

    let raw = std::fs::read_to_string(&args.pairs)
        .with_context(|| format!("reading {}", args.pairs.display()))?;
    let pairs: Vec<AddressPair> = serde_json::from_str(&raw).context("parsing address pairs")?;

    let provider = rpc::connect(&settings.rpc.url)?;
    let fetcher = SnapshotFetcher::new(provider, settings.contract_set()?);
    let runner = BatchRunner::new(fetcher);

    let result = runner
        .run(&pairs, |pct| info!("progress: {pct}%"))
        .await?;

    info!(
        "{}/{} addresses succeeded",
        result.succeeded_count(),
        result.len()
    );
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
