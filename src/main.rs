//! Exchange batch runner - Main Entry Point

use anyhow::Context;
use clap::Parser;
use order_matching_engine::{process_batch, report, Exchange};
use std::path::PathBuf;
use tokio::io::AsyncReadExt;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Run a file of exchange commands and print the resulting books
#[derive(Parser, Debug)]
#[command(name = "exchange", version, about)]
struct Args {
    /// Command file, one command per line. Reads stdin when omitted.
    file: Option<PathBuf>,

    /// Instruments to list before the batch runs
    #[arg(long = "instrument", env = "EXCHANGE_INSTRUMENTS", value_delimiter = ',')]
    instruments: Vec<String>,

    /// Print book snapshots as JSON instead of text tables
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging; stdout is reserved for reports
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let input = match &args.file {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("reading {}", path.display()))?,
        None => {
            let mut buf = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buf)
                .await
                .context("reading stdin")?;
            buf
        }
    };

    let exchange = Exchange::with_instruments(
        args.instruments
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty()),
    );
    tracing::info!("🚀 Running batch against {} listed instruments", exchange.len());

    let outcome = process_batch(&exchange, input.lines());

    let snapshots = exchange.snapshots()?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&snapshots)?);
    } else {
        for snapshot in &snapshots {
            print!("{}", report::render(snapshot));
        }
    }

    outcome.context("batch stopped")?;
    tracing::info!("📊 Batch complete: {} instruments", snapshots.len());
    Ok(())
}
