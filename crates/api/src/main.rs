//! Picnic Node - batch runner
//!
//! Usage: `picnic-node [BATCH_FILE]`. Reads the batch from `BATCH_FILE` or
//! stdin and writes the output records to stdout.

use std::io::Read;
use std::process::ExitCode;

use anyhow::Context;
use picnic_node_lib::utils::logging::init_tracing;
use picnic_node_lib::{run_batch, AppContext};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env before the subscriber reads RUST_LOG
    let dotenv = dotenvy::dotenv();
    init_tracing();

    match dotenv {
        Ok(path) => info!(path = %path.display(), "dotenv_loaded"),
        Err(err) if err.not_found() => {}
        Err(err) => warn!(error = %err, "dotenv_load_failed"),
    }

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %format!("{err:#}"), "batch_failed");
            eprintln!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> anyhow::Result<()> {
    let input = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read batch file {path}"))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer).context("failed to read batch from stdin")?;
            buffer
        }
    };

    let context = AppContext::new().context("failed to initialise node")?;
    let output = run_batch(&context, &input).await?;
    println!("{output}");
    Ok(())
}
