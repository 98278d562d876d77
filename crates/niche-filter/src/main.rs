//! `filter` CLI binary.

use anyhow::Result;
use niche_filter::cli::Cli;
use tracing_subscriber::EnvFilter;

/// Main entry point for the filter CLI.
///
/// The filter is a single sequential stream, so tokio's `current_thread`
/// runtime is all it needs.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Controlled via RUST_LOG, e.g. RUST_LOG=niche_jsonl=debug to see each dropped line.
    // Logs go to stderr so `--json` output on stdout stays machine-readable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("niche_filter=info,niche_jsonl=info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("Starting filter CLI");

    let cli = Cli::parse_args();
    cli.execute().await?;

    tracing::debug!("Filter CLI completed successfully");
    Ok(())
}
