//! CLI argument parsing and execution.
//!
//! This module provides the command-line interface for the filter using
//! clap's derive API. Arguments are validated at parse time where possible
//! and the filesystem preconditions are checked before any file is created.
//!
//! # Example
//!
//! ```bash
//! filter -i ~/data/artists.jsonl -o ~/data/artists_filtered.jsonl -m 15
//! filter --input genres.jsonl --output genres_small.jsonl --max_size_mb 0.5 --json
//! ```

mod paths;
pub mod validators;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use niche_jsonl::{FilterConfig, FilterState, MaxSize, SizeFilter};
use tracing::{info, warn};

use crate::output::{self, OutputMode};
use crate::progress::ConsoleObserver;
use validators::validate_max_size_mb;

pub use paths::check_paths;

/// Remove oversized records from a JSONL file.
///
/// Copies every line of the input whose UTF-8 byte length is at most the
/// threshold to the output, in order, and reports the line numbers of the
/// lines it left out.
#[derive(Parser, Debug)]
#[command(name = "filter")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the input JSONL file
    #[arg(short, long, value_name = "PATH")]
    pub input: PathBuf,

    /// Path to the output filtered JSONL file (its directory must exist)
    #[arg(short, long, value_name = "PATH")]
    pub output: PathBuf,

    /// Maximum allowed document size in MB (1 MB = 1024 × 1024 bytes)
    #[arg(
        short = 'm',
        long = "max_size_mb",
        value_name = "MB",
        default_value = "15",
        allow_negative_numbers = true,
        value_parser = validate_max_size_mb
    )]
    pub max_size_mb: MaxSize,

    /// Print the summary as JSON for programmatic use
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Parse CLI arguments from command line
    #[must_use]
    pub fn parse_args() -> Self {
        <Self as Parser>::parse()
    }

    /// Parse CLI arguments from an iterator (for testing)
    ///
    /// # Errors
    ///
    /// Returns clap's error for unknown, missing, or invalid arguments.
    pub fn try_parse_from<I, T>(iter: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// Check the paths, run the filter, and print the summary.
    ///
    /// # Errors
    ///
    /// Fails without touching the output if a path precondition does not
    /// hold. Fails after the output was created if reading or writing breaks
    /// mid-stream; that output is incomplete.
    pub async fn execute(&self) -> Result<()> {
        check_paths(&self.input, &self.output).await?;

        let output_mode = if self.json {
            OutputMode::Json
        } else {
            OutputMode::Text
        };

        info!(
            input = %self.input.display(),
            output = %self.output.display(),
            max_size_mb = self.max_size_mb.megabytes(),
            "Starting to filter documents"
        );

        let mut filter = SizeFilter::new(FilterConfig::new(self.max_size_mb));
        let result = filter
            .run_files(&self.input, &self.output, ConsoleObserver::new())
            .await;

        let summary = match result {
            Ok(summary) => summary,
            Err(error) => {
                if filter.state() == FilterState::Failed {
                    warn!(
                        output = %self.output.display(),
                        "Output file is incomplete and should be deleted"
                    );
                }
                return Err(error).with_context(|| {
                    format!(
                        "An error occurred during processing of '{}'",
                        self.input.display()
                    )
                });
            }
        };

        output::print_summary(
            &summary,
            &output::RunPaths {
                input: &self.input,
                output: &self.output,
            },
            self.max_size_mb,
            output_mode,
        )
        .context("Failed to print summary")?;

        Ok(())
    }
}
