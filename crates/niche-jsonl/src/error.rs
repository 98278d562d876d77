//! Error types for niche-jsonl operations.

use std::io;
use thiserror::Error;

use crate::filter::FilterState;

/// The error type for niche-jsonl operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Reading from the input failed.
    #[error("failed to read input at line {line_number}: {source}")]
    Read {
        /// The 1-based line number being read when the error occurred.
        line_number: u64,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Writing to the output failed.
    #[error("failed to write output after {lines_written} lines: {source}")]
    Write {
        /// Number of lines fully handed to the writer before the failure.
        lines_written: u64,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The size threshold is not a positive finite number of megabytes.
    #[error("invalid size threshold {0}: must be a positive number of megabytes")]
    InvalidThreshold(f64),

    /// A filter was asked to run a second time.
    #[error("filter has already run (state: {0})")]
    AlreadyRun(FilterState),

    /// IO error occurred while opening or creating a file.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// A specialized Result type for niche-jsonl operations.
pub type Result<T> = std::result::Result<T, Error>;
