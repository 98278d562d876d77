//! Streaming JSONL line filtering for large catalog dumps.
//!
//! This library reads newline-delimited records, measures each line's byte
//! length, and writes the lines that fit under a size threshold to a new
//! output, keeping a ledger of the line numbers that were dropped.
//!
//! Line content is never parsed: a "record" is whatever sits between two
//! newlines, so invalid JSON passes through untouched as long as it is small
//! enough.
//!
//! # Examples
//!
//! ```no_run
//! use niche_jsonl::{filter_file, MaxSize};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let max_size = MaxSize::from_megabytes(15.0)?;
//! let summary = filter_file("artists.jsonl", "artists_filtered.jsonl", max_size).await?;
//! println!("dropped {} of {} lines", summary.lines_dropped, summary.lines_processed);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod filter;
pub mod ledger;
pub mod observer;
pub mod reader;
pub mod writer;

pub use error::{Error, Result};
pub use filter::{
    filter_file, FilterConfig, FilterState, MaxSize, SizeFilter, DEFAULT_MAX_SIZE_MB,
    DEFAULT_PROGRESS_INTERVAL,
};
pub use ledger::{DropLedger, FilterSummary};
pub use observer::{FilterObserver, NoopObserver};
pub use reader::{JsonlReader, LineInfo};
pub use writer::JsonlWriter;
