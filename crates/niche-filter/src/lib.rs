//! Command-line front end for the niche JSONL size filter.
//!
//! The binary checks its arguments and paths, runs
//! [`niche_jsonl::SizeFilter`] over the input file, and prints a summary of
//! the lines it removed.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod error;
pub mod output;
pub mod progress;

pub use error::{Error, Result};
