//! Error types for filter CLI preconditions.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors detected before any streaming starts.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred while inspecting a path.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The input path does not exist.
    #[error("Input file does not exist at path '{}'", .0.display())]
    InputNotFound(PathBuf),

    /// The input path exists but is not a regular file.
    #[error("Input path '{}' is not a file", .0.display())]
    InputNotAFile(PathBuf),

    /// The directory that would contain the output does not exist.
    #[error("Output directory does not exist at path '{}'", .0.display())]
    OutputDirNotFound(PathBuf),

    /// Input and output refer to the same file.
    #[error("Output '{}' is the same file as the input", .0.display())]
    OutputIsInput(PathBuf),
}

/// A specialized Result type for filter CLI operations.
pub type Result<T> = std::result::Result<T, Error>;
