//! Filesystem preconditions checked before the filter starts.

use std::path::{Path, PathBuf};

use tokio::fs;

use crate::{Error, Result};

/// Check that `input` is an existing file and that `output` can be created.
///
/// An output with no directory component lives in the current directory.
/// Nothing is created or modified here.
///
/// # Errors
///
/// Returns [`Error::InputNotFound`], [`Error::InputNotAFile`],
/// [`Error::OutputDirNotFound`], or [`Error::OutputIsInput`].
pub async fn check_paths(input: &Path, output: &Path) -> Result<()> {
    let input_meta = match fs::metadata(input).await {
        Ok(meta) => meta,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(Error::InputNotFound(input.to_path_buf()));
        }
        Err(e) => return Err(e.into()),
    };
    if !input_meta.is_file() {
        return Err(Error::InputNotAFile(input.to_path_buf()));
    }

    let output_dir = output_dir(output);
    match fs::metadata(&output_dir).await {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => return Err(Error::OutputDirNotFound(output_dir)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(Error::OutputDirNotFound(output_dir));
        }
        Err(e) => return Err(e.into()),
    }

    // Creating the output would truncate the input before it is read.
    if fs::try_exists(output).await? {
        let same = fs::canonicalize(input).await? == fs::canonicalize(output).await?;
        if same {
            return Err(Error::OutputIsInput(output.to_path_buf()));
        }
    }

    Ok(())
}

fn output_dir(output: &Path) -> PathBuf {
    match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
