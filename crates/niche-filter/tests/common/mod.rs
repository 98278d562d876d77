//! Common test utilities shared across integration tests.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Path to the compiled `filter` binary.
pub fn filter_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_filter"))
}

/// Run the filter binary in the specified directory
pub fn run_filter_in_dir(dir: &Path, args: &[&str]) -> Output {
    Command::new(filter_binary())
        .args(args)
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute filter")
}

/// Write `lines` to `dir/name`, one per line with a trailing newline.
pub fn write_jsonl(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
    let path = dir.join(name);
    let mut content = lines.join("\n");
    if !lines.is_empty() {
        content.push('\n');
    }
    std::fs::write(&path, content).expect("Failed to write input file");
    path
}

/// Lossy stdout of a finished process.
pub fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Lossy stderr of a finished process.
pub fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
