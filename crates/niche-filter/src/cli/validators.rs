//! CLI input validation functions.
//!
//! These validators are used by clap's `value_parser` attribute to validate
//! user input at parse time, providing immediate feedback for invalid values.

use niche_jsonl::MaxSize;

/// Validate the `--max_size_mb` value.
///
/// Accepts any positive, finite decimal number of megabytes, e.g. `15`,
/// `0.5`, `1e-6`.
pub fn validate_max_size_mb(s: &str) -> Result<MaxSize, String> {
    let s = s.trim();

    let megabytes: f64 = s
        .parse()
        .map_err(|_| format!("--max_size_mb must be a positive number, got '{s}'"))?;

    MaxSize::from_megabytes(megabytes)
        .map_err(|_| format!("--max_size_mb must be a positive number, got '{s}'"))
}
