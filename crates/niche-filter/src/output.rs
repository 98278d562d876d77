//! Summary output for a completed filter run.
//!
//! The summary goes to stdout either as human-readable text or as JSON for
//! scripts that chain the filter into a catalog import.

use std::io::{self, IsTerminal, Write};
use std::path::Path;

use colored::Colorize;
use niche_jsonl::{FilterSummary, MaxSize};
use serde::Serialize;

const DEFAULT_TERMINAL_WIDTH: usize = 80;

/// Output format for the summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable text format
    Text,
    /// JSON format for programmatic use
    Json,
}

/// The input and output locations of a run, for reporting.
#[derive(Debug, Clone, Copy)]
pub struct RunPaths<'a> {
    /// The file that was read.
    pub input: &'a Path,
    /// The file that was written.
    pub output: &'a Path,
}

/// Settings that control text rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputConfig {
    /// Width to wrap the dropped line list to.
    pub max_width: usize,
    /// Whether to colorize the headline.
    pub use_colors: bool,
}

impl OutputConfig {
    /// Detect width and color support for stdout.
    ///
    /// Colors are disabled when `NO_COLOR` is set or stdout is not a terminal.
    #[must_use]
    pub fn detect() -> Self {
        let max_width = terminal_size::terminal_size()
            .map_or(DEFAULT_TERMINAL_WIDTH, |(w, _)| usize::from(w.0));
        let use_colors = std::env::var_os("NO_COLOR").is_none() && io::stdout().is_terminal();
        Self {
            max_width,
            use_colors,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_TERMINAL_WIDTH,
            use_colors: false,
        }
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    input: &'a Path,
    output: &'a Path,
    max_size_mb: f64,
    #[serde(flatten)]
    summary: &'a FilterSummary,
}

/// Print the summary of a run to stdout in the given mode.
///
/// # Errors
///
/// Returns an error if writing to stdout fails.
pub fn print_summary(
    summary: &FilterSummary,
    paths: &RunPaths<'_>,
    max_size: MaxSize,
    mode: OutputMode,
) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match mode {
        OutputMode::Text => {
            write_summary_text(&mut handle, summary, max_size, &OutputConfig::detect())
        }
        OutputMode::Json => write_summary_json(&mut handle, summary, paths, max_size),
    }
}

/// Write the human-readable summary.
///
/// # Errors
///
/// Returns an error if writing to `w` fails.
pub fn write_summary_text<W: Write>(
    w: &mut W,
    summary: &FilterSummary,
    max_size: MaxSize,
    config: &OutputConfig,
) -> io::Result<()> {
    let headline = "Filtering Complete!";
    if config.use_colors {
        writeln!(w, "\n{}", headline.green().bold())?;
    } else {
        writeln!(w, "\n{headline}")?;
    }
    writeln!(w, "Total Lines Processed: {}", summary.lines_processed)?;
    writeln!(
        w,
        "Total Lines Removed (exceeding {} MB): {}",
        max_size.megabytes(),
        summary.lines_dropped
    )?;

    if summary.has_drops() {
        writeln!(w, "\nLine Numbers of Removed Documents:")?;
        let list = summary
            .dropped_line_numbers
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        for line in textwrap::wrap(&list, config.max_width.max(1)) {
            writeln!(w, "{line}")?;
        }
    }

    writeln!(w, "\nFiltered file has been created successfully.\n")
}

/// Write the summary as a single pretty-printed JSON object.
///
/// # Errors
///
/// Returns an error if serialization or writing to `w` fails.
pub fn write_summary_json<W: Write>(
    w: &mut W,
    summary: &FilterSummary,
    paths: &RunPaths<'_>,
    max_size: MaxSize,
) -> io::Result<()> {
    let report = JsonReport {
        input: paths.input,
        output: paths.output,
        max_size_mb: max_size.megabytes(),
        summary,
    };
    serde_json::to_writer_pretty(&mut *w, &report)?;
    writeln!(w)
}
