//! Accounting for processed and dropped lines.
//!
//! The [`DropLedger`] lives for a single filter run. It stores the line
//! numbers of dropped lines, never their content, so its size grows with the
//! number of drops and not with input size.

use serde::Serialize;

/// Running counts for a filter run plus the ordered list of dropped lines.
///
/// `lines_processed() == lines_written() + lines_dropped()` holds after every
/// call to [`record_kept`](Self::record_kept) or [`record_dropped`](Self::record_dropped).
///
/// # Examples
///
/// ```
/// use niche_jsonl::DropLedger;
///
/// let mut ledger = DropLedger::new();
/// ledger.record_kept();
/// ledger.record_dropped(2);
/// ledger.record_kept();
///
/// assert_eq!(ledger.lines_processed(), 3);
/// assert_eq!(ledger.lines_written(), 2);
/// assert_eq!(ledger.dropped_line_numbers(), &[2]);
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DropLedger {
    lines_processed: u64,
    dropped: Vec<u64>,
}

impl DropLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a line that was written to the output.
    pub fn record_kept(&mut self) {
        self.lines_processed += 1;
    }

    /// Records a dropped line by its 1-based line number.
    pub fn record_dropped(&mut self, line_number: u64) {
        self.lines_processed += 1;
        self.dropped.push(line_number);
    }

    /// Returns the total number of lines seen.
    #[must_use]
    pub fn lines_processed(&self) -> u64 {
        self.lines_processed
    }

    /// Returns the number of dropped lines.
    #[must_use]
    pub fn lines_dropped(&self) -> u64 {
        self.dropped.len() as u64
    }

    /// Returns the number of lines that went to the output.
    #[must_use]
    pub fn lines_written(&self) -> u64 {
        self.lines_processed - self.lines_dropped()
    }

    /// Returns the dropped line numbers in input order.
    #[must_use]
    pub fn dropped_line_numbers(&self) -> &[u64] {
        &self.dropped
    }

    /// Consumes the ledger into a summary for the given threshold.
    #[must_use]
    pub fn into_summary(self, max_size_bytes: u64) -> FilterSummary {
        FilterSummary {
            lines_processed: self.lines_processed,
            lines_written: self.lines_written(),
            lines_dropped: self.lines_dropped(),
            dropped_line_numbers: self.dropped,
            max_size_bytes,
        }
    }
}

/// Final report of a completed filter run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterSummary {
    /// Total lines read from the input.
    pub lines_processed: u64,
    /// Lines written to the output.
    pub lines_written: u64,
    /// Lines excluded for exceeding the threshold.
    pub lines_dropped: u64,
    /// 1-based numbers of the excluded lines, in input order.
    pub dropped_line_numbers: Vec<u64>,
    /// The byte threshold a line had to exceed to be dropped.
    pub max_size_bytes: u64,
}

impl FilterSummary {
    /// Returns true if any line was dropped.
    #[must_use]
    pub fn has_drops(&self) -> bool {
        self.lines_dropped > 0
    }
}
