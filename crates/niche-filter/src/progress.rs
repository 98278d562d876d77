//! Console progress reporting for filter runs.

use std::time::Instant;

use niche_jsonl::{Error, FilterObserver, FilterSummary};
use tracing::{debug, error, info};

/// Logs filter progress through `tracing`.
///
/// Progress lines go out at info level; individual drops at debug level so
/// a catalog with many oversized records does not flood the console.
#[derive(Debug)]
pub struct ConsoleObserver {
    started: Instant,
}

impl ConsoleObserver {
    /// Create an observer; elapsed time is measured from here.
    #[must_use]
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
        }
    }
}

impl Default for ConsoleObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterObserver for ConsoleObserver {
    fn on_start(&mut self, max_size_bytes: u64) {
        debug!(max_size_bytes, "Streaming input");
    }

    fn on_progress(&mut self, lines_processed: u64) {
        info!("Processed {lines_processed} lines...");
    }

    fn on_dropped(&mut self, line_number: u64, byte_len: u64) {
        debug!(line_number, byte_len, "Removed oversized document");
    }

    fn on_complete(&mut self, summary: &FilterSummary) {
        info!(
            lines_written = summary.lines_written,
            elapsed_secs = self.started.elapsed().as_secs_f64(),
            "Filtered output written"
        );
    }

    fn on_failed(&mut self, err: &Error) {
        error!(error = %err, "Filtering stopped");
    }
}
