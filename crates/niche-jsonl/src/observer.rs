//! Progress and summary notifications for filter runs.
//!
//! A [`FilterObserver`] receives side-effect events while a
//! [`SizeFilter`](crate::SizeFilter) runs. Observers cannot influence which
//! lines are kept: every method returns `()` and is called after the
//! decision for the current line has been made.

use crate::{Error, FilterSummary};

/// Receives notifications from a running filter.
///
/// All methods have empty default bodies, so an implementation only needs to
/// override the events it cares about. For a run, `on_start` is called once,
/// then any number of `on_progress` / `on_dropped` calls, then exactly one
/// of `on_complete` or `on_failed`. Nothing is called after that.
pub trait FilterObserver {
    /// Called once before the first line is read.
    fn on_start(&mut self, _max_size_bytes: u64) {}

    /// Called every `progress_interval` lines with the running line count.
    fn on_progress(&mut self, _lines_processed: u64) {}

    /// Called for each dropped line.
    fn on_dropped(&mut self, _line_number: u64, _byte_len: u64) {}

    /// Called once after the output has been flushed and closed.
    fn on_complete(&mut self, _summary: &FilterSummary) {}

    /// Called once if the run fails. The output is incomplete.
    fn on_failed(&mut self, _error: &Error) {}
}

/// An observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl FilterObserver for NoopObserver {}

impl<O: FilterObserver + ?Sized> FilterObserver for &mut O {
    fn on_start(&mut self, max_size_bytes: u64) {
        (**self).on_start(max_size_bytes);
    }

    fn on_progress(&mut self, lines_processed: u64) {
        (**self).on_progress(lines_processed);
    }

    fn on_dropped(&mut self, line_number: u64, byte_len: u64) {
        (**self).on_dropped(line_number, byte_len);
    }

    fn on_complete(&mut self, summary: &FilterSummary) {
        (**self).on_complete(summary);
    }

    fn on_failed(&mut self, error: &Error) {
        (**self).on_failed(error);
    }
}
