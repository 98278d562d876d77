//! Size-based line filtering.
//!
//! [`SizeFilter`] streams an input line by line and writes every line whose
//! byte length is at most the configured [`MaxSize`] to the output, in input
//! order. Longer lines are dropped and their line numbers recorded in a
//! [`DropLedger`]. Nothing but the current line and the ledger is held in
//! memory, so input size is unbounded.
//!
//! A line is dropped if and only if `byte_len > max_size.bytes()`. A line of
//! exactly the threshold is kept.

use std::fmt;
use std::path::Path;

use tokio::fs::File;
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::{debug, info};

use crate::{
    DropLedger, Error, FilterObserver, FilterSummary, JsonlReader, JsonlWriter, NoopObserver,
    Result,
};

/// Default threshold in megabytes.
pub const DEFAULT_MAX_SIZE_MB: f64 = 15.0;

/// Default number of lines between progress notifications.
pub const DEFAULT_PROGRESS_INTERVAL: u64 = 1_000_000;

const DEFAULT_BUFFER_CAPACITY: usize = 64 * 1024;

const BYTES_PER_MEGABYTE: f64 = 1024.0 * 1024.0;

/// Maximum permitted byte length of a single line.
///
/// Constructed from a positive number of megabytes, where one megabyte is
/// `1024 × 1024` bytes. The byte limit is the floor of the product: for an
/// integer length `n`, `n > floor(x)` is the same test as `n > x`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaxSize {
    megabytes: f64,
    bytes: u64,
}

impl MaxSize {
    /// Creates a threshold from a megabyte value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidThreshold`] if `megabytes` is not finite or
    /// not strictly positive.
    ///
    /// # Examples
    ///
    /// ```
    /// use niche_jsonl::MaxSize;
    ///
    /// assert_eq!(MaxSize::from_megabytes(15.0).unwrap().bytes(), 15 * 1024 * 1024);
    /// assert_eq!(MaxSize::from_megabytes(0.5).unwrap().bytes(), 512 * 1024);
    /// assert!(MaxSize::from_megabytes(-5.0).is_err());
    /// ```
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_megabytes(megabytes: f64) -> Result<Self> {
        if !megabytes.is_finite() || megabytes <= 0.0 {
            return Err(Error::InvalidThreshold(megabytes));
        }
        // Saturates at u64::MAX for absurdly large values.
        let bytes = (megabytes * BYTES_PER_MEGABYTE).floor() as u64;
        Ok(Self { megabytes, bytes })
    }

    /// Creates a threshold from an exact byte count.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_bytes(bytes: u64) -> Self {
        Self {
            megabytes: bytes as f64 / BYTES_PER_MEGABYTE,
            bytes,
        }
    }

    /// Returns the limit in bytes.
    #[must_use]
    pub fn bytes(&self) -> u64 {
        self.bytes
    }

    /// Returns the limit in megabytes as originally given.
    #[must_use]
    pub fn megabytes(&self) -> f64 {
        self.megabytes
    }

    /// Returns true if a line of `byte_len` bytes is over the limit.
    #[must_use]
    pub fn exceeded_by(&self, byte_len: u64) -> bool {
        byte_len > self.bytes
    }
}

impl Default for MaxSize {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn default() -> Self {
        Self {
            megabytes: DEFAULT_MAX_SIZE_MB,
            bytes: (DEFAULT_MAX_SIZE_MB * BYTES_PER_MEGABYTE) as u64,
        }
    }
}

/// Configuration for a [`SizeFilter`] run.
#[derive(Debug, Clone)]
pub struct FilterConfig {
    /// Lines longer than this are dropped.
    pub max_size: MaxSize,

    /// Lines between progress notifications. 0 disables progress.
    pub progress_interval: u64,

    /// Read buffer size in bytes.
    pub read_buffer_capacity: usize,

    /// Write buffer size in bytes.
    pub write_buffer_capacity: usize,
}

impl FilterConfig {
    /// Create a configuration with the given threshold and default buffers.
    #[must_use]
    pub fn new(max_size: MaxSize) -> Self {
        Self {
            max_size,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            read_buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            write_buffer_capacity: DEFAULT_BUFFER_CAPACITY,
        }
    }

    /// Set the progress interval.
    #[must_use]
    pub fn with_progress_interval(mut self, lines: u64) -> Self {
        self.progress_interval = lines;
        self
    }

    /// Set the read buffer capacity.
    #[must_use]
    pub fn with_read_buffer_capacity(mut self, bytes: usize) -> Self {
        self.read_buffer_capacity = bytes;
        self
    }

    /// Set the write buffer capacity.
    #[must_use]
    pub fn with_write_buffer_capacity(mut self, bytes: usize) -> Self {
        self.write_buffer_capacity = bytes;
        self
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self::new(MaxSize::default())
    }
}

/// Lifecycle of a [`SizeFilter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterState {
    /// Not yet started.
    Idle,
    /// Reading and writing lines.
    Streaming,
    /// Finished; the output is complete and closed.
    Completed,
    /// Stopped on an I/O error; the output is incomplete and must be discarded.
    Failed,
}

impl FilterState {
    /// Returns true for `Completed` and `Failed`.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

impl fmt::Display for FilterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Streaming => "streaming",
            Self::Completed => "completed",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Streams lines from an input to an output, dropping oversized lines.
///
/// A filter runs exactly once. Create a new one for every input.
///
/// # Examples
///
/// ```
/// use niche_jsonl::{FilterConfig, MaxSize, NoopObserver, SizeFilter};
///
/// # async fn example() -> niche_jsonl::Result<()> {
/// let input: &[u8] = b"{\"a\":1}\n{\"too\":\"long\"}\n";
/// let mut output: Vec<u8> = Vec::new();
///
/// let mut filter = SizeFilter::new(FilterConfig::new(MaxSize::from_bytes(8)));
/// let summary = filter.run(input, &mut output, NoopObserver).await?;
///
/// assert_eq!(output, b"{\"a\":1}\n");
/// assert_eq!(summary.dropped_line_numbers, vec![2]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct SizeFilter {
    config: FilterConfig,
    state: FilterState,
}

impl SizeFilter {
    /// Creates an idle filter.
    #[must_use]
    pub fn new(config: FilterConfig) -> Self {
        Self {
            config,
            state: FilterState::Idle,
        }
    }

    /// Returns the current lifecycle state.
    #[must_use]
    pub fn state(&self) -> FilterState {
        self.state
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Opens `input`, creates or truncates `output`, and runs the filter.
    ///
    /// The output file exists after a successful run even if no line was
    /// written. If opening either file fails the filter stays `Idle`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlreadyRun`] if the filter is not idle (checked before
    /// any file is touched), [`Error::Io`] if a file cannot be opened, and
    /// any error from [`run`](Self::run).
    pub async fn run_files<O: FilterObserver>(
        &mut self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
        observer: O,
    ) -> Result<FilterSummary> {
        self.ensure_idle()?;
        let input = File::open(input.as_ref()).await?;
        let output = File::create(output.as_ref()).await?;
        self.run(input, output, observer).await
    }

    /// Runs the filter over an arbitrary reader and writer.
    ///
    /// The writer is flushed and shut down before the summary is returned.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlreadyRun`] if the filter is not idle, or
    /// [`Error::Read`] / [`Error::Write`] if streaming fails. After an I/O
    /// error the state is [`FilterState::Failed`] and whatever reached the
    /// output is incomplete.
    pub async fn run<R, W, O>(
        &mut self,
        input: R,
        output: W,
        mut observer: O,
    ) -> Result<FilterSummary>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
        O: FilterObserver,
    {
        self.ensure_idle()?;
        self.transition(FilterState::Streaming);
        observer.on_start(self.config.max_size.bytes());

        match self.stream(input, output, &mut observer).await {
            Ok(summary) => {
                self.transition(FilterState::Completed);
                info!(
                    lines_processed = summary.lines_processed,
                    lines_dropped = summary.lines_dropped,
                    "filter completed"
                );
                observer.on_complete(&summary);
                Ok(summary)
            }
            Err(error) => {
                self.transition(FilterState::Failed);
                observer.on_failed(&error);
                Err(error)
            }
        }
    }

    async fn stream<R, W, O>(&self, input: R, output: W, observer: &mut O) -> Result<FilterSummary>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
        O: FilterObserver,
    {
        let max_size = self.config.max_size;
        let interval = self.config.progress_interval;

        let mut reader = JsonlReader::with_capacity(input, self.config.read_buffer_capacity);
        let mut writer = JsonlWriter::with_capacity(output, self.config.write_buffer_capacity);
        let mut ledger = DropLedger::new();
        let mut line = Vec::new();

        while let Some(info) = reader.read_line_capped(&mut line, max_size.bytes()).await? {
            if max_size.exceeded_by(info.byte_len) {
                debug!(
                    line_number = info.line_number,
                    byte_len = info.byte_len,
                    "dropping oversized line"
                );
                ledger.record_dropped(info.line_number);
                observer.on_dropped(info.line_number, info.byte_len);
            } else {
                writer.write_line(&line).await?;
                ledger.record_kept();
            }

            if interval > 0 && ledger.lines_processed() % interval == 0 {
                observer.on_progress(ledger.lines_processed());
            }
        }

        writer.finish().await?;
        Ok(ledger.into_summary(max_size.bytes()))
    }

    fn ensure_idle(&self) -> Result<()> {
        if self.state == FilterState::Idle {
            Ok(())
        } else {
            Err(Error::AlreadyRun(self.state))
        }
    }

    fn transition(&mut self, next: FilterState) {
        debug!(from = %self.state, to = %next, "filter state change");
        self.state = next;
    }
}

/// Filters `input_path` into `output_path`, dropping lines over `max_size`.
///
/// Shorthand for a [`SizeFilter`] with default buffers, default progress
/// interval, and no observer.
///
/// # Errors
///
/// See [`SizeFilter::run_files`].
pub async fn filter_file(
    input_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    max_size: MaxSize,
) -> Result<FilterSummary> {
    SizeFilter::new(FilterConfig::new(max_size))
        .run_files(input_path, output_path, NoopObserver)
        .await
}
