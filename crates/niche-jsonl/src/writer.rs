//! JSONL writing operations.
//!
//! This module provides async functionality for writing raw JSONL lines
//! with efficient buffering.

use tokio::io::{AsyncWrite, AsyncWriteExt, BufWriter};

use crate::{Error, Result};

/// Async writer for JSONL (JSON Lines) data.
///
/// `JsonlWriter` wraps an async writer and provides buffered writing of JSONL
/// formatted data. Each line is written verbatim followed by a single newline
/// character; nothing is re-encoded or re-serialized.
///
/// # Type Parameters
///
/// * `W` - The underlying async writer type. Must implement [`AsyncWrite`] and [`Unpin`].
///
/// # Examples
///
/// ```no_run
/// use niche_jsonl::writer::JsonlWriter;
/// use tokio::fs::File;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let file = File::create("artists_filtered.jsonl").await?;
/// let mut writer = JsonlWriter::new(file);
/// writer.write_line(br#"{"name":"Boards of Canada"}"#).await?;
/// writer.finish().await?;
/// # Ok(())
/// # }
/// ```
pub struct JsonlWriter<W> {
    /// Buffered writer wrapping the underlying async writer.
    writer: BufWriter<W>,
    /// Number of lines handed to the writer so far.
    lines_written: u64,
}

impl<W: AsyncWrite + Unpin> JsonlWriter<W> {
    /// Creates a new `JsonlWriter` wrapping the given async writer.
    ///
    /// The writer is wrapped in a [`BufWriter`] for efficient buffered I/O,
    /// reducing the number of system calls when writing many small records.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self {
            writer: BufWriter::new(writer),
            lines_written: 0,
        }
    }

    /// Creates a new `JsonlWriter` with a custom buffer capacity.
    #[must_use]
    pub fn with_capacity(writer: W, capacity: usize) -> Self {
        Self {
            writer: BufWriter::with_capacity(capacity, writer),
            lines_written: 0,
        }
    }

    /// Returns the number of lines written so far.
    #[must_use]
    pub fn lines_written(&self) -> u64 {
        self.lines_written
    }

    /// Writes `line` followed by exactly one `\n`.
    ///
    /// `line` must not contain the terminator itself.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Write`] if the underlying writer fails.
    pub async fn write_line(&mut self, line: &[u8]) -> Result<()> {
        if let Err(source) = self.write_terminated(line).await {
            return Err(Error::Write {
                lines_written: self.lines_written,
                source,
            });
        }
        self.lines_written += 1;
        Ok(())
    }

    async fn write_terminated(&mut self, line: &[u8]) -> std::io::Result<()> {
        self.writer.write_all(line).await?;
        self.writer.write_all(b"\n").await
    }

    /// Flushes buffered data and shuts down the underlying writer.
    ///
    /// Returns the underlying writer so callers writing to in-memory buffers
    /// can inspect the result.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Write`] if flushing or shutting down fails.
    pub async fn finish(mut self) -> Result<W> {
        if let Err(source) = self.writer.shutdown().await {
            return Err(Error::Write {
                lines_written: self.lines_written,
                source,
            });
        }
        Ok(self.writer.into_inner())
    }

    /// Returns a reference to the underlying buffered writer.
    #[must_use]
    pub fn get_ref(&self) -> &BufWriter<W> {
        &self.writer
    }

    /// Returns a mutable reference to the underlying buffered writer.
    ///
    /// Use with caution: writing directly to the buffer bypasses the line
    /// counter and may produce malformed JSONL output.
    pub fn get_mut(&mut self) -> &mut BufWriter<W> {
        &mut self.writer
    }

    /// Consumes the writer, returning the underlying buffered writer.
    ///
    /// Note: This does not flush the buffer. Call [`finish`](Self::finish)
    /// instead to ensure all data is written.
    #[must_use]
    pub fn into_inner(self) -> BufWriter<W> {
        self.writer
    }
}
