//! JSONL reading operations.
//!
//! This module provides async functionality for reading JSONL files line-by-line
//! with efficient buffering and line number tracking for error reporting.
//!
//! Lines are handled as raw bytes. The reader never decodes or validates the
//! content, so the length it reports is the exact number of bytes a consumer
//! of the output would store for that record.

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};

use crate::{Error, Result};

/// Metadata about a single line returned by [`JsonlReader::read_line_capped`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineInfo {
    /// The 1-based line number.
    pub line_number: u64,
    /// Content length in bytes, excluding the line terminator.
    pub byte_len: u64,
    /// Whether `byte_len` exceeds the cap passed to the read.
    ///
    /// When set, the content was not retained and the caller's buffer is empty.
    pub over_cap: bool,
}

/// Async reader for JSONL (JSON Lines) data.
///
/// `JsonlReader` wraps an async reader and provides buffered reading of JSONL
/// formatted data. It tracks line numbers so that the caller can report which
/// lines were skipped and where a read failed.
///
/// # Type Parameters
///
/// * `R` - The underlying async reader type. Must implement [`AsyncRead`] and [`Unpin`].
///
/// # Examples
///
/// ```no_run
/// use niche_jsonl::reader::JsonlReader;
/// use tokio::fs::File;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let file = File::open("artists.jsonl").await?;
/// let mut reader = JsonlReader::new(file);
/// let mut buf: Vec<u8> = Vec::new();
/// while let Some(line) = reader.read_line_capped(&mut buf, 1024).await? {
///     println!("line {} is {} bytes", line.line_number, line.byte_len);
/// }
/// # Ok(())
/// # }
/// ```
pub struct JsonlReader<R> {
    /// Buffered reader wrapping the underlying async reader.
    reader: BufReader<R>,
    /// Current line number (1-based counting, 0 before any lines are read).
    line_number: u64,
}

impl<R: AsyncRead + Unpin> JsonlReader<R> {
    /// Creates a new `JsonlReader` wrapping the given async reader.
    ///
    /// The reader is wrapped in a [`BufReader`] for efficient buffered I/O.
    /// Line numbering uses 1-based indexing: the counter starts at 0 and increments
    /// after each line is read, so the first line read is numbered 1.
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            line_number: 0,
        }
    }

    /// Creates a new `JsonlReader` with a custom buffer capacity.
    ///
    /// Catalog dumps are read once, front to back, so a larger buffer than
    /// tokio's default cuts the number of reads on multi-gigabyte inputs.
    #[must_use]
    pub fn with_capacity(reader: R, capacity: usize) -> Self {
        Self {
            reader: BufReader::with_capacity(capacity, reader),
            line_number: 0,
        }
    }

    /// Returns the current line number.
    ///
    /// Returns 0 before any lines have been read. After reading, returns the
    /// 1-based line number of the last line read.
    #[must_use]
    pub fn line_number(&self) -> u64 {
        self.line_number
    }

    /// Reads the next line into `buf`, keeping at most `cap` content bytes.
    ///
    /// Returns `Ok(None)` once the input is exhausted. `buf` is cleared on
    /// every call. The line terminator is `\n`; a `\r` directly before it (or
    /// before end of input) belongs to the terminator, so CRLF input measures
    /// the same as LF input. A final line without a newline is still returned.
    ///
    /// If the line turns out to be longer than `cap`, the rest of it is
    /// consumed and counted without being buffered, `over_cap` is set and
    /// `buf` is left empty. A single oversized record therefore never costs
    /// more than `cap + 1` bytes of memory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Read`] if the underlying reader fails. The line
    /// number in the error is the line that was being read.
    pub async fn read_line_capped(&mut self, buf: &mut Vec<u8>, cap: u64) -> Result<Option<LineInfo>> {
        buf.clear();

        // One extra byte is retained so a trailing '\r' can be stripped
        // without losing the decision for a line of exactly `cap` bytes.
        let retain_limit = cap.saturating_add(1);
        let mut len: u64 = 0;
        let mut last_byte: Option<u8> = None;
        let mut over_cap = false;
        let mut saw_bytes = false;

        loop {
            let (consumed, terminated) = {
                let available = match self.reader.fill_buf().await {
                    Ok(available) => available,
                    Err(source) => {
                        return Err(Error::Read {
                            line_number: self.line_number + 1,
                            source,
                        });
                    }
                };
                if available.is_empty() {
                    break;
                }
                saw_bytes = true;

                let newline = available.iter().position(|&b| b == b'\n');
                let content = &available[..newline.unwrap_or(available.len())];

                len += content.len() as u64;
                if let Some(&b) = content.last() {
                    last_byte = Some(b);
                }
                if !over_cap {
                    buf.extend_from_slice(content);
                    if buf.len() as u64 > retain_limit {
                        over_cap = true;
                        buf.clear();
                    }
                }

                match newline {
                    Some(pos) => (pos + 1, true),
                    None => (available.len(), false),
                }
            };
            self.reader.consume(consumed);
            if terminated {
                break;
            }
        }

        if !saw_bytes {
            return Ok(None);
        }

        if last_byte == Some(b'\r') {
            len -= 1;
            if !over_cap {
                buf.pop();
            }
        }
        if len > cap {
            over_cap = true;
            buf.clear();
        }

        self.line_number += 1;
        Ok(Some(LineInfo {
            line_number: self.line_number,
            byte_len: len,
            over_cap,
        }))
    }

    /// Returns a reference to the underlying buffered reader.
    #[must_use]
    pub fn get_ref(&self) -> &BufReader<R> {
        &self.reader
    }

    /// Returns a mutable reference to the underlying buffered reader.
    ///
    /// Use with caution: reading directly from the buffer may cause
    /// line number tracking to become inaccurate.
    pub fn get_mut(&mut self) -> &mut BufReader<R> {
        &mut self.reader
    }

    /// Consumes the reader, returning the underlying buffered reader.
    #[must_use]
    pub fn into_inner(self) -> BufReader<R> {
        self.reader
    }
}
