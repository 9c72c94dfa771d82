//! Newline-delimited framing over byte streams.

use std::io::{self, BufRead, Read, Write};

/// Longest line accepted from a peer, terminator included.
pub const MAX_LINE_BYTES: usize = 1024 * 1024;

/// A bidirectional stream of newline-terminated lines.
pub trait LineStream {
    /// Reads the next line including its terminator. Returns `Ok(None)`
    /// once the peer has closed its side and no bytes remain.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error, or `InvalidData` when a line
    /// exceeds the stream's size limit.
    fn read_line(&mut self) -> io::Result<Option<Vec<u8>>>;

    /// Writes `line` followed by a newline and flushes.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error.
    fn write_line(&mut self, line: &str) -> io::Result<()>;

    /// Flushes pending output before the stream is released.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error.
    fn close(&mut self) -> io::Result<()>;
}

/// [`LineStream`] over any buffered reader and writer pair.
#[derive(Debug)]
pub struct StreamLines<R, W> {
    reader: R,
    writer: W,
    limit: usize,
}

impl<R: BufRead, W: Write> StreamLines<R, W> {
    /// Wraps a reader and writer with the default line limit.
    pub fn new(reader: R, writer: W) -> Self {
        Self::with_limit(reader, writer, MAX_LINE_BYTES)
    }

    /// Wraps a reader and writer, rejecting lines longer than `limit` bytes.
    pub fn with_limit(reader: R, writer: W, limit: usize) -> Self {
        Self {
            reader,
            writer,
            limit,
        }
    }

    /// Releases the reader and writer.
    pub fn into_parts(self) -> (R, W) {
        (self.reader, self.writer)
    }
}

impl<R: BufRead, W: Write> LineStream for StreamLines<R, W> {
    fn read_line(&mut self) -> io::Result<Option<Vec<u8>>> {
        let mut line = Vec::new();
        let cap = u64::try_from(self.limit).unwrap_or(u64::MAX).saturating_add(1);
        let read = (&mut self.reader).take(cap).read_until(b'\n', &mut line)?;
        if read == 0 {
            return Ok(None);
        }
        if line.len() > self.limit {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("line exceeds {} bytes", self.limit),
            ));
        }
        Ok(Some(line))
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()
    }

    fn close(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}
