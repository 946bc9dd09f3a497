//! Serialized match output
//!
//! Workers share one sink; the lock is held for exactly one line so
//! concurrent matches never interleave.

use crate::domain::tripcode::SearchResult;
use parking_lot::Mutex;
use std::io::{self, Stdout, Write};

/// Line-oriented sink for search results
pub struct OutputSink<W: Write + Send> {
    writer: Mutex<W>,
}

impl OutputSink<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> OutputSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Write one result line and flush it
    pub fn report(&self, result: &SearchResult) -> io::Result<()> {
        let mut writer = self.writer.lock();
        writeln!(writer, "{}", result)?;
        writer.flush()
    }

    /// Recover the underlying writer
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}
