//! Adapter turning any `io::Write` into a sink

use crate::core::{Result, Sink};
use std::io::Write;

/// Sink over an arbitrary writer (socket, pipe, `Vec<u8>`, ...)
///
/// # Example
///
/// ```
/// use rust_flog::sinks::WriterSink;
/// use rust_flog::Sink;
///
/// let mut sink = WriterSink::new(Vec::new());
/// sink.write_text("hello").unwrap();
/// assert_eq!(sink.into_inner(), b"hello");
/// ```
#[derive(Debug)]
pub struct WriterSink<W: Write + Send> {
    writer: W,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> Sink for WriterSink<W> {
    fn write_text(&mut self, text: &str) -> Result<()> {
        self.writer.write_all(text.as_bytes())?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "writer"
    }
}
