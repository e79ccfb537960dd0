//! Standard error sink, the destination used when no output is configured

use crate::core::{Result, Sink};
use std::io::Write;

#[derive(Debug, Default, Clone, Copy)]
pub struct StderrSink;

impl StderrSink {
    pub fn new() -> Self {
        Self
    }
}

impl Sink for StderrSink {
    fn write_text(&mut self, text: &str) -> Result<()> {
        std::io::stderr().lock().write_all(text.as_bytes())?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        std::io::stderr().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "stderr"
    }
}
