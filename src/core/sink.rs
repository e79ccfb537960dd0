//! Sink trait for flushed log text

use super::error::Result;

/// Final writable destination of the log store
///
/// A sink receives each merged thread block verbatim, in store order, when the
/// store is flushed.
pub trait Sink: Send {
    fn write_text(&mut self, text: &str) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}

impl<S: Sink + ?Sized> Sink for Box<S> {
    fn write_text(&mut self, text: &str) -> Result<()> {
        (**self).write_text(text)
    }

    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
