//! Sink implementations

#[cfg(feature = "file")]
pub mod file;
pub mod memory;
pub mod stderr;
pub mod writer;

#[cfg(feature = "file")]
pub use file::FileSink;
pub use memory::MemorySink;
pub use stderr::StderrSink;
pub use writer::WriterSink;

pub use crate::core::Sink;
