//! # Rust FLog
//!
//! A thread-buffered logging engine. Each logging call formats its values in
//! the calling thread's own scratch space and appends the text to that
//! thread's buffer; nothing is shared on the logging path. When a thread
//! exits, its buffer is moved as one block into the engine's store, and the
//! store is written to the output sink once, at shutdown.
//!
//! ## Features
//!
//! - **Lock-free logging path**: concurrent threads never block each other
//! - **Whole-thread blocks**: one thread's records are never split by another's
//! - **Reentrancy safe**: logging from inside a value's rendering is dropped
//!   instead of corrupting the record in progress
//! - **All-or-nothing records**: a value that fails to render discards its record
//!
//! ```
//! use rust_flog::{flog_split_to, Logger, MemorySink};
//!
//! let sink = MemorySink::new();
//! let logger = std::sync::Arc::new(Logger::builder().output(sink.clone()).build());
//!
//! let worker = {
//!     let logger = std::sync::Arc::clone(&logger);
//!     std::thread::spawn(move || {
//!         flog_split_to!(logger; "worker", 1);
//!     })
//! };
//! worker.join().unwrap();
//!
//! logger.flush_all().unwrap();
//! assert_eq!(sink.contents(), "worker 1\n");
//! ```

pub mod core;
pub mod macros;
pub mod sinks;
pub mod tokens;

pub mod prelude {
    pub use crate::core::{
        Disp, DropReport, FloatStyle, FlogError, FormatFlags, LogOutcome, Loggable, Logger,
        LoggerBuilder, LoggerMetrics, Newline, Radix, RecordWriter, Result, Sink,
    };
    pub use crate::sinks::{MemorySink, StderrSink, WriterSink};
    pub use crate::tokens::{AscTime, CurrentTick};
    pub use crate::{flog, flog_split, flog_split_to, flog_to};
}

#[cfg(feature = "file")]
pub use sinks::FileSink;
pub use sinks::{MemorySink, StderrSink, WriterSink};

pub use crate::core::global::{
    global, init, is_initialized, log, log_into, log_split, merge_local_to_global, set_format,
    set_output, shutdown, update_format,
};
pub use crate::core::{
    Disp, DropReport, FloatStyle, FlogError, FormatFlags, GuardState, LogOutcome, LogStore,
    Loggable, Logger, LoggerBuilder, LoggerMetrics, Newline, Radix, RecordWriter,
    ReentrancyGuard, Result, SharedFormat, Sink,
};
