//! Core engine types and traits

pub mod error;
pub mod format;
pub mod global;
pub mod guard;
mod local;
pub mod loggable;
pub mod logger;
pub mod metrics;
pub mod sink;
pub mod store;

pub use error::{FlogError, Result};
pub use format::{FloatStyle, FormatFlags, Radix, SharedFormat};
pub use guard::{GuardHandle, GuardState, ReentrancyGuard};
pub use loggable::{Disp, Loggable, Newline, RecordWriter};
pub use logger::{DropReport, LogOutcome, Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use sink::Sink;
pub use store::LogStore;
