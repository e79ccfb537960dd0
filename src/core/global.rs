//! Process-wide engine
//!
//! Rust never runs destructors for statics, so the lifecycle is explicit:
//! [`init`] (optional) installs a configured engine at startup, and
//! [`shutdown`] merges the calling thread and flushes the store before the
//! process exits. Worker threads merge on their own when they exit; join them
//! before calling [`shutdown`].

use super::{
    error::{FlogError, Result},
    format::FormatFlags,
    loggable::Loggable,
    logger::{LogOutcome, Logger, LoggerBuilder},
    sink::Sink,
};
use std::sync::OnceLock;

static GLOBAL: OnceLock<Logger> = OnceLock::new();

/// Install the process-wide engine
///
/// Fails with [`FlogError::AlreadyInitialized`] when an engine already exists,
/// including one created implicitly by an earlier logging call.
pub fn init(builder: LoggerBuilder) -> Result<&'static Logger> {
    let mut pending = Some(builder);
    let logger = GLOBAL.get_or_init(|| pending.take().unwrap_or_default().build());
    if pending.is_some() {
        return Err(FlogError::AlreadyInitialized);
    }
    Ok(logger)
}

/// The process-wide engine, created with defaults on first use
pub fn global() -> &'static Logger {
    GLOBAL.get_or_init(Logger::new)
}

pub fn is_initialized() -> bool {
    GLOBAL.get().is_some()
}

pub fn log(values: &[&dyn Loggable]) -> LogOutcome {
    global().log(values)
}

pub fn log_split(values: &[&dyn Loggable]) -> LogOutcome {
    global().log_split(values)
}

pub fn log_into(scratch: &mut String, values: &[&dyn Loggable]) -> LogOutcome {
    global().log_into(scratch, values)
}

pub fn set_output<S: Sink + 'static>(sink: S) {
    global().set_output(sink);
}

pub fn set_format(flags: FormatFlags) {
    global().set_format(flags);
}

pub fn update_format<F>(f: F) -> FormatFlags
where
    F: FnMut(FormatFlags) -> FormatFlags,
{
    global().update_format(f)
}

pub fn merge_local_to_global() -> bool {
    global().merge_local_to_global()
}

/// Merge the calling thread and flush the process-wide store
pub fn shutdown() -> Result<u64> {
    let logger = global();
    logger.merge_local_to_global();
    logger.flush_all()
}
