//! Main logging engine

use super::{
    error::{FlogError, Result},
    format::{FormatFlags, SharedFormat},
    guard::GuardHandle,
    local::{self, Acquire},
    loggable::{Loggable, RecordWriter},
    metrics::LoggerMetrics,
    sink::Sink,
    store::LogStore,
};
use crate::sinks::StderrSink;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_ENGINE_ID: AtomicU64 = AtomicU64::new(1);

/// What happened to one logging call
///
/// Callers are free to ignore it: a dropped record is never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogOutcome {
    /// The record was appended to the calling thread's buffer
    Committed,
    /// The thread was already inside a logging call for this engine
    Reentrant,
    /// A value failed to render; nothing from the call was kept
    ConversionFailed,
    /// The thread already merged its buffer for this engine
    ThreadClosed,
}

impl LogOutcome {
    #[inline]
    pub fn is_committed(self) -> bool {
        self == LogOutcome::Committed
    }
}

impl fmt::Display for LogOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogOutcome::Committed => write!(f, "Committed"),
            LogOutcome::Reentrant => write!(f, "Reentrant"),
            LogOutcome::ConversionFailed => write!(f, "ConversionFailed"),
            LogOutcome::ThreadClosed => write!(f, "ThreadClosed"),
        }
    }
}

/// Whether dropped records are summarized on stderr when the store is flushed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DropReport {
    Silent,
    #[default]
    OnShutdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layout {
    Concat,
    Split,
}

/// State shared by every thread logging to one engine
pub(crate) struct EngineShared {
    pub(crate) id: u64,
    store: LogStore,
    sink: Mutex<Option<Box<dyn Sink>>>,
    format: SharedFormat,
    metrics: LoggerMetrics,
    flushed: AtomicBool,
    drop_report: DropReport,
}

impl EngineShared {
    pub(crate) fn merge(&self, block: String) {
        self.store.merge(block);
        self.metrics.record_merged();
    }
}

/// Thread-buffered logging engine
///
/// Every thread formats into its own scratch space and accumulates committed
/// records in its own buffer. The buffer moves into the engine's store when
/// the thread exits (or calls [`Logger::merge_local_to_global`]), and the
/// store is written to the sink once by [`Logger::flush_all`].
///
/// # Example
///
/// ```
/// use rust_flog::{flog_split_to, Logger, MemorySink};
///
/// let sink = MemorySink::new();
/// let logger = Logger::builder().output(sink.clone()).build();
///
/// flog_split_to!(logger; 1, 2, 3);
///
/// logger.merge_local_to_global();
/// logger.flush_all().unwrap();
/// assert_eq!(sink.contents(), "1 2 3\n");
/// ```
pub struct Logger {
    shared: Arc<EngineShared>,
}

impl Logger {
    #[must_use]
    pub fn new() -> Self {
        LoggerBuilder::new().build()
    }

    /// Render `values` in order and append the text to the calling thread's
    /// buffer
    pub fn log(&self, values: &[&dyn Loggable]) -> LogOutcome {
        self.record(values, Layout::Concat)
    }

    /// Like [`Logger::log`], separating values with one space and ending the
    /// record with a newline
    pub fn log_split(&self, values: &[&dyn Loggable]) -> LogOutcome {
        self.record(values, Layout::Split)
    }

    /// Render `values` after whatever `scratch` already holds and commit the
    /// whole buffer
    ///
    /// On failure `scratch` is restored to its previous content.
    pub fn log_into(&self, scratch: &mut String, values: &[&dyn Loggable]) -> LogOutcome {
        let (handle, own_scratch) = match self.begin() {
            Ok(acquired) => acquired,
            Err(outcome) => return outcome,
        };
        local::release(self.shared.id, own_scratch, false);

        let start = scratch.len();
        let flags = self.shared.format.load();
        let outcome = match render(scratch, flags, values, Layout::Concat) {
            Ok(()) => {
                local::commit_text(self.shared.id, scratch);
                LogOutcome::Committed
            }
            Err(_) => {
                scratch.truncate(start);
                LogOutcome::ConversionFailed
            }
        };
        drop(handle);
        self.count(outcome);
        outcome
    }

    fn record(&self, values: &[&dyn Loggable], layout: Layout) -> LogOutcome {
        let (handle, mut scratch) = match self.begin() {
            Ok(acquired) => acquired,
            Err(outcome) => return outcome,
        };

        let flags = self.shared.format.load();
        let outcome = match render(&mut scratch, flags, values, layout) {
            Ok(()) => LogOutcome::Committed,
            Err(_) => LogOutcome::ConversionFailed,
        };
        local::release(self.shared.id, scratch, outcome.is_committed());
        drop(handle);
        self.count(outcome);
        outcome
    }

    fn begin(&self) -> std::result::Result<(GuardHandle, String), LogOutcome> {
        match local::acquire(&self.shared) {
            Acquire::Acquired { handle, scratch } => Ok((handle, scratch)),
            Acquire::Reentrant => {
                self.count(LogOutcome::Reentrant);
                Err(LogOutcome::Reentrant)
            }
            Acquire::Closed => {
                self.count(LogOutcome::ThreadClosed);
                Err(LogOutcome::ThreadClosed)
            }
        }
    }

    fn count(&self, outcome: LogOutcome) {
        let metrics = &self.shared.metrics;
        match outcome {
            LogOutcome::Committed => metrics.record_committed(),
            LogOutcome::Reentrant => metrics.record_reentrant(),
            LogOutcome::ConversionFailed => metrics.record_conversion_failure(),
            LogOutcome::ThreadClosed => metrics.record_closed(),
        };
    }

    /// Replace the output sink
    ///
    /// Meant to be called during initialization: it waits for a flush in
    /// progress and only affects flushes that start afterwards.
    pub fn set_output<S: Sink + 'static>(&self, sink: S) {
        *self.shared.sink.lock() = Some(Box::new(sink));
    }

    /// Name of the configured sink, `None` when the default is in use
    pub fn output_name(&self) -> Option<String> {
        self.shared.sink.lock().as_ref().map(|s| s.name().to_string())
    }

    pub fn format(&self) -> FormatFlags {
        self.shared.format.load()
    }

    pub fn set_format(&self, flags: FormatFlags) {
        self.shared.format.store(flags);
    }

    /// Change some flags, returning the previous value
    pub fn update_format<F>(&self, f: F) -> FormatFlags
    where
        F: FnMut(FormatFlags) -> FormatFlags,
    {
        self.shared.format.update(f)
    }

    /// Move the calling thread's buffer into the store now
    ///
    /// This also runs automatically when a thread that logged to this engine
    /// exits. Threads whose thread-locals are never destroyed (typically the
    /// main thread) must call it before the flush. A thread merges at most
    /// once; its later calls return [`LogOutcome::ThreadClosed`].
    pub fn merge_local_to_global(&self) -> bool {
        local::merge_now(&self.shared)
    }

    /// Committed text of the calling thread that has not been merged yet
    pub fn thread_buffer(&self) -> Option<String> {
        local::pending(self.shared.id)
    }

    /// Write every merged block, in store order, to the sink
    ///
    /// Falls back to standard error when no sink was configured. The store is
    /// flushed at most once; later calls fail with
    /// [`FlogError::AlreadyFlushed`].
    pub fn flush_all(&self) -> Result<u64> {
        if self.shared.flushed.swap(true, Ordering::AcqRel) {
            return Err(FlogError::AlreadyFlushed);
        }

        let mut sink = self.shared.sink.lock();
        let written = match sink.as_mut() {
            Some(sink) => self.shared.store.write_to(&mut **sink),
            None => self.shared.store.write_to(&mut StderrSink),
        }
        .map_err(|e| match e {
            FlogError::Io(source) => {
                FlogError::io_operation("flushing log store", "sink write failed", source)
            }
            other => other,
        })?;
        drop(sink);

        self.shared.metrics.record_flushed(written);
        self.report_drops();
        Ok(written)
    }

    pub fn is_flushed(&self) -> bool {
        self.shared.flushed.load(Ordering::Acquire)
    }

    /// Copy of the merged blocks, in store order
    pub fn entries(&self) -> Vec<String> {
        self.shared.store.snapshot()
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.shared.metrics
    }

    pub fn dropped_count(&self) -> u64 {
        self.shared.metrics.dropped_count()
    }

    fn report_drops(&self) {
        let metrics = &self.shared.metrics;
        let dropped = metrics.dropped_count();
        if self.shared.drop_report == DropReport::OnShutdown && dropped > 0 {
            eprintln!(
                "[FLOG WARNING] {} log records dropped ({} reentrant, {} failed to render, \
                 {} after thread merge; drop rate: {:.2}%)",
                dropped,
                metrics.dropped_reentrant(),
                metrics.dropped_conversion(),
                metrics.dropped_closed(),
                metrics.drop_rate()
            );
        }
    }
}

fn render(
    buf: &mut String,
    flags: FormatFlags,
    values: &[&dyn Loggable],
    layout: Layout,
) -> fmt::Result {
    let mut w = RecordWriter::new(buf, flags);
    for (i, value) in values.iter().enumerate() {
        if layout == Layout::Split && i > 0 {
            w.write_char(' ')?;
        }
        value.render(&mut w)?;
    }
    if layout == Layout::Split {
        w.write_char('\n')?;
    }
    Ok(())
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("id", &self.shared.id)
            .field("blocks", &self.shared.store.len())
            .field("format", &self.format())
            .field("flushed", &self.is_flushed())
            .finish()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if self.is_flushed() {
            return;
        }
        self.merge_local_to_global();
        if let Err(e) = self.flush_all() {
            eprintln!("[FLOG ERROR] Failed to flush during shutdown: {}", e);
        }
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
///
/// ```
/// use rust_flog::{DropReport, FormatFlags, Logger, MemorySink, Radix};
///
/// let logger = Logger::builder()
///     .format(FormatFlags::default().with_radix(Radix::Hex))
///     .output(MemorySink::new())
///     .drop_report(DropReport::Silent)
///     .build();
///
/// assert_eq!(logger.format().radix, Radix::Hex);
/// ```
pub struct LoggerBuilder {
    format: FormatFlags,
    sink: Option<Box<dyn Sink>>,
    drop_report: DropReport,
}

impl LoggerBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            format: FormatFlags::default(),
            sink: None,
            drop_report: DropReport::default(),
        }
    }

    #[must_use]
    pub fn format(mut self, flags: FormatFlags) -> Self {
        self.format = flags;
        self
    }

    /// Destination for the flush. Standard error is used when unset.
    #[must_use]
    pub fn output<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    #[must_use]
    pub fn drop_report(mut self, report: DropReport) -> Self {
        self.drop_report = report;
        self
    }

    #[must_use]
    pub fn build(self) -> Logger {
        Logger {
            shared: Arc::new(EngineShared {
                id: NEXT_ENGINE_ID.fetch_add(1, Ordering::Relaxed),
                store: LogStore::new(),
                sink: Mutex::new(self.sink),
                format: SharedFormat::new(self.format),
                metrics: LoggerMetrics::new(),
                flushed: AtomicBool::new(false),
                drop_report: self.drop_report,
            }),
        }
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Create a new builder for constructing a Logger
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}
