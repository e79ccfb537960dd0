//! Logger metrics for observability
//!
//! Dropped records never surface to the caller; these counters are the only
//! place they show up.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters describing what happened to logging calls
///
/// # Example
///
/// ```
/// use rust_flog::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
/// metrics.record_committed();
/// metrics.record_reentrant();
///
/// assert_eq!(metrics.committed(), 1);
/// assert_eq!(metrics.dropped_count(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Records appended to a thread buffer
    committed: AtomicU64,

    /// Records dropped because the thread was already formatting
    dropped_reentrant: AtomicU64,

    /// Records dropped because a value failed to render
    dropped_conversion: AtomicU64,

    /// Records dropped because the thread had already merged its buffer
    dropped_closed: AtomicU64,

    /// Thread blocks merged into the store
    merged_blocks: AtomicU64,

    /// Bytes written to the sink by the flush
    flushed_bytes: AtomicU64,
}

impl LoggerMetrics {
    pub const fn new() -> Self {
        Self {
            committed: AtomicU64::new(0),
            dropped_reentrant: AtomicU64::new(0),
            dropped_conversion: AtomicU64::new(0),
            dropped_closed: AtomicU64::new(0),
            merged_blocks: AtomicU64::new(0),
            flushed_bytes: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn committed(&self) -> u64 {
        self.committed.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn dropped_reentrant(&self) -> u64 {
        self.dropped_reentrant.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn dropped_conversion(&self) -> u64 {
        self.dropped_conversion.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn dropped_closed(&self) -> u64 {
        self.dropped_closed.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn merged_blocks(&self) -> u64 {
        self.merged_blocks.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn flushed_bytes(&self) -> u64 {
        self.flushed_bytes.load(Ordering::Relaxed)
    }

    /// Total records dropped for any reason
    pub fn dropped_count(&self) -> u64 {
        self.dropped_reentrant() + self.dropped_conversion() + self.dropped_closed()
    }

    #[inline]
    pub fn record_committed(&self) -> u64 {
        self.committed.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_reentrant(&self) -> u64 {
        self.dropped_reentrant.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_conversion_failure(&self) -> u64 {
        self.dropped_conversion.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_closed(&self) -> u64 {
        self.dropped_closed.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_merged(&self) -> u64 {
        self.merged_blocks.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_flushed(&self, bytes: u64) -> u64 {
        self.flushed_bytes.fetch_add(bytes, Ordering::Relaxed)
    }

    /// Get drop rate as a percentage (0.0 - 100.0)
    ///
    /// Returns 0.0 if no logging call has been made.
    pub fn drop_rate(&self) -> f64 {
        let dropped = self.dropped_count() as f64;
        let total = self.committed() as f64 + dropped;
        if total == 0.0 {
            0.0
        } else {
            (dropped / total) * 100.0
        }
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LoggerMetrics {
    /// Create a snapshot of the current counter values
    fn clone(&self) -> Self {
        Self {
            committed: AtomicU64::new(self.committed()),
            dropped_reentrant: AtomicU64::new(self.dropped_reentrant()),
            dropped_conversion: AtomicU64::new(self.dropped_conversion()),
            dropped_closed: AtomicU64::new(self.dropped_closed()),
            merged_blocks: AtomicU64::new(self.merged_blocks()),
            flushed_bytes: AtomicU64::new(self.flushed_bytes()),
        }
    }
}
