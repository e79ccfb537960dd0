//! Tokens that render the current time when logged
//!
//! ```
//! use rust_flog::tokens::{AscTime, CurrentTick};
//! use rust_flog::{flog_split_to, Logger, MemorySink};
//!
//! let logger = Logger::builder().output(MemorySink::new()).build();
//! flog_split_to!(logger; CurrentTick, "started");
//! flog_split_to!(logger; AscTime);
//! ```

use crate::core::{Loggable, RecordWriter};
use chrono::{DateTime, Local, TimeZone};
use std::fmt::{self, Write};
use std::sync::OnceLock;
use std::time::Instant;

fn anchor() -> Instant {
    static ANCHOR: OnceLock<Instant> = OnceLock::new();
    *ANCHOR.get_or_init(Instant::now)
}

/// Monotonic clock reading in nanoseconds, taken when the record is rendered
///
/// Ticks count from the first tick taken in the process, so they only order
/// records; they carry no wall-clock meaning. Integer format flags apply.
#[derive(Debug, Clone, Copy, Default)]
pub struct CurrentTick;

impl CurrentTick {
    pub fn now() -> u128 {
        anchor().elapsed().as_nanos()
    }
}

impl Loggable for CurrentTick {
    fn render(&self, w: &mut RecordWriter<'_>) -> fmt::Result {
        w.write_integer(Self::now())
    }
}

/// Local wall-clock time in `asctime` layout, e.g. `Thu Oct 16 10:30:45 2026`,
/// followed by a newline
#[derive(Debug, Clone, Copy, Default)]
pub struct AscTime;

impl AscTime {
    const LAYOUT: &'static str = "%a %b %e %H:%M:%S %Y\n";

    pub fn format<Tz: TimeZone>(datetime: &DateTime<Tz>) -> String
    where
        Tz::Offset: fmt::Display,
    {
        datetime.format(Self::LAYOUT).to_string()
    }
}

impl Loggable for AscTime {
    fn render(&self, w: &mut RecordWriter<'_>) -> fmt::Result {
        write!(w, "{}", Local::now().format(Self::LAYOUT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FormatFlags, Radix};
    use chrono::Utc;

    #[test]
    fn test_asctime_layout() {
        let datetime = Utc.with_ymd_and_hms(2026, 10, 6, 9, 5, 3).unwrap();
        assert_eq!(AscTime::format(&datetime), "Tue Oct  6 09:05:03 2026\n");
    }

    #[test]
    fn test_ticks_are_monotonic() {
        let first = CurrentTick::now();
        let second = CurrentTick::now();
        assert!(second >= first);
    }

    #[test]
    fn test_tick_honours_radix() {
        let mut buf = String::new();
        let flags = FormatFlags::default().with_radix(Radix::Hex);
        CurrentTick.render(&mut RecordWriter::new(&mut buf, flags)).unwrap();
        assert!(!buf.is_empty());
        assert!(buf.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_asctime_token_ends_with_newline() {
        let mut buf = String::new();
        AscTime
            .render(&mut RecordWriter::new(&mut buf, FormatFlags::default()))
            .unwrap();
        assert!(buf.ends_with('\n'));
        assert_eq!(buf.len(), 25);
    }
}
