//! Logging macros accepting any number of loggable values
//!
//! # Examples
//!
//! ```
//! use rust_flog::{flog_split_to, flog_to, Logger, MemorySink};
//!
//! let sink = MemorySink::new();
//! let logger = Logger::builder().output(sink.clone()).build();
//!
//! let port = 8080;
//! flog_to!(logger; "listening on ", port, '\n');
//! flog_split_to!(logger; "workers:", 4);
//!
//! logger.merge_local_to_global();
//! logger.flush_all().unwrap();
//! assert_eq!(sink.contents(), "listening on 8080\nworkers: 4\n");
//! ```

/// Log values to the process-wide engine, concatenated without separators.
///
/// # Examples
///
/// ```
/// use rust_flog::flog;
/// flog!("answer=", 42, '\n');
/// ```
#[macro_export]
macro_rules! flog {
    () => {
        $crate::log(&[])
    };
    ($($value:expr),+ $(,)?) => {
        $crate::log(&[$(&$value as &dyn $crate::Loggable),+])
    };
}

/// Log values to the process-wide engine separated by spaces, ending with a
/// newline.
///
/// # Examples
///
/// ```
/// use rust_flog::flog_split;
/// flog_split!(1, 2, 3);
/// ```
#[macro_export]
macro_rules! flog_split {
    () => {
        $crate::log_split(&[])
    };
    ($($value:expr),+ $(,)?) => {
        $crate::log_split(&[$(&$value as &dyn $crate::Loggable),+])
    };
}

/// Log values to a specific engine, concatenated without separators.
#[macro_export]
macro_rules! flog_to {
    ($logger:expr; $($value:expr),* $(,)?) => {
        $logger.log(&[$(&$value as &dyn $crate::Loggable),*])
    };
}

/// Log values to a specific engine separated by spaces, ending with a newline.
#[macro_export]
macro_rules! flog_split_to {
    ($logger:expr; $($value:expr),* $(,)?) => {
        $logger.log_split(&[$(&$value as &dyn $crate::Loggable),*])
    };
}
