//! Lifecycle of the process-wide engine
//!
//! The global store can be flushed only once per process, so the whole
//! lifecycle lives in a single test.

use rust_flog::prelude::*;
use rust_flog::{FlogError, Radix};
use std::thread;

#[test]
fn test_global_lifecycle() {
    let sink = MemorySink::new();
    let logger = rust_flog::init(
        Logger::builder()
            .output(sink.clone())
            .drop_report(DropReport::Silent),
    )
    .expect("first init");
    assert!(rust_flog::is_initialized());
    assert!(matches!(
        rust_flog::init(Logger::builder()),
        Err(FlogError::AlreadyInitialized)
    ));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            thread::spawn(move || {
                flog_split!("thread", i);
                flog_split!("thread", i, "exiting");
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("worker panicked");
    }
    assert_eq!(logger.entries().len(), 4);

    rust_flog::update_format(|f| f.with_radix(Radix::Hex).with_show_base(true));
    assert_eq!(flog!("main ", 16, '\n'), LogOutcome::Committed);

    let written = rust_flog::shutdown().expect("shutdown");
    let output = sink.contents();
    assert_eq!(written as usize, output.len());

    for i in 0..4 {
        let block = format!("thread {i}\nthread {i} exiting\n");
        assert!(output.contains(&block), "missing block for thread {}", i);
    }
    // The main thread merges last, at shutdown
    assert!(output.ends_with("main 0x10\n"));

    assert!(matches!(rust_flog::shutdown(), Err(FlogError::AlreadyFlushed)));
}
