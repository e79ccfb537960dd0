//! Stress tests for concurrent logging
//!
//! These tests verify:
//! - Thread blocks are never interleaved under concurrent logging
//! - Per-thread record order is preserved
//! - Format flags are never observed half-written

use rust_flog::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

fn memory_logger() -> (Arc<Logger>, MemorySink) {
    let sink = MemorySink::new();
    let logger = Logger::builder()
        .output(sink.clone())
        .drop_report(DropReport::Silent)
        .build();
    (Arc::new(logger), sink)
}

#[test]
fn test_two_threads_blocks_stay_intact() {
    const RECORDS: usize = 1000;
    let (logger, sink) = memory_logger();
    let barrier = Arc::new(Barrier::new(2));

    let handles: Vec<_> = ['a', 'b']
        .into_iter()
        .map(|ch| {
            let logger = Arc::clone(&logger);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for _ in 0..RECORDS {
                    flog_to!(logger; ch);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("worker panicked");
    }

    logger.flush_all().expect("Failed to flush");
    let output = sink.contents();
    let a_block = "a".repeat(RECORDS);
    let b_block = "b".repeat(RECORDS);
    assert!(
        output == format!("{}{}", a_block, b_block) || output == format!("{}{}", b_block, a_block),
        "blocks were interleaved"
    );
}

#[test]
fn test_many_threads_keep_per_thread_order() {
    const THREADS: usize = 8;
    const RECORDS: usize = 500;
    let (logger, _sink) = memory_logger();

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for i in 0..RECORDS {
                    flog_split_to!(logger; t, i);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("worker panicked");
    }

    let entries = logger.entries();
    assert_eq!(entries.len(), THREADS);
    assert_eq!(logger.metrics().committed(), (THREADS * RECORDS) as u64);

    let mut seen_threads = Vec::new();
    for entry in &entries {
        let lines: Vec<&str> = entry.lines().collect();
        assert_eq!(lines.len(), RECORDS);
        let thread_id = lines[0].split(' ').next().expect("thread id").to_string();
        for (i, line) in lines.iter().enumerate() {
            assert_eq!(*line, format!("{} {}", thread_id, i));
        }
        seen_threads.push(thread_id);
    }
    seen_threads.sort_unstable_by_key(|t| t.parse::<usize>().expect("numeric id"));
    let expected: Vec<String> = (0..THREADS).map(|t| t.to_string()).collect();
    assert_eq!(seen_threads, expected);
}

#[test]
fn test_format_flags_never_torn() {
    const RECORDS: usize = 2000;
    let (logger, sink) = memory_logger();
    let hex = FormatFlags::default()
        .with_radix(Radix::Hex)
        .with_show_base(true)
        .with_uppercase(true);
    let signed = FormatFlags::default().with_show_pos(true);
    logger.set_format(hex);

    let running = Arc::new(AtomicBool::new(true));
    let writer = {
        let logger = Arc::clone(&logger);
        let running = Arc::clone(&running);
        thread::spawn(move || {
            let mut flip = false;
            while running.load(Ordering::Relaxed) {
                logger.set_format(if flip { hex } else { signed });
                flip = !flip;
            }
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for _ in 0..RECORDS {
                    flog_to!(logger; 255u32, '\n');
                }
            })
        })
        .collect();
    for reader in readers {
        reader.join().expect("reader panicked");
    }
    running.store(false, Ordering::Relaxed);
    writer.join().expect("writer panicked");

    logger.flush_all().expect("Failed to flush");
    let output = sink.contents();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 4 * RECORDS);
    for line in lines {
        assert!(line == "0xFF" || line == "+255", "torn format: {}", line);
    }
}

#[test]
fn test_concurrent_engines_do_not_share_buffers() {
    let (first, first_sink) = memory_logger();
    let (second, second_sink) = memory_logger();

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let first = Arc::clone(&first);
            let second = Arc::clone(&second);
            thread::spawn(move || {
                for _ in 0..100 {
                    flog_to!(first; 'x');
                    flog_to!(second; i);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("worker panicked");
    }

    first.flush_all().expect("flush first");
    second.flush_all().expect("flush second");
    assert_eq!(first_sink.contents(), "x".repeat(400));
    assert_eq!(second_sink.len(), 400);
    assert!(second_sink.contents().chars().all(|c| ('0'..='3').contains(&c)));
}
