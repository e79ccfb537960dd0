//! Threaded logging example
//!
//! Each worker thread logs into its own buffer. Buffers merge whole when the
//! workers exit, so one worker's lines are never split by another's.
//!
//! Run with: cargo run --example threaded_logging

use rust_flog::prelude::*;
use std::thread;

fn main() -> Result<()> {
    println!("=== Rust FLog - Threaded Logging Example ===\n");

    let handles: Vec<_> = (0..4)
        .map(|worker| {
            thread::spawn(move || {
                for step in 0..3 {
                    flog_split!("worker", worker, "step", step, "at", CurrentTick);
                }
            })
        })
        .collect();

    // Joining guarantees each worker has merged before the flush
    for handle in handles {
        if handle.join().is_err() {
            eprintln!("worker panicked");
        }
    }

    flog_split!("main: all workers joined");
    rust_flog::shutdown()?;

    let metrics = rust_flog::global().metrics();
    println!(
        "\n{} records, {} blocks merged, {} dropped",
        metrics.committed(),
        metrics.merged_blocks(),
        metrics.dropped_count()
    );
    Ok(())
}
