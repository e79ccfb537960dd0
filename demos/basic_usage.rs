//! Basic usage example
//!
//! Demonstrates the process-wide engine: configure, log, shut down.
//!
//! Run with: cargo run --example basic_usage

use rust_flog::prelude::*;
use rust_flog::tokens::{AscTime, CurrentTick};

fn main() -> Result<()> {
    println!("=== Rust FLog - Basic Usage Example ===\n");

    // Nothing configured: the flush goes to stderr
    flog_split!("started at", AscTime);
    flog_split!("tick", CurrentTick, "values", 1, 2.5, true, 'c');

    // Later calls pick up new flags immediately
    rust_flog::update_format(|f| f.with_radix(Radix::Hex).with_show_base(true).with_bool_alpha(true));
    flog_split!("tick", CurrentTick, "values", 255, true);

    println!("Records are buffered until shutdown; flushing now:\n");
    let written = rust_flog::shutdown()?;

    println!("\n=== {} bytes flushed ===", written);
    Ok(())
}
