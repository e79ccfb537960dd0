//! File logging example
//!
//! Demonstrates sending the flushed store to a file.
//!
//! Run with: cargo run --example file_logging

use rust_flog::prelude::*;
use rust_flog::FileSink;

fn main() -> Result<()> {
    println!("=== Rust FLog - File Logging Example ===\n");

    let logger = rust_flog::init(Logger::builder().output(FileSink::new("application.log")?))?;

    flog_split!("Application started");
    flog_split!("Loading configuration from", "config.toml");
    flog_split!("Configuration loaded:", 12, "keys");

    let written = rust_flog::shutdown()?;
    println!(
        "{} bytes written to application.log ({} block(s))",
        written,
        logger.entries().len()
    );

    Ok(())
}
