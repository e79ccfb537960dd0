//! File sink implementation

use crate::core::{FlogError, Result, Sink};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Appends flushed log text to a file
///
/// The file is locked exclusively from the first write of a flush until the
/// flush completes, so two processes sharing a log file do not interleave
/// their blocks.
///
/// # Examples
///
/// ```no_run
/// use rust_flog::sinks::FileSink;
/// use rust_flog::Logger;
///
/// let logger = Logger::builder()
///     .output(FileSink::new("/var/log/app.log").unwrap())
///     .build();
/// ```
pub struct FileSink {
    path: PathBuf,
    writer: Option<BufWriter<File>>,
    locked: bool,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                FlogError::io_operation(
                    "opening log file",
                    format!("cannot open '{}'", path.display()),
                    e,
                )
            })?;

        Ok(Self {
            path,
            writer: Some(BufWriter::new(file)),
            locked: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_closed(&self) -> bool {
        self.writer.is_none()
    }

    /// Flush pending text and release the file
    ///
    /// Writes after closing fail with [`FlogError::FileSinkError`]. Closing
    /// twice is a no-op.
    pub fn close(&mut self) -> Result<()> {
        self.flush()?;
        self.writer = None;
        Ok(())
    }

    fn writer(&mut self) -> Result<&mut BufWriter<File>> {
        let path = &self.path;
        self.writer
            .as_mut()
            .ok_or_else(|| FlogError::file_sink(path.display().to_string(), "writer closed"))
    }
}

impl Sink for FileSink {
    fn write_text(&mut self, text: &str) -> Result<()> {
        if !self.locked {
            let path = self.path.display().to_string();
            self.writer()?
                .get_ref()
                .lock_exclusive()
                .map_err(|_| FlogError::file_lock(path))?;
            self.locked = true;
        }
        self.writer()?.write_all(text.as_bytes())?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        let locked = self.locked;
        if let Some(ref mut writer) = self.writer {
            writer.flush()?;
            if locked {
                writer.get_ref().unlock()?;
            }
        }
        self.locked = false;
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}
