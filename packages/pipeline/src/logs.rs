//! Decision logs: append-only audit streams written by the filters.
//!
//! The two logs are scoped resources — opened once before the corpus pass
//! begins, written incrementally, and flushed when the pass ends. The
//! runner flushes them explicitly on the success path; on the abort path
//! the buffered writers flush when dropped, so no omission record is lost
//! to a structural failure elsewhere in the corpus.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use wikipack_shared::{PipelineConfig, Result, WikipackError};

/// Buffered line writer for one decision log.
#[derive(Debug)]
pub struct LogWriter {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl LogWriter {
    /// Create (truncating any previous run's log) a writer at `path`.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path).map_err(|e| WikipackError::io(&path, e))?;
        Ok(Self {
            path,
            writer: BufWriter::new(file),
        })
    }

    /// Append one line to the log.
    pub fn write_line(&mut self, line: &str) -> Result<()> {
        self.writer
            .write_all(line.as_bytes())
            .and_then(|()| self.writer.write_all(b"\n"))
            .map_err(|e| WikipackError::io(&self.path, e))
    }

    /// Flush buffered lines to disk.
    pub fn flush(&mut self) -> Result<()> {
        self.writer
            .flush()
            .map_err(|e| WikipackError::io(&self.path, e))
    }
}

/// The pair of audit streams acquired by the runner at start-of-pass.
#[derive(Debug)]
pub struct DecisionLogs {
    /// One raw article URL per namespace omission.
    pub omitted: LogWriter,
    /// One `source<SEP>target` line per redirect omission.
    pub redirects: LogWriter,
}

impl DecisionLogs {
    /// Open both logs at the paths the config names.
    pub fn open(config: &PipelineConfig) -> Result<Self> {
        Ok(Self {
            omitted: LogWriter::create(&config.omitted_log)?,
            redirects: LogWriter::create(&config.redirect_log)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("wikipack-log-test-{}-{name}", uuid::Uuid::now_v7()))
    }

    #[test]
    fn lines_are_appended_and_flushed() {
        let path = temp_path("omitted");
        let mut log = LogWriter::create(&path).unwrap();
        log.write_line("Talk:Sun.html").unwrap();
        log.write_line("User:Alice.html").unwrap();
        log.flush().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "Talk:Sun.html\nUser:Alice.html\n");

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn create_truncates_previous_run() {
        let path = temp_path("truncate");
        std::fs::write(&path, "stale line\n").unwrap();

        let mut log = LogWriter::create(&path).unwrap();
        log.write_line("fresh").unwrap();
        log.flush().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "fresh\n");

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn drop_flushes_buffered_lines() {
        let path = temp_path("drop");
        {
            let mut log = LogWriter::create(&path).unwrap();
            log.write_line("buffered").unwrap();
            // no explicit flush — dropped here
        }
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "buffered\n");

        let _ = std::fs::remove_file(&path);
    }
}
