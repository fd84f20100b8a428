//! Append-only audit log.
//!
//! Every logical event of a run is appended to a plain text file, one line
//! per event, each terminated by a space and a newline. Messages can
//! optionally be echoed to standard output.
//!
//! The file is opened in append mode for every call; no handle is held
//! between calls.
//!
//! # Example
//!
//! ```rust,no_run
//! use jndi_strip::audit::LogContext;
//!
//! let log = LogContext::create("Remove-JNDILookup.txt", "Remove-JNDILookup");
//! log.start()?;
//! log.write_line("app.jar:     JNDILookup.class not found in file", true)?;
//! # Ok::<(), jndi_strip::Error>(())
//! ```

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Default audit log file name.
pub const DEFAULT_LOG_FILE: &str = "Remove-JNDILookup.txt";

/// Operation name used in the opening line of the log.
pub const DEFAULT_OPERATION: &str = "Remove-JNDILookup";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Log file path paired with the default message of one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogContext {
    path: PathBuf,
    default_message: String,
}

impl LogContext {
    /// Builds a context whose default message is `"<operation>: <timestamp>"`.
    pub fn create(path: impl Into<PathBuf>, operation: &str) -> Self {
        let timestamp = chrono::Local::now().format(TIMESTAMP_FORMAT);
        Self {
            path: path.into(),
            default_message: format!("{}: {}", operation, timestamp),
        }
    }

    /// Returns the log file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the default message.
    pub fn default_message(&self) -> &str {
        &self.default_message
    }

    /// Writes the default message, marking the start of an invocation.
    pub fn start(&self) -> Result<()> {
        self.write_line(&self.default_message, false)
    }

    /// Appends `message` to the log file, echoing it to stdout if requested.
    ///
    /// A failed write is returned as [`Error::Log`] and is not retried.
    pub fn write_line(&self, message: &str, echo_to_console: bool) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| self.log_error(source))?;
        writeln!(file, "{} ", message).map_err(|source| self.log_error(source))?;

        if echo_to_console {
            println!("{}", message);
        }
        Ok(())
    }

    fn log_error(&self, source: std::io::Error) -> Error {
        Error::Log {
            path: self.path.clone(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_message_format() {
        let log = LogContext::create("x.txt", "Remove-JNDILookup");
        let msg = log.default_message();
        assert!(msg.starts_with("Remove-JNDILookup: "));
        // "YYYY-MM-DD HH:MM:SS"
        let stamp = &msg["Remove-JNDILookup: ".len()..];
        assert_eq!(stamp.len(), 19);
        assert_eq!(&stamp[4..5], "-");
        assert_eq!(&stamp[10..11], " ");
    }

    #[test]
    fn test_lines_are_appended_with_trailing_space() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.txt");
        let log = LogContext::create(&path, "test");

        log.write_line("first", false).unwrap();
        log.write_line("second", false).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "first \nsecond \n");
    }

    #[test]
    fn test_start_writes_default_message() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.txt");
        let log = LogContext::create(&path, "op");
        log.start().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, format!("{} \n", log.default_message()));
    }

    #[test]
    fn test_unwritable_log_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be opened for appending.
        let log = LogContext::create(dir.path(), "op");
        match log.write_line("message", false) {
            Err(Error::Log { path, .. }) => assert_eq!(path, dir.path()),
            other => panic!("Expected Log error, got: {:?}", other),
        }
    }
}
