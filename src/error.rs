//! Error types for archive scrubbing operations.
//!
//! This module provides the [`Error`] enum which represents every failure
//! mode of the tool, along with a convenient [`Result<T>`] type alias.
//!
//! # Error Handling
//!
//! Errors fall into two groups:
//!
//! | Group | Variants | Handling |
//! |-------|----------|----------|
//! | Per input | [`PathResolution`][Error::PathResolution], [`ArchiveOpen`][Error::ArchiveOpen], [`Backup`][Error::Backup], [`Io`][Error::Io], [`Zip`][Error::Zip] | Turned into a result record, the batch continues |
//! | Fatal | [`Log`][Error::Log], [`Prompt`][Error::Prompt] | Propagated, the batch stops |
//!
//! ```rust
//! use jndi_strip::Error;
//!
//! fn describe(error: &Error) -> &'static str {
//!     if error.is_fatal() {
//!         "the run was aborted"
//!     } else {
//!         "only this archive was affected"
//!     }
//! }
//! ```

use std::io;
use std::path::{Path, PathBuf};

use zip::result::ZipError;

/// The main error type for the crate.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// An I/O error occurred outside of a more specific phase.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// An error reported by the ZIP container library while rewriting.
    #[error("ZIP error: {0}")]
    Zip(#[from] ZipError),

    /// An input does not correspond to an existing file.
    ///
    /// The `path` is the input as it was given, before resolution.
    #[error("Cannot find path '{path}': {source}")]
    PathResolution {
        /// The unresolved input.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The file is not a well-formed ZIP container, or it is locked.
    ///
    /// Inaccessible files surface here as [`ZipError::Io`].
    #[error("{source}")]
    ArchiveOpen {
        /// The archive that failed to open.
        path: PathBuf,
        /// The container library error.
        #[source]
        source: ZipError,
    },

    /// Copying the archive to its backup location failed.
    ///
    /// When this is returned the original archive has not been modified.
    #[error("Failed to copy '{}' to '{}': {source}", path.display(), backup.display())]
    Backup {
        /// The archive being backed up.
        path: PathBuf,
        /// The backup destination.
        backup: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Writing to the audit log failed.
    ///
    /// This is fatal for the whole invocation.
    #[error("Cannot write log file '{}': {source}", path.display())]
    Log {
        /// The log file.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The confirmation prompt could not be shown or answered.
    #[error("Confirmation prompt failed: {0}")]
    Prompt(String),
}

impl Error {
    /// Returns true if the error only affects the input being processed.
    ///
    /// The batch driver records these and moves on to the next input.
    pub fn is_per_input(&self) -> bool {
        matches!(
            self,
            Error::Io(_)
                | Error::Zip(_)
                | Error::PathResolution { .. }
                | Error::ArchiveOpen { .. }
                | Error::Backup { .. }
        )
    }

    /// Returns true if the error must abort the whole run.
    pub fn is_fatal(&self) -> bool {
        !self.is_per_input()
    }

    /// Returns the filesystem path associated with this error, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Error::PathResolution { path, .. } => Some(Path::new(path)),
            Error::ArchiveOpen { path, .. }
            | Error::Backup { path, .. }
            | Error::Log { path, .. } => Some(path),
            _ => None,
        }
    }

    pub(crate) fn archive_open(path: impl Into<PathBuf>, source: impl Into<ZipError>) -> Self {
        Error::ArchiveOpen {
            path: path.into(),
            source: source.into(),
        }
    }
}

/// A specialized Result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_from() {
        let err: Error = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.is_per_input());
    }

    #[test]
    fn test_path_resolution_message() {
        let err = Error::PathResolution {
            path: "missing.jar".into(),
            source: io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
        };
        assert_eq!(
            err.to_string(),
            "Cannot find path 'missing.jar': No such file or directory"
        );
        assert_eq!(err.path(), Some(Path::new("missing.jar")));
    }

    #[test]
    fn test_archive_open_shows_library_error() {
        let err = Error::archive_open("a.jar", ZipError::InvalidArchive("bad magic".into()));
        assert!(err.to_string().contains("bad magic"));
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_archive_open_from_io() {
        let err = Error::archive_open(
            "locked.jar",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        match err {
            Error::ArchiveOpen {
                source: ZipError::Io(e),
                ..
            } => assert_eq!(e.kind(), io::ErrorKind::PermissionDenied),
            e => panic!("Expected ArchiveOpen, got: {:?}", e),
        }
    }

    #[test]
    fn test_backup_message() {
        let err = Error::Backup {
            path: "/tmp/a.jar".into(),
            backup: "/tmp/a.jar.bak".into(),
            source: io::Error::other("disk full"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/tmp/a.jar.bak"));
        assert!(msg.contains("disk full"));
        assert!(err.is_per_input());
    }

    #[test]
    fn test_log_and_prompt_are_fatal() {
        let log = Error::Log {
            path: "audit.txt".into(),
            source: io::Error::other("read-only"),
        };
        assert!(log.is_fatal());
        assert_eq!(log.path(), Some(Path::new("audit.txt")));

        let prompt = Error::Prompt("not a terminal".into());
        assert!(prompt.is_fatal());
        assert!(prompt.path().is_none());
    }
}
