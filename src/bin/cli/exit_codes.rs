//! Exit codes for the CLI tool.

use jndi_strip::{Error, ResultRecord, ScanRecord};

/// Exit code constants
pub const SUCCESS: i32 = 0;
/// Some inputs failed, or a scan found affected archives
pub const WARNING: i32 = 1;
/// Fatal error occurred
pub const FATAL_ERROR: i32 = 2;
/// I/O error (audit log)
pub const IO_ERROR: i32 = 5;
/// Ctrl+C (128 + SIGINT)
pub const USER_INTERRUPT: i32 = 130;
/// Invalid command line arguments
pub const BAD_ARGS: i32 = 255;

/// Exit code enum for structured handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(dead_code)] // UserInterrupt is raised from the signal handler
pub enum ExitCode {
    Success,
    Warning,
    FatalError,
    IoError,
    UserInterrupt,
    BadArgs,
}

impl ExitCode {
    /// Returns the numeric exit code
    pub fn code(self) -> i32 {
        match self {
            Self::Success => SUCCESS,
            Self::Warning => WARNING,
            Self::FatalError => FATAL_ERROR,
            Self::IoError => IO_ERROR,
            Self::UserInterrupt => USER_INTERRUPT,
            Self::BadArgs => BAD_ARGS,
        }
    }
}

/// Converts an error that aborted a run to an exit code
pub fn error_to_exit_code(error: &Error) -> ExitCode {
    match error {
        Error::Log { .. } | Error::Io(_) => ExitCode::IoError,
        _ => ExitCode::FatalError,
    }
}

/// Exit code for a finished removal run
pub fn records_to_exit_code(records: &[ResultRecord]) -> ExitCode {
    if records.iter().any(|r| r.result.is_failure()) {
        ExitCode::Warning
    } else {
        ExitCode::Success
    }
}

/// Exit code for a finished scan
pub fn scan_to_exit_code(records: &[ScanRecord]) -> ExitCode {
    let flagged = records.iter().any(|r| match &r.report {
        Ok(report) => report.is_affected(),
        Err(outcome) => outcome.is_failure(),
    });
    if flagged {
        ExitCode::Warning
    } else {
        ExitCode::Success
    }
}
