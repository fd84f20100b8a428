//! Batch processing of archives.
//!
//! [`BatchDriver`] takes archives one at a time through resolution,
//! inspection, confirmation and removal, and collects one [`ResultRecord`]
//! per input (one per removed entry when entries are removed). A failure on
//! one input is recorded and the batch moves on; only audit log and prompt
//! failures abort the run.
//!
//! # Example
//!
//! ```rust,no_run
//! use jndi_strip::audit::LogContext;
//! use jndi_strip::batch::BatchDriver;
//! use jndi_strip::gate::AlwaysNo;
//! use jndi_strip::RemoveOptions;
//!
//! let log = LogContext::create("Remove-JNDILookup.txt", "Remove-JNDILookup");
//! let mut driver = BatchDriver::new(RemoveOptions::new(), log, AlwaysNo);
//! for record in driver.run(["a.jar", "b.war"])? {
//!     println!("{}: {}", record.full_name.display(), record.result);
//! }
//! # Ok::<(), jndi_strip::Error>(())
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use crate::audit::LogContext;
use crate::edit::{ArchiveEditor, EditResult};
use crate::gate::Confirm;
use crate::inspect::{self, ArchiveEntry, ArchiveHandle, OpenMode, ScanReport};
use crate::{Error, RemoveOptions, Result};

/// One archive to process, as given by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputReference(PathBuf);

impl InputReference {
    /// Creates a reference from any path-like value.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    /// Returns the path as given.
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Resolves the reference to an absolute path of an existing entry.
    pub fn resolve(&self) -> Result<PathBuf> {
        std::fs::canonicalize(&self.0).map_err(|source| Error::PathResolution {
            path: self.0.display().to_string(),
            source,
        })
    }
}

impl From<&str> for InputReference {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for InputReference {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&Path> for InputReference {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}

impl From<PathBuf> for InputReference {
    fn from(p: PathBuf) -> Self {
        Self(p)
    }
}

impl From<&PathBuf> for InputReference {
    fn from(p: &PathBuf) -> Self {
        Self(p.clone())
    }
}

/// The outcome recorded for an input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// An entry was removed. Holds the entry's full name.
    Removed(String),
    /// No entry matched. Holds the target name.
    NotFound(String),
    /// The user declined the removal.
    Declined,
    /// The input did not resolve to an existing file.
    ResolveFailed(String),
    /// The file could not be opened as a ZIP container.
    OpenFailed(String),
    /// The backup copy could not be written; the archive is untouched.
    BackupFailed(String),
    /// The archive could not be rewritten; the backup is kept.
    RemoveFailed(String),
}

impl Outcome {
    /// Returns true if the input could not be processed.
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Outcome::ResolveFailed(_)
                | Outcome::OpenFailed(_)
                | Outcome::BackupFailed(_)
                | Outcome::RemoveFailed(_)
        )
    }

    /// Returns a short machine-readable name for the outcome.
    pub fn kind(&self) -> &'static str {
        match self {
            Outcome::Removed(_) => "removed",
            Outcome::NotFound(_) => "not_found",
            Outcome::Declined => "declined",
            Outcome::ResolveFailed(_) => "resolve_failed",
            Outcome::OpenFailed(_) => "open_failed",
            Outcome::BackupFailed(_) => "backup_failed",
            Outcome::RemoveFailed(_) => "remove_failed",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Removed(entry) => write!(f, "{} Removed", entry),
            Outcome::NotFound(target) => write!(f, "{} not found in file", target),
            Outcome::Declined => write!(f, "Did not process - 'No' Chosen"),
            Outcome::ResolveFailed(e) => write!(f, "Could not resolve path: {}", e),
            Outcome::OpenFailed(e) => write!(f, "Could not open as a ZIP file: {}", e),
            Outcome::BackupFailed(e) => write!(f, "Could not back up file: {}", e),
            Outcome::RemoveFailed(e) => write!(f, "Could not remove entries: {}", e),
        }
    }
}

/// One line of the run's output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRecord {
    /// The resolved archive path, or the input as given if it did not resolve.
    pub full_name: PathBuf,
    /// What happened.
    pub result: Outcome,
}

/// Result of scanning one input without modifying it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRecord {
    /// The resolved archive path, or the input as given if it did not resolve.
    pub full_name: PathBuf,
    /// The report, or the reason the archive could not be scanned.
    pub report: std::result::Result<ScanReport, Outcome>,
}

/// Processes archives strictly one after another.
pub struct BatchDriver<C: Confirm> {
    options: RemoveOptions,
    log: LogContext,
    gate: C,
}

impl<C: Confirm> BatchDriver<C> {
    /// Creates a driver.
    pub fn new(options: RemoveOptions, log: LogContext, gate: C) -> Self {
        Self { options, log, gate }
    }

    /// Returns the options.
    pub fn options(&self) -> &RemoveOptions {
        &self.options
    }

    /// Returns the audit log context.
    pub fn log(&self) -> &LogContext {
        &self.log
    }

    /// Returns the confirmation gate.
    pub fn gate(&self) -> &C {
        &self.gate
    }

    /// Consumes the driver and returns the gate.
    pub fn into_gate(self) -> C {
        self.gate
    }

    /// Processes every input and returns the records in input order.
    ///
    /// Fails only if the audit log cannot be written or the prompt fails.
    pub fn run<I>(&mut self, inputs: I) -> Result<Vec<ResultRecord>>
    where
        I: IntoIterator,
        I::Item: Into<InputReference>,
    {
        self.log.start()?;
        let mut records = Vec::new();
        for input in inputs {
            self.process(input.into(), &mut records)?;
        }
        Ok(records)
    }

    /// Processes a single input, appending its records to `records`.
    pub fn process(
        &mut self,
        input: InputReference,
        records: &mut Vec<ResultRecord>,
    ) -> Result<()> {
        let path = match input.resolve() {
            Ok(path) => path,
            Err(e) => {
                let outcome = Outcome::ResolveFailed(e.to_string());
                return self.record(records, input.as_path(), outcome);
            }
        };

        let handle = match ArchiveHandle::open(&path, OpenMode::Read) {
            Ok(handle) => handle,
            Err(e) => return self.record(records, &path, Outcome::OpenFailed(e.to_string())),
        };

        let target = self.options.target_name().to_string();
        let matches = handle.find_entries_by_base_name(&target, self.options.name_matching());
        if matches.is_empty() {
            handle.close()?;
            return self.record(records, &path, Outcome::NotFound(target));
        }

        for entry in &matches {
            self.note(&path, &format!("Found {}", entry.full_name))?;
        }

        let prompt = confirmation_prompt(&path, &matches);
        if !self.gate.confirm(&prompt)? {
            handle.close()?;
            return self.record(records, &path, Outcome::Declined);
        }

        match self.remove(handle) {
            Ok(result) if result.removed.is_empty() => {
                self.record(records, &path, Outcome::NotFound(target))
            }
            Ok(result) => {
                self.note(&path, &format!("Saved; backup at {}", result.backup.display()))?;
                records.extend(result.removed.into_iter().map(|entry| ResultRecord {
                    full_name: path.clone(),
                    result: Outcome::Removed(entry.full_name),
                }));
                Ok(())
            }
            Err(e) if e.is_fatal() => Err(e),
            Err(e @ Error::Backup { .. }) => {
                self.record(records, &path, Outcome::BackupFailed(e.to_string()))
            }
            Err(e) => self.record(records, &path, Outcome::RemoveFailed(e.to_string())),
        }
    }

    /// Runs the removal protocol on a confirmed archive.
    fn remove(&self, handle: ArchiveHandle) -> Result<EditResult> {
        let path = handle.path().to_path_buf();
        let editor = ArchiveEditor::new(handle).release().backup()?;
        self.note(
            &path,
            &format!("Backed up to {}", editor.backup_path().display()),
        )?;

        let mut editor = editor.reopen_for_update()?;
        editor.remove_matching(
            self.options.target_name(),
            self.options.name_matching(),
            |entry| self.note(&path, &format!("Removing {}", entry.full_name)),
        )?;
        editor.finalize()
    }

    /// Inspects every input without prompting or modifying anything.
    pub fn scan<I>(&self, inputs: I) -> Result<Vec<ScanRecord>>
    where
        I: IntoIterator,
        I::Item: Into<InputReference>,
    {
        self.log.start()?;
        let mut records = Vec::new();
        for input in inputs {
            let input = input.into();
            let record = match input.resolve() {
                Err(e) => {
                    let outcome = Outcome::ResolveFailed(e.to_string());
                    self.note(input.as_path(), &outcome.to_string())?;
                    ScanRecord {
                        full_name: input.as_path().to_path_buf(),
                        report: Err(outcome),
                    }
                }
                Ok(path) => {
                    let report = inspect::scan(
                        &path,
                        self.options.target_name(),
                        self.options.name_matching(),
                    );
                    let report = match report {
                        Ok(report) if report.is_affected() => {
                            for entry in &report.matches {
                                self.note(&path, &format!("Found {}", entry.full_name))?;
                            }
                            Ok(report)
                        }
                        Ok(report) => {
                            let outcome =
                                Outcome::NotFound(self.options.target_name().to_string());
                            self.note(&path, &outcome.to_string())?;
                            Ok(report)
                        }
                        Err(e) => {
                            let outcome = Outcome::OpenFailed(e.to_string());
                            self.note(&path, &outcome.to_string())?;
                            Err(outcome)
                        }
                    };
                    ScanRecord {
                        full_name: path,
                        report,
                    }
                }
            };
            records.push(record);
        }
        Ok(records)
    }

    fn record(
        &self,
        records: &mut Vec<ResultRecord>,
        path: &Path,
        result: Outcome,
    ) -> Result<()> {
        self.note(path, &result.to_string())?;
        records.push(ResultRecord {
            full_name: path.to_path_buf(),
            result,
        });
        Ok(())
    }

    fn note(&self, path: &Path, message: &str) -> Result<()> {
        self.log.write_line(
            &format!("{}:     {}", path.display(), message),
            self.options.echoes(),
        )
    }
}

fn confirmation_prompt(path: &Path, matches: &[ArchiveEntry]) -> String {
    match matches {
        [entry] => format!("Remove {} from {}?", entry.full_name, path.display()),
        _ => format!(
            "Remove {} entries named {} from {}?",
            matches.len(),
            matches[0].name,
            path.display()
        ),
    }
}
