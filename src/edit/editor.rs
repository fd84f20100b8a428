//! The removal protocol as a typestate.

use std::path::{Path, PathBuf};

use crate::inspect::{ArchiveEntry, ArchiveHandle, NameMatching, OpenMode};
use crate::{Error, Result};

use super::backup::copy_to_backup;

/// Result of a completed removal.
#[must_use = "edit result should be checked to verify operation completed as expected"]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditResult {
    /// The archive that was rewritten.
    pub archive: PathBuf,
    /// Where the original bytes were saved.
    pub backup: PathBuf,
    /// Entries removed, in central directory order.
    pub removed: Vec<ArchiveEntry>,
    /// Number of entries left in the archive.
    pub entries_kept: usize,
}

/// Inspection is done and the read handle is still open.
#[derive(Debug)]
pub struct Inspected {
    handle: ArchiveHandle,
}

/// No handle is open; the archive may be copied.
#[derive(Debug)]
pub struct Released {
    path: PathBuf,
}

/// A backup exists; the archive may be opened for update.
#[derive(Debug)]
pub struct BackedUp {
    path: PathBuf,
    backup: PathBuf,
}

/// The archive is open for update.
#[derive(Debug)]
pub struct Updating {
    handle: ArchiveHandle,
    backup: PathBuf,
    removed: Vec<ArchiveEntry>,
}

/// Drives one archive through the removal protocol.
///
/// Each transition consumes the editor, so a handle can never be reused
/// across phases and the archive is never copied while open.
#[derive(Debug)]
pub struct ArchiveEditor<S> {
    state: S,
}

impl ArchiveEditor<Inspected> {
    /// Starts the protocol from an open read handle.
    pub fn new(handle: ArchiveHandle) -> Self {
        Self {
            state: Inspected { handle },
        }
    }

    /// Returns the archive being edited.
    pub fn path(&self) -> &Path {
        self.state.handle.path()
    }

    /// Releases the read handle.
    pub fn release(self) -> ArchiveEditor<Released> {
        let handle = self.state.handle;
        let path = handle.path().to_path_buf();
        // A read handle has nothing to flush.
        drop(handle);
        ArchiveEditor {
            state: Released { path },
        }
    }
}

impl ArchiveEditor<Released> {
    /// Starts the protocol for an archive with no open handle.
    pub fn for_path(path: impl Into<PathBuf>) -> Self {
        Self {
            state: Released { path: path.into() },
        }
    }

    /// Returns the archive being edited.
    pub fn path(&self) -> &Path {
        &self.state.path
    }

    /// Copies the archive to `<archive>.bak`.
    ///
    /// On failure the editor is consumed; the archive stays untouched.
    pub fn backup(self) -> Result<ArchiveEditor<BackedUp>> {
        let backup = copy_to_backup(&self.state.path)?;
        Ok(ArchiveEditor {
            state: BackedUp {
                path: self.state.path,
                backup,
            },
        })
    }
}

impl ArchiveEditor<BackedUp> {
    /// Returns the archive being edited.
    pub fn path(&self) -> &Path {
        &self.state.path
    }

    /// Returns the backup location.
    pub fn backup_path(&self) -> &Path {
        &self.state.backup
    }

    /// Opens the archive in update mode.
    pub fn reopen_for_update(self) -> Result<ArchiveEditor<Updating>> {
        let BackedUp { path, backup } = self.state;
        let handle = ArchiveHandle::open(&path, OpenMode::Update)?;
        Ok(ArchiveEditor {
            state: Updating {
                handle,
                backup,
                removed: Vec::new(),
            },
        })
    }
}

impl ArchiveEditor<Updating> {
    /// Returns the archive being edited.
    pub fn path(&self) -> &Path {
        self.state.handle.path()
    }

    /// Deletes every entry whose base name matches `target`.
    ///
    /// `on_removed` runs after each deletion. An error from it stops the
    /// removal and is returned; the archive on disk is left as it was.
    /// Returns the number of entries deleted by this call.
    pub fn remove_matching<F>(
        &mut self,
        target: &str,
        matching: NameMatching,
        mut on_removed: F,
    ) -> Result<usize>
    where
        F: FnMut(&ArchiveEntry) -> Result<()>,
    {
        let matches = self.state.handle.find_entries_by_base_name(target, matching);
        for entry in &matches {
            self.state.handle.delete(entry)?;
            on_removed(entry)?;
            self.state.removed.push(entry.clone());
        }
        Ok(matches.len())
    }

    /// Releases the update handle, writing the archive to disk.
    pub fn finalize(self) -> Result<EditResult> {
        let Updating {
            handle,
            backup,
            removed,
        } = self.state;
        let archive = handle.path().to_path_buf();
        let entries_kept = handle.len();

        let written = handle.close()?;
        if written != removed.len() {
            return Err(Error::Io(std::io::Error::other(format!(
                "expected to remove {} entries from '{}', removed {}",
                removed.len(),
                archive.display(),
                written
            ))));
        }

        Ok(EditResult {
            archive,
            backup,
            removed,
            entries_kept,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use zip::ZipWriter;
    use zip::write::SimpleFileOptions;

    fn write_zip(path: &Path, entries: &[(&str, &[u8])]) {
        let mut writer = ZipWriter::new(File::create(path).unwrap());
        for (name, data) in entries {
            writer
                .start_file(*name, SimpleFileOptions::default())
                .unwrap();
            writer.write_all(data).unwrap();
        }
        writer.finish().unwrap();
    }

    #[test]
    fn test_full_protocol() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.jar");
        write_zip(
            &path,
            &[
                ("a/JNDILookup.class", b"one"),
                ("keep.txt", b"keep"),
                ("b/JNDILookup.class", b"two"),
            ],
        );
        let original = std::fs::read(&path).unwrap();

        let handle = ArchiveHandle::open(&path, OpenMode::Read).unwrap();
        let mut editor = ArchiveEditor::new(handle)
            .release()
            .backup()
            .unwrap()
            .reopen_for_update()
            .unwrap();

        let mut seen = Vec::new();
        let count = editor
            .remove_matching("JNDILookup.class", NameMatching::default(), |e| {
                seen.push(e.full_name.clone());
                Ok(())
            })
            .unwrap();
        assert_eq!(count, 2);
        assert_eq!(seen, ["a/JNDILookup.class", "b/JNDILookup.class"]);

        let result = editor.finalize().unwrap();
        assert_eq!(result.removed.len(), 2);
        assert_eq!(result.entries_kept, 1);
        assert_eq!(std::fs::read(&result.backup).unwrap(), original);

        let handle = ArchiveHandle::open(&path, OpenMode::Read).unwrap();
        assert_eq!(handle.len(), 1);
    }

    #[test]
    fn test_callback_error_leaves_archive() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.jar");
        write_zip(&path, &[("JNDILookup.class", b"x"), ("y.txt", b"y")]);
        let original = std::fs::read(&path).unwrap();

        let mut editor = ArchiveEditor::for_path(&path)
            .backup()
            .unwrap()
            .reopen_for_update()
            .unwrap();
        let err = editor
            .remove_matching("JNDILookup.class", NameMatching::default(), |_| {
                Err(Error::Prompt("stop".into()))
            })
            .unwrap_err();
        assert!(matches!(err, Error::Prompt(_)));
        drop(editor);

        assert_eq!(std::fs::read(&path).unwrap(), original);
    }

    #[test]
    fn test_backup_failure_stops_protocol() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gone.jar");

        let err = ArchiveEditor::for_path(&path).backup().unwrap_err();
        assert!(matches!(err, Error::Backup { .. }));
    }
}
