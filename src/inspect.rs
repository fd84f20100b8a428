//! Archive inspection.
//!
//! An [`ArchiveHandle`] is an open handle onto a ZIP container on disk. It is
//! opened either read-only or for update. In update mode, entries can be
//! deleted; the deletions only reach the disk when the handle is closed,
//! which rewrites the container into a sibling temporary file and moves it
//! over the original. Dropping an update handle without closing it discards
//! the pending deletions.
//!
//! # Example
//!
//! ```rust,no_run
//! use jndi_strip::inspect::{ArchiveHandle, NameMatching, OpenMode};
//! use jndi_strip::TARGET_ENTRY;
//!
//! let handle = ArchiveHandle::open("app.jar", OpenMode::Read)?;
//! for entry in handle.find_entries_by_base_name(TARGET_ENTRY, NameMatching::default()) {
//!     println!("{}", entry.full_name);
//! }
//! # Ok::<(), jndi_strip::Error>(())
//! ```

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use zip::{ZipArchive, ZipWriter};

use crate::{Error, Result};

/// How an archive is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    /// Enumerate entries only.
    Read,
    /// Enumerate and delete entries.
    Update,
}

/// How entry base names are compared with the target name.
///
/// The default is case-insensitive, so `JndiLookup.class` (the spelling
/// shipped in log4j-core) matches `JNDILookup.class`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NameMatching {
    /// ASCII case-insensitive comparison.
    #[default]
    CaseInsensitive,
    /// Byte-for-byte comparison.
    CaseSensitive,
}

impl NameMatching {
    /// Returns true if `name` equals `target` under this policy.
    pub fn matches(self, name: &str, target: &str) -> bool {
        match self {
            NameMatching::CaseInsensitive => name.eq_ignore_ascii_case(target),
            NameMatching::CaseSensitive => name == target,
        }
    }
}

/// One entry inside an archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Position in the central directory.
    pub index: usize,
    /// Final path segment.
    pub name: String,
    /// Path-qualified name as stored in the archive.
    pub full_name: String,
}

impl ArchiveEntry {
    fn new(index: usize, full_name: &str) -> Self {
        Self {
            index,
            name: base_name(full_name).to_string(),
            full_name: full_name.to_string(),
        }
    }
}

/// Returns the final `/`-separated segment of an entry name.
///
/// Directory entries (ending in `/`) have an empty base name.
pub fn base_name(full_name: &str) -> &str {
    match full_name.rfind('/') {
        Some(pos) => &full_name[pos + 1..],
        None => full_name,
    }
}

/// An open handle onto a ZIP container.
pub struct ArchiveHandle {
    path: PathBuf,
    archive: ZipArchive<BufReader<File>>,
    mode: OpenMode,
    removed: BTreeSet<usize>,
}

impl std::fmt::Debug for ArchiveHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArchiveHandle")
            .field("path", &self.path)
            .field("mode", &self.mode)
            .field("entries", &self.archive.len())
            .field("removed", &self.removed)
            .finish()
    }
}

impl ArchiveHandle {
    /// Opens the container at `path`.
    ///
    /// Fails with [`Error::ArchiveOpen`] if the file cannot be opened or is
    /// not a well-formed ZIP container.
    pub fn open(path: impl AsRef<Path>, mode: OpenMode) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| Error::archive_open(path, e))?;
        let archive =
            ZipArchive::new(BufReader::new(file)).map_err(|e| Error::archive_open(path, e))?;

        log::debug!(
            "opened '{}' ({:?}, {} entries)",
            path.display(),
            mode,
            archive.len()
        );

        Ok(Self {
            path: path.to_path_buf(),
            archive,
            mode,
            removed: BTreeSet::new(),
        })
    }

    /// Returns the archive path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the mode this handle was opened with.
    pub fn mode(&self) -> OpenMode {
        self.mode
    }

    /// Returns the number of entries, not counting pending deletions.
    pub fn len(&self) -> usize {
        self.archive.len() - self.removed.len()
    }

    /// Returns true if the archive has no entries left.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns all live entries in central directory order.
    pub fn entries(&self) -> Vec<ArchiveEntry> {
        (0..self.archive.len())
            .filter(|idx| !self.removed.contains(idx))
            .filter_map(|idx| {
                self.archive
                    .name_for_index(idx)
                    .map(|name| ArchiveEntry::new(idx, name))
            })
            .collect()
    }

    /// Returns the live entries whose base name equals `target`.
    ///
    /// Returns an empty vector when nothing matches.
    pub fn find_entries_by_base_name(
        &self,
        target: &str,
        matching: NameMatching,
    ) -> Vec<ArchiveEntry> {
        self.entries()
            .into_iter()
            .filter(|entry| matching.matches(&entry.name, target))
            .collect()
    }

    /// Deletes an entry. Only allowed in [`OpenMode::Update`].
    ///
    /// The deletion is written when the handle is [closed](Self::close).
    pub fn delete(&mut self, entry: &ArchiveEntry) -> Result<()> {
        if self.mode != OpenMode::Update {
            return Err(Error::Io(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("'{}' is open read-only", self.path.display()),
            )));
        }
        if self.archive.name_for_index(entry.index) != Some(entry.full_name.as_str()) {
            return Err(Error::Zip(zip::result::ZipError::FileNotFound));
        }
        self.removed.insert(entry.index);
        Ok(())
    }

    /// Releases the handle.
    ///
    /// For an update handle with pending deletions this rewrites the
    /// container without the deleted entries and replaces the file on disk.
    /// Kept entries are copied raw, without recompression, and any data
    /// stored ahead of the first entry is carried over unchanged. Returns
    /// the number of entries removed from disk.
    pub fn close(self) -> Result<usize> {
        if self.mode == OpenMode::Read || self.removed.is_empty() {
            return Ok(0);
        }

        let Self {
            path,
            mut archive,
            removed,
            ..
        } = self;

        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        let permissions = std::fs::metadata(&path)?.permissions();
        let mut temp = tempfile::NamedTempFile::new_in(dir)?;

        // Data ahead of the first entry, such as a launch script, is kept as is.
        let prefix = prefix_len(&mut archive)?;
        if prefix > 0 {
            let mut source = File::open(&path)?.take(prefix);
            let copied = io::copy(&mut source, &mut temp)?;
            if copied != prefix {
                return Err(Error::Io(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    format!(
                        "'{}' ended inside its {} byte prefix",
                        path.display(),
                        prefix
                    ),
                )));
            }
        }

        let mut writer = ZipWriter::new(temp);
        for idx in 0..archive.len() {
            if removed.contains(&idx) {
                continue;
            }
            let file = archive.by_index_raw(idx)?;
            writer.raw_copy_file(file)?;
        }
        let comment = archive.comment().to_vec();
        if !comment.is_empty() {
            writer.set_raw_comment(comment.into_boxed_slice());
        }
        let temp = writer.finish()?;

        // The source must be closed before it can be replaced on every platform.
        drop(archive);

        std::fs::set_permissions(temp.path(), permissions)?;
        temp.persist(&path).map_err(|e| Error::Io(e.error))?;

        log::debug!(
            "rewrote '{}' without {} entries",
            path.display(),
            removed.len()
        );
        Ok(removed.len())
    }
}

/// Returns the number of bytes stored before the first local header.
fn prefix_len(archive: &mut ZipArchive<BufReader<File>>) -> Result<u64> {
    let mut first = None::<u64>;
    for idx in 0..archive.len() {
        let start = archive.by_index_raw(idx)?.header_start();
        first = Some(first.map_or(start, |f| f.min(start)));
    }
    Ok(first.unwrap_or_else(|| archive.offset()))
}

/// Result of inspecting one archive without modifying it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanReport {
    /// The inspected archive.
    pub path: PathBuf,
    /// Total number of entries in the archive.
    pub entry_count: usize,
    /// Entries whose base name matched the target.
    pub matches: Vec<ArchiveEntry>,
}

impl ScanReport {
    /// Returns true if at least one entry matched.
    pub fn is_affected(&self) -> bool {
        !self.matches.is_empty()
    }
}

/// Opens `path` read-only and reports the entries matching `target`.
pub fn scan(path: impl AsRef<Path>, target: &str, matching: NameMatching) -> Result<ScanReport> {
    let handle = ArchiveHandle::open(path, OpenMode::Read)?;
    let report = ScanReport {
        path: handle.path().to_path_buf(),
        entry_count: handle.len(),
        matches: handle.find_entries_by_base_name(target, matching),
    };
    handle.close()?;
    Ok(report)
}
