//! Backup copies of archives.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Suffix appended to the archive file name for its backup.
pub const BACKUP_SUFFIX: &str = ".bak";

/// Returns the backup location for `path`: the same path with `.bak` appended.
///
/// ```
/// use std::path::Path;
/// use jndi_strip::edit::backup_path;
///
/// assert_eq!(backup_path(Path::new("/srv/app.jar")), Path::new("/srv/app.jar.bak"));
/// ```
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(BACKUP_SUFFIX);
    PathBuf::from(name)
}

/// Copies `path` to its backup location, replacing any earlier backup.
///
/// On failure a partially written backup is removed and [`Error::Backup`]
/// is returned. The source file is never modified.
pub fn copy_to_backup(path: &Path) -> Result<PathBuf> {
    let backup = backup_path(path);
    match std::fs::copy(path, &backup) {
        Ok(bytes) => {
            log::debug!(
                "backed up '{}' to '{}' ({} bytes)",
                path.display(),
                backup.display(),
                bytes
            );
            Ok(backup)
        }
        Err(source) => {
            if backup.is_file() {
                if let Err(e) = std::fs::remove_file(&backup) {
                    log::warn!(
                        "Failed to remove partial backup '{}': {}",
                        backup.display(),
                        e
                    );
                }
            }
            Err(Error::Backup {
                path: path.to_path_buf(),
                backup,
                source,
            })
        }
    }
}
