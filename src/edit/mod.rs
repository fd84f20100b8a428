//! Backup and removal of archive entries.
//!
//! Removing entries follows a fixed protocol:
//!
//! 1. Release the read handle used for inspection.
//! 2. Copy the archive to `<archive>.bak`.
//! 3. Reopen the archive for update.
//! 4. Re-scan for the target entries and delete each one.
//! 5. Release the update handle, which writes the result to disk.
//!
//! Each step is a state of [`ArchiveEditor`], so the steps cannot be
//! reordered or skipped. A failed backup leaves the editor in a state from
//! which the archive can no longer be opened for update.
//!
//! # Example
//!
//! ```rust,no_run
//! use jndi_strip::edit::ArchiveEditor;
//! use jndi_strip::inspect::{ArchiveHandle, NameMatching, OpenMode};
//! use jndi_strip::TARGET_ENTRY;
//!
//! let handle = ArchiveHandle::open("app.jar", OpenMode::Read)?;
//! let mut editor = ArchiveEditor::new(handle)
//!     .release()
//!     .backup()?
//!     .reopen_for_update()?;
//! editor.remove_matching(TARGET_ENTRY, NameMatching::default(), |entry| {
//!     println!("Removing {}", entry.full_name);
//!     Ok(())
//! })?;
//! let result = editor.finalize()?;
//! println!("Removed {} entries, backup at {}", result.removed.len(), result.backup.display());
//! # Ok::<(), jndi_strip::Error>(())
//! ```

mod backup;
mod editor;

pub use backup::{BACKUP_SUFFIX, backup_path, copy_to_backup};
pub use editor::{ArchiveEditor, BackedUp, EditResult, Inspected, Released, Updating};
