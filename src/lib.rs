//! # jndi-strip
//!
//! Removes `JNDILookup.class` from ZIP-based Java archives (JAR, WAR, EAR)
//! in place, the mitigation recommended for CVE-2021-44228 when log4j-core
//! cannot be upgraded.
//!
//! Every archive goes through the same steps:
//!
//! 1. The input path is resolved to an absolute path.
//! 2. The archive is opened read-only and scanned for entries whose base
//!    name is `JNDILookup.class`, at any depth.
//! 3. If there are matches, a [`Confirm`](gate::Confirm) gate is asked.
//! 4. On approval the archive is copied to `<archive>.bak`, reopened for
//!    update and the matching entries are deleted.
//!
//! Each step is appended to an audit log, and one [`ResultRecord`] per input
//! (or per removed entry) is returned.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use jndi_strip::{BatchDriver, LogContext, RemoveOptions, Result};
//! use jndi_strip::gate::AlwaysYes;
//!
//! fn main() -> Result<()> {
//!     let log = LogContext::create("Remove-JNDILookup.txt", "Remove-JNDILookup");
//!     let mut driver = BatchDriver::new(RemoveOptions::new(), log, AlwaysYes);
//!
//!     for record in driver.run(["lib/log4j-core-2.14.1.jar"])? {
//!         println!("{}  {}", record.full_name.display(), record.result);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Scanning Without Changes
//!
//! ```rust,no_run
//! use jndi_strip::inspect::{scan, NameMatching};
//! use jndi_strip::TARGET_ENTRY;
//!
//! let report = scan("app.war", TARGET_ENTRY, NameMatching::default())?;
//! if report.is_affected() {
//!     println!("{} contains {} vulnerable entries", report.path.display(), report.matches.len());
//! }
//! # Ok::<(), jndi_strip::Error>(())
//! ```
//!
//! Nested archives (for example a JAR inside a WAR) are not inspected, and
//! signed JARs are not re-signed after modification.
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli` | Yes | Command-line interface tool |

#![warn(missing_docs)]

pub mod audit;
pub mod batch;
pub mod edit;
pub mod error;
pub mod gate;
pub mod inspect;
pub mod options;

/// Base name of the entry removed by default.
pub const TARGET_ENTRY: &str = "JNDILookup.class";

pub use audit::LogContext;
pub use batch::{BatchDriver, InputReference, Outcome, ResultRecord, ScanRecord};
pub use edit::{ArchiveEditor, EditResult};
pub use error::{Error, Result};
pub use options::RemoveOptions;
