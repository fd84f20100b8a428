//! Options for a removal run.

use crate::TARGET_ENTRY;
use crate::inspect::NameMatching;

/// Configuration passed explicitly through a run.
///
/// # Example
///
/// ```rust
/// use jndi_strip::RemoveOptions;
/// use jndi_strip::inspect::NameMatching;
///
/// let options = RemoveOptions::new()
///     .matching(NameMatching::CaseSensitive)
///     .echo(false);
/// assert_eq!(options.target_name(), "JNDILookup.class");
/// assert!(!options.echoes());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveOptions {
    target: String,
    matching: NameMatching,
    echo: bool,
}

impl Default for RemoveOptions {
    fn default() -> Self {
        Self {
            target: TARGET_ENTRY.to_string(),
            matching: NameMatching::default(),
            echo: true,
        }
    }
}

impl RemoveOptions {
    /// Creates options with the defaults: target `JNDILookup.class`,
    /// case-insensitive matching, console echo on.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base name of the entries to remove.
    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = target.into();
        self
    }

    /// Sets how base names are compared.
    pub fn matching(mut self, matching: NameMatching) -> Self {
        self.matching = matching;
        self
    }

    /// Sets whether log lines are echoed to standard output.
    pub fn echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    /// Returns the target base name.
    pub fn target_name(&self) -> &str {
        &self.target
    }

    /// Returns the name matching policy.
    pub fn name_matching(&self) -> NameMatching {
        self.matching
    }

    /// Returns whether log lines are echoed.
    pub fn echoes(&self) -> bool {
        self.echo
    }
}
