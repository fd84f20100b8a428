//! Interactive confirmation for CLI operations.

use dialoguer::theme::ColorfulTheme;
use jndi_strip::gate::{self, Confirm};
use jndi_strip::{Error, Result};

/// Asks on the terminal, defaulting to "No".
pub struct TerminalGate {
    theme: ColorfulTheme,
}

impl TerminalGate {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }

    /// Returns true if there is a terminal to prompt on.
    pub fn is_available() -> bool {
        console::Term::stderr().is_term()
    }
}

impl Confirm for TerminalGate {
    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        dialoguer::Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(false)
            .interact()
            .map_err(|e| Error::Prompt(e.to_string()))
    }
}

/// Parses one element of `--answers`.
pub fn parse_answer_arg(s: &str) -> std::result::Result<bool, String> {
    gate::parse_answer(s).ok_or_else(|| format!("expected y or n, got '{}'", s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_answer_arg() {
        assert_eq!(parse_answer_arg("y"), Ok(true));
        assert_eq!(parse_answer_arg("No"), Ok(false));
        assert!(parse_answer_arg("later").is_err());
    }
}
