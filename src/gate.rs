//! Confirmation before destructive changes.
//!
//! The batch driver asks a [`Confirm`] implementation before it backs up and
//! rewrites an archive. Interactive front ends prompt the user; automated
//! callers pick one of the policies below.

use std::collections::VecDeque;

use crate::Result;

/// Asks whether a destructive step may proceed.
///
/// Implementations return `true` only on an explicit affirmative answer.
/// Anything else, including no answer, is a decline.
pub trait Confirm {
    /// Presents `prompt` and blocks until an answer is available.
    fn confirm(&mut self, prompt: &str) -> Result<bool>;
}

impl<C: Confirm + ?Sized> Confirm for &mut C {
    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        (**self).confirm(prompt)
    }
}

impl<C: Confirm + ?Sized> Confirm for Box<C> {
    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        (**self).confirm(prompt)
    }
}

/// Approves every prompt.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysYes;

impl Confirm for AlwaysYes {
    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        log::debug!("auto-approved: {}", prompt);
        Ok(true)
    }
}

/// Declines every prompt.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysNo;

impl Confirm for AlwaysNo {
    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        log::debug!("auto-declined: {}", prompt);
        Ok(false)
    }
}

/// Answers prompts from a pre-recorded list of decisions, in order.
///
/// Once the list is exhausted every further prompt is declined.
#[derive(Debug, Clone, Default)]
pub struct Scripted {
    answers: VecDeque<bool>,
    asked: Vec<String>,
}

impl Scripted {
    /// Creates a gate that replays `answers`.
    pub fn new(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            asked: Vec::new(),
        }
    }

    /// Returns every prompt presented so far.
    pub fn prompts(&self) -> &[String] {
        &self.asked
    }

    /// Returns the number of answers not yet used.
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Confirm for Scripted {
    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        self.asked.push(prompt.to_string());
        Ok(self.answers.pop_front().unwrap_or(false))
    }
}

/// Parses a yes/no answer the way the interactive prompt accepts it.
///
/// Returns `None` for anything that is not clearly yes or no.
pub fn parse_answer(input: &str) -> Option<bool> {
    match input.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" | "true" | "1" => Some(true),
        "n" | "no" | "false" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_policies() {
        assert!(AlwaysYes.confirm("remove?").unwrap());
        assert!(!AlwaysNo.confirm("remove?").unwrap());
    }

    #[test]
    fn test_scripted_replays_then_declines() {
        let mut gate = Scripted::new([true, false]);
        assert!(gate.confirm("first").unwrap());
        assert!(!gate.confirm("second").unwrap());
        assert_eq!(gate.remaining(), 0);
        assert!(!gate.confirm("third").unwrap());
        assert_eq!(gate.prompts(), ["first", "second", "third"]);
    }

    #[test]
    fn test_confirm_through_mut_ref() {
        fn ask(mut gate: impl Confirm) -> bool {
            gate.confirm("?").unwrap()
        }
        let mut gate = Scripted::new([true]);
        assert!(ask(&mut gate));
        assert_eq!(gate.prompts().len(), 1);
    }

    #[test]
    fn test_parse_answer() {
        assert_eq!(parse_answer("Y"), Some(true));
        assert_eq!(parse_answer(" yes "), Some(true));
        assert_eq!(parse_answer("no"), Some(false));
        assert_eq!(parse_answer("maybe"), None);
        assert_eq!(parse_answer(""), None);
    }
}
