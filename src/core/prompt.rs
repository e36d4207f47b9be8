//! User prompts the editing core depends on
//!
//! The core never talks to a terminal or dialog directly. Front ends implement
//! [`Prompter`]; the shell answers on stdin, tests answer from a script.

use std::collections::VecDeque;
use std::path::PathBuf;

/// Answer to "save changes before closing?"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirm {
    Yes,
    No,
    Cancel,
}

/// Out-of-band questions asked on behalf of the user
pub trait Prompter {
    /// Ask whether to save `buffer_name` before it is discarded.
    /// `diff` is the pending change set, for front ends that can show it.
    fn confirm_save(&mut self, buffer_name: &str, diff: Option<&str>) -> Confirm;

    /// File picker for opening; `None` when dismissed
    fn pick_open_path(&mut self) -> Option<PathBuf>;

    /// File picker for a save destination; `None` when dismissed
    fn pick_save_path(&mut self, suggested_name: &str) -> Option<PathBuf>;
}

/// Prompter that replays queued answers, falling back to "dismiss"
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    pub confirms: VecDeque<Confirm>,
    pub open_paths: VecDeque<Option<PathBuf>>,
    pub save_paths: VecDeque<Option<PathBuf>>,
    /// Names passed to `confirm_save`, in order
    pub asked: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn confirm(mut self, answer: Confirm) -> Self {
        self.confirms.push_back(answer);
        self
    }

    pub fn save_path(mut self, path: Option<PathBuf>) -> Self {
        self.save_paths.push_back(path);
        self
    }

    pub fn open_path(mut self, path: Option<PathBuf>) -> Self {
        self.open_paths.push_back(path);
        self
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm_save(&mut self, buffer_name: &str, _diff: Option<&str>) -> Confirm {
        self.asked.push(buffer_name.to_string());
        self.confirms.pop_front().unwrap_or(Confirm::Cancel)
    }

    fn pick_open_path(&mut self) -> Option<PathBuf> {
        self.open_paths.pop_front().flatten()
    }

    fn pick_save_path(&mut self, _suggested_name: &str) -> Option<PathBuf> {
        self.save_paths.pop_front().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_answers_in_order() {
        let mut p = ScriptedPrompter::new()
            .confirm(Confirm::Yes)
            .confirm(Confirm::No);
        assert_eq!(p.confirm_save("a", None), Confirm::Yes);
        assert_eq!(p.confirm_save("b", None), Confirm::No);
        assert_eq!(p.confirm_save("c", None), Confirm::Cancel);
        assert_eq!(p.asked, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_exhausted_pickers_dismiss() {
        let mut p = ScriptedPrompter::new();
        assert_eq!(p.pick_open_path(), None);
        assert_eq!(p.pick_save_path("Untitled"), None);
    }
}
