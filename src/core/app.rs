//! This module defines the central `EditorApp` structure: the open tabs, the
//! editor-wide view settings, the clipboard, and the explain requests in flight.
//!
//! The app owns its state outright. A front end reflects it (tab strip, status
//! line, menus) and feeds it commands, but never holds buffers of its own.

use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{debug, info};

use crate::config::Config;
use crate::core::buffer::Buffer;
use crate::core::buffer_set::BufferSet;
use crate::core::clipboard::Clipboard;
use crate::core::command::Command;
use crate::core::error::{EditorError, Result};
use crate::core::helper::{HelperConfig, HelperTask};
use crate::core::id::BufferId;
use crate::core::menu::MenuBar;
use crate::core::prompt::Prompter;
use crate::core::view::{StatusLine, ViewSettings};

/// Heading placed above an explanation appended to a buffer
pub const EXPLANATION_HEADING: &str = "Explanation:";

/// The root application state
pub struct EditorApp {
    /// Open tabs, in display order
    pub buffers: BufferSet,
    /// Word wrap, status bar and font, shared by all tabs
    pub view: ViewSettings,
    /// Clipboard shared by all tabs
    pub clipboard: Clipboard,
    /// File, Edit and View menus
    pub menu_bar: MenuBar,
    /// Key sequence -> command name
    pub keybindings: HashMap<String, String>,
    /// How to launch the explain helper
    pub helper: HelperConfig,
    /// Explain requests in flight, at most one per buffer
    pub pending_explains: HashMap<BufferId, HelperTask>,
    /// Registry of commands implementing the Command pattern
    pub command_registry: HashMap<String, Box<dyn Command>>,
    /// Answers save/open questions on the user's behalf
    pub prompter: Box<dyn Prompter>,
}

impl EditorApp {
    /// One untitled tab, default view, all commands registered
    pub fn new(prompter: Box<dyn Prompter>) -> Self {
        Self::from_config(&Config::default(), prompter)
    }

    pub fn from_config(config: &Config, prompter: Box<dyn Prompter>) -> Self {
        let mut app = Self {
            buffers: BufferSet::new(),
            view: config.view_settings(),
            clipboard: Clipboard::new(),
            menu_bar: MenuBar::new(),
            keybindings: config.keybindings.clone(),
            helper: config.helper_config(),
            pending_explains: HashMap::new(),
            command_registry: HashMap::new(),
            prompter,
        };
        crate::core::commands::register_all(&mut app);
        app
    }

    /// Open the files named on the command line.
    ///
    /// The first file that opens replaces the initial untitled tab. Files that
    /// fail to open are reported and skipped.
    pub fn open_startup_files(&mut self, files: &[PathBuf]) -> Vec<EditorError> {
        let mut errors = Vec::new();
        let mut replaced_placeholder = false;
        for path in files {
            match self.buffers.open_from_disk(path) {
                Ok(_) => {
                    if !replaced_placeholder {
                        replaced_placeholder = true;
                        self.drop_pristine_placeholder();
                    }
                }
                Err(e) => errors.push(e),
            }
        }
        info!(
            opened = self.buffers.len(),
            failed = errors.len(),
            "session started"
        );
        errors
    }

    fn drop_pristine_placeholder(&mut self) {
        let pristine = self
            .buffers
            .get(0)
            .is_some_and(|b| b.path().is_none() && b.is_empty() && !b.can_undo());
        if pristine && self.buffers.len() > 1 {
            let current = self.buffers.current_id();
            // a clean buffer never prompts
            let _ = self.buffers.close_at(0, &mut *self.prompter);
            if let Some(idx) = current.and_then(|id| self.buffers.index_of(id)) {
                let _ = self.buffers.select(idx);
            }
        }
    }

    pub fn active_buffer(&self) -> Option<&Buffer> {
        self.buffers.current()
    }

    pub fn active_buffer_mut(&mut self) -> Option<&mut Buffer> {
        self.buffers.current_mut()
    }

    /// Status line text, or `None` while the status bar is hidden
    pub fn status_line(&self) -> Option<String> {
        if !self.view.status_bar_visible {
            return None;
        }
        self.active_buffer()
            .map(|b| StatusLine::compute(b).to_string())
    }

    // ==================== Explain helper ====================

    /// Start an explain request for the current buffer
    pub fn start_explain(&mut self) -> Result<BufferId> {
        let id = self
            .buffers
            .current_id()
            .ok_or_else(|| EditorError::HelperUnavailable("no open buffer".to_string()))?;
        if self.pending_explains.contains_key(&id) {
            return Err(EditorError::HelperUnavailable(
                "an explanation is already being prepared for this tab".to_string(),
            ));
        }
        let buffer = self
            .buffers
            .current()
            .ok_or_else(|| EditorError::HelperUnavailable("no open buffer".to_string()))?;
        let path = buffer
            .path()
            .map(PathBuf::from)
            .ok_or_else(|| EditorError::HelperUnavailable("buffer has no file path".to_string()))?;

        let task = HelperTask::spawn(&self.helper, id, buffer.text(), path);
        self.pending_explains.insert(id, task);
        Ok(id)
    }

    /// Collect finished explain requests and apply them.
    ///
    /// Returns one message per finished request. A failure leaves its buffer
    /// untouched; a success appends the explanation to the buffer.
    pub fn poll_helpers(&mut self) -> Vec<String> {
        let mut finished = Vec::new();
        for (id, task) in self.pending_explains.iter_mut() {
            if let Some(outcome) = task.try_result() {
                finished.push((*id, outcome));
            }
        }

        let mut messages = Vec::new();
        for (id, outcome) in finished {
            self.pending_explains.remove(&id);
            messages.push(self.apply_explanation(id, outcome));
        }
        messages
    }

    /// Block until every pending request has finished, then apply them
    pub fn wait_for_helpers(&mut self) -> Vec<String> {
        let ids: Vec<BufferId> = self.pending_explains.keys().copied().collect();
        let mut messages = Vec::new();
        for id in ids {
            let Some(mut task) = self.pending_explains.remove(&id) else {
                continue;
            };
            // the worker enforces the helper timeout, so this returns
            let limit = self.helper.timeout + std::time::Duration::from_secs(1);
            let outcome = task.wait(limit).unwrap_or_else(|| {
                Err(EditorError::HelperUnavailable("no response".to_string()))
            });
            messages.push(self.apply_explanation(id, outcome));
        }
        messages
    }

    fn apply_explanation(&mut self, id: BufferId, outcome: Result<String>) -> String {
        match outcome {
            Ok(text) => match self.buffers.by_id_mut(id) {
                Some(buffer) => {
                    buffer.append(&format!("\n{}\n{}\n", EXPLANATION_HEADING, text));
                    format!("Explanation added to {}", buffer.display_name())
                }
                None => "Explanation arrived for a closed tab; discarded".to_string(),
            },
            Err(e) => format!("Explain failed: {}", e),
        }
    }

    /// Drop state tied to a buffer that has been closed
    pub fn forget_buffer(&mut self, id: BufferId) {
        if let Some(task) = self.pending_explains.remove(&id) {
            debug!(%id, "cancelling explain request for closed tab");
            task.cancel();
        }
    }

    /// Cancel everything in flight; used on exit
    pub fn cancel_all_helpers(&mut self) {
        for (_, task) in self.pending_explains.drain() {
            task.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::prompt::ScriptedPrompter;

    fn app() -> EditorApp {
        EditorApp::new(Box::new(ScriptedPrompter::new()))
    }

    #[test]
    fn test_new_app_has_one_tab_and_commands() {
        let app = app();
        assert_eq!(app.buffers.len(), 1);
        assert!(app.command_registry.contains_key("save"));
        assert!(app.command_registry.contains_key("close-tab"));
    }

    #[test]
    fn test_startup_files_replace_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.txt");
        std::fs::write(&a, "alpha").unwrap();
        let missing_dir = dir.path().join("nope").join("b.txt");
        std::fs::create_dir(dir.path().join("sub")).unwrap();

        let mut app = app();
        let errors = app.open_startup_files(&[a.clone(), dir.path().join("sub"), missing_dir]);

        // the directory fails; a path that does not exist yet opens empty
        assert_eq!(errors.len(), 1);
        let names: Vec<_> = app.buffers.iter().map(|(_, b)| b.display_name()).collect();
        assert_eq!(names, vec!["a.txt", "b.txt"]);
    }

    #[test]
    fn test_status_line_hidden_with_status_bar() {
        let mut app = app();
        assert!(app.status_line().is_some());
        app.view.toggle_status_bar();
        assert!(app.status_line().is_none());
    }

    #[test]
    fn test_explain_needs_a_path() {
        let mut app = app();
        assert!(matches!(
            app.start_explain(),
            Err(EditorError::HelperUnavailable(_))
        ));
        assert!(app.pending_explains.is_empty());
    }
}
