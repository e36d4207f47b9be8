use std::path::PathBuf;
use tracing::warn;

use crate::core::app::EditorApp;
use crate::core::buffer_set::{CloseOutcome, SaveMode, SaveOutcome};
/// File and tab lifecycle commands
use crate::core::command::Command;
use crate::core::dispatcher::DispatchResult;

fn describe_save(outcome: SaveOutcome, name: &str) -> String {
    match outcome {
        SaveOutcome::Saved | SaveOutcome::SavedAs => format!("Wrote {}", name),
        SaveOutcome::Unchanged => format!("{} has nothing to save", name),
        SaveOutcome::Cancelled => "Save cancelled".to_string(),
    }
}

fn save_with(app: &mut EditorApp, mode: SaveMode) -> DispatchResult {
    match app.buffers.save_current(&mut *app.prompter, mode) {
        Ok(outcome) => {
            let name = app
                .active_buffer()
                .map(|b| b.display_name())
                .unwrap_or_default();
            DispatchResult::Info(describe_save(outcome, &name))
        }
        Err(e) => {
            warn!(error = %e, "save failed");
            DispatchResult::Info(format!("Error: {}", e))
        }
    }
}

/// Open an empty untitled tab
#[derive(Clone)]
pub struct NewTab;

impl Command for NewTab {
    fn execute(&self, app: &mut EditorApp, _arg: Option<&str>) -> DispatchResult {
        app.buffers.new_buffer();
        DispatchResult::Success
    }
}

/// Open a file in a new tab; asks for the path unless given one
#[derive(Clone)]
pub struct OpenFile;

impl Command for OpenFile {
    fn execute(&self, app: &mut EditorApp, arg: Option<&str>) -> DispatchResult {
        let path = match arg {
            Some(p) if !p.is_empty() => Some(PathBuf::from(p)),
            _ => app.prompter.pick_open_path(),
        };
        let Some(path) = path else {
            return DispatchResult::Info("Open cancelled".to_string());
        };
        match app.buffers.open_from_disk(&path) {
            Ok(_) => DispatchResult::Info(format!("Opened {}", path.display())),
            Err(e) => DispatchResult::Info(format!("Error: {}", e)),
        }
    }
}

/// Save the current tab, asking for a destination if it has none
#[derive(Clone)]
pub struct Save;

impl Command for Save {
    fn execute(&self, app: &mut EditorApp, _arg: Option<&str>) -> DispatchResult {
        save_with(app, SaveMode::Save)
    }
}

/// Save the current tab to a newly chosen destination
#[derive(Clone)]
pub struct SaveAs;

impl Command for SaveAs {
    fn execute(&self, app: &mut EditorApp, _arg: Option<&str>) -> DispatchResult {
        save_with(app, SaveMode::SaveAs)
    }
}

/// Save every tab; one failure does not stop the others
#[derive(Clone)]
pub struct SaveAll;

impl Command for SaveAll {
    fn execute(&self, app: &mut EditorApp, _arg: Option<&str>) -> DispatchResult {
        let outcomes = app.buffers.save_all(&mut *app.prompter);
        let mut written = 0;
        let mut problems = Vec::new();
        for (id, outcome) in outcomes {
            let name = app
                .buffers
                .index_of(id)
                .and_then(|i| app.buffers.get(i))
                .map(|b| b.display_name())
                .unwrap_or_default();
            match outcome {
                Ok(SaveOutcome::Saved | SaveOutcome::SavedAs) => written += 1,
                Ok(SaveOutcome::Unchanged) => {}
                Ok(SaveOutcome::Cancelled) => problems.push(format!("{}: cancelled", name)),
                Err(e) => problems.push(format!("{}: {}", name, e)),
            }
        }
        if problems.is_empty() {
            DispatchResult::Info(format!("Saved {} tab(s)", written))
        } else {
            DispatchResult::Info(format!(
                "Saved {} tab(s); not saved: {}",
                written,
                problems.join(", ")
            ))
        }
    }
}

/// Close the current tab, asking about unsaved changes
#[derive(Clone)]
pub struct CloseTab;

impl Command for CloseTab {
    fn execute(&self, app: &mut EditorApp, _arg: Option<&str>) -> DispatchResult {
        match app.buffers.close_current(&mut *app.prompter) {
            Ok(CloseOutcome::Closed(id)) => {
                app.forget_buffer(id);
                if app.buffers.is_empty() {
                    app.cancel_all_helpers();
                    DispatchResult::Exit
                } else {
                    DispatchResult::Success
                }
            }
            Ok(CloseOutcome::Cancelled) => DispatchResult::Info("Close cancelled".to_string()),
            Err(e) => {
                warn!(error = %e, "close aborted");
                DispatchResult::Info(format!("Error: {}", e))
            }
        }
    }
}
