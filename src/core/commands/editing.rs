//! Clipboard and selection commands of the Edit menu

use crate::core::app::EditorApp;
use crate::core::command::Command;
use crate::core::dispatcher::DispatchResult;

fn nothing_selected() -> DispatchResult {
    DispatchResult::Info("Nothing selected".to_string())
}

/// Copy the selection to the clipboard
#[derive(Clone)]
pub struct Copy;

impl Command for Copy {
    fn execute(&self, app: &mut EditorApp, _arg: Option<&str>) -> DispatchResult {
        let Some(text) = app.active_buffer().and_then(|b| b.selected_text()) else {
            return nothing_selected();
        };
        app.clipboard.put(&text);
        DispatchResult::Success
    }
}

/// Move the selection to the clipboard
#[derive(Clone)]
pub struct Cut;

impl Command for Cut {
    fn execute(&self, app: &mut EditorApp, _arg: Option<&str>) -> DispatchResult {
        let Some(text) = app.active_buffer_mut().and_then(|b| b.delete_selection()) else {
            return nothing_selected();
        };
        app.clipboard.put(&text);
        DispatchResult::Success
    }
}

/// Insert the clipboard at the cursor, replacing any selection
#[derive(Clone)]
pub struct Paste;

impl Command for Paste {
    fn execute(&self, app: &mut EditorApp, _arg: Option<&str>) -> DispatchResult {
        let Some(text) = app.clipboard.contents().map(str::to_string) else {
            return DispatchResult::Info("Clipboard is empty".to_string());
        };
        if let Some(buffer) = app.active_buffer_mut() {
            buffer.insert_at_cursor(&text);
        }
        DispatchResult::Success
    }
}

/// Remove the selection without touching the clipboard
#[derive(Clone)]
pub struct Delete;

impl Command for Delete {
    fn execute(&self, app: &mut EditorApp, _arg: Option<&str>) -> DispatchResult {
        match app.active_buffer_mut().and_then(|b| b.delete_selection()) {
            Some(_) => DispatchResult::Success,
            None => nothing_selected(),
        }
    }
}

#[derive(Clone)]
pub struct SelectAll;

impl Command for SelectAll {
    fn execute(&self, app: &mut EditorApp, _arg: Option<&str>) -> DispatchResult {
        if let Some(buffer) = app.active_buffer_mut() {
            buffer.select_all();
        }
        DispatchResult::Success
    }
}
