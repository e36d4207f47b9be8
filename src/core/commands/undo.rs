use crate::core::app::EditorApp;
use crate::core::command::Command;
use crate::core::dispatcher::DispatchResult;

/// Undo the last operation
#[derive(Clone)]
pub struct Undo;

impl Command for Undo {
    fn execute(&self, app: &mut EditorApp, _arg: Option<&str>) -> DispatchResult {
        let undone = match app.active_buffer_mut() {
            Some(buffer) => buffer.undo(),
            None => false,
        };
        if undone {
            DispatchResult::Success
        } else {
            DispatchResult::Info("Nothing to undo".to_string())
        }
    }
}

/// Redo the last undone operation
#[derive(Clone)]
pub struct Redo;

impl Command for Redo {
    fn execute(&self, app: &mut EditorApp, _arg: Option<&str>) -> DispatchResult {
        let redone = match app.active_buffer_mut() {
            Some(buffer) => buffer.redo(),
            None => false,
        };
        if redone {
            DispatchResult::Success
        } else {
            DispatchResult::Info("Nothing to redo".to_string())
        }
    }
}
