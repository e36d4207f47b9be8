//! Command Pattern implementation for the tabnote editor
//!
//! Every menu entry and key binding resolves to a named `Command`. Commands
//! receive the whole application state plus an optional argument (a path for
//! open-file, a family for set-font, ...).

use crate::core::app::EditorApp;
use crate::core::dispatcher::DispatchResult;

/// Core command trait implementing the Command Pattern
pub trait Command: Send + Sync + CloneCommand {
    /// Execute the command with an optional argument
    fn execute(&self, app: &mut EditorApp, arg: Option<&str>) -> DispatchResult;
}

/// Helper trait for cloning boxed commands
/// This trait is automatically implemented for all Command types
pub trait CloneCommand {
    /// Create a boxed clone of this command
    fn clone_box(&self) -> Box<dyn Command>;
}

impl<T> CloneCommand for T
where
    T: 'static + Command + Clone,
{
    fn clone_box(&self) -> Box<dyn Command> {
        Box::new(self.clone())
    }
}

impl Clone for Box<dyn Command> {
    fn clone(&self) -> Box<dyn Command> {
        self.as_ref().clone_box()
    }
}
