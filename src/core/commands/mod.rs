//! Command implementations for the tabnote editor
//!
//! - **file**: tab lifecycle (new-tab, open-file, save, save-as, save-all, close-tab)
//! - **control**: leaving the editor (exit, close-window)
//! - **editing**: clipboard and selection (copy, cut, paste, delete, select-all)
//! - **undo**: undo and redo
//! - **search**: find text in the current tab
//! - **tabs**: switching, reordering and listing tabs
//! - **view**: word wrap, status bar and font
//! - **explain**: the background explain helper
//!
//! All commands implement the [`Command`](crate::core::command::Command) trait,
//! which defines a uniform interface for command execution.

/// Application control
pub mod control;
/// Clipboard and selection
pub mod editing;
/// Explain helper
pub mod explain;
/// File operations
pub mod file;
/// Search
pub mod search;
/// Tab navigation
pub mod tabs;
/// Undo/redo operations
pub mod undo;
/// View settings
pub mod view;

/// Register all commands in the application
pub fn register_all(app: &mut crate::core::app::EditorApp) {
    use crate::core::command::Command;
    use std::collections::HashMap;

    use self::control::*;
    use self::editing::*;
    use self::explain::*;
    use self::file::*;
    use self::search::*;
    use self::tabs::*;
    use self::undo::*;
    use self::view::*;

    let mut registry: HashMap<String, Box<dyn Command>> = HashMap::new();

    // File commands
    registry.insert("new-tab".to_string(), Box::new(NewTab));
    registry.insert("open-file".to_string(), Box::new(OpenFile));
    registry.insert("save".to_string(), Box::new(Save));
    registry.insert("save-as".to_string(), Box::new(SaveAs));
    registry.insert("save-all".to_string(), Box::new(SaveAll));
    registry.insert("close-tab".to_string(), Box::new(CloseTab));

    // Control commands
    registry.insert("close-window".to_string(), Box::new(CloseWindow));
    registry.insert("exit".to_string(), Box::new(Exit));

    // Undo/Redo commands
    registry.insert("undo".to_string(), Box::new(Undo));
    registry.insert("redo".to_string(), Box::new(Redo));

    // Editing commands
    registry.insert("copy".to_string(), Box::new(Copy));
    registry.insert("cut".to_string(), Box::new(Cut));
    registry.insert("paste".to_string(), Box::new(Paste));
    registry.insert("delete".to_string(), Box::new(Delete));
    registry.insert("select-all".to_string(), Box::new(SelectAll));

    // Search commands
    registry.insert("find".to_string(), Box::new(Find));

    // View commands
    registry.insert("toggle-word-wrap".to_string(), Box::new(ToggleWordWrap));
    registry.insert("toggle-status-bar".to_string(), Box::new(ToggleStatusBar));
    registry.insert("set-font".to_string(), Box::new(SetFont));
    registry.insert("set-font-size".to_string(), Box::new(SetFontSize));

    // Tab commands
    registry.insert("next-tab".to_string(), Box::new(NextTab));
    registry.insert("previous-tab".to_string(), Box::new(PreviousTab));
    registry.insert("select-tab".to_string(), Box::new(SelectTab));
    registry.insert("move-tab-left".to_string(), Box::new(MoveTabLeft));
    registry.insert("move-tab-right".to_string(), Box::new(MoveTabRight));
    registry.insert("list-tabs".to_string(), Box::new(ListTabs));

    // Helper commands
    registry.insert("explain".to_string(), Box::new(Explain));

    app.command_registry = registry;
}
