use tracing::debug;

use crate::core::app::EditorApp;

/// Result of command dispatch
#[derive(Debug, PartialEq)]
pub enum DispatchResult {
    /// Command executed successfully
    Success,
    /// Command not found/handled
    NotHandled,
    /// The session is over: exit was confirmed or the last tab closed
    Exit,
    /// Informational message to display
    Info(String),
}

/// Look up `command_name` in the registry and run it.
///
/// # Returns
/// `DispatchResult` indicating success, failure, or special handling needs
pub fn dispatch(app: &mut EditorApp, command_name: &str, arg: Option<&str>) -> DispatchResult {
    if let Some(command_obj) = app.command_registry.get(command_name).cloned() {
        debug!(command = command_name, ?arg, "dispatch");
        return command_obj.execute(app, arg);
    }

    debug!(command = command_name, "command not found in registry");
    DispatchResult::NotHandled
}

/// Run the command bound to a key sequence such as `Ctrl+S`
pub fn dispatch_key(app: &mut EditorApp, key: &str) -> DispatchResult {
    match app.keybindings.get(key).cloned() {
        Some(command) => dispatch(app, &command, None),
        None => DispatchResult::NotHandled,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::core::prompt::ScriptedPrompter;

    fn setup_test_app() -> EditorApp {
        let mut config = Config::default();
        crate::user_config::configure(&mut config);
        EditorApp::from_config(&config, Box::new(ScriptedPrompter::new()))
    }

    #[test]
    fn test_dispatch_new_tab() {
        let mut app = setup_test_app();
        let result = dispatch(&mut app, "new-tab", None);
        assert_eq!(result, DispatchResult::Success);
        assert_eq!(app.buffers.len(), 2);
    }

    #[test]
    fn test_dispatch_key_binding() {
        let mut app = setup_test_app();
        assert_eq!(dispatch_key(&mut app, "Ctrl+N"), DispatchResult::Success);
        assert_eq!(app.buffers.len(), 2);
        assert_eq!(dispatch_key(&mut app, "Ctrl+F12"), DispatchResult::NotHandled);
    }

    #[test]
    fn test_dispatch_exit_clean() {
        let mut app = setup_test_app();
        let result = dispatch(&mut app, "exit", None);
        assert_eq!(result, DispatchResult::Exit);
    }

    #[test]
    fn test_dispatch_unknown() {
        let mut app = setup_test_app();
        let result = dispatch(&mut app, "unknown-command", None);
        assert_eq!(result, DispatchResult::NotHandled);
    }
}
