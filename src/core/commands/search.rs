use crate::core::app::EditorApp;
/// Search commands
use crate::core::command::Command;
use crate::core::dispatcher::DispatchResult;

/// Find text forward from the cursor and select it
#[derive(Clone)]
pub struct Find;

impl Command for Find {
    fn execute(&self, app: &mut EditorApp, arg: Option<&str>) -> DispatchResult {
        let Some(pattern) = arg.filter(|p| !p.is_empty()) else {
            return DispatchResult::Info("Usage: find TEXT".to_string());
        };
        let found = app.active_buffer().and_then(|b| b.find_forward(pattern));
        let (Some(range), Some(buffer)) = (found, app.active_buffer_mut()) else {
            return DispatchResult::Info(format!("'{}' not found", pattern));
        };
        let start = range.start;
        buffer.select_range(range);
        DispatchResult::Info(format!("'{}' found at position {}", pattern, start))
    }
}

#[cfg(test)]
mod tests {
    use crate::core::app::EditorApp;
    use crate::core::dispatcher::{DispatchResult, dispatch};
    use crate::core::prompt::ScriptedPrompter;

    fn app_with(text: &str) -> EditorApp {
        let mut app = EditorApp::new(Box::new(ScriptedPrompter::new()));
        if let Some(buffer) = app.active_buffer_mut() {
            buffer.insert(0, text);
            buffer.set_cursor(0);
        }
        app
    }

    #[test]
    fn test_find_selects_next_match() {
        let mut app = app_with("one two one");
        assert_eq!(
            dispatch(&mut app, "find", Some("one")),
            DispatchResult::Info("'one' found at position 0".to_string())
        );
        assert_eq!(app.active_buffer().unwrap().selection(), Some(0..3));

        // repeating moves past the current match
        assert_eq!(
            dispatch(&mut app, "find", Some("one")),
            DispatchResult::Info("'one' found at position 8".to_string())
        );
        assert_eq!(app.active_buffer().unwrap().selected_text().as_deref(), Some("one"));
        assert_eq!(app.active_buffer().unwrap().cursor(), 11);
    }

    #[test]
    fn test_find_reports_missing_text() {
        let mut app = app_with("one two");
        app.active_buffer_mut().unwrap().set_cursor(2);
        assert_eq!(
            dispatch(&mut app, "find", Some("three")),
            DispatchResult::Info("'three' not found".to_string())
        );
        let buffer = app.active_buffer().unwrap();
        assert!(!buffer.has_selection());
        assert_eq!(buffer.cursor(), 2);
        assert!(buffer.is_dirty());
    }

    #[test]
    fn test_find_needs_text() {
        let mut app = app_with("abc");
        assert_eq!(
            dispatch(&mut app, "find", None),
            DispatchResult::Info("Usage: find TEXT".to_string())
        );
    }
}
