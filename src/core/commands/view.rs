use crate::core::app::EditorApp;
/// View menu commands: wrap, status bar, font
use crate::core::command::Command;
use crate::core::dispatcher::DispatchResult;

fn on_off(flag: bool) -> &'static str {
    if flag { "on" } else { "off" }
}

#[derive(Clone)]
pub struct ToggleWordWrap;

impl Command for ToggleWordWrap {
    fn execute(&self, app: &mut EditorApp, _arg: Option<&str>) -> DispatchResult {
        let wrap = app.view.toggle_word_wrap();
        DispatchResult::Info(format!("Word wrap {}", on_off(wrap)))
    }
}

#[derive(Clone)]
pub struct ToggleStatusBar;

impl Command for ToggleStatusBar {
    fn execute(&self, app: &mut EditorApp, _arg: Option<&str>) -> DispatchResult {
        let visible = app.view.toggle_status_bar();
        DispatchResult::Info(format!("Status bar {}", on_off(visible)))
    }
}

/// Change the font family for every tab
#[derive(Clone)]
pub struct SetFont;

impl Command for SetFont {
    fn execute(&self, app: &mut EditorApp, arg: Option<&str>) -> DispatchResult {
        let Some(family) = arg.map(str::trim).filter(|f| !f.is_empty()) else {
            return DispatchResult::Info("set-font needs a font family".to_string());
        };
        match app.view.set_font_family(family) {
            Ok(()) => DispatchResult::Success,
            Err(msg) => DispatchResult::Info(msg),
        }
    }
}

/// Change the font size for every tab
#[derive(Clone)]
pub struct SetFontSize;

impl Command for SetFontSize {
    fn execute(&self, app: &mut EditorApp, arg: Option<&str>) -> DispatchResult {
        let Some(size) = arg.and_then(|a| a.trim().parse::<u16>().ok()) else {
            return DispatchResult::Info("set-font-size needs a number".to_string());
        };
        match app.view.set_font_size(size) {
            Ok(()) => DispatchResult::Success,
            Err(msg) => DispatchResult::Info(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::app::EditorApp;
    use crate::core::dispatcher::{DispatchResult, dispatch};
    use crate::core::prompt::ScriptedPrompter;

    #[test]
    fn test_font_commands() {
        let mut app = EditorApp::new(Box::new(ScriptedPrompter::new()));
        assert_eq!(dispatch(&mut app, "set-font", Some("courier new")), DispatchResult::Success);
        assert_eq!(app.view.font.family, "Courier New");
        assert_eq!(dispatch(&mut app, "set-font-size", Some("14")), DispatchResult::Success);
        assert_eq!(app.view.font.size, 14);

        assert!(matches!(
            dispatch(&mut app, "set-font", Some("Comic Sans")),
            DispatchResult::Info(_)
        ));
        assert!(matches!(
            dispatch(&mut app, "set-font-size", Some("11")),
            DispatchResult::Info(_)
        ));
        assert_eq!(app.view.font.family, "Courier New");
        assert_eq!(app.view.font.size, 14);
    }

    #[test]
    fn test_toggles_apply_to_all_tabs() {
        let mut app = EditorApp::new(Box::new(ScriptedPrompter::new()));
        dispatch(&mut app, "new-tab", None);
        assert_eq!(
            dispatch(&mut app, "toggle-word-wrap", None),
            DispatchResult::Info("Word wrap on".to_string())
        );
        dispatch(&mut app, "previous-tab", None);
        assert!(app.view.word_wrap);
        dispatch(&mut app, "toggle-status-bar", None);
        assert!(app.status_line().is_none());
    }
}
