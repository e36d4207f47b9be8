use crate::core::app::EditorApp;
/// Tab selection, ordering and listing
use crate::core::command::Command;
use crate::core::dispatcher::DispatchResult;

/// Switch to the next tab, wrapping
#[derive(Clone)]
pub struct NextTab;

impl Command for NextTab {
    fn execute(&self, app: &mut EditorApp, _arg: Option<&str>) -> DispatchResult {
        app.buffers.select_next(1);
        DispatchResult::Success
    }
}

/// Switch to the previous tab, wrapping
#[derive(Clone)]
pub struct PreviousTab;

impl Command for PreviousTab {
    fn execute(&self, app: &mut EditorApp, _arg: Option<&str>) -> DispatchResult {
        app.buffers.select_previous(1);
        DispatchResult::Success
    }
}

/// Select a tab by 1-based position
#[derive(Clone)]
pub struct SelectTab;

impl Command for SelectTab {
    fn execute(&self, app: &mut EditorApp, arg: Option<&str>) -> DispatchResult {
        let Some(n) = arg.and_then(|a| a.trim().parse::<usize>().ok()) else {
            return DispatchResult::Info("select-tab needs a tab number".to_string());
        };
        match app.buffers.select(n.wrapping_sub(1)) {
            Ok(()) => DispatchResult::Success,
            Err(e) => DispatchResult::Info(format!("Error: {}", e)),
        }
    }
}

/// Move the current tab one place left; stops at the edge
#[derive(Clone)]
pub struct MoveTabLeft;

impl Command for MoveTabLeft {
    fn execute(&self, app: &mut EditorApp, _arg: Option<&str>) -> DispatchResult {
        let from = app.buffers.current_index();
        if from > 0 {
            app.buffers.reorder(from, from - 1);
        }
        DispatchResult::Success
    }
}

/// Move the current tab one place right; stops at the edge
#[derive(Clone)]
pub struct MoveTabRight;

impl Command for MoveTabRight {
    fn execute(&self, app: &mut EditorApp, _arg: Option<&str>) -> DispatchResult {
        let from = app.buffers.current_index();
        app.buffers.drag(from, from + 1);
        DispatchResult::Success
    }
}

/// List open tabs, current first-column `>`, dirty `*`
#[derive(Clone)]
pub struct ListTabs;

impl Command for ListTabs {
    fn execute(&self, app: &mut EditorApp, _arg: Option<&str>) -> DispatchResult {
        let current = app.buffers.current_index();
        let mut list = String::from("Tabs:\n");
        for (i, (_, buffer)) in app.buffers.iter().enumerate() {
            let active_marker = if i == current { ">" } else { " " };
            let modified_marker = if buffer.is_dirty() { "*" } else { " " };
            let location = buffer
                .path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(not saved)".to_string());
            list.push_str(&format!(
                "{} {} {:>2} {} {}\n",
                active_marker,
                modified_marker,
                i + 1,
                buffer.display_name(),
                location
            ));
        }
        DispatchResult::Info(list)
    }
}
