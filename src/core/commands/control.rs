use tracing::info;

use crate::core::app::EditorApp;
use crate::core::buffer_set::ExitOutcome;
/// Application control commands
use crate::core::command::Command;
use crate::core::dispatcher::DispatchResult;

/// Walk every tab through the unsaved-changes protocol, then end the session
fn confirm_exit(app: &mut EditorApp) -> DispatchResult {
    match app.buffers.prepare_exit(&mut *app.prompter) {
        Ok(ExitOutcome::Proceed) => {
            app.cancel_all_helpers();
            info!("exit confirmed");
            DispatchResult::Exit
        }
        Ok(ExitOutcome::Cancelled) => DispatchResult::Info("Exit cancelled".to_string()),
        Err(e) => DispatchResult::Info(format!("Exit aborted: {}", e)),
    }
}

/// Exit application
#[derive(Clone)]
pub struct Exit;

impl Command for Exit {
    fn execute(&self, app: &mut EditorApp, _arg: Option<&str>) -> DispatchResult {
        confirm_exit(app)
    }
}

/// Close the editor window; same protection as exit
#[derive(Clone)]
pub struct CloseWindow;

impl Command for CloseWindow {
    fn execute(&self, app: &mut EditorApp, _arg: Option<&str>) -> DispatchResult {
        confirm_exit(app)
    }
}
