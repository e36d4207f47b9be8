use tracing::warn;

use crate::core::app::EditorApp;
use crate::core::command::Command;
use crate::core::dispatcher::DispatchResult;

/// Ask the helper program to explain the current tab.
///
/// The request runs in the background; its result is applied when the event
/// loop next polls helpers.
#[derive(Clone)]
pub struct Explain;

impl Command for Explain {
    fn execute(&self, app: &mut EditorApp, _arg: Option<&str>) -> DispatchResult {
        match app.start_explain() {
            Ok(id) => {
                let name = app
                    .buffers
                    .index_of(id)
                    .and_then(|i| app.buffers.get(i))
                    .map(|b| b.display_name())
                    .unwrap_or_default();
                DispatchResult::Info(format!("Explaining {}...", name))
            }
            Err(e) => {
                warn!(error = %e, "explain not started");
                DispatchResult::Info(format!("Explain unavailable: {}", e))
            }
        }
    }
}
