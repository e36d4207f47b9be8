// tabnote Configuration
// Edit this file to customize your editor, then rebuild

use crate::config::Config;

/// User configuration function
pub fn configure(config: &mut Config) {
    // File
    config.bind("Ctrl+N", "new-tab");
    config.bind("Ctrl+O", "open-file");
    config.bind("Ctrl+S", "save");
    config.bind("Ctrl+Shift+S", "save-as");
    config.bind("Ctrl+A", "save-all");
    config.bind("Ctrl+W", "close-tab");
    config.bind("Ctrl+Shift+W", "close-window");
    config.bind("Ctrl+Q", "exit");

    // Edit
    config.bind("Ctrl+Z", "undo");
    config.bind("Ctrl+Y", "redo");
    config.bind("Ctrl+C", "copy");
    config.bind("Ctrl+X", "cut");
    config.bind("Ctrl+V", "paste");
    config.bind("Del", "delete");

    // Tabs
    config.bind("Ctrl+Tab", "next-tab");
    config.bind("Ctrl+Shift+Tab", "previous-tab");

    // View
    config.set("word_wrap", false);
    config.set("status_bar", true);
    config.set("font_family", "Times New Roman");
    config.set("font_size", 12i64);

    // Explain helper: node gpt-api/chatgpt.js <file>
    config.set("helper_program", "node");
    config.set("helper_script", "gpt-api/chatgpt.js");
    config.set("helper_timeout_ms", 30_000i64);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_key_table() {
        let mut config = Config::default();
        configure(&mut config);
        assert_eq!(config.command_for("Ctrl+N"), Some("new-tab"));
        assert_eq!(config.command_for("Ctrl+Shift+S"), Some("save-as"));
        assert_eq!(config.command_for("Ctrl+Q"), Some("exit"));
        assert_eq!(config.command_for("Del"), Some("delete"));
        assert_eq!(config.view_settings().font.family, "Times New Roman");
        assert_eq!(config.helper_config().args, vec!["gpt-api/chatgpt.js".to_string()]);
    }
}
