// Configuration module
// Internal representation of user configuration

use std::collections::HashMap;
use std::time::Duration;
use tracing::warn;

use crate::core::helper::HelperConfig;
use crate::core::view::ViewSettings;

#[derive(Debug, Clone)]
pub struct Config {
    pub keybindings: HashMap<String, String>,
    pub settings: HashMap<String, ConfigValue>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    Bool(bool),
    Int(i64),
    String(String),
}

impl Config {
    pub fn default() -> Self {
        Self {
            keybindings: HashMap::new(),
            settings: HashMap::new(),
        }
    }

    /// Bind a key sequence to a command
    pub fn bind(&mut self, key: &str, command: &str) {
        self.keybindings
            .insert(key.to_string(), command.to_string());
    }

    /// Command bound to a key sequence
    pub fn command_for(&self, key: &str) -> Option<&str> {
        self.keybindings.get(key).map(String::as_str)
    }

    /// Set a configuration value
    pub fn set<V: Into<ConfigValue>>(&mut self, key: &str, value: V) {
        self.settings.insert(key.to_string(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.settings.get(key)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(|v| match v {
            ConfigValue::Bool(b) => Some(*b),
            _ => None,
        })
    }

    pub fn get_int(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(|v| match v {
            ConfigValue::Int(i) => Some(*i),
            _ => None,
        })
    }

    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(|v| match v {
            ConfigValue::String(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// View state at startup; missing, mistyped or unsupported settings fall
    /// back to defaults
    pub fn view_settings(&self) -> ViewSettings {
        let mut view = ViewSettings::default();
        if let Some(wrap) = self.get_bool("word_wrap") {
            view.word_wrap = wrap;
        }
        if let Some(visible) = self.get_bool("status_bar") {
            view.status_bar_visible = visible;
        }
        if let Some(family) = self.get_string("font_family") {
            if let Err(msg) = view.set_font_family(family) {
                warn!("{}", msg);
            }
        }
        if let Some(size) = self.get_int("font_size") {
            let applied = u16::try_from(size)
                .map_err(|_| format!("Unsupported font size {}", size))
                .and_then(|s| view.set_font_size(s));
            if let Err(msg) = applied {
                warn!("{}", msg);
            }
        }
        view
    }

    /// How to launch the explain helper
    pub fn helper_config(&self) -> HelperConfig {
        let defaults = HelperConfig::default();
        HelperConfig {
            program: self
                .get_string("helper_program")
                .map(str::to_string)
                .unwrap_or(defaults.program),
            args: self
                .get_string("helper_script")
                .map(|s| vec![s.to_string()])
                .unwrap_or(defaults.args),
            timeout: self
                .get_int("helper_timeout_ms")
                .and_then(|ms| u64::try_from(ms).ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.timeout),
        }
    }
}

impl From<bool> for ConfigValue {
    fn from(b: bool) -> Self {
        ConfigValue::Bool(b)
    }
}

impl From<i64> for ConfigValue {
    fn from(i: i64) -> Self {
        ConfigValue::Int(i)
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        ConfigValue::String(s.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        ConfigValue::String(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert!(config.keybindings.is_empty());
        assert!(config.settings.is_empty());
        assert_eq!(config.view_settings(), ViewSettings::default());
        assert_eq!(config.helper_config(), HelperConfig::default());
    }

    #[test]
    fn test_bind_key() {
        let mut config = Config::default();
        config.bind("Ctrl+C", "copy");
        assert_eq!(config.command_for("Ctrl+C"), Some("copy"));
    }

    #[test]
    fn test_set_get_settings() {
        let mut config = Config::default();

        config.set("bool_setting", true);
        assert_eq!(config.get_bool("bool_setting"), Some(true));

        config.set("int_setting", 42i64);
        assert_eq!(config.get_int("int_setting"), Some(42));

        config.set("string_setting", "hello");
        assert_eq!(config.get_string("string_setting"), Some("hello"));
    }

    #[test]
    fn test_type_mismatch() {
        let mut config = Config::default();
        config.set("val", 10i64);
        // Should return None if type doesn't match
        assert_eq!(config.get_bool("val"), None);
        assert_eq!(config.get_string("val"), None);
    }

    #[test]
    fn test_view_and_helper_settings() {
        let mut config = Config::default();
        config.set("word_wrap", true);
        config.set("font_size", 14i64);
        config.set("helper_program", "python3");
        config.set("helper_script", "explain.py");
        config.set("helper_timeout_ms", 1500i64);

        let view = config.view_settings();
        assert!(view.word_wrap);
        assert_eq!(view.font.size, 14);

        let helper = config.helper_config();
        assert_eq!(helper.program, "python3");
        assert_eq!(helper.args, vec!["explain.py".to_string()]);
        assert_eq!(helper.timeout, Duration::from_millis(1500));
    }

    #[test]
    fn test_unsupported_font_falls_back() {
        let mut config = Config::default();
        config.set("font_family", "comic sans");
        config.set("font_size", 11i64);
        assert_eq!(config.view_settings().font, ViewSettings::default().font);

        config.set("font_family", "arial");
        assert_eq!(config.view_settings().font.family, "Arial");
    }

    #[test]
    fn test_negative_timeout_falls_back() {
        let mut config = Config::default();
        config.set("helper_timeout_ms", -5i64);
        assert_eq!(config.helper_config().timeout, HelperConfig::default().timeout);
    }
}
