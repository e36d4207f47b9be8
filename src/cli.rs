//! Command-line argument parsing for tabnote.
//!
//! This module provides the `Cli` struct which encapsulates all command-line
//! options and methods for parsing them.

use crate::config::{Config, ConfigValue};
use std::path::PathBuf;

const USAGE: &str = "\
tabnote - A tabbed text editor

Usage: tabnote [OPTIONS] [FILES...]

Options:
  -h, --help                Show this help message
  -w, --wrap                Start with word wrap on
      --no-status-bar       Start with the status bar hidden
      --font NAME           Font family (Arial, Times New Roman, Courier New)
      --font-size N         Font size (10, 12, 14)
      --helper PROGRAM      Program run by the explain command
      --helper-script PATH  Script passed to the helper program
      --helper-timeout MS   Explain timeout in milliseconds

Environment:
  TABNOTE_LOG               Log filter, e.g. debug or tabnote=trace";

/// Command-line interface configuration.
#[derive(Debug, Default, PartialEq)]
pub struct Cli {
    /// File(s) to open
    pub files: Vec<PathBuf>,

    /// Start with word wrap on
    pub wrap: bool,

    /// Start with the status bar hidden
    pub no_status_bar: bool,

    /// Font family override
    pub font: Option<String>,

    /// Font size override
    pub font_size: Option<i64>,

    /// Explain helper program override
    pub helper: Option<String>,

    /// Explain helper script override
    pub helper_script: Option<String>,

    /// Explain timeout override, in milliseconds
    pub helper_timeout_ms: Option<i64>,

    /// Usage was requested
    pub help: bool,
}

impl Cli {
    /// Parse the process arguments.
    pub fn parse() -> Result<Self, Box<dyn std::error::Error>> {
        Self::parse_from(std::env::args().skip(1))
    }

    /// Parse an argument list (without the program name).
    ///
    /// Returns an error if a flag is unknown or a required value is missing.
    pub fn parse_from<I>(args: I) -> Result<Self, Box<dyn std::error::Error>>
    where
        I: IntoIterator<Item = String>,
    {
        let mut cli = Self::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-w" | "--wrap" => cli.wrap = true,
                "--no-status-bar" => cli.no_status_bar = true,
                "--font" => cli.font = Some(value_for(&arg, args.next())?),
                "--font-size" => {
                    cli.font_size = Some(number_for(&arg, args.next())?);
                }
                "--helper" => cli.helper = Some(value_for(&arg, args.next())?),
                "--helper-script" => {
                    cli.helper_script = Some(value_for(&arg, args.next())?);
                }
                "--helper-timeout" => {
                    cli.helper_timeout_ms = Some(number_for(&arg, args.next())?);
                }
                "-h" | "--help" => cli.help = true,
                "--" => {
                    cli.files.extend(args.by_ref().map(PathBuf::from));
                }
                arg if arg.starts_with('-') && arg.len() > 1 => {
                    return Err(format!("Unknown flag: {}. Use --help for usage.", arg).into());
                }
                _ => {
                    // Positional arguments are files
                    cli.files.push(PathBuf::from(arg));
                }
            }
        }

        Ok(cli)
    }

    pub fn usage() -> &'static str {
        USAGE
    }

    /// Apply CLI overrides to a configuration object.
    pub fn apply_to_config(&self, config: &mut Config) {
        if self.wrap {
            config.set("word_wrap", true);
        }
        if self.no_status_bar {
            config.set("status_bar", false);
        }
        if let Some(font) = &self.font {
            config.set("font_family", ConfigValue::String(font.clone()));
        }
        if let Some(size) = self.font_size {
            config.set("font_size", size);
        }
        if let Some(helper) = &self.helper {
            config.set("helper_program", ConfigValue::String(helper.clone()));
        }
        if let Some(script) = &self.helper_script {
            config.set("helper_script", ConfigValue::String(script.clone()));
        }
        if let Some(ms) = self.helper_timeout_ms {
            config.set("helper_timeout_ms", ms);
        }
    }
}

fn value_for(flag: &str, value: Option<String>) -> Result<String, Box<dyn std::error::Error>> {
    value.ok_or_else(|| format!("{} requires a value", flag).into())
}

fn number_for(flag: &str, value: Option<String>) -> Result<i64, Box<dyn std::error::Error>> {
    let value = value_for(flag, value)?;
    value
        .parse::<i64>()
        .map_err(|_| format!("{} expects a number, got '{}'", flag, value).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn parse(args: &[&str]) -> Cli {
        Cli::parse_from(args.iter().map(|s| s.to_string())).unwrap()
    }

    #[test]
    fn test_files_and_flags() {
        let cli = parse(&["--wrap", "a.txt", "--font", "Arial", "b.txt"]);
        assert!(cli.wrap);
        assert_eq!(cli.font.as_deref(), Some("Arial"));
        assert_eq!(cli.files, vec![PathBuf::from("a.txt"), PathBuf::from("b.txt")]);
    }

    #[test]
    fn test_missing_value_and_unknown_flag() {
        assert!(Cli::parse_from(vec!["--font".to_string()]).is_err());
        assert!(Cli::parse_from(vec!["--font-size".to_string(), "big".to_string()]).is_err());
        assert!(Cli::parse_from(vec!["--bogus".to_string()]).is_err());
    }

    #[test]
    fn test_double_dash_ends_flags() {
        let cli = parse(&["--", "--wrap"]);
        assert!(!cli.wrap);
        assert_eq!(cli.files, vec![PathBuf::from("--wrap")]);
    }

    #[test]
    fn test_overrides_reach_config() {
        let mut config = Config::default();
        crate::user_config::configure(&mut config);
        let cli = parse(&[
            "--no-status-bar",
            "--font-size",
            "14",
            "--helper",
            "python3",
            "--helper-script",
            "explain.py",
            "--helper-timeout",
            "500",
        ]);
        cli.apply_to_config(&mut config);

        let view = config.view_settings();
        assert!(!view.status_bar_visible);
        assert_eq!(view.font.size, 14);
        let helper = config.helper_config();
        assert_eq!(helper.program, "python3");
        assert_eq!(helper.args, vec!["explain.py".to_string()]);
        assert_eq!(helper.timeout, Duration::from_millis(500));
    }
}
