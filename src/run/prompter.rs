//! Prompter that asks on the shell's own input and output

use std::io::{self, Write};
use std::path::PathBuf;

use crate::core::prompt::{Confirm, Prompter};

/// Source of input lines; `None` once input is closed
pub type LineSource = Box<dyn FnMut() -> Option<String>>;

/// Read lines from stdin through the process-wide buffer, so the shell and
/// the prompter can share it without losing input.
pub fn stdin_lines() -> LineSource {
    Box::new(|| {
        let mut line = String::new();
        match io::stdin().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line),
        }
    })
}

pub struct LinePrompter {
    input: LineSource,
    output: Box<dyn Write>,
}

impl LinePrompter {
    pub fn new(input: LineSource, output: Box<dyn Write>) -> Self {
        Self { input, output }
    }

    pub fn stdio() -> Self {
        Self::new(stdin_lines(), Box::new(io::stdout()))
    }

    fn ask(&mut self, question: &str) -> Option<String> {
        // a closed terminal reads as a dismissed prompt
        let _ = write!(self.output, "{}", question);
        let _ = self.output.flush();
        (self.input)().map(|l| l.trim().to_string())
    }
}

impl Prompter for LinePrompter {
    fn confirm_save(&mut self, buffer_name: &str, diff: Option<&str>) -> Confirm {
        if let Some(diff) = diff {
            let _ = writeln!(self.output, "{}", diff.trim_end());
        }
        let answer = self.ask(&format!(
            "Save changes to {}? [y]es/[n]o/[c]ancel: ",
            buffer_name
        ));
        match answer.as_deref().map(str::to_ascii_lowercase).as_deref() {
            Some("y" | "yes") => Confirm::Yes,
            Some("n" | "no") => Confirm::No,
            _ => Confirm::Cancel,
        }
    }

    fn pick_open_path(&mut self) -> Option<PathBuf> {
        self.ask("Open file: ")
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
    }

    fn pick_save_path(&mut self, suggested_name: &str) -> Option<PathBuf> {
        self.ask(&format!("Save {} as: ", suggested_name))
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
    }
}
