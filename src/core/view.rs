//! Editor-wide view state and the status line
//!
//! Word wrap, status bar visibility and font apply to every tab at once. The
//! status line text is computed on demand from the current buffer; nothing
//! here is cached on the buffer itself.

use crate::core::buffer::Buffer;

/// Font families offered by the font menu
pub const FONT_FAMILIES: &[&str] = &["Arial", "Times New Roman", "Courier New"];

/// Font sizes offered by the font size menu
pub const FONT_SIZES: &[u16] = &[10, 12, 14];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontSpec {
    pub family: String,
    pub size: u16,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            family: "Times New Roman".to_string(),
            size: 12,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewSettings {
    pub word_wrap: bool,
    pub status_bar_visible: bool,
    pub font: FontSpec,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            word_wrap: false,
            status_bar_visible: true,
            font: FontSpec::default(),
        }
    }
}

impl ViewSettings {
    pub fn toggle_word_wrap(&mut self) -> bool {
        self.word_wrap = !self.word_wrap;
        self.word_wrap
    }

    pub fn toggle_status_bar(&mut self) -> bool {
        self.status_bar_visible = !self.status_bar_visible;
        self.status_bar_visible
    }

    /// Switch font family, keeping the size. Unknown families are refused.
    pub fn set_font_family(&mut self, family: &str) -> Result<(), String> {
        match FONT_FAMILIES.iter().find(|f| f.eq_ignore_ascii_case(family)) {
            Some(f) => {
                self.font.family = f.to_string();
                Ok(())
            }
            None => Err(format!(
                "Unknown font '{}' (choose from: {})",
                family,
                FONT_FAMILIES.join(", ")
            )),
        }
    }

    /// Switch font size, keeping the family. Sizes outside the menu are refused.
    pub fn set_font_size(&mut self, size: u16) -> Result<(), String> {
        if FONT_SIZES.contains(&size) {
            self.font.size = size;
            Ok(())
        } else {
            Err(format!("Unsupported font size {}", size))
        }
    }
}

/// Cursor position summary shown at the bottom of the window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusLine {
    /// 1-based line
    pub line: usize,
    /// 1-based grapheme column
    pub column: usize,
    pub total_chars: usize,
}

impl StatusLine {
    pub fn compute(buffer: &Buffer) -> Self {
        let (line, col) = buffer.line_col(buffer.cursor());
        Self {
            line: line + 1,
            column: col + 1,
            total_chars: buffer.char_count(),
        }
    }
}

impl std::fmt::Display for StatusLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Line: {}, Column: {} | Total Characters: {} | Encoding: utf-8",
            self.line, self.column, self.total_chars
        )
    }
}
