//! Display-width helpers for terminal output

use unicode_segmentation::UnicodeSegmentation;

/// Marker appended to text cut short by `truncate_to_width`
const ELLIPSIS: &str = "…";

/// Get the display width of a single character (for monospace terminal display)
/// Returns 0 for control characters, 1 for ASCII, 2 for wide CJK characters, etc.
pub fn char_width(c: char) -> usize {
    unicode_width::UnicodeWidthChar::width(c).unwrap_or(0)
}

/// Get the display width of a grapheme cluster (sum of all character widths)
pub fn grapheme_width(g: &str) -> usize {
    g.chars().map(char_width).sum()
}

/// Total display width of text
pub fn display_width(text: &str) -> usize {
    text.graphemes(true).map(grapheme_width).sum()
}

/// Shorten text to at most `max_width` columns, never splitting a grapheme.
/// Text that had to be cut ends in an ellipsis.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if display_width(text) <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let budget = max_width - 1;
    let mut out = String::new();
    let mut used = 0;
    for g in text.graphemes(true) {
        let w = grapheme_width(g);
        if used + w > budget {
            break;
        }
        out.push_str(g);
        used += w;
    }
    out.push_str(ELLIPSIS);
    out
}
