//! Line diffs between a buffer's saved snapshot and its current text
use similar::TextDiff;

/// Lines of unchanged context kept around each change
const CONTEXT_RADIUS: usize = 2;

/// Unified diff text with `a/name` and `b/name` headers
pub fn unified(original: &str, modified: &str, name: &str) -> String {
    let diff = TextDiff::from_lines(original, modified);
    diff.unified_diff()
        .context_radius(CONTEXT_RADIUS)
        .header(&format!("a/{}", name), &format!("b/{}", name))
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unified_headers() {
        let text = unified("a\n", "b\n", "x.txt");
        assert!(text.starts_with("--- a/x.txt\n+++ b/x.txt\n"));
        assert!(text.contains("-a\n+b\n"));
    }

    #[test]
    fn test_context_is_trimmed() {
        let original = "1\n2\n3\n4\n5\n6\n7\n8\n";
        let modified = "1\n2\n3\n4\n5\n6\n7\nEIGHT\n";
        let text = unified(original, modified, "n.txt");
        assert!(!text.contains(" 4\n"));
        assert!(text.contains(" 6\n 7\n-8\n+EIGHT\n"));
    }

    #[test]
    fn test_identical_text_has_no_hunks() {
        assert!(!unified("same\n", "same\n", "s.txt").contains("@@"));
    }
}
