//! Editor clipboard shared by all tabs

/// Maximum size of a single clipboard entry (10 MB)
const MAX_CLIP_SIZE: usize = 10 * 1024 * 1024;

/// Recent copies, newest last; paste always takes the newest
#[derive(Debug, Clone)]
pub struct Clipboard {
    history: Vec<String>,
    max_entries: usize,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::with_size(16)
    }

    pub fn with_size(max_entries: usize) -> Self {
        Self {
            history: Vec::with_capacity(max_entries),
            max_entries: max_entries.max(1),
        }
    }

    /// Store copied text. Empty and oversized text is ignored.
    pub fn put(&mut self, text: &str) {
        if text.is_empty() || text.len() > MAX_CLIP_SIZE {
            return;
        }
        if self.history.len() >= self.max_entries {
            self.history.remove(0);
        }
        self.history.push(text.to_string());
    }

    /// Text a paste would insert
    pub fn contents(&self) -> Option<&str> {
        self.history.last().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}

impl Default for Clipboard {
    fn default() -> Self {
        Self::new()
    }
}
