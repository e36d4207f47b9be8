//! Buffer: one open document
//!
//! Holds the text (a ropey Rope), the backing path if any, and the snapshot of
//! what was last loaded from or written to disk. The dirty flag is never
//! stored: it is recomputed by comparing the rope to the snapshot, so undoing
//! back to the saved text makes the buffer clean again.

use ropey::Rope;
use std::collections::VecDeque;
use std::fs;
use std::io::{self, Write};
use std::ops::Range;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;
use unicode_segmentation::UnicodeSegmentation;

use crate::core::error::{EditorError, Result};
use crate::core::undo_group::{Edit, UndoGroup, UndoGrouper};

/// Maximum undo stack depth to prevent OOM from unbounded undo history
const MAX_UNDO_DEPTH: usize = 10_000;

/// Name shown for a buffer that has never been saved
pub const UNTITLED: &str = "Untitled";

/// Buffer: text content, save location and last-persisted snapshot
#[derive(Debug)]
pub struct Buffer {
    /// Text content stored in a Rope (O(log n) operations)
    rope: Rope,
    /// Backing file, `None` until first save for a new buffer
    path: Option<PathBuf>,
    /// Content as of the last successful load or save
    saved_snapshot: Option<String>,
    /// Cursor as a byte offset, always on a char boundary
    cursor: usize,
    /// Selection anchor; the selection spans anchor..cursor in either direction
    anchor: Option<usize>,
    /// Version counter, bumped on every content change
    pub version: u64,
    undo_stack: VecDeque<UndoGroup>,
    redo_stack: VecDeque<UndoGroup>,
    undo_grouper: UndoGrouper,
}

impl Buffer {
    /// Create a new empty buffer; it starts clean
    pub fn new() -> Self {
        Self::with_content("", None)
    }

    /// Create a buffer from a string, treating the string as already saved
    pub fn from_string(content: impl AsRef<str>) -> Self {
        Self::with_content(content.as_ref(), None)
    }

    fn with_content(content: &str, path: Option<PathBuf>) -> Self {
        Self {
            rope: Rope::from_str(content),
            path,
            saved_snapshot: Some(content.to_string()),
            cursor: 0,
            anchor: None,
            version: 0,
            undo_stack: VecDeque::new(),
            redo_stack: VecDeque::new(),
            undo_grouper: UndoGrouper::new(),
        }
    }

    /// Create a buffer for `path`.
    ///
    /// An existing file is read in full; a path that does not exist yet gives
    /// an empty buffer bound to that path. No path gives an untitled buffer.
    pub fn create(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) if p.exists() => Self::from_file(p),
            Some(p) => Ok(Self::with_content("", Some(p.to_path_buf()))),
            None => Ok(Self::new()),
        }
    }

    /// Load a buffer from an existing file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        validate_file_path(path).map_err(|e| EditorError::io(path, e))?;

        let content = fs::read_to_string(path).map_err(|e| EditorError::io(path, e))?;
        debug!(path = %path.display(), bytes = content.len(), "loaded buffer");

        Ok(Self::with_content(&content, Some(path.to_path_buf())))
    }

    // ==================== Identity ====================

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Basename of the backing path, or "Untitled"
    pub fn display_name(&self) -> String {
        self.path
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| UNTITLED.to_string())
    }

    /// Associate the buffer with a new location without writing it
    pub fn rename(&mut self, new_path: impl Into<PathBuf>) {
        self.path = Some(new_path.into());
    }

    // ==================== Dirty tracking ====================

    /// True when the content differs from what was last persisted
    pub fn is_dirty(&self) -> bool {
        match &self.saved_snapshot {
            Some(snapshot) => self.rope != snapshot.as_str(),
            None => self.rope.len_bytes() != 0,
        }
    }

    /// The last-persisted content
    pub fn saved_snapshot(&self) -> Option<&str> {
        self.saved_snapshot.as_deref()
    }

    /// Unified diff from the saved snapshot to the current content, if dirty
    pub fn unsaved_diff(&self) -> Option<String> {
        if !self.is_dirty() {
            return None;
        }
        let current = self.text();
        let original = self.saved_snapshot.as_deref().unwrap_or("");
        let name = self.display_name();
        Some(crate::core::diff::unified(original, &current, &name))
    }

    // ==================== Content Access ====================

    /// Get total length in bytes
    pub fn len(&self) -> usize {
        self.rope.len_bytes()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len_bytes() == 0
    }

    /// Total characters, as shown in the status line
    pub fn char_count(&self) -> usize {
        self.rope.len_chars()
    }

    /// Get entire content as string
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Get number of lines in buffer
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Zero-based line and grapheme column of a byte offset
    pub fn line_col(&self, byte_pos: usize) -> (usize, usize) {
        let pos = self.clamp_to_boundary(byte_pos);
        let line = self.rope.byte_to_line(pos);
        let line_start = self.rope.line_to_byte(line);
        let prefix = self.rope.byte_slice(line_start..pos).to_string();
        (line, prefix.graphemes(true).count())
    }

    fn clamp_to_boundary(&self, byte_pos: usize) -> usize {
        let pos = byte_pos.min(self.rope.len_bytes());
        self.rope.char_to_byte(self.rope.byte_to_char(pos))
    }

    // ==================== Cursor and selection ====================

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Move the cursor, clamped to the content and snapped to a char boundary
    pub fn set_cursor(&mut self, byte_pos: usize) {
        self.cursor = self.clamp_to_boundary(byte_pos);
    }

    /// Start (or clear) a selection at the current cursor
    pub fn set_anchor(&mut self, anchor: Option<usize>) {
        self.anchor = anchor.map(|a| self.clamp_to_boundary(a));
    }

    /// Select the whole buffer, cursor at the end
    pub fn select_all(&mut self) {
        self.anchor = Some(0);
        self.cursor = self.rope.len_bytes();
    }

    /// Selected byte range, `None` when nothing (or an empty range) is selected
    pub fn selection(&self) -> Option<Range<usize>> {
        let anchor = self.anchor?;
        let range = if anchor <= self.cursor {
            anchor..self.cursor
        } else {
            self.cursor..anchor
        };
        (!range.is_empty()).then_some(range)
    }

    pub fn has_selection(&self) -> bool {
        self.selection().is_some()
    }

    pub fn selected_text(&self) -> Option<String> {
        self.selection()
            .map(|r| self.rope.byte_slice(r).to_string())
    }

    /// Byte range of the first match of `pattern` after the cursor (or after
    /// the selection), wrapping around to the top of the buffer
    pub fn find_forward(&self, pattern: &str) -> Option<Range<usize>> {
        if pattern.is_empty() {
            return None;
        }
        let text = self.rope.to_string();
        let from = self.selection().map_or(self.cursor, |r| r.end);
        let start = text
            .get(from..)
            .and_then(|rest| rest.find(pattern))
            .map(|i| from + i)
            .or_else(|| text.find(pattern))?;
        Some(start..start + pattern.len())
    }

    /// Select `range`, leaving the cursor at its end
    pub fn select_range(&mut self, range: Range<usize>) {
        self.set_anchor(Some(range.start));
        self.set_cursor(range.end);
    }

    // ==================== Editing Operations ====================

    /// Replace the whole content; the snapshot is left alone
    pub fn edit(&mut self, new_content: &str) {
        if self.rope == new_content {
            return;
        }
        let old = self.rope.to_string();
        self.rope = Rope::from_str(new_content);
        self.cursor = self.cursor.min(self.rope.len_bytes());
        self.cursor = self.clamp_to_boundary(self.cursor);
        self.anchor = None;
        self.version += 1;

        let mut group = UndoGroup::with_description("replace");
        group.add_edit(Edit::Delete { pos: 0, text: old });
        group.add_edit(Edit::Insert {
            pos: 0,
            text: new_content.to_string(),
        });
        self.push_group(group);
        self.undo_grouper.reset();
        self.redo_stack.clear();
    }

    /// Insert text at byte position
    pub fn insert(&mut self, pos: usize, text: &str) {
        if text.is_empty() {
            return;
        }
        let pos = self.clamp_to_boundary(pos);
        let char_idx = self.rope.byte_to_char(pos);
        self.rope.insert(char_idx, text);
        self.version += 1;

        if self.cursor >= pos {
            self.cursor += text.len();
        }
        self.push_edit(Edit::Insert {
            pos,
            text: text.to_string(),
        });
        self.redo_stack.clear();
    }

    /// Delete `len` bytes at byte position, returning what was removed
    pub fn delete(&mut self, pos: usize, len: usize) -> String {
        if len == 0 || pos >= self.rope.len_bytes() {
            return String::new();
        }
        let start = self.clamp_to_boundary(pos);
        let end = self.clamp_to_boundary(pos + len);
        if start >= end {
            return String::new();
        }
        let start_char = self.rope.byte_to_char(start);
        let end_char = self.rope.byte_to_char(end);
        let deleted = self.rope.slice(start_char..end_char).to_string();
        self.rope.remove(start_char..end_char);
        self.version += 1;

        if self.cursor >= end {
            self.cursor -= end - start;
        } else if self.cursor > start {
            self.cursor = start;
        }
        self.push_edit(Edit::Delete {
            pos: start,
            text: deleted.clone(),
        });
        self.redo_stack.clear();
        deleted
    }

    /// Remove the selected text, returning it
    pub fn delete_selection(&mut self) -> Option<String> {
        let range = self.selection()?;
        self.anchor = None;
        let removed = self.delete(range.start, range.len());
        self.cursor = range.start;
        Some(removed)
    }

    /// Type text at the cursor, replacing the selection if there is one
    pub fn insert_at_cursor(&mut self, text: &str) {
        self.delete_selection();
        let pos = self.cursor;
        self.insert(pos, text);
    }

    /// Append text at the end of the buffer
    pub fn append(&mut self, text: &str) {
        let end = self.rope.len_bytes();
        self.insert(end, text);
    }

    // ==================== Undo/Redo ====================

    /// Undo the last edit group
    pub fn undo(&mut self) -> bool {
        let Some(group) = self.undo_stack.pop_back() else {
            return false;
        };
        for edit in group.edits.iter().rev() {
            match edit {
                Edit::Insert { pos, text } => self.raw_remove(*pos, text.len()),
                Edit::Delete { pos, text } => self.raw_insert(*pos, text),
            }
        }
        self.redo_stack.push_back(group);
        self.after_history_step();
        true
    }

    /// Redo the last undone edit group
    pub fn redo(&mut self) -> bool {
        let Some(group) = self.redo_stack.pop_back() else {
            return false;
        };
        for edit in &group.edits {
            match edit {
                Edit::Insert { pos, text } => self.raw_insert(*pos, text),
                Edit::Delete { pos, text } => self.raw_remove(*pos, text.len()),
            }
        }
        self.undo_stack.push_back(group);
        self.after_history_step();
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    fn raw_insert(&mut self, pos: usize, text: &str) {
        let char_idx = self.rope.byte_to_char(pos.min(self.rope.len_bytes()));
        self.rope.insert(char_idx, text);
    }

    fn raw_remove(&mut self, pos: usize, len: usize) {
        let start = self.rope.byte_to_char(pos.min(self.rope.len_bytes()));
        let end = self.rope.byte_to_char((pos + len).min(self.rope.len_bytes()));
        self.rope.remove(start..end);
    }

    fn after_history_step(&mut self) {
        self.version += 1;
        self.anchor = None;
        self.cursor = self.clamp_to_boundary(self.cursor);
        self.undo_grouper.reset();
    }

    /// Push an edit to the undo stack, with smart grouping
    fn push_edit(&mut self, edit: Edit) {
        // whole-content replacements stay a group of their own
        let should_group = match self
            .undo_stack
            .back()
            .filter(|g| g.description.is_none())
            .and_then(|g| g.edits.last())
        {
            Some(prev_edit) => self.undo_grouper.should_group(prev_edit, &edit),
            None => false,
        };

        if should_group {
            if let Some(group) = self.undo_stack.back_mut() {
                group.add_edit(edit);
            }
        } else {
            let mut group = UndoGroup::new();
            group.add_edit(edit);
            self.push_group(group);
        }
    }

    fn push_group(&mut self, group: UndoGroup) {
        if self.undo_stack.len() >= MAX_UNDO_DEPTH {
            self.undo_stack.pop_front(); // O(1) discard oldest
        }
        self.undo_stack.push_back(group);
    }

    // ==================== File Operations ====================

    /// Write the content verbatim to `path`, then adopt `path` as the backing file.
    ///
    /// The write goes through a temp file in the destination directory and an
    /// atomic rename. On failure the path and snapshot are left untouched, so
    /// the buffer stays dirty.
    pub fn save_to(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        write_atomically(&self.rope, path).map_err(|e| EditorError::io(path, e))?;

        self.path = Some(path.to_path_buf());
        self.saved_snapshot = Some(self.rope.to_string());
        debug!(path = %path.display(), bytes = self.rope.len_bytes(), "saved buffer");
        Ok(())
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Replace the file behind `path`. A symlink is followed so the link itself
/// survives, and the existing file's permissions carry over to the new one.
fn write_atomically(rope: &Rope, path: &Path) -> io::Result<()> {
    let target = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let parent = match target.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut temp_file = NamedTempFile::new_in(parent)?;
    if let Ok(metadata) = fs::metadata(&target) {
        temp_file.as_file().set_permissions(metadata.permissions())?;
    }

    // Write content chunk by chunk to avoid large allocations
    for chunk in rope.chunks() {
        temp_file.write_all(chunk.as_bytes())?;
    }
    temp_file.flush()?;
    temp_file.as_file().sync_all()?;

    temp_file.persist(&target).map_err(|e| e.error)?;
    Ok(())
}

/// Refuse directories and special files that could hang a read
fn validate_file_path(path: &Path) -> io::Result<()> {
    let metadata = fs::metadata(path)?;
    if metadata.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "path is a directory, not a file",
        ));
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::FileTypeExt;
        let file_type = metadata.file_type();
        if file_type.is_block_device()
            || file_type.is_char_device()
            || file_type.is_fifo()
            || file_type.is_socket()
        {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "cannot open device or special file",
            ));
        }
    }

    Ok(())
}
