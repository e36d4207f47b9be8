//! BufferSet: the ordered tabs of open buffers
//!
//! Order is display order. `current` always names a live entry while the set
//! is non-empty; an empty set means the session has ended. Entries carry a
//! stable [`BufferId`] so reordering moves identity with the buffer, not the slot.

use std::path::Path;
use tracing::{debug, warn};

use crate::core::buffer::Buffer;
use crate::core::error::{EditorError, Result};
use crate::core::id::{BufferId, IdAllocator};
use crate::core::prompt::{Confirm, Prompter};

/// How a save request picks its destination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveMode {
    /// Write to the backing path, asking only if there is none
    Save,
    /// Always ask for a destination
    SaveAs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Written to the existing backing path
    Saved,
    /// Written to a destination chosen by the user
    SavedAs,
    /// Nothing to write: untitled and clean
    Unchanged,
    /// The destination picker was dismissed, nothing written
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    /// The buffer with this id is gone
    Closed(BufferId),
    /// The user backed out; nothing changed
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitOutcome {
    /// Every buffer was saved or knowingly discarded
    Proceed,
    /// The user stopped the exit to keep working
    Cancelled,
}

#[derive(Debug)]
struct Entry {
    id: BufferId,
    buffer: Buffer,
}

/// Ordered collection of open buffers plus the active one
#[derive(Debug)]
pub struct BufferSet {
    entries: Vec<Entry>,
    current: usize,
    ids: IdAllocator,
}

impl BufferSet {
    /// A set holding one empty untitled buffer
    pub fn new() -> Self {
        let mut set = Self {
            entries: Vec::new(),
            current: 0,
            ids: IdAllocator::new(),
        };
        set.new_buffer();
        set
    }

    // ==================== Queries ====================

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True once the last buffer has been closed; the session is over
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> Option<&Buffer> {
        self.entries.get(self.current).map(|e| &e.buffer)
    }

    pub fn current_mut(&mut self) -> Option<&mut Buffer> {
        self.entries.get_mut(self.current).map(|e| &mut e.buffer)
    }

    pub fn current_id(&self) -> Option<BufferId> {
        self.entries.get(self.current).map(|e| e.id)
    }

    pub fn get(&self, index: usize) -> Option<&Buffer> {
        self.entries.get(index).map(|e| &e.buffer)
    }

    pub fn id_at(&self, index: usize) -> Option<BufferId> {
        self.entries.get(index).map(|e| e.id)
    }

    pub fn index_of(&self, id: BufferId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    pub fn by_id_mut(&mut self, id: BufferId) -> Option<&mut Buffer> {
        self.entries
            .iter_mut()
            .find(|e| e.id == id)
            .map(|e| &mut e.buffer)
    }

    /// Buffers in display order
    pub fn iter(&self) -> impl Iterator<Item = (BufferId, &Buffer)> {
        self.entries.iter().map(|e| (e.id, &e.buffer))
    }

    pub fn any_dirty(&self) -> bool {
        self.entries.iter().any(|e| e.buffer.is_dirty())
    }

    // ==================== Creation ====================

    /// Append an empty untitled buffer and make it current
    pub fn new_buffer(&mut self) -> usize {
        self.insert(Buffer::new())
    }

    /// Open `path` in a new tab and make it current.
    ///
    /// On a read failure the set is left exactly as it was.
    pub fn open_from_disk(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let buffer = Buffer::create(Some(path.as_ref()))?;
        Ok(self.insert(buffer))
    }

    fn insert(&mut self, buffer: Buffer) -> usize {
        let id = self.ids.alloc();
        debug!(%id, name = %buffer.display_name(), "new tab");
        self.entries.push(Entry { id, buffer });
        self.current = self.entries.len() - 1;
        self.current
    }

    // ==================== Selection and order ====================

    pub fn select(&mut self, index: usize) -> Result<()> {
        if index >= self.entries.len() {
            return Err(EditorError::Index {
                index,
                len: self.entries.len(),
            });
        }
        self.current = index;
        Ok(())
    }

    /// Select the tab `count` places to the right, wrapping
    pub fn select_next(&mut self, count: usize) {
        if !self.entries.is_empty() {
            self.current = (self.current + count) % self.entries.len();
        }
    }

    /// Select the tab `count` places to the left, wrapping
    pub fn select_previous(&mut self, count: usize) {
        let len = self.entries.len();
        if len > 0 {
            self.current = (self.current + len - (count % len)) % len;
        }
    }

    /// Move the buffer at `from` to position `to`.
    ///
    /// Out-of-range indices are ignored. The current buffer stays current
    /// wherever it ends up. Returns whether anything moved.
    pub fn reorder(&mut self, from: usize, to: usize) -> bool {
        let len = self.entries.len();
        if from >= len || to >= len || from == to {
            return false;
        }
        let current_id = self.entries[self.current].id;
        let entry = self.entries.remove(from);
        self.entries.insert(to, entry);
        if let Some(idx) = self.index_of(current_id) {
            self.current = idx;
        }
        debug!(from, to, "reordered tab");
        true
    }

    /// Drag the buffer at `from` towards `to`, clamping past the right edge
    pub fn drag(&mut self, from: usize, to: usize) -> bool {
        let last = self.entries.len().saturating_sub(1);
        self.reorder(from, to.min(last))
    }

    // ==================== Saving ====================

    /// Save the buffer at `index`
    pub fn save_at(
        &mut self,
        index: usize,
        prompter: &mut dyn Prompter,
        mode: SaveMode,
    ) -> Result<SaveOutcome> {
        let len = self.entries.len();
        let buffer = match self.entries.get_mut(index) {
            Some(entry) => &mut entry.buffer,
            None => return Err(EditorError::Index { index, len }),
        };

        let existing = match mode {
            SaveMode::Save => buffer.path().map(Path::to_path_buf),
            SaveMode::SaveAs => None,
        };
        if let Some(path) = existing {
            buffer.save_to(&path)?;
            return Ok(SaveOutcome::Saved);
        }

        match prompter.pick_save_path(&buffer.display_name()) {
            Some(path) => {
                buffer.save_to(&path)?;
                Ok(SaveOutcome::SavedAs)
            }
            None => Ok(SaveOutcome::Cancelled),
        }
    }

    pub fn save_current(
        &mut self,
        prompter: &mut dyn Prompter,
        mode: SaveMode,
    ) -> Result<SaveOutcome> {
        self.save_at(self.current, prompter, mode)
    }

    /// Save every buffer in order, independently.
    ///
    /// A dismissed picker or failed write for one buffer is reported in its
    /// slot and processing continues with the next.
    pub fn save_all(&mut self, prompter: &mut dyn Prompter) -> Vec<(BufferId, Result<SaveOutcome>)> {
        let mut outcomes = Vec::with_capacity(self.entries.len());
        for index in 0..self.entries.len() {
            let entry = &self.entries[index];
            let id = entry.id;
            if entry.buffer.path().is_none() && !entry.buffer.is_dirty() {
                outcomes.push((id, Ok(SaveOutcome::Unchanged)));
                continue;
            }
            let outcome = self.save_at(index, prompter, SaveMode::Save);
            if let Err(e) = &outcome {
                warn!(%id, error = %e, "save-all: buffer not saved");
            }
            outcomes.push((id, outcome));
        }
        outcomes
    }

    // ==================== Closing ====================

    /// Run the unsaved-changes protocol for the buffer at `index`.
    /// Returns true when the buffer may be discarded.
    fn settle_unsaved(&mut self, index: usize, prompter: &mut dyn Prompter) -> Result<bool> {
        let len = self.entries.len();
        let buffer = match self.entries.get(index) {
            Some(entry) => &entry.buffer,
            None => return Err(EditorError::Index { index, len }),
        };
        if !buffer.is_dirty() {
            return Ok(true);
        }

        let name = buffer.display_name();
        let diff = buffer.unsaved_diff();
        match prompter.confirm_save(&name, diff.as_deref()) {
            Confirm::Yes => {
                let outcome = self.save_at(index, prompter, SaveMode::Save)?;
                Ok(matches!(outcome, SaveOutcome::Saved | SaveOutcome::SavedAs))
            }
            Confirm::No => Ok(true),
            Confirm::Cancel => Ok(false),
        }
    }

    /// Close the buffer at `index`, asking about unsaved changes first.
    ///
    /// A failed save aborts the close and is returned as the error; the buffer
    /// stays open, dirty and selected.
    pub fn close_at(&mut self, index: usize, prompter: &mut dyn Prompter) -> Result<CloseOutcome> {
        if !self.settle_unsaved(index, prompter)? {
            return Ok(CloseOutcome::Cancelled);
        }

        let entry = self.entries.remove(index);
        if index <= self.current {
            self.current = self.current.saturating_sub(1);
        }
        self.current = self.current.min(self.entries.len().saturating_sub(1));
        debug!(id = %entry.id, remaining = self.entries.len(), "closed tab");
        Ok(CloseOutcome::Closed(entry.id))
    }

    pub fn close_current(&mut self, prompter: &mut dyn Prompter) -> Result<CloseOutcome> {
        self.close_at(self.current, prompter)
    }

    /// Walk every buffer through the unsaved-changes protocol before exit.
    ///
    /// The first cancel stops the walk and reselects the tab that was current;
    /// buffers already saved stay saved.
    pub fn prepare_exit(&mut self, prompter: &mut dyn Prompter) -> Result<ExitOutcome> {
        let original = self.current;
        for index in 0..self.entries.len() {
            if self.entries[index].buffer.is_dirty() {
                // show the tab being asked about
                self.current = index;
            }
            if !self.settle_unsaved(index, prompter)? {
                self.current = original;
                return Ok(ExitOutcome::Cancelled);
            }
        }
        Ok(ExitOutcome::Proceed)
    }
}

impl Default for BufferSet {
    fn default() -> Self {
        Self::new()
    }
}
