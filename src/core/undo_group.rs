//! Undo grouping
//!
//! Groups consecutive edits that belong to the same logical operation so one
//! undo step reverts a typed word rather than a single keystroke.

/// A primitive text change, positions in bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    /// Insert: (position, text inserted)
    Insert { pos: usize, text: String },
    /// Delete: (position, text deleted)
    Delete { pos: usize, text: String },
}

impl Edit {
    fn text(&self) -> &str {
        match self {
            Edit::Insert { text, .. } | Edit::Delete { text, .. } => text,
        }
    }
}

/// A group of edits that should be undone/redone together
#[derive(Debug, Clone, Default)]
pub struct UndoGroup {
    /// The edits that belong to this group
    pub edits: Vec<Edit>,
    /// Optional description of what this group represents
    pub description: Option<String>,
}

impl UndoGroup {
    /// Create a new empty undo group
    pub fn new() -> Self {
        Self {
            edits: Vec::new(),
            description: None,
        }
    }

    /// Create an undo group with a specific description
    pub fn with_description(description: impl Into<String>) -> Self {
        Self {
            edits: Vec::new(),
            description: Some(description.into()),
        }
    }

    /// Add an edit to this group
    pub fn add_edit(&mut self, edit: Edit) {
        self.edits.push(edit);
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    pub fn len(&self) -> usize {
        self.edits.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Word,
    Whitespace,
    Newline,
    Other,
}

impl CharClass {
    fn of(ch: char) -> Self {
        if ch == '\n' {
            CharClass::Newline
        } else if ch.is_alphanumeric() || ch == '_' {
            CharClass::Word
        } else if ch.is_whitespace() {
            CharClass::Whitespace
        } else {
            CharClass::Other
        }
    }
}

/// Decides whether an incoming edit joins the previous undo group
#[derive(Debug, Default)]
pub struct UndoGrouper {
    /// Count of consecutive small edits in current batch
    small_edit_count: usize,
}

impl UndoGrouper {
    /// Maximum small edits to batch together
    const SMALL_EDIT_BATCH_SIZE: usize = 100;

    pub fn new() -> Self {
        Self {
            small_edit_count: 0,
        }
    }

    /// Forget batching state, e.g. after undo or a whole-content replace
    pub fn reset(&mut self) {
        self.small_edit_count = 0;
    }

    /// Determine if two consecutive edits should be grouped together.
    ///
    /// Adjacent insertions (or deletions) group until a newline is typed or the
    /// batch limit is hit; larger pastes group only when they do not cross a
    /// word boundary.
    pub fn should_group(&mut self, prev_edit: &Edit, curr_edit: &Edit) -> bool {
        let edits_are_adjacent = match (prev_edit, curr_edit) {
            (
                Edit::Insert {
                    pos: prev_pos,
                    text: prev_text,
                },
                Edit::Insert { pos: curr_pos, .. },
            ) => *curr_pos == *prev_pos + prev_text.len(),
            (Edit::Delete { pos: prev_pos, .. }, Edit::Delete { pos: curr_pos, text }) => {
                // forward delete keeps the position, backspace walks left
                *curr_pos == *prev_pos || *curr_pos + text.len() == *prev_pos
            }
            _ => false,
        };

        if !edits_are_adjacent {
            self.small_edit_count = 0;
            return false;
        }

        if curr_edit.text().contains('\n') {
            self.small_edit_count = 0;
            return false;
        }

        let is_small_edit = curr_edit.text().chars().count() <= 1;
        if is_small_edit {
            self.small_edit_count += 1;
            if self.small_edit_count <= Self::SMALL_EDIT_BATCH_SIZE {
                return true;
            }
            self.small_edit_count = 1;
            return false;
        }
        self.small_edit_count = 0;

        !Self::crosses_word_boundary(prev_edit, curr_edit)
    }

    fn crosses_word_boundary(prev_edit: &Edit, curr_edit: &Edit) -> bool {
        let last = prev_edit.text().chars().last();
        let first = curr_edit.text().chars().next();
        match (last, first) {
            (Some(a), Some(b)) => CharClass::of(a) != CharClass::of(b),
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ins(pos: usize, text: &str) -> Edit {
        Edit::Insert {
            pos,
            text: text.to_string(),
        }
    }

    fn del(pos: usize, text: &str) -> Edit {
        Edit::Delete {
            pos,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_undo_group_operations() {
        let mut group = UndoGroup::new();
        assert!(group.is_empty());

        group.add_edit(ins(0, "hello"));
        group.add_edit(ins(5, " world"));

        assert_eq!(group.len(), 2);
        assert!(!group.is_empty());

        let described = UndoGroup::with_description("replace");
        assert_eq!(described.description.as_deref(), Some("replace"));
    }

    #[test]
    fn test_adjacent_typing_groups() {
        let mut grouper = UndoGrouper::new();
        assert!(grouper.should_group(&ins(0, "h"), &ins(1, "i")));
        assert!(grouper.should_group(&ins(1, "i"), &ins(2, " ")));
    }

    #[test]
    fn test_newline_starts_new_group() {
        let mut grouper = UndoGrouper::new();
        assert!(!grouper.should_group(&ins(0, "a"), &ins(1, "\n")));
    }

    #[test]
    fn test_non_adjacent_does_not_group() {
        let mut grouper = UndoGrouper::new();
        assert!(!grouper.should_group(&ins(0, "a"), &ins(7, "b")));
    }

    #[test]
    fn test_backspace_run_groups() {
        let mut grouper = UndoGrouper::new();
        assert!(grouper.should_group(&del(4, "o"), &del(3, "l")));
    }

    #[test]
    fn test_should_not_group_different_edit_types() {
        let mut grouper = UndoGrouper::new();
        assert!(!grouper.should_group(&ins(0, "hello"), &del(0, "hello")));
    }

    #[test]
    fn test_batch_limit_splits_groups() {
        let mut grouper = UndoGrouper::new();
        let mut grouped = 0;
        for i in 0..150 {
            if grouper.should_group(&ins(i, "x"), &ins(i + 1, "x")) {
                grouped += 1;
            }
        }
        assert_eq!(grouped, 149);
    }

    #[test]
    fn test_paste_groups_within_word() {
        let mut grouper = UndoGrouper::new();
        assert!(grouper.should_group(&ins(0, "foo"), &ins(3, "bar")));
        assert!(!grouper.should_group(&ins(6, "bar"), &ins(9, "   ")));
    }
}
