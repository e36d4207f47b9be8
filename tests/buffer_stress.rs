//! Buffer Stress Tests
//!
//! Buffer integrity under long edit sequences, undo/redo and saving. The
//! dirty flag is derived from the saved snapshot, so most scenarios check
//! where the clean point sits after history moves past it.

use std::fs;
use std::path::PathBuf;

use tabnote::core::buffer::Buffer;

fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

// =============================================================================
// BUFFER INTEGRITY TESTS
// =============================================================================

#[test]
fn buffer_10k_edits_undo_all() {
    let initial_content = "Hello, World!\nThis is a test file.\nWith multiple lines.\n";
    let mut buffer = Buffer::from_string(initial_content);

    // adjacent single-char edits batch 100 to a group
    for _ in 0..10_000u64 {
        buffer.insert(buffer.len(), "x");
    }
    assert!(buffer.is_dirty());

    let mut undo_count = 0;
    while buffer.undo() {
        undo_count += 1;
        assert!(
            undo_count <= 500,
            "Too many undo operations: {} - batch grouping may not be working",
            undo_count
        );
    }

    assert_eq!(buffer.text(), initial_content);
    // back at the snapshot, so clean again
    assert!(!buffer.is_dirty());
}

#[test]
fn buffer_rapid_insert_delete_cycle() {
    let mut buffer = Buffer::new();

    for round in 0..100 {
        for _ in 0..100 {
            buffer.insert(0, "x");
        }
        assert!(buffer.is_dirty());
        for _ in 0..100 {
            buffer.delete(0, 1);
        }
        assert!(
            buffer.is_empty() && !buffer.is_dirty(),
            "Buffer should be empty and clean after round {}, got: {:?}",
            round,
            buffer.text()
        );
    }
}

#[test]
fn edit_replaces_whole_content() {
    let mut buffer = Buffer::from_string("one");
    buffer.edit("two");
    assert!(buffer.is_dirty());
    buffer.edit("one");
    assert!(!buffer.is_dirty());
    assert!(buffer.undo());
    assert_eq!(buffer.text(), "two");
}

#[test]
fn edit_to_identical_content_records_nothing() {
    let mut buffer = Buffer::from_string("same");
    buffer.edit("same");
    assert!(!buffer.can_undo());
    assert!(!buffer.is_dirty());
}

// =============================================================================
// SAVE POINT AND HISTORY
// =============================================================================

#[test]
fn undo_across_save_point_is_dirty_redo_is_clean() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "notes.txt", "draft");

    let mut buffer = Buffer::from_file(&path).unwrap();
    buffer.insert(buffer.len(), "\nmore");
    buffer.save_to(&path).unwrap();
    assert!(!buffer.is_dirty());

    // history survives the save
    assert!(buffer.undo());
    assert_eq!(buffer.text(), "draft");
    assert!(buffer.is_dirty(), "text differs from what is on disk now");

    assert!(buffer.redo());
    assert_eq!(buffer.text(), "draft\nmore");
    assert!(!buffer.is_dirty());
    assert_eq!(fs::read_to_string(&path).unwrap(), "draft\nmore");
}

#[test]
fn only_the_saved_step_is_clean() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("steps.txt");

    let mut buffer = Buffer::new();
    for i in 0..10 {
        // each line ends in a newline, so every line is its own undo group
        buffer.insert(buffer.len(), &format!("step {}\n", i));
        if i == 4 {
            buffer.save_to(&path).unwrap();
        }
    }

    let mut clean_steps = Vec::new();
    let mut step = 10;
    while buffer.undo() {
        step -= 1;
        if !buffer.is_dirty() {
            clean_steps.push(step);
        }
    }
    assert_eq!(clean_steps, vec![5]);
    assert!(buffer.is_empty());
    assert!(buffer.is_dirty(), "the empty start is not what was saved");

    while buffer.redo() {}
    assert!(buffer.is_dirty());
    assert_eq!(buffer.line_count(), 11);
}

#[test]
fn new_edit_after_undo_drops_redo_but_keeps_snapshot() {
    let mut buffer = Buffer::from_string("base");
    buffer.insert(4, "!");
    assert!(buffer.undo());
    assert!(!buffer.is_dirty());

    buffer.insert(0, ">");
    assert!(!buffer.redo());
    assert_eq!(buffer.text(), ">base");
    assert_eq!(buffer.saved_snapshot(), Some("base"));

    buffer.delete(0, 1);
    assert!(!buffer.is_dirty());
}

#[test]
fn unsaved_diff_follows_the_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "list.txt", "milk\neggs\n");

    let mut buffer = Buffer::from_file(&path).unwrap();
    assert!(buffer.unsaved_diff().is_none());

    buffer.insert(buffer.len(), "bread\n");
    let diff = buffer.unsaved_diff().unwrap();
    assert!(diff.contains("+bread"));
    assert!(diff.contains("list.txt"));

    buffer.save_to(&path).unwrap();
    assert!(buffer.unsaved_diff().is_none());

    assert!(buffer.undo());
    let diff = buffer.unsaved_diff().unwrap();
    assert!(diff.contains("-bread"));
}

// =============================================================================
// UTF-8 BOUNDARY TESTS
// =============================================================================

#[test]
fn utf8_mixed_content_stress() {
    let mixed = "ASCII日本語🦀More ASCII한글";
    let mut buffer = Buffer::from_string(mixed);

    buffer.insert(0, "→");
    buffer.insert(buffer.len(), "←");
    // lands inside '日', snapped back to its start
    buffer.delete("→ASCII".len() + 1, "日".len());
    assert_eq!(buffer.text(), "→ASCII本語🦀More ASCII한글←");

    while buffer.undo() {}
    assert_eq!(buffer.text(), mixed);
    assert!(!buffer.is_dirty());
}

#[test]
fn utf8_retyping_deleted_text_is_clean() {
    let mut buffer = Buffer::from_string("🦀🦀🦀");
    let crab = "🦀".len();
    let removed = buffer.delete(crab, crab);
    assert_eq!(removed, "🦀");
    assert_eq!(buffer.char_count(), 2);
    assert!(buffer.is_dirty());

    buffer.insert(crab, &removed);
    assert_eq!(buffer.text(), "🦀🦀🦀");
    assert!(!buffer.is_dirty());
}

// =============================================================================
// MEMORY AND BOUNDS
// =============================================================================

#[test]
fn empty_buffer_operations() {
    let mut buffer = Buffer::new();

    assert_eq!(buffer.line_count(), 1);
    assert!(!buffer.is_dirty());

    // these should not panic
    assert_eq!(buffer.delete(0, 0), "");
    assert_eq!(buffer.delete(0, 100), "");
    buffer.set_cursor(42);
    assert_eq!(buffer.cursor(), 0);

    assert!(!buffer.undo());
    assert!(!buffer.redo());
    assert!(!buffer.is_dirty());
}

#[test]
fn large_file_edit_in_middle_then_restore() {
    let dir = tempfile::tempdir().unwrap();
    let mut content = String::new();
    for i in 0..100_000 {
        content.push_str(&format!("Line {}\n", i));
    }
    let path = write_file(&dir, "large.txt", &content);

    let mut buffer = Buffer::from_file(&path).unwrap();
    assert_eq!(buffer.line_count(), 100_001);
    assert!(!buffer.is_dirty());

    let offset = content.find("Line 50000\n").unwrap();
    buffer.insert(offset, "INSERTED\n");
    assert!(buffer.is_dirty());
    let diff = buffer.unsaved_diff().unwrap();
    assert!(diff.contains("+INSERTED"));

    buffer.delete(offset, "INSERTED\n".len());
    assert!(!buffer.is_dirty());
    assert_eq!(buffer.text(), content);
}

// =============================================================================
// SAVE INTEGRITY (requires temp files)
// =============================================================================

#[test]
fn save_then_reopen_round_trip() {
    let temp_dir = tempfile::tempdir().unwrap();
    let file_path = temp_dir.path().join("round_trip.txt");
    // no trailing newline, CRLF inside: written verbatim
    let content = "first line\r\nsecond ✓ line";

    let mut buffer = Buffer::new();
    buffer.edit(content);
    assert!(buffer.is_dirty());
    buffer.save_to(&file_path).unwrap();
    assert!(!buffer.is_dirty());
    assert_eq!(buffer.display_name(), "round_trip.txt");

    let reopened = Buffer::from_file(&file_path).unwrap();
    assert_eq!(reopened.text(), content);
    assert!(!reopened.is_dirty());
    assert_eq!(fs::read(&file_path).unwrap(), content.as_bytes());
}

#[test]
fn rename_then_save_leaves_old_file_alone() {
    let dir = tempfile::tempdir().unwrap();
    let old = write_file(&dir, "old.txt", "keep");
    let new = dir.path().join("new.txt");

    let mut buffer = Buffer::from_file(&old).unwrap();
    buffer.rename(&new);
    assert!(!buffer.is_dirty());
    buffer.insert(0, "copy of ");
    buffer.save_to(&new).unwrap();

    assert_eq!(fs::read_to_string(&old).unwrap(), "keep");
    assert_eq!(fs::read_to_string(&new).unwrap(), "copy of keep");
    assert_eq!(buffer.display_name(), "new.txt");
}

#[test]
fn failed_save_keeps_buffer_dirty() {
    let temp_dir = tempfile::tempdir().unwrap();
    let bad_path = temp_dir.path().join("missing_dir").join("file.txt");

    let mut buffer = Buffer::from_string("saved");
    buffer.insert(0, "un");
    assert!(buffer.save_to(&bad_path).is_err());
    assert!(buffer.is_dirty());
    assert!(buffer.path().is_none());
    assert_eq!(buffer.saved_snapshot(), Some("saved"));
}
