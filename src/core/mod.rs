//! This module constitutes the headless editing core of tabnote.
//! It manages the open buffers and their unsaved-changes protocol, view
//! settings, command dispatch, and the background explain helper.

pub mod app;
pub mod buffer;
pub mod buffer_set;
pub mod clipboard;
pub mod command;
pub mod commands;
pub mod diff;
pub mod dispatcher;
pub mod error;
pub mod helper;
pub mod id;
pub mod menu;
pub mod prompt;
pub mod undo_group;
pub mod utf8;
pub mod view;
