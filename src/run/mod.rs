//! Interactive line shell for tabnote.
//!
//! Each turn prints the tab strip and status line, reads one line, and either
//! runs it as a command (`:save`, `:open-file notes.txt`, `:select 2`, ...)
//! or inserts it into the current tab.

mod prompter;

use crossterm::queue;
use crossterm::style::{Print, PrintStyledContent, Stylize};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{info, warn};

use crate::config::Config;
use crate::core::app::EditorApp;
use crate::core::dispatcher::{self, DispatchResult};
use crate::core::utf8::truncate_to_width;

pub use prompter::{LinePrompter, LineSource, stdin_lines};

/// Widest a tab label may get in the strip
const TAB_LABEL_WIDTH: usize = 24;

const SHELL_HELP: &str = "\
:COMMAND [ARG]     run a command (new-tab, open-file, save, save-as, save-all,
                   close-tab, close-window, exit, undo, redo, copy, cut, paste,
                   delete, select-all, find, toggle-word-wrap, toggle-status-bar,
                   set-font, set-font-size, next-tab, previous-tab,
                   move-tab-left, move-tab-right, explain, list-tabs)
:select N          switch to tab N
:drag FROM TO      move tab FROM to position TO
:goto BYTE         move the cursor
:mark BYTE         select from BYTE to the cursor
:show              print the current tab
:menu NAME [N]     show a menu, or choose its Nth item
:key KEYS          press a key binding, e.g. :key Ctrl+S
:wait              wait for explain requests to finish
::TEXT             insert a line starting with ':'
TEXT               insert TEXT and a newline at the cursor";

/// What the shell does after a line
#[derive(Debug, PartialEq)]
pub enum LineOutcome {
    Continue(Option<String>),
    Exit,
}

/// Run the shell on stdin/stdout until the session ends.
pub fn run_interactive(files: &[PathBuf], config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = EditorApp::from_config(config, Box::new(LinePrompter::stdio()));
    let mut stdout = io::stdout();
    for err in app.open_startup_files(files) {
        warn!(error = %err, "could not open file");
        writeln!(stdout, "{}", err)?;
    }
    run_shell(&mut app, stdin_lines(), &mut stdout)
}

/// Shell loop over any line source and output.
pub fn run_shell<W: Write>(
    app: &mut EditorApp,
    mut next_line: LineSource,
    out: &mut W,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        for message in app.poll_helpers() {
            writeln!(out, "{}", message)?;
        }
        render_tab_strip(app, out)?;
        if let Some(status) = app.status_line() {
            writeln!(out, "{}", status)?;
        }
        write!(out, "> ")?;
        out.flush()?;

        let Some(line) = next_line() else {
            return finish_on_closed_input(app, out);
        };
        let line = line.trim_end_matches(['\r', '\n']);
        match handle_line(app, line) {
            LineOutcome::Continue(Some(message)) => writeln!(out, "{}", message)?,
            LineOutcome::Continue(None) => {}
            LineOutcome::Exit => {
                info!("session ended");
                return Ok(());
            }
        }
    }
}

/// Input is gone, so nobody can answer a save prompt. Try a normal exit and
/// discard whatever it could not settle.
fn finish_on_closed_input<W: Write>(
    app: &mut EditorApp,
    out: &mut W,
) -> Result<(), Box<dyn std::error::Error>> {
    writeln!(out)?;
    if dispatcher::dispatch(app, "exit", None) != DispatchResult::Exit {
        warn!("input closed with unsaved changes; discarding them");
        writeln!(out, "Input closed; unsaved changes discarded")?;
        app.cancel_all_helpers();
    }
    info!("session ended");
    Ok(())
}

/// Act on one input line
pub fn handle_line(app: &mut EditorApp, line: &str) -> LineOutcome {
    if let Some(literal) = line.strip_prefix("::") {
        insert_line(app, &format!(":{}", literal));
        return LineOutcome::Continue(None);
    }
    let Some(command_line) = line.strip_prefix(':') else {
        insert_line(app, line);
        return LineOutcome::Continue(None);
    };

    let command_line = command_line.trim();
    let (name, arg) = match command_line.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, Some(rest.trim())),
        None => (command_line, None),
    };

    let message = match name {
        "help" => Some(SHELL_HELP.to_string()),
        "select" => select_tab(app, arg),
        "drag" => drag_tab(app, arg),
        "goto" => move_cursor(app, arg),
        "mark" => mark_selection(app, arg),
        "show" => app.active_buffer().map(|b| b.text()),
        "menu" => return menu(app, arg),
        "key" => match arg {
            Some(keys) => return from_dispatch(dispatcher::dispatch_key(app, keys), keys),
            None => Some(":key needs a key sequence".to_string()),
        },
        "wait" => Some(app.wait_for_helpers().join("\n")).filter(|m| !m.is_empty()),
        _ => return from_dispatch(dispatcher::dispatch(app, name, arg), name),
    };
    LineOutcome::Continue(message)
}

fn from_dispatch(result: DispatchResult, what: &str) -> LineOutcome {
    match result {
        DispatchResult::Success => LineOutcome::Continue(None),
        DispatchResult::Info(message) => LineOutcome::Continue(Some(message)),
        DispatchResult::NotHandled => {
            LineOutcome::Continue(Some(format!("Unknown command: {} (try :help)", what)))
        }
        DispatchResult::Exit => LineOutcome::Exit,
    }
}

fn insert_line(app: &mut EditorApp, text: &str) {
    if let Some(buffer) = app.active_buffer_mut() {
        buffer.insert_at_cursor(&format!("{}\n", text));
    }
}

fn parse_numbers(arg: Option<&str>) -> Vec<usize> {
    arg.unwrap_or_default()
        .split_whitespace()
        .map_while(|n| n.parse().ok())
        .collect()
}

fn select_tab(app: &mut EditorApp, arg: Option<&str>) -> Option<String> {
    match parse_numbers(arg).as_slice() {
        [n] => app
            .buffers
            .select(n.wrapping_sub(1))
            .err()
            .map(|e| e.to_string()),
        _ => Some(":select needs a tab number".to_string()),
    }
}

fn drag_tab(app: &mut EditorApp, arg: Option<&str>) -> Option<String> {
    match parse_numbers(arg).as_slice() {
        [from, to] if *from > 0 && *to > 0 => {
            app.buffers.drag(from - 1, to - 1);
            None
        }
        _ => Some(":drag needs two tab numbers".to_string()),
    }
}

fn move_cursor(app: &mut EditorApp, arg: Option<&str>) -> Option<String> {
    let &[pos] = parse_numbers(arg).as_slice() else {
        return Some(":goto needs a byte offset".to_string());
    };
    let buffer = app.active_buffer_mut()?;
    buffer.set_anchor(None);
    buffer.set_cursor(pos);
    None
}

fn mark_selection(app: &mut EditorApp, arg: Option<&str>) -> Option<String> {
    let &[pos] = parse_numbers(arg).as_slice() else {
        return Some(":mark needs a byte offset".to_string());
    };
    app.active_buffer_mut()?.set_anchor(Some(pos));
    None
}

fn menu(app: &mut EditorApp, arg: Option<&str>) -> LineOutcome {
    let arg = arg.unwrap_or_default();
    let (title, choice) = match arg.rsplit_once(char::is_whitespace) {
        Some((title, n)) if n.parse::<usize>().is_ok() => (title.trim(), n.parse::<usize>().ok()),
        _ => (arg.trim(), None),
    };
    let has_selection = app.active_buffer().is_some_and(|b| b.has_selection());
    let Some(menu) = app.menu_bar.menu(title).cloned() else {
        let titles: Vec<_> = app.menu_bar.menus.iter().map(|m| m.title).collect();
        return LineOutcome::Continue(Some(format!("Menus: {}", titles.join(", "))));
    };

    match choice {
        Some(n) => match menu.command_at(n.wrapping_sub(1), has_selection) {
            Some((command, command_arg)) => {
                from_dispatch(dispatcher::dispatch(app, command, command_arg), command)
            }
            None => LineOutcome::Continue(Some(format!(
                "{} item {} is not available",
                menu.title, n
            ))),
        },
        None => {
            let mut listing = format!("{}:\n", menu.title);
            for (i, item) in menu.render_items(has_selection).iter().enumerate() {
                if item.is_separator {
                    listing.push_str("     ---\n");
                    continue;
                }
                let state = if item.enabled { " " } else { "-" };
                listing.push_str(&format!(
                    "{:>3}{} {:<24} {}\n",
                    i + 1,
                    state,
                    item.label,
                    item.hotkey.unwrap_or_default()
                ));
            }
            LineOutcome::Continue(Some(listing.trim_end().to_string()))
        }
    }
}

/// Print the tab strip; the current tab is highlighted, dirty tabs carry `*`
pub fn render_tab_strip<W: Write>(app: &EditorApp, out: &mut W) -> io::Result<()> {
    let current = app.buffers.current_index();
    for (i, (id, buffer)) in app.buffers.iter().enumerate() {
        let mut label = format!(
            " {} {}",
            i + 1,
            truncate_to_width(&buffer.display_name(), TAB_LABEL_WIDTH)
        );
        if buffer.is_dirty() {
            label.push('*');
        }
        if app.pending_explains.contains_key(&id) {
            label.push_str(" …");
        }
        label.push(' ');
        if i == current {
            queue!(out, PrintStyledContent(label.reverse().bold()))?;
        } else {
            queue!(out, Print(label))?;
        }
        queue!(out, Print("|"))?;
    }
    queue!(out, Print("\n"))?;
    out.flush()
}
