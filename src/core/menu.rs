//! Menu System
//!
//! Menu data model for the File, Edit and View menus. Enablement is not
//! stored: items that act on a selection are greyed out whenever the current
//! buffer has none, computed at the moment the menu is shown.

/// A single menu item (action or separator)
#[derive(Clone, Debug)]
pub enum MenuItem {
    /// Action item with label, command name, optional argument and hotkey hint
    Action {
        label: &'static str,
        command: &'static str,
        arg: Option<&'static str>,
        hotkey: Option<&'static str>,
        needs_selection: bool,
    },
    /// Separator line
    Separator,
}

impl MenuItem {
    pub const fn action(
        label: &'static str,
        command: &'static str,
        hotkey: Option<&'static str>,
    ) -> Self {
        MenuItem::Action {
            label,
            command,
            arg: None,
            hotkey,
            needs_selection: false,
        }
    }

    /// An action that is only enabled while text is selected
    pub const fn selection_action(
        label: &'static str,
        command: &'static str,
        hotkey: Option<&'static str>,
    ) -> Self {
        MenuItem::Action {
            label,
            command,
            arg: None,
            hotkey,
            needs_selection: true,
        }
    }

    /// An action that passes a fixed argument to its command
    pub const fn with_arg(label: &'static str, command: &'static str, arg: &'static str) -> Self {
        MenuItem::Action {
            label,
            command,
            arg: Some(arg),
            hotkey: None,
            needs_selection: false,
        }
    }

    pub const fn separator() -> Self {
        MenuItem::Separator
    }

    /// Whether the item can be chosen right now
    pub fn is_enabled(&self, has_selection: bool) -> bool {
        match self {
            MenuItem::Action {
                needs_selection, ..
            } => !needs_selection || has_selection,
            MenuItem::Separator => false,
        }
    }
}

/// One rendered menu line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedItem {
    pub label: String,
    pub hotkey: Option<&'static str>,
    pub enabled: bool,
    pub is_separator: bool,
}

/// A dropdown menu (column of MenuItems)
#[derive(Clone, Debug)]
pub struct Menu {
    pub title: &'static str,
    pub items: Vec<MenuItem>,
}

impl Menu {
    pub fn new(title: &'static str, items: Vec<MenuItem>) -> Self {
        Self { title, items }
    }

    /// Render data for all items given the current selection state
    pub fn render_items(&self, has_selection: bool) -> Vec<RenderedItem> {
        self.items
            .iter()
            .map(|item| match item {
                MenuItem::Action { label, hotkey, .. } => RenderedItem {
                    label: label.to_string(),
                    hotkey: *hotkey,
                    enabled: item.is_enabled(has_selection),
                    is_separator: false,
                },
                MenuItem::Separator => RenderedItem {
                    label: "---".to_string(),
                    hotkey: None,
                    enabled: false,
                    is_separator: true,
                },
            })
            .collect()
    }

    /// Command and argument behind the `n`th item (separators count), if enabled
    pub fn command_at(
        &self,
        n: usize,
        has_selection: bool,
    ) -> Option<(&'static str, Option<&'static str>)> {
        match self.items.get(n) {
            Some(item @ MenuItem::Action { command, arg, .. }) if item.is_enabled(has_selection) => {
                Some((*command, *arg))
            }
            _ => None,
        }
    }
}

/// The menu bar containing all top-level menus
#[derive(Clone, Debug)]
pub struct MenuBar {
    pub menus: Vec<Menu>,
}

impl MenuBar {
    pub fn new() -> Self {
        Self {
            menus: vec![Self::file_menu(), Self::edit_menu(), Self::view_menu()],
        }
    }

    fn file_menu() -> Menu {
        Menu::new(
            "File",
            vec![
                MenuItem::action("New tab", "new-tab", Some("Ctrl+N")),
                MenuItem::action("Open", "open-file", Some("Ctrl+O")),
                MenuItem::action("Save", "save", Some("Ctrl+S")),
                MenuItem::action("Save As", "save-as", Some("Ctrl+Shift+S")),
                MenuItem::action("Save All", "save-all", Some("Ctrl+A")),
                MenuItem::separator(),
                MenuItem::action("Close tab", "close-tab", Some("Ctrl+W")),
                MenuItem::action("Close Window", "close-window", Some("Ctrl+Shift+W")),
                MenuItem::separator(),
                MenuItem::action("Exit", "exit", Some("Ctrl+Q")),
            ],
        )
    }

    fn edit_menu() -> Menu {
        Menu::new(
            "Edit",
            vec![
                MenuItem::action("Undo", "undo", Some("Ctrl+Z")),
                MenuItem::action("Redo", "redo", Some("Ctrl+Y")),
                MenuItem::separator(),
                MenuItem::selection_action("Copy", "copy", Some("Ctrl+C")),
                MenuItem::selection_action("Cut", "cut", Some("Ctrl+X")),
                MenuItem::action("Paste", "paste", Some("Ctrl+V")),
                MenuItem::selection_action("Delete", "delete", Some("Del")),
                MenuItem::separator(),
                MenuItem::action("Explain file", "explain", None),
                MenuItem::separator(),
                MenuItem::with_arg("Font: Arial", "set-font", "Arial"),
                MenuItem::with_arg("Font: Times New Roman", "set-font", "Times New Roman"),
                MenuItem::with_arg("Font: Courier New", "set-font", "Courier New"),
                MenuItem::with_arg("Font Size: 10", "set-font-size", "10"),
                MenuItem::with_arg("Font Size: 12", "set-font-size", "12"),
                MenuItem::with_arg("Font Size: 14", "set-font-size", "14"),
            ],
        )
    }

    fn view_menu() -> Menu {
        Menu::new(
            "View",
            vec![
                MenuItem::action("Status Bar", "toggle-status-bar", None),
                MenuItem::action("Word Wrap", "toggle-word-wrap", None),
            ],
        )
    }

    /// Find a menu by title, ignoring case
    pub fn menu(&self, title: &str) -> Option<&Menu> {
        self.menus
            .iter()
            .find(|m| m.title.eq_ignore_ascii_case(title))
    }
}

impl Default for MenuBar {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enabled_labels(menu: &Menu, has_selection: bool) -> Vec<String> {
        menu.render_items(has_selection)
            .into_iter()
            .filter(|i| i.enabled)
            .map(|i| i.label)
            .collect()
    }

    #[test]
    fn test_copy_cut_delete_need_selection() {
        let bar = MenuBar::new();
        let edit = bar.menu("edit").unwrap();

        let without = enabled_labels(edit, false);
        assert!(without.contains(&"Undo".to_string()));
        assert!(without.contains(&"Paste".to_string()));
        assert!(!without.contains(&"Copy".to_string()));
        assert!(!without.contains(&"Cut".to_string()));
        assert!(!without.contains(&"Delete".to_string()));

        let with = enabled_labels(edit, true);
        assert!(with.contains(&"Copy".to_string()));
        assert!(with.contains(&"Cut".to_string()));
        assert!(with.contains(&"Delete".to_string()));
    }

    #[test]
    fn test_command_at_respects_enablement() {
        let bar = MenuBar::new();
        let edit = bar.menu("Edit").unwrap();
        assert_eq!(edit.command_at(3, false), None);
        assert_eq!(edit.command_at(3, true), Some(("copy", None)));
        assert_eq!(edit.command_at(2, true), None); // separator
    }

    #[test]
    fn test_font_items_carry_arguments() {
        let bar = MenuBar::new();
        let edit = bar.menu("Edit").unwrap();
        let last = edit.items.len() - 1;
        assert_eq!(edit.command_at(last, false), Some(("set-font-size", Some("14"))));
    }

    #[test]
    fn test_file_menu_lists_every_file_command() {
        let bar = MenuBar::new();
        let file = bar.menu("File").unwrap();
        let commands: Vec<_> = (0..file.items.len())
            .filter_map(|i| file.command_at(i, false).map(|(c, _)| c))
            .collect();
        assert_eq!(
            commands,
            vec![
                "new-tab",
                "open-file",
                "save",
                "save-as",
                "save-all",
                "close-tab",
                "close-window",
                "exit"
            ]
        );
    }
}
