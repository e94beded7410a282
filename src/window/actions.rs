//! Menu and toolbar actions.

use super::view_mode::ViewMode;

/// Every action the main window handles. Each maps to exactly one handler in
/// [`MainWindow::trigger`](super::MainWindow::trigger).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// File > Open
    Open,
    /// File > Preview: write the rendered document to the preview output file
    Preview,
    /// View > View Mode / Edit Mode / Edit/View Mode
    SetViewMode(ViewMode),
    /// View > Note Manager (checkable)
    NoteManager(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Menu {
    File,
    View,
}

/// What a menu entry does when activated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entry {
    Open,
    Preview,
    Mode(ViewMode),
    /// Checkable
    NoteManager,
}

/// One entry of the menu bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuItem {
    pub menu: Menu,
    pub label: &'static str,
    /// Word typed in the terminal session
    pub command: &'static str,
    pub shortcut: Option<&'static str>,
    /// Separator drawn above this item
    pub separator_before: bool,
    pub entry: Entry,
}

const fn item(menu: Menu, label: &'static str, command: &'static str, entry: Entry) -> MenuItem {
    MenuItem {
        menu,
        label,
        command,
        shortcut: None,
        separator_before: false,
        entry,
    }
}

/// The menu bar, in display order
pub const MENU: &[MenuItem] = &[
    MenuItem {
        shortcut: Some("Ctrl+O"),
        ..item(Menu::File, "Open", "open", Entry::Open)
    },
    MenuItem {
        separator_before: true,
        ..item(Menu::File, "Preview", "preview", Entry::Preview)
    },
    item(Menu::View, "View Mode", "view", Entry::Mode(ViewMode::ViewOnly)),
    item(Menu::View, "Edit Mode", "edit", Entry::Mode(ViewMode::EditOnly)),
    item(
        Menu::View,
        "Edit/View Mode",
        "both",
        Entry::Mode(ViewMode::EditAndView),
    ),
    MenuItem {
        separator_before: true,
        ..item(Menu::View, "Note Manager", "notes", Entry::NoteManager)
    },
];

/// Look up a menu entry by its label or command word
pub fn find_menu_item(name: &str) -> Option<&'static MenuItem> {
    let name = name.trim();
    MENU.iter().find(|item| {
        item.command.eq_ignore_ascii_case(name) || item.label.eq_ignore_ascii_case(name)
    })
}

impl MenuItem {
    /// The action this entry triggers. Checkable entries flip `checked`.
    pub fn action(&self, checked: bool) -> Action {
        match self.entry {
            Entry::Open => Action::Open,
            Entry::Preview => Action::Preview,
            Entry::Mode(mode) => Action::SetViewMode(mode),
            Entry::NoteManager => Action::NoteManager(!checked),
        }
    }
}
