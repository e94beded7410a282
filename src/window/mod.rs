//! Main Window Shell
//!
//! Wires the editor, the preview, the note manager and the menu actions
//! together. The widgets themselves are traits in [`collaborators`].

pub mod actions;
pub mod collaborators;
pub mod main_window;
pub mod open_file;
pub mod view_mode;

pub use actions::{Action, MENU, MenuItem, find_menu_item};
pub use collaborators::{
    FileDialog, NoteEditor, PanelHost, PreviewDisplay, Subscription, TextChanged,
};
pub use main_window::MainWindow;
pub use open_file::{OPEN_DIALOG_TITLE, OpenFileFlow, OpenFilePrompt};
pub use view_mode::{PanelVisibility, ViewMode, ViewModeController};
