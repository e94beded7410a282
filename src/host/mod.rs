//! Headless host
//!
//! Terminal implementations of the window's widgets and the session loop
//! that drives them: the editor reads note files, the preview is written to
//! an HTML file, and commands typed on stdin stand in for the menu bar.

pub mod dialog;
pub mod display;
pub mod editor;
pub mod notes;
pub mod panels;
pub mod session;
pub mod watch;

pub use dialog::LineDialog;
#[cfg(feature = "native-dialog")]
pub use dialog::NativeDialog;
pub use display::HtmlFileDisplay;
pub use editor::FileNoteEditor;
pub use notes::NoteTree;
pub use panels::TerminalPanels;
pub use session::{SessionCommand, SessionEvent, run};
pub use watch::NoteWatcher;
