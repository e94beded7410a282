//! Widgets the main window drives.
//!
//! The window owns the logic; the widgets only hold text, show HTML, toggle
//! visibility and ask the user for a file. Hosts implement these traits.

use anyhow::Result;
use std::fmt;
use std::path::{Path, PathBuf};
use url::Url;

/// Handle returned by [`TextChanged::connect`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

/// Listeners notified whenever the editor text changes
#[derive(Default)]
pub struct TextChanged {
    next_id: u64,
    listeners: Vec<(Subscription, Box<dyn FnMut()>)>,
}

impl fmt::Debug for TextChanged {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextChanged")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl TextChanged {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connect(&mut self, listener: impl FnMut() + 'static) -> Subscription {
        let subscription = Subscription(self.next_id);
        self.next_id += 1;
        self.listeners.push((subscription, Box::new(listener)));
        subscription
    }

    /// Returns false when the subscription was already gone
    pub fn disconnect(&mut self, subscription: Subscription) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(id, _)| *id != subscription);
        self.listeners.len() != before
    }

    pub fn emit(&mut self) {
        for (_, listener) in &mut self.listeners {
            listener();
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

/// The text editing widget
pub trait NoteEditor {
    /// Current note text
    fn text(&self) -> String;

    /// Load the file at `path`. The editor emits its text changed
    /// notification once the new text is in place.
    fn open_file_request(&mut self, path: &Path) -> Result<()>;

    fn text_changed(&mut self) -> &mut TextChanged;

    fn on_text_changed(&mut self, listener: impl FnMut() + 'static) -> Subscription
    where
        Self: Sized,
    {
        self.text_changed().connect(listener)
    }
}

/// The preview widget
pub trait PreviewDisplay {
    fn set_html(&mut self, html: &str, base_url: &Url) -> Result<()>;
}

/// Visibility of the editor, preview and note manager panels
pub trait PanelHost {
    fn set_editor_visible(&mut self, visible: bool);
    fn set_preview_visible(&mut self, visible: bool);
    fn set_note_manager_visible(&mut self, visible: bool);
}

/// The open-file dialog
pub trait FileDialog {
    /// Ask the user for a file, starting in `start_dir`. `None` means the
    /// user cancelled.
    fn prompt_open_file(&mut self, title: &str, start_dir: &Path) -> Option<PathBuf>;
}
