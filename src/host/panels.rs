//! Panel visibility for the terminal session.

use std::io::Write;

use super::notes::NoteTree;
use crate::window::collaborators::PanelHost;

/// Records which panels are visible. Showing the note manager prints the
/// note listing to `out`.
#[derive(Debug)]
pub struct TerminalPanels<W: Write> {
    editor: bool,
    preview: bool,
    note_manager: bool,
    notes: NoteTree,
    out: W,
}

impl<W: Write> TerminalPanels<W> {
    pub fn new(notes: NoteTree, out: W) -> Self {
        Self {
            editor: false,
            preview: false,
            note_manager: false,
            notes,
            out,
        }
    }

    pub fn editor_visible(&self) -> bool {
        self.editor
    }

    pub fn preview_visible(&self) -> bool {
        self.preview
    }

    pub fn note_manager_visible(&self) -> bool {
        self.note_manager
    }

    pub fn notes(&self) -> &NoteTree {
        &self.notes
    }

    pub fn out(&mut self) -> &mut W {
        &mut self.out
    }

    /// One-line summary, e.g. `editor: on  preview: off  notes: off`
    pub fn status(&self) -> String {
        fn flag(visible: bool) -> &'static str {
            if visible { "on" } else { "off" }
        }
        format!(
            "editor: {}  preview: {}  notes: {}",
            flag(self.editor),
            flag(self.preview),
            flag(self.note_manager)
        )
    }
}

impl<W: Write> PanelHost for TerminalPanels<W> {
    fn set_editor_visible(&mut self, visible: bool) {
        self.editor = visible;
    }

    fn set_preview_visible(&mut self, visible: bool) {
        self.preview = visible;
    }

    fn set_note_manager_visible(&mut self, visible: bool) {
        let shown = visible && !self.note_manager;
        self.note_manager = visible;

        if shown {
            let listing = self.notes.render();
            if let Err(e) = self.out.write_all(listing.as_bytes()) {
                log::warn!("Failed to print note listing: {}", e);
            }
        }
    }
}
