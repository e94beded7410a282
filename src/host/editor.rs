//! Editor backed by a note file on disk.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::window::collaborators::{NoteEditor, TextChanged};

/// Holds the text of the open note. Every change emits `text_changed`.
#[derive(Debug, Default)]
pub struct FileNoteEditor {
    path: Option<PathBuf>,
    text: String,
    text_changed: TextChanged,
}

impl FileNoteEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Absolute path of the open note
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.text_changed.emit();
    }

    /// Re-read the open note after it changed on disk. Returns whether the
    /// text changed; identical content emits nothing.
    pub fn reload(&mut self) -> Result<bool> {
        let Some(path) = &self.path else {
            return Ok(false);
        };
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to reload note: {}", path.display()))?;

        if content == self.text {
            return Ok(false);
        }
        log::debug!("Reloaded {}", path.display());
        self.set_text(content);
        Ok(true)
    }
}

impl NoteEditor for FileNoteEditor {
    fn text(&self) -> String {
        self.text.clone()
    }

    fn open_file_request(&mut self, path: &Path) -> Result<()> {
        let absolute = std::path::absolute(path)
            .with_context(|| format!("Failed to resolve note path: {}", path.display()))?;
        let content = fs::read_to_string(&absolute)
            .with_context(|| format!("Failed to open note: {}", absolute.display()))?;

        self.path = Some(absolute);
        self.set_text(content);
        Ok(())
    }

    fn text_changed(&mut self) -> &mut TextChanged {
        &mut self.text_changed
    }
}
