//! Open-file flow: dialog, then hand the chosen path to the editor.

use anyhow::Result;
use std::path::{Path, PathBuf};

use super::collaborators::{FileDialog, NoteEditor};
use crate::Config;

/// Title shown on the open dialog
pub const OPEN_DIALOG_TITLE: &str = "Quark: Open File";

/// What the dialog should show
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenFilePrompt {
    pub title: &'static str,
    pub start_dir: PathBuf,
}

#[derive(Debug, Clone)]
pub struct OpenFileFlow {
    notes_dir: PathBuf,
}

impl OpenFileFlow {
    pub fn new(config: &Config) -> Self {
        Self::with_notes_dir(config.notes_dir.clone())
    }

    pub fn with_notes_dir(notes_dir: impl Into<PathBuf>) -> Self {
        Self {
            notes_dir: notes_dir.into(),
        }
    }

    /// Dialog title and the absolute notes directory to start in
    pub fn prompt(&self) -> OpenFilePrompt {
        let start_dir = std::path::absolute(&self.notes_dir).unwrap_or_else(|e| {
            log::warn!(
                "Could not resolve notes directory {}: {}",
                self.notes_dir.display(),
                e
            );
            self.notes_dir.clone()
        });

        OpenFilePrompt {
            title: OPEN_DIALOG_TITLE,
            start_dir,
        }
    }

    /// Forward a dialog answer to the editor. An absent or empty path means the
    /// user cancelled and nothing happens. Returns whether a file was requested.
    pub fn complete(&self, answer: Option<&Path>, editor: &mut impl NoteEditor) -> Result<bool> {
        match answer {
            Some(path) if !path.as_os_str().is_empty() => {
                log::info!("Opening {}", path.display());
                editor.open_file_request(path)?;
                Ok(true)
            }
            _ => {
                log::debug!("Open dialog cancelled");
                Ok(false)
            }
        }
    }

    /// Ask `dialog` for a file and open it in `editor`
    pub fn open_file(
        &self,
        dialog: &mut impl FileDialog,
        editor: &mut impl NoteEditor,
    ) -> Result<bool> {
        let prompt = self.prompt();
        let answer = dialog.prompt_open_file(prompt.title, &prompt.start_dir);
        self.complete(answer.as_deref(), editor)
    }
}
