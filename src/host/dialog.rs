//! Open-file dialogs for the terminal session.

use std::path::{Path, PathBuf};

use crate::window::collaborators::FileDialog;

/// Dialog answered by a line the user typed. The session collects the line
/// first, then triggers the open action, which takes the pending answer.
#[derive(Debug, Default, Clone)]
pub struct LineDialog {
    pending: Option<String>,
}

impl LineDialog {
    /// The dialog cannot ask on its own; the session prompts for it
    pub const PROMPTS_ITSELF: bool = false;

    pub fn new() -> Self {
        Self::default()
    }

    /// Answer for the next prompt. `None` or a blank line cancels.
    pub fn answer(&mut self, line: Option<String>) {
        self.pending = line;
    }
}

impl FileDialog for LineDialog {
    fn prompt_open_file(&mut self, title: &str, start_dir: &Path) -> Option<PathBuf> {
        let line = self.pending.take()?;
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        log::debug!("{}: '{}' from {}", title, line, start_dir.display());
        let path = Path::new(line);
        if path.is_absolute() {
            Some(path.to_path_buf())
        } else {
            Some(start_dir.join(path))
        }
    }
}

/// The platform file picker
#[cfg(feature = "native-dialog")]
#[derive(Debug, Default, Clone)]
pub struct NativeDialog {
    pending: Option<String>,
}

#[cfg(feature = "native-dialog")]
impl NativeDialog {
    pub const PROMPTS_ITSELF: bool = true;

    pub fn new() -> Self {
        Self::default()
    }

    /// A path typed alongside the command skips the picker
    pub fn answer(&mut self, line: Option<String>) {
        self.pending = line;
    }
}

#[cfg(feature = "native-dialog")]
impl FileDialog for NativeDialog {
    fn prompt_open_file(&mut self, title: &str, start_dir: &Path) -> Option<PathBuf> {
        if let Some(line) = self.pending.take() {
            return LineDialog { pending: Some(line) }.prompt_open_file(title, start_dir);
        }

        rfd::FileDialog::new()
            .set_title(title)
            .set_directory(start_dir)
            .add_filter("Markdown files", &["md", "markdown"])
            .add_filter("All files", &["*"])
            .pick_file()
    }
}
