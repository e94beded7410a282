//! Listing of the notes directory, shown by the note manager.

use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

const NOTE_EXTENSIONS: &[&str] = &["md", "markdown"];

#[derive(Debug, Clone)]
pub struct NoteTree {
    root: PathBuf,
}

impl NoteTree {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Markdown files under the root, relative to it and sorted. Hidden files
    /// and directories are skipped. A missing root lists nothing.
    pub fn entries(&self) -> Vec<PathBuf> {
        if !self.root.is_dir() {
            log::debug!("Notes directory {} does not exist", self.root.display());
            return Vec::new();
        }

        let mut notes: Vec<PathBuf> = WalkDir::new(&self.root)
            .follow_links(true)
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry))
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    log::warn!("Skipping unreadable note entry: {}", e);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file() && is_note(entry.path()))
            .filter_map(|entry| {
                entry
                    .path()
                    .strip_prefix(&self.root)
                    .ok()
                    .map(Path::to_path_buf)
            })
            .collect();

        notes.sort();
        notes
    }

    /// Listing printed when the note manager is shown
    pub fn render(&self) -> String {
        let entries = self.entries();
        let mut out = format!("Notes in {}:\n", self.root.display());
        if entries.is_empty() {
            out.push_str("  (no notes)\n");
        }
        for entry in entries {
            out.push_str(&format!("  {}\n", entry.display()));
        }
        out
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}

fn is_note(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            NOTE_EXTENSIONS
                .iter()
                .any(|note_ext| ext.eq_ignore_ascii_case(note_ext))
        })
}
