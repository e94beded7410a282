//! Watches the open note so edits made in another editor reach the preview.

use anyhow::{Context, Result};
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc;

use super::session::SessionEvent;

pub struct NoteWatcher {
    watcher: RecommendedWatcher,
    watched_dir: Option<PathBuf>,
}

impl NoteWatcher {
    /// Create a watcher that reports changes on `tx`
    pub fn new(tx: mpsc::UnboundedSender<SessionEvent>) -> Result<Self> {
        let watcher = RecommendedWatcher::new(
            move |res: Result<Event, notify::Error>| match res {
                Ok(event) => {
                    if let EventKind::Create(_) | EventKind::Modify(_) = event.kind {
                        for path in event.paths {
                            let _ = tx.send(SessionEvent::NoteChanged(path));
                        }
                    }
                }
                Err(e) => {
                    let _ = tx.send(SessionEvent::WatcherError(e));
                }
            },
            Config::default().with_poll_interval(Duration::from_secs(1)),
        )
        .context("Failed to create note watcher")?;

        Ok(Self {
            watcher,
            watched_dir: None,
        })
    }

    /// Watch the directory holding `note`. Editors often replace the file
    /// rather than write it in place, so the file itself is not watched.
    pub fn watch_note(&mut self, note: &Path) -> Result<()> {
        let dir = note
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or(Path::new("."))
            .to_path_buf();

        if self.watched_dir.as_ref() == Some(&dir) {
            return Ok(());
        }
        if let Some(previous) = self.watched_dir.take() {
            if let Err(e) = self.watcher.unwatch(&previous) {
                log::warn!("Failed to stop watching {}: {}", previous.display(), e);
            }
        }

        self.watcher
            .watch(&dir, RecursiveMode::NonRecursive)
            .with_context(|| format!("Failed to watch {}", dir.display()))?;
        log::debug!("Watching {}", dir.display());
        self.watched_dir = Some(dir);
        Ok(())
    }

    pub fn watched_dir(&self) -> Option<&Path> {
        self.watched_dir.as_deref()
    }
}
