use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

use super::actions::Action;
use super::collaborators::{FileDialog, NoteEditor, PanelHost, PreviewDisplay};
use super::open_file::{OpenFileFlow, OpenFilePrompt};
use super::view_mode::ViewModeController;
use crate::Config;
use crate::markdown::escape_html;
use crate::preview::{PreviewError, PreviewPipeline, PreviewState};

/// The main application window: editor, preview, note manager and the
/// actions that tie them together
pub struct MainWindow<E, P, H, D> {
    editor: E,
    display: P,
    panels: H,
    dialog: D,
    view: ViewModeController,
    pipeline: PreviewPipeline,
    open_flow: OpenFileFlow,
    preview_output_file: PathBuf,
    preview: Option<PreviewState>,
}

impl<E, P, H, D> MainWindow<E, P, H, D>
where
    E: NoteEditor,
    P: PreviewDisplay,
    H: PanelHost,
    D: FileDialog,
{
    pub fn new(config: &Config, editor: E, display: P, mut panels: H, dialog: D) -> Self {
        let view = ViewModeController::new();
        view.apply(&mut panels);

        Self {
            editor,
            display,
            panels,
            dialog,
            view,
            pipeline: PreviewPipeline::new(config),
            open_flow: OpenFileFlow::new(config),
            preview_output_file: config.preview_output_file.clone(),
            preview: None,
        }
    }

    /// Run the handler for `action`
    pub fn trigger(&mut self, action: Action) -> Result<()> {
        log::debug!("Action triggered: {:?}", action);
        match action {
            Action::Open => {
                self.open_flow.open_file(&mut self.dialog, &mut self.editor)?;
            }
            Action::Preview => {
                self.export_preview(None)?;
            }
            Action::SetViewMode(mode) => self.view.set_mode(mode, &mut self.panels),
            Action::NoteManager(visible) => {
                self.view.set_note_manager_visible(visible, &mut self.panels)
            }
        }
        Ok(())
    }

    /// Flip the note manager, returning the new visibility
    pub fn toggle_note_manager(&mut self) -> bool {
        self.view.toggle_note_manager(&mut self.panels)
    }

    /// Text changed handler: re-render the editor text and show it
    ///
    /// When rendering fails an error page replaces the preview, so a stale
    /// document is never left on screen, and the error is returned.
    ///
    /// A display that cannot show the document is only logged: rendering
    /// succeeded, so the preview state is updated and `Ok` is returned.
    pub fn update_preview(&mut self) -> Result<(), PreviewError> {
        let note_text = self.editor.text();

        match self.pipeline.render(&note_text) {
            Ok(document) => {
                if let Err(e) = self.display.set_html(&document.html, &document.base_url) {
                    log::error!("Failed to display preview: {:#}", e);
                }
                self.preview = Some(PreviewState {
                    note_text,
                    document,
                });
                Ok(())
            }
            Err(err) => {
                log::error!("Failed to render preview: {}", err);
                if let Err(e) = self.display.set_html(&error_page(&err), &blank_url()) {
                    log::error!("Failed to display preview error: {:#}", e);
                }
                self.preview = None;
                Err(err)
            }
        }
    }

    /// Render the current text and write the document to `path`, or to the
    /// configured preview output file. The written document carries a
    /// `<base href>` so it can be opened from anywhere.
    pub fn export_preview(&self, path: Option<&Path>) -> Result<PathBuf> {
        let target = path.unwrap_or(self.preview_output_file.as_path()).to_path_buf();
        let document = self.pipeline.render(&self.editor.text())?;

        fs::write(&target, document.standalone_html())
            .with_context(|| format!("Failed to write preview: {}", target.display()))?;
        log::info!("Preview written to {}", target.display());
        Ok(target)
    }

    /// What an open dialog should show, for hosts that collect the answer
    /// before triggering [`Action::Open`]
    pub fn open_prompt(&self) -> OpenFilePrompt {
        self.open_flow.prompt()
    }

    pub fn view(&self) -> &ViewModeController {
        &self.view
    }

    /// Last successfully rendered preview
    pub fn preview_state(&self) -> Option<&PreviewState> {
        self.preview.as_ref()
    }

    pub fn pipeline(&self) -> &PreviewPipeline {
        &self.pipeline
    }

    pub fn editor(&self) -> &E {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut E {
        &mut self.editor
    }

    pub fn display(&self) -> &P {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut P {
        &mut self.display
    }

    pub fn panels(&self) -> &H {
        &self.panels
    }

    pub fn panels_mut(&mut self) -> &mut H {
        &mut self.panels
    }

    pub fn dialog_mut(&mut self) -> &mut D {
        &mut self.dialog
    }
}

fn blank_url() -> Url {
    Url::parse("about:blank").expect("about:blank is a valid URL")
}

fn error_page(err: &PreviewError) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>Preview unavailable</title></head>\n<body>\n<h1>Preview unavailable</h1>\n<pre>{}</pre>\n</body>\n</html>\n",
        escape_html(&err.to_string())
    )
}
