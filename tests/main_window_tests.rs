//! Main window behaviour against recording widgets
use anyhow::Result;
use quark::window::{
    FileDialog, NoteEditor, OPEN_DIALOG_TITLE, PanelHost, PreviewDisplay, TextChanged,
};
use quark::{Action, Config, MainWindow, PreviewError, ViewMode};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use url::Url;

#[derive(Default)]
struct RecordingEditor {
    text: String,
    requests: Vec<PathBuf>,
    text_changed: TextChanged,
}

impl NoteEditor for RecordingEditor {
    fn text(&self) -> String {
        self.text.clone()
    }

    fn open_file_request(&mut self, path: &Path) -> Result<()> {
        self.requests.push(path.to_path_buf());
        self.text_changed.emit();
        Ok(())
    }

    fn text_changed(&mut self) -> &mut TextChanged {
        &mut self.text_changed
    }
}

#[derive(Default)]
struct RecordingDisplay {
    shown: Vec<(String, Url)>,
    fail: bool,
}

impl PreviewDisplay for RecordingDisplay {
    fn set_html(&mut self, html: &str, base_url: &Url) -> Result<()> {
        if self.fail {
            anyhow::bail!("display is gone");
        }
        self.shown.push((html.to_string(), base_url.clone()));
        Ok(())
    }
}

#[derive(Default)]
struct RecordingPanels {
    editor: bool,
    preview: bool,
    note_manager: bool,
}

impl PanelHost for RecordingPanels {
    fn set_editor_visible(&mut self, visible: bool) {
        self.editor = visible;
    }

    fn set_preview_visible(&mut self, visible: bool) {
        self.preview = visible;
    }

    fn set_note_manager_visible(&mut self, visible: bool) {
        self.note_manager = visible;
    }
}

#[derive(Default)]
struct ScriptedDialog {
    answer: Option<PathBuf>,
    prompts: Vec<(String, PathBuf)>,
}

impl FileDialog for ScriptedDialog {
    fn prompt_open_file(&mut self, title: &str, start_dir: &Path) -> Option<PathBuf> {
        self.prompts.push((title.to_string(), start_dir.to_path_buf()));
        self.answer.take()
    }
}

type TestWindow = MainWindow<RecordingEditor, RecordingDisplay, RecordingPanels, ScriptedDialog>;

fn test_config(dir: &Path) -> Config {
    let head = dir.join("head.html");
    let foot = dir.join("foot.html");
    fs::write(&head, "<html><head></head><body>").expect("write head");
    fs::write(&foot, "</body></html>").expect("write foot");

    Config {
        start_html_template_file: head,
        end_html_template_file: foot,
        notes_dir: PathBuf::from("/notes"),
        preview_output_file: dir.join("out.html"),
        log_level: "info".to_string(),
        config_file: None,
    }
}

fn window() -> (TempDir, TestWindow) {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = test_config(dir.path());
    let window = MainWindow::new(
        &config,
        RecordingEditor::default(),
        RecordingDisplay::default(),
        RecordingPanels::default(),
        ScriptedDialog::default(),
    );
    (dir, window)
}

#[test]
fn test_starts_in_edit_and_view_mode() {
    let (_dir, window) = window();

    assert_eq!(window.view().mode(), ViewMode::EditAndView);
    assert!(window.panels().editor);
    assert!(window.panels().preview);
    assert!(!window.panels().note_manager);
}

#[test]
fn test_view_modes_set_panels() {
    let (_dir, mut window) = window();

    for (mode, editor, preview) in [
        (ViewMode::ViewOnly, false, true),
        (ViewMode::EditOnly, true, false),
        (ViewMode::EditAndView, true, true),
    ] {
        window.trigger(Action::SetViewMode(mode)).expect("trigger");
        assert_eq!(window.view().mode(), mode);
        assert_eq!(
            (window.panels().editor, window.panels().preview),
            (editor, preview),
            "{mode}"
        );
    }
}

#[test]
fn test_note_manager_toggle_is_an_involution() {
    let (_dir, mut window) = window();
    window
        .trigger(Action::SetViewMode(ViewMode::ViewOnly))
        .expect("trigger");

    let before = window.panels().note_manager;
    assert!(window.toggle_note_manager());
    assert!(!window.toggle_note_manager());

    assert_eq!(window.panels().note_manager, before);
    assert_eq!(window.view().mode(), ViewMode::ViewOnly);
    assert!(!window.panels().editor);
}

#[test]
fn test_note_manager_action_is_independent_of_mode() {
    let (_dir, mut window) = window();

    window.trigger(Action::NoteManager(true)).expect("trigger");
    window
        .trigger(Action::SetViewMode(ViewMode::EditOnly))
        .expect("trigger");

    assert!(window.panels().note_manager);
    assert!(window.view().note_manager_visible());
}

#[test]
fn test_cancelled_open_makes_no_request() {
    let (_dir, mut window) = window();

    window.trigger(Action::Open).expect("open");
    window.dialog_mut().answer = Some(PathBuf::new());
    window.trigger(Action::Open).expect("open");

    assert!(window.editor().requests.is_empty());
}

#[test]
fn test_open_requests_the_chosen_file_once() {
    let (_dir, mut window) = window();
    window.dialog_mut().answer = Some(PathBuf::from("/notes/foo.md"));

    window.trigger(Action::Open).expect("open");

    assert_eq!(
        window.editor().requests,
        vec![PathBuf::from("/notes/foo.md")]
    );
    assert_eq!(
        window.dialog_mut().prompts,
        vec![(OPEN_DIALOG_TITLE.to_string(), PathBuf::from("/notes"))]
    );
}

#[test]
fn test_update_preview_shows_the_rendered_note() {
    let (dir, mut window) = window();
    window.editor_mut().text = "# Hello".to_string();

    window.update_preview().expect("update preview");

    let (html, base_url) = window.display().shown.last().expect("shown");
    assert_eq!(
        html,
        "<html><head></head><body><h1 id=\"hello\">Hello</h1>\n</body></html>"
    );
    assert_eq!(
        *base_url,
        Url::from_file_path(dir.path().join("head.html")).expect("file url")
    );

    let state = window.preview_state().expect("preview state");
    assert_eq!(state.note_text, "# Hello");
    assert_eq!(&state.document.html, html);
}

#[test]
fn test_failed_render_replaces_preview_with_error_page() {
    let (dir, mut window) = window();
    window.editor_mut().text = "first".to_string();
    window.update_preview().expect("update preview");
    assert!(window.preview_state().is_some());

    fs::remove_file(dir.path().join("foot.html")).expect("remove foot");
    let err = window.update_preview().unwrap_err();

    assert!(matches!(err, PreviewError::TemplateRead { .. }));
    assert!(window.preview_state().is_none());

    let (html, base_url) = window.display().shown.last().expect("shown");
    assert!(html.contains("Preview unavailable"));
    assert!(html.contains("foot.html"));
    assert_eq!(base_url.as_str(), "about:blank");
}

#[test]
fn test_open_queues_a_preview_refresh() {
    use std::cell::Cell;
    use std::rc::Rc;

    let (_dir, mut window) = window();
    let refresh_queued = Rc::new(Cell::new(false));
    let queue = refresh_queued.clone();
    window
        .editor_mut()
        .on_text_changed(move || queue.set(true));

    // A cancelled open changes nothing, so nothing is queued
    window.trigger(Action::Open).expect("open");
    assert!(!refresh_queued.get());

    window.dialog_mut().answer = Some(PathBuf::from("/notes/foo.md"));
    window.trigger(Action::Open).expect("open");

    // Drain the queue the way the session loop does
    while refresh_queued.replace(false) {
        window.update_preview().expect("update preview");
    }
    assert_eq!(window.display().shown.len(), 1);
    assert!(window.preview_state().is_some());
}

#[test]
fn test_display_failure_keeps_rendered_state() {
    let (_dir, mut window) = window();
    window.editor_mut().text = "# Kept".to_string();
    window.display_mut().fail = true;

    window.update_preview().expect("render succeeds");

    assert!(window.display().shown.is_empty());
    let state = window.preview_state().expect("preview state");
    assert_eq!(state.note_text, "# Kept");
    assert!(state.document.html.contains("<h1 id=\"kept\">Kept</h1>"));
}

#[test]
fn test_preview_action_writes_output_file() {
    let (dir, mut window) = window();
    window.editor_mut().text = "Some *notes*".to_string();

    window.trigger(Action::Preview).expect("preview");

    let written = fs::read_to_string(dir.path().join("out.html")).expect("read output");
    assert!(written.starts_with("<html><head><base href=\"file://"));
    assert!(written.ends_with("<p>Some <em>notes</em></p>\n</body></html>"));
}

#[test]
fn test_export_preview_to_explicit_path() {
    let (dir, window) = window();
    let target = dir.path().join("elsewhere.html");

    let written = window.export_preview(Some(&target)).expect("export");

    assert_eq!(written, target);
    assert!(target.exists());
    assert!(!dir.path().join("out.html").exists());
}
