use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::io::{self, BufRead, Write};
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};
use std::thread;
use tokio::sync::mpsc;

#[cfg(not(feature = "native-dialog"))]
use super::dialog::LineDialog;
#[cfg(feature = "native-dialog")]
use super::dialog::NativeDialog;
use super::display::HtmlFileDisplay;
use super::editor::FileNoteEditor;
use super::notes::NoteTree;
use super::panels::TerminalPanels;
use super::watch::NoteWatcher;
use crate::config::{Args, Command, default_template_dir};
use crate::preview::{PreviewPipeline, write_default_templates};
use crate::window::actions::Entry;
use crate::window::{Action, MENU, MainWindow, NoteEditor, ViewMode, find_menu_item};
use crate::Config;

#[cfg(not(feature = "native-dialog"))]
pub type SessionDialog = LineDialog;
#[cfg(feature = "native-dialog")]
pub type SessionDialog = NativeDialog;

pub type SessionWindow =
    MainWindow<FileNoteEditor, HtmlFileDisplay, TerminalPanels<io::Stdout>, SessionDialog>;

/// Everything the session loop reacts to
#[derive(Debug)]
pub enum SessionEvent {
    /// The editor text changed
    TextChanged,
    /// A file next to the open note was created or modified
    NoteChanged(PathBuf),
    WatcherError(notify::Error),
    /// A line typed by the user
    Command(String),
    /// Standard input reached end of file
    InputClosed,
    Interrupted,
}

/// A parsed session command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Mode(ViewMode),
    NoteManager,
    Open(Option<String>),
    Preview(Option<PathBuf>),
    Help,
    Quit,
}

impl SessionCommand {
    /// Parse a command line. A blank line is `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, Some(rest.trim()).filter(|rest| !rest.is_empty())),
            None => (line, None),
        };

        match word.to_ascii_lowercase().as_str() {
            "help" | "?" => return Ok(Some(Self::Help)),
            "quit" | "exit" | "q" => return Ok(Some(Self::Quit)),
            _ => {}
        }

        // Full labels such as "Edit Mode" work too
        let (item, rest) = match find_menu_item(line) {
            Some(item) => (item, None),
            None => match find_menu_item(word) {
                Some(item) => (item, rest),
                None => return Err(format!("Unknown command '{word}', type 'help'")),
            },
        };

        match (item.entry, rest) {
            (Entry::Open, rest) => Ok(Some(Self::Open(rest.map(str::to_string)))),
            (Entry::Preview, rest) => Ok(Some(Self::Preview(rest.map(PathBuf::from)))),
            (Entry::Mode(mode), None) => Ok(Some(Self::Mode(mode))),
            (Entry::NoteManager, None) => Ok(Some(Self::NoteManager)),
            (_, Some(_)) => Err(format!("'{}' takes no argument", item.command)),
        }
    }
}

/// Text printed by the `help` command
pub fn help_text() -> String {
    let mut out = String::from("Commands:\n");
    for item in MENU {
        let usage = match item.entry {
            Entry::Open => format!("{} [path]", item.command),
            Entry::Preview => format!("{} [path]", item.command),
            _ => item.command.to_string(),
        };
        let shortcut = item
            .shortcut
            .map(|shortcut| format!(" ({shortcut})"))
            .unwrap_or_default();
        out.push_str(&format!(
            "  {:<16} {:?} > {}{}\n",
            usage, item.menu, item.label, shortcut
        ));
    }
    out.push_str(&format!("  {:<16} Show this help\n", "help"));
    out.push_str(&format!("  {:<16} Leave the session\n", "quit"));
    out
}

/// Start Quark from the command line
pub async fn run() -> Result<()> {
    let args = Args::parse();
    let env = env_logger::Env::default().default_filter_or(args.log_level.as_str());
    env_logger::Builder::from_env(env).init();

    let config = Config::from_args(&args)?;
    if let Some(path) = &config.config_file {
        log::info!("Loaded settings from {}", path.display());
    }

    // Give users templates to edit, without overwriting their changes
    if let Err(e) = write_default_templates(&default_template_dir()) {
        log::warn!("Failed to write default templates: {:#}", e);
    }

    match args.command.clone() {
        Some(Command::Render { note, output }) => render_note(&config, &note, output.as_deref()),
        Some(Command::Watch { note, output }) => watch(config, note, output).await,
        None => watch(config, None, None).await,
    }
}

/// Render `note` once to `output`, or to stdout
pub fn render_note(config: &Config, note: &Path, output: Option<&Path>) -> Result<()> {
    let note_text = fs::read_to_string(note)
        .with_context(|| format!("Failed to read note: {}", note.display()))?;

    let pipeline = PreviewPipeline::new(config);
    let document = pipeline
        .render(&note_text)
        .with_context(|| format!("Failed to render {}", note.display()))?;

    match output {
        Some(path) => {
            fs::write(path, document.standalone_html())
                .with_context(|| format!("Failed to write preview: {}", path.display()))?;
            log::info!("Preview written to {}", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(document.html.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

/// Interactive live-preview session
pub async fn watch(config: Config, note: Option<PathBuf>, output: Option<PathBuf>) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();

    let mut editor = FileNoteEditor::new();
    let text_tx = tx.clone();
    editor.on_text_changed(move || {
        let _ = text_tx.send(SessionEvent::TextChanged);
    });

    let output = output.unwrap_or_else(|| config.preview_output_file.clone());
    let panels = TerminalPanels::new(NoteTree::new(&config.notes_dir), io::stdout());
    let window = MainWindow::new(
        &config,
        editor,
        HtmlFileDisplay::new(&output),
        panels,
        SessionDialog::new(),
    );

    let watcher = match NoteWatcher::new(tx.clone()) {
        Ok(watcher) => Some(watcher),
        Err(e) => {
            log::warn!("Note changes on disk will not be picked up: {:#}", e);
            None
        }
    };

    let extensions: Vec<String> = window
        .pipeline()
        .converter()
        .extensions()
        .iter()
        .map(|extension| extension.to_string())
        .collect();
    log::info!(
        "Live preview at {} (extensions: {})",
        output.display(),
        extensions.join(", ")
    );

    let mut session = Session {
        window,
        watcher,
        awaiting_open: false,
    };

    // The first render is queued ahead of any typed command
    match note {
        Some(note) => session.open_note(&note),
        None => session.refresh(),
    }
    println!("Quark: type 'help' for commands");

    spawn_input_reader(tx.clone());
    let signal_tx = tx.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = signal_tx.send(SessionEvent::Interrupted);
        }
    });
    drop(tx);

    while let Some(event) = rx.recv().await {
        if session.handle(event).is_break() {
            break;
        }
    }

    log::info!("Session ended");
    Ok(())
}

/// Forward stdin lines to the session. Blocking reads stay off the runtime.
fn spawn_input_reader(tx: mpsc::UnboundedSender<SessionEvent>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let event = match line {
                Ok(line) => SessionEvent::Command(line),
                Err(e) => {
                    log::warn!("Failed to read command: {}", e);
                    break;
                }
            };
            if tx.send(event).is_err() {
                return;
            }
        }
        let _ = tx.send(SessionEvent::InputClosed);
    });
}

struct Session {
    window: SessionWindow,
    watcher: Option<NoteWatcher>,
    /// The next line answers the open dialog
    awaiting_open: bool,
}

impl Session {
    fn handle(&mut self, event: SessionEvent) -> ControlFlow<()> {
        match event {
            SessionEvent::TextChanged => self.refresh(),
            SessionEvent::NoteChanged(path) => self.note_changed(&path),
            SessionEvent::WatcherError(e) => log::warn!("Note watcher error: {}", e),
            SessionEvent::Command(line) => return self.command(&line),
            SessionEvent::InputClosed | SessionEvent::Interrupted => {
                return ControlFlow::Break(());
            }
        }
        ControlFlow::Continue(())
    }

    fn refresh(&mut self) {
        // Failures are logged and shown as an error page by the window
        let _ = self.window.update_preview();
    }

    fn note_changed(&mut self, path: &Path) {
        if self.window.editor().path() != Some(path) {
            return;
        }
        if let Err(e) = self.window.editor_mut().reload() {
            log::warn!("{:#}", e);
        }
    }

    fn command(&mut self, line: &str) -> ControlFlow<()> {
        if self.awaiting_open {
            self.awaiting_open = false;
            self.open(Some(line.to_string()));
            return ControlFlow::Continue(());
        }

        match SessionCommand::parse(line) {
            Ok(Some(SessionCommand::Quit)) => return ControlFlow::Break(()),
            Ok(Some(command)) => self.run_command(command),
            Ok(None) => {}
            Err(message) => println!("{message}"),
        }
        ControlFlow::Continue(())
    }

    fn run_command(&mut self, command: SessionCommand) {
        let result = match command {
            SessionCommand::Mode(mode) => self.window.trigger(Action::SetViewMode(mode)),
            SessionCommand::NoteManager => {
                let visible = self.window.view().note_manager_visible();
                self.window.trigger(Action::NoteManager(!visible))
            }
            SessionCommand::Open(answer) => {
                self.open(answer);
                Ok(())
            }
            SessionCommand::Preview(path) => self
                .window
                .export_preview(path.as_deref())
                .map(|written| println!("Preview written to {}", written.display())),
            SessionCommand::Help => {
                print!("{}", help_text());
                Ok(())
            }
            SessionCommand::Quit => Ok(()),
        };

        match result {
            Ok(()) => println!("{}", self.window.panels().status()),
            Err(e) => println!("Error: {:#}", e),
        }
    }

    /// Run the open action. Without an answer the line dialog asks for one
    /// and the next line completes it.
    fn open(&mut self, answer: Option<String>) {
        if answer.is_none() && !SessionDialog::PROMPTS_ITSELF {
            let prompt = self.window.open_prompt();
            println!("{} [{}]:", prompt.title, prompt.start_dir.display());
            self.awaiting_open = true;
            return;
        }

        self.window.dialog_mut().answer(answer);
        match self.window.trigger(Action::Open) {
            Ok(()) => self.watch_open_note(),
            Err(e) => println!("Error: {:#}", e),
        }
    }

    fn open_note(&mut self, note: &Path) {
        match self.window.editor_mut().open_file_request(note) {
            Ok(()) => self.watch_open_note(),
            Err(e) => {
                println!("Error: {:#}", e);
                self.refresh();
            }
        }
    }

    fn watch_open_note(&mut self) {
        let (Some(watcher), Some(path)) = (self.watcher.as_mut(), self.window.editor().path())
        else {
            return;
        };
        if let Err(e) = watcher.watch_note(path) {
            log::warn!("{:#}", e);
        }
    }
}
