//! Configuration management for Quark.
//!
//! Handles:
//! - Command-line argument parsing
//! - The optional `config.toml` settings file
//! - Built-in defaults for the templates and the notes directory
//!
//! Precedence is command line, then settings file, then defaults.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Directory name used under the user's config directory
pub const APP_DIR_NAME: &str = "quark";

/// Command-line arguments for Quark
#[derive(Debug, Parser)]
#[command(name = "quark")]
#[command(about = "Markdown note editor with a live HTML preview")]
#[command(version)]
pub struct Args {
    /// Settings file to load instead of the default one
    #[arg(long, global = true, help = "Path to a TOML settings file")]
    pub config: Option<PathBuf>,

    /// Template placed before the converted note
    #[arg(long, global = true, help = "HTML head template file")]
    pub head_template: Option<PathBuf>,

    /// Template placed after the converted note
    #[arg(long, global = true, help = "HTML foot template file")]
    pub foot_template: Option<PathBuf>,

    /// Directory the open dialog and the note manager start in
    #[arg(long, global = true, help = "Directory containing notes")]
    pub notes_dir: Option<PathBuf>,

    /// Log level
    #[arg(
        long,
        global = true,
        default_value = "info",
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Render a note once and write the preview document
    Render {
        /// Markdown note to render
        note: PathBuf,
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Start an interactive live-preview session
    Watch {
        /// Note to open at startup
        note: Option<PathBuf>,
        /// Preview output file (defaults to `preview_output_file`)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Contents of the settings file. Every key is optional.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub start_html_template_file: Option<PathBuf>,
    pub end_html_template_file: Option<PathBuf>,
    pub notes_dir: Option<PathBuf>,
    pub preview_output_file: Option<PathBuf>,
}

impl ConfigFile {
    /// Load and parse a settings file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

/// Combined configuration from all sources
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Template prepended to every converted note
    pub start_html_template_file: PathBuf,
    /// Template appended to every converted note
    pub end_html_template_file: PathBuf,
    /// Default location for the open dialog and the note manager
    pub notes_dir: PathBuf,
    /// Where the *Preview* action writes the rendered document
    pub preview_output_file: PathBuf,
    /// Log level
    pub log_level: String,
    /// Settings file that contributed to this configuration, if any
    pub config_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        let template_dir = default_template_dir();
        let notes_dir = dirs::document_dir()
            .map(|dir| dir.join("notes"))
            .unwrap_or_else(|| PathBuf::from("notes"));

        Self {
            start_html_template_file: template_dir.join("head.html"),
            end_html_template_file: template_dir.join("foot.html"),
            notes_dir,
            preview_output_file: PathBuf::from("out.html"),
            log_level: "info".to_string(),
            config_file: None,
        }
    }
}

impl Config {
    /// Create configuration from explicit arguments, loading the settings file
    /// named by `--config` or the default one when it exists.
    pub fn from_args(args: &Args) -> Result<Self> {
        let (file, file_path) = match &args.config {
            Some(path) => (Some(ConfigFile::load(path)?), Some(path.clone())),
            None => match default_config_path() {
                Some(path) if path.exists() => (Some(ConfigFile::load(&path)?), Some(path)),
                _ => (None, None),
            },
        };

        let mut config = Self::from_parts(args, file);
        config.config_file = file_path;
        Ok(config)
    }

    /// Merge arguments and an already parsed settings file over the defaults
    pub fn from_parts(args: &Args, file: Option<ConfigFile>) -> Self {
        let defaults = Self::default();
        let file = file.unwrap_or_default();

        Self {
            start_html_template_file: args
                .head_template
                .clone()
                .or(file.start_html_template_file)
                .unwrap_or(defaults.start_html_template_file),
            end_html_template_file: args
                .foot_template
                .clone()
                .or(file.end_html_template_file)
                .unwrap_or(defaults.end_html_template_file),
            notes_dir: args
                .notes_dir
                .clone()
                .or(file.notes_dir)
                .unwrap_or(defaults.notes_dir),
            preview_output_file: file
                .preview_output_file
                .unwrap_or(defaults.preview_output_file),
            log_level: args.log_level.clone(),
            config_file: None,
        }
    }
}

/// `<config_dir>/quark/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join("config.toml"))
}

/// `<config_dir>/quark/templates`, or `./templates` when there is no config dir
pub fn default_template_dir() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR_NAME).join("templates"))
        .unwrap_or_else(|| PathBuf::from("templates"))
}
