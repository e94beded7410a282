//! Quark Note Taker
//!
//! A Markdown note editor shell with a live HTML preview.
//!
//! This library provides:
//! - Markdown to HTML conversion with named extensions
//! - The preview pipeline (head template + converted note + foot template)
//! - The main window shell: view modes, the open-file flow and action dispatch
//! - A headless host that drives the shell from the command line
//! - Configuration management

pub mod config;
pub mod host;
pub mod markdown;
pub mod preview;
pub mod window;

// Re-exports for clean public API
pub use config::Config;
pub use markdown::{Extension, MarkdownConverter, MarkdownToHtml};
pub use preview::{PreviewError, PreviewPipeline, RenderedDocument};
pub use window::{Action, MainWindow, ViewMode, ViewModeController};
