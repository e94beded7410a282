//! Preview display that writes the document to an HTML file.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

use crate::preview::with_base_href;
use crate::window::collaborators::PreviewDisplay;

/// Writes every document it is given to `output`, so any browser pointed at
/// that file shows the live preview
#[derive(Debug, Clone)]
pub struct HtmlFileDisplay {
    output: PathBuf,
    updates: usize,
}

impl HtmlFileDisplay {
    pub fn new(output: impl Into<PathBuf>) -> Self {
        Self {
            output: output.into(),
            updates: 0,
        }
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Number of documents written so far
    pub fn updates(&self) -> usize {
        self.updates
    }
}

impl PreviewDisplay for HtmlFileDisplay {
    fn set_html(&mut self, html: &str, base_url: &Url) -> Result<()> {
        // The file is opened from `output`, not from next to the template
        let document = with_base_href(html, base_url);
        fs::write(&self.output, document)
            .with_context(|| format!("Failed to write preview: {}", self.output.display()))?;
        self.updates += 1;
        log::debug!("Preview #{} written to {}", self.updates, self.output.display());
        Ok(())
    }
}
