//! Markdown note to previewable HTML document.

use regex::Regex;
use std::io;
use std::path::PathBuf;
use std::sync::OnceLock;
use url::Url;

use super::template::{TemplatePaths, read_template};
use crate::Config;
use crate::markdown::{ConvertError, MarkdownConverter, MarkdownToHtml, escape_html};

/// Errors produced while building a preview document
#[derive(Debug, thiserror::Error)]
pub enum PreviewError {
    /// A template file is missing or unreadable
    #[error("failed to read template {}: {}", .path.display(), .source)]
    TemplateRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The Markdown converter failed
    #[error(transparent)]
    Render(#[from] ConvertError),
}

/// A complete HTML document ready for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    pub html: String,
    /// Location relative links in `html` resolve against
    pub base_url: Url,
}

impl RenderedDocument {
    /// The document with a `<base href>` pointing at `base_url`, for viewers
    /// that load it from a different location than the template
    pub fn standalone_html(&self) -> String {
        with_base_href(&self.html, &self.base_url)
    }
}

/// The note text a document was rendered from, kept together with the result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewState {
    pub note_text: String,
    pub document: RenderedDocument,
}

/// Builds `head + converted note + foot` documents
///
/// Templates are re-read on every render, so edits to them show up on the
/// next text change without a restart.
#[derive(Debug, Clone)]
pub struct PreviewPipeline<C = MarkdownConverter> {
    converter: C,
    templates: TemplatePaths,
}

impl PreviewPipeline<MarkdownConverter> {
    /// Pipeline with the note extension set and the configured templates
    pub fn new(config: &Config) -> Self {
        Self::with_converter(TemplatePaths::from_config(config), MarkdownConverter::default())
    }
}

impl<C: MarkdownToHtml> PreviewPipeline<C> {
    pub fn with_converter(templates: TemplatePaths, converter: C) -> Self {
        Self {
            converter,
            templates,
        }
    }

    pub fn templates(&self) -> &TemplatePaths {
        &self.templates
    }

    pub fn converter(&self) -> &C {
        &self.converter
    }

    /// Render note text into a complete document
    pub fn render(&self, note_text: &str) -> Result<RenderedDocument, PreviewError> {
        let head = read_template(&self.templates.head)?;
        let fragment = self.converter.convert(note_text)?;
        let foot = read_template(&self.templates.foot)?;

        let mut html = String::with_capacity(head.len() + fragment.len() + foot.len());
        html.push_str(&head);
        html.push_str(&fragment);
        html.push_str(&foot);

        let base_url = self.base_url()?;
        log::debug!(
            "Rendered {} bytes of markdown into {} bytes of HTML",
            note_text.len(),
            html.len()
        );

        Ok(RenderedDocument { html, base_url })
    }

    /// `file://` URL of the head template, resolved against the working directory
    pub fn base_url(&self) -> Result<Url, PreviewError> {
        let head = &self.templates.head;
        let absolute = std::path::absolute(head).map_err(|source| PreviewError::TemplateRead {
            path: head.clone(),
            source,
        })?;

        Url::from_file_path(&absolute).map_err(|()| PreviewError::TemplateRead {
            path: head.clone(),
            source: io::Error::new(
                io::ErrorKind::InvalidInput,
                "template path cannot be expressed as a file URL",
            ),
        })
    }
}

/// Add a `<base href>` element right after the opening `<head>` tag, or in
/// front of the document when it has none
pub fn with_base_href(html: &str, base_url: &Url) -> String {
    static HEAD_TAG: OnceLock<Regex> = OnceLock::new();
    let head_tag =
        HEAD_TAG.get_or_init(|| Regex::new(r"(?i)<head(\s[^>]*)?>").expect("valid head regex"));

    let base = format!("<base href=\"{}\">", escape_html(base_url.as_str()));
    match head_tag.find(html) {
        Some(tag) => {
            let mut document = String::with_capacity(html.len() + base.len());
            document.push_str(&html[..tag.end()]);
            document.push_str(&base);
            document.push_str(&html[tag.end()..]);
            document
        }
        None => format!("{base}{html}"),
    }
}
