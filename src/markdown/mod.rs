//! Markdown Conversion
//!
//! Turns note text into an HTML fragment. The converter is configured with a
//! set of named extensions and is pure: the same input always yields the
//! same fragment, and every input converts.

pub mod extensions;
pub mod toc;

pub use extensions::Extension;
pub use toc::{TocEntry, slugify};

use pulldown_cmark::{Options, Parser, TextMergeStream, html};

/// Failure reported by a Markdown converter
#[derive(Debug, thiserror::Error)]
#[error("markdown conversion failed: {0}")]
pub struct ConvertError(pub String);

/// A Markdown text to HTML fragment conversion
pub trait MarkdownToHtml {
    fn convert(&self, markdown: &str) -> Result<String, ConvertError>;
}

/// pulldown-cmark based converter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownConverter {
    extensions: Vec<Extension>,
}

impl Default for MarkdownConverter {
    fn default() -> Self {
        Self::new(&Extension::DEFAULT_SET)
    }
}

impl MarkdownConverter {
    pub fn new(extensions: &[Extension]) -> Self {
        let mut unique = Vec::with_capacity(extensions.len());
        for extension in extensions {
            if !unique.contains(extension) {
                unique.push(*extension);
            }
        }
        Self { extensions: unique }
    }

    pub fn extensions(&self) -> &[Extension] {
        &self.extensions
    }

    pub fn has(&self, extension: Extension) -> bool {
        self.extensions.contains(&extension)
    }

    fn parser_options(&self) -> Options {
        self.extensions
            .iter()
            .fold(Options::empty(), |options, extension| {
                options | extension.parser_options()
            })
    }

    /// Convert Markdown to an HTML fragment
    pub fn to_html(&self, markdown: &str) -> String {
        let parser = TextMergeStream::new(Parser::new_ext(markdown, self.parser_options()));
        let mut fragment = String::with_capacity(markdown.len() * 3 / 2);

        if self.has(Extension::TableOfContents) {
            let events = toc::anchor_headings(parser.collect());
            html::push_html(&mut fragment, events.into_iter());
        } else {
            html::push_html(&mut fragment, parser);
        }

        fragment
    }
}

impl MarkdownToHtml for MarkdownConverter {
    fn convert(&self, markdown: &str) -> Result<String, ConvertError> {
        Ok(self.to_html(markdown))
    }
}

/// Escape text for use in HTML content and attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
