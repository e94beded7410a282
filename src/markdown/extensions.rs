//! Named converter extensions.

use pulldown_cmark::Options;
use std::fmt;

/// Extensions a [`MarkdownConverter`](super::MarkdownConverter) can be built with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Extension {
    /// Tables, footnotes, definition lists and `{#id .class}` heading attributes
    Extra,
    /// Heading anchors and `[TOC]` marker replacement
    TableOfContents,
    /// Ordered and bullet lists never merge and ordered lists keep their
    /// start number. CommonMark already behaves this way.
    SaneLists,
}

impl Extension {
    /// The extension set used for note previews
    pub const DEFAULT_SET: [Extension; 3] = [
        Extension::Extra,
        Extension::TableOfContents,
        Extension::SaneLists,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Extension::Extra => "extra",
            Extension::TableOfContents => "toc",
            Extension::SaneLists => "sane_lists",
        }
    }

    /// Parser flags this extension turns on
    pub fn parser_options(self) -> Options {
        match self {
            Extension::Extra => {
                Options::ENABLE_TABLES
                    | Options::ENABLE_FOOTNOTES
                    | Options::ENABLE_DEFINITION_LIST
                    | Options::ENABLE_HEADING_ATTRIBUTES
            }
            Extension::TableOfContents | Extension::SaneLists => Options::empty(),
        }
    }
}

impl fmt::Display for Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
