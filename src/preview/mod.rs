//! Preview Pipeline
//!
//! Note text is converted to an HTML fragment and wrapped with the head and
//! foot templates into a complete document, together with the base URL the
//! document's relative links resolve against.

pub mod pipeline;
pub mod template;

pub use pipeline::{
    PreviewError, PreviewPipeline, PreviewState, RenderedDocument, with_base_href,
};
pub use template::{TemplatePaths, read_template, write_default_templates};
