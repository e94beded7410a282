//! Heading anchors and table of contents.
//!
//! Every heading gets an `id`: an explicit `{#id}` attribute is kept, other
//! headings get a slug of their text made unique with a `_N` suffix. A
//! paragraph holding only the `[TOC]` marker is replaced by a nested list of
//! links to all headings.

use pulldown_cmark::{CowStr, Event, HeadingLevel, Tag, TagEnd};
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;
use unicode_normalization::UnicodeNormalization;

use super::escape_html;

/// Paragraph text replaced by the table of contents
pub const TOC_MARKER: &str = "[TOC]";

/// One heading as listed in the table of contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocEntry {
    pub level: u8,
    pub id: String,
    pub title: String,
}

/// Turn heading text into an anchor id
///
/// Accents are folded away (`é` becomes `e`), remaining non-ASCII and
/// punctuation characters are dropped, the rest is lowercased and runs of
/// whitespace or hyphens become a single `-`.
pub fn slugify(text: &str) -> String {
    static SEPARATOR_RUN: OnceLock<Regex> = OnceLock::new();
    let separator_run =
        SEPARATOR_RUN.get_or_init(|| Regex::new(r"[-\s]+").expect("valid separator regex"));

    let kept: String = text
        .nfkd()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-' || c.is_ascii_whitespace())
        .collect();
    let lowered = kept.trim().to_ascii_lowercase();
    separator_run.replace_all(&lowered, "-").into_owned()
}

/// Make `id` unique among `used` by appending or bumping a `_N` suffix, then
/// record it
pub fn unique_id(id: String, used: &mut HashSet<String>) -> String {
    let mut id = id;
    while id.is_empty() || used.contains(&id) {
        id = match id.rsplit_once('_') {
            Some((stem, count)) if !count.is_empty() && count.bytes().all(|b| b.is_ascii_digit()) => {
                match count.parse::<u64>() {
                    Ok(n) => match n.checked_add(1) {
                        Some(next) => format!("{stem}_{next}"),
                        None => format!("{id}_1"),
                    },
                    Err(_) => format!("{id}_1"),
                }
            }
            _ => format!("{id}_1"),
        };
    }
    used.insert(id.clone());
    id
}

fn level_number(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Plain text of the heading starting at `events[start]`
fn heading_text(events: &[Event<'_>], start: usize) -> String {
    let mut title = String::new();
    for event in &events[start + 1..] {
        match event {
            Event::End(TagEnd::Heading(_)) => break,
            Event::Text(text) | Event::Code(text) => title.push_str(text),
            _ => {}
        }
    }
    title
}

/// Assign ids to all headings and collect the table of contents
pub fn collect_headings(events: &mut [Event<'_>]) -> Vec<TocEntry> {
    let mut used: HashSet<String> = events
        .iter()
        .filter_map(|event| match event {
            Event::Start(Tag::Heading { id: Some(id), .. }) => Some(id.to_string()),
            _ => None,
        })
        .collect();

    let mut entries = Vec::new();
    for index in 0..events.len() {
        if !matches!(events[index], Event::Start(Tag::Heading { .. })) {
            continue;
        }
        let title = heading_text(events, index);

        if let Event::Start(Tag::Heading { level, id, .. }) = &mut events[index] {
            let anchor = match id {
                Some(existing) => existing.to_string(),
                None => {
                    let anchor = unique_id(slugify(&title), &mut used);
                    *id = Some(CowStr::from(anchor.clone()));
                    anchor
                }
            };
            entries.push(TocEntry {
                level: level_number(*level),
                id: anchor,
                title,
            });
        }
    }
    entries
}

fn is_toc_marker(events: &[Event<'_>]) -> bool {
    matches!(
        events,
        [
            Event::Start(Tag::Paragraph),
            Event::Text(text),
            Event::End(TagEnd::Paragraph),
            ..
        ] if text.trim() == TOC_MARKER
    )
}

/// Anchor headings and replace `[TOC]` paragraphs in a merged event stream
pub fn anchor_headings(mut events: Vec<Event<'_>>) -> Vec<Event<'_>> {
    let entries = collect_headings(&mut events);

    let mut output = Vec::with_capacity(events.len());
    let mut index = 0;
    while index < events.len() {
        if is_toc_marker(&events[index..]) {
            output.push(Event::Html(CowStr::from(render_toc(&entries))));
            index += 3;
            continue;
        }
        output.push(events[index].clone());
        index += 1;
    }
    output
}

/// Render entries as a nested `<ul>` inside `<div class="toc">`
pub fn render_toc(entries: &[TocEntry]) -> String {
    let mut out = String::from("<div class=\"toc\">\n");
    // levels of the currently open lists, outermost first
    let mut open: Vec<u8> = Vec::new();

    for entry in entries {
        match open.last().copied() {
            None => {
                out.push_str("<ul>\n");
                open.push(entry.level);
            }
            Some(top) if entry.level > top => {
                out.push_str("\n<ul>\n");
                open.push(entry.level);
            }
            Some(_) => {
                out.push_str("</li>\n");
                while open.len() > 1 {
                    let top = open[open.len() - 1];
                    if entry.level >= top {
                        break;
                    }
                    let parent = open[open.len() - 2];
                    if entry.level > parent {
                        // deeper than the parent list but shallower than the current one
                        let last = open.len() - 1;
                        open[last] = entry.level;
                        break;
                    }
                    out.push_str("</ul>\n</li>\n");
                    open.pop();
                }
            }
        }
        out.push_str(&format!(
            "<li><a href=\"#{}\">{}</a>",
            escape_html(&entry.id),
            escape_html(&entry.title)
        ));
    }

    if !open.is_empty() {
        out.push_str("</li>\n");
        for _ in 1..open.len() {
            out.push_str("</ul>\n</li>\n");
        }
        out.push_str("</ul>\n");
    }
    out.push_str("</div>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::MarkdownConverter;

    fn entry(level: u8, id: &str) -> TocEntry {
        TocEntry {
            level,
            id: id.to_string(),
            title: id.to_uppercase(),
        }
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("  What's new?  "), "whats-new");
        assert_eq!(slugify("a - b -- c"), "a-b-c");
        assert_eq!(slugify("snake_case stays"), "snake_case-stays");
        assert_eq!(slugify("Café au lait"), "cafe-au-lait");
        assert_eq!(slugify("Ærø ﬁle"), "r-file");
    }

    #[test]
    fn test_unique_id() {
        let mut used = HashSet::new();
        assert_eq!(unique_id("intro".to_string(), &mut used), "intro");
        assert_eq!(unique_id("intro".to_string(), &mut used), "intro_1");
        assert_eq!(unique_id("intro".to_string(), &mut used), "intro_2");
        assert_eq!(unique_id(String::new(), &mut used), "_1");
    }

    #[test]
    fn test_unique_id_with_largest_suffix() {
        let mut used = HashSet::new();
        let max = format!("a_{}", u64::MAX);
        assert_eq!(unique_id(max.clone(), &mut used), max);
        assert_eq!(unique_id(max.clone(), &mut used), format!("{max}_1"));
    }

    #[test]
    fn test_duplicate_headings_with_huge_suffix_convert() {
        let html = MarkdownConverter::default()
            .to_html("# a_18446744073709551615

# a_18446744073709551615
");
        assert!(html.contains("<h1 id=\"a_18446744073709551615\">"));
        assert!(html.contains("<h1 id=\"a_18446744073709551615_1\">"));
    }

    #[test]
    fn test_accented_heading_slug() {
        let html = MarkdownConverter::default().to_html("# Café
");
        assert!(html.contains("<h1 id=\"cafe\">Café</h1>"));
    }

    #[test]
    fn test_duplicate_headings_get_suffixes() {
        let html = MarkdownConverter::default().to_html("# Notes\n\n## Notes\n\n### Notes\n");
        assert!(html.contains("<h1 id=\"notes\">"));
        assert!(html.contains("<h2 id=\"notes_1\">"));
        assert!(html.contains("<h3 id=\"notes_2\">"));
    }

    #[test]
    fn test_explicit_id_is_kept_and_reserved() {
        let html = MarkdownConverter::default().to_html("# Custom {#intro}\n\n# Intro\n");
        assert!(html.contains("<h1 id=\"intro\">Custom</h1>"));
        assert!(html.contains("<h1 id=\"intro_1\">Intro</h1>"));
    }

    #[test]
    fn test_code_spans_count_towards_slug() {
        let html = MarkdownConverter::default().to_html("## Using `cargo`\n");
        assert!(html.contains("<h2 id=\"using-cargo\">"));
    }

    #[test]
    fn test_toc_marker_is_replaced() {
        let html = MarkdownConverter::default().to_html("[TOC]\n\n# One\n\n## Two\n");
        assert!(html.starts_with("<div class=\"toc\">"));
        assert!(html.contains("<a href=\"#one\">One</a>"));
        assert!(html.contains("<a href=\"#two\">Two</a>"));
        assert!(!html.contains("[TOC]"));
    }

    #[test]
    fn test_toc_marker_inside_text_is_left_alone() {
        let html = MarkdownConverter::default().to_html("See [TOC] here\n\n# One\n");
        assert!(html.contains("See [TOC] here"));
        assert!(!html.contains("class=\"toc\""));
    }

    #[test]
    fn test_render_toc_nesting() {
        let toc = render_toc(&[entry(1, "a"), entry(2, "b"), entry(1, "c")]);
        assert_eq!(
            toc,
            "<div class=\"toc\">\n<ul>\n<li><a href=\"#a\">A</a>\n<ul>\n<li><a href=\"#b\">B</a></li>\n</ul>\n</li>\n<li><a href=\"#c\">C</a></li>\n</ul>\n</div>\n"
        );
    }

    #[test]
    fn test_render_toc_intermediate_level() {
        let toc = render_toc(&[entry(1, "a"), entry(3, "b"), entry(2, "c")]);
        assert_eq!(
            toc,
            "<div class=\"toc\">\n<ul>\n<li><a href=\"#a\">A</a>\n<ul>\n<li><a href=\"#b\">B</a></li>\n<li><a href=\"#c\">C</a></li>\n</ul>\n</li>\n</ul>\n</div>\n"
        );
    }

    #[test]
    fn test_render_toc_empty() {
        assert_eq!(render_toc(&[]), "<div class=\"toc\">\n</div>\n");
    }
}
