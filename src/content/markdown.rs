//! Markdown rendering.
//!
//! Produces the page markup and a plain-text projection of the same body for
//! the search corpus.

use pulldown_cmark::{CowStr, Event, LinkType, Options, Parser, Tag, TagEnd, html};
use std::{collections::HashMap, fmt::Write};

fn options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_HEADING_ATTRIBUTES
}

/// Render a markdown body to HTML.
///
/// Headings without an explicit `{#id}` get one derived from their text and
/// external links open in a new tab.
pub fn render_html(markdown: &str) -> String {
    let events = Parser::new_ext(markdown, options());
    let events = ExternalLinks::new(AutoHeadingIds::new(events));

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, events);
    out
}

/// Render a markdown body to plain text.
///
/// Text and code are kept, links become `text (destination)`, raw HTML is
/// dropped.
pub fn render_plain(markdown: &str) -> String {
    let mut out = String::with_capacity(markdown.len());
    let mut links: Vec<CowStr<'_>> = Vec::new();

    for event in Parser::new_ext(markdown, options()) {
        match event {
            Event::Text(text) | Event::Code(text) => out.push_str(&text),
            Event::SoftBreak | Event::HardBreak => out.push('\n'),
            Event::Start(Tag::Item) => out.push_str("- "),
            Event::Start(Tag::Link { dest_url, .. }) => links.push(dest_url),
            Event::End(TagEnd::Link) => {
                if let Some(dest) = links.pop() {
                    let _ = write!(out, " ({dest})");
                }
            }
            Event::End(TagEnd::Heading(_) | TagEnd::Item | TagEnd::CodeBlock) => {
                out.push('\n')
            }
            Event::End(TagEnd::Paragraph) => out.push_str("\n\n"),
            _ => {}
        }
    }

    out
}

// ============================================================================
// Event adapters
// ============================================================================

/// Assigns `id`s to headings that don't declare one.
struct AutoHeadingIds<'a, I: Iterator<Item = Event<'a>>> {
    inner: I,
    pending: Vec<Event<'a>>,
    seen: HashMap<String, usize>,
}

impl<'a, I: Iterator<Item = Event<'a>>> AutoHeadingIds<'a, I> {
    fn new(inner: I) -> Self {
        Self {
            inner,
            pending: Vec::new(),
            seen: HashMap::new(),
        }
    }

    fn unique_id(&mut self, text: &str) -> String {
        let base = heading_id(text);
        let count = self.seen.entry(base.clone()).or_insert(0);
        *count += 1;
        match *count {
            1 => base,
            n => format!("{base}-{}", n - 1),
        }
    }
}

impl<'a, I: Iterator<Item = Event<'a>>> Iterator for AutoHeadingIds<'a, I> {
    type Item = Event<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(event) = self.pending.pop() {
            return Some(event);
        }

        match self.inner.next()? {
            Event::Start(Tag::Heading {
                level,
                id: None,
                classes,
                attrs,
            }) => {
                let mut text = String::new();
                let mut body = Vec::new();
                for event in self.inner.by_ref() {
                    if let Event::Text(ref s) | Event::Code(ref s) = event {
                        text.push_str(s);
                    }
                    let end = matches!(event, Event::End(TagEnd::Heading(_)));
                    body.push(event);
                    if end {
                        break;
                    }
                }

                // Stored reversed so `pop` yields them in order.
                body.reverse();
                self.pending = body;

                let id = self.unique_id(&text);
                Some(Event::Start(Tag::Heading {
                    level,
                    id: Some(id.into()),
                    classes,
                    attrs,
                }))
            }
            event => Some(event),
        }
    }
}

/// Rewrites links with a scheme to open in a new tab.
struct ExternalLinks<I> {
    inner: I,
    rewritten: Vec<bool>,
}

impl<I> ExternalLinks<I> {
    fn new(inner: I) -> Self {
        Self {
            inner,
            rewritten: Vec::new(),
        }
    }
}

impl<'a, I: Iterator<Item = Event<'a>>> Iterator for ExternalLinks<I> {
    type Item = Event<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.inner.next()? {
            Event::Start(Tag::Link {
                link_type,
                dest_url,
                title,
                id,
            }) => {
                if link_type == LinkType::Email || !is_external(&dest_url) {
                    self.rewritten.push(false);
                    return Some(Event::Start(Tag::Link {
                        link_type,
                        dest_url,
                        title,
                        id,
                    }));
                }

                self.rewritten.push(true);
                let mut anchor = format!(r#"<a href="{}""#, escape_attr(&dest_url));
                if !title.is_empty() {
                    let _ = write!(anchor, r#" title="{}""#, escape_attr(&title));
                }
                anchor.push_str(r#" target="_blank">"#);
                Some(Event::InlineHtml(anchor.into()))
            }
            Event::End(TagEnd::Link) => match self.rewritten.pop() {
                Some(true) => Some(Event::InlineHtml("</a>".into())),
                _ => Some(Event::End(TagEnd::Link)),
            },
            event => Some(event),
        }
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn is_external(dest: &str) -> bool {
    dest.starts_with("//") || dest.contains("://")
}

fn escape_attr(value: &str) -> String {
    quick_xml::escape::escape(value).into_owned()
}

/// Lower-case, alphanumerics kept, everything else collapsed into `-`.
fn heading_id(text: &str) -> String {
    let mut id = String::with_capacity(text.len());
    for c in text.trim().chars() {
        if c.is_alphanumeric() {
            id.extend(c.to_lowercase());
        } else if !id.is_empty() && !id.ends_with('-') {
            id.push('-');
        }
    }
    while id.ends_with('-') {
        id.pop();
    }
    if id.is_empty() {
        id.push_str("section");
    }
    id
}
