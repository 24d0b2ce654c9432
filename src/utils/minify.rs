//! Minification for rendered HTML pages and XML feeds.
//!
//! Controlled by `[build].minify`; when disabled the input is passed through
//! untouched.

use quick_xml::{Reader, Writer, events::Event};
use std::borrow::Cow;

/// Content type for minification.
pub enum MinifyType<'a> {
    Html(&'a [u8]),
    Xml(&'a [u8]),
}

/// Minify content when `enabled`.
///
/// Returns `Cow::Borrowed` if minify disabled, `Cow::Owned` if minified.
pub fn minify(content: MinifyType<'_>, enabled: bool) -> Cow<'_, [u8]> {
    match (content, enabled) {
        (MinifyType::Html(html), false) | (MinifyType::Xml(html), false) => Cow::Borrowed(html),
        (MinifyType::Html(html), true) => Cow::Owned(minify_html_inner(html)),
        (MinifyType::Xml(xml), true) => Cow::Owned(minify_xml_inner(xml)),
    }
}

/// Minify HTML content using `minify_html` crate.
///
/// Template syntax is already expanded at this point, so JS and CSS inside
/// the page are minified too.
fn minify_html_inner(html: &[u8]) -> Vec<u8> {
    let mut cfg = minify_html::Cfg::new();
    cfg.keep_closing_tags = true;
    cfg.keep_html_and_head_opening_tags = true;
    cfg.keep_comments = false;
    cfg.minify_css = true;
    cfg.minify_js = true;
    minify_html::minify(html, &cfg)
}

/// Minify XML by dropping the layout whitespace between tags.
///
/// Text content, multi-line descriptions included, is copied untouched.
/// Input the reader rejects is returned as is.
fn minify_xml_inner(xml: &[u8]) -> Vec<u8> {
    let mut reader = Reader::from_reader(xml);
    let mut writer = Writer::new(Vec::with_capacity(xml.len()));
    // whitespace right after markup is indentation
    let mut after_markup = true;

    loop {
        let event = match reader.read_event() {
            Ok(Event::Eof) => break,
            Ok(event) => event,
            Err(_) => return xml.to_vec(),
        };

        let layout = after_markup
            && matches!(&event, Event::Text(text) if text.iter().all(u8::is_ascii_whitespace));
        after_markup = !matches!(
            event,
            Event::Text(_) | Event::GeneralRef(_) | Event::CData(_)
        );

        if layout {
            continue;
        }
        if writer.write_event(event).is_err() {
            return xml.to_vec();
        }
    }

    writer.into_inner()
}
