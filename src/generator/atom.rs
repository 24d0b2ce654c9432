//! Atom feed generation.
//!
//! # Feed Format
//!
//! ```xml
//! <feed xmlns="http://www.w3.org/2005/Atom">
//!   <title>My Blog</title>
//!   <link href="https://example.com/atom.xml" rel="self"/>
//!   <id>https://example.com/</id>
//!   <updated>2025-01-15T09:30:00+00:00</updated>
//!   <entry>
//!     <title>Hello</title>
//!     <link href="https://example.com/hello/"/>
//!     <id>https://example.com/hello/</id>
//!     <published>2024-11-29T18:29:00-08:00</published>
//!     ...
//!   </entry>
//! </feed>
//! ```

use super::{Entry, Site};
use crate::{log, site::links::ATOM_FILE, utils::date::rfc3339};
use anyhow::Result;
use quick_xml::{
    Writer,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};
use std::io::Cursor;

/// XML namespace for Atom
const ATOM_NS: &str = "http://www.w3.org/2005/Atom";

type XmlWriter = Writer<Cursor<Vec<u8>>>;

/// Build and write the Atom feed.
pub fn build_atom(site: &Site<'_>) -> Result<()> {
    let xml = into_xml(site)?;
    let path = site.write_xml(&site.output().join(ATOM_FILE), &xml)?;

    log!("atom"; "{}", path.file_name().unwrap_or_default().to_string_lossy());
    Ok(())
}

/// Generate Atom xml string.
fn into_xml(site: &Site<'_>) -> Result<String> {
    let blog = &site.config.site;
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut feed = BytesStart::new("feed");
    feed.push_attribute(("xmlns", ATOM_NS));
    writer.write_event(Event::Start(feed))?;

    write_text_element(&mut writer, "title", &blog.title)?;
    let subtitle = match blog.description.as_str() {
        "" => format!("Latest posts from {}", blog.title),
        description => description.to_owned(),
    };
    write_text_element(&mut writer, "subtitle", &subtitle)?;
    write_empty_elem(&mut writer, "link", &[("href", &site.links.atom), ("rel", "self")])?;
    write_empty_elem(&mut writer, "link", &[("href", &site.links.home)])?;
    write_text_element(&mut writer, "id", &site.links.home)?;
    write_text_element(&mut writer, "updated", &site.time.rfc3339())?;
    write_author(&mut writer, &blog.title, &blog.email)?;

    let generator = BytesStart::new("generator");
    writer.write_event(Event::Start(generator))?;
    writer.write_event(Event::Text(BytesText::new(&format!(
        "{}/{}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    ))))?;
    writer.write_event(Event::End(BytesEnd::new("generator")))?;

    for entry in site.entries() {
        write_entry(&mut writer, &entry)?;
    }

    writer.write_event(Event::End(BytesEnd::new("feed")))?;

    Ok(String::from_utf8(writer.into_inner().into_inner())?)
}

fn write_entry(writer: &mut XmlWriter, entry: &Entry<'_>) -> Result<()> {
    let published = rfc3339(&entry.published);

    writer.write_event(Event::Start(BytesStart::new("entry")))?;
    write_text_element(writer, "title", entry.title)?;
    write_empty_elem(writer, "link", &[("href", entry.url)])?;
    write_text_element(writer, "id", entry.url)?;
    write_text_element(writer, "published", &published)?;
    write_text_element(writer, "updated", &published)?;
    write_text_element(writer, "summary", entry.description)?;
    write_author(writer, entry.author, entry.email)?;
    writer.write_event(Event::End(BytesEnd::new("entry")))?;
    Ok(())
}

// ============================================================================
// Element Writers
// ============================================================================

fn write_text_element(writer: &mut XmlWriter, tag: &str, text: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

fn write_empty_elem(writer: &mut XmlWriter, tag: &str, attrs: &[(&str, &str)]) -> Result<()> {
    let mut elem = BytesStart::new(tag);
    for &attr in attrs {
        elem.push_attribute(attr);
    }
    writer.write_event(Event::Empty(elem))?;
    Ok(())
}

fn write_author(writer: &mut XmlWriter, name: &str, email: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new("author")))?;
    write_text_element(writer, "name", name)?;
    if !email.is_empty() {
        write_text_element(writer, "email", email)?;
    }
    writer.write_event(Event::End(BytesEnd::new("author")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{config, graph, time};
    use super::*;
    use crate::badges::Badges;
    use chrono::DateTime;

    fn atom() -> String {
        let config = config();
        let graph = graph(&config);
        let badges = Badges::new();
        let site = Site::new(&config, &graph, &badges, time());
        into_xml(&site).unwrap()
    }

    #[test]
    fn test_feed_header() {
        let xml = atom();

        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains(r#"<feed xmlns="http://www.w3.org/2005/Atom">"#));
        assert!(xml.contains("<title>Test Blog</title>"));
        assert!(xml.contains("<subtitle>Notes</subtitle>"));
        assert!(xml.contains(r#"<link href="https://example.com/atom.xml" rel="self"/>"#));
        assert!(xml.contains("<id>https://example.com/</id>"));
        assert!(xml.contains("<updated>2025-01-15T09:30:00+00:00</updated>"));
        assert!(xml.contains("<generator>draft/"));
    }

    #[test]
    fn test_subtitle_falls_back_to_title() {
        let mut config = config();
        config.site.description.clear();
        let graph = graph(&config);
        let badges = Badges::new();
        let site = Site::new(&config, &graph, &badges, time());

        let xml = into_xml(&site).unwrap();
        assert!(xml.contains("<subtitle>Latest posts from Test Blog</subtitle>"));
    }

    #[test]
    fn test_entries_newest_first() {
        let xml = atom();

        assert_eq!(xml.matches("<entry>").count(), 2);
        let b = xml.find("<id>https://example.com/b/</id>").unwrap();
        let a = xml.find("<id>https://example.com/a/</id>").unwrap();
        assert!(b < a);
    }

    #[test]
    fn test_entry_fields() {
        let xml = atom();

        assert!(xml.contains(r#"<link href="https://example.com/b/"/>"#));
        assert!(xml.contains("<published>2024-11-29T18:29:00-08:00</published>"));
        assert!(xml.contains("<updated>2024-11-29T18:29:00-08:00</updated>"));
        assert!(xml.contains("<summary>About b &amp; more</summary>"));
        assert!(xml.contains("<email>alice@example.com</email>"));
    }

    #[test]
    fn test_same_instant_as_rss() {
        let xml = atom();
        let start = xml.find("<published>").unwrap() + "<published>".len();
        let end = xml[start..].find('<').unwrap() + start;

        let atom_date = DateTime::parse_from_rfc3339(&xml[start..end]).unwrap();
        let rss_date = DateTime::parse_from_rfc2822("Fri, 29 Nov 2024 18:29:00 -0800").unwrap();
        assert_eq!(atom_date, rss_date);
    }
}
