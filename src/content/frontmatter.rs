//! Document front matter.
//!
//! Both framings end up in the same fixed record: every recognized header is
//! present, empty when the document leaves it out. Which headers were
//! actually given is tracked separately so the validator can tell "missing"
//! apart from "empty".

use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

/// Every header a document may declare.
pub const KNOWN_HEADERS: &[&str] = &[
    "title",
    "link",
    "description",
    "tags",
    "image",
    "alt",
    "published",
    "template",
    "favicon",
    "author",
    "email",
    "status",
    "related",
];

/// Headers that must be present and non-empty.
pub const REQUIRED_HEADERS: &[&str] = &["title", "link", "published", "template", "description"];

/// Declared attributes of one document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    #[serde(deserialize_with = "text")]
    pub title: String,
    #[serde(deserialize_with = "text")]
    pub link: String,
    #[serde(deserialize_with = "text")]
    pub description: String,
    #[serde(deserialize_with = "text_list")]
    pub tags: Vec<String>,
    #[serde(deserialize_with = "text")]
    pub image: String,
    #[serde(deserialize_with = "text")]
    pub alt: String,
    #[serde(deserialize_with = "text")]
    pub published: String,
    #[serde(deserialize_with = "text")]
    pub template: String,
    #[serde(deserialize_with = "text")]
    pub favicon: String,
    #[serde(deserialize_with = "text")]
    pub author: String,
    #[serde(deserialize_with = "text")]
    pub email: String,
    #[serde(deserialize_with = "text")]
    pub status: String,
    #[serde(deserialize_with = "text_list")]
    pub related: Vec<String>,
}

impl FrontMatter {
    /// Value of a header by name, `None` for list headers and unknown names.
    pub fn field(&self, name: &str) -> Option<&str> {
        let value = match name {
            "title" => &self.title,
            "link" => &self.link,
            "description" => &self.description,
            "image" => &self.image,
            "alt" => &self.alt,
            "published" => &self.published,
            "template" => &self.template,
            "favicon" => &self.favicon,
            "author" => &self.author,
            "email" => &self.email,
            "status" => &self.status,
            _ => return None,
        };
        Some(value.as_str())
    }
}

/// Publication status of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Public,
    Private,
}

impl FromStr for Status {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "public" => Ok(Self::Public),
            "private" => Ok(Self::Private),
            _ => Err(()),
        }
    }
}

// ============================================================================
// Lenient scalar handling
// ============================================================================

/// A scalar header value. YAML happily types `title: 2024` as a number;
/// headers are text regardless.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl From<Scalar> for String {
    fn from(value: Scalar) -> Self {
        match value {
            Scalar::Text(s) => s,
            Scalar::Int(n) => n.to_string(),
            Scalar::Float(n) => n.to_string(),
            Scalar::Bool(b) => b.to_string(),
        }
    }
}

/// Either `"a, b"`, `[a, b]` or a lone non-string scalar such as `2024`.
#[derive(Deserialize)]
#[serde(untagged)]
enum ScalarList {
    Joined(String),
    List(Vec<Scalar>),
    One(Scalar),
}

/// Scalar header, `null` read as empty.
fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<Scalar>::deserialize(deserializer)?
        .map(String::from)
        .unwrap_or_default())
}

/// List header, accepting a comma-separated string or a sequence.
fn text_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    let items: Vec<String> = match Option::<ScalarList>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(ScalarList::Joined(joined)) => joined.split(',').map(str::to_owned).collect(),
        Some(ScalarList::List(list)) => list.into_iter().map(String::from).collect(),
        Some(ScalarList::One(value)) => vec![String::from(value)],
    };

    Ok(items
        .into_iter()
        .map(|item| item.trim().to_owned())
        .filter(|item| !item.is_empty())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> FrontMatter {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_full_front_matter() {
        let fm = parse(
            r#"
title: Hello
link: hello
description: First post
tags: meta, code
published: 2024-11-29T18:29:00-08:00
template: post.html
status: public
related: [intro, setup]
"#,
        );

        assert_eq!(fm.title, "Hello");
        assert_eq!(fm.tags, vec!["meta", "code"]);
        assert_eq!(fm.published, "2024-11-29T18:29:00-08:00");
        assert_eq!(fm.related, vec!["intro", "setup"]);
        assert!(fm.image.is_empty());
    }

    #[test]
    fn test_tags_as_sequence() {
        let fm = parse("tags:\n  - Rust\n  - 2024\n");
        assert_eq!(fm.tags, vec!["Rust", "2024"]);
    }

    #[test]
    fn test_single_numeric_tag() {
        let fm = parse("tags: 2024\nrelated: 42\n");
        assert_eq!(fm.tags, vec!["2024"]);
        assert_eq!(fm.related, vec!["42"]);
    }

    #[test]
    fn test_empty_list_items_dropped() {
        let fm = parse("tags: 'meta, , code,'\n");
        assert_eq!(fm.tags, vec!["meta", "code"]);
    }

    #[test]
    fn test_null_and_numeric_scalars() {
        let fm = parse("image:\ntitle: 1999\nlink: 42\n");
        assert_eq!(fm.image, "");
        assert_eq!(fm.title, "1999");
        assert_eq!(fm.link, "42");
    }

    #[test]
    fn test_unknown_keys_ignored_by_record() {
        let fm = parse("title: x\nmood: happy\n");
        assert_eq!(fm.title, "x");
    }

    #[test]
    fn test_field_lookup() {
        let fm = parse("title: x\nstatus: private\n");
        assert_eq!(fm.field("title"), Some("x"));
        assert_eq!(fm.field("status"), Some("private"));
        assert_eq!(fm.field("tags"), None);
        assert_eq!(fm.field("mood"), None);
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!("public".parse::<Status>(), Ok(Status::Public));
        assert_eq!("private".parse::<Status>(), Ok(Status::Private));
        assert!("Public".parse::<Status>().is_err());
        assert!("".parse::<Status>().is_err());
    }
}
