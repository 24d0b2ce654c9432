//! Source documents: loading, metadata interpretation and validation.
//!
//! ```text
//! posts/20240101.hello.md
//!     │  loader::load_dir        split metadata / body
//!     ▼
//! SourceFile
//!     │  parse_document          front matter, headers, link policy
//!     ▼
//! ParsedDocument ──► site::ContentGraph
//! ```

mod error;
pub mod frontmatter;
pub mod loader;
pub mod markdown;
pub mod validate;

pub use error::ContentError;
pub use frontmatter::{FrontMatter, Status};
pub use loader::{Framing, SourceFile};

use crate::utils::slug::validate_link;
use frontmatter::KNOWN_HEADERS;
use serde_yaml::Value;
use std::path::PathBuf;

/// A source document whose metadata passed validation.
#[derive(Debug, Clone)]
pub struct ParsedDocument {
    pub path: PathBuf,
    pub front_matter: FrontMatter,
    pub status: Status,
    pub body: String,
}

/// Interpret and validate a loaded source file.
///
/// Unknown headers are always reported for the header-map framing, and for
/// front matter only when `strict` is set. Header problems are reported
/// together, with a link policy violation appended when there are any.
pub fn parse_document(source: SourceFile, strict: bool) -> Result<ParsedDocument, ContentError> {
    let SourceFile {
        path,
        metadata,
        body,
    } = source;

    let unknown = if strict || metadata.framing == Framing::HeaderMap {
        unknown_headers(&metadata.fields)
    } else {
        Vec::new()
    };

    let front_matter: FrontMatter = serde_yaml::from_value(Value::Mapping(metadata.fields))
        .map_err(|err| ContentError::FrontMatter(path.clone(), err))?;

    let link_check = validate_link(&front_matter.link);

    let status = match validate::validate_headers(&front_matter, &unknown, &path) {
        Ok(status) => status,
        Err(mut report) => {
            if let (false, Err(err)) = (front_matter.link.is_empty(), &link_check) {
                report
                    .problems
                    .push(format!("unsafe link `{}`: {err}", front_matter.link));
            }
            return Err(ContentError::Invalid(report));
        }
    };

    link_check
        .map_err(|err| ContentError::UnsafeLink(path.clone(), front_matter.link.clone(), err))?;

    Ok(ParsedDocument {
        path,
        front_matter,
        status,
        body,
    })
}

/// Header names outside the recognized set, in declaration order.
fn unknown_headers(fields: &serde_yaml::Mapping) -> Vec<String> {
    fields
        .keys()
        .map(|key| match key {
            Value::String(name) => name.clone(),
            other => serde_yaml::to_string(other)
                .map(|s| s.trim().to_owned())
                .unwrap_or_default(),
        })
        .filter(|name| !KNOWN_HEADERS.contains(&name.as_str()))
        .collect()
}
