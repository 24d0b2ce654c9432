//! Per-document error types.

use super::validate::ValidationReport;
use crate::utils::slug::LinkError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or validating a single source document.
///
/// Every variant names the offending file.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("cannot read document `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("`{0}` has no front matter: expected a `---` block or a `==cut here==` marker")]
    MissingDelimiter(PathBuf),

    #[error("`{0}` opens a `---` front matter block that is never closed")]
    Unterminated(PathBuf),

    #[error("`{0}` line {1}: malformed header `{2}`, expected `key: value`")]
    Header(PathBuf, usize, String),

    #[error("front matter of `{0}` is not valid YAML")]
    FrontMatter(PathBuf, #[source] serde_yaml::Error),

    #[error("{0}")]
    Invalid(ValidationReport),

    #[error("`{0}` declares an unsafe link `{1}`")]
    UnsafeLink(PathBuf, String, #[source] LinkError),

    #[error("`{0}` has an unparsable published date `{1}`")]
    Date(PathBuf, String, #[source] chrono::ParseError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_content_error_names_path() {
        let err = ContentError::MissingDelimiter(PathBuf::from("posts/20240101.a.md"));
        assert!(err.to_string().contains("posts/20240101.a.md"));

        let err = ContentError::Header(PathBuf::from("x.md"), 3, "no colon here".into());
        let display = err.to_string();
        assert!(display.contains("x.md"));
        assert!(display.contains("line 3"));
        assert!(display.contains("no colon here"));
    }

    #[test]
    fn test_unsafe_link_keeps_source() {
        let err = ContentError::UnsafeLink(
            PathBuf::from("x.md"),
            "a/b".into(),
            LinkError::IllegalCharacter('/'),
        );
        assert!(err.to_string().contains("`a/b`"));
        let source = err.source().map(ToString::to_string).unwrap_or_default();
        assert!(source.contains("illegal character"));
    }
}
