//! Link (slug) safety policy.
//!
//! A link becomes a directory under the output root, so it must never be
//! able to escape it or produce a name the filesystem rejects.

use thiserror::Error;

/// Characters forbidden in links, on top of control characters
const FORBIDDEN_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Longest link accepted, in bytes
const MAX_LINK_LEN: usize = 255;

/// Reasons a link is rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LinkError {
    #[error("invalid name: '.' and '..' are not allowed")]
    Reserved,

    #[error("invalid name: path traversal patterns like '..' are not allowed")]
    Traversal,

    #[error("invalid name: contains illegal character {0:?} (e.g., < > : \" / \\ | ? * or control characters)")]
    IllegalCharacter(char),

    #[error("invalid name: leading or trailing whitespace is not allowed")]
    Whitespace,

    #[error("invalid name: must be between 1 and 255 characters long, got {0}")]
    Length(usize),
}

/// Check a proposed link against the safety policy.
///
/// Rules are checked in a fixed order and the first violation is returned.
pub fn validate_link(link: &str) -> Result<(), LinkError> {
    if link == "." || link == ".." {
        return Err(LinkError::Reserved);
    }

    if link.contains("..") {
        return Err(LinkError::Traversal);
    }

    if let Some(c) = link
        .chars()
        .find(|c| FORBIDDEN_CHARS.contains(c) || c.is_control())
    {
        return Err(LinkError::IllegalCharacter(c));
    }

    if link.trim() != link {
        return Err(LinkError::Whitespace);
    }

    if link.is_empty() || link.len() > MAX_LINK_LEN {
        return Err(LinkError::Length(link.len()));
    }

    Ok(())
}

/// Canonical form of a tag name: trimmed and lower-cased.
pub fn normalize_tag(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_links() {
        for link in ["about", "good_name_123", "valid-link", "2024.review", "日記"] {
            assert_eq!(validate_link(link), Ok(()), "{link:?} should be accepted");
        }
    }

    #[test]
    fn test_reserved_names() {
        assert_eq!(validate_link("."), Err(LinkError::Reserved));
        assert_eq!(validate_link(".."), Err(LinkError::Reserved));
    }

    #[test]
    fn test_path_traversal() {
        assert_eq!(validate_link("abc/../def"), Err(LinkError::Traversal));
        assert_eq!(validate_link("..hidden"), Err(LinkError::Traversal));
    }

    #[test]
    fn test_illegal_characters() {
        assert_eq!(
            validate_link("invalid<link>"),
            Err(LinkError::IllegalCharacter('<'))
        );
        assert_eq!(validate_link("a/b"), Err(LinkError::IllegalCharacter('/')));
        assert_eq!(validate_link("a\\b"), Err(LinkError::IllegalCharacter('\\')));
        assert_eq!(validate_link("what?"), Err(LinkError::IllegalCharacter('?')));
        assert_eq!(validate_link("say\"hi"), Err(LinkError::IllegalCharacter('"')));
    }

    #[test]
    fn test_control_characters() {
        assert_eq!(
            validate_link("newline\n"),
            Err(LinkError::IllegalCharacter('\n'))
        );
        assert_eq!(validate_link("a\rb"), Err(LinkError::IllegalCharacter('\r')));
        assert_eq!(validate_link("a\tb"), Err(LinkError::IllegalCharacter('\t')));
    }

    #[test]
    fn test_whitespace() {
        assert_eq!(validate_link("  leading-space"), Err(LinkError::Whitespace));
        assert_eq!(validate_link("trailing-space  "), Err(LinkError::Whitespace));
    }

    #[test]
    fn test_length() {
        assert_eq!(validate_link(""), Err(LinkError::Length(0)));

        let long = "a".repeat(301);
        assert_eq!(validate_link(&long), Err(LinkError::Length(301)));

        let limit = "a".repeat(MAX_LINK_LEN);
        assert_eq!(validate_link(&limit), Ok(()));
    }

    #[test]
    fn test_errors_are_distinct() {
        let messages = [
            LinkError::Reserved.to_string(),
            LinkError::Traversal.to_string(),
            LinkError::IllegalCharacter('<').to_string(),
            LinkError::Whitespace.to_string(),
            LinkError::Length(0).to_string(),
        ];
        for (i, a) in messages.iter().enumerate() {
            for b in &messages[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_normalize_tag() {
        assert_eq!(normalize_tag(" Meta "), "meta");
        assert_eq!(normalize_tag("CODE"), "code");
        assert_eq!(normalize_tag("   "), "");
    }
}
