//! Header completeness checks.
//!
//! Every problem found in a document is collected and reported at once, one
//! line per problem, so a broken post can be fixed in a single pass.

use super::frontmatter::{FrontMatter, Status, REQUIRED_HEADERS};
use std::{
    fmt,
    path::{Path, PathBuf},
};

/// All header problems found in one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub path: PathBuf,
    pub problems: Vec<String>,
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Post {} has the following issues:", self.path.display())?;
        for problem in &self.problems {
            write!(f, "\n{problem}")?;
        }
        Ok(())
    }
}

/// Check required headers, unknown headers and the status value.
///
/// `unknown` lists the header names outside the recognized set that should
/// be reported; the caller decides whether the framing is strict.
pub fn validate_headers(
    front_matter: &FrontMatter,
    unknown: &[String],
    path: &Path,
) -> Result<Status, ValidationReport> {
    let mut problems = Vec::new();

    for &field in REQUIRED_HEADERS {
        let value = front_matter.field(field).unwrap_or_default();
        if value.trim().is_empty() {
            problems.push(format!("missing a required header: {field}"));
        }
    }

    for field in unknown {
        problems.push(format!("contains unknown header: {field}"));
    }

    let status = front_matter.status.parse::<Status>();
    if status.is_err() {
        problems.push(format!(
            "Invalid value for status: {}",
            front_matter.status
        ));
    }

    match status {
        Ok(status) if problems.is_empty() => Ok(status),
        _ => Err(ValidationReport {
            path: path.to_path_buf(),
            problems,
        }),
    }
}
