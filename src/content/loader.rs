//! Source directory enumeration and metadata/body splitting.
//!
//! Two framings are recognized:
//!
//! ```text
//! ---                         title: Hello
//! title: Hello                link: hello
//! link: hello                 ==cut here==
//! ---
//!                             Body...
//! Body...
//! ```
//!
//! The left one is YAML front matter, the right one a loose `key: value`
//! header map. Both produce the same [`RawMetadata`].

use super::error::ContentError;
use serde_yaml::{Mapping, Value};
use std::{
    fs,
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

/// Line opening and closing a YAML front matter block.
const FRONT_MATTER_FENCE: &str = "---";

/// Line separating a header map from the body.
const CUT_MARKER: &str = "==cut here==";

/// How a document framed its metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Framing {
    FrontMatter,
    HeaderMap,
}

/// Metadata exactly as declared, before interpretation.
#[derive(Debug, Clone)]
pub struct RawMetadata {
    pub framing: Framing,
    pub fields: Mapping,
}

/// One source file split into metadata and body.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub metadata: RawMetadata,
    pub body: String,
}

/// Read every non-directory entry of `dir`, sorted by file name.
///
/// File names conventionally start with `YYYYMMDD`, so this is oldest first.
pub fn load_dir(dir: &Path) -> Result<Vec<SourceFile>, ContentError> {
    let mut sources = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|err| ContentError::Io(dir.to_path_buf(), err.into()))?;
        if entry.file_type().is_dir() {
            continue;
        }
        sources.push(load_file(entry.path())?);
    }

    Ok(sources)
}

/// Read and split a single source file.
pub fn load_file(path: &Path) -> Result<SourceFile, ContentError> {
    let text = fs::read_to_string(path).map_err(|err| ContentError::Io(path.to_path_buf(), err))?;
    let (metadata, body) = split_source(path, &text)?;
    Ok(SourceFile {
        path: path.to_path_buf(),
        metadata,
        body,
    })
}

/// Split file text into metadata and body, whichever framing it uses.
pub fn split_source(path: &Path, text: &str) -> Result<(RawMetadata, String), ContentError> {
    let first_line = text.lines().find(|line| !line.trim().is_empty());

    if first_line.map(str::trim_end) == Some(FRONT_MATTER_FENCE) {
        split_front_matter(path, text)
    } else if text.lines().any(|line| line.trim_end() == CUT_MARKER) {
        split_header_map(path, text)
    } else {
        Err(ContentError::MissingDelimiter(path.to_path_buf()))
    }
}

// ============================================================================
// Framings
// ============================================================================

fn split_front_matter(path: &Path, text: &str) -> Result<(RawMetadata, String), ContentError> {
    let mut lines = text.split_inclusive('\n');
    let mut yaml = String::new();

    // Skip up to and including the opening fence.
    for line in lines.by_ref() {
        if is_line(line, FRONT_MATTER_FENCE) {
            break;
        }
    }

    let mut closed = false;
    for line in lines.by_ref() {
        if is_line(line, FRONT_MATTER_FENCE) {
            closed = true;
            break;
        }
        yaml.push_str(line);
    }

    if !closed {
        return Err(ContentError::Unterminated(path.to_path_buf()));
    }

    let fields = if yaml.trim().is_empty() {
        Mapping::new()
    } else {
        serde_yaml::from_str(&yaml)
            .map_err(|err| ContentError::FrontMatter(path.to_path_buf(), err))?
    };

    let metadata = RawMetadata {
        framing: Framing::FrontMatter,
        fields,
    };
    Ok((metadata, trim_leading_blank_line(lines.collect())))
}

fn split_header_map(path: &Path, text: &str) -> Result<(RawMetadata, String), ContentError> {
    let mut lines = text.split_inclusive('\n');
    let mut fields = Mapping::new();

    for (number, line) in lines.by_ref().enumerate() {
        if is_line(line, CUT_MARKER) {
            break;
        }

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (key, value) = line
            .split_once(':')
            .ok_or_else(|| ContentError::Header(path.to_path_buf(), number + 1, line.to_owned()))?;
        let key = key.trim().to_lowercase();
        if key.is_empty() {
            return Err(ContentError::Header(
                path.to_path_buf(),
                number + 1,
                line.to_owned(),
            ));
        }

        fields.insert(Value::String(key), Value::String(value.trim().to_owned()));
    }

    let metadata = RawMetadata {
        framing: Framing::HeaderMap,
        fields,
    };
    Ok((metadata, trim_leading_blank_line(lines.collect())))
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Whether `line` (with its terminator) consists solely of `marker`.
fn is_line(line: &str, marker: &str) -> bool {
    line.trim_end_matches(['\n', '\r']).trim_end() == marker
}

/// Drop a single leading blank line left between the metadata and the body.
fn trim_leading_blank_line(body: String) -> String {
    match body.strip_prefix("\r\n").or_else(|| body.strip_prefix('\n')) {
        Some(rest) => rest.to_owned(),
        None => body,
    }
}
