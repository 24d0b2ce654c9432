//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// Common Defaults
// ============================================================================

pub fn r#false() -> bool {
    false
}

// ============================================================================
// [site] Section Defaults
// ============================================================================

pub mod site {
    pub fn author() -> String {
        "<YOUR_NAME>".into()
    }

    pub fn email() -> String {
        "user@noreply.draft".into()
    }

    pub fn language() -> String {
        "en-us".into()
    }

    pub fn locale() -> String {
        "en_US".into()
    }

    pub fn lang() -> String {
        "en".into()
    }

    pub fn back_label() -> String {
        "Back".into()
    }
}

// ============================================================================
// [build] Section Defaults
// ============================================================================

pub mod build {
    use std::path::PathBuf;

    pub fn input() -> PathBuf {
        "posts".into()
    }

    pub fn templates() -> PathBuf {
        "templates".into()
    }

    pub fn output() -> PathBuf {
        "public".into()
    }

    pub fn badges() -> Option<PathBuf> {
        None
    }
}

// ============================================================================
// [templates] Section Defaults
// ============================================================================

pub mod templates {
    pub fn shared() -> String {
        "shared.html".into()
    }

    pub fn index() -> String {
        "index.html".into()
    }

    pub fn tags_index() -> String {
        "tags.html".into()
    }

    pub fn tag_page() -> String {
        "tag.html".into()
    }

    pub fn search() -> String {
        "search.html".into()
    }
}

// ============================================================================
// [search] Section Defaults
// ============================================================================

pub mod search {
    use std::path::PathBuf;

    pub fn path() -> PathBuf {
        "search.json".into()
    }

    pub fn dir() -> String {
        "search".into()
    }
}
