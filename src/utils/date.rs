//! Date parsing and the handful of formats the outputs need.
//!
//! Published timestamps keep their original offset end to end, so every
//! format below describes the same instant the author wrote down.

use chrono::{DateTime, FixedOffset, Local};

/// Human-readable date shown on pages: "15-Jan-2025".
const DISPLAY_FORMAT: &str = "%d-%b-%Y";

/// Build timestamp shown on pages: "January 2, 2006 at 3:04 PM".
const NOW_FORMAT: &str = "%B %-d, %Y at %-I:%M %p";

/// Sitemap `<lastmod>` for pages without their own date.
const YMD_FORMAT: &str = "%Y-%m-%d";

/// Parse an ISO-8601 timestamp with offset ("2024-11-29T18:29:00-08:00").
pub fn parse_published(s: &str) -> Result<DateTime<FixedOffset>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(s.trim())
}

/// "29-Nov-2024"
pub fn display_date(dt: &DateTime<FixedOffset>) -> String {
    dt.format(DISPLAY_FORMAT).to_string()
}

/// RFC-1123 with numeric offset, as RSS `<pubDate>` expects:
/// "Fri, 29 Nov 2024 18:29:00 -0800".
pub fn rfc1123(dt: &DateTime<FixedOffset>) -> String {
    dt.to_rfc2822()
}

/// RFC-3339, as Atom and the sitemap expect: "2024-11-29T18:29:00-08:00".
pub fn rfc3339(dt: &DateTime<FixedOffset>) -> String {
    dt.to_rfc3339()
}

/// Run timestamps, captured once so every output agrees on "now".
#[derive(Debug, Clone)]
pub struct BuildTime {
    now: DateTime<FixedOffset>,
}

impl BuildTime {
    pub fn now() -> Self {
        Self {
            now: Local::now().fixed_offset(),
        }
    }

    #[cfg(test)]
    pub fn fixed(now: DateTime<FixedOffset>) -> Self {
        Self { now }
    }

    /// "January 2, 2006 at 3:04 PM"
    pub fn human(&self) -> String {
        self.now.format(NOW_FORMAT).to_string()
    }

    /// "2006-01-02"
    pub fn ymd(&self) -> String {
        self.now.format(YMD_FORMAT).to_string()
    }

    pub fn rfc1123(&self) -> String {
        rfc1123(&self.now)
    }

    pub fn rfc3339(&self) -> String {
        rfc3339(&self.now)
    }

    pub fn unix(&self) -> i64 {
        self.now.timestamp()
    }
}
