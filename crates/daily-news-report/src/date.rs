//! Report dates parsed from file names.

use std::fmt;
use std::path::Path;
use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;

/// The calendar day a report covers.
///
/// Reports are named `YYYY-MM-DD.md`; the file stem is the only source of
/// truth for the date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReportDate(NaiveDate);

impl ReportDate {
    /// Parse a `YYYY-MM-DD` string.
    ///
    /// The string must match the pattern exactly (zero-padded month and day)
    /// and name a real calendar day.
    pub fn parse(s: &str) -> Result<Self, DateError> {
        if !DATE_RE.is_match(s) {
            return Err(DateError::Pattern(s.to_string()));
        }

        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Self)
            .map_err(|_| DateError::Calendar(s.to_string()))
    }

    /// Parse the date from a report file's stem.
    pub fn from_path(path: &Path) -> Result<Self, DateError> {
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default();
        Self::parse(stem)
    }

    /// Find the first `YYYY-MM-DD` date inside free text, e.g. a heading.
    pub fn find_in(text: &str) -> Option<Self> {
        EMBEDDED_DATE_RE
            .find_iter(text)
            .find_map(|m| Self::parse(m.as_str()).ok())
    }

    /// File name of the page generated for this date.
    pub fn page_name(&self) -> String {
        format!("{}.html", self)
    }
}

impl fmt::Display for ReportDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}",
            self.0.year(),
            self.0.month(),
            self.0.day()
        )
    }
}

static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("Invalid date regex"));

static EMBEDDED_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]{4}-[0-9]{2}-[0-9]{2}").expect("Invalid embedded date regex"));

/// Errors that can occur when parsing a report date.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum DateError {
    #[error("'{0}' does not match YYYY-MM-DD")]
    Pattern(String),

    #[error("'{0}' is not a valid calendar date")]
    Calendar(String),
}
