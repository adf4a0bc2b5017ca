use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;

/// The fixed date representations the platform accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFormat {
    /// `YYYY-MM-DD`
    IsoDate,
    /// `DD/MM/YYYY`
    BrDate,
    /// Full ISO-8601 timestamp
    IsoDateTime,
}

#[derive(Debug, PartialEq, Eq)]
pub enum DateParseError {
    /// Input matched none of the known formats.
    Unrecognized(String),
    /// Input matched a format shape but is not a valid date.
    Invalid(String),
}

impl std::fmt::Display for DateParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateParseError::Unrecognized(s) => write!(f, "unrecognized date format: {s}"),
            DateParseError::Invalid(s) => write!(f, "invalid date: {s}"),
        }
    }
}

impl std::error::Error for DateParseError {}

static ISO_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid regex"));
static BR_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}/\d{2}/\d{4}$").expect("valid regex"));
static ISO_DATETIME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}[T ]\d{2}:\d{2}").expect("valid regex"));

/// Detect which fixed representation an input string matches.
pub fn detect(input: &str) -> Option<DateFormat> {
    if ISO_DATE.is_match(input) {
        Some(DateFormat::IsoDate)
    } else if BR_DATE.is_match(input) {
        Some(DateFormat::BrDate)
    } else if ISO_DATETIME.is_match(input) {
        Some(DateFormat::IsoDateTime)
    } else {
        None
    }
}

/// Parse an input string in any recognized representation into a calendar date.
pub fn parse_date(input: &str) -> Result<NaiveDate, DateParseError> {
    let input = input.trim();
    match detect(input) {
        Some(DateFormat::IsoDate) => NaiveDate::parse_from_str(input, "%Y-%m-%d")
            .map_err(|_| DateParseError::Invalid(input.to_string())),
        Some(DateFormat::BrDate) => NaiveDate::parse_from_str(input, "%d/%m/%Y")
            .map_err(|_| DateParseError::Invalid(input.to_string())),
        Some(DateFormat::IsoDateTime) => DateTime::parse_from_rfc3339(input)
            .map(|dt| dt.date_naive())
            .map_err(|_| DateParseError::Invalid(input.to_string())),
        None => Err(DateParseError::Unrecognized(input.to_string())),
    }
}

/// Reformat a recognized date string into the requested representation.
pub fn reformat(input: &str, target: DateFormat) -> Result<String, DateParseError> {
    let date = parse_date(input)?;
    Ok(format_date(date, target))
}

/// Format a calendar date value into the requested representation.
pub fn format_date(date: NaiveDate, target: DateFormat) -> String {
    match target {
        DateFormat::IsoDate => date.format("%Y-%m-%d").to_string(),
        DateFormat::BrDate => date.format("%d/%m/%Y").to_string(),
        DateFormat::IsoDateTime => {
            let dt = date
                .and_hms_opt(0, 0, 0)
                .unwrap_or_default()
                .and_utc();
            dt.to_rfc3339()
        }
    }
}

/// Format a native timestamp value into the requested representation.
pub fn format_datetime(dt: &DateTime<Utc>, target: DateFormat) -> String {
    match target {
        DateFormat::IsoDate => dt.format("%Y-%m-%d").to_string(),
        DateFormat::BrDate => dt.format("%d/%m/%Y").to_string(),
        DateFormat::IsoDateTime => dt.to_rfc3339(),
    }
}
