//! Date normalizer: maps raw CSV date cells onto the canonical timestamp
//! format written to the graph: `YYYY-MM-DDTHH:mm:ss.sssZ`, UTC.
//!
//! Rules are tried in order and the first match decides:
//!
//! 1. absent or blank → `None`
//! 2. contains `T` or `Z` → returned as-is (assumed ISO already)
//! 3. `A/B/C` → day/month/year, month/day/year when only the second segment
//!    can be a day; ambiguous triples are day-first
//! 4. `YYYY-MM-DD` → midnight UTC
//! 5. fallback parse over the formats in [`OFFSET_FORMATS`],
//!    [`NAIVE_DATETIME_FORMATS`] and [`NAIVE_DATE_FORMATS`]
//!
//! Rules 2–4 do no range checking: `45/13/2023` and `2023-02-30` are written
//! through and left for the graph store to reject.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use regex::Regex;

use crate::error::DateParseError;

const MIDNIGHT_UTC: &str = "T00:00:00.000Z";

static CALENDAR_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("valid regex"));

static YEAR_MONTH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{4})-([0-9]{1,2})$").expect("valid regex"));

static YEAR_ONLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}$").expect("valid regex"));

/// Formats carrying an explicit UTC offset.
pub const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M%:z",
];

/// Date-time formats without an offset; read as UTC.
pub const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%B %d, %Y %H:%M:%S",
    "%B %d, %Y %H:%M",
    "%d %B %Y %H:%M:%S",
    "%d %B %Y %H:%M",
];

/// Date-only formats; read as midnight UTC.
pub const NAIVE_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
    "%d %B, %Y",
    "%d-%b-%Y",
    "%A, %B %d, %Y",
    "%A, %d %B %Y",
];

/// Normalize a raw date cell to the canonical timestamp, or `None` when no
/// rule can interpret it. Never panics.
///
/// ```
/// use jingles_core::normalize;
///
/// assert_eq!(normalize("25/12/2023").as_deref(), Some("2023-12-25T00:00:00.000Z"));
/// assert_eq!(normalize("05/06/2023").as_deref(), Some("2023-06-05T00:00:00.000Z"));
/// assert_eq!(normalize(None), None);
/// ```
pub fn normalize<'a>(input: impl Into<Option<&'a str>>) -> Option<String> {
    let input: Option<&str> = input.into();
    let trimmed = input?.trim();
    if trimmed.is_empty() {
        return None;
    }

    if trimmed.contains(['T', 'Z']) {
        return Some(trimmed.to_string());
    }

    if let Some(canonical) = slash_triple(trimmed) {
        return Some(canonical);
    }

    if CALENDAR_DATE.is_match(trimmed) {
        return Some(format!("{trimmed}{MIDNIGHT_UTC}"));
    }

    match fallback_parse(trimmed) {
        Some(instant) => {
            tracing::debug!(input = trimmed, "date resolved by fallback parse");
            Some(instant.to_rfc3339_opts(SecondsFormat::Millis, true))
        }
        None => {
            tracing::debug!(input = trimmed, "date not recognised");
            None
        }
    }
}

/// Like [`normalize`], but absence is an error carrying the original input.
pub fn normalize_required<'a>(
    input: impl Into<Option<&'a str>>,
) -> Result<String, DateParseError> {
    let input: Option<&str> = input.into();
    normalize(input).ok_or_else(|| DateParseError::InvalidFormat {
        input: input.unwrap_or_default().to_string(),
    })
}

// ---------------------------------------------------------------------------
// Slash triples
// ---------------------------------------------------------------------------

fn slash_triple(s: &str) -> Option<String> {
    let segments: Vec<&str> = s.split('/').map(str::trim).collect();
    let [first, second, year] = segments.as_slice() else {
        return None;
    };
    if first.is_empty() || second.is_empty() || year.is_empty() {
        return None;
    }

    // Day-first unless only the second segment can be a day.
    let (day, month) = if leading_number(first) > Some(12) {
        (first, second)
    } else if leading_number(second) > Some(12) {
        (second, first)
    } else {
        (first, second)
    };

    Some(format!("{year}-{month:0>2}-{day:0>2}{MIDNIGHT_UTC}"))
}

/// Numeric value of the leading ASCII digits, `None` when there are none.
fn leading_number(segment: &str) -> Option<u64> {
    let end = segment
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(segment.len());
    let digits = &segment[..end];
    if digits.is_empty() {
        return None;
    }
    Some(digits.parse().unwrap_or(u64::MAX))
}

// ---------------------------------------------------------------------------
// Fallback parse
// ---------------------------------------------------------------------------

fn fallback_parse(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc));
    }

    let with_offset = OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.with_timezone(&Utc));
    if with_offset.is_some() {
        return with_offset;
    }

    let naive = NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            NAIVE_DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
                .or_else(|| partial_date(s))
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        });

    naive.map(|ndt| ndt.and_utc())
}

/// `YYYY-M` and `YYYY` resolve to the first day of the month / year.
fn partial_date(s: &str) -> Option<NaiveDate> {
    if let Some(caps) = YEAR_MONTH.captures(s) {
        let year = caps[1].parse().ok()?;
        let month = caps[2].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, 1);
    }
    if YEAR_ONLY.is_match(s) {
        return NaiveDate::from_ymd_opt(s.parse().ok()?, 1, 1);
    }
    None
}
