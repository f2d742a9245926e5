//! Tolerant date/time parsing with a fixed cascade of accepted formats.
//!
//! Inputs without an explicit offset are read as UTC. Every pattern must
//! consume the whole input; the first one that does wins.
//!
//! chrono's `parse_from_str` tolerates short fields and loose whitespace, so
//! inputs are first held to a fixed-width shape (2-digit fields, exact
//! separators, no surrounding whitespace) before the cascade runs.

use std::fmt;
use std::sync::LazyLock;

use chrono::{DateTime, FixedOffset, NaiveDateTime, NaiveTime, Timelike};
use regex::Regex;
use thiserror::Error;

/// Date used to anchor time-only inputs. Carries no meaning for callers.
pub const TIME_ANCHOR_DATE: &str = "2020-01-01";

/// `yyyy-MM-ddTHH:mm[:ss[.f]][offset]` or `yyyy-MM-dd HH:mm:ss[.f][offset]`
static DATE_TIME_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[0-9]{4}-[0-9]{2}-[0-9]{2}(T[0-9]{2}:[0-9]{2}(:[0-9]{2}(\.[0-9]{1,9})?)?| [0-9]{2}:[0-9]{2}:[0-9]{2}(\.[0-9]{1,9})?)(Z|[+-][0-9]{2}:[0-9]{2})?$",
    )
    .expect("valid regex")
});

/// `HH:mm[:ss[.f]][offset]`
static TIME_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{2}:[0-9]{2}(:[0-9]{2}(\.[0-9]{1,9})?)?(Z|[+-][0-9]{2}:[0-9]{2})?$")
        .expect("valid regex")
});

/// No accepted pattern matched the input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unrecognized date/time: `{text}`")]
pub struct DateTimeParseError {
    text: String,
}

impl DateTimeParseError {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// The original, unmodified input
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// How a pattern obtains its UTC offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OffsetForm {
    /// `+HH:MM` / `-HH:MM` in the input
    Explicit,
    /// Literal `Z` suffix
    Zulu,
    /// No offset in the input; UTC is assumed
    Absent,
}

#[derive(Debug, Clone, Copy)]
struct Pattern {
    name: &'static str,
    format: &'static str,
    offset: OffsetForm,
}

impl Pattern {
    const fn new(name: &'static str, format: &'static str, offset: OffsetForm) -> Self {
        Self {
            name,
            format,
            offset,
        }
    }

    fn parse(&self, text: &str) -> Option<DateTime<FixedOffset>> {
        match self.offset {
            OffsetForm::Explicit => DateTime::parse_from_str(text, self.format).ok(),
            OffsetForm::Zulu | OffsetForm::Absent => NaiveDateTime::parse_from_str(text, self.format)
                .ok()
                .map(|naive| naive.and_utc().fixed_offset()),
        }
    }
}

// `%.f` accepts an absent fraction, so each entry covers both the
// fractional and whole-second spellings.
const ISO_PATTERNS: &[Pattern] = &[
    Pattern::new("iso_offset", "%Y-%m-%dT%H:%M:%S%.f%:z", OffsetForm::Explicit),
    Pattern::new("iso_instant", "%Y-%m-%dT%H:%M:%S%.fZ", OffsetForm::Zulu),
    Pattern::new("iso_local", "%Y-%m-%dT%H:%M:%S%.f", OffsetForm::Absent),
    Pattern::new("iso_offset_minutes", "%Y-%m-%dT%H:%M%:z", OffsetForm::Explicit),
    Pattern::new("iso_instant_minutes", "%Y-%m-%dT%H:%MZ", OffsetForm::Zulu),
    Pattern::new("iso_local_minutes", "%Y-%m-%dT%H:%M", OffsetForm::Absent),
];

const SPACED_PATTERNS: &[Pattern] = &[
    Pattern::new("spaced_offset", "%Y-%m-%d %H:%M:%S%.f%:z", OffsetForm::Explicit),
    Pattern::new("spaced_zulu", "%Y-%m-%d %H:%M:%S%.fZ", OffsetForm::Zulu),
    Pattern::new("spaced_local", "%Y-%m-%d %H:%M:%S%.f", OffsetForm::Absent),
];

fn first_match<'a>(
    patterns: impl IntoIterator<Item = &'a Pattern>,
    text: &str,
) -> Option<DateTime<FixedOffset>> {
    patterns.into_iter().find_map(|pattern| {
        let parsed = pattern.parse(text)?;
        tracing::trace!(pattern = pattern.name, input = text, "matched date/time pattern");
        Some(parsed)
    })
}

/// Parses a date-time string into an absolute instant with its UTC offset.
///
/// Accepted, in order: ISO-8601 date-times (offset, `Z`, or none; seconds
/// and fraction optional), then `yyyy-MM-dd HH:mm:ss[.fff][±HH:MM|Z]`.
///
/// # Examples
///
/// ```
/// use gamecharacter::parse_date_time;
///
/// let dt = parse_date_time("2024-01-05 10:00:00.250+02:00").unwrap();
/// assert_eq!(dt.offset().local_minus_utc(), 2 * 3600);
///
/// let dt = parse_date_time("2024-01-05 10:00:00").unwrap();
/// assert_eq!(dt.offset().local_minus_utc(), 0);
/// ```
///
/// # Errors
///
/// Returns [`DateTimeParseError`] carrying the input when no pattern matches.
pub fn parse_date_time(text: &str) -> Result<DateTime<FixedOffset>, DateTimeParseError> {
    if !DATE_TIME_SHAPE.is_match(text) {
        return Err(DateTimeParseError::new(text));
    }
    first_match(ISO_PATTERNS.iter().chain(SPACED_PATTERNS), text)
        .ok_or_else(|| DateTimeParseError::new(text))
}

/// A time of day with a fixed UTC offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OffsetTime {
    time: NaiveTime,
    offset: FixedOffset,
}

impl OffsetTime {
    pub fn new(time: NaiveTime, offset: FixedOffset) -> Self {
        Self { time, offset }
    }

    pub fn time(&self) -> NaiveTime {
        self.time
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    pub fn hour(&self) -> u32 {
        self.time.hour()
    }

    pub fn minute(&self) -> u32 {
        self.time.minute()
    }

    pub fn second(&self) -> u32 {
        self.time.second()
    }
}

impl fmt::Display for OffsetTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.time, self.offset)
    }
}

impl From<DateTime<FixedOffset>> for OffsetTime {
    fn from(dt: DateTime<FixedOffset>) -> Self {
        Self::new(dt.time(), *dt.offset())
    }
}

/// Parses an ISO-8601 time (`HH:mm[:ss[.fff]]`, optional offset or `Z`).
///
/// The input is anchored to [`TIME_ANCHOR_DATE`] for parsing; only the
/// time of day and offset are returned.
///
/// ```
/// use gamecharacter::parse_time;
///
/// let t = parse_time("14:30:00+05:00").unwrap();
/// assert_eq!((t.hour(), t.minute()), (14, 30));
/// assert_eq!(t.offset().local_minus_utc(), 5 * 3600);
/// ```
pub fn parse_time(text: &str) -> Result<OffsetTime, DateTimeParseError> {
    if !TIME_SHAPE.is_match(text) {
        return Err(DateTimeParseError::new(text));
    }
    let anchored = format!("{TIME_ANCHOR_DATE}T{text}");
    first_match(ISO_PATTERNS, &anchored)
        .map(OffsetTime::from)
        .ok_or_else(|| DateTimeParseError::new(text))
}
