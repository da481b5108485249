//! Timestamp parsing and differencing
//!
//! Track timestamps have the shape `YYYY-MM-DDTHH:MM:SS.mmm`, usually followed by
//! a `Z`. The date-time part is parsed with a fixed format and interpreted as UTC.
//! The character after the seconds is skipped, and the digit run after it is read
//! as an integer number of milliseconds.
//!
//! A failed parse never aborts a computation over a whole track: [`TimeDelta`]
//! records the failure and contributes zero seconds instead.

use time::macros::format_description;
use time::{Duration, OffsetDateTime, PrimitiveDateTime};

/// Length of the fixed `YYYY-MM-DDTHH:MM:SS` prefix
const DATE_TIME_LEN: usize = 19;

/// Reasons a track timestamp could not be parsed
#[derive(Debug, Clone, thiserror::Error)]
pub enum TimestampError {
    #[error("timestamp {0:?} is shorter than YYYY-MM-DDTHH:MM:SS")]
    TooShort(String),

    #[error("invalid date-time in timestamp {input:?}: {source}")]
    DateTime {
        input: String,
        #[source]
        source: time::error::Parse,
    },

    #[error("timestamp {0:?} has no fractional seconds separator")]
    MissingSeparator(String),

    #[error("timestamp {0:?} has no millisecond digits")]
    MissingMilliseconds(String),

    #[error("timestamp {0:?} is out of the representable range")]
    OutOfRange(String),
}

/// Parse a track timestamp into a UTC instant
pub fn parse_timestamp(text: &str) -> Result<OffsetDateTime, TimestampError> {
    let head = text
        .get(..DATE_TIME_LEN)
        .ok_or_else(|| TimestampError::TooShort(text.to_string()))?;

    let date_time = PrimitiveDateTime::parse(
        head,
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
    )
    .map_err(|source| TimestampError::DateTime {
        input: text.to_string(),
        source,
    })?;

    // Skip exactly one separator character, whatever it is
    let mut rest = text[DATE_TIME_LEN..].chars();
    if rest.next().is_none() {
        return Err(TimestampError::MissingSeparator(text.to_string()));
    }
    let fraction = rest.as_str();

    let digits = fraction.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return Err(TimestampError::MissingMilliseconds(text.to_string()));
    }
    let milliseconds: i64 = fraction[..digits]
        .parse()
        .map_err(|_| TimestampError::OutOfRange(text.to_string()))?;

    date_time
        .assume_utc()
        .checked_add(Duration::milliseconds(milliseconds))
        .ok_or_else(|| TimestampError::OutOfRange(text.to_string()))
}

/// Whole seconds elapsed from `start` to `end`, truncating sub-second precision
pub fn time_difference(start: &str, end: &str) -> crate::Result<i64> {
    Ok(whole_seconds_between(start, end)?)
}

fn whole_seconds_between(start: &str, end: &str) -> Result<i64, TimestampError> {
    let start = parse_timestamp(start)?;
    let end = parse_timestamp(end)?;
    Ok((end - start).whole_seconds())
}

/// Time difference between two consecutive track points
///
/// Either the exact number of seconds, or a zero substituted for a pair whose
/// timestamps could not be parsed.
#[derive(Debug, Clone)]
pub enum TimeDelta {
    Exact(i64),
    Substituted(TimestampError),
}

impl TimeDelta {
    /// Difference `end - start`, substituting zero (with a warning) on parse failure
    pub fn between(start: &str, end: &str) -> Self {
        match whole_seconds_between(start, end) {
            Ok(seconds) => TimeDelta::Exact(seconds),
            Err(err) => {
                tracing::warn!("Error in time calculation, counting 0 s: {err}");
                TimeDelta::Substituted(err)
            }
        }
    }

    /// Seconds contributed to aggregates (zero when substituted)
    #[inline]
    pub fn seconds(&self) -> i64 {
        match self {
            TimeDelta::Exact(seconds) => *seconds,
            TimeDelta::Substituted(_) => 0,
        }
    }

    #[inline]
    pub fn is_substituted(&self) -> bool {
        matches!(self, TimeDelta::Substituted(_))
    }

    /// The parse failure, if zero was substituted
    pub fn error(&self) -> Option<&TimestampError> {
        match self {
            TimeDelta::Exact(_) => None,
            TimeDelta::Substituted(err) => Some(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_milliseconds() {
        let instant = parse_timestamp("2024-05-01T07:30:15.250Z").unwrap();
        assert_eq!(instant.hour(), 7);
        assert_eq!(instant.minute(), 30);
        assert_eq!(instant.second(), 15);
        assert_eq!(instant.millisecond(), 250);
        assert_eq!(instant.offset(), time::UtcOffset::UTC);
    }

    #[test]
    fn test_fraction_is_read_as_integer_milliseconds() {
        // ".5" is five milliseconds, not half a second
        let instant = parse_timestamp("2024-05-01T07:30:15.5Z").unwrap();
        assert_eq!(instant.millisecond(), 5);
    }

    #[test]
    fn test_difference_truncates_sub_seconds() {
        assert_eq!(
            time_difference("2024-05-01T07:00:00.900Z", "2024-05-01T07:00:02.100Z").unwrap(),
            1
        );
        assert_eq!(
            time_difference("2024-05-01T07:00:00.000Z", "2024-05-01T07:10:00.000Z").unwrap(),
            600
        );
    }

    #[test]
    fn test_negative_difference() {
        assert_eq!(
            time_difference("2024-05-01T07:00:10.000Z", "2024-05-01T07:00:00.000Z").unwrap(),
            -10
        );
    }

    #[test]
    fn test_difference_across_midnight() {
        assert_eq!(
            time_difference("2024-12-31T23:59:30.000Z", "2025-01-01T00:00:30.000Z").unwrap(),
            60
        );
    }

    #[test]
    fn test_missing_milliseconds_fails() {
        assert!(matches!(
            parse_timestamp("2024-05-01T07:30:15Z"),
            Err(TimestampError::MissingMilliseconds(_))
        ));
        assert!(matches!(
            parse_timestamp("2024-05-01T07:30:15"),
            Err(TimestampError::MissingSeparator(_))
        ));
    }

    #[test]
    fn test_malformed_date_time_fails() {
        assert!(matches!(
            parse_timestamp(""),
            Err(TimestampError::TooShort(_))
        ));
        assert!(matches!(
            parse_timestamp("2024-13-01T07:30:15.000Z"),
            Err(TimestampError::DateTime { .. })
        ));
        assert!(matches!(
            parse_timestamp("not a timestamp at all"),
            Err(TimestampError::DateTime { .. })
        ));
    }

    #[test]
    fn test_time_delta_substitutes_zero() {
        let delta = TimeDelta::between("2024-05-01T07:00:00.000Z", "garbage");
        assert!(delta.is_substituted());
        assert_eq!(delta.seconds(), 0);
        assert!(delta.error().is_some());

        let delta = TimeDelta::between("2024-05-01T07:00:00.000Z", "2024-05-01T07:00:42.000Z");
        assert!(!delta.is_substituted());
        assert_eq!(delta.seconds(), 42);
    }
}
