//! Time formatting and range parsing utilities

use crate::domain::model::TimeSpec;
use crate::error::{StitchError, StitchResult};

/// Format a position as `M:SS` or `H:MM:SS` for display
pub fn format_position(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}

/// Parse a `START-END` range argument into a pair of times.
///
/// Each side accepts the same forms as [`TimeSpec::parse`]; only the last
/// `-` is treated as the separator so `1:30-2:00` parses as expected.
pub fn parse_range(range_str: &str) -> StitchResult<(TimeSpec, TimeSpec)> {
    let trimmed = range_str.trim();
    let (start_str, end_str) = trimmed.rsplit_once('-').ok_or_else(|| {
        StitchError::InvalidRange {
            reason: format!("expected START-END, got '{trimmed}'"),
        }
    })?;

    let start = TimeSpec::parse(start_str)?;
    let end = TimeSpec::parse(end_str)?;
    Ok((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_position_under_an_hour() {
        assert_eq!(format_position(0.0), "0:00");
        assert_eq!(format_position(65.9), "1:05");
        assert_eq!(format_position(599.0), "9:59");
    }

    #[test]
    fn format_position_with_hours() {
        assert_eq!(format_position(3600.0), "1:00:00");
        assert_eq!(format_position(3723.0), "1:02:03");
    }

    #[test]
    fn parse_range_plain_seconds() {
        let (start, end) = parse_range("2-5").unwrap();
        assert_eq!(start.seconds, 2.0);
        assert_eq!(end.seconds, 5.0);
    }

    #[test]
    fn parse_range_clock_forms() {
        let (start, end) = parse_range("1:30-2:00").unwrap();
        assert_eq!(start.seconds, 90.0);
        assert_eq!(end.seconds, 120.0);
    }

    #[test]
    fn parse_range_rejects_garbage() {
        assert!(parse_range("2").is_err());
        assert!(parse_range("a-b").is_err());
    }
}
