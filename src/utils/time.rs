//! Permissive parsing of provider-authored timestamp strings

use tracing::{debug, warn};

use crate::domain::model::{ParsedTimestamp, TimeRange};

/// Separator between the two endpoints of a ranged timestamp
const RANGE_SEPARATOR: &str = " - ";

/// Largest endpoint accepted, in seconds. Past this, adding
/// [`TimeRange::MIN_WIDTH`] would no longer be exact enough to widen a range.
pub const MAX_ENDPOINT_SECS: f64 = 86_400.0;

/// Timestamp parser for the loosely formatted strings an analysis provider returns.
///
/// Accepted endpoint shapes are `"0.5"`, `"0.5s"`, `"MM:SS"` and `"HH:MM:SS"`,
/// where the last component may carry a fraction (`"00:01.3"`). Anything else,
/// including endpoints beyond [`MAX_ENDPOINT_SECS`], degrades to `0` seconds
/// instead of failing, so one bad phase never aborts an analysis.
pub struct TimestampParser;

impl TimestampParser {
    /// Create a new timestamp parser
    pub fn new() -> Self {
        Self
    }
}

impl Default for TimestampParser {
    fn default() -> Self {
        Self::new()
    }
}

impl TimestampParser {
    /// Parse a raw timestamp into a point or a two-ended range
    pub fn parse(&self, raw: &str) -> ParsedTimestamp {
        let parts: Vec<&str> = raw.split(RANGE_SEPARATOR).collect();
        let parsed = if parts.len() == 2 {
            ParsedTimestamp::Range {
                start: self.parse_endpoint(parts[0]),
                end: self.parse_endpoint(parts[1]),
            }
        } else {
            ParsedTimestamp::Point(self.parse_endpoint(raw))
        };

        debug!(raw, ?parsed, "Parsed timestamp");
        parsed
    }

    /// Parse a raw timestamp into the clip range it covers
    pub fn parse_range(&self, raw: &str) -> TimeRange {
        self.parse(raw).to_range()
    }

    /// Parse one endpoint to seconds, degrading to `0` on malformed input.
    ///
    /// Hours and minutes must be whole numbers: `"1.5:30"` is malformed and
    /// yields `0`, it is not truncated to `1:30`. Only the seconds component
    /// may be fractional.
    pub fn parse_endpoint(&self, raw: &str) -> f64 {
        match Self::try_parse_endpoint(raw) {
            Some(seconds) => seconds,
            None => {
                warn!(raw, "Unparseable timestamp endpoint, using 0s");
                0.0
            }
        }
    }

    fn try_parse_endpoint(raw: &str) -> Option<f64> {
        let trimmed = raw.trim();
        let cleaned = trimmed
            .strip_suffix(|c: char| c == 's' || c == 'S')
            .unwrap_or(trimmed)
            .trim();

        let parts: Vec<&str> = cleaned.split(':').collect();
        let seconds = match parts.as_slice() {
            [seconds] => Self::parse_seconds(seconds)?,
            [minutes, seconds] => {
                Self::parse_whole(minutes)? * 60.0 + Self::parse_seconds(seconds)?
            }
            [hours, minutes, seconds] => {
                Self::parse_whole(hours)? * 3600.0
                    + Self::parse_whole(minutes)? * 60.0
                    + Self::parse_seconds(seconds)?
            }
            _ => return None,
        };

        Some(seconds).filter(|seconds| *seconds <= MAX_ENDPOINT_SECS)
    }

    /// Hour or minute component: a non-negative integer
    fn parse_whole(component: &str) -> Option<f64> {
        component.trim().parse::<u32>().ok().map(f64::from)
    }

    /// Seconds component: a finite, non-negative number
    fn parse_seconds(component: &str) -> Option<f64> {
        component
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|seconds| seconds.is_finite() && *seconds >= 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> TimestampParser {
        TimestampParser::new()
    }

    #[test]
    fn test_endpoint_minutes_seconds() {
        assert_eq!(parser().parse_endpoint("1:30"), 90.0);
    }

    #[test]
    fn test_endpoint_seconds_suffix() {
        assert_eq!(parser().parse_endpoint("0.2s"), 0.2);
        assert_eq!(parser().parse_endpoint(" 0.5S "), 0.5);
        assert_eq!(parser().parse_endpoint("4"), 4.0);
    }

    #[test]
    fn test_endpoint_hours_minutes_seconds() {
        assert_eq!(parser().parse_endpoint("01:02:03"), 3723.0);
    }

    #[test]
    fn test_endpoint_fractional_seconds_component() {
        assert_eq!(parser().parse_endpoint("00:01.3"), 1.3);
    }

    #[test]
    fn test_endpoint_garbage_degrades_to_zero() {
        assert_eq!(parser().parse_endpoint("garbage"), 0.0);
        assert_eq!(parser().parse_endpoint(""), 0.0);
        assert_eq!(parser().parse_endpoint("1:2:3:4"), 0.0);
        assert_eq!(parser().parse_endpoint("1.5:30"), 0.0);
        assert_eq!(parser().parse_endpoint("-3"), 0.0);
        assert_eq!(parser().parse_endpoint("inf"), 0.0);
    }

    #[test]
    fn test_endpoint_beyond_bound_degrades_to_zero() {
        assert_eq!(parser().parse_endpoint("1e17s"), 0.0);
        assert_eq!(parser().parse_endpoint("25:00:00"), 0.0);
        assert_eq!(parser().parse_endpoint("24:00:00"), MAX_ENDPOINT_SECS);
    }

    #[test]
    fn test_huge_collapsed_range_keeps_width() {
        let range = parser().parse_range("1e17s - 1e17s");
        assert_eq!(range.start(), 0.0);
        assert_eq!(range.duration(), TimeRange::MIN_WIDTH);
    }

    #[test]
    fn test_sub_millisecond_range_widened() {
        let range = parser().parse_range("0.2s - 0.2004s");
        assert_eq!(range.start(), 0.2);
        assert_eq!(range.end(), 1.2);
    }

    #[test]
    fn test_range_two_parts() {
        let range = parser().parse_range("0.2s - 0.8s");
        assert_eq!(range.start(), 0.2);
        assert_eq!(range.end(), 0.8);
    }

    #[test]
    fn test_range_clock_format() {
        let range = parser().parse_range("00:01 - 00:02");
        assert_eq!(range.start(), 1.0);
        assert_eq!(range.end(), 2.0);
    }

    #[test]
    fn test_single_value_widened() {
        let range = parser().parse_range("1.5s");
        assert_eq!(range.start(), 1.5);
        assert_eq!(range.end(), 2.5);
    }

    #[test]
    fn test_zero_length_range_widened() {
        let range = parser().parse_range("2.0s - 2.0s");
        assert_eq!(range.start(), 2.0);
        assert_eq!(range.end(), 3.0);
    }

    #[test]
    fn test_unseparated_range_is_single_endpoint() {
        // No " - " separator, so the whole string is one (malformed) endpoint
        let range = parser().parse_range("0.2s-0.8s");
        assert_eq!(range.start(), 0.0);
        assert_eq!(range.end(), 1.0);
    }

    #[test]
    fn test_three_part_split_is_single_endpoint() {
        let parsed = parser().parse("1s - 2s - 3s");
        assert_eq!(parsed, ParsedTimestamp::Point(0.0));
    }

    #[test]
    fn test_parse_keeps_point_for_seek() {
        assert_eq!(parser().parse("00:03").seek_point(), 3.0);
        assert_eq!(parser().parse("1s - 2s").seek_point(), 1.5);
    }
}
