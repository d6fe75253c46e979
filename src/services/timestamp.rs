//! Leading log timestamp recognition.
//!
//! Only a timestamp at the very start of the line counts, in the form
//! `[YYYY.MM.DD-HH.MM.SS:mmm]`. Further bracketed groups after it are ignored.

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;

/// Extracts `[YYYY.MM.DD-HH.MM.SS:mmm]` prefixes from log lines.
pub struct TimestampExtractor {
    pattern: Regex,
}

impl TimestampExtractor {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(
                r"^\[(\d{4})\.(\d{2})\.(\d{2})-(\d{2})\.(\d{2})\.(\d{2}):(\d{3})\]",
            )
            .expect("Invalid timestamp regex"),
        }
    }

    /// Parse the leading timestamp of `line`.
    ///
    /// Returns `None` when the prefix is absent or names an impossible
    /// calendar time; either way the line stays eligible for matching.
    pub fn extract(&self, line: &str) -> Option<NaiveDateTime> {
        let caps = self.pattern.captures(line)?;
        let field = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<u32>().ok());

        let year = i32::try_from(field(1)?).ok()?;
        let parsed = NaiveDate::from_ymd_opt(year, field(2)?, field(3)?)
            .and_then(|date| date.and_hms_milli_opt(field(4)?, field(5)?, field(6)?, field(7)?));

        if parsed.is_none() {
            tracing::debug!("Ignoring out-of-range timestamp prefix: {}", &caps[0]);
        }
        parsed
    }
}

impl Default for TimestampExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_extract_leading_timestamp() {
        let extractor = TimestampExtractor::new();
        let ts = extractor
            .extract("[2024.06.10-13.45.07:123][  0]LogInit: boot")
            .unwrap();

        assert_eq!(ts.date(), NaiveDate::from_ymd_opt(2024, 6, 10).unwrap());
        assert_eq!((ts.hour(), ts.minute(), ts.second()), (13, 45, 7));
        assert_eq!(ts.nanosecond(), 123_000_000);
    }

    #[test]
    fn test_timestamp_must_be_at_start() {
        let extractor = TimestampExtractor::new();
        assert!(extractor.extract("boot [2024.06.10-13.45.07:123]").is_none());
        assert!(extractor.extract(" [2024.06.10-13.45.07:123]").is_none());
    }

    #[test]
    fn test_malformed_timestamps_are_absent() {
        let extractor = TimestampExtractor::new();
        assert!(extractor.extract("[2024.06.10-13.45.07]").is_none());
        assert!(extractor.extract("[2024.13.10-13.45.07:000]").is_none());
        assert!(extractor.extract("[2024.02.30-00.00.00:000]").is_none());
        assert!(extractor.extract("").is_none());
    }
}
