//! Flexible date parsing and the two canonical output patterns.
//!
//! User-supplied dates are tried against a fixed list of input formats, in
//! order, first match wins. The storage file uses exactly one pattern
//! (`yyyy-MM-dd HH:mm`), distinct from the human display pattern
//! (`MMM d yyyy, h:mm a`), so a stored value always re-parses via the
//! format list (it is entry three).

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::TrackerError;

/// Pattern used in the storage file. Never shown to the user.
const STORAGE_PATTERN: &str = "%Y-%m-%d %H:%M";

/// Pattern used when rendering a task for display, e.g. `Dec 2 2019, 6:00 PM`.
const DISPLAY_PATTERN: &str = "%b %-d %Y, %-I:%M %p";

/// Pattern for the `date` command argument.
const CALENDAR_PATTERN: &str = "%Y-%m-%d";

/// One accepted input format.
///
/// `human` is the name shown in error help; `chrono` is the equivalent
/// strftime pattern actually used for parsing.
struct FormatSpec {
    chrono: &'static str,
    human: &'static str,
    example: &'static str,
    /// Date-only patterns parse as a calendar date and default to 00:00.
    date_only: bool,
}

/// Accepted input formats, tried in order. First match wins.
const INPUT_FORMATS: &[FormatSpec] = &[
    FormatSpec {
        chrono: "%d/%m/%Y %H%M",
        human: "d/M/yyyy HHmm",
        example: "2/12/2019 1800",
        date_only: false,
    },
    FormatSpec {
        chrono: "%Y-%m-%d %H%M",
        human: "yyyy-MM-dd HHmm",
        example: "2024-02-13 1800",
        date_only: false,
    },
    FormatSpec {
        chrono: "%Y-%m-%d %H:%M",
        human: "yyyy-MM-dd HH:mm",
        example: "2024-02-13 18:00",
        date_only: false,
    },
    FormatSpec {
        chrono: "%Y-%m-%d",
        human: "yyyy-MM-dd",
        example: "2024-02-13 (time defaults to 00:00)",
        date_only: true,
    },
    FormatSpec {
        chrono: "%b %d %Y %I:%M %p",
        human: "MMM d yyyy h:mm a",
        example: "Dec 2 2019 6:00 PM",
        date_only: false,
    },
    FormatSpec {
        chrono: "%Y/%m/%d %H:%M",
        human: "yyyy/MM/dd HH:mm",
        example: "2019/12/02 18:00",
        date_only: false,
    },
];

/// Parse a user-supplied date/time string against the accepted formats.
///
/// # Errors
/// Returns [`TrackerError::DateParse`] when no format matches; its display
/// text carries the supported-format list.
pub fn parse_flexible(input: &str) -> Result<NaiveDateTime, TrackerError> {
    let input = input.trim();
    for spec in INPUT_FORMATS {
        if spec.date_only {
            if let Ok(date) = NaiveDate::parse_from_str(input, spec.chrono) {
                return Ok(date.and_time(NaiveTime::MIN));
            }
        } else if let Ok(datetime) = NaiveDateTime::parse_from_str(input, spec.chrono) {
            return Ok(datetime);
        }
    }
    Err(TrackerError::DateParse {
        input: input.to_string(),
    })
}

/// Parse a `yyyy-MM-dd` calendar date (the `date` command argument).
pub fn parse_calendar_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), CALENDAR_PATTERN).ok()
}

/// Render a timestamp in the storage pattern.
pub fn format_storage(value: NaiveDateTime) -> String {
    value.format(STORAGE_PATTERN).to_string()
}

/// Render a timestamp in the human display pattern.
pub fn format_display(value: NaiveDateTime) -> String {
    value.format(DISPLAY_PATTERN).to_string()
}

/// Render a calendar date as a short day header, e.g. `13 Feb 2024`.
pub fn format_day(date: NaiveDate) -> String {
    date.format("%-d %b %Y").to_string()
}

/// Bulleted list of the supported input formats with examples.
///
/// Embedded in the [`TrackerError::DateParse`] display text.
pub fn supported_formats_help() -> String {
    INPUT_FORMATS
        .iter()
        .map(|spec| format!(" - {} (e.g., {})", spec.human, spec.example))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, 0)
            .unwrap()
    }

    #[test]
    fn parses_slash_day_first_format() {
        assert_eq!(parse_flexible("2/12/2019 1800").unwrap(), at(2019, 12, 2, 18, 0));
    }

    #[test]
    fn parses_iso_with_compact_time() {
        assert_eq!(parse_flexible("2024-02-13 1800").unwrap(), at(2024, 2, 13, 18, 0));
    }

    #[test]
    fn parses_iso_with_colon_time() {
        assert_eq!(parse_flexible("2024-02-13 18:00").unwrap(), at(2024, 2, 13, 18, 0));
    }

    #[test]
    fn date_only_defaults_to_midnight() {
        assert_eq!(parse_flexible("2024-02-13").unwrap(), at(2024, 2, 13, 0, 0));
    }

    #[test]
    fn parses_month_name_with_meridiem() {
        assert_eq!(parse_flexible("Dec 2 2019 6:00 PM").unwrap(), at(2019, 12, 2, 18, 0));
    }

    #[test]
    fn parses_slash_iso_format() {
        assert_eq!(parse_flexible("2019/12/02 18:00").unwrap(), at(2019, 12, 2, 18, 0));
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert_eq!(parse_flexible("  2024-02-13  ").unwrap(), at(2024, 2, 13, 0, 0));
    }

    #[test]
    fn rejects_unsupported_text() {
        let err = parse_flexible("not-a-date").unwrap_err();
        assert!(matches!(err, TrackerError::DateParse { .. }));
        assert!(err.to_string().contains("d/M/yyyy HHmm"));
    }

    #[test]
    fn storage_pattern_round_trips_through_the_format_list() {
        let original = at(2025, 2, 18, 18, 0);
        let stored = format_storage(original);
        assert_eq!(stored, "2025-02-18 18:00");
        assert_eq!(parse_flexible(&stored).unwrap(), original);
    }

    #[test]
    fn display_pattern_is_distinct_from_storage() {
        let value = at(2019, 12, 2, 18, 0);
        assert_eq!(format_display(value), "Dec 2 2019, 6:00 PM");
    }

    #[test]
    fn calendar_date_parses_iso_only() {
        assert_eq!(
            parse_calendar_date("2024-02-13"),
            NaiveDate::from_ymd_opt(2024, 2, 13)
        );
        assert_eq!(parse_calendar_date("13/02/2024"), None);
    }

    #[test]
    fn day_header_format() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 13).unwrap();
        assert_eq!(format_day(date), "13 Feb 2024");
    }
}
