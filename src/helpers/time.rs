use std::fmt;

use crate::error::ParseError;

/// A clock time within one day, parsed from the `"HH:MM Uhr"` wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeOfDay {
    pub hour: u32,
    pub minute: u32,
}

impl TimeOfDay {
    /// Fractional hours since midnight.
    pub fn as_hours(&self) -> f64 {
        f64::from(self.hour) + f64::from(self.minute) / 60.0
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02} Uhr", self.hour, self.minute)
    }
}

/// Parse a localized clock-time string such as `"08:00 Uhr"`.
///
/// The trailing `Uhr` suffix is optional. Hour must be in 0-23, minute in
/// 0-59; anything else is rejected.
pub fn parse_clock_time(value: &str) -> Result<TimeOfDay, ParseError> {
    let trimmed = value.trim();
    let bare = trimmed
        .strip_suffix("Uhr")
        .map(str::trim_end)
        .unwrap_or(trimmed);

    let (hour_part, minute_part) = bare
        .split_once(':')
        .ok_or_else(|| ParseError::MissingSeparator(value.to_string()))?;

    let hour: u32 = hour_part
        .trim()
        .parse()
        .map_err(|_| ParseError::InvalidComponent(hour_part.trim().to_string()))?;
    let minute: u32 = minute_part
        .trim()
        .parse()
        .map_err(|_| ParseError::InvalidComponent(minute_part.trim().to_string()))?;

    if hour > 23 {
        return Err(ParseError::HourOutOfRange(hour));
    }
    if minute > 59 {
        return Err(ParseError::MinuteOutOfRange(minute));
    }

    Ok(TimeOfDay { hour, minute })
}

/// Elapsed hours between two clock times on the same day.
///
/// A stop before the start yields a negative value; there is no midnight
/// rollover (overnight shifts are a known gap of the input format).
pub fn elapsed_hours(start: TimeOfDay, stop: TimeOfDay) -> f64 {
    stop.as_hours() - start.as_hours()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_time_with_suffix() {
        let time = parse_clock_time("08:00 Uhr").unwrap();
        assert_eq!(time, TimeOfDay { hour: 8, minute: 0 });
    }

    #[test]
    fn parses_time_without_suffix() {
        let time = parse_clock_time("17:30").unwrap();
        assert_eq!(
            time,
            TimeOfDay {
                hour: 17,
                minute: 30
            }
        );
    }

    #[test]
    fn rejects_missing_separator() {
        assert_eq!(
            parse_clock_time("0800 Uhr"),
            Err(ParseError::MissingSeparator("0800 Uhr".to_string()))
        );
    }

    #[test]
    fn rejects_non_numeric_component() {
        assert_eq!(
            parse_clock_time("ab:00 Uhr"),
            Err(ParseError::InvalidComponent("ab".to_string()))
        );
        assert_eq!(
            parse_clock_time("08:xx"),
            Err(ParseError::InvalidComponent("xx".to_string()))
        );
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert_eq!(
            parse_clock_time("24:00 Uhr"),
            Err(ParseError::HourOutOfRange(24))
        );
        assert_eq!(
            parse_clock_time("12:60 Uhr"),
            Err(ParseError::MinuteOutOfRange(60))
        );
    }

    #[test]
    fn rejects_negative_component() {
        assert!(matches!(
            parse_clock_time("-1:30"),
            Err(ParseError::InvalidComponent(_))
        ));
    }

    #[test]
    fn elapsed_hours_within_one_day() {
        let start = parse_clock_time("08:00 Uhr").unwrap();
        let stop = parse_clock_time("17:30 Uhr").unwrap();
        assert_eq!(elapsed_hours(start, stop), 9.5);
    }

    #[test]
    fn elapsed_hours_stays_negative_when_stop_precedes_start() {
        let start = parse_clock_time("17:30 Uhr").unwrap();
        let stop = parse_clock_time("08:00 Uhr").unwrap();
        assert_eq!(elapsed_hours(start, stop), -9.5);
    }

    #[test]
    fn formats_back_to_wire_format() {
        let time = parse_clock_time("8:05 Uhr").unwrap();
        assert_eq!(time.to_string(), "08:05 Uhr");
    }
}
