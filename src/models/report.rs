use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{ReportError, ValidationError};
use crate::helpers::time::{self, TimeOfDay};
use crate::helpers::week::{self, AggregatedWeek, ClassifiedDay, DAY_TARGET_HOURS};
use crate::models::request::{DailyRequest, WeeklyRequest};

/// Fixed German day names, indexed by ISO weekday (0 = Monday).
const DAY_NAMES_SHORT: [&str; 7] = ["Mo", "Di", "Mi", "Do", "Fr", "Sa", "So"];
const DAY_NAMES_FULL: [&str; 7] = [
    "Montag",
    "Dienstag",
    "Mittwoch",
    "Donnerstag",
    "Freitag",
    "Samstag",
    "Sonntag",
];

/// Activity lines beyond this overflow the fixed page and are dropped.
pub const MAX_ACTIVITY_LINES: usize = 36;

/// One of the seven days of the week, in fixed Mon→Sun order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayLabel {
    #[serde(rename = "Mo")]
    Monday,
    #[serde(rename = "Di")]
    Tuesday,
    #[serde(rename = "Mi")]
    Wednesday,
    #[serde(rename = "Do")]
    Thursday,
    #[serde(rename = "Fr")]
    Friday,
    #[serde(rename = "Sa")]
    Saturday,
    #[serde(rename = "So")]
    Sunday,
}

impl DayLabel {
    pub const ALL: [DayLabel; 7] = [
        DayLabel::Monday,
        DayLabel::Tuesday,
        DayLabel::Wednesday,
        DayLabel::Thursday,
        DayLabel::Friday,
        DayLabel::Saturday,
        DayLabel::Sunday,
    ];

    /// Position within the week, 0 = Monday.
    pub fn index(&self) -> usize {
        match self {
            DayLabel::Monday => 0,
            DayLabel::Tuesday => 1,
            DayLabel::Wednesday => 2,
            DayLabel::Thursday => 3,
            DayLabel::Friday => 4,
            DayLabel::Saturday => 5,
            DayLabel::Sunday => 6,
        }
    }

    pub fn is_weekday(&self) -> bool {
        self.index() < 5
    }

    pub fn short_name(&self) -> &'static str {
        DAY_NAMES_SHORT[self.index()]
    }

    pub fn full_name(&self) -> &'static str {
        DAY_NAMES_FULL[self.index()]
    }
}

impl fmt::Display for DayLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

/// Absence marker of a day entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialKind {
    None,
    Vacation,
    Sick,
    Holiday,
}

impl SpecialKind {
    /// Map the wire value. Unrecognized strings fall through to `None` and
    /// the day is classified by its hours alone; this mirrors the
    /// long-standing behavior of the sheet format and is deliberately not an
    /// error.
    pub fn from_label(label: Option<&str>) -> Self {
        match label {
            Some("Urlaub") => SpecialKind::Vacation,
            Some("Krank") => SpecialKind::Sick,
            Some("Feiertag") => SpecialKind::Holiday,
            _ => SpecialKind::None,
        }
    }
}

/// One day's raw input, immutable after construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayEntry {
    pub label: DayLabel,
    pub hours: Option<f64>,
    pub special: SpecialKind,
}

impl DayEntry {
    pub fn empty(label: DayLabel) -> Self {
        Self {
            label,
            hours: None,
            special: SpecialKind::None,
        }
    }
}

/// Exactly seven day entries in fixed Mon→Sun order. Days missing from the
/// input stay empty and contribute zero credit.
#[derive(Debug, Clone, PartialEq)]
pub struct WeekRecord {
    entries: [DayEntry; 7],
}

impl WeekRecord {
    /// Build the record from up to seven entries in any order. A second
    /// entry for the same day or negative hours reject the whole week.
    pub fn from_entries(
        entries: impl IntoIterator<Item = DayEntry>,
    ) -> Result<Self, ValidationError> {
        let mut slots = DayLabel::ALL.map(DayEntry::empty);
        let mut filled = [false; 7];

        for entry in entries {
            let index = entry.label.index();
            if filled[index] {
                return Err(ValidationError::DuplicateDay(entry.label));
            }
            if let Some(hours) = entry.hours {
                if hours < 0.0 {
                    return Err(ValidationError::NegativeHours(entry.label, hours));
                }
            }
            slots[index] = entry;
            filled[index] = true;
        }

        Ok(Self { entries: slots })
    }

    pub fn entries(&self) -> &[DayEntry; 7] {
        &self.entries
    }
}

/// Week label derived from a date, e.g. `"KW 35 – 2025"`.
pub fn format_week_label(date: NaiveDate) -> String {
    format!("KW {} – {}", date.iso_week().week(), date.year())
}

/// Everything the daily sheet shows, derived once from the request.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyReport {
    pub date: NaiveDate,
    pub start: TimeOfDay,
    pub stop: TimeOfDay,
    pub pause_hours: f64,
    pub activities: Vec<String>,
    pub week_label: String,
}

impl DailyReport {
    /// Span between start and stop; negative when the stop precedes the
    /// start (overnight shifts are not supported).
    pub fn total_hours(&self) -> f64 {
        time::elapsed_hours(self.start, self.stop)
    }

    /// Span minus the pause, clamped at zero.
    pub fn worked_hours(&self) -> f64 {
        (self.total_hours() - self.pause_hours).max(0.0)
    }

    /// Worked hours against the fixed 8.0 h day target, signed.
    pub fn overtime_hours(&self) -> f64 {
        self.worked_hours() - DAY_TARGET_HOURS
    }

    /// Header date, e.g. `"Samstag, 30.08.2025"`.
    pub fn header_date(&self) -> String {
        let day_name = DAY_NAMES_FULL[self.date.weekday().num_days_from_monday() as usize];
        format!("{}, {}", day_name, self.date.format("%d.%m.%Y"))
    }
}

impl TryFrom<DailyRequest> for DailyReport {
    type Error = ReportError;

    fn try_from(request: DailyRequest) -> Result<Self, Self::Error> {
        if request.pause < 0.0 {
            return Err(ValidationError::NegativePause(request.pause).into());
        }

        let start = time::parse_clock_time(&request.start)?;
        let stop = time::parse_clock_time(&request.stop)?;

        let mut activities = request.taetigkeiten;
        activities.truncate(MAX_ACTIVITY_LINES);

        let week_label = request
            .kw_label
            .unwrap_or_else(|| format_week_label(request.datum));

        Ok(Self {
            date: request.datum,
            start,
            stop,
            pause_hours: request.pause,
            activities,
            week_label,
        })
    }
}

/// Everything the weekly sheet shows: one classified line per day plus the
/// aggregated buckets.
#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyReport {
    pub week_label: String,
    pub days: Vec<ClassifiedDay>,
    pub totals: AggregatedWeek,
    pub created: NaiveDate,
}

impl TryFrom<WeeklyRequest> for WeeklyReport {
    type Error = ReportError;

    fn try_from(request: WeeklyRequest) -> Result<Self, Self::Error> {
        let entries = request.week_data.into_iter().map(|item| DayEntry {
            label: item.day,
            hours: item.hours,
            special: SpecialKind::from_label(item.special.as_deref()),
        });
        let record = WeekRecord::from_entries(entries)?;

        let days = record.entries().iter().map(ClassifiedDay::from_entry).collect();
        let totals = week::aggregate(&record);
        let created = request
            .created_date
            .unwrap_or_else(|| chrono::Local::now().date_naive());

        Ok(Self {
            week_label: request.kw_label.unwrap_or_else(|| "KW ?".to_string()),
            days,
            totals,
            created,
        })
    }
}
