use crate::models::report::{DayEntry, DayLabel, SpecialKind, WeekRecord};

/// Weekly overtime base, Monday through Friday only.
pub const WEEKLY_TARGET_HOURS: f64 = 40.0;

/// Credited hours for any absence day, and the daily overtime base.
pub const DAY_TARGET_HOURS: f64 = 8.0;

/// Outcome of classifying one day of the week.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DayCategory {
    WeekdayWorked(f64),
    WeekendWorked(f64),
    Vacation,
    Sick,
    Holiday,
    /// A holiday on which work was additionally logged; the actual hours are
    /// kept aside and reported separately from the ordinary totals.
    HolidayWorked(f64),
    Empty,
}

impl DayCategory {
    /// Hours counted toward the weekly totals for this day. Absence days are
    /// credited with the fixed 8.0 regardless of any supplied hours.
    pub fn credited_hours(&self) -> f64 {
        match self {
            DayCategory::WeekdayWorked(hours) | DayCategory::WeekendWorked(hours) => *hours,
            DayCategory::Vacation
            | DayCategory::Sick
            | DayCategory::Holiday
            | DayCategory::HolidayWorked(_) => DAY_TARGET_HOURS,
            DayCategory::Empty => 0.0,
        }
    }

    /// Parenthesized absence note shown next to the credited hours.
    pub fn annotation(&self) -> Option<&'static str> {
        match self {
            DayCategory::Vacation => Some("(Urlaub)"),
            DayCategory::Sick => Some("(Krank)"),
            DayCategory::Holiday | DayCategory::HolidayWorked(_) => Some("(Feiertag)"),
            _ => None,
        }
    }
}

/// Classify a single day. Pure: the same entry always maps to the same
/// category and credit.
///
/// Priority: vacation/sick win over any supplied hours, a holiday keeps
/// actually-worked hours aside, plain hours split into weekday/weekend work,
/// everything else is an empty day.
pub fn classify(entry: &DayEntry) -> DayCategory {
    match entry.special {
        SpecialKind::Vacation => DayCategory::Vacation,
        SpecialKind::Sick => DayCategory::Sick,
        SpecialKind::Holiday => match entry.hours {
            Some(hours) if hours > 0.0 => DayCategory::HolidayWorked(hours),
            _ => DayCategory::Holiday,
        },
        SpecialKind::None => match entry.hours {
            Some(hours) if hours > 0.0 => {
                if entry.label.is_weekday() {
                    DayCategory::WeekdayWorked(hours)
                } else {
                    DayCategory::WeekendWorked(hours)
                }
            }
            _ => DayCategory::Empty,
        },
    }
}

/// One classified day, paired with its fixed position in the week.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassifiedDay {
    pub label: DayLabel,
    pub category: DayCategory,
}

impl ClassifiedDay {
    pub fn from_entry(entry: &DayEntry) -> Self {
        Self {
            label: entry.label,
            category: classify(entry),
        }
    }
}

/// Aggregated hour buckets of one week. Derived once, never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedWeek {
    /// Credited hours of Monday through Friday, absence credit included.
    pub weekday_total: f64,
    /// Raw Saturday hours, reported separately, never part of the overtime.
    pub weekend_saturday: f64,
    /// Raw Sunday hours, reported separately, never part of the overtime.
    pub weekend_sunday: f64,
    /// Credited hours over all seven days.
    pub grand_total: f64,
    /// `weekday_total` minus the fixed 40.0 h target, signed.
    pub overtime: f64,
    /// Holidays with logged work, in week order.
    pub holidays_worked: Vec<(DayLabel, f64)>,
    pub holiday_worked_sum: f64,
}

/// Walk the week once, Monday through Sunday, and fill every bucket.
/// Summation is strictly left to right so repeated runs produce identical
/// floating-point results.
pub fn aggregate(record: &WeekRecord) -> AggregatedWeek {
    let mut weekday_total = 0.0;
    let mut weekend_saturday = 0.0;
    let mut weekend_sunday = 0.0;
    let mut grand_total = 0.0;
    let mut holidays_worked = Vec::new();
    let mut holiday_worked_sum = 0.0;

    for entry in record.entries() {
        let category = classify(entry);
        let credited = category.credited_hours();

        if entry.label.is_weekday() {
            weekday_total += credited;
        }
        grand_total += credited;

        match entry.label {
            DayLabel::Saturday => weekend_saturday = entry.hours.unwrap_or(0.0),
            DayLabel::Sunday => weekend_sunday = entry.hours.unwrap_or(0.0),
            _ => {}
        }

        if let DayCategory::HolidayWorked(hours) = category {
            holidays_worked.push((entry.label, hours));
            holiday_worked_sum += hours;
        }
    }

    AggregatedWeek {
        weekday_total,
        weekend_saturday,
        weekend_sunday,
        grand_total,
        overtime: weekday_total - WEEKLY_TARGET_HOURS,
        holidays_worked,
        holiday_worked_sum,
    }
}
