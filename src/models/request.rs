use chrono::NaiveDate;
use serde::Deserialize;

use crate::models::report::DayLabel;

fn default_pause() -> f64 {
    0.5
}

/// Payload of `POST /tagesblatt`.
#[derive(Debug, Clone, Deserialize)]
pub struct DailyRequest {
    pub datum: NaiveDate,
    pub start: String,
    pub stop: String,
    #[serde(default = "default_pause")]
    pub pause: f64,
    #[serde(default)]
    pub taetigkeiten: Vec<String>,
    #[serde(rename = "kwLabel")]
    pub kw_label: Option<String>,
}

/// One day of the `weekData` array.
///
/// `special` stays a free-form string on the wire; recognized values are
/// `"Urlaub"`, `"Krank"` and `"Feiertag"`, anything else counts as no
/// special kind.
#[derive(Debug, Clone, Deserialize)]
pub struct WeekDayItem {
    pub day: DayLabel,
    pub hours: Option<f64>,
    pub special: Option<String>,
}

/// Payload of `POST /woche`.
#[derive(Debug, Clone, Deserialize)]
pub struct WeeklyRequest {
    #[serde(rename = "kwLabel")]
    pub kw_label: Option<String>,
    #[serde(rename = "weekData")]
    pub week_data: Vec<WeekDayItem>,
    #[serde(rename = "createdDate")]
    pub created_date: Option<NaiveDate>,
}

/// Payload of `POST /gesamt`, the union of the daily and weekly requests.
#[derive(Debug, Clone, Deserialize)]
pub struct CombinedRequest {
    pub datum: NaiveDate,
    pub start: String,
    pub stop: String,
    #[serde(default = "default_pause")]
    pub pause: f64,
    #[serde(default)]
    pub taetigkeiten: Vec<String>,
    #[serde(rename = "kwLabel")]
    pub kw_label: Option<String>,
    #[serde(rename = "weekData")]
    pub week_data: Vec<WeekDayItem>,
    #[serde(rename = "createdDate")]
    pub created_date: Option<NaiveDate>,
}

impl CombinedRequest {
    /// Split into the two single-sheet requests the generators understand.
    pub fn into_parts(self) -> (DailyRequest, WeeklyRequest) {
        let daily = DailyRequest {
            datum: self.datum,
            start: self.start,
            stop: self.stop,
            pause: self.pause,
            taetigkeiten: self.taetigkeiten,
            kw_label: self.kw_label.clone(),
        };
        let weekly = WeeklyRequest {
            kw_label: self.kw_label,
            week_data: self.week_data,
            created_date: self.created_date,
        };
        (daily, weekly)
    }
}
