//! Renders the two demo sheets to the current directory, without the server.

use serde_json::json;
use tracing::info;

use arbeitstagebuch_service::helpers::pdf;
use arbeitstagebuch_service::models::request::{DailyRequest, WeeklyRequest};
use arbeitstagebuch_service::{DailyReport, PageGeometry, WeeklyReport, layout_daily, layout_weekly};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let daily_request: DailyRequest = serde_json::from_value(json!({
        "datum": "2025-08-30",
        "start": "08:00 Uhr",
        "stop": "17:30 Uhr",
        "pause": 0.5,
        "taetigkeiten": ["Montageübersicht Kran 1", "Montageübersicht Kran 2"],
        "kwLabel": "KW 35 – 2025"
    }))?;
    let daily = DailyReport::try_from(daily_request)?;
    let geometry = PageGeometry::daily();
    let bytes = pdf::render_document(&layout_daily(&daily, &geometry), &geometry)?;
    std::fs::write("demo_tagesblatt.pdf", &bytes)?;
    info!("Wrote demo_tagesblatt.pdf, size: {} bytes", bytes.len());

    let weekly_request: WeeklyRequest = serde_json::from_value(json!({
        "kwLabel": "KW 38 – 2025",
        "weekData": [
            {"day": "Mo", "special": "Urlaub"},
            {"day": "Di", "special": "Krank"},
            {"day": "Mi", "hours": 8.0, "special": "Feiertag"},
            {"day": "Do", "hours": 8.0, "special": "Feiertag"},
            {"day": "Fr", "hours": 9.0},
            {"day": "Sa", "hours": 4.0},
            {"day": "So", "hours": 0.0}
        ]
    }))?;
    let weekly = WeeklyReport::try_from(weekly_request)?;
    let geometry = PageGeometry::weekly();
    let bytes = pdf::render_document(&layout_weekly(&weekly, &geometry), &geometry)?;
    std::fs::write("demo_wochenuebersicht.pdf", &bytes)?;
    info!("Wrote demo_wochenuebersicht.pdf, size: {} bytes", bytes.len());

    Ok(())
}
