use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

use crate::error::{RenderError, ReportError};
use crate::helpers::layout::{self, PageGeometry};
use crate::helpers::pdf;
use crate::models::report::{DailyReport, WeeklyReport, format_week_label};
use crate::models::request::{CombinedRequest, DailyRequest, WeeklyRequest};

/// Configuration for the report service
#[derive(Clone)]
pub struct ReportConfig {
    pub api_key: String,
    pub out_dir: PathBuf,
    pub public_url: String,
}

/// The main report service: builds daily and weekly sheets from request
/// payloads, renders them to PDF and serves the stored files
#[derive(Clone)]
pub struct ReportService {
    pub config: ReportConfig,
}

impl ReportService {
    /// Create a new report service instance
    pub fn new(config: ReportConfig) -> Self {
        info!("Creating new ReportService instance");
        Self { config }
    }

    /// Create an Axum router for the report service
    pub fn router(self) -> Router {
        info!("Creating report service router");
        let shared_state = Arc::new(self);

        Router::new()
            .route("/", get(health))
            .route("/tagesblatt", post(tagesblatt))
            .route("/woche", post(woche))
            .route("/gesamt", post(gesamt))
            .route("/files/{name}", get(serve_file))
            .with_state(shared_state)
    }

    /// Build, render and store a daily sheet; returns the stored file name.
    pub async fn generate_daily(&self, request: DailyRequest) -> Result<String, ApiError> {
        let report = DailyReport::try_from(request)?;
        let geometry = PageGeometry::daily();
        let instructions = layout::layout_daily(&report, &geometry);
        let bytes = pdf::render_document(&instructions, &geometry)?;

        info!(
            "Rendered daily sheet for {} with {} activities, size: {} bytes",
            report.date,
            report.activities.len(),
            bytes.len()
        );

        self.store("tagesblatt", bytes).await
    }

    /// Build, render and store a weekly summary; returns the stored file name.
    pub async fn generate_weekly(&self, request: WeeklyRequest) -> Result<String, ApiError> {
        let report = WeeklyReport::try_from(request)?;
        let geometry = PageGeometry::weekly();
        let instructions = layout::layout_weekly(&report, &geometry);
        let bytes = pdf::render_document(&instructions, &geometry)?;

        info!(
            "Rendered weekly summary '{}', weekday total {:.1} h, size: {} bytes",
            report.week_label, report.totals.weekday_total,
            bytes.len()
        );

        self.store("woche", bytes).await
    }

    /// Write the rendered document under a collision-free name.
    async fn store(&self, prefix: &str, bytes: Vec<u8>) -> Result<String, ApiError> {
        let name = format!("{}_{}.pdf", prefix, Uuid::new_v4().simple());
        tokio::fs::create_dir_all(&self.config.out_dir).await?;
        tokio::fs::write(self.config.out_dir.join(&name), &bytes).await?;
        Ok(name)
    }

    /// Public URL under which a stored file is served.
    pub fn file_url(&self, name: &str) -> String {
        format!(
            "{}/files/{}",
            self.config.public_url.trim_end_matches('/'),
            name
        )
    }
}

/// Failures a handler can answer with.
#[derive(Debug)]
pub enum ApiError {
    Unauthorized,
    Report(ReportError),
    Render(RenderError),
    Io(std::io::Error),
}

impl From<ReportError> for ApiError {
    fn from(err: ReportError) -> Self {
        ApiError::Report(err)
    }
}

impl From<RenderError> for ApiError {
    fn from(err: RenderError) -> Self {
        ApiError::Render(err)
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        ApiError::Io(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Unauthorized => {
                (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()).into_response()
            }
            ApiError::Report(err) => {
                info!("Rejecting request: {}", err);
                (StatusCode::BAD_REQUEST, err.to_string()).into_response()
            }
            ApiError::Render(err) => {
                error!("Failed to render document: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "failed to render document".to_string(),
                )
                    .into_response()
            }
            ApiError::Io(err) => {
                error!("Failed to store document: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "failed to store document".to_string(),
                )
                    .into_response()
            }
        }
    }
}

fn auth_ok(headers: &HeaderMap, api_key: &str) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token == api_key)
        .unwrap_or(false)
}

// Route handlers
async fn health() -> &'static str {
    "OK"
}

async fn tagesblatt(
    State(service): State<Arc<ReportService>>,
    headers: HeaderMap,
    Json(payload): Json<DailyRequest>,
) -> Result<Json<Value>, ApiError> {
    if !auth_ok(&headers, &service.config.api_key) {
        return Err(ApiError::Unauthorized);
    }

    info!("Received daily sheet request for {}", payload.datum);
    let name = service.generate_daily(payload).await?;
    Ok(Json(json!({ "url": service.file_url(&name) })))
}

async fn woche(
    State(service): State<Arc<ReportService>>,
    headers: HeaderMap,
    Json(payload): Json<WeeklyRequest>,
) -> Result<Json<Value>, ApiError> {
    if !auth_ok(&headers, &service.config.api_key) {
        return Err(ApiError::Unauthorized);
    }

    info!(
        "Received weekly summary request with {} day entries",
        payload.week_data.len()
    );
    let name = service.generate_weekly(payload).await?;
    Ok(Json(json!({ "url": service.file_url(&name) })))
}

async fn gesamt(
    State(service): State<Arc<ReportService>>,
    headers: HeaderMap,
    Json(payload): Json<CombinedRequest>,
) -> Result<Json<Value>, ApiError> {
    if !auth_ok(&headers, &service.config.api_key) {
        return Err(ApiError::Unauthorized);
    }

    info!("Received combined request for {}", payload.datum);
    let datum = payload.datum;
    let (daily, mut weekly) = payload.into_parts();
    // The weekly sheet inherits the calendar week of the daily date when no
    // explicit label is given.
    weekly.kw_label = weekly
        .kw_label
        .or_else(|| Some(format_week_label(datum)));

    let daily_name = service.generate_daily(daily).await?;
    let weekly_name = service.generate_weekly(weekly).await?;

    Ok(Json(json!({
        "urls": {
            "tagesblatt": service.file_url(&daily_name),
            "woche": service.file_url(&weekly_name),
        }
    })))
}

async fn serve_file(
    State(service): State<Arc<ReportService>>,
    Path(name): Path<String>,
) -> Response {
    if name.contains('/') || name.contains("..") {
        return (StatusCode::NOT_FOUND, "Not found").into_response();
    }

    match tokio::fs::read(service.config.out_dir.join(&name)).await {
        Ok(bytes) => ([(header::CONTENT_TYPE, "application/pdf")], bytes).into_response(),
        Err(_) => (StatusCode::NOT_FOUND, "Not found").into_response(),
    }
}
