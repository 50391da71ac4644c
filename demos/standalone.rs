use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing::info;

use arbeitstagebuch_service::{ReportConfig, ReportService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting Arbeitstagebuch service example");

    // Load configuration from the environment, with local defaults
    let api_key = std::env::var("ATB_API_KEY").unwrap_or_else(|_| "change-me".to_string());
    let out_dir = std::env::var("ATB_OUT_DIR").unwrap_or_else(|_| "/tmp/pdf".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(8080);
    let public_url =
        std::env::var("ATB_PUBLIC_URL").unwrap_or_else(|_| format!("http://localhost:{port}"));

    let config = ReportConfig {
        api_key,
        out_dir: PathBuf::from(out_dir),
        public_url,
    };

    // Create the report service and its router
    let service = ReportService::new(config);
    let app = service.router();

    // Start server
    let listener = TcpListener::bind(("0.0.0.0", port)).await?;
    info!("Server running on http://0.0.0.0:{}", port);

    axum::serve(listener, app).await?;

    Ok(())
}

/*
Example usage of the service:

1. POST /tagesblatt
   - {"datum": "2025-08-30", "start": "08:00 Uhr", "stop": "17:30 Uhr",
      "pause": 0.5, "taetigkeiten": ["…"], "kwLabel": "KW 35 – 2025"}
   - Renders the daily sheet and answers {"url": "…"}

2. POST /woche
   - {"kwLabel": "KW 38 – 2025", "weekData": [{"day": "Mo", "special": "Urlaub"}, …]}
   - Renders the weekly summary and answers {"url": "…"}

3. POST /gesamt
   - Union of both payloads; answers {"urls": {"tagesblatt": "…", "woche": "…"}}

4. GET /files/{name}
   - Serves a previously rendered PDF

All POST routes expect "Authorization: Bearer <ATB_API_KEY>".
*/
