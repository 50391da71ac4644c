//! Arbeitstagebuch Service Library
//!
//! This library turns raw timesheet input into fixed-layout PDF documents:
//! a daily sheet ("Tagesblatt") and a weekly summary ("Wochenübersicht"),
//! served over a small HTTP API.

pub mod error;
pub mod helpers;
pub mod models;
pub mod service;

pub use service::{ReportConfig, ReportService};

// Re-export key types for convenience
pub use error::{ParseError, ReportError, ValidationError};
pub use helpers::layout::{LayoutInstruction, PageGeometry, layout_daily, layout_weekly};
pub use helpers::week::AggregatedWeek;
pub use models::report::{DailyReport, WeeklyReport};
