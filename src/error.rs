use thiserror::Error;

use crate::models::report::DayLabel;

/// Rejections for malformed time-of-day strings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("time value '{0}' is missing the ':' separator")]
    MissingSeparator(String),
    #[error("time component '{0}' is not a number")]
    InvalidComponent(String),
    #[error("hour {0} is out of range (0-23)")]
    HourOutOfRange(u32),
    #[error("minute {0} is out of range (0-59)")]
    MinuteOutOfRange(u32),
}

/// Rejections for structurally valid but out-of-range request data.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("weekData contains more than one entry for {0}")]
    DuplicateDay(DayLabel),
    #[error("hours for {0} must not be negative, got {1}")]
    NegativeHours(DayLabel, f64),
    #[error("pause must not be negative, got {0}")]
    NegativePause(f64),
}

/// Anything that can stop a report from being built. Every variant is a
/// deterministic function of the request, so callers must fix the input
/// rather than retry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReportError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Failures while turning an instruction list into PDF bytes.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to serialize PDF document: {0}")]
    Pdf(#[from] lopdf::Error),
}
