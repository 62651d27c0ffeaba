//! Error taxonomy for the analysis pipeline.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Debug, Error)]
pub enum CoreError {
    /// A reference date or a record timestamp does not match the expected format.
    #[error("invalid date '{value}' (expected format {format})")]
    InvalidDate { value: String, format: &'static str },

    #[error("date {date} cannot be moved back by {months} months")]
    DateOutOfRange { date: String, months: u32 },

    #[error("invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("failed to render report: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl CoreError {
    pub(crate) fn invalid_date(value: &str, format: &'static str) -> Self {
        CoreError::InvalidDate {
            value: value.to_string(),
            format,
        }
    }
}
