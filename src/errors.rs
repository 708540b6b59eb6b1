use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum AnalyticsError {
    #[error("Insufficient data for {operation}: need at least {required} points, got {actual}")]
    InsufficientData {
        operation: &'static str,
        required: usize,
        actual: usize,
    },
    #[error("Empty input for {0}")]
    EmptyInput(&'static str),
    #[error("Invalid series: {0}")]
    InvalidSeries(String),
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Analysis task failed: {0}")]
    TaskFailed(String),
}

impl AnalyticsError {
    pub fn insufficient(operation: &'static str, required: usize, actual: usize) -> Self {
        AnalyticsError::InsufficientData {
            operation,
            required,
            actual,
        }
    }
}

