//! Error handling for the vineyard environment simulator
//!
//! Every error is local and recoverable; callers decide whether to retry with
//! different parameters.

use chrono::NaiveDate;
use serde::Serialize;
use shared::SeriesError;
use thiserror::Error;

/// Simulation error types
#[derive(Error, Debug)]
pub enum SimulationError {
    // Input errors
    #[error("Invalid date range: end {end} precedes start {start}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("Cannot rescale: range [{min}, {max}] has zero spread")]
    DegenerateRange { min: f64, max: f64 },

    #[error("Insufficient data: {required} days required, {available} available")]
    InsufficientData { required: usize, available: usize },

    #[error("Invalid parameter {field}: {message}")]
    InvalidParameter { field: String, message: String },

    #[error("Invalid series: {0}")]
    Series(#[from] SeriesError),

    // Boundary errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Serializable error detail for JSON consumers
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl SimulationError {
    pub fn invalid_parameter(field: &str, message: &str) -> Self {
        SimulationError::InvalidParameter {
            field: field.to_string(),
            message: message.to_string(),
        }
    }

    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            SimulationError::InvalidRange { .. } => "INVALID_RANGE",
            SimulationError::DegenerateRange { .. } => "DEGENERATE_RANGE",
            SimulationError::InsufficientData { .. } => "INSUFFICIENT_DATA",
            SimulationError::InvalidParameter { .. } => "INVALID_PARAMETER",
            SimulationError::Series(SeriesError::UnknownColumn(_)) => "UNKNOWN_COLUMN",
            SimulationError::Series(_) => "INVALID_SERIES",
            SimulationError::Serialization(_) => "SERIALIZATION_ERROR",
            SimulationError::Configuration(_) => "CONFIGURATION_ERROR",
        }
    }

    pub fn detail(&self) -> ErrorDetail {
        let field = match self {
            SimulationError::InvalidParameter { field, .. } => Some(field.clone()),
            _ => None,
        };

        // Log the error for debugging
        tracing::error!("Error: {:?}", self);

        ErrorDetail {
            code: self.code().to_string(),
            message: self.to_string(),
            field,
        }
    }
}

impl From<config::ConfigError> for SimulationError {
    fn from(err: config::ConfigError) -> Self {
        SimulationError::Configuration(err.to_string())
    }
}

impl From<validator::ValidationErrors> for SimulationError {
    fn from(err: validator::ValidationErrors) -> Self {
        SimulationError::Configuration(err.to_string())
    }
}

/// Result type alias for simulator operations
pub type SimResult<T> = Result<T, SimulationError>;
