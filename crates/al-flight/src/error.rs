//! Error types for flight conditions.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FlightError {
    #[error("Non-finite flight condition: {what}")]
    NonFinite { what: &'static str },

    #[error("{what} must be positive, got {value}")]
    NonPositive { what: &'static str, value: f64 },
}

pub type FlightResult<T> = Result<T, FlightError>;
