//! Error types for chart computation.

use natal_core::EngineError;
use thiserror::Error;

/// Errors surfaced to chart callers.
///
/// Precision degradation never appears here; it is recorded in the
/// chart's settings report instead.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChartError {
    #[error("invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("position engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("global chart engine already initialized")]
    AlreadyInitialized,
}

impl ChartError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }
}

/// Why a quadrant house division could not be produced.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum HouseError {
    #[error("latitude {latitude:.2}° is inside the polar circle")]
    PolarLatitude { latitude: f64 },

    #[error("cusp {house} is circumpolar; its semi-arc is undefined")]
    Circumpolar { house: u8 },

    #[error("cusp {house} did not converge")]
    NoConvergence { house: u8 },

    #[error("{system} houses need the high-precision backend")]
    Unavailable { system: &'static str },
}
