//! Process-wide chart engine.
//!
//! Worker pools can share one engine, and with it one loaded dataset.
//! The first call to [`engine`] builds it from [`NatalConfig::load`]
//! unless [`init`] installed one earlier.

use std::sync::OnceLock;

use natal_core::{EphemerisConfig, EphemerisStore};

use crate::assembler::ChartEngine;
use crate::chart::ChartResult;
use crate::config::NatalConfig;
use crate::error::ChartError;
use crate::input::BirthInput;
use crate::settings::ChartSettings;

static ENGINE: OnceLock<ChartEngine> = OnceLock::new();

/// Install `engine` as the process-wide engine. Fails if one is
/// already installed.
pub fn init(engine: ChartEngine) -> Result<&'static ChartEngine, ChartError> {
    let mut pending = Some(engine);
    let installed = ENGINE.get_or_init(|| pending.take().unwrap_or_else(ChartEngine::degraded));
    match pending {
        None => Ok(installed),
        Some(_) => Err(ChartError::AlreadyInitialized),
    }
}

pub fn engine() -> &'static ChartEngine {
    ENGINE.get_or_init(|| match NatalConfig::load(None) {
        Ok(config) => ChartEngine::from_config(&config),
        Err(err) => {
            tracing::warn!(error = %err, "configuration unusable; using defaults");
            ChartEngine::new(EphemerisStore::new(EphemerisConfig::default()))
        }
    })
}

pub fn is_initialized() -> bool {
    ENGINE.get().is_some()
}

/// Compute with the process-wide engine.
pub fn compute(input: &BirthInput, settings: &ChartSettings) -> Result<ChartResult, ChartError> {
    engine().compute(input, settings)
}
