//! Compute-once holder for the high-precision provider.

use std::sync::{Arc, OnceLock};

use jpl_kernel::SpkKernel;

use crate::config::EphemerisConfig;
use crate::error::EngineError;
use crate::fetch;
use crate::jpl::JplProvider;

#[derive(Debug)]
enum LoadOutcome {
    Loaded(JplProvider),
    Unavailable(String),
}

/// Locates, optionally downloads, and parses the ephemeris dataset exactly
/// once. Concurrent first callers block on the same initialisation and
/// all observe its single outcome; a failed load is remembered, not
/// retried.
#[derive(Debug)]
pub struct EphemerisStore {
    config: EphemerisConfig,
    cell: OnceLock<LoadOutcome>,
}

impl EphemerisStore {
    pub fn new(config: EphemerisConfig) -> Self {
        Self {
            config,
            cell: OnceLock::new(),
        }
    }

    /// A store that is already initialised with `provider`.
    pub fn preloaded(provider: JplProvider) -> Self {
        Self {
            config: EphemerisConfig {
                download: false,
                ..EphemerisConfig::default()
            },
            cell: OnceLock::from(LoadOutcome::Loaded(provider)),
        }
    }

    /// A store that always reports the dataset as unavailable.
    pub fn disabled(reason: impl Into<String>) -> Self {
        Self {
            config: EphemerisConfig::default(),
            cell: OnceLock::from(LoadOutcome::Unavailable(reason.into())),
        }
    }

    pub fn config(&self) -> &EphemerisConfig {
        &self.config
    }

    pub fn is_initialized(&self) -> bool {
        self.cell.get().is_some()
    }

    /// The loaded provider, initialising on first call.
    pub fn provider(&self) -> Option<&JplProvider> {
        match self.cell.get_or_init(|| self.load()) {
            LoadOutcome::Loaded(provider) => Some(provider),
            LoadOutcome::Unavailable(_) => None,
        }
    }

    /// Why the dataset is unavailable, once initialisation has run.
    pub fn unavailable_reason(&self) -> Option<&str> {
        match self.cell.get()? {
            LoadOutcome::Loaded(_) => None,
            LoadOutcome::Unavailable(reason) => Some(reason),
        }
    }

    fn load(&self) -> LoadOutcome {
        match self.try_load() {
            Ok(provider) => {
                let (from, to) = provider.coverage_jd_tdb();
                tracing::info!(
                    kernel = provider.kernel().internal_name(),
                    segments = provider.kernel().segments().len(),
                    jd_from = from,
                    jd_to = to,
                    "ephemeris dataset loaded"
                );
                LoadOutcome::Loaded(provider)
            }
            Err(err) => {
                tracing::warn!(error = %err, "ephemeris dataset unavailable; using mean-motion positions");
                LoadOutcome::Unavailable(err.to_string())
            }
        }
    }

    fn try_load(&self) -> Result<JplProvider, EngineError> {
        self.config.validate()?;
        let path = self.config.resolved_path()?;

        if !path.exists() {
            if !self.config.download || self.config.spk_path.is_some() {
                return Err(EngineError::DatasetMissing(path));
            }
            fetch::download(&self.config.url(), &path)?;
        }

        let kernel = SpkKernel::load(&path)?;
        JplProvider::new(Arc::new(kernel))
    }
}
