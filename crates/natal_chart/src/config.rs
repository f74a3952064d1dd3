//! Layered configuration for the chart engine.
//!
//! Precedence, lowest to highest:
//! 1. Compiled defaults
//! 2. Global file: `$XDG_CONFIG_HOME/natal/natal.toml`
//! 3. An explicit file, if given
//! 4. `NATAL_*` environment variables, `__` between levels
//!    (e.g. `NATAL_CHART__HOUSE_SYSTEM=placidus`)
//!
//! `NATAL_EPHEMERIS` and `NATAL_CACHE_DIR` are shorthands for
//! `ephemeris.file_name` and `ephemeris.cache_dir` and win over all of
//! the above.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use directories::ProjectDirs;
use natal_core::EphemerisConfig;
use natal_core::config::{ENV_CACHE_DIR, ENV_EPHEMERIS};
use serde::{Deserialize, Serialize};

use crate::error::ChartError;
use crate::settings::ChartSettings;

pub const CONFIG_FILE: &str = "natal.toml";
pub const ENV_PREFIX: &str = "NATAL";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NatalConfig {
    pub ephemeris: EphemerisConfig,
    pub chart: ChartSettings,
}

/// `$XDG_CONFIG_HOME/natal/natal.toml` or the platform equivalent.
pub fn global_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "natal").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

impl NatalConfig {
    /// Load from the global file, `explicit` and the process environment.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ChartError> {
        Self::load_from(global_config_path().as_deref(), explicit, std::env::vars())
    }

    /// Load with every source supplied by the caller.
    ///
    /// A missing global file is skipped; a missing explicit file is an
    /// error.
    pub fn load_from(
        global: Option<&Path>,
        explicit: Option<&Path>,
        env: impl IntoIterator<Item = (String, String)>,
    ) -> Result<Self, ChartError> {
        let env: HashMap<String, String> = env.into_iter().collect();

        let mut builder = Config::builder();
        if let Some(path) = global {
            builder = builder.add_source(File::from(path).required(false));
        }
        if let Some(path) = explicit {
            builder = builder.add_source(File::from(path).required(true));
        }

        // Shorthands would collide with the `ephemeris` table.
        let nested: config::Map<String, String> = env
            .iter()
            .filter(|(k, _)| k.as_str() != ENV_EPHEMERIS && k.as_str() != ENV_CACHE_DIR)
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(Some(nested)),
        );

        let loaded: Self = builder.build()?.try_deserialize()?;
        let config = Self {
            ephemeris: loaded
                .ephemeris
                .with_env_overrides(|key| env.get(key).cloned()),
            ..loaded
        };
        config.validate()?;
        tracing::debug!(?config, "configuration loaded");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ChartError> {
        self.ephemeris.validate()?;
        self.chart.validate()
    }
}
