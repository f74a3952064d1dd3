//! Where the ephemeris dataset lives and how to obtain it.

use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

pub const DEFAULT_EPHEMERIS: &str = "de421.bsp";

/// NAIF generic planetary kernels directory.
pub const NAIF_PLANETS_URL: &str = "https://naif.jpl.nasa.gov/pub/naif/generic_kernels/spk/planets/";

/// Overrides the dataset file name.
pub const ENV_EPHEMERIS: &str = "NATAL_EPHEMERIS";

/// Overrides the cache directory.
pub const ENV_CACHE_DIR: &str = "NATAL_CACHE_DIR";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EphemerisConfig {
    /// Dataset file name inside the cache directory.
    pub file_name: String,
    /// Cache directory; the platform cache dir when unset.
    pub cache_dir: Option<PathBuf>,
    /// Explicit dataset path. Wins over `cache_dir/file_name` and is
    /// never downloaded to.
    pub spk_path: Option<PathBuf>,
    /// Fetch the dataset on first use when it is missing.
    pub download: bool,
    /// Source URL; `NAIF_PLANETS_URL + file_name` when unset.
    pub download_url: Option<String>,
}

impl Default for EphemerisConfig {
    fn default() -> Self {
        Self {
            file_name: DEFAULT_EPHEMERIS.to_string(),
            cache_dir: None,
            spk_path: None,
            download: true,
            download_url: None,
        }
    }
}

impl EphemerisConfig {
    /// Config pointing at one file, with downloads off.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            spk_path: Some(path.into()),
            download: false,
            ..Self::default()
        }
    }

    /// Apply `NATAL_EPHEMERIS` and `NATAL_CACHE_DIR` through `lookup`.
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(name) = lookup(ENV_EPHEMERIS).filter(|v| !v.trim().is_empty()) {
            self.file_name = name.trim().to_string();
        }
        if let Some(dir) = lookup(ENV_CACHE_DIR).filter(|v| !v.trim().is_empty()) {
            self.cache_dir = Some(PathBuf::from(dir.trim()));
        }
        self
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.spk_path.is_none() {
            if self.file_name.is_empty() {
                return Err(EngineError::InvalidConfig("file_name must not be empty"));
            }
            if self.file_name.contains(['/', '\\']) || self.file_name == ".." {
                return Err(EngineError::InvalidConfig(
                    "file_name must be a bare file name; use spk_path for paths",
                ));
            }
        }
        if self.spk_path.as_ref().is_some_and(|p| p.as_os_str().is_empty()) {
            return Err(EngineError::InvalidConfig("spk_path must not be empty"));
        }
        Ok(())
    }

    pub fn cache_dir(&self) -> Option<PathBuf> {
        self.cache_dir.clone().or_else(|| {
            ProjectDirs::from("", "", "natal").map(|dirs| dirs.cache_dir().to_path_buf())
        })
    }

    /// Dataset location after applying precedence.
    pub fn resolved_path(&self) -> Result<PathBuf, EngineError> {
        if let Some(path) = &self.spk_path {
            return Ok(path.clone());
        }
        self.cache_dir()
            .map(|dir| dir.join(&self.file_name))
            .ok_or(EngineError::InvalidConfig("no cache directory could be determined"))
    }

    pub fn url(&self) -> String {
        self.download_url
            .clone()
            .unwrap_or_else(|| format!("{NAIF_PLANETS_URL}{}", self.file_name))
    }
}
