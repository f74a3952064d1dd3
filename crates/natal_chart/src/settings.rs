//! Requested chart settings and the effective-settings report.

use serde::{Deserialize, Serialize};

use crate::aspects::AspectOrbs;
use crate::error::ChartError;
use crate::houses::HouseSystem;
use crate::rulers::RulersScheme;

/// What the caller asks for. Every field has a default, so a partial
/// TOML or JSON table deserializes.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    pub house_system: HouseSystem,
    pub rulers_scheme: RulersScheme,
    pub aspect_orbs: AspectOrbs,
}

impl ChartSettings {
    pub fn with_house_system(mut self, system: HouseSystem) -> Self {
        self.house_system = system;
        self
    }

    pub fn with_rulers_scheme(mut self, scheme: RulersScheme) -> Self {
        self.rulers_scheme = scheme;
        self
    }

    pub fn with_aspect_orbs(mut self, orbs: AspectOrbs) -> Self {
        self.aspect_orbs = orbs;
        self
    }

    pub fn validate(&self) -> Result<(), ChartError> {
        self.aspect_orbs.validate()
    }
}

/// Which precision backends served a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Libraries {
    /// Positions came from the high-precision ephemeris.
    pub jpl_ephemeris: bool,
    /// Placidus division was on offer for this chart.
    pub placidus: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackStage {
    Positions,
    Houses,
}

/// A strategy that was asked for but not used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fallback {
    pub stage: FallbackStage,
    pub requested: String,
    pub used: String,
    pub reason: String,
}

/// Effective settings as applied to one chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettingsReport {
    pub house_system: HouseSystem,
    pub rulers_scheme: RulersScheme,
    pub aspect_orbs: AspectOrbs,
    pub libraries: Libraries,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fallbacks: Vec<Fallback>,
}

impl SettingsReport {
    pub fn fallback_for(&self, stage: FallbackStage) -> Option<&Fallback> {
        self.fallbacks.iter().find(|f| f.stage == stage)
    }
}
