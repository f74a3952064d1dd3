//! The assembled chart record.

use std::collections::BTreeMap;

use natal_core::Body;
use serde::Serialize;

use crate::aspects::Aspect;
use crate::error::ChartError;
use crate::houses::HouseCusp;
use crate::input::BirthInput;
use crate::render::TextChart;
use crate::rulers::MutualReception;
use crate::settings::SettingsReport;
use crate::zodiac::{Sign, sign_for};

/// A longitude and its sign, for the chart angles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnglePoint {
    pub longitude: f64,
    pub sign: Sign,
}

impl AnglePoint {
    pub fn at(longitude: f64) -> Self {
        Self {
            longitude,
            sign: sign_for(longitude),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlanetPosition {
    pub ecliptic_longitude: f64,
    pub ecliptic_latitude: f64,
    pub sign: Sign,
    pub retrograde: bool,
}

/// Immutable result of one chart computation.
///
/// Identical `(input, settings)` always produce an equal value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartResult {
    pub input: BirthInput,
    pub settings: SettingsReport,
    pub ascendant: Option<AnglePoint>,
    pub midheaven: Option<AnglePoint>,
    pub houses: Vec<HouseCusp>,
    pub planets: BTreeMap<Body, PlanetPosition>,
    pub aspects: Vec<Aspect>,
    pub mutual_receptions: Vec<MutualReception>,
}

impl ChartResult {
    pub fn sun_sign(&self) -> Option<Sign> {
        self.planets.get(&Body::Sun).map(|p| p.sign)
    }

    pub fn to_json(&self) -> Result<String, ChartError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, ChartError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deterministic plain-text rendering.
    pub fn render_text(&self) -> String {
        TextChart(self).to_string()
    }
}
