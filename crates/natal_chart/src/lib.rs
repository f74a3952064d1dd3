//! Deterministic natal charts.
//!
//! Planet positions, signs, ascendant and midheaven, Equal or Placidus
//! houses, retrograde flags, major aspects and mutual receptions,
//! computed by a [`ChartEngine`] from a [`BirthInput`] and
//! [`ChartSettings`].
//!
//! ```rust,ignore
//! let engine = ChartEngine::from_config(&NatalConfig::load(None)?);
//! let input = BirthInput::new(birth, 28.6139, 77.2090)?;
//! let chart = engine.compute(&input, &ChartSettings::default())?;
//! println!("{}", chart.render_text());
//! ```
//!
//! Precision degradation (no ephemeris dataset, Placidus undefined) is
//! never an error: it is recorded in `chart.settings`.

pub mod ascendant;
pub mod aspects;
pub mod assembler;
pub mod chart;
pub mod config;
pub mod error;
pub mod global;
pub mod houses;
pub mod input;
pub mod kernel;
pub mod render;
pub mod retrograde;
pub mod rulers;
pub mod settings;
pub mod util;
pub mod zodiac;

pub use aspects::{Aspect, AspectKind, AspectOrbs};
pub use assembler::ChartEngine;
pub use chart::{AnglePoint, ChartResult, PlanetPosition};
pub use config::NatalConfig;
pub use error::{ChartError, HouseError};
pub use houses::{HouseCusp, HouseSystem};
pub use input::BirthInput;
pub use natal_core::{Backend, Body, EphemerisConfig, EphemerisStore};
pub use rulers::{MutualReception, RulersScheme};
pub use settings::{ChartSettings, Fallback, FallbackStage, Libraries, SettingsReport};
pub use zodiac::{Sign, sign_for};
