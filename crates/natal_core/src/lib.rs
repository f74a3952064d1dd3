//! Body positions for natal charts.
//!
//! Two [`PositionProvider`] implementations sit behind one seam:
//! [`JplProvider`] reads apparent positions from a JPL SPK ephemeris held
//! by an [`EphemerisStore`], and [`MeanMotionProvider`] is the degraded
//! fallback used when no dataset can be loaded.

pub mod body;
pub mod config;
pub mod error;
pub mod fetch;
pub mod jpl;
pub mod mean_motion;
pub mod provider;
pub mod store;

pub use body::{ALL_BODIES, Body};
pub use config::EphemerisConfig;
pub use error::EngineError;
pub use jpl::JplProvider;
pub use mean_motion::MeanMotionProvider;
pub use provider::{
    Backend, BodyPositions, EclipticPosition, PositionProvider, SkippedProvider,
    select_provider,
};
pub use store::EphemerisStore;
