//! Degraded provider: circular, coplanar mean orbits.
//!
//! Used only when no ephemeris dataset is available. Longitudes can be off
//! by several degrees (tens for Mars near opposition), but the geocentric
//! construction keeps retrograde loops and the output is total and
//! deterministic.

use natal_frames::{general_precession_longitude_deg, normalize_360};
use natal_time::{Epoch, J2000_JD};

use crate::body::{ALL_BODIES, Body};
use crate::error::EngineError;
use crate::provider::{Backend, BodyPositions, EclipticPosition, PositionProvider};

/// Mean longitude at J2000 (deg), daily motion (deg/day), semi-major axis (AU).
#[derive(Debug, Clone, Copy)]
struct MeanOrbit {
    l0: f64,
    rate: f64,
    a: f64,
}

const EARTH: MeanOrbit = MeanOrbit { l0: 100.464_35, rate: 0.985_609_10, a: 1.0 };

const fn heliocentric_orbit(body: Body) -> Option<MeanOrbit> {
    let (l0, rate, a) = match body {
        Body::Mercury => (252.250_84, 4.092_334_45, 0.387_10),
        Body::Venus => (181.979_73, 1.602_130_34, 0.723_33),
        Body::Mars => (355.453_32, 0.524_033_04, 1.523_68),
        Body::Jupiter => (34.404_38, 0.083_086_76, 5.202_60),
        Body::Saturn => (49.944_32, 0.033_460_63, 9.554_91),
        Body::Uranus => (313.232_18, 0.011_731_29, 19.218_45),
        Body::Neptune => (304.880_03, 0.005_981_06, 30.110_39),
        Body::Pluto => (238.928_81, 0.003_975_57, 39.481_68),
        Body::Sun | Body::Moon => return None,
    };
    Some(MeanOrbit { l0, rate, a })
}

/// Moon mean longitude at J2000 and daily motion.
const MOON_L0: f64 = 218.316_447_7;
const MOON_RATE: f64 = 13.176_396_48;

/// Mean-motion placeholder provider.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeanMotionProvider;

impl MeanMotionProvider {
    pub fn new() -> Self {
        Self
    }

    /// Geocentric longitude of one body, equinox of date, degrees.
    pub fn longitude(&self, body: Body, epoch: &Epoch) -> f64 {
        let d = epoch.jd_tt() - J2000_JD;
        let precession = general_precession_longitude_deg(epoch.centuries_tt());
        let earth = EARTH.l0 + EARTH.rate * d;

        let j2000_lon = match (body, heliocentric_orbit(body)) {
            (Body::Moon, _) => MOON_L0 + MOON_RATE * d,
            (_, Some(orbit)) => {
                let (se, ce) = earth.to_radians().sin_cos();
                let planet = orbit.l0 + orbit.rate * d;
                let (sp, cp) = planet.to_radians().sin_cos();
                let x = orbit.a * cp - EARTH.a * ce;
                let y = orbit.a * sp - EARTH.a * se;
                y.atan2(x).to_degrees()
            }
            (_, None) => earth + 180.0,
        };

        normalize_360(j2000_lon + precession)
    }
}

impl PositionProvider for MeanMotionProvider {
    fn name(&self) -> &'static str {
        "mean_motion"
    }

    fn backend(&self) -> Backend {
        Backend::Degraded
    }

    fn covers(&self, epoch: &Epoch) -> bool {
        epoch.jd_tt().is_finite()
    }

    fn positions(&self, epoch: &Epoch) -> Result<BodyPositions, EngineError> {
        Ok(ALL_BODIES
            .into_iter()
            .map(|body| {
                let position = EclipticPosition {
                    longitude: self.longitude(body, epoch),
                    latitude: 0.0,
                };
                (body, position)
            })
            .collect())
    }
}
