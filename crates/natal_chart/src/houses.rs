//! House division: Equal and Placidus.
//!
//! Cusps 1/4/7/10 of a quadrant system are the Ascendant, IC, Descendant
//! and MC. Placidus trisects the time each cusp point spends between the
//! meridian and the horizon, so it is undefined inside the polar circles.

use std::f64::consts::{FRAC_PI_2, PI};

use serde::{Deserialize, Serialize};

use crate::ascendant::Angles;
use crate::error::HouseError;
use crate::util::normalize_360;
use crate::zodiac::{Sign, sign_for};

const MAX_ITERATIONS: usize = 100;
const TOLERANCE_RAD: f64 = 1e-10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HouseSystem {
    #[default]
    Equal,
    Placidus,
}

impl HouseSystem {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Equal => "equal",
            Self::Placidus => "placidus",
        }
    }

    /// Whether the system divides by time rather than by arc.
    pub const fn is_quadrant(self) -> bool {
        matches!(self, Self::Placidus)
    }
}

impl std::fmt::Display for HouseSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HouseCusp {
    /// 1..=12.
    pub house: u8,
    pub cusp_longitude: f64,
    pub cusp_sign: Sign,
}

/// Twelve cusps 30° apart starting at the ascendant.
pub fn equal_cusps(ascendant_deg: f64) -> [f64; 12] {
    std::array::from_fn(|i| normalize_360(ascendant_deg + 30.0 * i as f64))
}

pub fn placidus_cusps(angles: &Angles) -> Result<[f64; 12], HouseError> {
    let Angles {
        ascendant,
        midheaven,
        ramc_rad: ramc,
        obliquity_rad: eps,
        latitude_rad: lat,
    } = *angles;

    if lat.abs() >= FRAC_PI_2 - eps {
        return Err(HouseError::PolarLatitude {
            latitude: lat.to_degrees(),
        });
    }

    let mut cusps = [0.0; 12];
    cusps[0] = ascendant;
    cusps[9] = midheaven;
    // 11 and 12 trisect the diurnal semi-arc east of the MC; 2 and 3 the
    // nocturnal semi-arc below the ascendant, written in diurnal terms.
    cusps[10] = semi_arc_cusp(11, ramc, lat, eps, 0.0, 1.0 / 3.0)?;
    cusps[11] = semi_arc_cusp(12, ramc, lat, eps, 0.0, 2.0 / 3.0)?;
    cusps[1] = semi_arc_cusp(2, ramc, lat, eps, PI / 3.0, 2.0 / 3.0)?;
    cusps[2] = semi_arc_cusp(3, ramc, lat, eps, 2.0 * PI / 3.0, 1.0 / 3.0)?;

    for (from, to) in [(0, 6), (1, 7), (2, 8), (9, 3), (10, 4), (11, 5)] {
        cusps[to] = normalize_360(cusps[from] + 180.0);
    }
    Ok(cusps)
}

/// Solve `α = RAMC + offset + fraction·DSA(δ(α))` for the ecliptic point
/// at right ascension `α`, returning its longitude in degrees.
fn semi_arc_cusp(
    house: u8,
    ramc: f64,
    lat: f64,
    eps: f64,
    offset: f64,
    fraction: f64,
) -> Result<f64, HouseError> {
    let base = ramc + offset;
    let mut ra = base + fraction * FRAC_PI_2;
    for _ in 0..MAX_ITERATIONS {
        let dec = (eps.tan() * ra.sin()).atan();
        let dsa = diurnal_semi_arc_rad(dec, lat).ok_or(HouseError::Circumpolar { house })?;
        let next = base + fraction * dsa;
        if (next - ra).abs() < TOLERANCE_RAD {
            return Ok(ecliptic_longitude_of_ra_deg(next, eps));
        }
        ra = next;
    }
    Err(HouseError::NoConvergence { house })
}

/// Hour angle at setting, `acos(−tan φ·tan δ)`; `None` when the point
/// never rises or never sets.
fn diurnal_semi_arc_rad(dec: f64, lat: f64) -> Option<f64> {
    let cos_h = -(lat.tan() * dec.tan());
    (cos_h.abs() <= 1.0).then(|| cos_h.acos())
}

/// Longitude of the ecliptic point with right ascension `ra`.
fn ecliptic_longitude_of_ra_deg(ra: f64, eps: f64) -> f64 {
    normalize_360(f64::atan2(ra.sin(), ra.cos() * eps.cos()).to_degrees())
}

pub fn to_house_cusps(cusps: &[f64; 12]) -> Vec<HouseCusp> {
    cusps
        .iter()
        .zip(1u8..)
        .map(|(&lon, house)| HouseCusp {
            house,
            cusp_longitude: lon,
            cusp_sign: sign_for(lon),
        })
        .collect()
}
