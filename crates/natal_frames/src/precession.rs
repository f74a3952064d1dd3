//! Precession of the equinoxes.
//!
//! - General precession in longitude p_A: IAU 2006 (Capitaine et al. 2003).
//! - Equatorial precession matrix: IAU 1976 angles ζ_A, z_A, θ_A
//!   (Lieske et al. 1977), as tabulated in Meeus ch. 21.

use crate::obliquity::ARCSEC_TO_RAD;
use crate::rotation::{Mat3, mat_mul, r2, r3};

/// General precession in ecliptic longitude since J2000.0, arcseconds.
/// Positive for dates after J2000.
pub fn general_precession_longitude_arcsec(t: f64) -> f64 {
    t * (5028.796_195 + t * (1.105_434_8 + t * (0.000_079_64 + t * (-0.000_023_857 + t * -0.000_000_038_3))))
}

pub fn general_precession_longitude_deg(t: f64) -> f64 {
    general_precession_longitude_arcsec(t) / 3600.0
}

/// Matrix taking J2000 mean-equatorial vectors to the mean equator and
/// equinox of date; `t` in Julian centuries of TT.
pub fn precession_matrix(t: f64) -> Mat3 {
    let zeta = t * (2306.2181 + t * (0.301_88 + t * 0.017_998)) * ARCSEC_TO_RAD;
    let z = t * (2306.2181 + t * (1.094_68 + t * 0.018_203)) * ARCSEC_TO_RAD;
    let theta = t * (2004.3109 + t * (-0.426_65 + t * -0.041_833)) * ARCSEC_TO_RAD;
    mat_mul(&r3(-z), &mat_mul(&r2(theta), &r3(-zeta)))
}
