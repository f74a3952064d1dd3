//! Earth rotation angle and sidereal time.
//!
//! Inputs are UT1 Julian Dates; callers pass UTC directly since the
//! difference is below a second.
//!
//! - ERA: IERS Conventions 2010, eq. 5.15.
//! - GMST: Capitaine et al. 2003, Table 2.

use std::f64::consts::{PI, TAU};

use crate::julian::{DAYS_PER_CENTURY, J2000_JD};

const ARCSEC_TO_RAD: f64 = PI / (180.0 * 3600.0);

/// Earth rotation angle in radians, `[0, 2π)`.
pub fn earth_rotation_angle_rad(jd_ut1: f64) -> f64 {
    let du = jd_ut1 - J2000_JD;
    // Split off whole days so the turn fraction keeps its precision.
    let turns = 0.779_057_273_264_0 + 0.002_737_811_911_354_48 * du + du.fract();
    (TAU * turns).rem_euclid(TAU)
}

/// Greenwich mean sidereal time in radians, `[0, 2π)`.
pub fn gmst_rad(jd_ut1: f64) -> f64 {
    let t = (jd_ut1 - J2000_JD) / DAYS_PER_CENTURY;
    let poly = 0.014_506
        + t * (4612.156_534
            + t * (1.391_581_7 + t * (-0.000_000_44 + t * (-0.000_029_956 + t * -0.000_000_036_8))));
    (earth_rotation_angle_rad(jd_ut1) + poly * ARCSEC_TO_RAD).rem_euclid(TAU)
}

/// Greenwich apparent sidereal time: GMST plus the equation of the
/// equinoxes (`Δψ·cos ε`, radians).
pub fn gast_rad(jd_ut1: f64, equation_of_equinoxes_rad: f64) -> f64 {
    (gmst_rad(jd_ut1) + equation_of_equinoxes_rad).rem_euclid(TAU)
}

/// Local sidereal time for an east longitude, radians in `[0, 2π)`.
pub fn local_sidereal_time_rad(greenwich_rad: f64, longitude_east_rad: f64) -> f64 {
    (greenwich_rad + longitude_east_rad).rem_euclid(TAU)
}
