//! UTC → TT → TDB conversion.
//!
//! TT = UTC + ΔAT + 32.184 s, with ΔAT from the IERS leap-second history.
//! TDB − TT uses the two-term periodic approximation from the
//! Explanatory Supplement (accurate to ~30 µs), ample for chart work.
//! UT1 is taken equal to UTC (|UT1 − UTC| < 0.9 s).

use std::f64::consts::TAU;

use crate::julian::{J2000_JD, SECONDS_PER_DAY};

/// TT − TAI in seconds.
pub const TT_MINUS_TAI: f64 = 32.184;

/// (UTC Julian Date the value takes effect, TAI − UTC seconds).
const LEAP_SECONDS: &[(f64, f64)] = &[
    (2_441_317.5, 10.0), // 1972-01-01
    (2_441_499.5, 11.0), // 1972-07-01
    (2_441_683.5, 12.0), // 1973-01-01
    (2_442_048.5, 13.0), // 1974-01-01
    (2_442_413.5, 14.0), // 1975-01-01
    (2_442_778.5, 15.0), // 1976-01-01
    (2_443_144.5, 16.0), // 1977-01-01
    (2_443_509.5, 17.0), // 1978-01-01
    (2_443_874.5, 18.0), // 1979-01-01
    (2_444_239.5, 19.0), // 1980-01-01
    (2_444_786.5, 20.0), // 1981-07-01
    (2_445_151.5, 21.0), // 1982-07-01
    (2_445_516.5, 22.0), // 1983-07-01
    (2_446_247.5, 23.0), // 1985-07-01
    (2_447_161.5, 24.0), // 1988-01-01
    (2_447_892.5, 25.0), // 1990-01-01
    (2_448_257.5, 26.0), // 1991-01-01
    (2_448_804.5, 27.0), // 1992-07-01
    (2_449_169.5, 28.0), // 1993-07-01
    (2_449_534.5, 29.0), // 1994-07-01
    (2_450_083.5, 30.0), // 1996-01-01
    (2_450_630.5, 31.0), // 1997-07-01
    (2_451_179.5, 32.0), // 1999-01-01
    (2_453_736.5, 33.0), // 2006-01-01
    (2_454_832.5, 34.0), // 2009-01-01
    (2_456_109.5, 35.0), // 2012-07-01
    (2_457_204.5, 36.0), // 2015-07-01
    (2_457_754.5, 37.0), // 2017-01-01
];

/// TAI − UTC at a UTC Julian Date.
///
/// Before 1972 the 1972 value of 10 s is held constant; the rubber-second
/// era is not modelled.
pub fn delta_at(jd_utc: f64) -> f64 {
    LEAP_SECONDS
        .iter()
        .rev()
        .find(|(start, _)| jd_utc >= *start)
        .map_or(LEAP_SECONDS[0].1, |&(_, dat)| dat)
}

/// TT − UTC in seconds.
pub fn tt_minus_utc(jd_utc: f64) -> f64 {
    delta_at(jd_utc) + TT_MINUS_TAI
}

/// TDB − TT in seconds.
pub fn tdb_minus_tt(jd_tt: f64) -> f64 {
    let g = earth_mean_anomaly_rad(jd_tt);
    0.001_657 * g.sin() + 0.000_014 * (2.0 * g).sin()
}

pub fn utc_to_tt_jd(jd_utc: f64) -> f64 {
    jd_utc + tt_minus_utc(jd_utc) / SECONDS_PER_DAY
}

pub fn tt_to_tdb_jd(jd_tt: f64) -> f64 {
    jd_tt + tdb_minus_tt(jd_tt) / SECONDS_PER_DAY
}

pub fn utc_to_tdb_jd(jd_utc: f64) -> f64 {
    tt_to_tdb_jd(utc_to_tt_jd(jd_utc))
}

/// Mean anomaly of the Earth used by [`tdb_minus_tt`], radians in `[0, 2π)`.
pub fn earth_mean_anomaly_rad(jd_tt: f64) -> f64 {
    (357.53 + 0.985_600_28 * (jd_tt - J2000_JD))
        .to_radians()
        .rem_euclid(TAU)
}
