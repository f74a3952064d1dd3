//! Ascendant and midheaven from local apparent sidereal time.
//!
//! Sources: Meeus, "Astronomical Algorithms" (2nd ed), Ch. 12-13;
//! standard spherical astronomy (Montenbruck & Pfleger).

use natal_frames::{equation_of_equinoxes_rad, true_obliquity_rad};
use natal_time::{Epoch, gast_rad, local_sidereal_time_rad};

use crate::util::normalize_360;

/// The chart angles and the sidereal quantities behind them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Angles {
    /// Ecliptic longitude rising in the east, degrees.
    pub ascendant: f64,
    /// Ecliptic longitude culminating on the meridian, degrees.
    pub midheaven: f64,
    /// Right ascension of the MC (local apparent sidereal time), radians.
    pub ramc_rad: f64,
    /// True obliquity of date, radians.
    pub obliquity_rad: f64,
    pub latitude_rad: f64,
}

/// Local apparent sidereal time in radians, `[0, 2π)`.
///
/// GMST from UT1 (taken as UTC), plus the equation of the equinoxes,
/// plus the observer's east longitude.
pub fn local_apparent_sidereal_time_rad(epoch: &Epoch, longitude_deg: f64) -> f64 {
    let eqeq = equation_of_equinoxes_rad(epoch.centuries_tt());
    let gast = gast_rad(epoch.jd_ut1(), eqeq);
    local_sidereal_time_rad(gast, longitude_deg.to_radians())
}

/// Ascendant longitude in degrees.
///
/// `λ = atan2(cos θ, −(sin θ·cos ε + tan φ·sin ε))`
pub fn ascendant_deg(lst_rad: f64, latitude_rad: f64, eps_rad: f64) -> f64 {
    let asc = f64::atan2(
        lst_rad.cos(),
        -(lst_rad.sin() * eps_rad.cos() + latitude_rad.tan() * eps_rad.sin()),
    );
    normalize_360(asc.to_degrees())
}

/// Midheaven longitude in degrees: `λ = atan2(sin θ, cos θ·cos ε)`.
pub fn midheaven_deg(lst_rad: f64, eps_rad: f64) -> f64 {
    let mc = f64::atan2(lst_rad.sin(), lst_rad.cos() * eps_rad.cos());
    normalize_360(mc.to_degrees())
}

pub fn angles_from_lst(lst_rad: f64, latitude_deg: f64, eps_rad: f64) -> Angles {
    let latitude_rad = latitude_deg.to_radians();
    Angles {
        ascendant: ascendant_deg(lst_rad, latitude_rad, eps_rad),
        midheaven: midheaven_deg(lst_rad, eps_rad),
        ramc_rad: lst_rad,
        obliquity_rad: eps_rad,
        latitude_rad,
    }
}

/// Angles for an observer at `latitude_deg`/`longitude_deg` (east
/// positive) at `epoch`.
pub fn angles(epoch: &Epoch, latitude_deg: f64, longitude_deg: f64) -> Angles {
    let lst = local_apparent_sidereal_time_rad(epoch, longitude_deg);
    let eps = true_obliquity_rad(epoch.centuries_tt());
    angles_from_lst(lst, latitude_deg, eps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use natal_frames::OBLIQUITY_J2000_RAD;
    use std::f64::consts::FRAC_PI_2;

    const EPS: f64 = OBLIQUITY_J2000_RAD;

    #[test]
    fn equator_at_zero_sidereal_time() {
        assert_abs_diff_eq!(ascendant_deg(0.0, 0.0, EPS), 90.0, epsilon = 1e-10);
        assert_abs_diff_eq!(midheaven_deg(0.0, EPS), 0.0, epsilon = 1e-10);
    }

    #[test]
    fn equator_at_six_hours() {
        assert_abs_diff_eq!(ascendant_deg(FRAC_PI_2, 0.0, EPS), 180.0, epsilon = 1e-10);
        assert_abs_diff_eq!(midheaven_deg(FRAC_PI_2, EPS), 90.0, epsilon = 1e-10);
    }

    #[test]
    fn ascendant_is_in_the_eastern_half() {
        for lat in [-60.0_f64, -35.0, 0.0, 23.0, 51.5, 64.0] {
            for step in 0..48 {
                let lst = f64::from(step) * std::f64::consts::TAU / 48.0;
                let a = angles_from_lst(lst, lat, EPS);
                let arc = normalize_360(a.ascendant - a.midheaven);
                assert!(arc > 0.0 && arc < 180.0, "lat {lat} lst {lst}: arc {arc}");
            }
        }
    }

    #[test]
    fn equatorial_ascendant_is_ecliptic_point_ninety_degrees_east_in_ra() {
        let lst = 1.234_f64;
        let ra = lst + FRAC_PI_2;
        let expected = normalize_360(f64::atan2(ra.sin(), ra.cos() * EPS.cos()).to_degrees());
        assert_abs_diff_eq!(ascendant_deg(lst, 0.0, EPS), expected, epsilon = 1e-10);
    }

    #[test]
    fn angles_at_an_instant_are_finite_and_normalized() {
        let epoch = Epoch::from_jd_utc(2_451_545.0).unwrap();
        let a = angles(&epoch, 40.7, -74.0);
        for v in [a.ascendant, a.midheaven] {
            assert!((0.0..360.0).contains(&v));
        }
        assert!((0.0..std::f64::consts::TAU).contains(&a.ramc_rad));
    }
}
