//! Mean obliquity of the ecliptic (IAU 2006, Capitaine et al. 2003).

pub const ARCSEC_TO_RAD: f64 = std::f64::consts::PI / (180.0 * 3600.0);

/// Mean obliquity at J2000.0, arcseconds.
pub const OBLIQUITY_J2000_ARCSEC: f64 = 84_381.406;

pub const OBLIQUITY_J2000_RAD: f64 = OBLIQUITY_J2000_ARCSEC * ARCSEC_TO_RAD;

/// Mean obliquity of date in radians; `t` in Julian centuries of TT.
pub fn mean_obliquity_rad(t: f64) -> f64 {
    let arcsec = OBLIQUITY_J2000_ARCSEC
        + t * (-46.836_769
            + t * (-0.000_183_1 + t * (0.002_003_40 + t * (-0.000_000_576 + t * -0.000_000_043_4))));
    arcsec * ARCSEC_TO_RAD
}
