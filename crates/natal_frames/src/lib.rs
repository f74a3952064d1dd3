//! Reference-frame helpers for apparent ecliptic positions.
//!
//! J2000 mean equator → (precession) → mean equator of date →
//! (mean obliquity) → mean ecliptic of date → (+Δψ) → true ecliptic of date.

pub mod nutation;
pub mod obliquity;
pub mod precession;
pub mod rotation;
pub mod spherical;

pub use nutation::{Nutation, equation_of_equinoxes_rad, nutation, true_obliquity_rad};
pub use obliquity::{ARCSEC_TO_RAD, OBLIQUITY_J2000_RAD, mean_obliquity_rad};
pub use precession::{general_precession_longitude_deg, precession_matrix};
pub use rotation::{Mat3, equatorial_to_ecliptic, mat_vec};
pub use spherical::{SphericalCoords, cartesian_to_spherical, normalize_360, spherical_to_cartesian};

/// Rotate a J2000 equatorial (ICRF) vector onto the true ecliptic and
/// equinox of date and return its spherical coordinates.
///
/// `t` is Julian centuries of TT since J2000.0.
pub fn icrf_to_true_ecliptic_of_date(v: &[f64; 3], t: f64) -> SphericalCoords {
    let mean_equator = mat_vec(&precession_matrix(t), v);
    let mean_ecliptic = equatorial_to_ecliptic(&mean_equator, mean_obliquity_rad(t));
    let mut coords = cartesian_to_spherical(&mean_ecliptic);
    coords.lon_deg = normalize_360(coords.lon_deg + nutation(t).dpsi.to_degrees());
    coords
}
