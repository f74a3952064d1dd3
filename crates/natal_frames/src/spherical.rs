//! Cartesian ↔ spherical coordinates.

/// Normalize an angle to `[0, 360)` degrees.
pub fn normalize_360(deg: f64) -> f64 {
    let r = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if r >= 360.0 { 0.0 } else { r }
}

/// Longitude/latitude in degrees plus distance in the input unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphericalCoords {
    /// `[0, 360)`, from +x toward +y.
    pub lon_deg: f64,
    /// `[-90, 90]`, above the x-y plane.
    pub lat_deg: f64,
    pub distance: f64,
}

pub fn cartesian_to_spherical(xyz: &[f64; 3]) -> SphericalCoords {
    let [x, y, z] = *xyz;
    let r = (x * x + y * y + z * z).sqrt();
    if r == 0.0 {
        return SphericalCoords {
            lon_deg: 0.0,
            lat_deg: 0.0,
            distance: 0.0,
        };
    }
    SphericalCoords {
        lon_deg: normalize_360(y.atan2(x).to_degrees()),
        lat_deg: (z / r).clamp(-1.0, 1.0).asin().to_degrees(),
        distance: r,
    }
}

pub fn spherical_to_cartesian(coords: &SphericalCoords) -> [f64; 3] {
    let (sin_lon, cos_lon) = coords.lon_deg.to_radians().sin_cos();
    let (sin_lat, cos_lat) = coords.lat_deg.to_radians().sin_cos();
    [
        coords.distance * cos_lat * cos_lon,
        coords.distance * cos_lat * sin_lon,
        coords.distance * sin_lat,
    ]
}
