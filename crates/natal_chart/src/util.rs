//! Angle helpers shared by the chart modules.

pub use natal_frames::normalize_360;

/// Signed shortest motion from `from` to `to`, in `(-180, 180]`.
pub fn signed_delta(from: f64, to: f64) -> f64 {
    let d = normalize_360(to - from);
    if d > 180.0 { d - 360.0 } else { d }
}

/// Unsigned separation `min(|Δ|, 360 − |Δ|)` in `[0, 180]`.
pub fn separation(a: f64, b: f64) -> f64 {
    let d = normalize_360(a - b);
    d.min(360.0 - d)
}
