//! Calendar instant → Epoch → sidereal time, checked against Meeus ch. 12.

use approx::assert_abs_diff_eq;
use chrono::{TimeZone, Utc};
use natal_time::{Epoch, gast_rad, gmst_rad, local_sidereal_time_rad};

fn hours(rad: f64) -> f64 {
    rad.to_degrees() / 15.0
}

#[test]
fn meeus_example_12b() {
    let instant = Utc.with_ymd_and_hms(1987, 4, 10, 19, 21, 0).unwrap();
    let epoch = Epoch::from_datetime(&instant);
    assert_abs_diff_eq!(epoch.jd_ut1(), 2_446_896.306_25, epsilon = 1e-8);

    let gmst = gmst_rad(epoch.jd_ut1());
    assert_abs_diff_eq!(hours(gmst), 8.0 + 34.0 / 60.0 + 57.0896 / 3600.0, epsilon = 2e-5);

    // Δψ = −3.788″, ε = 23°26′36.85″ (Meeus example 22.a)
    let dpsi = (-3.788f64 / 3600.0).to_radians();
    let eps = (23.0f64 + 26.0 / 60.0 + 36.85 / 3600.0).to_radians();
    let gast = gast_rad(epoch.jd_ut1(), dpsi * eps.cos());
    assert_abs_diff_eq!(hours(gast), 8.0 + 34.0 / 60.0 + 56.853 / 3600.0, epsilon = 2e-5);
}

#[test]
fn local_time_moves_with_east_longitude() {
    let epoch = Epoch::from_datetime(&Utc.with_ymd_and_hms(2024, 3, 20, 0, 0, 0).unwrap());
    let greenwich = gmst_rad(epoch.jd_ut1());
    let tokyo = local_sidereal_time_rad(greenwich, 139.69f64.to_radians());
    let diff = (tokyo - greenwich).rem_euclid(std::f64::consts::TAU).to_degrees();
    assert_abs_diff_eq!(diff, 139.69, epsilon = 1e-9);
}
