//! Julian Date arithmetic.
//!
//! Calendar conversion follows Meeus, *Astronomical Algorithms*, ch. 7,
//! switching from Julian to Gregorian at 1582-Oct-15.

use crate::error::TimeError;

/// Julian Date of J2000.0 (2000-Jan-01 12:00 TT).
pub const J2000_JD: f64 = 2_451_545.0;

/// Julian Date of the Unix epoch (1970-Jan-01 00:00 UTC).
pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;

pub const SECONDS_PER_DAY: f64 = 86_400.0;

pub const DAYS_PER_CENTURY: f64 = 36_525.0;

/// Julian Date from a calendar date whose day carries the fraction of day.
pub fn calendar_to_jd(year: i32, month: u32, day: f64) -> Result<f64, TimeError> {
    if !(1..=12).contains(&month) || !day.is_finite() || !(1.0..32.0).contains(&day) {
        return Err(TimeError::InvalidCalendarDate { year, month, day });
    }

    let (y, m) = if month <= 2 {
        (year as f64 - 1.0, month as f64 + 12.0)
    } else {
        (year as f64, month as f64)
    };

    let gregorian = (year, month, day) >= (1582, 10, 15.0);
    let b = if gregorian {
        let a = (y / 100.0).floor();
        2.0 - a + (a / 4.0).floor()
    } else {
        0.0
    };

    Ok((365.25 * (y + 4716.0)).floor() + (30.6001 * (m + 1.0)).floor() + day + b - 1524.5)
}

/// Calendar date `(year, month, day-with-fraction)` from a Julian Date.
pub fn jd_to_calendar(jd: f64) -> Result<(i32, u32, f64), TimeError> {
    if !jd.is_finite() {
        return Err(TimeError::NonFinite);
    }
    let shifted = jd + 0.5;
    let z = shifted.floor();
    let f = shifted - z;

    let a = if z < 2_299_161.0 {
        z
    } else {
        let alpha = ((z - 1_867_216.25) / 36_524.25).floor();
        z + 1.0 + alpha - (alpha / 4.0).floor()
    };
    let b = a + 1524.0;
    let c = ((b - 122.1) / 365.25).floor();
    let d = (365.25 * c).floor();
    let e = ((b - d) / 30.6001).floor();

    let day = b - d - (30.6001 * e).floor() + f;
    let month = if e < 14.0 { e - 1.0 } else { e - 13.0 };
    let year = if month > 2.0 { c - 4716.0 } else { c - 4715.0 };

    Ok((year as i32, month as u32, day))
}

/// Seconds past J2000 in the same scale as `jd`.
pub fn jd_to_seconds_past_j2000(jd: f64) -> f64 {
    (jd - J2000_JD) * SECONDS_PER_DAY
}

pub fn seconds_past_j2000_to_jd(s: f64) -> f64 {
    J2000_JD + s / SECONDS_PER_DAY
}

/// Julian centuries since J2000.0.
pub fn centuries_since_j2000(jd: f64) -> f64 {
    (jd - J2000_JD) / DAYS_PER_CENTURY
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn j2000_noon() {
        assert_abs_diff_eq!(calendar_to_jd(2000, 1, 1.5).unwrap(), J2000_JD);
    }

    #[test]
    fn unix_epoch() {
        assert_abs_diff_eq!(calendar_to_jd(1970, 1, 1.0).unwrap(), UNIX_EPOCH_JD);
    }

    #[test]
    fn meeus_examples() {
        // Meeus 7.a and 7.b
        assert_abs_diff_eq!(calendar_to_jd(1957, 10, 4.81).unwrap(), 2_436_116.31, epsilon = 1e-9);
        assert_abs_diff_eq!(calendar_to_jd(333, 1, 27.5).unwrap(), 1_842_713.0, epsilon = 1e-9);
    }

    #[test]
    fn calendar_round_trip() {
        let (y, m, d) = jd_to_calendar(2_436_116.31).unwrap();
        assert_eq!((y, m), (1957, 10));
        assert_abs_diff_eq!(d, 4.81, epsilon = 1e-6);
    }

    #[test]
    fn rejects_bad_month() {
        assert!(calendar_to_jd(2020, 13, 1.0).is_err());
        assert!(calendar_to_jd(2020, 0, 1.0).is_err());
        assert!(jd_to_calendar(f64::NAN).is_err());
    }

    #[test]
    fn seconds_and_centuries() {
        assert_eq!(jd_to_seconds_past_j2000(J2000_JD + 1.0), SECONDS_PER_DAY);
        assert_eq!(seconds_past_j2000_to_jd(0.0), J2000_JD);
        assert_abs_diff_eq!(centuries_since_j2000(J2000_JD + DAYS_PER_CENTURY), 1.0);
    }
}
