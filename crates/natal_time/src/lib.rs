//! Time scales for chart computation.
//!
//! - Julian Date ↔ calendar conversion
//! - UTC → TT → TDB with a built-in leap-second table
//! - Earth rotation angle, GMST, apparent and local sidereal time
//! - [`Epoch`], one instant carried in all three scales

pub mod error;
pub mod julian;
pub mod scales;
pub mod sidereal;

use chrono::{DateTime, TimeZone};

pub use error::TimeError;
pub use julian::{
    DAYS_PER_CENTURY, J2000_JD, SECONDS_PER_DAY, UNIX_EPOCH_JD, calendar_to_jd,
    centuries_since_j2000, jd_to_calendar,
};
pub use sidereal::{earth_rotation_angle_rad, gast_rad, gmst_rad, local_sidereal_time_rad};

/// One instant expressed as UTC, TT and TDB Julian Dates.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Epoch {
    jd_utc: f64,
    jd_tt: f64,
    jd_tdb: f64,
}

impl Epoch {
    pub fn from_jd_utc(jd_utc: f64) -> Result<Self, TimeError> {
        if !jd_utc.is_finite() {
            return Err(TimeError::NonFinite);
        }
        Ok(Self::at(jd_utc))
    }

    /// Epoch of a timezone-aware instant.
    pub fn from_datetime<Tz: TimeZone>(instant: &DateTime<Tz>) -> Self {
        let secs = instant.timestamp() as f64 + f64::from(instant.timestamp_subsec_nanos()) * 1e-9;
        Self::at(UNIX_EPOCH_JD + secs / SECONDS_PER_DAY)
    }

    fn at(jd_utc: f64) -> Self {
        let jd_tt = scales::utc_to_tt_jd(jd_utc);
        Self {
            jd_utc,
            jd_tt,
            jd_tdb: scales::tt_to_tdb_jd(jd_tt),
        }
    }

    /// The same wall-clock time `days` UTC days earlier.
    pub fn days_earlier(self, days: f64) -> Self {
        Self::at(self.jd_utc - days)
    }

    pub fn jd_utc(self) -> f64 {
        self.jd_utc
    }

    /// UT1, approximated by UTC.
    pub fn jd_ut1(self) -> f64 {
        self.jd_utc
    }

    pub fn jd_tt(self) -> f64 {
        self.jd_tt
    }

    pub fn jd_tdb(self) -> f64 {
        self.jd_tdb
    }

    /// TDB seconds past J2000, the SPK time argument.
    pub fn tdb_seconds(self) -> f64 {
        julian::jd_to_seconds_past_j2000(self.jd_tdb)
    }

    /// Julian centuries of TT since J2000.0.
    pub fn centuries_tt(self) -> f64 {
        centuries_since_j2000(self.jd_tt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use chrono::{FixedOffset, Utc};

    #[test]
    fn unix_epoch_maps_to_its_julian_date() {
        let epoch = Epoch::from_datetime(&Utc.timestamp_opt(0, 0).unwrap());
        assert_eq!(epoch.jd_utc(), UNIX_EPOCH_JD);
    }

    #[test]
    fn offset_does_not_change_instant() {
        let utc = Utc.with_ymd_and_hms(1990, 6, 15, 18, 30, 0).unwrap();
        let local = utc.with_timezone(&FixedOffset::east_opt(5 * 3600 + 1800).unwrap());
        assert_eq!(Epoch::from_datetime(&utc), Epoch::from_datetime(&local));
    }

    #[test]
    fn scales_are_ordered() {
        let epoch = Epoch::from_jd_utc(J2000_JD).unwrap();
        assert_abs_diff_eq!((epoch.jd_tt() - epoch.jd_utc()) * SECONDS_PER_DAY, 64.184, epsilon = 1e-6);
        assert_abs_diff_eq!(epoch.tdb_seconds(), 64.184, epsilon = 0.002);
        assert_eq!(epoch.jd_ut1(), epoch.jd_utc());
    }

    #[test]
    fn day_earlier_shifts_utc() {
        let epoch = Epoch::from_jd_utc(2_460_000.25).unwrap();
        assert_eq!(epoch.days_earlier(1.0).jd_utc(), 2_459_999.25);
    }

    #[test]
    fn non_finite_rejected() {
        assert_eq!(Epoch::from_jd_utc(f64::INFINITY), Err(TimeError::NonFinite));
    }
}
