//! The birth data a chart is computed from.

use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone};
use natal_time::Epoch;
use serde::{Deserialize, Serialize};

use crate::error::ChartError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BirthInput {
    /// Timezone-aware birth instant; RFC 3339 on the wire.
    pub birth_datetime: DateTime<FixedOffset>,
    /// Degrees, north positive.
    pub latitude: f64,
    /// Degrees, east positive.
    pub longitude: f64,
    /// No time of day was known; angles and houses are omitted.
    pub date_only: bool,
}

impl BirthInput {
    pub fn new(
        birth_datetime: DateTime<FixedOffset>,
        latitude: f64,
        longitude: f64,
    ) -> Result<Self, ChartError> {
        let input = Self {
            birth_datetime,
            latitude,
            longitude,
            date_only: false,
        };
        input.validate()?;
        Ok(input)
    }

    /// A date-only input, placed at local noon.
    pub fn from_date(
        date: NaiveDate,
        offset: FixedOffset,
        latitude: f64,
        longitude: f64,
    ) -> Result<Self, ChartError> {
        let birth_datetime = date
            .and_hms_opt(12, 0, 0)
            .and_then(|noon| offset.from_local_datetime(&noon).single())
            .ok_or_else(|| ChartError::invalid("birth_datetime", format!("no local noon on {date}")))?;
        let input = Self {
            birth_datetime,
            latitude,
            longitude,
            date_only: true,
        };
        input.validate()?;
        Ok(input)
    }

    pub fn validate(&self) -> Result<(), ChartError> {
        if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            return Err(ChartError::invalid(
                "latitude",
                format!("{} is outside [-90, 90]", self.latitude),
            ));
        }
        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(ChartError::invalid(
                "longitude",
                format!("{} is outside [-180, 180]", self.longitude),
            ));
        }
        Ok(())
    }

    pub fn epoch(&self) -> Epoch {
        Epoch::from_datetime(&self.birth_datetime)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn ist() -> FixedOffset {
        FixedOffset::east_opt(5 * 3600 + 1800).unwrap()
    }

    fn instant() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("1990-06-15T18:30:00+05:30").unwrap()
    }

    #[rstest]
    #[case(90.0, 180.0)]
    #[case(-90.0, -180.0)]
    #[case(0.0, 0.0)]
    fn accepts_bounds(#[case] lat: f64, #[case] lon: f64) {
        assert!(BirthInput::new(instant(), lat, lon).is_ok());
    }

    #[rstest]
    #[case(90.01, 0.0, "latitude")]
    #[case(f64::NAN, 0.0, "latitude")]
    #[case(0.0, -180.5, "longitude")]
    #[case(0.0, f64::INFINITY, "longitude")]
    fn names_the_offending_field(#[case] lat: f64, #[case] lon: f64, #[case] field: &str) {
        match BirthInput::new(instant(), lat, lon) {
            Err(ChartError::InvalidInput { field: f, .. }) => assert_eq!(f, field),
            other => panic!("expected invalid {field}, got {other:?}"),
        }
    }

    #[test]
    fn date_only_sits_at_local_noon() {
        let date = NaiveDate::from_ymd_opt(1985, 3, 2).unwrap();
        let input = BirthInput::from_date(date, ist(), 28.6, 77.2).unwrap();
        assert!(input.date_only);
        assert_eq!(input.birth_datetime.to_rfc3339(), "1985-03-02T12:00:00+05:30");
    }

    #[test]
    fn wire_format_is_rfc3339_with_offset() {
        let input = BirthInput::new(instant(), 28.6139, 77.209).unwrap();
        let value = serde_json::to_value(&input).unwrap();
        assert_eq!(value["birth_datetime"], "1990-06-15T18:30:00+05:30");
        assert_eq!(value["date_only"], false);
        let back: BirthInput = serde_json::from_value(value).unwrap();
        assert_eq!(back, input);
    }
}
