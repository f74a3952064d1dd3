//! Error types for time conversions.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum TimeError {
    #[error("invalid calendar date {year}-{month:02}-{day}")]
    InvalidCalendarDate { year: i32, month: u32, day: f64 },

    #[error("non-finite Julian date")]
    NonFinite,
}
