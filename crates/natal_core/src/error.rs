//! Errors from the position layer.

use jpl_kernel::KernelError;
use natal_time::TimeError;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EngineError {
    #[error("invalid ephemeris config: {0}")]
    InvalidConfig(&'static str),

    #[error("ephemeris kernel error: {0}")]
    Kernel(#[from] KernelError),

    #[error("time conversion error: {0}")]
    Time(#[from] TimeError),

    #[error("instant JD(TDB) {jd_tdb} is outside the {provider} coverage")]
    OutOfCoverage {
        provider: &'static str,
        jd_tdb: f64,
    },

    #[error("ephemeris dataset not found at {0}")]
    DatasetMissing(std::path::PathBuf),

    #[error("ephemeris download failed: {0}")]
    Download(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
