//! Error types for kernel loading and evaluation.

use thiserror::Error;

/// Errors from DAF parsing or SPK evaluation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum KernelError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid DAF file: {0}")]
    InvalidFormat(String),

    #[error("unsupported SPK data type {0}")]
    UnsupportedType(i32),

    #[error("no segment for target {target} relative to center {center}")]
    SegmentNotFound { target: i32, center: i32 },

    #[error("epoch {epoch_tdb_s} s outside coverage of target {target} / center {center}")]
    EpochOutOfRange {
        target: i32,
        center: i32,
        epoch_tdb_s: f64,
    },
}

impl KernelError {
    pub(crate) fn format(msg: impl Into<String>) -> Self {
        Self::InvalidFormat(msg.into())
    }
}
