//! Reader for JPL planetary ephemerides stored as NAIF SPK files.
//!
//! Supports Type 2 (Chebyshev position) segments as found in the DE4xx
//! series, plus a small writer for building test kernels.

pub mod chebyshev;
pub mod daf;
mod error;
pub mod spk;
pub mod writer;

pub use error::KernelError;
pub use spk::{SSB, SpkEvaluation, SpkKernel, SpkSegment, planet_body_to_barycenter};
pub use writer::{SpkWriter, Type2Segment};
