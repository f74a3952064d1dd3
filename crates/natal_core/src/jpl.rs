//! High-precision provider backed by a JPL SPK ephemeris.
//!
//! Apparent geocentric positions: light-time corrected target, annual
//! aberration from the Earth's barycentric velocity, then precession and
//! nutation onto the true ecliptic of date.

use std::collections::HashMap;
use std::sync::Arc;

use jpl_kernel::SpkKernel;
use natal_frames::icrf_to_true_ecliptic_of_date;
use natal_time::{Epoch, SECONDS_PER_DAY, J2000_JD};

use crate::body::{ALL_BODIES, Body};
use crate::error::EngineError;
use crate::provider::{Backend, BodyPositions, EclipticPosition, PositionProvider};

/// Speed of light, km/s.
pub const C_KM_S: f64 = 299_792.458;

const EARTH: i32 = 399;

/// Slack kept inside the file span for light-time lookback.
const LIGHT_TIME_MARGIN_S: f64 = SECONDS_PER_DAY;

/// Per-request memo of barycentric states, keyed by (NAIF code, epoch bits).
///
/// All bodies share the observer's Earth state, and the chain hops through
/// the Earth-Moon barycenter are reused between Earth and Moon.
struct ComputationContext {
    cache: HashMap<(i32, u64), [f64; 6]>,
    evaluations: u32,
}

impl ComputationContext {
    fn new() -> Self {
        Self {
            cache: HashMap::with_capacity(32),
            evaluations: 0,
        }
    }

    fn ssb_state(&mut self, kernel: &SpkKernel, code: i32, tdb_s: f64) -> Result<[f64; 6], EngineError> {
        let key = (code, tdb_s.to_bits());
        if let Some(state) = self.cache.get(&key) {
            return Ok(*state);
        }
        let state = kernel.resolve_to_ssb(code, tdb_s)?;
        self.evaluations += 1;
        self.cache.insert(key, state);
        Ok(state)
    }
}

/// Positions from a loaded SPK file.
#[derive(Debug, Clone)]
pub struct JplProvider {
    kernel: Arc<SpkKernel>,
    /// Usable window, TDB seconds past J2000.
    window: (f64, f64),
}

impl JplProvider {
    /// Wrap a kernel, checking that Earth and every chart body resolve.
    pub fn new(kernel: Arc<SpkKernel>) -> Result<Self, EngineError> {
        let (lo, hi) = kernel.common_span();
        let window = (lo + LIGHT_TIME_MARGIN_S, hi - LIGHT_TIME_MARGIN_S);
        if !(window.0 < window.1) {
            return Err(EngineError::InvalidConfig("ephemeris span is too short"));
        }

        let probe = 0.5 * (window.0 + window.1);
        kernel.resolve_to_ssb(EARTH, probe)?;
        for body in ALL_BODIES {
            kernel.resolve_to_ssb(body.naif_code(), probe)?;
        }

        Ok(Self { kernel, window })
    }

    /// Usable coverage as TDB Julian Dates.
    pub fn coverage_jd_tdb(&self) -> (f64, f64) {
        (
            J2000_JD + self.window.0 / SECONDS_PER_DAY,
            J2000_JD + self.window.1 / SECONDS_PER_DAY,
        )
    }

    pub fn kernel(&self) -> &SpkKernel {
        &self.kernel
    }

    /// Apparent position of one body.
    pub fn apparent_position(&self, body: Body, epoch: &Epoch) -> Result<EclipticPosition, EngineError> {
        self.check_coverage(epoch)?;
        let mut ctx = ComputationContext::new();
        let earth = ctx.ssb_state(&self.kernel, EARTH, epoch.tdb_seconds())?;
        self.apparent_with_ctx(body, epoch, &earth, &mut ctx)
    }

    fn check_coverage(&self, epoch: &Epoch) -> Result<(), EngineError> {
        if self.covers(epoch) {
            Ok(())
        } else {
            Err(EngineError::OutOfCoverage {
                provider: self.name(),
                jd_tdb: epoch.jd_tdb(),
            })
        }
    }

    fn apparent_with_ctx(
        &self,
        body: Body,
        epoch: &Epoch,
        earth: &[f64; 6],
        ctx: &mut ComputationContext,
    ) -> Result<EclipticPosition, EngineError> {
        let t = epoch.tdb_seconds();
        let code = body.naif_code();

        // Geometric pass, then two light-time refinements.
        let mut tau = 0.0;
        let mut d = [0.0; 3];
        for _ in 0..3 {
            let target = ctx.ssb_state(&self.kernel, code, t - tau)?;
            d = [target[0] - earth[0], target[1] - earth[1], target[2] - earth[2]];
            tau = norm(&d) / C_KM_S;
        }

        let r = norm(&d);
        let apparent = [
            d[0] / r + earth[3] / C_KM_S,
            d[1] / r + earth[4] / C_KM_S,
            d[2] / r + earth[5] / C_KM_S,
        ];

        let coords = icrf_to_true_ecliptic_of_date(&apparent, epoch.centuries_tt());
        Ok(EclipticPosition {
            longitude: coords.lon_deg,
            latitude: coords.lat_deg,
        })
    }
}

impl PositionProvider for JplProvider {
    fn name(&self) -> &'static str {
        "jpl_ephemeris"
    }

    fn backend(&self) -> Backend {
        Backend::HighPrecision
    }

    fn covers(&self, epoch: &Epoch) -> bool {
        let t = epoch.tdb_seconds();
        t >= self.window.0 && t <= self.window.1
    }

    fn positions(&self, epoch: &Epoch) -> Result<BodyPositions, EngineError> {
        self.check_coverage(epoch)?;
        let mut ctx = ComputationContext::new();
        let earth = ctx.ssb_state(&self.kernel, EARTH, epoch.tdb_seconds())?;

        let mut out = BodyPositions::new();
        for body in ALL_BODIES {
            out.insert(body, self.apparent_with_ctx(body, epoch, &earth, &mut ctx)?);
        }
        tracing::trace!(evaluations = ctx.evaluations, "jpl positions");
        Ok(out)
    }
}

fn norm(v: &[f64; 3]) -> f64 {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}
