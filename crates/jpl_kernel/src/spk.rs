//! SPK segment index and Type 2 (Chebyshev position) evaluation.
//!
//! Reference: NAIF SPK Required Reading (public domain).

use std::path::Path;

use crate::chebyshev::value_and_derivative;
use crate::daf::{self, Endian, FileRecord};
use crate::error::KernelError;

/// SPK data type for Chebyshev position-only records.
pub const TYPE_CHEBYSHEV_POSITION: i32 = 2;

/// Solar-system barycenter NAIF code.
pub const SSB: i32 = 0;

/// One SPK segment descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct SpkSegment {
    pub name: String,
    pub target: i32,
    pub center: i32,
    pub frame: i32,
    pub data_type: i32,
    /// Coverage start, TDB seconds past J2000.
    pub start_et: f64,
    /// Coverage end, TDB seconds past J2000.
    pub end_et: f64,
    start_addr: usize,
    layout: Option<Type2Layout>,
}

/// Directory words at the end of a Type 2 segment.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Type2Layout {
    init: f64,
    interval: f64,
    record_words: usize,
    records: usize,
}

impl SpkSegment {
    pub fn covers(&self, epoch_tdb_s: f64) -> bool {
        epoch_tdb_s >= self.start_et && epoch_tdb_s <= self.end_et
    }
}

/// Position and velocity of a target relative to its segment center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpkEvaluation {
    pub position_km: [f64; 3],
    pub velocity_km_s: [f64; 3],
}

/// A loaded SPK file held in memory.
pub struct SpkKernel {
    bytes: Vec<u8>,
    record: FileRecord,
    segments: Vec<SpkSegment>,
}

impl std::fmt::Debug for SpkKernel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpkKernel")
            .field("internal_name", &self.record.internal_name)
            .field("bytes", &self.bytes.len())
            .field("segments", &self.segments.len())
            .finish()
    }
}

impl SpkKernel {
    /// Read and index an SPK file.
    pub fn load(path: &Path) -> Result<Self, KernelError> {
        Self::from_bytes(std::fs::read(path)?)
    }

    /// Index an SPK image already in memory.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, KernelError> {
        let record = daf::parse_file_record(&bytes)?;
        if !record.id_word.ends_with("SPK") && !record.id_word.starts_with("NAIF/DAF") {
            return Err(KernelError::format(format!(
                "DAF is not an SPK ({:?})",
                record.id_word
            )));
        }
        if record.nd != 2 || record.ni != 6 {
            return Err(KernelError::format(format!(
                "SPK summaries must be ND=2 NI=6, found ND={} NI={}",
                record.nd, record.ni
            )));
        }

        let segments = daf::read_summaries(&bytes, &record)?
            .into_iter()
            .map(|summary| build_segment(&bytes, record.endian, summary))
            .collect::<Result<Vec<_>, _>>()?;

        if segments.is_empty() {
            return Err(KernelError::format("SPK contains no segments"));
        }

        Ok(Self {
            bytes,
            record,
            segments,
        })
    }

    pub fn segments(&self) -> &[SpkSegment] {
        &self.segments
    }

    pub fn internal_name(&self) -> &str {
        &self.record.internal_name
    }

    /// Center of the first segment for `target`, if any.
    pub fn center_for(&self, target: i32) -> Option<i32> {
        self.segments
            .iter()
            .find(|s| s.target == target)
            .map(|s| s.center)
    }

    /// Interval covered by every segment, in TDB seconds past J2000.
    pub fn common_span(&self) -> (f64, f64) {
        self.segments
            .iter()
            .fold((f64::NEG_INFINITY, f64::INFINITY), |(lo, hi), s| {
                (lo.max(s.start_et), hi.min(s.end_et))
            })
    }

    /// Evaluate `target` relative to `center` at a TDB epoch.
    ///
    /// Later segments take precedence over earlier ones, per SPK convention.
    pub fn evaluate(
        &self,
        target: i32,
        center: i32,
        epoch_tdb_s: f64,
    ) -> Result<SpkEvaluation, KernelError> {
        let mut matched = false;
        for segment in self.segments.iter().rev() {
            if segment.target != target || segment.center != center {
                continue;
            }
            matched = true;
            if segment.covers(epoch_tdb_s) {
                return self.evaluate_segment(segment, epoch_tdb_s);
            }
        }

        if matched {
            Err(KernelError::EpochOutOfRange {
                target,
                center,
                epoch_tdb_s,
            })
        } else {
            Err(KernelError::SegmentNotFound { target, center })
        }
    }

    /// State of `body` relative to the solar-system barycenter, as
    /// `[x, y, z, vx, vy, vz]` in km and km/s.
    pub fn resolve_to_ssb(&self, body: i32, epoch_tdb_s: f64) -> Result<[f64; 6], KernelError> {
        let mut state = [0.0f64; 6];
        let mut code = body;
        let mut hops = 0usize;

        while code != SSB {
            hops += 1;
            if hops > 16 {
                return Err(KernelError::format(format!("center chain for {body} does not terminate")));
            }
            let Some(center) = self.center_for(code) else {
                let bary = planet_body_to_barycenter(code);
                if bary != code {
                    code = bary;
                    continue;
                }
                return Err(KernelError::SegmentNotFound {
                    target: code,
                    center: -1,
                });
            };

            let eval = self.evaluate(code, center, epoch_tdb_s)?;
            for i in 0..3 {
                state[i] += eval.position_km[i];
                state[i + 3] += eval.velocity_km_s[i];
            }
            code = center;
        }

        Ok(state)
    }

    fn evaluate_segment(
        &self,
        segment: &SpkSegment,
        epoch_tdb_s: f64,
    ) -> Result<SpkEvaluation, KernelError> {
        let layout = segment
            .layout
            .ok_or(KernelError::UnsupportedType(segment.data_type))?;

        let index = ((epoch_tdb_s - layout.init) / layout.interval).floor();
        let index = (index.max(0.0) as usize).min(layout.records - 1);
        let first_word = segment.start_addr + index * layout.record_words;

        let endian = self.record.endian;
        let word = |i: usize| -> Result<f64, KernelError> {
            endian
                .read_f64(&self.bytes, daf::word_offset(first_word + i))
                .ok_or_else(|| KernelError::format("Type 2 record past end of file"))
        };

        let mid = word(0)?;
        let radius = word(1)?;
        if radius <= 0.0 {
            return Err(KernelError::format("Type 2 record with non-positive radius"));
        }
        let s = (epoch_tdb_s - mid) / radius;

        let n = (layout.record_words - 2) / 3;
        let mut coeffs = vec![0.0; n];
        let mut out = SpkEvaluation {
            position_km: [0.0; 3],
            velocity_km_s: [0.0; 3],
        };
        for axis in 0..3 {
            for (k, c) in coeffs.iter_mut().enumerate() {
                *c = word(2 + axis * n + k)?;
            }
            let (p, dp) = value_and_derivative(&coeffs, s);
            out.position_km[axis] = p;
            out.velocity_km_s[axis] = dp / radius;
        }
        Ok(out)
    }
}

fn build_segment(
    bytes: &[u8],
    endian: Endian,
    summary: daf::Summary,
) -> Result<SpkSegment, KernelError> {
    let [start_et, end_et] = summary.doubles[..] else {
        return Err(KernelError::format("SPK summary without two doubles"));
    };
    let [target, center, frame, data_type, start_addr, end_addr] = summary.ints[..] else {
        return Err(KernelError::format("SPK summary without six integers"));
    };
    if start_addr < 1 || i64::from(end_addr) < i64::from(start_addr) + 3 {
        return Err(KernelError::format(format!(
            "segment {target} has address range {start_addr}..{end_addr}"
        )));
    }
    let (start_addr, end_addr) = (start_addr as usize, end_addr as usize);

    let layout = if data_type == TYPE_CHEBYSHEV_POSITION {
        let dir = |back: usize| {
            endian
                .read_f64(bytes, daf::word_offset(end_addr - back))
                .ok_or_else(|| KernelError::format("Type 2 directory past end of file"))
        };
        let data_words = end_addr + 1 - start_addr;
        let inconsistent = || KernelError::format(format!("segment {target}: inconsistent Type 2 directory"));

        let init = dir(3)?;
        let interval = dir(2)?;
        let record_words = directory_count(dir(1)?, data_words).ok_or_else(inconsistent)?;
        let records = directory_count(dir(0)?, data_words).ok_or_else(inconsistent)?;
        let used = records
            .checked_mul(record_words)
            .and_then(|w| w.checked_add(4));
        if !init.is_finite()
            || !(interval.is_finite() && interval > 0.0)
            || records == 0
            || record_words < 5
            || (record_words - 2) % 3 != 0
            || used.is_none_or(|w| w > data_words)
        {
            return Err(inconsistent());
        }
        Some(Type2Layout {
            init,
            interval,
            record_words,
            records,
        })
    } else {
        None
    };

    Ok(SpkSegment {
        name: summary.name,
        target,
        center,
        frame,
        data_type,
        start_et,
        end_et,
        start_addr,
        layout,
    })
}

/// A directory word holding a whole count no larger than `limit`.
fn directory_count(word: f64, limit: usize) -> Option<usize> {
    (word.is_finite() && word >= 0.0 && word.fract() == 0.0 && word <= limit as f64)
        .then_some(word as usize)
}

/// Map a planet body code `x99` to its barycenter `x`; other codes pass through.
pub const fn planet_body_to_barycenter(code: i32) -> i32 {
    if code >= 199 && code <= 999 && code % 100 == 99 {
        code / 100
    } else {
        code
    }
}
