//! Minimal little-endian SPK Type 2 writer.
//!
//! Produces single-summary-record files: record 1 is the file record,
//! record 2 the summaries, record 3 their names, and array data starts
//! at word 385. Used for fixtures and for trimming large kernels to a
//! date window.

use std::io::Write;
use std::path::Path;

use crate::daf::{Endian, RECORD_BYTES, RECORD_WORDS};
use crate::error::KernelError;
use crate::spk::TYPE_CHEBYSHEV_POSITION;

const SUMMARY_WORDS: usize = 5;
const MAX_SEGMENTS: usize = (RECORD_WORDS - 3) / SUMMARY_WORDS;
const FIRST_DATA_ADDRESS: usize = 3 * RECORD_WORDS + 1;

/// A Type 2 segment: equal-length intervals starting at `init`, each with
/// X/Y/Z Chebyshev coefficients.
#[derive(Debug, Clone, PartialEq)]
pub struct Type2Segment {
    pub target: i32,
    pub center: i32,
    pub frame: i32,
    /// Start of the first interval, TDB seconds past J2000.
    pub init: f64,
    /// Interval length in seconds.
    pub interval: f64,
    pub records: Vec<[Vec<f64>; 3]>,
}

impl Type2Segment {
    /// A segment holding a fixed offset over `[init, init + span]`.
    pub fn constant(
        target: i32,
        center: i32,
        frame: i32,
        init: f64,
        span: f64,
        position_km: [f64; 3],
    ) -> Self {
        Self {
            target,
            center,
            frame,
            init,
            interval: span,
            records: vec![position_km.map(|p| vec![p])],
        }
    }

    pub fn end(&self) -> f64 {
        self.init + self.interval * self.records.len() as f64
    }

    fn coefficient_count(&self) -> Result<usize, KernelError> {
        let n = self
            .records
            .first()
            .map(|r| r[0].len())
            .ok_or_else(|| KernelError::format(format!("segment {} has no records", self.target)))?;
        if n == 0 || self.records.iter().flatten().any(|axis| axis.len() != n) {
            return Err(KernelError::format(format!(
                "segment {} has ragged coefficient arrays",
                self.target
            )));
        }
        if !(self.interval > 0.0) {
            return Err(KernelError::format(format!(
                "segment {} has non-positive interval",
                self.target
            )));
        }
        Ok(n)
    }

    fn record_words(n: usize) -> usize {
        2 + 3 * n
    }
}

/// Accumulates segments and serialises them as a DAF/SPK image.
#[derive(Debug, Clone, Default)]
pub struct SpkWriter {
    internal_name: String,
    segments: Vec<Type2Segment>,
}

impl SpkWriter {
    pub fn new(internal_name: impl Into<String>) -> Self {
        Self {
            internal_name: internal_name.into(),
            segments: Vec::new(),
        }
    }

    pub fn push(&mut self, segment: Type2Segment) {
        self.segments.push(segment);
    }

    pub fn with_segment(mut self, segment: Type2Segment) -> Self {
        self.push(segment);
        self
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, KernelError> {
        if self.segments.is_empty() {
            return Err(KernelError::format("no segments to write"));
        }
        if self.segments.len() > MAX_SEGMENTS {
            return Err(KernelError::format(format!(
                "at most {MAX_SEGMENTS} segments fit one summary record"
            )));
        }

        let mut data: Vec<f64> = Vec::new();
        let mut summary = vec![0u8; RECORD_BYTES];
        let mut names = vec![0u8; RECORD_BYTES];
        put_f64(&mut summary, 16, self.segments.len() as f64);

        for (i, segment) in self.segments.iter().enumerate() {
            let n = segment.coefficient_count()?;
            let start = FIRST_DATA_ADDRESS + data.len();
            let radius = segment.interval / 2.0;
            for (k, record) in segment.records.iter().enumerate() {
                data.push(segment.init + (k as f64 + 0.5) * segment.interval);
                data.push(radius);
                for axis in record {
                    data.extend_from_slice(axis);
                }
            }
            data.extend_from_slice(&[
                segment.init,
                segment.interval,
                Type2Segment::record_words(n) as f64,
                segment.records.len() as f64,
            ]);
            let end = FIRST_DATA_ADDRESS + data.len() - 1;

            let at = 24 + i * SUMMARY_WORDS * 8;
            put_f64(&mut summary, at, segment.init);
            put_f64(&mut summary, at + 8, segment.end());
            let ints = [
                segment.target,
                segment.center,
                segment.frame,
                TYPE_CHEBYSHEV_POSITION,
                to_i32(start)?,
                to_i32(end)?,
            ];
            for (k, v) in ints.iter().enumerate() {
                summary[at + 16 + k * 4..at + 20 + k * 4].copy_from_slice(&v.to_le_bytes());
            }

            let label = format!("{} wrt {}", segment.target, segment.center);
            let name_at = i * SUMMARY_WORDS * 8;
            let len = label.len().min(SUMMARY_WORDS * 8);
            names[name_at..name_at + SUMMARY_WORDS * 8].fill(b' ');
            names[name_at..name_at + len].copy_from_slice(&label.as_bytes()[..len]);
        }

        let free = FIRST_DATA_ADDRESS + data.len();
        let mut out = file_record(&self.internal_name, to_i32(free)?);
        out.extend_from_slice(&summary);
        out.extend_from_slice(&names);
        for value in data {
            out.extend_from_slice(&value.to_le_bytes());
        }
        let padded = out.len().div_ceil(RECORD_BYTES) * RECORD_BYTES;
        out.resize(padded, 0);
        Ok(out)
    }

    /// Write the image to `path`.
    pub fn write(&self, path: &Path) -> Result<(), KernelError> {
        let bytes = self.to_bytes()?;
        let mut file = std::fs::File::create(path)?;
        file.write_all(&bytes)?;
        file.sync_all()?;
        Ok(())
    }
}

fn file_record(internal_name: &str, free: i32) -> Vec<u8> {
    let mut rec = vec![0u8; RECORD_BYTES];
    rec[0..8].copy_from_slice(b"DAF/SPK ");
    rec[8..12].copy_from_slice(&2i32.to_le_bytes());
    rec[12..16].copy_from_slice(&6i32.to_le_bytes());
    rec[16..76].fill(b' ');
    let len = internal_name.len().min(60);
    rec[16..16 + len].copy_from_slice(&internal_name.as_bytes()[..len]);
    rec[76..80].copy_from_slice(&2i32.to_le_bytes());
    rec[80..84].copy_from_slice(&2i32.to_le_bytes());
    rec[84..88].copy_from_slice(&free.to_le_bytes());
    rec[88..96].copy_from_slice(Endian::Little.tag());
    rec
}

fn put_f64(buf: &mut [u8], at: usize, value: f64) {
    buf[at..at + 8].copy_from_slice(&value.to_le_bytes());
}

fn to_i32(address: usize) -> Result<i32, KernelError> {
    i32::try_from(address).map_err(|_| KernelError::format("kernel too large for DAF addressing"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::daf;

    #[test]
    fn writes_parseable_file_record() {
        let bytes = SpkWriter::new("fixture")
            .with_segment(Type2Segment::constant(10, 0, 1, 0.0, 100.0, [1.0, 2.0, 3.0]))
            .to_bytes()
            .expect("bytes");
        assert_eq!(bytes.len() % RECORD_BYTES, 0);
        let record = daf::parse_file_record(&bytes).expect("record");
        assert_eq!(record.endian, Endian::Little);
        assert_eq!(record.internal_name, "fixture");
        assert_eq!((record.nd, record.ni), (2, 6));
        // one record of 5 words plus a 4-word directory
        assert_eq!(record.free, FIRST_DATA_ADDRESS + 9);

        let summaries = daf::read_summaries(&bytes, &record).expect("summaries");
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].ints[..4], [10, 0, 1, 2]);
        assert_eq!(summaries[0].name, "10 wrt 0");
    }

    #[test]
    fn rejects_ragged_records() {
        let segment = Type2Segment {
            target: 1,
            center: 0,
            frame: 1,
            init: 0.0,
            interval: 10.0,
            records: vec![[vec![1.0, 2.0], vec![1.0], vec![1.0, 2.0]]],
        };
        assert!(SpkWriter::new("x").with_segment(segment).to_bytes().is_err());
    }

    #[test]
    fn rejects_empty_and_oversized_files() {
        assert!(SpkWriter::new("x").to_bytes().is_err());
        let mut writer = SpkWriter::new("x");
        for i in 0..=MAX_SEGMENTS as i32 {
            writer.push(Type2Segment::constant(i + 1, 0, 1, 0.0, 1.0, [0.0; 3]));
        }
        assert!(writer.to_bytes().is_err());
    }
}
