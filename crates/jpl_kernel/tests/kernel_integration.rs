//! SPK loading against a real DE421 file (skipped when absent) and a
//! synthetic kernel written to disk.

use std::path::{Path, PathBuf};

use jpl_kernel::{KernelError, SpkKernel, SpkWriter, Type2Segment};

const AU_KM: f64 = 1.495_978_707e8;

fn kernel_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../kernels/data/de421.bsp")
}

fn load_de421() -> Option<SpkKernel> {
    let path = kernel_path();
    if !path.exists() {
        eprintln!("Skipping: kernel not found at {}", path.display());
        return None;
    }
    Some(SpkKernel::load(&path).expect("should load de421.bsp"))
}

fn norm(v: &[f64]) -> f64 {
    v.iter().map(|x| x * x).sum::<f64>().sqrt()
}

#[test]
fn de421_segments_are_type2_j2000() {
    let Some(kernel) = load_de421() else { return };
    let segments = kernel.segments();
    assert!(segments.len() >= 13, "got {} segments", segments.len());
    for seg in segments {
        assert_eq!(seg.data_type, 2);
        assert_eq!(seg.frame, 1);
    }
    assert_eq!(kernel.center_for(399), Some(3));
    assert_eq!(kernel.center_for(301), Some(3));
}

#[test]
fn de421_mars_barycenter_at_j2000() {
    let Some(kernel) = load_de421() else { return };
    let eval = kernel.evaluate(4, 0, 0.0).expect("Mars barycenter at J2000");
    let r = norm(&eval.position_km);
    assert!(r > 1.3 * AU_KM && r < 1.7 * AU_KM, "Mars distance {r:.0} km");
    let v = norm(&eval.velocity_km_s);
    assert!(v > 20.0 && v < 30.0, "Mars speed {v:.3} km/s");
}

#[test]
fn de421_earth_chain_resolves() {
    let Some(kernel) = load_de421() else { return };
    let earth = kernel.resolve_to_ssb(399, 0.0).expect("Earth to SSB");
    let r = norm(&earth[..3]);
    assert!(r > 0.97 * AU_KM && r < 1.03 * AU_KM, "Earth distance {r:.0} km");

    // Jupiter has no body segment in DE421; the barycenter stands in.
    let jupiter = kernel.resolve_to_ssb(599, 0.0).expect("Jupiter to SSB");
    assert!(norm(&jupiter[..3]) > 4.5 * AU_KM);
}

#[test]
fn de421_rejects_epochs_past_coverage() {
    let Some(kernel) = load_de421() else { return };
    let (_, end) = kernel.common_span();
    assert!(matches!(
        kernel.evaluate(4, 0, end + 86_400.0 * 365.0),
        Err(KernelError::EpochOutOfRange { target: 4, .. })
    ));
}

#[test]
fn synthetic_kernel_round_trips_through_disk() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("tiny.bsp");

    let day = 86_400.0;
    // Quadratic x(s) = 5 + 3·T1 + 1·T2 over two one-day intervals.
    let record = [vec![5.0, 3.0, 1.0], vec![0.0, 0.0, 0.0], vec![-1.0, 0.0, 0.0]];
    let segment = Type2Segment {
        target: 10,
        center: 0,
        frame: 1,
        init: 0.0,
        interval: day,
        records: vec![record.clone(), record],
    };
    SpkWriter::new("tiny").with_segment(segment).write(&path).expect("write");

    let kernel = SpkKernel::load(&path).expect("load");
    assert_eq!(kernel.internal_name(), "tiny");
    assert_eq!(kernel.segments().len(), 1);

    // Midpoint of the second interval: s = 0, so x = 5 + 0 + T2(0) = 4.
    let eval = kernel.evaluate(10, 0, 1.5 * day).expect("evaluate");
    assert!((eval.position_km[0] - 4.0).abs() < 1e-9);
    assert!((eval.position_km[2] + 1.0).abs() < 1e-12);
    // dx/ds at s = 0 is 3, scaled by the half-day radius.
    assert!((eval.velocity_km_s[0] - 3.0 / (day / 2.0)).abs() < 1e-12);
}

#[test]
fn garbage_file_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("junk.bsp");
    std::fs::write(&path, vec![0x5au8; 4096]).expect("write");
    assert!(matches!(
        SpkKernel::load(&path),
        Err(KernelError::InvalidFormat(_))
    ));
}

/// Byte offset of the Type 2 directory of the first segment a
/// single-record `Type2Segment::constant` writes: five data words at
/// address 385, then init, interval, record size and record count.
fn first_directory_offset() -> usize {
    (385 + 5 - 1) * 8
}

fn constant_kernel_bytes() -> Vec<u8> {
    SpkWriter::new("directory")
        .with_segment(Type2Segment::constant(10, 0, 1, 0.0, 86_400.0, [1.0, 2.0, 3.0]))
        .to_bytes()
        .expect("writer")
}

#[test]
fn overflowing_type2_directory_is_rejected() {
    let mut bytes = constant_kernel_bytes();
    let dir = first_directory_offset();
    bytes[dir + 16..dir + 24].copy_from_slice(&2f64.powi(61).to_le_bytes());
    bytes[dir + 24..dir + 32].copy_from_slice(&8.0f64.to_le_bytes());
    assert!(matches!(
        SpkKernel::from_bytes(bytes),
        Err(KernelError::InvalidFormat(_))
    ));
}

#[test]
fn non_finite_type2_directory_is_rejected() {
    for (word, value) in [(0, f64::NAN), (1, f64::INFINITY), (2, f64::NAN), (3, -1.0)] {
        let mut bytes = constant_kernel_bytes();
        let at = first_directory_offset() + word * 8;
        bytes[at..at + 8].copy_from_slice(&value.to_le_bytes());
        assert!(
            matches!(SpkKernel::from_bytes(bytes), Err(KernelError::InvalidFormat(_))),
            "directory word {word} = {value}"
        );
    }
}

#[test]
fn untouched_directory_still_loads() {
    let kernel = SpkKernel::from_bytes(constant_kernel_bytes()).expect("load");
    let eval = kernel.evaluate(10, 0, 100.0).expect("evaluate");
    assert_eq!(eval.position_km, [1.0, 2.0, 3.0]);
}
