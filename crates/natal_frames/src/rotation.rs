//! Elementary rotation matrices and frame changes.
//!
//! `r1`, `r2`, `r3` rotate the coordinate frame (not the vector) by a
//! positive angle about x, y, z respectively.

pub type Mat3 = [[f64; 3]; 3];

pub const IDENTITY: Mat3 = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];

pub fn r1(angle: f64) -> Mat3 {
    let (s, c) = angle.sin_cos();
    [[1.0, 0.0, 0.0], [0.0, c, s], [0.0, -s, c]]
}

pub fn r2(angle: f64) -> Mat3 {
    let (s, c) = angle.sin_cos();
    [[c, 0.0, -s], [0.0, 1.0, 0.0], [s, 0.0, c]]
}

pub fn r3(angle: f64) -> Mat3 {
    let (s, c) = angle.sin_cos();
    [[c, s, 0.0], [-s, c, 0.0], [0.0, 0.0, 1.0]]
}

pub fn mat_mul(a: &Mat3, b: &Mat3) -> Mat3 {
    let mut out = [[0.0; 3]; 3];
    for (i, row) in out.iter_mut().enumerate() {
        for (j, cell) in row.iter_mut().enumerate() {
            *cell = (0..3).map(|k| a[i][k] * b[k][j]).sum();
        }
    }
    out
}

pub fn mat_vec(m: &Mat3, v: &[f64; 3]) -> [f64; 3] {
    m.map(|row| row[0] * v[0] + row[1] * v[1] + row[2] * v[2])
}

/// Equatorial → ecliptic for an obliquity `eps` (radians).
pub fn equatorial_to_ecliptic(v: &[f64; 3], eps: f64) -> [f64; 3] {
    mat_vec(&r1(eps), v)
}

/// Ecliptic → equatorial for an obliquity `eps` (radians).
pub fn ecliptic_to_equatorial(v: &[f64; 3], eps: f64) -> [f64; 3] {
    mat_vec(&r1(-eps), v)
}
