//! Nutation in longitude and obliquity.
//!
//! The eighteen largest terms of the IAU 1980 series (Meeus Table 22.A),
//! good to about 0.01″ over the historical range charts are cast for.

use crate::obliquity::{ARCSEC_TO_RAD, mean_obliquity_rad};

/// Multipliers of D, M, M′, F, Ω; then Δψ sine coefficient and its
/// T-rate, Δε cosine coefficient and its T-rate, in 0.0001″.
#[rustfmt::skip]
const TERMS: [([i8; 5], f64, f64, f64, f64); 18] = [
    ([ 0,  0,  0, 0, 1], -171_996.0, -174.2, 92_025.0,  8.9),
    ([-2,  0,  0, 2, 2],  -13_187.0,   -1.6,  5_736.0, -3.1),
    ([ 0,  0,  0, 2, 2],   -2_274.0,   -0.2,    977.0, -0.5),
    ([ 0,  0,  0, 0, 2],    2_062.0,    0.2,   -895.0,  0.5),
    ([ 0,  1,  0, 0, 0],    1_426.0,   -3.4,     54.0, -0.1),
    ([ 0,  0,  1, 0, 0],      712.0,    0.1,     -7.0,  0.0),
    ([-2,  1,  0, 2, 2],     -517.0,    1.2,    224.0, -0.6),
    ([ 0,  0,  0, 2, 1],     -386.0,   -0.4,    200.0,  0.0),
    ([ 0,  0,  1, 2, 2],     -301.0,    0.0,    129.0, -0.1),
    ([-2, -1,  0, 2, 2],      217.0,   -0.5,    -95.0,  0.3),
    ([-2,  0,  1, 0, 0],     -158.0,    0.0,      0.0,  0.0),
    ([-2,  0,  0, 2, 1],      129.0,    0.1,    -70.0,  0.0),
    ([ 0,  0, -1, 2, 2],      123.0,    0.0,    -53.0,  0.0),
    ([ 2,  0,  0, 0, 0],       63.0,    0.0,      0.0,  0.0),
    ([ 0,  0,  1, 0, 1],       63.0,    0.1,    -33.0,  0.0),
    ([ 2,  0, -1, 2, 2],      -59.0,    0.0,     26.0,  0.0),
    ([ 0,  0, -1, 0, 1],      -58.0,   -0.1,     32.0,  0.0),
    ([ 0,  0,  1, 2, 1],      -51.0,    0.0,     27.0,  0.0),
];

/// Nutation angles at one instant, radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nutation {
    /// Δψ, nutation in longitude.
    pub dpsi: f64,
    /// Δε, nutation in obliquity.
    pub deps: f64,
}

/// Delaunay-type arguments D, M, M′, F, Ω in degrees (Meeus ch. 22).
fn fundamental_arguments_deg(t: f64) -> [f64; 5] {
    let t2 = t * t;
    let t3 = t2 * t;
    [
        297.850_36 + 445_267.111_480 * t - 0.001_914_2 * t2 + t3 / 189_474.0,
        357.527_72 + 35_999.050_340 * t - 0.000_160_3 * t2 - t3 / 300_000.0,
        134.962_98 + 477_198.867_398 * t + 0.008_697_2 * t2 + t3 / 56_250.0,
        93.271_91 + 483_202.017_538 * t - 0.003_682_5 * t2 + t3 / 327_270.0,
        125.044_52 - 1_934.136_261 * t + 0.002_070_8 * t2 + t3 / 450_000.0,
    ]
}

/// Nutation for `t` Julian centuries of TT since J2000.0.
pub fn nutation(t: f64) -> Nutation {
    let args = fundamental_arguments_deg(t);
    let (mut dpsi, mut deps) = (0.0, 0.0);
    for (mult, s, st, c, ct) in TERMS {
        let angle: f64 = mult
            .iter()
            .zip(args)
            .map(|(&k, a)| f64::from(k) * a)
            .sum::<f64>()
            .to_radians();
        dpsi += (s + st * t) * angle.sin();
        deps += (c + ct * t) * angle.cos();
    }
    Nutation {
        dpsi: dpsi * 1e-4 * ARCSEC_TO_RAD,
        deps: deps * 1e-4 * ARCSEC_TO_RAD,
    }
}

/// True obliquity ε = ε₀ + Δε, radians.
pub fn true_obliquity_rad(t: f64) -> f64 {
    mean_obliquity_rad(t) + nutation(t).deps
}

/// Equation of the equinoxes Δψ·cos ε, radians.
pub fn equation_of_equinoxes_rad(t: f64) -> f64 {
    nutation(t).dpsi * true_obliquity_rad(t).cos()
}
