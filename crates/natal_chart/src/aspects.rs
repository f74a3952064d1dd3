//! Major aspects between body pairs.
//!
//! Each unordered pair gets at most one aspect: the candidate angle with
//! the smallest deviation from the measured separation, kept only when
//! that deviation is within the candidate's orb. Equal deviations go to
//! the smaller angle.

use natal_core::{ALL_BODIES, Body, BodyPositions};
use serde::{Deserialize, Serialize};

use crate::error::ChartError;
use crate::util::separation;

/// Major aspects, ordered by angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AspectKind {
    Conjunction,
    Sextile,
    Square,
    Trine,
    Opposition,
}

pub const ALL_ASPECTS: [AspectKind; 5] = [
    AspectKind::Conjunction,
    AspectKind::Sextile,
    AspectKind::Square,
    AspectKind::Trine,
    AspectKind::Opposition,
];

impl AspectKind {
    pub const fn angle(self) -> f64 {
        match self {
            Self::Conjunction => 0.0,
            Self::Sextile => 60.0,
            Self::Square => 90.0,
            Self::Trine => 120.0,
            Self::Opposition => 180.0,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Conjunction => "Conjunction",
            Self::Sextile => "Sextile",
            Self::Square => "Square",
            Self::Trine => "Trine",
            Self::Opposition => "Opposition",
        }
    }
}

impl std::fmt::Display for AspectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Maximum deviation per aspect, degrees.
///
/// Keys are the aspect names on the wire; lowercase keys are accepted
/// so environment overrides deserialize too.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AspectOrbs {
    #[serde(rename = "Conjunction", alias = "conjunction")]
    pub conjunction: f64,
    #[serde(rename = "Opposition", alias = "opposition")]
    pub opposition: f64,
    #[serde(rename = "Trine", alias = "trine")]
    pub trine: f64,
    #[serde(rename = "Square", alias = "square")]
    pub square: f64,
    #[serde(rename = "Sextile", alias = "sextile")]
    pub sextile: f64,
}

impl Default for AspectOrbs {
    fn default() -> Self {
        Self {
            conjunction: 8.0,
            opposition: 8.0,
            trine: 7.0,
            square: 6.0,
            sextile: 4.0,
        }
    }
}

impl AspectOrbs {
    pub const fn orb(&self, kind: AspectKind) -> f64 {
        match kind {
            AspectKind::Conjunction => self.conjunction,
            AspectKind::Sextile => self.sextile,
            AspectKind::Square => self.square,
            AspectKind::Trine => self.trine,
            AspectKind::Opposition => self.opposition,
        }
    }

    pub fn with(mut self, kind: AspectKind, orb: f64) -> Self {
        let slot = match kind {
            AspectKind::Conjunction => &mut self.conjunction,
            AspectKind::Sextile => &mut self.sextile,
            AspectKind::Square => &mut self.square,
            AspectKind::Trine => &mut self.trine,
            AspectKind::Opposition => &mut self.opposition,
        };
        *slot = orb;
        self
    }

    pub fn validate(&self) -> Result<(), ChartError> {
        for kind in ALL_ASPECTS {
            let orb = self.orb(kind);
            if !orb.is_finite() || orb < 0.0 {
                return Err(ChartError::invalid(
                    "aspect_orbs",
                    format!("{kind} orb must be a finite non-negative angle, got {orb}"),
                ));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Aspect {
    pub planet1: Body,
    pub planet2: Body,
    pub aspect: AspectKind,
    /// Measured separation, `[0, 180]`.
    pub separation: f64,
    /// Deviation from the exact angle.
    pub difference: f64,
    pub orb_allowed: f64,
}

/// Best-fitting aspect for two longitudes, if within orb.
pub fn find_aspect(lon1: f64, lon2: f64, orbs: &AspectOrbs) -> Option<(AspectKind, f64, f64)> {
    let sep = separation(lon1, lon2);
    let mut best = (AspectKind::Conjunction, f64::INFINITY);
    for kind in ALL_ASPECTS {
        let diff = (sep - kind.angle()).abs();
        // strict: on a tie the earlier, smaller angle stays
        if diff < best.1 {
            best = (kind, diff);
        }
    }
    let (kind, diff) = best;
    (diff <= orbs.orb(kind)).then_some((kind, sep, diff))
}

/// Aspects for every pair, in fixed body order with `planet1` first.
pub fn aspects(positions: &BodyPositions, orbs: &AspectOrbs) -> Vec<Aspect> {
    let mut out = Vec::new();
    for (i, a) in ALL_BODIES.iter().enumerate() {
        let Some(pa) = positions.get(a) else { continue };
        for b in &ALL_BODIES[i + 1..] {
            let Some(pb) = positions.get(b) else { continue };
            if let Some((kind, sep, diff)) = find_aspect(pa.longitude, pb.longitude, orbs) {
                out.push(Aspect {
                    planet1: *a,
                    planet2: *b,
                    aspect: kind,
                    separation: sep,
                    difference: diff,
                    orb_allowed: orbs.orb(kind),
                });
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use natal_core::EclipticPosition;
    use rstest::rstest;

    fn at(lon: f64) -> EclipticPosition {
        EclipticPosition {
            longitude: lon,
            latitude: 0.0,
        }
    }

    #[test]
    fn exact_square() {
        let (kind, sep, diff) = find_aspect(10.0, 100.0, &AspectOrbs::default()).unwrap();
        assert_eq!(kind, AspectKind::Square);
        assert_eq!(sep, 90.0);
        assert_eq!(diff, 0.0);
    }

    #[rstest]
    #[case(356.0, 2.0, Some(AspectKind::Conjunction))]
    #[case(0.0, 175.0, Some(AspectKind::Opposition))]
    #[case(0.0, 124.0, Some(AspectKind::Trine))]
    #[case(0.0, 63.9, Some(AspectKind::Sextile))]
    #[case(0.0, 64.1, None)]
    #[case(0.0, 45.0, None)]
    #[case(0.0, 150.0, None)]
    fn default_orbs(#[case] a: f64, #[case] b: f64, #[case] expected: Option<AspectKind>) {
        assert_eq!(find_aspect(a, b, &AspectOrbs::default()).map(|x| x.0), expected);
    }

    #[test]
    fn tie_goes_to_the_smaller_angle() {
        // 30° is equidistant from Conjunction and Sextile.
        let orbs = AspectOrbs::default()
            .with(AspectKind::Conjunction, 30.0)
            .with(AspectKind::Sextile, 30.0);
        let (kind, _, diff) = find_aspect(0.0, 30.0, &orbs).unwrap();
        assert_eq!(kind, AspectKind::Conjunction);
        assert_eq!(diff, 30.0);
    }

    #[test]
    fn only_the_nearest_angle_is_considered() {
        // Sextile is nearer (25°) but out of orb; the wide Conjunction orb
        // does not rescue the pair.
        let orbs = AspectOrbs::default().with(AspectKind::Conjunction, 40.0);
        assert!(find_aspect(0.0, 35.0, &orbs).is_none());
    }

    #[test]
    fn one_aspect_per_pair_in_body_order() {
        let positions = BodyPositions::from([
            (Body::Sun, at(0.0)),
            (Body::Moon, at(90.0)),
            (Body::Mars, at(180.0)),
            (Body::Venus, at(2.0)),
        ]);
        let found = aspects(&positions, &AspectOrbs::default());
        let pairs: Vec<_> = found.iter().map(|a| (a.planet1, a.planet2, a.aspect)).collect();
        assert_eq!(
            pairs,
            vec![
                (Body::Sun, Body::Moon, AspectKind::Square),
                (Body::Sun, Body::Venus, AspectKind::Conjunction),
                (Body::Sun, Body::Mars, AspectKind::Opposition),
                (Body::Moon, Body::Venus, AspectKind::Square),
                (Body::Moon, Body::Mars, AspectKind::Square),
                (Body::Venus, Body::Mars, AspectKind::Opposition),
            ]
        );
        for a in &found {
            assert!(a.difference <= a.orb_allowed);
        }
    }

    #[test]
    fn orbs_use_wire_names_and_accept_partial_overrides() {
        let json = serde_json::to_string(&AspectOrbs::default()).unwrap();
        assert_eq!(
            json,
            r#"{"Conjunction":8.0,"Opposition":8.0,"Trine":7.0,"Square":6.0,"Sextile":4.0}"#
        );
        let orbs: AspectOrbs = serde_json::from_str(r#"{"Square":2.5}"#).unwrap();
        assert_eq!(orbs.square, 2.5);
        assert_eq!(orbs.trine, 7.0);
    }

    #[test]
    fn negative_or_nan_orbs_are_rejected() {
        assert!(AspectOrbs::default().validate().is_ok());
        for bad in [-1.0, f64::NAN, f64::INFINITY] {
            let err = AspectOrbs::default().with(AspectKind::Trine, bad).validate().unwrap_err();
            assert!(matches!(err, ChartError::InvalidInput { field: "aspect_orbs", .. }));
        }
    }
}
