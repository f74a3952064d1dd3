//! Sign rulership and mutual reception.

use std::collections::BTreeMap;

use natal_core::{ALL_BODIES, Body};
use serde::{Deserialize, Serialize};

use crate::zodiac::Sign;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RulersScheme {
    /// Seven visible bodies only.
    #[default]
    Traditional,
    /// Pluto, Uranus and Neptune take Scorpio, Aquarius and Pisces.
    Modern,
}

impl RulersScheme {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Traditional => "traditional",
            Self::Modern => "modern",
        }
    }
}

impl std::fmt::Display for RulersScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

pub const fn ruler(sign: Sign, scheme: RulersScheme) -> Body {
    match (sign, scheme) {
        (Sign::Scorpio, RulersScheme::Modern) => Body::Pluto,
        (Sign::Aquarius, RulersScheme::Modern) => Body::Uranus,
        (Sign::Pisces, RulersScheme::Modern) => Body::Neptune,
        (Sign::Aries | Sign::Scorpio, _) => Body::Mars,
        (Sign::Taurus | Sign::Libra, _) => Body::Venus,
        (Sign::Gemini | Sign::Virgo, _) => Body::Mercury,
        (Sign::Cancer, _) => Body::Moon,
        (Sign::Leo, _) => Body::Sun,
        (Sign::Sagittarius | Sign::Pisces, _) => Body::Jupiter,
        (Sign::Capricorn | Sign::Aquarius, _) => Body::Saturn,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MutualReception {
    pub planet1: Body,
    pub planet2: Body,
    pub scheme: RulersScheme,
    /// Signs occupied by `planet1` and `planet2`.
    pub signs: [Sign; 2],
}

/// Every pair where each body sits in the sign the other rules.
pub fn mutual_receptions(
    signs: &BTreeMap<Body, Sign>,
    scheme: RulersScheme,
) -> Vec<MutualReception> {
    let mut out = Vec::new();
    for (i, a) in ALL_BODIES.iter().enumerate() {
        let Some(&sign_a) = signs.get(a) else { continue };
        for b in &ALL_BODIES[i + 1..] {
            let Some(&sign_b) = signs.get(b) else { continue };
            if ruler(sign_a, scheme) == *b && ruler(sign_b, scheme) == *a {
                out.push(MutualReception {
                    planet1: *a,
                    planet2: *b,
                    scheme,
                    signs: [sign_a, sign_b],
                });
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zodiac::ALL_SIGNS;

    #[test]
    fn traditional_table() {
        let expected = [
            Body::Mars,
            Body::Venus,
            Body::Mercury,
            Body::Moon,
            Body::Sun,
            Body::Mercury,
            Body::Venus,
            Body::Mars,
            Body::Jupiter,
            Body::Saturn,
            Body::Saturn,
            Body::Jupiter,
        ];
        for (sign, body) in ALL_SIGNS.iter().zip(expected) {
            assert_eq!(ruler(*sign, RulersScheme::Traditional), body, "{sign}");
        }
    }

    #[test]
    fn modern_differs_only_for_three_signs() {
        let changed: Vec<_> = ALL_SIGNS
            .iter()
            .filter(|s| ruler(**s, RulersScheme::Modern) != ruler(**s, RulersScheme::Traditional))
            .map(|s| (*s, ruler(*s, RulersScheme::Modern)))
            .collect();
        assert_eq!(
            changed,
            vec![
                (Sign::Scorpio, Body::Pluto),
                (Sign::Aquarius, Body::Uranus),
                (Sign::Pisces, Body::Neptune),
            ]
        );
    }

    #[test]
    fn sun_and_moon_in_each_others_signs() {
        let signs = BTreeMap::from([
            (Body::Sun, Sign::Cancer),
            (Body::Moon, Sign::Leo),
            (Body::Mars, Sign::Aries),
        ]);
        let found = mutual_receptions(&signs, RulersScheme::Traditional);
        assert_eq!(found.len(), 1);
        let r = found[0];
        assert_eq!((r.planet1, r.planet2), (Body::Sun, Body::Moon));
        assert_eq!(r.signs, [Sign::Cancer, Sign::Leo]);
        assert_eq!(r.scheme, RulersScheme::Traditional);
    }

    #[test]
    fn scheme_changes_the_outcome() {
        // Mars in Aquarius, Saturn in Scorpio: traditional reception
        // (Saturn rules Aquarius, Mars rules Scorpio), not under modern.
        let signs = BTreeMap::from([(Body::Mars, Sign::Aquarius), (Body::Saturn, Sign::Scorpio)]);
        assert_eq!(mutual_receptions(&signs, RulersScheme::Traditional).len(), 1);
        assert!(mutual_receptions(&signs, RulersScheme::Modern).is_empty());

        let signs = BTreeMap::from([(Body::Pluto, Sign::Aries), (Body::Mars, Sign::Scorpio)]);
        assert_eq!(mutual_receptions(&signs, RulersScheme::Modern).len(), 1);
        assert!(mutual_receptions(&signs, RulersScheme::Traditional).is_empty());
    }

    #[test]
    fn reception_is_symmetric() {
        for scheme in [RulersScheme::Traditional, RulersScheme::Modern] {
            for sa in ALL_SIGNS {
                for sb in ALL_SIGNS {
                    let signs = BTreeMap::from([(Body::Venus, sa), (Body::Jupiter, sb)]);
                    for r in mutual_receptions(&signs, scheme) {
                        assert_eq!(ruler(r.signs[0], scheme), r.planet2);
                        assert_eq!(ruler(r.signs[1], scheme), r.planet1);
                    }
                }
            }
        }
    }
}
