//! Sign-of-motion retrograde detection.
//!
//! Compares each body's longitude at the chart instant with its longitude
//! one day earlier from the same provider. Stations are not detected.

use std::collections::BTreeMap;

use natal_core::{Body, BodyPositions};

use crate::util::signed_delta;

/// Longitude change over the interval, wrap-aware, in `(-180, 180]`.
pub fn daily_motion(earlier_deg: f64, now_deg: f64) -> f64 {
    signed_delta(earlier_deg, now_deg)
}

pub fn is_retrograde(earlier_deg: f64, now_deg: f64) -> bool {
    daily_motion(earlier_deg, now_deg) < 0.0
}

/// Retrograde flag per body present in both snapshots.
pub fn retrograde_flags(now: &BodyPositions, earlier: &BodyPositions) -> BTreeMap<Body, bool> {
    now.iter()
        .filter_map(|(body, pos)| {
            let before = earlier.get(body)?;
            Some((*body, is_retrograde(before.longitude, pos.longitude)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use natal_core::EclipticPosition;
    use rstest::rstest;

    #[rstest]
    #[case(359.0, 1.0, false)]
    #[case(1.0, 359.0, true)]
    #[case(120.0, 121.2, false)]
    #[case(121.2, 120.0, true)]
    #[case(200.0, 200.0, false)]
    fn wrap_aware_direction(#[case] earlier: f64, #[case] now: f64, #[case] retro: bool) {
        assert_eq!(is_retrograde(earlier, now), retro);
    }

    #[test]
    fn flags_only_bodies_in_both_snapshots() {
        let at = |lon| EclipticPosition { longitude: lon, latitude: 0.0 };
        let now = BodyPositions::from([(Body::Sun, at(0.5)), (Body::Mercury, at(10.0)), (Body::Mars, at(3.0))]);
        let earlier = BodyPositions::from([(Body::Sun, at(359.5)), (Body::Mercury, at(10.8))]);
        let flags = retrograde_flags(&now, &earlier);
        assert_eq!(flags.len(), 2);
        assert!(!flags[&Body::Sun]);
        assert!(flags[&Body::Mercury]);
    }
}
