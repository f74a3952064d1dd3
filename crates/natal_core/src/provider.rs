//! The position-provider seam.

use std::collections::BTreeMap;

use natal_time::Epoch;
use serde::Serialize;

use crate::body::Body;
use crate::error::EngineError;

/// Geocentric ecliptic coordinates, true equinox of date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EclipticPosition {
    /// Degrees in `[0, 360)`.
    pub longitude: f64,
    /// Degrees in `[-90, 90]`.
    pub latitude: f64,
}

pub type BodyPositions = BTreeMap<Body, EclipticPosition>;

/// Fidelity class a provider advertises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Backend {
    HighPrecision,
    Degraded,
}

/// A source of body positions.
///
/// Implementations are read-only after construction and shared across
/// threads.
pub trait PositionProvider: Send + Sync {
    /// Short identifier used in logs and capability reports.
    fn name(&self) -> &'static str;

    fn backend(&self) -> Backend;

    /// Whether `positions` can serve this instant.
    fn covers(&self, epoch: &Epoch) -> bool;

    /// Positions of every chart body at `epoch`.
    fn positions(&self, epoch: &Epoch) -> Result<BodyPositions, EngineError>;
}

/// A provider passed over while walking a chain, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedProvider {
    pub name: &'static str,
    pub reason: String,
}

impl SkippedProvider {
    pub fn new(name: &'static str, reason: impl Into<String>) -> Self {
        Self {
            name,
            reason: reason.into(),
        }
    }
}

/// Advance `chain` to the first provider that covers every instant in
/// `epochs`. Providers passed over are appended to `skipped`.
///
/// The chain is consumed lazily, so a caller can resume after the
/// returned provider when it later fails to answer.
pub fn select_provider<'a, I>(
    chain: &mut I,
    epochs: &[Epoch],
    skipped: &mut Vec<SkippedProvider>,
) -> Option<&'a dyn PositionProvider>
where
    I: Iterator<Item = &'a dyn PositionProvider>,
{
    for provider in chain {
        if epochs.iter().all(|e| provider.covers(e)) {
            return Some(provider);
        }
        skipped.push(SkippedProvider::new(provider.name(), "instant outside dataset coverage"));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Window {
        name: &'static str,
        from: f64,
        to: f64,
    }

    impl PositionProvider for Window {
        fn name(&self) -> &'static str {
            self.name
        }
        fn backend(&self) -> Backend {
            Backend::Degraded
        }
        fn covers(&self, epoch: &Epoch) -> bool {
            (self.from..=self.to).contains(&epoch.jd_utc())
        }
        fn positions(&self, _: &Epoch) -> Result<BodyPositions, EngineError> {
            Ok(BodyPositions::new())
        }
    }

    fn chain() -> Vec<Box<dyn PositionProvider>> {
        vec![
            Box::new(Window { name: "narrow", from: 100.0, to: 200.0 }),
            Box::new(Window { name: "wide", from: 0.0, to: 1000.0 }),
        ]
    }

    fn at(jd: f64) -> Epoch {
        Epoch::from_jd_utc(jd).unwrap()
    }

    fn walk<'a>(chain: &'a [Box<dyn PositionProvider>]) -> impl Iterator<Item = &'a dyn PositionProvider> {
        chain.iter().map(|p| &**p as &dyn PositionProvider)
    }

    #[test]
    fn first_covering_provider_wins() {
        let chain = chain();
        let mut skipped = Vec::new();
        let p = select_provider(&mut walk(&chain), &[at(150.0), at(149.0)], &mut skipped).unwrap();
        assert_eq!(p.name(), "narrow");
        assert!(skipped.is_empty());
    }

    #[test]
    fn every_instant_must_be_covered() {
        let chain = chain();
        let mut skipped = Vec::new();
        let p = select_provider(&mut walk(&chain), &[at(100.5), at(99.5)], &mut skipped).unwrap();
        assert_eq!(p.name(), "wide");
        assert_eq!(skipped, [SkippedProvider::new("narrow", "instant outside dataset coverage")]);

        skipped.clear();
        assert!(select_provider(&mut walk(&chain), &[at(2000.0)], &mut skipped).is_none());
        assert_eq!(skipped.len(), 2);
    }

    #[test]
    fn walk_resumes_after_the_selected_provider() {
        let chain = chain();
        let mut skipped = Vec::new();
        let mut links = walk(&chain);
        let first = select_provider(&mut links, &[at(150.0)], &mut skipped).unwrap();
        assert_eq!(first.name(), "narrow");
        let next = select_provider(&mut links, &[at(150.0)], &mut skipped).unwrap();
        assert_eq!(next.name(), "wide");
        assert!(select_provider(&mut links, &[at(150.0)], &mut skipped).is_none());
        assert!(skipped.is_empty());
    }
}
