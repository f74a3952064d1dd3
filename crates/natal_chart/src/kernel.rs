//! Calculation strategies composed by the chart engine.
//!
//! Each stage implements [`ChartKernel`] on its own and holds only its
//! configuration; the engine feeds outputs of one stage into the next.

use std::collections::BTreeMap;

use natal_core::{Backend, Body, BodyPositions};

use crate::aspects::{self, Aspect, AspectOrbs};
use crate::ascendant::Angles;
use crate::error::HouseError;
use crate::houses::{self, HouseSystem};
use crate::retrograde;
use crate::rulers::{self, MutualReception, RulersScheme};
use crate::zodiac::{Sign, sign_for};

/// One calculation stage.
pub trait ChartKernel: Send + Sync {
    type Input: ?Sized;
    type Output;

    fn name(&self) -> &'static str;

    fn compute(&self, input: &Self::Input) -> Self::Output;
}

/// Longitude → sign for every body.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignKernel;

impl ChartKernel for SignKernel {
    type Input = BodyPositions;
    type Output = BTreeMap<Body, Sign>;

    fn name(&self) -> &'static str {
        "signs"
    }

    fn compute(&self, positions: &BodyPositions) -> Self::Output {
        positions
            .iter()
            .map(|(body, pos)| (*body, sign_for(pos.longitude)))
            .collect()
    }
}

/// Positions at the chart instant and one day before, from one provider.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshots {
    pub now: BodyPositions,
    pub day_before: BodyPositions,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RetrogradeKernel;

impl ChartKernel for RetrogradeKernel {
    type Input = Snapshots;
    type Output = BTreeMap<Body, bool>;

    fn name(&self) -> &'static str {
        "retrograde"
    }

    fn compute(&self, input: &Snapshots) -> Self::Output {
        retrograde::retrograde_flags(&input.now, &input.day_before)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct HouseKernel {
    pub system: HouseSystem,
}

impl HouseKernel {
    pub const fn new(system: HouseSystem) -> Self {
        Self { system }
    }

    /// Whether this division can run on positions from `backend`.
    /// Quadrant systems are only offered with the high-precision backend.
    pub fn available(&self, backend: Backend) -> Result<(), HouseError> {
        if self.system.is_quadrant() && backend != Backend::HighPrecision {
            return Err(HouseError::Unavailable {
                system: self.system.name(),
            });
        }
        Ok(())
    }
}

impl ChartKernel for HouseKernel {
    type Input = Angles;
    type Output = Result<[f64; 12], HouseError>;

    fn name(&self) -> &'static str {
        self.system.name()
    }

    fn compute(&self, angles: &Angles) -> Self::Output {
        match self.system {
            HouseSystem::Equal => Ok(houses::equal_cusps(angles.ascendant)),
            HouseSystem::Placidus => houses::placidus_cusps(angles),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AspectKernel {
    pub orbs: AspectOrbs,
}

impl ChartKernel for AspectKernel {
    type Input = BodyPositions;
    type Output = Vec<Aspect>;

    fn name(&self) -> &'static str {
        "aspects"
    }

    fn compute(&self, positions: &BodyPositions) -> Self::Output {
        aspects::aspects(positions, &self.orbs)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ReceptionKernel {
    pub scheme: RulersScheme,
}

impl ChartKernel for ReceptionKernel {
    type Input = BTreeMap<Body, Sign>;
    type Output = Vec<MutualReception>;

    fn name(&self) -> &'static str {
        "mutual_receptions"
    }

    fn compute(&self, signs: &Self::Input) -> Self::Output {
        rulers::mutual_receptions(signs, self.scheme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ascendant::angles_from_lst;
    use natal_core::EclipticPosition;
    use natal_frames::OBLIQUITY_J2000_RAD;

    #[test]
    fn placidus_needs_high_precision() {
        let k = HouseKernel::new(HouseSystem::Placidus);
        assert!(k.available(Backend::HighPrecision).is_ok());
        assert_eq!(
            k.available(Backend::Degraded),
            Err(HouseError::Unavailable { system: "placidus" })
        );
        assert!(HouseKernel::new(HouseSystem::Equal).available(Backend::Degraded).is_ok());
    }

    #[test]
    fn equal_kernel_never_fails_even_at_the_pole() {
        let angles = angles_from_lst(1.0, 89.0, OBLIQUITY_J2000_RAD);
        assert!(HouseKernel::new(HouseSystem::Equal).compute(&angles).is_ok());
        assert!(HouseKernel::new(HouseSystem::Placidus).compute(&angles).is_err());
    }

    #[test]
    fn kernels_compose() {
        let at = |lon| EclipticPosition { longitude: lon, latitude: 0.0 };
        let now = BodyPositions::from([(Body::Sun, at(100.0)), (Body::Moon, at(130.0))]);
        let day_before = BodyPositions::from([(Body::Sun, at(99.0)), (Body::Moon, at(131.0))]);

        let signs = SignKernel.compute(&now);
        assert_eq!(signs[&Body::Sun], Sign::Cancer);
        assert_eq!(signs[&Body::Moon], Sign::Leo);

        let retro = RetrogradeKernel.compute(&Snapshots { now: now.clone(), day_before });
        assert!(!retro[&Body::Sun] && retro[&Body::Moon]);

        let receptions = ReceptionKernel { scheme: RulersScheme::Traditional }.compute(&signs);
        assert_eq!(receptions.len(), 1);

        let aspects = AspectKernel { orbs: AspectOrbs::default() }.compute(&now);
        assert!(aspects.is_empty());
    }
}
