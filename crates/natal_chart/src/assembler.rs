//! The chart engine: provider chain plus calculation stages.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use natal_core::{
    Backend, BodyPositions, EngineError, EphemerisStore, MeanMotionProvider, PositionProvider,
    SkippedProvider, select_provider,
};
use natal_time::Epoch;
use tracing::{debug, info, warn};

use crate::ascendant;
use crate::chart::{AnglePoint, ChartResult, PlanetPosition};
use crate::config::NatalConfig;
use crate::error::ChartError;
use crate::houses::{HouseSystem, to_house_cusps};
use crate::input::BirthInput;
use crate::kernel::{
    AspectKernel, ChartKernel, HouseKernel, ReceptionKernel, RetrogradeKernel, SignKernel,
    Snapshots,
};
use crate::settings::{ChartSettings, Fallback, FallbackStage, Libraries, SettingsReport};

/// Computes charts from an ordered chain of position providers.
///
/// The chain is: caller-supplied providers, then the JPL ephemeris from
/// the store (if any), then mean motion. The first provider that covers
/// both the birth instant and the day before serves the whole chart.
///
/// `ChartEngine` is `Send + Sync`; share it behind an `Arc` or use
/// [`crate::global`].
pub struct ChartEngine {
    providers: Vec<Box<dyn PositionProvider>>,
    store: Option<Arc<EphemerisStore>>,
    fallback: MeanMotionProvider,
    defaults: ChartSettings,
}

impl std::fmt::Debug for ChartEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChartEngine")
            .field(
                "providers",
                &self.providers.iter().map(|p| p.name()).collect::<Vec<_>>(),
            )
            .field("store", &self.store)
            .field("defaults", &self.defaults)
            .finish()
    }
}

/// Positions for one chart from a single provider.
struct Sourced {
    name: &'static str,
    backend: Backend,
    snapshots: Snapshots,
}

impl ChartEngine {
    pub fn new(store: EphemerisStore) -> Self {
        Self::from_shared_store(Arc::new(store))
    }

    pub fn from_shared_store(store: Arc<EphemerisStore>) -> Self {
        Self {
            providers: Vec::new(),
            store: Some(store),
            fallback: MeanMotionProvider::new(),
            defaults: ChartSettings::default(),
        }
    }

    /// Engine over the configured dataset, with the configured chart
    /// defaults. The dataset is not touched until the first chart.
    pub fn from_config(config: &NatalConfig) -> Self {
        Self::new(EphemerisStore::new(config.ephemeris.clone())).with_default_settings(config.chart)
    }

    /// Mean-motion positions only.
    pub fn degraded() -> Self {
        Self {
            providers: Vec::new(),
            store: None,
            fallback: MeanMotionProvider::new(),
            defaults: ChartSettings::default(),
        }
    }

    /// Caller-supplied providers ahead of the mean-motion fallback.
    pub fn with_providers(providers: Vec<Box<dyn PositionProvider>>) -> Self {
        Self {
            providers,
            ..Self::degraded()
        }
    }

    pub fn with_default_settings(mut self, settings: ChartSettings) -> Self {
        self.defaults = settings;
        self
    }

    pub fn default_settings(&self) -> &ChartSettings {
        &self.defaults
    }

    pub fn store(&self) -> Option<&EphemerisStore> {
        self.store.as_deref()
    }

    /// Best backends the chain can offer, loading the dataset if needed.
    pub fn capabilities(&self) -> Libraries {
        let high = self.providers.iter().any(|p| p.backend() == Backend::HighPrecision)
            || self.store.as_ref().is_some_and(|s| s.provider().is_some());
        Libraries {
            jpl_ephemeris: high,
            placidus: high,
        }
    }

    /// Chart with the engine's default settings.
    pub fn compute_default(&self, input: &BirthInput) -> Result<ChartResult, ChartError> {
        self.compute(input, &self.defaults)
    }

    pub fn compute(
        &self,
        input: &BirthInput,
        settings: &ChartSettings,
    ) -> Result<ChartResult, ChartError> {
        input.validate()?;
        settings.validate()?;
        let started = Instant::now();

        let epoch = input.epoch();
        let mut fallbacks = Vec::new();
        let sourced = self.positions(&epoch, &mut fallbacks)?;
        let high_precision = sourced.backend == Backend::HighPrecision;
        let positions_done = started.elapsed();

        let signs = SignKernel.compute(&sourced.snapshots.now);
        let retrograde = RetrogradeKernel.compute(&sourced.snapshots);
        let planets: BTreeMap<_, _> = sourced
            .snapshots
            .now
            .iter()
            .map(|(body, pos)| {
                let planet = PlanetPosition {
                    ecliptic_longitude: pos.longitude,
                    ecliptic_latitude: pos.latitude,
                    sign: signs[body],
                    retrograde: retrograde.get(body).copied().unwrap_or(false),
                };
                (*body, planet)
            })
            .collect();

        let mut house_system = settings.house_system;
        let (ascendant, midheaven, houses) = if input.date_only {
            (None, None, Vec::new())
        } else {
            let angles = ascendant::angles(&epoch, input.latitude, input.longitude);
            let requested = HouseKernel::new(settings.house_system);
            let cusps = match requested
                .available(sourced.backend)
                .and_then(|()| requested.compute(&angles))
            {
                Ok(cusps) => cusps,
                Err(err) => {
                    warn!(
                        requested = requested.name(),
                        latitude = input.latitude,
                        error = %err,
                        "house division failed; using equal houses"
                    );
                    fallbacks.push(Fallback {
                        stage: FallbackStage::Houses,
                        requested: requested.name().to_string(),
                        used: HouseSystem::Equal.name().to_string(),
                        reason: err.to_string(),
                    });
                    house_system = HouseSystem::Equal;
                    crate::houses::equal_cusps(angles.ascendant)
                }
            };
            (
                Some(AnglePoint::at(angles.ascendant)),
                Some(AnglePoint::at(angles.midheaven)),
                to_house_cusps(&cusps),
            )
        };

        let aspects = AspectKernel {
            orbs: settings.aspect_orbs,
        }
        .compute(&sourced.snapshots.now);
        let mutual_receptions = ReceptionKernel {
            scheme: settings.rulers_scheme,
        }
        .compute(&signs);

        debug!(
            provider = sourced.name,
            positions_us = positions_done.as_micros() as u64,
            total_us = started.elapsed().as_micros() as u64,
            aspects = aspects.len(),
            "chart computed"
        );

        Ok(ChartResult {
            input: input.clone(),
            settings: SettingsReport {
                house_system,
                rulers_scheme: settings.rulers_scheme,
                aspect_orbs: settings.aspect_orbs,
                libraries: Libraries {
                    jpl_ephemeris: high_precision,
                    placidus: high_precision,
                },
                fallbacks,
            },
            ascendant,
            midheaven,
            houses,
            planets,
            aspects,
            mutual_receptions,
        })
    }

    /// Walk the chain; the first provider that covers both instants and
    /// answers for both wins. Skipped providers become fallback records.
    ///
    /// The store is consulted only once the caller providers are
    /// exhausted, so a chart they serve never loads the dataset.
    fn positions(&self, epoch: &Epoch, fallbacks: &mut Vec<Fallback>) -> Result<Sourced, ChartError> {
        let instants = [*epoch, epoch.days_earlier(1.0)];
        let mut skipped = Vec::new();

        let mut callers = self.providers.iter().map(|p| &**p as &dyn PositionProvider);
        let mut sourced = serve(&mut callers, &instants, &mut skipped);

        if sourced.is_none() {
            let jpl = self.store.as_deref().and_then(|store| {
                let provider = store.provider();
                if provider.is_none() {
                    let reason = store.unavailable_reason().unwrap_or("dataset unavailable");
                    skipped.push(SkippedProvider::new("jpl_ephemeris", reason));
                }
                provider
            });
            let mut rest = jpl
                .map(|p| p as &dyn PositionProvider)
                .into_iter()
                .chain(std::iter::once(&self.fallback as &dyn PositionProvider));
            sourced = serve(&mut rest, &instants, &mut skipped);
        }

        let Some(sourced) = sourced else {
            return Err(EngineError::OutOfCoverage {
                provider: "any",
                jd_tdb: epoch.jd_tdb(),
            }
            .into());
        };
        for skip in skipped {
            debug!(requested = skip.name, used = sourced.name, reason = %skip.reason, "position provider skipped");
            fallbacks.push(Fallback {
                stage: FallbackStage::Positions,
                requested: skip.name.to_string(),
                used: sourced.name.to_string(),
                reason: skip.reason,
            });
        }
        Ok(sourced)
    }
}

/// Take providers from `chain` until one covers `instants` and answers
/// for all of them.
fn serve<'a, I>(chain: &mut I, instants: &[Epoch; 2], skipped: &mut Vec<SkippedProvider>) -> Option<Sourced>
where
    I: Iterator<Item = &'a dyn PositionProvider>,
{
    while let Some(provider) = select_provider(chain, instants, skipped) {
        match fetch_pair(provider, &instants[0], &instants[1]) {
            Ok(snapshots) => {
                return Some(Sourced {
                    name: provider.name(),
                    backend: provider.backend(),
                    snapshots,
                });
            }
            Err(err) => {
                info!(provider = provider.name(), error = %err, "position provider failed");
                skipped.push(SkippedProvider::new(provider.name(), err.to_string()));
            }
        }
    }
    None
}

fn fetch_pair(
    provider: &dyn PositionProvider,
    epoch: &Epoch,
    day_before: &Epoch,
) -> Result<Snapshots, EngineError> {
    let now: BodyPositions = provider.positions(epoch)?;
    let day_before = provider.positions(day_before)?;
    Ok(Snapshots { now, day_before })
}
