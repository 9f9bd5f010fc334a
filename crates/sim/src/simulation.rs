//! The simulation context. Owns both stars and all binary/clock parameters; every
//! mutating operation takes `&mut self`, so scrubbing and frame ticks are serialized
//! by construction.

use serde::Serialize;
use stellar_binary::{BinarySystem, RocheGeometry};
use stellar_relations::Fate;
use stellar_star::{Star, StarId, StarPair};
use tracing::debug;

use crate::clock::{ClockMode, next_clock_tick};
use crate::integrator::{DEFAULT_COLLAPSE_DURATION_MS, StepReport, TimeIntegrator};

/// Initial parameters for a simulation session.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationSettings {
    pub primary_mass: f64,
    pub secondary_mass: f64,
    pub binary_enabled: bool,
    pub separation_au: f64,
    pub transfer_rate_per_year: f64,
    pub clock: ClockMode,
    pub collapse_duration_ms: f64,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            primary_mass: 1.0,
            secondary_mass: 0.8,
            binary_enabled: false,
            separation_au: 1.0,
            transfer_rate_per_year: 5.0e-8,
            clock: ClockMode::Auto,
            collapse_duration_ms: DEFAULT_COLLAPSE_DURATION_MS,
        }
    }
}

/// Whether the host should keep scheduling frame ticks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Playback {
    #[default]
    Running,
    Paused,
}

/// Everything a renderer needs to draw one star.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StarSnapshot {
    pub id: StarId,
    pub initial_mass: f64,
    pub mass: f64,
    pub age_years: f64,
    pub total_years: f64,
    pub life_fraction: f64,
    pub stage: &'static str,
    pub luminosity: f64,
    pub radius: f64,
    pub temperature_k: f64,
    pub fate: Fate,
    pub ended: bool,
    pub just_ended: bool,
    pub had_supernova: bool,
    pub collapse_progress: f64,
    pub compact_radius: Option<f64>,
}

impl StarSnapshot {
    pub fn capture(id: StarId, star: &Star) -> Self {
        let display = star.display();
        Self {
            id,
            initial_mass: star.initial_mass(),
            mass: star.mass(),
            age_years: star.age(),
            total_years: star.total_lifetime(),
            life_fraction: star.life_fraction(),
            stage: display.stage_label(),
            luminosity: display.luminosity,
            radius: display.radius,
            temperature_k: display.temperature_k,
            fate: star.fate(),
            ended: star.is_ended(),
            just_ended: star.just_ended(),
            had_supernova: star.had_supernova(),
            collapse_progress: star.collapse().progress,
            compact_radius: star.remnant_radius(),
        }
    }
}

/// State of the whole session at one instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationSnapshot {
    pub elapsed_ms: f64,
    pub primary: StarSnapshot,
    /// Present only in binary mode.
    pub secondary: Option<StarSnapshot>,
    pub geometry: Option<RocheGeometry>,
}

#[derive(Debug, Clone)]
pub struct Simulation {
    stars: StarPair,
    binary: BinarySystem,
    binary_enabled: bool,
    clock: ClockMode,
    integrator: TimeIntegrator,
    playback: Playback,
    elapsed_ms: f64,
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(SimulationSettings::default())
    }
}

impl Simulation {
    pub fn new(settings: SimulationSettings) -> Self {
        Self {
            stars: StarPair::new(settings.primary_mass, settings.secondary_mass),
            binary: BinarySystem::new(settings.separation_au, settings.transfer_rate_per_year),
            binary_enabled: settings.binary_enabled,
            clock: settings.clock,
            integrator: TimeIntegrator::new(settings.collapse_duration_ms),
            playback: Playback::Running,
            elapsed_ms: 0.0,
        }
    }

    pub fn primary(&self) -> &Star {
        &self.stars.primary
    }

    pub fn secondary(&self) -> &Star {
        &self.stars.secondary
    }

    pub fn star(&self, id: StarId) -> &Star {
        self.stars.get(id)
    }

    pub fn stars(&self) -> &StarPair {
        &self.stars
    }

    pub fn binary(&self) -> &BinarySystem {
        &self.binary
    }

    pub fn is_binary(&self) -> bool {
        self.binary_enabled
    }

    pub fn clock_mode(&self) -> ClockMode {
        self.clock
    }

    pub fn playback(&self) -> Playback {
        self.playback
    }

    /// Wall-clock milliseconds consumed by [`Simulation::tick`] so far.
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    /// Stars taking part in integration: the primary, plus the secondary in binary mode.
    pub fn active_stars(&self) -> impl Iterator<Item = (StarId, &Star)> {
        let secondary = self
            .binary_enabled
            .then_some((StarId::Secondary, &self.stars.secondary));
        std::iter::once((StarId::Primary, &self.stars.primary)).chain(secondary)
    }

    /// True once every active star has ended and finished collapsing.
    pub fn is_settled(&self) -> bool {
        self.active_stars()
            .all(|(_, star)| star.is_ended() && star.collapse().is_complete())
    }

    /// Replace the primary with a fresh star of `initial_mass` at age zero.
    pub fn set_primary_mass(&mut self, initial_mass: f64) {
        self.stars.reset(StarId::Primary, initial_mass);
    }

    /// Replace the secondary with a fresh star of `initial_mass` at age zero.
    pub fn set_secondary_mass(&mut self, initial_mass: f64) {
        self.stars.reset(StarId::Secondary, initial_mass);
    }

    /// Update binary parameters. Disabling only removes the secondary from
    /// integration; its state is kept as is.
    pub fn configure_binary(
        &mut self,
        enabled: bool,
        separation_au: Option<f64>,
        transfer_rate_per_year: Option<f64>,
    ) {
        self.binary_enabled = enabled;
        if let Some(separation) = separation_au {
            self.binary.set_separation_au(separation);
        }
        if let Some(rate) = transfer_rate_per_year {
            self.binary.set_transfer_rate_per_year(rate);
        }
        debug!(
            enabled,
            separation_au = self.binary.separation_au(),
            transfer_rate_per_year = self.binary.transfer_rate_per_year(),
            "binary configured"
        );
    }

    pub fn set_clock_mode(&mut self, mode: ClockMode) {
        self.clock = mode;
    }

    pub fn pause(&mut self) {
        self.playback = Playback::Paused;
    }

    pub fn resume(&mut self) {
        self.playback = Playback::Running;
    }

    /// Advance every active star by `dt_years`; `dt_ms` only paces the collapse
    /// transition.
    pub fn advance(&mut self, dt_years: f64, dt_ms: f64) -> StepReport {
        let binary = self.binary_enabled.then_some(&self.binary);
        self.integrator
            .advance(&mut self.stars, binary, dt_years, dt_ms)
    }

    /// Convert a wall-clock frame into simulated years with the current clock mode
    /// and advance by it. Returns `None` while paused.
    pub fn tick(&mut self, dt_ms: f64) -> Option<StepReport> {
        if self.playback == Playback::Paused {
            return None;
        }
        let dt_years = self.next_clock_tick(dt_ms);
        self.elapsed_ms += dt_ms.max(0.0);
        Some(self.advance(dt_years, dt_ms))
    }

    /// Simulated years the next frame of `dt_ms` would cover.
    pub fn next_clock_tick(&self, dt_ms: f64) -> f64 {
        next_clock_tick(dt_ms, self.clock, self.stars.primary.total_lifetime())
    }

    /// Scrub: assign the age of every active star directly, each clamped to its own
    /// lifetime. Skipped-over spans do not replay transfer or end-of-life.
    pub fn set_age(&mut self, age_years: f64) {
        self.stars.primary.set_age(age_years);
        if self.binary_enabled {
            self.stars.secondary.set_age(age_years);
        }
    }

    pub fn snapshot(&self) -> SimulationSnapshot {
        SimulationSnapshot {
            elapsed_ms: self.elapsed_ms,
            primary: StarSnapshot::capture(StarId::Primary, &self.stars.primary),
            secondary: self
                .binary_enabled
                .then(|| StarSnapshot::capture(StarId::Secondary, &self.stars.secondary)),
            geometry: self
                .binary_enabled
                .then(|| self.binary.geometry(&self.stars)),
        }
    }
}
