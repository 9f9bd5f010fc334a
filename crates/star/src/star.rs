use serde::Serialize;
use stellar_core::bounds::{self, DONOR_MASS_FLOOR};
use stellar_core::constants::CORE_COLLAPSE_MASS;
use stellar_relations::{self as relations, Fate, PhaseDurations};
use tracing::info;

use crate::event::{LifecycleEvent, StarId};
use crate::stage::Stage;

/// Visual collapse transition that follows the end of life. Its pacing is wall-clock
/// time, not simulated years.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Collapse {
    pub animating: bool,
    /// Fraction complete, in `[0, 1]`.
    pub progress: f64,
}

impl Collapse {
    const IDLE: Collapse = Collapse {
        animating: false,
        progress: 0.0,
    };

    /// True once the collapse has run to completion.
    pub fn is_complete(&self) -> bool {
        !self.animating && self.progress >= 1.0
    }
}

/// Derived quantities for drawing a star. Pure projection of the star's state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StarDisplay {
    pub luminosity: f64,
    pub radius: f64,
    pub temperature_k: f64,
    pub stage: Stage,
}

impl StarDisplay {
    pub fn stage_label(&self) -> &'static str {
        self.stage.label()
    }
}

/// One stellar body and its evolving life-cycle state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Star {
    initial_mass: f64,
    mass: f64,
    age_years: f64,
    durations: PhaseDurations,
    ended: bool,
    fate: Fate,
    collapse: Collapse,
    just_ended: bool,
    had_supernova: bool,
}

impl Star {
    /// Create a star at age zero. The mass is clamped into the supported range and
    /// every derived field is computed from it.
    pub fn new(initial_mass: f64) -> Self {
        let mass = bounds::clamp_mass(initial_mass);
        Self {
            initial_mass: mass,
            mass,
            age_years: 0.0,
            durations: PhaseDurations::for_mass(mass),
            ended: false,
            fate: relations::fate(mass),
            collapse: Collapse::IDLE,
            just_ended: false,
            had_supernova: false,
        }
    }

    pub fn initial_mass(&self) -> f64 {
        self.initial_mass
    }

    /// Current mass (M☉). Drives every derived quantity.
    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn age(&self) -> f64 {
        self.age_years
    }

    pub fn durations(&self) -> &PhaseDurations {
        &self.durations
    }

    pub fn total_lifetime(&self) -> f64 {
        self.durations.total_years
    }

    /// Fraction of the current total lifetime already lived. Jumps when a mass change
    /// rescales the lifetime under an unchanged age.
    pub fn life_fraction(&self) -> f64 {
        self.age_years / self.durations.total_years
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    pub fn fate(&self) -> Fate {
        self.fate
    }

    pub fn collapse(&self) -> Collapse {
        self.collapse
    }

    /// True only for the step in which the star crossed into the ended state.
    pub fn just_ended(&self) -> bool {
        self.just_ended
    }

    pub fn had_supernova(&self) -> bool {
        self.had_supernova
    }

    /// Whether this star's death is a core-collapse supernova. Decided by initial mass.
    pub fn is_supernova_progenitor(&self) -> bool {
        self.initial_mass >= CORE_COLLAPSE_MASS
    }

    pub fn stage(&self) -> Stage {
        if self.ended {
            return Stage::Remnant(self.fate);
        }
        let d = &self.durations;
        if self.age_years < d.zams_age() {
            Stage::Protostar
        } else if self.age_years < d.terminal_main_sequence_age() {
            Stage::MainSequence
        } else if self.is_supernova_progenitor() {
            Stage::Supergiant
        } else {
            Stage::Giant
        }
    }

    /// Project the current state into luminosity, radius, temperature, and stage.
    pub fn display(&self) -> StarDisplay {
        let luminosity = relations::luminosity(self.mass);
        let radius = relations::radius(self.mass);
        StarDisplay {
            luminosity,
            radius,
            temperature_k: relations::temperature(luminosity, radius),
            stage: self.stage(),
        }
    }

    /// Remnant radius (R☉) for the current fate, available at any time.
    pub fn final_compact_radius(&self) -> f64 {
        relations::compact_radius(self.fate, self.mass)
    }

    /// Remnant radius once the collapse transition has finished, `None` before.
    pub fn remnant_radius(&self) -> Option<f64> {
        (self.ended && self.collapse.is_complete()).then(|| self.final_compact_radius())
    }

    /// Age the star by `dt_years`. Crossing the total lifetime clamps the age to it
    /// and performs the end-of-life transition, returning the resulting event.
    /// `NaN` and negative steps count as zero.
    pub fn advance(&mut self, id: StarId, dt_years: f64) -> Option<LifecycleEvent> {
        self.just_ended = false;
        if self.ended {
            return None;
        }

        self.age_years += bounds::clamp_step_years(dt_years);
        if self.age_years < self.durations.total_years {
            return None;
        }

        self.age_years = self.durations.total_years;
        self.ended = true;
        self.just_ended = true;
        self.collapse = Collapse {
            animating: true,
            progress: 0.0,
        };

        let supernova = self.is_supernova_progenitor() && !self.had_supernova;
        if supernova {
            self.had_supernova = true;
        }
        info!(
            star = %id,
            fate = %self.fate,
            age_years = self.age_years,
            supernova,
            "star reached end of life"
        );
        Some(LifecycleEvent::EndOfLife {
            star: id,
            fate: self.fate,
            supernova,
        })
    }

    /// Advance the collapse transition by `dt_ms` of wall-clock time, completing
    /// after `duration_ms`.
    pub fn advance_collapse(&mut self, dt_ms: f64, duration_ms: f64) {
        if !self.collapse.animating {
            return;
        }
        let step = if duration_ms > 0.0 {
            dt_ms.max(0.0) / duration_ms
        } else {
            1.0
        };
        self.collapse.progress = (self.collapse.progress + step).min(1.0);
        if self.collapse.progress >= 1.0 {
            self.collapse.animating = false;
        }
    }

    /// Assign the age directly, clamped to `[0, total lifetime]`. No end-of-life
    /// transition is performed for any span skipped over. An ended star keeps its
    /// age frozen at the total lifetime.
    pub fn set_age(&mut self, age_years: f64) {
        if self.ended || !age_years.is_finite() {
            return;
        }
        self.age_years = age_years.clamp(0.0, self.durations.total_years);
    }

    /// Change the current mass, floored at the donor limit. Phase durations and the
    /// fate are recomputed from the new mass while the age is left untouched. Once
    /// ended, durations and fate are permanent.
    pub fn set_mass(&mut self, mass: f64) {
        self.mass = mass.max(DONOR_MASS_FLOOR);
        if self.ended {
            return;
        }
        self.durations = PhaseDurations::for_mass(self.mass);
        self.fate = relations::fate(self.mass);
    }
}
