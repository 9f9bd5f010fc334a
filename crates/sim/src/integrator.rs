//! Per-step aging, end-of-life transitions, collapse pacing, and mass transfer.

use serde::Serialize;
use stellar_binary::{BinarySystem, TransferOutcome};
use stellar_core::bounds::clamp_step_years;
use stellar_star::{LifecycleEvent, StarId, StarPair};

pub use stellar_core::constants::DEFAULT_COLLAPSE_DURATION_MS;

/// Result of one integration step.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StepReport {
    pub dt_years: f64,
    pub events: Vec<LifecycleEvent>,
    /// `None` when binary mode is off.
    pub transfer: Option<TransferOutcome>,
}

impl StepReport {
    /// Supernova events raised this step.
    pub fn supernovae(&self) -> impl Iterator<Item = StarId> + '_ {
        self.events.iter().filter_map(|event| match event {
            LifecycleEvent::EndOfLife {
                star,
                supernova: true,
                ..
            } => Some(*star),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeIntegrator {
    collapse_duration_ms: f64,
}

impl Default for TimeIntegrator {
    fn default() -> Self {
        Self::new(DEFAULT_COLLAPSE_DURATION_MS)
    }
}

impl TimeIntegrator {
    pub fn new(collapse_duration_ms: f64) -> Self {
        Self {
            collapse_duration_ms: collapse_duration_ms.max(0.0),
        }
    }

    pub fn collapse_duration_ms(&self) -> f64 {
        self.collapse_duration_ms
    }

    /// Advance the active stars by `dt_years`. The secondary only takes part when
    /// `binary` is given. Transfer runs after aging with the same cleaned step.
    pub fn advance(
        &self,
        stars: &mut StarPair,
        binary: Option<&BinarySystem>,
        dt_years: f64,
        dt_ms: f64,
    ) -> StepReport {
        let dt_years = clamp_step_years(dt_years);
        let mut events = Vec::new();
        let active: &[StarId] = if binary.is_some() {
            &[StarId::Primary, StarId::Secondary]
        } else {
            &[StarId::Primary]
        };

        for &id in active {
            let star = stars.get_mut(id);
            if star.is_ended() {
                star.advance(id, dt_years);
                star.advance_collapse(dt_ms, self.collapse_duration_ms);
            } else if let Some(event) = star.advance(id, dt_years) {
                events.push(event);
            }
        }

        let transfer = binary.map(|system| system.transfer(stars, dt_years));

        StepReport {
            dt_years,
            events,
            transfer,
        }
    }
}
