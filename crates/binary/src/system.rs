use serde::Serialize;
use stellar_core::bounds::{self, DONOR_MASS_FLOOR, clamp_step_years};
use stellar_star::{StarId, StarPair};
use tracing::debug;

use crate::roche::{overfills, physical_radius_au, roche_lobe_radius_au};

/// Binary parameters. Holds no stars of its own: it is evaluated against the
/// [`StarPair`] owned by the simulation on every step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BinarySystem {
    separation_au: f64,
    transfer_rate_per_year: f64,
}

/// Roche geometry of both stars at the current separation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RocheGeometry {
    pub separation_au: f64,
    pub primary_radius_au: f64,
    pub primary_lobe_au: f64,
    pub secondary_radius_au: f64,
    pub secondary_lobe_au: f64,
}

impl RocheGeometry {
    pub fn primary_overfills(&self) -> bool {
        self.primary_radius_au > self.primary_lobe_au
    }

    pub fn secondary_overfills(&self) -> bool {
        self.secondary_radius_au > self.secondary_lobe_au
    }
}

/// Mass moved from donor to accretor in one step (M☉).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MassTransfer {
    pub donor: StarId,
    pub accretor: StarId,
    pub amount: f64,
}

/// What the binary policy did during one integration step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TransferOutcome {
    /// At least one star has ended; transfer is switched off.
    Inactive,
    /// Neither star fills its Roche lobe.
    Detached,
    /// Both stars overfill. Symmetric overflow is not resolved into a net flow.
    Contact,
    /// A donor exists but the capped amount is zero (zero rate, zero step, or the
    /// donor already sits on the mass floor).
    Stalled { donor: StarId },
    Transferred(MassTransfer),
}

impl TransferOutcome {
    pub fn transfer(&self) -> Option<&MassTransfer> {
        match self {
            TransferOutcome::Transferred(t) => Some(t),
            _ => None,
        }
    }
}

impl BinarySystem {
    /// Separation and rate are clamped into their supported ranges.
    pub fn new(separation_au: f64, transfer_rate_per_year: f64) -> Self {
        Self {
            separation_au: bounds::clamp_separation_au(separation_au),
            transfer_rate_per_year: bounds::clamp_transfer_rate_per_year(transfer_rate_per_year),
        }
    }

    pub fn separation_au(&self) -> f64 {
        self.separation_au
    }

    pub fn transfer_rate_per_year(&self) -> f64 {
        self.transfer_rate_per_year
    }

    pub fn set_separation_au(&mut self, separation_au: f64) {
        self.separation_au = bounds::clamp_separation_au(separation_au);
    }

    pub fn set_transfer_rate_per_year(&mut self, rate: f64) {
        self.transfer_rate_per_year = bounds::clamp_transfer_rate_per_year(rate);
    }

    pub fn geometry(&self, stars: &StarPair) -> RocheGeometry {
        let (p, s) = (&stars.primary, &stars.secondary);
        RocheGeometry {
            separation_au: self.separation_au,
            primary_radius_au: physical_radius_au(p),
            primary_lobe_au: roche_lobe_radius_au(p.mass(), s.mass(), self.separation_au),
            secondary_radius_au: physical_radius_au(s),
            secondary_lobe_au: roche_lobe_radius_au(s.mass(), p.mass(), self.separation_au),
        }
    }

    /// The single star overflowing its lobe, if exactly one does.
    pub fn donor(&self, stars: &StarPair) -> Option<StarId> {
        let primary = overfills(&stars.primary, &stars.secondary, self.separation_au);
        let secondary = overfills(&stars.secondary, &stars.primary, self.separation_au);
        match (primary, secondary) {
            (true, false) => Some(StarId::Primary),
            (false, true) => Some(StarId::Secondary),
            _ => None,
        }
    }

    /// Run one step of Roche-lobe overflow. Moves `rate · dt` from the donor to the
    /// accretor, capped at the donor floor, then lets both stars recompute their
    /// durations and fate from the new masses. Ages are not touched.
    pub fn transfer(&self, stars: &mut StarPair, dt_years: f64) -> TransferOutcome {
        if stars.primary.is_ended() || stars.secondary.is_ended() {
            return TransferOutcome::Inactive;
        }

        let primary = overfills(&stars.primary, &stars.secondary, self.separation_au);
        let secondary = overfills(&stars.secondary, &stars.primary, self.separation_au);
        let donor_id = match (primary, secondary) {
            (false, false) => return TransferOutcome::Detached,
            (true, true) => return TransferOutcome::Contact,
            (true, false) => StarId::Primary,
            (false, true) => StarId::Secondary,
        };

        let (donor, accretor) = stars.split_mut(donor_id);
        let dt = clamp_step_years(dt_years);
        let requested = if self.transfer_rate_per_year > 0.0 && dt > 0.0 {
            self.transfer_rate_per_year * dt
        } else {
            0.0
        };
        let amount = requested.min(donor.mass() - DONOR_MASS_FLOOR);
        if amount <= 0.0 {
            return TransferOutcome::Stalled { donor: donor_id };
        }

        donor.set_mass(donor.mass() - amount);
        accretor.set_mass(accretor.mass() + amount);
        debug!(
            donor = %donor_id,
            amount,
            donor_mass = donor.mass(),
            accretor_mass = accretor.mass(),
            "roche-lobe overflow"
        );

        TransferOutcome::Transferred(MassTransfer {
            donor: donor_id,
            accretor: donor_id.other(),
            amount,
        })
    }
}
