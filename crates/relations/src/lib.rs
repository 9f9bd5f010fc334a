//! Closed-form power-law relations mapping stellar mass to life-cycle durations,
//! luminosity, radius, effective temperature, and terminal fate.
//!
//! Every function is total: inputs and outputs are clamped so that extreme masses
//! (0.1 to 50 M☉) still produce finite, bounded values.

use std::fmt;

use serde::{Deserialize, Serialize};
use stellar_core::bounds;
use stellar_core::constants::{
    BLACK_HOLE_MASS, CORE_COLLAPSE_MASS, GIANT_FRACTION, LUMINOSITY_EXPONENT,
    MIN_BLACK_HOLE_RADIUS, MS_LIFETIME_EXPONENT, NEUTRON_STAR_RADIUS, PROTOSTAR_FRACTION,
    RADIUS_EXPONENT, SCHWARZSCHILD_KM_PER_SOLAR_MASS, SOLAR_MS_LIFETIME_YEARS, SUN_TEFF_K,
    WHITE_DWARF_RADIUS,
};
use stellar_core::units::km_to_solar_radii;

/// Terminal state of a star, decided by mass alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fate {
    WhiteDwarf,
    NeutronStar,
    BlackHole,
}

impl Fate {
    /// Human-readable label, also used as the stage label once a star has ended.
    pub fn label(self) -> &'static str {
        match self {
            Fate::WhiteDwarf => "White Dwarf",
            Fate::NeutronStar => "Neutron Star",
            Fate::BlackHole => "Black Hole",
        }
    }
}

impl fmt::Display for Fate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Phase durations (years) derived from the current mass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PhaseDurations {
    pub protostar_years: f64,
    pub main_sequence_years: f64,
    pub giant_years: f64,
    pub total_years: f64,
}

impl PhaseDurations {
    /// Compute the three phases from the main-sequence lifetime of `mass`.
    pub fn for_mass(mass: f64) -> Self {
        let main_sequence = main_sequence_lifetime(mass);
        let protostar = PROTOSTAR_FRACTION * main_sequence;
        let giant = GIANT_FRACTION * main_sequence;
        Self {
            protostar_years: protostar,
            main_sequence_years: main_sequence,
            giant_years: giant,
            total_years: protostar + main_sequence + giant,
        }
    }

    /// Age at which the main sequence begins (ZAMS).
    #[inline]
    pub fn zams_age(&self) -> f64 {
        self.protostar_years
    }

    /// Age at which the star leaves the main sequence.
    #[inline]
    pub fn terminal_main_sequence_age(&self) -> f64 {
        self.protostar_years + self.main_sequence_years
    }
}

/// Main-sequence lifetime in years: `10 Gyr · M^-2.5`.
pub fn main_sequence_lifetime(mass: f64) -> f64 {
    SOLAR_MS_LIFETIME_YEARS * mass.powf(MS_LIFETIME_EXPONENT)
}

/// Luminosity in solar units: `M^3.5`, clamped.
pub fn luminosity(mass: f64) -> f64 {
    let (lo, hi) = bounds::LUMINOSITY;
    mass.powf(LUMINOSITY_EXPONENT).clamp(lo, hi)
}

/// Radius in solar units: `M^0.8`, clamped.
pub fn radius(mass: f64) -> f64 {
    let (lo, hi) = bounds::RADIUS;
    mass.powf(RADIUS_EXPONENT).clamp(lo, hi)
}

/// Effective temperature in kelvin from luminosity and radius (Stefan-Boltzmann, solar-normalised).
pub fn temperature(luminosity: f64, radius: f64) -> f64 {
    let (lo, hi) = bounds::TEMPERATURE_K;
    (SUN_TEFF_K * (luminosity / (radius * radius)).powf(0.25)).clamp(lo, hi)
}

/// Terminal fate for a given mass.
pub fn fate(mass: f64) -> Fate {
    if mass < CORE_COLLAPSE_MASS {
        Fate::WhiteDwarf
    } else if mass < BLACK_HOLE_MASS {
        Fate::NeutronStar
    } else {
        Fate::BlackHole
    }
}

/// Radius of the compact remnant in solar radii. Black holes use the
/// Schwarzschild radius of `mass`, floored so it stays drawable.
pub fn compact_radius(fate: Fate, mass: f64) -> f64 {
    match fate {
        Fate::WhiteDwarf => WHITE_DWARF_RADIUS,
        Fate::NeutronStar => NEUTRON_STAR_RADIUS,
        Fate::BlackHole => km_to_solar_radii(SCHWARZSCHILD_KM_PER_SOLAR_MASS * mass)
            .max(MIN_BLACK_HOLE_RADIUS),
    }
}
