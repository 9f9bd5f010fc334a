//! Core units, constants, and shared primitives for the stellar evolution workspace.

/// Physical constants and model thresholds, in solar units unless stated otherwise.
pub mod constants {
    /// Solar effective temperature (K).
    pub const SUN_TEFF_K: f64 = 5_772.0;
    /// Solar radii per astronomical unit (rounded, as used by the Roche geometry).
    pub const SOLAR_RADII_PER_AU: f64 = 215.0;
    /// Kilometres per solar radius.
    pub const KM_PER_SOLAR_RADIUS: f64 = 696_000.0;
    /// Schwarzschild radius per solar mass (km).
    pub const SCHWARZSCHILD_KM_PER_SOLAR_MASS: f64 = 2.95;
    /// Years per million years.
    pub const YEARS_PER_MYR: f64 = 1.0e6;

    /// Initial masses at or above this end in core collapse (supernova, neutron star).
    pub const CORE_COLLAPSE_MASS: f64 = 8.0;
    /// Masses at or above this collapse to a black hole.
    pub const BLACK_HOLE_MASS: f64 = 20.0;

    /// Main-sequence lifetime of a one solar mass star (years).
    pub const SOLAR_MS_LIFETIME_YEARS: f64 = 10.0e9;
    /// Main-sequence lifetime power-law exponent.
    pub const MS_LIFETIME_EXPONENT: f64 = -2.5;
    /// Mass-luminosity exponent.
    pub const LUMINOSITY_EXPONENT: f64 = 3.5;
    /// Mass-radius exponent.
    pub const RADIUS_EXPONENT: f64 = 0.8;
    /// Protostellar contraction as a fraction of the main-sequence lifetime.
    pub const PROTOSTAR_FRACTION: f64 = 0.01;
    /// Post-main-sequence (giant) phase as a fraction of the main-sequence lifetime.
    pub const GIANT_FRACTION: f64 = 0.10;

    /// White dwarf radius (R☉).
    pub const WHITE_DWARF_RADIUS: f64 = 0.012;
    /// Neutron star radius (R☉).
    pub const NEUTRON_STAR_RADIUS: f64 = 1.5e-5;
    /// Smallest black hole radius reported (R☉).
    pub const MIN_BLACK_HOLE_RADIUS: f64 = 5.0e-6;

    /// Wall-clock length of the collapse transition (ms).
    pub const DEFAULT_COLLAPSE_DURATION_MS: f64 = 2_000.0;
}

/// Valid parameter ranges. Values outside are clamped at entry, never rejected.
pub mod bounds {
    /// Stellar mass range (M☉).
    pub const MASS: (f64, f64) = (0.1, 50.0);
    /// Floor a donor's mass can never drop below (M☉).
    pub const DONOR_MASS_FLOOR: f64 = 0.1;
    /// Binary separation range (AU).
    pub const SEPARATION_AU: (f64, f64) = (0.01, 10.0);
    /// Mass transfer rate range (M☉ per million years).
    pub const TRANSFER_RATE_PER_MYR: (f64, f64) = (0.0, 0.2);
    /// Mass ratio range accepted by the Roche-lobe fit.
    pub const MASS_RATIO: (f64, f64) = (1.0e-3, 1.0e3);
    /// Luminosity range (L☉).
    pub const LUMINOSITY: (f64, f64) = (1.0e-3, 1.0e6);
    /// Radius range (R☉).
    pub const RADIUS: (f64, f64) = (0.05, 2_000.0);
    /// Effective temperature range (K).
    pub const TEMPERATURE_K: (f64, f64) = (2_000.0, 60_000.0);

    /// Clamp a mass into [`MASS`].
    #[inline]
    pub fn clamp_mass(mass: f64) -> f64 {
        mass.clamp(MASS.0, MASS.1)
    }

    /// Simulated-time step that never runs backwards: `NaN` and negative steps become
    /// zero, `+inf` is kept so it reaches the end-of-life clamp.
    #[inline]
    pub fn clamp_step_years(dt_years: f64) -> f64 {
        if dt_years.is_nan() { 0.0 } else { dt_years.max(0.0) }
    }

    /// Clamp a separation into [`SEPARATION_AU`].
    #[inline]
    pub fn clamp_separation_au(separation_au: f64) -> f64 {
        separation_au.clamp(SEPARATION_AU.0, SEPARATION_AU.1)
    }

    /// Clamp a per-year transfer rate so that it stays within [`TRANSFER_RATE_PER_MYR`].
    #[inline]
    pub fn clamp_transfer_rate_per_year(rate_per_year: f64) -> f64 {
        let per_myr = super::units::per_year_to_per_myr(rate_per_year);
        super::units::per_myr_to_per_year(
            per_myr.clamp(TRANSFER_RATE_PER_MYR.0, TRANSFER_RATE_PER_MYR.1),
        )
    }
}

/// Basic unit conversion helpers.
pub mod units {
    use super::constants::{KM_PER_SOLAR_RADIUS, SOLAR_RADII_PER_AU, YEARS_PER_MYR};

    /// Convert solar radii to astronomical units.
    #[inline]
    pub fn solar_radii_to_au(r: f64) -> f64 {
        r / SOLAR_RADII_PER_AU
    }

    /// Convert kilometres to solar radii.
    #[inline]
    pub fn km_to_solar_radii(km: f64) -> f64 {
        km / KM_PER_SOLAR_RADIUS
    }

    /// Convert a rate per million years to a rate per year.
    #[inline]
    pub fn per_myr_to_per_year(v: f64) -> f64 {
        v / YEARS_PER_MYR
    }

    /// Convert a rate per year to a rate per million years.
    #[inline]
    pub fn per_year_to_per_myr(v: f64) -> f64 {
        v * YEARS_PER_MYR
    }
}

/// Lightweight time utilities shared across crates.
pub mod time {
    use super::constants::YEARS_PER_MYR;

    /// Convert milliseconds to seconds.
    #[inline]
    pub fn ms_to_seconds(ms: f64) -> f64 {
        ms / 1_000.0
    }

    /// Convert seconds to milliseconds.
    #[inline]
    pub fn seconds_to_ms(seconds: f64) -> f64 {
        seconds * 1_000.0
    }

    /// Convert years to millions of years.
    #[inline]
    pub fn years_to_myr(years: f64) -> f64 {
        years / YEARS_PER_MYR
    }
}

