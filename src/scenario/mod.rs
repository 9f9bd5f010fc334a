//! Turning validated scenario configuration into a ready-to-run [`Simulation`].

use std::path::Path;

use stellar_config::{ClockConfig, ConfigError, ScenarioConfig, find_scenario, load_scenarios};
use stellar_core::time::seconds_to_ms;
use stellar_core::units::per_myr_to_per_year;
use stellar_sim::{ClockMode, Simulation, SimulationSettings};
use tracing::info;

/// Map a clock block onto the engine's scaling policy.
pub fn clock_mode(config: ClockConfig) -> ClockMode {
    match config {
        ClockConfig::Auto => ClockMode::Auto,
        ClockConfig::Manual { speed_multiplier } => ClockMode::Manual { speed_multiplier },
    }
}

/// Engine settings for a scenario. Binary mode is on exactly when a secondary is given.
pub fn settings_from_config(config: &ScenarioConfig) -> SimulationSettings {
    let defaults = SimulationSettings::default();
    let mut settings = SimulationSettings {
        primary_mass: config.primary_mass,
        clock: clock_mode(config.clock),
        collapse_duration_ms: config.collapse_duration_ms,
        ..defaults
    };
    if let Some(secondary) = &config.secondary {
        settings.binary_enabled = true;
        settings.secondary_mass = secondary.mass;
        settings.separation_au = secondary.separation_au;
        settings.transfer_rate_per_year = per_myr_to_per_year(secondary.transfer_rate_per_myr);
    }
    settings
}

/// Wall-clock length of one frame at the scenario's frame rate.
pub fn frame_interval_ms(config: &ScenarioConfig) -> f64 {
    seconds_to_ms(1.0 / config.frame_rate_hz)
}

/// Build a fresh simulation from a scenario.
pub fn build_simulation(config: &ScenarioConfig) -> Simulation {
    info!(
        scenario = %config.name,
        primary_mass = config.primary_mass,
        binary = config.secondary.is_some(),
        "building simulation"
    );
    Simulation::new(settings_from_config(config))
}

/// Load a catalog, pick `name` from it, and build its simulation.
pub fn load_simulation<P: AsRef<Path>>(
    catalog: P,
    name: &str,
) -> Result<(ScenarioConfig, Simulation), ConfigError> {
    let scenarios = load_scenarios(catalog)?;
    let scenario = find_scenario(&scenarios, name)?.clone();
    let simulation = build_simulation(&scenario);
    Ok((scenario, simulation))
}
