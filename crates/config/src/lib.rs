//! Scenario models and loaders for the stellar evolution workspace.
//!
//! Values coming from files are checked here, at the boundary: non-finite numbers are
//! rejected, finite ones are clamped into the ranges the engine supports.

use std::fs::File;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use stellar_core::bounds;
use stellar_core::constants::DEFAULT_COLLAPSE_DURATION_MS;
use thiserror::Error;
use tracing::warn;

const DEFAULT_FRAME_RATE_HZ: f64 = 60.0;
const FRAME_RATE_HZ: (f64, f64) = (1.0, 240.0);

/// A named simulation setup.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ScenarioConfig {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub primary_mass: f64,
    #[serde(default)]
    pub secondary: Option<SecondaryConfig>,
    #[serde(default)]
    pub clock: ClockConfig,
    #[serde(default = "default_frame_rate_hz")]
    pub frame_rate_hz: f64,
    #[serde(default = "default_collapse_duration_ms")]
    pub collapse_duration_ms: f64,
}

/// Companion star and binary parameters.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SecondaryConfig {
    pub mass: f64,
    pub separation_au: f64,
    /// Mass transfer rate (M☉ per million years).
    #[serde(default)]
    pub transfer_rate_per_myr: f64,
}

/// Playback pacing.
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq)]
#[serde(tag = "mode")]
pub enum ClockConfig {
    #[default]
    #[serde(rename = "auto")]
    Auto,
    #[serde(rename = "manual")]
    Manual { speed_multiplier: f64 },
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("scenario '{scenario}': {field} must be a finite number")]
    Invalid {
        scenario: String,
        field: &'static str,
    },
    #[error("scenario '{0}' not found in catalog")]
    NotFound(String),
    #[error("scenario catalog is empty")]
    EmptyCatalog,
}

fn default_frame_rate_hz() -> f64 {
    DEFAULT_FRAME_RATE_HZ
}

fn default_collapse_duration_ms() -> f64 {
    DEFAULT_COLLAPSE_DURATION_MS
}

impl ScenarioConfig {
    /// Single-star scenario with default pacing.
    pub fn single(name: impl Into<String>, primary_mass: f64) -> Self {
        Self {
            name: name.into(),
            description: None,
            primary_mass,
            secondary: None,
            clock: ClockConfig::Auto,
            frame_rate_hz: DEFAULT_FRAME_RATE_HZ,
            collapse_duration_ms: DEFAULT_COLLAPSE_DURATION_MS,
        }
    }

    /// Reject non-finite values and clamp the rest into supported ranges.
    pub fn validate(mut self) -> Result<Self, ConfigError> {
        let name = self.name.clone();
        let check = |field: &'static str, value: f64| {
            if value.is_finite() {
                Ok(value)
            } else {
                Err(ConfigError::Invalid {
                    scenario: name.clone(),
                    field,
                })
            }
        };

        let (lo, hi) = bounds::MASS;
        self.primary_mass = clamp_logged(
            &name,
            "primary_mass",
            check("primary_mass", self.primary_mass)?,
            lo,
            hi,
        );

        if let Some(secondary) = self.secondary.as_mut() {
            secondary.mass = clamp_logged(
                &name,
                "secondary.mass",
                check("secondary.mass", secondary.mass)?,
                lo,
                hi,
            );
            let (lo, hi) = bounds::SEPARATION_AU;
            secondary.separation_au = clamp_logged(
                &name,
                "secondary.separation_au",
                check("secondary.separation_au", secondary.separation_au)?,
                lo,
                hi,
            );
            let (lo, hi) = bounds::TRANSFER_RATE_PER_MYR;
            secondary.transfer_rate_per_myr = clamp_logged(
                &name,
                "secondary.transfer_rate_per_myr",
                check("secondary.transfer_rate_per_myr", secondary.transfer_rate_per_myr)?,
                lo,
                hi,
            );
        }

        if let ClockConfig::Manual { speed_multiplier } = &mut self.clock {
            *speed_multiplier = clamp_logged(
                &name,
                "clock.speed_multiplier",
                check("clock.speed_multiplier", *speed_multiplier)?,
                0.0,
                f64::MAX,
            );
        }

        let (lo, hi) = FRAME_RATE_HZ;
        self.frame_rate_hz = clamp_logged(
            &name,
            "frame_rate_hz",
            check("frame_rate_hz", self.frame_rate_hz)?,
            lo,
            hi,
        );
        self.collapse_duration_ms = clamp_logged(
            &name,
            "collapse_duration_ms",
            check("collapse_duration_ms", self.collapse_duration_ms)?,
            0.0,
            f64::MAX,
        );

        Ok(self)
    }
}

fn clamp_logged(scenario: &str, field: &str, value: f64, lo: f64, hi: f64) -> f64 {
    let clamped = value.clamp(lo, hi);
    if clamped != value {
        warn!(scenario, field, value, clamped, "config value out of range; clamped");
    }
    clamped
}

/// Load and validate scenarios from a YAML list, a single TOML file, or a directory
/// of TOML files (sorted by file name).
pub fn load_scenarios<P: AsRef<Path>>(path: P) -> Result<Vec<ScenarioConfig>, ConfigError> {
    load_records(path)?
        .into_iter()
        .map(ScenarioConfig::validate)
        .collect()
}

/// Select a scenario by case-insensitive name.
pub fn find_scenario<'a>(
    scenarios: &'a [ScenarioConfig],
    name: &str,
) -> Result<&'a ScenarioConfig, ConfigError> {
    if scenarios.is_empty() {
        return Err(ConfigError::EmptyCatalog);
    }
    let upper = name.to_uppercase();
    scenarios
        .iter()
        .find(|s| s.name.to_uppercase() == upper)
        .ok_or_else(|| ConfigError::NotFound(name.to_string()))
}

fn load_records<T, P>(path: P) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if path.is_dir() {
        read_dir_records(path)
    } else if path.extension().map(|ext| ext == "toml").unwrap_or(false) {
        let contents = std::fs::read_to_string(path)?;
        let record: T = toml::from_str(&contents)?;
        Ok(vec![record])
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn read_dir_records<T>(dir: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    let mut records = Vec::new();
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().map(|ext| ext == "toml").unwrap_or(false))
        .collect();
    entries.sort();
    for path in entries {
        let contents = std::fs::read_to_string(&path)?;
        let record: T = toml::from_str(&contents)?;
        records.push(record);
    }
    Ok(records)
}
