//! Wall-clock to simulated-time scaling.

use serde::Serialize;
use stellar_core::time::ms_to_seconds;

/// Wall-clock seconds over which auto-scale mode plays a whole lifetime.
pub const AUTO_PLAYBACK_SECONDS: f64 = 60.0;
/// Simulated years per wall-clock second at a speed multiplier of one.
pub const MANUAL_YEARS_PER_SECOND: f64 = 1.0e7;

/// Scaling policy selected by the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ClockMode {
    /// Compress the primary's total lifetime into [`AUTO_PLAYBACK_SECONDS`].
    #[default]
    Auto,
    /// Fixed pacing of `speed_multiplier · 1e7` years per second.
    Manual { speed_multiplier: f64 },
}

/// Simulated years covered by a frame of `dt_ms` milliseconds.
///
/// Auto mode reads `primary_total_years` afresh on every call, so a lifetime
/// changed by mass transfer re-targets the remaining playback.
pub fn next_clock_tick(dt_ms: f64, mode: ClockMode, primary_total_years: f64) -> f64 {
    let seconds = ms_to_seconds(dt_ms.max(0.0));
    match mode {
        ClockMode::Auto => seconds * (primary_total_years / AUTO_PLAYBACK_SECONDS),
        ClockMode::Manual { speed_multiplier } => {
            seconds * speed_multiplier.max(0.0) * MANUAL_YEARS_PER_SECOND
        }
    }
}
