//! Export helpers for CSV timelines, JSON run summaries, and display formatting.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use thiserror::Error;

/// Errors surfaced while writing export artifacts.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write export: {0}")]
    Io(#[from] io::Error),
    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to write JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Create a writer for the target path, handling stdout (`-`) by convention.
pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    Ok(Box::new(BufWriter::new(file)))
}

/// Number formatting for display. Non-finite values never reach the output as
/// `NaN`/`inf`; they render as [`format::PLACEHOLDER`].
pub mod format {
    use stellar_core::time::years_to_myr;

    pub const PLACEHOLDER: &str = "--";

    /// Fixed-point with `decimals` digits.
    pub fn format_quantity(value: f64, decimals: usize) -> String {
        if value.is_finite() {
            format!("{value:.decimals$}")
        } else {
            PLACEHOLDER.to_string()
        }
    }

    /// Scientific notation with `decimals` digits in the mantissa.
    pub fn format_scientific(value: f64, decimals: usize) -> String {
        if value.is_finite() {
            format!("{value:.decimals$e}")
        } else {
            PLACEHOLDER.to_string()
        }
    }

    /// Years with a unit scaled to magnitude (yr, Myr, Gyr).
    pub fn format_years(years: f64) -> String {
        if !years.is_finite() {
            return PLACEHOLDER.to_string();
        }
        let magnitude = years.abs();
        if magnitude >= 1.0e9 {
            format!("{:.3} Gyr", years / 1.0e9)
        } else if magnitude >= 1.0e6 {
            format!("{:.3} Myr", years_to_myr(years))
        } else {
            format!("{years:.0} yr")
        }
    }
}

pub mod timeline {
    use std::io::Write;
    use std::path::Path;

    use serde::Serialize;
    use stellar_sim::{Fate, SimulationSnapshot, StarId, StarSnapshot};

    use super::{ExportError, writer_for_path};

    /// One CSV row: a single star at a single instant.
    #[derive(Debug, Clone, PartialEq, Serialize)]
    pub struct TimelineRow {
        pub elapsed_ms: f64,
        pub star: StarId,
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
        pub collapse_progress: f64,
    }

    impl TimelineRow {
        fn new(elapsed_ms: f64, star: &StarSnapshot) -> Self {
            Self {
                elapsed_ms,
                star: star.id,
                initial_mass: star.initial_mass,
                mass: star.mass,
                age_years: star.age_years,
                total_years: star.total_years,
                life_fraction: star.life_fraction,
                stage: star.stage,
                luminosity: star.luminosity,
                radius: star.radius,
                temperature_k: star.temperature_k,
                fate: star.fate,
                ended: star.ended,
                collapse_progress: star.collapse_progress,
            }
        }
    }

    /// Collects snapshot rows during a run, keeping every `stride`-th snapshot.
    #[derive(Debug, Clone)]
    pub struct TimelineRecorder {
        stride: usize,
        seen: usize,
        rows: Vec<TimelineRow>,
    }

    impl Default for TimelineRecorder {
        fn default() -> Self {
            Self::new(1)
        }
    }

    impl TimelineRecorder {
        pub fn new(stride: usize) -> Self {
            Self {
                stride: stride.max(1),
                seen: 0,
                rows: Vec::new(),
            }
        }

        pub fn record(&mut self, snapshot: &SimulationSnapshot) {
            let keep = self.seen % self.stride == 0;
            self.seen += 1;
            if keep {
                self.push(snapshot);
            }
        }

        /// Record regardless of stride, e.g. the final state of a run.
        pub fn record_final(&mut self, snapshot: &SimulationSnapshot) {
            self.push(snapshot);
        }

        fn push(&mut self, snapshot: &SimulationSnapshot) {
            self.rows
                .push(TimelineRow::new(snapshot.elapsed_ms, &snapshot.primary));
            if let Some(secondary) = &snapshot.secondary {
                self.rows
                    .push(TimelineRow::new(snapshot.elapsed_ms, secondary));
            }
        }

        pub fn rows(&self) -> &[TimelineRow] {
            &self.rows
        }
    }

    /// Serialize rows as CSV with a header line.
    pub fn write_csv<W: Write>(writer: W, rows: &[TimelineRow]) -> Result<(), ExportError> {
        let mut csv = csv::Writer::from_writer(writer);
        for row in rows {
            csv.serialize(row)?;
        }
        csv.flush()?;
        Ok(())
    }

    /// Write the recorded timeline to `path` (`-` for stdout).
    pub fn write_timeline_csv(path: &Path, rows: &[TimelineRow]) -> Result<(), ExportError> {
        let writer = writer_for_path(path)?;
        write_csv(writer, rows)
    }
}

pub mod summary {
    use std::io::Write;
    use std::path::Path;

    use serde::Serialize;
    use serde_json::to_writer_pretty;
    use stellar_sim::{LifecycleEvent, SimulationSnapshot};

    use super::{ExportError, writer_for_path};

    /// Life-cycle event stamped with the wall-clock time it was observed.
    #[derive(Debug, Clone, PartialEq, Serialize)]
    pub struct RecordedEvent {
        pub elapsed_ms: f64,
        #[serde(flatten)]
        pub event: LifecycleEvent,
    }

    /// Envelope describing a finished run.
    #[derive(Debug, Clone, Serialize)]
    pub struct RunSummary<'a> {
        pub scenario: &'a str,
        pub generated_at: String,
        pub ticks: u64,
        pub simulated_years: f64,
        pub mass_transferred: f64,
        pub events: &'a [RecordedEvent],
        pub final_state: &'a SimulationSnapshot,
    }

    impl<'a> RunSummary<'a> {
        pub fn new(
            scenario: &'a str,
            ticks: u64,
            simulated_years: f64,
            mass_transferred: f64,
            events: &'a [RecordedEvent],
            final_state: &'a SimulationSnapshot,
        ) -> Self {
            Self {
                scenario,
                generated_at: chrono::Utc::now().to_rfc3339(),
                ticks,
                simulated_years,
                mass_transferred,
                events,
                final_state,
            }
        }
    }

    /// Write the summary as pretty JSON to `path` (`-` for stdout).
    pub fn write_summary_json(path: &Path, summary: &RunSummary<'_>) -> Result<(), ExportError> {
        let mut writer = writer_for_path(path)?;
        to_writer_pretty(&mut writer, summary)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}
