use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use stellar_evolution::config::{
    ClockConfig, ScenarioConfig, SecondaryConfig, find_scenario, load_scenarios,
};
use stellar_evolution::core::time::{ms_to_seconds, seconds_to_ms};
use stellar_evolution::export::format::{format_quantity, format_scientific, format_years};
use stellar_evolution::export::summary::{RecordedEvent, RunSummary, write_summary_json};
use stellar_evolution::export::timeline::{TimelineRecorder, write_timeline_csv};
use stellar_evolution::scenario::{build_simulation, frame_interval_ms};
use stellar_evolution::sim::{LifecycleEvent, StarSnapshot, TransferOutcome};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Headless stellar evolution driver (single stars and Roche-lobe binaries)"
)]
struct Cli {
    /// Scenario name from the catalog (case-insensitive)
    #[arg(long)]
    scenario: Option<String>,

    /// Scenario catalog: YAML list, TOML file, or directory of TOML files
    #[arg(long, default_value = "configs/scenarios")]
    catalog: PathBuf,

    /// Primary initial mass in solar masses (overrides the scenario)
    #[arg(long)]
    primary_mass: Option<f64>,

    /// Secondary initial mass in solar masses; enables binary mode
    #[arg(long)]
    secondary_mass: Option<f64>,

    /// Binary separation in AU
    #[arg(long)]
    separation: Option<f64>,

    /// Mass transfer rate in solar masses per million years
    #[arg(long)]
    rate: Option<f64>,

    /// Clock scaling policy
    #[arg(long, value_enum)]
    mode: Option<ClockArg>,

    /// Speed multiplier for manual mode (1e7 years per second at 1.0)
    #[arg(long)]
    speed: Option<f64>,

    /// Frame rate of the simulated playback (Hz)
    #[arg(long)]
    fps: Option<f64>,

    /// Wall-clock seconds of playback to simulate
    #[arg(long, default_value_t = 75.0)]
    seconds: f64,

    /// Scrub to this age (years) before playback starts
    #[arg(long)]
    scrub_age: Option<f64>,

    /// Write the sampled timeline as CSV (`-` for stdout)
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Write a JSON run summary (`-` for stdout)
    #[arg(long)]
    json: Option<PathBuf>,

    /// Keep every Nth frame in the CSV timeline
    #[arg(long, default_value_t = 1)]
    sample_every: usize,
}

#[derive(Copy, Clone, ValueEnum, Debug)]
enum ClockArg {
    Auto,
    Manual,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("stellar_cli=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let scenario = resolve_scenario(&cli)?.validate()?;
    let mut simulation = build_simulation(&scenario);

    if let Some(age) = cli.scrub_age {
        simulation.set_age(age);
        info!(age_years = age, "scrubbed before playback");
    }

    let frame_ms = frame_interval_ms(&scenario);
    let max_frames = (seconds_to_ms(cli.seconds.max(0.0)) / frame_ms).ceil() as u64;
    let mut recorder = TimelineRecorder::new(cli.sample_every);
    let mut events = Vec::new();
    let mut ticks = 0_u64;
    let mut simulated_years = 0.0;
    let mut mass_transferred = 0.0;

    recorder.record(&simulation.snapshot());
    while ticks < max_frames && !simulation.is_settled() {
        let Some(report) = simulation.tick(frame_ms) else {
            break;
        };
        ticks += 1;
        simulated_years += report.dt_years;
        if let Some(TransferOutcome::Transferred(transfer)) = report.transfer {
            mass_transferred += transfer.amount;
            debug!(donor = %transfer.donor, amount = transfer.amount, "mass transferred");
        }
        for event in &report.events {
            print_event(event, simulation.elapsed_ms());
            events.push(RecordedEvent {
                elapsed_ms: simulation.elapsed_ms(),
                event: *event,
            });
        }
        recorder.record(&simulation.snapshot());
    }

    let final_state = simulation.snapshot();
    recorder.record_final(&final_state);

    println!("=== Stellar Evolution ===");
    println!("Scenario       : {}", scenario.name);
    println!(
        "Playback       : {} frames, {} s wall clock, {} simulated",
        ticks,
        format_quantity(ms_to_seconds(simulation.elapsed_ms()), 2),
        format_years(simulated_years)
    );
    print_star(&final_state.primary);
    if let Some(secondary) = &final_state.secondary {
        print_star(secondary);
        println!(
            "Mass transfer  : {} M☉ moved",
            format_quantity(mass_transferred, 4)
        );
    }

    if let Some(path) = &cli.csv {
        write_timeline_csv(path, recorder.rows())?;
    }
    if let Some(path) = &cli.json {
        let summary = RunSummary::new(
            &scenario.name,
            ticks,
            simulated_years,
            mass_transferred,
            &events,
            &final_state,
        );
        write_summary_json(path, &summary)?;
    }

    Ok(())
}

fn resolve_scenario(cli: &Cli) -> anyhow::Result<ScenarioConfig> {
    let mut scenario = match &cli.scenario {
        Some(name) => {
            let catalog = load_scenarios(&cli.catalog)?;
            find_scenario(&catalog, name)?.clone()
        }
        None => ScenarioConfig::single("custom", cli.primary_mass.unwrap_or(1.0)),
    };

    if let Some(mass) = cli.primary_mass {
        scenario.primary_mass = mass;
    }
    if let Some(mass) = cli.secondary_mass {
        let existing = scenario.secondary.take();
        scenario.secondary = Some(SecondaryConfig {
            mass,
            separation_au: existing.as_ref().map(|s| s.separation_au).unwrap_or(1.0),
            transfer_rate_per_myr: existing.map(|s| s.transfer_rate_per_myr).unwrap_or(0.05),
        });
    }
    if let Some(secondary) = scenario.secondary.as_mut() {
        if let Some(separation) = cli.separation {
            secondary.separation_au = separation;
        }
        if let Some(rate) = cli.rate {
            secondary.transfer_rate_per_myr = rate;
        }
    } else if cli.separation.is_some() || cli.rate.is_some() {
        anyhow::bail!("--separation and --rate need a secondary star (--secondary-mass)");
    }

    match (cli.mode, cli.speed) {
        (Some(ClockArg::Auto), _) => scenario.clock = ClockConfig::Auto,
        (Some(ClockArg::Manual), speed) => {
            scenario.clock = ClockConfig::Manual {
                speed_multiplier: speed.unwrap_or(1.0),
            }
        }
        (None, Some(speed)) => scenario.clock = ClockConfig::Manual {
            speed_multiplier: speed,
        },
        (None, None) => {}
    }
    if let Some(fps) = cli.fps {
        scenario.frame_rate_hz = fps;
    }

    Ok(scenario)
}

fn print_event(event: &LifecycleEvent, elapsed_ms: f64) {
    match event {
        LifecycleEvent::EndOfLife {
            star,
            fate,
            supernova,
        } => {
            let suffix = if *supernova { " (supernova)" } else { "" };
            println!(
                "[{} s] {} star ended as a {}{}",
                format_quantity(ms_to_seconds(elapsed_ms), 2),
                star,
                fate,
                suffix
            );
        }
    }
}

fn print_star(star: &StarSnapshot) {
    println!(
        "{:<15}: {} | M = {} M☉ (initial {}) | age = {} of {} ({}%)",
        capitalize(&star.id.to_string()),
        star.stage,
        format_quantity(star.mass, 3),
        format_quantity(star.initial_mass, 3),
        format_years(star.age_years),
        format_years(star.total_years),
        format_quantity(star.life_fraction * 100.0, 1),
    );
    println!(
        "{:<15}: L = {} L☉, R = {} R☉, T = {} K",
        "",
        format_scientific(star.luminosity, 3),
        format_quantity(star.radius, 3),
        format_quantity(star.temperature_k, 0),
    );
    if let Some(radius) = star.compact_radius {
        println!(
            "{:<15}: {} remnant, R = {} R☉",
            "",
            star.fate,
            format_scientific(radius, 3)
        );
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
