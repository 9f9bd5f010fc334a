use std::fs;

use stellar_evolution::config::{
    ClockConfig, ConfigError, ScenarioConfig, SecondaryConfig, find_scenario, load_scenarios,
};
use stellar_evolution::scenario::{
    build_simulation, clock_mode, frame_interval_ms, load_simulation, settings_from_config,
};
use stellar_evolution::sim::{ClockMode, SimulationSettings, TimeIntegrator};

const CATALOG: &str = "configs/scenarios";

#[test]
fn bundled_catalog_loads_in_file_order() {
    let scenarios = load_scenarios(CATALOG).expect("scenario catalog");
    let names: Vec<_> = scenarios.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["sun", "supernova", "black-hole", "algol"]);

    let algol = find_scenario(&scenarios, "ALGOL").expect("case-insensitive lookup");
    let secondary = algol.secondary.as_ref().expect("binary scenario");
    assert_eq!(secondary.mass, 0.8);
    assert_eq!(secondary.separation_au, 0.012);
    assert_eq!(algol.frame_rate_hz, 30.0);

    let black_hole = find_scenario(&scenarios, "black-hole").unwrap();
    assert_eq!(
        black_hole.clock,
        ClockConfig::Manual {
            speed_multiplier: 0.05
        }
    );
    assert_eq!(black_hole.collapse_duration_ms, 2_000.0);
}

#[test]
fn unknown_scenario_is_reported_by_name() {
    let scenarios = load_scenarios(CATALOG).unwrap();
    match find_scenario(&scenarios, "betelgeuse") {
        Err(ConfigError::NotFound(name)) => assert_eq!(name, "betelgeuse"),
        other => panic!("expected NotFound, got {other:?}"),
    }
    assert!(matches!(
        find_scenario(&[], "sun"),
        Err(ConfigError::EmptyCatalog)
    ));
}

#[test]
fn yaml_catalog_is_parsed_and_clamped() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.yaml");
    fs::write(
        &path,
        r#"
- name: tiny
  primary_mass: 0.01
- name: wide
  primary_mass: 2.0
  frame_rate_hz: 1000
  secondary:
    mass: 90.0
    separation_au: 40.0
    transfer_rate_per_myr: 3.0
  clock:
    mode: manual
    speed_multiplier: -1.0
"#,
    )
    .unwrap();

    let scenarios = load_scenarios(&path).expect("yaml catalog");
    assert_eq!(scenarios.len(), 2);
    assert_eq!(scenarios[0].primary_mass, 0.1);
    assert_eq!(scenarios[0].clock, ClockConfig::Auto);
    assert_eq!(scenarios[0].frame_rate_hz, 60.0);

    let wide = &scenarios[1];
    assert_eq!(wide.frame_rate_hz, 240.0);
    let secondary = wide.secondary.as_ref().unwrap();
    assert_eq!(secondary.mass, 50.0);
    assert_eq!(secondary.separation_au, 10.0);
    assert_eq!(secondary.transfer_rate_per_myr, 0.2);
    assert_eq!(
        wide.clock,
        ClockConfig::Manual {
            speed_multiplier: 0.0
        }
    );
}

#[test]
fn single_toml_file_is_one_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vega.toml");
    fs::write(&path, "name = \"vega\"\nprimary_mass = 2.1\n").unwrap();

    let scenarios = load_scenarios(&path).expect("toml scenario");
    assert_eq!(scenarios.len(), 1);
    assert_eq!(scenarios[0].name, "vega");
    assert!(scenarios[0].secondary.is_none());
}

#[test]
fn non_finite_values_are_rejected() {
    let mut scenario = ScenarioConfig::single("broken", f64::NAN);
    match scenario.clone().validate() {
        Err(ConfigError::Invalid { scenario, field }) => {
            assert_eq!(scenario, "broken");
            assert_eq!(field, "primary_mass");
        }
        other => panic!("expected Invalid, got {other:?}"),
    }

    scenario.primary_mass = 1.0;
    scenario.secondary = Some(SecondaryConfig {
        mass: 1.0,
        separation_au: f64::INFINITY,
        transfer_rate_per_myr: 0.1,
    });
    assert!(matches!(
        scenario.validate(),
        Err(ConfigError::Invalid {
            field: "secondary.separation_au",
            ..
        })
    ));
}

#[test]
fn malformed_files_surface_parse_errors() {
    let dir = tempfile::tempdir().unwrap();
    let toml = dir.path().join("bad.toml");
    fs::write(&toml, "name = \n").unwrap();
    assert!(matches!(load_scenarios(&toml), Err(ConfigError::Toml(_))));

    let yaml = dir.path().join("bad.yaml");
    fs::write(&yaml, "- name: [unclosed\n").unwrap();
    assert!(matches!(load_scenarios(&yaml), Err(ConfigError::Parse(_))));

    assert!(matches!(
        load_scenarios(dir.path().join("missing.yaml")),
        Err(ConfigError::Io(_))
    ));
}

#[test]
fn settings_enable_binary_only_with_a_secondary() {
    let sun = ScenarioConfig::single("sun", 1.0);
    let settings = settings_from_config(&sun);
    assert!(!settings.binary_enabled);
    assert_eq!(settings.primary_mass, 1.0);
    assert_eq!(settings.clock, ClockMode::Auto);

    let mut algol = sun.clone();
    algol.secondary = Some(SecondaryConfig {
        mass: 0.8,
        separation_au: 0.012,
        transfer_rate_per_myr: 0.2,
    });
    algol.clock = ClockConfig::Manual {
        speed_multiplier: 3.0,
    };
    let settings = settings_from_config(&algol);
    assert!(settings.binary_enabled);
    assert_eq!(settings.secondary_mass, 0.8);
    assert!((settings.transfer_rate_per_year - 2.0e-7).abs() < 1e-20);
    assert_eq!(
        settings.clock,
        ClockMode::Manual {
            speed_multiplier: 3.0
        }
    );
    assert_eq!(clock_mode(ClockConfig::Auto), ClockMode::Auto);

    let simulation = build_simulation(&algol);
    assert!(simulation.is_binary());
    assert_eq!(simulation.binary().separation_au(), 0.012);
}

#[test]
fn frame_interval_follows_frame_rate() {
    let mut scenario = ScenarioConfig::single("sun", 1.0);
    assert!((frame_interval_ms(&scenario) - 16.666_666_666_666_668).abs() < 1e-9);
    scenario.frame_rate_hz = 30.0;
    assert!((frame_interval_ms(&scenario) - 33.333_333_333_333_336).abs() < 1e-9);
}

#[test]
fn catalog_scenario_builds_a_ready_simulation() {
    let (scenario, simulation) = load_simulation(CATALOG, "supernova").expect("supernova");
    assert_eq!(scenario.primary_mass, 12.0);
    assert!(!simulation.is_binary());
    assert!(simulation.primary().is_supernova_progenitor());
    assert_eq!(simulation.primary().age(), 0.0);
}

#[test]
fn scenario_and_engine_share_the_collapse_default() {
    let scenario = ScenarioConfig::single("sun", 1.0);
    assert_eq!(
        scenario.collapse_duration_ms,
        TimeIntegrator::default().collapse_duration_ms()
    );
    assert_eq!(
        settings_from_config(&scenario).collapse_duration_ms,
        SimulationSettings::default().collapse_duration_ms
    );
}
