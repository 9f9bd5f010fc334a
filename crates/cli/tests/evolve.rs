use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;

fn catalog() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../configs/scenarios")
}

fn evolve() -> Command {
    let mut cmd = Command::cargo_bin("evolve").expect("evolve bin");
    cmd.arg("--catalog").arg(catalog());
    cmd
}

#[test]
fn sun_scenario_ends_as_white_dwarf() {
    evolve()
        .args(["--scenario", "sun"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Stellar Evolution ==="))
        .stdout(predicate::str::contains("Scenario       : sun"))
        .stdout(predicate::str::contains("primary star ended as a White Dwarf"))
        .stdout(predicate::str::contains("(supernova)").not());
}

#[test]
fn massive_star_reports_supernova() {
    evolve()
        .args(["--scenario", "Supernova"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "primary star ended as a Neutron Star (supernova)",
        ));
}

#[test]
fn short_playback_stops_before_end_of_life() {
    evolve()
        .args(["--primary-mass", "1.0", "--seconds", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Scenario       : custom"))
        .stdout(predicate::str::contains("ended as").not());
}

#[test]
fn binary_run_writes_timeline_and_summary() {
    let dir = tempfile::tempdir().expect("tempdir");
    let csv_path = dir.path().join("timeline.csv");
    let json_path = dir.path().join("summary.json");

    evolve()
        .args([
            "--primary-mass",
            "1.2",
            "--secondary-mass",
            "0.8",
            "--separation",
            "0.012",
            "--rate",
            "0.2",
            "--seconds",
            "2",
            "--sample-every",
            "10",
            "--csv",
            csv_path.to_str().unwrap(),
            "--json",
            json_path.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Mass transfer  :"));

    let csv = fs::read_to_string(&csv_path).expect("csv output");
    assert!(csv.starts_with("elapsed_ms,star,"));
    assert!(csv.contains(",secondary,"));

    let summary: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json_path).expect("json output"))
            .expect("valid json");
    assert_eq!(summary["scenario"], "custom");
    assert!(summary["mass_transferred"].as_f64().unwrap() > 0.0);
    assert!(summary["final_state"]["secondary"].is_object());
    assert!(summary["final_state"]["geometry"]["separation_au"].is_number());
}

#[test]
fn separation_without_secondary_is_rejected() {
    evolve()
        .args(["--primary-mass", "2.0", "--separation", "0.5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("need a secondary star"));
}

#[test]
fn unknown_scenario_fails() {
    evolve()
        .args(["--scenario", "betelgeuse"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("'betelgeuse' not found"));
}
