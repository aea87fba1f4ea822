//! Integration tests for the coinburst binary

use std::path::PathBuf;
use std::process::{Command, Output};

fn scratch_config(name: &str) -> PathBuf {
    std::env::temp_dir()
        .join(format!("coinburst-cli-{}-{}", std::process::id(), name))
        .join("config.toml")
}

fn run(args: &[&str]) -> Output {
    Command::new("cargo")
        .args(["run", "--quiet", "--"])
        .args(args)
        .output()
        .expect("Failed to execute command")
}

#[test]
fn test_help_command() {
    let output = run(&["--help"]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Bezier"));
    assert!(stdout.contains("--amount"));
    assert!(stdout.contains("--increment"));
    assert!(stdout.contains("--max-coins"));
    assert!(stdout.contains("--headless"));
    assert!(stdout.contains("--plan"));
    assert!(stdout.contains("--config"));
}

#[test]
fn test_version_command() {
    let output = run(&["--version"]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("coinburst"));
    assert!(stdout.contains("0.1.0"));
}

#[test]
fn test_plan_prints_trajectories() {
    let config = scratch_config("plan");
    let output = run(&[
        "--config",
        config.to_str().unwrap(),
        "--plan",
        "--seed",
        "7",
        "--amount",
        "100",
        "--increment",
        "25",
    ]);
    assert!(output.status.success());

    let plan: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let units = plan.as_array().unwrap();
    assert_eq!(units.len(), 4);

    for (index, unit) in units.iter().enumerate() {
        assert_eq!(unit["index"], index);
        assert_eq!(unit["quantity"], 25);
        let duration = unit["duration_ms"].as_f64().unwrap();
        assert!((600.0..=1000.0).contains(&duration));
        assert_eq!(unit["control_points"].as_array().unwrap().len(), 2);
    }

    let _ = std::fs::remove_dir_all(config.parent().unwrap());
}

#[test]
fn test_plan_is_reproducible_with_seed() {
    let config = scratch_config("seeded");
    let args = [
        "--config",
        config.to_str().unwrap(),
        "--plan",
        "--seed",
        "42",
        "--amount",
        "90",
        "--increment",
        "20",
    ];

    let first = run(&args);
    let second = run(&args);
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);

    let _ = std::fs::remove_dir_all(config.parent().unwrap());
}

#[test]
fn test_headless_run_collects_everything() {
    let config = scratch_config("headless");
    let output = run(&[
        "--config",
        config.to_str().unwrap(),
        "--headless",
        "--seed",
        "3",
        "--amount",
        "60",
        "--increment",
        "20",
    ]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("collecting 60 in 3 coins (balance 0)"));
    assert_eq!(stdout.matches(" landed +20 ").count(), 3);
    assert!(stdout.contains("batch complete: collected 60 in 3 coins, balance 60"));

    let _ = std::fs::remove_dir_all(config.parent().unwrap());
}

#[test]
fn test_headless_empty_batch() {
    let config = scratch_config("empty");
    let output = run(&[
        "--config",
        config.to_str().unwrap(),
        "--headless",
        "--amount",
        "0",
    ]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("collecting 0 in 0 coins"));
    assert!(stdout.contains("batch complete: collected 0 in 0 coins"));

    let _ = std::fs::remove_dir_all(config.parent().unwrap());
}

#[test]
fn test_bad_config_is_reported() {
    let config = scratch_config("broken");
    std::fs::create_dir_all(config.parent().unwrap()).unwrap();
    std::fs::write(&config, "[ui]\nfps = 0\n").unwrap();

    let output = run(&["--config", config.to_str().unwrap(), "--headless"]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ui.fps"));

    let _ = std::fs::remove_dir_all(config.parent().unwrap());
}
