//! End-to-end runs of the `ms_cli` binary.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

const VARS: [&str; 6] = [
    "SHUFFLE_PLAYERS_FILE",
    "SHUFFLE_ROUNDS",
    "SHUFFLE_BEST_OF",
    "SHUFFLE_FIRST_TO",
    "SHUFFLE_SEED",
    "SHUFFLE_OPPONENTS_AS_PARTNERS",
];

fn players_file(test: &str, names: &[&str]) -> PathBuf {
    let path = std::env::temp_dir().join(format!("ms_cli_{}_{}.txt", test, std::process::id()));
    std::fs::write(&path, names.join("\n")).unwrap();
    path
}

fn run_cli(args: &[&str], stdin: &str) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_ms_cli"));
    for var in VARS {
        command.env_remove(var);
    }
    let mut child = command
        .args(args)
        .env("RUST_LOG", "off")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();

    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

#[test]
fn test_help() {
    let output = run_cli(&["--help"], "");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--players"));
    assert!(stdout.contains("--best-of"));
}

#[test]
fn test_missing_players_file_fails() {
    let output = run_cli(&[], "");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("SHUFFLE_PLAYERS_FILE"));
}

#[test]
fn test_odd_roster_rejected() {
    let path = players_file("odd", &["Ann", "Bo", "Cy", "Di", "Ed"]);
    let output = run_cli(&["--players", path.to_str().unwrap(), "--rounds", "1"], "");
    let _ = std::fs::remove_file(&path);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to set up tournament"));
}

#[test]
fn test_two_rounds_table() {
    let path = players_file("table", &["Ann", "Bo", "Cy", "Di"]);
    let output = run_cli(
        &["--players", path.to_str().unwrap(), "--rounds", "2", "--first-to", "11"],
        "11-4\n6-11\n",
    );
    let _ = std::fs::remove_file(&path);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Round 1"));
    assert!(stdout.contains("Court 1: Ann/Di vs Bo/Cy"));
    assert!(stdout.contains("Round 2"));
    assert!(stdout.contains("Grand Finals Participants"));
    assert!(stdout.contains("Final Standings"));
}

#[test]
fn test_json_standings() {
    let path = players_file("json", &["Ann", "Bo", "Cy", "Di", "Ed", "Flo"]);
    let output = run_cli(
        &[
            "--players",
            path.to_str().unwrap(),
            "--rounds",
            "1",
            "--best-of",
            "5",
            "--seed",
            "7",
            "--json",
        ],
        "3-1\n",
    );
    let _ = std::fs::remove_file(&path);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let start = stdout.find("{\n").unwrap();
    let snapshot: serde_json::Value = serde_json::from_str(&stdout[start..]).unwrap();

    assert_eq!(snapshot["rounds_played"], 1);
    let standings = snapshot["standings"].as_array().unwrap();
    assert_eq!(standings.len(), 6);

    let byes: u64 = standings
        .iter()
        .map(|s| s["bye_count"].as_u64().unwrap())
        .sum();
    assert_eq!(byes, 2);

    // Bye players are credited a full win
    for standing in standings {
        if standing["bye_count"] == 1 {
            assert_eq!(standing["points"], 1);
            assert_eq!(standing["game_count"], 3);
        }
    }
}
