// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CLI integration tests.
//!
//! These tests run the actual sonarcodec binary and verify its behavior.

mod common;

use std::{
    fs,
    path::PathBuf,
    process::{Command, Output},
};

use common::*;
use sonarcodec::WireOrder;

/// Get the path to the built sonarcodec binary
fn sonarcodec_bin() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    // The test binary is in target/debug/deps/
    // The sonarcodec binary is in target/debug/
    path.pop(); // deps
    path.pop(); // debug or release
    path.push("sonarcodec");
    path
}

/// Run sonarcodec with arguments
fn run(args: &[&str]) -> Output {
    let bin = sonarcodec_bin();
    Command::new(&bin)
        .args(args)
        .output()
        .unwrap_or_else(|_| panic!("Failed to run {:?}", bin))
}

/// Run sonarcodec and assert success
fn run_ok(args: &[&str]) -> String {
    let output = run(args);
    assert!(
        output.status.success(),
        "Command failed: {:?}\nstdout: {}\nstderr: {}",
        args,
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Run sonarcodec and assert failure
fn run_err(args: &[&str]) -> String {
    let output = run(args);
    assert!(
        !output.status.success(),
        "Command should have failed but succeeded: {:?}",
        args
    );
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn path_str(path: &std::path::Path) -> &str {
    path.to_str().unwrap()
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_cli_help() {
    let output = run_ok(&["--help"]);
    assert!(output.contains("XSE multibeam and sidescan"));
    assert!(output.contains("info"));
    assert!(output.contains("dump"));
    assert!(output.contains("copy"));
    assert!(output.contains("comment"));
    assert!(output.contains("--swapped"));
}

#[test]
fn test_cli_version() {
    let output = run_ok(&["--version"]);
    assert!(output.contains("sonarcodec"));
}

#[test]
fn test_cli_missing_file() {
    let stderr = run_err(&["info", "/nonexistent/dir/line.xse"]);
    assert!(stderr.starts_with("Error:"));
}

// ============================================================================
// Commands
// ============================================================================

#[test]
fn test_cli_comment_then_dump() {
    let (path, _guard) = temp_path("cli_comments.xse");
    let file = path_str(&path);

    let output = run_ok(&["comment", file, "first note", "second note"]);
    assert!(output.contains("Wrote 2 comments"));

    let dump = run_ok(&["dump", file]);
    let lines: Vec<&str> = dump.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("comment"));
    assert!(lines[0].contains("\"first note\""));
    assert!(lines[1].contains("\"second note\""));
}

#[test]
fn test_cli_dump_json_with_limit() {
    let (path, _guard) = temp_path("cli_dump.xse");
    write_file(&path, &sample_line(), WireOrder::Native);

    let dump = run_ok(&["dump", path_str(&path), "--json", "--limit", "3"]);
    let values: Vec<serde_json::Value> = dump
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(values.len(), 3);
    assert_eq!(values[0]["kind"], "velocity-profile");
    assert_eq!(values[1]["kind"], "nav");
    assert_eq!(values[2]["kind"], "data");
    assert_eq!(values[2]["ping"], 1);
    assert_eq!(values[2]["beams"], 3);
}

#[test]
fn test_cli_info() {
    let (path, _guard) = temp_path("cli_info.xse");
    write_file(&path, &sample_line(), WireOrder::Native);

    let output = run_ok(&["info", path_str(&path)]);
    assert!(output.contains("Format: xse"));
    assert!(output.contains("Records: 6"));
    assert!(output.contains("data: 2"));
    assert!(output.contains("nav: 2"));
    assert!(output.contains("Pings: 2"));
    assert!(output.contains("First ping: 2021-01-01 00:00:02.000 UTC"));
    assert!(output.contains("Last ping: 2021-01-01 00:00:04.000 UTC"));
    assert!(output.contains("Max beams: 3"));
    assert!(output.contains("Max sidescan samples: 6"));
}

#[test]
fn test_cli_copy_swapped() {
    let (input, _in_guard) = temp_path("cli_copy_in.xse");
    let (output, _out_guard) = temp_path("cli_copy_out.xse");
    write_file(&input, &sample_line(), WireOrder::Swapped);

    let stdout = run_ok(&["--swapped", "copy", path_str(&input), path_str(&output)]);
    assert!(stdout.contains("Copied 6 records"));
    assert_eq!(fs::read(&input).unwrap(), fs::read(&output).unwrap());

    // native order finds no frames in a swapped file
    let info = run_ok(&["info", path_str(&output)]);
    assert!(info.contains("Records: 0"));
}

#[test]
fn test_cli_config_file() {
    let (config, _guard) = temp_path("session.toml");
    fs::write(&config, "wire_order = \"swapped\"\nlonflip = 1\n").unwrap();
    let (path, _file_guard) = temp_path("cli_config.xse");
    write_file(&path, &[comment_record(BASE_TIME, "le")], WireOrder::Swapped);

    let dump = run_ok(&["--config", path_str(&config), "dump", path_str(&path)]);
    assert!(dump.contains("\"le\""));

    fs::write(&config, "lonflip = 5\n").unwrap();
    let stderr = run_err(&["--config", path_str(&config), "dump", path_str(&path)]);
    assert!(stderr.contains("lonflip"));
}
