//! CLI tests for `tracegen generate`, `init`, `check`, and `replay`.
//!
//! Spawns the tracegen binary in a temp directory and checks exit codes and
//! the files it leaves behind.

use std::fs;
use std::process::{Command, Output};

use tracegen::io::config::{GeneratorConfig, load_config, write_config};
use tracegen::io::manifest::load_manifest;

fn tracegen(dir: &std::path::Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tracegen"))
        .current_dir(dir)
        .args(args)
        .output()
        .expect("spawn tracegen")
}

#[test]
fn generate_writes_svg_and_reports_seed() {
    let temp = tempfile::tempdir().expect("tempdir");

    let output = tracegen(temp.path(), &["generate", "--seed", "42"]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("wrote output.svg"), "stdout: {stdout}");
    assert!(stdout.contains("seed: 42"), "stdout: {stdout}");
    let svg = fs::read_to_string(temp.path().join("output.svg")).expect("read svg");
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("<polyline"));
}

#[test]
fn same_seed_writes_identical_svg() {
    let temp = tempfile::tempdir().expect("tempdir");

    for name in ["a.svg", "b.svg"] {
        let output = tracegen(temp.path(), &["generate", "--seed", "7", "--out", name]);
        assert_eq!(output.status.code(), Some(0));
    }

    let a = fs::read_to_string(temp.path().join("a.svg")).expect("read a");
    let b = fs::read_to_string(temp.path().join("b.svg")).expect("read b");
    assert_eq!(a, b);
}

#[test]
fn generate_manifest_then_replay_succeeds() {
    let temp = tempfile::tempdir().expect("tempdir");

    let output = tracegen(
        temp.path(),
        &["generate", "--seed", "314", "--manifest", "drawing.json"],
    );
    assert_eq!(output.status.code(), Some(0));

    let manifest = load_manifest(&temp.path().join("drawing.json")).expect("load manifest");
    assert_eq!(manifest.seed, 314);
    assert_eq!(manifest.lines[0].kind, "trunk");

    let output = tracegen(temp.path(), &["replay", "drawing.json"]);
    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn replay_detects_tampered_manifest() {
    let temp = tempfile::tempdir().expect("tempdir");
    let output = tracegen(
        temp.path(),
        &["generate", "--seed", "5", "--manifest", "drawing.json"],
    );
    assert_eq!(output.status.code(), Some(0));

    let path = temp.path().join("drawing.json");
    let mut manifest = load_manifest(&path).expect("load manifest");
    manifest.seed = 6;
    let mut raw = serde_json::to_string_pretty(&manifest).expect("serialize");
    raw.push('\n');
    fs::write(&path, raw).expect("write manifest");

    let output = tracegen(temp.path(), &["replay", "drawing.json"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("diverges"));
}

#[test]
fn config_seed_is_used_without_flag() {
    let temp = tempfile::tempdir().expect("tempdir");
    let cfg = GeneratorConfig {
        seed: Some(1234),
        ..GeneratorConfig::default()
    };
    write_config(&temp.path().join("tracegen.toml"), &cfg).expect("write config");

    let output = tracegen(temp.path(), &["generate"]);

    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("seed: 1234"));
}

#[test]
fn invalid_config_exits_with_error() {
    let temp = tempfile::tempdir().expect("tempdir");
    fs::write(
        temp.path().join("tracegen.toml"),
        "[growth]\np_branch = 0.8\np_orth = 0.5\n",
    )
    .expect("write config");

    let output = tracegen(temp.path(), &["generate"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("must not exceed 1"), "stderr: {stderr}");
    assert!(!temp.path().join("output.svg").exists());
}

#[test]
fn init_writes_defaults_and_refuses_overwrite() {
    let temp = tempfile::tempdir().expect("tempdir");

    let output = tracegen(temp.path(), &["init"]);
    assert_eq!(output.status.code(), Some(0));
    let cfg = load_config(&temp.path().join("tracegen.toml")).expect("load");
    assert_eq!(cfg, GeneratorConfig::default());

    let output = tracegen(temp.path(), &["init"]);
    assert_eq!(output.status.code(), Some(1));

    let output = tracegen(temp.path(), &["init", "--force"]);
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn check_reports_valid_and_invalid_configs() {
    let temp = tempfile::tempdir().expect("tempdir");

    let output = tracegen(temp.path(), &["check"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("600x600"));

    fs::write(temp.path().join("bad.toml"), "[canvas]\nstep = 0\n").expect("write");
    let output = tracegen(temp.path(), &["check", "--config", "bad.toml"]);
    assert_eq!(output.status.code(), Some(1));
}
