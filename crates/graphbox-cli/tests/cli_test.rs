use assert_cmd::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

fn repo_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("expected crates/<name> layout")
        .to_path_buf()
}

fn fixture() -> PathBuf {
    let path = repo_root().join("fixtures").join("triangle.graphml");
    assert!(path.exists(), "fixture missing: {}", path.display());
    path
}

fn stats_of(stdout: &[u8]) -> serde_json::Value {
    serde_json::from_slice(stdout).expect("stats output is JSON")
}

#[test]
fn cli_prints_stats_for_file_input() {
    let exe = assert_cmd::cargo_bin!("graphbox-cli");
    let output = Command::new(exe)
        .args(["stats", fixture().to_string_lossy().as_ref()])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let stats = stats_of(&output);
    assert_eq!(stats["knots"], 3);
    assert_eq!(stats["edges"], 3);
    assert_eq!(stats["halfEdges"], 2);
    assert_eq!(stats["directed"], false);
    assert_eq!(stats["names"], serde_json::json!(["A", "B", "C"]));
}

#[test]
fn cli_reads_stdin_and_applies_flags() {
    let text = fs::read_to_string(fixture()).expect("read fixture");
    let exe = assert_cmd::cargo_bin!("graphbox-cli");
    let output = assert_cmd::Command::new(exe)
        .args(["--directed", "--weighted", "-"])
        .write_stdin(text)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let stats = stats_of(&output);
    assert_eq!(stats["directed"], true);
    assert_eq!(stats["weighted"], true);
}

#[test]
fn cli_normalize_output_is_stable() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let first = tmp.path().join("first.graphml");
    let second = tmp.path().join("second.graphml");

    let exe = assert_cmd::cargo_bin!("graphbox-cli");
    Command::new(exe)
        .args([
            "normalize",
            "--out",
            first.to_string_lossy().as_ref(),
            fixture().to_string_lossy().as_ref(),
        ])
        .assert()
        .success();
    Command::new(exe)
        .args([
            "normalize",
            "--out",
            second.to_string_lossy().as_ref(),
            first.to_string_lossy().as_ref(),
        ])
        .assert()
        .success();

    let a = fs::read_to_string(&first).expect("read first");
    let b = fs::read_to_string(&second).expect("read second");
    assert!(a.contains("halfEdge"));
    assert_eq!(a, b);
}

#[test]
fn cli_renders_svg() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let out = tmp.path().join("out.svg");

    let exe = assert_cmd::cargo_bin!("graphbox-cli");
    Command::new(exe)
        .args([
            "render",
            "--no-background",
            "--width",
            "400",
            "--height",
            "300",
            "--out",
            out.to_string_lossy().as_ref(),
            fixture().to_string_lossy().as_ref(),
        ])
        .assert()
        .success();

    let svg = fs::read_to_string(&out).expect("read svg");
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains(r#"viewBox="0 0 400 300""#));
    assert!(!svg.contains("<rect"));
    assert!(svg.contains(">far<"));
}

#[test]
fn cli_reports_usage_and_input_errors() {
    let exe = assert_cmd::cargo_bin!("graphbox-cli");
    Command::new(exe).arg("--bogus").assert().code(2);

    let tmp = tempfile::tempdir().expect("tempdir");
    let broken = tmp.path().join("broken.graphml");
    fs::write(&broken, "<graphml><graph>").expect("write broken");
    Command::new(exe)
        .arg(broken.to_string_lossy().as_ref())
        .assert()
        .code(1);

    let config = tmp.path().join("options.json");
    fs::write(&config, r#"{ "knotRadius": 0 }"#).expect("write config");
    Command::new(exe)
        .args([
            "--config",
            config.to_string_lossy().as_ref(),
            fixture().to_string_lossy().as_ref(),
        ])
        .assert()
        .code(1);
}
