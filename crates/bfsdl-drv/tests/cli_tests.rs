//! CLI end-to-end tests for the `bfsdl` binary.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

fn bfsdl() -> Command {
    Command::cargo_bin("bfsdl").expect("binary builds")
}

fn spec_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(content.as_bytes()).expect("write spec");
    file
}

#[test]
fn test_help() {
    bfsdl()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: bfsdl"));
}

#[test]
fn test_missing_file_option_is_usage_error() {
    bfsdl()
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--file"));
}

#[test]
fn test_unknown_option_is_usage_error() {
    bfsdl()
        .arg("--frobnicate")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unknown argument"));
}

#[test]
fn test_nonexistent_file_is_usage_error() {
    bfsdl()
        .args(["--file", "/definitely/not/here.bfsdl"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("cannot open"));
}

#[test]
fn test_valid_header_exits_zero() {
    let spec = spec_file(":BFSDL_HEADER::END_HEADER:");
    bfsdl()
        .args(["--file", &spec.path().display().to_string()])
        .assert()
        .success();
}

#[test]
fn test_testing_mode_dumps_tree() {
    let spec = spec_file(":BFSDL_HEADER::Version=#d3::END_HEADER:");
    bfsdl()
        .args(["--file", &spec.path().display().to_string(), "--testing"])
        .assert()
        .success()
        .stdout(predicate::str::contains("PROP Version=3"))
        .stdout(predicate::str::contains("PROP BitBase=8"))
        .stdout(predicate::str::contains("PROP DefaultByteOrder=0"))
        .stdout(predicate::str::contains("PROP DefaultStringCode=ASCII"));
}

#[test]
fn test_parse_error_exits_one_with_diagnostic() {
    let spec = spec_file(":BFSDL_HEADER::Frobnicate=#d1::END_HEADER:");
    bfsdl()
        .args(["--file", &spec.path().display().to_string(), "--testing"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Frobnicate"))
        .stderr(predicate::str::contains("Parse Error: "));
}

#[test]
fn test_diagnostic_cites_file_and_position() {
    let spec = spec_file(":BFSDL_HEADER:\n:Version=#dX:");
    let path = spec.path().display().to_string();
    bfsdl()
        .args(["--file", &path, "--testing"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(format!("Parse Error: {path}@2:13")));
}
