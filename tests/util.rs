#![allow(dead_code)]
use assert_cmd::Command;
use std::io::Write;
use tempfile::NamedTempFile;

pub const NO_ERROR: &str = "";
pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;

pub fn run_script(input: &str, expected: &str, expected_error: &str, expected_code: i32) {
    let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
    write!(temp_file, "{input}").expect("Failed to write to temp file");

    let mut cmd = Command::cargo_bin("rlox").expect("Binary not found");
    cmd.arg(temp_file.path());

    let output = cmd.output().expect("Failed to run binary");

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
    let exit_code = output.status.code().unwrap_or(-1);

    assert_eq!(stdout, expected);
    assert_eq!(stderr, expected_error);
    assert_eq!(exit_code, expected_code);
}

pub fn run_ok(input: &str, expected: &str) {
    run_script(input, expected, NO_ERROR, SUCCESS);
}
