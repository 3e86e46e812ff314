//! End-to-end tests for the `batch-copy-agent` binary: exit codes, report
//! output, and tolerance of orchestrator-appended arguments

mod common;

use common::CopyFixture;
use std::process::{Command, Output};

/// Command with a scrubbed environment so host `BATCH_AGENT_*` values and
/// stray `.env` files cannot leak into the run
fn agent_command(fixture: &CopyFixture) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_batch-copy-agent"));
    command.env_clear().current_dir(fixture.output_dir());
    command
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_default_run_tolerates_orchestrator_flags_and_exits_zero() {
    let fixture = CopyFixture::new();
    fixture.write_input("a.txt", "hello");
    fixture.write_input("b.txt", "world");

    let output = agent_command(&fixture)
        .arg("--job_input_path")
        .arg(fixture.input_dir())
        .arg("--job_output_path")
        .arg(fixture.output_dir())
        .args(["--resource_monitor_interval", "0"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("completed: 2 copied (10 bytes), 0 failed"));
    assert_eq!(fixture.read_output("a.txt"), b"hello");
    assert_eq!(fixture.read_output("b.txt"), b"world");
}

#[test]
fn test_missing_entry_aborts_with_exit_one() {
    let fixture = CopyFixture::new();
    let present = fixture.write_input("a.txt", "hello");
    let missing = fixture.missing_input("gone.txt");

    let output = agent_command(&fixture)
        .arg("batch")
        .arg("--job_output_path")
        .arg(fixture.output_dir())
        .arg(&present)
        .arg(&missing)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
    let errors = stderr(&output);
    assert!(errors.contains("Missing input"), "stderr: {errors}");
    assert!(errors.contains("gone.txt"), "stderr: {errors}");
    assert!(fixture.output_exists("a.txt"));
    assert!(!fixture.output_exists("gone.txt"));
}

#[test]
fn test_continue_policy_prints_report_then_exits_one() {
    let fixture = CopyFixture::new();
    let missing = fixture.missing_input("gone.txt");
    let present = fixture.write_input("a.txt", "hello");

    let output = agent_command(&fixture)
        .arg("batch")
        .arg("--job_output_path")
        .arg(fixture.output_dir())
        .args(["--failure_policy", "continue"])
        .arg(&missing)
        .arg(&present)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let report = stdout(&output);
    assert!(
        report.contains("completed_with_failures: 1 copied (5 bytes), 1 failed"),
        "stdout: {report}"
    );
    assert!(report.contains("[missing_input]"));
    assert!(stderr(&output).contains("1 of 2 entries failed"));
    assert_eq!(fixture.read_output("a.txt"), b"hello");
}

#[test]
fn test_json_report_lists_copied_entries() {
    let fixture = CopyFixture::new();
    let entry = fixture.write_input("a.txt", "hello");

    let output = agent_command(&fixture)
        .args(["--format", "json", "batch", "--job_output_path"])
        .arg(fixture.output_dir())
        .arg(&entry)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["succeeded"].as_array().map(Vec::len), Some(1));
    assert_eq!(report["bytes_copied"], 5);
}

#[test]
fn test_missing_output_path_is_a_configuration_failure() {
    let fixture = CopyFixture::new();
    fixture.write_input("a.txt", "hello");

    let output = agent_command(&fixture)
        .arg("--job_input_path")
        .arg(fixture.input_dir())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("output_path"));
}

#[cfg(unix)]
#[test]
fn test_non_utf8_file_name_is_copied() {
    use std::ffi::OsStr;
    use std::fs;
    use std::os::unix::ffi::OsStrExt;

    let fixture = CopyFixture::new();
    let name = OsStr::from_bytes(b"caf\xe9.txt");
    let source = fixture.input_dir().join(name);
    fs::write(&source, "latin-1 name").unwrap();

    let output = agent_command(&fixture)
        .arg("batch")
        .arg("--job_output_path")
        .arg(fixture.output_dir())
        .arg(&source)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_eq!(
        fs::read(fixture.output_dir().join(name)).unwrap(),
        b"latin-1 name"
    );
}
