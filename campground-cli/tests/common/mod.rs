//! Common test utilities for CLI integration tests.

use std::path::PathBuf;

use assert_cmd::Command;
use tempfile::TempDir;

/// The date passed as `--today` to every command.
pub const TODAY: &str = "2026-06-01";

/// Environment variables that would leak host settings into a test run.
const HOST_VARS: [&str; 7] = [
    "CAMPGROUND_DATA_DIR",
    "CAMPGROUND_BUSY_TIMEOUT",
    "CAMPGROUND_HORIZON_MONTHS",
    "CAMPGROUND_MAXIMUM_LOCK_WAIT_SECONDS",
    "CAMPGROUND_DISABLE_AUTOINIT",
    "CAMPGROUND_OUTPUT_FORMAT",
    "CAMPGROUND_LOG_MODE",
];

/// Test environment with an isolated data directory.
pub struct TestEnv {
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Data directory handed to the binary (created on first use).
    pub data_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let data_dir = temp_dir.path().join("campground-data");
        Self { temp_dir, data_dir }
    }

    /// The binary with host variables cleared and no flags set.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("campground").expect("Failed to find campground binary");
        for var in HOST_VARS {
            cmd.env_remove(var);
        }
        cmd
    }

    /// The binary with `--data-dir` and `--today` set.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--data-dir")
            .arg(&self.data_dir)
            .arg("--today")
            .arg(TODAY);
        cmd
    }

    /// Run `args` expecting success and return trimmed stdout.
    pub fn run(&self, args: &[&str]) -> String {
        let output = self.command().args(args).assert().success();
        String::from_utf8(output.get_output().stdout.clone())
            .expect("stdout is not UTF-8")
            .trim()
            .to_string()
    }

    /// Run `args` with `--format json` and parse stdout.
    pub fn run_json(&self, args: &[&str]) -> serde_json::Value {
        let output = self
            .command()
            .args(["--format", "json"])
            .args(args)
            .assert()
            .success();
        serde_json::from_slice(&output.get_output().stdout).expect("stdout is not JSON")
    }

    /// Add a facility and return its id.
    pub fn facility(&self, name: &str) -> String {
        self.run(&["facility", "add", "--name", name])
    }

    /// Add a campsite on loop "A" and return its id.
    pub fn campsite(&self, facility: &str, name: &str, capacity: u32) -> String {
        self.run(&[
            "campsite",
            "add",
            "--facility",
            facility,
            "--loop",
            "A",
            "--name",
            name,
            "--capacity",
            &capacity.to_string(),
        ])
    }

    /// Book `[check_in, check_out]` and return the reservation id.
    pub fn book(&self, user: &str, campsite: &str, check_in: &str, check_out: &str) -> String {
        self.run(&[
            "reservation",
            "add",
            "--user",
            user,
            "--campsite",
            campsite,
            "--check-in",
            check_in,
            "--check-out",
            check_out,
        ])
    }
}
