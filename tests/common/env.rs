//! Isolated environment for running the `batchship` binary.

use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

use super::fixtures::{write, write_project, SAMPLE_CONFIG};

/// Result of running the binary
#[derive(Debug)]
pub struct TestResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }

    /// stdout parsed as NDJSON
    pub fn json_lines(&self) -> Vec<serde_json::Value> {
        self.stdout
            .lines()
            .filter(|l| l.starts_with('{'))
            .map(|l| serde_json::from_str(l).expect("stdout line is JSON"))
            .collect()
    }
}

/// A project directory plus an empty HOME, both removed on drop
pub struct TestEnv {
    pub project: TempDir,
    pub home: TempDir,
}

impl TestEnv {
    /// Sample project (without `test_env.tar.gz`) and `batchship.toml`
    pub fn new() -> Self {
        Self::with_config(SAMPLE_CONFIG)
    }

    pub fn with_config(config: &str) -> Self {
        let env = Self {
            project: tempfile::tempdir().expect("project tempdir"),
            home: tempfile::tempdir().expect("home tempdir"),
        };
        write_project(env.project.path());
        env.write_file("batchship.toml", config);
        env
    }

    pub fn root(&self) -> &Path {
        self.project.path()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.project.path().join(relative)
    }

    pub fn write_file(&self, relative: &str, content: &str) {
        write(self.project.path(), relative, content);
    }

    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    pub fn run_with_env(&self, args: &[&str], vars: &[(&str, &str)]) -> TestResult {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_batchship"));
        cmd.current_dir(self.project.path())
            .args(args)
            .env("HOME", self.home.path())
            .env("BATCHSHIP_NO_COLOR", "1")
            .env("LANG", "C")
            .env_remove("BATCHSHIP_LOG")
            .env_remove("BATCHSHIP_TARGET")
            .env_remove("BATCHSHIP_REMOTE_BASE")
            .env_remove("BATCHSHIP_PROJECT_ROOT")
            .env_remove("BATCHSHIP_CONNECT_TIMEOUT")
            .env_remove("BATCHSHIP_VERIFY_MODE")
            .env_remove("BATCHSHIP_TEST_BACKUP_PASSWORD")
            .env_remove("GITHUB_ACTIONS");

        for (key, value) in vars {
            cmd.env(key, value);
        }

        let output = cmd.output().expect("failed to execute batchship");
        TestResult {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }
}
