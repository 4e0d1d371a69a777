//! Test environment builder for isolated stampcheck testing.
//!
//! Provides `TestEnv` - a temp project directory holding the fake tools and
//! a `stampcheck.toml`, plus helpers to run both binaries and to pin mtimes.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::{Duration, SystemTime};

use tempfile::TempDir;

use super::fixtures::{FAKE_CHECKER, FAKE_UIC, PROJECT_CONFIG};

pub const STAMP: &str = "build/.App.py.stamp";
pub const DEP_FILE: &str = ".dep-py~";

/// Result of running a CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }

    /// Parse stdout as NDJSON
    pub fn events(&self) -> Vec<serde_json::Value> {
        self.stdout
            .lines()
            .map(|line| {
                serde_json::from_str(line)
                    .unwrap_or_else(|e| panic!("not JSON: {:?} ({})", line, e))
            })
            .collect()
    }
}

/// Isolated project with fake checker and generator scripts
pub struct TestEnv {
    pub project_root: TempDir,
    /// Stands in for the user config directory
    pub config_home: TempDir,
}

impl TestEnv {
    /// Project with the fake tools and the default project config
    pub fn new() -> Self {
        let env = Self::bare();
        env.write("fake-checker.sh", FAKE_CHECKER);
        env.write("fake-uic.sh", FAKE_UIC);
        env.write("stampcheck.toml", PROJECT_CONFIG);
        env
    }

    /// Empty project, no config
    pub fn bare() -> Self {
        Self {
            project_root: tempfile::tempdir().expect("Failed to create project dir"),
            config_home: tempfile::tempdir().expect("Failed to create config home"),
        }
    }

    /// Get path relative to project root
    pub fn path(&self, relative: &str) -> PathBuf {
        self.project_root.path().join(relative)
    }

    /// Write a file to the project directory
    pub fn write(&self, relative: &str, content: &str) {
        let full = self.path(relative);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create directories");
        }
        std::fs::write(&full, content).expect("Failed to write file");
    }

    pub fn read(&self, relative: &str) -> String {
        std::fs::read_to_string(self.path(relative))
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", relative, e))
    }

    pub fn exists(&self, relative: &str) -> bool {
        self.path(relative).exists()
    }

    pub fn remove(&self, relative: &str) {
        std::fs::remove_file(self.path(relative)).expect("Failed to remove file");
    }

    pub fn mtime(&self, relative: &str) -> SystemTime {
        std::fs::metadata(self.path(relative))
            .and_then(|m| m.modified())
            .unwrap_or_else(|e| panic!("Failed to stat {}: {}", relative, e))
    }

    /// Pin a file's mtime to `secs_ago` seconds in the past
    pub fn age(&self, relative: &str, secs_ago: u64) {
        let time = SystemTime::now() - Duration::from_secs(secs_ago);
        std::fs::File::options()
            .write(true)
            .open(self.path(relative))
            .and_then(|f| f.set_modified(time))
            .unwrap_or_else(|e| panic!("Failed to set mtime of {}: {}", relative, e));
    }

    /// Targets the fake checker has been run on, in order
    pub fn checker_calls(&self) -> Vec<String> {
        self.log("checker.log")
    }

    /// Descriptors the fake generator has been run on, in order
    pub fn uic_calls(&self) -> Vec<String> {
        self.log("uic.log")
    }

    fn log(&self, name: &str) -> Vec<String> {
        if !self.exists(name) {
            return Vec::new();
        }
        self.read(name).lines().map(String::from).collect()
    }

    /// Run `stampcheck` from the project root
    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        self.exec(env!("CARGO_BIN_EXE_stampcheck"), args, env_vars)
    }

    /// Run `check-py` from the project root
    pub fn check_py(&self, args: &[&str]) -> TestResult {
        self.exec(env!("CARGO_BIN_EXE_check-py"), args, &[])
    }

    /// `stampcheck check App.py <stamp> <dep-file> . lib`
    pub fn check_app(&self, extra: &[&str]) -> TestResult {
        let mut args = vec!["check", "App.py", STAMP, DEP_FILE, ".", "lib"];
        args.extend_from_slice(extra);
        self.run(&args)
    }

    fn exec(&self, bin: &str, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let mut cmd = Command::new(bin);
        cmd.current_dir(self.project_root.path())
            .args(args)
            .env("STAMPCHECK_CONFIG_HOME", self.config_home.path())
            .env_remove("RUST_LOG")
            .env_remove("STAMPCHECK_DISCOVERY")
            .env_remove("STAMPCHECK_CHECKER")
            .env_remove("STAMPCHECK_GENERATOR")
            .env_remove("STAMPCHECK_VERBOSITY");

        for (key, value) in env_vars {
            cmd.env(key, value);
        }

        let output = cmd.output().expect("Failed to execute binary");
        Self::output_to_result(output)
    }

    fn output_to_result(output: Output) -> TestResult {
        TestResult {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }
}

/// Project with App.py -> MainWindow.py -> widgets/table_model.py
pub fn gui_project() -> TestEnv {
    use super::fixtures::{APP_PY, MAIN_WINDOW_PY, TABLE_MODEL_PY};

    let env = TestEnv::new();
    env.write("App.py", APP_PY);
    env.write("MainWindow.py", MAIN_WINDOW_PY);
    env.write("widgets/__init__.py", "");
    env.write("widgets/table_model.py", TABLE_MODEL_PY);
    env
}

/// Age every source of `gui_project` so only explicit edits count
pub fn settle(env: &TestEnv) {
    for file in GUI_SOURCES {
        if env.exists(file) {
            env.age(file, 200);
        }
    }
}

pub const GUI_SOURCES: &[&str] = &[
    "App.py",
    "MainWindow.py",
    "widgets/__init__.py",
    "widgets/table_model.py",
];

pub fn assert_path_ends_with(path: &Path, suffix: &str) {
    assert!(
        path.to_string_lossy().replace('\\', "/").ends_with(suffix),
        "{} does not end with {}",
        path.display(),
        suffix
    );
}
