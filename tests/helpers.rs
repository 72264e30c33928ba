//! Shared test utilities for magisk-builder tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use magisk_builder::config::Config;
use magisk_builder::process::{Cmd, OutputMode, ToolRunner};
use magisk_builder::status::Reporter;
use tempfile::TempDir;

/// Scratch tree shaped like a real checkout:
///
/// ```text
/// <temp>/module/   Gradle project (working directory)
/// <temp>/out/      compiled app (created on demand)
/// <temp>/bin/      mock tools
/// ```
pub struct TestEnv {
    /// Temporary directory (kept alive for lifetime of TestEnv)
    pub _temp_dir: TempDir,
    pub project_dir: PathBuf,
    pub out_dir: PathBuf,
    pub bin_dir: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let base = temp_dir
            .path()
            .canonicalize()
            .expect("Failed to canonicalize temp dir");

        let project_dir = base.join("module");
        let bin_dir = base.join("bin");
        fs::create_dir_all(&project_dir).expect("Failed to create project dir");
        fs::create_dir_all(&bin_dir).expect("Failed to create bin dir");

        Self {
            _temp_dir: temp_dir,
            project_dir,
            out_dir: base.join("out"),
            bin_dir,
        }
    }

    /// Config with defaults, Gradle invoked by bare name.
    pub fn config(&self) -> Config {
        Config::from_vars(self.project_dir.clone(), &HashMap::new())
    }

    /// Config pointing at a specific Gradle executable.
    pub fn config_with_gradle(&self, gradle: &Path) -> Config {
        let vars = HashMap::from([(
            "GRADLE_BIN".to_string(),
            gradle.to_string_lossy().into_owned(),
        )]);
        Config::from_vars(self.project_dir.clone(), &vars)
    }

    /// Populate `../out` with `count` files.
    pub fn populate_out(&self, count: usize) {
        fs::create_dir_all(&self.out_dir).expect("Failed to create out dir");
        for i in 0..count {
            fs::write(self.out_dir.join(format!("file{}.apk", i)), b"apk")
                .expect("Failed to create out file");
        }
    }

    pub fn artifact_path(&self) -> PathBuf {
        self.project_dir.join("build/sony_camera_magisk.zip")
    }

    /// Write a zero-filled archive of `size` bytes at the default location.
    pub fn write_artifact(&self, size: usize) {
        let path = self.artifact_path();
        fs::create_dir_all(path.parent().unwrap()).expect("Failed to create build dir");
        fs::write(&path, vec![0u8; size]).expect("Failed to write artifact");
    }
}

/// Runner that records invocations instead of spawning processes.
///
/// Exit codes are keyed by the Gradle subcommand (`--version`, `clean`,
/// `build`) and default to 0.
pub struct RecordingRunner {
    pub installed: bool,
    pub exit_codes: HashMap<String, i32>,
    /// Subcommands whose process fails to start.
    pub spawn_errors: Vec<String>,
    pub calls: Vec<(Cmd, OutputMode)>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self {
            installed: true,
            exit_codes: HashMap::new(),
            spawn_errors: Vec::new(),
            calls: Vec::new(),
        }
    }

    pub fn missing() -> Self {
        Self {
            installed: false,
            ..Self::new()
        }
    }

    pub fn failing(mut self, subcommand: &str, code: i32) -> Self {
        self.exit_codes.insert(subcommand.to_string(), code);
        self
    }

    pub fn unspawnable(mut self, subcommand: &str) -> Self {
        self.spawn_errors.push(subcommand.to_string());
        self
    }

    /// First argument of every recorded call, in order.
    pub fn subcommands(&self) -> Vec<String> {
        self.calls
            .iter()
            .map(|(cmd, _)| cmd.get_args().first().cloned().unwrap_or_default())
            .collect()
    }

    pub fn count(&self, subcommand: &str) -> usize {
        self.subcommands()
            .iter()
            .filter(|s| s.as_str() == subcommand)
            .count()
    }
}

impl ToolRunner for RecordingRunner {
    fn locate(&self, program: &str, _dir: &Path) -> Option<PathBuf> {
        self.installed
            .then(|| PathBuf::from("/opt/gradle/bin").join(program))
    }

    fn run(&mut self, cmd: &Cmd, mode: OutputMode) -> Result<i32> {
        self.calls.push((cmd.clone(), mode));
        let subcommand = cmd.get_args().first().cloned().unwrap_or_default();
        if self.spawn_errors.contains(&subcommand) {
            bail!("Failed to execute '{}'. Is it installed?", cmd.program());
        }
        Ok(self.exit_codes.get(&subcommand).copied().unwrap_or(0))
    }
}

/// Reporter writing uncoloured lines into memory.
pub fn buffer_reporter() -> Reporter<Vec<u8>> {
    Reporter::new(Vec::new(), false)
}

pub fn reporter_text(reporter: Reporter<Vec<u8>>) -> String {
    String::from_utf8(reporter.into_inner()).expect("Reporter output is not UTF-8")
}

/// Exit codes and side effects of a mock `gradle` script.
pub struct MockGradle {
    pub version_exit: i32,
    pub clean_exit: i32,
    pub build_exit: i32,
    /// Size of the archive a successful build writes, if any.
    pub artifact_bytes: Option<u64>,
}

impl Default for MockGradle {
    fn default() -> Self {
        Self {
            version_exit: 0,
            clean_exit: 0,
            build_exit: 0,
            artifact_bytes: Some(2 * 1024 * 1024),
        }
    }
}

/// Create an executable shell script standing in for Gradle.
///
/// Every invocation appends `<cwd>|<args>` to `gradle-calls.log` next to the
/// script so tests can check argv and working directory.
pub fn create_mock_gradle(bin_dir: &Path, mock: &MockGradle) -> PathBuf {
    let path = bin_dir.join("gradle");
    let log = bin_dir.join("gradle-calls.log");
    let artifact = match mock.artifact_bytes {
        Some(bytes) => format!(
            "mkdir -p build && head -c {} /dev/zero > build/sony_camera_magisk.zip",
            bytes
        ),
        None => "true".to_string(),
    };
    let script = format!(
        r#"#!/bin/sh
echo "$(pwd)|$*" >> "{log}"
case "$1" in
    --version) echo "Gradle 8.5"; exit {version} ;;
    clean) rm -rf build; exit {clean} ;;
    build)
        if [ {build} -ne 0 ]; then echo "BUILD FAILED" >&2; exit {build}; fi
        {artifact}
        exit 0
        ;;
esac
exit 64
"#,
        log = log.display(),
        version = mock.version_exit,
        clean = mock.clean_exit,
        build = mock.build_exit,
        artifact = artifact,
    );
    fs::write(&path, script).expect("Failed to write mock gradle");

    let mut perms = fs::metadata(&path)
        .expect("Failed to get metadata")
        .permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).expect("Failed to set permissions");
    path
}

/// Lines logged by the mock Gradle script, as `(cwd, args)`.
pub fn mock_gradle_calls(bin_dir: &Path) -> Vec<(String, String)> {
    let log = bin_dir.join("gradle-calls.log");
    let Ok(content) = fs::read_to_string(log) else {
        return Vec::new();
    };
    content
        .lines()
        .filter_map(|line| line.split_once('|'))
        .map(|(cwd, args)| (cwd.to_string(), args.to_string()))
        .collect()
}
