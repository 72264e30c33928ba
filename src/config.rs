//! Configuration management for the module builder.
//!
//! Reads configuration from the project's .env file and environment
//! variables. Environment variables take precedence over .env file.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Gradle executable used when `GRADLE_BIN` is unset.
pub const DEFAULT_GRADLE: &str = "gradle";

/// Archive produced by the Gradle build, relative to the project directory.
pub const DEFAULT_ARTIFACT: &str = "build/sony_camera_magisk.zip";

/// Name of the compiled application directory next to the project.
pub const INPUT_DIR_NAME: &str = "out";

/// Builder configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding `build.gradle.kts`. Every Gradle invocation runs here.
    pub project_dir: PathBuf,
    /// Gradle program: a bare name looked up on PATH, or a resolved path.
    pub gradle: String,
    /// Compiled application output packaged into the module.
    pub input_dir: PathBuf,
    /// Expected module archive after a successful build.
    pub artifact: PathBuf,
}

/// Project directory when neither `--project-dir` nor `MAGISK_PROJECT_DIR`
/// is given: the directory this tool was built from.
pub fn default_project_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

impl Config {
    /// Load configuration for `project_dir`.
    ///
    /// Reads `<project_dir>/.env` if present, then lets the process
    /// environment override it.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let project_dir = project_dir.canonicalize().with_context(|| {
            format!("Project directory not found: {}", project_dir.display())
        })?;

        let mut vars = HashMap::new();

        let env_path = project_dir.join(".env");
        if env_path.is_file() {
            let entries = dotenvy::from_path_iter(&env_path)
                .with_context(|| format!("Failed to read {}", env_path.display()))?;
            for entry in entries {
                let (key, value) =
                    entry.with_context(|| format!("Malformed line in {}", env_path.display()))?;
                vars.insert(key, value);
            }
        }

        // Non-UTF-8 variables cannot be any of ours; skip them.
        vars.extend(
            std::env::vars_os()
                .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?))),
        );

        Ok(Self::from_vars(project_dir, &vars))
    }

    /// Build a config from already-collected variables.
    ///
    /// `project_dir` should be absolute; relative values are resolved
    /// against it.
    pub fn from_vars(project_dir: PathBuf, vars: &HashMap<String, String>) -> Self {
        let gradle = vars
            .get("GRADLE_BIN")
            .filter(|s| !s.trim().is_empty())
            .map(|s| resolve_program(&project_dir, s.trim()))
            .unwrap_or_else(|| DEFAULT_GRADLE.to_string());

        let input_dir = vars
            .get("MAGISK_INPUT_DIR")
            .map(|s| resolve_path(&project_dir, s))
            .unwrap_or_else(|| default_input_dir(&project_dir));

        let artifact = vars
            .get("MAGISK_ARTIFACT")
            .map(|s| resolve_path(&project_dir, s))
            .unwrap_or_else(|| project_dir.join(DEFAULT_ARTIFACT));

        Self {
            project_dir,
            gradle,
            input_dir,
            artifact,
        }
    }

    /// Print configuration for debugging.
    pub fn log(&self) {
        tracing::debug!(
            project_dir = %self.project_dir.display(),
            gradle = %self.gradle,
            input_dir = %self.input_dir.display(),
            artifact = %self.artifact.display(),
            "configuration"
        );
    }
}

/// `<project_dir>/../out`
fn default_input_dir(project_dir: &Path) -> PathBuf {
    project_dir
        .parent()
        .unwrap_or(project_dir)
        .join(INPUT_DIR_NAME)
}

fn resolve_path(base: &Path, value: &str) -> PathBuf {
    let path = PathBuf::from(value);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}

/// Bare names stay as-is for PATH lookup; anything with a separator
/// (`./gradlew`) is anchored to the project directory.
fn resolve_program(base: &Path, value: &str) -> String {
    if value.contains('/') || value.contains(std::path::MAIN_SEPARATOR) {
        resolve_path(base, value).to_string_lossy().into_owned()
    } else {
        value.to_string()
    }
}
