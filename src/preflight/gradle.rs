//! Gradle availability check.

use crate::config::Config;
use crate::gradle::Task;
use crate::process::{OutputMode, ToolRunner};

use super::types::CheckResult;

const NAME: &str = "gradle";
const INSTALL_HINT: &str = "Install Gradle: https://gradle.org/install/";

/// Check that Gradle is on PATH and answers `--version`.
pub fn check_gradle<R: ToolRunner + ?Sized>(runner: &mut R, config: &Config) -> CheckResult {
    let Some(path) = runner.locate(&config.gradle, &config.project_dir) else {
        return CheckResult::fail(
            NAME,
            format!("Gradle not found ('{}'), install Gradle first", config.gradle),
        )
        .with_hint(INSTALL_HINT);
    };
    tracing::debug!(path = %path.display(), "gradle located");

    let version = Task::Version.command(&config.gradle, &config.project_dir);
    match runner.run(&version, OutputMode::Captured) {
        Ok(0) => CheckResult::pass(NAME, format!("Gradle is installed ({})", path.display())),
        Ok(code) => CheckResult::fail(
            NAME,
            format!("Gradle is installed but cannot run (exit code {})", code),
        ),
        Err(e) => CheckResult::fail(NAME, format!("Gradle cannot run: {:#}", e))
            .with_hint(INSTALL_HINT),
    }
}
