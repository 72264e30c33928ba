//! Build orchestration.
//!
//! One linear pass: check Gradle, check the input directory, optionally
//! clean, build, then report the archive. Each external command runs at
//! most once and always in the project directory.

use std::io::Write;

use crate::artifact::Artifact;
use crate::config::Config;
use crate::gradle::Task;
use crate::preflight;
use crate::process::{OutputMode, ToolRunner};
use crate::status::Reporter;
use crate::timing::Timer;

/// Title printed at the start of every run.
pub const TITLE: &str = "Sony Camera Magisk Module Builder";

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Gradle build succeeded. `artifact` is `None` if the archive was not
    /// where it was expected.
    Built { artifact: Option<Artifact> },
    /// Gradle missing or unusable; nothing was cleaned or built.
    ToolUnavailable,
    /// `gradle clean` failed; the build was not attempted.
    CleanFailed,
    /// `gradle build` failed.
    BuildFailed,
}

impl Outcome {
    pub fn success(&self) -> bool {
        matches!(self, Outcome::Built { .. })
    }

    /// Process exit code: 0 on success, 1 otherwise.
    pub fn exit_code(&self) -> u8 {
        if self.success() {
            0
        } else {
            1
        }
    }
}

/// Drives one build.
pub struct Orchestrator<'a, R: ToolRunner + ?Sized, W: Write> {
    config: &'a Config,
    runner: &'a mut R,
    reporter: &'a mut Reporter<W>,
    clean: bool,
}

impl<'a, R: ToolRunner + ?Sized, W: Write> Orchestrator<'a, R, W> {
    pub fn new(config: &'a Config, runner: &'a mut R, reporter: &'a mut Reporter<W>) -> Self {
        Self {
            config,
            runner,
            reporter,
            clean: false,
        }
    }

    /// Run `gradle clean` before building.
    pub fn clean(mut self, clean: bool) -> Self {
        self.clean = clean;
        self
    }

    pub fn run(mut self) -> Outcome {
        self.reporter.header(TITLE);

        let gradle = preflight::check_gradle(&mut *self.runner, self.config);
        gradle.report(&mut *self.reporter);
        if !gradle.passed() {
            return Outcome::ToolUnavailable;
        }

        let inputs = preflight::check_input_dir(&self.config.input_dir);
        inputs.report(&mut *self.reporter);
        if !inputs.passed() {
            self.reporter
                .warning("Continuing the build, but the module may be incomplete");
        }

        let outcome = self.build();
        self.finish(&outcome);
        outcome
    }

    fn build(&mut self) -> Outcome {
        self.reporter.info(&format!(
            "Working directory: {}",
            self.config.project_dir.display()
        ));

        if self.clean {
            self.reporter.info("Cleaning previous build...");
            if !self.run_step(Task::Clean) {
                self.reporter.error("Clean failed");
                return Outcome::CleanFailed;
            }
            self.reporter.success("Clean complete");
        }

        self.reporter.info("Building Magisk module...");
        if !self.run_step(Task::Build) {
            self.reporter.error("Build failed");
            return Outcome::BuildFailed;
        }
        self.reporter.success("Build succeeded!");

        let artifact = Artifact::find(&self.config.artifact);
        match &artifact {
            Some(artifact) => {
                self.reporter
                    .success(&format!("Module file: {}", artifact.path.display()));
                self.reporter
                    .success(&format!("File size: {}", artifact.size_display()));
            }
            None => tracing::debug!(
                path = %self.config.artifact.display(),
                "artifact not found after build"
            ),
        }

        Outcome::Built { artifact }
    }

    /// Run one Gradle step with the tool's output shown to the user.
    fn run_step(&mut self, task: Task) -> bool {
        let cmd = task.command(&self.config.gradle, &self.config.project_dir);
        let timer = Timer::start(task.name());
        match self.runner.run(&cmd, OutputMode::Inherited) {
            Ok(0) => {
                self.reporter.info(&timer.finish());
                true
            }
            Ok(code) => {
                self.reporter
                    .error(&format!("'{}' exited with code {}", cmd.display(), code));
                false
            }
            Err(e) => {
                self.reporter.error(&format!("{:#}", e));
                false
            }
        }
    }

    fn finish(&mut self, outcome: &Outcome) {
        if outcome.success() {
            self.reporter.header("Build complete");
            let artifact = &self.config.artifact;
            let shown = artifact
                .strip_prefix(&self.config.project_dir)
                .unwrap_or(artifact.as_path());
            self.reporter
                .info(&format!("Flash {} to the device", shown.display()));
        } else {
            self.reporter.header("Build failed");
        }
    }
}
