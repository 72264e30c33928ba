//! External command execution.
//!
//! [`Cmd`] describes a single invocation (program, arguments, working
//! directory). The working directory is always passed to the child
//! explicitly; this process never changes its own current directory.
//!
//! [`ToolRunner`] is the seam the orchestrator talks to, so tests can record
//! invocations instead of spawning real processes.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

/// Result of a captured command execution.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit status of the command.
    pub status: ExitStatus,
    /// Captured stdout as a string.
    pub stdout: String,
    /// Captured stderr as a string.
    pub stderr: String,
}

impl CommandResult {
    /// Returns true if the command exited successfully.
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Get the exit code, or -1 if terminated by signal.
    pub fn code(&self) -> i32 {
        exit_code(self.status)
    }

    /// Get stderr, trimmed of whitespace.
    pub fn stderr_trimmed(&self) -> &str {
        self.stderr.trim()
    }
}

/// Exit code of a finished child, or -1 if it was killed by a signal.
pub fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(-1)
}

/// A single external command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cmd {
    program: String,
    args: Vec<String>,
    current_dir: Option<PathBuf>,
}

impl Cmd {
    /// Create a new command builder.
    pub fn new(program: impl AsRef<str>) -> Self {
        Self {
            program: program.as_ref().to_string(),
            args: Vec::new(),
            current_dir: None,
        }
    }

    /// Add a single argument.
    pub fn arg(mut self, arg: impl AsRef<str>) -> Self {
        self.args.push(arg.as_ref().to_string());
        self
    }

    /// Add multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_string()));
        self
    }

    /// Set the working directory of the child.
    pub fn dir(mut self, dir: &Path) -> Self {
        self.current_dir = Some(dir.to_path_buf());
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    pub fn get_dir(&self) -> Option<&Path> {
        self.current_dir.as_deref()
    }

    /// `program arg1 arg2 ...`, for log lines.
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        if let Some(ref dir) = self.current_dir {
            cmd.current_dir(dir);
        }
        cmd
    }

    /// Run the command and capture its output. Non-zero exit is not an error;
    /// only failure to spawn is.
    pub fn run(&self) -> Result<CommandResult> {
        let output = self
            .command()
            .stdin(Stdio::null())
            .output()
            .with_context(|| format!("Failed to execute '{}'. Is it installed?", self.program))?;

        Ok(CommandResult {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    /// Run the command with inherited stdio so the user sees the tool's
    /// progress directly. Non-zero exit is not an error.
    pub fn run_interactive(&self) -> Result<ExitStatus> {
        self.command()
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .with_context(|| format!("Failed to execute '{}'. Is it installed?", self.program))
    }
}

/// Whether the child's output is captured or shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Captured,
    Inherited,
}

/// Executes commands on behalf of the orchestrator.
pub trait ToolRunner {
    /// Resolve `program` on `PATH`. Paths containing a separator are
    /// resolved against `dir`.
    fn locate(&self, program: &str, dir: &Path) -> Option<PathBuf>;

    /// Run `cmd` to completion and return its exit code.
    fn run(&mut self, cmd: &Cmd, mode: OutputMode) -> Result<i32>;
}

/// Spawns real child processes.
#[derive(Debug, Default)]
pub struct SystemRunner;

impl ToolRunner for SystemRunner {
    fn locate(&self, program: &str, dir: &Path) -> Option<PathBuf> {
        which::which_in(program, std::env::var_os("PATH"), dir).ok()
    }

    fn run(&mut self, cmd: &Cmd, mode: OutputMode) -> Result<i32> {
        tracing::debug!(command = %cmd.display(), dir = ?cmd.get_dir(), ?mode, "spawning");
        let code = match mode {
            OutputMode::Captured => {
                let result = cmd.run()?;
                if !result.success() {
                    tracing::debug!(stderr = result.stderr_trimmed(), "command failed");
                }
                result.code()
            }
            OutputMode::Inherited => exit_code(cmd.run_interactive()?),
        };
        tracing::debug!(command = %cmd.display(), code, "finished");
        Ok(code)
    }
}
