//! The Gradle invocations the builder knows about.

use std::path::Path;

use crate::process::Cmd;

/// One Gradle invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// `--version`, used as an availability check.
    Version,
    /// `clean`, removes the previous `build/` output.
    Clean,
    /// `build --console=plain`, produces the module zip.
    Build,
}

impl Task {
    /// Short name used in status lines.
    pub fn name(self) -> &'static str {
        match self {
            Task::Version => "version",
            Task::Clean => "clean",
            Task::Build => "build",
        }
    }

    pub fn args(self) -> &'static [&'static str] {
        match self {
            Task::Version => &["--version"],
            Task::Clean => &["clean"],
            // Plain console keeps the output non-interactive.
            Task::Build => &["build", "--console=plain"],
        }
    }

    /// Command for this task, run from the Gradle project directory.
    pub fn command(self, program: &str, project_dir: &Path) -> Cmd {
        Cmd::new(program).args(self.args()).dir(project_dir)
    }
}
