//! Preflight check result.

use std::io::Write;

use crate::status::Reporter;

/// Result of a single preflight check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub details: String,
    /// Follow-up advice shown as an INFO line.
    pub hint: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    /// Check passed.
    Pass,
    /// Check failed - the build cannot run.
    Fail,
    /// Something is off, but the build can still be attempted.
    Warn,
}

impl CheckResult {
    pub fn pass(name: &str, details: impl Into<String>) -> Self {
        Self::new(name, CheckStatus::Pass, details.into())
    }

    pub fn fail(name: &str, details: impl Into<String>) -> Self {
        Self::new(name, CheckStatus::Fail, details.into())
    }

    pub fn warn(name: &str, details: impl Into<String>) -> Self {
        Self::new(name, CheckStatus::Warn, details.into())
    }

    fn new(name: &str, status: CheckStatus, details: String) -> Self {
        Self {
            name: name.to_string(),
            status,
            details,
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn passed(&self) -> bool {
        self.status == CheckStatus::Pass
    }

    /// Print the result followed by its hint, if any.
    pub fn report<W: Write>(&self, reporter: &mut Reporter<W>) {
        match self.status {
            CheckStatus::Pass => reporter.success(&self.details),
            CheckStatus::Fail => reporter.error(&self.details),
            CheckStatus::Warn => reporter.warning(&self.details),
        }
        if let Some(hint) = &self.hint {
            reporter.info(hint);
        }
    }
}
