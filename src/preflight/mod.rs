//! Preflight checks run before Gradle is asked to build.
//!
//! A failed Gradle check stops the run; the input check only warns.

mod gradle;
mod inputs;
mod types;

pub use gradle::check_gradle;
pub use inputs::{check_input_dir, count_entries};
pub use types::{CheckResult, CheckStatus};
