//! Magisk module builder.
//!
//! Drives Gradle to package the compiled camera application into a
//! flashable Magisk module, checking preconditions first and reporting the
//! resulting archive. The library half exists so the orchestration can be
//! exercised from integration tests with a recording runner.

pub mod artifact;
pub mod config;
pub mod gradle;
pub mod orchestrator;
pub mod preflight;
pub mod process;
pub mod status;
pub mod timing;

pub use orchestrator::{Orchestrator, Outcome};
