//! Compiled application output check.
//!
//! The Gradle build copies `../out` into the module. A missing or empty
//! directory is only a warning: the build may still source files elsewhere.

use std::path::Path;

use walkdir::WalkDir;

use super::types::CheckResult;

const NAME: &str = "out directory";
const COMPILE_HINT: &str = "Compile the camera application first";

/// Check the input directory exists and has at least one entry.
pub fn check_input_dir(dir: &Path) -> CheckResult {
    if !dir.exists() {
        return CheckResult::warn(
            NAME,
            format!("out directory does not exist: {}", dir.display()),
        )
        .with_hint(COMPILE_HINT);
    }

    // A regular file walks as zero entries and reads as empty.
    let entries = count_entries(dir);
    if entries == 0 {
        return CheckResult::warn(NAME, "out directory is empty").with_hint(COMPILE_HINT);
    }

    CheckResult::pass(
        NAME,
        format!("Found out directory with {} files/directories", entries),
    )
}

/// Recursive entry count, excluding `dir` itself. Unreadable entries are
/// skipped.
pub fn count_entries(dir: &Path) -> usize {
    WalkDir::new(dir)
        .min_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .count()
}
