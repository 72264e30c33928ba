//! The module archive produced by a successful build.

use std::fs;
use std::path::{Path, PathBuf};

const BYTES_PER_MIB: f64 = 1024.0 * 1024.0;

/// Location and size of the built archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub path: PathBuf,
    pub size_bytes: u64,
}

impl Artifact {
    /// Stat `path`. Returns `None` when it is missing or not a regular file.
    pub fn find(path: &Path) -> Option<Self> {
        let metadata = fs::metadata(path).ok()?;
        if !metadata.is_file() {
            return None;
        }
        Some(Self {
            path: path.to_path_buf(),
            size_bytes: metadata.len(),
        })
    }

    /// Size in mebibytes.
    pub fn size_mib(&self) -> f64 {
        self.size_bytes as f64 / BYTES_PER_MIB
    }

    /// Size as shown to the user, e.g. `2.00 MB`.
    pub fn size_display(&self) -> String {
        format!("{:.2} MB", self.size_mib())
    }
}
