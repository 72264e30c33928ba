//! Step timing utilities.

use std::time::{Duration, Instant};

/// A simple timer for measuring how long a Gradle step takes.
pub struct Timer {
    name: String,
    start: Instant,
}

impl Timer {
    /// Start a new timer with the given step name.
    pub fn start(name: &str) -> Self {
        Self {
            name: name.to_string(),
            start: Instant::now(),
        }
    }

    /// Stop the timer and return a summary line such as `build took 12.3s`.
    pub fn finish(self) -> String {
        format!("{} took {}", self.name, format_duration(self.start.elapsed()))
    }
}

/// Seconds below a minute, minutes above.
pub fn format_duration(elapsed: Duration) -> String {
    let secs = elapsed.as_secs_f64();
    if secs >= 60.0 {
        format!("{:.1}m", secs / 60.0)
    } else {
        format!("{:.1}s", secs)
    }
}
