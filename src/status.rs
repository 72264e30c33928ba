//! Categorised console output.
//!
//! Every user-facing line goes through a [`Reporter`] so the orchestrator can
//! be driven against an in-memory buffer in tests.

use std::io::{self, IsTerminal, Write};

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const BANNER_WIDTH: usize = 60;

/// Status line category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Header,
    Info,
    Success,
    Warning,
    Error,
}

impl Level {
    /// Bracketed label printed before the message. Headers have none.
    pub fn label(self) -> Option<&'static str> {
        match self {
            Level::Header => None,
            Level::Info => Some("INFO"),
            Level::Success => Some("SUCCESS"),
            Level::Warning => Some("WARNING"),
            Level::Error => Some("ERROR"),
        }
    }

    /// ANSI foreground colour for this level.
    pub fn color(self) -> &'static str {
        match self {
            Level::Header => "\x1b[95m",
            Level::Info => "\x1b[94m",
            Level::Success => "\x1b[92m",
            Level::Warning => "\x1b[93m",
            Level::Error => "\x1b[91m",
        }
    }
}

/// Writes status lines, optionally coloured.
pub struct Reporter<W: Write> {
    out: W,
    color: bool,
}

impl Reporter<io::Stdout> {
    /// Reporter on stdout. Colour only when stdout is a terminal and
    /// `NO_COLOR` is unset.
    pub fn stdout() -> Self {
        let stdout = io::stdout();
        let color = stdout.is_terminal() && std::env::var_os("NO_COLOR").is_none();
        Self::new(stdout, color)
    }
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self { out, color }
    }

    /// Consume the reporter, returning the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Centred title between two rules.
    pub fn header(&mut self, title: &str) {
        let rule = "=".repeat(BANNER_WIDTH);
        let centred = format!("{:^width$}", title, width = BANNER_WIDTH);
        for line in [rule.as_str(), centred.as_str(), rule.as_str()] {
            let rendered = if self.color {
                format!("{}{}{}{}", Level::Header.color(), BOLD, line, RESET)
            } else {
                line.to_string()
            };
            self.write_line(&rendered);
        }
    }

    pub fn info(&mut self, msg: &str) {
        self.line(Level::Info, msg);
    }

    pub fn success(&mut self, msg: &str) {
        self.line(Level::Success, msg);
    }

    pub fn warning(&mut self, msg: &str) {
        self.line(Level::Warning, msg);
    }

    pub fn error(&mut self, msg: &str) {
        self.line(Level::Error, msg);
    }

    /// Print a single labelled line.
    pub fn line(&mut self, level: Level, msg: &str) {
        let Some(label) = level.label() else {
            self.header(msg);
            return;
        };
        let rendered = if self.color {
            format!("{}[{}]{} {}", level.color(), label, RESET, msg)
        } else {
            format!("[{}] {}", label, msg)
        };
        self.write_line(&rendered);
    }

    fn write_line(&mut self, line: &str) {
        // A closed stdout is not worth aborting a build over.
        let _ = writeln!(self.out, "{}", line);
    }
}
