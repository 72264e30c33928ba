//! magisk-builder - packages the camera port as a Magisk module.
//!
//! Checks that Gradle is usable and that `../out` holds the compiled app,
//! optionally runs `gradle clean`, then `gradle build` and reports the zip.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use magisk_builder::config::{self, Config};
use magisk_builder::process::SystemRunner;
use magisk_builder::status::Reporter;
use magisk_builder::Orchestrator;

#[derive(Parser)]
#[command(name = "magisk-builder", version)]
#[command(about = "Build the Sony Camera Magisk module with Gradle")]
#[command(
    after_help = "ENVIRONMENT:\n  GRADLE_BIN        Gradle executable (default: gradle)\n  MAGISK_INPUT_DIR  Compiled app directory (default: ../out)\n  MAGISK_ARTIFACT   Expected archive (default: build/sony_camera_magisk.zip)\n\nValues may also be set in <project-dir>/.env."
)]
struct Cli {
    /// Run `gradle clean` before building
    #[arg(short, long)]
    clean: bool,

    /// Gradle project directory (default: the directory this tool lives in)
    #[arg(short = 'C', long, env = "MAGISK_PROJECT_DIR")]
    project_dir: Option<PathBuf>,

    /// Print debug diagnostics to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            // --help and --version land here too
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    init_tracing(cli.verbose);

    let mut reporter = Reporter::stdout();
    let project_dir = cli.project_dir.unwrap_or_else(config::default_project_dir);
    let config = match Config::load(&project_dir) {
        Ok(config) => config,
        Err(e) => {
            reporter.error(&format!("{:#}", e));
            reporter.info(
                "Pass --project-dir (-C) or set MAGISK_PROJECT_DIR to the Gradle project",
            );
            return ExitCode::FAILURE;
        }
    };
    config.log();

    let mut runner = SystemRunner;
    let outcome = Orchestrator::new(&config, &mut runner, &mut reporter)
        .clean(cli.clean)
        .run();
    tracing::debug!(?outcome, "finished");

    ExitCode::from(outcome.exit_code())
}

/// Diagnostics go to stderr so they never interleave with status lines.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("magisk_builder=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
