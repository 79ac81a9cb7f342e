use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::LevelFilter;
use palletize::io::{CalibrationInput, LayoutJob, LayoutReport, PalletizeIoError};

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error("{}: {source}", path.display())]
    Input {
        path: PathBuf,
        #[source]
        source: PalletizeIoError,
    },
    #[error("failed to write {}: {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: PalletizeIoError,
    },
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Logger(#[from] log::SetLoggerError),
}

#[derive(Parser)]
#[command(name = "palletize")]
#[command(about = "Pallet layouts, approach/retract waypoints and calibration checks")]
#[command(version)]
struct Cli {
    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long = "log-level", global = true, default_value = "info")]
    log_level: LevelFilter,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate product poses from a layout job and write a JSON report
    Layout {
        /// Layout job (JSON)
        job: PathBuf,
        /// Report path (overrides the job's `output_path`)
        #[arg(short = 'o', long = "out")]
        out: Option<PathBuf>,
        /// Label prefix for product keys (overrides the job's `prefix`)
        #[arg(long = "prefix")]
        prefix: Option<String>,
    },
    /// Check taught calibration points and print the report as JSON
    Validate {
        /// Taught points with optional thresholds (JSON)
        points: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(2)
        }
    }
}

/// `RUST_LOG` directives, when set, override `--log-level`.
fn init_logging(level: LevelFilter) -> Result<(), CliError> {
    #[cfg(feature = "tracing")]
    {
        use tracing_subscriber::EnvFilter;

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_ascii_lowercase()));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    }
    #[cfg(not(feature = "tracing"))]
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .try_init()?;
    Ok(())
}

/// Returns `Ok(false)` when the command ran but its result is a failure.
fn run(cli: Cli) -> Result<bool, CliError> {
    init_logging(cli.log_level)?;
    match cli.command {
        Commands::Layout { job, out, prefix } => run_layout(&job, out, prefix),
        Commands::Validate { points } => run_validate(&points),
    }
}

fn run_layout(
    job_path: &Path,
    out: Option<PathBuf>,
    prefix: Option<String>,
) -> Result<bool, CliError> {
    let mut job = LayoutJob::load_json(job_path).map_err(|source| CliError::Input {
        path: job_path.to_path_buf(),
        source,
    })?;
    if let Some(prefix) = prefix {
        job.prefix = prefix;
    }
    let out_path = out.unwrap_or_else(|| job.output_path());

    let mut report = LayoutReport::new(&job, job_path);
    let ok = match job.run() {
        Ok(outcome) => {
            report.set_outcome(&job.prefix, outcome);
            true
        }
        Err(err) => {
            log::warn!("layout failed: {err}");
            report.set_error(err);
            false
        }
    };

    report
        .write_json(&out_path)
        .map_err(|source| CliError::Output {
            path: out_path.clone(),
            source,
        })?;
    log::info!("wrote layout report to {}", out_path.display());
    Ok(ok)
}

fn run_validate(points_path: &Path) -> Result<bool, CliError> {
    let input = CalibrationInput::load_json(points_path).map_err(|source| CliError::Input {
        path: points_path.to_path_buf(),
        source,
    })?;
    let report = input.validate();
    println!("{}", serde_json::to_string_pretty(&report)?);
    if !report.is_clean() {
        log::warn!("{} calibration field errors", report.errors().len());
    }
    Ok(report.is_clean())
}
