//! CodeFray Installer
//!
//! Usage:
//!   codefray-installer              # Install into / update the executable's directory
//!   codefray-installer path/to/src  # Install into / update the given directory
//!   codefray-installer --resume     # Finish restructuring an interrupted install

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use console::style;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use codefray_core::config::{DEFAULT_BRANCH, DEFAULT_REMOTE_URL};
use codefray_core::prelude::*;

/// Pause after a scan failure so the warning stays readable when the
/// installer was launched from a file manager.
const SCAN_FAILURE_PAUSE: Duration = Duration::from_secs(2);

#[derive(Parser)]
#[command(name = "codefray-installer")]
#[command(about = "Install or update the CodeFray API", long_about = None)]
struct Cli {
    /// Target directory (defaults to the directory containing this executable)
    target: Option<PathBuf>,

    /// Upstream repository to install from
    #[arg(long, default_value = DEFAULT_REMOTE_URL)]
    remote: String,

    /// Branch to pull
    #[arg(long, default_value = DEFAULT_BRANCH)]
    branch: String,

    /// Only restructure an already fetched tree (recovers an interrupted install)
    #[arg(long)]
    resume: bool,

    /// Output format
    #[arg(short, long, default_value = "table")]
    format: OutputFormat,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    /// Human-readable progress lines
    #[default]
    Table,
    /// Machine-readable JSON summary
    Json,
    /// Only show failures
    Quiet,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "codefray_core=debug,codefray_cli=debug,warn"
    } else {
        "warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = InstallerConfig::resolve(cli.target.as_deref())
        .context("Failed to resolve the target directory")?
        .with_remote_url(&cli.remote)
        .with_branch(&cli.branch);
    tracing::debug!(?config, "resolved installer config");

    let cmd = InstallCommand::new(config);
    let format = cli.format;
    let observer = |phase: Phase| print_phase(format, phase);
    let result = if cli.resume {
        cmd.resume_with(observer)
    } else {
        cmd.execute_with(observer)
    };

    match result {
        Ok(report) => print_report(format, &report)?,
        Err(err) => {
            print_error(format, &err)?;
            if err.is_soft() {
                std::thread::sleep(SCAN_FAILURE_PAUSE);
            }
        }
    }

    // Failures are reported on the console only; the exit status stays 0.
    Ok(())
}

fn print_phase(format: OutputFormat, phase: Phase) {
    if !matches!(format, OutputFormat::Table) {
        return;
    }
    if phase == Phase::Updating {
        println!("> Unclean folder detected! Attempting to update and not install...");
    }
    println!("> {}", phase.description());
}

fn print_report(format: OutputFormat, report: &InstallReport) -> Result<()> {
    match format {
        OutputFormat::Table => {
            let verb = match report.mode {
                Mode::Install => "installed",
                Mode::Update => "updated",
            };
            println!(
                "{}",
                style(format!("> The CodeFrayAPI was {verb} successfully!")).green()
            );
        }
        OutputFormat::Json => {
            let mut output = serde_json::to_value(report)?;
            output["status"] = serde_json::json!("ok");
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Quiet => {}
    }
    Ok(())
}

fn print_error(format: OutputFormat, err: &Error) -> Result<()> {
    match format {
        OutputFormat::Table | OutputFormat::Quiet => {
            if err.is_soft() {
                println!("{}", style(format!(">!> Warning! {err}")).yellow());
                println!(">!> {}", err.guidance());
                return Ok(());
            }
            if let Some(output) = err.captured_output() {
                println!("{}", output.trim_end());
            }
            println!(
                "{}",
                style(format!(
                    " >!> There was an error in installation: {}. {}",
                    err.operation(),
                    err.guidance()
                ))
                .red()
            );
            println!("\t{err}");
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "status": "failed",
                "operation": err.operation(),
                "error": err.to_string(),
                "output": err.captured_output(),
                "guidance": err.guidance(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(())
}
