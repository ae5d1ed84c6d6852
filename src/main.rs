//! cellphy-reader - check which microscopy paths the reader accepts.
//!
//! This binary runs the format sniffer over paths given on the command line.

use clap::Parser;
use serde::Serialize;
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cellphy_reader::{
    config::{CheckConfig, Cli, Command, OutputFormat},
    detect_format, PathInput,
};

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.into_command() {
        Command::Check(config) => run_check(config),
    }
}

// =============================================================================
// Check Command
// =============================================================================

/// Detection result for one path.
#[derive(Debug, Serialize)]
struct PathReport {
    path: String,
    recognized: bool,
    format: Option<&'static str>,
    extension: Option<&'static str>,
}

fn run_check(config: CheckConfig) -> ExitCode {
    init_logging(config.verbose);

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    let reports: Vec<PathReport> = config
        .paths
        .iter()
        .map(|path| {
            let format = detect_format(&PathInput::from(path.as_str()));
            debug!("{} -> {:?}", path, format);
            PathReport {
                path: path.clone(),
                recognized: format.is_some(),
                format: format.map(|f| f.name()),
                extension: format.map(|f| f.extension()),
            }
        })
        .collect();

    match config.output {
        OutputFormat::Text => print_text(&reports),
        OutputFormat::Json => match serde_json::to_string_pretty(&reports) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                error!("Failed to serialize report: {}", e);
                return ExitCode::FAILURE;
            }
        },
    }

    if reports.iter().all(|r| r.recognized) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn print_text(reports: &[PathReport]) {
    for report in reports {
        match report.format {
            Some(format) => println!("✓ {} ({})", report.path, format),
            None => println!("✗ {} (not a supported format)", report.path),
        }
    }

    let recognized = reports.iter().filter(|r| r.recognized).count();
    println!();
    println!("{}/{} path(s) recognized", recognized, reports.len());
}

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "cellphy_reader=debug"
    } else {
        "cellphy_reader=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
