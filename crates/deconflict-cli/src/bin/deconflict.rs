//! Deconfliction check for a planned drone mission.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use deconflict_cli::sim::ScenarioKind;
use deconflict_cli::{
    exit_status, render_summary, run_check, sample_mission, RuleOverrides, Settings,
};
use deconflict_core::write_report;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Settings file (defaults to config/settings.json when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check the primary mission against all other missions
    Check {
        /// Mission file (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Write the conflict report here (JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write the raw conflict log here (JSON array)
        #[arg(long)]
        log_output: Option<PathBuf>,

        /// Exit with status 2 when any conflict is found
        #[arg(long)]
        fail_on_conflict: bool,

        #[command(flatten)]
        overrides: RuleOverrides,
    },
    /// Print one mission's sampled trajectory as JSON
    Trajectory {
        /// Mission file (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Drone whose mission to sample
        #[arg(long)]
        drone_id: String,

        /// Trajectory sample spacing in meters
        #[arg(long)]
        resolution: Option<f64>,
    },
    /// Write a built-in mission set
    Scenario {
        #[arg(value_enum)]
        kind: ScenarioKind,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let directive = if cli.verbose {
        "deconflict=debug"
    } else {
        "deconflict=info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(directive.parse()?))
        .init();

    match cli.command {
        Command::Check {
            input,
            output,
            log_output,
            fail_on_conflict,
            overrides,
        } => {
            let settings = Settings::resolve(cli.config.as_deref(), &overrides)?;
            let report = run_check(&input, &settings, log_output.as_deref())?;

            print!("{}", render_summary(&report));

            if let Some(output) = output {
                write_report(&output, &report)
                    .with_context(|| format!("writing report to {}", output.display()))?;
                tracing::info!("Saved conflict report to {}", output.display());
            }

            return Ok(ExitCode::from(exit_status(&report, fail_on_conflict)));
        }
        Command::Trajectory {
            input,
            drone_id,
            resolution,
        } => {
            let settings = Settings::load(cli.config.as_deref())?;
            let resolution = resolution.unwrap_or(settings.resolution);
            let samples = sample_mission(&input, &drone_id, resolution)?;
            println!("{}", serde_json::to_string_pretty(&samples)?);
        }
        Command::Scenario { kind, output } => {
            let scenario = kind.build();
            tracing::info!("Building {} scenario", scenario.name);
            let json = serde_json::to_string_pretty(&scenario.into_mission_set())?;

            match output {
                Some(path) => {
                    std::fs::write(&path, json)
                        .with_context(|| format!("writing scenario to {}", path.display()))?;
                    tracing::info!("Wrote scenario to {}", path.display());
                }
                None => println!("{json}"),
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
