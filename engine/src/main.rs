//! Vehicle Maintenance Reminder - command-line driver
//!
//! Reads fleet snapshots (vehicles, programs and maintenance history as JSON)
//! and prints ranked reminders, per-vehicle status or data-quality warnings.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use chrono::{Datelike, NaiveDate, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use shared::{validate_snapshot, ReminderCalculationResult};
use tokio::task::JoinSet;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use maintenance_engine::services::{build_report, export_to_csv};
use maintenance_engine::{load_snapshot, parse_date, Config, EngineError, ReminderCalculationService, VehicleStatusService};

#[derive(Parser)]
#[command(name = "vmr")]
#[command(about = "Vehicle maintenance due-status and reminder engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute ranked reminders for one or more fleet snapshots
    Reminders {
        #[arg(required = true)]
        snapshots: Vec<PathBuf>,
        /// Evaluation date (YYYY-MM-DD), defaults to today (UTC)
        #[arg(long)]
        as_of: Option<String>,
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
        /// Maximum reminders printed per snapshot (0 = all)
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Show the per-vehicle status summary
    Status {
        snapshot: PathBuf,
        #[arg(long)]
        vehicle: Option<String>,
        #[arg(long)]
        as_of: Option<String>,
    },
    /// List data-quality warnings in a snapshot
    Validate { snapshot: PathBuf },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Csv,
    Markdown,
}

struct SnapshotOutput {
    index: usize,
    path: PathBuf,
    result: ReminderCalculationResult,
    logs: Vec<shared::MaintenanceLog>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vmr=info,maintenance_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    dotenvy::dotenv().ok();
    let config = Config::load()?;
    tracing::debug!("Environment: {}", config.environment);

    match cli.command {
        Commands::Reminders {
            snapshots,
            as_of,
            format,
            limit,
        } => {
            let as_of = resolve_as_of(as_of.as_deref())?;
            let format = match format {
                Some(format) => format,
                None => OutputFormat::from_str(&config.output.format, true)
                    .map_err(|e| anyhow::anyhow!("Invalid output.format '{}': {}", config.output.format, e))?,
            };
            let limit = limit.unwrap_or(config.output.limit);

            let service = Arc::new(ReminderCalculationService::new(config.engine.clone()));
            let outputs = calculate_all(service, snapshots, as_of).await?;
            print_reminders(outputs, format, limit, as_of)?;
        }
        Commands::Status {
            snapshot,
            vehicle,
            as_of,
        } => {
            let as_of = resolve_as_of(as_of.as_deref())?;
            let snapshot = load_snapshot(&snapshot)?;
            let service = VehicleStatusService::new(ReminderCalculationService::new(config.engine.clone()));

            let json = match vehicle {
                Some(vehicle_id) => {
                    let summary = service.snapshot_vehicle_status(&snapshot, &vehicle_id, as_of)?;
                    serde_json::to_string_pretty(&summary)?
                }
                None => {
                    let summaries = service.fleet_status(
                        &snapshot.vehicles,
                        &snapshot.programs,
                        Some(&snapshot.maintenance_logs),
                        as_of,
                    );
                    serde_json::to_string_pretty(&summaries)?
                }
            };
            println!("{json}");
        }
        Commands::Validate { snapshot: path } => {
            let snapshot = load_snapshot(&path)?;
            let issues = validate_snapshot(&snapshot, Utc::now().year());

            if issues.is_empty() {
                println!("No issues found in {}.", path.display());
                return Ok(());
            }

            tracing::warn!("{} data-quality issues in {}", issues.len(), path.display());
            for issue in &issues {
                println!("- {issue}");
            }
        }
    }

    Ok(())
}

fn resolve_as_of(value: Option<&str>) -> Result<NaiveDate, EngineError> {
    match value {
        Some(value) => parse_date(value),
        None => Ok(Utc::now().date_naive()),
    }
}

/// Load and calculate every snapshot on the blocking pool, returning results
/// in argument order
async fn calculate_all(
    service: Arc<ReminderCalculationService>,
    paths: Vec<PathBuf>,
    as_of: NaiveDate,
) -> anyhow::Result<Vec<SnapshotOutput>> {
    let mut tasks = JoinSet::new();

    for (index, path) in paths.into_iter().enumerate() {
        let service = Arc::clone(&service);
        tasks.spawn_blocking(move || {
            let snapshot = load_snapshot(&path)?;
            let result = service.calculate_snapshot(&snapshot, as_of);
            Ok::<_, EngineError>(SnapshotOutput {
                index,
                path,
                result,
                logs: snapshot.maintenance_logs,
            })
        });
    }

    let mut outputs = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        outputs.push(joined.context("snapshot calculation task failed")??);
    }
    outputs.sort_by_key(|output| output.index);

    Ok(outputs)
}

fn print_reminders(
    mut outputs: Vec<SnapshotOutput>,
    format: OutputFormat,
    limit: usize,
    as_of: NaiveDate,
) -> anyhow::Result<()> {
    if limit > 0 {
        for output in &mut outputs {
            output.result.reminders.truncate(limit);
        }
    }

    let labelled = outputs.len() > 1;

    match format {
        OutputFormat::Json if labelled => {
            let documents: Vec<serde_json::Value> = outputs
                .iter()
                .map(|output| {
                    serde_json::json!({
                        "snapshot": output.path.display().to_string(),
                        "result": output.result,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&documents)?);
        }
        OutputFormat::Json => {
            for output in &outputs {
                println!("{}", serde_json::to_string_pretty(&output.result)?);
            }
        }
        OutputFormat::Csv => {
            for output in &outputs {
                if labelled {
                    println!("# {}", output.path.display());
                }
                print!("{}", export_to_csv(&output.result.reminders)?);
            }
        }
        OutputFormat::Markdown => {
            for output in &outputs {
                if labelled {
                    println!("<!-- {} -->", output.path.display());
                }
                println!("{}", build_report(&output.result, &output.logs, as_of));
            }
        }
    }

    Ok(())
}
