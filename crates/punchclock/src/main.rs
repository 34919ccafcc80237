//! punchclock - record attendance from the command line
//!
//! This is the front end for the attendance engine. It wires together:
//! - Configuration loading
//! - The file-backed attendance log
//! - The attendance engine and its event channel
//! - Rendering of outcomes for the user

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use clap::{Parser, Subcommand};
use punchclock_api::{Event, EventPayload, RecordingOutcome};
use punchclock_config::{load_config, load_config_or_default, Policy};
use punchclock_core::AttendanceEngine;
use punchclock_util::{config_path_without_env, is_mock_time_active, parse_entry_input};
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

/// Exit code when an entry is refused (outside working hours)
const EXIT_REJECTED: u8 = 2;

/// punchclock - Employee attendance log with lateness detection
#[derive(Parser, Debug)]
#[command(name = "punchclock")]
#[command(about = "Employee attendance log with lateness detection", long_about = None)]
struct Args {
    /// Configuration file path (default: ~/.config/punchclock/config.toml)
    #[arg(short, long, env = "PUNCHCLOCK_CONFIG")]
    config: Option<PathBuf>,

    /// Attendance log override (or set PUNCHCLOCK_LOG env var)
    #[arg(long, env = "PUNCHCLOCK_LOG")]
    log_path: Option<PathBuf>,

    /// Log level
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    /// Print machine-readable JSON instead of messages
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Record an attendance entry
    Record {
        /// Entry time as "YYYY-MM-DD HH:MM" (default: now)
        #[arg(long, value_parser = parse_entry_input)]
        at: Option<NaiveDateTime>,
    },

    /// List recorded entries, oldest first
    History {
        /// Only show the most recent N entries
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
}

fn load_policy(args: &Args) -> Result<Policy> {
    let policy = match &args.config {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load config from {:?}", path))?,
        None => {
            let path = config_path_without_env();
            load_config_or_default(&path)
                .with_context(|| format!("Failed to load config from {:?}", path))?
        }
    };

    Ok(match &args.log_path {
        Some(path) => policy.with_log_path(path),
        None => policy,
    })
}

fn record(engine: &AttendanceEngine, at: NaiveDateTime, json: bool) -> Result<ExitCode> {
    let log_path = engine.policy().log_path.clone();

    let mut events = engine.subscribe();
    let outcome = engine
        .record(at)
        .with_context(|| format!("Failed to record attendance in {:?}", log_path))?;

    let event = drain_events(&mut events);

    if json {
        let event = event.context("Engine published no event for this entry")?;
        println!("{}", serde_json::to_string_pretty(&event)?);
    } else {
        // Lateness is shown from the outcome; the event only feeds the log
        match &outcome {
            RecordingOutcome::Rejected { .. } => eprintln!("Warning: {}", outcome.message()),
            RecordingOutcome::RecordedOnTime => println!("{}", outcome.message()),
            RecordingOutcome::RecordedLate(_) => println!("Warning: {}", outcome.message()),
        }
    }

    Ok(if outcome.is_recorded() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_REJECTED)
    })
}

/// Forward pending engine events to the structured log and return the last one
fn drain_events(events: &mut broadcast::Receiver<Event>) -> Option<Event> {
    let mut last = None;
    loop {
        match events.try_recv() {
            Ok(event) => {
                if let EventPayload::LateArrival { entry, details } = &event.payload {
                    info!(
                        entry = %entry,
                        previous = %details.previous,
                        gap_minutes = details.gap_minutes,
                        "Late arrival notification"
                    );
                }
                last = Some(event);
            }
            Err(TryRecvError::Lagged(skipped)) => {
                warn!(skipped, "Event subscriber lagged");
            }
            Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
        }
    }
    last
}

fn history(engine: &AttendanceEngine, limit: Option<usize>, json: bool) -> Result<ExitCode> {
    let entries = engine
        .history()
        .with_context(|| format!("Failed to read {:?}", engine.policy().log_path))?;

    let skip = limit.map_or(0, |n| entries.len().saturating_sub(n));
    let shown = &entries[skip..];

    if json {
        println!("{}", serde_json::to_string_pretty(shown)?);
    } else if shown.is_empty() {
        println!("No attendance recorded yet.");
    } else {
        for entry in shown {
            println!("{}", entry);
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    debug!(version = env!("CARGO_PKG_VERSION"), "punchclock starting");

    let policy = load_policy(&args)?;
    info!(log_path = %policy.log_path.display(), "Configuration loaded");

    let engine = AttendanceEngine::with_text_log(policy);

    match args.command {
        Cmd::Record { at } => {
            let at = at.unwrap_or_else(|| {
                if is_mock_time_active() {
                    warn!("Recording with mocked current time");
                }
                punchclock_util::now().naive_local()
            });
            record(&engine, at, args.json)
        }
        Cmd::History { limit } => history(&engine, limit, args.json),
    }
}
