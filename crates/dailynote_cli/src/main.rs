//! `dailynote` command-line driver.
//!
//! # Responsibility
//! - Resolve settings from config file, environment and flags.
//! - Run generation once (`--create-now`, `--date`) or poll for today's note.
//! - Report outcomes to the operator.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate, NaiveDateTime, Timelike};
use clap::Parser;
use dailynote_core::{
    default_log_level, init_logging, parse_note_date, GeneratorConfig, NoteGenerator, NoteOutcome,
};
use log::{error, info};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "dailynote",
    version,
    about = "Create today's daily note with last week's unfinished todos"
)]
struct Args {
    /// Create today's note now and exit
    #[arg(long, conflicts_with = "date")]
    create_now: bool,

    /// Create the note for a specific day (YYYY-MM-DD) and exit
    #[arg(long)]
    date: Option<String>,

    /// Notes directory (overrides config and DAILYNOTE_DIR)
    #[arg(long)]
    dir: Option<PathBuf>,

    /// JSON config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// trace|debug|info|warn|error
    #[arg(long)]
    log_level: Option<String>,

    /// Absolute directory for log files (default: ~/.dailynote/logs)
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let date = args
        .date
        .as_deref()
        .map(parse_note_date)
        .transpose()
        .context("invalid --date")?;
    let config = resolve_config(&args)?;
    start_logging(&args, &config)?;

    let generator = config.note_generator();
    info!(
        "event=cli_start module=cli status=ok notes_dir={}",
        config.notes_dir.display()
    );

    if args.create_now {
        return run_once(&generator, &config.notes_dir, Local::now().date_naive());
    }
    if let Some(date) = date {
        return run_once(&generator, &config.notes_dir, date);
    }

    poll(&generator, &config);
    Ok(())
}

fn resolve_config(args: &Args) -> Result<GeneratorConfig> {
    let mut config = match args.config.as_deref() {
        Some(path) => GeneratorConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => GeneratorConfig::default(),
    }
    .with_env_overrides();

    if let Some(dir) = &args.dir {
        config.notes_dir = dir.clone();
    }
    if let Some(level) = &args.log_level {
        config.log_level = Some(level.clone());
    }
    if let Some(log_dir) = &args.log_dir {
        config.log_dir = Some(log_dir.clone());
    }
    config.validate()?;
    Ok(config)
}

fn start_logging(args: &Args, config: &GeneratorConfig) -> Result<()> {
    let level = config.log_level.as_deref().unwrap_or_else(|| default_log_level());
    let log_dir = absolute(&config.resolved_log_dir())?;
    // Interactive runs print their own outcome; only polling mirrors info.
    let mirror_stderr = !(args.create_now || args.date.is_some());
    init_logging(level, &log_dir, mirror_stderr)?;
    Ok(())
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().context("resolving current directory")?;
    Ok(cwd.join(path))
}

fn run_once(generator: &NoteGenerator, dir: &Path, date: NaiveDate) -> Result<()> {
    let outcome = generator
        .ensure_note(dir, date)
        .with_context(|| format!("creating note for {date}"))?;
    report(&outcome);
    Ok(())
}

fn report(outcome: &NoteOutcome) {
    match outcome {
        NoteOutcome::Created { path, carried } => {
            println!("created {} ({carried} todos carried over)", path.display())
        }
        NoteOutcome::AlreadyExists { path } => {
            println!("note already exists: {}", path.display())
        }
    }
}

/// Checks for today's note every `check_interval_secs` until the process
/// is stopped.
fn poll(generator: &NoteGenerator, config: &GeneratorConfig) {
    let interval = Duration::from_secs(config.check_interval_secs);
    info!(
        "event=poll_start module=cli status=ok start_hour={} interval_secs={}",
        config.start_hour, config.check_interval_secs
    );
    loop {
        if let Some(date) = due_date(Local::now().naive_local(), config.start_hour) {
            match generator.ensure_note(&config.notes_dir, date) {
                Ok(outcome) if outcome.created() => report(&outcome),
                Ok(_) => {}
                Err(err) => error!(
                    "event=poll_tick module=cli status=error date={} error={}",
                    date, err
                ),
            }
        }
        std::thread::sleep(interval);
    }
}

/// Day whose note should exist at `now`, or `None` before `start_hour`.
fn due_date(now: NaiveDateTime, start_hour: u32) -> Option<NaiveDate> {
    if now.hour() >= start_hour {
        Some(now.date())
    } else {
        None
    }
}
