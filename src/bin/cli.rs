use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use schedule_check::logging::{self, LogLevel};
use schedule_check::{ScheduleValidator, ValidationOptions, ValidationReport};
use serde_json::Value;
use std::fs;
use std::io::{self, Read};
use std::process::ExitCode;

/// Check a task schedule document for structural, dependency and ordering errors.
#[derive(Debug, Parser)]
#[command(name = "schedule-check", version, long_about = None)]
struct CliArgs {
    /// Schedule JSON file, or `-` for stdin.
    #[arg(default_value = "-", value_name = "INPUT")]
    input: String,

    /// Print a single pass/fail line.
    #[arg(short, long, conflicts_with_all = ["stats_only", "json"])]
    quiet: bool,

    /// Print only the statistics object as JSON.
    #[arg(long, conflicts_with = "json")]
    stats_only: bool,

    /// Print the whole report as JSON.
    #[arg(long)]
    json: bool,

    /// Reference day for overdue-task warnings (defaults to the local date).
    #[arg(long, value_name = "YYYY-MM-DD", value_parser = parse_today)]
    today: Option<NaiveDate>,

    /// Logging level. Falls back to `SCHEDULE_CHECK_LOG`, then `warn`.
    #[arg(long, value_enum, value_name = "LEVEL")]
    log_level: Option<LogLevel>,
}

fn parse_today(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|err| format!("{err} (expected YYYY-MM-DD)"))
}

fn read_document(input: &str) -> Result<Value> {
    let content = if input == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read schedule from stdin")?;
        buf
    } else {
        fs::read_to_string(input).with_context(|| format!("failed to read {input}"))?
    };
    serde_json::from_str(&content).context("schedule is not valid JSON")
}

fn render_report(report: &ValidationReport) -> String {
    let rule = "=".repeat(60);
    let stats = &report.stats;
    let mut out = String::new();

    out.push_str(&format!("{rule}\nSchedule validation\n{rule}\n"));
    out.push_str(if report.is_valid { "VALID\n\n" } else { "INVALID\n\n" });

    out.push_str("Statistics:\n");
    out.push_str(&format!("  tasks             : {}\n", stats.task_count));
    if let Some(date) = stats.earliest_start {
        out.push_str(&format!("  earliest start    : {}\n", date));
    }
    if let Some(date) = stats.latest_end {
        out.push_str(&format!("  latest end        : {}\n", date));
    }
    if let Some(days) = stats.project_duration {
        out.push_str(&format!("  project duration  : {} days\n", days));
    }
    out.push_str(&format!("  total task days   : {} days\n", stats.total_days));
    if let Some(avg) = stats.average_progress {
        out.push_str(&format!("  average progress  : {:.1}%\n", avg));
    }
    out.push_str(&format!("  overlapping pairs : {}\n", stats.overlapping_tasks));

    if !report.errors.is_empty() {
        out.push_str(&format!("\nErrors ({}):\n", report.errors.len()));
        for error in &report.errors {
            out.push_str(&format!("  - {}\n", error));
        }
    }
    if !stats.warnings.is_empty() {
        out.push_str(&format!("\nWarnings ({}):\n", stats.warnings.len()));
        for warning in &stats.warnings {
            out.push_str(&format!("  - {}\n", warning));
        }
    }
    out
}

fn run(args: &CliArgs) -> Result<bool> {
    let document = read_document(&args.input)?;
    let options = match args.today {
        Some(today) => ValidationOptions::with_today(today),
        None => ValidationOptions::default(),
    };
    let report = ScheduleValidator::new(options).validate_document(&document)?;

    if args.quiet {
        if report.is_valid {
            println!("valid ({} tasks)", report.stats.task_count);
        } else {
            println!("invalid ({} errors)", report.errors.len());
        }
    } else if args.stats_only {
        println!("{}", serde_json::to_string_pretty(&report.stats)?);
    } else if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_report(&report));
    }

    Ok(report.is_valid)
}

fn main() -> ExitCode {
    let args = CliArgs::parse();
    if let Err(err) = logging::init_logging(args.log_level) {
        eprintln!("schedule-check: {err:#}");
    }

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("schedule-check error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
