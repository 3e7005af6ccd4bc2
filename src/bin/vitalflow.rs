//! Vitalflow CLI - command-line interface for the daily health pipeline
//!
//! Commands:
//! - transform: run the pipeline over a provider payload and emit daily records
//! - analyze: print only the qualitative analyses for a payload
//! - schema: describe the accepted input shapes

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::{NaiveDate, Utc};
use tracing_subscriber::EnvFilter;

use vitalflow::adapters::{GoogleFitAdapter, HealthConnectAdapter, ProviderAdapter};
use vitalflow::pipeline::{DailyEngine, DailyReport};
use vitalflow::types::AnalysisResult;
use vitalflow::{EngineError, TimeWindow, ENGINE_NAME, ENGINE_VERSION};

/// Vitalflow - turn one day of provider health data into daily records
#[derive(Parser)]
#[command(name = "vitalflow")]
#[command(version = ENGINE_VERSION)]
#[command(about = "Normalize and analyze daily health metrics", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the pipeline over a provider payload and emit daily records
    Transform {
        /// Input payload path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Which provider produced the payload
        #[arg(long, value_enum)]
        provider: ProviderArg,

        /// Business date (YYYY-MM-DD); defaults to yesterday (UTC)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Directory to write one <domain>/<date>.json document per domain;
        /// prints the full report to stdout when omitted
        #[arg(short, long)]
        out_dir: Option<PathBuf>,

        /// Height in meters used for BMI
        #[arg(long)]
        height: Option<f64>,
    },

    /// Print only the qualitative analyses for a payload
    Analyze {
        /// Input payload path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Which provider produced the payload
        #[arg(long, value_enum)]
        provider: ProviderArg,

        /// Business date (YYYY-MM-DD); defaults to yesterday (UTC)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Describe the accepted input shapes
    Schema,
}

#[derive(Clone, Copy, ValueEnum)]
enum ProviderArg {
    /// Google Fit aggregate response (bucket/dataset/point)
    GoogleFit,
    /// Health Connect point records
    HealthConnect,
}

impl ProviderArg {
    fn adapter(self) -> Box<dyn ProviderAdapter> {
        match self {
            ProviderArg::GoogleFit => Box::new(GoogleFitAdapter),
            ProviderArg::HealthConnect => Box::new(HealthConnectAdapter),
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let report = CliErrorReport::from(e);
            eprintln!(
                "{}",
                serde_json::to_string(&report)
                    .unwrap_or_else(|_| report.message.clone())
            );
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Transform {
            input,
            provider,
            date,
            out_dir,
            height,
        } => cmd_transform(&input, provider, date, out_dir.as_deref(), height),
        Commands::Analyze {
            input,
            provider,
            date,
        } => cmd_analyze(&input, provider, date),
        Commands::Schema => {
            print_schema();
            Ok(())
        }
    }
}

fn cmd_transform(
    input: &Path,
    provider: ProviderArg,
    date: Option<NaiveDate>,
    out_dir: Option<&Path>,
    height: Option<f64>,
) -> Result<(), CliError> {
    let report = build_report(input, provider, date, height)?;

    match out_dir {
        Some(dir) => write_domain_documents(dir, &report),
        None => {
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
    }
}

fn cmd_analyze(
    input: &Path,
    provider: ProviderArg,
    date: Option<NaiveDate>,
) -> Result<(), CliError> {
    let report = build_report(input, provider, date, None)?;

    let analyses = serde_json::json!({
        "date": report.date,
        "nutrition": AnalysisResult::from(&report.nutrition_analysis),
        "sleep": AnalysisResult::from(&report.sleep_analysis),
    });
    println!("{}", serde_json::to_string_pretty(&analyses)?);
    Ok(())
}

fn build_report(
    input: &Path,
    provider: ProviderArg,
    date: Option<NaiveDate>,
    height: Option<f64>,
) -> Result<DailyReport, CliError> {
    let raw_json = read_input(input)?;
    let date = date.unwrap_or_else(|| TimeWindow::yesterday(Utc::now()).date());

    let adapter = provider.adapter();
    let points = adapter.parse(&raw_json)?;

    let engine = match height {
        Some(h) => DailyEngine::with_height(h),
        None => DailyEngine::new(),
    };
    Ok(engine.process(adapter.provider(), &points, date))
}

/// Write one JSON document per domain, `<out_dir>/<domain>/<date>.json`.
fn write_domain_documents(out_dir: &Path, report: &DailyReport) -> Result<(), CliError> {
    let date = report.date.to_string();
    let documents: [(&str, serde_json::Value); 4] = [
        ("activity", serde_json::to_value(&report.activity)?),
        ("weight", serde_json::to_value(&report.weight)?),
        ("sleep", serde_json::to_value(&report.sleep)?),
        ("nutrition", serde_json::to_value(&report.nutrition)?),
    ];

    for (domain, document) in documents {
        let dir = out_dir.join(domain);
        fs::create_dir_all(&dir)?;
        let path = dir.join(format!("{date}.json"));
        fs::write(&path, serde_json::to_string_pretty(&document)?)?;
        println!("{}", path.display());
    }
    Ok(())
}

fn read_input(input: &Path) -> Result<String, CliError> {
    if input.to_string_lossy() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(fs::read_to_string(input)?)
    }
}

fn print_schema() {
    println!("{ENGINE_NAME} {ENGINE_VERSION}");
    println!();
    println!("google-fit input: aggregate REST response");
    println!("  {{ \"bucket\": [ {{ \"dataset\": [ {{ \"dataSourceId\": \"...\",");
    println!("    \"point\": [ {{ \"startTimeNanos\": \"...\", \"value\": [ {{ \"intVal\" | \"fpVal\" }} ] }} ] }} ] }} ] }}");
    println!("  Recognized data types: com.google.step_count.delta, com.google.distance.delta,");
    println!("  com.google.calories.expended, com.google.active_minutes, com.google.weight.");
    println!();
    println!("health-connect input: record array (or {{ \"records\": [...] }})");
    println!("  {{ \"record_type\": \"steps\", \"value\": 8200,");
    println!("    \"start_time\": \"2024-01-15T00:00:00Z\", \"end_time\": \"...\" }}");
    println!("  Record types: steps, distance, calories_expended, active_minutes, weight,");
    println!("  body_fat, muscle_mass, total_sleep, deep_sleep, light_sleep, rem_sleep,");
    println!("  sleep_efficiency, calories_consumed, protein, fat, carbs, fiber, sugar,");
    println!("  sodium, water.");
    println!();
    println!("Output: one JSON document per domain (activity, weight, sleep, nutrition),");
    println!("each carrying date, created_at, and a data_source tag.");
}

// Error types

#[derive(Debug)]
enum CliError {
    Io(io::Error),
    Engine(EngineError),
    Json(serde_json::Error),
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        CliError::Io(e)
    }
}

impl From<EngineError> for CliError {
    fn from(e: EngineError) -> Self {
        CliError::Engine(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Json(e)
    }
}

#[derive(serde::Serialize)]
struct CliErrorReport {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<CliError> for CliErrorReport {
    fn from(e: CliError) -> Self {
        match e {
            CliError::Io(e) => CliErrorReport {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            CliError::Engine(e) => CliErrorReport {
                code: "ENGINE_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Run 'vitalflow schema' for the accepted input shapes".to_string()),
            },
            CliError::Json(e) => CliErrorReport {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check JSON syntax".to_string()),
            },
        }
    }
}
