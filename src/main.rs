//! Condition Monitor - batch inference and health diagnosis
//!
//! Reads one JSON array of sensor records, runs every configured model
//! against every record, diagnoses each record with the threshold rules and
//! prints one JSON object.
//!
//! # Usage
//!
//! ```bash
//! # Batch from stdin
//! cat readings.json | condition-monitor
//!
//! # Batch from a file with a custom model set
//! condition-monitor --input readings.json --config monitor_config.toml --pretty
//!
//! # Validate a config file
//! condition-monitor check-config monitor_config.toml
//! ```
//!
//! # Environment Variables
//!
//! - `CONDITION_MONITOR_CONFIG`: Path to the config file (when `--config` is absent)
//! - `RUST_LOG`: Logging filter (default: warn). Logs go to stderr.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};

use condition_monitor::config::defaults::DEFAULT_LOG_FILTER;
use condition_monitor::config::validation::{validate_ranges, validate_unknown_keys};
use condition_monitor::pipeline::{render_outcome, Outcome};
use condition_monitor::{BatchResult, MonitorConfig, Pipeline};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "condition-monitor")]
#[command(about = "Batch inference and rule-based health diagnosis for machine-condition monitoring")]
#[command(version)]
struct CliArgs {
    /// Read the batch from a file instead of stdin
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Path to monitor_config.toml
    /// (default: $CONDITION_MONITOR_CONFIG, then ./monitor_config.toml, then built-in models)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long, env = "CONDITION_MONITOR_LOG_JSON")]
    log_json: bool,

    #[command(subcommand)]
    command: Option<SubCommand>,
}

#[derive(clap::Subcommand, Debug)]
enum SubCommand {
    /// Load and validate a config file, printing any warnings
    CheckConfig {
        /// Path to the TOML file to check
        path: PathBuf,
    },

    /// Print the built-in configuration as TOML
    DefaultConfig,
}

// ============================================================================
// Logging
// ============================================================================

fn init_logging(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

// ============================================================================
// Subcommands
// ============================================================================

fn check_config(path: &Path) -> Result<bool> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let mut warnings: Vec<String> = validate_unknown_keys(&raw)
        .iter()
        .map(ToString::to_string)
        .collect();

    let config: MonitorConfig = toml::from_str(&raw)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    let (_, range_warnings) = validate_ranges(&config);
    warnings.extend(range_warnings.iter().map(ToString::to_string));

    for w in &warnings {
        println!("warning: {w}");
    }

    match config.validate() {
        Ok(()) => {
            println!(
                "{}: OK ({} models, max {} records, {} warnings)",
                path.display(),
                config.models.len(),
                config.batch.max_records,
                warnings.len()
            );
            Ok(true)
        }
        Err(e) => {
            println!("{}: {e}", path.display());
            Ok(false)
        }
    }
}

fn default_config() -> Result<()> {
    let toml = MonitorConfig::default()
        .to_toml()
        .context("Failed to serialize default config")?;
    print!("{toml}");
    Ok(())
}

// ============================================================================
// Batch Mode
// ============================================================================

fn load_config(path: Option<&Path>) -> Result<MonitorConfig> {
    match path {
        Some(p) => {
            let config = MonitorConfig::load_from_file(p)?;
            info!(path = %p.display(), models = config.models.len(), "Loaded monitor config");
            Ok(config)
        }
        None => Ok(MonitorConfig::load()),
    }
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) => std::fs::read_to_string(p)
            .with_context(|| format!("Failed to read input file {}", p.display())),
        None => {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .context("Failed to read stdin")?;
            Ok(raw)
        }
    }
}

fn run_batch(args: &CliArgs) -> Result<BatchResult> {
    let config = load_config(args.config.as_deref())?;
    let pipeline = Pipeline::from_config(&config);
    let raw = read_input(args.input.as_deref())?;

    Ok(pipeline.process_json(&raw)?)
}

fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_logging(args.log_json);

    match &args.command {
        Some(SubCommand::CheckConfig { path }) => {
            return match check_config(path) {
                Ok(true) => ExitCode::SUCCESS,
                Ok(false) => ExitCode::FAILURE,
                Err(e) => {
                    eprintln!("error: {e:#}");
                    ExitCode::FAILURE
                }
            };
        }
        Some(SubCommand::DefaultConfig) => {
            return match default_config() {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    eprintln!("error: {e:#}");
                    ExitCode::FAILURE
                }
            };
        }
        None => {}
    }

    // Model panics are reported where they are contained
    std::panic::set_hook(Box::new(|info| {
        debug!(panic = %info, "Panic unwinding");
    }));

    let Outcome { body, exit_code } = render_outcome(args.pretty, || run_batch(&args));
    println!("{body}");
    ExitCode::from(exit_code)
}
