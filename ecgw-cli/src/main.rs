//! ecgw - ECG warning system demo and single-segment analysis
//!
//! **Usage:**
//! ```bash
//! ecgw demo [--json] [--export <file>]
//! ecgw scenarios [--duration <secs>] [--only <scenario>]
//! ecgw analyze --heart-rate <bpm> --beats <labels> [--indices <i,..>] [--rr <s,..>]
//! ecgw init-config <path>
//! ```

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use ecgw_cli::{AnalysisExport, ReportFormatter, Scenario, DEMO_CASES};
use ecgw_common::config::{write_toml_config, ConfigResolver, OutputFormat, TomlConfig};
use ecgw_common::{analyze_segment, SegmentAnalysis, SegmentInput};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// ECG warning system
#[derive(Parser, Debug)]
#[command(name = "ecgw", version)]
#[command(about = "Classify ECG segment measurements and emit clinical alert reports")]
struct Args {
    /// Config file (overrides ECGW_CONFIG and the user config file)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print JSON instead of text reports
    #[arg(long, global = true)]
    json: bool,

    /// Export analyses to a JSON file
    #[arg(long, global = true, value_name = "FILE")]
    export: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze the built-in patient cases
    Demo,

    /// Analyze synthetic beat trains with RR timing
    Scenarios {
        /// Segment duration in seconds (above 1, at most 3600)
        #[arg(long, default_value_t = 8.0)]
        duration: f64,

        /// Run a single scenario
        #[arg(long, value_enum)]
        only: Option<Scenario>,
    },

    /// Analyze one segment
    Analyze {
        /// Heart rate in BPM
        #[arg(long, allow_negative_numbers = true)]
        heart_rate: f64,

        /// Beat labels, e.g. "NNVN" or "N,N,V,N"
        #[arg(long, default_value = "")]
        beats: String,

        /// Ascending beat sample indices, comma separated
        #[arg(long, value_delimiter = ',', conflicts_with = "rr")]
        indices: Vec<usize>,

        /// RR intervals in seconds, comma separated
        #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
        rr: Vec<f64>,

        /// Sampling rate for --indices (defaults to the configured rate)
        #[arg(long)]
        sampling_rate: Option<f64>,

        #[arg(long)]
        patient_id: Option<String>,
    },

    /// Write a config file populated with defaults
    InitConfig {
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Config is resolved under a temporary subscriber so its warnings are
    // visible before the configured log level is known
    let bootstrap = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .finish();
    let (config, source) = tracing::subscriber::with_default(bootstrap, || {
        ConfigResolver::new(args.config.clone()).load()
    })?;

    init_tracing(&config)?;

    info!(
        "Starting ECG Warning System (ecgw) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
    info!("Configuration: {}", source);

    let registry = ecgw_common::registry();
    info!("Alert level registry ready ({} levels)", registry.entries().len());

    let runs = match &args.command {
        Command::Demo => run_demo()?,
        Command::Scenarios { duration, only } => run_scenarios(&config, *duration, *only)?,
        Command::Analyze {
            heart_rate,
            beats,
            indices,
            rr,
            sampling_rate,
            patient_id,
        } => {
            let timing = if !indices.is_empty() {
                BeatTiming::Indices {
                    indices,
                    sampling_rate_hz: sampling_rate.unwrap_or(config.signal.sampling_rate_hz),
                }
            } else if !rr.is_empty() {
                BeatTiming::Intervals(rr)
            } else {
                BeatTiming::None
            };
            let input = build_input(*heart_rate, beats, timing, patient_id.as_deref())?;
            vec![(None, analyze_segment(&input)?)]
        }
        Command::InitConfig { path } => {
            if path.exists() {
                bail!("Refusing to overwrite existing file {}", path.display());
            }
            write_toml_config(&TomlConfig::default(), path)?;
            println!("Wrote default configuration to {}", path.display());
            return Ok(());
        }
    };

    let json = args.json || config.output.format == OutputFormat::Json;
    let titles: Vec<Option<String>> = runs.iter().map(|(title, _)| title.clone()).collect();
    let analyses: Vec<SegmentAnalysis> = runs.into_iter().map(|(_, analysis)| analysis).collect();
    let export = AnalysisExport::new(analyses);

    if json {
        println!("{}", serde_json::to_string_pretty(&export)?);
    } else {
        print_text(&export, &titles);
    }

    if let Some(export_path) = &args.export {
        let path = match &config.output.export_dir {
            Some(dir) if export_path.is_relative() => dir.join(export_path),
            _ => export_path.clone(),
        };
        match export.export_json(&path) {
            Ok(()) => info!("Results exported to {}", path.display()),
            Err(e) => {
                error!("Failed to export results: {}", e);
                return Err(e).with_context(|| format!("exporting to {}", path.display()));
            }
        }
    }

    Ok(())
}

fn init_tracing(config: &TomlConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match &config.logging.file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

/// Beat timing supplied to `analyze`
#[derive(Debug, Clone, Copy)]
enum BeatTiming<'a> {
    None,
    Intervals(&'a [f64]),
    Indices {
        indices: &'a [usize],
        sampling_rate_hz: f64,
    },
}

fn build_input(
    heart_rate: f64,
    beats: &str,
    timing: BeatTiming<'_>,
    patient_id: Option<&str>,
) -> Result<SegmentInput> {
    let mut input = SegmentInput::parse(heart_rate, beats)?;
    if let Some(id) = patient_id {
        input = input.with_patient_id(id);
    }
    input = match timing {
        BeatTiming::None => input,
        BeatTiming::Intervals(rr) => input.with_rr_intervals(rr.to_vec()),
        BeatTiming::Indices {
            indices,
            sampling_rate_hz,
        } => input.with_beat_indices(indices, sampling_rate_hz)?,
    };
    Ok(input)
}

fn run_demo() -> Result<Vec<(Option<String>, SegmentAnalysis)>> {
    let mut runs = Vec::with_capacity(DEMO_CASES.len());
    for (i, case) in DEMO_CASES.iter().enumerate() {
        info!("Case {}/{}: {}", i + 1, DEMO_CASES.len(), case.description);
        let analysis = analyze_segment(&case.to_input()?)?;
        runs.push((Some(case.description.to_string()), analysis));
    }
    Ok(runs)
}

fn run_scenarios(
    config: &TomlConfig,
    duration: f64,
    only: Option<Scenario>,
) -> Result<Vec<(Option<String>, SegmentAnalysis)>> {
    let scenarios: Vec<Scenario> = match only {
        Some(scenario) => vec![scenario],
        None => Scenario::all_variants().to_vec(),
    };

    let mut runs = Vec::with_capacity(scenarios.len());
    for scenario in scenarios {
        let segment = scenario.generate(duration, config.signal.sampling_rate_hz)?;
        info!(
            "Scenario {}: {} samples, {} beats at {:.0} BPM",
            scenario,
            segment.sample_count(),
            segment.labels.len(),
            segment.heart_rate
        );
        let analysis = analyze_segment(&segment.to_input()?)?;
        runs.push((Some(format!("Synthetic {} scenario", scenario)), analysis));
    }
    Ok(runs)
}

fn print_text(export: &AnalysisExport, titles: &[Option<String>]) {
    for (analysis, title) in export.analyses.iter().zip(titles) {
        print!(
            "{}",
            ReportFormatter::format_analysis(analysis, title.as_deref())
        );
    }
    if export.analyses.len() > 1 {
        print!("{}", ReportFormatter::format_summary(&export.summary));
    }
}
