//! Command-line entry point for the triage pipeline.

use anyhow::{Context, Result};
use clap::Parser;
use data_triage::insights::{InsightContext, InsightProvider, RuleBasedProvider};
use data_triage::{AnalysisSession, ReportGenerator, TriageConfig};
use dotenv::dotenv;
use std::path::PathBuf;
use tracing::warn;

#[cfg(feature = "ai")]
use data_triage::insights::{OllamaProvider, OpenRouterConfig, OpenRouterProvider};

/// Data-quality triage and anomaly reporting for tabular datasets.
#[derive(Parser, Debug)]
#[command(name = "data-triage", version, about)]
struct Args {
    /// Input file (CSV or Parquet)
    input: PathBuf,

    /// Output directory for the JSON report
    #[arg(short, long, default_value = "output")]
    output_dir: PathBuf,

    /// Output file name (without extension)
    #[arg(long)]
    output_name: Option<String>,

    /// Print the full report as JSON to stdout (suppresses logging)
    #[arg(long)]
    json: bool,

    /// Do not write the report to disk
    #[arg(long)]
    no_save: bool,

    /// Skip LLM insight generation and use the rule-based fallback
    #[arg(long)]
    no_ai: bool,

    /// Use a local Ollama server instead of OpenRouter
    #[arg(long)]
    ollama: bool,

    /// Model to use for insight generation
    #[arg(long)]
    model: Option<String>,

    /// Missing fraction at which a column counts as quasi-empty
    #[arg(long, default_value_t = 0.9)]
    quasi_empty_threshold: f64,

    /// Missing fraction above which a column is flagged high-missing
    #[arg(long, default_value_t = 0.5)]
    high_missing_threshold: f64,

    /// Parseable fraction above which a text column is converted to numeric
    #[arg(long, default_value_t = 0.5)]
    numeric_conversion_threshold: f64,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Suppress all logging output
    #[arg(short, long)]
    quiet: bool,
}

fn init_logging(args: &Args) {
    if args.json || args.quiet {
        return;
    }

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(args.log_level.clone()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn select_provider(args: &Args) -> Box<dyn InsightProvider> {
    if args.no_ai {
        return Box::new(RuleBasedProvider::new());
    }

    #[cfg(feature = "ai")]
    {
        if args.ollama {
            let model = args
                .model
                .clone()
                .unwrap_or_else(|| data_triage::insights::local::DEFAULT_MODEL.to_string());
            match OllamaProvider::new(model) {
                Ok(provider) if provider.is_available() => return Box::new(provider),
                Ok(_) => warn!("Ollama server not reachable, using rule-based insights"),
                Err(e) => warn!(error = %e, "failed to set up Ollama provider"),
            }
        } else if let Ok(api_key) = std::env::var("OPENROUTER_API_KEY") {
            let mut builder = OpenRouterConfig::builder();
            if let Some(model) = &args.model {
                builder = builder.model(model);
            }
            match OpenRouterProvider::with_config(api_key, builder.build()) {
                Ok(provider) => return Box::new(provider),
                Err(e) => warn!(error = %e, "failed to set up OpenRouter provider"),
            }
        } else {
            tracing::info!("OPENROUTER_API_KEY not set, using rule-based insights");
        }
    }

    Box::new(RuleBasedProvider::new())
}

fn main() -> Result<()> {
    dotenv().ok();
    let args = Args::parse();
    init_logging(&args);

    let config = TriageConfig::builder()
        .quasi_empty_threshold(args.quasi_empty_threshold)
        .high_missing_threshold(args.high_missing_threshold)
        .numeric_conversion_threshold(args.numeric_conversion_threshold)
        .output_dir(&args.output_dir)
        .output_name(args.output_name.clone().unwrap_or_else(|| {
            args.input
                .file_stem()
                .map(|s| format!("{}_triage", s.to_string_lossy()))
                .unwrap_or_else(|| "triage_report".to_string())
        }))
        .use_ai_insights(!args.no_ai)
        .save_to_disk(!args.no_save)
        .build()
        .context("Invalid configuration")?;

    let df = data_triage::loader::load_table(&args.input)
        .with_context(|| format!("Failed to load {}", args.input.display()))?;

    let session =
        AnalysisSession::load(df, &config).context("Failed to analyze the dataset")?;

    let provider = select_provider(&args);
    let anomaly_report = session.anomaly_report();
    let insight_context = InsightContext {
        analysis: session.analysis(),
        anomaly_report: &anomaly_report,
    };
    let insights = match provider.generate_insights(&insight_context) {
        Ok(insights) => Some(insights),
        Err(e) => {
            warn!(provider = provider.name(), error = %e, "insight generation failed, falling back");
            RuleBasedProvider::new()
                .generate_insights(&insight_context)
                .ok()
        }
    };

    let generator = ReportGenerator::new(&config);
    let report = generator.build_report(&session, Some(&args.input), insights);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report);
    }

    if config.save_to_disk {
        let path = generator.write_report(&report)?;
        if !args.json {
            println!("\nReport written to {}", path.display());
        }
    }

    Ok(())
}

fn print_summary(report: &data_triage::TriageReport) {
    println!(
        "Dataset: {} rows x {} columns",
        report.original_shape.0, report.original_shape.1
    );
    println!(
        "Quality score: {:.1}/100 ({:?})",
        report.quality_score, report.quality_tier
    );
    println!(
        "Anomaly categories: {} | warnings: {}",
        report.anomaly_report.summary.total_anomalies, report.anomaly_report.summary.warnings_count
    );

    if !report.excluded_columns.is_empty() {
        println!(
            "Excluded from visualization: {}",
            report.excluded_columns.join(", ")
        );
    }
    for warning in &report.cleaning_report.warnings {
        println!("  ! {warning}");
    }
    for recommendation in &report.recommendations {
        println!("  - {recommendation}");
    }
    if let Some(insights) = &report.insights {
        println!("\n{}", insights.executive_summary);
    }
}
