//! Contract risk assessment CLI.
//!
//! Two modes: `scan` runs the fast tier only and prints a triage summary;
//! `assess` runs the full pipeline and emits a markdown or JSON report. Deep
//! analysis is enabled automatically when RISK_ANALYZER_API_KEY is set.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use risk_engine::{report, EngineConfig, HttpAnalyzer, RiskEngine};
use risk_types::{AnalysisContext, AnalysisDepth, UserRole};

#[derive(Parser, Debug)]
#[command(name = "risk-cli")]
#[command(version, about = "Two-tier contract risk assessment")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fast pattern scan only; no external calls.
    Scan {
        /// Path to a plain-text contract
        file: PathBuf,
    },
    /// Full assessment with selective deep analysis.
    Assess {
        /// Path to a plain-text contract
        file: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Markdown)]
        format: Format,

        /// Deep-analyze every clause instead of only material ones
        #[arg(long)]
        full: bool,

        /// Reviewer role: drafting-party, counterparty, or neutral
        #[arg(long, default_value = "neutral")]
        role: String,

        /// Document type hint passed to the analyzer, e.g. "saas_subscription"
        #[arg(long)]
        document_type: Option<String>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Format {
    Markdown,
    Json,
}

fn parse_role(value: &str) -> anyhow::Result<UserRole> {
    match value {
        "drafting-party" => Ok(UserRole::DraftingParty),
        "counterparty" => Ok(UserRole::Counterparty),
        "neutral" => Ok(UserRole::Neutral),
        other => anyhow::bail!("unknown role '{}'", other),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let config = EngineConfig::from_env();

    match args.command {
        Command::Scan { file } => {
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            let engine = RiskEngine::builtin(config)?;
            let result = engine.quick_scan(&text)?;

            println!(
                "Estimated risk: {} ({} matches, {:.0} ms)",
                result.estimated_risk_level.label(),
                result.total_matches,
                result.elapsed_ms
            );
            for (category, count) in &result.category_counts {
                println!("  {:<22} {}", category.label(), count);
            }
            if !result.clauses_to_deep_analyze.is_empty() {
                let clause_list = result
                    .clauses_to_deep_analyze
                    .iter()
                    .map(|i| (i + 1).to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                println!("Clauses warranting deep review: {}", clause_list);
            }
        }
        Command::Assess {
            file,
            format,
            full,
            role,
            document_type,
        } => {
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            let filename = file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| file.display().to_string());

            let mut engine = RiskEngine::builtin(config)?;
            if std::env::var("RISK_ANALYZER_API_KEY").is_ok() {
                engine = engine.with_analyzer(Arc::new(HttpAnalyzer::from_env()?));
            } else {
                tracing::warn!("RISK_ANALYZER_API_KEY not set; fast tier only");
            }

            let mut context = AnalysisContext::default().with_role(parse_role(&role)?);
            if full {
                context = context.with_depth(AnalysisDepth::Full);
            }
            if let Some(document_type) = document_type {
                context = context.with_document_type(&document_type);
            }

            let result = engine.analyze_document(&text, &filename, &context).await?;
            match format {
                Format::Markdown => println!("{}", report::to_markdown(&result)),
                Format::Json => println!("{}", report::to_json(&result)?),
            }
        }
    }

    Ok(())
}
