//! Command-line front end for citation overlap analysis.
//!
//! Runs the same analysis as the HTTP service on local files and prints the
//! tables to the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Manual mode: reference results are tagged lines in the citations file
//! cargo run --bin overlap -- analyze --queries queries.txt --citations citations.txt
//!
//! # Fetch reference results from SerpAPI and write all exports
//! SERPAPI_KEY=... cargo run --bin overlap -- analyze \
//!     --queries queries.txt --citations citations.txt --mode auto --export-dir out/
//!
//! # Batch table, read from stdin
//! cargo run --bin overlap -- analyze --batch - < batch.csv
//!
//! # Show the registrable domain of URLs
//! cargo run --bin overlap -- normalize https://www.bbc.co.uk/news
//!
//! # Check environment configuration
//! cargo run --bin overlap -- config check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server; see `citation_overlap::config`. `SERPAPI_KEY` is
//! required only for `--mode auto`.

use citation_overlap::api::dto::analyze::AnalyzeResponse;
use citation_overlap::application::services::report_service::recommendation;
use citation_overlap::application::services::{AnalysisRequest, ExportTable, ResolveMode};
use citation_overlap::config::{self, Config};
use citation_overlap::domain::entities::AnalysisReport;
use citation_overlap::utils::domain_normalizer::normalize;
use citation_overlap::{logging, server};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::*;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Width of the query column in the results table.
const QUERY_COLUMN: usize = 32;

/// CLI tool for citation overlap analysis.
#[derive(Parser)]
#[command(name = "overlap")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log at the configured level instead of warnings only
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// Analyze a batch of queries
    Analyze(AnalyzeArgs),

    /// Print the registrable domain of each URL
    Normalize {
        /// URLs to normalize
        #[arg(required = true)]
        urls: Vec<String>,
    },

    /// Configuration operations
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Args)]
struct AnalyzeArgs {
    /// File with one query per line ("-" for stdin)
    #[arg(short, long)]
    queries: Option<PathBuf>,

    /// File with pasted citation text ("-" for stdin)
    #[arg(short, long)]
    citations: Option<PathBuf>,

    /// Batch CSV with query, referenceUrls, candidateUrls columns ("-" for stdin)
    #[arg(short, long)]
    batch: Option<PathBuf>,

    /// Where reference results come from
    #[arg(short, long, value_enum, default_value_t = Mode::Manual)]
    mode: Mode,

    /// Shared-rate divisor (defaults to REFERENCE_BASELINE)
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..=100))]
    baseline: Option<u16>,

    /// Write every export table into this directory
    #[arg(short, long)]
    export_dir: Option<PathBuf>,

    /// Number of domains to print
    #[arg(long, default_value_t = 20)]
    top: usize,

    /// Print the JSON response instead of tables
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    /// Reference results from tagged lines or the batch table
    Manual,
    /// Reference results fetched from the search provider
    Auto,
}

impl From<Mode> for ResolveMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Manual => ResolveMode::Manual,
            Mode::Auto => ResolveMode::AutoFetch,
        }
    }
}

/// Configuration subcommands.
#[derive(Subcommand)]
enum ConfigAction {
    /// Validate environment configuration
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze(args) => {
            let config = config::load_from_env()?;
            let level = if cli.verbose { config.log_level.as_str() } else { "warn" };
            logging::init(level, &config.log_format)?;
            handle_analyze(args, &config).await?
        }
        Commands::Normalize { urls } => handle_normalize(&urls),
        Commands::Config { action } => match action {
            ConfigAction::Check => handle_config_check()?,
        },
    }

    Ok(())
}

/// Runs one batch and prints or exports the result.
async fn handle_analyze(args: AnalyzeArgs, config: &Config) -> Result<()> {
    let queries = read_input(args.queries.as_deref())?.unwrap_or_default();
    let citations = read_input(args.citations.as_deref())?.unwrap_or_default();
    let batch = read_input(args.batch.as_deref())?;

    let baseline = args
        .baseline
        .map(usize::from)
        .unwrap_or(config.reference_baseline);

    let request = AnalysisRequest::from_inputs(&queries, &citations, batch.as_deref())?
        .with_mode(args.mode.into())
        .with_baseline(baseline);

    let service = server::build_analysis_service(config)?;
    let report = service.analyze(request).await?;

    if args.json {
        let response = AnalyzeResponse::from(report.clone());
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print_results(&report);
        print_domains(&report, args.top);
        print_summary(&report);
        print_warnings(&report);
    }

    if let Some(dir) = args.export_dir {
        write_exports(&report, &dir)?;
    }

    Ok(())
}

/// Reads a file, or stdin for `-`. `None` when no path was given.
fn read_input(path: Option<&Path>) -> Result<Option<String>> {
    let Some(path) = path else {
        return Ok(None);
    };

    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        return Ok(Some(buf));
    }

    std::fs::read_to_string(path)
        .map(Some)
        .with_context(|| format!("Failed to read {}", path.display()))
}

/// Prints the per-query table.
///
/// # Output Format
///
/// ```text
/// 📊 Per-query metrics
///
///   Query                             Ref  Cit  Shared  Novel  SVR    UAVR
///   ──────────────────────────────────────────────────────────────────────
///   best running shoes                10   3    1       2      0.100  0.667
/// ```
fn print_results(report: &AnalysisReport) {
    println!("{}", "📊 Per-query metrics".bright_blue().bold());
    println!();
    println!(
        "  {:<width$} {:<4} {:<4} {:<7} {:<6} {:<6} {:<6}",
        "Query".bright_white().bold(),
        "Ref".bright_white().bold(),
        "Cit".bright_white().bold(),
        "Shared".bright_white().bold(),
        "Novel".bright_white().bold(),
        "SVR".bright_white().bold(),
        "UAVR".bright_white().bold(),
        width = QUERY_COLUMN
    );
    println!("  {}", "─".repeat(QUERY_COLUMN + 40).bright_black());

    for result in &report.results {
        let m = &result.metrics;
        let svr = format!("{:.3}", m.shared_rate);
        let svr = if m.shared_rate >= 0.5 { svr.green() } else { svr.normal() };

        println!(
            "  {:<width$} {:<4} {:<4} {:<7} {:<6} {:<6} {:<6}",
            truncate(m.query.as_str(), QUERY_COLUMN).cyan(),
            m.reference_count,
            m.candidate_count,
            m.shared_count,
            m.novel_count,
            svr,
            format!("{:.3}", m.novel_rate),
            width = QUERY_COLUMN
        );

        if let Some(ref error) = result.reference_error {
            println!("    {} {}", "⚠️ ".yellow(), error.yellow());
        } else {
            println!("    {}", recommendation(result).bright_black());
        }
    }
    println!();
}

/// Prints the domain frequency table.
fn print_domains(report: &AnalysisReport, top: usize) {
    println!("{}", "🌐 Most cited domains".bright_blue().bold());
    println!();

    if report.domains.is_empty() {
        println!("{}", "  No citation domains detected".yellow());
        println!();
        return;
    }

    println!(
        "  {:<40} {:<6} {:<6}",
        "Domain".bright_white().bold(),
        "Count".bright_white().bold(),
        "Repeat".bright_white().bold()
    );
    println!("  {}", "─".repeat(54).bright_black());

    for entry in report.domains.top(top) {
        println!(
            "  {:<40} {:<6} {:.3}",
            entry.domain.cyan(),
            entry.count,
            entry.repeat_rate
        );
    }

    let hidden = report.domains.domains.len().saturating_sub(top);
    if hidden > 0 {
        println!("  {}", format!("... and {hidden} more").bright_black());
    }
    println!();
}

fn print_summary(report: &AnalysisReport) {
    let summary = &report.summary;

    println!("{}", "📋 Summary".bright_blue().bold());
    println!();
    println!(
        "  Queries:           {}",
        summary.query_count.to_string().bright_white().bold()
    );
    println!(
        "  Average SVR:       {}",
        format!("{:.3}", summary.average_shared_rate).bright_green().bold()
    );
    println!(
        "  Average UAVR:      {}",
        format!("{:.3}", summary.average_novel_rate).bright_green().bold()
    );
    println!("  Total citations:   {}", summary.total_citations);
    println!("  Distinct domains:  {}", summary.unique_domains);
    if summary.failed_fetches > 0 {
        println!(
            "  Failed fetches:    {}",
            summary.failed_fetches.to_string().red().bold()
        );
    }

    println!();
    println!("  {}", "SVR distribution:".bright_white());
    for bin in &summary.shared_rate_histogram {
        println!(
            "    {:.1}-{:.1}  {:<3} {}",
            bin.lower,
            bin.upper,
            bin.count,
            "█".repeat(bin.count).bright_green()
        );
    }
    println!();
}

fn print_warnings(report: &AnalysisReport) {
    if !report.has_warnings() {
        return;
    }

    println!("{}", "⚠️  Warnings".yellow().bold());
    for warning in &report.warnings {
        println!("  - {}", warning.yellow());
    }
    println!();
}

/// Writes every [`ExportTable`] into `dir`, creating it if needed.
fn write_exports(report: &AnalysisReport, dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;

    for table in ExportTable::ALL {
        let path = dir.join(table.file_name());
        std::fs::write(&path, table.render(report))
            .with_context(|| format!("Failed to write {}", path.display()))?;
        eprintln!("{} {}", "✅ Wrote".green(), path.display());
    }

    Ok(())
}

fn handle_normalize(urls: &[String]) {
    for url in urls {
        let domain = normalize(url);
        if domain.is_empty() {
            println!("{}  {}", url, "(empty)".bright_black());
        } else {
            println!("{}  {}", url, domain.cyan());
        }
    }
}

/// Validates the environment configuration and prints a summary.
fn handle_config_check() -> Result<()> {
    println!("{}", "🔍 Checking configuration...".bright_blue());

    let config = Config::from_env()?;
    match config.validate() {
        Ok(()) => {
            println!("{}", "✅ Configuration is valid".green().bold());
            println!();
            println!("  Listen address:     {}", config.listen_addr.cyan());
            println!(
                "  Auto-fetch:         {}",
                if config.is_auto_fetch_enabled() {
                    "enabled".green()
                } else {
                    "disabled (SERPAPI_KEY not set)".yellow()
                }
            );
            println!("  Provider timeout:   {}s", config.provider_timeout_secs);
            println!("  Reference baseline: {}", config.reference_baseline);
            println!("  Fetch concurrency:  {}", config.fetch_concurrency);
            Ok(())
        }
        Err(e) => {
            println!("{}", "❌ Configuration is invalid".red().bold());
            Err(e)
        }
    }
}

/// Shortens `text` to `max` characters, marking the cut with an ellipsis.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}
