use anyhow::{Context, Result, bail};
use clap::{Args, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;

use crate::cli::Output;
use crate::config::HablaConfig;
use crate::scanner::{ScanResult, ScanStats, Scanner, StatsObserver, TracingObserver};

#[derive(Args)]
pub struct ScanArgs {
    /// Path to the repository, file or directory (defaults to the current directory)
    #[arg(short, long, value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Maximum depth to scan (defaults to scanner.max_depth)
    #[arg(short = 'd', long)]
    pub max_depth: Option<usize>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Show statistics after scanning
    #[arg(long)]
    pub stats: bool,

    /// Character budget for the context (defaults to context.max_characters)
    #[arg(long)]
    pub max_characters: Option<usize>,

    /// Fail instead of warning when the context exceeds the budget
    #[arg(long)]
    pub enforce_budget: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    /// Character total followed by the context
    Text,
    /// JSON object with the total, the context and statistics
    Json,
}

pub async fn execute(args: ScanArgs, config_path: Option<&str>, output: &Output) -> Result<()> {
    let settings = HablaConfig::load(config_path)?
        .settings()
        .context("Failed to load configuration")?;

    let path = match args.path {
        Some(path) => path,
        None => std::env::current_dir().context("Failed to determine current directory")?,
    };
    let max_depth = args.max_depth.unwrap_or(settings.scanner.max_depth);
    let budget = args
        .max_characters
        .unwrap_or(settings.context.max_characters);

    output.verbose(&format!(
        "Scanning {} (max depth {})",
        path.display(),
        max_depth
    ));

    let stats = Arc::new(StatsObserver::new());
    let scanner = Scanner::with_observer(
        settings.scanner,
        Arc::new((TracingObserver, stats.clone())),
    );
    let result = tokio::task::spawn_blocking(move || scanner.scan_path(&path, max_depth))
        .await
        .context("Scan task failed")??;
    let stats = stats.snapshot();

    match args.format {
        OutputFormat::Text => {
            println!(
                "Total number of characters in the repository: {}",
                result.total_characters
            );
            println!("{}", result.context);
        }
        OutputFormat::Json => {
            let report = serde_json::json!({
                "total_characters": result.total_characters,
                "context": result.context,
                "stats": stats,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    if args.stats {
        print_stats(&stats, output);
    }

    check_budget(&result, budget, args.enforce_budget, output)
}

fn check_budget(result: &ScanResult, budget: usize, enforce: bool, output: &Output) -> Result<()> {
    if !result.exceeds(budget) {
        return Ok(());
    }
    let message = format!(
        "Your project is too big to be scanned ({} characters, budget {}). \
         Try to limit the depth of the scan with the -d option.",
        result.total_characters, budget
    );
    if enforce {
        bail!(message);
    }
    output.warning(&message);
    Ok(())
}

fn print_stats(stats: &ScanStats, output: &Output) {
    output.header("Scan statistics");
    output.key_value("Files included:", &stats.files_included.to_string());
    output.key_value("Characters:", &stats.characters.to_string());
    output.key_value("Files skipped:", &stats.files_skipped.to_string());
    output.key_value("Paths excluded:", &stats.paths_excluded.to_string());
    output.key_value("Exclusion files:", &stats.exclusion_files_found.to_string());
    if stats.unreadable_sources + stats.unreadable_nodes > 0 {
        output.key_value(
            "Unreadable:",
            &(stats.unreadable_sources + stats.unreadable_nodes).to_string(),
        );
    }
}
