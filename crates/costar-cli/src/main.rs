//! `costar`: find the shortest co-star chain between two actors.

mod output;

use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use costar_catalog::{CachedDataSource, ImdbCatalog, InMemoryCatalog};
use costar_core::config::CliOverrides;
use costar_core::errors::CostarErrorCode;
use costar_core::{CostarConfig, IDataSource, IProgressSink, ProgressEvent};
use costar_search::{SearchEngine, SearchOutcome};

const EXIT_FOUND: i32 = 0;
const EXIT_NOT_FOUND: i32 = 1;
const EXIT_FAILURE: i32 = 2;

#[derive(Parser)]
#[command(name = "costar", version)]
#[command(about = "Find the shortest chain of shared movies between two actors")]
struct Cli {
    /// Actor to start from
    start: String,

    /// Actor to reach
    target: String,

    /// Maximum number of hops to search
    #[arg(long)]
    max_depth: Option<usize>,

    /// Search a JSON catalog snapshot instead of the web catalog
    #[arg(long, value_name = "FILE")]
    catalog: Option<PathBuf>,

    /// Web catalog base URL
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Worker threads per search level (1 = deterministic sequential search)
    #[arg(long)]
    parallelism: Option<usize>,

    /// Give up after this many seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Directory holding costar.toml (default: current directory)
    #[arg(long, value_name = "DIR")]
    config_dir: Option<PathBuf>,

    /// Print the search report as JSON
    #[arg(long)]
    json: bool,

    /// Suppress progress lines
    #[arg(long, short)]
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("{} {e:#}", "error:".red().bold());
            process::exit(EXIT_FAILURE);
        }
    }
}

fn run(cli: &Cli) -> Result<i32> {
    let root = match &cli.config_dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().context("cannot determine the current directory")?,
    };
    let overrides = CliOverrides {
        max_depth: cli.max_depth,
        parallelism: cli.parallelism,
        timeout_secs: cli.timeout_secs,
        base_url: cli.base_url.clone(),
    };
    let config = CostarConfig::load(&root, Some(&overrides)).context("loading configuration")?;
    costar_observability::init_from_config(&config.observability);

    let source = open_source(cli, &config)?;
    let engine = SearchEngine::new(source, config.search.clone());
    let max_depth = config.search.effective_max_depth();

    let print_progress = |event: &ProgressEvent| output::progress_line(event);
    let sink: Option<&dyn IProgressSink> = if cli.quiet { None } else { Some(&print_progress) };

    let started = Instant::now();
    let report = match engine.search(&cli.start, &cli.target, max_depth, sink) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e.coded_string());
            return Ok(EXIT_FAILURE);
        }
    };
    let elapsed = started.elapsed();

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        output::print_outcome(&report.outcome);
        output::print_elapsed(elapsed);
    }

    Ok(match report.outcome {
        SearchOutcome::Found { .. } => EXIT_FOUND,
        SearchOutcome::NotFound { .. } => EXIT_NOT_FOUND,
        SearchOutcome::Failed { .. } => EXIT_FAILURE,
    })
}

/// Snapshot file when given, the web catalog otherwise; memoized either way.
fn open_source(cli: &Cli, config: &CostarConfig) -> Result<Arc<dyn IDataSource>> {
    let source: Arc<dyn IDataSource> = match &cli.catalog {
        Some(path) => {
            let catalog = InMemoryCatalog::from_snapshot_file(path)
                .with_context(|| format!("loading catalog {}", path.display()))?
                .with_config(&config.catalog);
            Arc::new(CachedDataSource::new(catalog, &config.cache))
        }
        None => {
            let catalog = ImdbCatalog::new(&config.catalog).context("creating web catalog client")?;
            tracing::debug!(base_url = catalog.base_url(), "using web catalog");
            Arc::new(CachedDataSource::new(catalog, &config.cache))
        }
    };
    Ok(source)
}
