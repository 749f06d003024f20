use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use tracing::info;

use ethics_board::cli::{Cli, Commands};
use ethics_board::config::Config;
use ethics_board::render::{render_page, Board, FeedLoader, FeedLocation, LoadOutcome};
use ethics_board::services::{build_document, write_document, CollectService};
use ethics_board::sources::GoogleNewsSource;

fn main() {
    ethics_board::logging::init();

    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    Config::load_dotenv();
    let cli = Cli::parse();

    // Load configuration
    let config = Config::from_env()?;

    match cli.command {
        Commands::Generate { output, dry_run } => {
            cmd_generate(&config, output, dry_run)?;
            Ok(())
        }
        Commands::Render { feed, output } => cmd_render(&config, feed, output),
        Commands::Run => {
            let written = cmd_generate(&config, None, false)?;
            let feed = written.map(|path| path.display().to_string());
            cmd_render(&config, feed, None)
        }
    }
}

/// Returns the path written, or `None` on a dry run
fn cmd_generate(
    config: &Config,
    output: Option<PathBuf>,
    dry_run: bool,
) -> anyhow::Result<Option<PathBuf>> {
    config.ensure_queries()?;

    let timeout = Duration::from_secs(config.timeout_secs);
    let source = GoogleNewsSource::new(&config.user_agent, timeout)?;
    let service = CollectService::new(source);
    let queries = config.search_queries();

    println!("Fetching {} queries...\n", queries.len());
    info!(queries = queries.len(), "starting collection");

    let result = service.collect(&queries);
    let report = &result.report;

    println!(
        "Queries: {} ok, {} failed. Items: {} seen, {} accepted, {} duplicates, {} rejected.",
        report.queries_ok,
        report.queries_failed,
        report.items_seen,
        report.accepted,
        report.duplicates,
        report.rejected
    );

    let document = build_document(&result.stories, config.max_stories_per_column, Utc::now());

    if dry_run {
        println!(
            "Dry run complete. Would write {} government and {} nonprofit stories.",
            document.government.len(),
            document.nonprofit.len()
        );
        return Ok(None);
    }

    let path = output.unwrap_or_else(|| config.output_path.clone());
    write_document(&document, &path)
        .with_context(|| format!("writing feed document to {}", path.display()))?;

    println!(
        "Wrote {} with {} government and {} nonprofit stories.",
        path.display(),
        document.government.len(),
        document.nonprofit.len()
    );

    Ok(Some(path))
}

fn cmd_render(config: &Config, feed: Option<String>, output: Option<PathBuf>) -> anyhow::Result<()> {
    let location = feed
        .map(|raw| FeedLocation::parse(&raw))
        .unwrap_or_else(|| FeedLocation::File(config.output_path.clone()));
    let page_path = output.unwrap_or_else(|| config.page_path.clone());

    let loader = FeedLoader::new(&config.user_agent, Duration::from_secs(config.timeout_secs))?;
    let outcome = loader.load(&location);

    if let LoadOutcome::Failed(reason) = &outcome {
        println!("Could not load {}: {}", location, reason);
        println!("Rendering fallback page.");
    }

    let page = render_page(&Board::from_outcome(&outcome));
    write_page(&page_path, &page)
        .with_context(|| format!("writing page to {}", page_path.display()))?;

    println!("Rendered {}", page_path.display());

    Ok(())
}

fn write_page(path: &Path, page: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, page)
}
