//! Terminal front end for the tldrkit pipeline.
//!
//! Presentation glue only: parses arguments into a platform selection and a
//! navigation request, runs one ingestion cycle, and renders the resulting
//! views. All lookup, ranking, and fallback behavior lives in the library
//! crates.

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;
use tldrkit_index::SEARCH_LIMIT;
use tldrkit_ingest::{
    CommandView, IngestConfig, Ingestor, NavRequest, ProgressCallback, Session, StatusCallback,
    View,
};
use tldrkit_protocol::{OptionsMode, Platform, PlatformSelection};

#[derive(Debug, Parser)]
#[command(
    name = "tldrkit",
    about = "Concise usage summaries for command-line tools",
    version
)]
struct TldrkitCli {
    /// Platform to search, in priority order (repeatable)
    #[arg(short = 'p', long = "platform", value_name = "PLATFORM", global = true)]
    platforms: Vec<String>,

    /// How {{short|long}} option placeholders are rendered: short, long, or both
    #[arg(long, value_name = "MODE", default_value = "short", global = true)]
    options_mode: String,

    /// Cache directory (defaults to the user cache directory)
    #[arg(long, value_name = "PATH", global = true)]
    cache_dir: Option<PathBuf>,

    /// Override the archive download URL
    #[arg(long, value_name = "URL", global = true)]
    archive_url: Option<String>,

    /// Print ingestion status and progress to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Look up a command and show its usage examples
    Lookup {
        /// Command name
        name: String,

        /// Exact platform; skips the selection-order fallback
        platform: Option<String>,
    },

    /// Search commands by name or description
    Search {
        query: String,

        /// Maximum number of results
        #[arg(short = 'n', long, default_value_t = SEARCH_LIMIT)]
        limit: usize,
    },

    /// List categories that have commands available
    Categories,

    /// Show one category's available commands
    Category {
        /// Category slug, e.g. filesystem or network
        slug: String,
    },

    /// List supported platforms
    Platforms,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = TldrkitCli::parse();
    run(cli).await
}

async fn run(cli: TldrkitCli) -> Result<()> {
    if matches!(cli.command, Command::Platforms) {
        render_platforms();
        return Ok(());
    }

    let selection = parse_selection(&cli.platforms)?;
    let mode = OptionsMode::from_str(&cli.options_mode)
        .map_err(|_| anyhow!("unknown options mode {:?} (expected short, long, or both)", cli.options_mode))?;

    let mut config = IngestConfig {
        cache_dir: resolve_cache_dir(cli.cache_dir),
        ..IngestConfig::default()
    };
    if let Some(url) = cli.archive_url {
        config.archive_url = url;
    }

    let mut ingestor = Ingestor::new(config).context("failed to set up ingestion")?;
    if cli.verbose {
        ingestor = ingestor
            .with_status_callback(status_to_stderr())
            .with_progress_callback(progress_to_stderr());
    }

    // Park the request the way a routing surface would, then replay it once
    // ingestion reaches a terminal state.
    let pending = ingestor.pending_nav();
    if let Some(request) = nav_request(&cli.command)? {
        pending.defer(request);
    }

    let outcome = ingestor.run().await;
    if outcome.is_degraded() {
        eprintln!(
            "{}",
            "warning: command database unavailable, using limited fallback data".yellow()
        );
    }
    let session = Session::new(outcome)
        .with_platforms(selection)
        .with_options_mode(mode);

    if let Some(request) = pending.take() {
        render_view(&session.resolve_nav(&request));
        return Ok(());
    }

    match cli.command {
        Command::Search { query, limit } => render_search(&session, &query, limit),
        Command::Categories => render_categories(&session),
        // Lookup and Category went through the pending-navigation path;
        // Platforms returned before ingestion.
        Command::Lookup { .. } | Command::Category { .. } | Command::Platforms => {}
    }
    Ok(())
}

fn nav_request(command: &Command) -> Result<Option<NavRequest>> {
    match command {
        Command::Lookup { name, platform } => {
            let platform = platform.as_deref().map(parse_platform).transpose()?;
            Ok(Some(NavRequest::Command {
                name: name.clone(),
                platform,
            }))
        }
        Command::Category { slug } => Ok(Some(NavRequest::Category { slug: slug.clone() })),
        Command::Search { .. } | Command::Categories | Command::Platforms => Ok(None),
    }
}

fn parse_platform(code: &str) -> Result<Platform> {
    Platform::from_str(code).map_err(|_| {
        anyhow!(
            "unknown platform {code:?} (expected one of: {})",
            known_platform_codes()
        )
    })
}

fn known_platform_codes() -> String {
    Platform::iter()
        .map(|platform| platform.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn parse_selection(codes: &[String]) -> Result<PlatformSelection> {
    if codes.is_empty() {
        return Ok(PlatformSelection::default());
    }
    let mut platforms = Vec::new();
    for code in codes {
        platforms.push(parse_platform(code)?);
    }
    Ok(PlatformSelection::new(platforms))
}

fn resolve_cache_dir(explicit: Option<PathBuf>) -> PathBuf {
    explicit.unwrap_or_else(|| {
        dirs::cache_dir()
            .map(|dir| dir.join("tldrkit"))
            .unwrap_or_else(|| PathBuf::from(".tldrkit"))
    })
}

fn status_to_stderr() -> StatusCallback {
    Arc::new(|message: &str| eprintln!("{}", message.dimmed()))
}

fn progress_to_stderr() -> ProgressCallback {
    let last_percent = AtomicUsize::new(usize::MAX);
    Arc::new(move |processed, total| {
        if total == 0 {
            return;
        }
        let percent = processed * 100 / total;
        if percent % 10 == 0 && last_percent.swap(percent, Ordering::Relaxed) != percent {
            eprintln!("{}", format!("processing archive entries... {percent}%").dimmed());
        }
    })
}

fn render_view(view: &View) {
    match view {
        View::Home => {
            println!(
                "tldrkit: try {} or {}",
                "tldrkit lookup tar".bright_cyan(),
                "tldrkit categories".bright_cyan()
            );
        }
        View::Command(command) => render_command(command),
        View::Category { category, commands } => {
            println!(
                "{} {}",
                category.name.bright_blue(),
                format!("({} commands available)", commands.len()).dimmed()
            );
            for command in commands {
                println!("  {command}");
            }
        }
        View::NotFound { query } => {
            println!(
                "{} the command {:?} wasn't found in the selected platforms",
                "✗".bright_red(),
                query
            );
            println!("  Tip: try selecting additional platforms with --platform.");
        }
    }
}

fn render_command(view: &CommandView) {
    println!(
        "{} {}",
        view.command.bright_cyan(),
        format!("[{}]", view.platform.display_name()).dimmed()
    );
    if !view.description.is_empty() {
        println!("  {}", view.description);
    }
    for example in &view.examples {
        println!();
        println!("  {} {}", "-".bright_yellow(), example.description);
        if !example.invocation.is_empty() {
            println!("    {}", example.invocation.bright_green());
        }
    }
}

fn render_search(session: &Session, query: &str, limit: usize) {
    let results = session.search(query, limit);
    if results.is_empty() {
        render_view(&View::NotFound {
            query: query.to_string(),
        });
        return;
    }
    for entry in results {
        println!(
            "{} {} {}",
            entry.command.bright_cyan(),
            format!("[{}]", entry.platform).dimmed(),
            entry.description
        );
    }
}

fn render_categories(session: &Session) {
    for (category, commands) in session.categories_with_commands() {
        println!(
            "{} {} {}",
            category.name.bright_blue(),
            format!("({})", commands.len()).dimmed(),
            format!("(tldrkit category {})", category.slug()).dimmed()
        );
    }
}

fn render_platforms() {
    for platform in Platform::iter() {
        let marker = if platform.default_selected() {
            " (default)"
        } else {
            ""
        };
        println!(
            "{:<10} {}{}",
            platform.to_string().bright_cyan(),
            platform.display_name(),
            marker.dimmed()
        );
    }
}
