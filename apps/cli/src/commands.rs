//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr};
use sidenav_core::export::to_json;
use sidenav_core::redirects::{parse_redirects, redirects_to_json};
use sidenav_core::summary::{NavigationStats, render_preview};
use sidenav_core::{NavigationBuild, build_navigation};
use sidenav_shared::{AppConfig, init_config, load_config, load_config_from};
use tracing::info;

/// Top-level entries shown in the structure preview.
const PREVIEW_ITEMS: usize = 3;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// sidenav: turn a rendered docs sidebar into a navigation config.
#[derive(Parser)]
#[command(
    name = "sidenav",
    version,
    about = "Rebuild nested site navigation from a rendered documentation sidebar.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file to use instead of ~/.sidenav/sidenav.toml.
    #[arg(long, global = true, env = "SIDENAV_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Build a navigation file from a sidebar HTML page.
    Build {
        /// Sidebar HTML file.
        input: PathBuf,

        /// Output path for the navigation JSON.
        #[arg(short, long, default_value = "navigation.json")]
        out: PathBuf,

        /// Tab name (overrides config).
        #[arg(long)]
        tab: Option<String>,

        /// Language tag (overrides config).
        #[arg(long)]
        language: Option<String>,

        /// Write compact JSON instead of pretty-printed.
        #[arg(long)]
        compact: bool,
    },

    /// Print the reconstructed structure without writing anything.
    Preview {
        /// Sidebar HTML file.
        input: PathBuf,

        /// Top-level entries to show.
        #[arg(long, default_value_t = PREVIEW_ITEMS)]
        max_items: usize,

        /// Also dump the flat extracted items, one JSON object per line.
        #[arg(long)]
        items: bool,
    },

    /// Convert a `_redirects` table to JSON.
    Redirects {
        /// Redirect table file.
        #[arg(default_value = "_redirects")]
        input: PathBuf,

        /// Output path for the redirects JSON.
        #[arg(short, long, default_value = "redirects.json")]
        out: PathBuf,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "sidenav=info",
        1 => "sidenav=debug",
        _ => "sidenav=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config;
    match cli.command {
        Command::Build {
            input,
            out,
            tab,
            language,
            compact,
        } => {
            let mut config = resolve_config(config_path.as_deref())?;
            if let Some(tab) = tab {
                config.export.tab = tab;
            }
            if let Some(language) = language {
                config.export.language = language;
            }
            cmd_build(&input, &out, &config, compact).await
        }
        Command::Preview {
            input,
            max_items,
            items,
        } => {
            let config = resolve_config(config_path.as_deref())?;
            cmd_preview(&input, &config, max_items, items).await
        }
        Command::Redirects { input, out } => cmd_redirects(&input, &out).await,
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init().await,
            ConfigAction::Show => cmd_config_show(config_path.as_deref()).await,
        },
    }
}

/// Load the explicit config file if given, else the user config (or defaults).
fn resolve_config(path: Option<&Path>) -> Result<AppConfig> {
    let config = match path {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };
    Ok(config)
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn cmd_build(input: &Path, out: &Path, config: &AppConfig, compact: bool) -> Result<()> {
    let build = read_and_build(input, config).await?;

    let json = to_json(&build.document, !compact)?;
    tokio::fs::write(out, json)
        .await
        .wrap_err_with(|| format!("failed to write {}", out.display()))?;

    info!(out = %out.display(), "navigation written");

    print_stats(&build.stats);
    println!("  Output: {}", out.display());
    println!();
    print_preview(&build, PREVIEW_ITEMS);

    Ok(())
}

async fn cmd_preview(
    input: &Path,
    config: &AppConfig,
    max_items: usize,
    dump_items: bool,
) -> Result<()> {
    let build = read_and_build(input, config).await?;
    if dump_items {
        for item in &build.items {
            println!("{}", serde_json::to_string(item)?);
        }
    }
    print_stats(&build.stats);
    println!();
    print_preview(&build, max_items);
    Ok(())
}

async fn read_and_build(input: &Path, config: &AppConfig) -> Result<NavigationBuild> {
    info!(input = %input.display(), "reading sidebar markup");
    let markup = tokio::fs::read_to_string(input)
        .await
        .wrap_err_with(|| format!("failed to read {}", input.display()))?;

    Ok(build_navigation(&markup, config)?)
}

fn print_stats(stats: &NavigationStats) {
    println!();
    println!("  Items found:      {}", stats.items_discovered);
    println!("  Skipped markers:  {}", stats.skipped_markers);
    if stats.unbalanced_closes > 0 {
        println!("  Unmatched closes: {}", stats.unbalanced_closes);
    }
    println!(
        "  Top-level groups: {} of {}",
        stats.top_level_groups, stats.top_level_nodes
    );
    println!("  Groups:           {}", stats.groups);
    println!("  Pages:            {}", stats.pages);
    println!("  Total nodes:      {}", stats.total_nodes());
}

fn print_preview(build: &NavigationBuild, max_items: usize) {
    for language in &build.document.navigation.languages {
        for tab in &language.tabs {
            println!("  Tab: {} ({})", tab.tab, language.language);
            print!("{}", render_preview(&tab.groups, max_items));
        }
    }
}

async fn cmd_redirects(input: &Path, out: &Path) -> Result<()> {
    let content = tokio::fs::read_to_string(input)
        .await
        .wrap_err_with(|| format!("failed to read {}", input.display()))?;

    let table = parse_redirects(&content);
    let json = redirects_to_json(&table.redirects)?;
    tokio::fs::write(out, json)
        .await
        .wrap_err_with(|| format!("failed to write {}", out.display()))?;

    println!();
    println!("  Converted: {}", table.redirects.len());
    println!("  Skipped:   {}", table.skipped);
    println!("  Output:    {}", out.display());
    for (i, redirect) in table.redirects.iter().take(PREVIEW_ITEMS).enumerate() {
        println!("  {}. {} → {}", i + 1, redirect.source, redirect.destination);
    }
    if table.redirects.len() > PREVIEW_ITEMS {
        println!("  ... and {} more", table.redirects.len() - PREVIEW_ITEMS);
    }
    println!();

    Ok(())
}

async fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

async fn cmd_config_show(path: Option<&Path>) -> Result<()> {
    let config = resolve_config(path)?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}
