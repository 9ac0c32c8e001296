use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use othello_search::config::AppConfig;
use othello_search::protocol::Session;

/// Play one Othello game against a game manager over stdin/stdout.
#[derive(Parser)]
#[command(name = "othello-ai", about = "Othello search engine for a line-protocol game manager")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "othello.toml")]
    config: PathBuf,

    /// Override the engine name sent to the manager
    #[arg(long)]
    name: Option<String>,

    /// Print a config file with all defaults and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() -> Result<()> {
    // stdout carries the protocol, so logs go to stderr
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    if cli.print_default_config {
        print!("{}", AppConfig::default_toml().context("serializing default config")?);
        return Ok(());
    }

    let mut app_config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    if let Some(name) = cli.name {
        app_config.engine.name = name;
    }
    app_config.validate().context("invalid configuration")?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(stdin.lock(), stdout.lock(), app_config.engine.name.clone());
    let summary = session
        .run(&app_config.search)
        .context("game session failed")?;

    log::info!(
        "Played {} moves as {}; final score {}-{}",
        summary.turns,
        summary.color.name(),
        summary.final_score.0,
        summary.final_score.1
    );
    log::info!(
        "Searched {} nodes ({} leaves, {} cache hits, {} prunes)",
        summary.stats.nodes,
        summary.stats.leaves,
        summary.stats.cache_hits,
        summary.stats.prunes
    );
    Ok(())
}
