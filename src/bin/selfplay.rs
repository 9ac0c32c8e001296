use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Serialize;

use othello_search::ai::{Agent, Algorithm, RandomAgent, SearchAgent, SearchStats};
use othello_search::arena::{game_seed, play_game, play_self_game, MatchStats};
use othello_search::config::{AppConfig, Opponent};
use othello_search::game::Color;

/// Run local Othello matches with the configured search engine.
#[derive(Parser)]
#[command(name = "selfplay", about = "Play the Othello engine against a random or mirrored opponent")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "othello.toml")]
    config: PathBuf,

    /// Override number of games
    #[arg(long)]
    games: Option<usize>,

    /// Override search depth (-1 = unbounded)
    #[arg(long, allow_hyphen_values = true)]
    depth: Option<i32>,

    /// Search algorithm: minimax or alpha-beta
    #[arg(long)]
    algorithm: Option<String>,

    /// Enable the transposition cache
    #[arg(long)]
    caching: bool,

    /// Enable node ordering
    #[arg(long)]
    ordering: bool,

    /// Opponent: random or self-play
    #[arg(long)]
    opponent: Option<String>,

    /// Base seed for the random opponent
    #[arg(long)]
    seed: Option<u64>,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Summary {
    engine: String,
    opponent: Opponent,
    #[serde(flatten)]
    stats: MatchStats,
    win_rate: f64,
    average_margin: f64,
    average_game_length: f64,
    search: SearchStats,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let mut app_config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(games) = cli.games {
        app_config.selfplay.games = games;
    }
    if let Some(depth) = cli.depth {
        app_config.search.depth_limit = depth;
    }
    if let Some(algorithm) = cli.algorithm.as_deref() {
        app_config.search.algorithm = match algorithm {
            "minimax" => Algorithm::Minimax,
            "alpha-beta" | "alphabeta" => Algorithm::AlphaBeta,
            other => bail!("unknown algorithm '{}' (expected 'minimax' or 'alpha-beta')", other),
        };
    }
    if cli.caching {
        app_config.search.caching = true;
    }
    if cli.ordering {
        app_config.search.ordering = true;
    }
    if let Some(opponent) = cli.opponent.as_deref() {
        app_config.selfplay.opponent = match opponent {
            "random" => Opponent::Random,
            "self-play" | "self" => Opponent::SelfPlay,
            other => bail!("unknown opponent '{}' (expected 'random' or 'self-play')", other),
        };
    }
    if cli.seed.is_some() {
        app_config.selfplay.seed = cli.seed;
    }
    app_config.validate().context("invalid configuration")?;

    let selfplay = &app_config.selfplay;
    let mut engine = SearchAgent::new(app_config.search.clone());
    let mut stats = MatchStats::new();

    for game_idx in 0..selfplay.games {
        let (record, engine_color) = match selfplay.opponent {
            Opponent::Random => {
                let mut random = match selfplay.seed {
                    Some(seed) => RandomAgent::seeded(game_seed(seed, game_idx)),
                    None => RandomAgent::new(),
                };
                // Alternate sides
                if game_idx % 2 == 0 {
                    (play_game(&mut engine, &mut random)?, Color::Dark)
                } else {
                    (play_game(&mut random, &mut engine)?, Color::Light)
                }
            }
            Opponent::SelfPlay => (play_self_game(&mut engine)?, Color::Dark),
        };
        stats.record(&record, engine_color);

        if !cli.json {
            println!(
                "Game {:>3}: engine {:<5} {:>2}-{:<2} {:?}",
                game_idx + 1,
                engine_color.name(),
                record.score.0,
                record.score.1,
                record.outcome
            );
        }
        log::info!("game {} finished after {} placements", game_idx + 1, record.moves.len());
    }

    let summary = Summary {
        engine: engine.name().to_string(),
        opponent: selfplay.opponent,
        win_rate: stats.win_rate(),
        average_margin: stats.average_margin(),
        average_game_length: stats.average_game_length(),
        stats,
        search: engine.total_stats(),
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!();
        println!("Engine:       {}", summary.engine);
        println!("Opponent:     {:?}", summary.opponent);
        println!(
            "Record:       {} W / {} L / {} D",
            summary.stats.wins, summary.stats.losses, summary.stats.draws
        );
        println!("Win rate:     {:.1}%", summary.win_rate * 100.0);
        println!("Avg margin:   {:+.1}", summary.average_margin);
        println!("Avg length:   {:.1}", summary.average_game_length);
        println!(
            "Search:       {} nodes, {} leaves, {} cache hits, {} prunes",
            summary.search.nodes,
            summary.search.leaves,
            summary.search.cache_hits,
            summary.search.prunes
        );
    }

    Ok(())
}
