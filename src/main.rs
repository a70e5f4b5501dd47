use std::path::PathBuf;
use std::process;

use clap::Parser;
use crater::config::{MAX_TEAMS, SCREEN_HEIGHT, SCREEN_WIDTH};
use crater::game::{Game, MatchSetup};
use crater::render::{KeyboardInput, MacroquadRenderer};
use crater::{assets, logging};
use log::{LevelFilter, error, info};
use macroquad::prelude::*;

// --- Command Line Arguments ---
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// PNG map; fully opaque pixels are solid ground. Defaults to the built-in hills.
    #[arg(long)]
    map: Option<PathBuf>,

    /// Number of teams.
    #[arg(
        long,
        default_value_t = 3,
        value_parser = clap::value_parser!(u8).range(2..=MAX_TEAMS as i64)
    )]
    teams: u8,

    /// Characters per team.
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(1..))]
    characters: u8,

    /// Number of human-played teams, counted from team 1. The rest are computer players.
    #[arg(long, default_value_t = 1)]
    humans: u8,

    /// Seed for character placement randomness.
    #[arg(long)]
    seed: Option<u64>,

    /// Debug filter to specify log topics (e.g., "physics,turn,ai,combat")
    /// Available topics: physics, turn, ai, combat, events
    #[arg(long)]
    debug_filter: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn window_conf() -> Conf {
    Conf {
        window_title: "Crater".to_owned(),
        window_width: SCREEN_WIDTH,
        window_height: SCREEN_HEIGHT,
        window_resizable: false,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let args = Args::parse();

    let log_level = match args.log_level.to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    };

    if let Err(e) = logging::init_logger(log_level, args.debug_filter) {
        eprintln!("Warning: Failed to initialize logger: {}", e);
    }

    info!("Initializing Crater...");

    let (image, terrain) = match assets::load_map(args.map.as_deref()) {
        Ok(map) => map,
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    };

    let setup = MatchSetup {
        teams: args.teams as usize,
        characters_per_team: args.characters as usize,
        humans: args.humans.min(args.teams) as usize,
        seed: args.seed,
    };
    let mut game = Game::new(setup.build(terrain));

    let mut renderer = MacroquadRenderer::new(image);
    if let Err(e) = game.run(&mut renderer, &mut KeyboardInput).await {
        error!("Match aborted: {}", e);
        process::exit(1);
    }
}
