//! Plays the engine against a baseline and writes the results as JSON.

use othello_ai::player::ai::AIConfig;
use othello_ai::selfplay::{run_selfplay, save_stats, Opponent, SelfPlayConfig};
use std::env;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: selfplay <num_games> [random|alpha-beta] [ai_config.json]");
        std::process::exit(2);
    }

    let num_games: usize = args[1].parse()?;
    let opponent: Opponent = match args.get(2) {
        Some(s) => s.parse()?,
        None => Opponent::Random,
    };
    let ai = match args.get(3) {
        Some(path) => AIConfig::load_or_default(path),
        None => AIConfig::default(),
    };

    let config = SelfPlayConfig {
        num_games,
        opponent,
        alternate_colors: true,
        ai,
        seed: None,
    };
    let stats = run_selfplay(&config)?;
    let path = save_stats(&stats, "selfplay_results")?;
    log::info!("results written to {}", path.display());
    Ok(())
}
