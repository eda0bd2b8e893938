use crate::core::{Color, Outcome};
use crate::game::{Game, GameRecord};
use crate::player::ai::AIConfig;
use crate::player::{AlphaBetaAI, PlayerController, RandomAI};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Opponent {
    AlphaBeta,
    Random,
}

impl std::str::FromStr for Opponent {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "alpha-beta" | "ab" => Ok(Opponent::AlphaBeta),
            "random" => Ok(Opponent::Random),
            other => anyhow::bail!("unknown opponent {:?} (expected alpha-beta or random)", other),
        }
    }
}

pub struct SelfPlayConfig {
    pub num_games: usize,
    pub opponent: Opponent,
    /// Alternate which color the engine plays from game to game.
    pub alternate_colors: bool,
    pub ai: AIConfig,
    /// Seed for the random opponent; `None` draws from entropy.
    pub seed: Option<u64>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameResult {
    pub engine_color: Color,
    pub winner: Option<Color>,
    pub moves: usize,
    pub black_discs: usize,
    pub white_discs: usize,
    pub time_ms: u128,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SelfPlayStats {
    pub total_games: usize,
    pub engine_wins: usize,
    pub opponent_wins: usize,
    pub draws: usize,
    pub avg_moves: f64,
    pub avg_time_ms: f64,
    pub opponent: String,
    pub games: Vec<GameResult>,
}

impl SelfPlayStats {
    pub fn new(opponent: Opponent) -> Self {
        Self {
            total_games: 0,
            engine_wins: 0,
            opponent_wins: 0,
            draws: 0,
            avg_moves: 0.0,
            avg_time_ms: 0.0,
            opponent: format!("{:?}", opponent),
            games: Vec::new(),
        }
    }

    pub fn add_result(&mut self, result: GameResult) {
        self.total_games += 1;
        match result.winner {
            Some(c) if c == result.engine_color => self.engine_wins += 1,
            Some(_) => self.opponent_wins += 1,
            None => self.draws += 1,
        }
        self.games.push(result);
        self.recalculate_averages();
    }

    fn recalculate_averages(&mut self) {
        if self.games.is_empty() {
            return;
        }
        let total_moves: usize = self.games.iter().map(|g| g.moves).sum();
        let total_time: u128 = self.games.iter().map(|g| g.time_ms).sum();
        self.avg_moves = total_moves as f64 / self.games.len() as f64;
        self.avg_time_ms = total_time as f64 / self.games.len() as f64;
    }
}

fn opponent_controller(
    config: &SelfPlayConfig,
    color: Color,
    game_num: usize,
) -> Box<dyn PlayerController> {
    match config.opponent {
        Opponent::AlphaBeta => Box::new(AlphaBetaAI::new(color, "AB-opponent", config.ai.clone())),
        Opponent::Random => match config.seed {
            Some(seed) => Box::new(RandomAI::seeded("Random", seed.wrapping_add(game_num as u64))),
            None => Box::new(RandomAI::new("Random")),
        },
    }
}

pub fn run_selfplay(config: &SelfPlayConfig) -> anyhow::Result<SelfPlayStats> {
    let mut stats = SelfPlayStats::new(config.opponent);

    for game_num in 1..=config.num_games {
        let start_time = Instant::now();
        let engine_color = if config.alternate_colors && game_num % 2 == 0 {
            Color::White
        } else {
            Color::Black
        };

        let engine = AlphaBetaAI::new(engine_color, "AB-engine", config.ai.clone());
        let opponent = opponent_controller(config, engine_color.opponent(), game_num);
        let (black, white): (&dyn PlayerController, &dyn PlayerController) = match engine_color {
            Color::Black => (&engine, opponent.as_ref()),
            Color::White => (opponent.as_ref(), &engine),
        };

        let mut game = Game::default();
        let record: GameRecord = game.play(black, white)?;

        let elapsed = start_time.elapsed();
        let result = GameResult {
            engine_color,
            winner: record.outcome.winner(),
            moves: record.move_count(),
            black_discs: record.black_discs,
            white_discs: record.white_discs,
            time_ms: elapsed.as_millis(),
        };

        log::info!(
            "game {}/{}: engine {} -> {} ({}-{}, {} moves, {:.1}s)",
            game_num,
            config.num_games,
            engine_color,
            match record.outcome {
                Outcome::Winner(c) if c == engine_color => "win",
                Outcome::Winner(_) => "loss",
                Outcome::Draw => "draw",
            },
            record.black_discs,
            record.white_discs,
            result.moves,
            elapsed.as_secs_f64()
        );
        stats.add_result(result);
    }

    log::info!(
        "engine {} / opponent {} / draws {} over {} games",
        stats.engine_wins,
        stats.opponent_wins,
        stats.draws,
        stats.total_games
    );
    Ok(stats)
}

/// Writes `stats` as JSON under `dir`, named by the current local time.
pub fn save_stats<P: AsRef<Path>>(stats: &SelfPlayStats, dir: P) -> anyhow::Result<PathBuf> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)?;

    let path = dir.join(format!(
        "selfplay_{}.json",
        chrono::Local::now().format("%Y%m%d_%H%M%S")
    ));
    let file = std::fs::File::create(&path)?;
    serde_json::to_writer_pretty(file, stats)?;
    Ok(path)
}
