pub mod core;
pub mod game;
pub mod logic;
pub mod player;
pub mod selfplay;


use crate::core::PositionSnapshot;
use crate::player::ai::{AIConfig, AlphaBetaAI, Decision, SearchError};

/// 思考ルーチンの入口
///
/// Builds the board from the snapshot, lets the engine search for the
/// snapshot's side and returns its decision. The snapshot's legal-move list
/// is authoritative; a disagreement with the grid is only logged.
pub fn decide(snapshot: &PositionSnapshot, config: &AIConfig) -> Result<Decision, SearchError> {
    let board = snapshot.to_board();
    log::debug!("position:\n{}", board);

    let computed = board.computed_legal_moves();
    if computed != board.legal_moves() {
        log::warn!(
            "supplied legal moves {:?} differ from the board's {:?}",
            board.legal_moves(),
            computed
        );
    }

    let engine = AlphaBetaAI::new(snapshot.side, "alpha-beta", config.clone());
    let decision = engine.decide(&board)?;
    log::info!(
        "{} plays {} (score {:?}, {} nodes)",
        snapshot.side,
        decision.best_move,
        decision.score,
        decision.stats.nodes
    );
    Ok(decision)
}
