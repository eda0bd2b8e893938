use super::config::{AIConfig, ShortcutTrigger, MAX_PLY};
use super::evaluator::Evaluator;
use super::weights::WeightTable;
use crate::core::{Board, BoardError, Cell, Color, Move};
use crate::player::PlayerController;

use std::cell::RefCell;
use std::fmt;
use std::time::Instant;

/// Lower search bound ("no score yet" for the maximizer).
pub const SCORE_MIN: i32 = i32::MIN;
/// Upper search bound ("no score yet" for the minimizer).
pub const SCORE_MAX: i32 = i32::MAX;
/// Value of a node below the ply limit.
pub const LEAF_SCORE: i32 = 0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The root position offers no legal move.
    NoLegalMoves,
    /// The engine was asked to move for the side that is not to move.
    NotOurTurn { engine: Color, to_move: Color },
    Board(BoardError),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SearchError::NoLegalMoves => write!(f, "no legal moves at the root"),
            SearchError::NotOurTurn { engine, to_move } => {
                write!(f, "engine plays {} but {} is to move", engine, to_move)
            }
            SearchError::Board(e) => write!(f, "board error during search: {}", e),
        }
    }
}

impl std::error::Error for SearchError {}

impl From<BoardError> for SearchError {
    fn from(e: BoardError) -> Self {
        SearchError::Board(e)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Interior nodes expanded below the root.
    pub nodes: usize,
    pub cutoffs: usize,
    /// Deepest level expanded below the root (1 = the replies to a root move).
    pub depth: usize,
}

/// 一回の思考の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub best_move: Move,
    /// Root score of `best_move`; `None` when the search was skipped.
    pub score: Option<i32>,
    pub stats: SearchStats,
}

impl Decision {
    pub fn searched(&self) -> bool {
        self.score.is_some()
    }
}

pub struct AlphaBetaAI {
    player_id: Color,
    name: String,
    config: AIConfig,
    max_ply: usize,
    stats: RefCell<SearchStats>,
}

impl AlphaBetaAI {
    pub fn new(player_id: Color, name: &str, config: AIConfig) -> Self {
        Self {
            player_id,
            name: name.to_string(),
            config,
            max_ply: MAX_PLY,
            stats: RefCell::new(SearchStats::default()),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_max_ply(mut self, max_ply: usize) -> Self {
        self.max_ply = max_ply;
        self
    }

    pub fn player_id(&self) -> Color {
        self.player_id
    }

    /// 手詰まりの評価: value of a node where `stuck` has no legal move
    fn no_move_score(&self, stuck: Color) -> i32 {
        if stuck == self.player_id {
            self.config.search.own_no_move_score
        } else {
            self.config.search.opponent_no_move_score
        }
    }

    /// Chooses a move for `board`, building this decision's weight table
    /// from the position first.
    pub fn decide(&self, board: &Board) -> Result<Decision, SearchError> {
        let table = WeightTable::for_decision(board, self.player_id, &self.config.evaluation);
        self.decide_with(board, &table)
    }

    // --- Search Root ---
    pub fn decide_with<E: Evaluator>(
        &self,
        board: &Board,
        evaluator: &E,
    ) -> Result<Decision, SearchError> {
        if board.side_to_move() != self.player_id {
            return Err(SearchError::NotOurTurn {
                engine: self.player_id,
                to_move: board.side_to_move(),
            });
        }
        let moves = board.legal_moves();
        let first = *moves.first().ok_or(SearchError::NoLegalMoves)?;
        *self.stats.borrow_mut() = SearchStats::default();

        let shortcut = match self.config.search.shortcut {
            ShortcutTrigger::LegalMoveCount => moves.len() == 1,
            ShortcutTrigger::EmptyCellCount => board.count(Cell::Empty) == 1,
        };
        if shortcut {
            log::debug!("single candidate {}, skipping search", first);
            return Ok(Decision {
                best_move: first,
                score: None,
                stats: SearchStats::default(),
            });
        }

        let start_time = Instant::now();
        let penalty = self.config.search.root_mobility_penalty;
        let mut scratch = board.clone();
        let mut best: Option<(Move, i32)> = None;

        for &mv in moves {
            let record = scratch.apply_move(mv)?;
            let reply_mobility = scratch.legal_moves().len() as i32;
            let replier = scratch.side_to_move();
            let child = self
                .alpha_beta(&mut scratch, evaluator, 0, SCORE_MIN, SCORE_MAX)?
                .unwrap_or_else(|| self.no_move_score(replier));
            scratch.undo_move(record);

            let score = evaluator.weight(mv) - penalty * reply_mobility + child;
            log::trace!("root {} -> {}", mv, score);
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((mv, score));
            }
        }

        let (best_move, score) = best.ok_or(SearchError::NoLegalMoves)?;
        let stats = *self.stats.borrow();
        log::debug!(
            "{} searched {} nodes ({} cutoffs) in {:?} with {} weights",
            self.name,
            stats.nodes,
            stats.cutoffs,
            start_time.elapsed(),
            evaluator.name()
        );
        Ok(Decision {
            best_move,
            score: Some(score),
            stats,
        })
    }

    // --- Alpha-Beta Search ---
    //
    // A child's value enters its parent shifted by the move's weight and the
    // mobility term, so the window is shifted by the same amount on the way
    // down. This keeps every cutoff exact.
    fn alpha_beta<E: Evaluator>(
        &self,
        board: &mut Board,
        evaluator: &E,
        ply: usize,
        mut alpha: i32,
        mut beta: i32,
    ) -> Result<Option<i32>, SearchError> {
        if ply > self.max_ply {
            return Ok(Some(LEAF_SCORE));
        }
        {
            let mut stats = self.stats.borrow_mut();
            stats.nodes += 1;
            stats.depth = stats.depth.max(ply + 1);
        }

        let is_hero_pov = board.side_to_move() == self.player_id;
        let penalty = self.config.search.mobility_penalty;
        let moves = board.legal_moves().to_vec();
        let mut best: Option<i32> = None;

        for mv in moves {
            let record = board.apply_move(mv)?;
            let reply_mobility = board.legal_moves().len() as i32;
            let replier = board.side_to_move();
            let offset = if is_hero_pov {
                evaluator.weight(mv) - penalty * reply_mobility
            } else {
                -evaluator.weight(mv) + penalty * reply_mobility
            };

            let child = self.alpha_beta(
                board,
                evaluator,
                ply + 1,
                alpha.saturating_sub(offset),
                beta.saturating_sub(offset),
            )?;
            board.undo_move(record);
            let score = offset + child.unwrap_or_else(|| self.no_move_score(replier));

            if is_hero_pov {
                let max = best.map_or(score, |b| b.max(score));
                best = Some(max);
                alpha = alpha.max(max);
            } else {
                let min = best.map_or(score, |b| b.min(score));
                best = Some(min);
                beta = beta.min(min);
            }

            if alpha >= beta {
                self.stats.borrow_mut().cutoffs += 1;
                break;
            }
        }

        Ok(best)
    }
}

impl PlayerController for AlphaBetaAI {
    fn choose_move(&self, board: &Board, _moves: &[Move]) -> Option<Move> {
        match self.decide(board) {
            Ok(decision) => Some(decision.best_move),
            Err(e) => {
                log::error!("{}: {}", self.name, e);
                None
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Position, BOARD_SIZE};
    use crate::player::ai::config::{OPPONENT_NO_MOVE_SCORE, OWN_NO_MOVE_SCORE};
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::{Rng, SeedableRng};

    /// Weight table with arbitrary values, to produce varied trees.
    struct NoiseWeights([[i32; BOARD_SIZE]; BOARD_SIZE]);

    impl NoiseWeights {
        fn new(rng: &mut StdRng) -> Self {
            let mut w = [[0; BOARD_SIZE]; BOARD_SIZE];
            for row in w.iter_mut() {
                for cell in row.iter_mut() {
                    *cell = rng.gen_range(-1000..=1000);
                }
            }
            NoiseWeights(w)
        }
    }

    impl Evaluator for NoiseWeights {
        fn weight(&self, pos: Position) -> i32 {
            self.0[pos.row][pos.col]
        }

        fn name(&self) -> &str {
            "noise"
        }
    }

    /// Unpruned minimax with the same scoring rules.
    fn full_minimax<E: Evaluator>(
        ai: &AlphaBetaAI,
        board: &Board,
        evaluator: &E,
        ply: usize,
    ) -> Option<i32> {
        if ply > ai.max_ply {
            return Some(LEAF_SCORE);
        }
        let hero = board.side_to_move() == ai.player_id;
        let penalty = ai.config.search.mobility_penalty;
        board
            .legal_moves()
            .iter()
            .map(|&mv| {
                let mut next = board.clone();
                next.apply_move(mv).unwrap();
                let mobility = next.legal_moves().len() as i32;
                let child = full_minimax(ai, &next, evaluator, ply + 1)
                    .unwrap_or_else(|| ai.no_move_score(next.side_to_move()));
                if hero {
                    evaluator.weight(mv) + child - penalty * mobility
                } else {
                    -evaluator.weight(mv) + child + penalty * mobility
                }
            })
            .reduce(|a, b| if hero { a.max(b) } else { a.min(b) })
    }

    fn full_root<E: Evaluator>(ai: &AlphaBetaAI, board: &Board, evaluator: &E) -> (Move, i32) {
        let penalty = ai.config.search.root_mobility_penalty;
        let mut best: Option<(Move, i32)> = None;
        for &mv in board.legal_moves() {
            let mut next = board.clone();
            next.apply_move(mv).unwrap();
            let score = evaluator.weight(mv) - penalty * next.legal_moves().len() as i32
                + full_minimax(ai, &next, evaluator, 0)
                    .unwrap_or_else(|| ai.no_move_score(next.side_to_move()));
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((mv, score));
            }
        }
        best.unwrap()
    }

    fn random_position(rng: &mut StdRng, plies: usize) -> Board {
        let mut board = Board::standard_opening();
        for _ in 0..plies {
            match board.legal_moves().choose(rng).copied() {
                Some(mv) => {
                    board.apply_move(mv).unwrap();
                }
                None => {
                    if board.pass().is_err() || board.is_terminal() {
                        break;
                    }
                }
            }
        }
        board
    }

    #[test]
    fn test_opening_move_is_canonical() {
        let board = Board::standard_opening();
        let ai = AlphaBetaAI::new(Color::Black, "AB", AIConfig::default());
        let decision = ai.decide(&board).unwrap();

        let canonical = [
            Position::new(2, 3),
            Position::new(3, 2),
            Position::new(4, 5),
            Position::new(5, 4),
        ];
        assert!(canonical.contains(&decision.best_move));
        assert!(decision.searched());
        assert!(decision.stats.nodes > 0);
    }

    #[test]
    fn test_decision_is_deterministic() {
        let mut rng = StdRng::seed_from_u64(7);
        let board = random_position(&mut rng, 12);
        let ai = AlphaBetaAI::new(board.side_to_move(), "AB", AIConfig::default()).with_max_ply(2);
        let first = ai.decide(&board).unwrap();
        let second = ai.decide(&board).unwrap();
        assert_eq!(first, second);
        assert!(board.legal_moves().contains(&first.best_move));
    }

    #[test]
    fn test_alpha_beta_matches_full_minimax() {
        let mut rng = StdRng::seed_from_u64(2024);
        let mut total_cutoffs = 0;
        for round in 0..24 {
            let board = random_position(&mut rng, 6 + round % 30);
            if board.legal_moves().len() < 2 || board.is_terminal() {
                continue;
            }
            let noise = NoiseWeights::new(&mut rng);
            let max_ply = 1 + round % 2;
            let ai = AlphaBetaAI::new(board.side_to_move(), "AB", AIConfig::default())
                .with_max_ply(max_ply);

            let evaluation = AIConfig::default().evaluation;
            let table = WeightTable::for_decision(&board, ai.player_id(), &evaluation);
            for evaluator in [&table as &dyn Evaluator, &noise as &dyn Evaluator] {
                let pruned = ai.decide_with(&board, &DynEval(evaluator)).unwrap();
                let (mv, score) = full_root(&ai, &board, &DynEval(evaluator));
                assert_eq!(pruned.best_move, mv, "round {}", round);
                assert_eq!(pruned.score, Some(score), "round {}", round);
                total_cutoffs += pruned.stats.cutoffs;
            }
        }
        assert!(total_cutoffs > 0, "pruning never triggered");
    }

    struct DynEval<'a>(&'a dyn Evaluator);

    impl Evaluator for DynEval<'_> {
        fn weight(&self, pos: Position) -> i32 {
            self.0.weight(pos)
        }

        fn name(&self) -> &str {
            self.0.name()
        }
    }

    #[test]
    fn test_single_supplied_move_skips_search() {
        let opening = Board::standard_opening();
        let only = Position::new(5, 4);
        let board = Board::from_snapshot(*opening.cells(), Color::Black, vec![only]);
        let ai = AlphaBetaAI::new(Color::Black, "AB", AIConfig::default());

        let decision = ai.decide(&board).unwrap();
        assert_eq!(decision.best_move, only);
        assert!(!decision.searched());
        assert_eq!(decision.stats, SearchStats::default());
    }

    #[test]
    fn test_empty_cell_trigger_searches_single_move() {
        let opening = Board::standard_opening();
        let only = Position::new(5, 4);
        let board = Board::from_snapshot(*opening.cells(), Color::Black, vec![only]);
        let mut config = AIConfig::default();
        config.search.shortcut = ShortcutTrigger::EmptyCellCount;
        let ai = AlphaBetaAI::new(Color::Black, "AB", config).with_max_ply(1);

        let decision = ai.decide(&board).unwrap();
        assert_eq!(decision.best_move, only);
        assert!(decision.searched());
    }

    #[test]
    fn test_last_empty_cell_shortcut() {
        // Full board except (0,0); Black closes the diagonal.
        let mut cells = [[Cell::White; BOARD_SIZE]; BOARD_SIZE];
        cells[0][0] = Cell::Empty;
        cells[7][7] = Cell::Black;
        let board = Board::from_cells(cells, Color::Black);
        assert_eq!(board.legal_moves(), &[Position::new(0, 0)]);

        let mut config = AIConfig::default();
        config.search.shortcut = ShortcutTrigger::EmptyCellCount;
        let ai = AlphaBetaAI::new(Color::Black, "AB", config);
        let decision = ai.decide(&board).unwrap();
        assert_eq!(decision.best_move, Position::new(0, 0));
        assert!(!decision.searched());
    }

    #[test]
    fn test_no_legal_moves_is_an_error() {
        let board = Board::from_snapshot(*Board::standard_opening().cells(), Color::Black, vec![]);
        let ai = AlphaBetaAI::new(Color::Black, "AB", AIConfig::default());
        assert_eq!(ai.decide(&board), Err(SearchError::NoLegalMoves));
    }

    #[test]
    fn test_wrong_side_is_an_error() {
        let board = Board::standard_opening();
        let ai = AlphaBetaAI::new(Color::White, "AB", AIConfig::default());
        assert!(matches!(
            ai.decide(&board),
            Err(SearchError::NotOurTurn { .. })
        ));
    }

    #[test]
    fn test_untrusted_illegal_root_move_aborts() {
        let board = Board::from_snapshot(
            *Board::standard_opening().cells(),
            Color::Black,
            vec![Position::new(2, 3), Position::new(0, 0)],
        );
        let ai = AlphaBetaAI::new(Color::Black, "AB", AIConfig::default()).with_max_ply(0);
        assert_eq!(
            ai.decide(&board),
            Err(SearchError::Board(BoardError::IllegalMove(Position::new(0, 0))))
        );
    }

    #[test]
    fn test_prefers_corner() {
        // White at (1,1) between an empty corner and Black at (2,2).
        let mut cells = [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE];
        cells[1][1] = Cell::White;
        cells[2][2] = Cell::Black;
        cells[3][4] = Cell::White;
        cells[3][5] = Cell::Black;
        let board = Board::from_cells(cells, Color::Black);
        assert!(board.legal_moves().contains(&Position::new(0, 0)));

        // One reply deep: corner 1200 - 10 + 50 against (3,3) at 10 - 10 + 50.
        let ai = AlphaBetaAI::new(Color::Black, "AB", AIConfig::default()).with_max_ply(0);
        let decision = ai.decide(&board).unwrap();
        assert_eq!(decision.best_move, Position::new(0, 0));
        assert_eq!(decision.score, Some(1240));
    }

    #[test]
    fn test_shutting_out_the_opponent_scores_high() {
        // (0,2) takes White's last disc.
        let mut cells = [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE];
        cells[0][0] = Cell::Black;
        cells[0][1] = Cell::White;
        let board = Board::from_cells(cells, Color::Black);
        assert_eq!(board.legal_moves(), &[Position::new(0, 2)]);

        let mut config = AIConfig::default();
        config.search.shortcut = ShortcutTrigger::EmptyCellCount;
        let ai = AlphaBetaAI::new(Color::Black, "AB", config);
        let decision = ai.decide(&board).unwrap();
        // ramped edge weight 700, no replies, then the stuck opponent
        assert_eq!(decision.score, Some(700 + OPPONENT_NO_MOVE_SCORE));
    }

    #[test]
    fn test_being_shut_out_scores_low() {
        // After (0,0) White's only reply (7,4) leaves Black without a move.
        let mut cells = [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE];
        cells[1][1] = Cell::White;
        cells[2][2] = Cell::Black;
        cells[7][5] = Cell::Black;
        cells[7][6] = Cell::White;
        cells[7][7] = Cell::White;
        let board = Board::from_cells(cells, Color::Black);
        assert_eq!(board.legal_moves(), &[Position::new(0, 0)]);

        let mut config = AIConfig::default();
        config.search.shortcut = ShortcutTrigger::EmptyCellCount;
        let ai = AlphaBetaAI::new(Color::Black, "AB", config);
        let decision = ai.decide(&board).unwrap();
        // 1200 - 10 * 1, then -10 for White's edge move and the stuck engine
        assert_eq!(decision.score, Some(1200 - 10 - 10 + OWN_NO_MOVE_SCORE));

        let mut lenient = AIConfig::default();
        lenient.search.shortcut = ShortcutTrigger::EmptyCellCount;
        lenient.search.own_no_move_score = 0;
        let ai = AlphaBetaAI::new(Color::Black, "AB", lenient);
        assert_eq!(ai.decide(&board).unwrap().score, Some(1200 - 10 - 10));
    }

    #[test]
    fn test_ply_limit_on_opening() {
        let board = Board::standard_opening();
        // 4 root moves, 3 replies each, then 4 answers each
        for (max_ply, nodes) in [(0, 4), (1, 16), (2, 64)] {
            let ai =
                AlphaBetaAI::new(Color::Black, "AB", AIConfig::default()).with_max_ply(max_ply);
            let stats = ai.decide(&board).unwrap().stats;
            assert_eq!(stats.nodes, nodes, "max_ply {}", max_ply);
            assert_eq!(stats.depth, max_ply + 1, "max_ply {}", max_ply);
        }

        let ai = AlphaBetaAI::new(Color::Black, "AB", AIConfig::default());
        assert_eq!(ai.max_ply, MAX_PLY);
        assert_eq!(ai.decide(&board).unwrap().stats.depth, 5);
    }

    #[test]
    fn test_search_leaves_input_board_untouched() {
        let mut rng = StdRng::seed_from_u64(99);
        let board = random_position(&mut rng, 20);
        let before = board.clone();
        let ai = AlphaBetaAI::new(board.side_to_move(), "AB", AIConfig::default()).with_max_ply(2);
        let _ = ai.decide(&board);
        assert_eq!(board, before);
    }
}
