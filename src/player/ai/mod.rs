pub mod alpha_beta;
pub mod config;
pub mod evaluator;
pub mod random;
pub mod weights;

pub use alpha_beta::{AlphaBetaAI, Decision, SearchError, SearchStats};
pub use config::{
    AIConfig, EvaluationConfig, SearchConfig, ShortcutTrigger, MAX_PLY, OPPONENT_NO_MOVE_SCORE,
    OWN_NO_MOVE_SCORE,
};
pub use evaluator::Evaluator;
pub use random::RandomAI;
pub use weights::WeightTable;
