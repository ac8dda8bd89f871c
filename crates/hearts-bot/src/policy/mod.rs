mod heuristic;

pub use heuristic::HeuristicPolicy;

use crate::bot::BotDifficulty;
use hearts_core::model::player::Strategy;

/// Boxed strategy for a seat, ready to hand to `Player::new`.
pub fn strategy_for(difficulty: BotDifficulty) -> Box<dyn Strategy> {
    Box::new(HeuristicPolicy::new(difficulty))
}
