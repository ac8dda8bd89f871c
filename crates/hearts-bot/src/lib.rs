pub mod bot;
pub mod policy;

pub use bot::{BotDifficulty, DIFFICULTY_ENV, PassPlanner, PlayPlanner, PlayScenario};
pub use policy::{HeuristicPolicy, strategy_for};
