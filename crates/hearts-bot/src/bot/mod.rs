mod pass;
mod play;

pub use pass::PassPlanner;
pub use play::{PlayPlanner, PlayScenario};

use core::fmt;
use core::str::FromStr;
use std::sync::OnceLock;

pub const DIFFICULTY_ENV: &str = "HEARTS_BOT_DIFFICULTY";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BotDifficulty {
    /// Lowest legal card, pass the three highest.
    Basic,
    /// Suit-following and ducking heuristics.
    #[default]
    Advanced,
}

impl BotDifficulty {
    pub const ALL: [BotDifficulty; 2] = [BotDifficulty::Basic, BotDifficulty::Advanced];

    /// Difficulty forced through the environment, if any. Read once.
    pub fn from_env() -> Option<Self> {
        static CACHED: OnceLock<Option<BotDifficulty>> = OnceLock::new();
        *CACHED.get_or_init(|| Self::from_reader(|key| std::env::var(key).ok()))
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            BotDifficulty::Basic => "basic",
            BotDifficulty::Advanced => "advanced",
        }
    }

    fn from_reader<F>(mut read: F) -> Option<Self>
    where
        F: FnMut(&str) -> Option<String>,
    {
        read(DIFFICULTY_ENV).and_then(|raw| raw.parse().ok())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownDifficulty(pub String);

impl fmt::Display for UnknownDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown bot difficulty '{}' (expected basic or advanced)", self.0)
    }
}

impl std::error::Error for UnknownDifficulty {}

impl FromStr for BotDifficulty {
    type Err = UnknownDifficulty;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "basic" | "easy" => Ok(BotDifficulty::Basic),
            "advanced" | "better" | "normal" => Ok(BotDifficulty::Advanced),
            _ => Err(UnknownDifficulty(value.to_string())),
        }
    }
}

impl fmt::Display for BotDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::{BotDifficulty, DIFFICULTY_ENV};

    #[test]
    fn parses_names_and_aliases() {
        assert_eq!("basic".parse(), Ok(BotDifficulty::Basic));
        assert_eq!(" Better ".parse(), Ok(BotDifficulty::Advanced));
        assert!("hard".parse::<BotDifficulty>().is_err());
    }

    #[test]
    fn reader_resolves_env_value() {
        let read = |key: &str| (key == DIFFICULTY_ENV).then(|| "easy".to_string());
        assert_eq!(BotDifficulty::from_reader(read), Some(BotDifficulty::Basic));
        assert_eq!(BotDifficulty::from_reader(|_| None), None);
        assert_eq!(
            BotDifficulty::from_reader(|_| Some("nonsense".into())),
            None
        );
    }

    #[test]
    fn default_is_advanced() {
        assert_eq!(BotDifficulty::default(), BotDifficulty::Advanced);
        assert_eq!(BotDifficulty::Basic.to_string(), "basic");
    }
}
