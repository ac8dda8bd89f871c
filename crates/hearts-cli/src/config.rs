use hearts_core::model::player::{MAX_PLAYERS, MIN_PLAYERS};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

/// Game settings loaded from YAML. Anything left unset is asked for at the
/// terminal before the first deal.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct GameConfig {
    #[serde(default)]
    pub target_score: Option<u32>,
    #[serde(default)]
    pub players: Option<usize>,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub human: HumanConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub events_jsonl: Option<PathBuf>,
}

impl GameConfig {
    /// Load configuration from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let reader = BufReader::new(file);
        let mut cfg: GameConfig =
            serde_yaml::from_reader(reader).map_err(|source| ConfigError::Parse {
                source,
                path: path_buf.clone(),
            })?;
        cfg.validate().map_err(|source| ConfigError::Invalid {
            path: path_buf,
            source,
        })?;
        Ok(cfg)
    }

    /// Validate the configuration without performing I/O.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        if self.target_score == Some(0) {
            return Err(ValidationError::InvalidField {
                field: "target_score".to_string(),
                message: "target score needs to be at least 1".to_string(),
            });
        }

        if let Some(players) = self.players {
            if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&players) {
                return Err(ValidationError::InvalidField {
                    field: "players".to_string(),
                    message: format!(
                        "player count must be between {MIN_PLAYERS} and {MAX_PLAYERS}, got {players}"
                    ),
                });
            }
        }

        self.human.validate()?;
        self.logging.validate()?;

        if let Some(path) = self.events_jsonl.as_ref() {
            if path.components().count() == 0 {
                return Err(ValidationError::InvalidField {
                    field: "events_jsonl".to_string(),
                    message: "path must not be empty".to_string(),
                });
            }
        }

        Ok(())
    }
}

/// The interactive seat. Disabled for all-bot games.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct HumanConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub name: Option<String>,
}

impl Default for HumanConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            name: None,
        }
    }
}

impl HumanConfig {
    fn validate(&mut self) -> Result<(), ValidationError> {
        if let Some(name) = self.name.as_mut() {
            let trimmed = name.trim();
            if trimmed.is_empty() {
                return Err(ValidationError::InvalidField {
                    field: "human.name".to_string(),
                    message: "name must not be empty".to_string(),
                });
            }
            *name = trimmed.to_string();
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct DisplayConfig {
    /// Draw cards as boxed art instead of "Rank of Suit".
    #[serde(default)]
    pub pretty: bool,
}

/// Logging goes to stderr unless a file is configured, in which case it is
/// written there as JSON lines.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_tracing_level")]
    pub tracing_level: String,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            tracing_level: default_tracing_level(),
            file: None,
        }
    }
}

impl LoggingConfig {
    fn validate(&mut self) -> Result<(), ValidationError> {
        if self.tracing_level.trim().is_empty() {
            self.tracing_level = default_tracing_level();
        }
        if self.level().is_none() {
            return Err(ValidationError::InvalidField {
                field: "logging.tracing_level".to_string(),
                message: format!("unknown level '{}'", self.tracing_level),
            });
        }
        Ok(())
    }

    pub fn level(&self) -> Option<Level> {
        match self.tracing_level.trim().to_ascii_lowercase().as_str() {
            "trace" => Some(Level::TRACE),
            "debug" => Some(Level::DEBUG),
            "info" => Some(Level::INFO),
            "warn" | "warning" => Some(Level::WARN),
            "error" => Some(Level::ERROR),
            _ => None,
        }
    }
}

fn default_tracing_level() -> String {
    "warn".to_string()
}

fn default_true() -> bool {
    true
}

/// Errors surfaced when loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("invalid configuration in {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        source: ValidationError,
    },
}

impl ConfigError {
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. }
            | ConfigError::Parse { path, .. }
            | ConfigError::Invalid { path, .. } => path.as_path(),
        }
    }
}

/// Validation failures captured with contextual metadata.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}
