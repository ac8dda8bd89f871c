use crate::config::GameConfig;
use crate::console::Console;
use crate::lineup::{build_players, seat_plan};
use crate::render::{CardStyle, ConsoleNarrator, JsonlSink, Tee};
use anyhow::{Context, Result};
use hearts_bot::BotDifficulty;
use hearts_core::game::match_state::MatchState;
use hearts_core::model::player::{PlayerCount, Strategy};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Everything needed to start a game, with nothing left to ask.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub target: u32,
    pub players: PlayerCount,
    pub seed: u64,
    /// `None` seats only bots.
    pub human_name: Option<String>,
    pub style: CardStyle,
    pub events_jsonl: Option<PathBuf>,
}

impl Settings {
    /// Fill the gaps in `config` from the terminal. A missing seed is drawn
    /// at random.
    pub fn resolve(config: &GameConfig, console: &mut Console) -> Result<Self> {
        let target = match config.target_score {
            Some(target) => target,
            None => console.ask_target_score().context("reading target score")?,
        };
        let players = match config.players {
            Some(count) => PlayerCount::new(count)?,
            None => console.ask_player_count().context("reading player count")?,
        };
        let human_name = if config.human.enabled {
            match config.human.name.clone() {
                Some(name) => Some(name),
                None => Some(console.ask_name().context("reading player name")?),
            }
        } else {
            None
        };
        Ok(Self {
            target,
            players,
            seed: config.seed.unwrap_or_else(rand::random),
            human_name,
            style: CardStyle::from_pretty(config.display.pretty),
            events_jsonl: config.events_jsonl.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameOutcome {
    pub winner: usize,
    pub winner_name: String,
    pub totals: Vec<u32>,
    pub rounds: u32,
    pub event_lines: Option<usize>,
}

/// Seat the table, play to the end and narrate to `out`.
pub fn play<W: Write>(
    settings: &Settings,
    human: Option<Box<dyn Strategy>>,
    out: W,
) -> Result<GameOutcome> {
    let mut rng = StdRng::seed_from_u64(settings.seed);
    let human = settings.human_name.clone().zip(human);
    let plan = seat_plan(
        settings.players,
        human.is_some(),
        BotDifficulty::from_env(),
        &mut rng,
    );
    let players = build_players(&plan, human);
    info!(
        seed = settings.seed,
        players = settings.players.get(),
        target = settings.target,
        ?plan,
        "starting game"
    );

    let mut game = MatchState::with_seed(players, settings.target, settings.seed)?;
    let events = match settings.events_jsonl.as_ref() {
        Some(path) => Some(JsonlSink::new(BufWriter::new(create_file(path)?))),
        None => None,
    };
    let mut sink = Tee {
        primary: ConsoleNarrator::new(out, settings.style),
        secondary: events,
    };

    let winner = game.run(&mut sink)?;
    let event_lines = match sink.secondary.take() {
        Some(events) => Some(events.finish().context("writing event log")?),
        None => None,
    };

    Ok(GameOutcome {
        winner,
        winner_name: game.players()[winner].name().to_string(),
        totals: game.totals(),
        rounds: game.round_number() - 1,
        event_lines,
    })
}

fn create_file(path: &Path) -> Result<File> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("creating directory at {}", dir.display()))?;
    }
    File::create(path).with_context(|| format!("creating event log at {}", path.display()))
}
