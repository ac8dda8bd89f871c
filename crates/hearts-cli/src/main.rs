use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use hearts_cli::config::GameConfig;
use hearts_cli::console::{Console, ConsolePlayer};
use hearts_cli::logging::init_logging;
use hearts_cli::session::{self, Settings};
use hearts_core::model::player::Strategy;

/// Hearts for 3 to 5 players at the terminal.
#[derive(Debug, Parser)]
#[command(name = "hearts", author, version, about = "Hearts for 3 to 5 players")]
struct Cli {
    /// Path to a YAML configuration file.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Score that ends the game once any player reaches it.
    #[arg(short, long, value_name = "POINTS")]
    target: Option<u32>,

    /// Number of players at the table (3 to 5).
    #[arg(short, long, value_name = "COUNT")]
    players: Option<usize>,

    /// RNG seed for seating and deals.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Name for the human seat.
    #[arg(long, value_name = "NAME")]
    name: Option<String>,

    /// Seat bots only; nothing is read from stdin once setup is complete.
    #[arg(long)]
    all_bots: bool,

    /// Draw cards as boxed art.
    #[arg(long)]
    pretty: bool,

    /// Write every game event as a JSON line to FILE.
    #[arg(long, value_name = "FILE")]
    events_jsonl: Option<PathBuf>,

    /// Override the tracing level (trace, debug, info, warn, error).
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Write JSON logs to FILE instead of stderr.
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn apply(self, config: &mut GameConfig) {
        if let Some(target) = self.target {
            config.target_score = Some(target);
        }
        if let Some(players) = self.players {
            config.players = Some(players);
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(name) = self.name {
            config.human.name = Some(name);
        }
        if self.all_bots {
            config.human.enabled = false;
        }
        if self.pretty {
            config.display.pretty = true;
        }
        if let Some(path) = self.events_jsonl {
            config.events_jsonl = Some(path);
        }
        if let Some(level) = self.log_level {
            config.logging.tracing_level = level;
        }
        if let Some(path) = self.log_file {
            config.logging.file = Some(path);
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = match cli.config.as_ref() {
        Some(path) => GameConfig::from_path(path)?,
        None => GameConfig::default(),
    };
    cli.apply(&mut config);
    config.validate()?;

    let _logging_guard = init_logging(&config.logging)?;

    let mut console = Console::stdio();
    console.say("Welcome to ♥ HEARTS ♥")?;
    let settings = Settings::resolve(&config, &mut console)?;

    let human = settings
        .human_name
        .is_some()
        .then(|| Box::new(ConsolePlayer::new(console, settings.style)) as Box<dyn Strategy>);

    let outcome = session::play(&settings, human, io::stdout()).context("playing game")?;
    if let (Some(lines), Some(path)) = (outcome.event_lines, settings.events_jsonl.as_ref()) {
        println!("Event log: {lines} events written to {}", path.display());
    }
    println!(
        "Game over after {} round{} (seed {}).",
        outcome.rounds,
        if outcome.rounds == 1 { "" } else { "s" },
        settings.seed
    );

    Ok(())
}
