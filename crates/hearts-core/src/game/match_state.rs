use crate::model::card::TOTAL_PENALTY;
use crate::model::deck::{DealError, deal};
use crate::model::event::{EventSink, RoundEvent, Standing};
use crate::model::passing::{PassingError, PassingState};
use crate::model::player::{Player, PlayerCount, PlayerCountError};
use crate::model::round::{Round, RoundError, RoundReport};
use crate::model::score::{Settlement, end_of_game, settle_round, winner};
use rand::SeedableRng;
use rand::rngs::StdRng;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    PlayerCount(#[from] PlayerCountError),
    #[error("target score must be at least 1")]
    InvalidTarget,
    #[error(transparent)]
    Deal(#[from] DealError),
    #[error(transparent)]
    Round(#[from] RoundError),
    #[error(transparent)]
    Passing(#[from] PassingError),
    #[error("{player} made an invalid pass: {source}")]
    IllegalPass {
        seat: usize,
        player: String,
        #[source]
        source: PassingError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundSummary {
    pub round: u32,
    pub report: RoundReport,
    pub settlement: Settlement,
    pub totals: Vec<u32>,
}

/// A whole game: the fixed table of players, the shared deck RNG and the
/// running round counter.
pub struct MatchState {
    players: Vec<Player>,
    count: PlayerCount,
    target: u32,
    round_number: u32,
    rng: StdRng,
    seed: u64,
}

impl MatchState {
    pub fn new(players: Vec<Player>, target: u32) -> Result<Self, GameError> {
        let seed: u64 = rand::random();
        Self::with_seed(players, target, seed)
    }

    pub fn with_seed(players: Vec<Player>, target: u32, seed: u64) -> Result<Self, GameError> {
        let count = PlayerCount::new(players.len())?;
        if target == 0 {
            return Err(GameError::InvalidTarget);
        }
        Ok(Self {
            players,
            count,
            target,
            round_number: 1,
            rng: StdRng::seed_from_u64(seed),
            seed,
        })
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn target(&self) -> u32 {
        self.target
    }

    /// Number of the next round to be played.
    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn totals(&self) -> Vec<u32> {
        self.players.iter().map(|p| p.score().total).collect()
    }

    pub fn standings(&self) -> Vec<Standing> {
        self.players
            .iter()
            .enumerate()
            .map(|(seat, player)| Standing {
                seat,
                player: player.name().to_string(),
                total: player.score().total,
            })
            .collect()
    }

    pub fn is_over(&self) -> bool {
        end_of_game(&self.players, self.target)
    }

    /// Seat of the winner once the game is over.
    pub fn winner(&self) -> Option<usize> {
        if self.is_over() {
            winner(&self.players)
        } else {
            None
        }
    }

    /// Deal, pass, play and score one round.
    pub fn play_round<S: EventSink + ?Sized>(
        &mut self,
        sink: &mut S,
    ) -> Result<RoundSummary, GameError> {
        let round = self.round_number;
        info!(round, players = self.count.get(), "starting round");
        sink.emit(&RoundEvent::RoundStarted { round });

        let hands = deal(self.count, &mut self.rng)?;
        for (player, hand) in self.players.iter_mut().zip(hands) {
            player.set_hand(hand);
        }

        self.pass_cards(sink)?;

        let report = Round::new(&mut self.players)?.play(sink)?;
        debug_assert_eq!(report.penalties.iter().sum::<u32>(), TOTAL_PENALTY);

        let settlement = settle_round(&mut self.players);
        if let Settlement::MoonShot { shooter } = settlement {
            info!(round, shooter, "moon shot");
            sink.emit(&RoundEvent::MoonShot {
                seat: shooter,
                player: self.players[shooter].name().to_string(),
            });
        }

        let totals = self.totals();
        info!(round, ?totals, "round scored");
        sink.emit(&RoundEvent::RoundScored {
            round,
            standings: self.standings(),
        });

        self.round_number += 1;
        Ok(RoundSummary {
            round,
            report,
            settlement,
            totals,
        })
    }

    /// Play rounds until the game ends; returns the winning seat.
    pub fn run<S: EventSink + ?Sized>(&mut self, sink: &mut S) -> Result<usize, GameError> {
        loop {
            self.play_round(sink)?;
            if let Some(seat) = self.winner() {
                let player = &self.players[seat];
                info!(seat, winner = player.name(), total = player.score().total, "game over");
                sink.emit(&RoundEvent::GameWon {
                    seat,
                    player: player.name().to_string(),
                    total: player.score().total,
                });
                return Ok(seat);
            }
        }
    }

    fn pass_cards<S: EventSink + ?Sized>(&mut self, sink: &mut S) -> Result<(), GameError> {
        let Ok(mut state) = PassingState::new(self.round_number, self.count) else {
            debug!(round = self.round_number, "hold round, no passing");
            return Ok(());
        };

        for seat in self.count.seats() {
            let target = state.target(seat);
            let recipient = self.players[target].name().to_string();
            let player = &mut self.players[seat];
            let name = player.name().to_string();
            let cards = player
                .pass_cards(seat, &recipient)
                .map_err(|source| GameError::IllegalPass {
                    seat,
                    player: name.clone(),
                    source,
                })?;
            let passed = cards.len();
            state.submit(seat, cards)?;
            sink.emit(&RoundEvent::CardsPassed {
                from: seat,
                from_player: name,
                to: target,
                to_player: recipient,
                count: passed,
            });
        }

        state.apply(&mut self.players)?;
        Ok(())
    }
}
