use crate::model::card::{Card, TWO_OF_CLUBS};
use crate::model::event::{EventSink, RoundEvent};
use crate::model::player::{Player, PlayerCount, PlayerCountError};
use crate::model::rules::PlayViolation;
use crate::model::trick::Trick;
use std::collections::HashMap;
use std::mem;
use thiserror::Error;
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    AwaitingLead,
    CollectingPlays,
    ResolvingTrick,
    Complete,
    /// An illegal play ended the round; no further tricks are accepted.
    Aborted,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoundError {
    #[error(transparent)]
    PlayerCount(#[from] PlayerCountError),
    #[error("{player} starts the round with an empty hand")]
    EmptyHand { seat: usize, player: String },
    #[error("{player} holds {found} cards, expected {expected}")]
    HandSizeMismatch {
        seat: usize,
        player: String,
        found: usize,
        expected: usize,
    },
    #[error("no player holds the Two of Clubs")]
    MissingTwoOfClubs,
    #[error("{card} was dealt to seats {first} and {second}")]
    DuplicateCard {
        card: Card,
        first: usize,
        second: usize,
    },
    #[error("{player} played {card} illegally: {violation}")]
    IllegalPlay {
        seat: usize,
        player: String,
        card: Card,
        #[source]
        violation: PlayViolation,
    },
    #[error("round is already complete")]
    AlreadyComplete,
    #[error("round was aborted by an illegal play")]
    Aborted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrickOutcome {
    pub number: usize,
    pub leader: usize,
    pub cards: Vec<Card>,
    pub taker: usize,
    pub penalty: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundReport {
    pub tricks: Vec<TrickOutcome>,
    /// Penalty points taken per seat during this round.
    pub penalties: Vec<u32>,
    pub hearts_broken: bool,
}

/// One round of play over a borrowed, fixed-order table of players.
pub struct Round<'p> {
    players: &'p mut [Player],
    count: PlayerCount,
    hearts_broken: bool,
    leader: usize,
    trick: Trick,
    tricks: Vec<TrickOutcome>,
    penalties: Vec<u32>,
    phase: RoundPhase,
}

impl<'p> Round<'p> {
    /// Check the deal (equal non-empty hands, no card in two hands) and seat
    /// the Two of Clubs holder as first leader.
    pub fn new(players: &'p mut [Player]) -> Result<Self, RoundError> {
        let count = PlayerCount::new(players.len())?;

        let expected = players[0].hand().len();
        for (seat, player) in players.iter().enumerate() {
            if player.hand().is_empty() {
                return Err(RoundError::EmptyHand {
                    seat,
                    player: player.name().to_string(),
                });
            }
            if player.hand().len() != expected {
                return Err(RoundError::HandSizeMismatch {
                    seat,
                    player: player.name().to_string(),
                    found: player.hand().len(),
                    expected,
                });
            }
        }

        let mut dealt = HashMap::new();
        for (seat, player) in players.iter().enumerate() {
            for card in player.hand().iter().copied() {
                if let Some(first) = dealt.insert(card, seat) {
                    return Err(RoundError::DuplicateCard {
                        card,
                        first,
                        second: seat,
                    });
                }
            }
        }

        let leader = players
            .iter()
            .position(|player| player.hand().contains(TWO_OF_CLUBS))
            .ok_or(RoundError::MissingTwoOfClubs)?;

        debug!(players = count.get(), leader, hand_size = expected, "round started");

        Ok(Self {
            players,
            count,
            hearts_broken: false,
            leader,
            trick: Trick::new(leader),
            tricks: Vec::with_capacity(expected),
            penalties: vec![0; count.get()],
            phase: RoundPhase::AwaitingLead,
        })
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn hearts_broken(&self) -> bool {
        self.hearts_broken
    }

    pub fn leader(&self) -> usize {
        self.leader
    }

    pub fn current_trick(&self) -> &Trick {
        &self.trick
    }

    pub fn tricks(&self) -> &[TrickOutcome] {
        &self.tricks
    }

    pub fn players(&self) -> &[Player] {
        self.players
    }

    pub fn is_complete(&self) -> bool {
        self.phase == RoundPhase::Complete
    }

    /// Collect one card from every seat starting at the leader, then award
    /// the trick to whoever played highest in the leading suit.
    pub fn play_trick<S: EventSink + ?Sized>(
        &mut self,
        sink: &mut S,
    ) -> Result<TrickOutcome, RoundError> {
        match self.phase {
            RoundPhase::Complete => return Err(RoundError::AlreadyComplete),
            RoundPhase::Aborted => return Err(RoundError::Aborted),
            _ => {}
        }
        self.phase = RoundPhase::AwaitingLead;

        for step in 0..self.count.get() {
            let seat = self.count.offset(self.leader, step);
            if let Err(err) = self.take_turn(seat, sink) {
                self.phase = RoundPhase::Aborted;
                debug!(seat, error = %err, "round aborted");
                return Err(err);
            }
        }

        self.phase = RoundPhase::ResolvingTrick;
        let Some(taker) = self.trick.taker(self.count.get()) else {
            // Every seat played, so the trick holds at least a lead card.
            return Err(RoundError::AlreadyComplete);
        };
        let penalty = self.trick.penalty_total();
        self.players[taker].score_mut().add_penalty(penalty);
        self.penalties[taker] += penalty;

        let finished = mem::replace(&mut self.trick, Trick::new(taker));
        let outcome = TrickOutcome {
            number: self.tricks.len() + 1,
            leader: finished.leader(),
            cards: finished.into_cards(),
            taker,
            penalty,
        };
        debug!(
            trick = outcome.number,
            taker,
            penalty,
            hearts_broken = self.hearts_broken,
            "trick resolved"
        );
        sink.emit(&RoundEvent::TrickTaken {
            trick: outcome.number,
            seat: taker,
            player: self.players[taker].name().to_string(),
            penalty,
        });

        self.leader = taker;
        self.tricks.push(outcome.clone());
        self.phase = if self.players.iter().all(|p| p.hand().is_empty()) {
            RoundPhase::Complete
        } else {
            RoundPhase::AwaitingLead
        };
        Ok(outcome)
    }

    /// Play tricks until every hand is empty.
    pub fn play<S: EventSink + ?Sized>(mut self, sink: &mut S) -> Result<RoundReport, RoundError> {
        while !self.is_complete() {
            self.play_trick(sink)?;
        }
        Ok(RoundReport {
            tricks: self.tricks,
            penalties: self.penalties,
            hearts_broken: self.hearts_broken,
        })
    }

    fn take_turn<S: EventSink + ?Sized>(&mut self, seat: usize, sink: &mut S) -> Result<(), RoundError> {
        let player = &mut self.players[seat];
        sink.emit(&RoundEvent::TurnStarted {
            seat,
            player: player.name().to_string(),
        });

        let card = player
            .play_card(seat, self.trick.cards(), self.hearts_broken)
            .map_err(|rejected| RoundError::IllegalPlay {
                seat,
                player: player.name().to_string(),
                card: rejected.card,
                violation: rejected.violation,
            })?;

        let lead = self.trick.is_empty();
        self.trick.push(card);
        self.phase = RoundPhase::CollectingPlays;
        trace!(seat, %card, lead, "card played");
        sink.emit(&RoundEvent::CardPlayed {
            seat,
            player: player.name().to_string(),
            card,
            lead,
        });

        if card.suit.is_heart() && !self.hearts_broken {
            self.hearts_broken = true;
            debug!(seat, "hearts broken");
            sink.emit(&RoundEvent::HeartsBroken {
                seat,
                player: player.name().to_string(),
            });
        }
        Ok(())
    }
}
