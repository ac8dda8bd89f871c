use crate::model::card::Card;
use crate::model::hand::Hand;
use crate::model::passing::{PassingError, pass_size, validate_selection};
use crate::model::rules::{PlayViolation, check_play, legal_plays};
use crate::model::score::PlayerScore;
use core::fmt;
use core::ops::Range;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MIN_PLAYERS: usize = 3;
pub const MAX_PLAYERS: usize = 5;

/// Number of seats at the table. Seats are plain indices `0..count`, and
/// play always proceeds in ascending circular order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct PlayerCount(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("player count must be between {MIN_PLAYERS} and {MAX_PLAYERS}, got {0}")]
pub struct PlayerCountError(pub usize);

impl PlayerCount {
    pub const fn new(count: usize) -> Result<Self, PlayerCountError> {
        if count < MIN_PLAYERS || count > MAX_PLAYERS {
            return Err(PlayerCountError(count));
        }
        Ok(Self(count))
    }

    pub const fn get(self) -> usize {
        self.0
    }

    pub const fn next(self, seat: usize) -> usize {
        (seat + 1) % self.0
    }

    /// Seat `steps` positions after `seat`, wrapping around the table.
    pub const fn offset(self, seat: usize, steps: usize) -> usize {
        (seat + steps) % self.0
    }

    pub const fn seats(self) -> Range<usize> {
        0..self.0
    }
}

impl TryFrom<usize> for PlayerCount {
    type Error = PlayerCountError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PlayerCount> for usize {
    fn from(value: PlayerCount) -> Self {
        value.0
    }
}

impl fmt::Display for PlayerCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A proposed card that failed the play rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{card}: {violation}")]
pub struct RejectedPlay {
    pub card: Card,
    #[source]
    pub violation: PlayViolation,
}

/// What a strategy may look at when asked for a card.
#[derive(Debug, Clone, Copy)]
pub struct PlayView<'a> {
    pub seat: usize,
    pub hand: &'a Hand,
    pub trick: &'a [Card],
    pub hearts_broken: bool,
}

impl PlayView<'_> {
    pub fn is_leading(&self) -> bool {
        self.trick.is_empty()
    }

    pub fn legal_plays(&self) -> Vec<Card> {
        legal_plays(self.hand, self.trick, self.hearts_broken)
    }
}

/// What a strategy may look at when choosing cards to pass. Every player is
/// told who receives the cards, human or not.
#[derive(Debug, Clone, Copy)]
pub struct PassView<'a> {
    pub seat: usize,
    pub hand: &'a Hand,
    pub recipient: &'a str,
}

impl PassView<'_> {
    /// Cards the selection must contain.
    pub fn count(&self) -> usize {
        pass_size(self.hand)
    }
}

/// Decision procedure behind a seat. Implementations only propose cards;
/// [`Player`] validates the proposal and removes it from the hand.
pub trait Strategy: Send {
    /// Short label used in logs and narration.
    fn label(&self) -> &'static str;

    fn choose_play(&mut self, view: &PlayView<'_>) -> Card;

    fn choose_pass(&mut self, view: &PassView<'_>) -> Vec<Card>;
}

pub struct Player {
    name: String,
    hand: Hand,
    score: PlayerScore,
    strategy: Box<dyn Strategy>,
}

impl Player {
    pub fn new(name: impl Into<String>, strategy: Box<dyn Strategy>) -> Self {
        Self {
            name: name.into(),
            hand: Hand::new(),
            score: PlayerScore::default(),
            strategy,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &'static str {
        self.strategy.label()
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub fn hand_mut(&mut self) -> &mut Hand {
        &mut self.hand
    }

    pub fn set_hand(&mut self, hand: Hand) {
        self.hand = hand;
    }

    pub fn score(&self) -> &PlayerScore {
        &self.score
    }

    pub fn score_mut(&mut self) -> &mut PlayerScore {
        &mut self.score
    }

    /// Ask the strategy for a card, check it, then take it out of the hand.
    /// The hand is untouched when the proposal is rejected.
    pub fn play_card(
        &mut self,
        seat: usize,
        trick: &[Card],
        hearts_broken: bool,
    ) -> Result<Card, RejectedPlay> {
        let view = PlayView {
            seat,
            hand: &self.hand,
            trick,
            hearts_broken,
        };
        let card = self.strategy.choose_play(&view);
        if !self.hand.contains(card) {
            return Err(RejectedPlay {
                card,
                violation: PlayViolation::NotInHand(card),
            });
        }
        check_play(card, &self.hand, trick, hearts_broken)
            .map_err(|violation| RejectedPlay { card, violation })?;
        self.hand.remove(card);
        Ok(card)
    }

    /// Ask the strategy for cards to pass to `recipient` and remove them.
    pub fn pass_cards(&mut self, seat: usize, recipient: &str) -> Result<Vec<Card>, PassingError> {
        let view = PassView {
            seat,
            hand: &self.hand,
            recipient,
        };
        let cards = self.strategy.choose_pass(&view);
        validate_selection(&cards, &self.hand)?;
        for card in &cards {
            self.hand.remove(*card);
        }
        Ok(cards)
    }
}

impl fmt::Debug for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Player")
            .field("name", &self.name)
            .field("kind", &self.kind())
            .field("hand", &self.hand)
            .field("score", &self.score)
            .finish()
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
