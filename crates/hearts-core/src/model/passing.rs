use crate::model::card::Card;
use crate::model::hand::Hand;
use crate::model::player::{Player, PlayerCount};
use thiserror::Error;

pub const PASS_SIZE: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PassingError {
    #[error("no cards are passed this round")]
    NoPassThisRound,
    #[error("seat {0} has already passed")]
    AlreadySubmitted(usize),
    #[error("seat {0} is not at this table")]
    UnknownSeat(usize),
    #[error("{0} is not in hand")]
    CardNotInHand(Card),
    #[error("{0} was selected more than once")]
    DuplicateCard(Card),
    #[error("expected {expected} cards to pass, got {found}")]
    WrongCount { expected: usize, found: usize },
    #[error("not every seat has passed yet")]
    Incomplete,
}

/// Seats to the right that cards travel in `round_number`; `None` on hold
/// rounds. Round numbers start at 1.
pub fn pass_offset(round_number: u32, count: PlayerCount) -> Option<usize> {
    let offset = round_number as usize % count.get();
    (offset != 0).then_some(offset)
}

/// Cards a hand must give up; smaller only for degenerate short hands.
pub fn pass_size(hand: &Hand) -> usize {
    PASS_SIZE.min(hand.len())
}

/// Selection must be the right size, distinct, and drawn from `hand`.
pub fn validate_selection(cards: &[Card], hand: &Hand) -> Result<(), PassingError> {
    let expected = pass_size(hand);
    if cards.len() != expected {
        return Err(PassingError::WrongCount {
            expected,
            found: cards.len(),
        });
    }
    for (index, card) in cards.iter().enumerate() {
        if cards[..index].contains(card) {
            return Err(PassingError::DuplicateCard(*card));
        }
        if !hand.contains(*card) {
            return Err(PassingError::CardNotInHand(*card));
        }
    }
    Ok(())
}

/// Passed cards held aside until every seat has chosen, so nobody picks
/// from a hand that already contains incoming cards.
#[derive(Debug, Clone)]
pub struct PassingState {
    offset: usize,
    count: PlayerCount,
    submissions: Vec<Option<Vec<Card>>>,
}

impl PassingState {
    pub fn new(round_number: u32, count: PlayerCount) -> Result<Self, PassingError> {
        let offset = pass_offset(round_number, count).ok_or(PassingError::NoPassThisRound)?;
        Ok(Self {
            offset,
            count,
            submissions: vec![None; count.get()],
        })
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn target(&self, seat: usize) -> usize {
        self.count.offset(seat, self.offset)
    }

    pub fn submit(&mut self, seat: usize, cards: Vec<Card>) -> Result<(), PassingError> {
        let slot = self
            .submissions
            .get_mut(seat)
            .ok_or(PassingError::UnknownSeat(seat))?;
        if slot.is_some() {
            return Err(PassingError::AlreadySubmitted(seat));
        }
        *slot = Some(cards);
        Ok(())
    }

    pub fn is_complete(&self) -> bool {
        self.submissions.iter().all(Option::is_some)
    }

    pub fn apply(self, players: &mut [Player]) -> Result<(), PassingError> {
        if !self.is_complete() {
            return Err(PassingError::Incomplete);
        }
        let count = self.count;
        let offset = self.offset;
        for (seat, cards) in self.submissions.into_iter().enumerate() {
            if let Some(cards) = cards {
                players[count.offset(seat, offset)].hand_mut().extend(cards);
            }
        }
        Ok(())
    }
}
