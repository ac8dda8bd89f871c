use crate::model::card::{Card, TWO_OF_CLUBS};
use crate::model::hand::Hand;
use crate::model::player::PlayerCount;
use crate::model::rank::Rank;
use crate::model::suit::Suit;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::collections::HashSet;
use thiserror::Error;
use tracing::trace;

/// Reshuffles allowed before giving up on finding a valid deal.
const MAX_DEAL_ATTEMPTS: usize = 1_000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DealError {
    #[error("hand {seat} is empty")]
    EmptyHand { seat: usize },
    #[error("hand {seat} holds {found} cards, expected {expected}")]
    UnevenHands {
        seat: usize,
        found: usize,
        expected: usize,
    },
    #[error("{0} was dealt more than once")]
    Duplicate(Card),
    #[error("hand {seat} holds only hearts and the Queen of Spades")]
    NoSafeCard { seat: usize },
    #[error("the Two of Clubs must be dealt exactly once, found {0}")]
    TwoOfClubs(usize),
    #[error("no valid deal found after {0} shuffles")]
    Exhausted(usize),
}

#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(52);
        for suit in Suit::ALL.iter().copied() {
            for rank in Rank::ORDERED.iter().copied() {
                cards.push(Card::new(rank, suit));
            }
        }
        Self { cards }
    }

    /// Standard deck trimmed so it splits evenly: three players drop the Two
    /// of Diamonds, five players also drop the Two of Spades.
    pub fn for_players(count: PlayerCount) -> Self {
        let mut deck = Self::standard();
        let removed: &[Card] = match count.get() {
            3 => &[Card::new(Rank::Two, Suit::Diamonds)],
            5 => &[
                Card::new(Rank::Two, Suit::Diamonds),
                Card::new(Rank::Two, Suit::Spades),
            ],
            _ => &[],
        };
        deck.cards.retain(|card| !removed.contains(card));
        deck
    }

    pub fn shuffled<R: rand::Rng + ?Sized>(count: PlayerCount, rng: &mut R) -> Self {
        let mut deck = Self::for_players(count);
        deck.shuffle_in_place(rng);
        deck
    }

    pub fn shuffled_with_seed(count: PlayerCount, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::shuffled(count, &mut rng)
    }

    pub fn shuffle_in_place<R: rand::Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Split into consecutive equal segments, one per seat.
    pub fn split(&self, count: PlayerCount) -> Vec<Hand> {
        let size = self.cards.len() / count.get();
        self.cards
            .chunks(size)
            .take(count.get())
            .map(|chunk| Hand::with_cards(chunk.to_vec()))
            .collect()
    }
}

/// Shuffle and split until every hand passes [`validate_deal`].
pub fn deal<R: rand::Rng + ?Sized>(count: PlayerCount, rng: &mut R) -> Result<Vec<Hand>, DealError> {
    let mut deck = Deck::for_players(count);
    for attempt in 1..=MAX_DEAL_ATTEMPTS {
        deck.shuffle_in_place(rng);
        let hands = deck.split(count);
        match validate_deal(&hands) {
            Ok(()) => return Ok(hands),
            Err(err) => trace!(attempt, %err, "redealing"),
        }
    }
    Err(DealError::Exhausted(MAX_DEAL_ATTEMPTS))
}

/// Requirements the round engine relies on: equal non-empty hands, no card
/// twice, one Two of Clubs, and a safe (non-penalty) card in every hand.
pub fn validate_deal(hands: &[Hand]) -> Result<(), DealError> {
    let expected = hands.first().map(Hand::len).unwrap_or(0);
    let mut seen = HashSet::new();
    let mut two_of_clubs = 0;

    for (seat, hand) in hands.iter().enumerate() {
        if hand.is_empty() {
            return Err(DealError::EmptyHand { seat });
        }
        if hand.len() != expected {
            return Err(DealError::UnevenHands {
                seat,
                found: hand.len(),
                expected,
            });
        }
        for card in hand.iter().copied() {
            if !seen.insert(card) {
                return Err(DealError::Duplicate(card));
            }
            if card == TWO_OF_CLUBS {
                two_of_clubs += 1;
            }
        }
        if hand.iter().all(|card| card.is_penalty()) {
            return Err(DealError::NoSafeCard { seat });
        }
    }

    if two_of_clubs != 1 {
        return Err(DealError::TwoOfClubs(two_of_clubs));
    }
    Ok(())
}
