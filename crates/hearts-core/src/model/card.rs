use crate::model::rank::Rank;
use crate::model::suit::Suit;
use core::cmp::Ordering;
use core::fmt;
use serde::{Deserialize, Serialize};

pub const TWO_OF_CLUBS: Card = Card::new(Rank::Two, Suit::Clubs);
pub const QUEEN_OF_SPADES: Card = Card::new(Rank::Queen, Suit::Spades);
pub const KING_OF_SPADES: Card = Card::new(Rank::King, Suit::Spades);
pub const ACE_OF_SPADES: Card = Card::new(Rank::Ace, Suit::Spades);

/// Every heart plus the Queen of Spades.
pub const TOTAL_PENALTY: u32 = 26;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    pub const fn is_penalty(self) -> bool {
        matches!(self.suit, Suit::Hearts) || self.is_queen_of_spades()
    }

    pub const fn is_queen_of_spades(self) -> bool {
        matches!(self.rank, Rank::Queen) && matches!(self.suit, Suit::Spades)
    }

    pub const fn is_two_of_clubs(self) -> bool {
        matches!(self.rank, Rank::Two) && matches!(self.suit, Suit::Clubs)
    }

    pub fn penalty_value(self) -> u32 {
        if self.is_queen_of_spades() {
            13
        } else if self.suit == Suit::Hearts {
            1
        } else {
            0
        }
    }
}

impl Ord for Card {
    fn cmp(&self, other: &Self) -> Ordering {
        self.suit
            .cmp(&other.suit)
            .then_with(|| self.rank.cmp(&other.rank))
    }
}

impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {}", self.rank.name(), self.suit.name())
    }
}
