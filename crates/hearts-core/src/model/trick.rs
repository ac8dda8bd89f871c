use crate::model::card::Card;
use crate::model::suit::Suit;

/// Cards played in one trick, in play order from the leader's seat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trick {
    leader: usize,
    cards: Vec<Card>,
}

impl Trick {
    pub fn new(leader: usize) -> Self {
        Self {
            leader,
            cards: Vec::with_capacity(5),
        }
    }

    pub fn leader(&self) -> usize {
        self.leader
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

    pub fn lead_suit(&self) -> Option<Suit> {
        self.cards.first().map(|card| card.suit)
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Highest card of the leading suit played so far.
    pub fn highest_of_lead(&self) -> Option<Card> {
        highest_of_lead(&self.cards)
    }

    /// Position in play order of the card currently winning the trick.
    pub fn winning_position(&self) -> Option<usize> {
        let lead_suit = self.lead_suit()?;
        self.cards
            .iter()
            .enumerate()
            .filter(|(_, card)| card.suit == lead_suit)
            .max_by_key(|(_, card)| card.rank)
            .map(|(position, _)| position)
    }

    /// Absolute seat of the player currently winning the trick.
    pub fn taker(&self, player_count: usize) -> Option<usize> {
        self.winning_position()
            .map(|position| (self.leader + position) % player_count)
    }

    pub fn penalty_total(&self) -> u32 {
        self.cards.iter().map(|card| card.penalty_value()).sum()
    }

    pub fn into_cards(self) -> Vec<Card> {
        self.cards
    }
}

/// Highest card of the leading suit in a sequence of played cards. Off-suit
/// cards never count, whatever their rank.
pub fn highest_of_lead(cards: &[Card]) -> Option<Card> {
    let lead_suit = cards.first()?.suit;
    cards
        .iter()
        .copied()
        .filter(|card| card.suit == lead_suit)
        .max_by_key(|card| card.rank)
}
