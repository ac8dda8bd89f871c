use hearts_core::model::card::{ACE_OF_SPADES, Card, KING_OF_SPADES};
use hearts_core::model::hand::Hand;
use hearts_core::model::passing::pass_size;

pub struct PassPlanner;

impl PassPlanner {
    /// The highest cards by card order, highest first.
    pub fn highest(hand: &Hand) -> Vec<Card> {
        hand.cards().iter().rev().copied().take(pass_size(hand)).collect()
    }

    /// King and Ace of Spades when held, topped up with the highest cards.
    pub fn spades_first(hand: &Hand) -> Vec<Card> {
        let count = pass_size(hand);
        let mut selection: Vec<Card> = [KING_OF_SPADES, ACE_OF_SPADES]
            .into_iter()
            .filter(|card| hand.contains(*card))
            .take(count)
            .collect();

        for card in hand.cards().iter().rev().copied() {
            if selection.len() >= count {
                break;
            }
            if !selection.contains(&card) {
                selection.push(card);
            }
        }
        selection
    }
}
