//! Legality of a single play, independent of whose turn it is.

use crate::model::card::Card;
use crate::model::hand::Hand;
use crate::model::suit::Suit;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlayViolation {
    #[error("must follow leading suit")]
    MustFollowSuit(Suit),
    #[error("must lead Two of Clubs")]
    MustLeadTwoOfClubs,
    #[error("must play non-heart while hearts unbroken")]
    HeartsNotBroken,
    /// Raised by [`crate::model::player::Player::play_card`]; the rule check
    /// itself assumes the candidate comes from the hand.
    #[error("{0} is not in hand")]
    NotInHand(Card),
}

/// Rules are tried in order: follow suit, forced Two of Clubs lead, then the
/// hearts-unbroken lead restriction.
pub fn check_play(
    card: Card,
    hand: &Hand,
    trick: &[Card],
    hearts_broken: bool,
) -> Result<(), PlayViolation> {
    if let Some(lead) = trick.first() {
        let leading_suit = lead.suit;
        if hand.has_suit(leading_suit) && card.suit != leading_suit {
            return Err(PlayViolation::MustFollowSuit(leading_suit));
        }
        return Ok(());
    }

    if hand.iter().any(|c| c.is_two_of_clubs()) {
        return if card.is_two_of_clubs() {
            Ok(())
        } else {
            Err(PlayViolation::MustLeadTwoOfClubs)
        };
    }

    if hearts_broken || hand.only_hearts() || !card.suit.is_heart() {
        Ok(())
    } else {
        Err(PlayViolation::HeartsNotBroken)
    }
}

/// `(valid, reason)` form of [`check_play`]; the reason is empty when valid.
pub fn is_valid_play(card: Card, hand: &Hand, trick: &[Card], hearts_broken: bool) -> (bool, String) {
    match check_play(card, hand, trick, hearts_broken) {
        Ok(()) => (true, String::new()),
        Err(violation) => (false, violation.to_string()),
    }
}

/// Cards of `hand` that may be played right now, in hand order.
pub fn legal_plays(hand: &Hand, trick: &[Card], hearts_broken: bool) -> Vec<Card> {
    hand.iter()
        .copied()
        .filter(|&card| check_play(card, hand, trick, hearts_broken).is_ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{PlayViolation, check_play, is_valid_play, legal_plays};
    use crate::model::card::{Card, TWO_OF_CLUBS};
    use crate::model::hand::Hand;
    use crate::model::rank::Rank;
    use crate::model::suit::Suit;

    fn hand(cards: &[Card]) -> Hand {
        Hand::with_cards(cards.to_vec())
    }

    fn c(rank: Rank, suit: Suit) -> Card {
        Card::new(rank, suit)
    }

    #[test]
    fn following_player_must_match_leading_suit() {
        let h = hand(&[c(Rank::Five, Suit::Diamonds), c(Rank::Ace, Suit::Spades)]);
        let trick = [c(Rank::Queen, Suit::Diamonds)];
        assert_eq!(
            check_play(c(Rank::Ace, Suit::Spades), &h, &trick, false),
            Err(PlayViolation::MustFollowSuit(Suit::Diamonds))
        );
        assert!(check_play(c(Rank::Five, Suit::Diamonds), &h, &trick, false).is_ok());
    }

    #[test]
    fn void_player_may_play_anything_even_unbroken_hearts() {
        let h = hand(&[c(Rank::King, Suit::Hearts), c(Rank::Ace, Suit::Spades)]);
        let trick = [c(Rank::Two, Suit::Clubs)];
        assert!(check_play(c(Rank::King, Suit::Hearts), &h, &trick, false).is_ok());
        assert!(check_play(c(Rank::Ace, Suit::Spades), &h, &trick, false).is_ok());
    }

    #[test]
    fn holder_of_two_of_clubs_must_lead_it() {
        let h = hand(&[
            c(Rank::Ace, Suit::Spades),
            TWO_OF_CLUBS,
            c(Rank::King, Suit::Hearts),
        ]);
        assert!(check_play(TWO_OF_CLUBS, &h, &[], false).is_ok());
        assert_eq!(
            check_play(c(Rank::Ace, Suit::Spades), &h, &[], true),
            Err(PlayViolation::MustLeadTwoOfClubs)
        );
        assert_eq!(legal_plays(&h, &[], false), vec![TWO_OF_CLUBS]);
    }

    #[test]
    fn two_of_clubs_rule_does_not_apply_when_following() {
        let h = hand(&[TWO_OF_CLUBS, c(Rank::Nine, Suit::Clubs)]);
        let trick = [c(Rank::Four, Suit::Clubs)];
        assert!(check_play(c(Rank::Nine, Suit::Clubs), &h, &trick, false).is_ok());
    }

    #[test]
    fn hearts_cannot_be_led_before_broken() {
        let h = hand(&[c(Rank::Three, Suit::Diamonds), c(Rank::Two, Suit::Hearts)]);
        let (valid, reason) = is_valid_play(c(Rank::Two, Suit::Hearts), &h, &[], false);
        assert!(!valid);
        assert_eq!(reason, "must play non-heart while hearts unbroken");
        assert!(check_play(c(Rank::Two, Suit::Hearts), &h, &[], true).is_ok());
    }

    #[test]
    fn all_hearts_hand_may_lead_hearts() {
        let h = hand(&[c(Rank::Two, Suit::Hearts), c(Rank::Ten, Suit::Hearts)]);
        assert!(check_play(c(Rank::Ten, Suit::Hearts), &h, &[], false).is_ok());
        assert_eq!(legal_plays(&h, &[], false).len(), 2);
    }

    #[test]
    fn reasons_match_violation_messages() {
        let h = hand(&[c(Rank::Five, Suit::Diamonds), c(Rank::Ace, Suit::Spades)]);
        let trick = [c(Rank::Queen, Suit::Diamonds)];
        assert_eq!(
            is_valid_play(c(Rank::Ace, Suit::Spades), &h, &trick, false),
            (false, "must follow leading suit".to_string())
        );
        assert_eq!(
            is_valid_play(c(Rank::Five, Suit::Diamonds), &h, &trick, false),
            (true, String::new())
        );
    }

    #[test]
    fn checking_does_not_mutate_inputs() {
        let h = hand(&[c(Rank::Five, Suit::Diamonds), c(Rank::Ace, Suit::Spades)]);
        let before = h.clone();
        let trick = vec![c(Rank::Queen, Suit::Diamonds)];
        let _ = legal_plays(&h, &trick, false);
        assert_eq!(h, before);
        assert_eq!(trick.len(), 1);
    }
}
