use crate::model::card::Card;
use crate::model::player::{PassView, PlayView, Strategy};

/// Plays the first legal card and passes the lowest cards.
pub(crate) struct FirstLegal;

impl Strategy for FirstLegal {
    fn label(&self) -> &'static str {
        "first-legal"
    }

    fn choose_play(&mut self, view: &PlayView<'_>) -> Card {
        view.legal_plays()[0]
    }

    fn choose_pass(&mut self, view: &PassView<'_>) -> Vec<Card> {
        view.hand.cards()[..view.count()].to_vec()
    }
}
