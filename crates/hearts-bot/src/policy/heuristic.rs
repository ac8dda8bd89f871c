use crate::bot::{BotDifficulty, PassPlanner, PlayPlanner};
use hearts_core::model::card::{Card, TWO_OF_CLUBS};
use hearts_core::model::player::{PassView, PlayView, Strategy};
use tracing::{Level, event, warn};

/// Deterministic strategy backed by the bot planners.
#[derive(Debug, Clone, Copy)]
pub struct HeuristicPolicy {
    difficulty: BotDifficulty,
}

impl HeuristicPolicy {
    pub fn new(difficulty: BotDifficulty) -> Self {
        Self { difficulty }
    }

    pub fn basic() -> Self {
        Self::new(BotDifficulty::Basic)
    }

    pub fn advanced() -> Self {
        Self::new(BotDifficulty::Advanced)
    }

    pub fn difficulty(&self) -> BotDifficulty {
        self.difficulty
    }
}

impl Strategy for HeuristicPolicy {
    fn label(&self) -> &'static str {
        self.difficulty.as_str()
    }

    fn choose_play(&mut self, view: &PlayView<'_>) -> Card {
        let decision = match self.difficulty {
            BotDifficulty::Basic => {
                PlayPlanner::lowest_legal(view).map(|card| (card, "lowest_legal"))
            }
            BotDifficulty::Advanced => {
                PlayPlanner::choose(view).map(|(card, scenario)| (card, scenario.as_str()))
            }
        };

        match decision {
            Some((card, reason)) => {
                log_play_decision(view, self.difficulty, card, reason);
                card
            }
            None => {
                // Only reachable with an empty hand; the round rejects the card.
                let card = view.hand.cards().first().copied().unwrap_or(TWO_OF_CLUBS);
                warn!(
                    target: "hearts_bot::play",
                    seat = view.seat,
                    hand_size = view.hand.len(),
                    "no legal card available"
                );
                card
            }
        }
    }

    fn choose_pass(&mut self, view: &PassView<'_>) -> Vec<Card> {
        let (selection, reason) = match self.difficulty {
            BotDifficulty::Basic => (PassPlanner::highest(view.hand), "highest"),
            BotDifficulty::Advanced => (PassPlanner::spades_first(view.hand), "spades_first"),
        };
        log_pass_decision(view, self.difficulty, &selection, reason);
        selection
    }
}

fn format_cards(cards: &[Card]) -> String {
    cards
        .iter()
        .map(|card| format!("{card:?}"))
        .collect::<Vec<_>>()
        .join(",")
}

fn log_play_decision(view: &PlayView<'_>, difficulty: BotDifficulty, chosen: Card, reason: &str) {
    if !tracing::enabled!(target: "hearts_bot::play", Level::INFO) {
        return;
    }
    let legal = view.legal_plays();
    let legal_preview = if legal.len() <= 6 {
        format_cards(&legal)
    } else {
        format!("{} moves", legal.len())
    };
    event!(
        target: "hearts_bot::play",
        Level::INFO,
        seat = view.seat,
        difficulty = %difficulty,
        legal_count = legal.len(),
        legal_moves = %legal_preview,
        chosen = ?chosen,
        hearts_broken = view.hearts_broken,
        trick_cards = view.trick.len(),
        reason,
    );
}

fn log_pass_decision(view: &PassView<'_>, difficulty: BotDifficulty, selection: &[Card], reason: &str) {
    event!(
        target: "hearts_bot::pass",
        Level::INFO,
        seat = view.seat,
        recipient = view.recipient,
        difficulty = %difficulty,
        hand_size = view.hand.len(),
        reason,
        cards = %format_cards(selection),
    );
}
