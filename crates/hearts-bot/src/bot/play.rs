use hearts_core::model::card::Card;
use hearts_core::model::player::PlayView;
use hearts_core::model::trick::highest_of_lead;

/// Which branch of the advanced play heuristic produced a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayScenario {
    Lead,
    /// Every leading-suit card held is under the trick's high card.
    SafeUnder,
    /// Some leading-suit cards are under the high card, some over.
    DuckUnder,
    /// Every leading-suit card held beats the high card.
    ForcedOver,
    DumpHeart,
    Discard,
}

impl PlayScenario {
    pub const fn as_str(self) -> &'static str {
        match self {
            PlayScenario::Lead => "lead",
            PlayScenario::SafeUnder => "safe_under",
            PlayScenario::DuckUnder => "duck_under",
            PlayScenario::ForcedOver => "forced_over",
            PlayScenario::DumpHeart => "dump_heart",
            PlayScenario::Discard => "discard",
        }
    }
}

pub struct PlayPlanner;

impl PlayPlanner {
    /// Lowest legal card by card order.
    pub fn lowest_legal(view: &PlayView<'_>) -> Option<Card> {
        view.legal_plays().into_iter().min()
    }

    pub fn choose(view: &PlayView<'_>) -> Option<(Card, PlayScenario)> {
        let legal = view.legal_plays();
        let Some(lead) = view.trick.first() else {
            return legal.into_iter().min().map(|card| (card, PlayScenario::Lead));
        };

        let mut following: Vec<Card> = legal
            .iter()
            .copied()
            .filter(|card| card.suit == lead.suit)
            .collect();
        following.sort();

        if let (Some(&lowest), Some(high)) = (following.first(), highest_of_lead(view.trick)) {
            let under: Vec<Card> = following.iter().copied().filter(|card| *card < high).collect();
            return Some(if under.len() == following.len() {
                (lowest, PlayScenario::SafeUnder)
            } else if let Some(&best) = under.last() {
                (best, PlayScenario::DuckUnder)
            } else {
                (lowest, PlayScenario::ForcedOver)
            });
        }

        // Void in the leading suit: whatever we drop cannot win the trick.
        if let Some(heart) = legal.iter().copied().filter(|card| card.suit.is_heart()).max() {
            return Some((heart, PlayScenario::DumpHeart));
        }
        legal
            .into_iter()
            .min()
            .map(|card| (card, PlayScenario::Discard))
    }
}
