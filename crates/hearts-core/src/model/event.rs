//! Narration emitted by the round engine and the match loop. Rendering is
//! left to whichever [`EventSink`] is plugged in.

use crate::model::card::Card;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Standing {
    pub seat: usize,
    pub player: String,
    pub total: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RoundEvent {
    RoundStarted {
        round: u32,
    },
    CardsPassed {
        from: usize,
        from_player: String,
        to: usize,
        to_player: String,
        count: usize,
    },
    TurnStarted {
        seat: usize,
        player: String,
    },
    CardPlayed {
        seat: usize,
        player: String,
        card: Card,
        lead: bool,
    },
    HeartsBroken {
        seat: usize,
        player: String,
    },
    TrickTaken {
        trick: usize,
        seat: usize,
        player: String,
        penalty: u32,
    },
    MoonShot {
        seat: usize,
        player: String,
    },
    RoundScored {
        round: u32,
        standings: Vec<Standing>,
    },
    GameWon {
        seat: usize,
        player: String,
        total: u32,
    },
}

pub trait EventSink {
    fn emit(&mut self, event: &RoundEvent);
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: &RoundEvent) {}
}

impl EventSink for Vec<RoundEvent> {
    fn emit(&mut self, event: &RoundEvent) {
        self.push(event.clone());
    }
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn emit(&mut self, event: &RoundEvent) {
        (**self).emit(event);
    }
}

impl<S: EventSink + ?Sized> EventSink for Box<S> {
    fn emit(&mut self, event: &RoundEvent) {
        (**self).emit(event);
    }
}

#[cfg(test)]
mod tests {
    use super::{EventSink, RoundEvent};
    use crate::model::card::QUEEN_OF_SPADES;

    #[test]
    fn events_serialize_with_tag() {
        let event = RoundEvent::CardPlayed {
            seat: 2,
            player: "Player 3".to_string(),
            card: QUEEN_OF_SPADES,
            lead: false,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "card_played");
        assert_eq!(json["card"]["rank"], "Queen");
        assert_eq!(json["card"]["suit"], "Spades");
    }

    #[test]
    fn vec_sink_collects() {
        let mut events: Vec<RoundEvent> = Vec::new();
        events.emit(&RoundEvent::RoundStarted { round: 1 });
        assert_eq!(events.len(), 1);
    }
}
