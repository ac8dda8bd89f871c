//! Text output: card drawing plus the sinks that turn round events into
//! console narration or JSON lines.

use hearts_core::model::card::Card;
use hearts_core::model::event::{EventSink, RoundEvent};
use hearts_core::model::rank::Rank;
use std::io::{self, Write};
use tracing::warn;

/// How cards are drawn. Passed explicitly to everything that renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CardStyle {
    /// `Queen of Spades`
    #[default]
    Plain,
    /// Five-line boxed art.
    Pretty,
}

impl CardStyle {
    pub fn from_pretty(pretty: bool) -> Self {
        if pretty {
            CardStyle::Pretty
        } else {
            CardStyle::Plain
        }
    }
}

const ART_WIDTH: usize = 7;

pub fn card_art(card: Card) -> [String; 5] {
    let symbol = card.suit.symbol();
    let (top, bottom) = match card.rank {
        Rank::Ten => ("10".to_string(), "10".to_string()),
        rank => (format!("{rank} "), format!(" {rank}")),
    };
    [
        "┌─────┐".to_string(),
        format!("│{top}   │"),
        format!("│  {symbol}  │"),
        format!("│   {bottom}│"),
        "└─────┘".to_string(),
    ]
}

pub fn render_card(card: Card, style: CardStyle) -> String {
    match style {
        CardStyle::Plain => card.to_string(),
        CardStyle::Pretty => card_art(card).join("\n"),
    }
}

/// Cards side by side in pretty mode, comma-separated otherwise.
pub fn render_cards(cards: &[Card], style: CardStyle) -> String {
    match style {
        CardStyle::Plain => cards
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", "),
        CardStyle::Pretty => {
            let arts: Vec<[String; 5]> = cards.iter().copied().map(card_art).collect();
            (0..5)
                .map(|line| arts.iter().map(|art| art[line].as_str()).collect::<String>())
                .collect::<Vec<_>>()
                .join("\n")
        }
    }
}

/// A hand with the 1-based numbers a player types to pick cards.
pub fn render_hand(cards: &[Card], style: CardStyle) -> String {
    match style {
        CardStyle::Plain => cards
            .iter()
            .enumerate()
            .map(|(idx, card)| format!("{:>3}: {card}", idx + 1))
            .collect::<Vec<_>>()
            .join("\n"),
        CardStyle::Pretty => {
            let labels: String = (1..=cards.len())
                .map(|number| format!("{number:>4}{:width$}", "", width = ART_WIDTH - 4))
                .collect();
            format!("{}\n{}", render_cards(cards, style), labels.trim_end())
        }
    }
}

/// Human-readable narration of a game in progress.
pub struct ConsoleNarrator<W: Write> {
    out: W,
    style: CardStyle,
    round: u32,
    round_closed: bool,
    failed: bool,
}

impl<W: Write> ConsoleNarrator<W> {
    pub fn new(out: W, style: CardStyle) -> Self {
        Self {
            out,
            style,
            round: 0,
            round_closed: false,
            failed: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn close_round(&mut self) -> io::Result<()> {
        if !self.round_closed {
            self.round_closed = true;
            writeln!(self.out, "========= End of round {} =========", self.round)?;
        }
        Ok(())
    }

    fn write_event(&mut self, event: &RoundEvent) -> io::Result<()> {
        match event {
            RoundEvent::RoundStarted { round } => {
                self.round = *round;
                self.round_closed = false;
                writeln!(self.out, "========= Starting round {round} =========")
            }
            RoundEvent::CardsPassed { .. } => Ok(()),
            RoundEvent::TurnStarted { player, .. } => writeln!(self.out, "It is {player}'s turn"),
            RoundEvent::CardPlayed {
                player, card, lead, ..
            } => {
                let card = render_card(*card, self.style);
                if *lead {
                    writeln!(self.out, "{player} leads the trick with \n{card}")
                } else {
                    writeln!(self.out, "{player} plays \n{card}")
                }
            }
            RoundEvent::HeartsBroken { .. } => writeln!(self.out, "Hearts have been broken!"),
            RoundEvent::TrickTaken {
                player, penalty, ..
            } => writeln!(
                self.out,
                "{player} takes the trick. Points received: {penalty}"
            ),
            RoundEvent::MoonShot { player, .. } => {
                self.close_round()?;
                writeln!(
                    self.out,
                    "{player} has shot the moon! Everyone else receives 26 points"
                )
            }
            RoundEvent::RoundScored { standings, .. } => {
                self.close_round()?;
                for standing in standings {
                    writeln!(self.out, "{}'s total score: {}", standing.player, standing.total)?;
                }
                Ok(())
            }
            RoundEvent::GameWon { player, .. } => writeln!(self.out, "{player} is the winner!"),
        }
    }
}

impl<W: Write> EventSink for ConsoleNarrator<W> {
    fn emit(&mut self, event: &RoundEvent) {
        if self.failed {
            return;
        }
        if let Err(err) = self.write_event(event).and_then(|()| self.out.flush()) {
            warn!(error = %err, "console narration disabled");
            self.failed = true;
        }
    }
}

/// One JSON object per event. The first write error stops output and is
/// reported by [`JsonlSink::finish`].
pub struct JsonlSink<W: Write> {
    out: W,
    lines: usize,
    error: Option<io::Error>,
}

impl<W: Write> JsonlSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            lines: 0,
            error: None,
        }
    }

    pub fn lines(&self) -> usize {
        self.lines
    }

    pub fn finish(mut self) -> io::Result<usize> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.out.flush()?;
        Ok(self.lines)
    }

    fn write_event(&mut self, event: &RoundEvent) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, event)?;
        self.out.write_all(b"\n")
    }
}

impl<W: Write> EventSink for JsonlSink<W> {
    fn emit(&mut self, event: &RoundEvent) {
        if self.error.is_some() {
            return;
        }
        match self.write_event(event) {
            Ok(()) => self.lines += 1,
            Err(err) => self.error = Some(err),
        }
    }
}

/// Forwards every event to `primary` and, when present, `secondary`.
pub struct Tee<A, B> {
    pub primary: A,
    pub secondary: Option<B>,
}

impl<A: EventSink, B: EventSink> EventSink for Tee<A, B> {
    fn emit(&mut self, event: &RoundEvent) {
        self.primary.emit(event);
        if let Some(secondary) = self.secondary.as_mut() {
            secondary.emit(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hearts_core::model::card::QUEEN_OF_SPADES;
    use hearts_core::model::event::Standing;
    use hearts_core::model::suit::Suit;

    #[test]
    fn plain_cards_use_long_names() {
        assert_eq!(render_card(QUEEN_OF_SPADES, CardStyle::Plain), "Queen of Spades");
        let cards = [Card::new(Rank::Two, Suit::Clubs), QUEEN_OF_SPADES];
        assert_eq!(
            render_cards(&cards, CardStyle::Plain),
            "Two of Clubs, Queen of Spades"
        );
    }

    #[test]
    fn pretty_card_art_matches_template() {
        let art = render_card(QUEEN_OF_SPADES, CardStyle::Pretty);
        assert_eq!(art, "┌─────┐\n│Q    │\n│  ♠  │\n│    Q│\n└─────┘");

        let ten = card_art(Card::new(Rank::Ten, Suit::Hearts));
        assert_eq!(ten[1], "│10   │");
        assert_eq!(ten[3], "│   10│");
    }

    #[test]
    fn pretty_cards_sit_side_by_side() {
        let cards = [QUEEN_OF_SPADES, Card::new(Rank::Ace, Suit::Hearts)];
        let rendered = render_cards(&cards, CardStyle::Pretty);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "┌─────┐┌─────┐");
        assert_eq!(lines[2], "│  ♠  ││  ♥  │");
    }

    #[test]
    fn hand_numbers_start_at_one() {
        let cards = [Card::new(Rank::Two, Suit::Clubs), QUEEN_OF_SPADES];
        assert_eq!(
            render_hand(&cards, CardStyle::Plain),
            "  1: Two of Clubs\n  2: Queen of Spades"
        );
        let pretty = render_hand(&cards, CardStyle::Pretty);
        assert_eq!(pretty.lines().last(), Some("   1      2"));
    }

    #[test]
    fn narrator_closes_round_once() {
        let mut narrator = ConsoleNarrator::new(Vec::new(), CardStyle::Plain);
        let events = [
            RoundEvent::RoundStarted { round: 2 },
            RoundEvent::CardPlayed {
                seat: 0,
                player: "Player 1".into(),
                card: Card::new(Rank::Two, Suit::Clubs),
                lead: true,
            },
            RoundEvent::MoonShot {
                seat: 0,
                player: "Player 1".into(),
            },
            RoundEvent::RoundScored {
                round: 2,
                standings: vec![Standing {
                    seat: 0,
                    player: "Player 1".into(),
                    total: 0,
                }],
            },
        ];
        for event in &events {
            narrator.emit(event);
        }
        let text = String::from_utf8(narrator.into_inner()).expect("utf8");
        assert_eq!(
            text,
            "========= Starting round 2 =========\n\
             Player 1 leads the trick with \nTwo of Clubs\n\
             ========= End of round 2 =========\n\
             Player 1 has shot the moon! Everyone else receives 26 points\n\
             Player 1's total score: 0\n"
        );
    }

    #[test]
    fn jsonl_sink_writes_one_tagged_object_per_event() {
        let mut sink = JsonlSink::new(Vec::new());
        sink.emit(&RoundEvent::RoundStarted { round: 1 });
        sink.emit(&RoundEvent::HeartsBroken {
            seat: 3,
            player: "Player 4".into(),
        });
        assert_eq!(sink.lines(), 2);
        let JsonlSink { out, .. } = sink;
        let text = String::from_utf8(out).expect("utf8");
        let rows: Vec<serde_json::Value> = text
            .lines()
            .map(|line| serde_json::from_str(line).expect("json row"))
            .collect();
        assert_eq!(rows[0]["event"], "round_started");
        assert_eq!(rows[1]["event"], "hearts_broken");
        assert_eq!(rows[1]["seat"], 3);
    }

    #[test]
    fn tee_forwards_to_both_sinks() {
        let mut tee = Tee {
            primary: Vec::new(),
            secondary: Some(Vec::new()),
        };
        tee.emit(&RoundEvent::RoundStarted { round: 1 });
        assert_eq!(tee.primary.len(), 1);
        assert_eq!(tee.secondary.map(|s| s.len()), Some(1));
    }
}
