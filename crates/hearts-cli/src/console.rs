//! Terminal input: prompts that repeat until the answer parses, and the
//! interactive seat built on them.

use crate::render::{CardStyle, render_cards, render_hand};
use hearts_core::model::card::{Card, TWO_OF_CLUBS};
use hearts_core::model::player::{PassView, PlayView, PlayerCount, Strategy};
use hearts_core::model::rules::check_play;
use std::collections::HashSet;
use std::fmt::Display;
use std::io::{self, BufRead, BufReader, Write};
use thiserror::Error;
use tracing::warn;

const DELIMITER: char = ',';

/// Why a line typed at a prompt was rejected. The message is shown to the
/// player before asking again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("You must input an integer")]
    NotANumber,
    #[error("You must enter a number in the range of {min} to {max}")]
    OutOfRange { min: usize, max: usize },
    #[error("You must input integers separated by ','")]
    NotAList,
    #[error("All numbers must be in the range of {min} to {max}")]
    ListOutOfRange { min: usize, max: usize },
    #[error("You must input {0} integers")]
    WrongCount(usize),
    #[error("You cannot enter the same number multiple times")]
    Duplicate,
    #[error("Target score has to be a whole number")]
    TargetNotANumber,
    #[error("Target score needs to be at least 1")]
    TargetTooLow,
    #[error("Player count has to be 3, 4 or 5")]
    CountNotANumber,
    #[error("Player count needs to be 3, 4 or 5")]
    CountOutOfRange,
    #[error("Name must not be empty")]
    EmptyName,
}

/// 1-based card number to a hand index.
pub fn parse_choice(raw: &str, max: usize) -> Result<usize, InputError> {
    let value: i64 = raw.trim().parse().map_err(|_| InputError::NotANumber)?;
    if value < 1 || value > max as i64 {
        return Err(InputError::OutOfRange { min: 1, max });
    }
    Ok(value as usize - 1)
}

/// `count` distinct 1-based card numbers separated by commas, as hand indices.
pub fn parse_selection(raw: &str, count: usize, max: usize) -> Result<Vec<usize>, InputError> {
    let values = raw
        .split(DELIMITER)
        .map(|part| part.trim().parse::<i64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| InputError::NotAList)?;
    if values.iter().any(|value| *value < 1 || *value > max as i64) {
        return Err(InputError::ListOutOfRange { min: 1, max });
    }
    if values.len() != count {
        return Err(InputError::WrongCount(count));
    }
    let mut seen = HashSet::new();
    if !values.iter().all(|value| seen.insert(*value)) {
        return Err(InputError::Duplicate);
    }
    Ok(values.into_iter().map(|value| value as usize - 1).collect())
}

pub fn parse_target_score(raw: &str) -> Result<u32, InputError> {
    let value: i64 = raw.trim().parse().map_err(|_| InputError::TargetNotANumber)?;
    if value <= 0 {
        return Err(InputError::TargetTooLow);
    }
    u32::try_from(value).map_err(|_| InputError::TargetNotANumber)
}

pub fn parse_player_count(raw: &str) -> Result<PlayerCount, InputError> {
    let value: usize = raw.trim().parse().map_err(|_| InputError::CountNotANumber)?;
    PlayerCount::new(value).map_err(|_| InputError::CountOutOfRange)
}

pub fn parse_name(raw: &str) -> Result<String, InputError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(InputError::EmptyName);
    }
    Ok(name.to_string())
}

/// Line-oriented terminal. Closed input surfaces as `UnexpectedEof`.
pub struct Console {
    input: Box<dyn BufRead + Send>,
    output: Box<dyn Write + Send>,
}

impl Console {
    pub fn new(input: Box<dyn BufRead + Send>, output: Box<dyn Write + Send>) -> Self {
        Self { input, output }
    }

    pub fn stdio() -> Self {
        Self::new(Box::new(BufReader::new(io::stdin())), Box::new(io::stdout()))
    }

    pub fn say(&mut self, text: impl Display) -> io::Result<()> {
        writeln!(self.output, "{text}")?;
        self.output.flush()
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Prompt until `parse` accepts the line.
    pub fn ask<T, F>(&mut self, prompt: &str, parse: F) -> io::Result<T>
    where
        F: Fn(&str) -> Result<T, InputError>,
    {
        loop {
            let line = self.read_line(prompt)?;
            match parse(&line) {
                Ok(value) => return Ok(value),
                Err(err) => self.say(err)?,
            }
        }
    }

    pub fn ask_target_score(&mut self) -> io::Result<u32> {
        self.ask("Please enter a target score: ", parse_target_score)
    }

    pub fn ask_player_count(&mut self) -> io::Result<PlayerCount> {
        self.ask("Please enter a player count (3 to 5): ", parse_player_count)
    }

    pub fn ask_name(&mut self) -> io::Result<String> {
        self.ask("Please enter your name: ", parse_name)
    }
}

/// The seat driven from the terminal. Illegal choices are explained and
/// asked again, so only legal cards ever reach the round.
pub struct ConsolePlayer {
    console: Console,
    style: CardStyle,
}

impl ConsolePlayer {
    pub fn new(console: Console, style: CardStyle) -> Self {
        Self { console, style }
    }

    fn show_hand(&mut self, cards: &[Card]) -> io::Result<()> {
        self.console.say("Cards available:")?;
        self.console.say(render_hand(cards, self.style))
    }

    fn prompt_play(&mut self, view: &PlayView<'_>) -> io::Result<Card> {
        if view.trick.is_empty() {
            self.console.say("Trick is currently empty.")?;
        } else {
            self.console.say("Current Trick:")?;
            self.console.say(render_cards(view.trick, self.style))?;
        }
        let cards = view.hand.cards();
        self.show_hand(cards)?;
        self.console.say(format_args!(
            "Hearts are {}broken\n",
            if view.hearts_broken { "" } else { "not " }
        ))?;

        match cards {
            [] => Err(io::Error::other("no cards left to play")),
            [only] => Ok(*only),
            _ => loop {
                let index = self
                    .console
                    .ask("Select a card to play: ", |raw| parse_choice(raw, cards.len()))?;
                let card = cards[index];
                match check_play(card, view.hand, view.trick, view.hearts_broken) {
                    Ok(()) => return Ok(card),
                    Err(violation) => self.console.say(violation)?,
                }
            },
        }
    }

    fn prompt_pass(&mut self, view: &PassView<'_>) -> io::Result<Vec<Card>> {
        let cards = view.hand.cards();
        self.show_hand(cards)?;
        self.console.say("")?;

        let count = view.count();
        if count == 0 {
            return Ok(Vec::new());
        }
        let prompt = format!(
            "Select {count} cards to pass to {} \n(Enter numbers separated with '{DELIMITER}'): ",
            view.recipient
        );
        let indices = self
            .console
            .ask(&prompt, |raw| parse_selection(raw, count, cards.len()))?;
        let selection: Vec<Card> = indices.into_iter().map(|index| cards[index]).collect();

        self.console.say(format_args!(
            "You have passed the following cards to {}:\n{}\n",
            view.recipient,
            render_cards(&selection, self.style)
        ))?;
        Ok(selection)
    }
}

impl Strategy for ConsolePlayer {
    fn label(&self) -> &'static str {
        "human"
    }

    fn choose_play(&mut self, view: &PlayView<'_>) -> Card {
        self.prompt_play(view).unwrap_or_else(|err| {
            warn!(seat = view.seat, error = %err, "console unavailable, playing lowest legal card");
            view.legal_plays()
                .into_iter()
                .min()
                .or_else(|| view.hand.cards().first().copied())
                .unwrap_or(TWO_OF_CLUBS)
        })
    }

    fn choose_pass(&mut self, view: &PassView<'_>) -> Vec<Card> {
        self.prompt_pass(view).unwrap_or_else(|err| {
            warn!(seat = view.seat, error = %err, "console unavailable, passing first cards");
            view.hand.cards()[..view.count()].to_vec()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hearts_core::model::hand::Hand;
    use hearts_core::model::rank::Rank;
    use hearts_core::model::suit::Suit;
    use std::io::Cursor;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().expect("buffer lock").write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuf {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().expect("buffer lock").clone()).expect("utf8")
        }
    }

    fn console(input: &str) -> (Console, SharedBuf) {
        let out = SharedBuf::default();
        let console = Console::new(
            Box::new(Cursor::new(input.as_bytes().to_vec())),
            Box::new(out.clone()),
        );
        (console, out)
    }

    fn c(rank: Rank, suit: Suit) -> Card {
        Card::new(rank, suit)
    }

    #[test]
    fn choice_is_one_based_and_bounded() {
        assert_eq!(parse_choice(" 3 ", 5), Ok(2));
        assert_eq!(parse_choice("0", 5), Err(InputError::OutOfRange { min: 1, max: 5 }));
        assert_eq!(parse_choice("6", 5), Err(InputError::OutOfRange { min: 1, max: 5 }));
        assert_eq!(parse_choice("two", 5), Err(InputError::NotANumber));
    }

    #[test]
    fn selection_checks_format_range_count_and_duplicates() {
        assert_eq!(parse_selection("1, 4,2", 3, 10), Ok(vec![0, 3, 1]));
        assert_eq!(parse_selection("1;2;3", 3, 10), Err(InputError::NotAList));
        assert_eq!(
            parse_selection("1,2,11", 3, 10),
            Err(InputError::ListOutOfRange { min: 1, max: 10 })
        );
        assert_eq!(parse_selection("1,2", 3, 10), Err(InputError::WrongCount(3)));
        assert_eq!(parse_selection("2,2,5", 3, 10), Err(InputError::Duplicate));
    }

    #[test]
    fn setup_answers_are_validated() {
        assert_eq!(parse_target_score("100"), Ok(100));
        assert_eq!(parse_target_score("0"), Err(InputError::TargetTooLow));
        assert_eq!(parse_target_score("ten"), Err(InputError::TargetNotANumber));
        assert_eq!(parse_player_count("5").map(PlayerCount::get), Ok(5));
        assert_eq!(parse_player_count("2"), Err(InputError::CountOutOfRange));
        assert_eq!(parse_player_count("x"), Err(InputError::CountNotANumber));
        assert_eq!(parse_name("  Ada "), Ok("Ada".to_string()));
        assert_eq!(parse_name("   "), Err(InputError::EmptyName));
    }

    #[test]
    fn ask_reprompts_until_valid() {
        let (mut console, out) = console("abc\n-4\n25\n");
        assert_eq!(console.ask_target_score().expect("score"), 25);
        let text = out.text();
        assert!(text.contains("Target score has to be a whole number"));
        assert!(text.contains("Target score needs to be at least 1"));
        assert_eq!(text.matches("Please enter a target score: ").count(), 3);
    }

    #[test]
    fn closed_input_is_an_error() {
        let (mut console, _) = console("");
        let err = console.ask_player_count().expect_err("eof");
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn player_rejects_illegal_card_then_accepts_legal_one() {
        let hand = Hand::with_cards(vec![
            c(Rank::Five, Suit::Clubs),
            c(Rank::Nine, Suit::Diamonds),
            c(Rank::King, Suit::Diamonds),
        ]);
        let trick = [c(Rank::Ten, Suit::Diamonds)];
        let view = PlayView {
            seat: 0,
            hand: &hand,
            trick: &trick,
            hearts_broken: false,
        };
        // Card 1 is the Five of Clubs, which does not follow suit.
        let (console, out) = console("1\n9\n3\n");
        let mut player = ConsolePlayer::new(console, CardStyle::Plain);
        assert_eq!(player.choose_play(&view), c(Rank::King, Suit::Diamonds));

        let text = out.text();
        assert!(text.contains("Current Trick:"));
        assert!(text.contains("Hearts are not broken"));
        assert!(text.contains("must follow leading suit"));
        assert!(text.contains("You must enter a number in the range of 1 to 3"));
    }

    #[test]
    fn last_card_is_played_without_asking() {
        let hand = Hand::with_cards(vec![c(Rank::Ace, Suit::Hearts)]);
        let view = PlayView {
            seat: 0,
            hand: &hand,
            trick: &[],
            hearts_broken: true,
        };
        let (console, out) = console("");
        let mut player = ConsolePlayer::new(console, CardStyle::Plain);
        assert_eq!(player.choose_play(&view), c(Rank::Ace, Suit::Hearts));
        assert!(!out.text().contains("Select a card"));
    }

    #[test]
    fn pass_names_recipient_and_returns_selection() {
        let hand = Hand::with_cards(vec![
            c(Rank::Two, Suit::Clubs),
            c(Rank::Seven, Suit::Diamonds),
            c(Rank::Queen, Suit::Spades),
            c(Rank::Ace, Suit::Hearts),
        ]);
        let view = PassView {
            seat: 2,
            hand: &hand,
            recipient: "Player 4",
        };
        let (console, out) = console("1,1,2\n4,3,2\n");
        let mut player = ConsolePlayer::new(console, CardStyle::Plain);
        assert_eq!(
            player.choose_pass(&view),
            vec![
                c(Rank::Ace, Suit::Hearts),
                c(Rank::Queen, Suit::Spades),
                c(Rank::Seven, Suit::Diamonds)
            ]
        );
        let text = out.text();
        assert!(text.contains("Select 3 cards to pass to Player 4"));
        assert!(text.contains("You cannot enter the same number multiple times"));
        assert!(text.contains("You have passed the following cards to Player 4"));
    }

    #[test]
    fn closed_console_falls_back_to_a_legal_card() {
        let hand = Hand::with_cards(vec![c(Rank::Two, Suit::Clubs), c(Rank::Three, Suit::Hearts)]);
        let view = PlayView {
            seat: 1,
            hand: &hand,
            trick: &[],
            hearts_broken: false,
        };
        let (console, _) = console("");
        let mut player = ConsolePlayer::new(console, CardStyle::Pretty);
        assert_eq!(player.choose_play(&view), c(Rank::Two, Suit::Clubs));
    }
}
