use core::fmt;
use std::fmt::Display;
use std::str::FromStr;

use crate::card::{Card, Color};
use crate::error::UnoError;

/// What the current player wants to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnAction {
    Draw,
    Play(usize),
    /// End the turn without playing. Only allowed once the player has drawn this turn.
    Pass,
}

impl FromStr for TurnAction {
    type Err = UnoError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let input = input.trim();
        match input.to_ascii_lowercase().as_str() {
            "d" | "draw" => Ok(TurnAction::Draw),
            "p" | "pass" => Ok(TurnAction::Pass),
            other => other
                .parse::<usize>()
                .map(TurnAction::Play)
                .map_err(|_| UnoError::IllegalMove(format!("`{input}` is not a card number"))),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnState {
    AwaitingMove,
    ResolvingSpecial,
    RoundOver,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Clockwise,
    CounterClockwise,
}

impl Direction {
    pub fn step(&self) -> isize {
        match self {
            Direction::Clockwise => 1,
            Direction::CounterClockwise => -1,
        }
    }

    pub fn reversed(&self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }
}

/// Things that happened during a turn, for whoever is presenting the game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    CardPlayed { player: String, card: Card },
    CardDrawn { player: String },
    ColorChosen(Color),
    PlayerSkipped(String),
    DirectionReversed,
    PlayerDrewForced { player: String, count: usize },
    DeckReshuffled { cards: usize },
    DeckExhausted { player: String, drawn: usize, requested: usize },
    TurnPassed(String),
    UnoCalled(String),
    PlayerWon(String),
}

impl Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEvent::CardPlayed { player, card } => write!(f, "{player} played {card}"),
            GameEvent::CardDrawn { player } => write!(f, "{player} drew a card"),
            GameEvent::ColorChosen(color) => write!(f, "The color is now {color}"),
            GameEvent::PlayerSkipped(player) => write!(f, "{player} was skipped!"),
            GameEvent::DirectionReversed => write!(f, "Direction reversed!"),
            GameEvent::PlayerDrewForced { player, count } => {
                write!(f, "{player} draws {count} cards!")
            }
            GameEvent::DeckReshuffled { cards } => {
                write!(f, "Shuffled {cards} discarded cards back into the deck")
            }
            GameEvent::DeckExhausted {
                player,
                drawn,
                requested,
            } => write!(
                f,
                "The deck ran out, {player} only drew {drawn} of {requested} cards"
            ),
            GameEvent::TurnPassed(player) => write!(f, "{player} passes"),
            GameEvent::UnoCalled(player) => write!(f, "UNO! {player} has one card left!"),
            GameEvent::PlayerWon(player) => write!(f, "{player} wins!"),
        }
    }
}

/// How a single turn ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    Played(Card),
    Passed,
    Won(String),
}
