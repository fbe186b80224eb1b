use core::fmt;
use std::fmt::Display;
use std::str::FromStr;

use strum_macros::{Display, EnumCount as EnumCountMacro, EnumIter, EnumString};

use crate::error::{Result, UnoError};

#[derive(Clone, Copy, Debug, Display, EnumString, EnumCountMacro, EnumIter, PartialEq, Eq, Hash)]
#[strum(ascii_case_insensitive)]
pub enum Color {
    Red,
    Blue,
    Green,
    Yellow,
    Wild,
}

impl Color {
    /// The four colors a wild card may take once played.
    pub const CHOOSABLE: [Color; 4] = [Color::Red, Color::Blue, Color::Green, Color::Yellow];

    /// Parses a color picked for a wild card. `Wild` itself and anything
    /// unrecognized is rejected.
    pub fn parse_chosen(input: &str) -> Result<Self> {
        match Color::from_str(input.trim()) {
            Ok(Color::Wild) | Err(_) => Err(UnoError::InvalidColor(input.trim().to_string())),
            Ok(color) => Ok(color),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Value {
    Number(u8),
    Skip,
    Reverse,
    DrawTwo,
    Wild,
    DrawFour,
}

impl Value {
    /// Whether cards of this value start out without a color.
    pub fn is_wild(&self) -> bool {
        matches!(self, Value::Wild | Value::DrawFour)
    }

    pub fn effect(&self) -> Effect {
        match self {
            Value::Skip => Effect::Skip,
            Value::Reverse => Effect::Reverse,
            Value::DrawTwo => Effect::ForceDraw(crate::constants::DRAW_TWO_PENALTY),
            Value::DrawFour => Effect::ForceDraw(crate::constants::DRAW_FOUR_PENALTY),
            Value::Wild | Value::Number(_) => Effect::None,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(number) => write!(f, "{number}"),
            Value::Skip => write!(f, "Skip"),
            Value::Reverse => write!(f, "Reverse"),
            Value::DrawTwo => write!(f, "Draw Two"),
            Value::Wild => write!(f, "Wild"),
            Value::DrawFour => write!(f, "Draw Four"),
        }
    }
}

/// What happens right after a card is played, before the turn moves on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    None,
    Skip,
    Reverse,
    ForceDraw(usize),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Card {
    color: Color,
    value: Value,
}

impl Card {
    /// Builds a card. Wild values may carry a chosen color, every other value needs a real one.
    pub fn new(color: Color, value: Value) -> Self {
        debug_assert!(
            value.is_wild() || color != Color::Wild,
            "{value} cards can't be wild colored"
        );
        Self { color, value }
    }

    pub fn number(color: Color, number: u8) -> Self {
        Self::new(color, Value::Number(number))
    }

    pub fn wild() -> Self {
        Self::new(Color::Wild, Value::Wild)
    }

    pub fn wild_draw_four() -> Self {
        Self::new(Color::Wild, Value::DrawFour)
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn value(&self) -> Value {
        self.value
    }

    /// A card can go on top of another if they share color or value, or if
    /// either of them is still wild.
    pub fn matches(&self, other: &Card) -> bool {
        self.color == other.color
            || self.value == other.value
            || self.color == Color::Wild
            || other.color == Color::Wild
    }

    /// Gives a played wild card its color. Only an uncolored wild card can be
    /// recolored, and only to one of the four suits.
    pub fn set_color(&mut self, color: Color) -> Result<()> {
        if color == Color::Wild || self.color != Color::Wild || !self.value.is_wild() {
            return Err(UnoError::InvalidColor(color.to_string()));
        }
        self.color = color;
        Ok(())
    }

    /// Strips the chosen color off a wild card before it goes back into the deck.
    pub(crate) fn reset_color(&mut self) {
        if self.value.is_wild() {
            self.color = Color::Wild;
        }
    }
}

impl Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.color {
            Color::Wild => write!(f, "{}", self.value),
            color => write!(f, "{} {}", color, self.value),
        }
    }
}
