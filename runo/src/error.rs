use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnoError {
    #[error("Not enough players")]
    NotEnoughPlayers,
    #[error("Too many players")]
    TooManyPlayers,
    #[error("Player name `{0}` is already taken")]
    DuplicatePlayer(String),
    #[error("Illegal move: {0}")]
    IllegalMove(String),
    #[error("Invalid color `{0}`, choose Red, Blue, Green or Yellow")]
    InvalidColor(String),
    #[error("Card index {index} is out of range for a hand of {len} cards")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("Deck exhausted after drawing {drawn} of {requested} cards")]
    DeckExhausted { drawn: usize, requested: usize },
    #[error("Deck holds no colored card to start the discard pile with")]
    NoStartingCard,
    #[error("No player can play or draw, the round cannot finish")]
    Stalemate,
    #[error("The round is already over")]
    RoundOver,
}

pub type Result<T, E = UnoError> = std::result::Result<T, E>;
