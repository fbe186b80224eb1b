pub mod card;
pub mod constants;
pub mod deck;
pub mod error;
pub mod hand;
pub mod player;
pub mod provider;
pub mod turn;
pub mod uno;
