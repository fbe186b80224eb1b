use std::collections::BTreeSet;

use crate::card::{Card, Color};
use crate::error::UnoError;
use crate::turn::{GameEvent, TurnAction};

/// Everything the acting player is allowed to see when deciding.
#[derive(Debug)]
pub struct TurnView<'a> {
    pub player: &'a str,
    pub hand: &'a [Card],
    pub top_card: &'a Card,
    pub legal_moves: &'a BTreeSet<usize>,
    pub has_drawn: bool,
}

/// Source of player decisions. The engine calls this synchronously and asks
/// again whenever a decision is rejected.
pub trait DecisionProvider {
    fn request_move(&mut self, view: &TurnView<'_>) -> TurnAction;

    fn request_color(&mut self, view: &TurnView<'_>) -> Color;

    /// Called with the reason a move or color was refused, right before asking again.
    fn rejected(&mut self, _error: &UnoError) {}

    fn notify(&mut self, _event: &GameEvent) {}
}
