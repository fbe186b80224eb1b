use std::collections::BTreeSet;
use std::ops::Deref;

use rand::Rng;

use crate::{
    card::Card,
    deck::{Deck, DiscardPile},
    error::{Result, UnoError},
};

/// The cards a player holds, addressed by their position in the displayed hand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand(Vec<Card>);

impl Hand {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn add_card(&mut self, card: Card) {
        self.0.push(card);
    }

    /// Draws `count` cards into the hand. Cards drawn before the deck ran out
    /// stay in the hand and the error says how many made it.
    pub fn draw_into<R: Rng + ?Sized>(
        &mut self,
        deck: &mut Deck,
        discard: &mut DiscardPile,
        rng: &mut R,
        count: usize,
    ) -> Result<()> {
        for drawn in 0..count {
            match deck.draw(discard, rng) {
                Ok(card) => self.add_card(card),
                Err(UnoError::DeckExhausted { .. }) => {
                    return Err(UnoError::DeckExhausted {
                        drawn,
                        requested: count,
                    })
                }
                Err(err) => return Err(err),
            }
        }
        Ok(())
    }

    pub fn play_at(&mut self, index: usize) -> Result<Card> {
        if index >= self.0.len() {
            return Err(UnoError::IndexOutOfRange {
                index,
                len: self.0.len(),
            });
        }
        Ok(self.0.remove(index))
    }

    pub fn legal_moves(&self, top_card: &Card) -> BTreeSet<usize> {
        self.0
            .iter()
            .enumerate()
            .filter(|(_, card)| card.matches(top_card))
            .map(|(index, _)| index)
            .collect()
    }

    pub fn cards_count(&self) -> usize {
        self.0.len()
    }
}

impl From<Vec<Card>> for Hand {
    fn from(cards: Vec<Card>) -> Self {
        Self(cards)
    }
}

impl Deref for Hand {
    type Target = [Card];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
