use rand::{seq::SliceRandom, Rng};
use strum::IntoEnumIterator;

use crate::{
    card::{Card, Color, Value},
    constants::*,
    error::{Result, UnoError},
};

/// The face down draw pile. Cards are drawn off the end of the vector.
#[derive(Debug, Clone)]
pub struct Deck(pub(crate) Vec<Card>);

impl Deck {
    pub fn new() -> Self {
        let mut cards = Vec::with_capacity(TOTAL_CARDS_IN_DECK.into());

        // Colored Cards
        for color in Color::iter().filter(|color| *color != Color::Wild) {
            // Skip Cards
            for _ in 0..SKIP_CARDS_PER_COLOR {
                cards.push(Card::new(color, Value::Skip));
            }

            // Reverse Cards
            for _ in 0..REVERSE_CARDS_PER_COLOR {
                cards.push(Card::new(color, Value::Reverse));
            }

            // Draw Two Cards
            for _ in 0..DRAW_TWO_CARDS_PER_COLOR {
                cards.push(Card::new(color, Value::DrawTwo));
            }

            // Number Cards
            for number in NUMBER_CARDS_PER_COLOR {
                cards.push(Card::number(color, *number));
            }
        }

        for _ in 0..WILD_CARDS_IN_DECK {
            cards.push(Card::wild());
        }

        for _ in 0..WILD_DRAW_FOUR_CARDS_IN_DECK {
            cards.push(Card::wild_draw_four());
        }

        Self(cards)
    }

    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.0.shuffle(rng);
    }

    /// Draws the next card, refilling from the discard pile when the deck has run dry.
    pub fn draw<R: Rng + ?Sized>(&mut self, discard: &mut DiscardPile, rng: &mut R) -> Result<Card> {
        if self.0.is_empty() {
            self.replenish(discard, rng);
        }
        self.0.pop().ok_or(UnoError::DeckExhausted {
            drawn: 0,
            requested: 1,
        })
    }

    /// Moves every discarded card except the top one back into the deck and
    /// shuffles. Returns how many cards came back.
    pub fn replenish<R: Rng + ?Sized>(&mut self, discard: &mut DiscardPile, rng: &mut R) -> usize {
        let recycled = discard.take_all_but_top();
        let count = recycled.len();
        if count > 0 {
            self.0.extend(recycled.into_iter().map(|mut card| {
                card.reset_color();
                card
            }));
            self.shuffle(rng);
            tracing::debug!(cards = count, "reshuffled discard pile into deck");
        }
        count
    }

    pub fn add_card(&mut self, card: Card) {
        self.0.push(card);
    }

    pub fn cards_count(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.0.iter()
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds a deck from cards in draw order: the last card is drawn first.
impl From<Vec<Card>> for Deck {
    fn from(cards: Vec<Card>) -> Self {
        Self(cards)
    }
}

/// The face up pile of played cards. Its last card decides what may be played next.
#[derive(Debug, Clone, Default)]
pub struct DiscardPile(Vec<Card>);

impl DiscardPile {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn top(&self) -> Option<&Card> {
        self.0.last()
    }

    pub fn push(&mut self, card: Card) {
        self.0.push(card);
    }

    pub fn cards_count(&self) -> usize {
        self.0.len()
    }

    fn take_all_but_top(&mut self) -> Vec<Card> {
        match self.0.pop() {
            Some(top) => {
                let rest = std::mem::take(&mut self.0);
                self.0.push(top);
                rest
            }
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use proptest::prelude::*;
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    fn card_counts<'a>(cards: impl Iterator<Item = &'a Card>) -> HashMap<Card, usize> {
        let mut counts = HashMap::new();
        for card in cards {
            *counts.entry(*card).or_insert(0) += 1;
        }
        counts
    }

    #[test]
    fn correct_card_count_new_deck() {
        assert_eq!(Deck::new().cards_count(), TOTAL_CARDS_IN_DECK as usize);
    }

    #[test]
    fn default_deck_is_a_full_deck() {
        let deck = Deck::default();
        assert_eq!(deck.cards_count(), TOTAL_CARDS_IN_DECK as usize);
        assert_eq!(card_counts(deck.iter()), card_counts(Deck::new().iter()));
    }

    #[test]
    fn correct_composition_new_deck() {
        let deck = Deck::new();
        let counts = card_counts(deck.iter());

        for color in Color::CHOOSABLE {
            let per_color = deck.iter().filter(|card| card.color() == color).count();
            assert_eq!(per_color, 25);

            assert_eq!(counts[&Card::number(color, 0)], 1);
            for number in 1..=9 {
                assert_eq!(counts[&Card::number(color, number)], 2);
            }
            for value in [Value::Skip, Value::Reverse, Value::DrawTwo] {
                assert_eq!(counts[&Card::new(color, value)], 2);
            }
        }

        assert_eq!(counts[&Card::wild()], 4);
        assert_eq!(counts[&Card::wild_draw_four()], 4);
    }

    #[test]
    fn shuffle_keeps_the_same_cards() {
        let mut rng = StdRng::seed_from_u64(7);
        let fresh = Deck::new();
        let mut shuffled = fresh.clone();
        shuffled.shuffle(&mut rng);

        assert_eq!(card_counts(fresh.iter()), card_counts(shuffled.iter()));
        assert_ne!(fresh.0, shuffled.0);
    }

    proptest! {
        #[test]
        fn shuffle_preserves_cards_for_any_seed(seed in any::<u64>()) {
            let mut rng = StdRng::seed_from_u64(seed);
            let fresh = Deck::new();
            let mut shuffled = fresh.clone();
            shuffled.shuffle(&mut rng);

            prop_assert_eq!(shuffled.cards_count(), fresh.cards_count());
            prop_assert_eq!(card_counts(fresh.iter()), card_counts(shuffled.iter()));
        }
    }

    #[test]
    fn draw_takes_from_the_end() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut discard = DiscardPile::new();
        let mut deck = Deck::from(vec![Card::number(Color::Red, 1), Card::number(Color::Blue, 2)]);

        assert_eq!(
            deck.draw(&mut discard, &mut rng).unwrap(),
            Card::number(Color::Blue, 2)
        );
        assert_eq!(deck.cards_count(), 1);
    }

    #[test]
    fn draw_reshuffles_discard_except_top() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut deck = Deck::from(vec![]);
        let mut discard = DiscardPile::new();
        let mut played_wild = Card::wild();
        played_wild.set_color(Color::Red).unwrap();
        discard.push(played_wild);
        discard.push(Card::number(Color::Red, 4));
        discard.push(Card::number(Color::Green, 4));

        let drawn = deck.draw(&mut discard, &mut rng).unwrap();

        assert!(drawn == Card::wild() || drawn == Card::number(Color::Red, 4));
        assert_eq!(deck.cards_count(), 1);
        assert_eq!(discard.cards_count(), 1);
        assert_eq!(discard.top(), Some(&Card::number(Color::Green, 4)));
        assert!(deck.iter().chain([&drawn]).any(|card| *card == Card::wild()));
    }

    #[test]
    fn draw_fails_when_deck_and_discard_are_exhausted() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut deck = Deck::from(vec![]);
        let mut discard = DiscardPile::new();
        discard.push(Card::number(Color::Yellow, 8));

        assert_eq!(
            deck.draw(&mut discard, &mut rng),
            Err(UnoError::DeckExhausted {
                drawn: 0,
                requested: 1
            })
        );
        assert_eq!(discard.cards_count(), 1);
    }
}
