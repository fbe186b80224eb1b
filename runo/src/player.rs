use crate::hand::Hand;

#[derive(Debug, Clone)]
pub struct Player {
    name: String,
    pub hand: Hand,
}

impl Player {
    pub fn new(name: String, hand: Hand) -> Self {
        Self { name, hand }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cards_count(&self) -> usize {
        self.hand.cards_count()
    }
}
