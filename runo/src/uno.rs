use std::collections::{BTreeSet, HashSet};

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::card::{Card, Color, Effect};
use crate::constants::{MAX_PLAYERS, MIN_PLAYERS, STARTING_HAND_SIZE};
use crate::deck::{Deck, DiscardPile};
use crate::error::{Result, UnoError};
use crate::hand::Hand;
use crate::player::Player;
use crate::provider::{DecisionProvider, TurnView};
use crate::turn::{Direction, GameEvent, TurnAction, TurnOutcome, TurnState};

/// A single round of UNO. All game state lives here and every operation goes
/// through it, so a round can be replayed exactly given the same `rng` and decisions.
#[derive(Debug)]
pub struct Uno<R = StdRng> {
    deck: Deck,
    discard: DiscardPile,
    players: Vec<Player>,
    current_player_index: usize,
    direction: Direction,
    state: TurnState,
    winner: Option<usize>,
    stalled_turns: usize,
    rng: R,
}

impl Uno<StdRng> {
    pub fn new(player_names: Vec<String>) -> Result<Self> {
        Self::with_rng(player_names, StdRng::from_entropy())
    }
}

impl<R: Rng> Uno<R> {
    /// Shuffles a fresh deck, deals every player a starting hand and turns up
    /// the first non wild card.
    pub fn with_rng(player_names: Vec<String>, mut rng: R) -> Result<Self> {
        if player_names.len() < MIN_PLAYERS {
            return Err(UnoError::NotEnoughPlayers);
        }
        if player_names.len() > MAX_PLAYERS {
            return Err(UnoError::TooManyPlayers);
        }

        let mut seen = HashSet::with_capacity(player_names.len());
        for name in &player_names {
            if !seen.insert(name.as_str()) {
                return Err(UnoError::DuplicatePlayer(name.clone()));
            }
        }

        let mut deck = Deck::new();
        let mut discard = DiscardPile::new();
        deck.shuffle(&mut rng);

        let mut players = Vec::with_capacity(player_names.len());
        for name in player_names {
            let mut hand = Hand::new();
            hand.draw_into(&mut deck, &mut discard, &mut rng, STARTING_HAND_SIZE)?;
            players.push(Player::new(name, hand));
        }

        Self::reveal_top_card(&mut deck, &mut discard, &mut rng)?;

        tracing::info!(
            players = players.len(),
            top_card = %discard.top().expect("The first card was just revealed."),
            "round started"
        );

        Ok(Uno {
            deck,
            discard,
            players,
            current_player_index: 0,
            direction: Direction::default(),
            state: TurnState::AwaitingMove,
            winner: None,
            stalled_turns: 0,
            rng,
        })
    }

    fn reveal_top_card(deck: &mut Deck, discard: &mut DiscardPile, rng: &mut R) -> Result<()> {
        loop {
            if deck.iter().all(|card| card.color() == Color::Wild) {
                return Err(UnoError::NoStartingCard);
            }

            let card = deck.draw(discard, rng)?;
            if card.color() == Color::Wild {
                deck.add_card(card);
                deck.shuffle(rng);
                continue;
            }

            discard.push(card);
            return Ok(());
        }
    }

    /// Plays one full turn for the current player, asking `provider` for every
    /// decision until a valid one arrives.
    pub fn play_turn<P: DecisionProvider + ?Sized>(&mut self, provider: &mut P) -> Result<TurnOutcome> {
        if self.state == TurnState::RoundOver {
            return Err(UnoError::RoundOver);
        }

        let mut has_drawn = false;

        if self.legal_moves().is_empty() {
            has_drawn = true;
            let drawn = self.draw_for_current(provider);
            if drawn == 0 {
                self.stalled_turns += 1;
                return Ok(self.pass_turn(provider));
            }
            if self.legal_moves().is_empty() {
                return Ok(self.pass_turn(provider));
            }
        }

        let index = loop {
            let legal_moves = self.legal_moves();
            let player = &self.players[self.current_player_index];
            let view = TurnView {
                player: player.name(),
                hand: &player.hand,
                top_card: self.top_card(),
                legal_moves: &legal_moves,
                has_drawn,
            };

            match provider.request_move(&view) {
                TurnAction::Play(index) if legal_moves.contains(&index) => break index,
                TurnAction::Play(index) => {
                    let err = UnoError::IllegalMove(format!("card {index} can't be played"));
                    tracing::debug!(%err, "move rejected");
                    provider.rejected(&err);
                }
                TurnAction::Pass if has_drawn => return Ok(self.pass_turn(provider)),
                TurnAction::Pass => {
                    let err = UnoError::IllegalMove("draw a card before passing".to_string());
                    tracing::debug!(%err, "move rejected");
                    provider.rejected(&err);
                }
                TurnAction::Draw => {
                    has_drawn = true;
                    if self.draw_for_current(provider) == 0 {
                        return Ok(self.pass_turn(provider));
                    }
                    let player = &self.players[self.current_player_index];
                    let drawn = player.hand.last().expect("A card was just drawn.");
                    if !drawn.matches(self.top_card()) {
                        return Ok(self.pass_turn(provider));
                    }
                }
            }
        };

        let card = self.play_card(index, provider)?;
        self.stalled_turns = 0;

        let player = &self.players[self.current_player_index];
        let name = player.name().to_string();

        if player.cards_count() == 1 {
            emit(provider, GameEvent::UnoCalled(name.clone()));
        }

        if player.cards_count() == 0 {
            self.state = TurnState::RoundOver;
            self.winner = Some(self.current_player_index);
            emit(provider, GameEvent::PlayerWon(name.clone()));
            return Ok(TurnOutcome::Won(name));
        }

        self.state = TurnState::ResolvingSpecial;
        self.apply_effect(card.value().effect(), provider);
        self.move_turn_ahead();
        self.state = TurnState::AwaitingMove;

        Ok(TurnOutcome::Played(card))
    }

    /// Keeps playing turns until someone empties their hand and returns the winner's name.
    pub fn play_round<P: DecisionProvider + ?Sized>(&mut self, provider: &mut P) -> Result<String> {
        loop {
            if let TurnOutcome::Won(name) = self.play_turn(provider)? {
                return Ok(name);
            }
            if self.stalled_turns >= self.players.len() {
                tracing::warn!("nobody can play or draw");
                return Err(UnoError::Stalemate);
            }
        }
    }

    fn play_card<P: DecisionProvider + ?Sized>(&mut self, index: usize, provider: &mut P) -> Result<Card> {
        let mut card = self.players[self.current_player_index]
            .hand
            .play_at(index)?;

        if card.color() == Color::Wild {
            let no_moves = BTreeSet::new();
            let color = loop {
                let player = &self.players[self.current_player_index];
                let view = TurnView {
                    player: player.name(),
                    hand: &player.hand,
                    top_card: self.top_card(),
                    legal_moves: &no_moves,
                    has_drawn: false,
                };
                let color = provider.request_color(&view);
                match card.set_color(color) {
                    Ok(()) => break color,
                    Err(err) => {
                        tracing::debug!(%err, "color rejected");
                        provider.rejected(&err);
                    }
                }
            };
            emit(provider, GameEvent::ColorChosen(color));
        }

        let player = self.players[self.current_player_index].name().to_string();
        emit(provider, GameEvent::CardPlayed { player, card });
        self.discard.push(card);

        Ok(card)
    }

    fn apply_effect<P: DecisionProvider + ?Sized>(&mut self, effect: Effect, provider: &mut P) {
        match effect {
            Effect::None => {}
            Effect::Skip => {
                self.move_turn_ahead();
                let skipped = self.current_player().name().to_string();
                emit(provider, GameEvent::PlayerSkipped(skipped));
            }
            Effect::Reverse => {
                self.direction = self.direction.reversed();
                emit(provider, GameEvent::DirectionReversed);
            }
            Effect::ForceDraw(count) => {
                self.move_turn_ahead();
                let drawn = self.draw_cards_to_player(self.current_player_index, count, provider);
                let player = self.current_player().name().to_string();
                emit(provider, GameEvent::PlayerDrewForced { player, count: drawn });
            }
        }
    }

    fn draw_for_current<P: DecisionProvider + ?Sized>(&mut self, provider: &mut P) -> usize {
        let drawn = self.draw_cards_to_player(self.current_player_index, 1, provider);
        if drawn > 0 {
            self.stalled_turns = 0;
            let player = self.current_player().name().to_string();
            emit(provider, GameEvent::CardDrawn { player });
        }
        drawn
    }

    /// Draws up to `count` cards for a player and returns how many they got.
    fn draw_cards_to_player<P: DecisionProvider + ?Sized>(
        &mut self,
        player_index: usize,
        count: usize,
        provider: &mut P,
    ) -> usize {
        let discarded_before = self.discard.cards_count();
        let player = &mut self.players[player_index];
        let result = player
            .hand
            .draw_into(&mut self.deck, &mut self.discard, &mut self.rng, count);

        let recycled = discarded_before - self.discard.cards_count();
        if recycled > 0 {
            emit(provider, GameEvent::DeckReshuffled { cards: recycled });
        }

        match result {
            Ok(()) => count,
            Err(UnoError::DeckExhausted { drawn, requested }) => {
                let player = self.players[player_index].name().to_string();
                emit(
                    provider,
                    GameEvent::DeckExhausted {
                        player,
                        drawn,
                        requested,
                    },
                );
                drawn
            }
            Err(err) => unreachable!("drawing only fails when the deck is exhausted: {err}"),
        }
    }

    fn pass_turn<P: DecisionProvider + ?Sized>(&mut self, provider: &mut P) -> TurnOutcome {
        let player = self.current_player().name().to_string();
        emit(provider, GameEvent::TurnPassed(player));
        self.move_turn_ahead();
        TurnOutcome::Passed
    }
}

impl<R> Uno<R> {
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn get_player(&self, index: usize) -> Option<&Player> {
        self.players.get(index)
    }

    pub fn get_player_mut(&mut self, index: usize) -> Option<&mut Player> {
        self.players.get_mut(index)
    }

    pub fn current_player_index(&self) -> usize {
        self.current_player_index
    }

    pub fn current_player(&self) -> &Player {
        &self.players[self.current_player_index]
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    pub fn winner(&self) -> Option<&Player> {
        self.winner.map(|index| &self.players[index])
    }

    pub fn top_card(&self) -> &Card {
        self.discard
            .top()
            .expect("The discard pile always holds at least the starting card.")
    }

    pub fn legal_moves(&self) -> BTreeSet<usize> {
        self.current_player().hand.legal_moves(self.top_card())
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn deck_mut(&mut self) -> &mut Deck {
        &mut self.deck
    }

    pub fn discard_pile(&self) -> &DiscardPile {
        &self.discard
    }

    pub fn discard_pile_mut(&mut self) -> &mut DiscardPile {
        &mut self.discard
    }

    fn nth_player_index_ahead(&self, n: usize) -> usize {
        let len = self.players.len() as isize;
        let step = self.direction.step() * n as isize;
        (self.current_player_index as isize + step).rem_euclid(len) as usize
    }

    fn move_turn_ahead(&mut self) {
        self.current_player_index = self.nth_player_index_ahead(1);
    }
}

fn emit<P: DecisionProvider + ?Sized>(provider: &mut P, event: GameEvent) {
    match event {
        GameEvent::CardDrawn { .. } | GameEvent::DeckReshuffled { .. } => {
            tracing::debug!(%event, "game event")
        }
        GameEvent::DeckExhausted { .. } => tracing::warn!(%event, "game event"),
        _ => tracing::info!(%event, "game event"),
    }
    provider.notify(&event);
}
