use std::fmt::Display;
use std::io::{self, BufRead, StdinLock, Stdout, Write};

use runo::{
    card::Color,
    error::UnoError,
    provider::{DecisionProvider, TurnView},
    turn::{GameEvent, TurnAction},
};

/// Asks the player at the keyboard for every decision.
pub struct Console<R, W> {
    input: R,
    output: W,
}

/// A console on the process's own stdin and stdout.
pub type Terminal = Console<StdinLock<'static>, Stdout>;

impl Default for Terminal {
    fn default() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn say(&mut self, text: impl Display) {
        if let Err(err) = writeln!(self.output, "{text}") {
            tracing::warn!(%err, "failed to write to the console");
        }
    }

    /// Shows `question` and reads one line. `None` once input is closed.
    fn prompt(&mut self, question: &str) -> Option<String> {
        if let Err(err) = write!(self.output, "{question}").and_then(|()| self.output.flush()) {
            tracing::warn!(%err, "failed to write to the console");
        }

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line),
            Err(err) => {
                tracing::error!(%err, "failed to read from the console");
                None
            }
        }
    }

    fn answer(&mut self, question: &str) -> String {
        match self.prompt(question) {
            Some(line) => line,
            None => {
                // Nobody is left to answer and the engine has no way to abandon a turn.
                eprintln!("\nInput closed, leaving the game.");
                tracing::warn!("input closed mid round");
                std::process::exit(1);
            }
        }
    }

    fn show_turn(&mut self, view: &TurnView<'_>) {
        self.say(format!("\n{}", "=".repeat(50)));
        self.say(format!("Top card: {}", view.top_card));
        self.say(format!("\n{}'s Hand:", view.player));
        for (index, card) in view.hand.iter().enumerate() {
            let marker = if view.legal_moves.contains(&index) { "*" } else { " " };
            self.say(format!("{marker}{index}: {card}"));
        }
    }
}

impl<R: BufRead, W: Write> DecisionProvider for Console<R, W> {
    fn request_move(&mut self, view: &TurnView<'_>) -> TurnAction {
        self.show_turn(view);
        loop {
            let question = if view.has_drawn {
                "Choose a card to play, 'd' to draw or 'p' to pass: "
            } else {
                "Choose a card to play (or 'd' to draw): "
            };
            match self.answer(question).parse::<TurnAction>() {
                Ok(action) => return action,
                Err(err) => self.say(err),
            }
        }
    }

    fn request_color(&mut self, _view: &TurnView<'_>) -> Color {
        loop {
            match Color::parse_chosen(&self.answer("Choose color (Red/Blue/Green/Yellow): ")) {
                Ok(color) => return color,
                Err(err) => self.say(err),
            }
        }
    }

    fn rejected(&mut self, error: &UnoError) {
        self.say(error);
    }

    fn notify(&mut self, event: &GameEvent) {
        match event {
            GameEvent::CardDrawn { .. } | GameEvent::ColorChosen(_) => {}
            GameEvent::PlayerWon(player) => self.say(format!("\n{player} wins!")),
            event => self.say(event),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::io::Cursor;

    use runo::card::Card;

    use super::*;

    fn with_view<T>(f: impl FnOnce(&TurnView<'_>) -> T) -> T {
        let hand = [Card::number(Color::Red, 3), Card::number(Color::Blue, 7)];
        let top_card = Card::number(Color::Red, 5);
        let legal_moves = BTreeSet::from([0]);
        f(&TurnView {
            player: "Ann",
            hand: &hand,
            top_card: &top_card,
            legal_moves: &legal_moves,
            has_drawn: false,
        })
    }

    fn output(console: Console<Cursor<&str>, Vec<u8>>) -> String {
        String::from_utf8(console.output).unwrap()
    }

    #[test]
    fn request_move_asks_again_after_bad_input() {
        let mut console = Console::new(Cursor::new("red\n1\n"), Vec::new());

        let action = with_view(|view| console.request_move(view));

        assert_eq!(action, TurnAction::Play(1));
        let shown = output(console);
        assert!(shown.contains("Top card: Red 5"));
        assert!(shown.contains("*0: Red 3"));
        assert!(shown.contains(" 1: Blue 7"));
        assert!(shown.contains("`red` is not a card number"));
    }

    #[test]
    fn request_color_asks_again_for_wild() {
        let mut console = Console::new(Cursor::new("wild\nblue\n"), Vec::new());

        let color = with_view(|view| console.request_color(view));

        assert_eq!(color, Color::Blue);
        assert!(output(console).contains("Invalid color `wild`"));
    }

    #[test]
    fn prompt_reports_closed_input() {
        let mut console = Console::new(Cursor::new(""), Vec::new());

        assert_eq!(console.prompt("Choose: "), None);
        assert_eq!(output(console), "Choose: ");
    }

    #[test]
    fn notify_hides_private_events() {
        let mut console = Console::new(Cursor::new(""), Vec::new());

        console.notify(&GameEvent::CardDrawn {
            player: "Ann".to_string(),
        });
        console.notify(&GameEvent::DirectionReversed);

        assert_eq!(output(console), "Direction reversed!\n");
    }
}
