mod console;

use clap::Parser;
use color_eyre::eyre::WrapErr;
use rand::{rngs::StdRng, SeedableRng};
use runo::uno::Uno;
use tracing::Level;

use crate::console::Terminal;

#[derive(Parser)]
#[command(author, version, about = "Play a round of UNO in the terminal", long_about = None)]
struct Args {
    /// Names of the players, in seating order
    #[arg(required = true, num_args = 2..=10)]
    players: Vec<String>,
    /// Seed for the shuffle, for replaying a round
    #[arg(long)]
    seed: Option<u64>,
    /// Log level for engine diagnostics, written to stderr
    #[arg(long, default_value_t = Level::WARN)]
    log_level: Level,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut uno = Uno::with_rng(args.players, rng).wrap_err("Failed to set up the round")?;
    let mut console = Terminal::default();

    console.say("Welcome to UNO!");
    console.say("Match cards by color or value. Enter a card number, 'd' to draw or 'p' to pass after drawing.");

    let winner = uno
        .play_round(&mut console)
        .wrap_err("The round could not be finished")?;
    tracing::info!(%winner, "round finished");

    Ok(())
}
