//! Terminal host for cubesweeper.
//!
//! Usage:
//!   cubesweeper --difficulty hard --seed 42
//!
//! Then type `x y z` to reveal a cell, `new` to start over and `quit` to leave.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use cubesweeper_core::*;

use command::{Command, HELP, parse_command};
use render::{format_time, render_grid, status_line};
use store::JsonBestTimes;

mod command;
mod render;
mod store;

#[derive(Parser)]
#[command(name = "cubesweeper", about = "Minesweeper on a voxel cube")]
struct Cli {
    /// Difficulty preset: easy, medium or hard
    #[arg(short, long, default_value = "easy")]
    difficulty: Difficulty,

    /// Seed for hazard placement, random when omitted
    #[arg(short, long)]
    seed: Option<u64>,

    /// File where best times are kept
    #[arg(long, default_value = "cubesweeper-best.json")]
    best_times: PathBuf,

    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.verbose.log_level_filter())
        .init();

    let mut store = JsonBestTimes::load(&cli.best_times)?;
    let mut difficulty = cli.difficulty;
    let mut games: u64 = 0;
    let mut session = start_game(difficulty, cli.seed, &mut games, &store)?;

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    prompt(&mut stdout)?;

    for line in stdin.lock().lines() {
        let line = line.context("Could not read input")?;

        match parse_command(&line) {
            Ok(Command::Quit) => break,
            Ok(Command::Help) => println!("{HELP}"),
            Ok(Command::New(next)) => {
                difficulty = next.unwrap_or(difficulty);
                session = start_game(difficulty, cli.seed, &mut games, &store)?;
            }
            Ok(Command::Reveal(coords)) => play(&mut session, coords, &mut store)?,
            Err(message) => println!("{message}"),
        }

        prompt(&mut stdout)?;
    }

    Ok(())
}

fn start_game(
    difficulty: Difficulty,
    seed: Option<u64>,
    games: &mut u64,
    store: &JsonBestTimes,
) -> Result<Session> {
    let seed = match seed {
        // successive games from a fixed seed stay reproducible
        Some(seed) => seed.wrapping_add(*games),
        None => time_seed(),
    };
    *games += 1;

    let session = Session::new_game(difficulty, SessionOptions::with_seed(seed))
        .with_context(|| format!("Could not start a {difficulty} game"))?;
    log::info!("Started {} game with seed {}", difficulty, seed);

    let config = difficulty.config();
    println!(
        "New {} game: {}x{}x{} cube, {} hazards, {} rewards",
        difficulty, config.side, config.side, config.side, config.hazards, config.rewards
    );
    match store.best_time(difficulty) {
        Some(best) => println!("Best time: {}", format_time(best)),
        None => println!("Best time: --:--"),
    }
    print!("{}", render_grid(&session));
    println!("{}", status_line(&session));

    Ok(session)
}

fn play(session: &mut Session, coords: Coord3, store: &mut JsonBestTimes) -> Result<()> {
    let reveal = match session.reveal(coords) {
        Ok(reveal) => reveal,
        Err(GameError::OutOfBounds) => {
            log::warn!("Ignoring reveal outside the grid at {:?}", coords);
            return Ok(());
        }
        Err(err) => {
            println!("{err}, type new to play again");
            return Ok(());
        }
    };

    match reveal.outcome {
        RevealOutcome::AlreadyRevealed => println!("Already revealed"),
        RevealOutcome::FoundReward => println!("Reward found!"),
        RevealOutcome::HitHazard => println!("Boom."),
        RevealOutcome::RevealedEmpty(_) => {}
    }
    let pulses = reveal
        .changes
        .iter()
        .filter(|change| change.update == CellUpdate::Pulsing)
        .count();
    if pulses > 0 {
        println!("{pulses} hazard(s) surfaced");
    }

    print!("{}", render_grid(session));
    println!("{}", status_line(session));

    if session.record_best_time(store) {
        println!("New best time: {}", format_time(session.elapsed()));
        if let Err(err) = store.save() {
            log::warn!("{:#}", err);
        }
    }
    if session.is_finished() {
        println!("Type new to play again");
    }

    Ok(())
}

fn prompt(stdout: &mut io::Stdout) -> Result<()> {
    print!("> ");
    stdout.flush().context("Could not write prompt")
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}
