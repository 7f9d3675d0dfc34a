//! Cat-Trap: block cells on a hex board to keep the cat from escaping.
//!
//! ## Usage
//!
//! - `cat-trap play <BOARD>` - Play a board file with the automated player
//! - `cat-trap play <BOARD> --interactive` - Play it yourself
//! - `cat-trap generate` - Print a random board
//! - `cat-trap demo` - Watch the automated player on a random board

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use cat_trap::board::Board;
use cat_trap::constants::{DEFAULT_MAX_EXPANSIONS, RANDOM_WALLS};
use cat_trap::game::{Game, Outcome, Turn};
use cat_trap::player::{AutoPlayer, InteractivePlayer, Player};
use cat_trap::search::SearchConfig;

/// Cat-Trap: a hex-board cat trapping puzzle and solver
#[derive(Parser)]
#[command(name = "cat-trap")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a board loaded from a file
    Play {
        /// Board file: 11 rows of 10 tokens (`C` cat, `#` blocked, `-` open)
        board: PathBuf,
        /// Enter moves on stdin instead of using the automated player
        #[arg(long)]
        interactive: bool,
        /// Search node budget for the automated player
        #[arg(long, default_value_t = DEFAULT_MAX_EXPANSIONS)]
        max_expansions: usize,
    },
    /// Print a random board
    Generate {
        /// Seed for reproducible boards
        #[arg(long)]
        seed: Option<u64>,
        /// Number of random wall placements
        #[arg(long, default_value_t = RANDOM_WALLS)]
        walls: usize,
    },
    /// Let the automated player play a random board
    Demo {
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value_t = RANDOM_WALLS)]
        walls: usize,
        #[arg(long, default_value_t = DEFAULT_MAX_EXPANSIONS)]
        max_expansions: usize,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Play {
            board,
            interactive,
            max_expansions,
        }) => {
            let text = fs::read_to_string(&board)
                .with_context(|| format!("failed to read {}", board.display()))?;
            let parsed: Board = text
                .parse()
                .with_context(|| format!("failed to load board from {}", board.display()))?;
            let player: Box<dyn Player> = if interactive {
                Box::new(InteractivePlayer::stdio())
            } else {
                Box::new(auto_player(max_expansions))
            };
            play(parsed, player)
        }
        Some(Commands::Generate { seed, walls }) => {
            print!("{}", Board::random(&mut rng(seed), walls));
            Ok(())
        }
        Some(Commands::Demo {
            seed,
            walls,
            max_expansions,
        }) => {
            let board = Board::random(&mut rng(seed), walls);
            play(board, Box::new(auto_player(max_expansions)))
        }
        None => {
            let board = Board::random(&mut rng(None), RANDOM_WALLS);
            play(board, Box::new(auto_player(DEFAULT_MAX_EXPANSIONS)))
        }
    }
}

fn rng(seed: Option<u64>) -> fastrand::Rng {
    seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed)
}

fn auto_player(max_expansions: usize) -> AutoPlayer {
    AutoPlayer::with_config(SearchConfig { max_expansions })
}

fn play(board: Board, player: Box<dyn Player>) -> anyhow::Result<()> {
    println!("Initial board:");
    println!("{board}");

    let mut game = Game::new(board, player);
    loop {
        match game.step()? {
            Turn::Played { block, cat } => {
                println!("Player blocks {block}, cat moves to {cat}:");
                println!("{}", game.board());
            }
            Turn::Over { block, outcome } => {
                if let Some(block) = block {
                    println!("Player blocks {block}:");
                    println!("{}", game.board());
                }
                match outcome {
                    Outcome::Escaped => println!("Failed! The cat ran away!"),
                    Outcome::Trapped => println!("Succeeded! You trapped the cat!"),
                }
                return Ok(());
            }
        }
    }
}
