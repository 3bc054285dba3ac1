//! othello-rust: Othello with a minimax computer opponent.
//!
//! ## Usage
//!
//! - `othello-rust` - Show a demo
//! - `othello-rust play` - Play in the console against the computer or a friend
//! - `othello-rust protocol` - Start the text protocol server for GUI integration
//! - `othello-rust selfplay` - Pit the search against a random player
//!
//! Set `RUST_LOG=debug` to see search statistics.

use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::info;

use othello_rust::board::{parse_coord, str_coord, Board, Player, Point};
use othello_rust::constants::{DEFAULT_DEPTH, MAX_DEPTH, THINK_DELAY_MS};
use othello_rust::eval::evaluate_board;
use othello_rust::game::{Game, GameMode, Outcome};
use othello_rust::playout::play_against_random;
use othello_rust::protocol::ProtocolEngine;
use othello_rust::search::Searcher;

/// othello-rust: Othello with a minimax computer opponent
#[derive(Parser)]
#[command(name = "othello-rust")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game in the console
    Play {
        /// Against the computer (single) or two humans (multiplayer)
        #[arg(long, value_enum, default_value_t = GameMode::Single)]
        mode: GameMode,
        /// Search depth of the computer in plies
        #[arg(long, default_value_t = DEFAULT_DEPTH, value_parser = clap::value_parser!(u32).range(1..=MAX_DEPTH as i64))]
        depth: u32,
        /// Pause before each computer move, in milliseconds
        #[arg(long, default_value_t = THINK_DELAY_MS)]
        delay_ms: u64,
    },
    /// Start the text protocol server on stdin/stdout
    Protocol {
        /// Search depth for genmove in plies
        #[arg(long, default_value_t = DEFAULT_DEPTH, value_parser = clap::value_parser!(u32).range(1..=MAX_DEPTH as i64))]
        depth: u32,
    },
    /// Play the search (Black) against a random player (White)
    Selfplay {
        /// Number of games
        #[arg(long, default_value_t = 10)]
        games: u32,
        /// Search depth in plies
        #[arg(long, default_value_t = DEFAULT_DEPTH, value_parser = clap::value_parser!(u32).range(1..=MAX_DEPTH as i64))]
        depth: u32,
        /// Seed for the random player
        #[arg(long, default_value_t = 1)]
        seed: u64,
    },
    /// Run a simple demo of the engine
    Demo,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Play {
            mode,
            depth,
            delay_ms,
        }) => run_console(mode, depth, Duration::from_millis(delay_ms)),
        Some(Commands::Protocol { depth }) => {
            let mut engine = ProtocolEngine::with_depth(depth);
            engine
                .run(io::stdin().lock(), io::stdout())
                .context("protocol loop failed")
        }
        Some(Commands::Selfplay { games, depth, seed }) => {
            run_selfplay(games, depth, seed)?;
            Ok(())
        }
        Some(Commands::Demo) | None => {
            run_demo();
            Ok(())
        }
    }
}

fn print_status(game: &Game) {
    println!("{}", game.board());
    if let Some(row) = game.score_history().last() {
        println!(
            "Turn {}: White {} Black {}",
            row.turn, row.white, row.black
        );
    }
    match (game.current_player(), game.final_score()) {
        (Some(player), _) => println!("Player {}'s turn ({player})", player.number()),
        (None, Some(score)) => println!("{score}"),
        (None, None) => {}
    }
}

/// The pause shown before the computer's replies, if it made any.
fn thinking_pause(replies: &[Point], delay: Duration) -> Option<Duration> {
    (!replies.is_empty() && !delay.is_zero()).then_some(delay)
}

fn run_console(mode: GameMode, depth: u32, delay: Duration) -> Result<()> {
    let mut game = Game::new(mode, depth);
    info!("starting {mode} game at depth {depth}");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    print_status(&game);

    while !game.is_over() {
        print!("move> ");
        io::stdout().flush().context("failed to flush stdout")?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("failed to read move")?;
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input == "quit" {
            break;
        }

        let Some((row, col)) = parse_coord(input) else {
            println!("Enter a move like d3, or quit");
            continue;
        };
        match game.play(row, col) {
            Ok(replies) => {
                if let Some(pause) = thinking_pause(&replies, delay) {
                    thread::sleep(pause);
                }
                for reply in replies {
                    println!("Computer plays {}", str_coord(reply));
                }
                print_status(&game);
            }
            Err(e) => println!("{e}"),
        }
    }

    println!("Turn | White | Black");
    for row in game.score_history() {
        println!("{:>4} | {:>5} | {:>5}", row.turn, row.white, row.black);
    }
    Ok(())
}

fn run_selfplay(games: u32, depth: u32, seed: u64) -> Result<()> {
    if games == 0 {
        bail!("--games must be at least 1");
    }
    let mut rng = fastrand::Rng::with_seed(seed);
    let (mut wins, mut draws, mut losses) = (0, 0, 0);

    for n in 1..=games {
        let score = play_against_random(depth, &mut rng)
            .with_context(|| format!("self-play game {n} failed"))?;
        info!("game {n}: {score}");
        match score.outcome {
            Outcome::Win(Player::Black) => wins += 1,
            Outcome::Win(Player::White) => losses += 1,
            Outcome::Draw => draws += 1,
        }
    }

    println!("Search (depth {depth}) vs random over {games} games:");
    println!("  wins {wins}, draws {draws}, losses {losses}");
    Ok(())
}

fn run_demo() {
    println!("othello-rust: Othello with a minimax opponent\n");

    let board = Board::new();
    println!("=== Starting Position ===");
    println!("{board}");
    println!("Evaluation (Black - White): {}", evaluate_board(&board));

    let moves: Vec<String> = board.valid_moves(Player::White).map(str_coord).collect();
    println!("White to move: {}\n", moves.join(" "));

    println!("=== Search Demo ===");
    let mut after = board;
    after.apply_move(2, 4, Player::White);
    println!("White plays e3:\n{after}");

    let mut searcher = Searcher::default();
    let result = searcher.search(&after, Player::Black);
    let reply = result.best_move.map_or_else(|| "pass".to_string(), str_coord);
    println!(
        "Black (depth {}) replies {reply}, score {}, {} nodes",
        searcher.depth(),
        result.score,
        result.nodes
    );
}
