//! Line-oriented text protocol in the style of the Go Text Protocol.
//!
//! Lets GUIs and scripts drive the engine over stdin/stdout. Every command
//! gets a response starting with `=` on success or `?` on failure, optionally
//! followed by the numeric id that prefixed the command, and terminated by a
//! blank line.
//!
//! ## Supported Commands
//!
//! - `name`, `version`, `protocol_version`
//! - `list_commands`, `known_command <cmd>`
//! - `quit` - Exit the loop
//! - `boardsize <size>` - Only 8 is accepted
//! - `clear_board` - Reset to the starting position
//! - `depth <plies>` - Set the search depth for `genmove`
//! - `play <color> <vertex>` - Play a move for the given color
//! - `genmove <color>` - Search, play and print a move (or `pass`)
//! - `valid_moves <color>` - List legal moves in row-major order
//! - `showboard` - Print the board diagram
//! - `score` - Current disk counts
//! - `final_score` - `B+n`, `W+n` or `0`
//!
//! Colors are explicit on every move command; the engine does not track
//! whose turn it is.
//!
//! ## Example
//!
//! ```ignore
//! use othello_rust::protocol::ProtocolEngine;
//! let mut engine = ProtocolEngine::new();
//! engine.run(std::io::stdin().lock(), std::io::stdout())?;
//! ```

use std::io::{self, BufRead, Write};

use log::debug;

use crate::board::{parse_coord, str_coord, Board, Player, Point};
use crate::constants::{COLS, DEFAULT_DEPTH, MAX_DEPTH, ROWS};
use crate::search::Searcher;

/// The list of known commands.
const KNOWN_COMMANDS: &[&str] = &[
    "boardsize",
    "clear_board",
    "depth",
    "final_score",
    "genmove",
    "known_command",
    "list_commands",
    "name",
    "play",
    "protocol_version",
    "quit",
    "score",
    "showboard",
    "valid_moves",
    "version",
];

/// Protocol engine state.
pub struct ProtocolEngine {
    /// Current position
    board: Board,
    /// Search depth for `genmove`
    depth: u32,
}

impl Default for ProtocolEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ProtocolEngine {
    /// Create an engine at the starting position with the default depth.
    pub fn new() -> Self {
        Self::with_depth(DEFAULT_DEPTH)
    }

    /// Create an engine searching `depth` plies, kept within `1..=MAX_DEPTH`.
    pub fn with_depth(depth: u32) -> Self {
        Self {
            board: Board::new(),
            depth: depth.clamp(1, MAX_DEPTH),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Run the command loop until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);

            let parts: Vec<&str> = command_line.split_whitespace().collect();
            if parts.is_empty() {
                continue;
            }

            let command = parts[0].to_lowercase();
            let args = &parts[1..];

            let (success, message) = self.execute(&command, args);
            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();

            writeln!(output, "{prefix}{id_str} {message}\n")?;
            output.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command ID from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        if end == 0 {
            return (None, trimmed);
        }
        match trimmed[..end].parse::<u32>() {
            Ok(id) => (Some(id), trimmed[end..].trim()),
            Err(_) => (None, trimmed),
        }
    }

    fn parse_player(arg: Option<&&str>) -> Result<Player, String> {
        let arg = arg.ok_or_else(|| "missing argument".to_string())?;
        arg.parse::<Player>().map_err(|e| e.to_string())
    }

    fn format_moves(moves: &[Point]) -> String {
        moves
            .iter()
            .map(|&pt| str_coord(pt))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Execute a command and return (success, response).
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "name" => (true, env!("CARGO_PKG_NAME").to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => (true, "2".to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => match args.first() {
                Some(cmd) => {
                    let known = KNOWN_COMMANDS.contains(&cmd.to_lowercase().as_str());
                    (true, known.to_string())
                }
                None => (false, "missing argument".to_string()),
            },

            "quit" => (true, String::new()),

            "boardsize" => match args.first().map(|a| a.parse::<usize>()) {
                None => (false, "missing argument".to_string()),
                Some(Ok(size)) if size == ROWS && size == COLS => (true, String::new()),
                Some(Ok(size)) => (
                    false,
                    format!("unacceptable size, only {ROWS} is supported (got {size})"),
                ),
                Some(Err(_)) => (false, "invalid size".to_string()),
            },

            "clear_board" => {
                self.board = Board::new();
                (true, String::new())
            }

            "depth" => match args.first().map(|a| a.parse::<u32>()) {
                None => (true, self.depth.to_string()),
                Some(Ok(depth)) if (1..=MAX_DEPTH).contains(&depth) => {
                    self.depth = depth;
                    (true, String::new())
                }
                Some(Ok(_)) => (false, format!("depth must be between 1 and {MAX_DEPTH}")),
                Some(Err(_)) => (false, "invalid depth".to_string()),
            },

            "play" => {
                if args.len() < 2 {
                    return (false, "missing arguments".to_string());
                }
                let player = match Self::parse_player(args.first()) {
                    Ok(p) => p,
                    Err(e) => return (false, e),
                };
                let vertex = args[1].to_lowercase();
                if vertex == "pass" {
                    return if self.board.has_valid_move(player) {
                        (false, "pass with legal moves available".to_string())
                    } else {
                        (true, String::new())
                    };
                }
                match parse_coord(&vertex) {
                    Some((row, col)) if self.board.is_legal_move(row, col, player) => {
                        self.board.apply_move(row, col, player);
                        (true, String::new())
                    }
                    Some(_) => (false, "illegal move".to_string()),
                    None => (false, format!("invalid vertex {vertex}")),
                }
            }

            "genmove" => {
                let player = match Self::parse_player(args.first()) {
                    Ok(p) => p,
                    Err(e) => return (false, e),
                };
                // The side asking is the side maximizing.
                let mut searcher = Searcher::new(player, self.depth);
                let result = searcher.search(&self.board, player);
                debug!("genmove {player}: {result:?}");
                match result.best_move {
                    Some((row, col)) => {
                        self.board.apply_move(row, col, player);
                        (true, str_coord((row, col)))
                    }
                    None => (true, "pass".to_string()),
                }
            }

            "valid_moves" => match Self::parse_player(args.first()) {
                Ok(player) => {
                    let moves: Vec<Point> = self.board.valid_moves(player).collect();
                    (true, Self::format_moves(&moves))
                }
                Err(e) => (false, e),
            },

            "showboard" => (true, format!("\n{}", self.board)),

            "score" => (
                true,
                format!(
                    "White {} Black {}",
                    self.board.count(Player::White),
                    self.board.count(Player::Black)
                ),
            ),

            "final_score" => {
                let white = self.board.count(Player::White);
                let black = self.board.count(Player::Black);
                let response = if black > white {
                    format!("B+{}", black - white)
                } else if white > black {
                    format!("W+{}", white - black)
                } else {
                    "0".to_string()
                };
                (true, response)
            }

            _ => (false, format!("unknown command: {command}")),
        }
    }
}
