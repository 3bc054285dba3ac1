//! Othello board representation and the rules of play.
//!
//! The board is a plain 8x8 array of `Option<Player>`. It is `Copy`, so the
//! search can take a private snapshot of any position by value and mutate it
//! without touching the live game.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::constants::{COLS, DIRECTIONS, DISK_BLACK, DISK_WHITE, EMPTY, ROWS};

/// One of the two sides.
///
/// `White` is player 1 and moves first. `Black` is player 2 and is the side
/// the computer plays in single-player games.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    White,
    Black,
}

impl Player {
    /// The other side.
    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::White => Player::Black,
            Player::Black => Player::White,
        }
    }

    /// Conventional player number (1 for White, 2 for Black).
    pub fn number(self) -> u8 {
        match self {
            Player::White => 1,
            Player::Black => 2,
        }
    }

    /// Character used for this player's disks in diagrams.
    pub fn disk(self) -> char {
        match self {
            Player::White => DISK_WHITE,
            Player::Black => DISK_BLACK,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::White => write!(f, "White"),
            Player::Black => write!(f, "Black"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown player {0:?}, expected white/black, w/b or 1/2")]
pub struct ParsePlayerError(String);

impl FromStr for Player {
    type Err = ParsePlayerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "white" | "w" | "o" | "1" => Ok(Player::White),
            "black" | "b" | "x" | "2" => Ok(Player::Black),
            _ => Err(ParsePlayerError(s.to_string())),
        }
    }
}

/// A cell on the board as (row, column), both 0-based.
pub type Point = (usize, usize);

/// Errors from [`Board::from_rows`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardParseError {
    #[error("expected 8 rows, found {0}")]
    RowCount(usize),
    #[error("row {row} has {found} cells, expected 8")]
    RowLength { row: usize, found: usize },
    #[error("unknown cell {ch:?} at row {row}, column {col}")]
    UnknownCell { row: usize, col: usize, ch: char },
}

#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Option<Player>; COLS]; ROWS],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// The standard starting position: White on d4 and e5, Black on e4 and d5.
    pub fn new() -> Self {
        let mut board = Self::empty();
        board.cells[3][3] = Some(Player::White);
        board.cells[3][4] = Some(Player::Black);
        board.cells[4][3] = Some(Player::Black);
        board.cells[4][4] = Some(Player::White);
        board
    }

    /// A board with no disks at all.
    pub fn empty() -> Self {
        Self {
            cells: [[None; COLS]; ROWS],
        }
    }

    /// Build a board from a diagram, one string per row.
    ///
    /// `.` or `-` is empty, `O`/`W` is White and `X`/`B` is Black (either case).
    /// Whitespace inside a row is ignored so diagrams can be spaced out.
    pub fn from_rows(rows: &[&str]) -> Result<Self, BoardParseError> {
        if rows.len() != ROWS {
            return Err(BoardParseError::RowCount(rows.len()));
        }
        let mut board = Self::empty();
        for (row, line) in rows.iter().enumerate() {
            let chars: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            if chars.len() != COLS {
                return Err(BoardParseError::RowLength {
                    row,
                    found: chars.len(),
                });
            }
            for (col, ch) in chars.into_iter().enumerate() {
                board.cells[row][col] = match ch.to_ascii_uppercase() {
                    '.' | '-' => None,
                    'O' | 'W' => Some(Player::White),
                    'X' | 'B' => Some(Player::Black),
                    _ => return Err(BoardParseError::UnknownCell { row, col, ch }),
                };
            }
        }
        Ok(board)
    }

    #[inline]
    fn on_board(row: isize, col: isize) -> bool {
        row >= 0 && row < ROWS as isize && col >= 0 && col < COLS as isize
    }

    /// Contents of a cell. Off-board coordinates read as empty.
    pub fn get(&self, row: usize, col: usize) -> Option<Player> {
        if row >= ROWS || col >= COLS {
            return None;
        }
        self.cells[row][col]
    }

    /// Overwrite a cell, bypassing the rules. Intended for setting up positions.
    ///
    /// Panics if the coordinates are off the board.
    pub fn set(&mut self, row: usize, col: usize, cell: Option<Player>) {
        self.cells[row][col] = cell;
    }

    /// Length of the opponent run that `mover` would capture from (row, col)
    /// in direction (dr, dc). Zero when the run is empty, reaches the edge or
    /// ends on an empty cell.
    fn capture_run(&self, row: usize, col: usize, (dr, dc): (isize, isize), mover: Player) -> usize {
        let opponent = mover.opponent();
        let mut r = row as isize + dr;
        let mut c = col as isize + dc;
        let mut run = 0;
        while Self::on_board(r, c) {
            match self.cells[r as usize][c as usize] {
                Some(p) if p == opponent => run += 1,
                Some(_) => return run,
                None => return 0,
            }
            r += dr;
            c += dc;
        }
        0
    }

    /// Whether `mover` may place a disk at (row, col).
    ///
    /// The cell must be empty and at least one direction must hold one or more
    /// opponent disks closed off by a disk of `mover`. Off-board coordinates
    /// are never legal.
    pub fn is_legal_move(&self, row: usize, col: usize, mover: Player) -> bool {
        if row >= ROWS || col >= COLS || self.cells[row][col].is_some() {
            return false;
        }
        DIRECTIONS
            .iter()
            .any(|&dir| self.capture_run(row, col, dir, mover) > 0)
    }

    /// Place a disk for `mover` at (row, col) and flip every captured line.
    ///
    /// The move is not re-validated: callers check [`is_legal_move`](Self::is_legal_move)
    /// first. On an illegal target the disk is still placed (overwriting
    /// whatever was there) and only directions that form a capturing line flip.
    /// Returns the number of disks flipped.
    ///
    /// Panics if the coordinates are off the board.
    pub fn apply_move(&mut self, row: usize, col: usize, mover: Player) -> usize {
        assert!(
            row < ROWS && col < COLS,
            "move ({row}, {col}) is off the board"
        );

        // All runs are measured before anything is written back.
        let runs = DIRECTIONS.map(|dir| self.capture_run(row, col, dir, mover));

        self.cells[row][col] = Some(mover);
        let mut flipped = 0;
        for (&(dr, dc), &run) in DIRECTIONS.iter().zip(runs.iter()) {
            for step in 1..=run as isize {
                let r = (row as isize + dr * step) as usize;
                let c = (col as isize + dc * step) as usize;
                self.cells[r][c] = Some(mover);
            }
            flipped += run;
        }
        flipped
    }

    /// Legal moves for `player` in row-major order.
    ///
    /// The sequence is computed lazily from the current contents of the board.
    pub fn valid_moves(&self, player: Player) -> impl Iterator<Item = Point> + '_ {
        (0..ROWS)
            .flat_map(|row| (0..COLS).map(move |col| (row, col)))
            .filter(move |&(row, col)| self.is_legal_move(row, col, player))
    }

    pub fn has_valid_move(&self, player: Player) -> bool {
        self.valid_moves(player).next().is_some()
    }

    /// True when neither side has a legal move.
    pub fn is_game_over(&self) -> bool {
        !self.has_valid_move(Player::White) && !self.has_valid_move(Player::Black)
    }

    /// Number of disks owned by `player`.
    pub fn count(&self, player: Player) -> u32 {
        self.cells
            .iter()
            .flatten()
            .filter(|&&cell| cell == Some(player))
            .count() as u32
    }

    pub fn empty_count(&self) -> u32 {
        self.cells.iter().flatten().filter(|cell| cell.is_none()).count() as u32
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, " ")?;
        for col in 0..COLS {
            write!(f, " {}", (b'a' + col as u8) as char)?;
        }
        writeln!(f)?;
        for (row, cells) in self.cells.iter().enumerate() {
            write!(f, "{}", row + 1)?;
            for cell in cells {
                let ch = cell.map_or(EMPTY, Player::disk);
                write!(f, " {ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        fmt::Display::fmt(self, f)
    }
}

/// Parse a coordinate such as `d3` (column letter, 1-based row) into a point.
///
/// Returns `None` for anything that is not on the board.
pub fn parse_coord(s: &str) -> Option<Point> {
    let s = s.trim().to_ascii_lowercase();
    let mut chars = s.chars();
    let letter = chars.next()?;
    if !letter.is_ascii_lowercase() {
        return None;
    }
    let col = (letter as u8 - b'a') as usize;
    let row: usize = chars.as_str().parse().ok()?;
    if col >= COLS || row == 0 || row > ROWS {
        return None;
    }
    Some((row - 1, col))
}

/// Format a point as a coordinate string such as `d3`.
pub fn str_coord((row, col): Point) -> String {
    format!("{}{}", (b'a' + col as u8) as char, row + 1)
}
