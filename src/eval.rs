//! Static board evaluation.
//!
//! Scores are always reported from the point of view of a given player, so
//! the search can be pointed at either side. The reference evaluator is a
//! plain disk-count difference; [`Positional`] is an opt-in alternative that
//! plays noticeably stronger and is never selected by default.

use crate::board::{Board, Player};
use crate::constants::{COLS, ROWS};

/// Scores a position for the search.
pub trait Evaluator {
    /// Score `board` from `perspective`'s point of view. Higher is better for
    /// `perspective`, and the score must not depend on whose turn it is.
    fn evaluate(&self, board: &Board, perspective: Player) -> i32;
}

impl<F> Evaluator for F
where
    F: Fn(&Board, Player) -> i32,
{
    fn evaluate(&self, board: &Board, perspective: Player) -> i32 {
        self(board, perspective)
    }
}

/// Disk count of `perspective` minus disk count of its opponent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DiskDifference;

impl Evaluator for DiskDifference {
    fn evaluate(&self, board: &Board, perspective: Player) -> i32 {
        board.count(perspective) as i32 - board.count(perspective.opponent()) as i32
    }
}

/// Black disks minus White disks.
pub fn evaluate_board(board: &Board) -> i32 {
    DiskDifference.evaluate(board, Player::Black)
}

/// Square weights for [`Positional`]. Corners are worth a lot, the squares
/// next to them give the corner away.
pub const SQUARE_WEIGHTS: [[i32; COLS]; ROWS] = [
    [100, -20, 10, 5, 5, 10, -20, 100],
    [-20, -50, -2, -2, -2, -2, -50, -20],
    [10, -2, 1, 1, 1, 1, -2, 10],
    [5, -2, 1, 0, 0, 1, -2, 5],
    [5, -2, 1, 0, 0, 1, -2, 5],
    [10, -2, 1, 1, 1, 1, -2, 10],
    [-20, -50, -2, -2, -2, -2, -50, -20],
    [100, -20, 10, 5, 5, 10, -20, 100],
];

/// Weighted-square evaluator: sum of [`SQUARE_WEIGHTS`] over own disks minus
/// the sum over opponent disks, plus the disk difference.
#[derive(Clone, Copy, Debug)]
pub struct Positional {
    weights: [[i32; COLS]; ROWS],
}

impl Default for Positional {
    fn default() -> Self {
        Self::new(SQUARE_WEIGHTS)
    }
}

impl Positional {
    pub fn new(weights: [[i32; COLS]; ROWS]) -> Self {
        Self { weights }
    }
}

impl Evaluator for Positional {
    fn evaluate(&self, board: &Board, perspective: Player) -> i32 {
        let mut score = DiskDifference.evaluate(board, perspective);
        for (row, weights) in self.weights.iter().enumerate() {
            for (col, &weight) in weights.iter().enumerate() {
                match board.get(row, col) {
                    Some(p) if p == perspective => score += weight,
                    Some(_) => score -= weight,
                    None => {}
                }
            }
        }
        score
    }
}
