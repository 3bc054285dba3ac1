//! Fixed-depth minimax search with alpha-beta pruning.
//!
//! The maximizing side is a fixed player (the computer), not whoever happens
//! to be asking. A search requested for the other side runs its root as a
//! minimizing node over the same scores. The default configuration mirrors
//! the classic single-player game: Black maximizes the disk difference.
//!
//! Every branch plays its move on its own copy of the board, so the position
//! passed in is never modified.

use log::{debug, trace};

use crate::board::{str_coord, Board, Player, Point};
use crate::constants::DEFAULT_DEPTH;
use crate::eval::{DiskDifference, Evaluator};

/// Outcome of a search from the root.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchResult {
    /// Best move for the side to move, `None` if it has no legal move.
    pub best_move: Option<Point>,
    /// Minimax value of the root from the maximizer's point of view.
    pub score: i32,
    /// Nodes visited, the root included.
    pub nodes: u64,
}

pub struct Searcher<E = DiskDifference> {
    depth: u32,
    maximizer: Player,
    evaluator: E,
    nodes: u64,
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new(Player::Black, DEFAULT_DEPTH)
    }
}

impl Searcher {
    /// A disk-difference searcher in which `maximizer` is the maximizing side.
    pub fn new(maximizer: Player, depth: u32) -> Self {
        Self::with_evaluator(maximizer, depth, DiskDifference)
    }
}

impl<E: Evaluator> Searcher<E> {
    pub fn with_evaluator(maximizer: Player, depth: u32, evaluator: E) -> Self {
        Self {
            depth,
            maximizer,
            evaluator,
            nodes: 0,
        }
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn set_depth(&mut self, depth: u32) {
        self.depth = depth;
    }

    pub fn maximizer(&self) -> Player {
        self.maximizer
    }

    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    /// Nodes visited by the most recent search.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Search `board` with `mover` to play and return the best move.
    pub fn choose_move(&mut self, board: &Board, mover: Player) -> Option<Point> {
        self.search(board, mover).best_move
    }

    /// Search `board` with `mover` to play.
    ///
    /// The root is a maximizing node when `mover` is the maximizer. A root
    /// with no legal move for `mover` reports `best_move: None`; the score is
    /// still the value after the forced pass.
    pub fn search(&mut self, board: &Board, mover: Player) -> SearchResult {
        self.nodes = 0;
        let maximizing = mover == self.maximizer;
        let (score, best_move) = self.alphabeta(board, self.depth, i32::MIN, i32::MAX, maximizing);

        debug!(
            "search depth={} mover={} best={} score={} nodes={}",
            self.depth,
            mover,
            best_move.map_or_else(|| "pass".to_string(), str_coord),
            score,
            self.nodes
        );

        SearchResult {
            best_move,
            score,
            nodes: self.nodes,
        }
    }

    #[inline]
    fn side_to_move(&self, maximizing: bool) -> Player {
        if maximizing {
            self.maximizer
        } else {
            self.maximizer.opponent()
        }
    }

    fn alphabeta(
        &mut self,
        board: &Board,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> (i32, Option<Point>) {
        self.nodes += 1;

        if depth == 0 || board.is_game_over() {
            return (self.evaluator.evaluate(board, self.maximizer), None);
        }

        let player = self.side_to_move(maximizing);
        let moves: Vec<Point> = board.valid_moves(player).collect();

        // A pass still costs a ply.
        if moves.is_empty() {
            trace!("{player} passes at depth {depth}");
            let (score, _) = self.alphabeta(board, depth - 1, alpha, beta, !maximizing);
            return (score, None);
        }

        let mut best_move = None;
        if maximizing {
            let mut best = i32::MIN;
            for (row, col) in moves {
                let mut child = *board;
                child.apply_move(row, col, player);
                let (score, _) = self.alphabeta(&child, depth - 1, alpha, beta, false);
                if score > best {
                    best = score;
                    best_move = Some((row, col));
                }
                alpha = alpha.max(score);
                if beta <= alpha {
                    break;
                }
            }
            (best, best_move)
        } else {
            let mut best = i32::MAX;
            for (row, col) in moves {
                let mut child = *board;
                child.apply_move(row, col, player);
                let (score, _) = self.alphabeta(&child, depth - 1, alpha, beta, true);
                if score < best {
                    best = score;
                    best_move = Some((row, col));
                }
                beta = beta.min(score);
                if beta <= alpha {
                    break;
                }
            }
            (best, best_move)
        }
    }
}

/// Best move for `mover` at `depth` plies with the default configuration
/// (Black maximizes the disk difference).
///
/// Returns `None` when `mover` has no legal move; the caller passes instead.
pub fn choose_move(board: &Board, depth: u32, mover: Player) -> Option<Point> {
    Searcher::new(Player::Black, depth).choose_move(board, mover)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::evaluate_board;

    #[test]
    fn test_depth_one_takes_first_of_equal_moves() {
        // Every opening move flips exactly one disk.
        let board = Board::new();
        assert_eq!(choose_move(&board, 1, Player::Black), Some((2, 3)));

        let mut searcher = Searcher::new(Player::White, 1);
        let result = searcher.search(&board, Player::White);
        assert_eq!(result.best_move, Some((2, 4)));
        assert_eq!(result.score, 3);
    }

    #[test]
    fn test_prefers_larger_capture() {
        let board = Board::from_rows(&[
            "X . . . . . . .",
            "O . . . . . . .",
            ". . . . . . . .",
            ". . . . . . . .",
            ". . . . . . . .",
            "X O O O . . . .",
            ". . . . . . . .",
            ". . . . . . . .",
        ])
        .unwrap();
        let moves: Vec<Point> = board.valid_moves(Player::Black).collect();
        assert_eq!(moves, vec![(2, 0), (5, 4)]);

        let mut searcher = Searcher::new(Player::Black, 1);
        let result = searcher.search(&board, Player::Black);
        assert_eq!(result.best_move, Some((5, 4)));
        assert_eq!(result.score, 5);
    }

    #[test]
    fn test_depth_zero_is_static() {
        let board = Board::new();
        let mut searcher = Searcher::new(Player::Black, 0);
        let result = searcher.search(&board, Player::Black);
        assert_eq!(result.best_move, None);
        assert_eq!(result.score, evaluate_board(&board));
        assert_eq!(result.nodes, 1);
    }

    #[test]
    fn test_no_move_at_root_returns_none() {
        // Black has no disk to anchor a capture; White still can move.
        let board = Board::from_rows(&[
            "O X . . . . . .",
            ". . . . . . . .",
            ". . . . . . . .",
            ". . . . . . . .",
            ". . . . . . . .",
            ". . . . . . . .",
            ". . . . . . . .",
            ". . . . . . . .",
        ])
        .unwrap();
        assert!(!board.has_valid_move(Player::Black));
        assert!(board.has_valid_move(Player::White));
        assert_eq!(choose_move(&board, 4, Player::Black), None);

        // The pass costs a ply: White replies once and the line ends 3-0.
        let mut searcher = Searcher::new(Player::Black, 2);
        let result = searcher.search(&board, Player::Black);
        assert_eq!(result.best_move, None);
        assert_eq!(result.score, -3);
    }

    #[test]
    fn test_finished_game_is_a_leaf() {
        let mut board = Board::empty();
        board.set(0, 0, Some(Player::Black));
        board.set(0, 1, Some(Player::Black));
        board.set(7, 7, Some(Player::White));
        let mut searcher = Searcher::new(Player::Black, 6);
        let result = searcher.search(&board, Player::White);
        assert_eq!(result.best_move, None);
        assert_eq!(result.score, 1);
        assert_eq!(result.nodes, 1);
    }

    #[test]
    fn test_search_leaves_board_untouched() {
        let board = Board::new();
        let before = board;
        let _ = choose_move(&board, 4, Player::Black);
        assert_eq!(board, before);
    }

    #[test]
    fn test_custom_evaluator() {
        // Only corners count: at depth 1 every opening move scores 0, so the
        // first one in row-major order wins the tie.
        let corners = |board: &Board, p: Player| {
            [(0, 0), (0, 7), (7, 0), (7, 7)]
                .iter()
                .filter(|&&(r, c)| board.get(r, c) == Some(p))
                .count() as i32
        };
        let mut searcher = Searcher::with_evaluator(Player::Black, 1, corners);
        let result = searcher.search(&Board::new(), Player::Black);
        assert_eq!(result.best_move, Some((2, 3)));
        assert_eq!(result.score, 0);
    }
}
