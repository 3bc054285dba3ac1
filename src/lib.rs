//! othello-rust: Othello (Reversi) with a minimax computer opponent.
//!
//! The rules engine and the search are pure and deterministic; the game
//! driver and front ends sit on top of them.
//!
//! ## Modules
//!
//! - [`constants`] - Board dimensions and engine parameters
//! - [`board`] - Board state, legal moves and captures
//! - [`eval`] - Static evaluation
//! - [`search`] - Minimax with alpha-beta pruning
//! - [`game`] - Turn order, passes, computer replies and score history
//! - [`playout`] - Random games for testing and self-play
//! - [`protocol`] - Text protocol front end
//!
//! ## Example
//!
//! ```
//! use othello_rust::board::{Board, Player};
//! use othello_rust::search::choose_move;
//!
//! let mut board = Board::new();
//! assert!(board.is_legal_move(2, 4, Player::White));
//! board.apply_move(2, 4, Player::White);
//!
//! // Ask the computer (Black) for a reply four plies deep
//! let reply = choose_move(&board, 4, Player::Black);
//! assert!(reply.is_some());
//! ```

pub mod board;
pub mod constants;
pub mod eval;
pub mod game;
pub mod playout;
pub mod protocol;
pub mod search;
