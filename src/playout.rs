//! Random playouts.
//!
//! Plays uniformly random legal moves. Used to reach arbitrary positions for
//! testing and as a weak sparring partner for self-play. The search never
//! calls into this module.

use crate::board::{Board, Player, Point};
use crate::game::{FinalScore, FIRST_PLAYER, Game, GameError, GameMode};

/// Pick a random legal move for `player`, or `None` if it has to pass.
pub fn random_move(board: &Board, player: Player, rng: &mut fastrand::Rng) -> Option<Point> {
    let moves: Vec<Point> = board.valid_moves(player).collect();
    if moves.is_empty() {
        return None;
    }
    Some(moves[rng.usize(..moves.len())])
}

/// Play random moves on `board` starting with `to_move` until neither side
/// can move or `max_moves` moves have been played.
///
/// Returns the side to move afterwards and the number of moves played.
pub fn playout(
    board: &mut Board,
    mut to_move: Player,
    max_moves: usize,
    rng: &mut fastrand::Rng,
) -> (Player, usize) {
    let mut played = 0;
    let mut passes = 0;

    while passes < 2 && played < max_moves {
        match random_move(board, to_move, rng) {
            Some((row, col)) => {
                board.apply_move(row, col, to_move);
                played += 1;
                passes = 0;
            }
            None => passes += 1,
        }
        to_move = to_move.opponent();
    }

    // Leave the turn with a side that can move, when there is one.
    if !board.has_valid_move(to_move) && board.has_valid_move(to_move.opponent()) {
        to_move = to_move.opponent();
    }
    (to_move, played)
}

/// A position reached by `moves` random moves from the start, with the side to move.
pub fn random_position(moves: usize, rng: &mut fastrand::Rng) -> (Board, Player) {
    let mut board = Board::new();
    let (to_move, _) = playout(&mut board, FIRST_PLAYER, moves, rng);
    (board, to_move)
}

/// Play a full single-player game in which White picks random moves and the
/// computer searches `depth` plies.
pub fn play_against_random(depth: u32, rng: &mut fastrand::Rng) -> Result<FinalScore, GameError> {
    let mut game = Game::new(GameMode::Single, depth);
    while let Some((row, col)) = game
        .current_player()
        .and_then(|player| random_move(game.board(), player, rng))
    {
        game.play(row, col)?;
    }
    Ok(game
        .final_score()
        .unwrap_or_else(|| FinalScore::from_board(game.board())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{CELLS, INITIAL_DISKS};

    #[test]
    fn test_random_move_is_legal() {
        let mut rng = fastrand::Rng::with_seed(7);
        let board = Board::new();
        for _ in 0..20 {
            let (row, col) = random_move(&board, Player::White, &mut rng).unwrap();
            assert!(board.is_legal_move(row, col, Player::White));
        }
    }

    #[test]
    fn test_random_move_none_when_stuck() {
        let mut rng = fastrand::Rng::with_seed(7);
        assert_eq!(random_move(&Board::empty(), Player::Black, &mut rng), None);
    }

    #[test]
    fn test_playout_to_the_end() {
        let mut rng = fastrand::Rng::with_seed(42);
        let mut board = Board::new();
        let (_, played) = playout(&mut board, Player::White, usize::MAX, &mut rng);
        assert!(board.is_game_over());
        assert!(played <= CELLS - INITIAL_DISKS as usize);
        assert_eq!(
            board.count(Player::White) + board.count(Player::Black) + board.empty_count(),
            CELLS as u32
        );
        assert_eq!(board.empty_count(), (CELLS - INITIAL_DISKS as usize - played) as u32);
    }

    #[test]
    fn test_random_position_is_reproducible() {
        let a = random_position(20, &mut fastrand::Rng::with_seed(3));
        let b = random_position(20, &mut fastrand::Rng::with_seed(3));
        assert_eq!(a, b);
        let (board, to_move) = a;
        assert!(board.is_game_over() || board.has_valid_move(to_move));
    }

    #[test]
    fn test_play_against_random_finishes() {
        let mut rng = fastrand::Rng::with_seed(11);
        let score = play_against_random(1, &mut rng).unwrap();
        assert!(score.white + score.black <= CELLS as u32);
    }

    #[test]
    fn test_play_against_random_is_reproducible() {
        for seed in 0..5 {
            let score = play_against_random(2, &mut fastrand::Rng::with_seed(seed)).unwrap();
            let again = play_against_random(2, &mut fastrand::Rng::with_seed(seed)).unwrap();
            assert_eq!(score, again);
            assert!(score.white + score.black > INITIAL_DISKS);
        }
    }
}
