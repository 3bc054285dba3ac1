//! Game driver: turn order, passes, the computer opponent and score keeping.
//!
//! A [`Game`] owns the live board. Human moves come in through
//! [`Game::play`]; when it becomes the computer's turn the driver searches
//! and replies on its own, so outside a finished game it is always a human's
//! turn when `play` returns.

use std::fmt;
use std::str::FromStr;

use log::{debug, info};
use thiserror::Error;

use crate::board::{str_coord, Board, Player, Point};
use crate::constants::{COLS, DEFAULT_DEPTH, ROWS};
use crate::search::Searcher;

/// The side that moves first.
pub const FIRST_PLAYER: Player = Player::White;

/// The side the computer plays in [`GameMode::Single`].
pub const COMPUTER_PLAYER: Player = Player::Black;

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum GameMode {
    /// One human (White) against the computer (Black).
    Single,
    /// Two humans sharing the board.
    Multiplayer,
}

impl GameMode {
    /// Whether `player`'s moves are chosen by the computer in this mode.
    pub fn is_computer(self, player: Player) -> bool {
        self == GameMode::Single && player == COMPUTER_PLAYER
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameMode::Single => write!(f, "single"),
            GameMode::Multiplayer => write!(f, "multiplayer"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown game mode {0:?}, expected single or multiplayer")]
pub struct ParseModeError(String);

impl FromStr for GameMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "single" => Ok(GameMode::Single),
            "multiplayer" => Ok(GameMode::Multiplayer),
            _ => Err(ParseModeError(s.to_string())),
        }
    }
}

/// Rejected move attempts. The game state is unchanged after any of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("({row}, {col}) is off the board")]
    OutOfBounds { row: usize, col: usize },
    #[error("({row}, {col}) is not a legal move for {player}")]
    IllegalMove { row: usize, col: usize, player: Player },
    #[error("the game is over")]
    GameOver,
}

/// Disk counts after a successful move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScoreRow {
    /// 1 for the first recorded move, then one more per row.
    pub turn: u32,
    pub white: u32,
    pub black: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Win(Player),
    Draw,
}

/// Final disk counts and the result they imply.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FinalScore {
    pub white: u32,
    pub black: u32,
    pub outcome: Outcome,
}

impl FinalScore {
    pub fn from_board(board: &Board) -> Self {
        let white = board.count(Player::White);
        let black = board.count(Player::Black);
        let outcome = if white > black {
            Outcome::Win(Player::White)
        } else if black > white {
            Outcome::Win(Player::Black)
        } else {
            Outcome::Draw
        };
        Self {
            white,
            black,
            outcome,
        }
    }
}

impl fmt::Display for FinalScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.outcome {
            Outcome::Draw => write!(f, "Game Over! It's a draw!")?,
            Outcome::Win(p) => write!(f, "Game Over! Player {} ({p}) wins!", p.number())?,
        }
        write!(f, " (White: {}, Black: {})", self.white, self.black)
    }
}

pub struct Game {
    board: Board,
    current: Player,
    mode: GameMode,
    searcher: Searcher,
    history: Vec<ScoreRow>,
    result: Option<FinalScore>,
}

impl Game {
    /// A new game from the standard position, White to move, with the
    /// computer searching [`DEFAULT_DEPTH`] plies.
    pub fn start(mode: GameMode) -> Self {
        Self::new(mode, DEFAULT_DEPTH)
    }

    /// A new game from the standard position with the computer searching
    /// `depth` plies.
    pub fn new(mode: GameMode, depth: u32) -> Self {
        Self::from_position(Board::new(), FIRST_PLAYER, mode, depth)
    }

    /// A game from an arbitrary position.
    ///
    /// If `to_move` cannot move the turn passes, and if neither side can move
    /// the game is already over. When the computer ends up to move it replies
    /// straight away. The computer always looks at least one ply ahead, so a
    /// `depth` of zero searches one ply.
    pub fn from_position(board: Board, to_move: Player, mode: GameMode, depth: u32) -> Self {
        let mut game = Self {
            board,
            current: to_move,
            mode,
            searcher: Searcher::new(COMPUTER_PLAYER, depth.max(1)),
            history: Vec::new(),
            result: None,
        };
        if !game.board.has_valid_move(game.current) {
            // Turn advance flips first, so start from the other side.
            game.current = game.current.opponent();
            game.advance_turn();
        }
        game.run_computer();
        game
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn depth(&self) -> u32 {
        self.searcher.depth()
    }

    /// The player to move, or `None` once the game is over.
    pub fn current_player(&self) -> Option<Player> {
        if self.result.is_some() {
            None
        } else {
            Some(self.current)
        }
    }

    pub fn is_over(&self) -> bool {
        self.result.is_some()
    }

    /// Final counts and outcome, available once the game is over.
    pub fn final_score(&self) -> Option<FinalScore> {
        self.result
    }

    /// One row per successful move, oldest first.
    pub fn score_history(&self) -> &[ScoreRow] {
        &self.history
    }

    /// Legal moves for the player to move. Empty once the game is over.
    pub fn valid_moves(&self) -> Vec<Point> {
        match self.current_player() {
            Some(player) => self.board.valid_moves(player).collect(),
            None => Vec::new(),
        }
    }

    /// Play a human move for the player to move.
    ///
    /// On success the turn advances, and in single-player mode the computer
    /// answers as many times as the rules give it the move. Returns the
    /// computer's replies in order.
    pub fn play(&mut self, row: usize, col: usize) -> Result<Vec<Point>, GameError> {
        let player = self.current_player().ok_or(GameError::GameOver)?;
        if row >= ROWS || col >= COLS {
            return Err(GameError::OutOfBounds { row, col });
        }
        if !self.board.is_legal_move(row, col, player) {
            return Err(GameError::IllegalMove { row, col, player });
        }
        self.commit(row, col);
        Ok(self.run_computer())
    }

    fn commit(&mut self, row: usize, col: usize) {
        let flipped = self.board.apply_move(row, col, self.current);
        debug!(
            "{} plays {} flipping {flipped}",
            self.current,
            str_coord((row, col))
        );
        self.record_score();
        self.advance_turn();
    }

    fn record_score(&mut self) {
        let turn = self.history.len() as u32 + 1;
        self.history.push(ScoreRow {
            turn,
            white: self.board.count(Player::White),
            black: self.board.count(Player::Black),
        });
    }

    /// Hand the move to the other side, skipping it if it has no legal move.
    /// When neither side can move the game ends.
    fn advance_turn(&mut self) {
        self.current = self.current.opponent();
        if self.board.has_valid_move(self.current) {
            return;
        }
        debug!("{} has no legal move and passes", self.current);
        self.current = self.current.opponent();
        if !self.board.has_valid_move(self.current) {
            self.end_game();
        }
    }

    fn end_game(&mut self) {
        let score = FinalScore::from_board(&self.board);
        info!("{score}");
        self.result = Some(score);
    }

    fn run_computer(&mut self) -> Vec<Point> {
        let mut replies = Vec::new();
        while !self.is_over() && self.mode.is_computer(self.current) {
            // A pass is only legal when there is nothing to play.
            let choice = self
                .searcher
                .choose_move(&self.board, self.current)
                .or_else(|| self.board.valid_moves(self.current).next());
            match choice {
                Some((row, col)) => {
                    self.commit(row, col);
                    replies.push((row, col));
                }
                None => self.advance_turn(),
            }
        }
        replies
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::choose_move;

    /// Black can never move here; White has two captures.
    fn stuck_black() -> Board {
        Board::from_rows(&[
            "O X . . . . . .",
            ". . . . . . . .",
            "O X . . . . . .",
            ". . . . . . . .",
            ". . . . . . . .",
            ". . . . . . . .",
            ". . . . . . . .",
            ". . . . . . . .",
        ])
        .unwrap()
    }

    #[test]
    fn test_start() {
        let game = Game::start(GameMode::Multiplayer);
        assert_eq!(game.current_player(), Some(Player::White));
        assert_eq!(game.board(), &Board::new());
        assert!(game.score_history().is_empty());
        assert_eq!(game.valid_moves(), vec![(2, 4), (3, 5), (4, 2), (5, 3)]);
        assert_eq!(game.depth(), DEFAULT_DEPTH);
    }

    #[test]
    fn test_illegal_move_changes_nothing() {
        let mut game = Game::start(GameMode::Multiplayer);
        assert_eq!(
            game.play(0, 0),
            Err(GameError::IllegalMove {
                row: 0,
                col: 0,
                player: Player::White
            })
        );
        assert_eq!(game.play(9, 0), Err(GameError::OutOfBounds { row: 9, col: 0 }));
        assert_eq!(game.board(), &Board::new());
        assert_eq!(game.current_player(), Some(Player::White));
        assert!(game.score_history().is_empty());
    }

    #[test]
    fn test_multiplayer_alternates_and_records() {
        let mut game = Game::start(GameMode::Multiplayer);
        assert_eq!(game.play(2, 4), Ok(vec![]));
        assert_eq!(game.current_player(), Some(Player::Black));
        assert_eq!(game.play(2, 3), Ok(vec![]));
        assert_eq!(game.current_player(), Some(Player::White));
        assert_eq!(
            game.score_history(),
            &[
                ScoreRow {
                    turn: 1,
                    white: 4,
                    black: 1
                },
                ScoreRow {
                    turn: 2,
                    white: 3,
                    black: 3
                },
            ]
        );
    }

    #[test]
    fn test_single_player_computer_replies() {
        let mut game = Game::new(GameMode::Single, 2);
        let mut expected = Board::new();
        expected.apply_move(2, 4, Player::White);
        let reply = choose_move(&expected, 2, Player::Black).unwrap();
        expected.apply_move(reply.0, reply.1, Player::Black);

        let replies = game.play(2, 4).unwrap();
        assert_eq!(replies, vec![reply]);
        assert_eq!(game.board(), &expected);
        assert_eq!(game.current_player(), Some(Player::White));
        assert_eq!(game.score_history().len(), 2);
    }

    #[test]
    fn test_pass_skips_stuck_side() {
        let mut game = Game::from_position(stuck_black(), Player::White, GameMode::Multiplayer, 1);
        assert_eq!(game.valid_moves(), vec![(0, 2), (2, 2)]);
        game.play(0, 2).unwrap();
        assert!(!game.board().has_valid_move(Player::Black));
        assert_eq!(game.current_player(), Some(Player::White));
        assert!(!game.is_over());
    }

    #[test]
    fn test_double_pass_ends_game() {
        let mut game = Game::from_position(stuck_black(), Player::White, GameMode::Multiplayer, 1);
        game.play(0, 2).unwrap();
        game.play(2, 2).unwrap();
        assert!(game.is_over());
        assert_eq!(game.current_player(), None);
        assert_eq!(game.valid_moves(), Vec::<Point>::new());
        assert_eq!(
            game.final_score(),
            Some(FinalScore {
                white: 6,
                black: 0,
                outcome: Outcome::Win(Player::White)
            })
        );
        assert_eq!(game.play(3, 3), Err(GameError::GameOver));
    }

    #[test]
    fn test_from_position_with_stuck_mover_passes() {
        let game = Game::from_position(stuck_black(), Player::Black, GameMode::Multiplayer, 1);
        assert_eq!(game.current_player(), Some(Player::White));
    }

    #[test]
    fn test_from_finished_position() {
        let mut board = Board::empty();
        board.set(0, 0, Some(Player::White));
        board.set(7, 7, Some(Player::Black));
        let game = Game::from_position(board, Player::White, GameMode::Single, 1);
        assert!(game.is_over());
        assert_eq!(game.final_score().unwrap().outcome, Outcome::Draw);
    }

    #[test]
    fn test_computer_to_move_plays_immediately() {
        let game = Game::from_position(Board::new(), Player::Black, GameMode::Single, 1);
        assert_eq!(game.score_history().len(), 1);
        assert_eq!(game.board().get(2, 3), Some(Player::Black));
        assert_eq!(game.current_player(), Some(Player::White));
    }

    #[test]
    fn test_zero_depth_still_replies() {
        let mut game = Game::new(GameMode::Single, 0);
        assert_eq!(game.depth(), 1);
        let replies = game.play(2, 4).unwrap();
        assert_eq!(replies.len(), 1);
        let (row, col) = replies[0];
        assert_eq!(game.board().get(row, col), Some(Player::Black));
        assert_eq!(game.score_history().len(), 2);
        assert_eq!(game.current_player(), Some(Player::White));
    }

    #[test]
    fn test_zero_depth_computer_plays_out_stuck_human() {
        let mut rows = [". . . . . . . ."; 8];
        rows[0] = "X O . . . . . .";
        let board = Board::from_rows(&rows).unwrap();
        assert!(!board.has_valid_move(Player::White));

        let game = Game::from_position(board, Player::Black, GameMode::Single, 0);
        assert!(game.is_over());
        assert_eq!(game.board().get(0, 2), Some(Player::Black));
        let score = game.final_score().unwrap();
        assert_eq!((score.white, score.black), (0, 3));
        assert_eq!(score.outcome, Outcome::Win(Player::Black));
    }

    #[test]
    fn test_final_score_display() {
        let draw = FinalScore {
            white: 32,
            black: 32,
            outcome: Outcome::Draw,
        };
        assert_eq!(
            draw.to_string(),
            "Game Over! It's a draw! (White: 32, Black: 32)"
        );
        let black = FinalScore::from_board(&Board::from_rows(&["XXXXXXXX"; 8]).unwrap());
        assert_eq!(
            black.to_string(),
            "Game Over! Player 2 (Black) wins! (White: 0, Black: 64)"
        );
    }

    #[test]
    fn test_mode_parse() {
        assert_eq!("single".parse::<GameMode>(), Ok(GameMode::Single));
        assert_eq!("Multiplayer".parse::<GameMode>(), Ok(GameMode::Multiplayer));
        assert!("online".parse::<GameMode>().is_err());
        assert!(GameMode::Single.is_computer(Player::Black));
        assert!(!GameMode::Single.is_computer(Player::White));
        assert!(!GameMode::Multiplayer.is_computer(Player::Black));
    }
}
