//! Constants for board geometry and engine parameters.
//!
//! The grid is fixed at 8x8. Search depth and the console "thinking" delay
//! have defaults here and can be overridden from the command line.

// =============================================================================
// Board Geometry
// =============================================================================

/// Number of rows on the board.
pub const ROWS: usize = 8;

/// Number of columns on the board.
pub const COLS: usize = 8;

/// Total number of cells.
pub const CELLS: usize = ROWS * COLS;

/// Disks on the board in the starting position.
pub const INITIAL_DISKS: u32 = 4;

// =============================================================================
// Search Parameters
// =============================================================================

/// Default search depth in plies for the computer opponent.
pub const DEFAULT_DEPTH: u32 = 4;

/// Upper bound accepted for a configured depth. A full game is at most 60 plies
/// plus passes, so anything deeper only burns time.
pub const MAX_DEPTH: u32 = 64;

// =============================================================================
// Driver Parameters
// =============================================================================

/// Default pause before a computer move in the interactive console, in milliseconds.
pub const THINK_DELAY_MS: u64 = 500;

// =============================================================================
// Direction Offsets
// =============================================================================

/// The eight compass directions as (row delta, column delta).
/// Order: North, South, West, East, NW, NE, SW, SE
pub const DIRECTIONS: [(isize, isize); 8] = [
    (-1, 0),  // North (up one row)
    (1, 0),   // South (down one row)
    (0, -1),  // West (left one column)
    (0, 1),   // East (right one column)
    (-1, -1), // NW (diagonal)
    (-1, 1),  // NE (diagonal)
    (1, -1),  // SW (diagonal)
    (1, 1),   // SE (diagonal)
];

// =============================================================================
// Diagram Characters
// =============================================================================

/// Player A (White) disk in board diagrams.
pub const DISK_WHITE: char = 'O';

/// Player B (Black) disk in board diagrams.
pub const DISK_BLACK: char = 'X';

/// Empty cell in board diagrams.
pub const EMPTY: char = '.';
