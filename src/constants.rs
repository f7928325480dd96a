//! Constants for board dimensions, house rules, and teleport targets.
//!
//! The board is a 52-cell circular track shared by four players. Each
//! player owns a 13-cell quadrant and enters the track at the third cell
//! of that quadrant. None of these values are configurable.

// =============================================================================
// Board Geometry
// =============================================================================

/// Number of cells on the shared circular track.
pub const BOARD_SIZE: usize = 52;

/// Number of players (and colors) in a game.
pub const NUM_PLAYERS: usize = 4;

/// Pieces owned by each player.
pub const PIECES_PER_PLAYER: usize = 4;

/// Length of each player's private home path.
pub const HOME_PATH_SIZE: usize = 5;

/// Cells per player quadrant (52 / 4).
pub const QUADRANT_SIZE: usize = BOARD_SIZE / NUM_PLAYERS;

/// Offset of a player's start cell within its quadrant.
pub const START_OFFSET: usize = 2;

// =============================================================================
// Dice
// =============================================================================

/// Number of faces on the die.
pub const DIE_FACES: u8 = 6;

/// The roll that frees a piece from base and earns another roll.
pub const BASE_EXIT_ROLL: u8 = 6;

// =============================================================================
// Mystery Cell
// =============================================================================

/// A mystery cell spawns whenever the round count is a multiple of this.
pub const MYSTERY_SPAWN_PERIOD: u32 = 4;

/// Rounds a freshly spawned mystery cell stays on the board.
pub const MYSTERY_LIFETIME: u32 = 3;

/// Number of teleport destinations a mystery cell can draw from.
pub const TELEPORT_DESTINATIONS: usize = 6;

/// Bhawana: energizes or sickens the piece.
pub const BHAWANA_CELL: usize = 9;

/// Kotuwa: the piece is held in a briefing.
pub const KOTUWA_CELL: usize = 2;

/// Pita-Kotuwa: flips clockwise pieces, redirects the rest to Kotuwa.
pub const PITA_KOTUWA_CELL: usize = 46;

/// Rounds a piece sits out after a Kotuwa briefing.
pub const BRIEFING_ROUNDS: u32 = 4;

// =============================================================================
// Safety Limits
// =============================================================================

/// Maximum nesting of capture bonus moves and teleport redirects within a
/// single physical move. Exceeding it is treated as a broken invariant.
pub const MAX_CHAIN_DEPTH: usize = 256;
