//! Per-color move selection.
//!
//! Each color plays a fixed hand-written policy behind the [`Strategy`]
//! trait. A policy looks at the board and the current roll, picks at most
//! one piece, and hands it to the move resolver. Every priority level falls
//! through when it has no eligible piece; a turn with nothing to move is a
//! legal no-op.
//!
//! | Color  | Policy                |
//! |--------|-----------------------|
//! | Red    | [`Aggressive`]        |
//! | Green  | [`Blockading`]        |
//! | Yellow | [`HomeSeeking`]       |
//! | Blue   | [`Cyclical`]          |

use tracing::debug;

use crate::blockade::{can_form_block, move_into_block, release_avoiding_block};
use crate::board::{Color, circular_distance, start_position};
use crate::constants::{BASE_EXIT_ROLL, PIECES_PER_PLAYER};
use crate::dice::Dice;
use crate::error::RuleViolation;
use crate::event::Event;
use crate::moves::{MoveOutcome, resolve_move};
use crate::state::GameState;

/// A move-selection policy for one color.
pub trait Strategy {
    fn name(&self) -> &'static str;

    /// Play one roll for `color`. Returns `None` if no piece was moved.
    fn take_turn(
        &self,
        state: &mut GameState,
        dice: &mut dyn Dice,
        color: Color,
        roll: u8,
    ) -> Result<Option<MoveOutcome>, RuleViolation>;
}

/// Prefers captures, then freeing base pieces, then any piece.
#[derive(Debug, Clone, Copy, Default)]
pub struct Aggressive;

/// Prefers freeing base pieces, then building blocks, then any piece.
#[derive(Debug, Clone, Copy, Default)]
pub struct Blockading;

/// Frees base pieces first, then captures to unlock the home path, then
/// pushes the piece nearest its own start cell.
#[derive(Debug, Clone, Copy, Default)]
pub struct HomeSeeking;

/// Rotates through piece indices by round number.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cyclical;

/// The policy a color always plays.
pub fn strategy_for(color: Color) -> &'static dyn Strategy {
    match color {
        Color::Red => &Aggressive,
        Color::Green => &Blockading,
        Color::Yellow => &HomeSeeking,
        Color::Blue => &Cyclical,
    }
}

impl Strategy for Aggressive {
    fn name(&self) -> &'static str {
        "aggressive"
    }

    fn take_turn(
        &self,
        state: &mut GameState,
        dice: &mut dyn Dice,
        color: Color,
        roll: u8,
    ) -> Result<Option<MoveOutcome>, RuleViolation> {
        if let Some(&index) = capture_candidates(state, color, roll).first() {
            return commit(state, dice, color, index, roll, "is moving to capture!").map(Some);
        }
        if let Some(outcome) = free_from_base(state, dice, color, roll)? {
            return Ok(Some(outcome));
        }
        match random_movable(state, dice, color)? {
            Some(index) => commit(
                state,
                dice,
                color,
                index,
                roll,
                "moves a piece already on the board",
            )
            .map(Some),
            None => Ok(None),
        }
    }
}

impl Strategy for Blockading {
    fn name(&self) -> &'static str {
        "blockading"
    }

    fn take_turn(
        &self,
        state: &mut GameState,
        dice: &mut dyn Dice,
        color: Color,
        roll: u8,
    ) -> Result<Option<MoveOutcome>, RuleViolation> {
        if roll == BASE_EXIT_ROLL {
            if let Some(index) = state.player(color).first_in_base() {
                if let Some(outcome) = release_avoiding_block(state, dice, color, index)? {
                    return Ok(Some(outcome));
                }
            }
        }

        for index in 0..PIECES_PER_PLAYER {
            let steps = state.piece(color, index)?.effective_steps(roll);
            if can_form_block(state, color, index, steps)? {
                state.record(Event::Decision {
                    color,
                    reason: "moves to build a block",
                });
                return move_into_block(state, dice, color, index, steps).map(Some);
            }
        }

        match random_movable(state, dice, color)? {
            Some(index) => commit(
                state,
                dice,
                color,
                index,
                roll,
                "moves a piece already on the board",
            )
            .map(Some),
            None => Ok(None),
        }
    }
}

impl Strategy for HomeSeeking {
    fn name(&self) -> &'static str {
        "home-seeking"
    }

    fn take_turn(
        &self,
        state: &mut GameState,
        dice: &mut dyn Dice,
        color: Color,
        roll: u8,
    ) -> Result<Option<MoveOutcome>, RuleViolation> {
        if let Some(outcome) = free_from_base(state, dice, color, roll)? {
            return Ok(Some(outcome));
        }

        // Pieces without a capture yet cannot enter the home path, so they
        // get first pick of capture moves.
        let candidates = capture_candidates(state, color, roll);
        let player = state.player(color);
        let capturer = candidates
            .iter()
            .copied()
            .find(|&i| player.pieces[i].captures == 0)
            .or_else(|| candidates.first().copied());
        if let Some(index) = capturer {
            return commit(
                state,
                dice,
                color,
                index,
                roll,
                "is moving to capture to enter the home path!",
            )
            .map(Some);
        }

        let start = start_position(color);
        let closest = player
            .movable_pieces()
            .into_iter()
            .filter_map(|i| {
                player.pieces[i]
                    .track_position()
                    .map(|cell| (circular_distance(cell, start), i))
            })
            .min();
        match closest {
            Some((_, index)) => {
                commit(state, dice, color, index, roll, "moves the piece closest to home").map(Some)
            }
            None => Ok(None),
        }
    }
}

impl Strategy for Cyclical {
    fn name(&self) -> &'static str {
        "cyclical"
    }

    fn take_turn(
        &self,
        state: &mut GameState,
        dice: &mut dyn Dice,
        color: Color,
        roll: u8,
    ) -> Result<Option<MoveOutcome>, RuleViolation> {
        let index = (state.round_count.saturating_sub(1) as usize) % PIECES_PER_PLAYER;
        if state.piece(color, index)?.is_movable() {
            return commit(state, dice, color, index, roll, "moves in a cyclic manner").map(Some);
        }
        if let Some(outcome) = free_from_base(state, dice, color, roll)? {
            return Ok(Some(outcome));
        }
        match random_movable(state, dice, color)? {
            Some(index) => commit(
                state,
                dice,
                color,
                index,
                roll,
                "moves a piece randomly",
            )
            .map(Some),
            None => Ok(None),
        }
    }
}

/// Movable pieces of `color` whose travel distance this roll equals the
/// circular distance to some opponent track piece.
pub fn capture_candidates(state: &GameState, color: Color, roll: u8) -> Vec<usize> {
    let player = state.player(color);
    let opponents: Vec<usize> = state
        .players
        .iter()
        .filter(|p| p.color != color)
        .flat_map(|p| p.pieces.iter().filter_map(|piece| piece.track_position()))
        .collect();

    player
        .movable_pieces()
        .into_iter()
        .filter(|&i| {
            let piece = &player.pieces[i];
            let steps = piece.effective_steps(roll);
            piece.track_position().is_some_and(|cell| {
                opponents
                    .iter()
                    .any(|&other| circular_distance(cell, other) == steps)
            })
        })
        .collect()
}

/// On a six, release the first base piece.
fn free_from_base(
    state: &mut GameState,
    dice: &mut dyn Dice,
    color: Color,
    roll: u8,
) -> Result<Option<MoveOutcome>, RuleViolation> {
    if roll != BASE_EXIT_ROLL {
        return Ok(None);
    }
    let Some(index) = state.player(color).first_in_base() else {
        return Ok(None);
    };
    state.record(Event::Decision {
        color,
        reason: "moves a piece from base to X",
    });
    resolve_move(state, dice, color, index, roll as usize).map(Some)
}

/// Pick a movable piece uniformly at random.
fn random_movable(
    state: &GameState,
    dice: &mut dyn Dice,
    color: Color,
) -> Result<Option<usize>, RuleViolation> {
    let movable = state.player(color).movable_pieces();
    if movable.is_empty() {
        return Ok(None);
    }
    let drawn = dice.draw(movable.len())?;
    movable
        .get(drawn)
        .copied()
        .map(Some)
        .ok_or(RuleViolation::DrawOutOfRange {
            value: drawn,
            bound: movable.len(),
        })
}

/// Move a track piece by the roll, adjusted for its condition.
fn commit(
    state: &mut GameState,
    dice: &mut dyn Dice,
    color: Color,
    index: usize,
    roll: u8,
    reason: &'static str,
) -> Result<MoveOutcome, RuleViolation> {
    let steps = state.piece(color, index)?.effective_steps(roll);
    state.record(Event::Decision { color, reason });
    debug!(%color, piece = index + 1, roll, steps, reason, "policy decision");
    resolve_move(state, dice, color, index, steps)
}
