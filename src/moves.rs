//! Move resolution and captures.
//!
//! [`resolve_move`] applies a number of steps to one piece:
//! - a base piece leaves base only on a six
//! - a track piece advances around the track in its own direction
//! - a piece that has captured at least once and lands exactly on its own
//!   start cell turns into its home path instead
//!
//! After a plain track move, captures are resolved first and the mystery
//! cell second. Every capture earns the mover a bonus roll, which is played
//! immediately with the same piece, so one move can set off a chain of
//! further moves. The chain depth is capped by [`MAX_CHAIN_DEPTH`].

use tracing::debug;

use crate::board::{Color, advance, start_position};
use crate::constants::{BASE_EXIT_ROLL, HOME_PATH_SIZE, MAX_CHAIN_DEPTH};
use crate::dice::Dice;
use crate::error::RuleViolation;
use crate::event::Event;
use crate::mystery::handle_landing;
use crate::state::{GameState, Location};

/// What a single call to [`resolve_move`] did to the targeted piece.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Nothing happened: wrong roll for a base piece, an immovable piece,
    /// or a rejected block move.
    Stayed,
    /// Left base onto the start cell.
    Released,
    /// Advanced along the track to `to` (before any bonus moves or teleports).
    Advanced { to: usize },
    /// Joined or formed a block at `cell`.
    JoinedBlock { cell: usize },
    EnteredHomePath { slot: usize },
    ReachedHome,
    /// Would have gone past the end of the home path; the piece stays put.
    Overshoot,
}

impl MoveOutcome {
    pub fn moved(self) -> bool {
        !matches!(self, MoveOutcome::Stayed | MoveOutcome::Overshoot)
    }
}

/// Apply `steps` to piece `index` of `color`.
pub fn resolve_move(
    state: &mut GameState,
    dice: &mut dyn Dice,
    color: Color,
    index: usize,
    steps: usize,
) -> Result<MoveOutcome, RuleViolation> {
    resolve_nested(state, dice, color, index, steps, 0)
}

pub(crate) fn resolve_nested(
    state: &mut GameState,
    dice: &mut dyn Dice,
    color: Color,
    index: usize,
    steps: usize,
    depth: usize,
) -> Result<MoveOutcome, RuleViolation> {
    if depth > MAX_CHAIN_DEPTH {
        return Err(RuleViolation::ChainTooDeep {
            limit: MAX_CHAIN_DEPTH,
        });
    }

    let piece = state.piece(color, index)?;
    let id = piece.id;
    let (direction, captures, briefing) =
        (piece.direction, piece.captures, piece.briefing_rounds_left);

    let location = piece.location;

    let from = match location {
        Location::InBase => {
            if steps != BASE_EXIT_ROLL as usize {
                return Ok(MoveOutcome::Stayed);
            }
            state.player_mut(color).release(index);
            state.record(Event::Released { color, piece: id });
            debug!(%color, piece = id, "released from base");
            state.verify()?;
            return Ok(MoveOutcome::Released);
        }
        Location::OnTrack(cell) if briefing == 0 && steps > 0 => cell,
        _ => return Ok(MoveOutcome::Stayed),
    };

    let to = advance(from, steps, direction);

    if to == start_position(color) && captures > 0 {
        let slot = steps - 1;
        if slot > HOME_PATH_SIZE {
            state.record(Event::Overshoot { color, piece: id });
            debug!(%color, piece = id, slot, "home path overshoot");
            return Ok(MoveOutcome::Overshoot);
        }
        state.player_mut(color).enter_home_path(index, slot);
        state.record(Event::EnteredHomePath {
            color,
            piece: id,
            slot,
        });
        let outcome = if slot == HOME_PATH_SIZE {
            state.record(Event::ReachedHome { color, piece: id });
            debug!(%color, piece = id, "reached home");
            MoveOutcome::ReachedHome
        } else {
            MoveOutcome::EnteredHomePath { slot }
        };
        state.verify()?;
        return Ok(outcome);
    }

    state.piece_mut(color, index)?.location = Location::OnTrack(to);
    state.record(Event::Moved {
        color,
        piece: id,
        from,
        to,
        steps,
        direction,
    });
    debug!(%color, piece = id, from, to, steps, "advanced");
    state.verify()?;

    capture_nested(state, dice, color, index, depth)?;
    handle_landing(state, dice, color, index, depth)?;

    Ok(MoveOutcome::Advanced { to })
}

/// Capture every opponent piece sharing the mover's track cell.
///
/// Each capture sends the victim to base, credits the mover, and plays one
/// bonus roll with the mover straight away. Returns the number of captures
/// made at this level (bonus moves may capture more on their own).
pub fn check_captures(
    state: &mut GameState,
    dice: &mut dyn Dice,
    color: Color,
    index: usize,
) -> Result<usize, RuleViolation> {
    capture_nested(state, dice, color, index, 0)
}

fn capture_nested(
    state: &mut GameState,
    dice: &mut dyn Dice,
    color: Color,
    index: usize,
    depth: usize,
) -> Result<usize, RuleViolation> {
    let mut captured = 0;
    for victim in Color::ALL.into_iter().filter(|&c| c != color) {
        for victim_index in 0..state.player(victim).pieces.len() {
            // The mover may have been carried elsewhere by an earlier bonus move.
            let Some(cell) = state.piece(color, index)?.track_position() else {
                return Ok(captured);
            };
            if state.piece(victim, victim_index)?.track_position() != Some(cell) {
                continue;
            }

            state.player_mut(victim).send_to_base(victim_index);
            let mover = state.piece_mut(color, index)?;
            mover.captures += 1;
            let mover_id = mover.id;
            let victim_id = state.piece(victim, victim_index)?.id;
            state.record(Event::Captured {
                color,
                piece: mover_id,
                victim,
                victim_piece: victim_id,
            });
            debug!(%color, piece = mover_id, %victim, victim_piece = victim_id, cell, "capture");
            state.verify()?;
            captured += 1;

            let bonus = dice.roll()?;
            state.record(Event::BonusRoll { color, roll: bonus });
            resolve_nested(state, dice, color, index, bonus as usize, depth + 1)?;
        }
    }
    Ok(captured)
}
