//! Blockades: two or more pieces on the same track cell.
//!
//! Pieces of any color count towards a blockade. A blockading player moves
//! pieces onto occupied cells to build one, but never onto a cell that is
//! already blockaded.

use tracing::debug;

use crate::board::{Color, advance, start_position};
use crate::constants::BASE_EXIT_ROLL;
use crate::dice::Dice;
use crate::error::RuleViolation;
use crate::event::Event;
use crate::moves::{MoveOutcome, resolve_move};
use crate::mystery::handle_landing;
use crate::state::{GameState, Location};

/// True if at least two track pieces share `cell`.
pub fn is_blockaded(state: &GameState, cell: usize) -> bool {
    state.pieces_at(cell).nth(1).is_some()
}

/// Cell a movable piece would reach with `steps`.
fn destination(
    state: &GameState,
    color: Color,
    index: usize,
    steps: usize,
) -> Result<Option<usize>, RuleViolation> {
    let piece = state.piece(color, index)?;
    if !piece.is_movable() {
        return Ok(None);
    }
    Ok(piece
        .track_position()
        .map(|cell| advance(cell, steps, piece.direction)))
}

/// A piece with captures that reaches its own start cell turns into the
/// home path rather than staying on the track.
fn enters_home_path(
    state: &GameState,
    color: Color,
    index: usize,
    cell: usize,
) -> Result<bool, RuleViolation> {
    Ok(cell == start_position(color) && state.piece(color, index)?.captures > 0)
}

/// Whether moving this piece would create or reinforce a block: the
/// destination must not be blockaded yet and must already hold another
/// track piece.
pub fn can_form_block(
    state: &GameState,
    color: Color,
    index: usize,
    steps: usize,
) -> Result<bool, RuleViolation> {
    let Some(cell) = destination(state, color, index, steps)? else {
        return Ok(false);
    };
    if is_blockaded(state, cell) || enters_home_path(state, color, index, cell)? {
        return Ok(false);
    }
    Ok(state
        .pieces_at(cell)
        .any(|occupant| occupant != (color, index)))
}

/// Move a piece onto its destination cell to join a block.
///
/// The move is refused if the destination is already blockaded. Block moves
/// skip captures, but a piece due for its home path is resolved as a normal
/// move, and landing on the mystery cell triggers it.
pub fn move_into_block(
    state: &mut GameState,
    dice: &mut dyn Dice,
    color: Color,
    index: usize,
    steps: usize,
) -> Result<MoveOutcome, RuleViolation> {
    let Some(cell) = destination(state, color, index, steps)? else {
        return Ok(MoveOutcome::Stayed);
    };
    if enters_home_path(state, color, index, cell)? {
        return resolve_move(state, dice, color, index, steps);
    }
    let id = state.piece(color, index)?.id;
    if is_blockaded(state, cell) {
        state.record(Event::BlockRejected {
            color,
            piece: id,
            cell,
        });
        return Ok(MoveOutcome::Stayed);
    }
    state.piece_mut(color, index)?.location = Location::OnTrack(cell);
    state.record(Event::BlockFormed {
        color,
        piece: id,
        cell,
    });
    debug!(%color, piece = id, cell, "block move");
    state.verify()?;
    handle_landing(state, dice, color, index, 0)?;
    Ok(MoveOutcome::JoinedBlock { cell })
}

/// Release a piece from base unless that would crowd a blockaded start.
///
/// A blockading player keeps its base piece when its start cell is already
/// blockaded and two or fewer pieces remain in base.
pub fn release_avoiding_block(
    state: &mut GameState,
    dice: &mut dyn Dice,
    color: Color,
    index: usize,
) -> Result<Option<MoveOutcome>, RuleViolation> {
    let start = start_position(color);
    if is_blockaded(state, start) && state.player(color).pieces_in_base <= 2 {
        state.record(Event::KeptInBase { color });
        return Ok(None);
    }
    resolve_move(state, dice, color, index, BASE_EXIT_ROLL as usize).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{BRIEFING_ROUNDS, KOTUWA_CELL};
    use crate::dice::ScriptedDice;
    use crate::mystery::Teleport;
    use crate::state::MysteryCell;
    use crate::strategy::{Blockading, Strategy};

    fn place(state: &mut GameState, color: Color, index: usize, cell: usize) {
        state.player_mut(color).release(index);
        state.piece_mut(color, index).unwrap().location = Location::OnTrack(cell);
    }

    #[test]
    fn test_blockade_needs_two_pieces() {
        let mut state = GameState::new();
        place(&mut state, Color::Red, 0, 30);
        assert!(!is_blockaded(&state, 30));
        place(&mut state, Color::Blue, 2, 30);
        assert!(is_blockaded(&state, 30));
        assert!(!is_blockaded(&state, 31));
    }

    #[test]
    fn test_base_and_home_pieces_do_not_count() {
        let mut state = GameState::new();
        place(&mut state, Color::Green, 0, 2);
        // Red's base pieces and home path pieces never occupy a track cell.
        state.player_mut(Color::Red).release(0);
        state.player_mut(Color::Red).enter_home_path(0, 2);
        assert!(!is_blockaded(&state, 2));
    }

    #[test]
    fn test_can_form_block_requires_an_occupant() {
        let mut state = GameState::new();
        place(&mut state, Color::Green, 0, 20);
        assert!(!can_form_block(&state, Color::Green, 0, 4).unwrap());
        place(&mut state, Color::Yellow, 0, 24);
        assert!(can_form_block(&state, Color::Green, 0, 4).unwrap());
        place(&mut state, Color::Yellow, 1, 24);
        assert!(!can_form_block(&state, Color::Green, 0, 4).unwrap());
    }

    #[test]
    fn test_can_form_block_ignores_base_pieces() {
        let state = GameState::new();
        assert!(!can_form_block(&state, Color::Green, 0, 6).unwrap());
    }

    #[test]
    fn test_move_into_block() {
        let mut state = GameState::new();
        let mut dice = ScriptedDice::default();
        place(&mut state, Color::Green, 0, 20);
        place(&mut state, Color::Green, 1, 23);
        let outcome = move_into_block(&mut state, &mut dice, Color::Green, 0, 3).unwrap();
        assert_eq!(outcome, MoveOutcome::JoinedBlock { cell: 23 });
        assert!(is_blockaded(&state, 23));

        // A third piece cannot join an existing blockade.
        place(&mut state, Color::Red, 0, 21);
        let outcome = move_into_block(&mut state, &mut dice, Color::Red, 0, 2).unwrap();
        assert_eq!(outcome, MoveOutcome::Stayed);
        assert_eq!(state.piece(Color::Red, 0).unwrap().location, Location::OnTrack(21));
    }

    #[test]
    fn test_release_kept_when_start_blockaded() {
        let mut state = GameState::new();
        let mut dice = ScriptedDice::default();
        place(&mut state, Color::Green, 0, 15);
        place(&mut state, Color::Red, 0, 15);
        // Three in base: release goes ahead.
        let outcome = release_avoiding_block(&mut state, &mut dice, Color::Green, 1).unwrap();
        assert_eq!(outcome, Some(MoveOutcome::Released));
        // Two in base and start blockaded: keep it.
        let outcome = release_avoiding_block(&mut state, &mut dice, Color::Green, 2).unwrap();
        assert_eq!(outcome, None);
        assert_eq!(state.player(Color::Green).pieces_in_base, 2);
    }

    #[test]
    fn test_block_move_triggers_mystery_cell() {
        let mut state = GameState::new();
        place(&mut state, Color::Green, 0, 20);
        place(&mut state, Color::Yellow, 0, 24);
        state.mystery_cell = MysteryCell::Active {
            position: 24,
            rounds_left: 2,
        };
        // Destination 4 sends the piece back to its start cell.
        let mut dice = ScriptedDice::new([4]);
        let outcome = move_into_block(&mut state, &mut dice, Color::Green, 0, 4).unwrap();
        assert_eq!(outcome, MoveOutcome::JoinedBlock { cell: 24 });
        assert_eq!(state.mystery_cell, MysteryCell::Inactive);
        assert_eq!(state.piece(Color::Green, 0).unwrap().location, Location::OnTrack(15));
        assert_eq!(dice.remaining(), 0);
        let events = state.take_events();
        assert!(events.contains(&Event::Teleported {
            color: Color::Green,
            piece: 1,
            destination: Teleport::Start,
        }));
    }

    #[test]
    fn test_blockading_turn_consumes_mystery_cell() {
        let mut state = GameState::new();
        place(&mut state, Color::Green, 0, 20);
        place(&mut state, Color::Yellow, 0, 24);
        state.mystery_cell = MysteryCell::Active {
            position: 24,
            rounds_left: 2,
        };
        // Destination 1 (Kotuwa) needs no further draws.
        let mut dice = ScriptedDice::new([1]);
        let outcome = Blockading
            .take_turn(&mut state, &mut dice, Color::Green, 4)
            .unwrap();
        assert_eq!(outcome, Some(MoveOutcome::JoinedBlock { cell: 24 }));
        assert_eq!(state.mystery_cell, MysteryCell::Inactive);
        let piece = state.piece(Color::Green, 0).unwrap();
        assert_eq!(piece.location, Location::OnTrack(KOTUWA_CELL));
        assert_eq!(piece.briefing_rounds_left, BRIEFING_ROUNDS);
    }

    #[test]
    fn test_block_move_onto_own_start_enters_home_path() {
        let mut state = GameState::new();
        place(&mut state, Color::Green, 0, 11);
        place(&mut state, Color::Red, 0, 15);
        state.piece_mut(Color::Green, 0).unwrap().captures = 1;
        assert!(!can_form_block(&state, Color::Green, 0, 4).unwrap());

        let mut dice = ScriptedDice::default();
        let outcome = move_into_block(&mut state, &mut dice, Color::Green, 0, 4).unwrap();
        assert_eq!(outcome, MoveOutcome::EnteredHomePath { slot: 3 });
        assert_eq!(
            state.piece(Color::Green, 0).unwrap().location,
            Location::InHomePath(3)
        );
        assert_eq!(state.piece(Color::Red, 0).unwrap().location, Location::OnTrack(15));
        assert!(!is_blockaded(&state, 15));
    }

    #[test]
    fn test_block_move_onto_own_start_without_captures_joins_block() {
        let mut state = GameState::new();
        let mut dice = ScriptedDice::default();
        place(&mut state, Color::Green, 0, 11);
        place(&mut state, Color::Red, 0, 15);
        assert!(can_form_block(&state, Color::Green, 0, 4).unwrap());
        let outcome = move_into_block(&mut state, &mut dice, Color::Green, 0, 4).unwrap();
        assert_eq!(outcome, MoveOutcome::JoinedBlock { cell: 15 });
        assert!(is_blockaded(&state, 15));
    }
}
