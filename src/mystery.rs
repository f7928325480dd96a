//! The mystery cell: a temporary trap that teleports the first piece to
//! land on it.
//!
//! The driver spawns a cell every few rounds and ticks it once per
//! completed round. Landing on an active cell draws one of six
//! [`Teleport`] destinations, applies it, and consumes the cell.

use std::fmt;

use tracing::debug;

use crate::board::{Color, Direction, approach_cell, start_position};
use crate::constants::{
    BHAWANA_CELL, BOARD_SIZE, BRIEFING_ROUNDS, KOTUWA_CELL, MAX_CHAIN_DEPTH, MYSTERY_LIFETIME,
    PITA_KOTUWA_CELL, TELEPORT_DESTINATIONS,
};
use crate::dice::Dice;
use crate::error::RuleViolation;
use crate::event::Event;
use crate::state::{Condition, GameState, Location, MysteryCell};

/// Where a mystery cell sends a piece.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Teleport {
    /// Cell 9, then energized or sick at even odds.
    Bhawana,
    /// Cell 2, held in a briefing.
    Kotuwa,
    /// Cell 46 and reverse; counter-clockwise pieces go on to Kotuwa.
    PitaKotuwa,
    /// Back to base.
    Base,
    /// The owner's start cell.
    Start,
    /// The last cell of the owner's quadrant.
    Approach,
}

impl Teleport {
    pub const ALL: [Teleport; TELEPORT_DESTINATIONS] = [
        Teleport::Bhawana,
        Teleport::Kotuwa,
        Teleport::PitaKotuwa,
        Teleport::Base,
        Teleport::Start,
        Teleport::Approach,
    ];

    pub fn from_index(index: usize) -> Option<Teleport> {
        Self::ALL.get(index).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            Teleport::Bhawana => "Bhawana",
            Teleport::Kotuwa => "Kotuwa",
            Teleport::PitaKotuwa => "Pita-Kotuwa",
            Teleport::Base => "Base",
            Teleport::Start => "X",
            Teleport::Approach => "Approach",
        }
    }
}

impl fmt::Display for Teleport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Place a fresh mystery cell on a random track cell, replacing any
/// existing one.
pub fn spawn(state: &mut GameState, dice: &mut dyn Dice) -> Result<usize, RuleViolation> {
    let position = dice.draw(BOARD_SIZE)?;
    state.mystery_cell = MysteryCell::Active {
        position,
        rounds_left: MYSTERY_LIFETIME,
    };
    state.record(Event::MysterySpawned { position });
    debug!(position, "mystery cell spawned");
    Ok(position)
}

/// Age the mystery cell by one round, removing it when its time is up.
pub fn tick(state: &mut GameState) {
    if let MysteryCell::Active {
        position,
        rounds_left,
    } = state.mystery_cell
    {
        let rounds_left = rounds_left.saturating_sub(1);
        state.mystery_cell = if rounds_left == 0 {
            state.record(Event::MysteryExpired);
            MysteryCell::Inactive
        } else {
            MysteryCell::Active {
                position,
                rounds_left,
            }
        };
    }
}

/// Trigger the mystery cell if the piece is standing on it.
///
/// Returns the destination applied, if any.
pub fn check_mystery_cell(
    state: &mut GameState,
    dice: &mut dyn Dice,
    color: Color,
    index: usize,
) -> Result<Option<Teleport>, RuleViolation> {
    handle_landing(state, dice, color, index, 0)
}

pub(crate) fn handle_landing(
    state: &mut GameState,
    dice: &mut dyn Dice,
    color: Color,
    index: usize,
    depth: usize,
) -> Result<Option<Teleport>, RuleViolation> {
    let Some(cell) = state.mystery_cell.position() else {
        return Ok(None);
    };
    let piece = state.piece(color, index)?;
    if piece.track_position() != Some(cell) {
        return Ok(None);
    }
    let id = piece.id;
    state.record(Event::MysteryLanded { color, piece: id });

    let drawn = dice.draw(TELEPORT_DESTINATIONS)?;
    let destination = Teleport::from_index(drawn).ok_or(RuleViolation::DrawOutOfRange {
        value: drawn,
        bound: TELEPORT_DESTINATIONS,
    })?;
    state.record(Event::Teleported {
        color,
        piece: id,
        destination,
    });
    debug!(%color, piece = id, cell, %destination, "mystery cell triggered");

    teleport(state, dice, color, index, destination, depth)?;
    state.mystery_cell = MysteryCell::Inactive;
    state.verify()?;
    Ok(Some(destination))
}

/// Apply one teleport destination to a piece.
pub fn teleport(
    state: &mut GameState,
    dice: &mut dyn Dice,
    color: Color,
    index: usize,
    destination: Teleport,
    depth: usize,
) -> Result<(), RuleViolation> {
    if depth > MAX_CHAIN_DEPTH {
        return Err(RuleViolation::ChainTooDeep {
            limit: MAX_CHAIN_DEPTH,
        });
    }
    let id = state.piece(color, index)?.id;

    match destination {
        Teleport::Bhawana => {
            let condition = if dice.draw(2)? == 0 {
                Condition::Energized
            } else {
                Condition::Sick
            };
            let piece = state.piece_mut(color, index)?;
            piece.location = Location::OnTrack(BHAWANA_CELL);
            piece.condition = Some(condition);
            state.record(Event::ConditionChanged {
                color,
                piece: id,
                condition,
            });
        }
        Teleport::Kotuwa => {
            let piece = state.piece_mut(color, index)?;
            piece.location = Location::OnTrack(KOTUWA_CELL);
            piece.briefing_rounds_left = BRIEFING_ROUNDS;
            state.record(Event::Briefing { color, piece: id });
        }
        Teleport::PitaKotuwa => {
            let piece = state.piece_mut(color, index)?;
            piece.location = Location::OnTrack(PITA_KOTUWA_CELL);
            let direction = piece.direction;
            match direction {
                Direction::Clockwise => {
                    state.piece_mut(color, index)?.direction = Direction::CounterClockwise;
                    state.record(Event::DirectionFlipped { color, piece: id });
                }
                Direction::CounterClockwise => {
                    state.record(Event::RedirectedToKotuwa { color, piece: id });
                    teleport(state, dice, color, index, Teleport::Kotuwa, depth + 1)?;
                }
            }
        }
        Teleport::Base => state.player_mut(color).send_to_base(index),
        Teleport::Start => {
            state.piece_mut(color, index)?.location = Location::OnTrack(start_position(color));
        }
        Teleport::Approach => {
            state.piece_mut(color, index)?.location = Location::OnTrack(approach_cell(color));
        }
    }
    Ok(())
}
