//! Invariant violations.
//!
//! The simulation has no external input besides dice draws, so every error
//! here is a programmer error. Callers propagate them to the driver, which
//! aborts the game.

use crate::board::Color;

/// A broken game invariant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleViolation {
    #[error("{color} base counter is {recorded} but {actual} pieces are in base")]
    BaseCountDrift {
        color: Color,
        recorded: usize,
        actual: usize,
    },

    #[error("{color} home counter is {recorded} but {actual} pieces are home")]
    HomeCountDrift {
        color: Color,
        recorded: usize,
        actual: usize,
    },

    #[error("{color} piece {piece} is at cell {cell}, outside the track")]
    CellOutOfRange {
        color: Color,
        piece: usize,
        cell: usize,
    },

    #[error("{color} piece {piece} is at home path slot {slot}, outside the path")]
    SlotOutOfRange {
        color: Color,
        piece: usize,
        slot: usize,
    },

    #[error("{color} has no piece with index {index}")]
    NoSuchPiece { color: Color, index: usize },

    #[error("move chain exceeded {limit} nested capture or teleport steps")]
    ChainTooDeep { limit: usize },

    #[error("dice source produced {value}, expected a value below {bound}")]
    DrawOutOfRange { value: usize, bound: usize },

    #[error("dice source rolled {value}, expected 1 to 6")]
    RollOutOfRange { value: usize },

    #[error("scripted dice ran out of values")]
    DiceExhausted,
}
