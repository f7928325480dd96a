//! Ludo-Sim: an autonomous four-player Ludo simulation with house rules.
//!
//! Four computer players race their pieces around a 52-cell track. On top
//! of the classic rules the game has capture bonus rolls, a capture-gated
//! home path, temporary teleporting mystery cells, blockades, and a fixed
//! move-selection policy per color.
//!
//! ## Modules
//!
//! - [`constants`] - Board dimensions and house-rule constants
//! - [`board`] - Colors, directions and track geometry
//! - [`dice`] - Injectable randomness (seeded or scripted)
//! - [`state`] - Pieces, players, the mystery cell and the game state
//! - [`moves`] - Move resolution, home path entry and captures
//! - [`mystery`] - Mystery cell lifecycle and teleport destinations
//! - [`blockade`] - Blockade detection and block moves
//! - [`strategy`] - Per-color move selection policies
//! - [`game`] - The turn driver
//! - [`event`] - Trace events
//! - [`error`] - Invariant violations
//!
//! ## Example
//!
//! ```
//! use ludo_sim::board::Color;
//! use ludo_sim::dice::ScriptedDice;
//! use ludo_sim::moves::resolve_move;
//! use ludo_sim::state::{GameState, Location};
//!
//! let mut state = GameState::new();
//! let mut dice = ScriptedDice::default();
//!
//! // A six frees Red's first piece onto its start cell, then it moves on.
//! resolve_move(&mut state, &mut dice, Color::Red, 0, 6).unwrap();
//! resolve_move(&mut state, &mut dice, Color::Red, 0, 3).unwrap();
//! assert_eq!(state.players[0].pieces[0].location, Location::OnTrack(5));
//! ```

pub mod blockade;
pub mod board;
pub mod constants;
pub mod dice;
pub mod error;
pub mod event;
pub mod game;
pub mod moves;
pub mod mystery;
pub mod state;
pub mod strategy;
