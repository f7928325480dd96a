//! The turn driver.
//!
//! [`Game`] owns the [`GameState`] and the dice and runs the simulation:
//!
//! - a roll-off decides who starts (highest roll, ties to the earlier color)
//! - the current player rolls, its policy moves, and it rolls again on a six
//! - when the turn passes back to Red a round completes: briefings and the
//!   mystery cell age by one round, and every fourth round a new mystery
//!   cell appears
//! - the game ends as soon as a player has all four pieces home
//!
//! Trace lines and status blocks go to any `io::Write`. Write failures are
//! logged and otherwise ignored.

use std::io::Write;

use tracing::{info, warn};

use crate::board::Color;
use crate::constants::{BASE_EXIT_ROLL, MYSTERY_SPAWN_PERIOD, NUM_PLAYERS};
use crate::dice::Dice;
use crate::error::RuleViolation;
use crate::event::Event;
use crate::moves::MoveOutcome;
use crate::mystery;
use crate::state::GameState;
use crate::strategy::strategy_for;

/// Driver options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimConfig {
    /// Write the status block after every completed round.
    pub print_status: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self { print_status: true }
    }
}

/// A running simulation.
#[derive(Debug)]
pub struct Game<D: Dice> {
    state: GameState,
    dice: D,
    config: SimConfig,
}

impl<D: Dice> Game<D> {
    /// Create a new game with default settings.
    pub fn new(dice: D) -> Self {
        Self::with_config(dice, SimConfig::default())
    }

    pub fn with_config(dice: D, config: SimConfig) -> Self {
        Self::from_state(GameState::new(), dice, config)
    }

    /// Resume from an existing state.
    pub fn from_state(state: GameState, dice: D, config: SimConfig) -> Self {
        Self {
            state,
            dice,
            config,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn dice(&self) -> &D {
        &self.dice
    }

    /// Each player rolls once; the highest roll starts.
    pub fn roll_off(&mut self) -> Result<Color, RuleViolation> {
        let mut best: Option<(u8, Color)> = None;
        for color in Color::ALL {
            let roll = self.dice.roll()?;
            self.state.record(Event::RollOff { color, roll });
            if best.is_none_or(|(high, _)| roll > high) {
                best = Some((roll, color));
            }
        }
        let first = best.map_or(Color::Red, |(_, color)| color);
        self.state.current_player = first.index();
        self.state.record(Event::FirstPlayer { color: first });
        info!(%first, "first player");
        Ok(first)
    }

    /// Play the current player's turn, rolling again on every six, then pass
    /// the turn on. Returns the winner if the game is over.
    pub fn play_turn(&mut self) -> Result<Option<Color>, RuleViolation> {
        let color = self.state.current_color();
        let strategy = strategy_for(color);
        loop {
            let roll = self.dice.roll()?;
            self.state.record(Event::Rolled { color, roll });
            let outcome = strategy.take_turn(&mut self.state, &mut self.dice, color, roll)?;
            if !outcome.is_some_and(MoveOutcome::moved) {
                self.state.record(Event::NoMove { color });
            }
            self.state.verify()?;

            if let Some(winner) = self.state.winner() {
                self.state.record(Event::Won { color: winner });
                info!(%winner, round = self.state.round_count, "game over");
                return Ok(Some(winner));
            }
            if roll != BASE_EXIT_ROLL {
                break;
            }
        }

        self.state.current_player = (self.state.current_player + 1) % NUM_PLAYERS;
        if self.state.current_player == 0 {
            self.complete_round()?;
        }
        Ok(None)
    }

    /// Round bookkeeping, run when the turn wraps back to the first color.
    pub fn complete_round(&mut self) -> Result<(), RuleViolation> {
        self.state.round_count += 1;
        for player in &mut self.state.players {
            for piece in &mut player.pieces {
                piece.briefing_rounds_left = piece.briefing_rounds_left.saturating_sub(1);
            }
        }
        mystery::tick(&mut self.state);
        if self.state.round_count % MYSTERY_SPAWN_PERIOD == 0 {
            mystery::spawn(&mut self.state, &mut self.dice)?;
        }
        self.state.record(Event::RoundStarted {
            round: self.state.round_count,
        });
        Ok(())
    }

    /// Run until somebody wins, writing the trace to `out`.
    ///
    /// There is no turn limit: a game in which nobody can bring all four
    /// pieces home runs forever.
    pub fn run(&mut self, out: &mut dyn Write) -> Result<Color, RuleViolation> {
        self.roll_off()?;
        self.flush(out);
        loop {
            if let Some(winner) = self.step(out)? {
                return Ok(winner);
            }
        }
    }

    /// Like [`Game::run`], but stop once `max_rounds` rounds have completed.
    pub fn run_rounds(
        &mut self,
        out: &mut dyn Write,
        max_rounds: u32,
    ) -> Result<Option<Color>, RuleViolation> {
        self.roll_off()?;
        self.flush(out);
        while self.state.round_count <= max_rounds {
            if let Some(winner) = self.step(out)? {
                return Ok(Some(winner));
            }
        }
        Ok(None)
    }

    fn step(&mut self, out: &mut dyn Write) -> Result<Option<Color>, RuleViolation> {
        let round = self.state.round_count;
        let winner = self.play_turn()?;
        self.flush(out);
        if winner.is_none() && self.config.print_status && self.state.round_count != round {
            emit(out, &self.state.to_string());
        }
        Ok(winner)
    }

    /// Write out and clear the recorded events.
    pub fn flush(&mut self, out: &mut dyn Write) {
        for event in self.state.take_events() {
            emit(out, &event.to_string());
        }
    }
}

fn emit(out: &mut dyn Write, line: &str) {
    if let Err(err) = writeln!(out, "{line}") {
        warn!(%err, "failed to write trace");
    }
}
