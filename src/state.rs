//! Game state: pieces, players, the mystery cell, and the turn counters.
//!
//! All mutations that move a piece between base, track, home path and home
//! go through [`Player`] methods so the `pieces_in_base` / `pieces_in_home`
//! counters stay in step with the pieces themselves. [`GameState::verify`]
//! re-derives the counters and checks every location is in range.

use std::fmt;

use crate::board::{Color, Direction, start_position};
use crate::constants::{BOARD_SIZE, HOME_PATH_SIZE, NUM_PLAYERS, PIECES_PER_PLAYER};
use crate::error::RuleViolation;
use crate::event::Event;

/// Where a piece currently is.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Location {
    #[default]
    InBase,
    /// On the shared track, at a cell in `0..BOARD_SIZE`.
    OnTrack(usize),
    /// On the owner's private home path, at a slot in `0..HOME_PATH_SIZE`.
    InHomePath(usize),
    Home,
}

/// Movement modifier picked up at Bhawana.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Condition {
    /// Moves double the roll.
    Energized,
    /// Moves half the roll.
    Sick,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Piece {
    /// 1-based identity within the owner.
    pub id: usize,
    pub location: Location,
    pub direction: Direction,
    /// Captures made by this piece over its lifetime.
    pub captures: u32,
    pub condition: Option<Condition>,
    /// While non-zero the piece cannot move.
    pub briefing_rounds_left: u32,
}

impl Piece {
    pub fn new(id: usize) -> Self {
        Self {
            id,
            location: Location::InBase,
            direction: Direction::Clockwise,
            captures: 0,
            condition: None,
            briefing_rounds_left: 0,
        }
    }

    /// Track cell of the piece, if it is on the track.
    pub fn track_position(&self) -> Option<usize> {
        match self.location {
            Location::OnTrack(cell) => Some(cell),
            _ => None,
        }
    }

    pub fn is_in_base(&self) -> bool {
        self.location == Location::InBase
    }

    pub fn is_home(&self) -> bool {
        self.location == Location::Home
    }

    /// A piece can be advanced if it is on the track and not in a briefing.
    pub fn is_movable(&self) -> bool {
        matches!(self.location, Location::OnTrack(_)) && self.briefing_rounds_left == 0
    }

    /// Steps actually travelled for a die roll, after the Bhawana modifier.
    pub fn effective_steps(&self, roll: u8) -> usize {
        let roll = roll as usize;
        match self.condition {
            Some(Condition::Energized) => roll * 2,
            Some(Condition::Sick) => (roll / 2).max(1),
            None => roll,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    pub color: Color,
    pub pieces: [Piece; PIECES_PER_PLAYER],
    pub pieces_in_base: usize,
    pub pieces_in_home: usize,
}

impl Player {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            pieces: std::array::from_fn(|i| Piece::new(i + 1)),
            pieces_in_base: PIECES_PER_PLAYER,
            pieces_in_home: 0,
        }
    }

    /// Pieces on the track or the home path.
    pub fn pieces_in_play(&self) -> usize {
        PIECES_PER_PLAYER - self.pieces_in_base - self.pieces_in_home
    }

    /// Index of the first piece still in base.
    pub fn first_in_base(&self) -> Option<usize> {
        self.pieces.iter().position(Piece::is_in_base)
    }

    /// Indices of all pieces that can be advanced this turn.
    pub fn movable_pieces(&self) -> Vec<usize> {
        (0..PIECES_PER_PLAYER)
            .filter(|&i| self.pieces[i].is_movable())
            .collect()
    }

    /// Move a base piece onto the player's start cell.
    pub(crate) fn release(&mut self, index: usize) {
        let start = start_position(self.color);
        let piece = &mut self.pieces[index];
        if piece.is_in_base() {
            piece.location = Location::OnTrack(start);
            self.pieces_in_base -= 1;
        }
    }

    /// Return a piece to base. Direction, condition and captures stay.
    pub(crate) fn send_to_base(&mut self, index: usize) {
        let piece = &mut self.pieces[index];
        match piece.location {
            Location::InBase => {}
            Location::Home => {
                piece.location = Location::InBase;
                self.pieces_in_home -= 1;
                self.pieces_in_base += 1;
            }
            Location::OnTrack(_) | Location::InHomePath(_) => {
                piece.location = Location::InBase;
                self.pieces_in_base += 1;
            }
        }
    }

    /// Put a piece on its home path. Reaching `HOME_PATH_SIZE` means home.
    pub(crate) fn enter_home_path(&mut self, index: usize, slot: usize) {
        let piece = &mut self.pieces[index];
        if slot >= HOME_PATH_SIZE {
            if !piece.is_home() {
                piece.location = Location::Home;
                self.pieces_in_home += 1;
            }
        } else {
            piece.location = Location::InHomePath(slot);
        }
    }

    /// Recount pieces by location and compare with the stored counters.
    pub fn verify(&self) -> Result<(), RuleViolation> {
        for (i, piece) in self.pieces.iter().enumerate() {
            match piece.location {
                Location::OnTrack(cell) if cell >= BOARD_SIZE => {
                    return Err(RuleViolation::CellOutOfRange {
                        color: self.color,
                        piece: i + 1,
                        cell,
                    });
                }
                Location::InHomePath(slot) if slot >= HOME_PATH_SIZE => {
                    return Err(RuleViolation::SlotOutOfRange {
                        color: self.color,
                        piece: i + 1,
                        slot,
                    });
                }
                _ => {}
            }
        }
        let in_base = self.pieces.iter().filter(|p| p.is_in_base()).count();
        if in_base != self.pieces_in_base {
            return Err(RuleViolation::BaseCountDrift {
                color: self.color,
                recorded: self.pieces_in_base,
                actual: in_base,
            });
        }
        let at_home = self.pieces.iter().filter(|p| p.is_home()).count();
        if at_home != self.pieces_in_home {
            return Err(RuleViolation::HomeCountDrift {
                color: self.color,
                recorded: self.pieces_in_home,
                actual: at_home,
            });
        }
        Ok(())
    }
}

/// True once every piece of the player is home.
pub fn check_for_win(player: &Player) -> bool {
    player.pieces_in_home == PIECES_PER_PLAYER
}

/// The temporary teleport trap.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum MysteryCell {
    #[default]
    Inactive,
    Active { position: usize, rounds_left: u32 },
}

impl MysteryCell {
    /// The trap's cell while it is active.
    pub fn position(&self) -> Option<usize> {
        match *self {
            MysteryCell::Active { position, .. } => Some(position),
            MysteryCell::Inactive => None,
        }
    }
}

/// Everything the simulation mutates, owned by the turn driver.
#[derive(Clone, Debug)]
pub struct GameState {
    pub players: [Player; NUM_PLAYERS],
    pub mystery_cell: MysteryCell,
    pub current_player: usize,
    /// Starts at 1 and increments each time the turn wraps to the first color.
    pub round_count: u32,
    events: Vec<Event>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// All pieces in base, no mystery cell, round 1.
    pub fn new() -> Self {
        Self {
            players: Color::ALL.map(Player::new),
            mystery_cell: MysteryCell::Inactive,
            current_player: 0,
            round_count: 1,
            events: Vec::new(),
        }
    }

    pub fn player(&self, color: Color) -> &Player {
        &self.players[color.index()]
    }

    pub fn player_mut(&mut self, color: Color) -> &mut Player {
        &mut self.players[color.index()]
    }

    pub fn piece(&self, color: Color, index: usize) -> Result<&Piece, RuleViolation> {
        self.players[color.index()]
            .pieces
            .get(index)
            .ok_or(RuleViolation::NoSuchPiece { color, index })
    }

    pub fn piece_mut(&mut self, color: Color, index: usize) -> Result<&mut Piece, RuleViolation> {
        self.players[color.index()]
            .pieces
            .get_mut(index)
            .ok_or(RuleViolation::NoSuchPiece { color, index })
    }

    /// Every piece on the track at `cell`, as `(owner, index)`.
    pub fn pieces_at(&self, cell: usize) -> impl Iterator<Item = (Color, usize)> + '_ {
        self.players.iter().flat_map(move |player| {
            player
                .pieces
                .iter()
                .enumerate()
                .filter(move |(_, piece)| piece.track_position() == Some(cell))
                .map(move |(i, _)| (player.color, i))
        })
    }

    pub fn current_color(&self) -> Color {
        Color::from_index(self.current_player)
    }

    /// The first player with every piece home.
    pub fn winner(&self) -> Option<Color> {
        self.players
            .iter()
            .find(|player| check_for_win(player))
            .map(|player| player.color)
    }

    /// Check the counters and locations of every player.
    pub fn verify(&self) -> Result<(), RuleViolation> {
        self.players.iter().try_for_each(Player::verify)
    }

    pub(crate) fn record(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Take the events recorded since the last call, oldest first.
    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }
}

/// Status block number of a home path slot: each color owns
/// `HOME_PATH_SIZE` numbers starting at `color.index() * HOME_PATH_SIZE`.
pub fn home_path_cell(color: Color, slot: usize) -> usize {
    color.index() * HOME_PATH_SIZE + slot
}

/// The per-round status block.
impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Round: {}", self.round_count)?;
        for player in &self.players {
            writeln!(
                f,
                "{} player now has {}/{PIECES_PER_PLAYER} pieces on the board, {}/{PIECES_PER_PLAYER} in base and {}/{PIECES_PER_PLAYER} home.",
                player.color,
                player.pieces_in_play(),
                player.pieces_in_base,
                player.pieces_in_home,
            )?;
            writeln!(f, "============================")?;
            writeln!(f, "Location of pieces {}", player.color)?;
            writeln!(f, "============================")?;
            for piece in &player.pieces {
                match piece.location {
                    Location::InBase => writeln!(f, "Piece {} -> Base", piece.id)?,
                    Location::Home => writeln!(f, "Piece {} -> Home", piece.id)?,
                    // Home path slots are numbered per color after the track.
                    Location::InHomePath(slot) => writeln!(
                        f,
                        "Piece {} -> {}",
                        piece.id,
                        home_path_cell(player.color, slot)
                    )?,
                    Location::OnTrack(cell) => writeln!(f, "Piece {} -> {cell}", piece.id)?,
                }
            }
            writeln!(f)?;
        }
        if let MysteryCell::Active {
            position,
            rounds_left,
        } = self.mystery_cell
        {
            writeln!(
                f,
                "The mystery cell is at {position} and will be at that location for the next {rounds_left} rounds."
            )?;
        }
        Ok(())
    }
}
