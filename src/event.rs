//! Trace events.
//!
//! Core operations record one [`Event`] per notable occurrence on the
//! [`GameState`](crate::state::GameState). The driver drains them and
//! renders each as a single trace line via `Display`.

use std::fmt;

use crate::board::{Color, Direction};
use crate::mystery::Teleport;
use crate::state::Condition;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    RollOff { color: Color, roll: u8 },
    FirstPlayer { color: Color },
    RoundStarted { round: u32 },
    Rolled { color: Color, roll: u8 },
    Released { color: Color, piece: usize },
    Moved {
        color: Color,
        piece: usize,
        from: usize,
        to: usize,
        steps: usize,
        direction: Direction,
    },
    EnteredHomePath { color: Color, piece: usize, slot: usize },
    ReachedHome { color: Color, piece: usize },
    Overshoot { color: Color, piece: usize },
    Captured {
        color: Color,
        piece: usize,
        victim: Color,
        victim_piece: usize,
    },
    BonusRoll { color: Color, roll: u8 },
    MysteryLanded { color: Color, piece: usize },
    Teleported {
        color: Color,
        piece: usize,
        destination: Teleport,
    },
    ConditionChanged {
        color: Color,
        piece: usize,
        condition: Condition,
    },
    Briefing { color: Color, piece: usize },
    DirectionFlipped { color: Color, piece: usize },
    RedirectedToKotuwa { color: Color, piece: usize },
    BlockFormed { color: Color, piece: usize, cell: usize },
    BlockRejected { color: Color, piece: usize, cell: usize },
    KeptInBase { color: Color },
    Decision { color: Color, reason: &'static str },
    NoMove { color: Color },
    MysterySpawned { position: usize },
    MysteryExpired,
    Won { color: Color },
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::RollOff { color, roll } => write!(f, "{color} rolls {roll}"),
            Event::FirstPlayer { color } => write!(
                f,
                "{color} player has the highest roll and will begin the game."
            ),
            Event::RoundStarted { round } => write!(f, "=== Round {round} ==="),
            Event::Rolled { color, roll } => write!(f, "{color} player rolled {roll}."),
            Event::Released { color, piece } => write!(
                f,
                "{color} player moves piece {piece} to the starting point."
            ),
            Event::Moved {
                color,
                piece,
                from,
                to,
                steps,
                direction,
            } => write!(
                f,
                "{color} moves piece {piece} from location {from} to {to} by {steps} units in {direction} direction."
            ),
            Event::EnteredHomePath { color, piece, slot } => write!(
                f,
                "{color} moves piece {piece} to home path position {}.",
                slot + 1
            ),
            Event::ReachedHome { color, piece } => {
                write!(f, "{color} piece {piece} has reached home!")
            }
            Event::Overshoot { color, piece } => write!(
                f,
                "{color} piece {piece} cannot move as it would overshoot home."
            ),
            Event::Captured {
                color,
                victim,
                victim_piece,
                ..
            } => write!(
                f,
                "{color} player captures {victim} player's piece {victim_piece}!"
            ),
            Event::BonusRoll { color, roll } => write!(
                f,
                "{color} player gets a bonus roll for capturing and rolled {roll}."
            ),
            Event::MysteryLanded { color, piece } => write!(
                f,
                "{color} player's piece {piece} landed on the mystery cell!"
            ),
            Event::Teleported {
                color,
                piece,
                destination,
            } => write!(f, "{color} piece {piece} teleported to {destination}."),
            Event::ConditionChanged {
                color,
                piece,
                condition: Condition::Energized,
            } => write!(
                f,
                "{color} piece {piece} feels energized, and movement speed doubles."
            ),
            Event::ConditionChanged {
                color,
                piece,
                condition: Condition::Sick,
            } => write!(
                f,
                "{color} piece {piece} feels sick, and movement speed halves."
            ),
            Event::Briefing { color, piece } => write!(
                f,
                "{color} piece {piece} attends briefing and cannot move for four rounds."
            ),
            Event::DirectionFlipped { color, piece } => write!(
                f,
                "The {color} piece {piece}, which was moving clockwise, has changed to moving counterclockwise."
            ),
            Event::RedirectedToKotuwa { color, piece } => write!(
                f,
                "The {color} piece {piece} is moving in a counterclockwise direction. Teleporting to Kotuwa from Pita-Kotuwa."
            ),
            Event::BlockFormed { color, piece, cell } => {
                write!(f, "{color} piece {piece} joins a block at position {cell}.")
            }
            Event::BlockRejected { color, piece, cell } => write!(
                f,
                "{color} piece {piece} cannot join position {cell}: a block is already there."
            ),
            Event::KeptInBase { color } => write!(
                f,
                "{color} player chooses to keep a piece in the base to avoid a potential block."
            ),
            Event::Decision { color, reason } => write!(f, "{color} player {reason}."),
            Event::NoMove { color } => write!(f, "{color} player has no piece to move."),
            Event::MysterySpawned { position } => {
                write!(f, "A mystery cell has appeared at position {position}!")
            }
            Event::MysteryExpired => write!(f, "The mystery cell has disappeared."),
            Event::Won { color } => write!(f, "{color} player wins!!!"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_line() {
        let event = Event::Moved {
            color: Color::Green,
            piece: 2,
            from: 15,
            to: 19,
            steps: 4,
            direction: Direction::Clockwise,
        };
        assert_eq!(
            event.to_string(),
            "Green moves piece 2 from location 15 to 19 by 4 units in clockwise direction."
        );
    }

    #[test]
    fn test_home_path_line_is_one_based() {
        let event = Event::EnteredHomePath {
            color: Color::Red,
            piece: 1,
            slot: 0,
        };
        assert_eq!(
            event.to_string(),
            "Red moves piece 1 to home path position 1."
        );
    }

    #[test]
    fn test_teleport_line_uses_destination_name() {
        let event = Event::Teleported {
            color: Color::Blue,
            piece: 4,
            destination: Teleport::PitaKotuwa,
        };
        assert_eq!(event.to_string(), "Blue piece 4 teleported to Pita-Kotuwa.");
    }
}
