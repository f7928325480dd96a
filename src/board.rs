use std::fmt;

use crate::constants::{BOARD_SIZE, NUM_PLAYERS, QUADRANT_SIZE, START_OFFSET};

/// Player identity. Declaration order is turn order and quadrant order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    pub const ALL: [Color; NUM_PLAYERS] = [Color::Red, Color::Green, Color::Yellow, Color::Blue];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Color {
        Self::ALL[index % NUM_PLAYERS]
    }

    pub fn name(self) -> &'static str {
        match self {
            Color::Red => "Red",
            Color::Green => "Green",
            Color::Yellow => "Yellow",
            Color::Blue => "Blue",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Travel direction of a piece along the track.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Clockwise,
    CounterClockwise,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Clockwise => f.write_str("clockwise"),
            Direction::CounterClockwise => f.write_str("counterclockwise"),
        }
    }
}

/// The track cell where `color` enters the board. Also the gate to its
/// home path.
pub fn start_position(color: Color) -> usize {
    (color.index() * QUADRANT_SIZE + START_OFFSET) % BOARD_SIZE
}

/// The last cell of the quadrant that starts at `color`'s start cell.
pub fn approach_cell(color: Color) -> usize {
    (start_position(color) + QUADRANT_SIZE - 1) % BOARD_SIZE
}

/// Move `steps` cells from `position` along the track, wrapping around.
pub fn advance(position: usize, steps: usize, direction: Direction) -> usize {
    let steps = steps % BOARD_SIZE;
    match direction {
        Direction::Clockwise => (position + steps) % BOARD_SIZE,
        Direction::CounterClockwise => (position + BOARD_SIZE - steps) % BOARD_SIZE,
    }
}

/// Shortest distance between two track cells, ignoring direction.
pub fn circular_distance(a: usize, b: usize) -> usize {
    let d = a.abs_diff(b);
    d.min(BOARD_SIZE - d)
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use super::*;

    #[test]
    fn test_start_positions() {
        assert_eq!(start_position(Color::Red), 2);
        assert_eq!(start_position(Color::Green), 15);
        assert_eq!(start_position(Color::Yellow), 28);
        assert_eq!(start_position(Color::Blue), 41);
    }

    #[test]
    fn test_approach_cells() {
        assert_eq!(approach_cell(Color::Red), 14);
        assert_eq!(approach_cell(Color::Blue), 1);
    }

    #[test]
    fn test_advance_wraps_both_ways() {
        assert_eq!(advance(50, 4, Direction::Clockwise), 2);
        assert_eq!(advance(1, 3, Direction::CounterClockwise), 50);
        assert_eq!(advance(10, 0, Direction::CounterClockwise), 10);
    }

    #[test]
    fn test_circular_distance() {
        assert_eq!(circular_distance(0, 51), 1);
        assert_eq!(circular_distance(10, 36), 26);
        assert_eq!(circular_distance(5, 5), 0);
    }

    #[test]
    fn test_color_index_roundtrip() {
        for color in Color::ALL {
            assert_eq!(Color::from_index(color.index()), color);
        }
    }

    quickcheck! {
        fn advance_then_retreat_is_identity(pos: u8, steps: u8) -> bool {
            let pos = pos as usize % BOARD_SIZE;
            let steps = steps as usize;
            let there = advance(pos, steps, Direction::Clockwise);
            advance(there, steps, Direction::CounterClockwise) == pos
        }

        fn distance_is_symmetric_and_bounded(a: u8, b: u8) -> bool {
            let a = a as usize % BOARD_SIZE;
            let b = b as usize % BOARD_SIZE;
            let d = circular_distance(a, b);
            d == circular_distance(b, a) && d <= BOARD_SIZE / 2
        }
    }
}
