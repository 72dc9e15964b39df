//! Compass headings and relative turns.
//!
//! A [`Direction`] is an immutable heading. Adding a [`Turn`] yields a new
//! heading through a fixed rotation table; [`Direction::move_forward`]
//! maps the heading to a unit displacement in screen coordinates
//! (`y` grows downward).

use std::fmt;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

use crate::error::ParseError;
use crate::point::Point;

/// A relative quarter turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Turn {
    /// Clockwise on screen.
    Right,
    /// Counter-clockwise on screen.
    Left,
}

impl Turn {
    /// The turn that undoes this one.
    pub const fn opposite(self) -> Self {
        match self {
            Turn::Right => Turn::Left,
            Turn::Left => Turn::Right,
        }
    }

    /// Lower-case label (`"right"` / `"left"`).
    pub const fn label(self) -> &'static str {
        match self {
            Turn::Right => "right",
            Turn::Left => "left",
        }
    }
}

impl FromStr for Turn {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "right" => Ok(Turn::Right),
            "left" => Ok(Turn::Left),
            _ => Err(ParseError::UnknownTurn {
                input: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One of the four compass headings.
///
/// # Examples
///
/// ```
/// use agentworld_core::{Direction, Point, Turn};
///
/// let d = Direction::Right;
/// assert_eq!(d + Turn::Left, Direction::Up);
/// assert_eq!(d + Turn::Right, Direction::Down);
/// assert_eq!(Direction::Up.move_forward(Point::new(0, 0)), Point::new(0, -1));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards increasing `x`.
    Right,
    /// Towards decreasing `x`.
    Left,
    /// Towards decreasing `y`.
    Up,
    /// Towards increasing `y`.
    Down,
}

/// Orientation cycle used by [`Direction::turn_heading`].
/// Each successor is one left turn away.
const LEFTWARD_CYCLE: [Direction; 4] = [
    Direction::Right,
    Direction::Up,
    Direction::Left,
    Direction::Down,
];

impl Direction {
    /// All headings, in declaration order.
    pub const ALL: [Direction; 4] = [
        Direction::Right,
        Direction::Left,
        Direction::Up,
        Direction::Down,
    ];

    /// Rotate by one quarter turn.
    pub const fn turn(self, turn: Turn) -> Self {
        match (self, turn) {
            (Direction::Right, Turn::Right) => Direction::Down,
            (Direction::Right, Turn::Left) => Direction::Up,
            (Direction::Left, Turn::Right) => Direction::Up,
            (Direction::Left, Turn::Left) => Direction::Down,
            (Direction::Up, Turn::Right) => Direction::Right,
            (Direction::Up, Turn::Left) => Direction::Left,
            (Direction::Down, Turn::Right) => Direction::Left,
            (Direction::Down, Turn::Left) => Direction::Right,
        }
    }

    /// Rotate by a turn given as text (`"right"` or `"left"`).
    ///
    /// Any other input is rejected rather than defaulted.
    pub fn try_turn(self, turn: &str) -> Result<Self, ParseError> {
        Ok(self.turn(turn.parse()?))
    }

    /// Rotate by `inc` quarter turns; positive is left, negative is right.
    pub fn turn_heading(self, inc: i32) -> Self {
        let idx = match self {
            Direction::Right => 0,
            Direction::Up => 1,
            Direction::Left => 2,
            Direction::Down => 3,
        };
        LEFTWARD_CYCLE[(idx + inc.rem_euclid(4) as usize) % 4]
    }

    /// Unit displacement `(dx, dy)` for one step along this heading.
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::Right => (1, 0),
            Direction::Left => (-1, 0),
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
        }
    }

    /// The cell one step ahead of `from`.
    pub const fn move_forward(self, from: Point) -> Point {
        let (dx, dy) = self.offset();
        from.offset(dx, dy)
    }

    /// Lower-case label (`"right"`, `"left"`, `"up"`, `"down"`).
    pub const fn label(self) -> &'static str {
        match self {
            Direction::Right => "right",
            Direction::Left => "left",
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}

impl Add<Turn> for Direction {
    type Output = Direction;

    fn add(self, turn: Turn) -> Direction {
        self.turn(turn)
    }
}

impl AddAssign<Turn> for Direction {
    fn add_assign(&mut self, turn: Turn) {
        *self = self.turn(turn);
    }
}

impl FromStr for Direction {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "right" => Ok(Direction::Right),
            "left" => Ok(Direction::Left),
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            _ => Err(ParseError::UnknownDirection {
                input: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
