// Core coordinate and direction types shared by the whole crate.
//
// The grid origin is the top-left corner; x grows to the right and y grows
// downward, so Down is y + 1. There are no diagonal moves and no wraparound.

use serde::{Deserialize, Serialize};

/// 2D coordinate on the board
#[derive(Deserialize, Serialize, Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub fn new(x: i32, y: i32) -> Coord {
        Coord { x, y }
    }

    /// True when `other` is exactly one orthogonal step away.
    pub fn is_adjacent(&self, other: &Coord) -> bool {
        (self.x - other.x).abs() + (self.y - other.y).abs() == 1
    }
}

/// The four possible movement directions for the snake
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns all possible directions
    pub fn all() -> [Direction; 4] {
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right]
    }

    /// Converts direction to string representation for logs and reports
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    /// The direction pointing back the way we came
    pub fn reverse(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Calculates the next coordinate when moving in this direction
    pub fn apply(&self, coord: &Coord) -> Coord {
        match self {
            Direction::Up => Coord { x: coord.x, y: coord.y - 1 },
            Direction::Down => Coord { x: coord.x, y: coord.y + 1 },
            Direction::Left => Coord { x: coord.x - 1, y: coord.y },
            Direction::Right => Coord { x: coord.x + 1, y: coord.y },
        }
    }

    /// The direction that moves `from` onto `to`, if they are orthogonally
    /// adjacent.
    pub fn between(from: &Coord, to: &Coord) -> Option<Direction> {
        Direction::all()
            .iter()
            .find(|d| d.apply(from) == *to)
            .copied()
    }
}

/// Orders the four directions by how directly they approach `to` from `from`.
///
/// The primary axis is the one with the larger remaining distance; rows win
/// the tie only when the y distance is already zero, mirroring the naive
/// direction rule. The result always contains all four directions, so callers
/// can strip or reorder without losing candidates.
pub fn weighted_directions(from: &Coord, to: &Coord) -> [Direction; 4] {
    let dx = to.x - from.x;
    let dy = to.y - from.y;

    let horiz = if dx >= 0 { Direction::Right } else { Direction::Left };
    let vert = if dy >= 0 { Direction::Down } else { Direction::Up };

    if dx.abs() > dy.abs() || dy == 0 {
        [horiz, vert, vert.reverse(), horiz.reverse()]
    } else {
        [vert, horiz, horiz.reverse(), vert.reverse()]
    }
}

/// The direction minimizing straight-line distance to the target, ignoring
/// obstacles.
pub fn naive_direction(from: &Coord, to: &Coord) -> Direction {
    weighted_directions(from, to)[0]
}
