// Authoritative game state: the square board, the snake's body, and the
// apple.
//
// The decision engine only ever reads this through a per-tick grid snapshot;
// mutation happens here, between decisions. Growth follows the classic
// rules: the head advances every tick, the tail is popped only once the body
// exceeds its target length, and eating raises the target by one. The cell
// the tail is about to vacate still counts as occupied for the tick's
// collision check.

use std::collections::VecDeque;

use rand::Rng;

use crate::types::{Coord, Direction};

/// What applying one move did to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Moved into a free cell; `ate` is set when it was the apple cell.
    Moved { ate: bool },
    /// The move led into a wall or the body. The board is unchanged.
    Died,
}

#[derive(Debug, Clone)]
pub struct Board {
    size: i32,
    /// Head-first body cells.
    body: VecDeque<Coord>,
    /// How long the body should be; may exceed the occupied count while the
    /// snake is still growing into it.
    target_len: usize,
    apple: Option<Coord>,
}

impl Board {
    /// Fresh board with a single-segment snake.
    pub fn new(size: i32, start: Coord) -> Board {
        Board::from_body(size, vec![start], 1)
    }

    /// Board with an explicit body layout, head first.
    pub fn from_body(size: i32, body: Vec<Coord>, target_len: usize) -> Board {
        Board {
            size,
            body: body.into_iter().collect(),
            target_len,
            apple: None,
        }
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    pub fn head(&self) -> Coord {
        *self.body.front().expect("snake body is never empty")
    }

    pub fn body(&self) -> impl Iterator<Item = &Coord> {
        self.body.iter()
    }

    pub fn body_len(&self) -> usize {
        self.body.len()
    }

    pub fn target_len(&self) -> usize {
        self.target_len
    }

    pub fn apple(&self) -> Option<Coord> {
        self.apple
    }

    pub fn in_bounds(&self, coord: &Coord) -> bool {
        coord.x >= 0 && coord.x < self.size && coord.y >= 0 && coord.y < self.size
    }

    pub fn is_occupied_by_body(&self, coord: &Coord) -> bool {
        self.body.contains(coord)
    }

    /// True when the snake's head may move in `direction` on the current
    /// state.
    pub fn may_move(&self, direction: Direction) -> bool {
        let next = direction.apply(&self.head());
        self.in_bounds(&next) && !self.is_occupied_by_body(&next)
    }

    /// Advances the snake one step. On a collision the board stays as it
    /// was and `Died` is returned.
    pub fn step(&mut self, direction: Direction) -> StepOutcome {
        if !self.may_move(direction) {
            return StepOutcome::Died;
        }

        let next = direction.apply(&self.head());
        self.body.push_front(next);

        let ate = self.apple == Some(next);
        if ate {
            self.target_len += 1;
            self.apple = None;
        }

        while self.body.len() > self.target_len {
            self.body.pop_back();
        }

        StepOutcome::Moved { ate }
    }

    /// Drops a new apple on a uniformly random free cell. Returns `None`
    /// when the snake has filled the board.
    pub fn place_apple<R: Rng>(&mut self, rng: &mut R) -> Option<Coord> {
        let mut free: Vec<Coord> = Vec::new();
        for y in 0..self.size {
            for x in 0..self.size {
                let coord = Coord::new(x, y);
                if !self.is_occupied_by_body(&coord) {
                    free.push(coord);
                }
            }
        }

        if free.is_empty() {
            return None;
        }

        let apple = free[rng.random_range(0..free.len())];
        self.apple = Some(apple);
        Some(apple)
    }
}
