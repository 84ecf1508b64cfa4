// Availability grid: the per-tick free/occupied snapshot the decision engine
// works on.
//
// The grid is rebuilt from the authoritative board once per decision and then
// mutated in place while a search path is provisionally laid down. Every
// accessor bounds-checks first; an out-of-range coordinate simply reads as
// occupied, so callers never need to guard their own lookups.

use crate::board::Board;
use crate::types::{Coord, Direction};

/// Dense square free/occupied map. `true` means the cell is free.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityGrid {
    size: i32,
    cells: Vec<bool>,
}

impl AvailabilityGrid {
    /// Creates a grid of the given size with every cell free.
    pub fn open(size: i32) -> AvailabilityGrid {
        AvailabilityGrid {
            size,
            cells: vec![true; (size * size) as usize],
        }
    }

    /// Snapshots the board: body cells are occupied, everything else
    /// (including the apple cell) is free.
    pub fn from_board(board: &Board) -> AvailabilityGrid {
        let mut grid = AvailabilityGrid::open(board.size());
        for part in board.body() {
            grid.set_occupied(part);
        }
        grid
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    pub fn in_bounds(&self, coord: &Coord) -> bool {
        coord.x >= 0 && coord.x < self.size && coord.y >= 0 && coord.y < self.size
    }

    fn index(&self, coord: &Coord) -> usize {
        (coord.y * self.size + coord.x) as usize
    }

    /// True when the coordinate is inside the grid and not occupied.
    pub fn is_free(&self, coord: &Coord) -> bool {
        self.in_bounds(coord) && self.cells[self.index(coord)]
    }

    pub fn set_occupied(&mut self, coord: &Coord) {
        if self.in_bounds(coord) {
            let idx = self.index(coord);
            self.cells[idx] = false;
        }
    }

    pub fn set_free(&mut self, coord: &Coord) {
        if self.in_bounds(coord) {
            let idx = self.index(coord);
            self.cells[idx] = true;
        }
    }

    /// Number of free cells on the whole grid.
    pub fn free_count(&self) -> usize {
        self.cells.iter().filter(|c| **c).count()
    }

    /// Number of non-free sides around a coordinate (walls count).
    pub fn walled_sides(&self, coord: &Coord) -> u8 {
        Direction::all()
            .iter()
            .filter(|d| !self.is_free(&d.apply(coord)))
            .count() as u8
    }

    /// Extracts the 3x3 window centered on `center` as its own grid.
    ///
    /// Cells outside the parent grid read as occupied, so a window taken at
    /// the border behaves like a window against a wall. Local coordinate
    /// (1, 1) is `center`; local (lx, ly) maps back to
    /// (center.x + lx - 1, center.y + ly - 1).
    pub fn probe_window(&self, center: &Coord) -> AvailabilityGrid {
        let mut window = AvailabilityGrid::open(3);
        for ly in 0..3 {
            for lx in 0..3 {
                let global = Coord::new(center.x + lx - 1, center.y + ly - 1);
                if !self.is_free(&global) {
                    window.set_occupied(&Coord::new(lx, ly));
                }
            }
        }
        window
    }

    /// Translates a coordinate local to a probe window back to the parent
    /// grid.
    pub fn unprobe(center: &Coord, local: &Coord) -> Coord {
        Coord::new(center.x + local.x - 1, center.y + local.y - 1)
    }
}
