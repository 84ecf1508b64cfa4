// Direction ranking: the composite heuristic ordering candidate moves.
//
// Every criterion is recomputed on each call; the availability grid mutates
// between calls while the search lays down its path, so nothing here may be
// cached across calls. The sort is stable, so candidates that tie on every
// criterion keep the caller's (distance-weighted) order.

use std::cmp::Ordering;

use crate::grid::AvailabilityGrid;
use crate::profiler::ProfileGuard;
use crate::region::edged_region;
use crate::split::SplitDetector;
use crate::types::{Coord, Direction};

/// Per-direction scoring inputs, ordered by priority:
/// landing on the apple, not splitting the region, the region fitting the
/// whole body, region size, the region still holding the apple, and finally
/// hugging walls (more blocked neighbors preserves open interior).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RankKey {
    lands_on_apple: bool,
    splits_region: bool,
    fits_body: bool,
    region_size: usize,
    region_holds_apple: bool,
    walled_sides: u8,
}

impl RankKey {
    fn blocked() -> RankKey {
        RankKey {
            lands_on_apple: false,
            splits_region: true,
            fits_body: false,
            region_size: 0,
            region_holds_apple: false,
            walled_sides: 0,
        }
    }

    /// Total order, best first.
    fn compare(&self, other: &RankKey) -> Ordering {
        other
            .lands_on_apple
            .cmp(&self.lands_on_apple)
            .then_with(|| self.splits_region.cmp(&other.splits_region))
            .then_with(|| other.fits_body.cmp(&self.fits_body))
            .then_with(|| other.region_size.cmp(&self.region_size))
            .then_with(|| other.region_holds_apple.cmp(&self.region_holds_apple))
            .then_with(|| other.walled_sides.cmp(&self.walled_sides))
    }
}

pub struct DirectionRanker<'a> {
    grid: &'a AvailabilityGrid,
    apple: Coord,
    body_len: usize,
    fit_margin: usize,
}

impl<'a> DirectionRanker<'a> {
    pub fn new(
        grid: &'a AvailabilityGrid,
        apple: Coord,
        body_len: usize,
        fit_margin: usize,
    ) -> DirectionRanker<'a> {
        DirectionRanker {
            grid,
            apple,
            body_len,
            fit_margin,
        }
    }

    /// Reorders `directions` in place, best candidate first.
    pub fn rank(&self, directions: &mut Vec<Direction>, source: &Coord) {
        if directions.len() < 2 {
            return;
        }
        let _guard = ProfileGuard::new("rank");

        let mut keyed: Vec<(Direction, RankKey)> = directions
            .iter()
            .map(|dir| (*dir, self.key_for(source, *dir)))
            .collect();
        keyed.sort_by(|a, b| a.1.compare(&b.1));

        directions.clear();
        directions.extend(keyed.iter().map(|(dir, _)| *dir));
    }

    fn key_for(&self, source: &Coord, direction: Direction) -> RankKey {
        let target = direction.apply(source);
        if !self.grid.is_free(&target) {
            return RankKey::blocked();
        }

        let region = edged_region(&target, self.grid);
        let size = region.free_count();

        RankKey {
            lands_on_apple: target == self.apple,
            splits_region: SplitDetector::new(self.grid).would_split(&target),
            fits_body: size >= self.body_len + self.fit_margin,
            region_size: size,
            region_holds_apple: region.is_free(&self.apple),
            walled_sides: self.grid.walled_sides(&target),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apple_adjacency_wins() {
        let grid = AvailabilityGrid::open(5);
        let apple = Coord::new(3, 2);
        let ranker = DirectionRanker::new(&grid, apple, 3, 1);

        let source = Coord::new(2, 2);
        let mut dirs = vec![Direction::Up, Direction::Left, Direction::Right];
        ranker.rank(&mut dirs, &source);
        assert_eq!(dirs[0], Direction::Right);
    }

    #[test]
    fn test_splitting_direction_sinks() {
        // Column x = 2 is a wall with a single doorway at (2, 2). Stepping
        // onto the doorway severs the two halves; the ranker must sink it
        // beneath the non-splitting alternative.
        let mut grid = AvailabilityGrid::open(5);
        for y in 0..5 {
            if y != 2 {
                grid.set_occupied(&Coord::new(2, y));
            }
        }

        let apple = Coord::new(0, 0);
        let ranker = DirectionRanker::new(&grid, apple, 2, 1);

        // From (1, 2): Right steps onto the doorway, Down stays in the open.
        let source = Coord::new(1, 2);
        let mut dirs = vec![Direction::Right, Direction::Down];
        ranker.rank(&mut dirs, &source);
        assert_eq!(dirs[0], Direction::Down);
    }

    #[test]
    fn test_larger_region_preferred() {
        // Full wall on x = 2 and an occupied source cell on it, so Left and
        // Right lead into two rooms that never connect. The left room loses
        // four cells and is the smaller one.
        let mut grid = AvailabilityGrid::open(5);
        for y in 0..5 {
            grid.set_occupied(&Coord::new(2, y));
        }
        grid.set_occupied(&Coord::new(0, 0));
        grid.set_occupied(&Coord::new(1, 0));
        grid.set_occupied(&Coord::new(0, 1));
        grid.set_occupied(&Coord::new(1, 1));

        let apple = Coord::new(4, 4);
        let ranker = DirectionRanker::new(&grid, apple, 1, 1);

        // From (2, 2): Left into the 6-cell room, Right into the 10-cell
        // one. Neither move splits its room, so size decides.
        let source = Coord::new(2, 2);
        let mut dirs = vec![Direction::Left, Direction::Right];
        ranker.rank(&mut dirs, &source);
        assert_eq!(dirs[0], Direction::Right);
    }

    #[test]
    fn test_blocked_directions_sort_last() {
        let mut grid = AvailabilityGrid::open(3);
        grid.set_occupied(&Coord::new(1, 0));
        let ranker = DirectionRanker::new(&grid, Coord::new(2, 2), 1, 1);

        let source = Coord::new(1, 1);
        let mut dirs = vec![Direction::Up, Direction::Down];
        ranker.rank(&mut dirs, &source);
        assert_eq!(*dirs.last().unwrap(), Direction::Up);
    }

    #[test]
    fn test_stable_on_full_tie() {
        let grid = AvailabilityGrid::open(4);
        let ranker = DirectionRanker::new(&grid, Coord::new(0, 0), 1, 1);

        // From the center of an open grid, Down and Right are symmetric:
        // same region, same wall count, neither lands on the apple.
        let source = Coord::new(1, 1);
        let mut dirs = vec![Direction::Down, Direction::Right];
        ranker.rank(&mut dirs, &source);
        assert_eq!(dirs, vec![Direction::Down, Direction::Right]);
    }
}
