// Per-tick move decision.
//
// The pilot glues the analysis pieces together: snapshot the grid, aim
// straight at the apple, nudge the aim off an obstacle, and only when the
// straight move looks dangerous (it would wall the apple off or split the
// free region) spin up the full cycle search. The pilot never fails: on a
// hopeless board it returns the naive direction and leaves the collision for
// the board owner to detect.

use log::{debug, info};

use crate::board::Board;
use crate::config::Config;
use crate::grid::AvailabilityGrid;
use crate::profile;
use crate::region::edged_region;
use crate::search::{CycleSearch, ResumeCursor, SearchOutcome};
use crate::split::SplitDetector;
use crate::types::{naive_direction, weighted_directions, Coord, Direction};

/// Result of one `decide` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Move this way now.
    Move(Direction),
    /// The search ran out of its per-tick suspension budget. Pass the cursor
    /// back in on the next call; the token is only meaningful while the
    /// board stays unchanged, so the snake should hold still meanwhile.
    Searching(ResumeCursor),
}

pub struct Pilot {
    config: Config,
    apple: Option<Coord>,
    search_path: Vec<Coord>,
    /// Longest partial path seen while a search is pending, kept across
    /// suspended ticks so the eventual fallback can use it.
    longest_partial: Vec<Coord>,
}

impl Pilot {
    pub fn new(config: Config) -> Pilot {
        Pilot {
            config,
            apple: None,
            search_path: Vec::new(),
            longest_partial: Vec::new(),
        }
    }

    /// Updates the current target. Clears search leftovers when the target
    /// actually moved.
    pub fn set_target(&mut self, apple: Coord) {
        if self.apple != Some(apple) {
            self.apple = Some(apple);
            self.longest_partial.clear();
        }
    }

    /// Read-only snapshot of the route the last search worked on, for
    /// diagnostic overlays.
    pub fn search_path(&self) -> &[Coord] {
        &self.search_path
    }

    /// Chooses the next move for the snake on `board`.
    pub fn decide(&mut self, board: &Board, resume: Option<ResumeCursor>) -> Decision {
        let head = board.head();
        let grid = AvailabilityGrid::from_board(board);

        let apple = match self.apple {
            Some(apple) => apple,
            // No target yet: just take any open direction.
            None => return Decision::Move(self.correct_blocked(&grid, &head, Direction::Up)),
        };

        let mut naive = naive_direction(&head, &apple);
        if !grid.is_free(&naive.apply(&head)) {
            naive = self.correct_blocked(&grid, &head, naive);
        }

        if !self.should_search(board, &grid, &head, naive) {
            self.finish_move();
            return Decision::Move(naive);
        }

        let mut cursor = resume.unwrap_or_default();
        let mut search = CycleSearch::new(
            grid,
            head,
            apple,
            board.target_len(),
            self.config.search.region_fit_margin,
            self.config.search.resumable,
        );

        let mut suspensions = 0;
        loop {
            let outcome = profile!("search", { search.solve(&mut cursor) });
            match outcome {
                SearchOutcome::Solved(dir) => {
                    self.search_path = search.path().to_vec();
                    self.finish_move();
                    debug!("search solved, moving {}", dir.as_str());
                    return Decision::Move(dir);
                }
                SearchOutcome::Suspended => {
                    suspensions += 1;
                    if suspensions >= self.config.search.max_suspensions_per_tick {
                        self.search_path = search.path().to_vec();
                        self.note_longest(search.longest());
                        debug!(
                            "search still pending after {} suspensions (cursor depth {})",
                            suspensions,
                            cursor.depth()
                        );
                        return Decision::Searching(cursor);
                    }
                }
                SearchOutcome::Exhausted => {
                    self.note_longest(search.longest());
                    let fallback = self.longest_partial_direction(&head).unwrap_or(naive);
                    self.search_path = self.longest_partial.clone();
                    self.finish_move();
                    info!(
                        "search exhausted, falling back to {} ({})",
                        fallback.as_str(),
                        if self.search_path.is_empty() {
                            "naive direction"
                        } else {
                            "longest partial path"
                        }
                    );
                    return Decision::Move(fallback);
                }
            }
        }
    }

    /// One consistent trigger policy: only search when the snake is long
    /// enough to bite itself, and the straight move either splits the free
    /// region or steps into a region the apple is not part of.
    fn should_search(
        &self,
        board: &Board,
        grid: &AvailabilityGrid,
        head: &Coord,
        naive: Direction,
    ) -> bool {
        if board.target_len() < self.config.search.min_body_for_search {
            return false;
        }

        let apple = match self.apple {
            Some(apple) => apple,
            None => return false,
        };

        let next = naive.apply(head);
        let apple_cut_off = !edged_region(&next, grid).is_free(&apple);
        if apple_cut_off {
            return true;
        }
        SplitDetector::new(grid).would_split(&next)
    }

    /// Walks the remaining weighted directions looking for any open cell.
    /// Returns the original direction when every way out is blocked; the
    /// caller detects the collision.
    fn correct_blocked(
        &self,
        grid: &AvailabilityGrid,
        head: &Coord,
        blocked: Direction,
    ) -> Direction {
        let target = self.apple.unwrap_or(*head);
        weighted_directions(head, &target)
            .iter()
            .filter(|d| **d != blocked)
            .find(|d| grid.is_free(&d.apply(head)))
            .copied()
            .unwrap_or(blocked)
    }

    fn longest_partial_direction(&self, head: &Coord) -> Option<Direction> {
        self.longest_partial
            .first()
            .and_then(|first| Direction::between(head, first))
    }

    fn note_longest(&mut self, candidate: &[Coord]) {
        if candidate.len() > self.longest_partial.len() {
            self.longest_partial = candidate.to_vec();
        }
    }

    /// A concrete move ends the current search episode.
    fn finish_move(&mut self) {
        self.longest_partial.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn synchronous_config() -> Config {
        let mut config = Config::default_hardcoded();
        config.search.resumable = false;
        config
    }

    #[test]
    fn test_short_snake_goes_straight() {
        let board = Board::from_body(4, vec![Coord::new(0, 0)], 1);
        let mut pilot = Pilot::new(synchronous_config());
        pilot.set_target(Coord::new(3, 3));

        assert_eq!(pilot.decide(&board, None), Decision::Move(Direction::Down));
    }

    #[test]
    fn test_blocked_naive_is_corrected() {
        // Body hangs below the head, so the straight move down is blocked.
        let board = Board::from_body(
            5,
            vec![Coord::new(0, 0), Coord::new(0, 1), Coord::new(1, 1)],
            3,
        );
        let mut pilot = Pilot::new(synchronous_config());
        pilot.set_target(Coord::new(4, 4));

        assert_eq!(pilot.decide(&board, None), Decision::Move(Direction::Right));
    }

    #[test]
    fn test_fully_enclosed_returns_naive() {
        // Head walled into the corner by its own body: the pilot reports the
        // naive direction and the board owner sees the collision.
        let board = Board::from_body(
            5,
            vec![
                Coord::new(0, 0),
                Coord::new(0, 1),
                Coord::new(1, 1),
                Coord::new(1, 0),
            ],
            4,
        );
        let mut pilot = Pilot::new(synchronous_config());
        pilot.set_target(Coord::new(4, 4));

        assert_eq!(pilot.decide(&board, None), Decision::Move(Direction::Down));
    }

    #[test]
    fn test_no_target_picks_any_open_cell() {
        let board = Board::from_body(4, vec![Coord::new(1, 1)], 1);
        let mut pilot = Pilot::new(synchronous_config());

        match pilot.decide(&board, None) {
            Decision::Move(dir) => {
                let next = dir.apply(&board.head());
                assert!(board.in_bounds(&next));
            }
            other => panic!("expected a move, got {:?}", other),
        }
    }
}
