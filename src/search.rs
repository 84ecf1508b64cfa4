// Resumable depth-first cycle search.
//
// The search tries to extend a self-avoiding path from the snake's head into
// a route long enough to be safe, ideally covering the whole reachable
// region. Backtracking over a shared mutable grid follows a strict stack
// discipline: every provisional add (path push, membership insert, grid
// occupy) has exactly one matching rollback.
//
// Because a full backtracking pass cannot finish inside one tick once the
// snake is long, the search can suspend: when resumption is enabled it stops
// at the first recursion depth that has no recorded branch choice, records
// the choice it is about to take, and hands the cursor back to the caller.
// Re-running with that cursor on an identical grid replays the recorded
// prefix deterministically and continues exactly where it left off.

use std::collections::HashSet;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::grid::AvailabilityGrid;
use crate::ranker::DirectionRanker;
use crate::region::edged_region;
use crate::types::{weighted_directions, Coord, Direction};

/// Serializable cursor for a suspended search: one chosen-branch index per
/// recursion depth, index 0 being the top-level direction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeCursor {
    choices: Vec<usize>,
}

impl ResumeCursor {
    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.choices.len()
    }

    /// The branch recorded at `depth`, if the previous run got that far.
    fn branch_at(&self, depth: usize) -> Option<usize> {
        self.choices.get(depth).copied()
    }

    /// Records the branch taken at `depth`. Only ever appends at the
    /// frontier.
    fn record(&mut self, depth: usize, branch: usize) {
        debug_assert_eq!(depth, self.choices.len());
        self.choices.push(branch);
    }

    /// Forgets `depth` and everything deeper, after that subtree failed.
    fn unwind(&mut self, depth: usize) {
        self.choices.truncate(depth);
    }

    /// Restarts the cursor at a new top-level direction.
    fn restart(&mut self, branch: usize) {
        self.choices.clear();
        self.choices.push(branch);
    }
}

/// What a single `solve` call produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// A complete solution; move in this direction.
    Solved(Direction),
    /// The search paused at its yield point; call `solve` again with the
    /// same cursor (and an unchanged board) to continue.
    Suspended,
    /// Every top-level direction failed. The caller should fall back to the
    /// longest partial path, then to the naive direction.
    Exhausted,
}

enum StepResult {
    Done,
    Suspend,
    Dead,
}

/// One tick's search over a snapshot of the availability grid.
pub struct CycleSearch {
    base: AvailabilityGrid,
    working: AvailabilityGrid,
    head: Coord,
    apple: Coord,
    body_len: usize,
    fit_margin: usize,
    resumable: bool,

    path: Vec<Coord>,
    added: HashSet<Coord>,
    seen_regions: HashSet<u64>,
    desired_len: usize,
    longest: Vec<Coord>,
}

impl CycleSearch {
    /// `grid` is the tick's snapshot; the head cell is expected to be
    /// occupied in it, like the rest of the body.
    pub fn new(
        grid: AvailabilityGrid,
        head: Coord,
        apple: Coord,
        body_len: usize,
        fit_margin: usize,
        resumable: bool,
    ) -> CycleSearch {
        let working = grid.clone();
        CycleSearch {
            base: grid,
            working,
            head,
            apple,
            body_len,
            fit_margin,
            resumable,
            path: Vec::new(),
            added: HashSet::new(),
            seen_regions: HashSet::new(),
            desired_len: 0,
            longest: Vec::new(),
        }
    }

    /// The path as of the last `solve` call: the winning route after
    /// `Solved`, the frontier after `Suspended`.
    pub fn path(&self) -> &[Coord] {
        &self.path
    }

    /// The longest partial path seen across every attempt so far.
    pub fn longest(&self) -> &[Coord] {
        &self.longest
    }

    /// Runs (or resumes) the search. Top-level candidate directions come
    /// from the ranker; each gets a fresh working grid, path, and region
    /// memo, with the desired path length set to the size of the region
    /// reachable through that first step.
    pub fn solve(&mut self, cursor: &mut ResumeCursor) -> SearchOutcome {
        // A resumed call must rank against the same pristine grid the
        // original call saw, or the cursor's branch indexes stop lining up.
        self.working = self.base.clone();

        let mut directions: Vec<Direction> =
            weighted_directions(&self.head, &self.apple).to_vec();
        self.ranker().rank(&mut directions, &self.head);

        let start = cursor.branch_at(0).unwrap_or(0);
        for branch in start..directions.len() {
            if cursor.branch_at(0) != Some(branch) {
                cursor.restart(branch);
            }

            let first = directions[branch].apply(&self.head);
            if !self.base.is_free(&first) {
                continue;
            }

            self.working = self.base.clone();
            let region = edged_region(&first, &self.working);
            self.desired_len = region.free_count();

            self.path = vec![first];
            self.added.clear();
            self.added.insert(first);
            self.seen_regions.clear();
            self.working.set_occupied(&first);
            self.note_longest();

            match self.extend(directions[branch], 1, cursor) {
                StepResult::Done => {
                    debug!(
                        "search solved: dir={} path_len={} desired={}",
                        directions[branch].as_str(),
                        self.path.len(),
                        self.desired_len
                    );
                    return SearchOutcome::Solved(directions[branch]);
                }
                StepResult::Suspend => return SearchOutcome::Suspended,
                StepResult::Dead => {}
            }
        }

        debug!(
            "search exhausted: longest partial path {} cells",
            self.longest.len()
        );
        SearchOutcome::Exhausted
    }

    fn ranker(&self) -> DirectionRanker<'_> {
        DirectionRanker::new(&self.working, self.apple, self.body_len, self.fit_margin)
    }

    /// Recursive step. The path tip is already pushed, marked, and occupied
    /// when this is called.
    fn extend(&mut self, arrived_by: Direction, depth: usize, cursor: &mut ResumeCursor) -> StepResult {
        let tip = *self.path.last().unwrap();

        // Prune if this exact region shape already came up in this attempt.
        let region_hash = self.tip_region_hash(&tip);
        if !self.seen_regions.insert(region_hash) {
            return StepResult::Dead;
        }

        // Covered the whole reachable region, or already long enough that
        // the snake provably cannot trap itself on it.
        if self.path.len() == self.desired_len || self.path.len() > self.body_len + 1 {
            return StepResult::Done;
        }

        // Candidates: everything but the way we came, weighted toward the
        // path's own origin so the route tends to close into a cycle, then
        // flipped so it hugs the far edges first, then ranked.
        let origin = self.path[0];
        let mut directions: Vec<Direction> = weighted_directions(&tip, &origin)
            .iter()
            .filter(|d| **d != arrived_by.reverse())
            .filter(|d| self.working.is_free(&d.apply(&tip)))
            .copied()
            .collect();
        directions.reverse();
        self.ranker().rank(&mut directions, &tip);

        let start = cursor.branch_at(depth).unwrap_or(0);
        for branch in start..directions.len() {
            let next = directions[branch].apply(&tip);
            if self.added.contains(&next) || !self.working.is_free(&next) {
                continue;
            }

            self.path.push(next);
            self.added.insert(next);
            self.working.set_occupied(&next);
            self.note_longest();

            // Cross-tick yield point: a depth we have never recorded a
            // choice for means we are at the frontier.
            if self.resumable && cursor.branch_at(depth).is_none() {
                cursor.record(depth, branch);
                return StepResult::Suspend;
            }

            match self.extend(directions[branch], depth + 1, cursor) {
                StepResult::Done => return StepResult::Done,
                StepResult::Suspend => return StepResult::Suspend,
                StepResult::Dead => {}
            }

            // Rollback mirrors the provisional add exactly.
            self.path.pop();
            self.added.remove(&next);
            self.working.set_free(&next);
            cursor.unwind(depth);
        }

        StepResult::Dead
    }

    /// Structural hash of the region reachable from the tip. The tip cell is
    /// provisionally occupied; lift it for the fill so the region is seeded
    /// from the cell the path stands on.
    fn tip_region_hash(&mut self, tip: &Coord) -> u64 {
        self.working.set_free(tip);
        let region = edged_region(tip, &self.working);
        self.working.set_occupied(tip);
        region.structural_hash()
    }

    fn note_longest(&mut self) {
        if self.path.len() > self.longest.len() {
            self.longest = self.path.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_self_avoiding(path: &[Coord]) {
        let mut seen = HashSet::new();
        for coord in path {
            assert!(seen.insert(*coord), "path revisits {:?}", coord);
        }
        for pair in path.windows(2) {
            assert!(
                pair[0].is_adjacent(&pair[1]),
                "path jumps from {:?} to {:?}",
                pair[0],
                pair[1]
            );
        }
    }

    /// Snapshot with a 3-cell snake lying along the top of a 4x4 grid.
    fn small_snapshot() -> (AvailabilityGrid, Coord) {
        let mut grid = AvailabilityGrid::open(4);
        let head = Coord::new(2, 0);
        grid.set_occupied(&head);
        grid.set_occupied(&Coord::new(1, 0));
        grid.set_occupied(&Coord::new(0, 0));
        (grid, head)
    }

    #[test]
    fn test_synchronous_search_finds_a_route() {
        let (grid, head) = small_snapshot();
        let mut search = CycleSearch::new(grid, head, Coord::new(3, 3), 3, 1, false);
        let mut cursor = ResumeCursor::default();

        match search.solve(&mut cursor) {
            SearchOutcome::Solved(dir) => {
                assert_eq!(dir.apply(&head), search.path()[0]);
                assert!(search.path().len() > 3 + 1);
                assert_self_avoiding(search.path());
            }
            other => panic!("expected a solution, got {:?}", other),
        }
    }

    #[test]
    fn test_path_starts_adjacent_to_head() {
        let (grid, head) = small_snapshot();
        let mut search = CycleSearch::new(grid, head, Coord::new(3, 3), 3, 1, false);
        let mut cursor = ResumeCursor::default();
        search.solve(&mut cursor);
        assert!(head.is_adjacent(&search.path()[0]));
    }

    #[test]
    fn test_resumable_search_reaches_same_answer() {
        let (grid, head) = small_snapshot();

        let mut sync_search =
            CycleSearch::new(grid.clone(), head, Coord::new(3, 3), 3, 1, false);
        let mut sync_cursor = ResumeCursor::default();
        let expected = sync_search.solve(&mut sync_cursor);

        let mut cursor = ResumeCursor::default();
        let mut steps = 0;
        let resumed = loop {
            // A fresh search per call, the way a new tick would rebuild it.
            let mut search =
                CycleSearch::new(grid.clone(), head, Coord::new(3, 3), 3, 1, true);
            match search.solve(&mut cursor) {
                SearchOutcome::Suspended => {
                    steps += 1;
                    assert!(steps < 10_000, "search never finished");
                    assert_self_avoiding(search.path());
                }
                done => break done,
            }
        };

        assert_eq!(resumed, expected);
        assert!(steps > 0, "resumable search should have suspended");
    }

    #[test]
    fn test_enclosed_head_exhausts() {
        // Head boxed into a corner by its own body.
        let mut grid = AvailabilityGrid::open(4);
        let head = Coord::new(0, 0);
        grid.set_occupied(&head);
        grid.set_occupied(&Coord::new(1, 0));
        grid.set_occupied(&Coord::new(0, 1));
        grid.set_occupied(&Coord::new(1, 1));

        let mut search = CycleSearch::new(grid, head, Coord::new(3, 3), 4, 1, false);
        let mut cursor = ResumeCursor::default();
        assert_eq!(search.solve(&mut cursor), SearchOutcome::Exhausted);
        assert!(search.longest().is_empty());
    }

    #[test]
    fn test_cursor_records_and_unwinds() {
        let mut cursor = ResumeCursor::default();
        assert!(cursor.is_empty());
        cursor.record(0, 2);
        cursor.record(1, 0);
        assert_eq!(cursor.depth(), 2);
        assert_eq!(cursor.branch_at(1), Some(0));
        cursor.unwind(1);
        assert_eq!(cursor.depth(), 1);
        cursor.restart(1);
        assert_eq!(cursor.branch_at(0), Some(1));
        assert_eq!(cursor.depth(), 1);
    }
}
