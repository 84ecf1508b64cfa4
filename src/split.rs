// Split detection: would filling a cell disconnect the free region around it?
//
// The check runs in two stages because the full-grid probe is far too costly
// to run on every candidate direction at every search depth. Stage one looks
// only at the 3x3 window around the candidate: filling the center leaves the
// window's region count unchanged exactly when the center's free neighbors
// stay locally connected without it, and a local connection is a real global
// connection, so that case is never a split. Only when the window count
// changes does stage two clone the full grid and flood-fill from one
// representative of each local fragment to see whether the fragments really
// came apart.

use crate::grid::AvailabilityGrid;
use crate::profiler::ProfileGuard;
use crate::region::{all_regions, edged_region};
use crate::types::Coord;

pub struct SplitDetector<'a> {
    grid: &'a AvailabilityGrid,
}

impl<'a> SplitDetector<'a> {
    pub fn new(grid: &'a AvailabilityGrid) -> SplitDetector<'a> {
        SplitDetector { grid }
    }

    /// Predicts whether occupying `position` would break the free region it
    /// belongs to into two or more disconnected pieces.
    ///
    /// Exact with respect to the flood-fill ground truth: the local window
    /// only ever short-circuits cases that provably cannot split, and the
    /// ambiguous cases fall through to real flood fills on a filled copy of
    /// the grid.
    pub fn would_split(&self, position: &Coord) -> bool {
        let _guard = ProfileGuard::new("split_check");

        if !self.grid.is_free(position) {
            return false;
        }

        let center = Coord::new(1, 1);
        let mut window = self.grid.probe_window(position);
        let before = all_regions(&window).len();
        window.set_occupied(&center);
        let fragments = all_regions(&window);

        // Unchanged count: the neighborhood stays connected without the
        // center. Most calls exit here.
        if fragments.len() == before {
            return false;
        }

        // The window fragmented. Check on the full grid whether the
        // fragments that used to share the candidate's region still reach
        // each other once the candidate is filled.
        let pre_fill = edged_region(position, self.grid);
        let mut filled = self.grid.clone();
        filled.set_occupied(position);

        let mut representatives: Vec<Coord> = Vec::new();
        for fragment in &fragments {
            if let Some(local) = fragment.first_free() {
                let global = AvailabilityGrid::unprobe(position, &local);
                if pre_fill.is_free(&global) {
                    representatives.push(global);
                }
            }
        }

        if representatives.len() < 2 {
            return false;
        }

        let anchor_fill = edged_region(&representatives[0], &filled);
        representatives[1..]
            .iter()
            .any(|rep| !anchor_fill.is_free(rep))
    }
}
