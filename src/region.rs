// Region analysis: flood fill over the availability grid.
//
// An edged region is the connected patch of free cells reachable from a seed,
// together with the ring of non-free cells immediately around it. Regions are
// stored in a BTreeMap so that iteration order, representative cells, and the
// structural hash are all independent of hashing state; the decision engine
// must be deterministic for a given grid.

use std::collections::hash_map::DefaultHasher;
use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

use crate::grid::AvailabilityGrid;
use crate::profiler::ProfileGuard;
use crate::types::{Coord, Direction};

/// A flood-filled connected free area plus its immediate non-free boundary.
///
/// `true` entries are reachable free cells; `false` entries are the edge
/// cells the fill stopped at. Cells the fill never saw are absent.
#[derive(Debug, Clone, Default)]
pub struct EdgedRegion {
    cells: BTreeMap<Coord, bool>,
}

impl EdgedRegion {
    /// True when `coord` is a reachable free cell of this region.
    pub fn is_free(&self, coord: &Coord) -> bool {
        self.cells.get(coord).copied().unwrap_or(false)
    }

    /// True when the fill visited `coord` at all, as interior or edge.
    pub fn contains(&self, coord: &Coord) -> bool {
        self.cells.contains_key(coord)
    }

    /// Number of reachable free cells.
    pub fn free_count(&self) -> usize {
        self.cells.values().filter(|free| **free).count()
    }

    /// The first free cell in scan order, if the region has any.
    pub fn first_free(&self) -> Option<Coord> {
        self.cells
            .iter()
            .find(|(_, free)| **free)
            .map(|(coord, _)| *coord)
    }

    pub fn free_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        self.cells
            .iter()
            .filter(|(_, free)| **free)
            .map(|(coord, _)| *coord)
    }

    /// Hash of the region's exact shape, interior and edges included.
    ///
    /// Two fills that saw the same cells with the same roles hash equal, so
    /// the search can recognize a repeated state.
    pub fn structural_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        for (coord, free) in &self.cells {
            coord.hash(&mut hasher);
            free.hash(&mut hasher);
        }
        hasher.finish()
    }
}

/// Flood-fills the region reachable from `seed` on `grid`.
///
/// A non-free seed yields a region holding only the seed as an edge, which
/// keeps callers free of special cases: "is the apple in the region I am
/// stepping into" works even when the step itself is blocked.
pub fn edged_region(seed: &Coord, grid: &AvailabilityGrid) -> EdgedRegion {
    let _guard = ProfileGuard::new("flood_fill");

    let mut cells = BTreeMap::new();
    let mut stack = vec![*seed];

    while let Some(coord) = stack.pop() {
        if cells.contains_key(&coord) {
            continue;
        }
        if !grid.is_free(&coord) {
            cells.insert(coord, false);
            continue;
        }
        cells.insert(coord, true);
        for dir in Direction::all().iter() {
            stack.push(dir.apply(&coord));
        }
    }

    EdgedRegion { cells }
}

/// Partitions every free cell of the grid into disjoint edged regions.
///
/// Scans in row-major order and fills from each free cell not yet claimed by
/// an earlier region, so the result is deterministic and the union of the
/// regions' free cells is exactly the set of free cells on the grid.
pub fn all_regions(grid: &AvailabilityGrid) -> Vec<EdgedRegion> {
    let mut regions: Vec<EdgedRegion> = Vec::new();
    let mut claimed = vec![false; (grid.size() * grid.size()) as usize];

    for y in 0..grid.size() {
        for x in 0..grid.size() {
            let coord = Coord::new(x, y);
            if !grid.is_free(&coord) || claimed[(y * grid.size() + x) as usize] {
                continue;
            }
            let region = edged_region(&coord, grid);
            for free in region.free_cells() {
                claimed[(free.y * grid.size() + free.x) as usize] = true;
            }
            regions.push(region);
        }
    }

    regions
}
