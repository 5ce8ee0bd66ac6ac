//! Shortest-path navigation over a [`Grid`].

use mazewalk_core::{Direction, Position};
use mazewalk_paths::{AstarPather, PathRange, Pather, WeightedPather, manhattan, next_move};

use crate::grid::Grid;

// Movement is 4-directional with uniform cost; any non-wall cell inside the
// grid is passable.
impl Pather for Grid {
    fn neighbors(&self, p: Position, buf: &mut Vec<Position>) {
        for n in p.neighbors_4() {
            if self.contains(n) && self.at(n).passable() {
                buf.push(n);
            }
        }
    }
}

impl WeightedPather for Grid {
    fn cost(&self, _from: Position, _to: Position) -> i32 {
        1
    }
}

impl AstarPather for Grid {
    fn estimate(&self, from: Position, to: Position) -> i32 {
        manhattan(from, to)
    }
}

/// A* path queries against a borrowed grid.
///
/// The pathfinder keeps only search scratch space between calls; the grid
/// is passed to every query, so terrain edits made between queries are
/// always seen.
pub struct Pathfinder {
    range: PathRange,
}

impl Pathfinder {
    /// Create a pathfinder sized for `grid`.
    pub fn new(grid: &Grid) -> Self {
        Self {
            range: PathRange::new(grid.bounds()),
        }
    }

    /// Cap node expansions per query. See [`PathRange::set_max_expansions`].
    pub fn with_max_expansions(mut self, cap: Option<usize>) -> Self {
        self.range.set_max_expansions(cap);
        self
    }

    /// Optimal (minimum step count) path from `start` to `end` on `grid`,
    /// both endpoints included, in traversal order.
    ///
    /// An empty vector means `end` is unreachable. `start == end` returns
    /// `[start]`.
    pub fn find_path(&mut self, grid: &Grid, start: Position, end: Position) -> Vec<Position> {
        if self.range.range() != grid.bounds() {
            self.range.set_range(grid.bounds());
        }
        let path = self
            .range
            .astar_path(grid, start, end)
            .unwrap_or_default();
        log::debug!(
            "path {start} -> {end} on {:?}: {} cells",
            grid.name(),
            path.len()
        );
        path
    }

    /// Direction from `current` toward `target`, horizontal axis first.
    /// See [`mazewalk_paths::next_move`].
    #[inline]
    pub fn next_move(&self, current: Position, target: Position) -> Direction {
        next_move(current, target)
    }
}
