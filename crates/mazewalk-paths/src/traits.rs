use mazewalk_core::Position;

/// Minimal pathfinding interface: neighbor enumeration.
pub trait Pather {
    /// Append the passable neighbors of `p` into `buf`. The caller clears
    /// `buf` before calling.
    fn neighbors(&self, p: Position, buf: &mut Vec<Position>);
}

/// Pather with weighted (positive-cost) edges.
pub trait WeightedPather: Pather {
    /// Cost of moving from `from` to adjacent `to`. Must be > 0.
    fn cost(&self, from: Position, to: Position) -> i32;
}

/// Full A* pather with an admissible heuristic.
pub trait AstarPather: WeightedPather {
    /// Heuristic estimate of distance from `from` to `to`.
    /// Must never overestimate the true cost (admissible).
    fn estimate(&self, from: Position, to: Position) -> i32;
}
