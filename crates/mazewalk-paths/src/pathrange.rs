use mazewalk_core::{Position, Range};

/// A position with an associated cost, returned from BFS map queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathNode {
    pub pos: Position,
    pub cost: i32,
}

// ---------------------------------------------------------------------------
// Search node arena
// ---------------------------------------------------------------------------

/// One slot of the A* arena, indexed by flat cell index.
///
/// `parent` is the arena index of the predecessor (`usize::MAX` for the
/// start). Slots whose `generation` differs from the current search are
/// treated as never visited.
#[derive(Clone)]
pub(crate) struct Node {
    pub(crate) g: i32,
    pub(crate) h: i32,
    pub(crate) parent: usize,
    pub(crate) generation: u32,
    pub(crate) open: bool,
}

impl Node {
    #[inline]
    pub(crate) fn f(&self) -> i32 {
        self.g + self.h
    }
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: 0,
            h: 0,
            parent: usize::MAX,
            generation: 0,
            open: false,
        }
    }
}

/// Open-list entry, ordered by `f` then by discovery order.
#[derive(Clone, Copy, Eq, PartialEq)]
pub(crate) struct NodeRef {
    pub(crate) idx: usize,
    pub(crate) f: i32,
    pub(crate) seq: u64,
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reversed so BinaryHeap (max-heap) pops the smallest f first, and
        // among equal f the earliest-discovered entry.
        other.f.cmp(&self.f).then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Sentinel value meaning "unreachable" in BFS maps.
pub const UNREACHABLE: i32 = i32::MAX;

// ---------------------------------------------------------------------------
// PathRange
// ---------------------------------------------------------------------------

/// Central coordinator for pathfinding on a grid rectangle.
///
/// `PathRange` owns the node arena and BFS buffers so that repeated
/// queries on the same map incur no allocations after the first use.
/// Each query is still independent: generation counters invalidate the
/// previous search's nodes in O(1).
pub struct PathRange {
    pub(crate) rng: Range,
    // A* arena
    pub(crate) astar_nodes: Vec<Node>,
    pub(crate) astar_generation: u32,
    pub(crate) max_expansions: Option<usize>,
    // BFS caches
    pub(crate) bfs_map: Vec<i32>,
    pub(crate) bfs_results: Vec<PathNode>,
    // shared scratch buffer for neighbor queries
    pub(crate) nbuf: Vec<Position>,
}

impl PathRange {
    /// Create a new `PathRange` for the given grid rectangle.
    pub fn new(rng: Range) -> Self {
        let len = rng.len();
        Self {
            rng,
            astar_nodes: vec![Node::default(); len],
            astar_generation: 0,
            max_expansions: None,
            bfs_map: vec![UNREACHABLE; len],
            bfs_results: Vec::new(),
            nbuf: Vec::with_capacity(4),
        }
    }

    /// Replace the underlying range.
    ///
    /// If the new size fits within existing capacity only the generation
    /// counter is bumped; otherwise the arena is reallocated.
    pub fn set_range(&mut self, rng: Range) {
        let new_len = rng.len();
        self.rng = rng;
        self.bfs_results.clear();

        if new_len <= self.astar_nodes.len() {
            self.astar_generation = self.astar_generation.wrapping_add(1);
            return;
        }

        self.astar_nodes.clear();
        self.astar_nodes.resize(new_len, Node::default());
        self.astar_generation = 0;

        self.bfs_map.clear();
        self.bfs_map.resize(new_len, UNREACHABLE);
    }

    /// The grid rectangle being used.
    #[inline]
    pub fn range(&self) -> Range {
        self.rng
    }

    /// Cap the number of node expansions per A* query. A search that
    /// exceeds the cap reports "no path". `None` removes the cap.
    pub fn set_max_expansions(&mut self, cap: Option<usize>) {
        self.max_expansions = cap;
    }

    /// Convert a `Position` to a flat index. Returns `None` if out of range.
    #[inline]
    pub(crate) fn idx(&self, p: Position) -> Option<usize> {
        self.rng.index_of(p)
    }

    /// Convert a flat index back to a `Position`.
    #[inline]
    pub(crate) fn point(&self, idx: usize) -> Position {
        self.rng.position_at(idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_range_smaller_preserves_capacity() {
        let mut pr = PathRange::new(Range::new(0, 0, 20, 20));
        let original_cap = pr.astar_nodes.len();

        let small = Range::new(0, 0, 5, 5);
        pr.set_range(small);
        assert_eq!(pr.range(), small);
        assert_eq!(pr.astar_nodes.len(), original_cap);
        assert_eq!(pr.astar_generation, 1);
    }

    #[test]
    fn set_range_larger_reallocates() {
        let mut pr = PathRange::new(Range::new(0, 0, 5, 5));
        let big = Range::new(0, 0, 20, 20);
        pr.set_range(big);
        assert_eq!(pr.range(), big);
        assert_eq!(pr.astar_nodes.len(), 400);
        assert_eq!(pr.bfs_map.len(), 400);
    }

    #[test]
    fn open_list_prefers_low_f_then_fifo() {
        use std::collections::BinaryHeap;

        let mut heap = BinaryHeap::new();
        heap.push(NodeRef { idx: 0, f: 5, seq: 0 });
        heap.push(NodeRef { idx: 1, f: 3, seq: 1 });
        heap.push(NodeRef { idx: 2, f: 3, seq: 2 });
        heap.push(NodeRef { idx: 3, f: 4, seq: 3 });
        let order: Vec<usize> = std::iter::from_fn(|| heap.pop().map(|n| n.idx)).collect();
        assert_eq!(order, vec![1, 2, 3, 0]);
    }
}
