use std::collections::BinaryHeap;

use mazewalk_core::Position;

use crate::PathRange;
use crate::pathrange::{Node, NodeRef};
use crate::traits::AstarPather;

impl PathRange {
    /// Compute the shortest path from `from` to `to` using A*.
    ///
    /// Returns the full path (including both endpoints, in traversal order)
    /// or `None` if no path exists within the current range or the
    /// expansion cap was hit. `from == to` is an immediate success with the
    /// one-element path `[from]`.
    ///
    /// A neighbor is (re-)queued only when the new route strictly improves
    /// its best known cost, so every cell is expanded a bounded number of
    /// times and the search terminates on any finite range.
    pub fn astar_path<P: AstarPather>(
        &mut self,
        pather: &P,
        from: Position,
        to: Position,
    ) -> Option<Vec<Position>> {
        if from == to {
            return Some(vec![from]);
        }
        let start_idx = self.idx(from)?;
        let goal_idx = self.idx(to)?;

        self.astar_generation = self.astar_generation.wrapping_add(1);
        if self.astar_generation == 0 {
            // Wrapped: old slots could alias the new generation.
            self.astar_nodes.fill(Node::default());
            self.astar_generation = 1;
        }
        let cur_gen = self.astar_generation;

        {
            let node = &mut self.astar_nodes[start_idx];
            node.g = 0;
            node.h = pather.estimate(from, to);
            node.parent = usize::MAX;
            node.generation = cur_gen;
            node.open = true;
        }

        let mut seq: u64 = 0;
        let mut open: BinaryHeap<NodeRef> = BinaryHeap::new();
        open.push(NodeRef {
            idx: start_idx,
            f: self.astar_nodes[start_idx].f(),
            seq,
        });

        let mut nbuf = std::mem::take(&mut self.nbuf);
        let mut expanded: usize = 0;

        let found = 'search: loop {
            let Some(current) = open.pop() else {
                break 'search false;
            };

            let ci = current.idx;

            // Skip stale entries.
            if self.astar_nodes[ci].generation != cur_gen || !self.astar_nodes[ci].open {
                continue;
            }

            if ci == goal_idx {
                break 'search true;
            }

            expanded += 1;
            if self.max_expansions.is_some_and(|cap| expanded > cap) {
                log::warn!("A* from {from} to {to} gave up after {} expansions", expanded - 1);
                break 'search false;
            }

            self.astar_nodes[ci].open = false;
            let current_g = self.astar_nodes[ci].g;
            let current_point = self.point(ci);

            nbuf.clear();
            pather.neighbors(current_point, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                let tentative_g = current_g + pather.cost(current_point, np);

                let n = &mut self.astar_nodes[ni];
                if n.generation == cur_gen {
                    if tentative_g >= n.g {
                        continue;
                    }
                } else {
                    n.generation = cur_gen;
                    n.h = pather.estimate(np, to);
                }

                n.g = tentative_g;
                n.parent = ci;
                n.open = true;

                seq += 1;
                open.push(NodeRef {
                    idx: ni,
                    f: n.f(),
                    seq,
                });
            }
        };

        self.nbuf = nbuf;

        if !found {
            log::debug!("A* from {from} to {to}: no path ({expanded} expansions)");
            return None;
        }

        let mut path = Vec::new();
        let mut ci = goal_idx;
        while ci != usize::MAX {
            path.push(self.point(ci));
            ci = self.astar_nodes[ci].parent;
        }
        path.reverse();
        log::trace!(
            "A* from {from} to {to}: {} cells, {expanded} expansions",
            path.len()
        );
        Some(path)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use mazewalk_core::Range;
    use rand::prelude::*;

    use super::*;
    use crate::{Pather, UNREACHABLE, WeightedPather, manhattan};

    /// Open rectangle with a set of blocked cells.
    struct Walls {
        rng: Range,
        walls: HashSet<Position>,
    }

    impl Walls {
        fn new(w: i32, h: i32, walls: &[(i32, i32)]) -> Self {
            Self {
                rng: Range::new(0, 0, w, h),
                walls: walls.iter().map(|&p| Position::from(p)).collect(),
            }
        }

        fn passable(&self, p: Position) -> bool {
            self.rng.contains(p) && !self.walls.contains(&p)
        }
    }

    impl Pather for Walls {
        fn neighbors(&self, p: Position, buf: &mut Vec<Position>) {
            buf.extend(p.neighbors_4().into_iter().filter(|&n| self.passable(n)));
        }
    }

    impl WeightedPather for Walls {
        fn cost(&self, _from: Position, _to: Position) -> i32 {
            1
        }
    }

    impl AstarPather for Walls {
        fn estimate(&self, from: Position, to: Position) -> i32 {
            manhattan(from, to)
        }
    }

    fn assert_valid_path(map: &Walls, path: &[Position]) {
        for w in path.windows(2) {
            assert!(w[0].is_adjacent(w[1]), "{} -> {} not adjacent", w[0], w[1]);
            assert!(map.passable(w[1]), "{} is blocked", w[1]);
        }
    }

    #[test]
    fn straight_line() {
        let map = Walls::new(5, 1, &[]);
        let mut pr = PathRange::new(map.rng);
        let path = pr
            .astar_path(&map, Position::new(0, 0), Position::new(4, 0))
            .unwrap();
        assert_eq!(path.len(), 5);
        assert_eq!(path[0], Position::new(0, 0));
        assert_eq!(path[4], Position::new(4, 0));
    }

    #[test]
    fn detours_around_walls() {
        let map = Walls::new(3, 3, &[(1, 0), (1, 2)]);
        let mut pr = PathRange::new(map.rng);
        let path = pr
            .astar_path(&map, Position::new(0, 0), Position::new(2, 0))
            .unwrap();
        let expected: Vec<Position> = [(0, 0), (0, 1), (1, 1), (2, 1), (2, 0)]
            .into_iter()
            .map(Position::from)
            .collect();
        assert_eq!(path, expected);
    }

    #[test]
    fn same_cell_is_trivial_path() {
        let map = Walls::new(3, 3, &[]);
        let mut pr = PathRange::new(map.rng);
        let p = Position::new(1, 1);
        assert_eq!(pr.astar_path(&map, p, p), Some(vec![p]));
    }

    #[test]
    fn walled_off_goal_has_no_path() {
        let map = Walls::new(3, 3, &[(1, 0), (1, 1), (1, 2)]);
        let mut pr = PathRange::new(map.rng);
        assert_eq!(
            pr.astar_path(&map, Position::new(0, 0), Position::new(2, 2)),
            None
        );
    }

    #[test]
    fn out_of_range_endpoints_have_no_path() {
        let map = Walls::new(3, 3, &[]);
        let mut pr = PathRange::new(map.rng);
        assert_eq!(
            pr.astar_path(&map, Position::new(-1, 0), Position::new(2, 2)),
            None
        );
        assert_eq!(
            pr.astar_path(&map, Position::new(0, 0), Position::new(3, 0)),
            None
        );
    }

    #[test]
    fn expansion_cap_reports_no_path() {
        let map = Walls::new(30, 30, &[]);
        let mut pr = PathRange::new(map.rng);
        pr.set_max_expansions(Some(3));
        assert_eq!(
            pr.astar_path(&map, Position::new(0, 0), Position::new(29, 29)),
            None
        );
        pr.set_max_expansions(None);
        let path = pr
            .astar_path(&map, Position::new(0, 0), Position::new(29, 29))
            .unwrap();
        assert_eq!(path.len(), 59);
    }

    #[test]
    fn repeated_queries_are_independent() {
        let map = Walls::new(6, 6, &[(2, 0), (2, 1), (2, 2), (2, 3), (2, 4)]);
        let mut pr = PathRange::new(map.rng);
        let a = pr.astar_path(&map, Position::new(0, 0), Position::new(5, 0));
        let b = pr.astar_path(&map, Position::new(5, 5), Position::new(0, 5));
        let a2 = pr.astar_path(&map, Position::new(0, 0), Position::new(5, 0));
        assert_eq!(a, a2);
        assert_eq!(b.map(|p| p.len()), Some(6));
    }

    #[test]
    fn matches_bfs_distance_on_random_maps() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let w = rng.random_range(2..12);
            let h = rng.random_range(2..12);
            let mut walls = Vec::new();
            for y in 0..h {
                for x in 0..w {
                    if rng.random_bool(0.3) {
                        walls.push((x, y));
                    }
                }
            }
            let map = Walls::new(w, h, &walls);
            let from = Position::new(rng.random_range(0..w), rng.random_range(0..h));
            let to = Position::new(rng.random_range(0..w), rng.random_range(0..h));
            if !map.passable(from) || !map.passable(to) {
                continue;
            }

            let mut pr = PathRange::new(map.rng);
            pr.bfs_map(&map, &[from], UNREACHABLE - 1);
            let dist = pr.bfs_at(to);
            let path = pr.astar_path(&map, from, to);

            match path {
                Some(path) => {
                    assert_eq!(path.len() as i32 - 1, dist);
                    assert_eq!(path.first(), Some(&from));
                    assert_eq!(path.last(), Some(&to));
                    assert_valid_path(&map, &path);
                }
                None => assert_eq!(dist, UNREACHABLE),
            }
        }
    }
}
