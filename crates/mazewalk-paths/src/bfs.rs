use std::collections::VecDeque;

use mazewalk_core::Position;

use crate::PathRange;
use crate::pathrange::{PathNode, UNREACHABLE};
use crate::traits::Pather;

impl PathRange {
    /// Compute a multi-source breadth-first search distance map.
    ///
    /// Each step has cost 1. Expansion stops when the distance exceeds
    /// `max_dist`. Returns a slice of all reached nodes in discovery order.
    pub fn bfs_map<P: Pather>(
        &mut self,
        pather: &P,
        sources: &[Position],
        max_dist: i32,
    ) -> &[PathNode] {
        self.bfs_map.fill(UNREACHABLE);
        self.bfs_results.clear();

        let mut queue: VecDeque<usize> = VecDeque::new();

        for &src in sources {
            if let Some(si) = self.idx(src) {
                if self.bfs_map[si] != UNREACHABLE {
                    continue;
                }
                self.bfs_map[si] = 0;
                queue.push_back(si);
                self.bfs_results.push(PathNode { pos: src, cost: 0 });
            }
        }

        let mut nbuf = std::mem::take(&mut self.nbuf);

        while let Some(ci) = queue.pop_front() {
            let current_dist = self.bfs_map[ci];
            let cp = self.point(ci);

            nbuf.clear();
            pather.neighbors(cp, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                if self.bfs_map[ni] != UNREACHABLE {
                    continue;
                }
                let nd = current_dist + 1;
                if nd > max_dist {
                    continue;
                }
                self.bfs_map[ni] = nd;
                queue.push_back(ni);
                self.bfs_results.push(PathNode { pos: np, cost: nd });
            }
        }

        self.nbuf = nbuf;
        &self.bfs_results
    }

    /// Query the BFS distance at a specific position.
    ///
    /// Returns [`UNREACHABLE`] if the position is outside the range or was
    /// not reached by the last `bfs_map` call.
    pub fn bfs_at(&self, p: Position) -> i32 {
        match self.idx(p) {
            Some(i) => self.bfs_map[i],
            None => UNREACHABLE,
        }
    }

    /// Whether `to` can be reached from `from` through `pather`'s
    /// neighbor relation. Runs a full BFS from `from`.
    pub fn reachable<P: Pather>(&mut self, pather: &P, from: Position, to: Position) -> bool {
        if self.idx(from).is_none() {
            return false;
        }
        self.bfs_map(pather, &[from], UNREACHABLE - 1);
        self.bfs_at(to) != UNREACHABLE
    }
}
