//! Pathfinding for uniform-cost, 4-connected grids.
//!
//! - **A\*** shortest-path search ([`PathRange::astar_path`])
//! - **BFS** unweighted distance maps ([`PathRange::bfs_map`])
//! - step translation from one cell to the next ([`next_move`])
//!
//! Searches run through [`PathRange`], which owns a node arena indexed by
//! flat cell index. Predecessors are stored as indices into that arena, so
//! path reconstruction is an index walk and repeated queries reuse the
//! same allocation.
//!
//! # Trait hierarchy
//!
//! | Trait | Required for |
//! |---|---|
//! | [`Pather`] | BFS |
//! | [`WeightedPather`] : [`Pather`] | — |
//! | [`AstarPather`] : [`WeightedPather`] | A* |

mod astar;
mod bfs;
mod distance;
mod moves;
mod pathrange;
mod traits;

pub use distance::{euclidean_sq, manhattan};
pub use moves::next_move;
pub use pathrange::{PathNode, PathRange, UNREACHABLE};
pub use traits::{AstarPather, Pather, WeightedPather};
