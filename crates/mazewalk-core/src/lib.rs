//! **mazewalk-core**: shared value types for the mazewalk crates.
//!
//! Geometry ([`Position`], [`Range`]), cardinal [`Direction`]s, and the
//! [`Context`] cancellation token used by background stepping loops.

pub mod context;
pub mod direction;
pub mod geom;

pub use context::Context;
pub use direction::Direction;
pub use geom::{Position, Range, RangeIter};
