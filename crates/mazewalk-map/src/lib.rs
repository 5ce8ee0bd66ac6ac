//! Tile maps for mazewalk: terrain grid, navigation, fog of war.
//!
//! [`Grid`] is the single owner of terrain. [`Pathfinder`] and
//! [`VisibilityTracker`] only borrow it for the duration of a query and do
//! not depend on each other, so terrain may change (a trap firing) between
//! queries without invalidating either.

pub mod fog;
pub mod grid;
pub mod nav;
pub mod presets;

pub use fog::{FogError, FogState, VisibilityTracker};
pub use grid::{Cell, Grid, GridError};
pub use nav::Pathfinder;
