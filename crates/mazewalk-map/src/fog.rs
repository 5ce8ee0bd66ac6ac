//! Fog of war: which cells the agent sees now, and which it has seen.
//!
//! Each cell moves through `Unexplored -> Visible -> Explored -> Visible ...`.
//! `Explored` never falls back to `Unexplored` until [`VisibilityTracker::reset`].

use std::fmt;

use mazewalk_core::{Position, Range};
use mazewalk_paths::euclidean_sq;

use crate::grid::Grid;

/// Default sensor radius, in cells.
pub const DEFAULT_VISION_RANGE: i32 = 2;

/// Per-cell exploration state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FogState {
    /// Never seen.
    #[default]
    Unexplored,
    /// Inside the agent's current sensor footprint.
    Visible,
    /// Seen before, not currently in range.
    Explored,
}

impl FogState {
    /// Every variant, in declaration order.
    pub const ALL: [FogState; 3] = [Self::Unexplored, Self::Visible, Self::Explored];

    /// Whether terrain under this state is revealed to the player.
    #[inline]
    pub const fn reveals(self) -> bool {
        !matches!(self, Self::Unexplored)
    }
}

/// Errors from tracker construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FogError {
    /// Width or height was negative.
    InvalidSize { width: i32, height: i32 },
    /// The vision radius was negative.
    NegativeRadius(i32),
}

impl fmt::Display for FogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSize { width, height } => {
                write!(f, "fog: invalid size {width}x{height}")
            }
            Self::NegativeRadius(r) => write!(f, "fog: negative vision radius {r}"),
        }
    }
}

impl std::error::Error for FogError {}

/// Tracks the fog state of every cell of a map-sized area.
///
/// The tracker is independent of the terrain: it only needs the map's
/// dimensions, and walls do not occlude vision. Out-of-bounds queries read
/// as [`FogState::Unexplored`].
#[derive(Debug, Clone)]
pub struct VisibilityTracker {
    bounds: Range,
    radius: i32,
    states: Vec<FogState>,
    /// Indices currently `Visible`. Lets an update demote only the previous
    /// footprint instead of rescanning the whole area.
    lit: Vec<usize>,
}

impl VisibilityTracker {
    /// Create a tracker for a `width` x `height` area with every cell
    /// `Unexplored`.
    pub fn new(width: i32, height: i32, radius: i32) -> Result<Self, FogError> {
        if width < 0 || height < 0 {
            return Err(FogError::InvalidSize { width, height });
        }
        if radius < 0 {
            return Err(FogError::NegativeRadius(radius));
        }
        let bounds = Range::new(0, 0, width, height);
        Ok(Self {
            bounds,
            radius,
            states: vec![FogState::Unexplored; bounds.len()],
            lit: Vec::new(),
        })
    }

    /// Create a tracker covering `grid`.
    pub fn for_grid(grid: &Grid, radius: i32) -> Result<Self, FogError> {
        Self::new(grid.width(), grid.height(), radius)
    }

    /// The tracked area.
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// Move the sensor to `agent`.
    ///
    /// First every `Visible` cell becomes `Explored`, then every in-bounds
    /// cell within Euclidean distance `radius` of `agent` becomes `Visible`,
    /// whatever its previous state. Both phases complete before returning.
    pub fn update_visibility(&mut self, agent: Position) {
        for i in self.lit.drain(..) {
            self.states[i] = FogState::Explored;
        }

        let r_sq = (self.radius as i64) * (self.radius as i64);
        let window = self.bounds.intersect(Range::around(agent, self.radius));
        for p in window.iter() {
            if euclidean_sq(p, agent) > r_sq {
                continue;
            }
            if let Some(i) = self.bounds.index_of(p) {
                self.states[i] = FogState::Visible;
                self.lit.push(i);
            }
        }
        log::trace!(
            "fog update at {agent}: {} visible, {:.1}% explored",
            self.lit.len(),
            self.explored_percent()
        );
    }

    /// State of the cell at `p`. Out of bounds reads as `Unexplored`.
    #[inline]
    pub fn fog_state(&self, p: Position) -> FogState {
        match self.bounds.index_of(p) {
            Some(i) => self.states[i],
            None => FogState::Unexplored,
        }
    }

    /// Coordinate form of [`fog_state`](Self::fog_state).
    #[inline]
    pub fn get_fog_state(&self, x: i32, y: i32) -> FogState {
        self.fog_state(Position::new(x, y))
    }

    /// Whether the cell's terrain is revealed: `Visible` or `Explored`.
    #[inline]
    pub fn is_visible(&self, x: i32, y: i32) -> bool {
        self.get_fog_state(x, y).reveals()
    }

    /// Whether the cell is inside the current sensor footprint.
    #[inline]
    pub fn in_view(&self, p: Position) -> bool {
        self.fog_state(p) == FogState::Visible
    }

    /// Number of cells in `state`.
    pub fn count(&self, state: FogState) -> usize {
        self.states.iter().filter(|&&s| s == state).count()
    }

    /// Percentage (0–100) of cells that are not `Unexplored`. Zero-area
    /// trackers report 0.
    pub fn explored_percent(&self) -> f32 {
        let total = self.states.len();
        if total == 0 {
            return 0.0;
        }
        let seen = total - self.count(FogState::Unexplored);
        seen as f32 / total as f32 * 100.0
    }

    /// Forget everything: all cells back to `Unexplored`.
    pub fn reset(&mut self) {
        self.states.fill(FogState::Unexplored);
        self.lit.clear();
    }
}

#[cfg(test)]
mod tests {
    use rand::prelude::*;

    use super::*;

    fn visible_set(t: &VisibilityTracker) -> Vec<Position> {
        t.bounds()
            .iter()
            .filter(|&p| t.fog_state(p) == FogState::Visible)
            .collect()
    }

    #[test]
    fn starts_unexplored() {
        let t = VisibilityTracker::new(4, 4, 2).unwrap();
        assert_eq!(t.count(FogState::Unexplored), 16);
        assert_eq!(t.explored_percent(), 0.0);
    }

    #[test]
    fn construction_errors() {
        assert_eq!(
            VisibilityTracker::new(3, 3, -1).unwrap_err(),
            FogError::NegativeRadius(-1)
        );
        assert_eq!(
            VisibilityTracker::new(3, -3, 2).unwrap_err(),
            FogError::InvalidSize {
                width: 3,
                height: -3
            }
        );
    }

    #[test]
    fn zero_area_reports_zero_percent() {
        let mut t = VisibilityTracker::new(0, 5, 2).unwrap();
        t.update_visibility(Position::new(0, 0));
        assert_eq!(t.explored_percent(), 0.0);
    }

    #[test]
    fn circular_footprint_radius_two() {
        let mut t = VisibilityTracker::new(5, 5, 2).unwrap();
        t.update_visibility(Position::new(2, 2));

        // dx² + dy² <= 4: the centre, 4 cells at distance 1, 4 diagonals at
        // √2 and 4 axis cells at distance 2.
        assert_eq!(t.count(FogState::Visible), 13);
        assert!(t.is_visible(2, 0));
        assert!(t.is_visible(1, 1));
        assert!(!t.is_visible(1, 0), "√5 > 2");
        assert!(!t.is_visible(0, 0), "√8 > 2");
        assert!((t.explored_percent() - 52.0).abs() < 1e-4);
    }

    #[test]
    fn whole_five_by_five_with_radius_three() {
        let mut t = VisibilityTracker::new(5, 5, 3).unwrap();
        t.update_visibility(Position::new(2, 2));
        for p in t.bounds().iter() {
            assert!(t.is_visible(p.x, p.y), "{p} should be visible");
        }
        assert_eq!(t.explored_percent(), 100.0);
    }

    #[test]
    fn radius_zero_sees_only_own_cell() {
        let mut t = VisibilityTracker::new(3, 3, 0).unwrap();
        t.update_visibility(Position::new(1, 1));
        assert_eq!(visible_set(&t), vec![Position::new(1, 1)]);
    }

    #[test]
    fn moving_demotes_then_promotes() {
        let mut t = VisibilityTracker::new(10, 1, 1).unwrap();
        t.update_visibility(Position::new(1, 0));
        assert_eq!(t.get_fog_state(0, 0), FogState::Visible);

        t.update_visibility(Position::new(2, 0));
        assert_eq!(t.get_fog_state(0, 0), FogState::Explored);
        assert_eq!(t.get_fog_state(1, 0), FogState::Visible);
        assert_eq!(t.get_fog_state(2, 0), FogState::Visible);
        assert_eq!(t.get_fog_state(3, 0), FogState::Visible);
        assert_eq!(t.get_fog_state(4, 0), FogState::Unexplored);

        // Coming back re-lights remembered cells.
        t.update_visibility(Position::new(1, 0));
        assert_eq!(t.get_fog_state(0, 0), FogState::Visible);
        assert_eq!(t.get_fog_state(3, 0), FogState::Explored);
        assert!(t.in_view(Position::new(2, 0)));
        assert!(!t.in_view(Position::new(3, 0)));
    }

    #[test]
    fn same_position_twice_stays_visible() {
        let mut t = VisibilityTracker::new(5, 5, 1).unwrap();
        let p = Position::new(2, 2);
        t.update_visibility(p);
        t.update_visibility(p);
        assert_eq!(t.fog_state(p), FogState::Visible);
        assert_eq!(t.count(FogState::Explored), 0);
    }

    #[test]
    fn agent_near_or_outside_edges() {
        let mut t = VisibilityTracker::new(4, 4, 2).unwrap();
        t.update_visibility(Position::new(0, 0));
        assert_eq!(t.count(FogState::Visible), 6);

        t.update_visibility(Position::new(-3, -3));
        assert_eq!(t.count(FogState::Visible), 0);
        assert_eq!(t.count(FogState::Explored), 6);
    }

    #[test]
    fn huge_radius_covers_the_map() {
        let mut t = VisibilityTracker::new(5, 5, i32::MAX).unwrap();
        t.update_visibility(Position::new(2, 2));
        assert_eq!(t.count(FogState::Visible), 25);
        assert_eq!(t.explored_percent(), 100.0);
    }

    #[test]
    fn agent_at_coordinate_limits() {
        let mut t = VisibilityTracker::new(5, 5, 2).unwrap();
        t.update_visibility(Position::new(i32::MAX, 0));
        assert_eq!(t.count(FogState::Visible), 0);
        t.update_visibility(Position::new(i32::MIN, i32::MIN));
        assert_eq!(t.count(FogState::Visible), 0);

        let mut wide = VisibilityTracker::new(5, 5, i32::MAX).unwrap();
        wide.update_visibility(Position::new(i32::MIN, 2));
        assert_eq!(wide.count(FogState::Visible), 0);
        wide.update_visibility(Position::new(-3, 2));
        assert_eq!(wide.count(FogState::Visible), 25);
    }

    #[test]
    fn out_of_bounds_is_unexplored() {
        let mut t = VisibilityTracker::new(3, 3, 5).unwrap();
        t.update_visibility(Position::new(1, 1));
        assert_eq!(t.get_fog_state(-1, 0), FogState::Unexplored);
        assert_eq!(t.get_fog_state(3, 3), FogState::Unexplored);
        assert!(!t.is_visible(-1, 0));
    }

    #[test]
    fn reset_forgets_everything() {
        let mut t = VisibilityTracker::new(5, 5, 2).unwrap();
        t.update_visibility(Position::new(2, 2));
        t.update_visibility(Position::new(0, 0));
        t.reset();
        assert_eq!(t.count(FogState::Unexplored), 25);

        // No stale footprint survives the reset.
        t.update_visibility(Position::new(4, 4));
        assert_eq!(t.count(FogState::Explored), 0);
    }

    /// Full-grid two-phase update, used as the behavioural reference.
    fn reference_update(states: &mut [FogState], w: i32, h: i32, r: i32, agent: Position) {
        for s in states.iter_mut() {
            if *s == FogState::Visible {
                *s = FogState::Explored;
            }
        }
        for y in 0..h {
            for x in 0..w {
                let (dx, dy) = ((x - agent.x) as f64, (y - agent.y) as f64);
                if (dx * dx + dy * dy).sqrt() <= r as f64 {
                    states[(y * w + x) as usize] = FogState::Visible;
                }
            }
        }
    }

    #[test]
    fn random_walks_match_reference_and_never_forget() {
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..40 {
            let (w, h) = (rng.random_range(1..15), rng.random_range(1..15));
            let r = rng.random_range(0..5);
            let mut t = VisibilityTracker::new(w, h, r).unwrap();
            let mut reference = vec![FogState::Unexplored; (w * h) as usize];
            let mut last_pct = 0.0;

            for _ in 0..30 {
                let agent = Position::new(rng.random_range(-2..w + 2), rng.random_range(-2..h + 2));
                let before: Vec<FogState> = t.bounds().iter().map(|p| t.fog_state(p)).collect();

                t.update_visibility(agent);
                reference_update(&mut reference, w, h, r, agent);

                for (i, p) in t.bounds().iter().enumerate() {
                    let now = t.fog_state(p);
                    assert_eq!(now, reference[i], "{p} after moving to {agent}");
                    if before[i].reveals() {
                        assert!(now.reveals(), "{p} was forgotten");
                    }
                }
                let pct = t.explored_percent();
                assert!(pct >= last_pct);
                last_pct = pct;
            }
        }
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn fog_state_round_trip() {
        for s in FogState::ALL {
            let json = serde_json::to_string(&s).unwrap();
            assert_eq!(serde_json::from_str::<FogState>(&json).unwrap(), s);
        }
    }
}
