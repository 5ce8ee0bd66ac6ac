//! Session tuning knobs.

use std::time::Duration;

use mazewalk_map::fog::DEFAULT_VISION_RANGE;

/// Health a new player starts with.
pub const MAX_HEALTH: i32 = 100;

/// Damage dealt by stepping on a trap.
pub const TRAP_DAMAGE: i32 = 30;

/// Configuration for creating a [`Session`](crate::Session).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub max_health: i32,
    pub trap_damage: i32,
    /// Fog-of-war sensor radius. Must not be negative.
    pub vision_range: i32,
    /// Whether fog of war is on when the session starts.
    pub fog_enabled: bool,
    /// Pause between automatic steps.
    pub auto_move_delay: Duration,
    /// A* expansion cap; `None` searches the whole map.
    pub max_expansions: Option<usize>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_health: MAX_HEALTH,
            trap_damage: TRAP_DAMAGE,
            vision_range: DEFAULT_VISION_RANGE,
            fog_enabled: false,
            auto_move_delay: Duration::from_millis(300),
            max_expansions: None,
        }
    }
}
