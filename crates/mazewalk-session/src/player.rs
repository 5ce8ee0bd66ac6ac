//! The walking agent.

use mazewalk_core::{Direction, Position};
use mazewalk_map::Grid;

/// Position, health and step count of the agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    position: Position,
    health: i32,
    max_health: i32,
    steps: u32,
}

impl Player {
    /// A player at `position` with full health.
    pub fn new(position: Position, max_health: i32) -> Self {
        Self {
            position,
            health: max_health,
            max_health,
            steps: 0,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn max_health(&self) -> i32 {
        self.max_health
    }

    /// Successful moves so far.
    pub fn steps(&self) -> u32 {
        self.steps
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Health as a percentage of the maximum.
    pub fn health_percent(&self) -> f32 {
        if self.max_health <= 0 {
            return 0.0;
        }
        self.health as f32 / self.max_health as f32 * 100.0
    }

    /// Move one cell in `dir` if the destination is inside `grid` and not a
    /// wall. Returns whether the player moved. `Stay` never moves.
    pub fn move_in(&mut self, dir: Direction, grid: &Grid) -> bool {
        if dir == Direction::Stay {
            return false;
        }
        let next = self.position.step(dir);
        if !grid.contains(next) || !grid.at(next).passable() {
            return false;
        }
        self.position = next;
        self.steps += 1;
        true
    }

    /// Lose `amount` health, never dropping below zero.
    pub fn take_damage(&mut self, amount: i32) {
        self.health = (self.health - amount).max(0);
    }

    /// Regain `amount` health, never exceeding the maximum.
    pub fn heal(&mut self, amount: i32) {
        self.health = (self.health + amount).min(self.max_health);
    }
}
