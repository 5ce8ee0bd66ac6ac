//! One play-through of a map: the player walks, traps bite, fog lifts.

use std::fmt;

use mazewalk_core::{Direction, Position};
use mazewalk_map::{Cell, FogError, Grid, Pathfinder, VisibilityTracker, presets};

use crate::config::SessionConfig;
use crate::gamelog::{GameLog, LogStyle};
use crate::player::Player;

/// Errors from session setup and control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The session was created without any map.
    NoMaps,
    /// A map index past the end of the map list.
    UnknownMap(usize),
    /// The auto-play worker panicked while holding the session.
    Poisoned,
    Fog(FogError),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoMaps => f.write_str("session: no maps"),
            Self::UnknownMap(i) => write!(f, "session: unknown map {i}"),
            Self::Poisoned => f.write_str("session: lock poisoned"),
            Self::Fog(e) => write!(f, "session: {e}"),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Fog(e) => Some(e),
            _ => None,
        }
    }
}

impl From<FogError> for SessionError {
    fn from(e: FogError) -> Self {
        Self::Fog(e)
    }
}

/// Overall state of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Outcome {
    #[default]
    Playing,
    Won,
    Lost,
}

/// What a single step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The move was refused (wall, map edge or `Stay`).
    Blocked,
    Moved,
    /// The player stepped on a trap and survived.
    Trap { damage: i32 },
    Won,
    Lost,
    /// The game was already over; nothing happened.
    Finished,
}

impl StepOutcome {
    /// Whether this step ended the game.
    pub fn is_final(self) -> bool {
        matches!(self, Self::Won | Self::Lost | Self::Finished)
    }
}

/// A playable session over a list of maps.
///
/// The selected map is copied from the list on every [`start`](Self::start),
/// so traps disarmed during one play-through are back for the next.
pub struct Session {
    config: SessionConfig,
    maps: Vec<Grid>,
    selected: usize,
    map: Grid,
    player: Player,
    fog_enabled: bool,
    fog: Option<VisibilityTracker>,
    pathfinder: Pathfinder,
    path: Vec<Position>,
    // Index of the next path cell to walk to.
    cursor: usize,
    outcome: Outcome,
    log: GameLog,
}

impl Session {
    /// Create a session on the first of `maps` and start it.
    pub fn new(config: SessionConfig, maps: Vec<Grid>) -> Result<Self, SessionError> {
        let Some(first) = maps.first() else {
            return Err(SessionError::NoMaps);
        };
        if config.vision_range < 0 {
            return Err(FogError::NegativeRadius(config.vision_range).into());
        }
        let map = first.clone();
        let pathfinder = Pathfinder::new(&map).with_max_expansions(config.max_expansions);
        let mut session = Self {
            player: Player::new(Position::ZERO, config.max_health),
            fog_enabled: config.fog_enabled,
            config,
            maps,
            selected: 0,
            map,
            fog: None,
            pathfinder,
            path: Vec::new(),
            cursor: 0,
            outcome: Outcome::Playing,
            log: GameLog::new(),
        };
        session.start()?;
        Ok(session)
    }

    /// A session over the built-in preset maps.
    pub fn with_presets(config: SessionConfig) -> Result<Self, SessionError> {
        Self::new(config, presets::all())
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The map being played, including any traps already sprung.
    pub fn map(&self) -> &Grid {
        &self.map
    }

    pub fn map_names(&self) -> impl Iterator<Item = &str> {
        self.maps.iter().map(Grid::name)
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn log(&self) -> &GameLog {
        &self.log
    }

    pub fn fog_enabled(&self) -> bool {
        self.fog_enabled
    }

    /// The visibility tracker, when fog of war is on.
    pub fn fog(&self) -> Option<&VisibilityTracker> {
        self.fog.as_ref()
    }

    /// The last computed path, both endpoints included.
    pub fn path(&self) -> &[Position] {
        &self.path
    }

    /// Path cells not walked yet.
    pub fn remaining_path(&self) -> &[Position] {
        self.path.get(self.cursor..).unwrap_or_default()
    }

    /// Switch to map `index` and restart.
    pub fn select_map(&mut self, index: usize) -> Result<(), SessionError> {
        if index >= self.maps.len() {
            return Err(SessionError::UnknownMap(index));
        }
        self.selected = index;
        self.start()
    }

    /// Flip fog of war. Turning it on starts a fresh tracker around the
    /// player. Returns the new setting.
    pub fn toggle_fog(&mut self) -> Result<bool, SessionError> {
        self.fog_enabled = !self.fog_enabled;
        self.reset_fog()?;
        log::info!(
            "fog of war {}",
            if self.fog_enabled { "on" } else { "off" }
        );
        Ok(self.fog_enabled)
    }

    /// Reset the selected map and put the player back on its start with
    /// full health.
    pub fn start(&mut self) -> Result<(), SessionError> {
        self.map = self.maps[self.selected].clone();
        let origin = match self.map.start() {
            Some(p) => p,
            None => {
                log::warn!("map {:?} has no start, using {}", self.map.name(), Position::ZERO);
                Position::ZERO
            }
        };
        self.player = Player::new(origin, self.config.max_health);
        self.path.clear();
        self.cursor = 0;
        self.outcome = Outcome::Playing;
        self.log.clear();
        self.reset_fog()?;
        self.log.log(format!("Entered {}.", self.map.name()));
        Ok(())
    }

    fn reset_fog(&mut self) -> Result<(), SessionError> {
        self.fog = if self.fog_enabled {
            let mut tracker = VisibilityTracker::for_grid(&self.map, self.config.vision_range)?;
            tracker.update_visibility(self.player.position());
            Some(tracker)
        } else {
            None
        };
        Ok(())
    }

    /// Move the player one cell and resolve whatever is there.
    pub fn step(&mut self, dir: Direction) -> StepOutcome {
        if self.outcome != Outcome::Playing {
            return StepOutcome::Finished;
        }
        if !self.player.move_in(dir, &self.map) {
            log::trace!("move {dir} from {} blocked", self.player.position());
            return StepOutcome::Blocked;
        }
        let pos = self.player.position();
        if let Some(fog) = &mut self.fog {
            fog.update_visibility(pos);
        }

        match self.map.at(pos) {
            Cell::Trap => {
                let damage = self.config.trap_damage;
                self.player.take_damage(damage);
                self.map.set(pos, Cell::Empty);
                self.log
                    .log_styled(format!("A trap at {pos} deals {damage} damage."), LogStyle::Hurt);
                if self.player.is_alive() {
                    StepOutcome::Trap { damage }
                } else {
                    self.outcome = Outcome::Lost;
                    self.log.log_styled("You died.", LogStyle::Defeat);
                    StepOutcome::Lost
                }
            }
            Cell::End => {
                self.outcome = Outcome::Won;
                self.log.log_styled(
                    format!("Reached the exit in {} steps.", self.player.steps()),
                    LogStyle::Victory,
                );
                StepOutcome::Won
            }
            Cell::Empty | Cell::Start | Cell::Wall => StepOutcome::Moved,
        }
    }

    /// Compute the shortest path from the player to the map's end. Returns
    /// whether one exists.
    pub fn calculate_path(&mut self) -> bool {
        self.cursor = 1;
        self.path = match self.map.end() {
            Some(end) => self
                .pathfinder
                .find_path(&self.map, self.player.position(), end),
            None => Vec::new(),
        };
        if self.path.is_empty() {
            self.log.log_styled("No path to the exit.", LogStyle::Notable);
            return false;
        }
        true
    }

    /// Take the next step along the computed path.
    ///
    /// Returns `None` when there is no path left to walk or the game is
    /// over. If the player left the path since it was computed, a new one is
    /// computed from the current position first.
    pub fn auto_step(&mut self) -> Option<StepOutcome> {
        if self.outcome != Outcome::Playing || self.path.is_empty() {
            return None;
        }
        let here = self.player.position();
        let on_track = self.cursor > 0 && self.path.get(self.cursor - 1) == Some(&here);
        if !on_track {
            log::debug!("left the path at {here}, replanning");
            if !self.calculate_path() {
                return None;
            }
        }
        let next = *self.path.get(self.cursor)?;
        let outcome = self.step(self.pathfinder.next_move(here, next));
        if outcome == StepOutcome::Blocked {
            log::warn!("path step {here} -> {next} blocked, dropping path");
            self.path.clear();
            self.cursor = 0;
        } else {
            self.cursor += 1;
        }
        Some(outcome)
    }
}
