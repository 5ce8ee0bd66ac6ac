//! Plain-text rendering.

use std::fmt::Write;

use mazewalk_core::Position;
use mazewalk_map::{Cell, FogState, Grid, VisibilityTracker};

use crate::session::{Outcome, Session};

/// Everything that can be drawn in one map cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Glyph {
    Agent,
    Floor,
    Wall,
    Trap,
    Start,
    End,
    Path,
    Fog,
}

impl Glyph {
    pub const ALL: [Glyph; 8] = [
        Self::Agent,
        Self::Floor,
        Self::Wall,
        Self::Trap,
        Self::Start,
        Self::End,
        Self::Path,
        Self::Fog,
    ];

    pub const fn ch(self) -> char {
        match self {
            Self::Agent => 'P',
            Self::Floor => ' ',
            Self::Wall => '#',
            Self::Trap => 'x',
            Self::Start => 'S',
            Self::End => 'E',
            Self::Path => '*',
            Self::Fog => '~',
        }
    }

    /// Legend label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Agent => "player",
            Self::Floor => "floor",
            Self::Wall => "wall",
            Self::Trap => "trap",
            Self::Start => "start",
            Self::End => "exit",
            Self::Path => "path",
            Self::Fog => "unexplored",
        }
    }
}

/// The glyph for a terrain cell in full view.
pub const fn terrain_glyph(cell: Cell) -> Glyph {
    match cell {
        Cell::Empty => Glyph::Floor,
        Cell::Wall => Glyph::Wall,
        Cell::Trap => Glyph::Trap,
        Cell::Start => Glyph::Start,
        Cell::End => Glyph::End,
    }
}

/// The glyph for a cell under a fog state. Unexplored cells are hidden and
/// remembered traps draw as floor.
pub const fn cell_glyph(cell: Cell, fog: FogState) -> Glyph {
    match (fog, cell) {
        (FogState::Unexplored, _) => Glyph::Fog,
        (FogState::Explored, Cell::Trap) => Glyph::Floor,
        (FogState::Explored | FogState::Visible, _) => terrain_glyph(cell),
    }
}

/// Draw `grid` with the agent and path overlaid, one text row per grid row,
/// each glyph followed by a space. The path only shows on revealed floor.
pub fn render_grid(
    grid: &Grid,
    fog: Option<&VisibilityTracker>,
    agent: Position,
    path: &[Position],
) -> String {
    let mut out = String::with_capacity(grid.bounds().len() * 2 + grid.height() as usize);
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let p = Position::new(x, y);
            let state = fog.map_or(FogState::Visible, |f| f.fog_state(p));
            let glyph = match cell_glyph(grid.at(p), state) {
                _ if p == agent => Glyph::Agent,
                Glyph::Floor if path.contains(&p) => Glyph::Path,
                g => g,
            };
            out.push(glyph.ch());
            out.push(' ');
        }
        out.push('\n');
    }
    out
}

/// A full frame: status header, map and legend.
pub fn render(session: &Session) -> String {
    let map = session.map();
    let player = session.player();
    let mut out = String::new();

    let _ = writeln!(out, "=== {} ===", map.name());
    let _ = write!(
        out,
        "Health: {}/{}  Steps: {}",
        player.health(),
        player.max_health(),
        player.steps()
    );
    if let Some(fog) = session.fog() {
        let _ = write!(out, "  Explored: {:.0}%", fog.explored_percent());
    }
    match session.outcome() {
        Outcome::Playing => {}
        Outcome::Won => out.push_str("  [WON]"),
        Outcome::Lost => out.push_str("  [LOST]"),
    }
    out.push('\n');

    out.push_str(&render_grid(
        map,
        session.fog(),
        player.position(),
        session.remaining_path(),
    ));

    let legend: Vec<String> = Glyph::ALL
        .iter()
        .filter(|g| session.fog_enabled() || **g != Glyph::Fog)
        .map(|g| format!("'{}' {}", g.ch(), g.label()))
        .collect();
    let _ = writeln!(out, "{}", legend.join("  "));
    if let Some(entry) = session.log().entries().last() {
        let _ = writeln!(out, "{}", entry.display());
    }
    out
}
