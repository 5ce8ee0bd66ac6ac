//! The terrain grid.
//!
//! [`Cell`] is a closed set of terrain tags. [`Grid`] stores one cell per
//! in-bounds coordinate and treats everything outside its bounds as
//! [`Cell::Wall`], so lookups are total over all integer coordinates.

use std::fmt;

use mazewalk_core::{Position, Range};
use mazewalk_paths::PathRange;

/// A terrain tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Cell {
    #[default]
    Empty,
    Wall,
    /// Traversable, but hurts whoever steps on it. The session layer turns
    /// a triggered trap back into `Empty`.
    Trap,
    Start,
    End,
}

impl Cell {
    /// Every variant, in declaration order.
    pub const ALL: [Cell; 5] = [Self::Empty, Self::Wall, Self::Trap, Self::Start, Self::End];

    /// Whether an agent may stand on this cell. Only walls block.
    #[inline]
    pub const fn passable(self) -> bool {
        !matches!(self, Self::Wall)
    }

    /// Character used by the plain-text map dump.
    pub const fn rune(self) -> char {
        match self {
            Self::Empty => ' ',
            Self::Wall => '#',
            Self::Trap => 'x',
            Self::Start => 'S',
            Self::End => 'E',
        }
    }
}

/// Errors from grid construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Width or height was negative.
    InvalidSize { width: i32, height: i32 },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSize { width, height } => {
                write!(f, "grid: invalid size {width}x{height}")
            }
        }
    }
}

impl std::error::Error for GridError {}

/// A rectangular map of [`Cell`]s with a fixed size.
///
/// The grid remembers the most recent coordinates written as
/// [`Cell::Start`] and [`Cell::End`]; it does not enforce uniqueness
/// beyond "last write wins".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Cell>,
    bounds: Range,
    start: Option<Position>,
    end: Option<Position>,
    name: String,
}

impl Grid {
    /// Create a new grid filled with [`Cell::Empty`].
    pub fn new(width: i32, height: i32) -> Result<Self, GridError> {
        if width < 0 || height < 0 {
            return Err(GridError::InvalidSize { width, height });
        }
        let bounds = Range::new(0, 0, width, height);
        Ok(Self {
            cells: vec![Cell::default(); bounds.len()],
            bounds,
            start: None,
            end: None,
            name: String::from("Unnamed Map"),
        })
    }

    /// Set the display name (builder).
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// The display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The bounding range `[0, width) x [0, height)`.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    /// Whether `p` lies inside the grid.
    #[inline]
    pub fn contains(&self, p: Position) -> bool {
        self.bounds.contains(p)
    }

    /// Bounds check against `[0, width) x [0, height)`.
    #[inline]
    pub fn is_valid_position(&self, x: i32, y: i32) -> bool {
        self.contains(Position::new(x, y))
    }

    /// The cell at `p`. Out-of-bounds positions read as [`Cell::Wall`].
    #[inline]
    pub fn at(&self, p: Position) -> Cell {
        match self.bounds.index_of(p) {
            Some(i) => self.cells[i],
            None => Cell::Wall,
        }
    }

    /// Coordinate form of [`at`](Self::at).
    #[inline]
    pub fn get_cell(&self, x: i32, y: i32) -> Cell {
        self.at(Position::new(x, y))
    }

    /// Set the cell at `p`. Does nothing if out of bounds.
    ///
    /// Writing `Start` or `End` also records `p` as the map's start or end.
    pub fn set(&mut self, p: Position, cell: Cell) {
        let Some(i) = self.bounds.index_of(p) else {
            return;
        };
        self.cells[i] = cell;
        match cell {
            Cell::Start => self.start = Some(p),
            Cell::End => self.end = Some(p),
            Cell::Empty | Cell::Wall | Cell::Trap => {}
        }
    }

    /// Coordinate form of [`set`](Self::set).
    #[inline]
    pub fn set_cell(&mut self, x: i32, y: i32, cell: Cell) {
        self.set(Position::new(x, y), cell);
    }

    /// The most recently written start position, if any.
    pub fn start(&self) -> Option<Position> {
        self.start
    }

    /// The most recently written end position, if any.
    pub fn end(&self) -> Option<Position> {
        self.end
    }

    /// Whether the end is reachable from the start through non-wall cells
    /// (4-directional breadth-first search). `false` when either is unset.
    ///
    /// Meant for validating a map before play, not for per-step use.
    pub fn has_valid_path(&self) -> bool {
        let (Some(start), Some(end)) = (self.start, self.end) else {
            return false;
        };
        let mut pr = PathRange::new(self.bounds);
        pr.reachable(self, start, end)
    }

    /// Count how many cells equal `cell`.
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    /// Iterate over `(Position, Cell)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, Cell)> + '_ {
        self.bounds.iter().zip(self.cells.iter().copied())
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "=== {} === ({}x{})",
            self.name,
            self.width(),
            self.height()
        )?;
        for y in 0..self.height() {
            for x in 0..self.width() {
                write!(f, "{} ", self.get_cell(x, y).rune())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
