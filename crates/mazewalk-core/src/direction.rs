//! Cardinal movement directions.

use std::fmt;

use crate::geom::Position;

/// One of the four cardinal moves, or `Stay` for "no movement".
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    #[default]
    Stay,
}

impl Direction {
    /// The four moving directions, in up/right/down/left order.
    pub const CARDINALS: [Direction; 4] = [Self::Up, Self::Right, Self::Down, Self::Left];

    /// Unit offset for this direction. Y grows down.
    #[inline]
    pub const fn delta(self) -> Position {
        match self {
            Self::Up => Position::new(0, -1),
            Self::Down => Position::new(0, 1),
            Self::Left => Position::new(-1, 0),
            Self::Right => Position::new(1, 0),
            Self::Stay => Position::new(0, 0),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
            Self::Stay => "stay",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cardinals_move_one_cell() {
        for d in Direction::CARDINALS {
            let p = Position::ZERO.step(d);
            assert!(p.is_adjacent(Position::ZERO), "{d}");
        }
        assert_eq!(Position::ZERO.step(Direction::Stay), Position::ZERO);
    }
}
