use mazewalk_core::{Direction, Position};

/// Direction to step from `current` toward `target`.
///
/// The horizontal axis is resolved first: only when `target.x == current.x`
/// does the vertical axis decide. Equal positions yield
/// [`Direction::Stay`]. For adjacent positions the result moves `current`
/// exactly onto `target`.
pub fn next_move(current: Position, target: Position) -> Direction {
    if target.x > current.x {
        Direction::Right
    } else if target.x < current.x {
        Direction::Left
    } else if target.y > current.y {
        Direction::Down
    } else if target.y < current.y {
        Direction::Up
    } else {
        Direction::Stay
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjacent_targets_are_reached() {
        let c = Position::new(3, 3);
        for n in c.neighbors_4() {
            assert_eq!(c.step(next_move(c, n)), n);
        }
    }

    #[test]
    fn same_position_stays() {
        let c = Position::new(-2, 7);
        assert_eq!(next_move(c, c), Direction::Stay);
    }

    #[test]
    fn horizontal_axis_wins_ties() {
        let c = Position::new(0, 0);
        assert_eq!(next_move(c, Position::new(1, 1)), Direction::Right);
        assert_eq!(next_move(c, Position::new(-1, -5)), Direction::Left);
        assert_eq!(next_move(c, Position::new(0, -5)), Direction::Up);
        assert_eq!(next_move(c, Position::new(0, 2)), Direction::Down);
    }
}
