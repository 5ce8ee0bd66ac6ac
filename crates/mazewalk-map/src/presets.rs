//! Built-in 15x10 mazes.

use crate::grid::{Cell, Grid};

const WIDTH: i32 = 15;
const HEIGHT: i32 = 10;

/// A `WIDTH` x `HEIGHT` grid with a wall border and the given interior
/// walls (vertical runs `(x, y0..=y1)`) and traps.
fn bordered(name: &str, runs: &[(i32, i32, i32)], traps: &[(i32, i32)]) -> Grid {
    let mut map = match Grid::new(WIDTH, HEIGHT) {
        Ok(g) => g.with_name(name),
        Err(_) => unreachable!("preset dimensions are positive"),
    };
    for x in 0..WIDTH {
        map.set_cell(x, 0, Cell::Wall);
        map.set_cell(x, HEIGHT - 1, Cell::Wall);
    }
    for y in 0..HEIGHT {
        map.set_cell(0, y, Cell::Wall);
        map.set_cell(WIDTH - 1, y, Cell::Wall);
    }
    for &(x, y0, y1) in runs {
        for y in y0..=y1 {
            map.set_cell(x, y, Cell::Wall);
        }
    }
    for &(x, y) in traps {
        map.set_cell(x, y, Cell::Trap);
    }
    map
}

/// "Forest Maze": alternating wall columns, four traps, start top-left,
/// end bottom-right.
pub fn forest_maze() -> Grid {
    let mut map = bordered(
        "Forest Maze",
        &[
            (2, 1, 7),
            (4, 2, 8),
            (6, 1, 6),
            (8, 3, 8),
            (10, 1, 7),
            (12, 2, 8),
        ],
        &[(3, 3), (7, 4), (11, 5), (5, 8)],
    );
    map.set_cell(1, 1, Cell::Start);
    map.set_cell(13, 8, Cell::End);
    map
}

/// "Dungeon Challenge": longer wall columns, seven traps, start
/// bottom-left, end top-right. The only gaps through the first and fifth
/// columns are at (2, 8) and (10, 1).
pub fn dungeon_challenge() -> Grid {
    let mut map = bordered(
        "Dungeon Challenge",
        &[
            (2, 1, 7),
            (4, 1, 6),
            (6, 2, 8),
            (8, 1, 6),
            (10, 2, 8),
            (12, 1, 7),
        ],
        &[(3, 2), (5, 3), (7, 4), (9, 5), (11, 6), (3, 7), (13, 3)],
    );
    map.set_cell(1, 8, Cell::Start);
    map.set_cell(13, 1, Cell::End);
    map
}

/// Every preset, in menu order.
pub fn all() -> Vec<Grid> {
    vec![forest_maze(), dungeon_challenge()]
}
