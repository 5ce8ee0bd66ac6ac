use mazewalk_core::Position;

/// Manhattan (L1) distance between two positions.
#[inline]
pub fn manhattan(a: Position, b: Position) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Squared Euclidean distance. Comparing against `r * r` is the exact
/// integer form of `sqrt(dx² + dy²) <= r` for `r >= 0`. Saturates at
/// `i64::MAX` for points at opposite ends of the `i32` plane.
#[inline]
pub fn euclidean_sq(a: Position, b: Position) -> i64 {
    let dx = a.x as i64 - b.x as i64;
    let dy = a.y as i64 - b.y as i64;
    dx.saturating_mul(dx).saturating_add(dy.saturating_mul(dy))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distances() {
        let a = Position::new(1, 1);
        let b = Position::new(4, -3);
        assert_eq!(manhattan(a, b), 7);
        assert_eq!(manhattan(b, a), 7);
        assert_eq!(euclidean_sq(a, b), 25);
        assert_eq!(euclidean_sq(a, a), 0);
        let max = Position::new(i32::MAX, i32::MAX);
        assert_eq!(euclidean_sq(max, Position::ZERO), 2 * (i32::MAX as i64).pow(2));
        assert_eq!(euclidean_sq(max, Position::new(i32::MIN, i32::MIN)), i64::MAX);
    }
}
