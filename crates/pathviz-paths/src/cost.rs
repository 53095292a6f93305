//! Move costs and grid distance metrics.

use pathviz_core::Point;

/// Cost of an orthogonal move.
pub const ORTHOGONAL: i32 = 10;

/// Cost of a diagonal move, approximating `ORTHOGONAL * √2`.
pub const DIAGONAL: i32 = 14;

/// Cost of a single move between adjacent points.
#[inline]
pub fn step_cost(from: Point, to: Point) -> i32 {
    if from.is_diagonal_to(to) {
        DIAGONAL
    } else {
        ORTHOGONAL
    }
}

/// Manhattan (L1) distance between two points.
#[inline]
pub fn manhattan(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Chebyshev (L∞) distance between two points.
#[inline]
pub fn chebyshev(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs().max((a.y - b.y).abs())
}

/// Weighted 8-way distance on an open grid using [`ORTHOGONAL`] and
/// [`DIAGONAL`] step costs.
#[inline]
pub fn octile(a: Point, b: Point) -> i32 {
    let dx = (a.x - b.x).abs();
    let dy = (a.y - b.y).abs();
    let diag = dx.min(dy);
    DIAGONAL * diag + ORTHOGONAL * (dx.max(dy) - diag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distances() {
        let a = Point::new(1, 1);
        let b = Point::new(4, 3);
        assert_eq!(manhattan(a, b), 5);
        assert_eq!(chebyshev(a, b), 3);
        assert_eq!(octile(a, b), 2 * DIAGONAL + ORTHOGONAL);
        assert_eq!(octile(a, a), 0);
    }

    #[test]
    fn step_costs() {
        let p = Point::new(2, 2);
        assert_eq!(step_cost(p, Point::new(2, 3)), ORTHOGONAL);
        assert_eq!(step_cost(p, Point::new(1, 1)), DIAGONAL);
    }
}
