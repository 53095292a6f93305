//! Neighbor offsets and a reusable neighbor buffer.

use crate::geom::Point;

/// The eight relative offsets in expansion order: outer `dx` from -1 to 1,
/// inner `dy` from -1 to 1.
///
/// Searches break ties by this order, so it must never change.
pub const OFFSETS: [Point; 8] = [
    Point::new(-1, -1),
    Point::new(-1, 0),
    Point::new(-1, 1),
    Point::new(0, -1),
    Point::new(0, 1),
    Point::new(1, -1),
    Point::new(1, 0),
    Point::new(1, 1),
];

/// Cached neighbor computation helper.
///
/// Enumerates the 4-way or 8-way neighbors of a grid point in [`OFFSETS`]
/// order, filtered by a predicate, reusing one buffer across calls.
pub struct Neighbors {
    buf: Vec<Point>,
}

impl Default for Neighbors {
    fn default() -> Self {
        Self::new()
    }
}

impl Neighbors {
    /// Create a new `Neighbors` helper.
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(8),
        }
    }

    /// Return the neighbors of `p`, keeping only those for which `keep`
    /// returns `true`. Diagonal offsets are skipped unless `diagonal` is set.
    pub fn around(&mut self, p: Point, diagonal: bool, keep: impl Fn(Point) -> bool) -> &[Point] {
        self.buf.clear();
        for d in OFFSETS {
            if !diagonal && d.x.abs() == d.y.abs() {
                continue;
            }
            let n = p + d;
            if keep(n) {
                self.buf.push(n);
            }
        }
        &self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cardinal_order() {
        let mut nb = Neighbors::new();
        let got = nb.around(Point::new(5, 5), false, |_| true).to_vec();
        assert_eq!(
            got,
            vec![
                Point::new(4, 5),
                Point::new(5, 4),
                Point::new(5, 6),
                Point::new(6, 5),
            ]
        );
    }

    #[test]
    fn all_eight_in_dx_major_order() {
        let mut nb = Neighbors::new();
        let got = nb.around(Point::ZERO, true, |_| true).to_vec();
        assert_eq!(got, OFFSETS.to_vec());
    }

    #[test]
    fn predicate_filters() {
        let mut nb = Neighbors::new();
        let got = nb.around(Point::ZERO, true, |p| p.x >= 0 && p.y >= 0);
        assert_eq!(got, &[Point::new(0, 1), Point::new(1, 0), Point::new(1, 1)]);
    }
}
