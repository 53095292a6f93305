//! The [`Grid`] type: an N×N board of [`Tile`]s.
//!
//! Tiles are stored column-outer, row-inner, which is also the scan order
//! used for target discovery and board files:
//! `(0,0), (0,1), …, (0,N-1), (1,0), …`.

use std::fmt;

use crate::geom::Point;
use crate::neighbors::OFFSETS;
use crate::tile::{Tile, TileKind};

/// Smallest supported side length.
pub const MIN_SIZE: i32 = 2;

/// Largest supported side length.
pub const MAX_SIZE: i32 = 1024;

/// Errors raised when building a grid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// The requested side length is below [`MIN_SIZE`].
    #[error("grid size {0} is too small (minimum {MIN_SIZE})")]
    TooSmall(i32),
    /// The requested side length is above [`MAX_SIZE`].
    #[error("grid size {0} is too large (maximum {MAX_SIZE})")]
    TooLarge(i32),
}

/// A square board with exactly one tile per coordinate in `[0, N)²`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: i32,
    tiles: Vec<Tile>,
}

impl Grid {
    /// Create an N×N grid of empty tiles.
    pub fn new(size: i32) -> Result<Self, GridError> {
        if size < MIN_SIZE {
            return Err(GridError::TooSmall(size));
        }
        if size > MAX_SIZE {
            return Err(GridError::TooLarge(size));
        }
        let len = size
            .checked_mul(size)
            .ok_or(GridError::TooLarge(size))?;
        let mut tiles = Vec::with_capacity(len as usize);
        for x in 0..size {
            for y in 0..size {
                tiles.push(Tile::new(Point::new(x, y)));
            }
        }
        Ok(Self { size, tiles })
    }

    /// Side length N.
    #[inline]
    pub fn size(&self) -> i32 {
        self.size
    }

    /// Number of tiles (N²).
    #[inline]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether the grid has no tiles; never true for a grid built by `new`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Whether `p` lies inside the board.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && p.x < self.size && p.y < self.size
    }

    /// Convert a `Point` to a flat index. Returns `None` if out of range.
    #[inline]
    pub fn idx(&self, p: Point) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        Some((p.x * self.size + p.y) as usize)
    }

    /// Convert a flat index back to a `Point`.
    #[inline]
    pub fn point(&self, idx: usize) -> Point {
        let n = self.size as usize;
        Point::new((idx / n) as i32, (idx % n) as i32)
    }

    /// The tile at `p`, or `None` if out of bounds.
    pub fn at(&self, p: Point) -> Option<&Tile> {
        self.idx(p).map(|i| &self.tiles[i])
    }

    /// The kind of the tile at `p`, or `None` if out of bounds.
    #[inline]
    pub fn kind(&self, p: Point) -> Option<TileKind> {
        self.at(p).map(|t| t.kind)
    }

    /// Set the kind at `p`. No-op if `p` is outside the board.
    pub fn set_kind(&mut self, p: Point, kind: TileKind) {
        if let Some(i) = self.idx(p) {
            self.tiles[i].kind = kind;
        }
    }

    /// Set the label at `p`. No-op if `p` is outside the board.
    pub fn set_label(&mut self, p: Point, label: Option<i32>) {
        if let Some(i) = self.idx(p) {
            self.tiles[i].label = label;
        }
    }

    /// Tiles in scan order.
    pub fn iter(&self) -> std::slice::Iter<'_, Tile> {
        self.tiles.iter()
    }

    /// Positions of all `Target` tiles in scan order.
    pub fn targets(&self) -> Vec<Point> {
        self.positions_of(TileKind::Target)
    }

    /// Positions of all tiles of `kind` in scan order.
    pub fn positions_of(&self, kind: TileKind) -> Vec<Point> {
        self.tiles
            .iter()
            .filter(|t| t.kind == kind)
            .map(Tile::pos)
            .collect()
    }

    /// Neighbors of `p` inside the board, in expansion order.
    ///
    /// Diagonal moves are only produced when `diagonal` is set.
    pub fn neighbors(&self, p: Point, diagonal: bool) -> impl Iterator<Item = Point> + '_ {
        OFFSETS
            .into_iter()
            .filter(move |d| diagonal || d.x.abs() != d.y.abs())
            .map(move |d| p + d)
            .filter(move |&n| self.contains(n))
    }

    /// Clear search results.
    ///
    /// `Visited`, `VisitedAlt` and `Path` tiles become `Empty` and every
    /// label is cleared. When `keep_user_tiles` is `false`, `Block` and
    /// `Target` tiles are cleared as well.
    pub fn reset(&mut self, keep_user_tiles: bool) {
        for t in self.tiles.iter_mut() {
            t.label = None;
            if t.kind.is_search_kind() || (!keep_user_tiles && t.kind != TileKind::Empty) {
                t.kind = TileKind::Empty;
            }
        }
    }
}

impl fmt::Display for Grid {
    /// One text line per row, one kind code per tile.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.size {
            let line: String = (0..self.size)
                .map(|x| self.tiles[(x * self.size + y) as usize].kind.code())
                .collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
