//! The surface a search paints onto.

use parking_lot::RwLock;
use pathviz_core::{Grid, Point, TileKind};

/// The board a search reads obstacles from and paints its progress onto.
///
/// Implementors see every individual kind and label change, in order.
pub trait Canvas {
    /// Side length of the square board.
    fn size(&self) -> i32;

    /// Kind of the tile at `p`, or `None` outside the board.
    fn kind(&self, p: Point) -> Option<TileKind>;

    /// Change the kind of the tile at `p`.
    fn paint(&mut self, p: Point, kind: TileKind);

    /// Change the display label of the tile at `p`.
    fn label(&mut self, p: Point, label: Option<i32>);
}

impl Canvas for Grid {
    #[inline]
    fn size(&self) -> i32 {
        Grid::size(self)
    }

    #[inline]
    fn kind(&self, p: Point) -> Option<TileKind> {
        Grid::kind(self, p)
    }

    #[inline]
    fn paint(&mut self, p: Point, kind: TileKind) {
        self.set_kind(p, kind);
    }

    #[inline]
    fn label(&mut self, p: Point, label: Option<i32>) {
        self.set_label(p, label);
    }
}

/// A grid shared with readers, locked once per tile update.
///
/// The lock is never held across a pause, so a shell polling the same grid
/// only ever waits for a single write.
pub struct LockedGrid<'a> {
    grid: &'a RwLock<Grid>,
    size: i32,
}

impl<'a> LockedGrid<'a> {
    pub fn new(grid: &'a RwLock<Grid>) -> Self {
        let size = grid.read().size();
        Self { grid, size }
    }
}

impl Canvas for LockedGrid<'_> {
    #[inline]
    fn size(&self) -> i32 {
        self.size
    }

    fn kind(&self, p: Point) -> Option<TileKind> {
        self.grid.read().kind(p)
    }

    fn paint(&mut self, p: Point, kind: TileKind) {
        self.grid.write().set_kind(p, kind);
    }

    fn label(&mut self, p: Point, label: Option<i32>) {
        self.grid.write().set_label(p, label);
    }
}
