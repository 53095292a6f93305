//! **pathviz-core**: grid search visualizer (core types).
//!
//! This crate provides the board model shared by the search engine and any
//! presentation shell: grid coordinates, tiles and their kinds, the square
//! [`Grid`], a cooperative cancellation [`Context`], and the [`board`] text
//! format used to save and load boards.

pub mod board;
pub mod context;
pub mod geom;
pub mod grid;
pub mod neighbors;
pub mod tile;

pub use board::BoardError;
pub use context::Context;
pub use geom::Point;
pub use grid::{Grid, GridError, MAX_SIZE, MIN_SIZE};
pub use neighbors::{Neighbors, OFFSETS};
pub use tile::{Tile, TileKind};
