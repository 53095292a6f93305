//! Paced shortest-path searches for pathviz boards.
//!
//! This crate animates two searches on a square grid by painting their
//! progress tile by tile:
//!
//! - **BFS** unweighted search honoring 4- or 8-way moves ([`SearchEngine::bfs`])
//! - **A\*** over 8-way moves costing 10/14, guided by an exact open-grid
//!   heuristic precomputed with Dijkstra ([`SearchEngine::astar`])
//!
//! Searches pause between steps according to [`Pacing`], through an
//! injectable [`Clock`]. A [`SearchController`] owns the shared board, runs at
//! most one search on a background worker, and refuses board changes while
//! that search is in flight.
//!
//! # Seams
//!
//! | Trait | Implemented by |
//! |---|---|
//! | [`Canvas`] | [`Grid`](pathviz_core::Grid), [`LockedGrid`] |
//! | [`Clock`] | [`SystemClock`], [`NoDelay`] |

mod astar;
mod bfs;
mod canvas;
mod controller;
mod cost;
mod engine;
mod heuristic;
mod pacing;

pub use astar::NO_PATH_LABEL;
pub use canvas::{Canvas, LockedGrid};
pub use controller::{ControllerError, SearchConfig, SearchController, StartError};
pub use cost::{DIAGONAL, ORTHOGONAL, chebyshev, manhattan, octile, step_cost};
pub use engine::{Algorithm, Outcome, SearchEngine, UnknownAlgorithm};
pub use pacing::{Clock, NoDelay, Pacing, PacingHandle, SystemClock};
