//! The [`SearchController`]: single authority over a shared board and the
//! one background worker allowed to search it.

use std::io;
use std::path::Path;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use parking_lot::{RwLock, RwLockReadGuard};
use pathviz_core::{BoardError, Context, Grid, GridError, Point, TileKind, board};

use crate::canvas::LockedGrid;
use crate::engine::{Algorithm, Outcome, SearchEngine};
use crate::pacing::{Clock, Pacing, PacingHandle, SystemClock};

/// A grid shared between the controller and its worker.
type SharedGrid = Arc<RwLock<Grid>>;

/// Settings for the next search.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchConfig {
    pub algorithm: Algorithm,
    /// Allow diagonal moves. A* ignores this and always moves diagonally.
    pub diagonal: bool,
    pub pacing: Pacing,
}

/// Why a search did not start.
#[derive(Debug, thiserror::Error)]
pub enum StartError {
    /// A search is already running.
    #[error("a search is already running")]
    Busy,
    /// The board does not hold exactly two targets.
    #[error("expected exactly 2 target tiles, found {0}")]
    TargetCount(usize),
    /// The worker thread could not be spawned.
    #[error("failed to spawn search worker: {0}")]
    Spawn(#[from] io::Error),
}

/// Errors from board commands.
#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    /// The board cannot change while a search is running.
    #[error("a search is running")]
    Busy,
    #[error("point {0} is outside the board")]
    OutOfBounds(Point),
    /// Only `Empty`, `Block` and `Target` can be placed by hand.
    #[error("tile kind {0:?} cannot be placed by hand")]
    NotEditable(TileKind),
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error("board i/o: {0}")]
    Io(#[from] io::Error),
}

/// Owns the shared board and runs at most one search at a time.
///
/// Every command that changes the board goes through the controller and is
/// refused while a search is running. Readers may poll
/// [`snapshot`](Self::snapshot) or hold a [`read`](Self::read) guard at any
/// time; the worker only holds the lock for single tile updates.
pub struct SearchController {
    grid: SharedGrid,
    algorithm: Algorithm,
    diagonal: bool,
    pacing: PacingHandle,
    clock: Arc<dyn Clock>,
    ctx: Context,
    worker: Option<JoinHandle<Outcome>>,
    last: Option<Outcome>,
}

impl SearchController {
    /// A controller over an empty `size`×`size` board with wall-clock pacing.
    pub fn new(size: i32, config: SearchConfig) -> Result<Self, GridError> {
        Ok(Self::with_grid(Grid::new(size)?, config, Arc::new(SystemClock)))
    }

    /// A controller over `grid` pausing with `clock`.
    pub fn with_grid(grid: Grid, config: SearchConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            grid: Arc::new(RwLock::new(grid)),
            algorithm: config.algorithm,
            diagonal: config.diagonal,
            pacing: PacingHandle::new(config.pacing),
            clock,
            ctx: Context::new(),
            worker: None,
            last: None,
        }
    }

    // -----------------------------------------------------------------------
    // Read access
    // -----------------------------------------------------------------------

    /// Read-only access to the live board.
    ///
    /// A running search waits for its next tile update until the guard is
    /// dropped, so keep it short.
    pub fn read(&self) -> RwLockReadGuard<'_, Grid> {
        self.grid.read()
    }

    /// A copy of the board as it is right now.
    pub fn snapshot(&self) -> Grid {
        self.grid.read().clone()
    }

    /// The current settings.
    pub fn config(&self) -> SearchConfig {
        SearchConfig {
            algorithm: self.algorithm,
            diagonal: self.diagonal,
            pacing: self.pacing.get(),
        }
    }

    /// Whether a worker is still searching.
    pub fn is_running(&self) -> bool {
        self.worker.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Outcome of the most recent search that has been collected.
    pub fn last_outcome(&self) -> Option<&Outcome> {
        self.last.as_ref()
    }

    // -----------------------------------------------------------------------
    // Search lifecycle
    // -----------------------------------------------------------------------

    /// Start a search between the board's two targets.
    ///
    /// Refused while another search runs, and when the board does not hold
    /// exactly two targets; a refused start changes nothing. Otherwise
    /// previous search results are cleared and one worker is spawned.
    pub fn start(&mut self) -> Result<(), StartError> {
        if self.is_running() {
            log::debug!("search already running, start ignored");
            return Err(StartError::Busy);
        }
        self.reap();

        let targets = self.grid.read().targets();
        let &[start, end] = targets.as_slice() else {
            log::warn!(
                "make sure exactly 2 target tiles are placed (found {})",
                targets.len()
            );
            return Err(StartError::TargetCount(targets.len()));
        };

        self.grid.write().reset(true);
        self.ctx = Context::new();

        let engine = SearchEngine::new(Arc::clone(&self.clock), self.pacing.clone(), self.ctx.clone());
        let grid = Arc::clone(&self.grid);
        let algorithm = self.algorithm;
        let diagonal = self.diagonal;

        log::info!("searching path from {start} to {end} ({algorithm})");
        let handle = thread::Builder::new()
            .name("search-worker".into())
            .spawn(move || {
                let mut canvas = LockedGrid::new(&grid);
                let outcome = engine.run(algorithm, &mut canvas, start, end, diagonal);
                log::info!("{algorithm}: {outcome}");
                outcome
            })?;
        self.worker = Some(handle);
        Ok(())
    }

    /// Ask the running search to stop at its next step.
    pub fn cancel(&self) {
        if self.is_running() {
            log::debug!("cancelling search");
        }
        self.ctx.cancel();
    }

    /// Block until the current search finishes and return its outcome.
    ///
    /// Returns the previous outcome when nothing is running.
    pub fn wait(&mut self) -> Option<&Outcome> {
        self.reap();
        self.last.as_ref()
    }

    /// Stop any search, skipping its remaining pauses, and wait for the
    /// worker to exit. The configured pacing is kept for later searches.
    pub fn shutdown(&mut self) {
        let pacing = self.pacing.get();
        self.pacing.set(Pacing::ZERO);
        self.ctx.cancel();
        self.reap();
        self.pacing.set(pacing);
    }

    /// Join a worker, if any, and keep its outcome.
    fn reap(&mut self) {
        let Some(handle) = self.worker.take() else {
            return;
        };
        match handle.join() {
            Ok(outcome) => self.last = Some(outcome),
            Err(_) => {
                log::error!("search worker panicked");
                self.last = None;
            }
        }
    }

    fn ensure_idle(&self) -> Result<(), ControllerError> {
        if self.is_running() {
            log::debug!("board is locked by a running search");
            return Err(ControllerError::Busy);
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Settings
    // -----------------------------------------------------------------------

    /// Change the pacing. Allowed at any time; a running search picks the
    /// new values up at its next phase.
    pub fn set_pacing(&self, pacing: Pacing) {
        self.pacing.set(pacing);
    }

    pub fn set_algorithm(&mut self, algorithm: Algorithm) -> Result<(), ControllerError> {
        self.ensure_idle()?;
        self.algorithm = algorithm;
        Ok(())
    }

    pub fn set_diagonal(&mut self, diagonal: bool) -> Result<(), ControllerError> {
        self.ensure_idle()?;
        self.diagonal = diagonal;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Board commands
    // -----------------------------------------------------------------------

    /// Place `kind` at `p`. Only `Empty`, `Block` and `Target` are accepted.
    pub fn set_tile(&self, p: Point, kind: TileKind) -> Result<(), ControllerError> {
        self.ensure_idle()?;
        if !kind.is_user_kind() {
            return Err(ControllerError::NotEditable(kind));
        }
        let mut grid = self.grid.write();
        if !grid.contains(p) {
            return Err(ControllerError::OutOfBounds(p));
        }
        grid.set_kind(p, kind);
        Ok(())
    }

    /// Clear search results, keeping blocks and targets.
    pub fn reset_search(&self) -> Result<(), ControllerError> {
        self.ensure_idle()?;
        self.grid.write().reset(true);
        Ok(())
    }

    /// Clear the whole board.
    pub fn clear(&self) -> Result<(), ControllerError> {
        self.ensure_idle()?;
        self.grid.write().reset(false);
        Ok(())
    }

    /// Replace the board with an empty one of side `size`.
    pub fn resize(&self, size: i32) -> Result<(), ControllerError> {
        self.ensure_idle()?;
        let fresh = Grid::new(size)?;
        *self.grid.write() = fresh;
        log::debug!("board resized to {size}x{size}");
        Ok(())
    }

    /// Replace the board with the one stored at `path`.
    ///
    /// The live board is untouched unless the whole file is valid.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<(), ControllerError> {
        self.ensure_idle()?;
        let path = path.as_ref();
        let loaded = board::load(path).inspect_err(|e| {
            log::warn!("failed to load board {}: {e}", path.display());
        })?;
        *self.grid.write() = loaded;
        Ok(())
    }

    /// Save the board's blocks and targets to `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ControllerError> {
        let grid = self.snapshot();
        board::save(&grid, path)?;
        Ok(())
    }
}

impl Drop for SearchController {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl std::fmt::Debug for SearchController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchController")
            .field("config", &self.config())
            .field("running", &self.is_running())
            .field("last", &self.last)
            .finish()
    }
}
