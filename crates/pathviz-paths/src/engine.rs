use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use pathviz_core::{Context, Point};

use crate::canvas::Canvas;
use crate::pacing::{Clock, NoDelay, Pacing, PacingHandle};

/// Sentinel for "no parent" in flat parent arrays.
pub(crate) const NO_PARENT: usize = usize::MAX;

// ---------------------------------------------------------------------------
// Algorithm
// ---------------------------------------------------------------------------

/// The search algorithms a controller can run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Algorithm {
    /// Unweighted breadth-first search.
    #[default]
    Bfs,
    /// A* with 10/14 move costs and an exact open-grid heuristic.
    Astar,
}

impl Algorithm {
    pub const ALL: [Algorithm; 2] = [Algorithm::Bfs, Algorithm::Astar];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Bfs => "bfs",
            Self::Astar => "astar",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when parsing an unknown algorithm name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown algorithm \u{201c}{0}\u{201d} (expected bfs or astar)")]
pub struct UnknownAlgorithm(pub String);

impl FromStr for Algorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bfs" => Ok(Self::Bfs),
            "astar" | "a*" => Ok(Self::Astar),
            _ => Err(UnknownAlgorithm(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// How a search ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A path was found. `path` runs from start to end inclusive; `cost` is
    /// the step count for BFS and the weighted move cost for A*.
    Found { path: Vec<Point>, cost: i32 },
    /// The frontier was exhausted without reaching the end.
    NoPath,
    /// The search was cancelled before it finished.
    Cancelled,
}

impl Outcome {
    #[inline]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }

    /// Number of moves on the found path.
    pub fn steps(&self) -> Option<usize> {
        match self {
            Self::Found { path, .. } => Some(path.len().saturating_sub(1)),
            _ => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Found { path, cost } => {
                write!(f, "path found: {} steps, cost {cost}", path.len().saturating_sub(1))
            }
            Self::NoPath => f.write_str("no path found"),
            Self::Cancelled => f.write_str("search cancelled"),
        }
    }
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

/// Flat indexing for per-search arrays, matching the grid's scan order.
#[derive(Copy, Clone, Debug)]
pub(crate) struct Layout {
    size: i32,
}

impl Layout {
    #[inline]
    pub(crate) fn new(size: i32) -> Self {
        Self { size }
    }

    #[inline]
    pub(crate) fn len(self) -> usize {
        (self.size.max(0) as usize).pow(2)
    }

    #[inline]
    pub(crate) fn contains(self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && p.x < self.size && p.y < self.size
    }

    #[inline]
    pub(crate) fn idx(self, p: Point) -> Option<usize> {
        self.contains(p).then(|| (p.x * self.size + p.y) as usize)
    }

    #[inline]
    pub(crate) fn point(self, idx: usize) -> Point {
        let n = self.size as usize;
        Point::new((idx / n) as i32, (idx % n) as i32)
    }
}

// ---------------------------------------------------------------------------
// SearchEngine
// ---------------------------------------------------------------------------

/// Runs paced searches that paint their progress onto a [`Canvas`].
///
/// The engine is cheap to clone and owns nothing but its collaborators: the
/// clock performing pauses, the shared pacing knobs, and the cancellation
/// context it polls at every step.
#[derive(Clone)]
pub struct SearchEngine {
    clock: Arc<dyn Clock>,
    pacing: PacingHandle,
    ctx: Context,
}

impl SearchEngine {
    pub fn new(clock: Arc<dyn Clock>, pacing: PacingHandle, ctx: Context) -> Self {
        Self { clock, pacing, ctx }
    }

    /// An engine that never pauses and is never cancelled.
    pub fn immediate() -> Self {
        Self::new(
            Arc::new(NoDelay),
            PacingHandle::new(Pacing::ZERO),
            Context::new(),
        )
    }

    /// The cancellation context polled by this engine.
    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// Search from `start` to `end` with `algorithm`.
    ///
    /// Both endpoints are treated as passable whatever their kind. `diagonal`
    /// selects 8-way moves for BFS; A* always moves in 8 directions.
    pub fn run<C: Canvas + ?Sized>(
        &self,
        algorithm: Algorithm,
        canvas: &mut C,
        start: Point,
        end: Point,
        diagonal: bool,
    ) -> Outcome {
        log::debug!("{algorithm}: {start} -> {end} (diagonal: {diagonal})");
        let outcome = match algorithm {
            Algorithm::Bfs => self.bfs(canvas, start, end, diagonal),
            Algorithm::Astar => self.astar(canvas, start, end),
        };
        log::debug!("{algorithm}: {outcome}");
        outcome
    }

    #[inline]
    pub(crate) fn cancelled(&self) -> bool {
        self.ctx.is_done()
    }

    #[inline]
    pub(crate) fn pause(&self, d: Duration) {
        self.clock.pause(d, &self.ctx);
    }

    #[inline]
    pub(crate) fn pacing(&self) -> &PacingHandle {
        &self.pacing
    }
}

impl fmt::Debug for SearchEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchEngine")
            .field("pacing", &self.pacing.get())
            .field("cancelled", &self.ctx.is_done())
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use parking_lot::Mutex;
    use pathviz_core::{Grid, TileKind};

    /// A clock that records every pause instead of sleeping.
    ///
    /// With [`retune_after`](Self::retune_after) it also replaces the pacing
    /// once the given number of pauses has been taken.
    pub(crate) struct Tape {
        pauses: Mutex<Vec<Duration>>,
        retune: Option<(usize, PacingHandle, Pacing)>,
    }

    impl Tape {
        pub(crate) fn new() -> Self {
            Self {
                pauses: Mutex::new(Vec::new()),
                retune: None,
            }
        }

        pub(crate) fn retune_after(n: usize, handle: PacingHandle, pacing: Pacing) -> Self {
            Self {
                pauses: Mutex::new(Vec::new()),
                retune: Some((n, handle, pacing)),
            }
        }

        pub(crate) fn take(&self) -> Vec<Duration> {
            std::mem::take(&mut *self.pauses.lock())
        }
    }

    impl Clock for Tape {
        fn pause(&self, d: Duration, _ctx: &Context) {
            let mut pauses = self.pauses.lock();
            pauses.push(d);
            if let Some((n, handle, pacing)) = &self.retune {
                if pauses.len() == *n {
                    handle.set(*pacing);
                }
            }
        }
    }

    /// An engine pausing on `tape` with the shared `pacing`.
    pub(crate) fn taped(tape: &Arc<Tape>, pacing: &PacingHandle) -> SearchEngine {
        SearchEngine::new(tape.clone(), pacing.clone(), Context::new())
    }

    /// A grid that records every kind change, in order.
    pub(crate) struct Recorder {
        pub(crate) grid: Grid,
        pub(crate) log: Vec<(Point, TileKind)>,
    }

    impl Recorder {
        pub(crate) fn new(grid: Grid) -> Self {
            Self {
                grid,
                log: Vec::new(),
            }
        }
    }

    impl Canvas for Recorder {
        fn size(&self) -> i32 {
            self.grid.size()
        }

        fn kind(&self, p: Point) -> Option<TileKind> {
            self.grid.kind(p)
        }

        fn paint(&mut self, p: Point, kind: TileKind) {
            self.log.push((p, kind));
            self.grid.set_kind(p, kind);
        }

        fn label(&mut self, p: Point, label: Option<i32>) {
            self.grid.set_label(p, label);
        }
    }

    /// Build a grid from rows of kind codes (`.`, `B`, `T`).
    pub(crate) fn board(rows: &[&str]) -> Grid {
        let mut g = Grid::new(rows.len() as i32).unwrap();
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                let kind = TileKind::from_code(ch).unwrap();
                g.set_kind(Point::new(x as i32, y as i32), kind);
            }
        }
        g
    }

    #[test]
    fn algorithm_names() {
        for a in Algorithm::ALL {
            assert_eq!(a.to_string().parse::<Algorithm>(), Ok(a));
        }
        assert_eq!("A*".parse::<Algorithm>(), Ok(Algorithm::Astar));
        assert!("dfs".parse::<Algorithm>().is_err());
    }

    #[test]
    fn layout_matches_grid_indexing() {
        let g = Grid::new(4).unwrap();
        let l = Layout::new(4);
        assert_eq!(l.len(), g.len());
        for t in g.iter() {
            assert_eq!(l.idx(t.pos()), g.idx(t.pos()));
        }
        assert_eq!(l.idx(Point::new(4, 0)), None);
        assert_eq!(l.point(6), g.point(6));
    }

    #[test]
    fn outcome_steps() {
        let found = Outcome::Found {
            path: vec![Point::ZERO, Point::new(1, 1)],
            cost: 14,
        };
        assert_eq!(found.steps(), Some(1));
        assert_eq!(Outcome::NoPath.steps(), None);
        assert_eq!(found.to_string(), "path found: 1 steps, cost 14");
    }

    #[test]
    fn runs_are_deterministic() {
        let rows = [
            "T.....",
            ".BBB..",
            "...B..",
            ".B.B.B",
            ".B....",
            "...B.T",
        ];
        for algorithm in Algorithm::ALL {
            for diagonal in [false, true] {
                let mut a = Recorder::new(board(&rows));
                let mut b = Recorder::new(board(&rows));
                let engine = SearchEngine::immediate();
                let start = Point::new(0, 0);
                let end = Point::new(5, 5);
                let oa = engine.run(algorithm, &mut a, start, end, diagonal);
                let ob = engine.run(algorithm, &mut b, start, end, diagonal);
                assert!(oa.is_found());
                assert_eq!(oa, ob);
                assert_eq!(a.log, b.log);
                assert_eq!(a.grid, b.grid);
            }
        }
    }

    #[test]
    fn cancelled_engine_stops_immediately() {
        let engine = SearchEngine::immediate();
        engine.context().cancel();
        let mut g = board(&["T..", "...", "..T"]);
        for algorithm in Algorithm::ALL {
            let out = engine.run(algorithm, &mut g, Point::ZERO, Point::new(2, 2), true);
            assert_eq!(out, Outcome::Cancelled);
        }
    }
}
