//! Animation pacing: how long a search pauses between steps, and the clock
//! that performs the pauses.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use pathviz_core::Context;

/// Longest single sleep taken by [`SystemClock`] before re-checking for
/// cancellation.
const SLICE: Duration = Duration::from_millis(10);

/// Delay configuration for an animated search.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pacing {
    /// Pause between node-expansion steps.
    pub step_delay: Duration,
    /// Total time over which a found path is revealed.
    pub path_draw_budget: Duration,
}

impl Pacing {
    /// No pauses at all.
    pub const ZERO: Self = Self {
        step_delay: Duration::ZERO,
        path_draw_budget: Duration::ZERO,
    };

    /// Pause per revealed node for a path of `nodes` nodes.
    pub fn per_node(budget: Duration, nodes: usize) -> Duration {
        match u32::try_from(nodes) {
            Ok(0) => Duration::ZERO,
            Ok(n) => budget / n,
            Err(_) => Duration::ZERO,
        }
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            step_delay: Duration::from_millis(5),
            path_draw_budget: Duration::from_secs(1),
        }
    }
}

/// Pacing shared between the controller and a running worker.
///
/// Clones share the same values. The engine reads each knob once, when the
/// phase that uses it begins.
#[derive(Clone, Debug)]
pub struct PacingHandle {
    step_ns: Arc<AtomicU64>,
    budget_ns: Arc<AtomicU64>,
}

impl PacingHandle {
    pub fn new(pacing: Pacing) -> Self {
        Self {
            step_ns: Arc::new(AtomicU64::new(nanos(pacing.step_delay))),
            budget_ns: Arc::new(AtomicU64::new(nanos(pacing.path_draw_budget))),
        }
    }

    /// Current values.
    pub fn get(&self) -> Pacing {
        Pacing {
            step_delay: self.step_delay(),
            path_draw_budget: self.path_draw_budget(),
        }
    }

    /// Replace both values.
    pub fn set(&self, pacing: Pacing) {
        self.step_ns.store(nanos(pacing.step_delay), Ordering::Relaxed);
        self.budget_ns
            .store(nanos(pacing.path_draw_budget), Ordering::Relaxed);
    }

    #[inline]
    pub fn step_delay(&self) -> Duration {
        Duration::from_nanos(self.step_ns.load(Ordering::Relaxed))
    }

    #[inline]
    pub fn path_draw_budget(&self) -> Duration {
        Duration::from_nanos(self.budget_ns.load(Ordering::Relaxed))
    }
}

impl Default for PacingHandle {
    fn default() -> Self {
        Self::new(Pacing::default())
    }
}

fn nanos(d: Duration) -> u64 {
    u64::try_from(d.as_nanos()).unwrap_or(u64::MAX)
}

/// Source of animation pauses.
pub trait Clock: Send + Sync {
    /// Pause for `d`, returning early once `ctx` is cancelled.
    fn pause(&self, d: Duration, ctx: &Context);
}

/// Wall-clock pauses.
#[derive(Copy, Clone, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn pause(&self, d: Duration, ctx: &Context) {
        if d.is_zero() {
            return;
        }
        let deadline = Instant::now() + d;
        loop {
            if ctx.is_done() {
                return;
            }
            let now = Instant::now();
            if now >= deadline {
                return;
            }
            std::thread::sleep((deadline - now).min(SLICE));
        }
    }
}

/// A clock that never waits.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoDelay;

impl Clock for NoDelay {
    #[inline]
    fn pause(&self, _d: Duration, _ctx: &Context) {}
}
