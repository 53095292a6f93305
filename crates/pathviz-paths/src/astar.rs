use std::cmp::Ordering;
use std::collections::BinaryHeap;

use pathviz_core::{Neighbors, Point, TileKind};

use crate::canvas::Canvas;
use crate::cost::step_cost;
use crate::engine::{Layout, NO_PARENT, Outcome, SearchEngine};
use crate::heuristic::{self, UNREACHABLE};
use crate::pacing::Pacing;

/// Label given to the end tile when it cannot be reached.
pub const NO_PATH_LABEL: i32 = -1;

/// Open-list entry: lowest `f` first, most recently pushed first on ties.
#[derive(Clone, Copy, Eq, PartialEq)]
struct OpenRef {
    idx: usize,
    f: i32,
    seq: u64,
}

impl Ord for OpenRef {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse on `f` so BinaryHeap (max-heap) pops smallest f first.
        other.f.cmp(&self.f).then(self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for OpenRef {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl SearchEngine {
    /// A* from `start` to `end` over 8-way moves costing 10 (orthogonal) or
    /// 14 (diagonal).
    ///
    /// The heuristic is the exact cost to `end` on an obstacle-free board,
    /// precomputed by a Dijkstra pass seeded at `end`. Expanded tiles are
    /// painted `Visited`, tiles entering the open list `VisitedAlt`. On
    /// success the path is revealed from the end backward as `Path` tiles
    /// with descending step labels and `end` is labeled with the step count;
    /// otherwise `end` is labeled [`NO_PATH_LABEL`].
    pub fn astar<C: Canvas + ?Sized>(&self, canvas: &mut C, start: Point, end: Point) -> Outcome {
        let layout = Layout::new(canvas.size());
        let (Some(si), Some(ei)) = (layout.idx(start), layout.idx(end)) else {
            return Outcome::NoPath;
        };

        let h = heuristic::cost_map(layout, end);
        let step_delay = self.pacing().step_delay();

        let mut g = vec![UNREACHABLE; layout.len()];
        let mut parent = vec![NO_PARENT; layout.len()];
        let mut closed = vec![false; layout.len()];
        let mut open: BinaryHeap<OpenRef> = BinaryHeap::new();
        let mut seq: u64 = 0;
        let mut nb = Neighbors::new();

        g[si] = 0;
        open.push(OpenRef {
            idx: si,
            f: h[si],
            seq,
        });
        let mut reached = false;

        'search: while let Some(current) = open.pop() {
            let ui = current.idx;
            // Skip stale entries.
            if closed[ui] {
                continue;
            }
            if self.cancelled() {
                return Outcome::Cancelled;
            }
            closed[ui] = true;
            if ui == ei {
                reached = true;
                break;
            }

            let u = layout.point(ui);
            if ui != si {
                canvas.paint(u, TileKind::Visited);
            }

            for &v in nb.around(u, true, |p| layout.contains(p)) {
                let Some(vi) = layout.idx(v) else {
                    continue;
                };
                if closed[vi] || canvas.kind(v) == Some(TileKind::Block) {
                    continue;
                }
                self.pause(step_delay);
                if self.cancelled() {
                    return Outcome::Cancelled;
                }
                if vi == ei {
                    reached = true;
                } else {
                    canvas.paint(v, TileKind::VisitedAlt);
                }

                let tentative = g[ui] + step_cost(u, v);
                if tentative < g[vi] {
                    g[vi] = tentative;
                    parent[vi] = ui;
                    seq += 1;
                    open.push(OpenRef {
                        idx: vi,
                        f: tentative + h[vi],
                        seq,
                    });
                }
            }

            if reached {
                break 'search;
            }
        }

        if !reached || parent[ei] == NO_PARENT {
            canvas.label(end, Some(NO_PATH_LABEL));
            return Outcome::NoPath;
        }

        // Intermediate tiles, end-adjacent first.
        let mut trail = Vec::new();
        let mut ci = parent[ei];
        while ci != si {
            trail.push(ci);
            ci = parent[ci];
        }
        let len = trail.len();
        canvas.label(end, Some(len as i32 + 1));

        let per_node = Pacing::per_node(self.pacing().path_draw_budget(), len);
        for (k, &ti) in trail.iter().enumerate() {
            if self.cancelled() {
                return Outcome::Cancelled;
            }
            let p = layout.point(ti);
            canvas.paint(p, TileKind::Path);
            canvas.label(p, Some((len - k) as i32));
            self.pause(per_node);
        }

        let mut path = Vec::with_capacity(len + 2);
        path.push(start);
        path.extend(trail.iter().rev().map(|&i| layout.point(i)));
        path.push(end);
        Outcome::Found { path, cost: g[ei] }
    }
}
