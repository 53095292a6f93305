use std::collections::VecDeque;

use pathviz_core::{Neighbors, Point, TileKind};

use crate::canvas::Canvas;
use crate::engine::{Layout, NO_PARENT, Outcome, SearchEngine};
use crate::pacing::Pacing;

impl SearchEngine {
    /// Unweighted breadth-first search from `start` to `end`.
    ///
    /// Every newly discovered tile is painted `Visited`. Once `end` is
    /// discovered the path is walked back from `end`, turning its `Visited`
    /// tiles into `Path` labeled with their distance from `start`, and `end`
    /// is labeled with the total distance. An unreachable `end` is left
    /// unlabeled.
    pub fn bfs<C: Canvas + ?Sized>(
        &self,
        canvas: &mut C,
        start: Point,
        end: Point,
        diagonal: bool,
    ) -> Outcome {
        let layout = Layout::new(canvas.size());
        let (Some(si), Some(ei)) = (layout.idx(start), layout.idx(end)) else {
            return Outcome::NoPath;
        };

        let step_delay = self.pacing().step_delay();

        let mut visited = vec![false; layout.len()];
        let mut distance = vec![0i32; layout.len()];
        let mut parent = vec![NO_PARENT; layout.len()];
        let mut queue: VecDeque<usize> = VecDeque::new();
        let mut nb = Neighbors::new();

        visited[si] = true;
        queue.push_back(si);
        let mut reached = false;

        while let Some(ui) = queue.pop_front() {
            if self.cancelled() {
                return Outcome::Cancelled;
            }
            let u = layout.point(ui);

            for &v in nb.around(u, diagonal, |p| layout.contains(p)) {
                let Some(vi) = layout.idx(v) else {
                    continue;
                };
                if visited[vi] || canvas.kind(v) == Some(TileKind::Block) {
                    continue;
                }
                visited[vi] = true;
                distance[vi] = distance[ui] + 1;
                parent[vi] = ui;
                if vi == ei {
                    reached = true;
                    break;
                }
                canvas.paint(v, TileKind::Visited);
                queue.push_back(vi);
            }

            if reached {
                break;
            }
            self.pause(step_delay);
        }

        if self.cancelled() {
            return Outcome::Cancelled;
        }
        if !reached {
            return Outcome::NoPath;
        }

        // Reveal from the end backward.
        let total = distance[ei];
        let per_node = Pacing::per_node(self.pacing().path_draw_budget(), total as usize);
        let mut path = vec![end];
        let mut ci = parent[ei];
        while ci != NO_PARENT {
            if self.cancelled() {
                return Outcome::Cancelled;
            }
            let p = layout.point(ci);
            path.push(p);
            if canvas.kind(p) == Some(TileKind::Visited) {
                canvas.paint(p, TileKind::Path);
                canvas.label(p, Some(distance[ci]));
                self.pause(per_node);
            }
            ci = parent[ci];
        }
        canvas.label(end, Some(total));

        path.reverse();
        Outcome::Found { path, cost: total }
    }
}
