//! Exact open-grid cost maps used as the A* heuristic.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use pathviz_core::{Neighbors, Point};

use crate::cost::step_cost;
use crate::engine::Layout;

/// Sentinel meaning "not reached" in cost maps.
pub(crate) const UNREACHABLE: i32 = i32::MAX;

/// Reference into the cost map, ordered by `cost` for use in `BinaryHeap`.
#[derive(Clone, Copy, Eq, PartialEq)]
struct CostRef {
    idx: usize,
    cost: i32,
}

impl Ord for CostRef {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest cost first.
        other.cost.cmp(&self.cost)
    }
}

impl PartialOrd for CostRef {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Cost of the cheapest 8-way route from every tile to `goal`, ignoring
/// obstacles.
///
/// Computed by a Dijkstra relaxation seeded at `goal` with 10/14 move costs,
/// so each entry equals the octile distance. The result is indexed like the
/// grid (column-outer).
pub(crate) fn cost_map(layout: Layout, goal: Point) -> Vec<i32> {
    let mut map = vec![UNREACHABLE; layout.len()];
    let Some(gi) = layout.idx(goal) else {
        return map;
    };

    let mut open: BinaryHeap<CostRef> = BinaryHeap::new();
    map[gi] = 0;
    open.push(CostRef { idx: gi, cost: 0 });

    let mut nb = Neighbors::new();

    while let Some(current) = open.pop() {
        let ci = current.idx;
        // Skip stale entries.
        if current.cost > map[ci] {
            continue;
        }
        let cp = layout.point(ci);

        for &np in nb.around(cp, true, |p| layout.contains(p)) {
            let Some(ni) = layout.idx(np) else {
                continue;
            };
            let tentative = current.cost + step_cost(cp, np);
            if tentative >= map[ni] {
                continue;
            }
            map[ni] = tentative;
            open.push(CostRef {
                idx: ni,
                cost: tentative,
            });
        }
    }

    map
}
