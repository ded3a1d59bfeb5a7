//! Shortest-path search over the tile grid.
//!
//! Classic A* over the four cardinal neighbors with uniform edge cost and a
//! Manhattan heuristic. Search nodes live in a dense arena addressed by index;
//! parent links are indices into the same arena, so no search state survives a
//! call. The frontier ordering is total (cost, then heuristic, then insertion
//! order), which makes repeated searches over the same grid byte-identical.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use glam::IVec2;
use strum::IntoEnumIterator;

use crate::direction::Direction;
use crate::grid::Grid;

/// One search node in the arena.
struct Node {
    cell: IVec2,
    /// Best known path cost from the start.
    g: i32,
    /// Manhattan distance to the goal.
    h: i32,
    parent: Option<usize>,
}

/// A frontier entry. Entries are never updated in place; a cost improvement
/// re-pushes the node and the stale duplicate is skipped when popped.
#[derive(PartialEq, Eq)]
struct Frontier {
    f: i32,
    h: i32,
    g: i32,
    /// Push counter, the final tie-breaker.
    seq: usize,
    node: usize,
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap: invert so the lowest (f, h, seq) pops first.
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.h.cmp(&self.h))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn manhattan(a: IVec2, b: IVec2) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

fn reconstruct(nodes: &[Node], end: usize) -> Vec<IVec2> {
    let mut path = Vec::new();
    let mut current = Some(end);
    while let Some(index) = current {
        path.push(nodes[index].cell);
        current = nodes[index].parent;
    }
    path.reverse();
    path
}

/// Finds a shortest 4-connected path from `start` to `goal`.
///
/// Returns the cells from start to goal inclusive, `[start]` when the two
/// coincide, and an empty vector when the goal is unreachable. Walkability is
/// the grid's rule: walls and dispensers block, occupied cells do not.
pub fn find_path(grid: &Grid, start: IVec2, goal: IVec2) -> Vec<IVec2> {
    if start == goal {
        return vec![start];
    }

    let mut nodes = vec![Node {
        cell: start,
        g: 0,
        h: manhattan(start, goal),
        parent: None,
    }];
    let mut index_of: HashMap<IVec2, usize> = HashMap::new();
    index_of.insert(start, 0);

    let mut frontier = BinaryHeap::new();
    let mut seq: usize = 0;
    frontier.push(Frontier {
        f: nodes[0].h,
        h: nodes[0].h,
        g: 0,
        seq,
        node: 0,
    });

    while let Some(entry) = frontier.pop() {
        let current = entry.node;
        // A duplicate left behind by a cost improvement; the definitive pop
        // already happened.
        if entry.g > nodes[current].g {
            continue;
        }

        if nodes[current].cell == goal {
            return reconstruct(&nodes, current);
        }

        for direction in Direction::iter() {
            let neighbor = nodes[current].cell + direction.offset();
            if !grid.is_walkable(neighbor) {
                continue;
            }

            let g = nodes[current].g + 1;
            match index_of.get(&neighbor) {
                None => {
                    let h = manhattan(neighbor, goal);
                    let id = nodes.len();
                    nodes.push(Node {
                        cell: neighbor,
                        g,
                        h,
                        parent: Some(current),
                    });
                    index_of.insert(neighbor, id);
                    seq += 1;
                    frontier.push(Frontier {
                        f: g + h,
                        h,
                        g,
                        seq,
                        node: id,
                    });
                }
                Some(&id) => {
                    if g < nodes[id].g {
                        nodes[id].g = g;
                        nodes[id].parent = Some(current);
                        let h = nodes[id].h;
                        seq += 1;
                        frontier.push(Frontier {
                            f: g + h,
                            h,
                            g,
                            seq,
                            node: id,
                        });
                    }
                }
            }
        }
    }

    Vec::new()
}
