//! Per-query bookkeeping shared by the A* and bidirectional searches.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use boxnav_core::BoxId;
use thiserror::Error;

/// Why a box-graph search produced no path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The frontier ran dry without connecting the two boxes.
    #[error("no path between the boxes")]
    NoPath,
    /// The two search halves met but could not be joined into a walkable
    /// path. This happens when adjacency is not symmetric.
    #[error("search halves met at {meeting} but do not form a valid path")]
    InconsistentJoin { meeting: BoxId },
    /// An endpoint id is outside the graph.
    #[error("box {0} is not part of the graph")]
    UnknownBox(BoxId),
}

// ---------------------------------------------------------------------------
// Direction-tagged frontier
// ---------------------------------------------------------------------------

/// Which end of the query a frontier entry grows from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    /// Grows from the source box toward the destination.
    Forward,
    /// Grows from the destination box toward the source.
    Backward,
}

impl Direction {
    /// The box this direction is heading for.
    #[inline]
    pub(crate) fn goal(self, source: BoxId, destination: BoxId) -> BoxId {
        match self {
            Direction::Forward => destination,
            Direction::Backward => source,
        }
    }
}

/// One pending expansion, ordered by `priority` with `seq` as tie-break.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FrontierEntry {
    pub(crate) priority: f64,
    pub(crate) seq: u64,
    pub(crate) id: BoxId,
    pub(crate) direction: Direction,
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse so BinaryHeap (max-heap) pops the smallest priority first,
        // and among equals the earliest push.
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

/// Priority queue of [`FrontierEntry`] values. Entries pushed with equal
/// priority pop in push order, which keeps results reproducible.
#[derive(Default)]
pub(crate) struct Frontier {
    heap: BinaryHeap<FrontierEntry>,
    next_seq: u64,
}

impl Frontier {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, priority: f64, id: BoxId, direction: Direction) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(FrontierEntry {
            priority,
            seq,
            id,
            direction,
        });
    }

    #[inline]
    pub(crate) fn pop(&mut self) -> Option<FrontierEntry> {
        self.heap.pop()
    }
}

// ---------------------------------------------------------------------------
// Cost / predecessor table
// ---------------------------------------------------------------------------

#[derive(Clone, Default)]
pub(crate) struct Node {
    pub(crate) g: Option<f64>,
    pub(crate) parent: Option<BoxId>,
    pub(crate) open: bool,
}

/// Best-known cost and predecessor of every box, seen from one origin.
pub(crate) struct SearchTable {
    nodes: Vec<Node>,
}

impl SearchTable {
    /// A table for `len` boxes with `origin` reached at cost 0.
    pub(crate) fn new(len: usize, origin: BoxId) -> Self {
        let mut nodes = vec![Node::default(); len];
        nodes[origin.index()] = Node {
            g: Some(0.0),
            parent: None,
            open: true,
        };
        Self { nodes }
    }

    /// Cost from the origin, if the box has been reached.
    #[inline]
    pub(crate) fn cost(&self, id: BoxId) -> Option<f64> {
        self.nodes[id.index()].g
    }

    #[inline]
    pub(crate) fn reached(&self, id: BoxId) -> bool {
        self.nodes[id.index()].g.is_some()
    }

    /// Whether the box still awaits expansion at its current cost.
    #[inline]
    pub(crate) fn is_open(&self, id: BoxId) -> bool {
        self.nodes[id.index()].open
    }

    #[inline]
    pub(crate) fn close(&mut self, id: BoxId) {
        self.nodes[id.index()].open = false;
    }

    /// Try to lower the cost of `id` to `g` via `parent`.
    ///
    /// Returns `true` if the box was unreached or `g` is a strict
    /// improvement; the box is then reopened. A NaN `g` is never stored, so
    /// every recorded cost compares totally.
    pub(crate) fn relax(&mut self, id: BoxId, g: f64, parent: BoxId) -> bool {
        let n = &mut self.nodes[id.index()];
        if g.is_nan() || n.g.is_some_and(|old| g >= old) {
            return false;
        }
        n.g = Some(g);
        n.parent = Some(parent);
        n.open = true;
        true
    }

    /// Follow predecessors from `id` back to the origin. The returned chain
    /// starts at `id` and ends at the origin.
    ///
    /// Returns `None` if the chain is longer than the table, which can only
    /// happen if the predecessor links form a cycle.
    pub(crate) fn chain(&self, id: BoxId) -> Option<Vec<BoxId>> {
        let mut out = vec![id];
        let mut cur = self.nodes[id.index()].parent;
        while let Some(p) = cur {
            if out.len() > self.nodes.len() {
                return None;
            }
            out.push(p);
            cur = self.nodes[p.index()].parent;
        }
        Some(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frontier_pops_lowest_priority_then_oldest() {
        let mut f = Frontier::new();
        f.push(3.0, BoxId(0), Direction::Forward);
        f.push(1.0, BoxId(1), Direction::Backward);
        f.push(1.0, BoxId(2), Direction::Forward);
        f.push(2.0, BoxId(3), Direction::Forward);

        let order: Vec<BoxId> = std::iter::from_fn(|| f.pop()).map(|e| e.id).collect();
        assert_eq!(order, vec![BoxId(1), BoxId(2), BoxId(3), BoxId(0)]);
    }

    #[test]
    fn direction_goal() {
        assert_eq!(Direction::Forward.goal(BoxId(1), BoxId(2)), BoxId(2));
        assert_eq!(Direction::Backward.goal(BoxId(1), BoxId(2)), BoxId(1));
    }

    #[test]
    fn relax_only_on_improvement() {
        let mut t = SearchTable::new(3, BoxId(0));
        assert!(t.reached(BoxId(0)));
        assert!(!t.reached(BoxId(1)));

        assert!(t.relax(BoxId(1), 5.0, BoxId(0)));
        t.close(BoxId(1));
        assert!(!t.relax(BoxId(1), 5.0, BoxId(2)));
        assert!(!t.is_open(BoxId(1)));
        assert!(t.relax(BoxId(1), 4.0, BoxId(2)));
        assert!(t.is_open(BoxId(1)));
        assert_eq!(t.cost(BoxId(1)), Some(4.0));
    }

    #[test]
    fn nan_cost_never_relaxes() {
        let mut t = SearchTable::new(3, BoxId(0));
        assert!(!t.relax(BoxId(1), f64::NAN, BoxId(0)));
        assert!(!t.reached(BoxId(1)));

        assert!(t.relax(BoxId(1), 2.0, BoxId(0)));
        t.close(BoxId(1));
        assert!(!t.relax(BoxId(1), f64::NAN, BoxId(2)));
        assert!(!t.is_open(BoxId(1)));
        assert_eq!(t.cost(BoxId(1)), Some(2.0));
    }

    #[test]
    fn chain_walks_to_origin() {
        let mut t = SearchTable::new(4, BoxId(0));
        t.relax(BoxId(1), 1.0, BoxId(0));
        t.relax(BoxId(2), 2.0, BoxId(1));
        assert_eq!(
            t.chain(BoxId(2)),
            Some(vec![BoxId(2), BoxId(1), BoxId(0)])
        );
        assert_eq!(t.chain(BoxId(0)), Some(vec![BoxId(0)]));
    }
}
