use boxnav_core::{BoxId, Mesh, edge_cost};

/// Minimal graph interface: neighbor enumeration over box ids.
pub trait BoxGraph {
    /// Number of boxes. Valid ids are `0..box_count()`.
    fn box_count(&self) -> usize;

    /// Append neighbors of `id` into `buf`. The caller clears `buf` before calling.
    fn neighbors(&self, id: BoxId, buf: &mut Vec<BoxId>);

    /// Whether `b` is a direct neighbor of `a`.
    fn is_adjacent(&self, a: BoxId, b: BoxId) -> bool {
        let mut buf = Vec::new();
        self.neighbors(a, &mut buf);
        buf.contains(&b)
    }
}

/// Graph with weighted (non-negative) edges.
pub trait WeightedGraph: BoxGraph {
    /// Cost of moving from `from` to adjacent `to`. Must be >= 0.
    fn cost(&self, from: BoxId, to: BoxId) -> f64;
}

/// Full A* graph with a consistent heuristic.
pub trait AstarGraph: WeightedGraph {
    /// Heuristic estimate of the remaining cost from `from` to `to`.
    /// Must never overestimate the true cost (admissible).
    fn estimate(&self, from: BoxId, to: BoxId) -> f64;
}

impl BoxGraph for Mesh {
    #[inline]
    fn box_count(&self) -> usize {
        self.len()
    }

    #[inline]
    fn neighbors(&self, id: BoxId, buf: &mut Vec<BoxId>) {
        buf.extend_from_slice(Mesh::neighbors(self, id));
    }

    #[inline]
    fn is_adjacent(&self, a: BoxId, b: BoxId) -> bool {
        Mesh::is_adjacent(self, a, b)
    }
}

impl WeightedGraph for Mesh {
    #[inline]
    fn cost(&self, from: BoxId, to: BoxId) -> f64 {
        edge_cost(self.rect(from), self.rect(to))
    }
}

impl AstarGraph for Mesh {
    #[inline]
    fn estimate(&self, from: BoxId, to: BoxId) -> f64 {
        edge_cost(self.rect(from), self.rect(to))
    }
}
