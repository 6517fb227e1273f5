use fixedbitset::FixedBitSet;
use petgraph::graph::NodeIndex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexStatus {
    Unvisited,
    Open,
    Closed,
}

/// Per-vertex bookkeeping of one search run, indexed by [`NodeIndex`].
///
/// The tables are allocated when a search starts and are consumed when its
/// route is reconstructed, so concurrent searches never share them.
#[derive(Debug, Clone)]
pub struct SearchState {
    g: Vec<f64>,
    f: Vec<f64>,
    predecessor: Vec<Option<NodeIndex>>,
    open: FixedBitSet,
    closed: FixedBitSet,
}

impl SearchState {
    pub fn new(node_count: usize) -> Self {
        SearchState {
            g: vec![f64::INFINITY; node_count],
            f: vec![f64::INFINITY; node_count],
            predecessor: vec![None; node_count],
            open: FixedBitSet::with_capacity(node_count),
            closed: FixedBitSet::with_capacity(node_count),
        }
    }

    /// Open the start vertex: zero cost and itself as predecessor.
    pub fn open_start(&mut self, start: NodeIndex, estimate: f64) {
        let i = start.index();
        self.g[i] = 0.0;
        self.f[i] = estimate;
        self.predecessor[i] = Some(start);
        self.open.insert(i);
    }

    /// Record a cheaper path to `vertex` through `via` and (re)open it.
    /// Returns whether the vertex had already been closed.
    pub fn relax(&mut self, vertex: NodeIndex, via: NodeIndex, g: f64, f: f64) -> bool {
        let i = vertex.index();
        debug_assert!(g < self.g[i]);
        self.g[i] = g;
        self.f[i] = f;
        self.predecessor[i] = Some(via);
        self.open.insert(i);
        let reopened = self.closed[i];
        self.closed.set(i, false);
        reopened
    }

    pub fn close(&mut self, vertex: NodeIndex) {
        let i = vertex.index();
        self.open.set(i, false);
        self.closed.insert(i);
    }

    pub fn status(&self, vertex: NodeIndex) -> VertexStatus {
        let i = vertex.index();
        if self.closed[i] {
            VertexStatus::Closed
        } else if self.open[i] {
            VertexStatus::Open
        } else {
            VertexStatus::Unvisited
        }
    }

    pub fn is_closed(&self, vertex: NodeIndex) -> bool {
        self.closed[vertex.index()]
    }

    pub fn g(&self, vertex: NodeIndex) -> f64 {
        self.g[vertex.index()]
    }

    pub fn f(&self, vertex: NodeIndex) -> f64 {
        self.f[vertex.index()]
    }

    pub fn predecessor(&self, vertex: NodeIndex) -> Option<NodeIndex> {
        self.predecessor.get(vertex.index()).copied().flatten()
    }

    pub fn predecessors(&self) -> &[Option<NodeIndex>] {
        &self.predecessor
    }

    /// Number of vertices currently closed
    pub fn closed_count(&self) -> usize {
        self.closed.count_ones(..)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_transitions() {
        let mut state = SearchState::new(3);
        let (s, v) = (NodeIndex::new(0), NodeIndex::new(2));
        assert_eq!(state.status(s), VertexStatus::Unvisited);
        assert_eq!(state.g(v), f64::INFINITY);
        assert_eq!(state.predecessor(v), None);

        state.open_start(s, 1.5);
        assert_eq!(state.status(s), VertexStatus::Open);
        assert_eq!(state.g(s), 0.0);
        assert_eq!(state.f(s), 1.5);
        assert_eq!(state.predecessor(s), Some(s));

        state.close(s);
        assert_eq!(state.status(s), VertexStatus::Closed);
        assert!(!state.relax(v, s, 4.0, 5.0));
        assert_eq!(state.status(v), VertexStatus::Open);
        assert_eq!(state.predecessor(v), Some(s));

        state.close(v);
        assert_eq!(state.closed_count(), 2);
        // a cheaper path found after closing reopens the vertex
        assert!(state.relax(v, s, 3.0, 3.0));
        assert_eq!(state.status(v), VertexStatus::Open);
        assert_eq!(state.g(v), 3.0);
        assert_eq!(state.closed_count(), 1);
    }
}
