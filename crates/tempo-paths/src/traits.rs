use tempo_core::{Edge, Graph, Grid, NodeId, Position, Velocity};

/// Read-only view of a graph the search can walk.
///
/// Node ids must be dense: every id in `0..node_count()` is a valid node.
pub trait TraversalGraph {
    /// Number of nodes; bounds every [`NodeId`] passed to the other methods.
    fn node_count(&self) -> usize;

    /// World position of `node`, used for the straight-line heuristic.
    fn position(&self, node: NodeId) -> Position;

    /// Edges leaving `node`.
    fn outgoing(&self, node: NodeId) -> &[Edge];

    /// Highest traversal velocity of any edge, or `None` if there are no
    /// edges. Passing this as the search velocity keeps the heuristic
    /// admissible.
    fn max_velocity(&self) -> Option<Velocity> {
        (0..self.node_count())
            .flat_map(|i| self.outgoing(NodeId::new(i)))
            .map(|e| e.velocity)
            .max()
    }
}

impl TraversalGraph for Graph {
    #[inline]
    fn node_count(&self) -> usize {
        Graph::node_count(self)
    }

    #[inline]
    fn position(&self, node: NodeId) -> Position {
        Graph::position(self, node)
    }

    #[inline]
    fn outgoing(&self, node: NodeId) -> &[Edge] {
        Graph::outgoing(self, node)
    }

    fn max_velocity(&self) -> Option<Velocity> {
        Graph::max_velocity(self)
    }
}

impl TraversalGraph for Grid {
    #[inline]
    fn node_count(&self) -> usize {
        self.graph().node_count()
    }

    #[inline]
    fn position(&self, node: NodeId) -> Position {
        self.graph().position(node)
    }

    #[inline]
    fn outgoing(&self, node: NodeId) -> &[Edge] {
        self.graph().outgoing(node)
    }

    fn max_velocity(&self) -> Option<Velocity> {
        self.graph().max_velocity()
    }
}
