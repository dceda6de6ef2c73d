//! The [`Graph`] arena: nodes with a position and directed, velocity-tagged
//! edges.
//!
//! Nodes are addressed by [`NodeId`], a dense index into the arena. Nodes are
//! never removed, so an id stays valid for the lifetime of its graph. Edges
//! live in their start node's outgoing list; each node additionally keeps the
//! ids of the nodes that point at it so it can be detached cheaply.

use std::fmt;

use crate::error::GraphError;
use crate::geom::Position;
use crate::primitives::{Distance, Duration, Velocity};

// ---------------------------------------------------------------------------
// NodeId
// ---------------------------------------------------------------------------

/// Dense index of a node inside its [`Graph`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(usize);

impl NodeId {
    #[inline]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Edge
// ---------------------------------------------------------------------------

/// A directed connection from `start` to `end`.
///
/// The distance is fixed when the edge is created from the two node
/// positions; the traversal duration follows from it and the velocity.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    pub start: NodeId,
    pub end: NodeId,
    pub distance: Distance,
    pub velocity: Velocity,
}

impl Edge {
    /// Time needed to travel the edge at its velocity.
    #[inline]
    pub fn traversal_duration(&self) -> Duration {
        self.distance / self.velocity
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {} ({} @ {})",
            self.start, self.end, self.distance, self.velocity
        )
    }
}

// ---------------------------------------------------------------------------
// Node
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    position: Position,
    outgoing: Vec<Edge>,
    incoming: Vec<NodeId>,
}

impl Node {
    #[inline]
    pub fn position(&self) -> Position {
        self.position
    }

    #[inline]
    pub fn outgoing(&self) -> &[Edge] {
        &self.outgoing
    }

    /// Start nodes of every edge ending here.
    #[inline]
    pub fn incoming(&self) -> &[NodeId] {
        &self.incoming
    }
}

// ---------------------------------------------------------------------------
// Graph
// ---------------------------------------------------------------------------

/// Arena of nodes and their outgoing edges.
///
/// Deserialization rebuilds the graph edge by edge and rejects data that
/// [`connect`](Self::connect) could not have produced.
#[derive(Clone, Debug, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawGraph")
)]
pub struct Graph {
    nodes: Vec<Node>,
    edge_count: usize,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(nodes: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(nodes),
            edge_count: 0,
        }
    }

    /// Add an unconnected node at `position`.
    pub fn add_node(&mut self, position: Position) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            position,
            ..Node::default()
        });
        id
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    #[inline]
    pub fn contains(&self, id: NodeId) -> bool {
        id.0 < self.nodes.len()
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Position of `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this graph.
    #[inline]
    pub fn position(&self, id: NodeId) -> Position {
        self.nodes[id.0].position
    }

    /// Outgoing edges of `id`, or an empty slice for an unknown node.
    #[inline]
    pub fn outgoing(&self, id: NodeId) -> &[Edge] {
        self.nodes.get(id.0).map(|n| n.outgoing.as_slice()).unwrap_or_default()
    }

    /// Start nodes of the edges ending at `id`.
    #[inline]
    pub fn incoming(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(id.0).map(|n| n.incoming.as_slice()).unwrap_or_default()
    }

    /// The edge `from -> to`, if present.
    pub fn edge(&self, from: NodeId, to: NodeId) -> Option<Edge> {
        self.outgoing(from).iter().find(|e| e.end == to).copied()
    }

    pub fn node_ids(&self) -> impl ExactSizeIterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.nodes.iter().flat_map(|n| n.outgoing.iter())
    }

    /// Highest traversal velocity over all edges, `None` for an edge-less
    /// graph.
    pub fn max_velocity(&self) -> Option<Velocity> {
        self.edges().map(|e| e.velocity).max()
    }

    /// Add a directed edge `from -> to` travelled at `velocity`.
    ///
    /// An existing `from -> to` edge is replaced.
    pub fn connect(
        &mut self,
        from: NodeId,
        to: NodeId,
        velocity: Velocity,
    ) -> Result<Edge, GraphError> {
        self.check(from)?;
        self.check(to)?;
        if !velocity.is_valid() {
            return Err(GraphError::InvalidVelocity(velocity));
        }

        let edge = Edge {
            start: from,
            end: to,
            distance: Distance::between(self.nodes[from.0].position, self.nodes[to.0].position),
            velocity,
        };

        let outgoing = &mut self.nodes[from.0].outgoing;
        if let Some(existing) = outgoing.iter_mut().find(|e| e.end == to) {
            *existing = edge;
            return Ok(edge);
        }
        outgoing.push(edge);
        self.nodes[to.0].incoming.push(from);
        self.edge_count += 1;
        Ok(edge)
    }

    /// Remove the edge `from -> to`, returning it if it existed.
    pub fn disconnect(&mut self, from: NodeId, to: NodeId) -> Option<Edge> {
        let outgoing = &mut self.nodes.get_mut(from.0)?.outgoing;
        let i = outgoing.iter().position(|e| e.end == to)?;
        let edge = outgoing.swap_remove(i);

        let incoming = &mut self.nodes[to.0].incoming;
        if let Some(j) = incoming.iter().position(|&n| n == from) {
            incoming.swap_remove(j);
        }
        self.edge_count -= 1;
        Some(edge)
    }

    /// Remove every edge that starts or ends at `id`.
    pub fn disconnect_node(&mut self, id: NodeId) -> Result<(), GraphError> {
        self.check(id)?;

        let outgoing = std::mem::take(&mut self.nodes[id.0].outgoing);
        for edge in &outgoing {
            let incoming = &mut self.nodes[edge.end.0].incoming;
            if let Some(j) = incoming.iter().position(|&n| n == id) {
                incoming.swap_remove(j);
            }
        }
        self.edge_count -= outgoing.len();

        // A self-loop was already dropped with the outgoing list above.
        let incoming = std::mem::take(&mut self.nodes[id.0].incoming);
        for from in incoming {
            let list = &mut self.nodes[from.0].outgoing;
            if let Some(i) = list.iter().position(|e| e.end == id) {
                list.swap_remove(i);
                self.edge_count -= 1;
            }
        }
        Ok(())
    }

    #[inline]
    fn check(&self, id: NodeId) -> Result<(), GraphError> {
        if self.contains(id) {
            Ok(())
        } else {
            Err(GraphError::UnknownNode(id))
        }
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawGraph {
    nodes: Vec<Node>,
    edge_count: usize,
}

#[cfg(feature = "serde")]
impl TryFrom<RawGraph> for Graph {
    type Error = GraphError;

    /// Edge distances are recomputed from the node positions.
    fn try_from(raw: RawGraph) -> Result<Self, GraphError> {
        let mut graph = Graph::with_capacity(raw.nodes.len());
        for node in &raw.nodes {
            graph.add_node(node.position);
        }

        for (i, node) in raw.nodes.iter().enumerate() {
            let id = NodeId(i);
            for edge in &node.outgoing {
                if edge.start != id {
                    return Err(GraphError::Inconsistent("edge stored under a foreign node"));
                }
                if graph.edge(id, edge.end).is_some() {
                    return Err(GraphError::Inconsistent("duplicate edge"));
                }
                graph.connect(id, edge.end, edge.velocity)?;
            }
        }
        if graph.edge_count != raw.edge_count {
            return Err(GraphError::Inconsistent("edge count mismatch"));
        }

        for (rebuilt, stored) in graph.nodes.iter_mut().zip(raw.nodes) {
            let mut expected = rebuilt.incoming.clone();
            let mut given = stored.incoming.clone();
            expected.sort_unstable();
            given.sort_unstable();
            if expected != given {
                return Err(GraphError::Inconsistent("incoming list mismatch"));
            }
            // Keep the stored order so a round trip is exact.
            rebuilt.incoming = stored.incoming;
        }
        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mps(v: f64) -> Velocity {
        Velocity::from_meters_per_second(v)
    }

    fn line() -> (Graph, NodeId, NodeId, NodeId) {
        let mut g = Graph::new();
        let a = g.add_node(Position::new(0.0, 0.0));
        let b = g.add_node(Position::new(3.0, 4.0));
        let c = g.add_node(Position::new(3.0, 10.0));
        (g, a, b, c)
    }

    #[test]
    fn connect_computes_distance_and_duration() {
        let (mut g, a, b, _) = line();
        let e = g.connect(a, b, mps(2.0)).unwrap();
        assert_eq!(e.distance, Distance::from_meters(5.0));
        assert_eq!(e.traversal_duration(), Duration::from_seconds(2.5));
        assert_eq!(g.edge(a, b), Some(e));
        assert_eq!(g.edge(b, a), None);
        assert_eq!(g.incoming(b), &[a]);
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn connect_replaces_existing_edge() {
        let (mut g, a, b, _) = line();
        g.connect(a, b, mps(1.0)).unwrap();
        g.connect(a, b, mps(5.0)).unwrap();
        assert_eq!(g.outgoing(a).len(), 1);
        assert_eq!(g.incoming(b).len(), 1);
        assert_eq!(g.edge(a, b).unwrap().velocity, mps(5.0));
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn connect_rejects_bad_input() {
        let (mut g, a, b, _) = line();
        assert_eq!(
            g.connect(a, b, mps(0.0)),
            Err(GraphError::InvalidVelocity(mps(0.0)))
        );
        let ghost = NodeId::new(99);
        assert_eq!(
            g.connect(a, ghost, mps(1.0)),
            Err(GraphError::UnknownNode(ghost))
        );
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn disconnect_removes_both_sides() {
        let (mut g, a, b, _) = line();
        g.connect(a, b, mps(1.0)).unwrap();
        assert!(g.disconnect(a, b).is_some());
        assert!(g.disconnect(a, b).is_none());
        assert!(g.outgoing(a).is_empty());
        assert!(g.incoming(b).is_empty());
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn disconnect_node_detaches_everything() {
        let (mut g, a, b, c) = line();
        for (x, y) in [(a, b), (b, a), (b, c), (c, b), (a, c)] {
            g.connect(x, y, mps(1.0)).unwrap();
        }
        g.disconnect_node(b).unwrap();
        assert!(g.outgoing(b).is_empty());
        assert!(g.incoming(b).is_empty());
        assert_eq!(g.edge(a, b), None);
        assert_eq!(g.edge(c, b), None);
        assert!(g.edge(a, c).is_some());
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn disconnect_node_with_self_loop() {
        let (mut g, a, b, _) = line();
        g.connect(a, a, mps(1.0)).unwrap();
        g.connect(a, b, mps(1.0)).unwrap();
        g.disconnect_node(a).unwrap();
        assert_eq!(g.edge_count(), 0);
        assert!(g.incoming(b).is_empty());
    }

    #[test]
    fn max_velocity_over_edges() {
        let (mut g, a, b, c) = line();
        assert_eq!(g.max_velocity(), None);
        g.connect(a, b, mps(1.0)).unwrap();
        g.connect(b, c, mps(7.5)).unwrap();
        g.connect(c, a, mps(3.0)).unwrap();
        assert_eq!(g.max_velocity(), Some(mps(7.5)));
    }
}
