use std::fmt;

use tempo_core::{Distance, Duration, Edge, NodeId, Position};

use crate::traits::TraversalGraph;

/// Whether a [`Path`] reaches the requested goal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathType {
    /// The path ends at the goal.
    Complete,
    /// The goal was unreachable; the path ends at the node whose estimated
    /// remaining time to the goal was smallest.
    ClosestApproach,
}

/// A route produced by the search: the traversed edges in order, plus
/// their totals.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    path_type: PathType,
    start: NodeId,
    end: NodeId,
    edges: Vec<Edge>,
    duration: Duration,
    distance: Distance,
}

impl Path {
    /// Build a path from consecutive edges. With no edges the path is the
    /// single node `start`.
    pub fn new(path_type: PathType, start: NodeId, edges: Vec<Edge>) -> Self {
        let end = edges.last().map_or(start, |e| e.end);
        let duration = edges.iter().map(Edge::traversal_duration).sum();
        let distance = edges.iter().map(|e| e.distance).sum();
        Self {
            path_type,
            start,
            end,
            edges,
            duration,
            distance,
        }
    }

    #[inline]
    pub fn path_type(&self) -> PathType {
        self.path_type
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.path_type == PathType::Complete
    }

    #[inline]
    pub fn start(&self) -> NodeId {
        self.start
    }

    /// Terminal node: the goal for a complete path.
    #[inline]
    pub fn end(&self) -> NodeId {
        self.end
    }

    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Sum of the edges' traversal durations.
    #[inline]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    #[inline]
    pub fn distance(&self) -> Distance {
        self.distance
    }

    /// Visited nodes in order, `start` and `end` included.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::once(self.start).chain(self.edges.iter().map(|e| e.end))
    }

    /// World positions of [`nodes`](Self::nodes).
    pub fn positions<'a, G: TraversalGraph>(
        &'a self,
        graph: &'a G,
    ) -> impl Iterator<Item = Position> + 'a {
        self.nodes().map(|n| graph.position(n))
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?} {} -> {}: {} edges, {}, {}",
            self.path_type,
            self.start,
            self.end,
            self.edges.len(),
            self.duration,
            self.distance
        )
    }
}
