use thiserror::Error;

use tempo_core::{GraphError, NodeId, Velocity};

/// Reasons a search refuses to start.
///
/// An unreachable goal is not an error: the search then returns a
/// [`PathType::ClosestApproach`](crate::PathType::ClosestApproach) path.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PathError {
    #[error("maximum velocity {0} must be finite and positive")]
    InvalidVelocity(Velocity),
    #[error("node {0} is not part of the graph")]
    UnknownNode(NodeId),
    #[error("graph has no edges to derive a maximum velocity from")]
    NoEdges,
    #[error(transparent)]
    Graph(#[from] GraphError),
}
