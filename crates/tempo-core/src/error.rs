use thiserror::Error;

use crate::geom::{GridPosition, GridSize};
use crate::graph::NodeId;
use crate::primitives::Velocity;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("grid position {0} is out of bounds")]
    OutOfBounds(GridPosition),
    #[error("unknown node {0}")]
    UnknownNode(NodeId),
    #[error("invalid traversal velocity {0}")]
    InvalidVelocity(Velocity),
    #[error("invalid grid size {0}")]
    InvalidSize(GridSize),
    #[error("inconsistent graph data: {0}")]
    Inconsistent(&'static str),
}
