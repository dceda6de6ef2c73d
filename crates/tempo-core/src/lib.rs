//! **tempo-core**: primitives and graph model for time-based pathfinding.
//!
//! This crate provides the data the search in `tempo-paths` runs over:
//! SI scalar quantities ([`Distance`], [`Duration`], [`Velocity`]), world
//! and grid geometry, a node/edge [`Graph`] arena and a [`Grid`] factory that
//! lays graph nodes out on a lattice.

pub mod error;
pub mod geom;
pub mod graph;
pub mod grid;
pub mod primitives;

pub use error::GraphError;
pub use geom::{GridIter, GridPosition, GridSize, Position, Size};
pub use graph::{Edge, Graph, Node, NodeId};
pub use grid::Grid;
pub use primitives::{Distance, Duration, Velocity};
