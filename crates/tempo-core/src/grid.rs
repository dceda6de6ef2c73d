//! The [`Grid`] type: a rectangular lattice of graph nodes.
//!
//! Every cell owns exactly one node of the underlying [`Graph`]. The node of
//! cell `(x, y)` sits at world position `(x * cell_width, y * cell_height)`
//! and its id equals the cell's row-major index, so lookups in both
//! directions are arithmetic.

use crate::error::GraphError;
use crate::geom::{GridPosition, GridSize, Position, Size};
use crate::graph::{Edge, Graph, NodeId};
use crate::primitives::Velocity;

/// Which neighbours a freshly built grid connects.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Connections {
    Lateral,
    Diagonal,
    LateralAndDiagonal,
}

impl Connections {
    fn targets(self, p: GridPosition) -> Vec<GridPosition> {
        match self {
            Connections::Lateral => p.neighbors_4().to_vec(),
            Connections::Diagonal => p.diagonals().to_vec(),
            Connections::LateralAndDiagonal => p.neighbors_8().to_vec(),
        }
    }
}

/// A 2D grid of nodes backed by a [`Graph`].
#[derive(Clone, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawGrid")
)]
pub struct Grid {
    size: GridSize,
    cell_size: Size,
    graph: Graph,
}

impl Grid {
    /// Build a grid where every node connects to its up/right/down/left
    /// neighbours in both directions.
    pub fn with_lateral_connections(
        size: GridSize,
        cell_size: Size,
        velocity: Velocity,
    ) -> Result<Self, GraphError> {
        Self::build(size, cell_size, velocity, Connections::Lateral)
    }

    /// Build a grid where every node connects only to its four diagonal
    /// neighbours.
    pub fn with_diagonal_connections(
        size: GridSize,
        cell_size: Size,
        velocity: Velocity,
    ) -> Result<Self, GraphError> {
        Self::build(size, cell_size, velocity, Connections::Diagonal)
    }

    /// Build a grid where every node connects to all eight neighbours.
    pub fn with_lateral_and_diagonal_connections(
        size: GridSize,
        cell_size: Size,
        velocity: Velocity,
    ) -> Result<Self, GraphError> {
        Self::build(size, cell_size, velocity, Connections::LateralAndDiagonal)
    }

    fn build(
        size: GridSize,
        cell_size: Size,
        velocity: Velocity,
        connections: Connections,
    ) -> Result<Self, GraphError> {
        if size.is_empty() {
            return Err(GraphError::InvalidSize(size));
        }
        if !velocity.is_valid() {
            return Err(GraphError::InvalidVelocity(velocity));
        }

        let mut graph = Graph::with_capacity(size.len());
        for p in size.iter() {
            graph.add_node(Position::new(
                p.x as f64 * cell_size.width.meters(),
                p.y as f64 * cell_size.height.meters(),
            ));
        }

        let mut grid = Self {
            size,
            cell_size,
            graph,
        };
        for p in size.iter() {
            for q in connections.targets(p) {
                if size.contains(q) {
                    grid.add_edge(p, q, velocity)?;
                }
            }
        }
        log::debug!(
            "built {} grid with {} edges ({:?})",
            size,
            grid.graph.edge_count(),
            connections
        );
        Ok(grid)
    }

    #[inline]
    pub fn size(&self) -> GridSize {
        self.size
    }

    #[inline]
    pub fn columns(&self) -> i32 {
        self.size.columns
    }

    #[inline]
    pub fn rows(&self) -> i32 {
        self.size.rows
    }

    #[inline]
    pub fn cell_size(&self) -> Size {
        self.cell_size
    }

    #[inline]
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn into_graph(self) -> Graph {
        self.graph
    }

    /// Node of the cell at `p`, or `None` when out of bounds.
    #[inline]
    pub fn node(&self, p: GridPosition) -> Option<NodeId> {
        self.size.index(p).map(NodeId::new)
    }

    /// Like [`node`](Self::node) but reports an out-of-bounds position as an
    /// error.
    #[inline]
    pub fn node_at(&self, p: GridPosition) -> Result<NodeId, GraphError> {
        self.node(p).ok_or(GraphError::OutOfBounds(p))
    }

    /// Cell of `node`, or `None` if the node is not part of this grid.
    #[inline]
    pub fn position_of(&self, node: NodeId) -> Option<GridPosition> {
        (node.index() < self.size.len()).then(|| self.size.position(node.index()))
    }

    /// Add (or replace) the edge between two cells.
    pub fn add_edge(
        &mut self,
        from: GridPosition,
        to: GridPosition,
        velocity: Velocity,
    ) -> Result<Edge, GraphError> {
        let a = self.node_at(from)?;
        let b = self.node_at(to)?;
        self.graph.connect(a, b, velocity)
    }

    /// Remove the edge between two cells, returning it if it existed.
    pub fn remove_edge(
        &mut self,
        from: GridPosition,
        to: GridPosition,
    ) -> Result<Option<Edge>, GraphError> {
        let a = self.node_at(from)?;
        let b = self.node_at(to)?;
        Ok(self.graph.disconnect(a, b))
    }

    /// Cut every edge into and out of the cell at `p`, making it an
    /// obstacle.
    pub fn disconnect_node(&mut self, p: GridPosition) -> Result<(), GraphError> {
        let n = self.node_at(p)?;
        self.graph.disconnect_node(n)
    }

    /// Remove the diagonal edges between the lateral neighbours of `p`, the
    /// ones that would cut the corner of cell `p`.
    ///
    /// Usually called right after [`disconnect_node`](Self::disconnect_node)
    /// so agents cannot squeeze diagonally past an obstacle.
    pub fn remove_diagonal_connections_intersecting_with_node(
        &mut self,
        p: GridPosition,
    ) -> Result<(), GraphError> {
        self.node_at(p)?;
        let [up, right, down, left] = p.neighbors_4();
        for (a, b) in [(left, up), (up, right), (right, down), (down, left)] {
            let (Some(na), Some(nb)) = (self.node(a), self.node(b)) else {
                continue;
            };
            self.graph.disconnect(na, nb);
            self.graph.disconnect(nb, na);
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawGrid {
    size: GridSize,
    cell_size: Size,
    graph: Graph,
}

#[cfg(feature = "serde")]
impl TryFrom<RawGrid> for Grid {
    type Error = GraphError;

    fn try_from(raw: RawGrid) -> Result<Self, GraphError> {
        // Cell lookups index the graph by row-major position.
        if raw.size.is_empty() || raw.size.len() != raw.graph.node_count() {
            return Err(GraphError::InvalidSize(raw.size));
        }
        Ok(Self {
            size: raw.size,
            cell_size: raw.cell_size,
            graph: raw.graph,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::Distance;

    fn unit(columns: i32, rows: i32) -> Grid {
        Grid::with_lateral_connections(
            GridSize::new(columns, rows),
            Size::square(1.0),
            Velocity::from_meters_per_second(1.0),
        )
        .unwrap()
    }

    #[test]
    fn lateral_grid_edge_count() {
        // 2 * (cols * (rows - 1) + rows * (cols - 1)) directed edges.
        let g = unit(3, 3);
        assert_eq!(g.graph().node_count(), 9);
        assert_eq!(g.graph().edge_count(), 24);

        let corner = g.node(GridPosition::new(0, 0)).unwrap();
        let center = g.node(GridPosition::new(1, 1)).unwrap();
        assert_eq!(g.graph().outgoing(corner).len(), 2);
        assert_eq!(g.graph().outgoing(center).len(), 4);
    }

    #[test]
    fn diagonal_grids() {
        let size = GridSize::new(3, 3);
        let v = Velocity::from_meters_per_second(1.0);
        let d = Grid::with_diagonal_connections(size, Size::square(1.0), v).unwrap();
        assert_eq!(d.graph().edge_count(), 16);
        let both =
            Grid::with_lateral_and_diagonal_connections(size, Size::square(1.0), v).unwrap();
        assert_eq!(both.graph().edge_count(), 40);

        let a = d.node(GridPosition::new(0, 0)).unwrap();
        let b = d.node(GridPosition::new(1, 1)).unwrap();
        let e = d.graph().edge(a, b).unwrap();
        assert!((e.distance.meters() - 2f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn node_positions_follow_cell_size() {
        let g = Grid::with_lateral_connections(
            GridSize::new(4, 2),
            Size::new(Distance::from_meters(2.0), Distance::from_meters(3.0)),
            Velocity::from_meters_per_second(1.0),
        )
        .unwrap();
        let n = g.node(GridPosition::new(3, 1)).unwrap();
        assert_eq!(g.graph().position(n), Position::new(6.0, 3.0));
        assert_eq!(g.position_of(n), Some(GridPosition::new(3, 1)));
        assert_eq!(g.position_of(NodeId::new(8)), None);
    }

    #[test]
    fn out_of_bounds_lookups() {
        let mut g = unit(2, 2);
        let p = GridPosition::new(2, 0);
        assert_eq!(g.node(p), None);
        assert_eq!(g.node_at(p), Err(GraphError::OutOfBounds(p)));
        assert_eq!(g.disconnect_node(p), Err(GraphError::OutOfBounds(p)));
    }

    #[test]
    fn rejects_empty_size_and_bad_velocity() {
        let bad = Grid::with_lateral_connections(
            GridSize::new(0, 3),
            Size::square(1.0),
            Velocity::from_meters_per_second(1.0),
        );
        assert!(matches!(bad, Err(GraphError::InvalidSize(_))));

        let bad = Grid::with_lateral_connections(
            GridSize::new(3, 3),
            Size::square(1.0),
            Velocity::from_meters_per_second(-1.0),
        );
        assert!(matches!(bad, Err(GraphError::InvalidVelocity(_))));
    }

    #[test]
    fn disconnect_node_makes_obstacle() {
        let mut g = unit(3, 3);
        let c = GridPosition::new(1, 1);
        g.disconnect_node(c).unwrap();
        let n = g.node(c).unwrap();
        assert!(g.graph().outgoing(n).is_empty());
        assert!(g.graph().incoming(n).is_empty());
        assert_eq!(g.graph().edge_count(), 16);
    }

    #[test]
    fn remove_diagonals_around_node() {
        let mut g = Grid::with_lateral_and_diagonal_connections(
            GridSize::new(3, 3),
            Size::square(1.0),
            Velocity::from_meters_per_second(1.0),
        )
        .unwrap();
        let up = g.node(GridPosition::new(1, 0)).unwrap();
        let right = g.node(GridPosition::new(2, 1)).unwrap();
        assert!(g.graph().edge(up, right).is_some());

        g.remove_diagonal_connections_intersecting_with_node(GridPosition::new(1, 1))
            .unwrap();
        assert!(g.graph().edge(up, right).is_none());
        assert!(g.graph().edge(right, up).is_none());
        // Diagonals through the centre itself are untouched.
        let center = g.node(GridPosition::new(1, 1)).unwrap();
        let corner = g.node(GridPosition::new(0, 0)).unwrap();
        assert!(g.graph().edge(center, corner).is_some());
        assert_eq!(g.graph().edge_count(), 32);
    }

    #[test]
    fn add_and_remove_edge() {
        let mut g = unit(3, 1);
        let a = GridPosition::new(0, 0);
        let c = GridPosition::new(2, 0);
        let e = g
            .add_edge(a, c, Velocity::from_meters_per_second(4.0))
            .unwrap();
        assert_eq!(e.distance, Distance::from_meters(2.0));
        assert_eq!(g.remove_edge(a, c).unwrap(), Some(e));
        assert_eq!(g.remove_edge(a, c).unwrap(), None);
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn grid_round_trip() {
        let g = Grid::with_lateral_connections(
            GridSize::new(2, 2),
            Size::square(1.0),
            Velocity::from_meters_per_second(1.0),
        )
        .unwrap();
        let json = serde_json::to_string(&g).unwrap();
        let back: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(back.size(), g.size());
        assert_eq!(back.graph().edge_count(), g.graph().edge_count());
    }

    #[test]
    fn rejects_size_that_disagrees_with_graph() {
        let g = Grid::with_lateral_connections(
            GridSize::new(2, 2),
            Size::square(1.0),
            Velocity::from_meters_per_second(1.0),
        )
        .unwrap();
        let mut v = serde_json::to_value(&g).unwrap();
        v["size"] = serde_json::json!({"columns": 3, "rows": 2});
        let err = serde_json::from_value::<Grid>(v).unwrap_err();
        assert!(err.to_string().contains("invalid grid size 3x2"), "{err}");
    }
}
