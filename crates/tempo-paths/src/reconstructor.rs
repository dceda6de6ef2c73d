use tempo_core::{Edge, NodeId};

use crate::path::{Path, PathType};

/// Remembers, per node, the edge of the best known route into it, and turns
/// those back-links into a forward [`Path`].
///
/// Indexed by [`NodeId`]; sized with [`clear`](Self::clear) before each
/// search.
#[derive(Debug, Default)]
pub struct PathReconstructor {
    came_from: Vec<Option<Edge>>,
}

impl PathReconstructor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget every predecessor and make room for `node_count` nodes.
    pub fn clear(&mut self, node_count: usize) {
        self.came_from.clear();
        self.came_from.resize(node_count, None);
    }

    /// Record that `node` is best reached through `via`.
    ///
    /// # Panics
    ///
    /// Panics if `node` is outside the size given to the last `clear`.
    #[inline]
    pub fn set_came_from(&mut self, node: NodeId, via: Edge) {
        self.came_from[node.index()] = Some(via);
    }

    #[inline]
    pub fn came_from(&self, node: NodeId) -> Option<Edge> {
        self.came_from.get(node.index()).copied().flatten()
    }

    /// Walk the back-links from `node` to the search start and return the
    /// route in travel order. The path is [`PathType::Complete`] when `node`
    /// is `goal`.
    pub fn construct_path_to(&self, node: NodeId, goal: NodeId) -> Path {
        let mut edges = Vec::new();
        let mut current = node;
        while let Some(edge) = self.came_from(current) {
            edges.push(edge);
            current = edge.start;
            // The start node never gets a predecessor; anything longer is a
            // cycle.
            if edges.len() > self.came_from.len() {
                log::warn!("predecessor cycle through {}", current);
                break;
            }
        }
        edges.reverse();

        let path_type = if node == goal {
            PathType::Complete
        } else {
            PathType::ClosestApproach
        };
        Path::new(path_type, current, edges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempo_core::{Duration, Graph, Position, Velocity};

    #[test]
    fn rebuilds_forward_order() {
        let mut g = Graph::new();
        let a = g.add_node(Position::new(0.0, 0.0));
        let b = g.add_node(Position::new(1.0, 0.0));
        let c = g.add_node(Position::new(2.0, 0.0));
        let v = Velocity::from_meters_per_second(1.0);
        let ab = g.connect(a, b, v).unwrap();
        let bc = g.connect(b, c, v).unwrap();

        let mut r = PathReconstructor::new();
        r.clear(g.node_count());
        r.set_came_from(c, bc);
        r.set_came_from(b, ab);

        let p = r.construct_path_to(c, c);
        assert_eq!(p.path_type(), PathType::Complete);
        assert_eq!(p.start(), a);
        assert_eq!(p.edges(), &[ab, bc]);
        assert_eq!(p.duration(), Duration::from_seconds(2.0));

        let partial = r.construct_path_to(b, c);
        assert_eq!(partial.path_type(), PathType::ClosestApproach);
        assert_eq!(partial.end(), b);
    }

    #[test]
    fn overwrite_replaces_predecessor() {
        let mut g = Graph::new();
        let a = g.add_node(Position::new(0.0, 0.0));
        let b = g.add_node(Position::new(0.0, 1.0));
        let c = g.add_node(Position::new(1.0, 1.0));
        let v = Velocity::from_meters_per_second(1.0);
        let ac = g.connect(a, c, v).unwrap();
        let ab = g.connect(a, b, v).unwrap();
        let bc = g.connect(b, c, v).unwrap();

        let mut r = PathReconstructor::new();
        r.clear(3);
        r.set_came_from(c, bc);
        r.set_came_from(b, ab);
        r.set_came_from(c, ac);
        assert_eq!(r.construct_path_to(c, c).edges(), &[ac]);
    }

    #[test]
    fn clear_forgets_everything() {
        let mut g = Graph::new();
        let a = g.add_node(Position::new(0.0, 0.0));
        let b = g.add_node(Position::new(1.0, 0.0));
        let ab = g
            .connect(a, b, Velocity::from_meters_per_second(1.0))
            .unwrap();

        let mut r = PathReconstructor::new();
        r.clear(2);
        r.set_came_from(b, ab);
        r.clear(2);
        assert_eq!(r.came_from(b), None);
        let p = r.construct_path_to(b, b);
        assert!(p.edges().is_empty());
        assert_eq!(p.start(), b);
    }
}
