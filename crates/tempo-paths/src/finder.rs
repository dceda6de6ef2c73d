//! Time-based A* search.

use tempo_core::{Distance, Duration, Edge, Grid, GridPosition, NodeId, Position, Velocity};

use crate::error::PathError;
use crate::heap::{HeapHandle, MinHeap};
use crate::path::Path;
use crate::reconstructor::PathReconstructor;
use crate::record::SearchRecord;
use crate::traits::TraversalGraph;

/// Lower bound on the time to travel from `a` to `b`: the straight-line
/// distance covered at `max_velocity`.
#[inline]
pub fn expected_duration(a: Position, b: Position, max_velocity: Velocity) -> Duration {
    Distance::between(a, b) / max_velocity
}

// ---------------------------------------------------------------------------
// SearchSession
// ---------------------------------------------------------------------------

/// A discovered node: its current record and where that record sits in the
/// frontier.
#[derive(Copy, Clone, Debug)]
struct Discovered {
    record: SearchRecord,
    handle: HeapHandle,
}

/// All mutable state of one search. [`reset`](Self::reset) wipes it in one
/// step; nothing survives from one search to the next except allocated
/// capacity.
#[derive(Debug, Default)]
struct SearchSession {
    frontier: MinHeap<SearchRecord>,
    /// Indexed by `NodeId`; `None` until the node is discovered.
    discovered: Vec<Option<Discovered>>,
    reconstructor: PathReconstructor,
    closest: Option<SearchRecord>,
    expanded: usize,
    /// Number of `Some` entries in `discovered`.
    discovered_count: usize,
}

impl SearchSession {
    fn with_capacity(nodes: usize) -> Self {
        Self {
            frontier: MinHeap::with_capacity(nodes),
            discovered: Vec::with_capacity(nodes),
            ..Self::default()
        }
    }

    fn reset(&mut self, node_count: usize) {
        self.frontier.clear();
        self.discovered.clear();
        self.discovered.resize(node_count, None);
        self.reconstructor.clear(node_count);
        self.closest = None;
        self.expanded = 0;
        self.discovered_count = 0;
    }

    fn run<G: TraversalGraph>(
        &mut self,
        graph: &G,
        start: NodeId,
        goal: NodeId,
        max_velocity: Velocity,
    ) -> Path {
        self.reset(graph.node_count());
        let goal_pos = graph.position(goal);

        let head = SearchRecord::new(
            start,
            Duration::ZERO,
            expected_duration(graph.position(start), goal_pos, max_velocity),
        );
        self.register(head);
        self.closest = Some(head);

        while let Some(current) = self.frontier.extract() {
            if current.node() == goal {
                log::debug!(
                    "reached {} from {} in {} after {} expansions ({} discovered)",
                    goal,
                    start,
                    current.duration_so_far(),
                    self.expanded,
                    self.discovered_count
                );
                return self.reconstructor.construct_path_to(goal, goal);
            }

            self.expanded += 1;
            log::trace!("expand {}", current);
            if self
                .closest
                .is_none_or(|c| current.expected_remaining_time() < c.expected_remaining_time())
            {
                self.closest = Some(current);
            }

            for edge in graph.outgoing(current.node()) {
                let cost = current.duration_so_far() + edge.traversal_duration();
                let Some(&slot) = self.discovered.get(edge.end.index()) else {
                    log::warn!("edge {} leaves the graph, skipped", edge);
                    continue;
                };
                match slot {
                    None => self.discover(edge, cost, goal_pos, graph, max_velocity),
                    Some(known) if known.record.duration_so_far() > cost => {
                        log::trace!(
                            "improve {}: {} -> {}",
                            edge.end,
                            known.record.duration_so_far(),
                            cost
                        );
                        self.frontier.remove(known.handle);
                        self.discover(edge, cost, goal_pos, graph, max_velocity);
                    }
                    // Equal or cheaper route already known; ties keep the
                    // first predecessor.
                    Some(_) => {}
                }
            }
        }

        let closest = self.closest.map_or(start, |c| c.node());
        log::debug!(
            "{} unreachable from {}, closest approach {} after {} expansions ({} discovered)",
            goal,
            start,
            closest,
            self.expanded,
            self.discovered_count
        );
        self.reconstructor.construct_path_to(closest, goal)
    }

    /// Record `via` as the best way into its end node and queue a fresh
    /// record for it.
    fn discover<G: TraversalGraph>(
        &mut self,
        via: &Edge,
        cost: Duration,
        goal_pos: Position,
        graph: &G,
        max_velocity: Velocity,
    ) {
        self.reconstructor.set_came_from(via.end, *via);
        let remaining = expected_duration(graph.position(via.end), goal_pos, max_velocity);
        self.register(SearchRecord::new(via.end, cost, remaining));
    }

    fn register(&mut self, record: SearchRecord) {
        let handle = self.frontier.insert(record);
        let slot = &mut self.discovered[record.node().index()];
        if slot.is_none() {
            self.discovered_count += 1;
        }
        *slot = Some(Discovered { record, handle });
    }
}

// ---------------------------------------------------------------------------
// PathFinder
// ---------------------------------------------------------------------------

/// Shortest-time path search over a [`TraversalGraph`].
///
/// A `PathFinder` keeps its buffers between calls so repeated queries do not
/// reallocate, but every query starts from a fully reset state: running the
/// same query on a used finder or on a new one gives the same [`Path`].
/// Searches take `&mut self`; use one finder per thread to search in
/// parallel (graphs themselves can be shared).
#[derive(Debug, Default)]
pub struct PathFinder {
    session: SearchSession,
}

impl PathFinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a finder whose buffers are pre-sized for graphs of `nodes`
    /// nodes.
    pub fn with_capacity(nodes: usize) -> Self {
        Self {
            session: SearchSession::with_capacity(nodes),
        }
    }

    /// Find the fastest route from `start` to `goal`.
    ///
    /// `max_velocity` drives the heuristic; the result is only guaranteed
    /// optimal if no edge is faster than it. If the goal cannot be reached,
    /// the returned path is a
    /// [`ClosestApproach`](crate::PathType::ClosestApproach) ending at the
    /// node whose estimated remaining time was smallest.
    pub fn find_path<G: TraversalGraph>(
        &mut self,
        graph: &G,
        start: NodeId,
        goal: NodeId,
        max_velocity: Velocity,
    ) -> Result<Path, PathError> {
        if !max_velocity.is_valid() {
            return Err(PathError::InvalidVelocity(max_velocity));
        }
        for node in [start, goal] {
            if node.index() >= graph.node_count() {
                return Err(PathError::UnknownNode(node));
            }
        }
        Ok(self.session.run(graph, start, goal, max_velocity))
    }

    /// Like [`find_path`](Self::find_path), using the fastest edge of the
    /// graph as the maximum velocity.
    pub fn find_path_derived<G: TraversalGraph>(
        &mut self,
        graph: &G,
        start: NodeId,
        goal: NodeId,
    ) -> Result<Path, PathError> {
        let max_velocity = graph.max_velocity().ok_or(PathError::NoEdges)?;
        self.find_path(graph, start, goal, max_velocity)
    }

    /// Search between two grid cells, deriving the maximum velocity from the
    /// grid's edges.
    pub fn find_grid_path(
        &mut self,
        grid: &Grid,
        start: GridPosition,
        goal: GridPosition,
    ) -> Result<Path, PathError> {
        let (a, b) = (grid.node_at(start)?, grid.node_at(goal)?);
        self.find_path_derived(grid, a, b)
    }

    /// Search between two grid cells with an explicit maximum velocity.
    pub fn find_grid_path_with_velocity(
        &mut self,
        grid: &Grid,
        start: GridPosition,
        goal: GridPosition,
        max_velocity: Velocity,
    ) -> Result<Path, PathError> {
        let (a, b) = (grid.node_at(start)?, grid.node_at(goal)?);
        self.find_path(grid, a, b, max_velocity)
    }
}
