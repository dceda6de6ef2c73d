use std::cmp::Ordering;
use std::fmt;

use tempo_core::{Duration, NodeId};

/// What the search knows about one discovered node.
///
/// Records are never updated in place: a cheaper route produces a new
/// record that replaces the old one. Ordering looks at
/// [`expected_total_time`](Self::expected_total_time) only.
#[derive(Copy, Clone, Debug)]
pub struct SearchRecord {
    node: NodeId,
    duration_so_far: Duration,
    expected_remaining_time: Duration,
    expected_total_time: Duration,
}

impl SearchRecord {
    pub fn new(node: NodeId, duration_so_far: Duration, expected_remaining_time: Duration) -> Self {
        Self {
            node,
            duration_so_far,
            expected_remaining_time,
            expected_total_time: duration_so_far + expected_remaining_time,
        }
    }

    #[inline]
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Cost of the best known route from the start to this node.
    #[inline]
    pub fn duration_so_far(&self) -> Duration {
        self.duration_so_far
    }

    /// Heuristic estimate of the time still needed to reach the goal.
    #[inline]
    pub fn expected_remaining_time(&self) -> Duration {
        self.expected_remaining_time
    }

    #[inline]
    pub fn expected_total_time(&self) -> Duration {
        self.expected_total_time
    }
}

impl PartialEq for SearchRecord {
    fn eq(&self, other: &Self) -> bool {
        self.expected_total_time == other.expected_total_time
    }
}

impl Eq for SearchRecord {}

impl PartialOrd for SearchRecord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SearchRecord {
    fn cmp(&self, other: &Self) -> Ordering {
        self.expected_total_time.cmp(&other.expected_total_time)
    }
}

impl fmt::Display for SearchRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ~{}", self.node, self.expected_total_time)
    }
}
