//! Time-based A* pathfinding.
//!
//! [`PathFinder`] searches a [`TraversalGraph`] for the route with the
//! smallest total traversal time. Each edge costs its distance divided by its
//! velocity; the heuristic is the straight-line distance to the goal divided
//! by a caller-supplied maximum velocity.
//!
//! ```
//! use tempo_core::{Grid, GridPosition, GridSize, Size, Velocity};
//! use tempo_paths::{PathFinder, PathType};
//!
//! let grid = Grid::with_lateral_connections(
//!     GridSize::new(3, 3),
//!     Size::square(1.0),
//!     Velocity::from_meters_per_second(1.0),
//! )?;
//! let path = PathFinder::new().find_grid_path(
//!     &grid,
//!     GridPosition::new(0, 0),
//!     GridPosition::new(2, 2),
//! )?;
//! assert_eq!(path.path_type(), PathType::Complete);
//! assert_eq!(path.duration().seconds(), 4.0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! A goal that cannot be reached is not an error: the search returns a
//! [`PathType::ClosestApproach`] path to the discovered node that looked
//! closest to the goal.
//!
//! # Building blocks
//!
//! | Type | Role |
//! |---|---|
//! | [`MinHeap`] | frontier with remove-by-handle |
//! | [`SearchRecord`] | per-node cost bookkeeping |
//! | [`PathReconstructor`] | predecessor map |
//! | [`Path`] | search result |

mod error;
mod finder;
mod heap;
mod path;
mod reconstructor;
mod record;
mod traits;

pub use error::PathError;
pub use finder::{PathFinder, expected_duration};
pub use heap::{HeapHandle, MinHeap};
pub use path::{Path, PathType};
pub use reconstructor::PathReconstructor;
pub use record::SearchRecord;
pub use traits::TraversalGraph;
