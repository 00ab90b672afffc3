//! # bounded_astar
//!
//! A* pathfinding on a fixed-size, bit-packed occupancy grid for targets where
//! memory is tight: every buffer the search touches lives inside the
//! [Pathfinder] and is sized at compile time, costs are integers and no
//! floating point is involved.
//!
//! Movement is 8-connected. Straight moves cost [C] and diagonal moves cost
//! [D], an integer approximation of `C * sqrt(2)`.
//!
//! ```
//! use bounded_astar::{Pathfinder, Point, MAX_PATH};
//!
//! let mut pathfinder: Pathfinder = Pathfinder::new();
//! pathfinder.set_barrier(3, 1, true);
//! let mut path = [Point::new(0, 0); MAX_PATH];
//! let len = pathfinder
//!     .search(Point::new(1, 1), Point::new(5, 1), &mut path)
//!     .unwrap();
//! assert_eq!(path[0], Point::new(1, 1));
//! assert_eq!(path[len - 1], Point::new(5, 1));
//! ```
pub mod error;
pub mod heuristic;
pub mod node_pool;
pub mod occupancy_grid;
pub mod open_list;
pub mod pathfinder;

pub use error::{Endpoint, Resource, SearchError};
pub use grid_util::point::Point;
pub use heuristic::Heuristic;
pub use occupancy_grid::OccupancyGrid;
pub use pathfinder::{Pathfinder, SearchConfig, SearchStats};

use itertools::Itertools;

/// Width of the occupancy grid in cells.
pub const GRID_WIDTH: usize = 32;
/// Height of the occupancy grid in cells.
pub const GRID_HEIGHT: usize = 32;
/// Default node pool capacity, which is also the open list capacity.
pub const MAX_NODES: usize = 1024;
/// Longest path a search can return. A path never holds more cells than the
/// pool has nodes.
pub const MAX_PATH: usize = MAX_NODES;

/// Cost of a cardinal (straight) move.
pub const C: u16 = 10;
/// Cost of a diagonal move.
pub const D: u16 = 14;

const _: () = assert!(GRID_WIDTH * GRID_HEIGHT % 8 == 0);
const _: () = assert!(GRID_WIDTH <= u16::MAX as usize && GRID_HEIGHT <= u16::MAX as usize);

/// Cost of a single move between two cells, or [None] if they are not
/// neighbours in the Moore neighbourhood. Staying in place costs nothing.
pub fn step_cost(from: &Point, to: &Point) -> Option<u16> {
    match ((from.x - to.x).abs(), (from.y - to.y).abs()) {
        (0, 0) => Some(0),
        (1, 0) | (0, 1) => Some(C),
        (1, 1) => Some(D),
        _ => None,
    }
}

/// Sums the move costs along a path. Returns [None] if two consecutive points
/// are not adjacent.
pub fn path_cost(path: &[Point]) -> Option<u32> {
    path.iter()
        .tuple_windows()
        .map(|(a, b)| step_cost(a, b).map(u32::from))
        .sum()
}
