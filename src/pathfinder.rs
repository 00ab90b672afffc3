use crate::error::{Endpoint, Resource, SearchError};
use crate::heuristic::Heuristic;
use crate::node_pool::{Node, NodePool, NO_PARENT};
use crate::occupancy_grid::OccupancyGrid;
use crate::open_list::OpenList;
use crate::{Point, C, D, MAX_NODES};
use core::fmt;
use log::{debug, trace, warn};
use smallvec::SmallVec;

/// Neighbour offsets and move costs in expansion order: E, SE, S, SW, W, NW, N, NE
/// (y grows downward). When several paths have the same cost this order
/// decides which one is returned.
const NEIGHBOURS: [(i32, i32, u16); 8] = [
    (1, 0, C),
    (1, 1, D),
    (0, 1, C),
    (-1, 1, D),
    (-1, 0, C),
    (-1, -1, D),
    (0, -1, C),
    (1, -1, D),
];

/// Runtime knobs of a [Pathfinder].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchConfig {
    pub heuristic: Heuristic,
    /// Upper bound on the number of nodes expanded per search. [None] means
    /// the search is bounded only by the node pool.
    pub max_expansions: Option<usize>,
}

/// Counters describing the most recent search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes popped from the open list and expanded.
    pub expanded: usize,
    /// Nodes taken from the pool, including the start node.
    pub allocated: usize,
    /// Neighbours dropped because the pool was full.
    pub pool_full_skips: usize,
    /// Largest open list size seen.
    pub peak_open: usize,
}

/// A* search engine owning the occupancy grid and every buffer a search
/// needs. `N` bounds the number of nodes a single search may track; nothing
/// is allocated on the heap while searching.
///
/// The grid persists between searches. Each call to [search](Self::search)
/// discards the node pool and open list of the previous one.
#[derive(Clone)]
pub struct Pathfinder<const N: usize = MAX_NODES> {
    grid: OccupancyGrid,
    pool: NodePool<N>,
    open: OpenList<N>,
    config: SearchConfig,
    stats: SearchStats,
}

impl<const N: usize> Default for Pathfinder<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// f = g + h for the node at `ix`, computed from its current cost.
fn f_score<const N: usize>(
    pool: &NodePool<N>,
    heuristic: Heuristic,
    goal: Point,
) -> impl Fn(usize) -> u32 + '_ {
    move |ix| {
        pool.get(ix).map_or(u32::MAX, |n| {
            u32::from(n.g) + heuristic.estimate(&n.position(), &goal)
        })
    }
}

impl<const N: usize> Pathfinder<N> {
    /// An engine with an empty grid and the default configuration.
    pub fn new() -> Self {
        Self::with_config(SearchConfig::default())
    }

    pub fn with_config(config: SearchConfig) -> Self {
        Pathfinder {
            grid: OccupancyGrid::new(),
            pool: NodePool::new(),
            open: OpenList::new(),
            config,
            stats: SearchStats::default(),
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: SearchConfig) {
        self.config = config;
    }

    pub fn grid(&self) -> &OccupancyGrid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut OccupancyGrid {
        &mut self.grid
    }

    /// Frees every cell of the grid.
    pub fn reset(&mut self) {
        self.grid.reset();
    }

    /// Blocks or frees a cell. Out-of-bounds coordinates are ignored.
    pub fn set_barrier(&mut self, x: i32, y: i32, on: bool) {
        self.grid.set_barrier(x, y, on);
    }

    /// True if the cell is blocked or out of bounds.
    pub fn get(&self, x: i32, y: i32) -> bool {
        self.grid.is_obstacle(x, y)
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Nodes created by the most recent search, indexed as their parent links expect.
    pub fn nodes(&self) -> &[Node] {
        self.pool.as_slice()
    }

    fn check_endpoint(&self, endpoint: Endpoint, point: Point) -> Result<(), SearchError> {
        if self.grid.is_obstacle_point(point) {
            debug!("Rejecting search: {} {:?} is out of bounds or blocked", endpoint, point);
            Err(SearchError::InvalidEndpoint { endpoint, point })
        } else {
            Ok(())
        }
    }

    fn successors(&self, position: &Point) -> SmallVec<[(Point, u16); 8]> {
        NEIGHBOURS
            .iter()
            .map(|&(dx, dy, cost)| (Point::new(position.x + dx, position.y + dy), cost))
            .filter(|(p, _)| !self.grid.is_obstacle_point(*p))
            .collect()
    }

    /// Finds a path from `start` to `goal` and writes it to the front of
    /// `out_path`, start first and goal last. Returns the number of points
    /// written. On error `out_path` is left untouched.
    pub fn search(
        &mut self,
        start: Point,
        goal: Point,
        out_path: &mut [Point],
    ) -> Result<usize, SearchError> {
        self.pool.reset();
        self.open.clear();
        self.stats = SearchStats::default();
        self.check_endpoint(Endpoint::Start, start)?;
        self.check_endpoint(Endpoint::Goal, goal)?;
        debug!("Searching path from {:?} to {:?}", start, goal);
        let goal_ix = self.run(start, goal)?;
        let len = self.backtrace(goal_ix, out_path)?;
        debug!(
            "Found path of {} cells, expanded {} nodes",
            len, self.stats.expanded
        );
        Ok(len)
    }

    /// Allocating variant of [search](Self::search).
    pub fn get_path_single_goal(
        &mut self,
        start: Point,
        goal: Point,
    ) -> Result<Vec<Point>, SearchError> {
        let mut path = vec![start; N];
        let len = self.search(start, goal, &mut path)?;
        path.truncate(len);
        Ok(path)
    }

    /// Runs A* until the goal is popped and returns its pool index.
    fn run(&mut self, start: Point, goal: Point) -> Result<usize, SearchError> {
        let heuristic = self.config.heuristic;
        let start_ix = self
            .pool
            .allocate(Node::open(start, 0, NO_PARENT))
            .ok_or(SearchError::ResourceExhausted(Resource::NodePool))?;
        self.stats.allocated = 1;
        self.open
            .push(start_ix, f_score(&self.pool, heuristic, goal))
            .map_err(|_| SearchError::ResourceExhausted(Resource::NodePool))?;
        self.stats.peak_open = 1;

        // First resource that forced a candidate to be dropped.
        let mut degraded: Option<Resource> = None;

        while let Some(current) = self.open.pop_min(f_score(&self.pool, heuristic, goal)) {
            let Some(node) = self.pool.get_mut(current) else {
                continue;
            };
            node.in_open = false;
            let node = *node;
            let position = node.position();
            if position == goal {
                return Ok(current);
            }
            if let Some(budget) = self.config.max_expansions {
                if self.stats.expanded >= budget {
                    warn!("Expansion budget of {} exhausted before reaching {:?}", budget, goal);
                    return Err(SearchError::ResourceExhausted(Resource::ExpansionBudget));
                }
            }
            self.stats.expanded += 1;
            trace!("Expanding {:?} with g = {}", position, node.g);

            for (neighbour, cost) in self.successors(&position) {
                let Some(g) = node.g.checked_add(cost) else {
                    degraded.get_or_insert(Resource::CostRange);
                    continue;
                };
                match self.pool.find(neighbour) {
                    Some(ix) => {
                        let still_open = match self.pool.get_mut(ix) {
                            Some(existing) if g < existing.g => {
                                existing.g = g;
                                existing.parent = current;
                                existing.in_open
                            }
                            _ => continue,
                        };
                        // Closed nodes keep their new cost and parent but are not reopened.
                        if still_open {
                            self.open
                                .decrease_key(ix, f_score(&self.pool, heuristic, goal));
                        }
                    }
                    None => match self.pool.allocate(Node::open(neighbour, g, current)) {
                        Some(ix) => {
                            self.stats.allocated += 1;
                            if self
                                .open
                                .push(ix, f_score(&self.pool, heuristic, goal))
                                .is_err()
                            {
                                degraded.get_or_insert(Resource::NodePool);
                            }
                            self.stats.peak_open = self.stats.peak_open.max(self.open.len());
                        }
                        None => {
                            if self.stats.pool_full_skips == 0 {
                                warn!(
                                    "Node pool full ({} nodes), dropping neighbours from now on",
                                    N
                                );
                            }
                            self.stats.pool_full_skips += 1;
                            degraded.get_or_insert(Resource::NodePool);
                        }
                    },
                }
            }
        }

        match degraded {
            Some(resource) => {
                warn!(
                    "Open list empty after {} expansions, search ran out of {}",
                    self.stats.expanded, resource
                );
                Err(SearchError::ResourceExhausted(resource))
            }
            None => {
                debug!(
                    "Open list empty after {} expansions, {:?} is unreachable",
                    self.stats.expanded, goal
                );
                Err(SearchError::Unreachable)
            }
        }
    }

    /// Nodes from `ix` back to the start node.
    fn ancestors(&self, ix: usize) -> impl Iterator<Item = &Node> + '_ {
        std::iter::successors(self.pool.get(ix), move |n| self.pool.get(n.parent)).take(N)
    }

    /// Writes the path ending in node `goal_ix` to `out_path`, start first.
    fn backtrace(&self, goal_ix: usize, out_path: &mut [Point]) -> Result<usize, SearchError> {
        let len = self.ancestors(goal_ix).count();
        if len > out_path.len() {
            warn!(
                "Path of {} cells does not fit in a buffer of {}",
                len,
                out_path.len()
            );
            return Err(SearchError::ResourceExhausted(Resource::PathBuffer));
        }
        for (slot, node) in out_path[..len].iter_mut().rev().zip(self.ancestors(goal_ix)) {
            *slot = node.position();
        }
        Ok(len)
    }
}

impl<const N: usize> fmt::Display for Pathfinder<N> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.grid)
    }
}

impl<const N: usize> fmt::Debug for Pathfinder<N> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Pathfinder")
            .field("capacity", &N)
            .field("grid", &self.grid)
            .field("config", &self.config)
            .field("stats", &self.stats)
            .finish()
    }
}
