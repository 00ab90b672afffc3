use bounded_astar::{
    path_cost, Endpoint, Pathfinder, Point, Resource, SearchError, GRID_HEIGHT, GRID_WIDTH,
    MAX_PATH,
};
use std::thread;

fn chebyshev(a: Point, b: Point) -> usize {
    (a.x - b.x).unsigned_abs().max((a.y - b.y).unsigned_abs()) as usize
}

/// Walls from the demo map: a horizontal bar at y = 30 from x = 20 and a vertical one at x = 60.
/// Both are clipped to the grid, leaving the bottom-left part of the bar open as a corridor.
fn build_walls(pathfinder: &mut Pathfinder) {
    for i in 20..40 {
        pathfinder.set_barrier(i, 30, true);
    }
    for i in 10..20 {
        pathfinder.set_barrier(60, i, true);
    }
    for i in 23..45 {
        pathfinder.set_barrier(60, i, true);
    }
}

#[test]
fn straight_path_on_empty_grid() {
    let mut pathfinder: Pathfinder = Pathfinder::new();
    let mut path = [Point::new(0, 0); MAX_PATH];
    let len = pathfinder
        .search(Point::new(1, 1), Point::new(5, 1), &mut path)
        .unwrap();
    assert_eq!(len, 5);
    assert_eq!(path_cost(&path[..len]), Some(40));
}

#[test]
fn empty_grid_paths_respect_chebyshev_bound() {
    let mut pathfinder: Pathfinder = Pathfinder::new();
    let mut path = [Point::new(0, 0); MAX_PATH];
    let corners = [
        Point::new(0, 0),
        Point::new(31, 0),
        Point::new(0, 31),
        Point::new(31, 31),
        Point::new(15, 16),
    ];
    for &start in &corners {
        for &goal in &corners {
            let len = pathfinder.search(start, goal, &mut path).unwrap();
            assert!(len >= chebyshev(start, goal) + 1);
            assert_eq!(path[0], start);
            assert_eq!(path[len - 1], goal);
            assert!(path_cost(&path[..len]).is_some());
        }
    }
}

#[test]
fn wall_forces_path_through_corridor() {
    let mut pathfinder: Pathfinder = Pathfinder::new();
    build_walls(&mut pathfinder);
    assert_eq!(pathfinder.grid().obstacle_count(), GRID_WIDTH - 20);
    let start = Point::new(1, 1);
    let goal = Point::new(30, 31);
    let mut path = [Point::new(0, 0); MAX_PATH];
    let len = pathfinder.search(start, goal, &mut path).unwrap();
    let path = &path[..len];
    assert_eq!(path[0], start);
    assert_eq!(path[len - 1], goal);
    assert!(path.iter().all(|p| !pathfinder.get(p.x, p.y)));
    // Crossing row 30 is only possible left of the wall
    assert!(path.iter().filter(|p| p.y == 30).all(|p| p.x < 20));
    assert!(path_cost(path).is_some());
}

#[test]
fn obstacle_goal_fails() {
    let mut pathfinder: Pathfinder = Pathfinder::new();
    pathfinder.set_barrier(1, 1, true);
    let mut path = [Point::new(0, 0); MAX_PATH];
    let result = pathfinder.search(Point::new(1, 1), Point::new(1, 1), &mut path);
    let err = result.unwrap_err();
    assert_eq!(
        err,
        SearchError::InvalidEndpoint {
            endpoint: Endpoint::Start,
            point: Point::new(1, 1)
        }
    );
    assert!(err.code() <= 0);
    assert_eq!(pathfinder.stats().expanded, 0);
}

#[test]
fn out_of_bounds_goal_fails() {
    let mut pathfinder: Pathfinder = Pathfinder::new();
    let mut path = [Point::new(0, 0); MAX_PATH];
    let goal = Point::new(GRID_WIDTH as i32, GRID_HEIGHT as i32 - 1);
    let result = pathfinder.search(Point::new(0, 0), goal, &mut path);
    assert_eq!(
        result,
        Err(SearchError::InvalidEndpoint {
            endpoint: Endpoint::Goal,
            point: goal
        })
    );
    assert_eq!(pathfinder.stats().allocated, 0);
}

#[test]
fn search_is_deterministic_across_resets() {
    let mut pathfinder: Pathfinder = Pathfinder::new();
    let start = Point::new(1, 1);
    let goal = Point::new(30, 31);
    build_walls(&mut pathfinder);
    let first = pathfinder.get_path_single_goal(start, goal).unwrap();
    let first_stats = pathfinder.stats();

    pathfinder.reset();
    assert_eq!(pathfinder.grid().obstacle_count(), 0);
    build_walls(&mut pathfinder);
    let second = pathfinder.get_path_single_goal(start, goal).unwrap();
    assert_eq!(first, second);
    assert_eq!(first_stats, pathfinder.stats());
}

#[test]
fn tiny_pool_terminates_without_success() {
    let mut pathfinder: Pathfinder<32> = Pathfinder::new();
    let mut path = [Point::new(0, 0); 32];
    let result = pathfinder.search(Point::new(0, 0), Point::new(31, 31), &mut path);
    assert_eq!(result, Err(SearchError::ResourceExhausted(Resource::NodePool)));
    assert!(pathfinder.stats().allocated <= 32);
}

#[test]
fn demo_goal_sweep_finds_every_free_goal() {
    // Mirrors the demo loop: fixed start, goal swept over the interior
    let mut pathfinder: Pathfinder = Pathfinder::new();
    build_walls(&mut pathfinder);
    let start = Point::new(1, 1);
    let mut path = [Point::new(0, 0); MAX_PATH];
    for y in (1..=30).step_by(3) {
        for x in (1..=30).step_by(3) {
            if pathfinder.get(x, y) {
                continue;
            }
            let goal = Point::new(x, y);
            let len = pathfinder.search(start, goal, &mut path).unwrap();
            assert_eq!(path[len - 1], goal);
        }
    }
}

#[test]
fn independent_engines_on_separate_threads() {
    let handles: Vec<_> = (0..2)
        .map(|i| {
            thread::spawn(move || {
                let mut pathfinder: Pathfinder = Pathfinder::new();
                pathfinder.grid_mut().set_rect(10, 0, 1, 25 + i, true);
                pathfinder.get_path_single_goal(Point::new(0, 0), Point::new(20, 0))
            })
        })
        .collect();
    for handle in handles {
        let path = handle.join().unwrap().unwrap();
        assert_eq!(path[0], Point::new(0, 0));
        assert_eq!(path.last(), Some(&Point::new(20, 0)));
    }
}
