use bounded_astar::{Pathfinder, Point, MAX_PATH};

// In this example a path is found around the walls of the demo map:
// a bar along y = 30 from x = 20 to the right edge, and a column at
// x = 12 reaching down from the top. The grid is printed with
// - # marking an obstacle
// - * marking the path
// - . marking free space

fn main() {
    let mut pathfinder: Pathfinder = Pathfinder::new();
    pathfinder.grid_mut().set_rect(20, 30, 20, 1, true);
    pathfinder.grid_mut().set_rect(12, 0, 1, 24, true);
    println!("{}", pathfinder);

    let start = Point::new(1, 1);
    let goal = Point::new(30, 31);
    let mut path = [start; MAX_PATH];
    match pathfinder.search(start, goal, &mut path) {
        Ok(len) => {
            let path = &path[..len];
            println!("Path of {} cells:", len);
            for y in 0..32 {
                let row: String = (0..32)
                    .map(|x| {
                        if path.contains(&Point::new(x, y)) {
                            '*'
                        } else if pathfinder.get(x, y) {
                            '#'
                        } else {
                            '.'
                        }
                    })
                    .collect();
                println!("{}", row);
            }
        }
        Err(e) => println!("No path: {} (code {})", e, e.code()),
    }
    println!("{:?}", pathfinder.stats());
}
