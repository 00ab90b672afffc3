use crate::{Point, GRID_HEIGHT, GRID_WIDTH};
use core::fmt;

const BYTES: usize = GRID_WIDTH * GRID_HEIGHT / 8;

/// [OccupancyGrid] stores one bit per cell: set means blocked, clear means free.
/// Bit `y * GRID_WIDTH + x` lives in byte `index / 8`, least significant bit
/// first.
///
/// Anything outside the grid reads as blocked, so a single [is_obstacle](Self::is_obstacle)
/// call covers both the bounds check and the occupancy check.
#[derive(Clone, PartialEq, Eq)]
pub struct OccupancyGrid {
    bits: [u8; BYTES],
}

impl Default for OccupancyGrid {
    fn default() -> OccupancyGrid {
        OccupancyGrid::new()
    }
}

impl OccupancyGrid {
    pub const fn new() -> OccupancyGrid {
        OccupancyGrid { bits: [0; BYTES] }
    }

    pub const fn width(&self) -> usize {
        GRID_WIDTH
    }

    pub const fn height(&self) -> usize {
        GRID_HEIGHT
    }

    /// Clears every cell.
    pub fn reset(&mut self) {
        self.bits = [0; BYTES];
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < GRID_WIDTH && (y as usize) < GRID_HEIGHT
    }

    pub fn point_in_bounds(&self, point: Point) -> bool {
        self.in_bounds(point.x, point.y)
    }

    fn bit(&self, x: i32, y: i32) -> Option<(usize, u8)> {
        if self.in_bounds(x, y) {
            let ix = y as usize * GRID_WIDTH + x as usize;
            Some((ix >> 3, 1 << (ix & 7)))
        } else {
            None
        }
    }

    /// Blocks (`on == true`) or frees a cell. Writes outside the grid are ignored.
    pub fn set_barrier(&mut self, x: i32, y: i32, on: bool) {
        if let Some((byte, mask)) = self.bit(x, y) {
            if on {
                self.bits[byte] |= mask;
            } else {
                self.bits[byte] &= !mask;
            }
        }
    }

    pub fn set_point(&mut self, point: Point, on: bool) {
        self.set_barrier(point.x, point.y, on);
    }

    /// Sets a `width` by `height` block with its top-left corner at `(x, y)`.
    /// The part of the block outside the grid is dropped.
    pub fn set_rect(&mut self, x: i32, y: i32, width: i32, height: i32, on: bool) {
        for j in y..y.saturating_add(height) {
            for i in x..x.saturating_add(width) {
                self.set_barrier(i, j, on);
            }
        }
    }

    /// True if the cell is blocked or lies outside the grid.
    pub fn is_obstacle(&self, x: i32, y: i32) -> bool {
        match self.bit(x, y) {
            Some((byte, mask)) => self.bits[byte] & mask != 0,
            None => true,
        }
    }

    pub fn is_obstacle_point(&self, point: Point) -> bool {
        self.is_obstacle(point.x, point.y)
    }

    /// Number of blocked cells inside the grid.
    pub fn obstacle_count(&self) -> usize {
        self.bits.iter().map(|b| b.count_ones() as usize).sum()
    }
}

impl fmt::Display for OccupancyGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in 0..GRID_HEIGHT as i32 {
            for x in 0..GRID_WIDTH as i32 {
                let c = if self.is_obstacle(x, y) { '#' } else { '.' };
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for OccupancyGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("OccupancyGrid")
            .field("width", &GRID_WIDTH)
            .field("height", &GRID_HEIGHT)
            .field("obstacles", &self.obstacle_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_is_obstacle() {
        let grid = OccupancyGrid::new();
        assert!(!grid.is_obstacle(0, 0));
        assert!(!grid.is_obstacle(GRID_WIDTH as i32 - 1, GRID_HEIGHT as i32 - 1));
        assert!(grid.is_obstacle(-1, 0));
        assert!(grid.is_obstacle(0, -1));
        assert!(grid.is_obstacle(GRID_WIDTH as i32, 0));
        assert!(grid.is_obstacle(0, GRID_HEIGHT as i32));
    }

    #[test]
    fn set_and_clear_barrier() {
        let mut grid = OccupancyGrid::new();
        grid.set_barrier(7, 3, true);
        grid.set_barrier(8, 3, true);
        assert!(grid.is_obstacle(7, 3));
        assert!(grid.is_obstacle(8, 3));
        assert!(!grid.is_obstacle(6, 3));
        assert!(!grid.is_obstacle(7, 4));
        grid.set_barrier(7, 3, false);
        assert!(!grid.is_obstacle(7, 3));
        assert!(grid.is_obstacle(8, 3));
        assert_eq!(grid.obstacle_count(), 1);
    }

    #[test]
    fn out_of_bounds_writes_are_ignored() {
        let mut grid = OccupancyGrid::new();
        grid.set_barrier(-1, 0, true);
        grid.set_barrier(GRID_WIDTH as i32, 5, true);
        grid.set_barrier(3, GRID_HEIGHT as i32 + 10, true);
        assert_eq!(grid, OccupancyGrid::new());
    }

    #[test]
    fn set_rect_is_clipped() {
        let mut grid = OccupancyGrid::new();
        grid.set_rect(20, 30, 20, 1, true);
        assert_eq!(grid.obstacle_count(), GRID_WIDTH - 20);
        assert!(grid.is_obstacle(20, 30));
        assert!(!grid.is_obstacle(19, 30));
        assert!(!grid.is_obstacle(20, 31));
    }

    #[test]
    fn reset_clears_everything() {
        let mut grid = OccupancyGrid::new();
        grid.set_rect(0, 0, 4, 4, true);
        assert_eq!(grid.obstacle_count(), 16);
        grid.reset();
        assert_eq!(grid.obstacle_count(), 0);
    }

    #[test]
    fn display_marks_obstacles() {
        let mut grid = OccupancyGrid::new();
        grid.set_barrier(1, 0, true);
        let rendered = grid.to_string();
        let first_row = rendered.lines().next().unwrap();
        assert_eq!(first_row.len(), GRID_WIDTH);
        assert!(first_row.starts_with(".#."));
        assert_eq!(rendered.lines().count(), GRID_HEIGHT);
    }
}
