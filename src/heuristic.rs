use crate::{Point, C, D};

/// Remaining-cost estimate used to order the open list. All variants work in
/// the same integer units as [C] and [D].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Heuristic {
    /// Manhattan distance times [C]. Cheap, but it overestimates whenever a
    /// diagonal move is shorter, so returned paths can be slightly longer than
    /// optimal.
    #[default]
    Manhattan,
    /// Octile distance: `C * max + (D - C) * min` of the axis deltas.
    /// Admissible and consistent for the 8-connected grid, so paths are optimal.
    Octile,
    /// Always zero, turning the search into Dijkstra's algorithm.
    Zero,
}

impl Heuristic {
    pub fn estimate(self, from: &Point, to: &Point) -> u32 {
        let dx = from.x.abs_diff(to.x);
        let dy = from.y.abs_diff(to.y);
        match self {
            Heuristic::Manhattan => u32::from(C) * (dx + dy),
            Heuristic::Octile => u32::from(C) * dx.max(dy) + u32::from(D - C) * dx.min(dy),
            Heuristic::Zero => 0,
        }
    }
}
