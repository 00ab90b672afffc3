use crate::Point;

/// Parent index of the start node.
pub const NO_PARENT: usize = usize::MAX;

/// One visited or frontier cell of a single search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Node {
    pub x: u16,
    pub y: u16,
    /// Cost of the best known route from the start.
    pub g: u16,
    /// Pool index of the predecessor, [NO_PARENT] for the start node.
    pub parent: usize,
    pub in_open: bool,
}

impl Node {
    const EMPTY: Node = Node {
        x: 0,
        y: 0,
        g: 0,
        parent: NO_PARENT,
        in_open: false,
    };

    /// A fresh open node. Callers guarantee the position is inside the grid.
    pub fn open(position: Point, g: u16, parent: usize) -> Node {
        Node {
            x: position.x as u16,
            y: position.y as u16,
            g,
            parent,
            in_open: true,
        }
    }

    pub fn position(&self) -> Point {
        Point::new(i32::from(self.x), i32::from(self.y))
    }

    pub fn is_at(&self, position: Point) -> bool {
        i32::from(self.x) == position.x && i32::from(self.y) == position.y
    }
}

/// Fixed-capacity arena of [Node]s, bump-allocated and emptied between searches.
/// Nodes refer to each other only by index into the pool.
#[derive(Clone, Debug)]
pub struct NodePool<const N: usize> {
    nodes: [Node; N],
    len: usize,
}

impl<const N: usize> Default for NodePool<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> NodePool<N> {
    pub const fn new() -> Self {
        NodePool {
            nodes: [Node::EMPTY; N],
            len: 0,
        }
    }

    /// Logically empties the pool. Old slots are overwritten on allocation.
    pub fn reset(&mut self) {
        self.len = 0;
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len >= N
    }

    /// Stores `node` in the next free slot and returns its index, or [None]
    /// once all `N` slots are taken.
    pub fn allocate(&mut self, node: Node) -> Option<usize> {
        let ix = self.len;
        let slot = self.nodes.get_mut(ix)?;
        *slot = node;
        self.len += 1;
        Some(ix)
    }

    pub fn get(&self, ix: usize) -> Option<&Node> {
        self.as_slice().get(ix)
    }

    pub fn get_mut(&mut self, ix: usize) -> Option<&mut Node> {
        self.nodes[..self.len].get_mut(ix)
    }

    /// Linear scan for the node at `position`.
    pub fn find(&self, position: Point) -> Option<usize> {
        self.as_slice().iter().position(|n| n.is_at(position))
    }

    /// The nodes allocated since the last [reset](Self::reset).
    pub fn as_slice(&self) -> &[Node] {
        &self.nodes[..self.len]
    }
}
