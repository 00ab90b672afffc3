/// Binary min-heap over node pool indices with room for `N` entries.
///
/// The heap does not store priorities. Every comparison asks the caller for
/// the current f-score of an index, so a node whose cost dropped after it was
/// pushed only needs a [decrease_key](Self::decrease_key) to restore heap order.
/// An entry only moves past another on a strictly smaller f-score, which keeps
/// the pop order a pure function of the push order.
#[derive(Clone, Debug)]
pub struct OpenList<const N: usize> {
    heap: [usize; N],
    /// Heap slot of every pool index currently queued.
    slot: [usize; N],
    len: usize,
}

const NOT_QUEUED: usize = usize::MAX;

impl<const N: usize> Default for OpenList<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> OpenList<N> {
    pub const fn new() -> Self {
        OpenList {
            heap: [0; N],
            slot: [NOT_QUEUED; N],
            len: 0,
        }
    }

    pub fn clear(&mut self) {
        for &ix in &self.heap[..self.len] {
            self.slot[ix] = NOT_QUEUED;
        }
        self.len = 0;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn contains(&self, ix: usize) -> bool {
        self.slot.get(ix).is_some_and(|&s| s != NOT_QUEUED)
    }

    /// Queues pool index `ix`. Hands the index back if the heap is full or
    /// `ix` cannot be tracked.
    pub fn push<F>(&mut self, ix: usize, f_score: F) -> Result<(), usize>
    where
        F: Fn(usize) -> u32,
    {
        if self.len >= N || ix >= N || self.contains(ix) {
            return Err(ix);
        }
        let pos = self.len;
        self.heap[pos] = ix;
        self.slot[ix] = pos;
        self.len += 1;
        self.sift_up(pos, &f_score);
        Ok(())
    }

    /// Removes and returns the index with the smallest f-score.
    pub fn pop_min<F>(&mut self, f_score: F) -> Option<usize>
    where
        F: Fn(usize) -> u32,
    {
        if self.len == 0 {
            return None;
        }
        let top = self.heap[0];
        self.len -= 1;
        self.slot[top] = NOT_QUEUED;
        if self.len > 0 {
            let last = self.heap[self.len];
            self.heap[0] = last;
            self.slot[last] = 0;
            self.sift_down(0, &f_score);
        }
        Some(top)
    }

    /// Restores heap order after the f-score of a queued index decreased.
    /// Returns false if `ix` is not queued.
    pub fn decrease_key<F>(&mut self, ix: usize, f_score: F) -> bool
    where
        F: Fn(usize) -> u32,
    {
        if !self.contains(ix) {
            return false;
        }
        let pos = self.slot[ix];
        self.sift_up(pos, &f_score);
        true
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.slot[self.heap[a]] = a;
        self.slot[self.heap[b]] = b;
    }

    fn sift_up<F>(&mut self, mut pos: usize, f_score: &F)
    where
        F: Fn(usize) -> u32,
    {
        while pos > 0 {
            let parent = (pos - 1) / 2;
            if f_score(self.heap[pos]) >= f_score(self.heap[parent]) {
                break;
            }
            self.swap(pos, parent);
            pos = parent;
        }
    }

    fn sift_down<F>(&mut self, mut pos: usize, f_score: &F)
    where
        F: Fn(usize) -> u32,
    {
        loop {
            let left = 2 * pos + 1;
            let right = left + 1;
            let mut smallest = pos;
            if left < self.len && f_score(self.heap[left]) < f_score(self.heap[smallest]) {
                smallest = left;
            }
            if right < self.len && f_score(self.heap[right]) < f_score(self.heap[smallest]) {
                smallest = right;
            }
            if smallest == pos {
                break;
            }
            self.swap(pos, smallest);
            pos = smallest;
        }
    }
}
