use tilenav_core::{Point, Range};

/// Parent index of a search root.
pub(crate) const NO_PARENT: usize = usize::MAX;

// ---------------------------------------------------------------------------
// Arena node and per-tile slot
// ---------------------------------------------------------------------------

/// A search-time node. Lives in the arena for the duration of one search.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Node {
    pub(crate) pos: Point,
    pub(crate) g: i32,
    pub(crate) h: i32,
    pub(crate) parent: usize,
}

impl Node {
    #[inline]
    pub(crate) fn f(&self) -> i32 {
        self.g.saturating_add(self.h)
    }
}

/// Per-tile bookkeeping, valid only when `generation` matches the current
/// search.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Slot {
    pub(crate) generation: u32,
    pub(crate) node: usize,
    pub(crate) closed: bool,
}

// ---------------------------------------------------------------------------
// Astar
// ---------------------------------------------------------------------------

/// Reusable A* search workspace for a grid rectangle.
///
/// `Astar` owns the node arena, the open list and a per-tile slot table, so
/// repeated searches allocate nothing after warm-up. Slots are stamped with
/// a generation counter and go stale when the next search starts.
#[derive(Debug)]
pub struct Astar {
    pub(crate) rng: Range,
    pub(crate) width: usize,
    pub(crate) nodes: Vec<Node>,
    pub(crate) slots: Vec<Slot>,
    pub(crate) generation: u32,
    /// Arena indices of open nodes, in insertion order.
    pub(crate) open: Vec<usize>,
    pub(crate) nbuf: Vec<Point>,
}

impl Astar {
    /// Create a new workspace for the given grid rectangle.
    pub fn new(rng: Range) -> Self {
        Self {
            rng,
            width: rng.width().max(0) as usize,
            nodes: Vec::new(),
            slots: vec![Slot::default(); rng.len()],
            generation: 0,
            open: Vec::new(),
            nbuf: Vec::with_capacity(8),
        }
    }

    /// Replace the underlying range, reallocating the slot table only when
    /// the new range does not fit the existing one.
    pub fn set_range(&mut self, rng: Range) {
        let new_len = rng.len();
        self.rng = rng;
        self.width = rng.width().max(0) as usize;
        if new_len <= self.slots.len() {
            self.generation = self.generation.wrapping_add(1);
            return;
        }
        self.slots.clear();
        self.slots.resize(new_len, Slot::default());
        self.generation = 0;
    }

    /// The grid rectangle being searched.
    #[inline]
    pub fn range(&self) -> Range {
        self.rng
    }

    /// Start a fresh search: invalidate every slot and empty the arena.
    pub(crate) fn begin(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            // Wrapped: old stamps could collide with the new generation.
            self.slots.fill(Slot::default());
            self.generation = 1;
        }
        self.nodes.clear();
        self.open.clear();
    }

    /// Add a node to the arena and the open list.
    pub(crate) fn open_node(&mut self, slot: usize, node: Node) -> usize {
        let ni = self.nodes.len();
        self.nodes.push(node);
        self.slots[slot] = Slot {
            generation: self.generation,
            node: ni,
            closed: false,
        };
        self.open.push(ni);
        ni
    }

    /// Remove and return the open node with the lowest `g + h`.
    ///
    /// Linear scan; on equal scores the earliest inserted node wins.
    pub(crate) fn pop_lowest(&mut self) -> Option<usize> {
        let mut best: Option<(usize, i32)> = None;
        for (i, &ni) in self.open.iter().enumerate() {
            let f = self.nodes[ni].f();
            if best.is_none_or(|(_, bf)| f < bf) {
                best = Some((i, f));
            }
        }
        let (i, _) = best?;
        Some(self.open.remove(i))
    }

    /// Convert a `Point` to a slot index. Returns `None` if out of range.
    #[inline]
    pub(crate) fn idx(&self, p: Point) -> Option<usize> {
        if !self.rng.contains(p) {
            return None;
        }
        let x = (p.x - self.rng.min.x) as usize;
        let y = (p.y - self.rng.min.y) as usize;
        Some(y * self.width + x)
    }
}
