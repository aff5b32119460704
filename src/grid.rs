use rand::Rng;
use std::collections::HashSet;

/// A position on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Cell { x, y }
    }

    /// The cell displaced by (dx, dy)
    pub fn offset(&self, dx: i32, dy: i32) -> Cell {
        Cell::new(self.x + dx, self.y + dy)
    }
}

/// Fixed neighbor enumeration order: up, down, left, right.
/// Pathfinding tie-breaking depends on this order staying stable.
pub const DIRECTIONS: [(i32, i32); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

/// Snapshot of the grid for one simulation tick: dimensions plus the set of
/// cells that are currently impassable. Rebuilt from scratch every tick by
/// the simulation loop; never patched incrementally.
#[derive(Clone)]
pub struct GridWorld {
    pub width: i32,
    pub height: i32,
    blocked: HashSet<Cell>,
}

impl GridWorld {
    /// Create a world with all cells free
    pub fn new(width: i32, height: i32) -> Self {
        GridWorld {
            width,
            height,
            blocked: HashSet::new(),
        }
    }

    /// Mark every cell in the iterator as blocked
    pub fn block_all<I: IntoIterator<Item = Cell>>(&mut self, cells: I) {
        self.blocked.extend(cells);
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.x < self.width && cell.y >= 0 && cell.y < self.height
    }

    /// Check whether a cell is impassable. Out of bounds counts as blocked.
    pub fn is_blocked(&self, cell: Cell) -> bool {
        !self.in_bounds(cell) || self.blocked.contains(&cell)
    }

    /// The traversable neighbors of a cell, in the fixed order of
    /// [`DIRECTIONS`]. Never yields an out-of-bounds or blocked cell.
    pub fn neighbors(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        DIRECTIONS
            .iter()
            .map(move |&(dx, dy)| cell.offset(dx, dy))
            .filter(move |&n| !self.is_blocked(n))
    }

    /// Number of cells not currently blocked
    pub fn free_cell_count(&self) -> usize {
        (self.width as usize * self.height as usize) - self.blocked.len()
    }

    /// Pick a uniformly random unblocked cell. Returns None when the grid is
    /// completely blocked.
    pub fn random_free_cell(&self, rng: &mut impl Rng) -> Option<Cell> {
        if self.free_cell_count() == 0 {
            return None;
        }
        loop {
            let cell = Cell::new(rng.gen_range(0..self.width), rng.gen_range(0..self.height));
            if !self.is_blocked(cell) {
                return Some(cell);
            }
        }
    }
}
