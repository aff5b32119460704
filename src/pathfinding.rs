use crate::{Cell, GridWorld};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

/// A node in the pathfinding search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SearchNode {
    cell: Cell,
    cost: u32,
    /// Insertion sequence number. Equal-cost nodes pop in insertion order,
    /// so ties resolve along the fixed neighbor enumeration order and the
    /// resulting path is deterministic for identical inputs.
    seq: u32,
}

impl PartialOrd for SearchNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SearchNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap (BinaryHeap is max-heap by default)
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Find a minimum-hop path from `start` to `goal` over the traversable cells
/// of `world`, using Dijkstra with unit edge weights.
///
/// The returned path runs from `start` to `goal` inclusive. An empty vector
/// means no path exists; that is a normal outcome (obstacles may enclose the
/// goal), not an error. `start == goal` yields `[start]`.
///
/// The search is rebuilt from scratch on every call; at the grid sizes this
/// crate targets a full search per tick is cheap and avoids stale-state bugs.
pub fn find_path(world: &GridWorld, start: Cell, goal: Cell) -> Vec<Cell> {
    let mut queue: BinaryHeap<SearchNode> = BinaryHeap::new();
    let mut best_costs: HashMap<Cell, u32> = HashMap::new();
    let mut came_from: HashMap<Cell, Cell> = HashMap::new();
    let mut seq = 0u32;

    best_costs.insert(start, 0);
    queue.push(SearchNode {
        cell: start,
        cost: 0,
        seq,
    });

    let mut goal_reached = start == goal;

    while let Some(node) = queue.pop() {
        if node.cell == goal {
            goal_reached = true;
            break;
        }

        // Skip entries superseded by a cheaper path found later
        if best_costs.get(&node.cell).is_some_and(|&best| node.cost > best) {
            continue;
        }

        for neighbor in world.neighbors(node.cell) {
            let tentative = node.cost + 1;
            let improves = match best_costs.get(&neighbor) {
                Some(&best) => tentative < best,
                None => true,
            };
            if improves {
                best_costs.insert(neighbor, tentative);
                came_from.insert(neighbor, node.cell);
                seq += 1;
                queue.push(SearchNode {
                    cell: neighbor,
                    cost: tentative,
                    seq,
                });
            }
        }
    }

    if !goal_reached {
        return Vec::new();
    }

    // Walk predecessor links backward from goal to start
    let mut path = vec![goal];
    let mut current = goal;
    while current != start {
        match came_from.get(&current) {
            Some(&prev) => current = prev,
            None => return Vec::new(),
        }
        path.push(current);
    }
    path.reverse();
    path
}

/// The single next move along a freshly computed path: `path[1]`, the first
/// cell away from the current position. Returns None when the path is empty
/// (no route exists) or has a single element (already at the goal).
pub fn next_step(path: &[Cell]) -> Option<Cell> {
    if path.len() < 2 {
        None
    } else {
        Some(path[1])
    }
}

/// Format path for display
pub fn format_path(path: &[Cell]) -> String {
    if path.is_empty() {
        return "No path".to_string();
    }

    let mut result = String::new();
    for (i, cell) in path.iter().enumerate() {
        if i > 0 {
            result.push_str(" -> ");
        }
        result.push_str(&format!("({},{})", cell.x, cell.y));
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_equals_goal() {
        let world = GridWorld::new(4, 4);
        let cell = Cell::new(2, 2);
        assert_eq!(find_path(&world, cell, cell), vec![cell]);
    }

    #[test]
    fn test_adjacent_goal() {
        let world = GridWorld::new(4, 4);
        let path = find_path(&world, Cell::new(1, 1), Cell::new(1, 2));
        assert_eq!(path, vec![Cell::new(1, 1), Cell::new(1, 2)]);
    }

    #[test]
    fn test_next_step_semantics() {
        assert_eq!(next_step(&[]), None);
        assert_eq!(next_step(&[Cell::new(0, 0)]), None);
        assert_eq!(
            next_step(&[Cell::new(0, 0), Cell::new(1, 0), Cell::new(2, 0)]),
            Some(Cell::new(1, 0))
        );
    }

    #[test]
    fn test_wall_forces_detour() {
        let mut world = GridWorld::new(5, 5);
        // Vertical wall at x=2 with a gap at the bottom
        world.block_all((0..4).map(|y| Cell::new(2, y)));

        let path = find_path(&world, Cell::new(0, 0), Cell::new(4, 0));
        assert!(!path.is_empty());
        // 4 right + down/up around the wall at y=4
        assert_eq!(path.len(), 13);
        assert!(!path.iter().any(|&c| world.is_blocked(c)));
    }

    #[test]
    fn test_format_path() {
        assert_eq!(format_path(&[]), "No path");
        assert_eq!(
            format_path(&[Cell::new(0, 0), Cell::new(0, 1)]),
            "(0,0) -> (0,1)"
        );
    }
}
