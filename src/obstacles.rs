use crate::{Cell, GridWorld, DIRECTIONS};
use rand::Rng;
use std::collections::{HashMap, HashSet};

/// The wandering obstacles of the car scenario.
///
/// Each obstacle keeps a heading and drifts one cell per tick. This is a
/// local collision-avoiding random walk, not pathfinding: when both the
/// current heading and one random alternative are unusable, the obstacle
/// stands still (possibly forever, if it stays boxed in).
pub struct MovingObstacles {
    cells: HashSet<Cell>,
    directions: HashMap<Cell, (i32, i32)>,
}

impl MovingObstacles {
    /// Scatter `count` obstacles on cells not already taken by `occupied`
    /// (static obstacles plus the agent), each with a random initial heading.
    ///
    /// Fails when the grid cannot hold that many obstacles; this is a setup
    /// error reported once, never a per-tick condition.
    pub fn scatter(
        width: i32,
        height: i32,
        count: usize,
        occupied: &HashSet<Cell>,
        rng: &mut impl Rng,
    ) -> Result<Self, String> {
        let total = width as usize * height as usize;
        if occupied.len() + count > total {
            return Err(format!(
                "cannot place {} moving obstacles: only {} free cells on a {}x{} grid",
                count,
                total - occupied.len(),
                width,
                height
            ));
        }

        let mut cells = HashSet::new();
        let mut directions = HashMap::new();
        while cells.len() < count {
            let cell = Cell::new(rng.gen_range(0..width), rng.gen_range(0..height));
            if !occupied.contains(&cell) && !cells.contains(&cell) {
                cells.insert(cell);
                directions.insert(cell, random_direction(rng));
            }
        }

        Ok(MovingObstacles {
            cells,
            directions,
        })
    }

    pub fn cells(&self) -> &HashSet<Cell> {
        &self.cells
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    /// Advance every obstacle one tick.
    ///
    /// Per obstacle: step along the current heading if the target cell is in
    /// bounds and unoccupied; otherwise pick a fresh random heading and try
    /// that once; otherwise stay put with the heading zeroed. Positions and
    /// headings are rebuilt wholesale each tick so obstacles never collide
    /// with the cells others have already claimed this tick.
    pub fn advance(
        &mut self,
        bounds: &GridWorld,
        static_obstacles: &HashSet<Cell>,
        agent: Cell,
        rng: &mut impl Rng,
    ) {
        let mut new_cells = HashSet::new();
        let mut new_directions = HashMap::new();

        for &cell in &self.cells {
            let (dx, dy) = self.directions.get(&cell).copied().unwrap_or((0, 0));

            let free = |c: Cell| {
                bounds.in_bounds(c)
                    && !self.cells.contains(&c)
                    && !new_cells.contains(&c)
                    && !static_obstacles.contains(&c)
                    && c != agent
            };

            let target = cell.offset(dx, dy);
            let (next, heading) = if (dx, dy) != (0, 0) && free(target) {
                (target, (dx, dy))
            } else {
                let (rdx, rdy) = random_direction(rng);
                let retry = cell.offset(rdx, rdy);
                if free(retry) {
                    (retry, (rdx, rdy))
                } else {
                    (cell, (0, 0))
                }
            };

            new_cells.insert(next);
            new_directions.insert(next, heading);
        }

        self.cells = new_cells;
        self.directions = new_directions;
    }
}

fn random_direction(rng: &mut impl Rng) -> (i32, i32) {
    DIRECTIONS[rng.gen_range(0..DIRECTIONS.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_scatter_respects_occupied() {
        let mut rng = StdRng::seed_from_u64(1);
        let occupied: HashSet<Cell> = [Cell::new(0, 0), Cell::new(1, 0)].into_iter().collect();

        let obstacles = MovingObstacles::scatter(4, 4, 5, &occupied, &mut rng).unwrap();
        assert_eq!(obstacles.cells().len(), 5);
        for cell in obstacles.cells() {
            assert!(!occupied.contains(cell));
        }
    }

    #[test]
    fn test_scatter_too_many() {
        let mut rng = StdRng::seed_from_u64(1);
        let occupied = HashSet::new();
        assert!(MovingObstacles::scatter(2, 2, 5, &occupied, &mut rng).is_err());
    }

    #[test]
    fn test_boxed_in_obstacle_stays_put() {
        let mut rng = StdRng::seed_from_u64(1);
        let bounds = GridWorld::new(3, 3);
        // Wall off every neighbor of the center
        let static_obstacles: HashSet<Cell> = [
            Cell::new(1, 0),
            Cell::new(1, 2),
            Cell::new(0, 1),
            Cell::new(2, 1),
        ]
        .into_iter()
        .collect();

        let mut obstacles = MovingObstacles::scatter(3, 3, 0, &static_obstacles, &mut rng).unwrap();
        obstacles.cells.insert(Cell::new(1, 1));
        obstacles.directions.insert(Cell::new(1, 1), (0, 1));

        for _ in 0..10 {
            obstacles.advance(&bounds, &static_obstacles, Cell::new(0, 0), &mut rng);
            assert!(obstacles.contains(Cell::new(1, 1)));
            assert_eq!(obstacles.cells().len(), 1);
        }
    }

    #[test]
    fn test_advance_keeps_count_and_stays_legal() {
        let mut rng = StdRng::seed_from_u64(42);
        let bounds = GridWorld::new(8, 8);
        let static_obstacles: HashSet<Cell> =
            [Cell::new(3, 3), Cell::new(4, 4)].into_iter().collect();
        let agent = Cell::new(0, 0);

        let mut occupied = static_obstacles.clone();
        occupied.insert(agent);
        let mut obstacles = MovingObstacles::scatter(8, 8, 6, &occupied, &mut rng).unwrap();

        for _ in 0..50 {
            obstacles.advance(&bounds, &static_obstacles, agent, &mut rng);
            assert_eq!(obstacles.cells().len(), 6);
            for &cell in obstacles.cells() {
                assert!(bounds.in_bounds(cell));
                assert!(!static_obstacles.contains(&cell));
                assert_ne!(cell, agent);
            }
        }
    }
}
