use crate::{find_path, next_step, Cell, GridWorld, MovingObstacles};
use rand::rngs::StdRng;
use rand::Rng;
use std::collections::HashSet;

/// Where the car scenario currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarPhase {
    /// Waiting for the user to pick a destination
    NoGoal,
    /// Replanning and driving toward the goal every tick
    Navigating,
    /// At the goal; held until the UI acknowledges the arrival
    Arrived,
}

/// The car scenario: one controlled agent on a grid shared with static
/// obstacles and wandering ones, replanning its route every tick.
pub struct CarSim {
    pub width: i32,
    pub height: i32,
    pub car: Cell,
    pub goal: Option<Cell>,
    pub static_obstacles: HashSet<Cell>,
    pub moving_obstacles: MovingObstacles,
    /// Route computed on the most recent tick, start inclusive. Kept only
    /// so the renderer can draw it; the next tick discards it entirely.
    pub last_path: Vec<Cell>,
    phase: CarPhase,
    rng: StdRng,
}

impl CarSim {
    /// Set up the scenario: car at the origin, `static_count` fixed obstacles
    /// and `moving_count` wandering ones scattered on distinct free cells.
    ///
    /// Fails on non-positive dimensions or when the obstacles cannot fit;
    /// these are configuration errors caught once at setup.
    pub fn new(
        width: i32,
        height: i32,
        static_count: usize,
        moving_count: usize,
        mut rng: StdRng,
    ) -> Result<Self, String> {
        if width <= 0 || height <= 0 {
            return Err(format!("invalid grid dimensions {}x{}", width, height));
        }
        let total = width as usize * height as usize;
        if 1 + static_count + moving_count > total {
            return Err(format!(
                "{} obstacles plus the car exceed the {} cells of a {}x{} grid",
                static_count + moving_count,
                total,
                width,
                height
            ));
        }

        let car = Cell::new(0, 0);

        let mut static_obstacles = HashSet::new();
        while static_obstacles.len() < static_count {
            let cell = Cell::new(rng.gen_range(0..width), rng.gen_range(0..height));
            if cell != car && !static_obstacles.contains(&cell) {
                static_obstacles.insert(cell);
            }
        }

        let mut occupied = static_obstacles.clone();
        occupied.insert(car);
        let moving_obstacles =
            MovingObstacles::scatter(width, height, moving_count, &occupied, &mut rng)?;

        Ok(CarSim {
            width,
            height,
            car,
            goal: None,
            static_obstacles,
            moving_obstacles,
            last_path: Vec::new(),
            phase: CarPhase::NoGoal,
            rng,
        })
    }

    pub fn phase(&self) -> CarPhase {
        self.phase
    }

    /// Select a destination. Honored only while no goal is active and only
    /// for an in-bounds cell not occupied by an obstacle or the car itself;
    /// anything else is silently ignored.
    pub fn set_goal(&mut self, cell: Cell) {
        if self.phase != CarPhase::NoGoal {
            return;
        }
        let in_bounds =
            cell.x >= 0 && cell.x < self.width && cell.y >= 0 && cell.y < self.height;
        if in_bounds
            && cell != self.car
            && !self.static_obstacles.contains(&cell)
            && !self.moving_obstacles.contains(cell)
        {
            self.goal = Some(cell);
            self.phase = CarPhase::Navigating;
        }
    }

    /// The UI calls this once its arrival hold/prompt finishes; clears the
    /// goal and returns to waiting for a new one.
    pub fn acknowledge_arrival(&mut self) {
        if self.phase == CarPhase::Arrived {
            self.goal = None;
            self.last_path.clear();
            self.phase = CarPhase::NoGoal;
        }
    }

    /// The occupancy snapshot for the current tick: static plus moving
    /// obstacles blocked, everything else free.
    pub fn world(&self) -> GridWorld {
        let mut world = GridWorld::new(self.width, self.height);
        world.block_all(self.static_obstacles.iter().copied());
        world.block_all(self.moving_obstacles.cells().iter().copied());
        world
    }

    /// One simulation tick: wander the obstacles, then (when navigating)
    /// replan from scratch and take a single step. A goal that has become
    /// unreachable is dropped without fuss; reaching the goal parks the sim
    /// in [`CarPhase::Arrived`] until acknowledged.
    pub fn tick(&mut self) {
        let bounds = GridWorld::new(self.width, self.height);
        self.moving_obstacles
            .advance(&bounds, &self.static_obstacles, self.car, &mut self.rng);

        if self.phase != CarPhase::Navigating {
            return;
        }
        let goal = match self.goal {
            Some(goal) => goal,
            None => return,
        };

        let world = self.world();
        self.last_path = find_path(&world, self.car, goal);

        if self.last_path.is_empty() {
            // Obstacles sealed the goal off; drop it and wait for a new one
            self.goal = None;
            self.phase = CarPhase::NoGoal;
            return;
        }

        if let Some(step) = next_step(&self.last_path) {
            self.car = step;
        }

        if self.car == goal {
            self.phase = CarPhase::Arrived;
        }
    }
}
