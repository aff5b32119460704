use crate::{find_path, next_step, score, Cell, GridWorld};
use rand::rngs::StdRng;
use std::collections::VecDeque;

/// Why a snake run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOver {
    /// The body sealed off every route to the food
    NoPathToFood,
    SelfCollision,
    WallCollision,
}

/// Result of one snake tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnakeOutcome {
    Continue,
    /// Food was eaten this tick; the body grew by one
    Ate,
    Over(GameOver),
}

/// The snake scenario: a self-driving snake replanning a route to the food
/// every tick, growing on each catch.
pub struct SnakeSim {
    pub width: i32,
    pub height: i32,
    /// Body cells, head first
    pub body: VecDeque<Cell>,
    pub food: Cell,
    pub score: u32,
    pub high_score: u32,
    /// Route computed on the most recent tick, for rendering only
    pub last_path: Vec<Cell>,
    high_score_path: String,
    game_over: Option<GameOver>,
    rng: StdRng,
}

impl SnakeSim {
    /// Set up a one-segment snake and drop the first food on a random free
    /// cell. The previously recorded high score is read from
    /// `high_score_path`; a missing file counts as 0.
    pub fn new(
        width: i32,
        height: i32,
        high_score_path: &str,
        mut rng: StdRng,
    ) -> Result<Self, String> {
        if width <= 0 || height <= 0 {
            return Err(format!("invalid grid dimensions {}x{}", width, height));
        }
        if width as usize * (height as usize) < 2 {
            return Err("grid too small to hold a snake and its food".to_string());
        }

        let head = Cell::new(width / 2, height / 2);
        let body: VecDeque<Cell> = VecDeque::from([head]);

        let mut world = GridWorld::new(width, height);
        world.block_all(body.iter().copied());
        let food = world
            .random_free_cell(&mut rng)
            .ok_or_else(|| "no free cell left for food".to_string())?;

        Ok(SnakeSim {
            width,
            height,
            body,
            food,
            score: 0,
            high_score: score::load_high_score(high_score_path),
            last_path: Vec::new(),
            high_score_path: high_score_path.to_string(),
            game_over: None,
            rng,
        })
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn game_over(&self) -> Option<GameOver> {
        self.game_over
    }

    /// Occupancy snapshot for planning: the body blocks, except the head
    /// (the search starts there).
    pub fn world(&self) -> GridWorld {
        let mut world = GridWorld::new(self.width, self.height);
        world.block_all(self.body.iter().skip(1).copied());
        world
    }

    /// One simulation tick: replan toward the food and take a single step.
    ///
    /// Reaching the food keeps the tail (the body grows by one), bumps the
    /// score, persists a new high score, and relocates the food to a random
    /// cell off the body. Any other tick pops the tail so the length holds.
    pub fn tick(&mut self) -> SnakeOutcome {
        if let Some(reason) = self.game_over {
            return SnakeOutcome::Over(reason);
        }

        let world = self.world();
        self.last_path = find_path(&world, self.head(), self.food);

        let step = match next_step(&self.last_path) {
            Some(step) => step,
            None => return self.terminate(GameOver::NoPathToFood),
        };

        // The planner only yields traversable cells, so these guards are
        // consistency checks rather than the primary collision detector.
        if !world.in_bounds(step) {
            return self.terminate(GameOver::WallCollision);
        }
        if self.body.contains(&step) {
            return self.terminate(GameOver::SelfCollision);
        }

        self.body.push_front(step);

        if step == self.food {
            self.score += 1;
            if self.score > self.high_score {
                self.high_score = self.score;
                score::save_high_score(&self.high_score_path, self.high_score);
            }
            let mut occupied = GridWorld::new(self.width, self.height);
            occupied.block_all(self.body.iter().copied());
            match occupied.random_free_cell(&mut self.rng) {
                Some(cell) => self.food = cell,
                // Board full: the snake has won every cell there is
                None => return self.terminate(GameOver::NoPathToFood),
            }
            SnakeOutcome::Ate
        } else {
            self.body.pop_back();
            SnakeOutcome::Continue
        }
    }

    fn terminate(&mut self, reason: GameOver) -> SnakeOutcome {
        self.game_over = Some(reason);
        SnakeOutcome::Over(reason)
    }
}
