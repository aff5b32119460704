pub mod car;
pub mod config;
pub mod grid;
pub mod obstacles;
pub mod pathfinding;
pub mod score;
pub mod snake;

pub use car::{CarPhase, CarSim};
pub use config::Config;
pub use grid::{Cell, GridWorld, DIRECTIONS};
pub use obstacles::MovingObstacles;
pub use pathfinding::{find_path, format_path, next_step};
pub use snake::{GameOver, SnakeOutcome, SnakeSim};
