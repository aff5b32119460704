use gridpilot::{Config, GameOver, SnakeOutcome, SnakeSim};
use macroquad::prelude::*;
use ::rand::rngs::StdRng;
use ::rand::SeedableRng;

/// Height of the score strip above the playfield
const SCOREBOARD_HEIGHT: f32 = 40.0;

/// UI-side state wrapped around the snake simulation
struct SnakeApp {
    sim: SnakeSim,
    cell_size: f32,
    tick_interval: f32,
    tick_timer: f32,
}

impl SnakeApp {
    fn new(config: &Config) -> Result<Self, String> {
        let rng = match config.simulation.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let sim = SnakeSim::new(
            config.snake.width,
            config.snake.height,
            &config.snake.high_score_path,
            rng,
        )?;

        Ok(SnakeApp {
            sim,
            cell_size: config.grid.cell_size,
            tick_interval: 1.0 / config.simulation.ticks_per_second,
            tick_timer: 0.0,
        })
    }

    fn update(&mut self) {
        if self.sim.game_over().is_some() {
            return;
        }
        self.tick_timer += get_frame_time();
        while self.tick_timer >= self.tick_interval {
            self.tick_timer -= self.tick_interval;
            match self.sim.tick() {
                SnakeOutcome::Continue | SnakeOutcome::Ate => {}
                SnakeOutcome::Over(reason) => {
                    println!("Game over: {}", game_over_text(reason));
                    break;
                }
            }
        }
    }

    fn draw_cell(&self, x: i32, y: i32, inset: f32, color: Color) {
        draw_rectangle(
            x as f32 * self.cell_size + inset,
            y as f32 * self.cell_size + SCOREBOARD_HEIGHT + inset,
            self.cell_size - 2.0 * inset,
            self.cell_size - 2.0 * inset,
            color,
        );
    }

    fn draw(&self) {
        clear_background(BLACK);

        let width = self.sim.width as f32 * self.cell_size;
        let height = self.sim.height as f32 * self.cell_size;
        let grid_color = Color::from_rgba(50, 50, 50, 255);
        for x in 0..=self.sim.width {
            let px = x as f32 * self.cell_size;
            draw_line(
                px,
                SCOREBOARD_HEIGHT,
                px,
                SCOREBOARD_HEIGHT + height,
                1.0,
                grid_color,
            );
        }
        for y in 0..=self.sim.height {
            let py = y as f32 * self.cell_size + SCOREBOARD_HEIGHT;
            draw_line(0.0, py, width, py, 1.0, grid_color);
        }

        draw_text(
            &format!(
                "Score: {}  High Score: {}",
                self.sim.score, self.sim.high_score
            ),
            10.0,
            26.0,
            24.0,
            WHITE,
        );

        self.draw_cell(self.sim.food.x, self.sim.food.y, 2.0, RED);

        for &segment in &self.sim.body {
            self.draw_cell(segment.x, segment.y, 0.0, Color::from_rgba(0, 150, 0, 255));
            self.draw_cell(segment.x, segment.y, 2.0, Color::from_rgba(0, 200, 0, 255));
        }

        if let Some(reason) = self.sim.game_over() {
            draw_rectangle(
                0.0,
                SCOREBOARD_HEIGHT,
                width,
                height,
                Color::from_rgba(0, 0, 0, 180),
            );
            draw_text(
                &format!("Game Over: {}", game_over_text(reason)),
                width / 2.0 - 160.0,
                SCOREBOARD_HEIGHT + height / 2.0,
                30.0,
                RED,
            );
            draw_text(
                "Press Esc to quit.",
                width / 2.0 - 80.0,
                SCOREBOARD_HEIGHT + height / 2.0 + 30.0,
                22.0,
                YELLOW,
            );
        }
    }
}

fn game_over_text(reason: GameOver) -> &'static str {
    match reason {
        GameOver::NoPathToFood => "no valid path to food",
        GameOver::SelfCollision => "snake bit itself",
        GameOver::WallCollision => "snake hit the wall",
    }
}

#[macroquad::main("Auto Snake")]
async fn main() {
    let config = Config::load();

    let mut app = match SnakeApp::new(&config) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Setup error: {}", e);
            return;
        }
    };

    let width = app.sim.width as f32 * app.cell_size;
    let height = app.sim.height as f32 * app.cell_size + SCOREBOARD_HEIGHT;
    request_new_screen_size(width, height);

    loop {
        if is_key_pressed(KeyCode::Escape) {
            break;
        }

        app.update();
        app.draw();

        next_frame().await
    }
}
