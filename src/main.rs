use gridpilot::{CarPhase, CarSim, Cell, Config};
use macroquad::prelude::*;
use ::rand::rngs::StdRng;
use ::rand::SeedableRng;

/// How long the arrival marker pulses before the restart prompt appears
const ARRIVAL_HOLD_SECONDS: f32 = 2.0;

/// UI-side state wrapped around the car simulation
struct CarApp {
    sim: CarSim,
    cell_size: f32,
    tick_interval: f32,
    tick_timer: f32,
    /// Frame counter driving the pulse animations
    anim_frame: u32,
    /// Remaining arrival hold time; Some while the arrival marker is shown
    arrival_hold: Option<f32>,
    awaiting_restart_click: bool,
}

impl CarApp {
    fn new(config: &Config) -> Result<Self, String> {
        let rng = match config.simulation.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let sim = CarSim::new(
            config.grid.width,
            config.grid.height,
            config.obstacles.static_count,
            config.obstacles.moving_count,
            rng,
        )?;

        Ok(CarApp {
            sim,
            cell_size: config.grid.cell_size,
            tick_interval: 1.0 / config.simulation.ticks_per_second,
            tick_timer: 0.0,
            anim_frame: 0,
            arrival_hold: None,
            awaiting_restart_click: false,
        })
    }

    fn handle_click(&mut self, mouse_x: f32, mouse_y: f32) {
        if self.awaiting_restart_click {
            self.awaiting_restart_click = false;
            self.sim.acknowledge_arrival();
            return;
        }

        let cell = Cell::new(
            (mouse_x / self.cell_size) as i32,
            (mouse_y / self.cell_size) as i32,
        );
        // Occupied or out-of-bounds picks are silently ignored by set_goal
        self.sim.set_goal(cell);
    }

    fn update(&mut self) {
        self.anim_frame = self.anim_frame.wrapping_add(1);

        if self.awaiting_restart_click {
            return;
        }

        if let Some(remaining) = self.arrival_hold {
            let remaining = remaining - get_frame_time();
            if remaining <= 0.0 {
                self.arrival_hold = None;
                self.awaiting_restart_click = true;
            } else {
                self.arrival_hold = Some(remaining);
            }
            return;
        }

        self.tick_timer += get_frame_time();
        while self.tick_timer >= self.tick_interval {
            self.tick_timer -= self.tick_interval;
            self.sim.tick();
            if self.sim.phase() == CarPhase::Arrived {
                self.arrival_hold = Some(ARRIVAL_HOLD_SECONDS);
                break;
            }
        }
    }

    fn cell_rect(&self, cell: Cell) -> (f32, f32) {
        (cell.x as f32 * self.cell_size, cell.y as f32 * self.cell_size)
    }

    fn draw_cell(&self, cell: Cell, color: Color) {
        let (px, py) = self.cell_rect(cell);
        draw_rectangle(px, py, self.cell_size - 1.0, self.cell_size - 1.0, color);
    }

    fn draw(&self) {
        clear_background(Color::from_rgba(230, 230, 230, 255));

        let width = self.sim.width as f32 * self.cell_size;
        let height = self.sim.height as f32 * self.cell_size;
        let grid_color = Color::from_rgba(200, 200, 200, 255);
        for x in 0..=self.sim.width {
            let px = x as f32 * self.cell_size;
            draw_line(px, 0.0, px, height, 1.0, grid_color);
        }
        for y in 0..=self.sim.height {
            let py = y as f32 * self.cell_size;
            draw_line(0.0, py, width, py, 1.0, grid_color);
        }

        for &cell in &self.sim.static_obstacles {
            self.draw_cell(cell, Color::from_rgba(80, 80, 80, 255));
        }
        for &cell in self.sim.moving_obstacles.cells() {
            self.draw_cell(cell, Color::from_rgba(220, 120, 40, 255));
        }

        // Planned route as pulsing dots, skipping the car's own cell
        for (i, &cell) in self.sim.last_path.iter().enumerate().skip(1) {
            let pulse = 0.6 + 0.3 * (self.anim_frame as f32 * 0.15 + i as f32).sin();
            let radius = self.cell_size * 0.3 * pulse;
            let (px, py) = self.cell_rect(cell);
            draw_circle(
                px + self.cell_size / 2.0,
                py + self.cell_size / 2.0,
                radius,
                Color::from_rgba(150, 150, 150, 255),
            );
        }

        if let Some(goal) = self.sim.goal {
            self.draw_cell(goal, Color::from_rgba(0, 200, 0, 255));
        }
        self.draw_cell(self.sim.car, Color::from_rgba(0, 120, 255, 255));

        if self.arrival_hold.is_some() {
            let pulse = 1.0 + 0.5 * (self.anim_frame as f32 * 0.2).sin();
            let (px, py) = self.cell_rect(self.sim.car);
            draw_circle(
                px + self.cell_size / 2.0,
                py + self.cell_size / 2.0,
                self.cell_size * 0.3 * pulse,
                Color::from_rgba(0, 150, 255, 255),
            );
        }

        if self.awaiting_restart_click {
            draw_rectangle(0.0, 0.0, width, height, Color::from_rgba(0, 0, 0, 180));
            draw_text(
                "Reached destination!",
                width / 2.0 - 130.0,
                height / 2.0 - 10.0,
                30.0,
                GREEN,
            );
            draw_text(
                "Click anywhere to move again, or press Q to quit.",
                width / 2.0 - 250.0,
                height / 2.0 + 30.0,
                24.0,
                YELLOW,
            );
        } else if self.sim.phase() == CarPhase::NoGoal {
            draw_text(
                "Click a free cell to set the destination",
                10.0,
                20.0,
                22.0,
                Color::from_rgba(60, 60, 60, 255),
            );
        }
    }
}

/// "Starting in 3... 2... 1..." before the simulation begins
async fn countdown(width: f32, height: f32) {
    for i in (1..=3).rev() {
        let mut elapsed = 0.0;
        while elapsed < 1.0 {
            elapsed += get_frame_time();
            clear_background(BLACK);
            draw_text(
                &format!("Starting in {}...", i),
                width / 2.0 - 90.0,
                height / 2.0,
                32.0,
                YELLOW,
            );
            next_frame().await;
        }
    }
}

#[macroquad::main("Car Route Simulation")]
async fn main() {
    let config = Config::load();

    let mut app = match CarApp::new(&config) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Setup error: {}", e);
            return;
        }
    };

    let width = app.sim.width as f32 * app.cell_size;
    let height = app.sim.height as f32 * app.cell_size;
    request_new_screen_size(width, height);

    countdown(width, height).await;

    loop {
        if is_key_pressed(KeyCode::Escape) {
            break;
        }
        if app.awaiting_restart_click && is_key_pressed(KeyCode::Q) {
            break;
        }

        if is_mouse_button_pressed(MouseButton::Left) {
            let (mouse_x, mouse_y) = mouse_position();
            app.handle_click(mouse_x, mouse_y);
        }

        app.update();
        app.draw();

        next_frame().await
    }
}
