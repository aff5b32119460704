use serde::Deserialize;
use std::fs;

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub obstacles: ObstaclesConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub snake: SnakeConfig,
}

#[derive(Debug, Deserialize)]
pub struct GridConfig {
    #[serde(default = "default_width")]
    pub width: i32,
    #[serde(default = "default_height")]
    pub height: i32,
    #[serde(default = "default_cell_size")]
    pub cell_size: f32,
}

#[derive(Debug, Deserialize)]
pub struct ObstaclesConfig {
    #[serde(default = "default_static_count")]
    pub static_count: usize,
    #[serde(default = "default_moving_count")]
    pub moving_count: usize,
}

#[derive(Debug, Deserialize)]
pub struct SimulationConfig {
    #[serde(default = "default_ticks_per_second")]
    pub ticks_per_second: f32,
    /// Seed for the scenario's random source; omit to seed from entropy.
    /// Fixing it makes obstacle wander and food placement reproducible.
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct SnakeConfig {
    #[serde(default = "default_snake_width")]
    pub width: i32,
    #[serde(default = "default_snake_height")]
    pub height: i32,
    #[serde(default = "default_high_score_path")]
    pub high_score_path: String,
}

// Default values
fn default_width() -> i32 { 40 }
fn default_height() -> i32 { 30 }
fn default_cell_size() -> f32 { 20.0 }
fn default_static_count() -> usize { 50 }
fn default_moving_count() -> usize { 10 }
fn default_ticks_per_second() -> f32 { 10.0 }
fn default_snake_width() -> i32 { 30 }
fn default_snake_height() -> i32 { 20 }
fn default_high_score_path() -> String { "high_score.txt".to_string() }

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            cell_size: default_cell_size(),
        }
    }
}

impl Default for ObstaclesConfig {
    fn default() -> Self {
        Self {
            static_count: default_static_count(),
            moving_count: default_moving_count(),
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            ticks_per_second: default_ticks_per_second(),
            seed: None,
        }
    }
}

impl Default for SnakeConfig {
    fn default() -> Self {
        Self {
            width: default_snake_width(),
            height: default_snake_height(),
            high_score_path: default_high_score_path(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            obstacles: ObstaclesConfig::default(),
            simulation: SimulationConfig::default(),
            snake: SnakeConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file, or use defaults if file doesn't exist
    pub fn load() -> Self {
        match fs::read_to_string("config.toml") {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    println!("Loaded configuration from config.toml");
                    config
                }
                Err(e) => {
                    eprintln!("Warning: Failed to parse config.toml: {}", e);
                    eprintln!("Using default configuration");
                    Config::default()
                }
            },
            Err(_) => {
                println!("No config.toml found, using default configuration");
                Config::default()
            }
        }
    }
}
