use anyhow::{Context, Result, bail, ensure};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::simulation::{
    BlurMode, CELL_SIZE, DEFAULT_FOOD_EVAPORATION, DEFAULT_HOME_EVAPORATION,
};

// World defaults
pub const DEFAULT_WORLD_WIDTH: f32 = 1600.0;
pub const DEFAULT_WORLD_HEIGHT: f32 = 900.0;
pub const DEFAULT_NEST_CAPACITY: usize = 100;
/// Upper bound on cells per trail grid (an 8192x8192 world).
pub const MAX_TRAIL_CELLS: f64 = 4_194_304.0;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct NestConfig {
    pub x: f32,
    pub y: f32,
    pub capacity: usize,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct FoodConfig {
    pub x: f32,
    pub y: f32,
    pub amount: u32,
}

/// Axis-aligned rectangle, top-left corner plus size.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ObstacleConfig {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    pub world_width: f32,
    pub world_height: f32,
    pub nest: NestConfig,
    pub food_sources: Vec<FoodConfig>,
    pub obstacles: Vec<ObstacleConfig>,
    pub seed: Option<u64>, // Random when unset
    pub home_evaporation: f32,
    pub food_evaporation: f32,
    pub blur_mode: BlurMode,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            world_width: DEFAULT_WORLD_WIDTH,
            world_height: DEFAULT_WORLD_HEIGHT,
            nest: NestConfig {
                x: 600.0,
                y: 400.0,
                capacity: DEFAULT_NEST_CAPACITY,
            },
            food_sources: vec![FoodConfig {
                x: 1200.0,
                y: 800.0,
                amount: 150,
            }],
            obstacles: vec![ObstacleConfig {
                x: 400.0,
                y: 600.0,
                width: 800.0,
                height: 50.0,
            }],
            seed: None,
            home_evaporation: DEFAULT_HOME_EVAPORATION,
            food_evaporation: DEFAULT_FOOD_EVAPORATION,
            blur_mode: BlurMode::default(),
        }
    }
}

impl SimulationConfig {
    /// Reads a TOML file. Keys left out fall back to the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        let config: SimulationConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file '{}'", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.world_width.is_finite() && self.world_width > 0.0,
            "world_width must be positive, got {}",
            self.world_width
        );
        ensure!(
            self.world_height.is_finite() && self.world_height > 0.0,
            "world_height must be positive, got {}",
            self.world_height
        );
        let cells = (self.world_width as f64 / CELL_SIZE as f64).ceil()
            * (self.world_height as f64 / CELL_SIZE as f64).ceil();
        ensure!(
            cells <= MAX_TRAIL_CELLS,
            "{}x{} world needs {} trail cells, at most {} are allowed",
            self.world_width,
            self.world_height,
            cells,
            MAX_TRAIL_CELLS
        );

        let inside = |x: f32, y: f32| {
            x > 0.0 && x < self.world_width && y > 0.0 && y < self.world_height
        };
        if !inside(self.nest.x, self.nest.y) {
            bail!(
                "nest at ({}, {}) is outside the {}x{} world",
                self.nest.x,
                self.nest.y,
                self.world_width,
                self.world_height
            );
        }

        for (name, rate) in [
            ("home_evaporation", self.home_evaporation),
            ("food_evaporation", self.food_evaporation),
        ] {
            ensure!(
                (0.0..1.0).contains(&rate),
                "{} must be in [0, 1), got {}",
                name,
                rate
            );
        }

        for (i, food) in self.food_sources.iter().enumerate() {
            ensure!(
                food.x.is_finite() && food.y.is_finite(),
                "food source {} has a non-finite position",
                i
            );
        }

        for (i, obs) in self.obstacles.iter().enumerate() {
            ensure!(
                obs.width > 0.0 && obs.height > 0.0,
                "obstacle {} must have a positive size, got {}x{}",
                i,
                obs.width,
                obs.height
            );
        }
        Ok(())
    }
}
