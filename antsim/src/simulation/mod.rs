pub mod ant;
mod cadence;
mod environment;
mod nest;
mod pheromone;
mod terrain;

// Re-export key types for easier imports
pub use ant::{Ant, AntKey, Driver, ManualInput};
pub use cadence::Cadence;
pub use environment::{Environment, ForagingReport, SimRng, Surroundings};
pub use nest::Nest;
pub use pheromone::{BlurMode, PheromoneField};
pub use terrain::{FoodSource, Obstacle, WorldBounds};

// Time constants (simulated seconds)
pub const ANT_SPAWN_INTERVAL: f32 = 0.5;
pub const FIELD_MAINTENANCE_INTERVAL: f32 = 1.0;
pub const REPORT_INTERVAL: f32 = 5.0;

// Pheromone field constants
pub const CELL_SIZE: f32 = 4.0;
pub const MAX_CELL_CONCENTRATION: f32 = 25.0;
pub const SNAP_TO_ZERO_BELOW: f32 = 0.5;
pub const BLUR_CENTER_WEIGHT: f32 = 0.625;
pub const BLUR_SIDE_WEIGHT: f32 = 0.0625;
pub const BLUR_DIAGONAL_WEIGHT: f32 = 0.03125;
pub const DEFAULT_HOME_EVAPORATION: f32 = 0.003;
pub const DEFAULT_FOOD_EVAPORATION: f32 = 0.002;

// Ant behaviour constants
pub const PHEROMONE_BUDGET: u32 = 2000;
pub const DEPOSIT_BUDGET_FRACTION: f32 = 0.0005;
pub const DEPOSIT_BASE_AMOUNT: f32 = 0.01;
pub const PICKUP_RADIUS: f32 = 80.0; // Distance to a food source that counts as reaching it
pub const ARRIVAL_RADIUS: f32 = 80.0; // Distance to the nest that counts as being home
pub const MAX_VELOCITY: f32 = 2.0;
pub const VELOCITY_JITTER: f32 = 0.125;
pub const VELOCITY_JITTER_ODDS: u32 = 5; // 1 in 5 ticks
pub const HEADING_JITTER: f32 = 18.0; // degrees
pub const HEADING_JITTER_ODDS: u32 = 20;
pub const SENSE_RADIUS: i32 = 10; // cells
pub const STEERING_ODDS: u32 = 4;
pub const STEERING_WEIGHT: f32 = 0.2;
pub const COLLISION_TURN: f32 = 90.0;
pub const CONFUSION_PER_COLLISION: u32 = 100;
pub const MAX_CONFUSION: u32 = 1000;
pub const ANIMATION_FRAMES: u32 = 62;

// Manually driven ant
pub const MANUAL_TURN_RATE: f32 = 1.0; // degrees per tick
pub const MANUAL_ACCELERATION: f32 = 0.01;
pub const MANUAL_DRAG: f32 = 0.99;
pub const MANUAL_SENSE_RADIUS: i32 = 5;
pub const MANUAL_WRAP_MARGIN: f32 = 100.0;
