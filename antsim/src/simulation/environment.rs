use anyhow::Result;
use macroquad::prelude::Vec2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{info, trace};

use shared::{AntState, AntView, FoodView, FrameSource, ObstacleView, TrailChannel};

use super::ant::{AntKey, Driver, ManualInput};
use super::nest::Nest;
use super::pheromone::PheromoneField;
use super::terrain::{FoodSource, Obstacle, WorldBounds};
use super::{Ant, CELL_SIZE, Cadence, FIELD_MAINTENANCE_INTERVAL, REPORT_INTERVAL};
use crate::config::SimulationConfig;

/// Random source every stochastic decision draws from.
pub type SimRng = ChaCha8Rng;

/// The part of the environment one ant may touch during its update.
/// Borrowed from the `Environment` for the length of a tick.
pub struct Surroundings<'a> {
    pub bounds: WorldBounds,
    pub obstacles: &'a [Obstacle],
    pub nest_pos: Vec2,
    pub food_sources: &'a mut [FoodSource],
    pub home_trail: &'a mut PheromoneField,
    pub food_trail: &'a mut PheromoneField,
    pub ants_returned: &'a mut u32,
}

impl Surroundings<'_> {
    pub fn trail(&self, channel: TrailChannel) -> &PheromoneField {
        match channel {
            TrailChannel::Home => &*self.home_trail,
            TrailChannel::Food => &*self.food_trail,
        }
    }

    pub fn trail_mut(&mut self, channel: TrailChannel) -> &mut PheromoneField {
        match channel {
            TrailChannel::Home => &mut *self.home_trail,
            TrailChannel::Food => &mut *self.food_trail,
        }
    }
}

/// Summary of one reporting window.
#[derive(Debug, Clone, PartialEq)]
pub struct ForagingReport {
    pub tick: u64,
    pub window_seconds: f32,
    pub ants_returned: u32,
    pub returns_per_second: f32,
    pub food_left: Vec<u32>,
    pub population: usize,
}

pub struct Environment {
    pub tick: u64,
    pub bounds: WorldBounds,
    pub nest: Nest,
    pub food_sources: Vec<FoodSource>,
    pub obstacles: Vec<Obstacle>,
    /// Laid while searching, followed while returning.
    pub home_trail: PheromoneField,
    /// Laid while returning, followed while searching.
    pub food_trail: PheromoneField,
    /// Returns to the nest in the current reporting window.
    pub ants_returned: u32,
    pub last_report: Option<ForagingReport>,
    pub maintenance_cadence: Cadence,
    pub report_cadence: Cadence,
    rng: SimRng,
}

impl Environment {
    /// Builds the world described by `config`. The random source is seeded from
    /// `config.seed`, or from OS entropy when unset.
    pub fn from_config(config: &SimulationConfig) -> Result<Self> {
        let seed = config.seed.unwrap_or_else(rand::random);
        info!(seed, "Seeding simulation");
        Self::with_rng(config, SimRng::seed_from_u64(seed))
    }

    pub fn with_rng(config: &SimulationConfig, rng: SimRng) -> Result<Self> {
        config.validate()?;

        let bounds = WorldBounds::new(config.world_width, config.world_height);
        let home_trail = PheromoneField::covering(
            bounds.width,
            bounds.height,
            config.home_evaporation,
            config.blur_mode,
        );
        let food_trail = PheromoneField::covering(
            bounds.width,
            bounds.height,
            config.food_evaporation,
            config.blur_mode,
        );
        let food_sources = config
            .food_sources
            .iter()
            .map(|food| FoodSource::new(Vec2::new(food.x, food.y), food.amount))
            .collect();
        let obstacles = config
            .obstacles
            .iter()
            .map(|obs| Obstacle::new(obs.x, obs.y, obs.width, obs.height))
            .collect();

        Ok(Self {
            tick: 0,
            bounds,
            nest: Nest::new(
                Vec2::new(config.nest.x, config.nest.y),
                config.nest.capacity,
            ),
            food_sources,
            obstacles,
            home_trail,
            food_trail,
            ants_returned: 0,
            last_report: None,
            maintenance_cadence: Cadence::new(FIELD_MAINTENANCE_INTERVAL),
            report_cadence: Cadence::new(REPORT_INTERVAL),
            rng,
        })
    }

    /// Runs one tick covering `dt` simulated seconds: spawn, move every ant in
    /// collection order, then evaporate and blur the trails when their cadence fires.
    pub fn advance(&mut self, dt: f32) {
        let Self {
            bounds,
            nest,
            food_sources,
            obstacles,
            home_trail,
            food_trail,
            ants_returned,
            rng,
            ..
        } = self;

        nest.update_spawning(dt, rng);

        let mut world = Surroundings {
            bounds: *bounds,
            obstacles,
            nest_pos: nest.pos,
            food_sources,
            home_trail,
            food_trail,
            ants_returned,
        };
        for ant in nest.ants.values_mut() {
            ant.advance(&mut world, rng);
            ant.animate_step();
        }

        if self.maintenance_cadence.tick(dt) {
            self.maintain_fields();
        }

        if self.report_cadence.tick(dt) {
            self.report();
        }

        self.tick += 1;
    }

    /// Evaporates both trails at their own rates, then blurs them.
    pub fn maintain_fields(&mut self) {
        self.home_trail.decay();
        self.food_trail.decay();
        self.home_trail.blur();
        self.food_trail.blur();
        trace!(
            tick = self.tick,
            home_total = self.home_trail.total(),
            food_total = self.food_trail.total(),
            "Trails evaporated and blurred"
        );
    }

    fn report(&mut self) {
        let window_seconds = self.report_cadence.interval;
        let report = ForagingReport {
            tick: self.tick,
            window_seconds,
            ants_returned: self.ants_returned,
            returns_per_second: self.ants_returned as f32 / window_seconds,
            food_left: self.food_sources.iter().map(|f| f.amount_left).collect(),
            population: self.nest.population(),
        };
        info!(
            tick = report.tick,
            population = report.population,
            returned = report.ants_returned,
            per_second = report.returns_per_second,
            food_left = ?report.food_left,
            "Foraging report"
        );
        self.ants_returned = 0;
        self.last_report = Some(report);
    }

    /// Hatches an ant immediately, bypassing the spawn clock but not the capacity.
    pub fn spawn_ant(&mut self) -> Option<AntKey> {
        self.nest.spawn_ant(&mut self.rng)
    }

    /// Adds a keyboard-driven ant at the nest. Counts toward the nest capacity.
    pub fn spawn_manual_ant(&mut self, heading: f32) -> Option<AntKey> {
        let ant = Ant::manual(self.nest.pos, heading);
        self.nest.adopt(ant)
    }

    /// Updates the keys held for a manual ant. Returns false if `key` is not a manual ant.
    pub fn set_manual_input(&mut self, key: AntKey, input: ManualInput) -> bool {
        match self.nest.get_mut(key) {
            Some(Ant {
                driver: Driver::Manual(current),
                ..
            }) => {
                *current = input;
                true
            }
            _ => false,
        }
    }

    pub fn trail(&self, channel: TrailChannel) -> &PheromoneField {
        match channel {
            TrailChannel::Home => &self.home_trail,
            TrailChannel::Food => &self.food_trail,
        }
    }

    pub fn count_in_state(&self, state: AntState) -> usize {
        self.nest
            .ants()
            .filter(|(_, ant)| !ant.is_manual() && ant.state == state)
            .count()
    }
}

impl FrameSource for Environment {
    fn world_size(&self) -> (f32, f32) {
        (self.bounds.width, self.bounds.height)
    }

    fn nest_position(&self) -> (f32, f32) {
        (self.nest.pos.x, self.nest.pos.y)
    }

    fn ants(&self) -> Vec<AntView> {
        self.nest.ants().map(|(_, ant)| ant.view()).collect()
    }

    fn food_sources(&self) -> Vec<FoodView> {
        self.food_sources.iter().map(FoodSource::view).collect()
    }

    fn obstacles(&self) -> Vec<ObstacleView> {
        self.obstacles.iter().map(Obstacle::view).collect()
    }

    fn trail_dimensions(&self) -> (usize, usize) {
        (self.home_trail.width, self.home_trail.height)
    }

    fn trail_cell_size(&self) -> f32 {
        CELL_SIZE
    }

    fn trail_at(&self, channel: TrailChannel, cell_x: usize, cell_y: usize) -> f32 {
        let (Ok(x), Ok(y)) = (i32::try_from(cell_x), i32::try_from(cell_y)) else {
            return 0.0;
        };
        self.trail(channel).get(x, y)
    }
}
