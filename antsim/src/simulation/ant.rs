use super::{
    ANIMATION_FRAMES, ARRIVAL_RADIUS, COLLISION_TURN, CONFUSION_PER_COLLISION,
    DEPOSIT_BASE_AMOUNT, DEPOSIT_BUDGET_FRACTION, HEADING_JITTER, HEADING_JITTER_ODDS,
    MANUAL_ACCELERATION, MANUAL_DRAG, MANUAL_SENSE_RADIUS, MANUAL_TURN_RATE, MANUAL_WRAP_MARGIN,
    MAX_CONFUSION, MAX_VELOCITY, PHEROMONE_BUDGET, PICKUP_RADIUS, SENSE_RADIUS, STEERING_ODDS,
    STEERING_WEIGHT, VELOCITY_JITTER, VELOCITY_JITTER_ODDS,
};
use super::{PheromoneField, Surroundings};

use shared::util::{heading_of, heading_to_unit, normalize_degrees};
use shared::{AntState, AntView};

use macroquad::prelude::Vec2;
use rand::Rng;
use slotmap::new_key_type;
use tracing::info;

new_key_type! {
    /// Key for the nest's ant slotmap.
    pub struct AntKey;
}

/// Keys held by the shell for a manually driven ant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ManualInput {
    pub turn_left: bool,
    pub turn_right: bool,
    pub accelerate: bool,
    pub brake: bool,
}

/// What decides an ant's next move.
#[derive(Debug, Clone, PartialEq)]
pub enum Driver {
    /// Forages on its own: search, pick up, return, repeat.
    Autonomous,
    /// Steered from outside. Ignores obstacles, wraps around the world and lays no trail.
    Manual(ManualInput),
}

/// State of an ant.
#[derive(Debug, Clone)]
pub struct Ant {
    pub pos: Vec2,
    /// Degrees in [0, 360), 0 = up, clockwise.
    pub heading: f32,
    pub velocity: f32,
    pub state: AntState,
    pub pheromone_budget: u32,
    pub confusion: u32,
    pub animation_step: u32,
    pub driver: Driver,
    /// Normalised trail direction last smelled by a manual ant, for display.
    pub sensed_direction: Option<Vec2>,
}

impl Ant {
    pub fn new(pos: Vec2, heading: f32, animation_step: u32) -> Self {
        Self {
            pos,
            heading: normalize_degrees(heading),
            velocity: 0.0,
            state: AntState::Searching,
            pheromone_budget: PHEROMONE_BUDGET,
            confusion: 0,
            animation_step: animation_step % ANIMATION_FRAMES,
            driver: Driver::Autonomous,
            sensed_direction: None,
        }
    }

    /// Fresh forager at `pos` with a random heading and animation phase.
    pub fn spawn<R: Rng>(pos: Vec2, rng: &mut R) -> Self {
        let heading = rng.random_range(0.0..360.0);
        let animation_step = rng.random_range(0..ANIMATION_FRAMES);
        Self::new(pos, heading, animation_step)
    }

    pub fn manual(pos: Vec2, heading: f32) -> Self {
        Self {
            driver: Driver::Manual(ManualInput::default()),
            ..Self::new(pos, heading, 0)
        }
    }

    /// Unit vector the ant is facing.
    #[inline(always)]
    pub fn forward(&self) -> Vec2 {
        let (x, y) = heading_to_unit(self.heading);
        Vec2::new(x, y)
    }

    pub fn is_confused(&self) -> bool {
        self.confusion > 0
    }

    pub fn is_manual(&self) -> bool {
        matches!(self.driver, Driver::Manual(_))
    }

    /// Runs one simulation tick for this ant.
    pub fn advance<R: Rng>(&mut self, world: &mut Surroundings, rng: &mut R) {
        match self.driver {
            Driver::Autonomous => self.forage(world, rng),
            Driver::Manual(input) => self.drive(input, world),
        }
    }

    pub fn animate_step(&mut self) {
        self.animation_step = (self.animation_step + 1) % ANIMATION_FRAMES;
    }

    pub fn view(&self) -> AntView {
        AntView {
            x: self.pos.x,
            y: self.pos.y,
            heading: self.heading,
            state: self.state,
            animation_step: self.animation_step,
            manual: self.is_manual(),
        }
    }

    fn forage<R: Rng>(&mut self, world: &mut Surroundings, rng: &mut R) {
        // A tick that flips the state is spent turning around.
        let turned_around = self.check_transition(world);

        if !turned_around && !self.is_confused() {
            self.random_adjust_velocity(rng);
            self.random_adjust_heading(rng);
            self.steer_towards_trail(world.trail(self.state.follow_channel()), rng);
            self.deposit_trail(world.trail_mut(self.state.deposit_channel()));
        }

        self.update_position(world);
    }

    fn check_transition(&mut self, world: &mut Surroundings) -> bool {
        match self.state {
            AntState::Searching => {
                let pos = self.pos;
                let Some(food) = world
                    .food_sources
                    .iter_mut()
                    .find(|food| !food.is_depleted() && food.pos.distance(pos) < PICKUP_RADIUS)
                else {
                    return false;
                };
                food.take_one();
                if food.is_depleted() {
                    info!(x = food.pos.x, y = food.pos.y, "Food source depleted");
                }
                self.turn_around(AntState::Returning);
                true
            }
            AntState::Returning => {
                if self.pos.distance(world.nest_pos) >= ARRIVAL_RADIUS {
                    return false;
                }
                self.turn_around(AntState::Searching);
                *world.ants_returned += 1;
                true
            }
        }
    }

    fn turn_around(&mut self, state: AntState) {
        self.state = state;
        self.pheromone_budget = PHEROMONE_BUDGET;
        self.heading = normalize_degrees(self.heading + 180.0);
    }

    fn random_adjust_velocity<R: Rng>(&mut self, rng: &mut R) {
        if rng.random_ratio(1, VELOCITY_JITTER_ODDS) {
            self.velocity += rng.random_range(-VELOCITY_JITTER..=VELOCITY_JITTER);
        }
        self.velocity = self.velocity.clamp(0.0, MAX_VELOCITY);
    }

    fn random_adjust_heading<R: Rng>(&mut self, rng: &mut R) {
        if rng.random_ratio(1, HEADING_JITTER_ODDS) {
            let jitter = rng.random_range(-HEADING_JITTER..=HEADING_JITTER);
            self.heading = normalize_degrees(self.heading + jitter);
        }
    }

    fn steer_towards_trail<R: Rng>(&mut self, trail: &PheromoneField, rng: &mut R) {
        let forward = self.forward();
        let (cell_x, cell_y) = PheromoneField::cell_of(self.pos);
        let sum = trail.sample_directional(cell_x, cell_y, SENSE_RADIUS, forward);
        if sum == Vec2::ZERO {
            return;
        }
        let direction = sum.normalize();
        if rng.random_ratio(1, STEERING_ODDS) {
            let target = (forward + direction * STEERING_WEIGHT).normalize();
            self.heading = heading_of(target.x, target.y);
        }
    }

    fn deposit_trail(&mut self, trail: &mut PheromoneField) {
        if self.pheromone_budget == 0 {
            return;
        }
        let amount = self.pheromone_budget as f32 * DEPOSIT_BUDGET_FRACTION + DEPOSIT_BASE_AMOUNT;
        let (cell_x, cell_y) = PheromoneField::cell_of(self.pos);
        if trail.deposit(cell_x, cell_y, amount) {
            self.pheromone_budget = (self.pheromone_budget as f32 - amount).max(0.0) as u32;
        }
    }

    fn update_position(&mut self, world: &Surroundings) {
        let candidate = self.pos + self.forward() * self.velocity;

        if world.bounds.is_free(candidate, world.obstacles) {
            self.confusion = self.confusion.saturating_sub(1);
            self.pos = candidate;
        } else {
            // Not allowed to move here
            self.heading = normalize_degrees(self.heading + COLLISION_TURN);
            self.confusion = (self.confusion + CONFUSION_PER_COLLISION).min(MAX_CONFUSION);
        }
    }

    fn drive(&mut self, input: ManualInput, world: &Surroundings) {
        if input.turn_left {
            self.heading = normalize_degrees(self.heading - MANUAL_TURN_RATE);
        }
        if input.turn_right {
            self.heading = normalize_degrees(self.heading + MANUAL_TURN_RATE);
        }

        if input.accelerate {
            self.velocity += MANUAL_ACCELERATION;
        } else if input.brake {
            self.velocity -= MANUAL_ACCELERATION;
        } else if self.velocity > 0.0 {
            self.velocity *= MANUAL_DRAG;
        }
        self.velocity = self.velocity.clamp(0.0, MAX_VELOCITY);

        self.pos += self.forward() * self.velocity;
        self.pos.x = wrap_axis(self.pos.x, world.bounds.width);
        self.pos.y = wrap_axis(self.pos.y, world.bounds.height);

        let (cell_x, cell_y) = PheromoneField::cell_of(self.pos);
        let sum = world
            .home_trail
            .sample_directional(cell_x, cell_y, MANUAL_SENSE_RADIUS, self.forward());
        self.sensed_direction = (sum != Vec2::ZERO).then(|| sum.normalize());
    }
}

fn wrap_axis(value: f32, extent: f32) -> f32 {
    if value < -MANUAL_WRAP_MARGIN {
        extent + MANUAL_WRAP_MARGIN
    } else if value > extent + MANUAL_WRAP_MARGIN {
        -MANUAL_WRAP_MARGIN
    } else {
        value
    }
}
