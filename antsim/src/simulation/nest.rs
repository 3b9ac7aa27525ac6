use super::ant::{Ant, AntKey};
use super::{ANT_SPAWN_INTERVAL, Cadence};

use macroquad::prelude::Vec2;
use rand::Rng;
use slotmap::SlotMap;
use tracing::debug;

/// Home of the colony. Owns every ant and never holds more than `capacity` of them.
pub struct Nest {
    pub pos: Vec2,
    pub capacity: usize,
    pub(crate) ants: SlotMap<AntKey, Ant>,
    pub spawn_cadence: Cadence,
}

impl Nest {
    pub fn new(pos: Vec2, capacity: usize) -> Self {
        Self {
            pos,
            capacity,
            ants: SlotMap::with_capacity_and_key(capacity),
            spawn_cadence: Cadence::new(ANT_SPAWN_INTERVAL),
        }
    }

    pub fn is_full(&self) -> bool {
        self.ants.len() >= self.capacity
    }

    pub fn population(&self) -> usize {
        self.ants.len()
    }

    /// Advances the spawn clock and hatches at most one ant when it fires.
    pub fn update_spawning<R: Rng>(&mut self, dt: f32, rng: &mut R) -> Option<AntKey> {
        if self.is_full() {
            return None;
        }
        if !self.spawn_cadence.tick(dt) {
            return None;
        }
        self.spawn_ant(rng)
    }

    /// Hatches one searching ant at the nest, unless the nest is full.
    pub fn spawn_ant<R: Rng>(&mut self, rng: &mut R) -> Option<AntKey> {
        let ant = Ant::spawn(self.pos, rng);
        let key = self.adopt(ant)?;
        debug!(population = self.ants.len(), ?key, "Ant spawned");
        if self.is_full() {
            debug!(capacity = self.capacity, "Nest reached capacity");
        }
        Some(key)
    }

    /// Adds an ant built elsewhere, such as a manually driven one. Returns None when full.
    pub fn adopt(&mut self, ant: Ant) -> Option<AntKey> {
        if self.is_full() {
            return None;
        }
        Some(self.ants.insert(ant))
    }

    pub fn get(&self, key: AntKey) -> Option<&Ant> {
        self.ants.get(key)
    }

    pub fn get_mut(&mut self, key: AntKey) -> Option<&mut Ant> {
        self.ants.get_mut(key)
    }

    /// Ants in update order.
    pub fn ants(&self) -> impl Iterator<Item = (AntKey, &Ant)> {
        self.ants.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use shared::AntState;

    #[test]
    fn test_spawns_on_half_second_cadence() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut nest = Nest::new(Vec2::new(600.0, 400.0), 10);
        let dt = 0.1;
        let mut spawned = 0;
        for _ in 0..24 {
            if nest.update_spawning(dt, &mut rng).is_some() {
                spawned += 1;
            }
        }
        // 2.4 seconds of simulated time
        assert_eq!(spawned, 4);
        assert_eq!(nest.population(), 4);
    }

    #[test]
    fn test_population_never_exceeds_capacity() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut nest = Nest::new(Vec2::new(50.0, 50.0), 3);
        for _ in 0..1000 {
            nest.update_spawning(ANT_SPAWN_INTERVAL, &mut rng);
            assert!(nest.population() <= 3);
        }
        assert_eq!(nest.population(), 3);
        assert!(nest.spawn_ant(&mut rng).is_none());
        assert!(nest.adopt(Ant::manual(Vec2::ZERO, 0.0)).is_none());
    }

    #[test]
    fn test_spawned_ants_start_at_nest() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut nest = Nest::new(Vec2::new(120.0, 80.0), 5);
        let key = nest.spawn_ant(&mut rng).expect("nest has room");
        let ant = nest.get(key).expect("key was just issued");
        assert_eq!(ant.pos, nest.pos);
        assert_eq!(ant.state, AntState::Searching);
        assert_eq!(ant.velocity, 0.0);
        assert_eq!(ant.confusion, 0);
    }

    #[test]
    fn test_zero_capacity_nest_stays_empty() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut nest = Nest::new(Vec2::ZERO, 0);
        for _ in 0..10 {
            assert!(nest.update_spawning(1.0, &mut rng).is_none());
        }
        assert!(nest.is_full());
    }
}
