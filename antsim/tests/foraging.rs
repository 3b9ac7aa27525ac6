use antsim::config::{FoodConfig, NestConfig};
use antsim::simulation::{Environment, PHEROMONE_BUDGET};
use antsim::SimulationConfig;
use shared::util::heading_difference;
use shared::{AntState, FrameSource};

fn single_ant_world() -> SimulationConfig {
    SimulationConfig {
        world_width: 1200.0,
        world_height: 600.0,
        nest: NestConfig {
            x: 300.0,
            y: 300.0,
            capacity: 1,
        },
        food_sources: vec![FoodConfig {
            x: 800.0,
            y: 300.0,
            amount: 20,
        }],
        obstacles: vec![],
        seed: Some(2024),
        ..SimulationConfig::default()
    }
}

#[test]
fn single_ant_finds_food_and_turns_back() {
    let mut env = Environment::from_config(&single_ant_world()).unwrap();
    let key = env.spawn_ant().expect("empty nest has room");
    // Point the ant at the food, which lies straight to the right.
    env.nest.get_mut(key).unwrap().heading = 90.0;

    let mut ticks = 0;
    let mut heading_before: f32;
    loop {
        heading_before = env.nest.get(key).unwrap().heading;
        env.advance(1.0 / 60.0);
        ticks += 1;
        if env.nest.get(key).unwrap().state == AntState::Returning {
            break;
        }
        assert!(ticks < 500_000, "ant never reached the food");
    }

    let ant = env.nest.get(key).unwrap();
    assert!(ticks > 0);
    assert_eq!(env.food_sources()[0].amount_left, 19, "exactly one unit picked up");
    assert_eq!(ant.pheromone_budget, PHEROMONE_BUDGET);
    assert!(
        (heading_difference(ant.heading, heading_before) - 180.0).abs() < 1e-3,
        "heading {} should be the reverse of {}",
        ant.heading,
        heading_before
    );
    assert_eq!(env.ants().len(), 1, "capacity of one holds the population");
}

#[test]
fn colony_keeps_trails_and_food_consistent() {
    let config = SimulationConfig {
        seed: Some(99),
        ..SimulationConfig::default()
    };
    let mut env = Environment::from_config(&config).unwrap();
    for _ in 0..3000 {
        env.advance(1.0 / 60.0);
    }

    assert!(env.ants().len() <= config.nest.capacity);
    // Fifty seconds of half-second spawns fills the nest.
    assert!(env.ants().len() >= config.nest.capacity - 1);
    let taken: u32 = 150 - env.food_sources()[0].amount_left;
    let returning = env.count_in_state(AntState::Returning) as u32;
    // Every pickup is either still on its way home or has been delivered.
    assert!(taken >= returning);
    for view in env.ants() {
        assert!((0.0..360.0).contains(&view.heading));
        assert!(view.x > 0.0 && view.x < 1600.0 && view.y > 0.0 && view.y < 900.0);
    }
}
