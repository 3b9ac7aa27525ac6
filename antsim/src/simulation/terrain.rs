use macroquad::math::Rect;
use macroquad::prelude::Vec2;

use shared::{FoodView, ObstacleView};

/// Rectangular extent of the simulated world, with (0, 0) at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldBounds {
    pub width: f32,
    pub height: f32,
}

impl WorldBounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Strictly inside the four edges; a position on an edge is outside.
    #[inline(always)]
    pub fn contains(&self, pos: Vec2) -> bool {
        pos.x > 0.0 && pos.x < self.width && pos.y > 0.0 && pos.y < self.height
    }

    /// True when an ant may stand at `pos`: inside the world and not inside any obstacle.
    pub fn is_free(&self, pos: Vec2, obstacles: &[Obstacle]) -> bool {
        self.contains(pos) && !obstacles.iter().any(|obs| obs.contains(pos))
    }
}

/// Static axis-aligned wall.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    pub bounds: Rect,
}

impl Obstacle {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            bounds: Rect::new(x, y, width, height),
        }
    }

    #[inline(always)]
    pub fn contains(&self, pos: Vec2) -> bool {
        self.bounds.contains(pos)
    }

    pub fn view(&self) -> ObstacleView {
        ObstacleView {
            x: self.bounds.x,
            y: self.bounds.y,
            width: self.bounds.w,
            height: self.bounds.h,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FoodSource {
    pub pos: Vec2,
    pub amount_left: u32,
}

impl FoodSource {
    pub fn new(pos: Vec2, amount: u32) -> Self {
        Self {
            pos,
            amount_left: amount,
        }
    }

    pub fn is_depleted(&self) -> bool {
        self.amount_left == 0
    }

    /// Removes one unit if any is left. Returns true if a unit was taken.
    pub fn take_one(&mut self) -> bool {
        if self.amount_left == 0 {
            return false;
        }
        self.amount_left -= 1;
        true
    }

    pub fn view(&self) -> FoodView {
        FoodView {
            x: self.pos.x,
            y: self.pos.y,
            amount_left: self.amount_left,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_edges_are_blocked() {
        let world = WorldBounds::new(100.0, 50.0);
        assert!(world.contains(Vec2::new(50.0, 25.0)));
        assert!(!world.contains(Vec2::new(0.0, 25.0)));
        assert!(!world.contains(Vec2::new(100.0, 25.0)));
        assert!(!world.contains(Vec2::new(50.0, 0.0)));
        assert!(!world.contains(Vec2::new(50.0, 50.0)));
        assert!(!world.contains(Vec2::new(-3.0, 80.0)));
    }

    #[test]
    fn test_obstacle_blocks_its_rectangle() {
        let world = WorldBounds::new(1600.0, 900.0);
        let obstacles = [Obstacle::new(400.0, 600.0, 800.0, 50.0)];
        assert!(!world.is_free(Vec2::new(400.0, 600.0), &obstacles));
        assert!(!world.is_free(Vec2::new(800.0, 625.0), &obstacles));
        assert!(world.is_free(Vec2::new(800.0, 599.0), &obstacles));
        assert!(world.is_free(Vec2::new(1201.0, 625.0), &obstacles));
        assert!(world.is_free(Vec2::new(800.0, 651.0), &obstacles));
    }

    #[test]
    fn test_food_never_goes_below_zero() {
        let mut food = FoodSource::new(Vec2::new(1.0, 1.0), 2);
        assert!(food.take_one());
        assert!(food.take_one());
        assert!(food.is_depleted());
        assert!(!food.take_one());
        assert_eq!(food.amount_left, 0);
    }
}
