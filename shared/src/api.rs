//! Read-only view of the simulation handed to the presentation shell once per frame.
//! The shell maps these values to sprites and colours; it never writes back.

/// Behavioural state of an ant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AntState {
    /// Looking for food; lays home trail, follows food trail.
    Searching,
    /// Carrying food back; lays food trail, follows home trail.
    Returning,
}

impl AntState {
    /// Hue used when tinting the ant sprite.
    pub fn hue(self) -> f32 {
        match self {
            AntState::Searching => 100.0,
            AntState::Returning => 0.0,
        }
    }

    /// Trail an ant in this state lays down.
    pub fn deposit_channel(self) -> TrailChannel {
        match self {
            AntState::Searching => TrailChannel::Home,
            AntState::Returning => TrailChannel::Food,
        }
    }

    /// Trail an ant in this state steers by.
    pub fn follow_channel(self) -> TrailChannel {
        match self {
            AntState::Searching => TrailChannel::Food,
            AntState::Returning => TrailChannel::Home,
        }
    }
}

/// One of the two independent pheromone fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrailChannel {
    Home,
    Food,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AntView {
    pub x: f32,
    pub y: f32,
    /// Degrees in [0, 360), 0 = up, clockwise.
    pub heading: f32,
    pub state: AntState,
    pub animation_step: u32,
    pub manual: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoodView {
    pub x: f32,
    pub y: f32,
    pub amount_left: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstacleView {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Query surface the simulation exposes to a renderer.
pub trait FrameSource {
    /// World size in world units (width, height).
    fn world_size(&self) -> (f32, f32);
    fn nest_position(&self) -> (f32, f32);
    fn ants(&self) -> Vec<AntView>;
    fn food_sources(&self) -> Vec<FoodView>;
    fn obstacles(&self) -> Vec<ObstacleView>;
    /// Trail grid size in cells (columns, rows).
    fn trail_dimensions(&self) -> (usize, usize);
    /// Edge length of one trail cell in world units.
    fn trail_cell_size(&self) -> f32;
    /// Concentration of a trail cell; 0 outside the grid.
    fn trail_at(&self, channel: TrailChannel, cell_x: usize, cell_y: usize) -> f32;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_hues_for_sprite_tint() {
        assert_eq!(AntState::Searching.hue(), 100.0);
        assert_eq!(AntState::Returning.hue(), 0.0);
    }

    #[test]
    fn test_each_state_lays_the_trail_the_other_follows() {
        assert_eq!(AntState::Searching.deposit_channel(), TrailChannel::Home);
        assert_eq!(AntState::Searching.follow_channel(), TrailChannel::Food);
        assert_eq!(AntState::Returning.deposit_channel(), TrailChannel::Food);
        assert_eq!(AntState::Returning.follow_channel(), TrailChannel::Home);
    }
}
