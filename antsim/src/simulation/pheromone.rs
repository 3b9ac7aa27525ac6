use macroquad::prelude::Vec2;
use serde::{Deserialize, Serialize};

use super::{
    BLUR_CENTER_WEIGHT, BLUR_DIAGONAL_WEIGHT, BLUR_SIDE_WEIGHT, CELL_SIZE, MAX_CELL_CONCENTRATION,
    SNAP_TO_ZERO_BELOW,
};

/// How `blur` reads neighbouring cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlurMode {
    /// Every cell reads the pre-blur snapshot. Symmetric.
    #[default]
    Buffered,
    /// Cells are overwritten column by column, so later cells read already blurred
    /// neighbours to the left and above.
    InPlace,
}

/// Dense grid of trail concentration, one cell per `CELL_SIZE` x `CELL_SIZE` world units.
#[derive(Clone)]
pub struct PheromoneField {
    pub width: usize,
    pub height: usize,
    data: Vec<Vec<f32>>,
    scratch: Vec<Vec<f32>>,
    pub evaporation_rate: f32,
    pub blur_mode: BlurMode,
}

impl PheromoneField {
    pub fn new(width: usize, height: usize, evaporation_rate: f32, blur_mode: BlurMode) -> Self {
        Self {
            width,
            height,
            data: vec![vec![0.0; width]; height],
            scratch: vec![vec![0.0; width]; height],
            evaporation_rate,
            blur_mode,
        }
    }

    /// Field sized to cover a world of the given extent.
    pub fn covering(
        world_width: f32,
        world_height: f32,
        evaporation_rate: f32,
        blur_mode: BlurMode,
    ) -> Self {
        let width = (world_width / CELL_SIZE).ceil().max(1.0) as usize;
        let height = (world_height / CELL_SIZE).ceil().max(1.0) as usize;
        Self::new(width, height, evaporation_rate, blur_mode)
    }

    /// Cell containing a world position. May lie outside the grid.
    #[inline(always)]
    pub fn cell_of(pos: Vec2) -> (i32, i32) {
        (
            (pos.x / CELL_SIZE).floor() as i32,
            (pos.y / CELL_SIZE).floor() as i32,
        )
    }

    #[inline(always)]
    fn index(&self, cell_x: i32, cell_y: i32) -> Option<(usize, usize)> {
        if cell_x < 0 || cell_y < 0 {
            return None;
        }
        let (x, y) = (cell_x as usize, cell_y as usize);
        if x < self.width && y < self.height {
            Some((x, y))
        } else {
            None
        }
    }

    /// Concentration at a cell, 0 outside the grid.
    pub fn get(&self, cell_x: i32, cell_y: i32) -> f32 {
        self.index(cell_x, cell_y)
            .map_or(0.0, |(x, y)| self.data[y][x])
    }

    /// Adds `amount` to a cell. Returns false, leaving the field untouched, when the
    /// cell is outside the grid.
    #[inline(always)]
    pub fn deposit(&mut self, cell_x: i32, cell_y: i32, amount: f32) -> bool {
        match self.index(cell_x, cell_y) {
            Some((x, y)) => {
                self.data[y][x] += amount;
                true
            }
            None => false,
        }
    }

    /// Forward-biased smell. Sums the offset directions of every in-grid cell of the
    /// square neighbourhood whose direction points ahead of `forward`, each weighted by
    /// its alignment with `forward` and by its concentration. The result is not
    /// normalised.
    pub fn sample_directional(&self, cell_x: i32, cell_y: i32, radius: i32, forward: Vec2) -> Vec2 {
        let mut sum = Vec2::ZERO;
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let Some((x, y)) = self.index(cell_x + dx, cell_y + dy) else {
                    continue;
                };
                let level = self.data[y][x];
                if level == 0.0 {
                    continue;
                }
                let unit = Vec2::new(dx as f32, dy as f32).normalize();
                let alignment = unit.dot(forward);
                // Cells behind the ant are ignored
                if alignment <= 0.0 {
                    continue;
                }
                sum += unit * alignment * level;
            }
        }
        sum
    }

    /// Caps every cell at the ceiling, scales by `1 - fraction`, then snaps small
    /// leftovers to exactly zero.
    pub fn evaporate(&mut self, fraction: f32) {
        let keep = 1.0 - fraction;
        for row in &mut self.data {
            for cell in row.iter_mut() {
                let mut amount = cell.min(MAX_CELL_CONCENTRATION) * keep;
                if amount < SNAP_TO_ZERO_BELOW {
                    amount = 0.0;
                }
                *cell = amount;
            }
        }
    }

    /// Evaporates at the field's own rate.
    pub fn decay(&mut self) {
        self.evaporate(self.evaporation_rate);
    }

    /// One-pass 3x3 smoothing of the interior; the one-cell border is left as is.
    pub fn blur(&mut self) {
        if self.width < 3 || self.height < 3 {
            return;
        }
        match self.blur_mode {
            BlurMode::Buffered => {
                for (dst, src) in self.scratch.iter_mut().zip(&self.data) {
                    dst.copy_from_slice(src);
                }
                for y in 1..self.height - 1 {
                    for x in 1..self.width - 1 {
                        self.data[y][x] = blur_kernel(&self.scratch, x, y);
                    }
                }
            }
            BlurMode::InPlace => {
                // Column by column, top to bottom within each column.
                for x in 1..self.width - 1 {
                    for y in 1..self.height - 1 {
                        self.data[y][x] = blur_kernel(&self.data, x, y);
                    }
                }
            }
        }
    }

    /// Sum of all cells, for diagnostics.
    pub fn total(&self) -> f32 {
        self.data.iter().flat_map(|row| row.iter()).sum()
    }

    pub fn max_value(&self) -> f32 {
        self.data
            .iter()
            .flat_map(|row| row.iter())
            .fold(0.0, |acc, &v| acc.max(v))
    }
}

#[inline(always)]
fn blur_kernel(values: &[Vec<f32>], x: usize, y: usize) -> f32 {
    let side = values[y][x - 1] + values[y][x + 1] + values[y - 1][x] + values[y + 1][x];
    let diagonal = values[y - 1][x - 1]
        + values[y - 1][x + 1]
        + values[y + 1][x - 1]
        + values[y + 1][x + 1];
    BLUR_CENTER_WEIGHT * values[y][x] + BLUR_SIDE_WEIGHT * side + BLUR_DIAGONAL_WEIGHT * diagonal
}
