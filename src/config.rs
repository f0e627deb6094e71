// All tunable engine constants in one place.

use serde::{Deserialize, Serialize};

// Matrix
pub const DEFAULT_CELLS_X: i32 = 8;
pub const DEFAULT_CELLS_Y: i32 = 8;
pub const SUBCELL_RADIUS: i32 = 32;

// Particle system
pub const DEFAULT_PER_CYCLE: u8 = 1;

// Particles
pub const FIXED_DECAY_FACTOR: u8 = 10;
pub const ATTRACTOR_X: i32 = 112;
pub const ATTRACTOR_Y: i32 = 112;
pub const ATTRACTOR_FORCE: i32 = 4;
pub const ATTRACTOR_MAX_SPEED: i32 = 50;
pub const ATTRACTOR_JITTER: i32 = 10;

// Emitters
pub const FIRE_BASE_HUE: u8 = 128; // blues
pub const FIRE_HUE_CYCLE: u32 = 240;
pub const FIRE_HUE_OFFSET: u8 = 16;
pub const FIXED_HUE_CYCLE: u32 = 250;
pub const FOUNTAIN_MIN_LIFE: u8 = 50;
pub const FOUNTAIN_MAX_LIFE: u8 = 250;
pub const SIDE_BASE_HUE: u8 = 128;
pub const SIDE_MAX_TTL: u8 = 128;
pub const SPIN_MIN_TTL: u8 = 20;
pub const SPIN_MAX_TTL: u8 = 100;
pub const SPIN_OSCILLATE_PERIOD: u32 = 20;

// Renderer
pub const OVERFLOW_BLEED: bool = true;

// Preview
pub const FIXED_DT: f32 = 1.0 / 30.0;
pub const DEFAULT_SEED: u64 = 0x5eed;
pub const DEFAULT_BRIGHTNESS: u8 = 255;
pub const STATS_CAPACITY: usize = 600;

/// Grid geometry: cell counts plus the sub-cell resolution every position is scaled by.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixConfig {
    pub cells_x: i32,
    pub cells_y: i32,
    pub radius: i32,
}

impl Default for MatrixConfig {
    fn default() -> Self {
        Self {
            cells_x: DEFAULT_CELLS_X,
            cells_y: DEFAULT_CELLS_Y,
            radius: SUBCELL_RADIUS,
        }
    }
}

impl MatrixConfig {
    pub fn new(cells_x: i32, cells_y: i32, radius: i32) -> Self {
        Self {
            cells_x,
            cells_y,
            radius,
        }
    }

    /// Largest valid horizontal position.
    pub fn max_x(&self) -> i32 {
        self.cells_x * self.radius - 1
    }

    /// Largest valid vertical position.
    pub fn max_y(&self) -> i32 {
        self.cells_y * self.radius - 1
    }

    /// Horizontal extent in position units.
    pub fn width(&self) -> i32 {
        self.cells_x * self.radius
    }

    /// Area of one cell in position units; the splat normalizer.
    pub fn surface(&self) -> i32 {
        self.radius * self.radius
    }

    pub fn cell_count(&self) -> usize {
        (self.cells_x.max(0) * self.cells_y.max(0)) as usize
    }

    pub fn center(&self) -> (i32, i32) {
        (self.max_x() / 2, self.max_y() / 2)
    }
}
