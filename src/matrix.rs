use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::{hsv_to_rgb, Hsv, Rgb};
use crate::config::{self, MatrixConfig};
use crate::error::SparkError;
use crate::particle::Particle;

/// How the grid loses intensity between frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameDecay {
    /// Keep the previous frame untouched.
    Persist,
    Clear,
    Halve,
    Linear(u8),
}

impl FrameDecay {
    pub fn label(self) -> &'static str {
        match self {
            Self::Persist => "persist",
            Self::Clear => "clear",
            Self::Halve => "halve",
            Self::Linear(_) => "linear",
        }
    }

    pub fn parse_cli(value: &str) -> Option<Self> {
        let value = value.to_ascii_lowercase();
        match value.as_str() {
            "persist" | "none" => Some(Self::Persist),
            "clear" | "reset" => Some(Self::Clear),
            "halve" | "fade" => Some(Self::Halve),
            _ => value
                .strip_prefix("linear:")
                .and_then(|amount| amount.parse().ok())
                .map(Self::Linear),
        }
    }
}

impl FromStr for FrameDecay {
    type Err = SparkError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse_cli(value).ok_or_else(|| SparkError::UnknownDecay(value.to_string()))
    }
}

/// RGB intensity grid that particles are splatted into.
///
/// Cells are stored row-major with row 0 at the bottom, matching the particle
/// y axis.
#[derive(Clone, Debug)]
pub struct LedMatrix {
    config: MatrixConfig,
    cells: Vec<Rgb>,
    /// Bleed channel saturation into the sibling channels of the same cell.
    pub overflow: bool,
}

impl LedMatrix {
    pub fn new(config: MatrixConfig) -> Self {
        Self {
            config,
            cells: vec![Rgb::BLACK; config.cell_count()],
            overflow: config::OVERFLOW_BLEED,
        }
    }

    pub fn config(&self) -> MatrixConfig {
        self.config
    }

    pub fn width(&self) -> i32 {
        self.config.cells_x
    }

    pub fn height(&self) -> i32 {
        self.config.cells_y
    }

    fn index(&self, col: i32, row: i32) -> Option<usize> {
        if col < 0 || row < 0 || col >= self.config.cells_x || row >= self.config.cells_y {
            return None;
        }
        Some((row * self.config.cells_x + col) as usize)
    }

    pub fn get(&self, col: i32, row: i32) -> Option<Rgb> {
        self.index(col, row).map(|i| self.cells[i])
    }

    pub fn set(&mut self, col: i32, row: i32, color: Rgb) {
        if let Some(i) = self.index(col, row) {
            self.cells[i] = color;
        }
    }

    pub fn cells(&self) -> &[Rgb] {
        &self.cells
    }

    /// Rows bottom to top, each left to right.
    pub fn rows(&self) -> impl Iterator<Item = &[Rgb]> + '_ {
        self.cells.chunks(self.config.cells_x.max(1) as usize)
    }

    /// Sum of every channel of every cell.
    pub fn total_energy(&self) -> u64 {
        self.cells.iter().map(|c| c.sum() as u64).sum()
    }

    /// Splat every particle into the grid. Dead particles are included: their
    /// last ttl, hue and position keep glowing until the slot is re-emitted.
    pub fn render(&mut self, particles: &[Particle]) {
        let radius = self.config.radius;
        let surface = self.config.surface() as u32;
        if radius <= 0 || surface == 0 {
            return;
        }

        for particle in particles {
            let rgb = hsv_to_rgb(Hsv::hue(particle.hue));
            let ttl = particle.ttl as u32;

            let dx = radius - particle.x.rem_euclid(radius);
            let dy = radius - particle.y.rem_euclid(radius);
            let col = particle.x.div_euclid(radius);
            let row = particle.y.div_euclid(radius);

            let corners = [
                (col, row, dx * dy),
                (col + 1, row, (radius - dx) * dy),
                (col + 1, row + 1, (radius - dx) * (radius - dy)),
                (col, row + 1, dx * (radius - dy)),
            ];
            for (c, r, weight) in corners {
                if self.index(c, r).is_none() {
                    continue;
                }
                let energy = weight as u32 * ttl / surface;
                self.add_color(c, r, rgb, energy);
            }
        }
    }

    /// Additively blend `energy` worth of `rgb` into one cell.
    ///
    /// Each channel gains `energy * channel / 256`, saturating at 255. With
    /// overflow enabled a quarter of the excess spills into the other two
    /// channels.
    pub fn add_color(&mut self, col: i32, row: i32, rgb: Rgb, energy: u32) {
        let Some(i) = self.index(col, row) else {
            return;
        };
        let overflow = self.overflow;
        let cell = &mut self.cells[i];

        if rgb.r > 0 {
            let excess = blend_channel(&mut cell.r, rgb.r, energy);
            if overflow && excess > 0 {
                cell.g = saturating_add(cell.g, excess);
                cell.b = saturating_add(cell.b, excess);
            }
        }
        if rgb.g > 0 {
            let excess = blend_channel(&mut cell.g, rgb.g, energy);
            if overflow && excess > 0 {
                cell.r = saturating_add(cell.r, excess);
                cell.b = saturating_add(cell.b, excess);
            }
        }
        if rgb.b > 0 {
            let excess = blend_channel(&mut cell.b, rgb.b, energy);
            if overflow && excess > 0 {
                cell.r = saturating_add(cell.r, excess);
                cell.g = saturating_add(cell.g, excess);
            }
        }
    }

    /// Zero every cell.
    pub fn reset(&mut self) {
        self.cells.fill(Rgb::BLACK);
    }

    /// Halve every channel.
    pub fn fade(&mut self) {
        for cell in &mut self.cells {
            cell.r >>= 1;
            cell.g >>= 1;
            cell.b >>= 1;
        }
    }

    /// Subtract `amount` from every channel, floored at zero.
    pub fn fade_by(&mut self, amount: u8) {
        for cell in &mut self.cells {
            cell.r = cell.r.saturating_sub(amount);
            cell.g = cell.g.saturating_sub(amount);
            cell.b = cell.b.saturating_sub(amount);
        }
    }

    pub fn apply(&mut self, decay: FrameDecay) {
        match decay {
            FrameDecay::Persist => {}
            FrameDecay::Clear => self.reset(),
            FrameDecay::Halve => self.fade(),
            FrameDecay::Linear(amount) => self.fade_by(amount),
        }
    }
}

// Returns the spill for sibling channels: a quarter of what went past 255.
fn blend_channel(channel: &mut u8, base: u8, energy: u32) -> u32 {
    let sum = *channel as u32 + ((energy * base as u32) >> 8);
    *channel = sum.min(255) as u8;
    sum.saturating_sub(255) >> 2
}

fn saturating_add(channel: u8, amount: u32) -> u8 {
    (channel as u32 + amount).min(255) as u8
}
