use serde::{Deserialize, Serialize};

use crate::config::{self, MatrixConfig};
use crate::entropy::Entropy;

/// Constant acceleration shared by every particle of one kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acceleration {
    pub ax: i32,
    pub ay: i32,
}

impl Acceleration {
    pub fn new(ax: i32, ay: i32) -> Self {
        Self { ax, ay }
    }
}

/// Point that pulls attractor particles, with the clamp applied to their velocity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttractorParams {
    pub x: i32,
    pub y: i32,
    pub force: i32,
    pub max_speed: i32,
    pub jitter: i32,
}

impl Default for AttractorParams {
    fn default() -> Self {
        Self {
            x: config::ATTRACTOR_X,
            y: config::ATTRACTOR_Y,
            force: config::ATTRACTOR_FORCE,
            max_speed: config::ATTRACTOR_MAX_SPEED,
            jitter: config::ATTRACTOR_JITTER,
        }
    }
}

/// Per-kind motion tunables plus the bounding box every particle lives in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Physics {
    pub matrix: MatrixConfig,
    pub standard: Acceleration,
    pub bounce: Acceleration,
    pub attractor: AttractorParams,
    pub decay_factor: u8,
}

impl Default for Physics {
    fn default() -> Self {
        Self {
            matrix: MatrixConfig::default(),
            standard: Acceleration::default(),
            bounce: Acceleration::default(),
            attractor: AttractorParams::default(),
            decay_factor: config::FIXED_DECAY_FACTOR,
        }
    }
}

impl Physics {
    pub fn new(matrix: MatrixConfig) -> Self {
        Self {
            matrix,
            ..Default::default()
        }
    }
}

/// Motion and aging rule of a pool slot. Fixed for the lifetime of the slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParticleKind {
    Standard,
    Bounce,
    Attractor,
    FixedDecay,
}

impl ParticleKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Bounce => "bounce",
            Self::Attractor => "attractor",
            Self::FixedDecay => "fixed-decay",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Particle {
    pub kind: ParticleKind,
    pub x: i32,
    pub y: i32,
    pub vx: i32,
    pub vy: i32,
    pub ttl: u8,
    pub hue: u8,
    pub alive: bool,
}

impl Particle {
    /// A dead particle at the origin, ready to be emitted into.
    pub fn new(kind: ParticleKind) -> Self {
        Self {
            kind,
            x: 0,
            y: 0,
            vx: 0,
            vy: 0,
            ttl: 0,
            hue: 0,
            alive: false,
        }
    }

    /// A live particle with explicit motion state, e.g. a fountain source.
    pub fn moving(kind: ParticleKind, x: i32, y: i32, vx: i32, vy: i32, ttl: u8) -> Self {
        Self {
            kind,
            x,
            y,
            vx,
            vy,
            ttl,
            hue: 0,
            alive: true,
        }
    }

    /// Advance one tick. Never fails: boundary contact clamps, reflects or kills.
    pub fn update(&mut self, physics: &Physics, rng: &mut impl Entropy) {
        match self.kind {
            ParticleKind::Standard => self.update_standard(physics),
            ParticleKind::Bounce => self.update_bounce(physics),
            ParticleKind::Attractor => self.update_attractor(physics, rng),
            ParticleKind::FixedDecay => self.update_fixed(physics),
        }
    }

    fn update_standard(&mut self, physics: &Physics) {
        let max_x = physics.matrix.max_x();
        let max_y = physics.matrix.max_y();

        self.ttl = self.ttl.saturating_sub(1);
        self.vx = (self.vx + physics.standard.ax).min(max_x);
        self.vy = (self.vy + physics.standard.ay).min(max_y);

        let new_x = self.x + self.vx;
        let new_y = self.y + self.vy;
        if self.ttl == 0 || new_x < 0 || new_x > max_x || new_y < 0 || new_y > max_y {
            self.alive = false;
        } else {
            self.x = new_x;
            self.y = new_y;
        }
    }

    fn update_bounce(&mut self, physics: &Physics) {
        let max_x = physics.matrix.max_x();
        let max_y = physics.matrix.max_y();

        self.ttl = self.ttl.saturating_sub(1);
        self.vx = (self.vx + physics.bounce.ax).min(max_x);
        self.vy = (self.vy + physics.bounce.ay).min(max_y);

        if self.y == 0 || self.y >= max_y {
            self.vy = -self.vy;
        }
        if self.x == 0 || self.x >= max_x {
            self.vx = -self.vx;
        }

        if self.ttl == 0 || (self.vx == 0 && self.vy == 0) {
            self.alive = false;
        } else {
            self.x = (self.x + self.vx).clamp(0, max_x);
            self.y = (self.y + self.vy).clamp(0, max_y);
        }
    }

    // ttl is never aged here; only an emitter handing out ttl 0 can kill it.
    fn update_attractor(&mut self, physics: &Physics, rng: &mut impl Entropy) {
        let max_x = physics.matrix.max_x();
        let max_y = physics.matrix.max_y();
        let attractor = &physics.attractor;

        if self.ttl == 0 {
            self.alive = false;
        }

        let dx = attractor.x - self.x;
        let dy = attractor.y - self.y;
        let dist_sq = dx * dx + dy * dy;
        let (acx, acy) = if dist_sq == 0 {
            (0, 0)
        } else {
            let mult = attractor.force as f32 / dist_sq as f32;
            ((mult * dx as f32) as i32, (mult * dy as f32) as i32)
        };

        let mut temp_vx = self.vx + acx;
        let mut temp_vy = self.vy + acy;
        let temp_x = self.x + temp_vx;
        let temp_y = self.y + temp_vy;

        if temp_x < 0 || temp_x > max_x {
            temp_vx = 0;
        }
        if temp_y < 0 || temp_y > max_y {
            temp_vy = 0;
        }

        let half_jitter = attractor.jitter / 2;
        self.vx = if temp_vx.abs() > attractor.max_speed {
            rng.random_below(attractor.jitter) - half_jitter
        } else {
            temp_vx
        };
        self.vy = if temp_vy.abs() > attractor.max_speed {
            rng.random_below(attractor.jitter) - half_jitter
        } else {
            temp_vy
        };

        self.x = temp_x.clamp(0, max_x);
        self.y = temp_y.clamp(0, max_y);
    }

    fn update_fixed(&mut self, physics: &Physics) {
        if self.ttl < physics.decay_factor {
            self.alive = false;
            return;
        }
        self.ttl -= physics.decay_factor;
    }
}
