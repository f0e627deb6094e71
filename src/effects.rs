use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::MatrixConfig;
use crate::emitter::{Emitter, FireEmitter, FixedEmitter, FountainEmitter, Side, SideEmitter, SpinEmitter};
use crate::engine::Engine;
use crate::error::SparkError;
use crate::matrix::FrameDecay;
use crate::particle::{Acceleration, Particle, ParticleKind, Physics};
use crate::system::ParticleSystem;

/// Ready-made combinations of emitter, particle kind, tunables and decay.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Effect {
    Fire,
    Fountain,
    Spin,
    Rain,
    Sparkle,
    Swarm,
}

impl Effect {
    pub const ALL: [Self; 6] = [
        Self::Fire,
        Self::Fountain,
        Self::Spin,
        Self::Rain,
        Self::Sparkle,
        Self::Swarm,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Fire => "fire",
            Self::Fountain => "fountain",
            Self::Spin => "spin",
            Self::Rain => "rain",
            Self::Sparkle => "sparkle",
            Self::Swarm => "swarm",
        }
    }

    pub fn parse_cli(value: &str) -> Option<Self> {
        let value = value.to_ascii_lowercase();
        Self::ALL.into_iter().find(|e| e.label() == value)
    }

    /// Particle pool, spawn budget and frame decay for this effect.
    pub fn build(self, matrix: MatrixConfig, seed: u64) -> Engine {
        let mut physics = Physics::new(matrix);
        let (center_x, center_y) = matrix.center();

        let (system, decay, overflow) = match self {
            Effect::Fire => {
                // Embers rise faster the longer they live; center bands reach highest.
                physics.standard = Acceleration::new(0, 1);
                let system = ParticleSystem::new(
                    120,
                    ParticleKind::Standard,
                    Emitter::Fire(FireEmitter::new(0)),
                )
                .with_per_cycle(6);
                (system, FrameDecay::Clear, false)
            }
            Effect::Fountain => {
                physics.standard = Acceleration::new(0, -1);
                physics.attractor.x = center_x;
                physics.attractor.y = center_y;
                physics.attractor.force = 300;
                let source = Particle::moving(
                    ParticleKind::Attractor,
                    matrix.radius,
                    center_y,
                    0,
                    4,
                    1,
                );
                let system = ParticleSystem::new(
                    60,
                    ParticleKind::Standard,
                    Emitter::Fountain(FountainEmitter::new(0, 12, 8, source)),
                )
                .with_per_cycle(2);
                (system, FrameDecay::Halve, true)
            }
            Effect::Spin => {
                let spin = SpinEmitter::new(center_x, center_y, 8, 12).oscillating();
                let system =
                    ParticleSystem::new(80, ParticleKind::Standard, Emitter::Spin(spin))
                        .with_per_cycle(4);
                (system, FrameDecay::Halve, true)
            }
            Effect::Rain => {
                physics.standard = Acceleration::new(0, -1);
                let mut side = SideEmitter::new(Side::Top);
                side.base_hue = 150;
                let system =
                    ParticleSystem::new(60, ParticleKind::Standard, Emitter::Side(side))
                        .with_per_cycle(2);
                (system, FrameDecay::Linear(48), true)
            }
            Effect::Sparkle => {
                let fixed = FixedEmitter::new(matrix.radius / 2, matrix.radius, 5, 7, 200);
                let system =
                    ParticleSystem::new(24, ParticleKind::Bounce, Emitter::Fixed(fixed));
                (system, FrameDecay::Halve, true)
            }
            Effect::Swarm => {
                physics.attractor.x = center_x;
                physics.attractor.y = center_y;
                physics.attractor.force = 300;
                let system = ParticleSystem::new(
                    16,
                    ParticleKind::Attractor,
                    Emitter::Side(SideEmitter::new(Side::Left)),
                );
                (system, FrameDecay::Halve, true)
            }
        };

        log::info!(
            "effect {}: {} particles, {} per tick",
            self.label(),
            system.capacity(),
            system.per_cycle()
        );
        let mut engine = Engine::new(system, physics, decay, seed);
        engine.matrix.overflow = overflow;
        engine
    }
}

impl FromStr for Effect {
    type Err = SparkError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse_cli(value).ok_or_else(|| SparkError::UnknownEffect(value.to_string()))
    }
}
