use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::matrix::{FrameDecay, LedMatrix};
use crate::particle::Physics;
use crate::system::ParticleSystem;

/// One running effect: simulation, grid and the randomness driving both.
///
/// The caller decides the frame cadence and calls [`Engine::tick`] once per
/// frame, then reads [`Engine::frame`].
pub struct Engine {
    pub system: ParticleSystem,
    pub matrix: LedMatrix,
    pub physics: Physics,
    pub decay: FrameDecay,
    rng: ChaCha8Rng,
    tick_count: u64,
}

impl Engine {
    pub fn new(system: ParticleSystem, physics: Physics, decay: FrameDecay, seed: u64) -> Self {
        log::debug!(
            "engine: {}x{} cells, radius {}, decay {}, seed {seed}",
            physics.matrix.cells_x,
            physics.matrix.cells_y,
            physics.matrix.radius,
            decay.label()
        );
        Self {
            system,
            matrix: LedMatrix::new(physics.matrix),
            physics,
            decay,
            rng: ChaCha8Rng::seed_from_u64(seed),
            tick_count: 0,
        }
    }

    /// Simulate one step, decay the previous frame, splat the pool.
    pub fn tick(&mut self) {
        self.system.update(&self.physics, &mut self.rng);
        self.matrix.apply(self.decay);
        self.matrix.render(self.system.particles());
        self.tick_count += 1;
    }

    pub fn run(&mut self, ticks: u64) {
        for _ in 0..ticks {
            self.tick();
        }
    }

    pub fn frame(&self) -> &LedMatrix {
        &self.matrix
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn reseed(&mut self, seed: u64) {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use crate::emitter::{Emitter, FixedEmitter};
    use crate::particle::ParticleKind;

    fn still_engine(decay: FrameDecay) -> Engine {
        let system = ParticleSystem::new(
            1,
            ParticleKind::FixedDecay,
            Emitter::Fixed(FixedEmitter::new(0, 0, 0, 0, 210)),
        );
        let mut physics = Physics::default();
        physics.decay_factor = 0;
        Engine::new(system, physics, decay, 1)
    }

    #[test]
    fn tick_updates_then_renders() {
        let mut engine = still_engine(FrameDecay::Clear);
        engine.tick();
        assert_eq!(engine.tick_count(), 1);
        assert_eq!(engine.system.alive_count(), 1);
        // hue 1 from the first fixed emit, full weight in cell (0, 0)
        let cell = engine.frame().get(0, 0).unwrap_or_default();
        assert_eq!(cell.r, 209);
    }

    #[test]
    fn clear_decay_keeps_frames_independent() {
        let mut engine = still_engine(FrameDecay::Clear);
        engine.run(3);
        let first = engine.frame().get(0, 0);
        engine.run(3);
        assert_eq!(engine.frame().get(0, 0), first);
    }

    #[test]
    fn persist_decay_accumulates_to_saturation() {
        let mut engine = still_engine(FrameDecay::Persist);
        engine.run(2);
        let cell = engine.frame().get(0, 0).unwrap_or_default();
        assert_eq!(cell.r, 255);
        assert_ne!(cell, Rgb::new(255, 0, 0), "overflow bleeds into green and blue");
    }

    #[test]
    fn same_seed_gives_same_frames() {
        use crate::emitter::FireEmitter;

        let build = || {
            let system = ParticleSystem::new(
                40,
                ParticleKind::Standard,
                Emitter::Fire(FireEmitter::default()),
            )
            .with_per_cycle(3);
            let mut physics = Physics::default();
            physics.standard.ay = 1;
            Engine::new(system, physics, FrameDecay::Halve, 77)
        };
        let mut a = build();
        let mut b = build();
        a.run(50);
        b.run(50);
        assert_eq!(a.frame().cells(), b.frame().cells());
    }
}
