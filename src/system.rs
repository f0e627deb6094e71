use crate::config;
use crate::emitter::Emitter;
use crate::entropy::Entropy;
use crate::particle::{Particle, ParticleKind, Physics};

/// Fixed pool of particle slots fed by a single emitter.
///
/// Slots are never added or removed after construction; a dead slot is simply
/// refilled by the emitter, at most `per_cycle` of them per tick.
#[derive(Clone, Debug)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
    emitter: Emitter,
    per_cycle: u8,
}

impl ParticleSystem {
    /// `num` dead slots of one kind.
    pub fn new(num: usize, kind: ParticleKind, emitter: Emitter) -> Self {
        Self::from_particles(vec![Particle::new(kind); num], emitter)
    }

    /// Pool from explicit slots, e.g. mixed kinds or pre-seeded live particles.
    pub fn from_particles(particles: Vec<Particle>, emitter: Emitter) -> Self {
        log::debug!(
            "particle system: {} slots, {} emitter",
            particles.len(),
            emitter.label()
        );
        Self {
            particles,
            emitter,
            per_cycle: config::DEFAULT_PER_CYCLE,
        }
    }

    pub fn with_per_cycle(mut self, per_cycle: u8) -> Self {
        self.per_cycle = per_cycle;
        self
    }

    /// One tick: advance the emitter, refill dead slots within budget, age live ones.
    ///
    /// A slot refilled this tick is aged in the same visit, so a freshly spawned
    /// particle has already lost one step of life when it is first rendered.
    pub fn update(&mut self, physics: &Physics, rng: &mut impl Entropy) {
        let mut remaining = self.per_cycle;
        self.emitter.update(physics, rng);

        for particle in &mut self.particles {
            if !particle.alive && remaining > 0 {
                self.emitter.emit(particle, physics, rng);
                remaining -= 1;
            }
            if particle.alive {
                particle.update(physics, rng);
            }
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn emitter(&self) -> &Emitter {
        &self.emitter
    }

    pub fn emitter_mut(&mut self) -> &mut Emitter {
        &mut self.emitter
    }

    pub fn per_cycle(&self) -> u8 {
        self.per_cycle
    }

    pub fn set_per_cycle(&mut self, per_cycle: u8) {
        self.per_cycle = per_cycle;
    }

    pub fn capacity(&self) -> usize {
        self.particles.len()
    }

    pub fn alive_count(&self) -> usize {
        self.particles.iter().filter(|p| p.alive).count()
    }

    /// Mark every slot dead. Stale fields stay in place.
    pub fn kill_all(&mut self) {
        for particle in &mut self.particles {
            particle.alive = false;
        }
    }
}
