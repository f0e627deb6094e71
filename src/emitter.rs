//! Particle emitters.
//!
//! An emitter re-initializes every motion field of a dead pool slot when the
//! particle system hands it one, and may advance its own state once per tick.
//!
//! | Emitter | Spawns |
//! |---------|--------|
//! | [`Emitter::Fire`] | Embers along the bottom row, longer-lived toward the center |
//! | [`Emitter::Fixed`] | Identical particles at one point, cycling hue |
//! | [`Emitter::Fountain`] | Jittered jets from a moving source particle |
//! | [`Emitter::Side`] | Still particles along one edge of the matrix |
//! | [`Emitter::Spin`] | Two opposite arms from a pivot, rotating each tick |

use serde::{Deserialize, Serialize};

use crate::config;
use crate::entropy::Entropy;
use crate::particle::{Particle, Physics};

#[derive(Clone, Debug)]
pub enum Emitter {
    Fire(FireEmitter),
    Fixed(FixedEmitter),
    Fountain(FountainEmitter),
    Side(SideEmitter),
    Spin(SpinEmitter),
}

impl Emitter {
    /// Overwrite `particle` with a fresh, living state. The slot's kind is kept.
    pub fn emit(&mut self, particle: &mut Particle, physics: &Physics, rng: &mut impl Entropy) {
        match self {
            Emitter::Fire(e) => e.emit(particle, physics, rng),
            Emitter::Fixed(e) => e.emit(particle),
            Emitter::Fountain(e) => e.emit(particle, physics, rng),
            Emitter::Side(e) => e.emit(particle, physics, rng),
            Emitter::Spin(e) => e.emit(particle, rng),
        }
    }

    /// Advance emitter-internal state; called once per system tick.
    pub fn update(&mut self, physics: &Physics, rng: &mut impl Entropy) {
        match self {
            Emitter::Fountain(e) => e.update(physics, rng),
            Emitter::Spin(e) => e.update(),
            Emitter::Fire(_) | Emitter::Fixed(_) | Emitter::Side(_) => {}
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Emitter::Fire(_) => "fire",
            Emitter::Fixed(_) => "fixed",
            Emitter::Fountain(_) => "fountain",
            Emitter::Side(_) => "side",
            Emitter::Spin(_) => "spin",
        }
    }
}

#[derive(Clone, Debug)]
pub struct FireEmitter {
    pub counter: u32,
    pub base_hue: u8,
    pub cycle_hue: bool,
}

impl Default for FireEmitter {
    fn default() -> Self {
        Self {
            counter: 0,
            base_hue: config::FIRE_BASE_HUE,
            cycle_hue: false,
        }
    }
}

impl FireEmitter {
    pub fn new(base_hue: u8) -> Self {
        Self {
            base_hue,
            ..Default::default()
        }
    }

    fn emit(&mut self, particle: &mut Particle, physics: &Physics, rng: &mut impl Entropy) {
        let matrix = &physics.matrix;
        self.counter = self.counter.wrapping_add(1);
        if self.cycle_hue {
            self.base_hue = ((self.counter >> 2) % config::FIRE_HUE_CYCLE) as u8;
        }

        let quarter = matrix.max_x() >> 2;
        if self.counter % 2 == 0 {
            // Narrow, short flames around the middle.
            particle.x = rng.random_range(quarter, 3 * quarter);
            let (min, max) = match fire_band(particle.x, matrix.width()) {
                3 | 4 => (25, 28),
                2 | 5 => (15, 21),
                1 | 6 => (5, 14),
                _ => (1, 7),
            };
            particle.ttl = rng.random_range(min, max) as u8;
            particle.hue = self.base_hue.wrapping_add(config::FIRE_HUE_OFFSET);
        } else {
            particle.x = rng.random_below(matrix.max_x());
            let (min, max) = match fire_band(particle.x, matrix.width()) {
                3 | 4 => (40, 100),
                2 | 5 => (20, 70),
                1 | 6 => (5, 40),
                _ => (1, 20),
            };
            particle.ttl = rng.random_range(min, max) as u8;
            particle.hue = self.base_hue;
        }

        particle.y = 1;
        particle.vx = 0;
        particle.vy = 0;
        particle.alive = true;
    }
}

/// Which eighth of the width `x` falls in; bands mirror around the center.
pub fn fire_band(x: i32, width: i32) -> i32 {
    if width <= 0 {
        return 0;
    }
    (x * 8 / width).clamp(0, 7)
}

#[derive(Clone, Debug)]
pub struct FixedEmitter {
    pub x: i32,
    pub y: i32,
    pub vx: i32,
    pub vy: i32,
    pub ttl: u8,
    pub counter: u32,
}

impl FixedEmitter {
    pub fn new(x: i32, y: i32, vx: i32, vy: i32, ttl: u8) -> Self {
        Self {
            x,
            y,
            vx,
            vy,
            ttl,
            counter: 0,
        }
    }

    fn emit(&mut self, particle: &mut Particle) {
        self.counter = self.counter.wrapping_add(1);

        particle.x = self.x;
        particle.y = self.y;
        particle.vx = self.vx;
        particle.vy = self.vy;
        particle.ttl = self.ttl;
        particle.hue = (self.counter % config::FIXED_HUE_CYCLE) as u8;
        particle.alive = true;
    }
}

#[derive(Clone, Debug)]
pub struct FountainEmitter {
    pub vx: i32,
    pub vy: i32,
    /// Width of the uniform velocity jitter, centered on the base velocity.
    pub var: i32,
    pub source: Particle,
    pub min_life: u8,
    pub max_life: u8,
    pub counter: u32,
}

impl FountainEmitter {
    pub fn new(vx: i32, vy: i32, var: i32, source: Particle) -> Self {
        Self {
            vx,
            vy,
            var,
            source,
            min_life: config::FOUNTAIN_MIN_LIFE,
            max_life: config::FOUNTAIN_MAX_LIFE,
            counter: 0,
        }
    }

    fn update(&mut self, physics: &Physics, rng: &mut impl Entropy) {
        self.source.update(physics, rng);
    }

    // The source steps again on every emit, so it travels faster while spawning.
    fn emit(&mut self, particle: &mut Particle, physics: &Physics, rng: &mut impl Entropy) {
        self.counter = self.counter.wrapping_add(1);
        self.source.update(physics, rng);

        let half_var = self.var >> 1;
        particle.x = self.source.x;
        particle.y = self.source.y;
        particle.vx = self.vx + rng.random_below(self.var) - half_var;
        particle.vy = self.vy + rng.random_below(self.var) - half_var;
        particle.ttl = rng.random_range(self.min_life as i32, self.max_life as i32) as u8;
        particle.hue = (self.counter % 255) as u8;
        particle.alive = true;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl Side {
    pub const ALL: [Self; 4] = [Self::Top, Self::Right, Self::Bottom, Self::Left];

    pub fn parse_cli(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "t" | "top" => Some(Self::Top),
            "r" | "right" => Some(Self::Right),
            "b" | "bottom" => Some(Self::Bottom),
            "l" | "left" => Some(Self::Left),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Right => "right",
            Self::Bottom => "bottom",
            Self::Left => "left",
        }
    }
}

#[derive(Clone, Debug)]
pub struct SideEmitter {
    pub side: Side,
    pub base_hue: u8,
    pub max_ttl: u8,
    pub counter: u32,
}

impl SideEmitter {
    pub fn new(side: Side) -> Self {
        Self {
            side,
            base_hue: config::SIDE_BASE_HUE,
            max_ttl: config::SIDE_MAX_TTL,
            counter: 0,
        }
    }

    fn emit(&mut self, particle: &mut Particle, physics: &Physics, rng: &mut impl Entropy) {
        let matrix = &physics.matrix;
        self.counter = self.counter.wrapping_add(1);

        match self.side {
            Side::Top => {
                particle.x = rng.random_below(matrix.max_x());
                particle.y = matrix.max_y() - matrix.radius;
            }
            Side::Right => {
                particle.x = matrix.max_x() - matrix.radius;
                particle.y = rng.random_below(matrix.max_y());
            }
            Side::Bottom => {
                particle.x = rng.random_below(matrix.max_x());
                particle.y = 1;
            }
            Side::Left => {
                particle.x = 1;
                particle.y = rng.random_below(matrix.max_y());
            }
        }

        particle.vx = 0;
        particle.vy = 0;
        particle.ttl = rng.random_range(1, self.max_ttl as i32) as u8;
        particle.hue = self.base_hue;
        particle.alive = true;
    }
}

#[derive(Clone, Debug)]
pub struct SpinEmitter {
    pub x: i32,
    pub y: i32,
    /// Speed of emitted particles.
    pub radius: i32,
    /// Degrees the emission angle advances per tick.
    pub angular_velocity: i32,
    pub oscillate: bool,
    pub min_ttl: u8,
    pub max_ttl: u8,
    pub counter: u32,
    current_rv: i32,
    direction: i32,
    vx: i32,
    vy: i32,
}

impl SpinEmitter {
    pub fn new(x: i32, y: i32, radius: i32, angular_velocity: i32) -> Self {
        Self {
            x,
            y,
            radius,
            angular_velocity,
            oscillate: false,
            min_ttl: config::SPIN_MIN_TTL,
            max_ttl: config::SPIN_MAX_TTL,
            counter: 0,
            current_rv: angular_velocity,
            direction: -1,
            vx: 0,
            vy: 0,
        }
    }

    pub fn oscillating(mut self) -> Self {
        self.oscillate = true;
        self
    }

    /// Change the base rate and restart any oscillation from it.
    pub fn set_angular_velocity(&mut self, angular_velocity: i32) {
        self.angular_velocity = angular_velocity;
        self.current_rv = angular_velocity;
        self.direction = -1;
    }

    /// Angular velocity currently in effect, after oscillation.
    pub fn current_rv(&self) -> i32 {
        self.current_rv
    }

    pub fn velocity(&self) -> (i32, i32) {
        (self.vx, self.vy)
    }

    fn update(&mut self) {
        self.counter = self.counter.wrapping_add(1);

        if self.oscillate && self.counter % config::SPIN_OSCILLATE_PERIOD == 0 {
            self.current_rv += self.direction;
            if self.current_rv.abs() > self.angular_velocity.abs() {
                self.direction = -self.direction;
            }
        }

        let mut degrees = (-(self.counter as i64) * self.current_rv as i64).rem_euclid(360);
        if self.counter % 2 == 1 {
            degrees += 180;
        }
        let angle = (degrees as f32).to_radians();
        self.vx = (self.radius as f32 * angle.cos()).round() as i32;
        self.vy = (self.radius as f32 * angle.sin()).round() as i32;
    }

    fn emit(&mut self, particle: &mut Particle, rng: &mut impl Entropy) {
        particle.x = self.x;
        particle.y = self.y;
        particle.vx = self.vx;
        particle.vy = self.vy;
        particle.ttl = rng.random_range(self.min_ttl as i32, self.max_ttl as i32) as u8;
        particle.hue = ((self.counter >> 1) % 255) as u8;
        particle.alive = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entropy::ScriptedEntropy;
    use crate::particle::ParticleKind;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn stale_particle(kind: ParticleKind) -> Particle {
        Particle {
            kind,
            x: 77,
            y: 66,
            vx: -9,
            vy: 9,
            ttl: 3,
            hue: 200,
            alive: false,
        }
    }

    #[test]
    fn fire_band_splits_width_into_eighths() {
        assert_eq!(fire_band(0, 256), 0);
        assert_eq!(fire_band(31, 256), 0);
        assert_eq!(fire_band(32, 256), 1);
        assert_eq!(fire_band(127, 256), 3);
        assert_eq!(fire_band(128, 256), 4);
        assert_eq!(fire_band(255, 256), 7);
        assert_eq!(fire_band(19, 160), 0);
        assert_eq!(fire_band(20, 160), 1);
    }

    #[test]
    fn fire_alternates_profiles() {
        let physics = Physics::default();
        let mut fire = Emitter::Fire(FireEmitter::new(10));
        let mut p = stale_particle(ParticleKind::FixedDecay);

        // counter 1 (odd): x anywhere, band 3 -> ttl in [40, 100)
        let mut rng = ScriptedEntropy::new(&[100, 99]);
        fire.emit(&mut p, &physics, &mut rng);
        assert_eq!((p.x, p.y, p.ttl, p.hue), (100, 1, 99, 10));
        assert_eq!((p.vx, p.vy), (0, 0));
        assert!(p.alive);
        assert_eq!(p.kind, ParticleKind::FixedDecay);

        // counter 2 (even): x in [63, 189), band 5 -> ttl in [15, 21), hue + 16
        let mut rng = ScriptedEntropy::new(&[170, 15]);
        fire.emit(&mut p, &physics, &mut rng);
        assert_eq!((p.x, p.ttl, p.hue), (170, 15, 26));
    }

    #[test]
    fn fire_lifetimes_respect_band_table() {
        let physics = Physics::default();
        let mut fire = FireEmitter::default();
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let mut p = Particle::new(ParticleKind::FixedDecay);
        for _ in 0..4000 {
            fire.emit(&mut p, &physics, &mut rng);
            let band = fire_band(p.x, physics.matrix.width());
            let even = fire.counter % 2 == 0;
            let range = match (even, band) {
                (true, 3 | 4) => 25..28,
                (true, 2 | 5) => 15..21,
                (true, 1 | 6) => 5..14,
                (true, _) => 1..7,
                (false, 3 | 4) => 40..100,
                (false, 2 | 5) => 20..70,
                (false, 1 | 6) => 5..40,
                (false, _) => 1..20,
            };
            assert!(range.contains(&p.ttl), "ttl {} band {band} even {even}", p.ttl);
            if even {
                assert!((63..189).contains(&p.x));
            } else {
                assert!((0..255).contains(&p.x));
            }
        }
    }

    #[test]
    fn fire_cycles_base_hue_when_enabled() {
        let physics = Physics::default();
        let mut fire = FireEmitter {
            cycle_hue: true,
            ..Default::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut p = Particle::new(ParticleKind::Standard);
        for _ in 0..9 {
            fire.emit(&mut p, &physics, &mut rng);
        }
        assert_eq!(fire.base_hue, 2);
        assert_eq!(p.hue, 2);
    }

    #[test]
    fn fixed_emits_identical_particles_with_cycling_hue() {
        let physics = Physics::default();
        let mut emitter = Emitter::Fixed(FixedEmitter::new(40, 50, 3, -2, 60));
        let mut rng = ScriptedEntropy::new(&[]);
        let mut p = stale_particle(ParticleKind::Bounce);
        emitter.emit(&mut p, &physics, &mut rng);
        assert_eq!((p.x, p.y, p.vx, p.vy, p.ttl, p.hue), (40, 50, 3, -2, 60, 1));
        assert!(p.alive);

        for _ in 0..249 {
            emitter.emit(&mut p, &physics, &mut rng);
        }
        assert_eq!(p.hue, 0, "hue wraps after 250 emits");
    }

    #[test]
    fn fountain_follows_its_source() {
        let physics = Physics::default();
        let source = Particle::moving(ParticleKind::Bounce, 100, 100, 2, 1, 200);
        let mut emitter = Emitter::Fountain(FountainEmitter::new(0, 12, 8, source));
        let mut rng = ScriptedEntropy::new(&[]);

        emitter.update(&physics, &mut rng);
        let Emitter::Fountain(f) = &emitter else {
            unreachable!()
        };
        assert_eq!((f.source.x, f.source.y), (102, 101));

        // emit steps the source again, then draws vx jitter, vy jitter, ttl
        let mut rng = ScriptedEntropy::new(&[7, 0, 120]);
        let mut p = stale_particle(ParticleKind::Standard);
        emitter.emit(&mut p, &physics, &mut rng);
        assert_eq!((p.x, p.y), (104, 102));
        assert_eq!((p.vx, p.vy), (3, 8));
        assert_eq!((p.ttl, p.hue), (120, 1));
        assert!(p.alive);
    }

    #[test]
    fn fountain_lifetime_stays_in_range() {
        let physics = Physics::default();
        let source = Particle::moving(ParticleKind::Attractor, 60, 60, 0, 0, 1);
        let mut fountain = FountainEmitter::new(0, 10, 6, source);
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut p = Particle::new(ParticleKind::Standard);
        for _ in 0..500 {
            fountain.emit(&mut p, &physics, &mut rng);
            assert!((50..250).contains(&p.ttl));
            assert!((-3..3).contains(&p.vx));
            assert!((7..13).contains(&p.vy));
        }
    }

    #[test]
    fn side_spawns_along_selected_edge() {
        let physics = Physics::default();
        let matrix = physics.matrix;
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        for side in Side::ALL {
            let mut emitter = SideEmitter::new(side);
            let mut p = stale_particle(ParticleKind::Standard);
            for _ in 0..200 {
                emitter.emit(&mut p, &physics, &mut rng);
                match side {
                    Side::Top => assert_eq!(p.y, matrix.max_y() - matrix.radius),
                    Side::Right => assert_eq!(p.x, matrix.max_x() - matrix.radius),
                    Side::Bottom => assert_eq!(p.y, 1),
                    Side::Left => assert_eq!(p.x, 1),
                }
                assert!((0..matrix.max_x()).contains(&p.x) || side == Side::Right);
                assert!((1..128).contains(&p.ttl));
                assert_eq!((p.vx, p.vy, p.hue), (0, 0, 128));
                assert!(p.alive);
            }
        }
    }

    #[test]
    fn side_parses_short_and_long_names() {
        assert_eq!(Side::parse_cli("t"), Some(Side::Top));
        assert_eq!(Side::parse_cli("Left"), Some(Side::Left));
        assert_eq!(Side::parse_cli("middle"), None);
    }

    #[test]
    fn spin_arms_point_in_opposite_directions() {
        let mut spin = SpinEmitter::new(128, 128, 10, 0);
        spin.update();
        assert_eq!(spin.velocity(), (-10, 0), "odd tick adds half a turn");
        spin.update();
        assert_eq!(spin.velocity(), (10, 0));
    }

    #[test]
    fn spin_rotates_by_angular_velocity() {
        let mut spin = SpinEmitter::new(128, 128, 20, 45);
        spin.update();
        spin.update();
        // counter 2: -(2 * 45) = -90 degrees
        let (vx, vy) = spin.velocity();
        assert_eq!(vx, 0);
        assert_eq!(vy, -20);
    }

    #[test]
    fn retuned_spin_uses_new_rate_immediately() {
        let mut spin = SpinEmitter::new(128, 128, 20, 3);
        spin.set_angular_velocity(45);
        assert_eq!(spin.current_rv(), 45);
        spin.update();
        spin.update();
        assert_eq!(spin.velocity(), (0, -20));
    }

    #[test]
    fn spin_oscillation_reverses_past_magnitude() {
        let mut spin = SpinEmitter::new(0, 0, 5, 2).oscillating();
        let mut seen = Vec::new();
        for _ in 0..200 {
            spin.update();
            if spin.counter % config::SPIN_OSCILLATE_PERIOD == 0 {
                seen.push(spin.current_rv());
            }
        }
        assert_eq!(&seen[..6], &[1, 0, -1, -2, -3, -2]);
        assert!(seen.iter().all(|rv| rv.abs() <= 3));
    }

    #[test]
    fn spin_emits_at_pivot_with_current_velocity() {
        let physics = Physics::default();
        let mut emitter = Emitter::Spin(SpinEmitter::new(90, 80, 10, 0));
        let mut rng = ScriptedEntropy::new(&[]);
        for _ in 0..4 {
            emitter.update(&physics, &mut rng);
        }
        let mut rng = ScriptedEntropy::new(&[42]);
        let mut p = stale_particle(ParticleKind::Standard);
        emitter.emit(&mut p, &physics, &mut rng);
        assert_eq!((p.x, p.y, p.vx, p.vy), (90, 80, 10, 0));
        assert_eq!((p.ttl, p.hue), (42, 2));
        assert!(p.alive);
    }
}
