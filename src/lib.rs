//! Particle-driven visual effects for small RGB LED matrices.
//!
//! A [`ParticleSystem`] keeps a fixed pool of particles fed by one
//! [`Emitter`]; a [`LedMatrix`] splats the pool into an RGB grid each frame.
//! [`Engine`] bundles both with a seeded RNG, and [`Effect`] builds the stock
//! effects.
//!
//! ```no_run
//! use sparkmatrix::{Effect, MatrixConfig};
//!
//! let mut engine = Effect::Fire.build(MatrixConfig::default(), 42);
//! loop {
//!     engine.tick();
//!     for row in engine.frame().rows() {
//!         // hand the row to the display driver
//!         let _ = row;
//!     }
//! }
//! ```

pub mod cli;
pub mod color;
pub mod config;
pub mod effects;
pub mod emitter;
pub mod engine;
pub mod entropy;
pub mod error;
pub mod matrix;
pub mod particle;
pub mod preset;
pub mod system;

pub use color::{hsv_to_rgb, Hsv, Rgb};
pub use config::MatrixConfig;
pub use effects::Effect;
pub use emitter::{Emitter, FireEmitter, FixedEmitter, FountainEmitter, Side, SideEmitter, SpinEmitter};
pub use engine::Engine;
pub use entropy::Entropy;
pub use error::{Result, SparkError};
pub use matrix::{FrameDecay, LedMatrix};
pub use particle::{Acceleration, AttractorParams, Particle, ParticleKind, Physics};
pub use preset::Preset;
pub use system::ParticleSystem;
