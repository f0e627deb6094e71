use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::{self, MatrixConfig};
use crate::effects::Effect;
use crate::engine::Engine;
use crate::error::{Result, SparkError};
use crate::matrix::FrameDecay;
use crate::particle::{Acceleration, AttractorParams};

/// Front-end description of what to run: an effect plus optional overrides of
/// its built-in tunables. Missing fields keep the effect's defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preset {
    pub effect: Effect,
    pub matrix: MatrixConfig,
    pub seed: u64,
    pub brightness: u8,
    pub per_cycle: Option<u8>,
    pub decay: Option<FrameDecay>,
    pub overflow: Option<bool>,
    pub standard: Option<Acceleration>,
    pub bounce: Option<Acceleration>,
    pub attractor: Option<AttractorParams>,
    pub decay_factor: Option<u8>,
}

impl Default for Preset {
    fn default() -> Self {
        Self {
            effect: Effect::Fire,
            matrix: MatrixConfig::default(),
            seed: config::DEFAULT_SEED,
            brightness: config::DEFAULT_BRIGHTNESS,
            per_cycle: None,
            decay: None,
            overflow: None,
            standard: None,
            bounce: None,
            attractor: None,
            decay_factor: None,
        }
    }
}

impl Preset {
    pub fn new(effect: Effect) -> Self {
        Self {
            effect,
            ..Default::default()
        }
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SparkError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let preset = Self::from_json(&text)?;
        log::info!(
            "loaded preset {} ({})",
            path.display(),
            preset.effect.label()
        );
        Ok(preset)
    }

    /// Build the effect, then apply every override that is set.
    pub fn build(&self) -> Engine {
        let mut engine = self.effect.build(self.matrix, self.seed);
        if let Some(per_cycle) = self.per_cycle {
            engine.system.set_per_cycle(per_cycle);
        }
        if let Some(decay) = self.decay {
            engine.decay = decay;
        }
        if let Some(overflow) = self.overflow {
            engine.matrix.overflow = overflow;
        }
        if let Some(standard) = self.standard {
            engine.physics.standard = standard;
        }
        if let Some(bounce) = self.bounce {
            engine.physics.bounce = bounce;
        }
        if let Some(attractor) = self.attractor {
            engine.physics.attractor = attractor;
        }
        if let Some(decay_factor) = self.decay_factor {
            engine.physics.decay_factor = decay_factor;
        }
        engine
    }
}
