use std::path::{Path, PathBuf};

use sparkmatrix::{Effect, Engine, Preset, Result, SparkError};

/// Everything the preview window mutates: the running engine, the preset it
/// came from and the playback controls.
pub struct PreviewState {
    pub engine: Engine,
    pub preset: Preset,
    pub paused: bool,
    pub speed_multiplier: f32,
    pub step_requested: bool,
    pub save_path: PathBuf,
}

impl PreviewState {
    pub fn new(preset: Preset) -> Self {
        let engine = preset.build();
        Self {
            engine,
            preset,
            paused: false,
            speed_multiplier: 1.0,
            step_requested: false,
            save_path: PathBuf::from("sparkmatrix_preset.json"),
        }
    }

    /// Switch to another stock effect, dropping the previous overrides.
    pub fn select_effect(&mut self, effect: Effect) {
        if effect == self.preset.effect {
            return;
        }
        let mut preset = Preset::new(effect);
        preset.matrix = self.preset.matrix;
        preset.seed = self.preset.seed;
        preset.brightness = self.preset.brightness;
        self.preset = preset;
        self.rebuild();
    }

    /// Restart the current preset from tick 0.
    pub fn rebuild(&mut self) {
        self.engine = self.preset.build();
        log::debug!("rebuilt {} (seed {})", self.preset.effect.label(), self.preset.seed);
    }

    /// Fold the live engine tunables back into the preset so it can be saved
    /// or rebuilt without losing panel edits.
    pub fn capture_overrides(&mut self) {
        let engine = &self.engine;
        self.preset.per_cycle = Some(engine.system.per_cycle());
        self.preset.decay = Some(engine.decay);
        self.preset.overflow = Some(engine.matrix.overflow);
        self.preset.standard = Some(engine.physics.standard);
        self.preset.bounce = Some(engine.physics.bounce);
        self.preset.attractor = Some(engine.physics.attractor);
        self.preset.decay_factor = Some(engine.physics.decay_factor);
    }

    pub fn save_preset(&mut self) -> Result<()> {
        self.capture_overrides();
        let path = self.save_path.clone();
        write_preset(&self.preset, &path)?;
        log::info!("saved preset to {}", path.display());
        Ok(())
    }
}

fn write_preset(preset: &Preset, path: &Path) -> Result<()> {
    std::fs::write(path, preset.to_json()?).map_err(|source| SparkError::Io {
        path: path.to_path_buf(),
        source,
    })
}
