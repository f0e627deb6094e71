//! Command-line arguments shared by the preview and headless binaries.

use std::path::PathBuf;

use clap::Args;

use crate::effects::Effect;
use crate::error::Result;
use crate::matrix::FrameDecay;
use crate::preset::Preset;

/// Preset selection and overrides. Each binary flattens this into its own
/// `clap::Parser`.
#[derive(Args, Clone, Debug, Default, PartialEq)]
pub struct CliOptions {
    /// Load a JSON preset file
    #[arg(long, value_name = "FILE")]
    pub preset: Option<PathBuf>,

    /// Effect to run (fire, fountain, spin, rain, sparkle, swarm)
    #[arg(long)]
    pub effect: Option<Effect>,

    /// Matrix size in cells, e.g. 8x8
    #[arg(long, value_name = "WxH", value_parser = parse_size)]
    pub size: Option<(i32, i32)>,

    /// RNG seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Frame decay: persist, clear, halve or linear:<n>
    #[arg(long)]
    pub decay: Option<FrameDecay>,

    /// Display brightness, 0-255
    #[arg(long)]
    pub brightness: Option<u8>,
}

impl CliOptions {
    /// Start from the preset file (or the default preset) and layer flags on top.
    pub fn to_preset(&self) -> Result<Preset> {
        let mut preset = match &self.preset {
            Some(path) => Preset::load(path)?,
            None => Preset::default(),
        };
        if let Some(effect) = self.effect {
            preset.effect = effect;
        }
        if let Some((cells_x, cells_y)) = self.size {
            preset.matrix.cells_x = cells_x;
            preset.matrix.cells_y = cells_y;
        }
        if let Some(seed) = self.seed {
            preset.seed = seed;
        }
        if let Some(decay) = self.decay {
            preset.decay = Some(decay);
        }
        if let Some(brightness) = self.brightness {
            preset.brightness = brightness;
        }
        Ok(preset)
    }
}

fn parse_size(value: &str) -> std::result::Result<(i32, i32), String> {
    let lower = value.to_ascii_lowercase();
    let invalid = || format!("expected <cols>x<rows> with both above zero, got '{value}'");
    let (w, h) = lower.split_once('x').ok_or_else(invalid)?;
    let w: i32 = w.trim().parse().map_err(|_| invalid())?;
    let h: i32 = h.trim().parse().map_err(|_| invalid())?;
    if w > 0 && h > 0 {
        Ok((w, h))
    } else {
        Err(invalid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct TestCli {
        #[command(flatten)]
        opts: CliOptions,
    }

    fn parse(args: &[&str]) -> std::result::Result<CliOptions, clap::Error> {
        TestCli::try_parse_from(std::iter::once("sparkmatrix").chain(args.iter().copied()))
            .map(|cli| cli.opts)
    }

    #[test]
    fn parses_every_flag() {
        let opts = parse(&[
            "--effect", "spin", "--size", "5x6", "--seed", "12", "--decay", "linear:20",
            "--brightness", "90",
        ])
        .unwrap();
        assert_eq!(opts.effect, Some(Effect::Spin));
        assert_eq!(opts.size, Some((5, 6)));
        assert_eq!(opts.seed, Some(12));
        assert_eq!(opts.decay, Some(FrameDecay::Linear(20)));
        assert_eq!(opts.brightness, Some(90));
        assert_eq!(opts.preset, None);
    }

    #[test]
    fn accepts_equals_form() {
        let opts = parse(&["--seed=3", "--effect=Rain", "--size=16X4"]).unwrap();
        assert_eq!(opts.seed, Some(3));
        assert_eq!(opts.effect, Some(Effect::Rain));
        assert_eq!(opts.size, Some((16, 4)));
    }

    #[test]
    fn flags_override_default_preset() {
        let opts = parse(&["--effect", "rain", "--size", "16x4"]).unwrap();
        let preset = opts.to_preset().unwrap();
        assert_eq!(preset.effect, Effect::Rain);
        assert_eq!((preset.matrix.cells_x, preset.matrix.cells_y), (16, 4));
        assert_eq!(preset.matrix.radius, crate::config::SUBCELL_RADIUS);
    }

    #[test]
    fn rejects_bad_input() {
        use clap::error::ErrorKind;

        assert_eq!(
            parse(&["--effect", "plasma"]).unwrap_err().kind(),
            ErrorKind::ValueValidation
        );
        assert_eq!(
            parse(&["--size", "0x4"]).unwrap_err().kind(),
            ErrorKind::ValueValidation
        );
        assert_eq!(
            parse(&["--brightness", "300"]).unwrap_err().kind(),
            ErrorKind::ValueValidation
        );
        assert!(parse(&["--seed"]).is_err());
        assert_eq!(
            parse(&["--frobnicate", "1"]).unwrap_err().kind(),
            ErrorKind::UnknownArgument
        );
    }

    #[test]
    fn size_parser_rejects_malformed_values() {
        assert_eq!(parse_size("8x8"), Ok((8, 8)));
        assert_eq!(parse_size(" 3 x 2 "), Ok((3, 2)));
        assert!(parse_size("8").is_err());
        assert!(parse_size("axb").is_err());
        assert!(parse_size("-2x4").is_err());
    }
}
