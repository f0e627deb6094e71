use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Scale all channels by `brightness / 255`.
    pub fn scaled(self, brightness: u8) -> Self {
        let scale = |c: u8| ((c as u16 * brightness as u16) / 255) as u8;
        Self::new(scale(self.r), scale(self.g), scale(self.b))
    }

    pub fn sum(self) -> u32 {
        self.r as u32 + self.g as u32 + self.b as u32
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hsv {
    pub h: u8,
    pub s: u8,
    pub v: u8,
}

impl Hsv {
    pub const fn new(h: u8, s: u8, v: u8) -> Self {
        Self { h, s, v }
    }

    /// Fully saturated, full brightness.
    pub const fn hue(h: u8) -> Self {
        Self::new(h, 255, 255)
    }
}

/// Hue-sector conversion.
///
/// Hue is scaled by 1/256 so the sector index stays in 0..=5; saturation and
/// value are scaled by 1/255 so full value comes back as exactly 255.
pub fn hsv_to_rgb(hsv: Hsv) -> Rgb {
    let v = hsv.v as f32 / 255.0;
    if hsv.s == 0 {
        let grey = (v * 255.0) as u8;
        return Rgb::new(grey, grey, grey);
    }

    let s = hsv.s as f32 / 255.0;
    let h = hsv.h as f32 / 256.0 * 6.0;
    let sector = h as u8;
    let f = h - sector as f32;

    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    let (r, g, b) = match sector {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    Rgb::new((r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_hues_match_sector_table() {
        assert_eq!(hsv_to_rgb(Hsv::hue(0)), Rgb::new(255, 0, 0));
        // sector 1: (q, v, p)
        assert_eq!(hsv_to_rgb(Hsv::hue(85)), Rgb::new(1, 255, 0));
        // sector 3: (p, q, v)
        assert_eq!(hsv_to_rgb(Hsv::hue(170)), Rgb::new(0, 3, 255));
    }

    #[test]
    fn every_sector_is_reachable() {
        // 256 / 6 ~= 42.67 hue steps per sector
        let table = [
            (0, Rgb::new(255, 0, 0)),
            (64, Rgb::new(127, 255, 0)),
            (128, Rgb::new(0, 255, 255)),
            (192, Rgb::new(127, 0, 255)),
            (224, Rgb::new(255, 0, 191)),
        ];
        for (hue, expected) in table {
            assert_eq!(hsv_to_rgb(Hsv::hue(hue)), expected, "hue {hue}");
        }
    }

    #[test]
    fn zero_saturation_is_grey() {
        assert_eq!(hsv_to_rgb(Hsv::new(40, 0, 255)), Rgb::new(255, 255, 255));
        assert_eq!(hsv_to_rgb(Hsv::new(200, 0, 0)), Rgb::BLACK);
    }

    #[test]
    fn every_hue_keeps_one_channel_saturated() {
        for hue in 0..=255u8 {
            let rgb = hsv_to_rgb(Hsv::hue(hue));
            assert_eq!(rgb.r.max(rgb.g).max(rgb.b), 255, "hue {hue}");
            assert_eq!(rgb.r.min(rgb.g).min(rgb.b), 0, "hue {hue}");
        }
    }

    #[test]
    fn brightness_scales_channels() {
        let c = Rgb::new(255, 128, 0);
        assert_eq!(c.scaled(255), c);
        assert_eq!(c.scaled(0), Rgb::BLACK);
        assert_eq!(c.scaled(128), Rgb::new(128, 64, 0));
    }
}
