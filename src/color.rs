//! RGB colors with fractional channels.
//!
//! Channels live in `[0, 255]` but are stored as `f32` so a color can creep
//! toward its target a fraction at a time without rounding stalls.

/// An RGB color, each channel in `[0, 255]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255.0, 255.0, 255.0);
    pub const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Color from a packed `0xRRGGBB` value.
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as f32,
            g: ((hex >> 8) & 0xff) as f32,
            b: (hex & 0xff) as f32,
        }
    }

    /// Move every channel `t` of the way toward `target`.
    ///
    /// With `t` in `[0, 1]` the result stays between `self` and `target`
    /// channel by channel.
    #[inline]
    pub fn approach(self, target: Rgb, t: f32) -> Rgb {
        Rgb {
            r: self.r + (target.r - self.r) * t,
            g: self.g + (target.g - self.g) * t,
            b: self.b + (target.b - self.b) * t,
        }
    }

    /// Rounded and clamped 8-bit channels.
    pub fn to_rgb8(self) -> [u8; 3] {
        [channel_u8(self.r), channel_u8(self.g), channel_u8(self.b)]
    }

    /// Channels as an array, in RGB order.
    pub fn channels(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// Color from HSL.
    ///
    /// * `hue` - degrees, wraps around 360
    /// * `saturation` - 0.0 (gray) to 1.0 (vivid)
    /// * `lightness` - 0.0 (black) to 1.0 (white)
    pub fn from_hsl(hue: f32, saturation: f32, lightness: f32) -> Rgb {
        let h = hue.rem_euclid(360.0) / 60.0;
        let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let m = lightness - c / 2.0;

        let (r, g, b) = match h as u32 % 6 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        Rgb::new((r + m) * 255.0, (g + m) * 255.0, (b + m) * 255.0)
    }
}

#[inline]
fn channel_u8(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex() {
        let c = Rgb::from_hex(0x00f3ff);
        assert_eq!(c, Rgb::new(0.0, 243.0, 255.0));
    }

    #[test]
    fn test_approach_stays_between() {
        let start = Rgb::new(0.0, 200.0, 100.0);
        let target = Rgb::new(255.0, 0.0, 100.0);
        let mut c = start;
        for _ in 0..200 {
            c = c.approach(target, 0.05);
            assert!(c.r >= 0.0 && c.r <= 255.0);
            assert!(c.g >= 0.0 && c.g <= 200.0);
            assert_eq!(c.b, 100.0);
        }
        assert!((c.r - 255.0).abs() < 0.01);
    }

    #[test]
    fn test_hsl_primaries() {
        let red = Rgb::from_hsl(0.0, 1.0, 0.5).to_rgb8();
        assert_eq!(red, [255, 0, 0]);
        let blue = Rgb::from_hsl(240.0, 1.0, 0.5).to_rgb8();
        assert_eq!(blue, [0, 0, 255]);
    }

    #[test]
    fn test_to_rgb8_clamps() {
        assert_eq!(Rgb::new(-3.0, 300.0, 127.6).to_rgb8(), [0, 255, 128]);
    }
}
