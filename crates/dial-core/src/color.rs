//! Colors with straight (non-premultiplied) alpha.

use ratatui::style::Color;

/// An RGBA color with each channel in 0.0-1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Rgba = Rgba::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Rgba = Rgba::new(1.0, 1.0, 1.0, 1.0);
    pub const RED: Rgba = Rgba::new(1.0, 0.0, 0.0, 1.0);
    pub const GREEN: Rgba = Rgba::new(0.0, 1.0, 0.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Build a color from a packed `0xAARRGGBB` value.
    pub const fn from_argb(argb: u32) -> Self {
        Self {
            a: ((argb >> 24) & 0xFF) as f32 / 255.0,
            r: ((argb >> 16) & 0xFF) as f32 / 255.0,
            g: ((argb >> 8) & 0xFF) as f32 / 255.0,
            b: (argb & 0xFF) as f32 / 255.0,
        }
    }

    /// Convert HSV to RGB. Hue is in degrees and is wrapped into 0-360.
    pub fn hsv(hue: f32, saturation: f32, value: f32, alpha: f32) -> Self {
        let h = wrap_degrees(hue) / 60.0;
        let s = saturation.clamp(0.0, 1.0);
        let v = value.clamp(0.0, 1.0);

        let r = hsv_channel(5.0, h, s, v);
        let g = hsv_channel(3.0, h, s, v);
        let b = hsv_channel(1.0, h, s, v);

        Self::new(r, g, b, alpha.clamp(0.0, 1.0))
    }

    /// Same color with its alpha replaced.
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            a: alpha.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Same color with its alpha multiplied by `factor`.
    pub fn scale_alpha(self, factor: f32) -> Self {
        self.with_alpha(self.a * factor)
    }

    /// Component-wise linear interpolation, `t` clamped to 0.0-1.0.
    pub fn lerp(self, other: Rgba, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }

    /// 8-bit RGB triple, ignoring alpha.
    pub fn to_rgb8(self) -> (u8, u8, u8) {
        (
            (self.r.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.g.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.b.clamp(0.0, 1.0) * 255.0).round() as u8,
        )
    }
}

impl From<Rgba> for Color {
    fn from(c: Rgba) -> Self {
        let (r, g, b) = c.to_rgb8();
        Color::Rgb(r, g, b)
    }
}

/// Wrap an angle in degrees into 0.0..360.0.
pub fn wrap_degrees(deg: f32) -> f32 {
    let wrapped = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

fn hsv_channel(n: f32, h: f32, s: f32, v: f32) -> f32 {
    let k = (n + h) % 6.0;
    v - v * s * k.min(4.0 - k).clamp(0.0, 1.0)
}
