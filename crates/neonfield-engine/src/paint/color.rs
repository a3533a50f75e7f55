/// Straight (non-premultiplied) RGB with channels normalized to `[0, 1]`.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Splits a `0xRRGGBB` literal into channels, each mapped to `channel / 255`.
    #[inline]
    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
        Self::new(channel(16), channel(8), channel(0))
    }

    #[inline]
    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// Attaches an opacity, producing a premultiplied color.
    #[inline]
    pub fn with_alpha(self, a: f32) -> Color {
        Color::from_straight(self.r, self.g, self.b, a)
    }
}

/// Linear premultiplied RGBA color.
///
/// Invariant: `r`, `g`, `b` are already multiplied by `a`.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32, // premultiplied
    pub g: f32, // premultiplied
    pub b: f32, // premultiplied
    pub a: f32,
}

impl Color {
    #[inline]
    pub const fn transparent() -> Self {
        Self { r: 0.0, g: 0.0, b: 0.0, a: 0.0 }
    }

    #[inline]
    pub const fn from_premul(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a premultiplied color from straight alpha components.
    #[inline]
    pub fn from_straight(r: f32, g: f32, b: f32, a: f32) -> Self {
        let a = a.clamp(0.0, 1.0);
        Self {
            r: r.clamp(0.0, 1.0) * a,
            g: g.clamp(0.0, 1.0) * a,
            b: b.clamp(0.0, 1.0) * a,
            a,
        }
    }

    /// Opaque color from a `0xRRGGBB` literal.
    #[inline]
    pub fn from_hex(hex: u32) -> Self {
        Rgb::from_hex(hex).with_alpha(1.0)
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    #[inline]
    pub fn to_wgpu(self) -> wgpu::Color {
        wgpu::Color {
            r: self.r as f64,
            g: self.g as f64,
            b: self.b as f64,
            a: self.a as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_channels_are_divided_by_255() {
        let c = Rgb::from_hex(0x00f3ff);
        assert_eq!(c.r, 0.0);
        assert_eq!(c.g, 243.0 / 255.0);
        assert_eq!(c.b, 1.0);
    }

    #[test]
    fn hex_ignores_bits_above_rgb() {
        assert_eq!(Rgb::from_hex(0xff0066ff), Rgb::from_hex(0x0066ff));
    }

    #[test]
    fn with_alpha_premultiplies() {
        let c = Rgb::from_hex(0xff00ff).with_alpha(0.5);
        assert_eq!(c, Color::from_premul(0.5, 0.0, 0.5, 0.5));
    }

    #[test]
    fn from_straight_clamps_out_of_range() {
        let c = Color::from_straight(2.0, -1.0, 0.5, 1.5);
        assert_eq!(c, Color::from_premul(1.0, 0.0, 0.5, 1.0));
    }
}
