///
/// Representation of a colour as floating-point RGBA components
///
/// Components are not clamped: arithmetic may take them outside the 0-1 range and it's up to the
/// renderer to clamp them when they're uploaded.
///
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32
}

impl Default for Color {
    fn default() -> Color {
        Color::rgba(0.0, 0.0, 0.0, 0.0)
    }
}

impl Color {
    ///
    /// Creates a colour from floating point components
    ///
    #[inline]
    pub fn rgba(r: f32, g: f32, b: f32, a: f32) -> Color {
        Color { r, g, b, a }
    }

    ///
    /// Creates an opaque colour from floating point components
    ///
    #[inline]
    pub fn rgb(r: f32, g: f32, b: f32) -> Color {
        Color::rgba(r, g, b, 1.0)
    }

    ///
    /// Creates a colour from 8-bit components
    ///
    pub fn rgba8(r: u8, g: u8, b: u8, a: u8) -> Color {
        Color::rgba((r as f32)/255.0, (g as f32)/255.0, (b as f32)/255.0, (a as f32)/255.0)
    }

    ///
    /// Creates a colour from hue, saturation and lightness (hue in turns, 0-1)
    ///
    pub fn hsla(h: f32, s: f32, l: f32, a: f32) -> Color {
        let h = h % 1.0;
        let h = if h < 0.0 { h + 1.0 } else { h };
        let s = s.max(0.0).min(1.0);
        let l = l.max(0.0).min(1.0);

        let m2 = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let m1 = 2.0 * l - m2;

        Color::rgba(
            Self::hue(h + 1.0/3.0, m1, m2).max(0.0).min(1.0),
            Self::hue(h, m1, m2).max(0.0).min(1.0),
            Self::hue(h - 1.0/3.0, m1, m2).max(0.0).min(1.0),
            a)
    }

    fn hue(h: f32, m1: f32, m2: f32) -> f32 {
        let h = if h < 0.0 { h + 1.0 } else if h > 1.0 { h - 1.0 } else { h };

        if h < 1.0/6.0 {
            m1 + (m2 - m1) * h * 6.0
        } else if h < 3.0/6.0 {
            m2
        } else if h < 4.0/6.0 {
            m1 + (m2 - m1) * (2.0/3.0 - h) * 6.0
        } else {
            m1
        }
    }

    ///
    /// Returns this colour as RGBA components
    ///
    pub fn to_rgba(&self) -> (f32, f32, f32, f32) {
        (self.r, self.g, self.b, self.a)
    }

    ///
    /// Returns a new colour that's the same as this one except with a different alpha value
    ///
    pub fn with_alpha(&self, new_alpha: f32) -> Color {
        Color { a: new_alpha, ..*self }
    }

    ///
    /// Returns a new colour with the alpha value multiplied by a factor
    ///
    pub fn multiply_alpha(&self, factor: f32) -> Color {
        Color { a: self.a * factor, ..*self }
    }

    ///
    /// Linearly interpolates between this colour and another (`amount` is clamped to 0-1)
    ///
    pub fn lerp(&self, other: &Color, amount: f32) -> Color {
        let u   = amount.max(0.0).min(1.0);
        let oneminu = 1.0 - u;

        Color::rgba(
            self.r * oneminu + other.r * u,
            self.g * oneminu + other.g * u,
            self.b * oneminu + other.b * u,
            self.a * oneminu + other.a * u)
    }
}
