/// RGBA color as stored in WPG palettes and color records.
///
/// `alpha` follows the file convention: it is a transparency value, so 0 is
/// fully opaque and 255 is almost fully transparent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    /// Opaque color from its components
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha: 0,
        }
    }

    pub const fn rgba(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Opacity in `0.0..=1.0` derived from the transparency byte.
    #[inline]
    pub fn opacity(&self) -> f64 {
        1.0 - f64::from(self.alpha) / 256.0
    }

    #[inline]
    pub fn is_opaque(&self) -> bool {
        self.alpha == 0
    }
}
