//! Color palettes: 256 entries, indexed by the color records.

use crate::graphics::Color;

/// Indexed color table.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    pub const SIZE: usize = 256;

    /// Color at `index`; out-of-range indices read as black.
    #[inline]
    pub fn get(&self, index: usize) -> Color {
        self.colors.get(index).copied().unwrap_or(Color::BLACK)
    }

    /// Replace the entry at `index`. Writes beyond the table are ignored and
    /// reported as `false`.
    pub fn set(&mut self, index: usize, color: Color) -> bool {
        match self.colors.get_mut(index) {
            Some(slot) => {
                *slot = color;
                true
            },
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Built-in table shared by both format generations: the 16 EGA colors,
    /// a 16-step gray ramp, a 6×6×6 color cube and 8 trailing grays.
    pub fn default_palette() -> Self {
        const EGA: [(u8, u8, u8); 16] = [
            (0x00, 0x00, 0x00),
            (0x00, 0x00, 0x7F),
            (0x00, 0x7F, 0x00),
            (0x00, 0x7F, 0x7F),
            (0x7F, 0x00, 0x00),
            (0x7F, 0x00, 0x7F),
            (0x7F, 0x7F, 0x00),
            (0xC0, 0xC0, 0xC0),
            (0x7F, 0x7F, 0x7F),
            (0x00, 0x00, 0xFF),
            (0x00, 0xFF, 0x00),
            (0x00, 0xFF, 0xFF),
            (0xFF, 0x00, 0x00),
            (0xFF, 0x00, 0xFF),
            (0xFF, 0xFF, 0x00),
            (0xFF, 0xFF, 0xFF),
        ];

        let mut colors = Vec::with_capacity(Self::SIZE);
        colors.extend(EGA.iter().map(|&(r, g, b)| Color::rgb(r, g, b)));
        colors.extend((0..16u8).map(|i| Color::rgb(i * 17, i * 17, i * 17)));
        for r in 0..6u8 {
            for g in 0..6u8 {
                for b in 0..6u8 {
                    colors.push(Color::rgb(r * 51, g * 51, b * 51));
                }
            }
        }
        colors.extend((0..8u8).map(|i| {
            let level = 0x20 + i * 0x1C;
            Color::rgb(level, level, level)
        }));
        Self { colors }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::default_palette()
    }
}
