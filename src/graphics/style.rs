//! Pen and brush state.

use super::color::Color;
use smallvec::SmallVec;

/// Dash pattern as alternating dash/gap lengths, in multiples of the pen width.
///
/// An empty array means a continuous stroke.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashArray {
    dots: SmallVec<[f64; 8]>,
}

impl DashArray {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_slice(values: &[f64]) -> Self {
        Self {
            dots: SmallVec::from_slice(values),
        }
    }

    pub fn push(&mut self, length: f64) {
        self.dots.push(length);
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.dots
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.dots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.dots.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    /// Position along the gradient axis, `0.0..=1.0`
    pub offset: f64,
    pub color: Color,
}

/// Linear gradient. `angle` is in degrees, counter-clockwise.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Gradient {
    pub angle: f64,
    pub stops: Vec<GradientStop>,
}

impl Gradient {
    pub fn add_stop(&mut self, offset: f64, color: Color) {
        self.stops.push(GradientStop { offset, color });
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.stops.len()
    }

    pub fn clear(&mut self) {
        self.stops.clear();
    }
}

/// Stroke state. Widths are in inches.
#[derive(Debug, Clone, PartialEq)]
pub struct Pen {
    pub fore_color: Color,
    pub back_color: Color,
    pub width: f64,
    pub height: f64,
    pub solid: bool,
    pub dash_array: DashArray,
    pub visible: bool,
}

impl Default for Pen {
    fn default() -> Self {
        Self {
            fore_color: Color::BLACK,
            back_color: Color::BLACK,
            width: 0.001,
            height: 0.001,
            solid: true,
            dash_array: DashArray::new(),
            visible: true,
        }
    }
}

impl Pen {
    /// Invisible pen, used for shapes that are not framed.
    pub fn none() -> Self {
        Self {
            visible: false,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BrushStyle {
    None,
    #[default]
    Solid,
    Pattern,
    Gradient,
}

/// Fill state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Brush {
    pub fore_color: Color,
    pub back_color: Color,
    pub style: BrushStyle,
    /// Pattern index, meaningful for [`BrushStyle::Pattern`]
    pub pattern: u16,
    pub gradient: Gradient,
}

impl Brush {
    /// Empty brush, used for shapes that are not filled.
    pub fn none() -> Self {
        Self {
            style: BrushStyle::None,
            ..Self::default()
        }
    }
}
