//! Device-independent drawing vocabulary.
//!
//! The record parsers translate file contents into calls on a [`PaintSink`];
//! everything those calls carry (colors, points, paths, pens, brushes) lives
//! here as plain owned values so sinks can keep or discard them freely.

pub mod color;
pub mod geometry;
pub mod paint;
pub mod path;
pub mod recorder;
pub mod style;

pub use color::Color;
pub use geometry::{Point, PointArray, Rect};
pub use paint::{FillRule, PaintSink};
pub use path::{Path, PathElement};
pub use recorder::{PaintCall, PaintRecorder};
pub use style::{Brush, BrushStyle, DashArray, Gradient, GradientStop, Pen};
