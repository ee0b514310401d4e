//! The drawing interface fed by the record parsers.

use super::geometry::{Point, PointArray, Rect};
use super::path::Path;
use super::style::{Brush, Pen};

/// Polygon fill rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillRule {
    /// Even-odd
    #[default]
    Alternating,
    /// Non-zero winding
    Winding,
}

/// Receiver of drawing commands.
///
/// A parse emits `start_document` exactly once before anything else and
/// `end_document` exactly once, last. Style setters apply to the draw calls
/// that follow them. Layers do not nest: a new layer is only started after
/// the previous one has been ended.
///
/// All coordinates are in inches with the origin at the top-left corner.
pub trait PaintSink {
    fn start_document(&mut self, width: f64, height: f64);
    fn end_document(&mut self);

    fn start_layer(&mut self, id: u32);
    fn end_layer(&mut self, id: u32);

    fn set_pen(&mut self, pen: &Pen);
    fn set_brush(&mut self, brush: &Brush);
    fn set_fill_rule(&mut self, rule: FillRule);

    /// Rectangle with optional corner radii (zero for square corners).
    fn draw_rectangle(&mut self, rect: &Rect, rx: f64, ry: f64);
    fn draw_ellipse(&mut self, center: Point, rx: f64, ry: f64);
    fn draw_polygon(&mut self, points: &PointArray, closed: bool);
    fn draw_path(&mut self, path: &Path);
}
