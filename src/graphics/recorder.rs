//! A sink that keeps every call it receives.

use super::geometry::{Point, PointArray, Rect};
use super::paint::{FillRule, PaintSink};
use super::path::Path;
use super::style::{Brush, Pen};

/// One recorded [`PaintSink`] call with owned arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum PaintCall {
    StartDocument { width: f64, height: f64 },
    EndDocument,
    StartLayer(u32),
    EndLayer(u32),
    SetPen(Pen),
    SetBrush(Brush),
    SetFillRule(FillRule),
    Rectangle { rect: Rect, rx: f64, ry: f64 },
    Ellipse { center: Point, rx: f64, ry: f64 },
    Polygon { points: PointArray, closed: bool },
    Path(Path),
}

impl PaintCall {
    /// True for the calls that put ink on the page.
    pub fn is_shape(&self) -> bool {
        matches!(
            self,
            PaintCall::Rectangle { .. }
                | PaintCall::Ellipse { .. }
                | PaintCall::Polygon { .. }
                | PaintCall::Path(_)
        )
    }
}

/// Records the call stream for later inspection.
///
/// # Examples
///
/// ```
/// use wpgraphics::graphics::{PaintCall, PaintRecorder, PaintSink};
///
/// let mut recorder = PaintRecorder::new();
/// recorder.start_document(8.5, 11.0);
/// recorder.end_document();
/// assert_eq!(recorder.calls().len(), 2);
/// assert_eq!(recorder.calls()[1], PaintCall::EndDocument);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PaintRecorder {
    calls: Vec<PaintCall>,
}

impl PaintRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[PaintCall] {
        &self.calls
    }

    pub fn into_calls(self) -> Vec<PaintCall> {
        self.calls
    }

    /// Recorded shape calls only, in order.
    pub fn shapes(&self) -> impl Iterator<Item = &PaintCall> {
        self.calls.iter().filter(|c| c.is_shape())
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl PaintSink for PaintRecorder {
    fn start_document(&mut self, width: f64, height: f64) {
        self.calls.push(PaintCall::StartDocument { width, height });
    }

    fn end_document(&mut self) {
        self.calls.push(PaintCall::EndDocument);
    }

    fn start_layer(&mut self, id: u32) {
        self.calls.push(PaintCall::StartLayer(id));
    }

    fn end_layer(&mut self, id: u32) {
        self.calls.push(PaintCall::EndLayer(id));
    }

    fn set_pen(&mut self, pen: &Pen) {
        self.calls.push(PaintCall::SetPen(pen.clone()));
    }

    fn set_brush(&mut self, brush: &Brush) {
        self.calls.push(PaintCall::SetBrush(brush.clone()));
    }

    fn set_fill_rule(&mut self, rule: FillRule) {
        self.calls.push(PaintCall::SetFillRule(rule));
    }

    fn draw_rectangle(&mut self, rect: &Rect, rx: f64, ry: f64) {
        self.calls.push(PaintCall::Rectangle {
            rect: *rect,
            rx,
            ry,
        });
    }

    fn draw_ellipse(&mut self, center: Point, rx: f64, ry: f64) {
        self.calls.push(PaintCall::Ellipse { center, rx, ry });
    }

    fn draw_polygon(&mut self, points: &PointArray, closed: bool) {
        self.calls.push(PaintCall::Polygon {
            points: points.clone(),
            closed,
        });
    }

    fn draw_path(&mut self, path: &Path) {
        self.calls.push(PaintCall::Path(path.clone()));
    }
}
