//! WPG1 record loop and handlers.

use super::records::{Wpg1RecordType, line_style_dashes};
use crate::common::{Error, Result};
use crate::graphics::{
    Brush, BrushStyle, Color, DashArray, FillRule, PaintSink, Path, Pen, Point, PointArray, Rect,
};
use crate::wpg::palette::Palette;
use crate::wpg::stream::WpgInput;
use log::{debug, trace, warn};
use std::io::{Read, Seek};

/// Drawing units per inch.
const UNITS_PER_INCH: f64 = 1200.0;

/// Graphics state carried between WPG1 records.
#[derive(Debug, Clone, Default)]
pub struct Wpg1State {
    pub pen: Pen,
    pub brush: Brush,
    pub palette: Palette,
    /// Page height in drawing units, used to flip the y axis.
    pub height: f64,
    pub graphics_started: bool,
    pub graphics_ended: bool,
    pub exit: bool,
}

impl Wpg1State {
    /// Map a point in drawing units to inches with the y axis pointing down.
    pub fn to_device(&self, x: i16, y: i16) -> Point {
        Point::new(
            f64::from(x) / UNITS_PER_INCH,
            (self.height - f64::from(y)) / UNITS_PER_INCH,
        )
    }

    fn read_point<R: Read + Seek>(&self, input: &mut WpgInput<R>) -> Point {
        let x = input.read_s16();
        let y = input.read_s16();
        self.to_device(x, y)
    }
}

/// Parse WPG1 records from the current position to the End WPG record or
/// the end of the input.
pub fn parse<R, S>(input: &mut WpgInput<R>, sink: &mut S) -> Result<()>
where
    R: Read + Seek,
    S: PaintSink + ?Sized,
{
    let mut state = Wpg1State::default();

    while !input.at_eos() && !state.exit {
        input.clear_truncated();
        let record_type = input.read_u8();
        let length = input.read_variable_length_integer();
        if input.is_truncated() {
            warn!("truncated record header at offset {}", input.tell());
            break;
        }
        let start = input.tell();
        let end = start + u64::from(length);
        trace!("record {:#04x} len {} at {}", record_type, length, start);

        match Wpg1RecordType::from_u8(record_type) {
            Some(kind) => handle_record(kind, input, &mut state, sink),
            None => trace!("skipping unknown record type {:#04x}", record_type),
        }

        input.seek(end);
    }

    if !state.graphics_started {
        return Err(Error::UnsupportedFormat(
            "no Start WPG record before end of input".to_string(),
        ));
    }
    if !state.graphics_ended {
        warn!("input ended without an End WPG record");
        sink.end_document();
        state.graphics_ended = true;
    }
    Ok(())
}

fn handle_record<R, S>(
    kind: Wpg1RecordType,
    input: &mut WpgInput<R>,
    state: &mut Wpg1State,
    sink: &mut S,
) where
    R: Read + Seek,
    S: PaintSink + ?Sized,
{
    use Wpg1RecordType::*;

    if kind == StartWpg {
        handle_start_wpg(input, state, sink);
        return;
    }
    if !state.graphics_started {
        debug!("{:?} record before Start WPG ignored", kind);
        return;
    }

    match kind {
        EndWpg => {
            sink.end_document();
            state.graphics_ended = true;
            state.exit = true;
        },
        FillAttributes => handle_fill_attributes(input, state),
        LineAttributes => handle_line_attributes(input, state),
        ColorMap => handle_color_map(input, state),
        Line => handle_line(input, state, sink),
        Polyline => handle_polyline(input, state, sink),
        Rectangle => handle_rectangle(input, state, sink),
        Polygon => handle_polygon(input, state, sink),
        Ellipse => handle_ellipse(input, state, sink),
        CurvedPolyline => handle_curved_polyline(input, state, sink),
        _ => trace!("no handler for {:?}", kind),
    }
}

fn handle_start_wpg<R, S>(input: &mut WpgInput<R>, state: &mut Wpg1State, sink: &mut S)
where
    R: Read + Seek,
    S: PaintSink + ?Sized,
{
    if state.graphics_started {
        debug!("repeated Start WPG record ignored");
        return;
    }
    let version = input.read_u8();
    let flags = input.read_u8();
    let width = input.read_u16();
    let height = input.read_u16();
    debug!(
        "WPG1 start: version {} flags {:#04x} page {}x{}",
        version, flags, width, height
    );

    state.height = f64::from(height);
    state.graphics_started = true;
    sink.start_document(
        f64::from(width) / UNITS_PER_INCH,
        f64::from(height) / UNITS_PER_INCH,
    );
}

fn handle_fill_attributes<R: Read + Seek>(input: &mut WpgInput<R>, state: &mut Wpg1State) {
    let style = input.read_u8();
    let color = input.read_u8();

    state.brush.style = match style {
        0 => BrushStyle::None,
        1 => BrushStyle::Solid,
        _ => BrushStyle::Pattern,
    };
    state.brush.pattern = u16::from(style);
    state.brush.fore_color = state.palette.get(usize::from(color));
}

fn handle_line_attributes<R: Read + Seek>(input: &mut WpgInput<R>, state: &mut Wpg1State) {
    let style = input.read_u8();
    let color = input.read_u8();
    let width = input.read_u16();

    let pen = &mut state.pen;
    pen.fore_color = state.palette.get(usize::from(color));
    pen.visible = style != 0;
    match line_style_dashes(style) {
        Some(dashes) => {
            pen.solid = false;
            pen.dash_array = DashArray::from_slice(dashes);
        },
        None => {
            pen.solid = true;
            pen.dash_array = DashArray::new();
        },
    }
    // A zero width still draws a hairline.
    let width = if width == 0 && style != 0 { 1 } else { width };
    pen.width = f64::from(width) / UNITS_PER_INCH;
    pen.height = pen.width;
}

fn handle_color_map<R: Read + Seek>(input: &mut WpgInput<R>, state: &mut Wpg1State) {
    let start_index = usize::from(input.read_u16());
    let num_entries = usize::from(input.read_u16());

    for index in start_index..start_index + num_entries {
        if index >= Palette::SIZE {
            warn!(
                "color map overflows the palette ({} + {} entries)",
                start_index, num_entries
            );
            break;
        }
        let red = input.read_u8();
        let green = input.read_u8();
        let blue = input.read_u8();
        state.palette.set(index, Color::rgb(red, green, blue));
    }
}

fn read_points<R: Read + Seek>(input: &mut WpgInput<R>, state: &Wpg1State) -> PointArray {
    let count = usize::from(input.read_u16());
    let mut points = PointArray::with_capacity(count);
    for _ in 0..count {
        if input.is_truncated() {
            break;
        }
        points.push(state.read_point(input));
    }
    points
}

fn stroke_only<S: PaintSink + ?Sized>(state: &Wpg1State, sink: &mut S) {
    sink.set_pen(&state.pen);
    sink.set_brush(&Brush::none());
}

fn stroke_and_fill<S: PaintSink + ?Sized>(state: &Wpg1State, sink: &mut S) {
    sink.set_pen(&state.pen);
    sink.set_brush(&state.brush);
    sink.set_fill_rule(FillRule::Alternating);
}

fn handle_line<R, S>(input: &mut WpgInput<R>, state: &mut Wpg1State, sink: &mut S)
where
    R: Read + Seek,
    S: PaintSink + ?Sized,
{
    let start = state.read_point(input);
    let end = state.read_point(input);

    let points = PointArray::from(vec![start, end]);
    stroke_only(state, sink);
    sink.draw_polygon(&points, false);
}

fn handle_polyline<R, S>(input: &mut WpgInput<R>, state: &mut Wpg1State, sink: &mut S)
where
    R: Read + Seek,
    S: PaintSink + ?Sized,
{
    let points = read_points(input, state);
    if points.is_empty() {
        return;
    }
    stroke_only(state, sink);
    sink.draw_polygon(&points, false);
}

fn handle_polygon<R, S>(input: &mut WpgInput<R>, state: &mut Wpg1State, sink: &mut S)
where
    R: Read + Seek,
    S: PaintSink + ?Sized,
{
    let points = read_points(input, state);
    if points.is_empty() {
        return;
    }
    stroke_and_fill(state, sink);
    sink.draw_polygon(&points, true);
}

fn handle_rectangle<R, S>(input: &mut WpgInput<R>, state: &mut Wpg1State, sink: &mut S)
where
    R: Read + Seek,
    S: PaintSink + ?Sized,
{
    let x = input.read_s16();
    let y = input.read_s16();
    let w = input.read_s16();
    let h = input.read_s16();

    // (x, y) is the lower-left corner in a y-up frame.
    let bottom_left = state.to_device(x, y);
    let top_right = Point::new(
        (f64::from(x) + f64::from(w)) / UNITS_PER_INCH,
        (state.height - f64::from(y) - f64::from(h)) / UNITS_PER_INCH,
    );
    let rect = Rect::from_corners(bottom_left, top_right);

    stroke_and_fill(state, sink);
    sink.draw_rectangle(&rect, 0.0, 0.0);
}

fn handle_ellipse<R, S>(input: &mut WpgInput<R>, state: &mut Wpg1State, sink: &mut S)
where
    R: Read + Seek,
    S: PaintSink + ?Sized,
{
    let cx = input.read_s16();
    let cy = input.read_s16();
    let rx = f64::from(input.read_s16()) / UNITS_PER_INCH;
    let ry = f64::from(input.read_s16()) / UNITS_PER_INCH;
    let rotation = f64::from(input.read_u16());
    let start_angle = f64::from(input.read_u16());
    let end_angle = f64::from(input.read_u16());
    let _flags = input.read_u16();

    let center = state.to_device(cx, cy);
    let full = start_angle == end_angle;

    if full && rotation == 0.0 {
        stroke_and_fill(state, sink);
        sink.draw_ellipse(center, rx, ry);
        return;
    }

    let (start, sweep) = if full {
        (0.0, 360.0)
    } else {
        let mut sweep = end_angle - start_angle;
        if sweep < 0.0 {
            sweep += 360.0;
        }
        (start_angle, sweep)
    };

    // Angles run counter-clockwise in the y-up frame; build the arc there and
    // flip it about the center for the y-down output space.
    let arc = Path::elliptical_arc(
        Point::new(0.0, 0.0),
        rx,
        ry,
        start.to_radians(),
        sweep.to_radians(),
    );
    let (sin, cos) = rotation.to_radians().sin_cos();
    let mut path = arc.map_points(|p| {
        let x = p.x * cos - p.y * sin;
        let y = p.x * sin + p.y * cos;
        Point::new(center.x + x, center.y - y)
    });
    if full {
        path.close();
        stroke_and_fill(state, sink);
    } else {
        stroke_only(state, sink);
    }
    sink.draw_path(&path);
}

fn handle_curved_polyline<R, S>(input: &mut WpgInput<R>, state: &mut Wpg1State, sink: &mut S)
where
    R: Read + Seek,
    S: PaintSink + ?Sized,
{
    let _reserved = input.read_u32();
    let points = read_points(input, state);
    let Some(first) = points.get(0) else {
        return;
    };

    let mut path = Path::new();
    path.move_to(*first);
    for segment in points.as_slice()[1..].chunks_exact(3) {
        path.curve_to(segment[0], segment[1], segment[2]);
    }

    stroke_only(state, sink);
    sink.draw_path(&path);
}
