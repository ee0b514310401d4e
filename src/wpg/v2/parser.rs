//! WPG2 record loop and handlers.

use super::characterization::ObjectCharacterization;
use super::records::{RecordHeader, Wpg2RecordType};
use super::state::{GroupContext, Wpg2State, dash_length};
use crate::common::{Error, Result};
use crate::graphics::{
    Brush, BrushStyle, Color, DashArray, FillRule, Gradient, PaintSink, Path, Pen, Point,
    PointArray, Rect,
};
use crate::wpg::stream::WpgInput;
use log::{debug, trace, warn};
use std::f64::consts::{PI, TAU};
use std::io::{Read, Seek};

/// Parse WPG2 records from the current position to the End WPG record or
/// the end of the input.
///
/// Fails without emitting anything when the Start WPG record carries an
/// unknown precision code, and when no Start WPG record precedes the end of
/// the input.
pub fn parse<R, S>(input: &mut WpgInput<R>, sink: &mut S) -> Result<()>
where
    R: Read + Seek,
    S: PaintSink + ?Sized,
{
    let mut state = Wpg2State::default();

    while !input.at_eos() && !state.exit {
        let Some(header) = RecordHeader::read(input) else {
            warn!("truncated record header at offset {}", input.tell());
            break;
        };
        trace!(
            "record {:#04x} ({:?}) class {:#04x} ext {} len {} at {}",
            header.record_type,
            header.kind(),
            header.record_class,
            header.extension,
            header.length,
            header.payload_start
        );

        if let Some(group) = state.group_stack.last_mut() {
            group.remaining = group.remaining.saturating_sub(1);
        }

        handle_record(&header, input, &mut state, sink)?;

        if header.extension > 0 {
            state.group_stack.push(GroupContext {
                parent_type: header.record_type,
                remaining: header.extension,
                compound: state.pending_compound.take(),
                compound_path: Path::new(),
            });
        }
        state.pending_compound = None;
        close_finished_groups(&mut state, sink);

        input.seek(header.end());
    }

    if !state.graphics_started {
        return Err(Error::UnsupportedFormat(
            "no Start WPG record before end of input".to_string(),
        ));
    }
    if !state.graphics_ended {
        warn!("input ended without an End WPG record");
        finish_document(&mut state, sink);
    }
    Ok(())
}

fn handle_record<R, S>(
    header: &RecordHeader,
    input: &mut WpgInput<R>,
    state: &mut Wpg2State,
    sink: &mut S,
) -> Result<()>
where
    R: Read + Seek,
    S: PaintSink + ?Sized,
{
    use Wpg2RecordType::*;

    let Some(kind) = header.kind() else {
        trace!("skipping unknown record type {:#04x}", header.record_type);
        return Ok(());
    };

    if kind == StartWpg {
        return handle_start_wpg(input, state, sink);
    }
    if !state.graphics_started {
        debug!("{:?} record before Start WPG ignored", kind);
        return Ok(());
    }

    match kind {
        EndWpg => handle_end_wpg(state, sink),
        FormSettings => handle_form_settings(input, state),
        Layer => handle_layer(input, state, sink),
        PenStyleDefinition => handle_pen_style_definition(header, input, state),
        ColorPalette => handle_color_palette(header, input, state, false),
        DpColorPalette => handle_color_palette(header, input, state, true),
        Polyline => handle_polyline(input, state, sink),
        Polycurve => handle_polycurve(input, state, sink),
        Rectangle => handle_rectangle(input, state, sink),
        Arc => handle_arc(input, state, sink),
        CompoundPolygon => handle_compound_polygon(input, state),
        PenForeColor => state.pen.fore_color = read_color(input, false),
        DpPenForeColor => state.pen.fore_color = read_color(input, true),
        PenBackColor => state.pen.back_color = read_color(input, false),
        DpPenBackColor => state.pen.back_color = read_color(input, true),
        PenStyle => handle_pen_style(input, state),
        PenSize => handle_pen_size(input, state, false),
        DpPenSize => handle_pen_size(input, state, true),
        BrushGradient => handle_brush_gradient(input, state, false),
        DpBrushGradient => handle_brush_gradient(input, state, true),
        BrushForeColor => handle_brush_fore_color(header, input, state, false),
        DpBrushForeColor => handle_brush_fore_color(header, input, state, true),
        BrushBackColor => handle_brush_back_color(input, state, false),
        DpBrushBackColor => handle_brush_back_color(input, state, true),
        BrushPattern => state.brush.pattern = input.read_u16(),
        _ => trace!("no handler for {:?}", kind),
    }
    Ok(())
}

/// Pop every exhausted subgroup, flushing finished compound polygons.
fn close_finished_groups<S: PaintSink + ?Sized>(state: &mut Wpg2State, sink: &mut S) {
    while state.group_stack.last().is_some_and(|group| group.remaining == 0) {
        let Some(group) = state.group_stack.pop() else {
            break;
        };
        if let Some(compound) = group.compound.as_ref()
            && !group.compound_path.is_empty()
        {
            let mut path = group.compound_path;
            path.closed = compound.closed();
            apply_shape_style(state, sink, compound);
            sink.draw_path(&path);
        }
    }
}

fn finish_document<S: PaintSink + ?Sized>(state: &mut Wpg2State, sink: &mut S) {
    if state.layer_open {
        sink.end_layer(state.layer_id);
        state.layer_open = false;
    }
    sink.end_document();
    state.graphics_ended = true;
}

fn handle_start_wpg<R, S>(input: &mut WpgInput<R>, state: &mut Wpg2State, sink: &mut S) -> Result<()>
where
    R: Read + Seek,
    S: PaintSink + ?Sized,
{
    if state.graphics_started {
        warn!("duplicate Start WPG record ignored");
        return Ok(());
    }

    let x_res = input.read_u16();
    let y_res = input.read_u16();
    let precision = input.read_u8();

    state.x_res = if x_res == 0 { 1200.0 } else { f64::from(x_res) };
    state.y_res = if y_res == 0 { 1200.0 } else { f64::from(y_res) };
    state.double_precision = match precision {
        0 => false,
        1 => true,
        other => {
            warn!("unsupported coordinate precision {}", other);
            state.exit = true;
            return Err(Error::UnsupportedPrecision(other));
        },
    };

    let viewport: [f64; 4] = std::array::from_fn(|_| state.read_coord(input));
    let image: [f64; 4] = std::array::from_fn(|_| state.read_coord(input));
    let [x1, y1, x2, y2] = image;

    state.width = (x2 - x1).abs();
    state.height = (y2 - y1).abs();
    state.x_offset = x1.min(x2);
    state.y_offset = y1.min(y2);

    debug!(
        "WPG2 start: {}x{} dpi, {} precision, viewport {:?}, image {}x{} at ({}, {})",
        state.x_res,
        state.y_res,
        if state.double_precision { "double" } else { "single" },
        viewport,
        state.width,
        state.height,
        state.x_offset,
        state.y_offset
    );

    state.install_default_pen_styles();
    state.graphics_started = true;
    sink.start_document(state.width / state.x_res, state.height / state.y_res);
    Ok(())
}

fn handle_end_wpg<S: PaintSink + ?Sized>(state: &mut Wpg2State, sink: &mut S) {
    finish_document(state, sink);
    state.exit = true;
}

fn handle_form_settings<R: Read + Seek>(input: &mut WpgInput<R>, state: &Wpg2State) {
    let width = state.read_size(input);
    let height = state.read_size(input);
    debug!(
        "form size {}x{} in",
        width / state.x_res,
        height / state.y_res
    );
}

fn handle_layer<R, S>(input: &mut WpgInput<R>, state: &mut Wpg2State, sink: &mut S)
where
    R: Read + Seek,
    S: PaintSink + ?Sized,
{
    let id = input.read_u32();
    if state.layer_open {
        sink.end_layer(state.layer_id);
    }
    state.layer_id = id;
    state.layer_open = true;
    sink.start_layer(id);
}

/// Bytes left in the record's payload.
fn remaining<R: Read + Seek>(header: &RecordHeader, input: &WpgInput<R>) -> u64 {
    header.end().saturating_sub(input.tell())
}

fn handle_pen_style_definition<R: Read + Seek>(
    header: &RecordHeader,
    input: &mut WpgInput<R>,
    state: &mut Wpg2State,
) {
    let style = u32::from(input.read_u16());
    let segments = u64::from(input.read_u16());
    let pair_size = if state.double_precision { 8 } else { 4 };
    if segments * pair_size > remaining(header, input) {
        warn!("pen style {} declares {} segments beyond record end", style, segments);
        return;
    }

    let mut dashes = DashArray::new();
    for _ in 0..segments * 2 {
        dashes.push(dash_length(state.read_size(input)));
    }
    state.pen_styles.insert(style, dashes);
}

fn handle_pen_style<R: Read + Seek>(input: &mut WpgInput<R>, state: &mut Wpg2State) {
    let style = u32::from(input.read_u16());
    if let Some(dashes) = state.pen_styles.get(&style) {
        state.pen.dash_array = dashes.clone();
    }
    state.pen.solid = style == 0;
}

fn handle_pen_size<R: Read + Seek>(input: &mut WpgInput<R>, state: &mut Wpg2State, dp: bool) {
    let (width, height) = if dp {
        (
            f64::from(input.read_u32()) / 65536.0,
            f64::from(input.read_u32()) / 65536.0,
        )
    } else {
        (f64::from(input.read_u16()), f64::from(input.read_u16()))
    };
    state.pen.width = width / state.x_res;
    state.pen.height = height / state.y_res;
}

/// RGBA color; double-precision records carry 16-bit channels.
fn read_color<R: Read + Seek>(input: &mut WpgInput<R>, dp: bool) -> Color {
    let mut channel = || {
        if dp {
            (input.read_u16() >> 8) as u8
        } else {
            input.read_u8()
        }
    };
    let red = channel();
    let green = channel();
    let blue = channel();
    let alpha = channel();
    Color::rgba(red, green, blue, alpha)
}

pub(crate) fn handle_color_palette<R: Read + Seek>(
    header: &RecordHeader,
    input: &mut WpgInput<R>,
    state: &mut Wpg2State,
    dp: bool,
) {
    let start = usize::from(input.read_u16());
    let count = usize::from(input.read_u16());
    let entry_size = if dp { 8 } else { 4 };
    if (count * entry_size) as u64 > remaining(header, input) {
        warn!("palette of {} entries exceeds record length", count);
        return;
    }
    for i in 0..count {
        let color = read_color(input, dp);
        if !state.palette.set(start + i, color) {
            warn!("palette index {} out of range", start + i);
            break;
        }
    }
}

fn handle_brush_gradient<R: Read + Seek>(input: &mut WpgInput<R>, state: &mut Wpg2State, dp: bool) {
    let angle_fraction = input.read_u16();
    let angle_integer = input.read_u16();
    state.gradient_angle = f64::from(angle_integer) + f64::from(angle_fraction) / 65536.0;

    let (x_ref, y_ref) = if dp {
        (
            f64::from(input.read_u32()) / 4_294_967_296.0,
            f64::from(input.read_u32()) / 4_294_967_296.0,
        )
    } else {
        (
            f64::from(input.read_u16()) / 65536.0,
            f64::from(input.read_u16()) / 65536.0,
        )
    };
    state.gradient_ref = Point::new(x_ref, y_ref);
}

/// Stops for a two-color gradient: the reference point, projected on the
/// gradient axis, is where the first color is reached.
pub(crate) fn two_color_gradient(angle: f64, x_ref: f64, y_ref: f64, colors: [Color; 2]) -> Gradient {
    let tan_angle = (angle * PI / 180.0).tan();
    let mut reference = if tan_angle < 100.0 {
        (y_ref + x_ref * tan_angle) / (1.0 + tan_angle)
    } else {
        x_ref
    };
    if !reference.is_finite() {
        reference = x_ref;
    }

    let mut gradient = Gradient {
        angle: -angle,
        stops: Vec::with_capacity(2),
    };
    gradient.add_stop(0.0, colors[1]);
    gradient.add_stop(reference, colors[0]);
    gradient
}

fn handle_brush_fore_color<R: Read + Seek>(
    header: &RecordHeader,
    input: &mut WpgInput<R>,
    state: &mut Wpg2State,
    dp: bool,
) {
    let gradient_type = input.read_u8();
    if gradient_type == 0 {
        state.brush.fore_color = read_color(input, dp);
        if state.brush.style != BrushStyle::Gradient {
            state.brush.style = BrushStyle::Solid;
        }
        return;
    }

    let count = usize::from(input.read_u16());
    let (color_size, position_size) = if dp { (8, 4) } else { (4, 2) };
    let needed = count * color_size + count.saturating_sub(1) * position_size;
    if count == 0 || needed as u64 > remaining(header, input) {
        warn!("gradient of {} colors does not fit its record", count);
        return;
    }

    let colors: Vec<Color> = (0..count).map(|_| read_color(input, dp)).collect();
    let positions: Vec<f64> = (1..count)
        .map(|_| {
            if dp {
                f64::from(input.read_u32()) / 4_294_967_296.0
            } else {
                f64::from(input.read_u16()) / 65536.0
            }
        })
        .collect();

    let gradient = if count == 2 {
        two_color_gradient(
            state.gradient_angle,
            state.gradient_ref.x,
            state.gradient_ref.y,
            [colors[0], colors[1]],
        )
    } else {
        let mut gradient = Gradient {
            angle: -state.gradient_angle,
            stops: Vec::with_capacity(count),
        };
        gradient.add_stop(0.0, colors[0]);
        for (position, color) in positions.iter().zip(&colors[1..]) {
            gradient.add_stop(*position, *color);
        }
        gradient
    };

    state.brush.fore_color = colors[0];
    state.brush.gradient = gradient;
    state.brush.style = BrushStyle::Gradient;
}

fn handle_brush_back_color<R: Read + Seek>(input: &mut WpgInput<R>, state: &mut Wpg2State, dp: bool) {
    state.brush.back_color = read_color(input, dp);
    if state.brush.style == BrushStyle::None {
        state.brush.style = BrushStyle::Solid;
    }
}

fn apply_shape_style<S: PaintSink + ?Sized>(
    state: &Wpg2State,
    sink: &mut S,
    ch: &ObjectCharacterization,
) {
    if ch.framed() {
        sink.set_pen(&state.pen);
    } else {
        sink.set_pen(&Pen::none());
    }
    if ch.filled() {
        sink.set_brush(&state.brush);
    } else {
        sink.set_brush(&Brush::none());
    }
    sink.set_fill_rule(if ch.winding() {
        FillRule::Winding
    } else {
        FillRule::Alternating
    });
}

fn handle_compound_polygon<R: Read + Seek>(input: &mut WpgInput<R>, state: &mut Wpg2State) {
    let ch = ObjectCharacterization::read(input);
    let matrix = state.shape_matrix(&ch.matrix);
    state.pending_compound = Some(ObjectCharacterization { matrix, ..ch });
}

fn handle_polyline<R, S>(input: &mut WpgInput<R>, state: &mut Wpg2State, sink: &mut S)
where
    R: Read + Seek,
    S: PaintSink + ?Sized,
{
    let ch = ObjectCharacterization::read(input);
    let matrix = state.shape_matrix(&ch.matrix);
    let count = input.read_u16();

    let mut points = PointArray::with_capacity(usize::from(count));
    for _ in 0..count {
        let x = state.read_coord(input);
        let y = state.read_coord(input);
        points.push(state.to_device(&matrix, x, y));
    }
    if input.is_truncated() {
        warn!("polyline truncated after {} points", points.len());
        return;
    }

    if let Some(path) = state.compound_path_mut() {
        path.append(&Path::from_points(&points, false));
        return;
    }

    apply_shape_style(state, sink, &ch);
    sink.draw_polygon(&points, ch.closed());
}

fn handle_polycurve<R, S>(input: &mut WpgInput<R>, state: &mut Wpg2State, sink: &mut S)
where
    R: Read + Seek,
    S: PaintSink + ?Sized,
{
    let ch = ObjectCharacterization::read(input);
    let matrix = state.shape_matrix(&ch.matrix);
    let count = usize::from(input.read_u16());

    // Per vertex: incoming control point, anchor, outgoing control point
    let mut anchors = Vec::with_capacity(count);
    let mut controls = Vec::with_capacity(count * 2);
    for _ in 0..count {
        let coords: [f64; 6] = std::array::from_fn(|_| state.read_coord(input));
        controls.push(state.to_device(&matrix, coords[0], coords[1]));
        anchors.push(state.to_device(&matrix, coords[2], coords[3]));
        controls.push(state.to_device(&matrix, coords[4], coords[5]));
    }
    if input.is_truncated() || anchors.is_empty() {
        return;
    }

    let mut path = Path::new();
    path.move_to(anchors[0]);
    for j in 1..count {
        path.curve_to(controls[2 * j - 1], controls[2 * j], anchors[j]);
    }

    if let Some(compound) = state.compound_path_mut() {
        compound.append(&path);
        return;
    }

    path.closed = ch.closed();
    apply_shape_style(state, sink, &ch);
    sink.draw_path(&path);
}

fn handle_rectangle<R, S>(input: &mut WpgInput<R>, state: &mut Wpg2State, sink: &mut S)
where
    R: Read + Seek,
    S: PaintSink + ?Sized,
{
    let ch = ObjectCharacterization::read(input);
    let matrix = state.shape_matrix(&ch.matrix);

    let x1 = state.read_coord(input);
    let y1 = state.read_coord(input);
    let x2 = state.read_coord(input);
    let y2 = state.read_coord(input);
    let rx = state.read_coord(input).abs();
    let ry = state.read_coord(input).abs();

    let rect = Rect::from_corners(
        state.to_device(&matrix, x1, y1),
        state.to_device(&matrix, x2, y2),
    );

    apply_shape_style(state, sink, &ch);
    sink.draw_rectangle(&rect, rx / state.x_res, ry / state.y_res);
}

fn handle_arc<R, S>(input: &mut WpgInput<R>, state: &mut Wpg2State, sink: &mut S)
where
    R: Read + Seek,
    S: PaintSink + ?Sized,
{
    let ch = ObjectCharacterization::read(input);
    let matrix = state.shape_matrix(&ch.matrix);

    let cx = state.read_coord(input);
    let cy = state.read_coord(input);
    let radius_x = state.read_coord(input);
    let radius_y = state.read_coord(input);
    // Start and end points, relative to the centre
    let ix = state.read_coord(input);
    let iy = state.read_coord(input);
    let ex = state.read_coord(input);
    let ey = state.read_coord(input);

    apply_shape_style(state, sink, &ch);

    if ix == ex && iy == ey {
        let center = state.to_device(&matrix, cx, cy);
        sink.draw_ellipse(center, radius_x / state.x_res, radius_y / state.y_res);
        return;
    }

    let angle_of = |x: f64, y: f64| {
        if radius_x == 0.0 || radius_y == 0.0 {
            y.atan2(x)
        } else {
            (y / radius_y).atan2(x / radius_x)
        }
    };
    let start = angle_of(ix, iy);
    let mut sweep = angle_of(ex, ey) - start;
    if sweep <= 0.0 {
        sweep += TAU;
    }

    let center = Point::new(cx, cy);
    let mut path = Path::elliptical_arc(center, radius_x, radius_y, start, sweep);
    if ch.closed() {
        path.line_to(center);
        path.close();
    }
    sink.draw_path(&path.map_points(|p| state.to_device(&matrix, p.x, p.y)));
}
