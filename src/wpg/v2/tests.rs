//! Record-stream tests over synthetic WPG2 documents.

use super::parser::{handle_color_palette, parse, two_color_gradient};
use super::records::RecordHeader;
use super::state::{Wpg2State, dash_length};
use crate::common::{Error, Result};
use crate::graphics::{Brush, BrushStyle, Color, FillRule, PaintCall, PaintRecorder, PathElement, Point, Rect};
use crate::wpg::header::WpgHeader;
use crate::wpg::stream::WpgInput;
use crate::wpg::test_support::{Payload, Wpg2Builder};
use std::io::Cursor;

const FRAMED_FILLED: u16 = 0xA000;
const FRAMED_FILLED_CLOSED: u16 = 0xE000;

fn run(data: Vec<u8>) -> (Result<()>, Vec<PaintCall>) {
    let mut input = WpgInput::new(Cursor::new(data)).unwrap();
    input.seek(WpgHeader::SIZE as u64);
    let mut recorder = PaintRecorder::new();
    let result = parse(&mut input, &mut recorder);
    (result, recorder.into_calls())
}

fn rectangle(flags: u16, corners: [i16; 4], rx: i16, ry: i16) -> Payload {
    Payload::new()
        .u16(flags)
        .s16(corners[0])
        .s16(corners[1])
        .s16(corners[2])
        .s16(corners[3])
        .s16(rx)
        .s16(ry)
}

fn polyline(flags: u16, points: &[(i16, i16)]) -> Payload {
    Payload::new().u16(flags).u16(points.len() as u16).points(points)
}

fn rectangles(calls: &[PaintCall]) -> Vec<(Rect, f64, f64)> {
    calls
        .iter()
        .filter_map(|c| match c {
            PaintCall::Rectangle { rect, rx, ry } => Some((*rect, *rx, *ry)),
            _ => None,
        })
        .collect()
}

#[test]
fn test_minimal_document() {
    let data = Wpg2Builder::new().start(1200, 1200, [0, 0, 2400, 1200]).end().build();
    let (result, calls) = run(data);
    assert!(result.is_ok());
    assert_eq!(
        calls,
        vec![
            PaintCall::StartDocument {
                width: 2.0,
                height: 1.0
            },
            PaintCall::EndDocument
        ]
    );
}

#[test]
fn test_zero_resolution_defaults_to_1200() {
    let data = Wpg2Builder::new().start(0, 0, [0, 0, 600, 1200]).end().build();
    let (_, calls) = run(data);
    assert_eq!(
        calls[0],
        PaintCall::StartDocument {
            width: 0.5,
            height: 1.0
        }
    );
}

#[test]
fn test_unknown_record_is_skipped_by_declared_length() {
    // The unknown record's payload looks like a rectangle record; resuming
    // anywhere but its declared end would draw it.
    let mut fake = vec![0x0E, 0x18, 0x00, 0x0E];
    fake.extend(rectangle(FRAMED_FILLED, [0, 0, 10, 10], 0, 0).0);

    let mut builder = Wpg2Builder::new().start(1200, 1200, [0, 0, 1200, 1200]);
    builder.record_at(0x25, 0, &[255, 0, 0, 0]);
    let unknown_payload = builder.record_at(0x07, 0, &fake);
    let unknown_end = unknown_payload + fake.len() as u64;
    builder.record_at(0x18, 0, &rectangle(FRAMED_FILLED, [100, 100, 200, 200], 0, 0).0);
    let data = builder.end().build();

    // Framing: after the unknown record, the next header is the rectangle
    let mut input = WpgInput::new(Cursor::new(data.clone())).unwrap();
    input.seek(WpgHeader::SIZE as u64);
    let mut headers = Vec::new();
    while let Some(header) = RecordHeader::read(&mut input) {
        input.seek(header.end());
        headers.push((header.record_type, header.payload_start, header.end(), input.tell()));
        if input.at_eos() {
            break;
        }
    }
    let unknown = headers.iter().find(|h| h.0 == 0x07).unwrap();
    assert_eq!(unknown.1, unknown_payload);
    assert_eq!(unknown.2, unknown_end);
    assert_eq!(unknown.3, unknown_payload + fake.len() as u64);
    let types: Vec<u8> = headers.iter().map(|h| h.0).collect();
    assert_eq!(types, vec![0x01, 0x25, 0x07, 0x18, 0x02]);

    let (result, calls) = run(data);
    assert!(result.is_ok());
    let rects = rectangles(&calls);
    assert_eq!(rects.len(), 1);
    let pen = calls.iter().find_map(|c| match c {
        PaintCall::SetPen(pen) => Some(pen.clone()),
        _ => None,
    });
    assert_eq!(pen.map(|p| p.fore_color), Some(Color::rgb(255, 0, 0)));
}

#[test]
fn test_partial_handler_resumes_at_record_end() {
    // Trailing bytes after the points are ignored
    let payload = polyline(0x8000, &[(0, 0), (1200, 1200)]).bytes(&[0x0E, 0x18, 0, 4, 1, 2, 3, 4]);
    let data = Wpg2Builder::new()
        .start(1200, 1200, [0, 0, 1200, 1200])
        .record(0x15, 0, payload)
        .end()
        .build();
    let (result, calls) = run(data);
    assert!(result.is_ok());
    assert!(rectangles(&calls).is_empty());
    assert_eq!(calls.last(), Some(&PaintCall::EndDocument));
    let polygon = calls.iter().find_map(|c| match c {
        PaintCall::Polygon { points, closed } => Some((points.clone(), *closed)),
        _ => None,
    });
    let (points, closed) = polygon.unwrap();
    assert!(!closed);
    assert_eq!(points.as_slice(), &[Point::new(0.0, 1.0), Point::new(1.0, 0.0)]);
}

#[test]
fn test_rectangle_rounding_radii() {
    let data = Wpg2Builder::new()
        .start(1200, 1200, [0, 0, 2400, 2400])
        .record(0x18, 0, rectangle(FRAMED_FILLED, [1300, 1400, 100, 200], 120, 240))
        .record(0x18, 0, rectangle(FRAMED_FILLED, [0, 0, 1200, 1200], 0, 0))
        .end()
        .build();
    let (result, calls) = run(data);
    assert!(result.is_ok());

    let rects = rectangles(&calls);
    assert_eq!(rects.len(), 2);

    let (rect, rx, ry) = rects[0];
    assert!(rx > 0.0 && ry > 0.0);
    assert_eq!((rx, ry), (120.0 / 1200.0, 240.0 / 1200.0));
    assert_eq!(rect.x1, 100.0 / 1200.0);
    assert_eq!(rect.x2, 1300.0 / 1200.0);
    assert_eq!(rect.y1, (2400.0 - 1400.0) / 1200.0);
    assert_eq!(rect.y2, (2400.0 - 200.0) / 1200.0);

    let (rect, rx, ry) = rects[1];
    assert_eq!((rx, ry), (0.0, 0.0));
    assert_eq!(rect, Rect::new(0.0, 1.0, 1.0, 2.0));
}

#[test]
fn test_shape_style_follows_characterization() {
    let data = Wpg2Builder::new()
        .start(1200, 1200, [0, 0, 1200, 1200])
        .record(0x18, 0, rectangle(0x1000, [0, 0, 10, 10], 0, 0))
        .end()
        .build();
    let (_, calls) = run(data);
    assert!(calls.iter().any(|c| matches!(c, PaintCall::SetPen(pen) if !pen.visible)));
    assert!(calls.iter().any(|c| matches!(c, PaintCall::SetBrush(brush) if brush.style == BrushStyle::None)));
    assert!(calls.contains(&PaintCall::SetFillRule(FillRule::Winding)));
}

fn gradient_document(angle: u16, x_ref: u16, y_ref: u16, colors: [Color; 2]) -> Vec<u8> {
    let mut fore = Payload::new().u8(1).u16(2);
    for c in colors {
        fore = fore.u8(c.red).u8(c.green).u8(c.blue).u8(c.alpha);
    }
    fore = fore.u16(0x8000);

    Wpg2Builder::new()
        .start(1200, 1200, [0, 0, 1200, 1200])
        .record(0x2F, 0, Payload::new().u16(0).u16(angle).u16(x_ref).u16(y_ref).u16(0).u16(0))
        .record(0x31, 0, fore)
        .record(0x18, 0, rectangle(FRAMED_FILLED, [0, 0, 600, 600], 0, 0))
        .end()
        .build()
}

#[test]
fn test_two_color_gradient_is_reproducible() {
    let red = Color::rgb(255, 0, 0);
    let blue = Color::rgb(0, 0, 255);
    let data = gradient_document(30, 0x4000, 0x8000, [red, blue]);

    let brush_of = |calls: &[PaintCall]| {
        calls.iter().find_map(|c| match c {
            PaintCall::SetBrush(brush) => Some(brush.clone()),
            _ => None,
        })
    };
    let (result, calls) = run(data.clone());
    assert!(result.is_ok());
    let brush = brush_of(&calls).unwrap();
    assert_eq!(brush.style, BrushStyle::Gradient);

    let gradient = &brush.gradient;
    assert_eq!(gradient.count(), 2);
    assert_eq!(gradient.angle, -30.0);

    let t = (30.0f64 * std::f64::consts::PI / 180.0).tan();
    let expected_ref = (0.5 + 0.25 * t) / (1.0 + t);
    assert_eq!(gradient.stops[0].offset, 0.0);
    assert_eq!(gradient.stops[0].color, blue);
    assert_eq!(gradient.stops[1].offset.to_bits(), expected_ref.to_bits());
    assert_eq!(gradient.stops[1].color, red);

    // Same inputs, same bits
    let (_, again) = run(data);
    assert_eq!(brush_of(&again), Some(brush.clone()));
    assert_eq!(*gradient, two_color_gradient(30.0, 0.25, 0.5, [red, blue]));
}

#[test]
fn test_steep_gradient_uses_x_reference() {
    let gradient = two_color_gradient(90.0, 0.25, 0.75, [Color::BLACK, Color::WHITE]);
    assert_eq!(gradient.stops[1].offset, 0.25);

    let gradient = two_color_gradient(135.0, 0.25, 0.75, [Color::BLACK, Color::WHITE]);
    assert!(gradient.stops[1].offset.is_finite());
}

fn first_brush(calls: &[PaintCall]) -> Option<Brush> {
    calls.iter().find_map(|c| match c {
        PaintCall::SetBrush(brush) => Some(brush.clone()),
        _ => None,
    })
}

#[test]
fn test_solid_fore_color_keeps_gradient_style() {
    let red = Color::rgb(255, 0, 0);
    let blue = Color::rgb(0, 0, 255);
    let gradient = Payload::new()
        .u8(1)
        .u16(2)
        .bytes(&[255, 0, 0, 0, 0, 0, 255, 0])
        .u16(0x8000);
    let data = Wpg2Builder::new()
        .start(1200, 1200, [0, 0, 1200, 1200])
        .record(0x2F, 0, Payload::new().u16(0).u16(0).u16(0x4000).u16(0x8000))
        .record(0x31, 0, gradient)
        .record(0x31, 0, Payload::new().u8(0).bytes(&[1, 2, 3, 0]))
        .record(0x18, 0, rectangle(FRAMED_FILLED, [0, 0, 10, 10], 0, 0))
        .end()
        .build();
    let (result, calls) = run(data);
    assert!(result.is_ok());

    let brush = first_brush(&calls).unwrap();
    assert_eq!(brush.style, BrushStyle::Gradient);
    assert_eq!(brush.fore_color, Color::rgb(1, 2, 3));
    assert_eq!(brush.gradient, two_color_gradient(0.0, 0.25, 0.5, [red, blue]));
}

#[test]
fn test_solid_fore_color_on_plain_brush() {
    let data = Wpg2Builder::new()
        .start(1200, 1200, [0, 0, 1200, 1200])
        .record(0x31, 0, Payload::new().u8(0).bytes(&[1, 2, 3, 0]))
        .record(0x18, 0, rectangle(FRAMED_FILLED, [0, 0, 10, 10], 0, 0))
        .end()
        .build();
    let (_, calls) = run(data);
    let brush = first_brush(&calls).unwrap();
    assert_eq!(brush.style, BrushStyle::Solid);
    assert_eq!(brush.fore_color, Color::rgb(1, 2, 3));
}

#[test]
fn test_double_precision_gradient() {
    let unit = 65536;
    // Angle 0 degrees, reference at (0.5, 0.25) as fractions of 2^32
    let reference = Payload::new()
        .u16(0)
        .u16(0)
        .u32(0x8000_0000)
        .u32(0x4000_0000);
    // Two 16-bit-per-channel colors and one 32-bit position
    let colors = Payload::new()
        .u8(1)
        .u16(2)
        .u16(0xFF00)
        .u16(0x8000)
        .u16(0)
        .u16(0)
        .u16(0)
        .u16(0x40FF)
        .u16(0xFFFF)
        .u16(0)
        .u32(0x8000_0000);
    let rect = Payload::new()
        .u16(FRAMED_FILLED)
        .s32(0)
        .s32(0)
        .s32(600 * unit)
        .s32(600 * unit)
        .s32(0)
        .s32(0);
    let data = Wpg2Builder::new()
        .start_dp(1200, 1200, [0, 0, 1200 * unit, 1200 * unit])
        .record(0x30, 0, reference)
        .record(0x32, 0, colors)
        .record(0x18, 0, rect)
        .end()
        .build();
    let (result, calls) = run(data);
    assert!(result.is_ok());

    let first = Color::rgba(255, 128, 0, 0);
    let second = Color::rgba(0, 64, 255, 0);
    let brush = first_brush(&calls).unwrap();
    assert_eq!(brush.style, BrushStyle::Gradient);
    assert_eq!(brush.fore_color, first);
    let gradient = &brush.gradient;
    assert_eq!(gradient.count(), 2);
    assert_eq!(gradient.angle, 0.0);
    assert_eq!(gradient.stops[0].offset, 0.0);
    assert_eq!(gradient.stops[0].color, second);
    // tan(0) = 0, so the stop sits at the y reference
    assert_eq!(gradient.stops[1].offset, 0.25);
    assert_eq!(gradient.stops[1].color, first);
}

#[test]
fn test_double_precision_palette() {
    let payload = Payload::new()
        .u16(5)
        .u16(2)
        .u16(0x1200)
        .u16(0x3400)
        .u16(0x56FF)
        .u16(0)
        .u16(0xFFFF)
        .u16(0)
        .u16(0)
        .u16(0x8000);
    let data = Wpg2Builder::new().record(0x0D, 0, payload).build();
    let mut input = WpgInput::new(Cursor::new(data)).unwrap();
    input.seek(WpgHeader::SIZE as u64);
    let header = RecordHeader::read(&mut input).unwrap();

    let mut state = Wpg2State::default();
    handle_color_palette(&header, &mut input, &mut state, true);
    assert_eq!(state.palette.get(5), Color::rgba(0x12, 0x34, 0x56, 0));
    assert_eq!(state.palette.get(6), Color::rgba(255, 0, 0, 128));
    assert_eq!(input.tell(), header.end());

    // A palette longer than its record is dropped
    let payload = Payload::new().u16(0).u16(3).u16(0xFF00).u16(0).u16(0).u16(0);
    let data = Wpg2Builder::new().record(0x0D, 0, payload).build();
    let mut input = WpgInput::new(Cursor::new(data)).unwrap();
    input.seek(WpgHeader::SIZE as u64);
    let header = RecordHeader::read(&mut input).unwrap();
    let mut state = Wpg2State::default();
    let before = state.palette.clone();
    handle_color_palette(&header, &mut input, &mut state, true);
    assert_eq!(state.palette, before);
}

#[test]
fn test_negative_corner_radii_are_clamped() {
    let data = Wpg2Builder::new()
        .start(1200, 1200, [0, 0, 1200, 1200])
        .record(0x18, 0, rectangle(FRAMED_FILLED, [0, 0, 600, 600], -120, -60))
        .end()
        .build();
    let (result, calls) = run(data);
    assert!(result.is_ok());
    let rects = rectangles(&calls);
    assert_eq!(rects.len(), 1);
    assert_eq!((rects[0].1, rects[0].2), (0.1, 0.05));
}

#[test]
fn test_unsupported_precision_is_fatal_and_silent() {
    let payload = Payload::new().u16(1200).u16(1200).u8(2).bytes(&[0; 16]);
    let data = Wpg2Builder::new()
        .record(0x01, 0, payload)
        .record(0x18, 0, rectangle(FRAMED_FILLED, [0, 0, 10, 10], 0, 0))
        .end()
        .build();
    let (result, calls) = run(data);
    assert!(matches!(result, Err(Error::UnsupportedPrecision(2))));
    assert!(calls.is_empty());
}

#[test]
fn test_missing_start_record() {
    let data = Wpg2Builder::new()
        .record(0x18, 0, rectangle(FRAMED_FILLED, [0, 0, 10, 10], 0, 0))
        .end()
        .build();
    let (result, calls) = run(data);
    assert!(matches!(result, Err(Error::UnsupportedFormat(_))));
    assert!(calls.is_empty());
}

#[test]
fn test_missing_end_record_still_closes_document() {
    let data = Wpg2Builder::new()
        .start(1200, 1200, [0, 0, 1200, 1200])
        .record(0x06, 0, Payload::new().u32(3))
        .record(0x18, 0, rectangle(FRAMED_FILLED, [0, 0, 10, 10], 0, 0))
        .build();
    let (result, calls) = run(data);
    assert!(result.is_ok());
    let tail = &calls[calls.len() - 2..];
    assert_eq!(tail, &[PaintCall::EndLayer(3), PaintCall::EndDocument]);
}

#[test]
fn test_layers_close_previous_layer() {
    let data = Wpg2Builder::new()
        .start(1200, 1200, [0, 0, 1200, 1200])
        .record(0x06, 0, Payload::new().u32(1))
        .record(0x18, 0, rectangle(FRAMED_FILLED, [0, 0, 10, 10], 0, 0))
        .record(0x06, 0, Payload::new().u32(2))
        .end()
        .build();
    let (_, calls) = run(data);
    let layer_calls: Vec<&PaintCall> = calls
        .iter()
        .filter(|c| {
            matches!(
                c,
                PaintCall::StartLayer(_) | PaintCall::EndLayer(_) | PaintCall::EndDocument
            )
        })
        .collect();
    assert_eq!(
        layer_calls,
        vec![
            &PaintCall::StartLayer(1),
            &PaintCall::EndLayer(1),
            &PaintCall::StartLayer(2),
            &PaintCall::EndLayer(2),
            &PaintCall::EndDocument,
        ]
    );
}

#[test]
fn test_compound_polygon_collects_children_into_one_path() {
    // Compound translated by one inch; children carry no style of their own
    let compound = Payload::new()
        .u16(FRAMED_FILLED_CLOSED | 0x02)
        .u16(0)
        .s32(1200)
        .u16(0)
        .s32(0);
    let data = Wpg2Builder::new()
        .start(1200, 1200, [0, 0, 2400, 1200])
        .record(0x1A, 2, compound)
        .record(0x15, 0, polyline(0, &[(0, 0), (600, 0)]))
        .record(0x15, 0, polyline(0, &[(0, 600), (600, 600)]))
        .record(0x18, 0, rectangle(FRAMED_FILLED, [0, 0, 10, 10], 0, 0))
        .end()
        .build();
    let (result, calls) = run(data);
    assert!(result.is_ok());
    assert!(!calls.iter().any(|c| matches!(c, PaintCall::Polygon { .. })));

    let path_index = calls.iter().position(|c| matches!(c, PaintCall::Path(_))).unwrap();
    let rect_index = calls.iter().position(|c| matches!(c, PaintCall::Rectangle { .. })).unwrap();
    assert!(path_index < rect_index);

    let PaintCall::Path(path) = &calls[path_index] else {
        unreachable!()
    };
    assert!(path.closed);
    assert_eq!(
        path.elements,
        vec![
            PathElement::MoveTo(Point::new(1.0, 1.0)),
            PathElement::LineTo(Point::new(1.5, 1.0)),
            PathElement::MoveTo(Point::new(1.0, 0.5)),
            PathElement::LineTo(Point::new(1.5, 0.5)),
        ]
    );
    assert!(matches!(&calls[path_index - 3], PaintCall::SetPen(pen) if pen.visible));
    assert!(matches!(&calls[path_index - 2], PaintCall::SetBrush(b) if b.style == BrushStyle::Solid));
}

#[test]
fn test_nested_groups_unwind_together() {
    let data = Wpg2Builder::new()
        .start(1200, 1200, [0, 0, 1200, 1200])
        .record(0x20, 1, Payload::new())
        .record(0x1A, 1, Payload::new().u16(FRAMED_FILLED_CLOSED))
        .record(0x15, 0, polyline(0, &[(0, 0), (10, 10)]))
        .record(0x18, 0, rectangle(FRAMED_FILLED, [0, 0, 10, 10], 0, 0))
        .end()
        .build();
    let (_, calls) = run(data);
    assert_eq!(calls.iter().filter(|c| matches!(c, PaintCall::Path(_))).count(), 1);
    assert_eq!(rectangles(&calls).len(), 1);
}

#[test]
fn test_polycurve() {
    let payload = Payload::new().u16(0x8000).u16(2).points(&[
        (0, 0),
        (0, 0),
        (100, 0),
        (200, 0),
        (300, 0),
        (300, 0),
    ]);
    let data = Wpg2Builder::new()
        .start(100, 100, [0, 0, 300, 100])
        .record(0x17, 0, payload)
        .end()
        .build();
    let (_, calls) = run(data);
    let path = calls.iter().find_map(|c| match c {
        PaintCall::Path(p) => Some(p.clone()),
        _ => None,
    });
    let path = path.unwrap();
    assert!(!path.closed);
    assert_eq!(
        path.elements,
        vec![
            PathElement::MoveTo(Point::new(0.0, 1.0)),
            PathElement::CurveTo(Point::new(1.0, 1.0), Point::new(2.0, 1.0), Point::new(3.0, 1.0)),
        ]
    );
}

#[test]
fn test_arcs() {
    let full = Payload::new()
        .u16(FRAMED_FILLED)
        .points(&[(600, 600), (300, 150), (300, 0), (300, 0)]);
    let partial = Payload::new()
        .u16(0x8000)
        .points(&[(600, 600), (300, 300), (300, 0), (0, 300)]);
    let data = Wpg2Builder::new()
        .start(1200, 1200, [0, 0, 1200, 1200])
        .record(0x19, 0, full)
        .record(0x19, 0, partial)
        .end()
        .build();
    let (_, calls) = run(data);

    assert!(calls.contains(&PaintCall::Ellipse {
        center: Point::new(0.5, 0.5),
        rx: 0.25,
        ry: 0.125
    }));

    let path = calls.iter().find_map(|c| match c {
        PaintCall::Path(p) => Some(p.clone()),
        _ => None,
    });
    let path = path.unwrap();
    assert_eq!(path.len(), 2);
    let close = |a: Point, b: Point| (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9;
    assert!(matches!(path.elements[0], PathElement::MoveTo(p) if close(p, Point::new(0.75, 0.5))));
    assert!(matches!(path.elements[1], PathElement::CurveTo(_, _, p) if close(p, Point::new(0.5, 0.25))));
}

#[test]
fn test_pen_style_and_size() {
    let data = Wpg2Builder::new()
        .start(1200, 1200, [0, 0, 1200, 1200])
        .record(0x29, 0, Payload::new().u16(1))
        .record(0x2B, 0, Payload::new().u16(12).u16(24))
        .record(0x18, 0, rectangle(FRAMED_FILLED, [0, 0, 10, 10], 0, 0))
        .record(0x08, 0, Payload::new().u16(40).u16(1).u16(109).u16(218))
        .record(0x29, 0, Payload::new().u16(40))
        .record(0x18, 0, rectangle(FRAMED_FILLED, [0, 0, 10, 10], 0, 0))
        .end()
        .build();
    let (_, calls) = run(data);
    let pens: Vec<_> = calls
        .iter()
        .filter_map(|c| match c {
            PaintCall::SetPen(p) => Some(p.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(pens.len(), 2);
    assert!(!pens[0].solid);
    assert_eq!(pens[0].dash_array.len(), 2);
    assert_eq!(pens[0].width, 0.01);
    assert_eq!(pens[0].height, 0.02);
    assert_eq!(
        pens[1].dash_array.as_slice(),
        &[dash_length(109.0), dash_length(218.0)]
    );
}

#[test]
fn test_double_precision_coordinates() {
    let unit = 65536i32;
    let rect = Payload::new()
        .u16(FRAMED_FILLED)
        .s32(0)
        .s32(0)
        .s32(1200 * unit)
        .s32(600 * unit)
        .s32(60 * unit)
        .s32(0);
    let data = Wpg2Builder::new()
        .start_dp(1200, 1200, [0, 0, 2400 * unit, 1200 * unit])
        .record(0x26, 0, Payload::new().u16(0xFF00).u16(0x8000).u16(0).u16(0))
        .record(0x18, 0, rect)
        .end()
        .build();
    let (result, calls) = run(data);
    assert!(result.is_ok());
    assert_eq!(
        calls[0],
        PaintCall::StartDocument {
            width: 2.0,
            height: 1.0
        }
    );
    let rects = rectangles(&calls);
    assert_eq!(rects[0], (Rect::new(0.0, 0.5, 1.0, 1.0), 0.05, 0.0));
    assert!(calls.iter().any(|c| matches!(c, PaintCall::SetPen(p) if p.fore_color == Color::rgb(255, 128, 0))));
}
