//! Number and color writers for SVG output.
//!
//! Everything writes straight into the output buffer; no intermediate
//! strings are allocated per attribute.

use crate::graphics::{Color, DashArray};
use std::fmt::Write;

/// Write a number with at most two decimals and no trailing zeros.
///
/// # Examples
///
/// ```
/// use wpgraphics::svg::utils::write_num;
///
/// let mut buf = String::new();
/// write_num(&mut buf, 10.0);
/// buf.push(' ');
/// write_num(&mut buf, 10.123);
/// assert_eq!(buf, "10 10.12");
/// ```
#[inline]
pub fn write_num(buf: &mut String, n: f64) {
    if !n.is_finite() {
        buf.push('0');
        return;
    }
    let rounded = (n * 100.0).round() / 100.0;
    if rounded.fract() == 0.0 && rounded.abs() < 1e15 {
        // Integer path also folds -0 into 0
        let mut ints = itoa::Buffer::new();
        buf.push_str(ints.format(rounded as i64));
        return;
    }

    let mut floats = ryu::Buffer::new();
    let s = floats.format(rounded);
    if s.contains('.') {
        buf.push_str(s.trim_end_matches('0').trim_end_matches('.'));
    } else {
        buf.push_str(s);
    }
}

/// Write a color as `#rrggbb`.
#[inline]
pub fn write_color_hex(buf: &mut String, color: Color) {
    let _ = write!(
        buf,
        "#{:02x}{:02x}{:02x}",
        color.red, color.green, color.blue
    );
}

/// Write a `stroke-dasharray` value, scaling pen-width multiples to `width`.
pub fn write_dash_array(buf: &mut String, dashes: &DashArray, width: f64) {
    for (i, dash) in dashes.as_slice().iter().enumerate() {
        if i > 0 {
            buf.push(',');
        }
        write_num(buf, dash * width);
    }
}

/// Write `text` with the five XML special characters escaped.
pub fn write_xml_escaped(buf: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '<' => buf.push_str("&lt;"),
            '>' => buf.push_str("&gt;"),
            '&' => buf.push_str("&amp;"),
            '"' => buf.push_str("&quot;"),
            '\'' => buf.push_str("&apos;"),
            _ => buf.push(c),
        }
    }
}
