//! SVG output for parsed graphics.
//!
//! [`SvgGenerator`] is a [`PaintSink`] that renders every draw call as an SVG
//! element as it arrives. Layers become `<g>` groups and gradient brushes
//! become `<linearGradient>` definitions referenced from the shape.
//!
//! ```no_run
//! use wpgraphics::svg::{SvgGenerator, SvgOptions};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let data = std::fs::read("drawing.wpg")?;
//! let mut svg = SvgGenerator::new(SvgOptions::default());
//! wpgraphics::wpg::parse_bytes(&data, &mut svg)?;
//! std::fs::write("drawing.svg", svg.into_svg())?;
//! # Ok(())
//! # }
//! ```

pub mod utils;

use crate::graphics::{
    Brush, BrushStyle, FillRule, PaintSink, Path, PathElement, Pen, Point, PointArray, Rect,
};
use log::trace;
use std::fmt::Write;
use utils::{write_color_hex, write_dash_array, write_num, write_xml_escaped};

/// Output configuration for [`SvgGenerator`].
#[derive(Debug, Clone, PartialEq)]
pub struct SvgOptions {
    /// User units per inch in the `viewBox`
    pub units_per_inch: f64,
    /// Emit `<?xml ...?>` before the root element
    pub xml_declaration: bool,
    /// Optional document `<title>`
    pub title: Option<String>,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            units_per_inch: 72.0,
            xml_declaration: true,
            title: None,
        }
    }
}

/// Paint sink that builds an SVG document.
#[derive(Debug, Clone)]
pub struct SvgGenerator {
    options: SvgOptions,
    width: f64,
    height: f64,
    defs: String,
    body: String,
    pen: Pen,
    brush: Brush,
    fill_rule: FillRule,
    gradient_count: usize,
    open_groups: usize,
}

impl SvgGenerator {
    pub fn new(options: SvgOptions) -> Self {
        Self {
            options,
            width: 0.0,
            height: 0.0,
            defs: String::new(),
            body: String::with_capacity(4096),
            pen: Pen::default(),
            brush: Brush::default(),
            fill_rule: FillRule::default(),
            gradient_count: 0,
            open_groups: 0,
        }
    }

    /// Assemble the final document.
    ///
    /// Groups left open by an interrupted parse are closed.
    pub fn into_svg(self) -> String {
        let upi = self.options.units_per_inch;
        let mut svg = String::with_capacity(self.body.len() + self.defs.len() + 256);

        if self.options.xml_declaration {
            svg.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"no\"?>\n");
        }
        svg.push_str("<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"");
        write_num(&mut svg, self.width);
        svg.push_str("in\" height=\"");
        write_num(&mut svg, self.height);
        svg.push_str("in\" viewBox=\"0 0 ");
        write_num(&mut svg, self.width * upi);
        svg.push(' ');
        write_num(&mut svg, self.height * upi);
        svg.push_str("\">\n");

        if let Some(title) = &self.options.title {
            svg.push_str("<title>");
            write_xml_escaped(&mut svg, title);
            svg.push_str("</title>\n");
        }
        if !self.defs.is_empty() {
            svg.push_str("<defs>\n");
            svg.push_str(&self.defs);
            svg.push_str("</defs>\n");
        }
        svg.push_str(&self.body);
        for _ in 0..self.open_groups {
            svg.push_str("</g>\n");
        }
        svg.push_str("</svg>\n");
        svg
    }

    fn scale(&self, v: f64) -> f64 {
        v * self.options.units_per_inch
    }

    fn write_point(&mut self, p: Point) {
        write_num(&mut self.body, p.x * self.options.units_per_inch);
        self.body.push(',');
        write_num(&mut self.body, p.y * self.options.units_per_inch);
    }

    fn write_attr(&mut self, name: &str, value: f64) {
        let value = self.scale(value);
        self.body.push(' ');
        self.body.push_str(name);
        self.body.push_str("=\"");
        write_num(&mut self.body, value);
        self.body.push('"');
    }

    /// Fill attributes for the current brush; defines a gradient when needed.
    fn write_fill(&mut self) {
        match self.brush.style {
            BrushStyle::None => self.body.push_str(" fill=\"none\""),
            BrushStyle::Gradient if self.brush.gradient.count() > 0 => {
                let id = self.define_gradient();
                let _ = write!(self.body, " fill=\"url(#{})\"", id);
            },
            // Patterns are approximated by their foreground color.
            _ => {
                let color = self.brush.fore_color;
                self.body.push_str(" fill=\"");
                write_color_hex(&mut self.body, color);
                self.body.push('"');
                if !color.is_opaque() {
                    self.body.push_str(" fill-opacity=\"");
                    write_num(&mut self.body, color.opacity());
                    self.body.push('"');
                }
            },
        }
        if self.fill_rule == FillRule::Alternating && self.brush.style != BrushStyle::None {
            self.body.push_str(" fill-rule=\"evenodd\"");
        }
    }

    fn define_gradient(&mut self) -> String {
        self.gradient_count += 1;
        let id = format!("gradient{}", self.gradient_count);
        let gradient = &self.brush.gradient;

        let _ = write!(self.defs, "<linearGradient id=\"{}\"", id);
        if gradient.angle != 0.0 {
            self.defs.push_str(" gradientTransform=\"rotate(");
            write_num(&mut self.defs, gradient.angle);
            self.defs.push_str(" 0.5 0.5)\"");
        }
        self.defs.push_str(">\n");
        for stop in &gradient.stops {
            self.defs.push_str("<stop offset=\"");
            write_num(&mut self.defs, stop.offset.clamp(0.0, 1.0));
            self.defs.push_str("\" stop-color=\"");
            write_color_hex(&mut self.defs, stop.color);
            self.defs.push('"');
            if !stop.color.is_opaque() {
                self.defs.push_str(" stop-opacity=\"");
                write_num(&mut self.defs, stop.color.opacity());
                self.defs.push('"');
            }
            self.defs.push_str("/>\n");
        }
        self.defs.push_str("</linearGradient>\n");
        id
    }

    fn write_stroke(&mut self) {
        if !self.pen.visible {
            self.body.push_str(" stroke=\"none\"");
            return;
        }
        let color = self.pen.fore_color;
        let width = self.scale(self.pen.width);

        self.body.push_str(" stroke=\"");
        write_color_hex(&mut self.body, color);
        self.body.push_str("\" stroke-width=\"");
        write_num(&mut self.body, width);
        self.body.push('"');
        if !color.is_opaque() {
            self.body.push_str(" stroke-opacity=\"");
            write_num(&mut self.body, color.opacity());
            self.body.push('"');
        }
        if !self.pen.solid && !self.pen.dash_array.is_empty() {
            self.body.push_str(" stroke-dasharray=\"");
            write_dash_array(&mut self.body, &self.pen.dash_array, width);
            self.body.push('"');
        }
    }

    fn finish_shape(&mut self) {
        self.write_fill();
        self.write_stroke();
        self.body.push_str("/>\n");
    }
}

impl Default for SvgGenerator {
    fn default() -> Self {
        Self::new(SvgOptions::default())
    }
}

impl PaintSink for SvgGenerator {
    fn start_document(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    fn end_document(&mut self) {
        trace!(
            "svg document finished: {} bytes of elements, {} gradients",
            self.body.len(),
            self.gradient_count
        );
    }

    fn start_layer(&mut self, id: u32) {
        let _ = writeln!(self.body, "<g id=\"layer{}\">", id);
        self.open_groups += 1;
    }

    fn end_layer(&mut self, _id: u32) {
        if self.open_groups > 0 {
            self.body.push_str("</g>\n");
            self.open_groups -= 1;
        }
    }

    fn set_pen(&mut self, pen: &Pen) {
        self.pen = pen.clone();
    }

    fn set_brush(&mut self, brush: &Brush) {
        self.brush = brush.clone();
    }

    fn set_fill_rule(&mut self, rule: FillRule) {
        self.fill_rule = rule;
    }

    fn draw_rectangle(&mut self, rect: &Rect, rx: f64, ry: f64) {
        self.body.push_str("<rect");
        self.write_attr("x", rect.x1);
        self.write_attr("y", rect.y1);
        self.write_attr("width", rect.width());
        self.write_attr("height", rect.height());
        if rx > 0.0 {
            self.write_attr("rx", rx);
        }
        if ry > 0.0 {
            self.write_attr("ry", ry);
        }
        self.finish_shape();
    }

    fn draw_ellipse(&mut self, center: Point, rx: f64, ry: f64) {
        self.body.push_str("<ellipse");
        self.write_attr("cx", center.x);
        self.write_attr("cy", center.y);
        self.write_attr("rx", rx);
        self.write_attr("ry", ry);
        self.finish_shape();
    }

    fn draw_polygon(&mut self, points: &PointArray, closed: bool) {
        if points.is_empty() {
            return;
        }
        self.body
            .push_str(if closed { "<polygon points=\"" } else { "<polyline points=\"" });
        for (i, p) in points.iter().enumerate() {
            if i > 0 {
                self.body.push(' ');
            }
            self.write_point(*p);
        }
        self.body.push('"');
        self.finish_shape();
    }

    fn draw_path(&mut self, path: &Path) {
        if path.is_empty() {
            return;
        }
        self.body.push_str("<path d=\"");
        for (i, element) in path.elements.iter().enumerate() {
            if i > 0 {
                self.body.push(' ');
            }
            match *element {
                PathElement::MoveTo(p) => {
                    self.body.push('M');
                    self.write_point(p);
                },
                PathElement::LineTo(p) => {
                    self.body.push('L');
                    self.write_point(p);
                },
                PathElement::CurveTo(c1, c2, end) => {
                    self.body.push('C');
                    self.write_point(c1);
                    self.body.push(' ');
                    self.write_point(c2);
                    self.body.push(' ');
                    self.write_point(end);
                },
            }
        }
        if path.closed {
            self.body.push_str(" Z");
        }
        self.body.push('"');
        self.finish_shape();
    }
}
