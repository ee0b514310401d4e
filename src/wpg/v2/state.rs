use super::characterization::ObjectCharacterization;
use crate::graphics::{Brush, DashArray, Path, Pen, Point};
use crate::wpg::palette::Palette;
use crate::wpg::stream::WpgInput;
use crate::wpg::transform::TransformMatrix;
use std::collections::HashMap;
use std::io::{Read, Seek};

/// Record type that opens a compound polygon subgroup
pub(crate) const COMPOUND_POLYGON: u8 = 0x1A;

/// Built-in pen styles: segment count, then (dash, gap) pairs in 1/218 of
/// 3.6 pen widths.
const DEFAULT_PEN_STYLES: &[u32] = &[
    1, 291, 0, //
    1, 218, 73, //
    1, 145, 73, //
    1, 73, 73, //
    1, 36, 36, //
    1, 18, 18, //
    1, 18, 55, //
    3, 18, 55, 18, 55, 18, 127, //
    2, 164, 55, 18, 55, //
    3, 145, 36, 18, 36, 18, 36, //
    3, 91, 55, 91, 55, 18, 55, //
    4, 91, 36, 91, 36, 18, 36, 18, 36, //
    2, 182, 73, 73, 73, //
    3, 182, 36, 55, 36, 55, 36, //
    3, 255, 73, 255, 73, 73, 73, //
    4, 273, 36, 273, 36, 55, 36, 55, 36, //
    0,
];

/// Convert a pen style table length to pen-width units.
#[inline]
pub(crate) fn dash_length(value: f64) -> f64 {
    value * 3.6 / 218.0
}

/// An open subgroup: a record whose extension announced sub-records.
#[derive(Debug, Clone)]
pub struct GroupContext {
    /// Type of the record that opened the group
    pub parent_type: u8,
    /// Sub-records still to come
    pub remaining: u32,
    /// For compound polygons: the characterization of the compound record
    pub compound: Option<ObjectCharacterization>,
    /// For compound polygons: the outline collected from the children
    pub compound_path: Path,
}

impl GroupContext {
    #[inline]
    pub fn is_compound_polygon(&self) -> bool {
        self.parent_type == COMPOUND_POLYGON
    }
}

/// Mutable drawing state threaded through the WPG2 record handlers.
#[derive(Debug, Clone)]
pub struct Wpg2State {
    pub pen: Pen,
    pub brush: Brush,
    pub palette: Palette,
    pub pen_styles: HashMap<u32, DashArray>,

    pub layer_id: u32,
    pub layer_open: bool,

    /// Degrees
    pub gradient_angle: f64,
    /// Gradient reference point as fractions of the shape's bounding box
    pub gradient_ref: Point,

    pub double_precision: bool,
    pub x_res: f64,
    pub y_res: f64,
    pub x_offset: f64,
    pub y_offset: f64,
    pub width: f64,
    pub height: f64,

    pub graphics_started: bool,
    pub graphics_ended: bool,
    pub exit: bool,

    pub group_stack: Vec<GroupContext>,
    /// Characterization of the compound polygon record being handled, picked
    /// up by the subgroup it opens
    pub pending_compound: Option<ObjectCharacterization>,
}

impl Default for Wpg2State {
    fn default() -> Self {
        Self {
            pen: Pen::default(),
            brush: Brush::default(),
            palette: Palette::default(),
            pen_styles: HashMap::new(),
            layer_id: 0,
            layer_open: false,
            gradient_angle: 0.0,
            gradient_ref: Point::default(),
            double_precision: false,
            x_res: 1200.0,
            y_res: 1200.0,
            x_offset: 0.0,
            y_offset: 0.0,
            width: 0.0,
            height: 0.0,
            graphics_started: false,
            graphics_ended: false,
            exit: false,
            group_stack: Vec::new(),
            pending_compound: None,
        }
    }
}

impl Wpg2State {
    /// Replace the pen style table with the built-in one.
    pub fn install_default_pen_styles(&mut self) {
        self.pen_styles.clear();
        let mut values = DEFAULT_PEN_STYLES.iter().copied();
        let mut style = 0u32;
        while let Some(segments) = values.next() {
            let mut dashes = DashArray::new();
            for _ in 0..segments * 2 {
                if let Some(v) = values.next() {
                    dashes.push(dash_length(f64::from(v)));
                }
            }
            self.pen_styles.insert(style, dashes);
            style += 1;
        }
    }

    /// Read one coordinate in the document's precision.
    pub fn read_coord<R: Read + Seek>(&self, input: &mut WpgInput<R>) -> f64 {
        if self.double_precision {
            f64::from(input.read_s32()) / 65536.0
        } else {
            f64::from(input.read_s16())
        }
    }

    /// Read an unsigned size in the document's precision.
    pub fn read_size<R: Read + Seek>(&self, input: &mut WpgInput<R>) -> f64 {
        if self.double_precision {
            f64::from(input.read_u32()) / 65536.0
        } else {
            f64::from(input.read_u16())
        }
    }

    /// Map a point in file units to device inches: transform, shift to the
    /// image origin, flip the y axis, divide by the resolution.
    pub fn to_device(&self, matrix: &TransformMatrix, x: f64, y: f64) -> Point {
        let (x, y) = matrix.apply(x, y);
        Point::new(
            (x - self.x_offset) / self.x_res,
            (self.height - (y - self.y_offset)) / self.y_res,
        )
    }

    /// Matrix for a shape: its own, composed with the enclosing compound
    /// polygon's when inside one.
    pub fn shape_matrix(&self, own: &TransformMatrix) -> TransformMatrix {
        match self.compound_parent() {
            Some(compound) => own.then(&compound.matrix),
            None => *own,
        }
    }

    /// Characterization of the innermost open compound polygon, if the
    /// current record belongs directly to one.
    pub fn compound_parent(&self) -> Option<&ObjectCharacterization> {
        self.group_stack
            .last()
            .filter(|group| group.is_compound_polygon())
            .and_then(|group| group.compound.as_ref())
    }

    /// Path collecting the outline of the innermost compound polygon.
    pub fn compound_path_mut(&mut self) -> Option<&mut Path> {
        self.group_stack
            .last_mut()
            .filter(|group| group.is_compound_polygon() && group.compound.is_some())
            .map(|group| &mut group.compound_path)
    }
}
