//! WPG2 record framing and type codes.

use crate::wpg::stream::WpgInput;
use std::io::{Read, Seek};

/// Record types of the WPG2 format.
///
/// Only the types with a handler affect drawing; the rest are listed so
/// skipped records can be named in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Wpg2RecordType {
    StartWpg = 0x01,
    EndWpg = 0x02,
    FormSettings = 0x03,
    RulerSettings = 0x04,
    GridSettings = 0x05,
    Layer = 0x06,
    PenStyleDefinition = 0x08,
    PatternDefinition = 0x09,
    Comment = 0x0A,
    ColorTransfer = 0x0B,
    ColorPalette = 0x0C,
    DpColorPalette = 0x0D,
    BitmapData = 0x0E,
    TextData = 0x0F,
    ChartStyle = 0x10,
    ChartData = 0x11,
    ObjectImage = 0x12,
    Polyline = 0x15,
    Polyspline = 0x16,
    Polycurve = 0x17,
    Rectangle = 0x18,
    Arc = 0x19,
    CompoundPolygon = 0x1A,
    Bitmap = 0x1B,
    TextLine = 0x1C,
    TextBlock = 0x1D,
    TextPath = 0x1E,
    Chart = 0x1F,
    Group = 0x20,
    ObjectCapsule = 0x21,
    FontSettings = 0x22,
    PenForeColor = 0x25,
    DpPenForeColor = 0x26,
    PenBackColor = 0x27,
    DpPenBackColor = 0x28,
    PenStyle = 0x29,
    PenPattern = 0x2A,
    PenSize = 0x2B,
    DpPenSize = 0x2C,
    LineCap = 0x2D,
    LineJoin = 0x2E,
    BrushGradient = 0x2F,
    DpBrushGradient = 0x30,
    BrushForeColor = 0x31,
    DpBrushForeColor = 0x32,
    BrushBackColor = 0x33,
    DpBrushBackColor = 0x34,
    BrushPattern = 0x35,
    HorizontalLine = 0x36,
    VerticalLine = 0x37,
    PosterSettings = 0x38,
    ImageState = 0x39,
    EnhanceLineAttributes = 0x3A,
}

impl Wpg2RecordType {
    pub fn from_u8(value: u8) -> Option<Self> {
        use Wpg2RecordType::*;
        Some(match value {
            0x01 => StartWpg,
            0x02 => EndWpg,
            0x03 => FormSettings,
            0x04 => RulerSettings,
            0x05 => GridSettings,
            0x06 => Layer,
            0x08 => PenStyleDefinition,
            0x09 => PatternDefinition,
            0x0A => Comment,
            0x0B => ColorTransfer,
            0x0C => ColorPalette,
            0x0D => DpColorPalette,
            0x0E => BitmapData,
            0x0F => TextData,
            0x10 => ChartStyle,
            0x11 => ChartData,
            0x12 => ObjectImage,
            0x15 => Polyline,
            0x16 => Polyspline,
            0x17 => Polycurve,
            0x18 => Rectangle,
            0x19 => Arc,
            0x1A => CompoundPolygon,
            0x1B => Bitmap,
            0x1C => TextLine,
            0x1D => TextBlock,
            0x1E => TextPath,
            0x1F => Chart,
            0x20 => Group,
            0x21 => ObjectCapsule,
            0x22 => FontSettings,
            0x25 => PenForeColor,
            0x26 => DpPenForeColor,
            0x27 => PenBackColor,
            0x28 => DpPenBackColor,
            0x29 => PenStyle,
            0x2A => PenPattern,
            0x2B => PenSize,
            0x2C => DpPenSize,
            0x2D => LineCap,
            0x2E => LineJoin,
            0x2F => BrushGradient,
            0x30 => DpBrushGradient,
            0x31 => BrushForeColor,
            0x32 => DpBrushForeColor,
            0x33 => BrushBackColor,
            0x34 => DpBrushBackColor,
            0x35 => BrushPattern,
            0x36 => HorizontalLine,
            0x37 => VerticalLine,
            0x38 => PosterSettings,
            0x39 => ImageState,
            0x3A => EnhanceLineAttributes,
            _ => return None,
        })
    }

    #[inline]
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

/// Framing of one record: class, type, sub-record count and payload length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordHeader {
    pub record_class: u8,
    pub record_type: u8,
    /// Number of records that belong to this one as a subgroup
    pub extension: u32,
    pub length: u32,
    /// Offset of the first payload byte
    pub payload_start: u64,
}

impl RecordHeader {
    /// Read a record header; `None` when the input ends inside it.
    pub fn read<R: Read + Seek>(input: &mut WpgInput<R>) -> Option<Self> {
        input.clear_truncated();
        let record_class = input.read_u8();
        let record_type = input.read_u8();
        let extension = input.read_variable_length_integer();
        let length = input.read_variable_length_integer();
        if input.is_truncated() {
            return None;
        }
        Some(Self {
            record_class,
            record_type,
            extension,
            length,
            payload_start: input.tell(),
        })
    }

    /// Offset just past the payload; the parser always resumes here.
    #[inline]
    pub fn end(&self) -> u64 {
        self.payload_start + u64::from(self.length)
    }

    pub fn kind(&self) -> Option<Wpg2RecordType> {
        Wpg2RecordType::from_u8(self.record_type)
    }
}
