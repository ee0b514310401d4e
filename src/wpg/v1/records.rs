/// WPG1 record types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Wpg1RecordType {
    FillAttributes = 0x01,
    LineAttributes = 0x02,
    MarkerAttributes = 0x03,
    PolyMarker = 0x04,
    Line = 0x05,
    Polyline = 0x06,
    Rectangle = 0x07,
    Polygon = 0x08,
    Ellipse = 0x09,
    BitmapType1 = 0x0B,
    GraphicsText = 0x0C,
    GraphicsTextAttributes = 0x0D,
    ColorMap = 0x0E,
    StartWpg = 0x0F,
    EndWpg = 0x10,
    PostScriptType1 = 0x11,
    OutputAttributes = 0x12,
    CurvedPolyline = 0x13,
    BitmapType2 = 0x14,
    StartFigure = 0x15,
    StartChart = 0x16,
    PlanPerfectData = 0x17,
    GraphicsText2 = 0x18,
    StartWpg2 = 0x19,
    GraphicsText3 = 0x1A,
    PostScriptType2 = 0x1B,
}

impl Wpg1RecordType {
    pub fn from_u8(value: u8) -> Option<Self> {
        use Wpg1RecordType::*;
        Some(match value {
            0x01 => FillAttributes,
            0x02 => LineAttributes,
            0x03 => MarkerAttributes,
            0x04 => PolyMarker,
            0x05 => Line,
            0x06 => Polyline,
            0x07 => Rectangle,
            0x08 => Polygon,
            0x09 => Ellipse,
            0x0B => BitmapType1,
            0x0C => GraphicsText,
            0x0D => GraphicsTextAttributes,
            0x0E => ColorMap,
            0x0F => StartWpg,
            0x10 => EndWpg,
            0x11 => PostScriptType1,
            0x12 => OutputAttributes,
            0x13 => CurvedPolyline,
            0x14 => BitmapType2,
            0x15 => StartFigure,
            0x16 => StartChart,
            0x17 => PlanPerfectData,
            0x18 => GraphicsText2,
            0x19 => StartWpg2,
            0x1A => GraphicsText3,
            0x1B => PostScriptType2,
            _ => return None,
        })
    }
}

/// Dash patterns for line styles 2..=7, in pen widths.
pub(crate) fn line_style_dashes(style: u8) -> Option<&'static [f64]> {
    Some(match style {
        2 => &[6.0, 2.0],
        3 => &[1.0, 2.0],
        4 => &[4.0, 2.0, 1.0, 2.0],
        5 => &[4.0, 2.0],
        6 => &[4.0, 2.0, 1.0, 2.0, 1.0, 2.0],
        7 => &[2.0, 2.0],
        _ => return None,
    })
}
