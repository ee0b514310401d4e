//! wpgraphics - A Rust library for importing WordPerfect Graphics files
//!
//! This library reads WPG vector drawings in both format generations (WPG1
//! and WPG2), standalone or embedded in the compound documents written by
//! WordPerfect, and replays them as calls on an abstract [`PaintSink`].
//!
//! # Features
//!
//! - **WPG1 and WPG2**: Header validation and record parsing for both versions
//! - **Embedded graphics**: Transparent unwrapping of the `PerfectOffice_MAIN`
//!   stream from OLE2 compound documents (`ole` feature)
//! - **Paint interface**: Device-independent pens, brushes, gradients, paths
//! - **SVG output**: A ready-made sink producing SVG documents (`svg` feature)
//!
//! # Example - Recording draw calls
//!
//! ```no_run
//! use wpgraphics::{PaintCall, PaintRecorder};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let data = std::fs::read("drawing.wpg")?;
//! let mut recorder = PaintRecorder::new();
//! wpgraphics::parse_bytes(&data, &mut recorder)?;
//!
//! for call in recorder.calls() {
//!     if let PaintCall::Rectangle { rect, .. } = call {
//!         println!("rectangle {}x{} in", rect.width(), rect.height());
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Converting to SVG
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let data = std::fs::read("drawing.wpg")?;
//! let svg = wpgraphics::convert_wpg_to_svg(&data)?;
//! std::fs::write("drawing.svg", svg)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Low-level OLE access
//!
//! ```no_run
//! use std::fs::File;
//! use wpgraphics::ole::OleFile;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let file = File::open("letter.wpd")?;
//! let mut ole = OleFile::open(file)?;
//!
//! for stream in ole.list_streams() {
//!     println!("Stream: {}", stream);
//! }
//!
//! let data = ole.open_stream("PerfectOffice_MAIN")?;
//! println!("Embedded graphic: {} bytes", data.len());
//! # Ok(())
//! # }
//! ```

/// Error types and little-endian helpers shared by every module
pub mod common;

/// Colors, geometry, pens, brushes and the paint sink interface
pub mod graphics;

/// OLE2 (Compound File Binary) container reader
///
/// Used to pull WPG data out of WordPerfect documents.
#[cfg(feature = "ole")]
pub mod ole;

/// WPG header validation and record parsers
pub mod wpg;

/// SVG paint sink
#[cfg(feature = "svg")]
pub mod svg;

pub use common::{Error, Result};
pub use graphics::{
    Brush, BrushStyle, Color, DashArray, FillRule, Gradient, GradientStop, PaintCall,
    PaintRecorder, PaintSink, Path, PathElement, Pen, Point, PointArray, Rect,
};
pub use wpg::{is_supported, is_supported_bytes, parse, parse_bytes};

#[cfg(feature = "svg")]
pub use svg::{SvgGenerator, SvgOptions};
#[cfg(feature = "svg")]
pub use wpg::convert_wpg_to_svg;
