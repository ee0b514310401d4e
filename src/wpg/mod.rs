//! WordPerfect Graphics import.
//!
//! Both format generations share a 16-byte header; the major version picks
//! the record parser. WordPerfect documents may also carry a WPG file inside
//! a compound document under the [`EMBEDDED_STREAM`] stream, which is
//! unwrapped transparently when the `ole` feature is enabled.
//!
//! # Example
//!
//! ```no_run
//! use wpgraphics::graphics::PaintRecorder;
//! use wpgraphics::wpg;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let data = std::fs::read("drawing.wpg")?;
//! if wpg::is_supported_bytes(&data) {
//!     let mut recorder = PaintRecorder::new();
//!     wpg::parse_bytes(&data, &mut recorder)?;
//!     println!("{} shapes", recorder.shapes().count());
//! }
//! # Ok(())
//! # }
//! ```

pub mod header;
pub mod palette;
pub mod stream;
pub mod transform;
pub mod v1;
pub mod v2;

#[cfg(test)]
pub(crate) mod test_support;


use crate::common::Result;
use crate::graphics::PaintSink;
use log::debug;
use std::io::{Cursor, Read, Seek, SeekFrom};

pub use header::{WpgHeader, WpgVersion};
pub use palette::Palette;
pub use stream::WpgInput;
pub use transform::TransformMatrix;

/// Compound-document stream holding an embedded WPG file.
pub const EMBEDDED_STREAM: &str = "PerfectOffice_MAIN";

/// Extract the embedded WPG stream when `input` is a compound document.
///
/// Returns `None` when the input is not a compound document, the stream is
/// missing or unreadable, or the stream is empty. The reader is left at
/// offset 0 in every case.
#[cfg(feature = "ole")]
pub fn embedded_document<R: Read + Seek>(input: &mut R) -> Option<Vec<u8>> {
    input.seek(SeekFrom::Start(0)).ok()?;
    let mut signature = [0u8; 8];
    let sniffed = input.read_exact(&mut signature).is_ok();
    input.seek(SeekFrom::Start(0)).ok()?;
    if !sniffed || !crate::ole::is_ole_file(&signature) {
        return None;
    }

    let extracted = crate::ole::OleFile::open(&mut *input)
        .and_then(|mut ole| ole.open_stream(EMBEDDED_STREAM));
    input.seek(SeekFrom::Start(0)).ok()?;

    match extracted {
        Ok(data) if !data.is_empty() => {
            debug!("using embedded {} stream ({} bytes)", EMBEDDED_STREAM, data.len());
            Some(data)
        },
        Ok(_) => {
            debug!("embedded {} stream is empty", EMBEDDED_STREAM);
            None
        },
        Err(e) => {
            debug!("no usable embedded {} stream: {}", EMBEDDED_STREAM, e);
            None
        },
    }
}

#[cfg(not(feature = "ole"))]
pub fn embedded_document<R: Read + Seek>(input: &mut R) -> Option<Vec<u8>> {
    let _ = input.seek(SeekFrom::Start(0));
    None
}

/// Check whether `input` holds a WPG file this crate can parse.
///
/// Only the header is inspected; no records are read.
pub fn is_supported<R: Read + Seek>(mut input: R) -> bool {
    match embedded_document(&mut input) {
        Some(data) => header_is_supported(Cursor::new(data)),
        None => header_is_supported(input),
    }
}

/// Byte-slice form of [`is_supported`].
pub fn is_supported_bytes(data: &[u8]) -> bool {
    is_supported(Cursor::new(data))
}

fn header_is_supported<R: Read + Seek>(input: R) -> bool {
    let Ok(mut input) = WpgInput::new(input) else {
        return false;
    };
    WpgHeader::load(&mut input).is_ok_and(|header| header.is_supported())
}

/// Parse a WPG file, standalone or embedded, into `sink`.
///
/// Header and container problems are reported before the sink sees any
/// call. Once drawing has started, damaged records are skipped and the
/// document is always closed with [`PaintSink::end_document`].
pub fn parse<R, S>(mut input: R, sink: &mut S) -> Result<()>
where
    R: Read + Seek,
    S: PaintSink + ?Sized,
{
    match embedded_document(&mut input) {
        Some(data) => parse_document(Cursor::new(data), sink),
        None => parse_document(input, sink),
    }
}

/// Byte-slice form of [`parse`].
pub fn parse_bytes<S: PaintSink + ?Sized>(data: &[u8], sink: &mut S) -> Result<()> {
    parse(Cursor::new(data), sink)
}

fn parse_document<R, S>(input: R, sink: &mut S) -> Result<()>
where
    R: Read + Seek,
    S: PaintSink + ?Sized,
{
    let mut input = WpgInput::new(input)?;
    let header = WpgHeader::load(&mut input)?;
    let version = header.validate()?;
    debug!(
        "WPG {:?} header, records start at {}",
        version, header.start_of_document
    );

    input.seek(u64::from(header.start_of_document));
    match version {
        WpgVersion::V1 => v1::parse(&mut input, sink),
        WpgVersion::V2 => v2::parse(&mut input, sink),
    }
}

/// Convert a WPG file to an SVG document with default options.
#[cfg(feature = "svg")]
pub fn convert_wpg_to_svg(data: &[u8]) -> Result<String> {
    let mut generator = crate::svg::SvgGenerator::new(crate::svg::SvgOptions::default());
    parse_bytes(data, &mut generator)?;
    Ok(generator.into_svg())
}
