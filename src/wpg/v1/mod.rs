//! WPG version 1 parser.
//!
//! Records are a type byte and a variable-length payload size; coordinates
//! are signed 16-bit values at 1200 units per inch with the y axis pointing
//! up. Colors are palette indices.

mod parser;
mod records;

pub use parser::{Wpg1State, parse};
pub use records::Wpg1RecordType;
