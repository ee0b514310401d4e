//! WPG version 2 parser.
//!
//! Records are framed by a class byte, a type byte and two variable-length
//! integers (sub-record count and payload length). Records with a non-zero
//! sub-record count open a subgroup; compound polygons use this to collect
//! the outlines of their children into one path.

pub mod characterization;
pub mod parser;
pub mod records;
pub mod state;

#[cfg(test)]
mod tests;

pub use characterization::{CharacterizationFlags, ObjectCharacterization};
pub use parser::parse;
pub use records::{RecordHeader, Wpg2RecordType};
pub use state::{GroupContext, Wpg2State};
