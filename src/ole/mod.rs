//! OLE2 / Compound File Binary container reader
//!
//! WordPerfect stores graphics embedded in compound documents under the
//! `PerfectOffice_MAIN` stream. This module reads just enough of the format
//! to locate and extract such streams: the header, the big and small block
//! allocation tables, the directory and the block chains behind each stream.
//!
//! Chain following and directory traversal are iterative and remember the
//! blocks/entries already visited, so cyclic tables in hostile files are
//! reported as errors instead of hanging the reader.

/// Constants for the compound file format
pub mod consts;

/// Fixed 512-byte container header
pub mod header;

/// Block allocation tables and chain following
pub mod alloc_table;

/// Directory entries and the sibling tree
pub mod directory;

/// Container loading and stream lookup
mod file;

/// Positioned reads over a stream's block chain
mod stream;


use thiserror::Error;

pub use alloc_table::AllocationTable;
pub use directory::{DirectoryEntry, DirectoryTree};
pub use file::{OleFile, is_ole_file};
pub use header::ContainerHeader;
pub use stream::OleStream;

/// Error types for compound file parsing
#[derive(Error, Debug)]
pub enum OleError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Not an OLE file")]
    NotOleFile,

    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    #[error("Corrupted file: {0}")]
    CorruptedFile(String),

    #[error("Stream not found: {0}")]
    StreamNotFound(String),
}

impl From<crate::common::binary::BinaryError> for OleError {
    fn from(err: crate::common::binary::BinaryError) -> Self {
        OleError::CorruptedFile(err.to_string())
    }
}
