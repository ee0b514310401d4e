//! Error conversion implementations.
//!
//! This module contains From trait implementations to convert from internal
//! error types to the unified Error type.

use super::types::Error;
use crate::common::binary::BinaryError;

impl From<BinaryError> for Error {
    fn from(err: BinaryError) -> Self {
        match err {
            BinaryError::InsufficientData {
                expected,
                available,
            } => Error::TruncatedInput {
                expected,
                available,
            },
        }
    }
}

#[cfg(feature = "ole")]
impl From<crate::ole::OleError> for Error {
    fn from(err: crate::ole::OleError) -> Self {
        match err {
            crate::ole::OleError::Io(e) => Error::Io(e),
            crate::ole::OleError::NotOleFile => {
                Error::MalformedContainer("Not an OLE file".to_string())
            },
            crate::ole::OleError::InvalidHeader(s) => Error::MalformedContainer(s),
            crate::ole::OleError::CorruptedFile(s) => Error::MalformedContainer(s),
            crate::ole::OleError::StreamNotFound(s) => Error::StreamNotFound(s),
        }
    }
}
