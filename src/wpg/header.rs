//! WPG file header: 16 bytes at offset 0 shared by both format generations.

use super::stream::WpgInput;
use crate::common::{Error, Result};
use std::io::{Read, Seek};
use zerocopy::{FromBytes, LE, U16, U32};
use zerocopy_derive::FromBytes as DeriveFromBytes;

/// `FF 'W' 'P' 'C'`
pub const WPG_MAGIC: [u8; 4] = [0xFF, b'W', b'P', b'C'];
/// WordPerfect product code
pub const PRODUCT_TYPE: u8 = 0x01;
/// Graphics file code
pub const FILE_TYPE: u8 = 0x16;

#[derive(Debug, Clone, DeriveFromBytes)]
#[repr(C)]
struct RawWpgHeader {
    magic: [u8; 4],
    start_of_document: U32<LE>,
    product_type: u8,
    file_type: u8,
    major_version: u8,
    minor_version: u8,
    encryption_key: U16<LE>,
    start_of_packet_data: U16<LE>,
}

/// Format generation, selected by the major version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WpgVersion {
    V1,
    V2,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WpgHeader {
    pub magic: [u8; 4],
    /// Offset of the first record
    pub start_of_document: u32,
    pub product_type: u8,
    pub file_type: u8,
    pub major_version: u8,
    pub minor_version: u8,
    /// Non-zero for encrypted files
    pub encryption_key: u16,
    pub start_of_packet_data: u16,
}

impl WpgHeader {
    pub const SIZE: usize = 16;

    /// Parse the fixed fields. No validation beyond length.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < Self::SIZE {
            return Err(Error::TruncatedInput {
                expected: Self::SIZE,
                available: data.len(),
            });
        }
        let raw = RawWpgHeader::read_from_bytes(&data[..Self::SIZE]).map_err(|_| {
            Error::TruncatedInput {
                expected: Self::SIZE,
                available: data.len(),
            }
        })?;
        Ok(Self {
            magic: raw.magic,
            start_of_document: raw.start_of_document.get(),
            product_type: raw.product_type,
            file_type: raw.file_type,
            major_version: raw.major_version,
            minor_version: raw.minor_version,
            encryption_key: raw.encryption_key.get(),
            start_of_packet_data: raw.start_of_packet_data.get(),
        })
    }

    /// Read the header from the start of `input`.
    pub fn load<R: Read + Seek>(input: &mut WpgInput<R>) -> Result<Self> {
        input.seek(0);
        input.clear_truncated();
        let mut bytes = [0u8; Self::SIZE];
        for byte in bytes.iter_mut() {
            *byte = input.read_u8();
        }
        if input.is_truncated() {
            return Err(Error::TruncatedInput {
                expected: Self::SIZE,
                available: input.len() as usize,
            });
        }
        Self::from_bytes(&bytes)
    }

    #[inline]
    pub fn is_supported(&self) -> bool {
        self.validate().is_ok()
    }

    /// Accept only unencrypted WPG graphics files of version 1.0 or 2.0.
    pub fn validate(&self) -> Result<WpgVersion> {
        let reject = |reason: String| Err(Error::UnsupportedFormat(reason));

        if self.magic != WPG_MAGIC {
            return reject("bad magic".to_string());
        }
        if self.product_type != PRODUCT_TYPE {
            return reject(format!("product type {:#04x}", self.product_type));
        }
        if self.file_type != FILE_TYPE {
            return reject(format!("file type {:#04x}", self.file_type));
        }
        if self.encryption_key != 0 {
            return reject("encrypted file".to_string());
        }
        if self.minor_version != 0 {
            return reject(format!("minor version {}", self.minor_version));
        }
        match self.major_version {
            1 => Ok(WpgVersion::V1),
            2 => Ok(WpgVersion::V2),
            major => reject(format!("major version {}", major)),
        }
    }
}
