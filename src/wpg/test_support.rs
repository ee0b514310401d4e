//! Builders for synthetic WPG documents.

use super::header::{FILE_TYPE, PRODUCT_TYPE, WPG_MAGIC, WpgHeader};
use super::stream::write_variable_length_integer;

/// Little-endian payload writer.
#[derive(Debug, Clone, Default)]
pub(crate) struct Payload(pub Vec<u8>);

impl Payload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn u8(mut self, v: u8) -> Self {
        self.0.push(v);
        self
    }

    pub fn u16(mut self, v: u16) -> Self {
        self.0.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn s16(mut self, v: i16) -> Self {
        self.0.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn u32(mut self, v: u32) -> Self {
        self.0.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn s32(mut self, v: i32) -> Self {
        self.0.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn bytes(mut self, v: &[u8]) -> Self {
        self.0.extend_from_slice(v);
        self
    }

    pub fn points(self, points: &[(i16, i16)]) -> Self {
        points
            .iter()
            .fold(self, |payload, &(x, y)| payload.s16(x).s16(y))
    }
}

/// 16-byte file header for the given major version.
pub(crate) fn wpg_header(major: u8) -> Vec<u8> {
    let mut data = WPG_MAGIC.to_vec();
    data.extend_from_slice(&(WpgHeader::SIZE as u32).to_le_bytes());
    data.extend_from_slice(&[PRODUCT_TYPE, FILE_TYPE, major, 0, 0, 0, 0, 0]);
    data
}

/// WPG2 document builder.
#[derive(Debug, Clone)]
pub(crate) struct Wpg2Builder {
    data: Vec<u8>,
}

impl Wpg2Builder {
    pub fn new() -> Self {
        Self {
            data: wpg_header(2),
        }
    }

    /// Append a record; returns the offset of its payload.
    pub fn record_at(&mut self, record_type: u8, extension: u32, payload: &[u8]) -> u64 {
        self.data.push(0x0E);
        self.data.push(record_type);
        write_variable_length_integer(&mut self.data, extension);
        write_variable_length_integer(&mut self.data, payload.len() as u32);
        let offset = self.data.len() as u64;
        self.data.extend_from_slice(payload);
        offset
    }

    pub fn record(mut self, record_type: u8, extension: u32, payload: Payload) -> Self {
        self.record_at(record_type, extension, &payload.0);
        self
    }

    /// Start WPG record with single precision coordinates.
    pub fn start(self, x_res: u16, y_res: u16, image: [i16; 4]) -> Self {
        let payload = Payload::new()
            .u16(x_res)
            .u16(y_res)
            .u8(0)
            .s16(image[0])
            .s16(image[1])
            .s16(image[2])
            .s16(image[3])
            .s16(image[0])
            .s16(image[1])
            .s16(image[2])
            .s16(image[3]);
        self.record(0x01, 0, payload)
    }

    /// Start WPG record with double precision coordinates.
    pub fn start_dp(self, x_res: u16, y_res: u16, image: [i32; 4]) -> Self {
        let mut payload = Payload::new().u16(x_res).u16(y_res).u8(1);
        for _ in 0..2 {
            for v in image {
                payload = payload.s32(v);
            }
        }
        self.record(0x01, 0, payload)
    }

    pub fn end(self) -> Self {
        self.record(0x02, 0, Payload::new())
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn build(self) -> Vec<u8> {
        self.data
    }
}

/// WPG1 document builder.
#[derive(Debug, Clone)]
pub(crate) struct Wpg1Builder {
    data: Vec<u8>,
}

impl Wpg1Builder {
    pub fn new() -> Self {
        Self {
            data: wpg_header(1),
        }
    }

    pub fn record(mut self, record_type: u8, payload: Payload) -> Self {
        self.data.push(record_type);
        write_variable_length_integer(&mut self.data, payload.0.len() as u32);
        self.data.extend_from_slice(&payload.0);
        self
    }

    /// Start WPG record for a page of `width`×`height` units (1200/inch).
    pub fn start(self, width: u16, height: u16) -> Self {
        self.record(0x0F, Payload::new().u8(1).u8(0).u16(width).u16(height))
    }

    pub fn end(self) -> Self {
        self.record(0x10, Payload::new())
    }

    pub fn build(self) -> Vec<u8> {
        self.data
    }
}
