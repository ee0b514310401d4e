//! Little-endian primitive reader used by the record parsers.
//!
//! Reads never fail: past the end of the input they yield zero and latch a
//! truncation flag. Record handlers rely on the caller seeking to the record's
//! declared end afterwards, so a short read only spoils the current record.

use crate::common::Result;
use std::io::{Read, Seek, SeekFrom};

/// Byte source for WPG parsing.
#[derive(Debug)]
pub struct WpgInput<R: Read + Seek> {
    inner: R,
    pos: u64,
    len: u64,
    truncated: bool,
}

impl<R: Read + Seek> WpgInput<R> {
    /// Wrap a reader, positioned at its start.
    pub fn new(mut inner: R) -> Result<Self> {
        let len = inner.seek(SeekFrom::End(0))?;
        inner.seek(SeekFrom::Start(0))?;
        Ok(Self {
            inner,
            pos: 0,
            len,
            truncated: false,
        })
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Total input length in bytes
    #[inline]
    pub fn len(&self) -> u64 {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn tell(&self) -> u64 {
        self.pos
    }

    #[inline]
    pub fn at_eos(&self) -> bool {
        self.pos >= self.len
    }

    /// Whether any read ran past the end of the input
    #[inline]
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    pub fn clear_truncated(&mut self) {
        self.truncated = false;
    }

    /// Move to an absolute offset, clamped to the input length.
    pub fn seek(&mut self, pos: u64) {
        let target = pos.min(self.len);
        if target != pos {
            self.truncated = true;
        }
        match self.inner.seek(SeekFrom::Start(target)) {
            Ok(p) => self.pos = p,
            Err(e) => {
                log::warn!("seek to {} failed: {}", target, e);
                self.pos = self.len;
                self.truncated = true;
            },
        }
    }

    pub fn skip(&mut self, count: u64) {
        self.seek(self.pos.saturating_add(count));
    }

    /// The single primitive every other read is built on.
    pub fn read_u8(&mut self) -> u8 {
        if self.pos >= self.len {
            self.truncated = true;
            return 0;
        }
        let mut byte = [0u8; 1];
        match self.inner.read_exact(&mut byte) {
            Ok(()) => {
                self.pos += 1;
                byte[0]
            },
            Err(_) => {
                self.truncated = true;
                self.pos = self.len;
                0
            },
        }
    }

    #[inline]
    pub fn read_u16(&mut self) -> u16 {
        let lo = self.read_u8();
        let hi = self.read_u8();
        u16::from_le_bytes([lo, hi])
    }

    #[inline]
    pub fn read_s16(&mut self) -> i16 {
        self.read_u16() as i16
    }

    #[inline]
    pub fn read_u32(&mut self) -> u32 {
        let lo = self.read_u16();
        let hi = self.read_u16();
        u32::from(lo) | (u32::from(hi) << 16)
    }

    #[inline]
    pub fn read_s32(&mut self) -> i32 {
        self.read_u32() as i32
    }

    /// Decode a variable-length integer.
    ///
    /// A first byte below `0xFF` is the value. `0xFF` introduces a 16-bit
    /// word; if the word's top bit is set, its low 15 bits are the high half
    /// of a 31-bit value whose low half follows as a second word.
    pub fn read_variable_length_integer(&mut self) -> u32 {
        let first = self.read_u8();
        if first != 0xFF {
            return u32::from(first);
        }
        let word = self.read_u16();
        if word & 0x8000 == 0 {
            return u32::from(word);
        }
        let low = self.read_u16();
        (u32::from(word & 0x7FFF) << 16) | u32::from(low)
    }
}

/// Largest value the variable-length encoding can carry
pub const VARIABLE_LENGTH_MAX: u32 = 0x7FFF_FFFF;

/// Encoded size in bytes of `value`: 1, 3 or 5.
pub fn variable_length_size(value: u32) -> usize {
    match value {
        0..=0xFE => 1,
        0xFF..=0x7FFF => 3,
        _ => 5,
    }
}

/// Append the variable-length encoding of `value` to `out`.
///
/// Values above [`VARIABLE_LENGTH_MAX`] lose their top bit.
pub fn write_variable_length_integer(out: &mut Vec<u8>, value: u32) {
    let value = value & VARIABLE_LENGTH_MAX;
    match variable_length_size(value) {
        1 => out.push(value as u8),
        3 => {
            out.push(0xFF);
            out.extend_from_slice(&(value as u16).to_le_bytes());
        },
        _ => {
            out.push(0xFF);
            out.extend_from_slice(&(((value >> 16) as u16) | 0x8000).to_le_bytes());
            out.extend_from_slice(&(value as u16).to_le_bytes());
        },
    }
}
