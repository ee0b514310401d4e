//! Object characterization: the flag word and optional transform block that
//! prefixes every WPG2 shape record.

use crate::wpg::stream::WpgInput;
use crate::wpg::transform::TransformMatrix;
use bitflags::bitflags;
use std::io::{Read, Seek};

bitflags! {
    /// Which optional fields follow, plus the shape's rendering flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct CharacterizationFlags: u16 {
        const TAPER = 0x0001;
        const TRANSLATE = 0x0002;
        const SKEW = 0x0004;
        const SCALE = 0x0008;
        const ROTATE = 0x0010;
        const OBJECT_ID = 0x0020;
        const EDIT_LOCK = 0x0080;
        const WINDING = 0x1000;
        const FILLED = 0x2000;
        const CLOSED = 0x4000;
        const FRAMED = 0x8000;
    }
}

/// Decoded characterization block.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectCharacterization {
    pub flags: CharacterizationFlags,
    pub lock_flags: u32,
    pub object_id: u32,
    /// Degrees
    pub rotation_angle: f64,
    pub matrix: TransformMatrix,
}

/// 16.16 fixed point
#[inline]
fn fixed(value: i32) -> f64 {
    f64::from(value) / 65536.0
}

impl ObjectCharacterization {
    /// Read the block at the current position.
    ///
    /// Field order is fixed: lock flags, object id, rotation, scale, skew,
    /// translation, taper; each is present only when its flag (or, for scale
    /// and skew, the rotate flag) is set.
    pub fn read<R: Read + Seek>(input: &mut WpgInput<R>) -> Self {
        let flags = CharacterizationFlags::from_bits_retain(input.read_u16());
        let mut ch = ObjectCharacterization {
            flags,
            ..Default::default()
        };

        if flags.contains(CharacterizationFlags::EDIT_LOCK) {
            ch.lock_flags = input.read_u32();
        }

        if flags.contains(CharacterizationFlags::OBJECT_ID) {
            let first = input.read_u16();
            ch.object_id = if first & 0x8000 != 0 {
                (u32::from(first & 0x7FFF) << 16) | u32::from(input.read_u16())
            } else {
                u32::from(first)
            };
        }

        if flags.contains(CharacterizationFlags::ROTATE) {
            let fraction = input.read_u16();
            let integer = input.read_u16();
            ch.rotation_angle = f64::from(integer) + f64::from(fraction) / 65536.0;
        }

        let e = &mut ch.matrix.element;
        if flags.intersects(CharacterizationFlags::ROTATE | CharacterizationFlags::SCALE) {
            e[0][0] = fixed(input.read_s32());
            e[1][1] = fixed(input.read_s32());
        }

        if flags.intersects(CharacterizationFlags::ROTATE | CharacterizationFlags::SKEW) {
            e[1][0] = fixed(input.read_s32());
            e[0][1] = fixed(input.read_s32());
        }

        if flags.contains(CharacterizationFlags::TRANSLATE) {
            let x_fraction = input.read_u16();
            let x_integer = input.read_s32();
            let y_fraction = input.read_u16();
            let y_integer = input.read_s32();
            e[2][0] = f64::from(x_integer) + f64::from(x_fraction) / 65536.0;
            e[2][1] = f64::from(y_integer) + f64::from(y_fraction) / 65536.0;
        }

        if flags.contains(CharacterizationFlags::TAPER) {
            e[0][2] = f64::from(input.read_s32());
            e[1][2] = f64::from(input.read_s32());
        }

        ch
    }

    #[inline]
    pub fn filled(&self) -> bool {
        self.flags.contains(CharacterizationFlags::FILLED)
    }

    #[inline]
    pub fn framed(&self) -> bool {
        self.flags.contains(CharacterizationFlags::FRAMED)
    }

    #[inline]
    pub fn closed(&self) -> bool {
        self.flags.contains(CharacterizationFlags::CLOSED)
    }

    #[inline]
    pub fn winding(&self) -> bool {
        self.flags.contains(CharacterizationFlags::WINDING)
    }
}
