use super::OleError;
use super::consts::*;
use zerocopy::{FromBytes, LE, U16, U32};
use zerocopy_derive::FromBytes as DeriveFromBytes;

/// Raw compound file header (512 bytes)
#[derive(Debug, Clone, DeriveFromBytes)]
#[repr(C)]
struct RawHeader {
    magic: [u8; 8],
    clsid: [u8; 16],
    minor_version: U16<LE>,
    dll_version: U16<LE>,
    byte_order: U16<LE>,
    /// log2 of the big block size
    sector_shift: U16<LE>,
    /// log2 of the small block size
    mini_sector_shift: U16<LE>,
    reserved: [u8; 6],
    num_dir_sectors: U32<LE>,
    num_fat_sectors: U32<LE>,
    first_dir_sector: U32<LE>,
    transaction_signature: U32<LE>,
    mini_stream_cutoff: U32<LE>,
    first_minifat_sector: U32<LE>,
    num_minifat_sectors: U32<LE>,
    first_difat_sector: U32<LE>,
    num_difat_sectors: U32<LE>,
    /// First 109 FAT sector indices
    difat: [U32<LE>; HEADER_BAT_ENTRIES],
}

/// Parsed container header.
///
/// Field names follow the allocation-table vocabulary used by the reader:
/// "bat" is the big-block table, "sbat" the small-block table and "mbat" the
/// meta table that lists big-table blocks beyond the first 109.
#[derive(Debug, Clone)]
pub struct ContainerHeader {
    pub big_shift: u16,
    pub small_shift: u16,
    pub num_bat: u32,
    pub dirent_start: u32,
    pub threshold: u32,
    pub sbat_start: u32,
    pub num_sbat: u32,
    pub mbat_start: u32,
    pub num_mbat: u32,
    pub bb_blocks: [u32; HEADER_BAT_ENTRIES],
}

impl ContainerHeader {
    /// Parse the header block. Only the magic is checked here; structural
    /// checks are done by [`ContainerHeader::is_valid`].
    pub fn parse(data: &[u8]) -> Result<Self, OleError> {
        if data.len() < HEADER_SIZE {
            return Err(OleError::NotOleFile);
        }
        let raw = RawHeader::read_from_bytes(&data[..HEADER_SIZE])
            .map_err(|_| OleError::InvalidHeader("Failed to parse header".to_string()))?;
        if &raw.magic != MAGIC {
            return Err(OleError::NotOleFile);
        }

        let mut bb_blocks = [FREESECT; HEADER_BAT_ENTRIES];
        for (slot, value) in bb_blocks.iter_mut().zip(raw.difat.iter()) {
            *slot = value.get();
        }

        Ok(Self {
            big_shift: raw.sector_shift.get(),
            small_shift: raw.mini_sector_shift.get(),
            num_bat: raw.num_fat_sectors.get(),
            dirent_start: raw.first_dir_sector.get(),
            threshold: raw.mini_stream_cutoff.get(),
            sbat_start: raw.first_minifat_sector.get(),
            num_sbat: raw.num_minifat_sectors.get(),
            mbat_start: raw.first_difat_sector.get(),
            num_mbat: raw.num_difat_sectors.get(),
            bb_blocks,
        })
    }

    /// Structural sanity checks. A header failing them is not read further.
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    pub(crate) fn validate(&self) -> Result<(), OleError> {
        let fail = |msg: &str| Err(OleError::InvalidHeader(msg.to_string()));

        if self.threshold != SMALL_BLOCK_THRESHOLD {
            return fail("unexpected small stream threshold");
        }
        if self.big_shift <= 6 || self.big_shift >= 31 {
            return fail("big block shift out of range");
        }
        if self.small_shift > self.big_shift {
            return fail("small blocks larger than big blocks");
        }
        if self.num_bat == 0 {
            return fail("no allocation table blocks");
        }

        let header_entries = HEADER_BAT_ENTRIES as u64;
        let num_bat = u64::from(self.num_bat);
        if num_bat < header_entries && self.num_mbat != 0 {
            return fail("meta table present for a small allocation table");
        }
        let per_meta_block = (self.big_block_size() / 4 - 1) as u64;
        if num_bat > header_entries && num_bat > header_entries + u64::from(self.num_mbat) * per_meta_block {
            return fail("allocation table blocks not covered by the meta table");
        }
        Ok(())
    }

    #[inline]
    pub fn big_block_size(&self) -> usize {
        1usize << self.big_shift
    }

    #[inline]
    pub fn small_block_size(&self) -> usize {
        1usize << self.small_shift
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header_bytes() -> Vec<u8> {
        let mut data = vec![0u8; HEADER_SIZE];
        data[..8].copy_from_slice(MAGIC);
        data[0x1A..0x1C].copy_from_slice(&3u16.to_le_bytes());
        data[0x1C..0x1E].copy_from_slice(&0xFFFEu16.to_le_bytes());
        data[0x1E..0x20].copy_from_slice(&9u16.to_le_bytes());
        data[0x20..0x22].copy_from_slice(&6u16.to_le_bytes());
        data[0x2C..0x30].copy_from_slice(&1u32.to_le_bytes());
        data[0x30..0x34].copy_from_slice(&1u32.to_le_bytes());
        data[0x38..0x3C].copy_from_slice(&4096u32.to_le_bytes());
        data[0x3C..0x40].copy_from_slice(&ENDOFCHAIN.to_le_bytes());
        data[0x44..0x48].copy_from_slice(&ENDOFCHAIN.to_le_bytes());
        for i in 0..HEADER_BAT_ENTRIES {
            let off = 0x4C + i * 4;
            data[off..off + 4].copy_from_slice(&FREESECT.to_le_bytes());
        }
        data[0x4C..0x50].copy_from_slice(&0u32.to_le_bytes());
        data
    }

    #[test]
    fn test_parse_header_fields() {
        let header = ContainerHeader::parse(&header_bytes()).unwrap();
        assert_eq!(header.big_block_size(), 512);
        assert_eq!(header.small_block_size(), 64);
        assert_eq!(header.num_bat, 1);
        assert_eq!(header.dirent_start, 1);
        assert_eq!(header.bb_blocks[0], 0);
        assert_eq!(header.bb_blocks[1], FREESECT);
        assert!(header.is_valid());
    }

    #[test]
    fn test_bad_magic() {
        let mut data = header_bytes();
        data[0] = 0;
        assert!(matches!(ContainerHeader::parse(&data), Err(OleError::NotOleFile)));
    }

    #[test]
    fn test_structural_checks() {
        let base = ContainerHeader::parse(&header_bytes()).unwrap();

        let mut h = base.clone();
        h.threshold = 2048;
        assert!(!h.is_valid());

        let mut h = base.clone();
        h.small_shift = 10;
        assert!(!h.is_valid());

        let mut h = base.clone();
        h.big_shift = 6;
        assert!(!h.is_valid());

        let mut h = base.clone();
        h.num_bat = 0;
        assert!(!h.is_valid());

        let mut h = base.clone();
        h.num_mbat = 1;
        assert!(!h.is_valid());

        let mut h = base;
        h.num_bat = 300;
        h.num_mbat = 1;
        assert!(!h.is_valid());
        h.num_mbat = 2;
        assert!(h.is_valid());
    }
}
