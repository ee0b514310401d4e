use super::OleError;
use super::consts::{DIFSECT, ENDOFCHAIN, FATSECT, FREESECT};
use crate::common::binary::u32_words_le;
use fixedbitset::FixedBitSet;

/// Block allocation table: maps each block to the next block of its chain.
///
/// Used for both the big-block table and the small-block table. Indices
/// past the end of the backing array read as [`AllocationTable::AVAIL`].
#[derive(Debug, Clone)]
pub struct AllocationTable {
    block_size: usize,
    data: Vec<u32>,
}

impl AllocationTable {
    pub const EOF: u32 = ENDOFCHAIN;
    pub const AVAIL: u32 = FREESECT;
    pub const BAT: u32 = FATSECT;
    pub const META_BAT: u32 = DIFSECT;

    pub fn new(block_size: usize) -> Self {
        Self {
            block_size,
            data: Vec::new(),
        }
    }

    #[inline]
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.data.len()
    }

    /// Grow or shrink to `count` entries, new entries unallocated.
    pub fn resize(&mut self, count: usize) {
        self.data.resize(count, Self::AVAIL);
    }

    #[inline]
    pub fn get(&self, index: usize) -> u32 {
        self.data.get(index).copied().unwrap_or(Self::AVAIL)
    }

    /// Store `value` at `index`, growing the table when needed.
    pub fn set(&mut self, index: usize, value: u32) {
        if index >= self.data.len() {
            self.resize(index + 1);
        }
        self.data[index] = value;
    }

    /// Append the little-endian entries of a table block.
    pub fn load(&mut self, buffer: &[u8]) {
        self.data.extend(u32_words_le(buffer));
    }

    /// Walk the chain starting at `start`.
    ///
    /// Stops at an end/table marker or at any index outside the table. A
    /// block reached twice means the table is cyclic and is reported as
    /// [`OleError::CorruptedFile`].
    pub fn follow(&self, start: u32) -> Result<Vec<u32>, OleError> {
        let mut chain = Vec::new();
        let count = self.count();
        let mut visited = FixedBitSet::with_capacity(count);

        let mut p = start;
        while (p as usize) < count {
            if p == Self::EOF || p == Self::BAT || p == Self::META_BAT {
                break;
            }
            if visited.contains(p as usize) {
                log::warn!("cycle in allocation table at block {}", p);
                return Err(OleError::CorruptedFile(format!(
                    "cyclic block chain at block {}",
                    p
                )));
            }
            visited.insert(p as usize);
            chain.push(p);
            p = self.data[p as usize];
        }
        Ok(chain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_follow_acyclic_chain() {
        let mut table = AllocationTable::new(512);
        table.set(0, 2);
        table.set(2, 5);
        table.set(5, AllocationTable::EOF);
        table.set(1, AllocationTable::BAT);

        assert_eq!(table.count(), 6);
        assert_eq!(table.get(3), AllocationTable::AVAIL);
        assert_eq!(table.get(100), AllocationTable::AVAIL);
        assert_eq!(table.follow(0).unwrap(), vec![0, 2, 5]);
        assert_eq!(table.follow(1).unwrap(), vec![1]);
        assert!(table.follow(6).unwrap().is_empty());
    }

    #[test]
    fn test_follow_stops_at_out_of_range_next() {
        let mut table = AllocationTable::new(512);
        table.set(0, 1);
        table.set(1, 40);
        assert_eq!(table.follow(0).unwrap(), vec![0, 1]);
    }

    #[test]
    fn test_follow_cycle_terminates_with_error() {
        let mut table = AllocationTable::new(512);
        table.set(0, 1);
        table.set(1, 2);
        table.set(2, 0);
        assert!(matches!(table.follow(0), Err(OleError::CorruptedFile(_))));

        // Self loop
        table.set(3, 3);
        assert!(table.follow(3).is_err());
    }

    #[test]
    fn test_load_words() {
        let mut table = AllocationTable::new(512);
        let mut block = Vec::new();
        for v in [1u32, ENDOFCHAIN, FREESECT] {
            block.extend_from_slice(&v.to_le_bytes());
        }
        table.load(&block);
        assert_eq!(table.count(), 3);
        assert_eq!(table.follow(0).unwrap(), vec![0, 1]);
    }
}
