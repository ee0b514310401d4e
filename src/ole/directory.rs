use super::consts::*;
use fixedbitset::FixedBitSet;
use zerocopy::{FromBytes, LE, U16, U32, U64};
use zerocopy_derive::FromBytes as DeriveFromBytes;

/// Raw directory entry structure (128 bytes)
#[derive(Debug, Clone, DeriveFromBytes)]
#[repr(C)]
struct RawDirectoryEntry {
    /// Entry name in UTF-16LE (64 bytes, null-padded)
    name: [u8; 64],
    /// Length of name in bytes (including null terminator)
    name_len: U16<LE>,
    /// Entry type (1 = storage, 2 = stream, 5 = root)
    entry_type: u8,
    /// Node color (0 = red, 1 = black)
    node_color: u8,
    sid_left: U32<LE>,
    sid_right: U32<LE>,
    sid_child: U32<LE>,
    clsid: [u8; 16],
    state_bits: U32<LE>,
    creation_time: U64<LE>,
    modified_time: U64<LE>,
    start_sector: U32<LE>,
    stream_size: U64<LE>,
}

/// One directory entry: a storage (directory) or a stream.
#[derive(Debug, Clone, Default)]
pub struct DirectoryEntry {
    /// Entries of unknown type or without a name are kept as placeholders
    /// so indices stay stable, but never show up in traversals.
    pub valid: bool,
    pub name: String,
    pub dir: bool,
    pub size: u64,
    pub start: u32,
    pub prev: u32,
    pub next: u32,
    pub child: u32,
}

impl DirectoryEntry {
    fn from_raw(raw: &RawDirectoryEntry, big_block_size: usize) -> Self {
        let name_len = usize::from(raw.name_len.get()).min(64);
        let name = decode_entry_name(&raw.name[..name_len]);
        let valid = name_len > 0
            && matches!(raw.entry_type, STGTY_STORAGE | STGTY_STREAM | STGTY_ROOT);

        // 512-byte sector files only use the low 32 bits of the size
        let size = if big_block_size == 512 {
            raw.stream_size.get() & 0xFFFF_FFFF
        } else {
            raw.stream_size.get()
        };

        Self {
            valid,
            name,
            dir: raw.entry_type != STGTY_STREAM,
            size,
            start: raw.start_sector.get(),
            prev: raw.sid_left.get(),
            next: raw.sid_right.get(),
            child: raw.sid_child.get(),
        }
    }
}

/// Decode a UTF-16LE entry name, dropping a leading control character
/// (property set streams are named like `"\x05SummaryInformation"`).
fn decode_entry_name(bytes: &[u8]) -> String {
    let (decoded, _) = encoding_rs::UTF_16LE.decode_without_bom_handling(bytes);
    let name = decoded.split('\0').next().unwrap_or_default();
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if (c as u32) < 32 => chars.as_str().to_string(),
        _ => name.to_string(),
    }
}

/// All directory entries, indexed as in the file. Entry 0 is the root.
#[derive(Debug, Clone, Default)]
pub struct DirectoryTree {
    entries: Vec<DirectoryEntry>,
}

impl DirectoryTree {
    /// Rebuild from the concatenated directory blocks.
    pub fn load(buffer: &[u8], big_block_size: usize) -> Self {
        let entries = buffer
            .chunks_exact(DIRENTRY_SIZE)
            .map(|chunk| match RawDirectoryEntry::read_from_bytes(chunk) {
                Ok(raw) => DirectoryEntry::from_raw(&raw, big_block_size),
                Err(_) => DirectoryEntry::default(),
            })
            .collect();
        Self { entries }
    }

    #[inline]
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    pub fn entry(&self, index: usize) -> Option<&DirectoryEntry> {
        self.entries.get(index)
    }

    pub fn root(&self) -> Option<&DirectoryEntry> {
        self.entries.first()
    }

    /// Indices of the direct children of `index`, in sibling-tree pre-order.
    ///
    /// The sibling tree hanging off the entry's `child` pointer is walked with
    /// an explicit worklist; each entry is reported at most once even when
    /// the prev/next pointers form a cycle. Index 0 (the root) is never a
    /// child.
    pub fn children(&self, index: usize) -> Vec<usize> {
        let mut result = Vec::new();
        let Some(parent) = self.entries.get(index) else {
            return result;
        };

        let count = self.entries.len();
        let mut visited = FixedBitSet::with_capacity(count);
        let mut worklist = vec![parent.child];

        while let Some(sid) = worklist.pop() {
            let sid = sid as usize;
            if sid == 0 || sid >= count || visited.contains(sid) {
                continue;
            }
            visited.insert(sid);

            let entry = &self.entries[sid];
            if !entry.valid {
                continue;
            }
            result.push(sid);
            // Pushed in reverse so `prev` is expanded before `next`
            worklist.push(entry.next);
            worklist.push(entry.prev);
        }
        result
    }

    /// Resolve a `/`-separated path, case-insensitively. `"/"` is the root.
    pub fn find(&self, path: &str) -> Option<usize> {
        if self.entries.is_empty() {
            return None;
        }
        let mut index = 0;
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            let wanted = segment.to_lowercase();
            index = self
                .children(index)
                .into_iter()
                .find(|&child| self.entries[child].name.to_lowercase() == wanted)?;
        }
        Some(index)
    }

    /// Full paths of every stream, depth-first from the root.
    pub fn stream_paths(&self) -> Vec<String> {
        let mut paths = Vec::new();
        if self.entries.is_empty() {
            return paths;
        }

        let mut visited = FixedBitSet::with_capacity(self.entries.len());
        visited.insert(0);
        let mut worklist = vec![(0usize, String::new())];
        while let Some((index, prefix)) = worklist.pop() {
            for child in self.children(index).into_iter().rev() {
                if visited.contains(child) {
                    continue;
                }
                visited.insert(child);
                let entry = &self.entries[child];
                let path = format!("{}/{}", prefix, entry.name);
                if entry.dir {
                    worklist.push((child, path));
                } else {
                    paths.push(path);
                }
            }
        }
        paths.sort();
        paths
    }
}
