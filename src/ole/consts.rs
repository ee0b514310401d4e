/// Magic bytes that should be at the beginning of every OLE file
pub const MAGIC: &[u8; 8] = b"\xD0\xCF\x11\xE0\xA1\xB1\x1A\xE1";

/// Size of the fixed header in bytes
pub const HEADER_SIZE: usize = 512;

/// Smallest file that can hold a header, one table block and one directory block
pub const MINIMAL_OLEFILE_SIZE: usize = 1536;

/// Size of a directory entry in bytes
pub const DIRENTRY_SIZE: usize = 128;

/// Number of big-table block indices stored directly in the header
pub const HEADER_BAT_ENTRIES: usize = 109;

/// Streams of at least this many bytes live in big blocks
pub const SMALL_BLOCK_THRESHOLD: u32 = 4096;

/// Size of the read-ahead cache of a stream handle
pub const STREAM_CACHE_SIZE: usize = 4096;

// Sector IDs (from AAF specifications)
/// Denotes a DIFAT (meta table) sector in a FAT
pub const DIFSECT: u32 = 0xFFFFFFFC; // -4
/// Denotes a FAT sector in a FAT
pub const FATSECT: u32 = 0xFFFFFFFD; // -3
/// End of a virtual stream chain
pub const ENDOFCHAIN: u32 = 0xFFFFFFFE; // -2
/// Unallocated sector
pub const FREESECT: u32 = 0xFFFFFFFF; // -1

/// Unallocated directory entry
pub const NOSTREAM: u32 = 0xFFFFFFFF; // -1

// Object types in storage
/// Element is a storage object
pub const STGTY_STORAGE: u8 = 1;
/// Element is a stream object
pub const STGTY_STREAM: u8 = 2;
/// Element is a root storage
pub const STGTY_ROOT: u8 = 5;
