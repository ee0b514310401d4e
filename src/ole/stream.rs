use super::OleError;
use super::consts::STREAM_CACHE_SIZE;
use super::directory::DirectoryEntry;
use super::file::OleFile;
use std::io::{self, Read, Seek, SeekFrom};

/// Handle on one stream of an [`OleFile`].
///
/// Supports positioned reads through [`OleStream::read_at`] and sequential
/// access through `Read`/`Seek`, the latter served from a read-ahead cache.
pub struct OleStream<'a, R: Read + Seek> {
    file: &'a mut OleFile<R>,
    entry: DirectoryEntry,
    /// Block chain of the stream, small or big blocks depending on `small`
    blocks: Vec<u32>,
    small: bool,
    pos: u64,
    cache: Vec<u8>,
    cache_pos: u64,
}

impl<'a, R: Read + Seek> OleStream<'a, R> {
    pub(crate) fn new(
        file: &'a mut OleFile<R>,
        entry: DirectoryEntry,
        blocks: Vec<u32>,
        small: bool,
    ) -> Self {
        Self {
            file,
            entry,
            blocks,
            small,
            pos: 0,
            cache: Vec::new(),
            cache_pos: 0,
        }
    }

    #[inline]
    pub fn size(&self) -> u64 {
        self.entry.size
    }

    /// Bytes the block chain can actually supply, which may be less than
    /// the declared [`size`](Self::size)
    pub fn available(&self) -> u64 {
        let block_size = if self.small {
            self.file.small_block_size()
        } else {
            self.file.big_block_size()
        };
        self.entry
            .size
            .min(self.blocks.len() as u64 * block_size as u64)
    }

    pub fn entry(&self) -> &DirectoryEntry {
        &self.entry
    }

    /// Read into `buf` starting at stream offset `pos`.
    ///
    /// Returns the number of bytes read: less than `buf.len()` at the end of
    /// the stream or when the block chain is shorter than the declared size.
    pub fn read_at(&mut self, pos: u64, buf: &mut [u8]) -> Result<usize, OleError> {
        let size = self.entry.size;
        if pos >= size || buf.is_empty() {
            return Ok(0);
        }
        let wanted = buf.len().min((size - pos).min(usize::MAX as u64) as usize);

        let mut total = 0;
        while total < wanted {
            let n = if self.small {
                self.read_small(pos + total as u64, &mut buf[total..wanted])?
            } else {
                self.read_big(pos + total as u64, &mut buf[total..wanted])?
            };
            if n == 0 {
                break;
            }
            total += n;
        }
        Ok(total)
    }

    /// One step of a big-stream read, never crossing a block boundary
    fn read_big(&mut self, pos: u64, buf: &mut [u8]) -> io::Result<usize> {
        let block_size = self.file.big_block_size() as u64;
        let index = (pos / block_size) as usize;
        let offset = (pos % block_size) as usize;
        match self.blocks.get(index) {
            Some(&block) => self.file.read_big_block_range(block, offset, buf),
            None => Ok(0),
        }
    }

    /// One step of a small-stream read: small block -> offset inside the
    /// small-block stream -> backing big block.
    fn read_small(&mut self, pos: u64, buf: &mut [u8]) -> io::Result<usize> {
        let small_size = self.file.small_block_size() as u64;
        let big_size = self.file.big_block_size() as u64;

        let index = (pos / small_size) as usize;
        let offset = pos % small_size;
        let Some(&small_block) = self.blocks.get(index) else {
            return Ok(0);
        };

        let stream_pos = u64::from(small_block) * small_size + offset;
        let big_index = (stream_pos / big_size) as usize;
        let big_offset = (stream_pos % big_size) as usize;
        let Some(&big_block) = self.file.small_stream_blocks().get(big_index) else {
            return Ok(0);
        };

        let limit = buf.len().min((small_size - offset) as usize);
        self.file
            .read_big_block_range(big_block, big_offset, &mut buf[..limit])
    }

    fn fill_cache(&mut self, pos: u64) -> io::Result<()> {
        let mut cache = std::mem::take(&mut self.cache);
        cache.resize(STREAM_CACHE_SIZE, 0);
        let aligned = pos - pos % STREAM_CACHE_SIZE as u64;
        let read = self.read_at(aligned, &mut cache).map_err(|e| match e {
            OleError::Io(e) => e,
            other => io::Error::new(io::ErrorKind::InvalidData, other),
        })?;
        cache.truncate(read);
        self.cache = cache;
        self.cache_pos = aligned;
        Ok(())
    }
}

impl<R: Read + Seek> Read for OleStream<'_, R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() || self.pos >= self.entry.size {
            return Ok(0);
        }
        let cached = self.pos >= self.cache_pos
            && self.pos < self.cache_pos + self.cache.len() as u64;
        if !cached {
            self.fill_cache(self.pos)?;
            if self.pos >= self.cache_pos + self.cache.len() as u64 {
                return Ok(0);
            }
        }

        let start = (self.pos - self.cache_pos) as usize;
        let n = buf.len().min(self.cache.len() - start);
        buf[..n].copy_from_slice(&self.cache[start..start + n]);
        self.pos += n as u64;
        Ok(n)
    }
}

impl<R: Read + Seek> Seek for OleStream<'_, R> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let target = match pos {
            SeekFrom::Start(p) => Some(p),
            SeekFrom::End(delta) => self.entry.size.checked_add_signed(delta),
            SeekFrom::Current(delta) => self.pos.checked_add_signed(delta),
        };
        match target {
            Some(p) => {
                self.pos = p;
                Ok(p)
            },
            None => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "invalid seek to a negative position",
            )),
        }
    }
}
