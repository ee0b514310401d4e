use super::OleError;
use super::alloc_table::AllocationTable;
use super::consts::*;
use super::directory::{DirectoryEntry, DirectoryTree};
use super::header::ContainerHeader;
use super::stream::OleStream;
use crate::common::binary::read_u32_le;
use std::io::{self, Read, Seek, SeekFrom};

/// Compound file opened for reading.
///
/// Loading reads the header, both allocation tables and the whole directory;
/// stream contents are only read on demand.
#[derive(Debug)]
pub struct OleFile<R: Read + Seek> {
    /// File handle or reader
    reader: R,
    /// Total file size in bytes
    file_size: u64,
    header: ContainerHeader,
    /// Big-block allocation table
    bbat: AllocationTable,
    /// Small-block allocation table
    sbat: AllocationTable,
    dirtree: DirectoryTree,
    /// Big blocks backing the small-block stream (root entry's chain)
    sb_blocks: Vec<u32>,
}

impl<R: Read + Seek> OleFile<R> {
    /// Open and parse a compound file from a reader
    ///
    /// # Arguments
    /// * `reader` - A reader that implements Read + Seek
    ///
    /// # Returns
    /// * `Result<OleFile<R>, OleError>` - The parsed file or an error
    pub fn open(mut reader: R) -> Result<Self, OleError> {
        // Get file size
        let file_size = reader.seek(SeekFrom::End(0))?;
        reader.seek(SeekFrom::Start(0))?;

        if file_size < HEADER_SIZE as u64 {
            return Err(OleError::NotOleFile);
        }

        // Read and validate header (512 bytes)
        let mut raw_header = [0u8; HEADER_SIZE];
        reader.read_exact(&mut raw_header)?;
        let header = ContainerHeader::parse(&raw_header)?;
        header.validate()?;

        let big_block_size = header.big_block_size();
        let small_block_size = header.small_block_size();
        log::debug!(
            "compound file: {} bytes, big blocks {}, small blocks {}, {} table blocks",
            file_size,
            big_block_size,
            small_block_size,
            header.num_bat
        );

        let mut ole = OleFile {
            reader,
            file_size,
            header,
            bbat: AllocationTable::new(big_block_size),
            sbat: AllocationTable::new(small_block_size),
            dirtree: DirectoryTree::default(),
            sb_blocks: Vec::new(),
        };

        ole.load_big_table()?;
        ole.load_small_table()?;
        ole.load_directory()?;

        Ok(ole)
    }

    pub fn file_size(&self) -> u64 {
        self.file_size
    }

    pub fn header(&self) -> &ContainerHeader {
        &self.header
    }

    pub fn directory(&self) -> &DirectoryTree {
        &self.dirtree
    }

    /// Load the big-block table: header entries first, then the meta table
    /// chain, where every meta block holds `block_size/4 - 1` table block
    /// indices followed by the index of the next meta block.
    fn load_big_table(&mut self) -> Result<(), OleError> {
        let num_bat = self.header.num_bat as usize;
        let block_size = self.header.big_block_size();

        let max_blocks = (self.file_size / block_size as u64) as usize;
        if num_bat > max_blocks {
            return Err(OleError::CorruptedFile(format!(
                "{} allocation table blocks declared in a {} byte file",
                num_bat, self.file_size
            )));
        }

        let mut blocks: Vec<u32> = self
            .header
            .bb_blocks
            .iter()
            .take(num_bat.min(HEADER_BAT_ENTRIES))
            .copied()
            .collect();

        if self.header.num_mbat > 0 {
            let per_block = block_size / 4 - 1;
            let mut next = self.header.mbat_start;
            let mut buffer = vec![0u8; block_size];
            for _ in 0..self.header.num_mbat {
                if blocks.len() >= num_bat || next == ENDOFCHAIN || next == FREESECT {
                    break;
                }
                self.read_big_block(next, &mut buffer)?;
                for i in 0..per_block {
                    if blocks.len() >= num_bat {
                        break;
                    }
                    blocks.push(read_u32_le(&buffer, i * 4)?);
                }
                next = read_u32_le(&buffer, per_block * 4)?;
            }
        }

        let mut buffer = vec![0u8; block_size];
        for &block in &blocks {
            self.read_big_block(block, &mut buffer)?;
            self.bbat.load(&buffer);
        }
        log::debug!("big block table: {} entries", self.bbat.count());
        Ok(())
    }

    /// Load the small-block table from its big-block chain
    fn load_small_table(&mut self) -> Result<(), OleError> {
        let chain = self.bbat.follow(self.header.sbat_start)?;
        let buffer = self.read_big_chain(&chain)?;
        self.sbat.load(&buffer);
        Ok(())
    }

    /// Load the directory and locate the small-block stream
    fn load_directory(&mut self) -> Result<(), OleError> {
        let chain = self.bbat.follow(self.header.dirent_start)?;
        let buffer = self.read_big_chain(&chain)?;
        self.dirtree = DirectoryTree::load(&buffer, self.header.big_block_size());

        let root = match self.dirtree.root() {
            Some(root) if root.valid && root.dir => root,
            _ => {
                return Err(OleError::CorruptedFile(
                    "root entry is not a storage".to_string(),
                ));
            },
        };
        let root_start = root.start;
        log::debug!("directory: {} entries", self.dirtree.entry_count());

        self.sb_blocks = self.bbat.follow(root_start)?;
        Ok(())
    }

    /// Read one big block into `buffer`; the part past the end of the file
    /// is zero-filled.
    fn read_big_block(&mut self, block: u32, buffer: &mut [u8]) -> Result<(), OleError> {
        let read = self.read_big_block_range(block, 0, buffer)?;
        buffer[read..].fill(0);
        Ok(())
    }

    fn read_big_chain(&mut self, chain: &[u32]) -> Result<Vec<u8>, OleError> {
        let block_size = self.header.big_block_size();
        let mut data = vec![0u8; chain.len() * block_size];
        for (i, &block) in chain.iter().enumerate() {
            self.read_big_block(block, &mut data[i * block_size..(i + 1) * block_size])?;
        }
        Ok(data)
    }

    /// Read from inside a big block, starting `offset` bytes into it.
    ///
    /// Reads at most up to the end of the block; returns the number of bytes
    /// read, which is short at the end of the file.
    pub(crate) fn read_big_block_range(
        &mut self,
        block: u32,
        offset: usize,
        buffer: &mut [u8],
    ) -> io::Result<usize> {
        let block_size = self.header.big_block_size();
        if offset >= block_size {
            return Ok(0);
        }
        // Sector position in file: (sector_id + 1) * sector_size
        let position = (u64::from(block) + 1) * block_size as u64 + offset as u64;
        if position >= self.file_size {
            return Ok(0);
        }
        let wanted = buffer.len().min(block_size - offset);
        self.reader.seek(SeekFrom::Start(position))?;

        let mut total = 0;
        while total < wanted {
            match self.reader.read(&mut buffer[total..wanted]) {
                Ok(0) => break,
                Ok(n) => total += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(total)
    }

    pub(crate) fn small_block_size(&self) -> usize {
        self.header.small_block_size()
    }

    pub(crate) fn big_block_size(&self) -> usize {
        self.header.big_block_size()
    }

    pub(crate) fn small_stream_blocks(&self) -> &[u32] {
        &self.sb_blocks
    }

    /// Look up an entry by `/`-separated path
    pub fn entry(&self, path: &str) -> Option<&DirectoryEntry> {
        self.dirtree
            .find(path)
            .and_then(|index| self.dirtree.entry(index))
    }

    /// Check if an entry exists
    pub fn exists(&self, path: &str) -> bool {
        self.dirtree.find(path).is_some()
    }

    /// List all stream paths in the file
    pub fn list_streams(&self) -> Vec<String> {
        self.dirtree.stream_paths()
    }

    /// Open a stream for positioned or sequential reading
    pub fn stream(&mut self, path: &str) -> Result<OleStream<'_, R>, OleError> {
        let entry = self
            .entry(path)
            .filter(|e| !e.dir)
            .cloned()
            .ok_or_else(|| OleError::StreamNotFound(path.to_string()))?;

        let small = entry.size < u64::from(self.header.threshold);
        let blocks = if small {
            self.sbat.follow(entry.start)?
        } else {
            self.bbat.follow(entry.start)?
        };
        Ok(OleStream::new(self, entry, blocks, small))
    }

    /// Read a whole stream by path
    pub fn open_stream(&mut self, path: &str) -> Result<Vec<u8>, OleError> {
        let mut stream = self.stream(path)?;
        let len = usize::try_from(stream.available()).map_err(|_| {
            OleError::CorruptedFile(format!("stream {} does not fit in memory", path))
        })?;
        let mut data = vec![0u8; len];
        let read = stream.read_at(0, &mut data)?;
        data.truncate(read);
        Ok(data)
    }
}

/// Check whether the bytes start with the compound file signature
pub fn is_ole_file(data: &[u8]) -> bool {
    data.len() >= MAGIC.len() && &data[..MAGIC.len()] == MAGIC
}
