//! Cheese - the directory of named files embedded in console binaries.
//!
//! Game binaries carry their bundled assets in a "cheese" block appended
//! after the executable payload. The block is located by scanning for an
//! 8-byte magic sequence; a directory table follows it, and each entry
//! addresses its file data relative to the magic, not the file start.
//!
//! ## Layout
//! ```text
//! [anywhere]  Magic 12 34 56 78 87 65 43 21   (8 bytes)
//! [magic+0x8] FileCount                       (u32 BE)
//! [magic+0xC] DirectoryTable                  (FileCount × 0x30 bytes)
//! [...]       FileData regions, addressed per entry
//! ```
//!
//! ## Directory Entry (0x30 bytes)
//! ```text
//! [0x00] Name    - null-terminated, null-padded  (40 bytes)
//! [0x28] Address - relative to the magic offset  (u32 BE)
//! [0x2C] Size    - in bytes                      (u32 BE)
//! ```
//!
//! ## Notes
//! * All directory integers are big-endian, unlike the little-endian
//!   headers of the other formats.
//! * File data may sit anywhere at or after the magic, including between
//!   directory entries' regions; entries are not required to be ordered
//!   or non-overlapping, and no overlap validation is performed.
//! * Parsing jumps to each entry's data mid-walk and restores the table
//!   cursor afterwards, so entries are read strictly in declaration
//!   order regardless of where their data lives.

use std::io::{Read, Seek};
use std::ops::Index;

use log::debug;

use crate::Result;
use crate::utils::{be_u32, be_u32_at, bytesa, padded_string, read_region};

/// 8-byte sequence marking an embedded directory.
pub const DIRECTORY_MAGIC: [u8; 8] = [0x12, 0x34, 0x56, 0x78, 0x87, 0x65, 0x43, 0x21];

/// Byte length of one directory entry's name field.
const NAME_LEN: usize = 40;

/// Locate the first occurrence of [`DIRECTORY_MAGIC`] in `buf`.
///
/// Absence is not an error - some binaries simply carry no directory -
/// so the result is an [`Option`] and the caller decides what missing
/// means.
pub fn find_magic(buf: &[u8]) -> Option<usize> {
    buf.windows(DIRECTORY_MAGIC.len())
        .position(|w| w == DIRECTORY_MAGIC)
}

/// One extracted file from a cheese block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheeseFile {
    /// Entry name, truncated at the first null byte.
    pub name: String,
    /// Raw file payload.
    pub data: Vec<u8>,
}

/// A fully parsed cheese block: every entry with its payload loaded.
#[derive(Debug)]
pub struct Cheese {
    /// All files in declaration order.
    pub files: Vec<CheeseFile>,
}

impl Cheese {
    /// Parse the directory at `magic_offset` and extract every file.
    ///
    /// `magic_offset` is the absolute position of [`DIRECTORY_MAGIC`]
    /// within the stream, normally obtained from [`find_magic`]. Entry
    /// payloads live at `magic_offset + address`; reading one saves the
    /// table cursor, jumps to the data, and restores the cursor before
    /// the next entry.
    ///
    /// Any short read or seek aborts the whole parse - there are no
    /// partial results.
    pub fn parse<R: Read + Seek>(r: &mut R, magic_offset: u64) -> Result<Self> {
        let file_count = be_u32_at(r, magic_offset + 8)?;
        debug!("directory at {magic_offset:#x} declares {file_count} files");

        let mut files = Vec::with_capacity(file_count as usize);
        for _ in 0..file_count {
            let name_field = bytesa::<NAME_LEN>(r)?;
            let address = be_u32(r)?;
            let size = be_u32(r)?;
            let data = read_region(r, magic_offset + u64::from(address), size as usize)?;
            files.push(CheeseFile {
                name: padded_string(&name_field),
                data,
            });
        }

        Ok(Self { files })
    }

    /// Find a file by name. Returns [`None`] if not found.
    pub fn get_file_by_name(&self, name: &str) -> Option<&CheeseFile> {
        self.files.iter().find(|f| f.name == name)
    }
}

impl Index<&str> for Cheese {
    type Output = CheeseFile;

    /// Index by file name.
    ///
    /// # Panics
    /// Panics if the file name does not exist in the block.
    fn index(&self, index: &str) -> &Self::Output {
        self.get_file_by_name(index)
            .unwrap_or_else(|| panic!("no file '{index}' in cheese block"))
    }
}
