//! FAT directory entry structure and parsing.
//!
//! Each directory entry is 32 bytes and describes a file or a subdirectory: its 8.3
//! name, its attributes, its first cluster and its size.

use binread::{BinRead, BinReaderExt};
use getset::Getters;
use std::fmt;
use std::io;

use super::fat_error::FATError;
use super::short_name::{self, SHORT_NAME_LEN};

/// Size in bytes of a directory entry.
pub const DIR_ENTRY_SIZE: usize = 32;

/// Attribute of a read-only file.
pub const ATTR_READ_ONLY: u8 = 0x01;
/// Attribute of a directory.
pub const ATTR_DIRECTORY: u8 = 0x10;
/// Attribute of a regular file.
pub const ATTR_ARCHIVE: u8 = 0x20;

/// First name byte of a deleted entry.
const DELETED_MARKER: u8 = 0xE5;

/// FAT directory entry structure.
///
/// # Notes
/// - Timestamp fields are skipped as they're not used for navigation
/// - The name field uses the legacy 8.3 format with space padding
#[derive(BinRead, Debug, Clone, PartialEq, Eq, Getters)]
#[br(little)]
pub struct DirEntry {
    /// Filename in 8.3 format (8 characters name + 3 characters extension)
    #[get = "pub"]
    name: [u8; SHORT_NAME_LEN],
    /// File attributes byte
    #[get = "pub"]
    attr: u8,
    /// High 16 bits of first cluster number
    #[br(pad_before = 8)]
    fst_clus_hi: u16,
    /// Low 16 bits of first cluster number
    #[br(pad_before = 4)]
    fst_clus_lo: u16,
    /// File size in bytes (0 for directories)
    #[get = "pub"]
    file_size: u32,
}

impl DirEntry {
    /// Creates a directory entry from a byte slice holding at least 32 bytes.
    pub fn from_slice(buf: &[u8]) -> Result<Self, FATError> {
        let mut reader = io::Cursor::new(buf);
        reader.read_le().map_err(FATError::from)
    }

    /// Returns the complete first cluster number for this entry.
    ///
    /// Combines `fst_clus_hi` and `fst_clus_lo` and keeps the 28 bits FAT32 uses.
    pub fn cluster_number(&self) -> u32 {
        (((self.fst_clus_hi as u32) << 16) | self.fst_clus_lo as u32) & 0x0FFF_FFFF
    }

    /// Checks if this directory entry represents a directory.
    pub fn is_dir(&self) -> bool {
        self.attr & ATTR_DIRECTORY != 0
    }

    /// Whether the entry shows up in listings and lookups.
    ///
    /// Only read-only files, directories and regular files are visible. Free, deleted,
    /// hidden, system, volume label and long name entries are not.
    pub fn is_visible(&self) -> bool {
        self.name[0] != DELETED_MARKER
            && matches!(self.attr, ATTR_READ_ONLY | ATTR_DIRECTORY | ATTR_ARCHIVE)
    }

    /// Checks if a name typed by the user designates this entry.
    pub fn same_short_name(&self, name: &str) -> bool {
        short_name::encode(name, self.is_dir()).is_some_and(|encoded| encoded == self.name)
    }

    /// Name of the entry as shown to the user.
    pub fn display_name(&self) -> String {
        short_name::decode(&self.name)
    }
}

impl fmt::Display for DirEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" {}B", self.display_name(), self.file_size)
    }
}
