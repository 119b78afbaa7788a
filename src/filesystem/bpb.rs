//! FAT32 boot sector parameters.
//!
//! This module implements:
//! - Parsing of the BIOS Parameter Block fields needed for navigation
//! - The address arithmetic derived from them (cluster to byte offset, FAT entry offset)
//!
//! The BPB is taken as-is. Geometry values are not validated, so every computation
//! widens to `u64` and wraps instead of panicking on nonsensical images.

use binread::{BinRead, BinReaderExt};
use getset::Getters;
use std::fmt;
use std::io;

use super::fat_error::FATError;
use crate::utils;

/// Number of bytes of the boot sector covering every field read by [`Bpb`].
pub const BPB_SIZE: usize = 40;

/// Size in bytes of a FAT32 allocation table entry.
pub const FAT_ENTRY_SIZE: u64 = 4;

/// First cluster of the data region. Cluster 0 is used as an alias for it.
pub const ROOT_CLUSTER: u32 = 2;

/// Subset of the BIOS Parameter Block describing the geometry of a FAT32 volume.
#[derive(BinRead, Debug, Clone, PartialEq, Eq, Getters)]
#[br(little)]
pub struct Bpb {
    /// Number of bytes per sector (512, 1024, 2048, or 4096 on valid images)
    #[br(pad_before = 11)]
    #[get = "pub"]
    bytes_per_sec: u16,
    /// Number of sectors per cluster
    #[get = "pub"]
    sec_per_clus: u8,
    /// Number of reserved sectors from start of volume
    #[get = "pub"]
    rsvd_sec_cnt: u16,
    /// Number of FAT copies
    #[get = "pub"]
    num_fat: u8,
    /// Sectors per FAT
    #[br(pad_before = 19)]
    #[get = "pub"]
    fat_sz_32: u32,
}

impl Bpb {
    /// Reads the boot sector parameters from the start of an image.
    ///
    /// # Errors
    /// - `FATError::ImageTooSmall` if the image ends before offset 40
    /// - `FATError::IOError` if reading fails
    pub fn from_reader<T: io::Read + io::Seek>(reader: &mut T) -> Result<Bpb, FATError> {
        let mut buf = [0u8; BPB_SIZE];
        let read = utils::read_at(reader, 0, &mut buf)?;

        Self::from_bytes(&buf[..read])
    }

    /// Decodes the boot sector parameters from the first bytes of an image.
    pub fn from_bytes(buf: &[u8]) -> Result<Bpb, FATError> {
        if buf.len() < BPB_SIZE {
            return Err(FATError::ImageTooSmall {
                needed: BPB_SIZE,
                available: buf.len(),
            });
        }

        let mut reader = io::Cursor::new(&buf[..BPB_SIZE]);
        let bpb: Bpb = reader.read_le()?;
        log::debug!(
            "BPB: {} B/sector, {} sector(s)/cluster, {} reserved, {} FAT(s) of {} sectors",
            bpb.bytes_per_sec,
            bpb.sec_per_clus,
            bpb.rsvd_sec_cnt,
            bpb.num_fat,
            bpb.fat_sz_32
        );

        Ok(bpb)
    }

    /// Byte offset of the first FAT.
    pub fn fat_start(&self) -> u64 {
        self.bytes_per_sec as u64 * self.rsvd_sec_cnt as u64
    }

    /// Byte offset of the data region, i.e. of cluster 2.
    pub fn data_start(&self) -> u64 {
        self.fat_start() + self.num_fat as u64 * self.fat_sz_32 as u64 * self.bytes_per_sec as u64
    }

    /// Number of bytes between the starts of two consecutive clusters.
    pub fn cluster_size(&self) -> u64 {
        self.bytes_per_sec as u64
    }

    /// Converts a cluster number to its byte offset in the image.
    ///
    /// Cluster 0 is treated as an alias of the root directory cluster 2.
    /// Clusters below 2 have no data region position and wrap; callers only pass
    /// cluster numbers read from directory entries or the FAT.
    pub fn cluster_offset(&self, cluster: u32) -> u64 {
        let cluster = if cluster == 0 { ROOT_CLUSTER } else { cluster };

        (cluster as u64)
            .wrapping_sub(ROOT_CLUSTER as u64)
            .wrapping_mul(self.cluster_size())
            .wrapping_add(self.data_start())
    }

    /// Byte offset of the FAT entry describing `cluster` in the first FAT.
    pub fn fat_entry_offset(&self, cluster: u32) -> u64 {
        self.fat_start() + cluster as u64 * FAT_ENTRY_SIZE
    }
}

/// Prints every field in decimal and hexadecimal with its boot sector offset.
impl fmt::Display for Bpb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        macro_rules! field {
            ($name:expr, $offset:expr, $val:expr) => {{
                writeln!(f, "  {:<16} 0x{:04X}: {:<10} 0x{:X}", $name, $offset, $val, $val)?;
            }};
        }

        writeln!(f, "BIOS Parameter Block (BPB):")?;
        field!("BPB_BytsPerSec", 11, self.bytes_per_sec);
        field!("BPB_SecPerClus", 13, self.sec_per_clus);
        field!("BPB_RsvdSecCnt", 14, self.rsvd_sec_cnt);
        field!("BPB_NumFATs", 16, self.num_fat);
        field!("BPB_FATSz32", 36, self.fat_sz_32);

        Ok(())
    }
}
