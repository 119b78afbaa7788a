//! FAT32 image structure and cluster addressing.
//!
//! This module implements the core functions to interact with a FAT32 image, including:
//! - Reading the BPB and loading the root directory
//! - Following cluster chains through the first FAT
//! - Reading cluster contents
//! - Displaying the image layout

use std::collections::HashSet;
use std::fmt::Write as FmtWrite;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use super::bpb::{Bpb, FAT_ENTRY_SIZE, ROOT_CLUSTER};
use super::directory::DirectoryCache;
use super::fat_error::FATError;
use crate::traits::LayoutDisplay;
use crate::utils::read_at;

/// FAT32 entries only use their low 28 bits.
const FAT_ENTRY_MASK: u32 = 0x0FFF_FFFF;
/// Masked values from this one up mark the end of a chain.
const END_OF_CHAIN: u32 = 0x0FFF_FFF8;
/// Masked value marking a bad cluster.
const BAD_CLUSTER: u32 = 0x0FFF_FFF7;

/// An open FAT32 image.
///
/// Owns the underlying reader, the boot sector parameters and the entries of the
/// current working directory.
pub struct FatImage<R: Read + Seek> {
    reader: R,
    bpb: Bpb,
    pub(super) cwd: DirectoryCache,
}

impl FatImage<File> {
    /// Opens the image file at `path`.
    ///
    /// # Errors
    /// - `FATError::ImageNotFound` if the file cannot be opened
    /// - `FATError::ImageTooSmall` if the boot sector is truncated
    pub fn open(path: &Path) -> Result<Self, FATError> {
        let file = File::open(path).map_err(|err| {
            log::debug!("Can't open {}: {err}", path.display());
            FATError::ImageNotFound(path.to_path_buf())
        })?;

        Self::from_reader(file)
    }
}

impl<R: Read + Seek> FatImage<R> {
    /// Reads the BPB from `reader` and loads the root directory.
    pub fn from_reader(mut reader: R) -> Result<Self, FATError> {
        let bpb = Bpb::from_reader(&mut reader)?;
        let mut image = Self {
            reader,
            bpb,
            cwd: DirectoryCache::default(),
        };
        image.cwd = DirectoryCache::load(&mut image, ROOT_CLUSTER)?;

        Ok(image)
    }

    /// Returns the boot sector parameters.
    pub fn bpb(&self) -> &Bpb {
        &self.bpb
    }

    /// Returns the entries of the current working directory.
    pub fn cwd(&self) -> &DirectoryCache {
        &self.cwd
    }

    /// Reads the FAT entry of `cluster` and returns the next cluster of the chain.
    ///
    /// # Returns
    /// - `Ok(Some(next))`: The chain continues with `next`
    /// - `Ok(None)`: The chain ends here (end-of-chain or bad cluster marker, free or
    ///   reserved entry, or an entry located past the end of the image)
    pub fn next_cluster(&mut self, cluster: u32) -> Result<Option<u32>, FATError> {
        let offset = self.bpb.fat_entry_offset(cluster);
        let mut buf = [0u8; FAT_ENTRY_SIZE as usize];

        if read_at(&mut self.reader, offset, &mut buf)? < buf.len() {
            log::warn!("FAT entry of cluster {cluster} at offset {offset} is past the end of the image");
            return Ok(None);
        }

        let next = u32::from_le_bytes(buf) & FAT_ENTRY_MASK;
        match next {
            0 | 1 | BAD_CLUSTER => Ok(None),
            n if n >= END_OF_CHAIN => Ok(None),
            n => Ok(Some(n)),
        }
    }

    /// Lists the clusters of the chain starting at `first_cluster`.
    ///
    /// The walk stops at the end of the chain or when a cluster shows up twice.
    pub fn cluster_chain(&mut self, first_cluster: u32) -> Result<Vec<u32>, FATError> {
        let first_cluster = if first_cluster == 0 {
            ROOT_CLUSTER
        } else {
            first_cluster
        };
        let mut clusters = vec![first_cluster];
        let mut seen = HashSet::from([first_cluster]);
        let mut cluster = first_cluster;

        while let Some(next) = self.next_cluster(cluster)? {
            if !seen.insert(next) {
                log::warn!("FAT chain starting at cluster {first_cluster} loops back to cluster {next}");
                break;
            }
            clusters.push(next);
            cluster = next;
        }
        log::debug!("Chain of cluster {first_cluster}: {clusters:?}");

        Ok(clusters)
    }

    /// Reads `buf.len()` bytes starting `start` bytes into `cluster`.
    ///
    /// # Returns
    /// - The number of bytes read, smaller than requested at the end of the image.
    pub fn read_in_cluster(&mut self, cluster: u32, start: u64, buf: &mut [u8]) -> Result<usize, FATError> {
        let offset = self.bpb.cluster_offset(cluster).wrapping_add(start);
        let read = read_at(&mut self.reader, offset, buf)?;
        if read < buf.len() {
            log::warn!(
                "Short read at offset {offset}: {read} of {} bytes available",
                buf.len()
            );
        }

        Ok(read)
    }

    /// Reads up to `count` bytes starting `start` bytes into `cluster`.
    ///
    /// The buffer grows with the bytes actually read, so `count` may exceed what the
    /// image holds.
    pub fn read_span(&mut self, cluster: u32, start: u64, count: u64) -> Result<Vec<u8>, FATError> {
        let offset = self.bpb.cluster_offset(cluster).wrapping_add(start);
        let mut buf = vec![];

        self.reader.seek(SeekFrom::Start(offset))?;
        (&mut self.reader).take(count).read_to_end(&mut buf)?;
        if (buf.len() as u64) < count {
            log::warn!(
                "Short read at offset {offset}: {} of {count} bytes available",
                buf.len()
            );
        }

        Ok(buf)
    }

    /// Reads a whole cluster, truncated at the end of the image.
    pub fn read_cluster(&mut self, cluster: u32) -> Result<Vec<u8>, FATError> {
        let mut buf = vec![0; self.bpb.cluster_size() as usize];
        let read = self.read_in_cluster(cluster, 0, &mut buf)?;
        buf.truncate(read);

        Ok(buf)
    }

    /// Returns the reader back, closing the image.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

/// Prints the regions of the image in bytes.
impl<R: Read + Seek> LayoutDisplay for FatImage<R> {
    fn display_layout(&self, indent: u8) -> Result<String, std::fmt::Error> {
        let mut out = String::from("");
        let indent = " ".repeat(indent.into());
        let fat_sz = *self.bpb.fat_sz_32() as u64 * *self.bpb.bytes_per_sec() as u64;

        writeln!(out, "{}┌{:─^55}┐", indent, " FAT32 Image Layout ")?;
        writeln!(
            out,
            "{}├{:^12}┬{:^12}┬{:^12}┬{:^16}┤",
            indent, "Region", "Start", "End", "Description"
        )?;
        writeln!(
            out,
            "{}├{:─<12}┼{:─<12}┼{:─<12}┼{:─<16}┤",
            indent, "", "", "", ""
        )?;
        writeln!(
            out,
            "{}│{:<12}│{:<12}│{:<12}│{:<16}│",
            indent,
            "Reserved",
            0,
            self.bpb.fat_start(),
            "Boot + Reserved"
        )?;
        for i in 0..*self.bpb.num_fat() as u64 {
            let fat_i_start = self.bpb.fat_start() + i * fat_sz;
            writeln!(
                out,
                "{}│{:<12}│{:<12}│{:<12}│{:<16}│",
                indent,
                format!("FAT #{i}"),
                fat_i_start,
                fat_i_start + fat_sz,
                "FAT Tables"
            )?;
        }
        writeln!(
            out,
            "{}│{:<12}│{:<12}│{:<12}│{:<16}│",
            indent,
            "Data",
            self.bpb.data_start(),
            "",
            "Cluster Data"
        )?;
        writeln!(
            out,
            "{}└{:─<12}┴{:─<12}┴{:─<12}┴{:─<16}┘",
            indent, "", "", "", ""
        )?;

        Ok(out)
    }
}
