//! Entries of the current working directory.

use getset::Getters;
use std::io::{Read, Seek};

use super::bpb::ROOT_CLUSTER;
use super::dir_entry::{DIR_ENTRY_SIZE, DirEntry};
use super::fat::FatImage;
use super::fat_error::FATError;

/// The entries of one directory, in on-disk order.
///
/// A cache is built in one go from the directory's cluster chain and replaced
/// wholesale when the working directory changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters)]
pub struct DirectoryCache {
    /// First cluster the directory was loaded from (2 for the root)
    #[get = "pub"]
    cluster: u32,
    /// Every entry read from the directory, visible or not
    #[get = "pub"]
    entries: Vec<DirEntry>,
}

impl DirectoryCache {
    /// Reads the directory whose chain starts at `cluster`.
    ///
    /// Cluster 0 designates the root directory. Every cluster of the chain is read;
    /// a cluster cut short by the end of the image contributes its complete entries.
    pub fn load<R: Read + Seek>(image: &mut FatImage<R>, cluster: u32) -> Result<Self, FATError> {
        let cluster = if cluster == 0 { ROOT_CLUSTER } else { cluster };
        let mut entries = vec![];

        for cluster_nb in image.cluster_chain(cluster)? {
            let buf = image.read_cluster(cluster_nb)?;

            for raw in buf.chunks_exact(DIR_ENTRY_SIZE) {
                entries.push(DirEntry::from_slice(raw)?);
            }
        }
        log::debug!("Loaded {} entries from directory at cluster {cluster}", entries.len());

        Ok(Self { cluster, entries })
    }

    /// Iterates over the entries shown to the user.
    pub fn visible(&self) -> impl Iterator<Item = &DirEntry> {
        self.entries.iter().filter(|entry| entry.is_visible())
    }

    /// Finds the first visible entry designated by `name`.
    pub fn find(&self, name: &str) -> Option<&DirEntry> {
        self.visible().find(|entry| entry.same_short_name(name))
    }

    /// Display names of the visible entries, in directory order.
    pub fn list(&self) -> Vec<String> {
        self.visible().map(DirEntry::display_name).collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::filesystem::fat::tests::ImageBuilder;

    #[test]
    fn lists_only_visible_entries() {
        let image = ImageBuilder::new(4)
            .fat(2, 0x0FFF_FFFF)
            .entry(2, 0, b"VOLUME     ", 0x08, 0, 0)
            .entry(2, 1, b"FOO     TXT", 0x20, 5, 10)
            .entry(2, 2, b"LFNPART    ", 0x0F, 0, 0)
            .entry(2, 3, b"DOCS       ", 0x10, 3, 0)
            .entry(2, 4, b"RO      BIN", 0x01, 4, 1)
            .entry(2, 5, b"HIDDEN  SYS", 0x02, 6, 1)
            .build();

        assert_eq!(image.cwd().list(), vec!["FOO.TXT", "DOCS", "RO.BIN"]);
        assert_eq!(*image.cwd().cluster(), 2);
    }

    #[test]
    fn find_is_case_insensitive_and_skips_hidden() {
        let image = ImageBuilder::new(4)
            .entry(2, 0, b"SECRET  TXT", 0x02, 7, 1)
            .entry(2, 1, b"FOO     TXT", 0x20, 5, 10)
            .build();

        assert_eq!(image.cwd().find("Foo.Txt").map(|e| e.cluster_number()), Some(5));
        assert!(image.cwd().find("secret.txt").is_none());
        assert!(image.cwd().find("bar.txt").is_none());
    }

    #[test]
    fn follows_the_directory_chain() {
        let mut builder = ImageBuilder::new(6).fat(2, 4).fat(4, 0x0FFF_FFFF);
        for slot in 0..16 {
            let name = format!("F{slot:<7}TXT");
            builder = builder.entry(2, slot, name.as_bytes().try_into().unwrap(), 0x20, 0, 0);
        }
        let image = builder.entry(4, 0, b"LAST    TXT", 0x20, 0, 0).build();

        assert_eq!(image.cwd().entries().len(), 32);
        assert_eq!(image.cwd().list().len(), 17);
        assert!(image.cwd().find("last.txt").is_some());
    }
}
