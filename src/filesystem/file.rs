//! File metadata and contents.

use getset::CopyGetters;
use std::fs::{self, File};
use std::io::{Read, Seek, Write};
use std::path::Path;

use super::dir_entry::DirEntry;
use super::fat::FatImage;
use super::fat_error::FATError;

/// Metadata of a directory entry as reported by `stat`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, CopyGetters)]
#[get_copy = "pub"]
pub struct Stat {
    /// Attribute byte
    attr: u8,
    /// First cluster
    cluster: u32,
    /// Size in bytes, 0 for directories
    size: u32,
}

impl From<&DirEntry> for Stat {
    fn from(entry: &DirEntry) -> Self {
        Stat {
            attr: *entry.attr(),
            cluster: entry.cluster_number(),
            size: if entry.is_dir() { 0 } else { *entry.file_size() },
        }
    }
}

impl<R: Read + Seek> FatImage<R> {
    /// Looks up `name` in the working directory.
    fn lookup(&self, name: &str) -> Result<DirEntry, FATError> {
        self.cwd
            .find(name)
            .cloned()
            .ok_or_else(|| FATError::NotFound(name.to_string()))
    }

    /// Returns the attribute, first cluster and size of `name`.
    pub fn stat(&self, name: &str) -> Result<Stat, FATError> {
        self.lookup(name).map(|entry| Stat::from(&entry))
    }

    /// Copies the contents of `name` into `sink`.
    ///
    /// The size recorded in the directory entry bounds the copy. If the cluster chain
    /// ends before that many bytes were copied, the copy stops there without error.
    ///
    /// # Returns
    /// - The number of bytes written to `sink`
    pub fn extract<W: Write>(&mut self, name: &str, sink: &mut W) -> Result<u64, FATError> {
        let entry = self.lookup(name)?;
        let mut remaining = *entry.file_size() as u64;
        let mut written = 0;
        if remaining == 0 {
            return Ok(0);
        }

        for cluster in self.cluster_chain(entry.cluster_number())? {
            let mut buf = self.read_cluster(cluster)?;
            buf.truncate(remaining.min(buf.len() as u64) as usize);

            sink.write_all(&buf)?;
            written += buf.len() as u64;
            remaining -= buf.len() as u64;

            if remaining == 0 || buf.len() as u64 != self.bpb().cluster_size() {
                break;
            }
        }

        if remaining > 0 {
            log::warn!(
                "{name}: chain ended after {written} bytes, {remaining} bytes short of the recorded size"
            );
        }

        Ok(written)
    }

    /// Extracts `name` into a new local file at `path`.
    ///
    /// The entry is resolved before `path` is created, and a file left incomplete by a
    /// failed copy is removed.
    ///
    /// # Returns
    /// - The number of bytes written
    pub fn extract_to(&mut self, name: &str, path: &Path) -> Result<u64, FATError> {
        self.lookup(name)?;

        let mut out = File::create(path)?;
        match self.extract(name, &mut out) {
            Ok(written) => Ok(written),
            Err(err) => {
                drop(out);
                if let Err(rm_err) = fs::remove_file(path) {
                    log::warn!("Can't remove incomplete {}: {rm_err}", path.display());
                }
                Err(err)
            }
        }
    }

    /// Reads `count` bytes of `name` starting at byte `start`.
    ///
    /// The read starts in the first cluster of the file and continues sequentially
    /// in the image without following the cluster chain. Fewer bytes are returned
    /// when the image ends first.
    pub fn read_range(&mut self, name: &str, start: u64, count: usize) -> Result<Vec<u8>, FATError> {
        let entry = self.lookup(name)?;

        self.read_span(entry.cluster_number(), start, count as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filesystem::fat::tests::{BPS, DATA_START, ImageBuilder};
    use std::io::{self, Cursor, SeekFrom};

    /// Image whose reads fail from byte `limit` on.
    struct BadSectors {
        inner: Cursor<Vec<u8>>,
        limit: u64,
    }

    impl Read for BadSectors {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.inner.position() >= self.limit {
                return Err(io::Error::other("bad sector"));
            }
            self.inner.read(buf)
        }
    }

    impl Seek for BadSectors {
        fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
            self.inner.seek(pos)
        }
    }

    #[test]
    fn stat_of_file_and_directory() {
        let image = ImageBuilder::new(6)
            .entry(2, 0, b"FOO     TXT", 0x20, 5, 10)
            .entry(2, 1, b"DIR        ", 0x10, 3, 4096)
            .build();

        let stat = image.stat("foo.txt").unwrap();
        assert_eq!((stat.attr(), stat.cluster(), stat.size()), (0x20, 5, 10));

        let stat = image.stat("dir").unwrap();
        assert_eq!((stat.attr(), stat.cluster(), stat.size()), (0x10, 3, 0));

        assert!(matches!(image.stat("nope"), Err(FATError::NotFound(_))));
    }

    #[test]
    fn extract_follows_chain() {
        let mut image = ImageBuilder::new(8)
            .entry(2, 0, b"BIG     BIN", 0x20, 3, 2 * BPS as u32 + 100)
            .fat(3, 6)
            .fat(6, 4)
            .fat(4, 0x0FFF_FFFF)
            .fill(3, 0x11)
            .fill(6, 0x22)
            .fill(4, 0x33)
            .fill(5, 0x44)
            .build();
        let mut out = vec![];

        assert_eq!(image.extract("big.bin", &mut out).unwrap(), 2 * BPS as u64 + 100);
        assert_eq!(out.len(), 2 * BPS + 100);
        assert!(out[..BPS].iter().all(|b| *b == 0x11));
        assert!(out[BPS..2 * BPS].iter().all(|b| *b == 0x22));
        assert!(out[2 * BPS..].iter().all(|b| *b == 0x33));
    }

    #[test]
    fn extract_stops_when_chain_is_short() {
        let mut image = ImageBuilder::new(6)
            .entry(2, 0, b"CUT     BIN", 0x20, 3, 3 * BPS as u32)
            .fat(3, 0x0FFF_FFFF)
            .fill(3, 0x5A)
            .build();
        let mut out = vec![];

        assert_eq!(image.extract("cut.bin", &mut out).unwrap(), BPS as u64);
        assert_eq!(out, vec![0x5A; BPS]);
    }

    #[test]
    fn extract_empty_file() {
        let mut image = ImageBuilder::new(4)
            .entry(2, 0, b"EMPTY      ", 0x20, 0, 0)
            .build();
        let mut out = vec![];

        assert_eq!(image.extract("empty", &mut out).unwrap(), 0);
        assert!(out.is_empty());
    }

    #[test]
    fn extract_to_writes_the_file() {
        let mut image = ImageBuilder::new(4)
            .entry(2, 0, b"DATA    BIN", 0x20, 3, 20)
            .fill(3, 0x42)
            .build();
        let path = std::env::temp_dir().join(format!("fat_navigator-{}-extract_to.bin", std::process::id()));

        assert_eq!(image.extract_to("data.bin", &path).unwrap(), 20);
        assert_eq!(fs::read(&path).unwrap(), vec![0x42; 20]);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn failed_extract_removes_the_partial_file() {
        let data = ImageBuilder::new(4)
            .entry(2, 0, b"DATA    BIN", 0x20, 3, 20)
            .build()
            .into_inner()
            .into_inner();
        let reader = BadSectors {
            inner: Cursor::new(data),
            limit: (DATA_START + BPS) as u64,
        };
        let mut image = FatImage::from_reader(reader).unwrap();
        let path = std::env::temp_dir().join(format!("fat_navigator-{}-bad_sector.bin", std::process::id()));

        assert!(matches!(image.extract_to("data.bin", &path), Err(FATError::IOError(_))));
        assert!(!path.exists());
        assert!(matches!(image.extract_to("none.bin", &path), Err(FATError::NotFound(_))));
        assert!(!path.exists());
    }

    #[test]
    fn read_range_within_first_cluster() {
        let mut data_image = ImageBuilder::new(4)
            .entry(2, 0, b"HELLO   TXT", 0x20, 3, 11)
            .build()
            .into_inner()
            .into_inner();
        let off = DATA_START + BPS;
        data_image[off..off + 11].copy_from_slice(b"hello world");
        let mut image = FatImage::from_reader(Cursor::new(data_image)).unwrap();

        assert_eq!(image.read_range("hello.txt", 6, 5).unwrap(), b"world");
        assert_eq!(image.read_range("HELLO.TXT", 0, 0).unwrap(), b"");
        assert!(matches!(image.read_range("bye.txt", 0, 1), Err(FATError::NotFound(_))));
    }

    #[test]
    fn read_range_is_truncated_at_end_of_image() {
        let mut image = ImageBuilder::new(2)
            .entry(2, 0, b"TAIL       ", 0x20, 3, 10)
            .fill(3, 7)
            .build();

        assert_eq!(image.read_range("tail", BPS as u64 - 2, 10).unwrap(), vec![7, 7]);
    }

    #[test]
    fn read_range_with_huge_count_returns_what_exists() {
        let mut image = ImageBuilder::new(2)
            .entry(2, 0, b"TAIL       ", 0x20, 3, 10)
            .fill(3, 7)
            .build();

        assert_eq!(image.read_range("tail", BPS as u64 - 2, usize::MAX).unwrap(), vec![7, 7]);
        assert_eq!(image.read_range("tail", 0, usize::MAX).unwrap().len(), BPS);
    }
}
