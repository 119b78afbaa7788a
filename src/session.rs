//! Navigation session over at most one open FAT32 image.
//!
//! The session is what the shell drives: it opens and closes the image and forwards
//! every other operation to it, failing with [`FATError::NotOpen`] when no image is open.

use std::fs::File;
use std::path::Path;

use crate::filesystem::bpb::Bpb;
use crate::filesystem::fat::FatImage;
use crate::filesystem::fat_error::FATError;
use crate::filesystem::file::Stat;

/// A navigation session.
#[derive(Default)]
pub struct Session {
    image: Option<FatImage<File>>,
}

impl Session {
    /// Creates a session with no open image.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an image is currently open.
    pub fn is_open(&self) -> bool {
        self.image.is_some()
    }

    /// Returns the open image.
    pub fn image(&self) -> Result<&FatImage<File>, FATError> {
        self.image.as_ref().ok_or(FATError::NotOpen)
    }

    fn image_mut(&mut self) -> Result<&mut FatImage<File>, FATError> {
        self.image.as_mut().ok_or(FATError::NotOpen)
    }

    /// Opens the image at `path` and moves to its root directory.
    ///
    /// # Errors
    /// - `FATError::AlreadyOpen` if an image is already open
    /// - `FATError::ImageNotFound` if `path` cannot be opened
    /// - `FATError::ImageTooSmall` if the boot sector is truncated
    pub fn open<P: AsRef<Path>>(&mut self, path: P) -> Result<(), FATError> {
        if self.image.is_some() {
            return Err(FATError::AlreadyOpen);
        }

        let image = FatImage::open(path.as_ref())?;
        log::debug!("Opened {}", path.as_ref().display());
        self.image = Some(image);

        Ok(())
    }

    /// Closes the open image.
    pub fn close(&mut self) -> Result<(), FATError> {
        self.image.take().map(drop).ok_or(FATError::NotOpen)
    }

    /// Returns the boot sector parameters.
    pub fn info(&self) -> Result<&Bpb, FATError> {
        self.image().map(FatImage::bpb)
    }

    /// Lists the working directory.
    pub fn ls(&self) -> Result<Vec<String>, FATError> {
        Ok(self.image()?.cwd().list())
    }

    /// Returns the metadata of `name`.
    pub fn stat(&self, name: &str) -> Result<Stat, FATError> {
        self.image()?.stat(name)
    }

    /// Changes the working directory.
    pub fn cd(&mut self, path: &str) -> Result<(), FATError> {
        self.image_mut()?.cd(path)
    }

    /// Extracts `name` into a same-named file of the process working directory.
    pub fn get(&mut self, name: &str) -> Result<u64, FATError> {
        self.get_into(name, Path::new("."))
    }

    /// Extracts `name` into a same-named file of `dir`.
    ///
    /// # Returns
    /// - The number of bytes written
    pub fn get_into(&mut self, name: &str, dir: &Path) -> Result<u64, FATError> {
        self.image_mut()?.extract_to(name, &dir.join(name))
    }

    /// Reads `count` bytes of `name` starting at `position`.
    pub fn read(&mut self, name: &str, position: u64, count: usize) -> Result<Vec<u8>, FATError> {
        self.image_mut()?.read_range(name, position, count)
    }
}
