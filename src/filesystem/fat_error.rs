//! Error types for FAT32 image navigation.
//!
//! Every operation on an image reports failures through [`FATError`]. None of them
//! is retried: an error is the terminal outcome of the requested operation and leaves
//! the session state untouched.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while opening or navigating a FAT32 image.
#[derive(Error, Debug)]
pub enum FATError {
    /// The operation requires an open image.
    #[error("File system not open.")]
    NotOpen,

    /// An image is already open in this session.
    #[error("File system image already open.")]
    AlreadyOpen,

    /// The image file to open does not exist or cannot be opened.
    #[error("File system image not found: `{}`", .0.display())]
    ImageNotFound(PathBuf),

    /// A name or path lookup failed, or a `cd` target is not a directory.
    #[error("Not found: `{0}`")]
    NotFound(String),

    /// The image is too short to hold the boot sector fields.
    #[error("Image too small: {needed} bytes needed for the boot sector, {available} available.")]
    ImageTooSmall { needed: usize, available: usize },

    /// Underlying I/O errors that occur while reading the image or writing an extracted file.
    #[error("IO Error: `{0}`")]
    IOError(io::Error),

    /// Parsing error occured during structure initialization
    #[error("BinRead Error: `{0}`")]
    BinReadError(binread::Error),
}

/// Converts standard I/O errors into FATError.
impl From<io::Error> for FATError {
    fn from(err: io::Error) -> Self {
        FATError::IOError(err)
    }
}

/// Converts BinRead errors into FATError.
impl From<binread::Error> for FATError {
    fn from(err: binread::Error) -> Self {
        FATError::BinReadError(err)
    }
}
