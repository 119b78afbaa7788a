//!
//! FAT Navigator: A library and CLI for browsing FAT32 disk images read-only.
//!
//! This crate provides tools for:
//! - Parsing the boot sector of a FAT32 image
//! - Following FAT cluster chains and listing directories
//! - Changing the working directory with atomic multi-segment paths
//! - Extracting whole files or byte ranges
//!
//! The library is designed to be driven by the interactive shell in `src/bin/main.rs`
//! but can be used on its own, either through a [`Session`] or directly with a
//! [`FatImage`] over any `Read + Seek` source.
//!
//! # Re-exports
//! - [`FatImage`]: An open FAT32 image
//! - [`Session`]: Session holding at most one open image
//! - [`FATError`]: Errors reported by every operation

pub mod commands;
pub mod filesystem;
pub mod session;
pub mod traits;
pub mod utils;

/// An open FAT32 image (see [`filesystem::fat::FatImage`]).
pub use crate::filesystem::fat::FatImage;
/// Errors reported by every operation (see [`filesystem::fat_error::FATError`]).
pub use crate::filesystem::fat_error::FATError;
/// Session holding at most one open image (see [`session::Session`]).
pub use crate::session::Session;
