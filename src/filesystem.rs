//! FAT32 image navigation.
//!
//! - [`bpb`]: boot sector parameters and cluster addressing
//! - [`fat`]: the open image and FAT chain traversal
//! - [`directory`]: entries of the working directory
//! - [`path`]: working directory changes
//! - [`file`]: file metadata and contents

pub mod bpb;
pub mod dir_entry;
pub mod directory;
pub mod fat;
pub mod fat_error;
pub mod file;
pub mod path;
pub mod short_name;
