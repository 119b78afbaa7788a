//! Working directory changes.
//!
//! A path is a `/`-separated list of short names relative to the working directory.
//! Empty segments are ignored and `..` climbs to the parent directory.

use std::io::{Read, Seek};

use super::directory::DirectoryCache;
use super::fat::FatImage;
use super::fat_error::FATError;

/// Separator between path segments.
pub const SEPARATOR: char = '/';

impl<R: Read + Seek> FatImage<R> {
    /// Changes the working directory.
    ///
    /// Segments are applied in order. If one of them is missing or is not a directory,
    /// the working directory is restored to what it was before the call and the first
    /// failure is returned: either the whole path applies or nothing does.
    ///
    /// # Errors
    /// - `FATError::NotFound` if a segment does not name a directory, or if the path
    ///   holds no segment at all (`""`, `"/"`)
    pub fn cd(&mut self, path: &str) -> Result<(), FATError> {
        let segments: Vec<&str> = path.split(SEPARATOR).filter(|s| !s.is_empty()).collect();
        if segments.is_empty() {
            return Err(FATError::NotFound(path.to_string()));
        }
        let saved = self.cwd.clone();

        for segment in segments {
            if let Err(err) = self.cd_segment(segment) {
                log::debug!("cd {path:?} failed at {segment:?}, back to cluster {}", saved.cluster());
                self.cwd = saved;
                return Err(err);
            }
        }

        Ok(())
    }

    /// Moves into a single subdirectory of the working directory.
    fn cd_segment(&mut self, segment: &str) -> Result<(), FATError> {
        let cluster = match self.cwd.find(segment) {
            Some(entry) if entry.is_dir() => entry.cluster_number(),
            // Directories without a `.` entry (the root) still accept it.
            None if segment == "." => return Ok(()),
            _ => return Err(FATError::NotFound(segment.to_string())),
        };

        self.cwd = DirectoryCache::load(self, cluster)?;
        Ok(())
    }
}
