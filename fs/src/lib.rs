//! A tiny in-memory file store.
//!
//! The store owns a fixed table of `MAX_FILES` slots. Callers only ever
//! receive copies of file contents, never references into the table,
//! and nothing survives a restart.
#![cfg_attr(not(test), no_std)]

use log::{debug, info};

pub use self::{
    error::FsError,
    file::{File, MAX_FILE_SIZE},
    name::{FileName, MAX_FILENAME_LEN},
};

mod error;
mod file;
mod name;

/// Number of file slots.
pub const MAX_FILES: usize = 5;

pub struct FileStore {
    files: [Option<File>; MAX_FILES],
}

impl FileStore {
    pub const fn new() -> Self {
        const EMPTY: Option<File> = None;
        Self {
            files: [EMPTY; MAX_FILES],
        }
    }

    /// Number of files in use.
    pub fn len(&self) -> usize {
        self.files.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Names of the files in use, in table order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.files.iter().flatten().map(|file| file.name().as_str())
    }

    /// Writes the names of all files into `out`, each one followed by
    /// a newline.
    ///
    /// Output stops at the last entry that fits completely. An empty
    /// store yields `Ok(0)` whatever the size of `out`.
    pub fn list(&self, out: &mut [u8]) -> Result<usize, FsError> {
        let mut written = 0;
        for name in self.names() {
            let end = written + name.len() + 1;
            if end > out.len() {
                break;
            }
            out[written..end - 1].copy_from_slice(name.as_bytes());
            out[end - 1] = b'\n';
            written = end;
        }

        if written == 0 && !self.is_empty() {
            return Err(FsError::BufferTooSmall);
        }
        Ok(written)
    }

    /// Copies the content of `name` into `buf`.
    ///
    /// `buf` is left untouched unless it can hold the whole file.
    pub fn read(&self, name: &str, buf: &mut [u8]) -> Result<usize, FsError> {
        let file = self.find(name).ok_or(FsError::NotFound)?;
        let data = file.data();
        if buf.len() < data.len() {
            return Err(FsError::BufferTooSmall);
        }

        buf[..data.len()].copy_from_slice(data);
        Ok(data.len())
    }

    /// Creates `name` or replaces its content in place.
    ///
    /// Arguments are checked in a fixed order (name, name length, data
    /// length, free slot) and the table is not touched unless all of
    /// them pass.
    pub fn write(&mut self, name: &str, data: &[u8]) -> Result<(), FsError> {
        let name = FileName::new(name)?;
        if data.len() > MAX_FILE_SIZE {
            return Err(FsError::DataTooLarge);
        }

        if let Some(file) = self.find_mut(name.as_str()) {
            file.replace(data);
            debug!("fs: overwrote '{}' ({} bytes)", name, data.len());
            return Ok(());
        }

        let slot = self
            .files
            .iter()
            .position(Option::is_none)
            .ok_or(FsError::NoFreeSlot)?;
        self.files[slot] = Some(File::new(name, data));
        info!("fs: created '{}' in slot {} ({} bytes)", name, slot, data.len());
        Ok(())
    }

    /// Removes `name` and frees its slot.
    pub fn delete(&mut self, name: &str) -> Result<(), FsError> {
        let slot = self
            .files
            .iter()
            .position(|file| file.as_ref().is_some_and(|file| file.name() == name))
            .ok_or(FsError::NotFound)?;

        self.files[slot] = None;
        info!("fs: deleted '{}' from slot {}", name, slot);
        Ok(())
    }

    fn find(&self, name: &str) -> Option<&File> {
        self.files.iter().flatten().find(|file| file.name() == name)
    }

    fn find_mut(&mut self, name: &str) -> Option<&mut File> {
        self.files.iter_mut().flatten().find(|file| file.name() == name)
    }
}

impl Default for FileStore {
    fn default() -> Self {
        Self::new()
    }
}
