//! Read-only memory mapping of typelib files.
//!
//! Typelibs are usually installed system-wide and loaded by many processes at once. Mapping them
//! read-only lets pages load on demand and be shared between those processes. The mapping is
//! owned by the backend and released together with it, so it outlives every reference handed out
//! by the typelib view built on top.

use super::Backend;
use crate::{Error::FileError, Result};

use memmap2::Mmap;
use std::{fs, path::Path};

/// A typelib file mapped into the address space
#[derive(Debug)]
pub struct Physical {
    data: Mmap,
}

impl Physical {
    /// Map the typelib at `path`.
    ///
    /// # Errors
    /// Returns [`crate::Error::FileError`] if the file cannot be opened or mapped.
    pub fn new(path: impl AsRef<Path>) -> Result<Physical> {
        let file = fs::File::open(path).map_err(FileError)?;

        // SAFETY: read-only mapping; the file must not be modified while it is mapped.
        let data = unsafe { Mmap::map(&file) }.map_err(FileError)?;

        Ok(Physical { data })
    }
}

impl Backend for Physical {
    fn data(&self) -> &[u8] {
        &self.data
    }

    fn origin(&self) -> &'static str {
        "mapped file"
    }
}
