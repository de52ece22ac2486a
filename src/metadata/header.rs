//! The fixed 100-byte typelib header.
//!
//! This module defines the [`Header`] struct, which is the first record of every typelib. It
//! carries the format magic and version, the buffer size, the location of the directory and the
//! annotation table, the namespace strings and the self-declared size of every record kind.
//!
//! [`Header::read`] only decodes the fields; the acceptance rules live in
//! [`crate::metadata::validation`].

use crate::{
    file::io::read_le_at,
    metadata::layout::{header, DECLARED_SIZES},
    Result,
};

/// The magic string every typelib starts with
pub const HEADER_MAGIC: &[u8; 16] = b"GOBJ\nMETADATA\r\n\x1a";

/// The only supported major format version
pub const MAJOR_VERSION: u8 = 1;

/// The only supported minor format version
pub const MINOR_VERSION: u8 = 0;

/// The decoded typelib header, located at offset 0 of the buffer.
///
/// All offsets are byte offsets from the start of the buffer. String fields hold the offset of a
/// NUL-terminated string, or 0 where the string is optional and absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// Format magic, [`HEADER_MAGIC`] for valid typelibs
    pub magic: [u8; 16],
    /// Major format version
    pub major_version: u8,
    /// Minor format version
    pub minor_version: u8,
    /// Number of directory entries, local and imported
    pub n_entries: u16,
    /// Number of leading directory entries whose records live in this buffer
    pub n_local_entries: u16,
    /// Offset of the directory table
    pub directory: u32,
    /// Number of records in the annotation table
    pub n_annotations: u32,
    /// Offset of the annotation table
    pub annotations: u32,
    /// `|`-separated list of namespaces this one depends on, or 0
    pub dependencies: u32,
    /// Total size of the typelib in bytes
    pub size: u32,
    /// Namespace name
    pub namespace: u32,
    /// Namespace version, or 0
    pub nsversion: u32,
    /// Shared library providing the symbols, or 0
    pub shared_library: u32,
    /// The 18 self-declared record sizes, in header order
    pub blob_sizes: [u16; 18],
}

impl Header {
    /// Decode the header from the start of `data`
    ///
    /// # Arguments
    /// * `data` - The typelib buffer, at least 100 bytes long
    ///
    /// # Errors
    /// Returns [`crate::Error::BufferTooShort`] if `data` cannot hold a header.
    pub fn read(data: &[u8]) -> Result<Header> {
        if data.len() < header::SIZE {
            return Err(too_short!());
        }

        let mut magic = [0_u8; 16];
        magic.copy_from_slice(&data[header::MAGIC..header::MAJOR_VERSION]);

        let mut offset = header::MAJOR_VERSION;
        let major_version = read_le_at::<u8>(data, &mut offset)?;
        let minor_version = read_le_at::<u8>(data, &mut offset)?;

        offset = header::N_ENTRIES;
        let n_entries = read_le_at::<u16>(data, &mut offset)?;
        let n_local_entries = read_le_at::<u16>(data, &mut offset)?;
        let directory = read_le_at::<u32>(data, &mut offset)?;
        let n_annotations = read_le_at::<u32>(data, &mut offset)?;
        let annotations = read_le_at::<u32>(data, &mut offset)?;
        let dependencies = read_le_at::<u32>(data, &mut offset)?;
        let size = read_le_at::<u32>(data, &mut offset)?;
        let namespace = read_le_at::<u32>(data, &mut offset)?;
        let nsversion = read_le_at::<u32>(data, &mut offset)?;
        let shared_library = read_le_at::<u32>(data, &mut offset)?;

        let mut blob_sizes = [0_u16; 18];
        for size in &mut blob_sizes {
            *size = read_le_at::<u16>(data, &mut offset)?;
        }

        Ok(Header {
            magic,
            major_version,
            minor_version,
            n_entries,
            n_local_entries,
            directory,
            n_annotations,
            annotations,
            dependencies,
            size,
            namespace,
            nsversion,
            shared_library,
            blob_sizes,
        })
    }

    /// Returns the name of the first declared record size that differs from the format, if any
    #[must_use]
    pub fn blob_size_mismatch(&self) -> Option<&'static str> {
        DECLARED_SIZES
            .iter()
            .zip(self.blob_sizes.iter())
            .find(|(declared, &actual)| declared.expected != usize::from(actual))
            .map(|(declared, _)| declared.name)
    }
}
