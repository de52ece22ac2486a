//! The typelib directory: one fixed-size entry per top-level named item.
//!
//! Entries are addressed by a 1-based index. Index 0 never names an entry and is used by the
//! format to mean "none" (for example an object without parent). The first `n_local_entries`
//! entries describe records stored in this buffer; the remaining ones name items imported from
//! other namespaces.

use strum::{Display, EnumCount, EnumIter, FromRepr};

use crate::{
    file::io::read_le_at,
    metadata::layout::dir_entry,
    Error::OutOfBounds,
    Result,
};

/// The kind of a top-level record, stored as `u16` in directory entries and record heads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumCount, FromRepr)]
#[repr(u16)]
pub enum BlobType {
    /// No record; only legal for imported entries that leave the kind unspecified
    Invalid = 0,
    /// A free-standing function
    Function = 1,
    /// A callback (function pointer) type
    Callback = 2,
    /// A plain structure, not registered with the type system
    Struct = 3,
    /// A structure registered as a boxed type
    Boxed = 4,
    /// An enumeration
    Enum = 5,
    /// A bit-flags enumeration
    Flags = 6,
    /// An object class
    Object = 7,
    /// An interface
    Interface = 8,
    /// A named constant
    Constant = 9,
    /// An error domain
    ErrorDomain = 10,
    /// A union
    Union = 11,
}

impl BlobType {
    /// The highest blob type value the format defines
    pub const MAX: u16 = BlobType::Union as u16;

    /// Decode a raw blob type, `None` for values above [`BlobType::MAX`]
    #[must_use]
    pub fn from_raw(raw: u16) -> Option<BlobType> {
        BlobType::from_repr(raw)
    }
}

/// A decoded directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirEntry {
    /// 1-based index of this entry in the directory
    pub index: u16,
    /// Raw blob type; may exceed [`BlobType::MAX`] in unvalidated data
    pub blob_type: u16,
    /// Whether the record lives in this buffer
    pub local: bool,
    /// Name string offset
    pub name: u32,
    /// Record offset for local entries, imported namespace name offset otherwise
    pub offset: u32,
}

impl DirEntry {
    /// Offset of the entry with the 1-based `index` in a directory starting at `directory`
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] for index 0 or when the offset overflows.
    pub fn offset_of(directory: u32, index: u16) -> Result<usize> {
        let position = usize::from(index).checked_sub(1).ok_or(OutOfBounds)?;

        position
            .checked_mul(dir_entry::SIZE)
            .and_then(|relative| (directory as usize).checked_add(relative))
            .ok_or(OutOfBounds)
    }

    /// Read the entry with the 1-based `index` from the directory at `directory`
    ///
    /// ## Arguments
    /// * 'data'      - The typelib buffer
    /// * 'directory' - Offset of the directory table
    /// * 'index'     - 1-based entry index
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the entry lies outside `data`.
    pub fn read(data: &[u8], directory: u32, index: u16) -> Result<DirEntry> {
        let mut cursor = Self::offset_of(directory, index)?;

        let blob_type = read_le_at::<u16>(data, &mut cursor)?;
        let flags = read_le_at::<u16>(data, &mut cursor)?;
        let name = read_le_at::<u32>(data, &mut cursor)?;
        let offset = read_le_at::<u32>(data, &mut cursor)?;

        Ok(DirEntry {
            index,
            blob_type,
            local: flags & 0x0001 != 0,
            name,
            offset,
        })
    }

    /// The decoded blob type, `None` when the raw value is unknown
    #[must_use]
    pub fn kind(&self) -> Option<BlobType> {
        BlobType::from_raw(self.blob_type)
    }

    /// Whether this entry may stand in for a record of kind `expected`.
    ///
    /// That is the case if it carries the expected kind, or if it is an imported entry that
    /// leaves its kind unspecified.
    #[must_use]
    pub fn resolves_to(&self, expected: BlobType) -> bool {
        self.blob_type == expected as u16
            || (!self.local && self.blob_type == BlobType::Invalid as u16)
    }
}
