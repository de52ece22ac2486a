//! Complex type records.
//!
//! An indirect type descriptor points at one of these records. All of them start with the same
//! head byte (pointer flag and tag, see [`crate::metadata::typeinfo::ComplexHead`]); the tag
//! decides which of the readers below applies.

use crate::{
    metadata::{
        blobs::{ensure_room, read_at},
        layout::{array_type, error_type, interface_type, param_type},
        typeinfo::ComplexHead,
    },
    Result,
};

/// Reads the head byte shared by all complex type records at `offset`.
///
/// # Errors
/// Returns [`crate::Error::BufferTooShort`] if not even the smallest complex record fits.
pub fn read_complex_head(data: &[u8], offset: usize) -> Result<ComplexHead> {
    let base = ensure_room(data, offset, interface_type::SIZE)?;
    Ok(ComplexHead::parse(read_at::<u8>(data, base, 0)?))
}

/// Reference to a directory entry by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterfaceTypeBlob {
    /// Pointer flag
    pub pointer: bool,
    /// Raw tag, [`crate::metadata::typeinfo::TypeTag::Interface`] when valid
    pub tag: u8,
    /// 1-based directory index of the referenced entry
    pub interface: u16,
}

impl InterfaceTypeBlob {
    /// Read an interface type record at `offset`
    ///
    /// # Errors
    /// Returns [`crate::Error::BufferTooShort`] if the record does not fit.
    pub fn read(data: &[u8], offset: usize) -> Result<InterfaceTypeBlob> {
        let base = ensure_room(data, offset, interface_type::SIZE)?;
        let head = ComplexHead::parse(read_at::<u8>(data, base, interface_type::TAG)?);

        Ok(InterfaceTypeBlob {
            pointer: head.pointer,
            tag: head.tag,
            interface: read_at(data, base, interface_type::INTERFACE)?,
        })
    }
}

/// Array of elements of one type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrayTypeBlob {
    /// Pointer flag, required for arrays
    pub pointer: bool,
    /// Raw tag
    pub tag: u8,
    /// The array is terminated by a zero element
    pub zero_terminated: bool,
    /// `length` is the index of the argument carrying the array length
    pub has_length: bool,
    /// `length` is the fixed number of elements
    pub has_size: bool,
    /// Length argument index or fixed size, depending on the flags
    pub length: u16,
    /// Offset of the element type descriptor
    pub element_type: usize,
}

impl ArrayTypeBlob {
    /// Read an array type record at `offset`
    ///
    /// # Errors
    /// Returns [`crate::Error::BufferTooShort`] if the record does not fit.
    pub fn read(data: &[u8], offset: usize) -> Result<ArrayTypeBlob> {
        let base = ensure_room(data, offset, array_type::SIZE)?;
        let flags = read_at::<u16>(data, base, array_type::FLAGS)?;
        let head = ComplexHead::parse((flags & 0xFF) as u8);

        Ok(ArrayTypeBlob {
            pointer: head.pointer,
            tag: head.tag,
            zero_terminated: flags & 0x0100 != 0,
            has_length: flags & 0x0200 != 0,
            has_size: flags & 0x0400 != 0,
            length: read_at(data, base, array_type::DIMENSION)?,
            element_type: base + array_type::TYPE,
        })
    }
}

/// List or hash container, followed by `n_types` inline type descriptors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamTypeBlob {
    /// Pointer flag, required for containers
    pub pointer: bool,
    /// Raw tag
    pub tag: u8,
    /// Number of parameter types following the head
    pub n_types: u16,
    /// Offset of the first parameter type descriptor
    pub types: usize,
}

impl ParamTypeBlob {
    /// Read a container type head at `offset`
    ///
    /// # Errors
    /// Returns [`crate::Error::BufferTooShort`] if the head does not fit.
    pub fn read(data: &[u8], offset: usize) -> Result<ParamTypeBlob> {
        let base = ensure_room(data, offset, param_type::SIZE)?;
        let head = ComplexHead::parse(read_at::<u8>(data, base, param_type::TAG)?);

        Ok(ParamTypeBlob {
            pointer: head.pointer,
            tag: head.tag,
            n_types: read_at(data, base, param_type::N_TYPES)?,
            types: base + param_type::SIZE,
        })
    }
}

/// Error type, followed by `n_domains` `u16` directory indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorTypeBlob {
    /// Pointer flag, required for error types
    pub pointer: bool,
    /// Raw tag
    pub tag: u8,
    /// Number of error domain indices following the head
    pub n_domains: u16,
    /// Offset of the first domain index
    pub domains: usize,
}

impl ErrorTypeBlob {
    /// Read an error type head at `offset`
    ///
    /// # Errors
    /// Returns [`crate::Error::BufferTooShort`] if the head does not fit.
    pub fn read(data: &[u8], offset: usize) -> Result<ErrorTypeBlob> {
        let base = ensure_room(data, offset, error_type::SIZE)?;
        let head = ComplexHead::parse(read_at::<u8>(data, base, error_type::TAG)?);

        Ok(ErrorTypeBlob {
            pointer: head.pointer,
            tag: head.tag,
            n_domains: read_at(data, base, error_type::N_DOMAINS)?,
            domains: base + error_type::SIZE,
        })
    }

    /// Reads the `index`-th domain index
    ///
    /// # Errors
    /// Returns [`crate::Error::BufferTooShort`] if the domain list runs past the buffer.
    pub fn domain(&self, data: &[u8], index: u16) -> Result<u16> {
        let offset = self.domains + usize::from(index) * 2;
        ensure_room(data, offset, 2)?;
        read_at(data, offset, 0)
    }
}
