//! Low-level little-endian, bounds-checked reading utilities.
//!
//! Every multi-byte integer in a typelib is stored little-endian. This module provides the
//! [`crate::file::io::TypelibIO`] trait and the reader function the rest of the crate builds
//! on. Readers never index the buffer without checking the requested range first, and the range
//! arithmetic itself is overflow-checked, so a hostile offset turns into
//! [`crate::Error::OutOfBounds`] rather than a panic.
//!
//! # Key Components
//!
//! - [`crate::file::io::TypelibIO`] - Trait implemented by all primitive types stored in a typelib
//! - [`crate::file::io::read_le_at`] - Read a value at an offset, advancing the offset
//!
//! # Usage Examples
//!
//! ```rust,ignore
//! use girscope::file::io::read_le_at;
//!
//! let data = [0x01, 0x00, 0x02, 0x00, 0x03, 0x00, 0x00, 0x00];
//! let mut offset = 0;
//!
//! let first: u16 = read_le_at(&data, &mut offset)?;  // offset: 0 -> 2
//! let second: u16 = read_le_at(&data, &mut offset)?; // offset: 2 -> 4
//! let third: u32 = read_le_at(&data, &mut offset)?;  // offset: 4 -> 8
//!
//! assert_eq!((first, second, third), (1, 2, 3));
//! # Ok::<(), girscope::Error>(())
//! ```

use crate::{Error::OutOfBounds, Result};

/// Trait for primitive types that can be decoded from little-endian typelib bytes.
///
/// Implementations are pure conversions and therefore thread-safe.
pub trait TypelibIO: Sized {
    /// Associated type representing the byte array type for this numeric type.
    type Bytes: Sized + for<'a> TryFrom<&'a [u8]>;

    /// Read T from a byte buffer in little-endian
    fn from_le_bytes(bytes: Self::Bytes) -> Self;
}

// Implement TypelibIO support for u32
impl TypelibIO for u32 {
    type Bytes = [u8; 4];

    fn from_le_bytes(bytes: Self::Bytes) -> Self {
        u32::from_le_bytes(bytes)
    }
}

// Implement TypelibIO support for i32
impl TypelibIO for i32 {
    type Bytes = [u8; 4];

    fn from_le_bytes(bytes: Self::Bytes) -> Self {
        i32::from_le_bytes(bytes)
    }
}

// Implement TypelibIO support for u16
impl TypelibIO for u16 {
    type Bytes = [u8; 2];

    fn from_le_bytes(bytes: Self::Bytes) -> Self {
        u16::from_le_bytes(bytes)
    }
}

// Implement TypelibIO support for u8
impl TypelibIO for u8 {
    type Bytes = [u8; 1];

    fn from_le_bytes(bytes: Self::Bytes) -> Self {
        u8::from_le_bytes(bytes)
    }
}

/// Safely reads a value of type `T` in little-endian byte order at `offset`.
///
/// On success the offset is advanced past the value, which makes sequential parsing of a
/// record head a series of plain calls.
///
/// # Errors
///
/// Returns [`crate::Error::OutOfBounds`] if the value does not lie entirely within `data`,
/// including the case where `offset + size_of::<T>()` overflows.
pub fn read_le_at<T: TypelibIO>(data: &[u8], offset: &mut usize) -> Result<T> {
    let type_len = std::mem::size_of::<T>();
    let Some(end) = offset.checked_add(type_len) else {
        return Err(OutOfBounds);
    };

    if end > data.len() {
        return Err(OutOfBounds);
    }

    let Ok(read) = data[*offset..end].try_into() else {
        return Err(OutOfBounds);
    };

    *offset = end;

    Ok(T::from_le_bytes(read))
}
