//! Type tags and the inline type descriptor.
//!
//! Every argument, return value, field, property and constant carries a 4-byte type descriptor.
//! It either encodes a scalar type directly ([`TypeDescriptor::Simple`]) or holds the offset of a
//! complex type record ([`TypeDescriptor::Indirect`]): an array, an interface reference, a
//! parameterized container or an error type.
//!
//! # Encoding
//!
//! Read as a little-endian `u32` value `v`:
//!
//! | Bits   | Meaning                      |
//! |--------|------------------------------|
//! | 0..8   | reserved, must be 0          |
//! | 8..24  | reserved, must be 0          |
//! | 24     | pointer flag                 |
//! | 27..32 | type tag                     |
//!
//! If any reserved bit is set, the whole value is the offset of a complex type record instead.

use std::{
    ffi::{c_int, c_long, c_uint, c_ulong},
    mem::size_of,
};

use strum::{Display, EnumCount, EnumIter, FromRepr};

/// The type tags of the typelib format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumCount, FromRepr)]
#[repr(u8)]
#[strum(serialize_all = "snake_case")]
pub enum TypeTag {
    /// No value
    Void = 0,
    /// Boolean stored as a 4-byte integer
    Boolean = 1,
    /// Signed 8-bit integer
    Int8 = 2,
    /// Unsigned 8-bit integer
    Uint8 = 3,
    /// Signed 16-bit integer
    Int16 = 4,
    /// Unsigned 16-bit integer
    Uint16 = 5,
    /// Signed 32-bit integer
    Int32 = 6,
    /// Unsigned 32-bit integer
    Uint32 = 7,
    /// Signed 64-bit integer
    Int64 = 8,
    /// Unsigned 64-bit integer
    Uint64 = 9,
    /// Platform C `int`
    Int = 10,
    /// Platform C `unsigned int`
    Uint = 11,
    /// Platform C `long`
    Long = 12,
    /// Platform C `unsigned long`
    Ulong = 13,
    /// Signed pointer-sized integer
    Ssize = 14,
    /// Unsigned pointer-sized integer
    Size = 15,
    /// 32-bit float
    Float = 16,
    /// 64-bit float
    Double = 17,
    /// Platform `time_t`
    TimeT = 18,
    /// Runtime type system handle
    Gtype = 19,
    /// NUL-terminated UTF-8 string
    Utf8 = 20,
    /// NUL-terminated file name in platform encoding
    Filename = 21,
    /// Array, complex only
    Array = 22,
    /// Reference to a directory entry, complex only
    Interface = 23,
    /// Doubly linked list, complex only
    Glist = 24,
    /// Singly linked list, complex only
    Gslist = 25,
    /// Hash table, complex only
    Ghash = 26,
    /// Error with a list of domains, complex only
    Error = 27,
    /// Unicode code point
    Unichar = 28,
}

impl TypeTag {
    /// Returns `true` for tags that are only valid in a complex type record
    #[must_use]
    pub fn is_composite(self) -> bool {
        matches!(
            self,
            TypeTag::Array
                | TypeTag::Interface
                | TypeTag::Glist
                | TypeTag::Gslist
                | TypeTag::Ghash
                | TypeTag::Error
        )
    }

    /// Returns `true` for simple tags that must carry the pointer flag
    #[must_use]
    pub fn requires_pointer(self) -> bool {
        matches!(self, TypeTag::Utf8 | TypeTag::Filename)
    }

    /// Returns `true` for the integer tags, which may describe array lengths
    #[must_use]
    pub fn is_integer(self) -> bool {
        matches!(self as u8, 2..=15)
    }

    /// Byte size of a constant value of this type, `None` where the size is not fixed
    #[must_use]
    pub fn value_size(self) -> Option<usize> {
        let size = match self {
            TypeTag::Boolean => 4,
            TypeTag::Int8 | TypeTag::Uint8 => 1,
            TypeTag::Int16 | TypeTag::Uint16 => 2,
            TypeTag::Int32 | TypeTag::Uint32 => 4,
            TypeTag::Int64 | TypeTag::Uint64 => 8,
            TypeTag::Int => size_of::<c_int>(),
            TypeTag::Uint => size_of::<c_uint>(),
            TypeTag::Long => size_of::<c_long>(),
            TypeTag::Ulong => size_of::<c_ulong>(),
            TypeTag::Ssize => size_of::<isize>(),
            TypeTag::Size => size_of::<usize>(),
            TypeTag::Float => size_of::<f32>(),
            TypeTag::Double => size_of::<f64>(),
            _ => return None,
        };

        Some(size)
    }
}

/// A decoded 4-byte type descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeDescriptor {
    /// A scalar type encoded inline
    Simple {
        /// Raw 5-bit tag; values above [`TypeTag::Unichar`] are not defined by the format
        tag: u8,
        /// Pointer flag
        pointer: bool,
    },
    /// Offset of a complex type record
    Indirect(u32),
}

impl TypeDescriptor {
    /// Decode a raw descriptor value
    #[must_use]
    pub fn parse(raw: u32) -> TypeDescriptor {
        let reserved = raw & 0xFF;
        let reserved2 = (raw >> 8) & 0xFFFF;

        if reserved == 0 && reserved2 == 0 {
            TypeDescriptor::Simple {
                tag: (raw >> 27) as u8,
                pointer: raw & (1 << 24) != 0,
            }
        } else {
            TypeDescriptor::Indirect(raw)
        }
    }

    /// The tag of a simple descriptor, `None` for indirect or undefined tags
    #[must_use]
    pub fn simple_tag(&self) -> Option<TypeTag> {
        match *self {
            TypeDescriptor::Simple { tag, .. } => TypeTag::from_repr(tag),
            TypeDescriptor::Indirect(_) => None,
        }
    }

    /// Encode a simple descriptor
    #[must_use]
    pub fn simple(tag: TypeTag, pointer: bool) -> u32 {
        ((tag as u32) << 27) | if pointer { 1 << 24 } else { 0 }
    }
}

/// Decoded first byte of a complex type record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComplexHead {
    /// Pointer flag (bit 0)
    pub pointer: bool,
    /// Raw tag (bits 3..8)
    pub tag: u8,
}

impl ComplexHead {
    /// Decode the head byte of a complex type record
    #[must_use]
    pub fn parse(byte: u8) -> ComplexHead {
        ComplexHead {
            pointer: byte & 0x01 != 0,
            tag: byte >> 3,
        }
    }

    /// Encode a head byte
    #[must_use]
    pub fn encode(tag: TypeTag, pointer: bool) -> u8 {
        ((tag as u8) << 3) | u8::from(pointer)
    }
}
