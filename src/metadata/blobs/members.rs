//! Member records: constants, enum values, fields, properties and annotations.

use bitflags::bitflags;

use crate::{
    metadata::{
        blobs::{ensure_room, read_at},
        layout::{annotation, constant, field, property, value},
    },
    Result,
};

bitflags! {
    #[derive(PartialEq, Debug, Clone, Copy)]
    /// Access flags of a field
    pub struct FieldFlags : u8 {
        /// The field can be read
        const READABLE = 0x01;
        /// The field can be written
        const WRITABLE = 0x02;
    }
}

bitflags! {
    #[derive(PartialEq, Debug, Clone, Copy)]
    /// Flags of a property
    pub struct PropertyFlags : u32 {
        /// The property is deprecated
        const DEPRECATED = 0x0001;
        /// The property can be read
        const READABLE = 0x0002;
        /// The property can be written
        const WRITABLE = 0x0004;
        /// The property is set during construction
        const CONSTRUCT = 0x0008;
        /// The property can only be set during construction
        const CONSTRUCT_ONLY = 0x0010;
    }
}

/// A named constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstantBlob {
    /// Raw blob type of the head
    pub blob_type: u16,
    /// Deprecation flag
    pub deprecated: bool,
    /// Name string offset
    pub name: u32,
    /// Raw type descriptor of the value
    pub type_raw: u32,
    /// Offset of the type descriptor
    pub type_offset: usize,
    /// Size of the value in bytes
    pub size: u32,
    /// Offset of the value
    pub offset: u32,
}

impl ConstantBlob {
    /// Read a constant record at `offset`
    ///
    /// # Errors
    /// Returns [`crate::Error::BufferTooShort`] if the record does not fit.
    pub fn read(data: &[u8], offset: usize) -> Result<ConstantBlob> {
        let base = ensure_room(data, offset, constant::SIZE)?;

        Ok(ConstantBlob {
            blob_type: read_at(data, base, constant::BLOB_TYPE)?,
            deprecated: read_at::<u16>(data, base, constant::FLAGS)? & 0x0001 != 0,
            name: read_at(data, base, constant::NAME)?,
            type_raw: read_at(data, base, constant::TYPE)?,
            type_offset: base + constant::TYPE,
            size: read_at(data, base, constant::VALUE_SIZE)?,
            offset: read_at(data, base, constant::VALUE_OFFSET)?,
        })
    }
}

/// A member of an enum or flags type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueBlob {
    /// Deprecation flag
    pub deprecated: bool,
    /// Name string offset
    pub name: u32,
    /// Numeric value
    pub value: i32,
}

impl ValueBlob {
    /// Read a value record at `offset`
    ///
    /// # Errors
    /// Returns [`crate::Error::BufferTooShort`] if the record does not fit.
    pub fn read(data: &[u8], offset: usize) -> Result<ValueBlob> {
        let base = ensure_room(data, offset, value::SIZE)?;

        Ok(ValueBlob {
            deprecated: read_at::<u32>(data, base, value::FLAGS)? & 0x0001 != 0,
            name: read_at(data, base, value::NAME)?,
            value: read_at(data, base, value::VALUE)?,
        })
    }
}

/// A field of a struct, union or object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldBlob {
    /// Name string offset
    pub name: u32,
    /// Access flags
    pub flags: FieldFlags,
    /// Bit width for bit fields, 0 otherwise
    pub bits: u8,
    /// Offset of the field within the native structure
    pub struct_offset: u16,
    /// Offset of the type descriptor
    pub type_offset: usize,
}

impl FieldBlob {
    /// Read a field record at `offset`
    ///
    /// # Errors
    /// Returns [`crate::Error::BufferTooShort`] if the record does not fit.
    pub fn read(data: &[u8], offset: usize) -> Result<FieldBlob> {
        let base = ensure_room(data, offset, field::SIZE)?;

        Ok(FieldBlob {
            name: read_at(data, base, field::NAME)?,
            flags: FieldFlags::from_bits_truncate(read_at(data, base, field::FLAGS)?),
            bits: read_at(data, base, field::BITS)?,
            struct_offset: read_at(data, base, field::STRUCT_OFFSET)?,
            type_offset: base + field::TYPE,
        })
    }
}

/// A property of an object or interface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropertyBlob {
    /// Name string offset
    pub name: u32,
    /// Property flags
    pub flags: PropertyFlags,
    /// Offset of the type descriptor
    pub type_offset: usize,
}

impl PropertyBlob {
    /// Read a property record at `offset`
    ///
    /// # Errors
    /// Returns [`crate::Error::BufferTooShort`] if the record does not fit.
    pub fn read(data: &[u8], offset: usize) -> Result<PropertyBlob> {
        let base = ensure_room(data, offset, property::SIZE)?;

        Ok(PropertyBlob {
            name: read_at(data, base, property::NAME)?,
            flags: PropertyFlags::from_bits_truncate(read_at(data, base, property::FLAGS)?),
            type_offset: base + property::TYPE,
        })
    }
}

/// One record of the annotation table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnnotationBlob {
    /// Offset of the annotated record
    pub offset: u32,
    /// Annotation name string offset
    pub name: u32,
    /// Annotation value string offset
    pub value: u32,
}

impl AnnotationBlob {
    /// Read an annotation record at `offset`
    ///
    /// # Errors
    /// Returns [`crate::Error::BufferTooShort`] if the record does not fit.
    pub fn read(data: &[u8], offset: usize) -> Result<AnnotationBlob> {
        let base = ensure_room(data, offset, annotation::SIZE)?;

        Ok(AnnotationBlob {
            offset: read_at(data, base, annotation::OFFSET)?,
            name: read_at(data, base, annotation::NAME)?,
            value: read_at(data, base, annotation::VALUE)?,
        })
    }
}
