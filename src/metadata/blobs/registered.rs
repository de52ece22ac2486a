//! Records that may be registered with the runtime type system.
//!
//! Structs, boxed types, unions, enums, flags, objects and interfaces share a 16-byte head: blob
//! type, flags, name, registered type name and the symbol of the type's init function. Each
//! container kind adds its own member counts after the head; the members themselves follow the
//! record in a fixed order.

use bitflags::bitflags;

use crate::{
    metadata::{
        blobs::{ensure_room, read_at},
        layout::{enumeration, error_domain, interface, object, registered, structure, union},
    },
    Result,
};

bitflags! {
    #[derive(PartialEq, Debug, Clone, Copy)]
    /// Flags shared by every registered-type head
    pub struct RegisteredFlags : u16 {
        /// The type is deprecated
        const DEPRECATED = 0x0001;
        /// The type is not registered with the runtime type system
        const UNREGISTERED = 0x0002;
    }
}

/// The head shared by all registered-type records.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegisteredTypeBlob {
    /// Raw blob type
    pub blob_type: u16,
    /// Shared flags; kind-specific bits are decoded by the kind readers
    pub flags: RegisteredFlags,
    /// Raw flags value, including kind-specific bits
    pub raw_flags: u16,
    /// Name string offset
    pub name: u32,
    /// Registered type name string offset, 0 for unregistered types
    pub gtype_name: u32,
    /// Type init function symbol string offset, 0 for unregistered types
    pub gtype_init: u32,
}

impl RegisteredTypeBlob {
    /// Read a registered-type head at `offset`
    ///
    /// # Errors
    /// Returns [`crate::Error::BufferTooShort`] if the head does not fit.
    pub fn read(data: &[u8], offset: usize) -> Result<RegisteredTypeBlob> {
        let base = ensure_room(data, offset, registered::SIZE)?;
        let raw_flags = read_at::<u16>(data, base, registered::FLAGS)?;

        Ok(RegisteredTypeBlob {
            blob_type: read_at(data, base, registered::BLOB_TYPE)?,
            flags: RegisteredFlags::from_bits_truncate(raw_flags),
            raw_flags,
            name: read_at(data, base, registered::NAME)?,
            gtype_name: read_at(data, base, registered::GTYPE_NAME)?,
            gtype_init: read_at(data, base, registered::GTYPE_INIT)?,
        })
    }

    /// Whether the type is unregistered
    #[must_use]
    pub fn unregistered(&self) -> bool {
        self.flags.contains(RegisteredFlags::UNREGISTERED)
    }
}

/// A struct or boxed type, followed by fields then methods.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StructBlob {
    /// Shared head
    pub head: RegisteredTypeBlob,
    /// Alignment of the native structure
    pub alignment: u8,
    /// Number of fields
    pub n_fields: u16,
    /// Number of methods
    pub n_methods: u16,
}

impl StructBlob {
    /// Read a struct record at `offset`
    ///
    /// # Errors
    /// Returns [`crate::Error::BufferTooShort`] if the record does not fit.
    pub fn read(data: &[u8], offset: usize) -> Result<StructBlob> {
        let base = ensure_room(data, offset, structure::SIZE)?;
        let head = RegisteredTypeBlob::read(data, base)?;

        Ok(StructBlob {
            head,
            alignment: ((head.raw_flags >> 2) & 0x3F) as u8,
            n_fields: read_at(data, base, structure::N_FIELDS)?,
            n_methods: read_at(data, base, structure::N_METHODS)?,
        })
    }
}

/// A union, followed by fields then functions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnionBlob {
    /// Shared head
    pub head: RegisteredTypeBlob,
    /// The union carries a discriminator
    pub discriminated: bool,
    /// Number of fields
    pub n_fields: u16,
    /// Number of functions
    pub n_functions: u16,
    /// Offset of the discriminator within the native union
    pub discriminator_offset: i32,
    /// Offset of the discriminator's type descriptor
    pub discriminator_type: usize,
}

impl UnionBlob {
    /// Read a union record at `offset`
    ///
    /// # Errors
    /// Returns [`crate::Error::BufferTooShort`] if the record does not fit.
    pub fn read(data: &[u8], offset: usize) -> Result<UnionBlob> {
        let base = ensure_room(data, offset, union::SIZE)?;
        let head = RegisteredTypeBlob::read(data, base)?;

        Ok(UnionBlob {
            head,
            discriminated: head.raw_flags & 0x0004 != 0,
            n_fields: read_at(data, base, union::N_FIELDS)?,
            n_functions: read_at(data, base, union::N_FUNCTIONS)?,
            discriminator_offset: read_at(data, base, union::DISCRIMINATOR_OFFSET)?,
            discriminator_type: base + union::DISCRIMINATOR_TYPE,
        })
    }
}

/// An enum or flags type, followed by its values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnumBlob {
    /// Shared head
    pub head: RegisteredTypeBlob,
    /// Storage type tag of the values
    pub storage_type: u8,
    /// Number of values
    pub n_values: u16,
}

impl EnumBlob {
    /// Read an enum record at `offset`
    ///
    /// # Errors
    /// Returns [`crate::Error::BufferTooShort`] if the record does not fit.
    pub fn read(data: &[u8], offset: usize) -> Result<EnumBlob> {
        let base = ensure_room(data, offset, enumeration::SIZE)?;
        let head = RegisteredTypeBlob::read(data, base)?;

        Ok(EnumBlob {
            head,
            storage_type: ((head.raw_flags >> 2) & 0x1F) as u8,
            n_values: read_at(data, base, enumeration::N_VALUES)?,
        })
    }
}

/// An object class.
///
/// Followed by the interface index list (padded to an even count), fields, properties,
/// methods, signals, vfuncs and constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectBlob {
    /// Shared head
    pub head: RegisteredTypeBlob,
    /// The class is abstract
    pub is_abstract: bool,
    /// Directory index of the parent class, 0 for none
    pub parent: u16,
    /// Number of implemented interfaces
    pub n_interfaces: u16,
    /// Number of fields
    pub n_fields: u16,
    /// Number of properties
    pub n_properties: u16,
    /// Number of methods
    pub n_methods: u16,
    /// Number of signals
    pub n_signals: u16,
    /// Number of virtual functions
    pub n_vfuncs: u16,
    /// Number of constants
    pub n_constants: u16,
}

impl ObjectBlob {
    /// Read an object record at `offset`
    ///
    /// # Errors
    /// Returns [`crate::Error::BufferTooShort`] if the record does not fit.
    pub fn read(data: &[u8], offset: usize) -> Result<ObjectBlob> {
        let base = ensure_room(data, offset, object::SIZE)?;
        let head = RegisteredTypeBlob::read(data, base)?;

        Ok(ObjectBlob {
            head,
            is_abstract: head.raw_flags & 0x0004 != 0,
            parent: read_at(data, base, object::PARENT)?,
            n_interfaces: read_at(data, base, object::N_INTERFACES)?,
            n_fields: read_at(data, base, object::N_FIELDS)?,
            n_properties: read_at(data, base, object::N_PROPERTIES)?,
            n_methods: read_at(data, base, object::N_METHODS)?,
            n_signals: read_at(data, base, object::N_SIGNALS)?,
            n_vfuncs: read_at(data, base, object::N_VFUNCS)?,
            n_constants: read_at(data, base, object::N_CONSTANTS)?,
        })
    }
}

/// An interface.
///
/// Followed by the prerequisite index list (padded to an even count), properties, methods,
/// signals, vfuncs and constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterfaceBlob {
    /// Shared head
    pub head: RegisteredTypeBlob,
    /// Number of prerequisites
    pub n_prerequisites: u16,
    /// Number of properties
    pub n_properties: u16,
    /// Number of methods
    pub n_methods: u16,
    /// Number of signals
    pub n_signals: u16,
    /// Number of virtual functions
    pub n_vfuncs: u16,
    /// Number of constants
    pub n_constants: u16,
}

impl InterfaceBlob {
    /// Read an interface record at `offset`
    ///
    /// # Errors
    /// Returns [`crate::Error::BufferTooShort`] if the record does not fit.
    pub fn read(data: &[u8], offset: usize) -> Result<InterfaceBlob> {
        let base = ensure_room(data, offset, interface::SIZE)?;
        let head = RegisteredTypeBlob::read(data, base)?;

        Ok(InterfaceBlob {
            head,
            n_prerequisites: read_at(data, base, interface::N_PREREQUISITES)?,
            n_properties: read_at(data, base, interface::N_PROPERTIES)?,
            n_methods: read_at(data, base, interface::N_METHODS)?,
            n_signals: read_at(data, base, interface::N_SIGNALS)?,
            n_vfuncs: read_at(data, base, interface::N_VFUNCS)?,
            n_constants: read_at(data, base, interface::N_CONSTANTS)?,
        })
    }
}

/// An error domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorDomainBlob {
    /// Raw blob type
    pub blob_type: u16,
    /// Deprecation flag
    pub deprecated: bool,
    /// Name string offset
    pub name: u32,
    /// Symbol string offset of the function returning the domain quark
    pub get_quark: u32,
    /// Directory index of the enum listing the error codes
    pub error_codes: u16,
}

impl ErrorDomainBlob {
    /// Read an error domain record at `offset`
    ///
    /// # Errors
    /// Returns [`crate::Error::BufferTooShort`] if the record does not fit.
    pub fn read(data: &[u8], offset: usize) -> Result<ErrorDomainBlob> {
        let base = ensure_room(data, offset, error_domain::SIZE)?;

        Ok(ErrorDomainBlob {
            blob_type: read_at(data, base, error_domain::BLOB_TYPE)?,
            deprecated: read_at::<u16>(data, base, error_domain::FLAGS)? & 0x0001 != 0,
            name: read_at(data, base, error_domain::NAME)?,
            get_quark: read_at(data, base, error_domain::GET_QUARK)?,
            error_codes: read_at(data, base, error_domain::ERROR_CODES)?,
        })
    }
}
