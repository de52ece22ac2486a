//! The fixed record layout of the typelib format.
//!
//! Every record kind has a fixed byte size and fixed field offsets. They are part of the format,
//! not configuration: the header of every typelib repeats the sizes and the validator rejects a
//! buffer whose self-declared sizes differ from the ones below.
//!
//! Each submodule describes one record kind as a set of `usize` constants: the byte offset of
//! every field relative to the start of the record, plus `SIZE`. All readers in
//! [`crate::metadata::blobs`] go through these constants and never overlay Rust structs on the
//! buffer.
//!
//! The bottom of this module holds the build-time self-check: each record's last field must end
//! exactly at the record's documented size.

/// Typelib file header, always at offset 0.
pub mod header {
    pub const MAGIC: usize = 0;
    pub const MAJOR_VERSION: usize = 16;
    pub const MINOR_VERSION: usize = 17;
    pub const RESERVED: usize = 18;
    pub const N_ENTRIES: usize = 20;
    pub const N_LOCAL_ENTRIES: usize = 22;
    pub const DIRECTORY: usize = 24;
    pub const N_ANNOTATIONS: usize = 28;
    pub const ANNOTATIONS: usize = 32;
    pub const DEPENDENCIES: usize = 36;
    pub const SIZE_FIELD: usize = 40;
    pub const NAMESPACE: usize = 44;
    pub const NSVERSION: usize = 48;
    pub const SHARED_LIBRARY: usize = 52;
    /// First of the 18 consecutive `u16` blob-size fields
    pub const BLOB_SIZES: usize = 56;
    pub const PADDING: usize = 92;
    pub const SIZE: usize = 100;
}

/// Directory entry, `n_entries` of them starting at `Header::directory`.
pub mod dir_entry {
    pub const BLOB_TYPE: usize = 0;
    pub const FLAGS: usize = 2;
    pub const NAME: usize = 4;
    pub const OFFSET: usize = 8;
    pub const SIZE: usize = 12;
}

/// Head shared by every top-level record.
pub mod common {
    pub const BLOB_TYPE: usize = 0;
    pub const FLAGS: usize = 2;
    pub const NAME: usize = 4;
    pub const SIZE: usize = 8;
}

/// Inline type descriptor (simple tag or offset of a complex type).
pub mod simple_type {
    pub const SIZE: usize = 4;
}

/// Complex type referring to a directory entry.
pub mod interface_type {
    pub const TAG: usize = 0;
    pub const INTERFACE: usize = 2;
    pub const SIZE: usize = 4;
}

pub mod array_type {
    pub const FLAGS: usize = 0;
    pub const DIMENSION: usize = 2;
    pub const TYPE: usize = 4;
    pub const SIZE: usize = 8;
}

/// Container type followed by `n_types` inline type descriptors.
pub mod param_type {
    pub const TAG: usize = 0;
    pub const N_TYPES: usize = 2;
    pub const SIZE: usize = 4;
}

/// Error type followed by `n_domains` `u16` directory indices.
pub mod error_type {
    pub const TAG: usize = 0;
    pub const N_DOMAINS: usize = 2;
    pub const SIZE: usize = 4;
}

pub mod arg {
    pub const NAME: usize = 0;
    pub const FLAGS: usize = 4;
    pub const ARG_TYPE: usize = 8;
    pub const SIZE: usize = 12;
}

/// Signature head followed by `n_arguments` argument records.
pub mod signature {
    pub const RETURN_TYPE: usize = 0;
    pub const FLAGS: usize = 4;
    pub const N_ARGUMENTS: usize = 6;
    pub const SIZE: usize = 8;
}

pub mod function {
    pub const BLOB_TYPE: usize = 0;
    pub const FLAGS: usize = 2;
    pub const NAME: usize = 4;
    pub const SYMBOL: usize = 8;
    pub const SIGNATURE: usize = 12;
    pub const SIZE: usize = 16;
}

pub mod callback {
    pub const BLOB_TYPE: usize = 0;
    pub const FLAGS: usize = 2;
    pub const NAME: usize = 4;
    pub const SIGNATURE: usize = 8;
    pub const SIZE: usize = 12;
}

pub mod constant {
    pub const BLOB_TYPE: usize = 0;
    pub const FLAGS: usize = 2;
    pub const NAME: usize = 4;
    pub const TYPE: usize = 8;
    pub const VALUE_SIZE: usize = 12;
    pub const VALUE_OFFSET: usize = 16;
    pub const SIZE: usize = 20;
}

/// Enumeration member.
pub mod value {
    pub const FLAGS: usize = 0;
    pub const NAME: usize = 4;
    pub const VALUE: usize = 8;
    pub const SIZE: usize = 12;
}

pub mod field {
    pub const NAME: usize = 0;
    pub const FLAGS: usize = 4;
    pub const BITS: usize = 5;
    pub const STRUCT_OFFSET: usize = 6;
    pub const TYPE: usize = 8;
    pub const SIZE: usize = 12;
}

pub mod property {
    pub const NAME: usize = 0;
    pub const FLAGS: usize = 4;
    pub const TYPE: usize = 8;
    pub const SIZE: usize = 12;
}

pub mod signal {
    pub const FLAGS: usize = 0;
    pub const CLASS_CLOSURE: usize = 2;
    pub const NAME: usize = 4;
    pub const SIGNATURE: usize = 8;
    pub const SIZE: usize = 12;
}

/// Virtual function slot.
pub mod vfunc {
    pub const NAME: usize = 0;
    pub const FLAGS: usize = 4;
    pub const SIGNAL: usize = 6;
    pub const STRUCT_OFFSET: usize = 8;
    pub const CLASS_CLOSURE: usize = 10;
    pub const SIGNATURE: usize = 12;
    pub const SIZE: usize = 16;
}

/// Head shared by all records that may be registered with the runtime type system.
pub mod registered {
    pub const BLOB_TYPE: usize = 0;
    pub const FLAGS: usize = 2;
    pub const NAME: usize = 4;
    pub const GTYPE_NAME: usize = 8;
    pub const GTYPE_INIT: usize = 12;
    pub const SIZE: usize = 16;
}

/// Struct and boxed records, followed by fields then methods.
pub mod structure {
    pub const N_FIELDS: usize = 16;
    pub const N_METHODS: usize = 18;
    pub const SIZE: usize = 20;
}

/// Union records, followed by fields then functions.
pub mod union {
    pub const N_FIELDS: usize = 16;
    pub const N_FUNCTIONS: usize = 18;
    pub const DISCRIMINATOR_OFFSET: usize = 20;
    pub const DISCRIMINATOR_TYPE: usize = 24;
    pub const SIZE: usize = 28;
}

/// Enum and flags records, followed by values.
pub mod enumeration {
    pub const N_VALUES: usize = 16;
    pub const RESERVED: usize = 18;
    pub const SIZE: usize = 20;
}

/// Object records, followed by interfaces, fields, properties, methods, signals, vfuncs and
/// constants in that order.
pub mod object {
    pub const PARENT: usize = 16;
    pub const N_INTERFACES: usize = 18;
    pub const N_FIELDS: usize = 20;
    pub const N_PROPERTIES: usize = 22;
    pub const N_METHODS: usize = 24;
    pub const N_SIGNALS: usize = 26;
    pub const N_VFUNCS: usize = 28;
    pub const N_CONSTANTS: usize = 30;
    pub const SIZE: usize = 32;
}

/// Interface records, followed by prerequisites, properties, methods, signals, vfuncs and
/// constants in that order.
pub mod interface {
    pub const N_PREREQUISITES: usize = 16;
    pub const N_PROPERTIES: usize = 18;
    pub const N_METHODS: usize = 20;
    pub const N_SIGNALS: usize = 22;
    pub const N_VFUNCS: usize = 24;
    pub const N_CONSTANTS: usize = 26;
    pub const SIZE: usize = 28;
}

pub mod error_domain {
    pub const BLOB_TYPE: usize = 0;
    pub const FLAGS: usize = 2;
    pub const NAME: usize = 4;
    pub const GET_QUARK: usize = 8;
    pub const ERROR_CODES: usize = 12;
    pub const RESERVED: usize = 14;
    pub const SIZE: usize = 16;
}

pub mod annotation {
    pub const OFFSET: usize = 0;
    pub const NAME: usize = 4;
    pub const VALUE: usize = 8;
    pub const SIZE: usize = 12;
}

/// One self-declared record size in the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeclaredSize {
    /// Record kind the size belongs to
    pub name: &'static str,
    /// Expected value, fixed by the format
    pub expected: usize,
}

/// The 18 `u16` blob-size fields of the header, in header order.
pub const DECLARED_SIZES: [DeclaredSize; 18] = [
    DeclaredSize { name: "entry", expected: dir_entry::SIZE },
    DeclaredSize { name: "function", expected: function::SIZE },
    DeclaredSize { name: "callback", expected: callback::SIZE },
    DeclaredSize { name: "signal", expected: signal::SIZE },
    DeclaredSize { name: "vfunc", expected: vfunc::SIZE },
    DeclaredSize { name: "arg", expected: arg::SIZE },
    DeclaredSize { name: "property", expected: property::SIZE },
    DeclaredSize { name: "field", expected: field::SIZE },
    DeclaredSize { name: "value", expected: value::SIZE },
    DeclaredSize { name: "annotation", expected: annotation::SIZE },
    DeclaredSize { name: "constant", expected: constant::SIZE },
    DeclaredSize { name: "error_domain", expected: error_domain::SIZE },
    DeclaredSize { name: "signature", expected: signature::SIZE },
    DeclaredSize { name: "enum", expected: enumeration::SIZE },
    DeclaredSize { name: "struct", expected: structure::SIZE },
    DeclaredSize { name: "object", expected: object::SIZE },
    DeclaredSize { name: "interface", expected: interface::SIZE },
    DeclaredSize { name: "union", expected: union::SIZE },
];

// Build-time self-check: a layout edit that breaks a documented size fails compilation.
const _: () = {
    assert!(header::BLOB_SIZES + DECLARED_SIZES.len() * 2 == header::PADDING);
    assert!(header::PADDING + 8 == header::SIZE);
    assert!(header::SIZE == 100);
    assert!(dir_entry::OFFSET + 4 == dir_entry::SIZE && dir_entry::SIZE == 12);
    assert!(common::NAME + 4 == common::SIZE && common::SIZE == 8);
    assert!(simple_type::SIZE == 4);
    assert!(interface_type::INTERFACE + 2 == interface_type::SIZE && interface_type::SIZE == 4);
    assert!(array_type::TYPE + simple_type::SIZE == array_type::SIZE && array_type::SIZE == 8);
    assert!(param_type::N_TYPES + 2 == param_type::SIZE && param_type::SIZE == 4);
    assert!(error_type::N_DOMAINS + 2 == error_type::SIZE && error_type::SIZE == 4);
    assert!(arg::ARG_TYPE + simple_type::SIZE == arg::SIZE && arg::SIZE == 12);
    assert!(signature::N_ARGUMENTS + 2 == signature::SIZE && signature::SIZE == 8);
    assert!(function::SIGNATURE + 4 == function::SIZE && function::SIZE == 16);
    assert!(callback::SIGNATURE + 4 == callback::SIZE && callback::SIZE == 12);
    assert!(constant::VALUE_OFFSET + 4 == constant::SIZE && constant::SIZE == 20);
    assert!(value::VALUE + 4 == value::SIZE && value::SIZE == 12);
    assert!(field::TYPE + simple_type::SIZE == field::SIZE && field::SIZE == 12);
    assert!(property::TYPE + simple_type::SIZE == property::SIZE && property::SIZE == 12);
    assert!(signal::SIGNATURE + 4 == signal::SIZE && signal::SIZE == 12);
    assert!(vfunc::SIGNATURE + 4 == vfunc::SIZE && vfunc::SIZE == 16);
    assert!(registered::GTYPE_INIT + 4 == registered::SIZE && registered::SIZE == 16);
    assert!(structure::N_FIELDS == registered::SIZE);
    assert!(structure::N_METHODS + 2 == structure::SIZE && structure::SIZE == 20);
    assert!(union::N_FIELDS == registered::SIZE);
    assert!(union::DISCRIMINATOR_TYPE + simple_type::SIZE == union::SIZE && union::SIZE == 28);
    assert!(enumeration::N_VALUES == registered::SIZE);
    assert!(enumeration::RESERVED + 2 == enumeration::SIZE && enumeration::SIZE == 20);
    assert!(object::PARENT == registered::SIZE);
    assert!(object::N_CONSTANTS + 2 == object::SIZE && object::SIZE == 32);
    assert!(interface::N_PREREQUISITES == registered::SIZE);
    assert!(interface::N_CONSTANTS + 2 == interface::SIZE && interface::SIZE == 28);
    assert!(error_domain::RESERVED + 2 == error_domain::SIZE && error_domain::SIZE == 16);
    assert!(annotation::VALUE + 4 == annotation::SIZE && annotation::SIZE == 12);
};
