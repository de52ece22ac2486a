//! Fixed-head readers for every typelib record kind.
//!
//! Each reader takes the buffer and the record offset, checks that the record's fixed head lies
//! inside the buffer and decodes its fields into an owned value. No reader hands out a reference
//! into the buffer; variable-length tails (arguments, fields, methods, ...) are addressed by the
//! validator through offsets derived from the decoded counts.
//!
//! # Key Components
//!
//! - [`crate::metadata::blobs::types`] - Complex type records (array, interface, containers, error)
//! - [`crate::metadata::blobs::callable`] - Signatures, arguments, functions, callbacks, signals, vfuncs
//! - [`crate::metadata::blobs::members`] - Constants, enum values, fields, properties, annotations
//! - [`crate::metadata::blobs::registered`] - Structs, unions, enums, objects, interfaces, error domains

pub mod callable;
pub mod members;
pub mod registered;
pub mod types;

pub use callable::{
    ArgBlob, ArgFlags, CallbackBlob, FunctionBlob, FunctionFlags, SignalBlob, SignalFlags,
    SignatureBlob, SignatureFlags, VFuncBlob, VFuncFlags,
};
pub use members::{
    AnnotationBlob, ConstantBlob, FieldBlob, FieldFlags, PropertyBlob, PropertyFlags, ValueBlob,
};
pub use registered::{
    EnumBlob, ErrorDomainBlob, InterfaceBlob, ObjectBlob, RegisteredFlags, RegisteredTypeBlob,
    StructBlob, UnionBlob,
};
pub use types::{ArrayTypeBlob, ErrorTypeBlob, InterfaceTypeBlob, ParamTypeBlob};

use crate::{
    file::io::{read_le_at, TypelibIO},
    Result,
};

/// Checks that `size` bytes starting at `offset` lie inside `data` and returns the start.
///
/// # Errors
/// Returns [`crate::Error::BufferTooShort`] if the range does not fit.
pub(crate) fn ensure_room(data: &[u8], offset: usize, size: usize) -> Result<usize> {
    match offset.checked_add(size) {
        Some(end) if end <= data.len() => Ok(offset),
        _ => Err(too_short!()),
    }
}

/// Reads the field at `base + field`.
pub(crate) fn read_at<T: TypelibIO>(data: &[u8], base: usize, field: usize) -> Result<T> {
    let mut offset = base.checked_add(field).ok_or(crate::Error::OutOfBounds)?;
    read_le_at(data, &mut offset)
}
