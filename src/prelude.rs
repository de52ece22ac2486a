//! # girscope Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and functions
//! from the girscope library. Import this module to get quick access to everything needed to
//! validate and read typelibs.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all girscope operations
pub use crate::Error;

/// Machine-checkable error category
pub use crate::ErrorKind;

/// The result type used throughout girscope
pub use crate::Result;

// ================================================================================================
// Main Entry Points
// ================================================================================================

/// Validated typelib view and the shared library slot it carries
pub use crate::{SharedLibrary, Typelib};

/// Validation functions
pub use crate::{validate, validate_all, validate_with_config};

/// Validation configuration and the single-pass validator
pub use crate::{ValidationConfig, Validator};

// ================================================================================================
// Format Vocabulary
// ================================================================================================

/// Header, directory and type descriptor types
pub use crate::metadata::{
    directory::{BlobType, DirEntry},
    header::{Header, HEADER_MAGIC},
    typeinfo::{TypeDescriptor, TypeTag},
};

/// Record readers
pub use crate::metadata::blobs::{
    AnnotationBlob, ConstantBlob, EnumBlob, FunctionBlob, InterfaceBlob, ObjectBlob,
    RegisteredTypeBlob, SignatureBlob, StructBlob,
};
