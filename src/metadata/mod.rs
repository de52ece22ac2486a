//! Typelib format definitions, readers and validation.
//!
//! This module contains everything that knows the binary layout of a typelib: the fixed header,
//! the directory, the type descriptors and the records they point at, together with the validator
//! that proves a buffer self-consistent before any of it is trusted.
//!
//! # Key Components
//!
//! - [`typelib::Typelib`] - Validated, zero-copy view over one typelib
//! - [`validation`] - The recursive validator and its configuration
//! - [`header`] - The 100-byte header at offset 0
//! - [`directory`] - Directory entries and record kinds
//! - [`typeinfo`] - Simple and indirect type descriptors
//! - [`blobs`] - Fixed-head readers for every record kind
//! - [`strings`] - Name checks and zero-copy string reads
//!
//! # Examples
//!
//! ```rust,no_run
//! use girscope::metadata::{directory::BlobType, typelib::Typelib};
//!
//! let typelib = Typelib::from_file("GObject-2.0.typelib".as_ref())?;
//! let objects = typelib
//!     .entries()
//!     .filter(|entry| entry.local && entry.kind() == Some(BlobType::Object))
//!     .count();
//! println!("{} declares {} object types", typelib.namespace()?, objects);
//! # Ok::<(), girscope::Error>(())
//! ```

/// Fixed-head readers for all record kinds
pub mod blobs;
/// Directory entries and the record kind enumeration
pub mod directory;
/// The typelib header
pub mod header;
/// Record sizes and field offsets of the format
pub(crate) mod layout;
/// Name strings in the string pool
pub mod strings;
/// Type descriptor tags and decoding
pub mod typeinfo;
/// Implementation of a loaded and validated typelib
pub mod typelib;
/// Implementation of the typelib validator
pub mod validation;
