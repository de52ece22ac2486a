// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![allow(dead_code)]
#![allow(clippy::too_many_arguments)]
//#![deny(unsafe_code)]
// - 'file/physical.rs' uses mmap to map a file into memory

//! # girscope
//!
//! [![Crates.io](https://img.shields.io/crates/v/girscope.svg)](https://crates.io/crates/girscope)
//! [![Documentation](https://docs.rs/girscope/badge.svg)](https://docs.rs/girscope)
//! [![License](https://img.shields.io/badge/license-Apache--2.0-blue.svg)](https://github.com/BinFlip/girscope/blob/main/LICENSE-APACHE)
//!
//! A fast, safe validator and reader for GObject-Introspection style binary typelibs.
//!
//! A typelib is a compact, position-independent metadata file describing the API of one
//! namespace: functions, callbacks, structs, enums, objects, interfaces, constants and the type
//! descriptors connecting them. Consumers memory-map typelibs and follow raw offsets inside them,
//! so a single inconsistent offset in an untrusted file turns into an out-of-bounds read.
//! `girscope` proves a buffer self-consistent before anything reads it.
//!
//! ## Features
//!
//! - **🛡️ Bounds-checked** - Every read is checked, every cross-reference range-checked
//! - **🔍 Complete** - Header, directory, all record kinds, type descriptors and signatures
//! - **⚡ Zero-copy** - Validation never allocates per record; accessors hand out `&str` slices
//! - **📦 Memory-mapped** - Typelibs on disk are mapped read-only and shared between processes
//! - **🧵 Parallel** - Independent buffers validate concurrently via [`validate_all`]
//! - **🔧 Configurable** - [`ValidationConfig`] presets for compatibility, strictness or leniency
//!
//! ## Quick Start
//!
//! Add `girscope` to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! girscope = "0.1"
//! ```
//!
//! ### Using the Prelude
//!
//! ```rust,no_run
//! use girscope::prelude::*;
//!
//! let typelib = Typelib::from_file("GLib-2.0.typelib".as_ref())?;
//! println!("{} has {} entries", typelib.namespace()?, typelib.entries().count());
//! # Ok::<(), girscope::Error>(())
//! ```
//!
//! ### Validating a Buffer
//!
//! ```rust,no_run
//! use girscope::{validate_with_config, ErrorKind, ValidationConfig};
//!
//! let data = std::fs::read("Gtk-4.0.typelib")?;
//! match validate_with_config(&data, &ValidationConfig::strict()) {
//!     Ok(()) => println!("valid"),
//!     Err(e) if e.kind() == ErrorKind::InvalidBlob => println!("bad record: {}", e),
//!     Err(e) => println!("rejected: {}", e),
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! - [`prelude`] - Convenient re-exports of commonly used types
//! - [`metadata`] - Format definitions, record readers, the validator and the [`Typelib`] view
//! - [`Error`] and [`Result`] - Error handling; [`ErrorKind`] classifies failures
//!
//! ### Validation
//!
//! Validation is one top-down, fail-fast pass: header, then every directory entry with the
//! records it owns, then the annotation table. It never mutates the buffer and reports the first
//! violation found. Type recursion is bounded by [`ValidationConfig::max_type_depth`].
//!
//! ### Logging
//!
//! The crate logs through the [`log`] facade: accepted headers and directories at `debug`, every
//! dispatched record at `trace`. Install any logger implementation to see them.

#[macro_use]
pub(crate) mod error;
pub(crate) mod file;

/// Shared functionality which is used in unit-tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types.
///
/// # Example
///
/// ```rust,no_run
/// use girscope::prelude::*;
///
/// let data = std::fs::read("Gio-2.0.typelib")?;
/// validate_with_config(&data, &ValidationConfig::strict())?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub mod prelude;

/// Definitions, reading and validation of the typelib format
///
/// # Key Components
///
/// ## Loading
/// - [`Typelib`] - Validated view, constructed from memory, a borrowed slice or a file
/// - [`metadata::validation`] - The validator and its [`ValidationConfig`]
///
/// ## Format
/// - [`metadata::header`] - The fixed header
/// - [`metadata::directory`] - Directory entries and [`BlobType`]
/// - [`metadata::typeinfo`] - [`TypeTag`] and [`TypeDescriptor`]
/// - [`metadata::blobs`] - Readers for every record kind
/// - [`metadata::strings`] - Name strings
///
/// # Examples
///
/// ```rust,no_run
/// use girscope::Typelib;
/// use std::path::Path;
///
/// let typelib = Typelib::from_file(Path::new("Gio-2.0.typelib"))?;
/// for dependency in typelib.dependency_list()? {
///     println!("depends on {}", dependency);
/// }
/// println!("probe symbol: {:?}", typelib.find_some_symbol());
/// # Ok::<(), girscope::Error>(())
/// ```
pub mod metadata;

/// `girscope` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// `girscope` Error type
///
/// # Examples
///
/// ```rust,no_run
/// use girscope::{Error, Typelib};
///
/// match Typelib::from_file(std::path::Path::new("broken.typelib")) {
///     Ok(_) => println!("Loaded successfully"),
///     Err(Error::Empty) => println!("File is empty"),
///     Err(Error::InvalidHeader { message, .. }) => println!("Bad header: {}", message),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
pub use error::{Error, ErrorKind};

/// Main entry point for reading typelibs.
///
/// See [`metadata::typelib::Typelib`] for constructors and accessors.
pub use metadata::typelib::{SharedLibrary, Typelib};

/// Validation entry points and configuration.
///
/// # Example
///
/// ```rust
/// use girscope::{validate, ErrorKind};
///
/// let error = validate(&[0_u8; 16]).unwrap_err();
/// assert_eq!(error.kind(), ErrorKind::BufferTooShort);
/// ```
pub use metadata::validation::{
    validate, validate_all, validate_with_config, ValidationConfig, Validator,
};

/// Format vocabulary used by the accessors.
pub use metadata::{
    directory::{BlobType, DirEntry},
    header::Header,
    typeinfo::{TypeDescriptor, TypeTag},
};
