//! # Typelib Validation
//!
//! This module proves that an untrusted byte buffer is a self-consistent typelib before any
//! consumer reads it. Validation is a single top-down pass over the buffer:
//!
//! 1. **Header**: magic, version, entry counts, total size, declared record sizes, alignment of
//!    the directory and annotation table, namespace name.
//! 2. **Directory**: every entry's name, kind and locality. Local entries are dispatched to the
//!    record validator of their kind, which recursively validates names, type descriptors,
//!    signatures and the trailing sub-records the record owns.
//! 3. **Annotations**: the annotation table fits into the buffer.
//!
//! The pass is fail-fast: the first violation is returned and nothing is repaired. Every read is
//! bounds-checked, every cross-reference is range-checked against the directory and type
//! recursion is bounded by [`ValidationConfig::max_type_depth`], so hostile input can neither
//! read out of bounds nor recurse without limit.
//!
//! ## Thread Safety
//!
//! A [`Validator`] only borrows the buffer immutably. Its only state is a per-pass record of the
//! complex type descriptors already proven valid, so descriptors shared by several paths are
//! walked once and total work stays linear in the buffer size. Independent buffers can be
//! validated concurrently; [`validate_all`] does so with [`rayon`].
//!
//! ## Configuration
//!
//! [`ValidationConfig`] selects policies (duplicate enum values) and hardening extensions (error
//! domains, unions, array lengths, constant value bounds) on top of the format checks that
//! always run.

mod callable;
mod config;
mod directory;
mod header;
mod members;
mod registered;
mod signature;
mod types;

pub use config::ValidationConfig;

use std::{cell::RefCell, collections::HashMap};

use rayon::prelude::*;

use crate::{
    metadata::{
        directory::{BlobType, DirEntry},
        header::Header,
        strings::is_name,
    },
    Result,
};

/// Validate `data` as a typelib with the default [`ValidationConfig`].
///
/// # Errors
/// Returns the first violation found, see [`crate::ErrorKind`] for the categories.
///
/// # Examples
///
/// ```rust,no_run
/// let data = std::fs::read("GLib-2.0.typelib")?;
/// girscope::validate(&data)?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn validate(data: &[u8]) -> Result<()> {
    validate_with_config(data, &ValidationConfig::default())
}

/// Validate `data` as a typelib with a custom configuration.
///
/// # Errors
/// Returns the first violation found.
pub fn validate_with_config(data: &[u8], config: &ValidationConfig) -> Result<()> {
    Validator::new(data, *config)?.run()
}

/// Validate many independent buffers in parallel.
///
/// The results are returned in the order of `buffers`.
#[must_use]
pub fn validate_all(buffers: &[&[u8]], config: &ValidationConfig) -> Vec<Result<()>> {
    buffers
        .par_iter()
        .map(|data| validate_with_config(data, config))
        .collect()
}

/// A single validation pass over one buffer.
///
/// Created by [`Validator::new`], which decodes the header; [`Validator::run`] performs the
/// remaining steps. The validator never mutates the buffer and can be run any number of times
/// with the same result.
pub struct Validator<'a> {
    data: &'a [u8],
    header: Header,
    config: ValidationConfig,
    /// Complex type descriptors proven valid, keyed by offset and enclosing signature, with the
    /// deepest nesting level they were proven at
    checked_types: RefCell<HashMap<(usize, Option<usize>), usize>>,
}

impl<'a> Validator<'a> {
    /// Create a validator for `data`
    ///
    /// # Errors
    /// Returns [`crate::Error::BufferTooShort`] if `data` cannot hold a header.
    pub fn new(data: &'a [u8], config: ValidationConfig) -> Result<Validator<'a>> {
        Ok(Validator {
            data,
            header: Header::read(data)?,
            config,
            checked_types: RefCell::new(HashMap::new()),
        })
    }

    /// The decoded header of the buffer under validation
    #[must_use]
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Run header, directory and annotation validation in order.
    ///
    /// # Errors
    /// Returns the first violation found.
    pub fn run(&self) -> Result<()> {
        self.checked_types.borrow_mut().clear();
        self.validate_header()?;
        self.validate_directory()?;
        self.validate_annotations()
    }

    /// Require `offset` to be a valid name, reporting `what` otherwise.
    fn require_name(&self, offset: u32, what: &str) -> Result<()> {
        if is_name(self.data, offset) {
            Ok(())
        } else {
            Err(invalid_blob!("Invalid {}", what))
        }
    }

    /// Resolve a cross-reference, which must lie in `1..=n_entries`.
    fn resolve(&self, index: u16) -> Result<Option<DirEntry>> {
        if index == 0 || index > self.header.n_entries {
            return Ok(None);
        }

        DirEntry::read(self.data, self.header.directory, index)
            .map(Some)
            .map_err(|_| too_short!())
    }

    /// Resolve a cross-reference that must name a record of kind `expected`.
    ///
    /// `invalid_index` is reported for out-of-range indices, `wrong_kind` for entries of any
    /// other kind. Imported entries with unspecified kind are accepted.
    fn resolve_kind(
        &self,
        index: u16,
        expected: &[BlobType],
        invalid_index: &str,
        wrong_kind: &str,
    ) -> Result<()> {
        let Some(entry) = self.resolve(index)? else {
            return Err(invalid_blob!("{}", invalid_index));
        };

        if expected.iter().any(|kind| entry.resolves_to(*kind)) {
            Ok(())
        } else {
            Err(invalid_blob!("{}", wrong_kind))
        }
    }
}
