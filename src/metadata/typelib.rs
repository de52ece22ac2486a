//! Validated, read-only view of a typelib.
//!
//! A [`Typelib`] owns (or borrows) the byte source of one typelib and guarantees that it passed
//! validation before the first accessor can run. All accessors are zero-copy: strings are handed
//! out as `&str` into the buffer and records are decoded on demand from their fixed offsets.
//!
//! # Construction
//!
//! | Constructor | Source |
//! |-------------|--------|
//! | [`Typelib::from_mem`] | owned `Vec<u8>` |
//! | [`Typelib::from_slice`] | caller-owned `&[u8]`, the view borrows it |
//! | [`Typelib::from_file`] | read-only memory mapping of a file |
//!
//! Each constructor has a `_with_config` twin taking a [`ValidationConfig`]. The byte source is
//! released when the view is dropped; the memory mapping of [`Typelib::from_file`] is unmapped at
//! that point as well.
//!
//! # Shared Library Slot
//!
//! Consumers that resolve symbols attach a [`SharedLibrary`] handle through
//! [`Typelib::set_module`]. The slot is plain storage: it is never consulted by validation and the
//! view never opens libraries on its own. [`Typelib::find_some_symbol`] yields the symbol a loader
//! probes to decide whether the running program already provides the library.

use std::path::Path;

use crate::{
    file::{Backend, Borrowed, Memory, Physical},
    metadata::{
        blobs::{AnnotationBlob, FunctionBlob, RegisteredTypeBlob},
        directory::{BlobType, DirEntry},
        header::Header,
        layout::annotation,
        strings::get_string,
        validation::{ValidationConfig, Validator},
    },
    Error::{Empty, OutOfBounds},
    Result,
};

/// A loaded shared library, as attached by a symbol-resolving consumer.
pub trait SharedLibrary: Send + Sync {
    /// Path or soname the library was opened from
    fn name(&self) -> &str;

    /// Returns `true` if the library exports `symbol`
    fn has_symbol(&self, symbol: &str) -> bool;
}

/// A typelib that passed validation.
///
/// # Examples
///
/// ```rust,no_run
/// use girscope::Typelib;
/// use std::path::Path;
///
/// let typelib = Typelib::from_file(Path::new("/usr/lib/girepository-1.0/Gio-2.0.typelib"))?;
/// println!("{} {}", typelib.namespace()?, typelib.nsversion()?.unwrap_or("-"));
///
/// for entry in typelib.entries() {
///     println!("{:>4} {}", entry.index, typelib.entry_name(&entry)?);
/// }
/// # Ok::<(), girscope::Error>(())
/// ```
pub struct Typelib<'a> {
    data: Box<dyn Backend + 'a>,
    header: Header,
    module: Option<Box<dyn SharedLibrary>>,
}

impl Typelib<'static> {
    /// Validate and take ownership of `data`
    ///
    /// # Errors
    /// Returns [`crate::Error::Empty`] for empty input and the first validation failure otherwise.
    pub fn from_mem(data: Vec<u8>) -> Result<Typelib<'static>> {
        Self::from_mem_with_config(data, &ValidationConfig::default())
    }

    /// Validate and take ownership of `data` with a custom configuration
    ///
    /// # Errors
    /// Returns [`crate::Error::Empty`] for empty input and the first validation failure otherwise.
    pub fn from_mem_with_config(
        data: Vec<u8>,
        config: &ValidationConfig,
    ) -> Result<Typelib<'static>> {
        Self::load(Memory::new(data), config)
    }

    /// Map the file at `path` read-only and validate it
    ///
    /// # Errors
    /// Returns [`crate::Error::FileError`] if the file cannot be opened or mapped, and the first
    /// validation failure otherwise.
    pub fn from_file(path: &Path) -> Result<Typelib<'static>> {
        Self::from_file_with_config(path, &ValidationConfig::default())
    }

    /// Map the file at `path` read-only and validate it with a custom configuration
    ///
    /// # Errors
    /// Returns [`crate::Error::FileError`] if the file cannot be opened or mapped, and the first
    /// validation failure otherwise.
    pub fn from_file_with_config(
        path: &Path,
        config: &ValidationConfig,
    ) -> Result<Typelib<'static>> {
        let input = Physical::new(path)?;

        Self::load(input, config)
    }
}

impl<'a> Typelib<'a> {
    /// Validate `data` in place; the view borrows the caller's buffer
    ///
    /// # Errors
    /// Returns [`crate::Error::Empty`] for empty input and the first validation failure otherwise.
    pub fn from_slice(data: &'a [u8]) -> Result<Typelib<'a>> {
        Self::from_slice_with_config(data, &ValidationConfig::default())
    }

    /// Validate `data` in place with a custom configuration
    ///
    /// # Errors
    /// Returns [`crate::Error::Empty`] for empty input and the first validation failure otherwise.
    pub fn from_slice_with_config(
        data: &'a [u8],
        config: &ValidationConfig,
    ) -> Result<Typelib<'a>> {
        Self::load(Borrowed::new(data), config)
    }

    fn load<T: Backend + 'a>(data: T, config: &ValidationConfig) -> Result<Typelib<'a>> {
        if data.is_empty() {
            return Err(Empty);
        }

        let header = {
            let validator = Validator::new(data.data(), *config)?;
            validator.run()?;
            validator.header().clone()
        };
        log::debug!(
            "loaded typelib from {} ({} bytes, {} entries)",
            data.origin(),
            data.len(),
            header.n_entries
        );

        Ok(Typelib {
            data: Box::new(data),
            header,
            module: None,
        })
    }

    /// The validated bytes
    #[must_use]
    pub fn data(&self) -> &[u8] {
        self.data.data()
    }

    /// The decoded header
    #[must_use]
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Read the string at `offset`
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if no terminated string starts at `offset`.
    pub fn string(&self, offset: u32) -> Result<&str> {
        get_string(self.data(), offset)
    }

    fn optional_string(&self, offset: u32) -> Result<Option<&str>> {
        if offset == 0 {
            Ok(None)
        } else {
            self.string(offset).map(Some)
        }
    }

    /// The namespace this typelib describes
    ///
    /// # Errors
    /// Validation proved the namespace to be a terminated ASCII name, so this never fails on a
    /// view built by one of the constructors. The `Result` matches the other string accessors.
    pub fn namespace(&self) -> Result<&str> {
        self.string(self.header.namespace)
    }

    /// The namespace version, if the typelib declares one
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the declared string lies outside the buffer.
    pub fn nsversion(&self) -> Result<Option<&str>> {
        self.optional_string(self.header.nsversion)
    }

    /// The shared library providing the symbols, if any
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the declared string lies outside the buffer.
    pub fn shared_library(&self) -> Result<Option<&str>> {
        self.optional_string(self.header.shared_library)
    }

    /// The raw `|`-separated dependency list, if any
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the declared string lies outside the buffer.
    pub fn dependencies(&self) -> Result<Option<&str>> {
        self.optional_string(self.header.dependencies)
    }

    /// The namespaces this one depends on, in declaration order
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the declared string lies outside the buffer.
    pub fn dependency_list(&self) -> Result<Vec<&str>> {
        Ok(self
            .dependencies()?
            .map(|list| list.split('|').filter(|dep| !dep.is_empty()).collect())
            .unwrap_or_default())
    }

    /// The directory entry with the 1-based `index`
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] for indices outside `1..=n_entries`.
    pub fn dir_entry(&self, index: u16) -> Result<DirEntry> {
        if index == 0 || index > self.header.n_entries {
            return Err(OutOfBounds);
        }

        DirEntry::read(self.data(), self.header.directory, index)
    }

    /// All directory entries, local entries first
    pub fn entries(&self) -> impl Iterator<Item = DirEntry> + '_ {
        (1..=self.header.n_entries).filter_map(|index| self.dir_entry(index).ok())
    }

    /// The name of `entry`
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the name lies outside the buffer.
    pub fn entry_name(&self, entry: &DirEntry) -> Result<&str> {
        self.string(entry.name)
    }

    /// The namespace an imported `entry` comes from, `None` for local entries
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the name lies outside the buffer.
    pub fn entry_namespace(&self, entry: &DirEntry) -> Result<Option<&str>> {
        if entry.local {
            Ok(None)
        } else {
            self.string(entry.offset).map(Some)
        }
    }

    /// Find the first entry called `name`
    #[must_use]
    pub fn find_entry(&self, name: &str) -> Option<DirEntry> {
        self.entries()
            .find(|entry| self.entry_name(entry).is_ok_and(|found| found == name))
    }

    /// Every symbol a loader may probe for: local function symbols and object type init
    /// functions, in directory order.
    #[must_use]
    pub fn symbols(&self) -> Vec<&str> {
        self.entries()
            .filter(|entry| entry.local)
            .filter_map(|entry| self.entry_symbol(&entry))
            .collect()
    }

    fn entry_symbol(&self, entry: &DirEntry) -> Option<&str> {
        let offset = entry.offset as usize;
        let symbol = match entry.kind()? {
            BlobType::Function => FunctionBlob::read(self.data(), offset).ok()?.symbol,
            BlobType::Object => RegisteredTypeBlob::read(self.data(), offset).ok()?.gtype_init,
            _ => return None,
        };

        if symbol == 0 {
            return None;
        }

        self.string(symbol).ok()
    }

    /// The first symbol of [`Typelib::symbols`].
    ///
    /// Typelibs naming a shared library without any probe-able symbol are logged, since a
    /// loader cannot tell whether the program already provides that library.
    #[must_use]
    pub fn find_some_symbol(&self) -> Option<&str> {
        let symbol = self.symbols().into_iter().next();

        if symbol.is_none() {
            if let Ok(Some(library)) = self.shared_library() {
                log::warn!(
                    "typelib {} names shared library {} but provides no symbol",
                    self.namespace().unwrap_or("?"),
                    library
                );
            }
        }

        symbol
    }

    /// The records of the annotation table
    pub fn annotations(&self) -> impl Iterator<Item = AnnotationBlob> + '_ {
        let base = self.header.annotations as usize;

        (0..self.header.n_annotations as usize).filter_map(move |index| {
            AnnotationBlob::read(self.data(), base + index * annotation::SIZE).ok()
        })
    }

    /// Attach `module`, returning the previously attached handle
    pub fn set_module(&mut self, module: Box<dyn SharedLibrary>) -> Option<Box<dyn SharedLibrary>> {
        self.module.replace(module)
    }

    /// The attached shared library, if any
    #[must_use]
    pub fn module(&self) -> Option<&dyn SharedLibrary> {
        self.module.as_deref()
    }

    /// Detach and return the shared library handle
    pub fn take_module(&mut self) -> Option<Box<dyn SharedLibrary>> {
        self.module.take()
    }
}

impl std::fmt::Debug for Typelib<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Typelib")
            .field("origin", &self.data.origin())
            .field("size", &self.data.len())
            .field("header", &self.header)
            .field("module", &self.module.as_ref().map(|module| module.name()))
            .finish()
    }
}
