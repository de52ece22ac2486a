use strum::{Display, EnumIter};
use thiserror::Error;

macro_rules! typelib_error {
    // Single string version
    ($variant:ident, $msg:expr) => {
        crate::Error::$variant {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($variant:ident, $fmt:expr, $($arg:tt)*) => {
        crate::Error::$variant {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

macro_rules! too_short {
    () => {
        typelib_error!(BufferTooShort, "The buffer is too short")
    };
    ($($arg:tt)*) => {
        typelib_error!(BufferTooShort, $($arg)*)
    };
}

macro_rules! invalid_header {
    ($($arg:tt)*) => {
        typelib_error!(InvalidHeader, $($arg)*)
    };
}

macro_rules! invalid_directory {
    ($($arg:tt)*) => {
        typelib_error!(InvalidDirectory, $($arg)*)
    };
}

macro_rules! invalid_blob {
    ($($arg:tt)*) => {
        typelib_error!(InvalidBlob, $($arg)*)
    };
}

macro_rules! invalid_entry {
    ($($arg:tt)*) => {
        typelib_error!(InvalidEntry, $($arg)*)
    };
}

/// The machine-checkable category of an [`Error`].
///
/// Validation failures always carry one of the first five kinds. The remaining kinds only
/// surface from the loading layer (file access) around the validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum ErrorKind {
    /// The buffer (or a region it declares) is shorter than required.
    BufferTooShort,
    /// Magic, version, size, blob-size, alignment or namespace problems in the header.
    InvalidHeader,
    /// Name, type or locality inconsistencies in the directory table.
    InvalidDirectory,
    /// Any record-level contract violation.
    InvalidBlob,
    /// A local entry whose record carries an unknown blob type.
    InvalidEntry,
    /// Failure of the underlying byte source (file system, mapping).
    Io,
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Validation is fail-fast: the first violation found is reported and nothing is repaired. Every
/// structural variant records the message together with the source location that detected it.
///
/// # Error Categories
///
/// ## Validation Errors
/// - [`Error::BufferTooShort`] - A record or region does not fit into the buffer
/// - [`Error::InvalidHeader`] - The fixed header is inconsistent
/// - [`Error::InvalidDirectory`] - The directory table is inconsistent
/// - [`Error::InvalidBlob`] - A record violates its contract
/// - [`Error::InvalidEntry`] - A local record has an unknown kind
///
/// ## Access Errors
/// - [`Error::OutOfBounds`] - An accessor was asked for data outside the buffer
/// - [`Error::Empty`] - Empty input provided
/// - [`Error::FileError`] - Filesystem I/O errors
///
/// # Examples
///
/// ```rust,no_run
/// use girscope::{Error, ErrorKind, Typelib};
/// use std::path::Path;
///
/// match Typelib::from_file(Path::new("Gio-2.0.typelib")) {
///     Ok(typelib) => println!("namespace {}", typelib.namespace()?),
///     Err(Error::FileError(io_err)) => eprintln!("I/O error: {}", io_err),
///     Err(e) if e.kind() == ErrorKind::InvalidBlob => eprintln!("bad record: {}", e),
///     Err(e) => eprintln!("rejected: {}", e),
/// }
/// # Ok::<(), girscope::Error>(())
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// The buffer is shorter than a header, record or declared region requires.
    #[error("Buffer too short - {file}:{line}: {message}")]
    BufferTooShort {
        /// Description of the region that did not fit
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// The fixed-size header failed validation.
    #[error("Invalid header - {file}:{line}: {message}")]
    InvalidHeader {
        /// Description of the header inconsistency
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// A directory entry failed validation.
    #[error("Invalid directory - {file}:{line}: {message}")]
    InvalidDirectory {
        /// Description of the directory inconsistency
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// A record, type descriptor or signature failed validation.
    #[error("Invalid blob - {file}:{line}: {message}")]
    InvalidBlob {
        /// Description of the violated record contract
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// A local directory entry points at a record of unknown kind.
    #[error("Invalid entry - {file}:{line}: {message}")]
    InvalidEntry {
        /// Description of the unknown entry
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// An out of bound access was attempted while reading the buffer.
    ///
    /// Returned by the low-level readers and by accessors on a [`crate::Typelib`] when asked
    /// for an index or offset outside the validated data.
    #[error("Out of Bound read would have occurred!")]
    OutOfBounds,

    /// Provided input was empty.
    #[error("Provided input was empty")]
    Empty,

    /// File I/O error.
    #[error("{0}")]
    FileError(#[from] std::io::Error),
}

impl Error {
    /// Returns the category of this error.
    ///
    /// `OutOfBounds` and `Empty` both describe data that is too short and report
    /// [`ErrorKind::BufferTooShort`].
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::BufferTooShort { .. } | Error::OutOfBounds | Error::Empty => {
                ErrorKind::BufferTooShort
            }
            Error::InvalidHeader { .. } => ErrorKind::InvalidHeader,
            Error::InvalidDirectory { .. } => ErrorKind::InvalidDirectory,
            Error::InvalidBlob { .. } => ErrorKind::InvalidBlob,
            Error::InvalidEntry { .. } => ErrorKind::InvalidEntry,
            Error::FileError(_) => ErrorKind::Io,
        }
    }

    /// Returns the human-readable message of a validation error.
    ///
    /// Variants without a message of their own (`OutOfBounds`, `Empty`, `FileError`) return
    /// `None`; their [`std::fmt::Display`] output is the message.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Error::BufferTooShort { message, .. }
            | Error::InvalidHeader { message, .. }
            | Error::InvalidDirectory { message, .. }
            | Error::InvalidBlob { message, .. }
            | Error::InvalidEntry { message, .. } => Some(message),
            _ => None,
        }
    }
}
