//! Byte sources for typelib data.
//!
//! A typelib is always validated and read as one contiguous, immutable byte buffer. Where that
//! buffer comes from is abstracted by the [`crate::file::Backend`] trait so the validator and the
//! accessors never care whether the bytes were loaded, borrowed or mapped.
//!
//! # Key Components
//!
//! - [`crate::file::Backend`] - Trait for different data sources
//! - [`crate::file::Memory`] - Owned in-memory buffer
//! - [`crate::file::Borrowed`] - Caller-owned memory that outlives the typelib view
//! - [`crate::file::Physical`] - Read-only memory-mapped file
//! - [`crate::file::io`] - Little-endian bounds-checked primitive readers
//!
//! # Thread Safety
//!
//! All backends are `Send + Sync`. None of them allows mutation after construction, which is what
//! makes concurrent validation of the same buffer sound.

pub mod io;

mod borrowed;
mod memory;
mod physical;

pub use borrowed::Borrowed;
pub use memory::Memory;
pub use physical::Physical;

/// Backend trait for typelib data sources.
///
/// Implementations must be thread-safe and must never change the bytes they expose.
pub trait Backend: Send + Sync {
    /// Returns the entire data buffer.
    fn data(&self) -> &[u8];

    /// Short description of where the bytes live, used in diagnostics.
    fn origin(&self) -> &'static str;

    /// Returns the total length of the data buffer.
    fn len(&self) -> usize {
        self.data().len()
    }

    /// Returns `true` if the backend holds no data.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
