//! Name strings in the typelib string pool.
//!
//! Names, type names, symbols and namespace strings are stored as NUL-terminated byte strings and
//! referenced by their offset. [`is_name`] is the acceptance check the validator applies to every
//! such reference; [`get_string`] is the zero-copy accessor used once a buffer is validated.

use std::ffi::CStr;

use crate::{Error::OutOfBounds, Result};

/// Maximum number of bytes searched for the terminating NUL of a name
pub const MAX_NAME_LEN: usize = 200;

/// Returns `true` if `offset` designates a valid name.
///
/// A valid name is terminated by a NUL within [`MAX_NAME_LEN`] bytes of `offset` (the search
/// stops at the end of the buffer) and consists only of `[a-zA-Z0-9_-]`. The empty string is a
/// valid name.
///
/// ## Arguments
/// * 'data'   - The typelib buffer
/// * 'offset' - Offset of the candidate string
#[must_use]
pub fn is_name(data: &[u8], offset: u32) -> bool {
    let start = offset as usize;
    if start >= data.len() {
        return false;
    }

    let window = &data[start..data.len().min(start.saturating_add(MAX_NAME_LEN))];
    let Some(end) = window.iter().position(|&byte| byte == 0) else {
        return false;
    };

    window[..end]
        .iter()
        .all(|&byte| byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'-')
}

/// Read the NUL-terminated string at `offset` without copying.
///
/// ## Arguments
/// * 'data'   - The typelib buffer
/// * 'offset' - Offset of the string
///
/// # Errors
/// Returns [`crate::Error::OutOfBounds`] if the offset is outside the buffer or no NUL follows it,
/// and [`crate::Error::InvalidBlob`] if the bytes are not valid UTF-8.
pub fn get_string(data: &[u8], offset: u32) -> Result<&str> {
    let start = offset as usize;
    if start >= data.len() {
        return Err(OutOfBounds);
    }

    let string = CStr::from_bytes_until_nul(&data[start..]).map_err(|_| OutOfBounds)?;
    string
        .to_str()
        .map_err(|error| invalid_blob!("String at {} is not UTF-8 - {}", offset, error))
}
