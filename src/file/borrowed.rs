use super::Backend;

/// Typelib data owned by the caller.
///
/// The lifetime ties the view to the caller's memory, so the borrow checker enforces the
/// "memory stays alive and unchanged" promise the loader would otherwise have to trust.
#[derive(Debug, Clone, Copy)]
pub struct Borrowed<'a> {
    data: &'a [u8],
}

impl<'a> Borrowed<'a> {
    /// Create a new backend over caller-owned memory
    #[must_use]
    pub fn new(data: &'a [u8]) -> Borrowed<'a> {
        Borrowed { data }
    }
}

impl Backend for Borrowed<'_> {
    fn data(&self) -> &[u8] {
        self.data
    }

    fn origin(&self) -> &'static str {
        "borrowed"
    }
}
