use super::Backend;

/// Typelib bytes owned by the view.
///
/// The buffer is frozen into a boxed slice on construction; a validated typelib never grows, so
/// any spare capacity of the source vector is released.
#[derive(Debug)]
pub struct Memory {
    data: Box<[u8]>,
}

impl Memory {
    /// Take ownership of `data`
    #[must_use]
    pub fn new(data: Vec<u8>) -> Memory {
        Memory {
            data: data.into_boxed_slice(),
        }
    }
}

impl Backend for Memory {
    fn data(&self) -> &[u8] {
        &self.data
    }

    fn origin(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frozen() {
        let mut data = Vec::with_capacity(4096);
        data.extend_from_slice(b"GOBJ");

        let memory = Memory::new(data);
        assert_eq!(memory.data(), b"GOBJ");
        assert_eq!(memory.len(), 4);
        assert_eq!(memory.origin(), "memory");
    }

    #[test]
    fn empty() {
        let memory = Memory::new(Vec::new());
        assert!(memory.is_empty());
    }
}
