use crate::{
    metadata::{
        blobs::{
            ensure_room, read_at, types::read_complex_head, ArgBlob, ArrayTypeBlob,
            ErrorTypeBlob, InterfaceTypeBlob, ParamTypeBlob, SignatureBlob,
        },
        directory::BlobType,
        layout::simple_type,
        typeinfo::{TypeDescriptor, TypeTag},
        validation::Validator,
    },
    Result,
};

impl Validator<'_> {
    /// Validate the type descriptor stored at `offset`.
    ///
    /// `signature` is the enclosing signature when the descriptor belongs to an argument or a
    /// return value; array length indices are checked against it. `depth` counts the complex
    /// records already entered on the way here.
    pub(super) fn validate_type(
        &self,
        offset: usize,
        signature: Option<&SignatureBlob>,
        depth: usize,
    ) -> Result<()> {
        if depth > self.config.max_type_depth {
            return Err(invalid_blob!("Type nesting too deep"));
        }

        ensure_room(self.data, offset, simple_type::SIZE)?;
        let raw = read_at::<u32>(self.data, offset, 0)?;

        match TypeDescriptor::parse(raw) {
            TypeDescriptor::Simple { tag, pointer } => validate_simple_type(tag, pointer),
            TypeDescriptor::Indirect(target) => {
                self.validate_complex_type(target as usize, signature, depth + 1)
            }
        }
    }

    /// A descriptor proven valid at some depth is valid at every shallower depth, so shared
    /// sub-descriptors are only walked again when reached deeper than before.
    fn validate_complex_type(
        &self,
        offset: usize,
        signature: Option<&SignatureBlob>,
        depth: usize,
    ) -> Result<()> {
        let key = (offset, signature.map(|signature| signature.arguments));
        if self
            .checked_types
            .borrow()
            .get(&key)
            .is_some_and(|&proven| depth <= proven)
        {
            return Ok(());
        }

        let head = read_complex_head(self.data, offset)?;

        match TypeTag::from_repr(head.tag) {
            Some(TypeTag::Array) => self.validate_array_type(offset, signature, depth),
            Some(TypeTag::Interface) => self.validate_interface_type(offset),
            Some(TypeTag::Glist | TypeTag::Gslist) => self.validate_param_type(offset, 1, depth),
            Some(TypeTag::Ghash) => self.validate_param_type(offset, 2, depth),
            Some(TypeTag::Error) => self.validate_error_type(offset),
            _ => Err(invalid_blob!("Wrong tag in complex type")),
        }?;

        self.checked_types
            .borrow_mut()
            .entry(key)
            .and_modify(|proven| *proven = (*proven).max(depth))
            .or_insert(depth);
        Ok(())
    }

    fn validate_array_type(
        &self,
        offset: usize,
        signature: Option<&SignatureBlob>,
        depth: usize,
    ) -> Result<()> {
        let array = ArrayTypeBlob::read(self.data, offset)?;

        if !array.pointer {
            return Err(invalid_blob!("Pointer type expected for tag {}", array.tag));
        }

        if self.config.validate_array_lengths {
            self.validate_array_length(&array, signature)?;
        }

        self.validate_type(array.element_type, None, depth)
    }

    /// Length and size of an array exclude each other; a length must name an integer argument.
    fn validate_array_length(
        &self,
        array: &ArrayTypeBlob,
        signature: Option<&SignatureBlob>,
    ) -> Result<()> {
        if array.has_length && array.has_size {
            return Err(invalid_blob!("Array length and size are exclusive"));
        }

        let (true, Some(signature)) = (array.has_length, signature) else {
            return Ok(());
        };

        if array.length >= signature.n_arguments {
            return Err(invalid_blob!("Invalid array length index {}", array.length));
        }

        let argument = ArgBlob::read(self.data, signature.argument(array.length))?;
        let raw = read_at::<u32>(self.data, argument.arg_type, 0)?;

        match TypeDescriptor::parse(raw).simple_tag() {
            Some(tag) if tag.is_integer() => Ok(()),
            _ => Err(invalid_blob!("Array length argument is not an integer")),
        }
    }

    fn validate_interface_type(&self, offset: usize) -> Result<()> {
        let iface = InterfaceTypeBlob::read(self.data, offset)?;

        if iface.interface == 0 || iface.interface > self.header.n_entries {
            return Err(invalid_blob!("Invalid directory index {}", iface.interface));
        }

        Ok(())
    }

    fn validate_param_type(&self, offset: usize, arity: u16, depth: usize) -> Result<()> {
        let param = ParamTypeBlob::read(self.data, offset)?;

        if !param.pointer {
            return Err(invalid_blob!("Pointer type expected for tag {}", param.tag));
        }

        if param.n_types != arity {
            return Err(invalid_blob!("Parameter type number mismatch"));
        }

        for index in 0..usize::from(arity) {
            self.validate_type(param.types + index * simple_type::SIZE, None, depth)?;
        }

        Ok(())
    }

    fn validate_error_type(&self, offset: usize) -> Result<()> {
        let error = ErrorTypeBlob::read(self.data, offset)?;

        if !error.pointer {
            return Err(invalid_blob!("Pointer type expected for tag {}", error.tag));
        }

        for index in 0..error.n_domains {
            let domain = error.domain(self.data, index)?;

            let Some(entry) = self.resolve(domain)? else {
                return Err(invalid_blob!("Invalid directory index {}", domain));
            };

            if !entry.resolves_to(BlobType::ErrorDomain) {
                return Err(invalid_blob!("Wrong blob type"));
            }
        }

        Ok(())
    }
}

fn validate_simple_type(tag: u8, pointer: bool) -> Result<()> {
    let tag = match TypeTag::from_repr(tag) {
        Some(tag) if !tag.is_composite() => tag,
        _ => return Err(invalid_blob!("Wrong tag in simple type")),
    };

    if tag.requires_pointer() && !pointer {
        return Err(invalid_blob!("Pointer type expected for tag {}", tag as u8));
    }

    Ok(())
}
