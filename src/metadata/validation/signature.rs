use crate::{
    metadata::{
        blobs::{ArgBlob, SignatureBlob},
        validation::Validator,
    },
    Result,
};

impl Validator<'_> {
    /// Validate a signature: its head, the return type if present and every argument.
    pub(super) fn validate_signature(&self, offset: u32) -> Result<()> {
        let signature = SignatureBlob::read(self.data, offset as usize)?;

        if signature.return_type != 0 {
            self.validate_type(signature.return_type_offset, Some(&signature), 0)?;
        }

        for index in 0..signature.n_arguments {
            self.validate_arg(signature.argument(index), &signature)?;
        }

        Ok(())
    }

    fn validate_arg(&self, offset: usize, signature: &SignatureBlob) -> Result<()> {
        let arg = ArgBlob::read(self.data, offset)?;

        self.require_name(arg.name, "argument name")?;
        self.validate_type(arg.arg_type, Some(signature), 0)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        metadata::typeinfo::{TypeDescriptor, TypeTag},
        test::TypelibBuilder,
        validate, ErrorKind,
    };

    #[test]
    fn arguments_and_return_type() {
        let int = TypeDescriptor::simple(TypeTag::Int32, false);
        let string = TypeDescriptor::simple(TypeTag::Utf8, true);

        let mut builder = TypelibBuilder::new("Sig");
        let signature = builder.signature(string, &[("first", int), ("second", string)]);
        builder.function_with_signature("concat", "sig_concat", 0, signature);
        validate(&builder.build()).unwrap();

        let mut builder = TypelibBuilder::new("Sig");
        let signature = builder.signature(TypeDescriptor::simple(TypeTag::Utf8, false), &[]);
        builder.function_with_signature("bad_return", "sig_bad_return", 0, signature);
        let error = validate(&builder.build()).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidBlob);
        assert_eq!(error.message(), Some("Pointer type expected for tag 20"));
    }

    #[test]
    fn argument_names() {
        let int = TypeDescriptor::simple(TypeTag::Int32, false);

        let mut builder = TypelibBuilder::new("Sig");
        builder.function("add", "sig_add", &[("a", int), ("not valid", int)]);
        let error = validate(&builder.build()).unwrap_err();
        assert_eq!(error.message(), Some("Invalid argument name"));
    }

    #[test]
    fn signature_past_end() {
        let mut builder = TypelibBuilder::new("Sig");
        let signature = builder.signature(0, &[]);
        let function = builder.function_with_signature("noop", "sig_noop", 0, signature);
        let mut data = builder.build();

        let near_end = (data.len() - 4) as u32;
        data[function + 12..function + 16].copy_from_slice(&near_end.to_le_bytes());
        assert_eq!(validate(&data).unwrap_err().kind(), ErrorKind::BufferTooShort);
    }
}
