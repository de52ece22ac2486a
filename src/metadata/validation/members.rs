use crate::{
    metadata::{
        blobs::{ConstantBlob, FieldBlob, PropertyBlob, ValueBlob},
        directory::BlobType,
        typeinfo::{TypeDescriptor, TypeTag},
        validation::Validator,
    },
    Result,
};

impl Validator<'_> {
    /// Validate a constant, top-level or owned by an object or interface.
    pub(super) fn validate_constant(&self, offset: usize) -> Result<()> {
        let constant = ConstantBlob::read(self.data, offset)?;

        if constant.blob_type != BlobType::Constant as u16 {
            return Err(invalid_blob!("Wrong blob type"));
        }

        self.require_name(constant.name, "constant name")?;
        self.validate_type(constant.type_offset, None, 0)?;

        if constant.offset % 4 != 0 {
            return Err(invalid_blob!("Misaligned constant value"));
        }

        if let TypeDescriptor::Simple { tag, .. } = TypeDescriptor::parse(constant.type_raw) {
            if tag == TypeTag::Void as u8 {
                return Err(invalid_blob!("Constant value type void"));
            }

            let expected = TypeTag::from_repr(tag).and_then(TypeTag::value_size);
            if expected.is_some_and(|size| size != constant.size as usize) {
                return Err(invalid_blob!("Constant value size mismatch"));
            }
        }

        if self.config.check_constant_values {
            let end = (constant.offset as usize).checked_add(constant.size as usize);
            if end.map_or(true, |end| end > self.data.len()) {
                return Err(too_short!());
            }
        }

        Ok(())
    }

    pub(super) fn validate_value(&self, offset: usize) -> Result<ValueBlob> {
        let value = ValueBlob::read(self.data, offset)?;
        self.require_name(value.name, "value name")?;

        Ok(value)
    }

    pub(super) fn validate_field(&self, offset: usize) -> Result<()> {
        let field = FieldBlob::read(self.data, offset)?;

        self.require_name(field.name, "field name")?;
        self.validate_type(field.type_offset, None, 0)
    }

    pub(super) fn validate_property(&self, offset: usize) -> Result<()> {
        let property = PropertyBlob::read(self.data, offset)?;

        self.require_name(property.name, "property name")?;
        self.validate_type(property.type_offset, None, 0)
    }
}
