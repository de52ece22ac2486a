use std::collections::HashSet;

use crate::{
    metadata::{
        blobs::{
            ensure_room, read_at, EnumBlob, ErrorDomainBlob, InterfaceBlob, ObjectBlob,
            RegisteredTypeBlob, StructBlob, UnionBlob,
        },
        directory::BlobType,
        layout::{
            constant, enumeration, field, function, interface, object, property, signal,
            structure, union, value, vfunc,
        },
        validation::Validator,
    },
    Result,
};

/// Run `validate` over `count` consecutive records of `stride` bytes, advancing `cursor`.
fn walk(
    cursor: &mut usize,
    count: u16,
    stride: usize,
    mut validate: impl FnMut(usize) -> Result<()>,
) -> Result<()> {
    for _ in 0..count {
        validate(*cursor)?;
        *cursor += stride;
    }

    Ok(())
}

/// Bytes taken by a list of `count` `u16` directory indices, padded to an even count.
fn index_list_size(count: u16) -> usize {
    (usize::from(count) + usize::from(count % 2)) * 2
}

impl Validator<'_> {
    /// Registration name and init symbol are required when registered and absent otherwise.
    fn validate_registration(&self, head: &RegisteredTypeBlob, what: &str) -> Result<()> {
        if head.unregistered() {
            if head.gtype_name != 0 || head.gtype_init != 0 {
                return Err(invalid_blob!("Gtype data in unregistered {}", what));
            }

            return Ok(());
        }

        self.require_name(head.gtype_name, &format!("{} type name", what))?;
        self.require_name(head.gtype_init, &format!("{} type init", what))
    }

    /// Validate a struct or boxed record, then its fields and methods.
    pub(super) fn validate_struct(&self, offset: usize, kind: BlobType) -> Result<()> {
        let blob = StructBlob::read(self.data, offset)?;
        let head = &blob.head;

        if head.blob_type != kind as u16 {
            return Err(invalid_blob!("Wrong blob type"));
        }

        if (kind == BlobType::Boxed) == head.unregistered() {
            return Err(invalid_blob!("Registration/blob type mismatch"));
        }

        self.require_name(head.name, "struct name")?;

        if kind == BlobType::Boxed {
            self.require_name(head.gtype_name, "boxed type name")?;
            self.require_name(head.gtype_init, "boxed type init")?;
        } else if head.gtype_name != 0 || head.gtype_init != 0 {
            return Err(invalid_blob!("Gtype data in struct"));
        }

        ensure_room(
            self.data,
            offset,
            structure::SIZE
                + usize::from(blob.n_fields) * field::SIZE
                + usize::from(blob.n_methods) * function::SIZE,
        )?;

        let mut cursor = offset + structure::SIZE;
        walk(&mut cursor, blob.n_fields, field::SIZE, |at| {
            self.validate_field(at)
        })?;
        walk(&mut cursor, blob.n_methods, function::SIZE, |at| {
            self.validate_function(at, Some(kind))
        })
    }

    /// Validate an enum or flags record and its values.
    pub(super) fn validate_enum(&self, offset: usize, kind: BlobType) -> Result<()> {
        let blob = EnumBlob::read(self.data, offset)?;

        if blob.head.blob_type != kind as u16 {
            return Err(invalid_blob!("Wrong blob type"));
        }

        self.validate_registration(&blob.head, "enum")?;
        self.require_name(blob.head.name, "enum name")?;

        ensure_room(
            self.data,
            offset,
            enumeration::SIZE + usize::from(blob.n_values) * value::SIZE,
        )?;

        let mut seen = HashSet::with_capacity(usize::from(blob.n_values));
        let mut cursor = offset + enumeration::SIZE;
        walk(&mut cursor, blob.n_values, value::SIZE, |at| {
            let value = self.validate_value(at)?;

            if !seen.insert(value.value) && self.config.reject_duplicate_enum_values {
                return Err(invalid_blob!("Duplicate enum value"));
            }

            Ok(())
        })
    }

    /// Validate an object record: parent, interfaces and every member list in format order.
    pub(super) fn validate_object(&self, offset: usize) -> Result<()> {
        let blob = ObjectBlob::read(self.data, offset)?;
        let head = &blob.head;

        if head.blob_type != BlobType::Object as u16 {
            return Err(invalid_blob!("Wrong blob type"));
        }

        self.require_name(head.gtype_name, "object type name")?;
        self.require_name(head.gtype_init, "object type init")?;
        self.require_name(head.name, "object name")?;

        if blob.parent > self.header.n_entries {
            return Err(invalid_blob!("Invalid parent index"));
        }

        if blob.parent != 0 {
            self.resolve_kind(
                blob.parent,
                &[BlobType::Object],
                "Invalid parent index",
                "Parent not object",
            )?;
        }

        ensure_room(
            self.data,
            offset,
            object::SIZE
                + index_list_size(blob.n_interfaces)
                + usize::from(blob.n_fields) * field::SIZE
                + usize::from(blob.n_properties) * property::SIZE
                + usize::from(blob.n_methods) * function::SIZE
                + usize::from(blob.n_signals) * signal::SIZE
                + usize::from(blob.n_vfuncs) * vfunc::SIZE
                + usize::from(blob.n_constants) * constant::SIZE,
        )?;

        let mut cursor = offset + object::SIZE;
        walk(&mut cursor, blob.n_interfaces, 2, |at| {
            let index = read_at::<u16>(self.data, at, 0)?;
            self.resolve_kind(
                index,
                &[BlobType::Interface],
                "Invalid interface index",
                "Not an interface",
            )
        })?;
        cursor += 2 * usize::from(blob.n_interfaces % 2);

        walk(&mut cursor, blob.n_fields, field::SIZE, |at| {
            self.validate_field(at)
        })?;
        walk(&mut cursor, blob.n_properties, property::SIZE, |at| {
            self.validate_property(at)
        })?;
        walk(&mut cursor, blob.n_methods, function::SIZE, |at| {
            self.validate_function(at, Some(BlobType::Object))
        })?;
        walk(&mut cursor, blob.n_signals, signal::SIZE, |at| {
            self.validate_signal(at, offset)
        })?;
        walk(&mut cursor, blob.n_vfuncs, vfunc::SIZE, |at| {
            self.validate_vfunc(at, offset)
        })?;
        walk(&mut cursor, blob.n_constants, constant::SIZE, |at| {
            self.validate_constant(at)
        })
    }

    /// Validate an interface record: prerequisites and every member list in format order.
    pub(super) fn validate_interface(&self, offset: usize) -> Result<()> {
        let blob = InterfaceBlob::read(self.data, offset)?;
        let head = &blob.head;

        if head.blob_type != BlobType::Interface as u16 {
            return Err(invalid_blob!("Wrong blob type"));
        }

        self.require_name(head.gtype_name, "interface type name")?;
        self.require_name(head.gtype_init, "interface type init")?;
        self.require_name(head.name, "interface name")?;

        ensure_room(
            self.data,
            offset,
            interface::SIZE
                + index_list_size(blob.n_prerequisites)
                + usize::from(blob.n_properties) * property::SIZE
                + usize::from(blob.n_methods) * function::SIZE
                + usize::from(blob.n_signals) * signal::SIZE
                + usize::from(blob.n_vfuncs) * vfunc::SIZE
                + usize::from(blob.n_constants) * constant::SIZE,
        )?;

        let mut cursor = offset + interface::SIZE;
        walk(&mut cursor, blob.n_prerequisites, 2, |at| {
            let index = read_at::<u16>(self.data, at, 0)?;
            self.resolve_kind(
                index,
                &[BlobType::Interface, BlobType::Object],
                "Invalid prerequisite index",
                "Not an interface or object",
            )
        })?;
        cursor += 2 * usize::from(blob.n_prerequisites % 2);

        walk(&mut cursor, blob.n_properties, property::SIZE, |at| {
            self.validate_property(at)
        })?;
        walk(&mut cursor, blob.n_methods, function::SIZE, |at| {
            self.validate_function(at, Some(BlobType::Interface))
        })?;
        walk(&mut cursor, blob.n_signals, signal::SIZE, |at| {
            self.validate_signal(at, offset)
        })?;
        walk(&mut cursor, blob.n_vfuncs, vfunc::SIZE, |at| {
            self.validate_vfunc(at, offset)
        })?;
        walk(&mut cursor, blob.n_constants, constant::SIZE, |at| {
            self.validate_constant(at)
        })
    }

    /// Error domains are only inspected when [`crate::ValidationConfig::validate_error_domains`]
    /// is set.
    pub(super) fn validate_error_domain(&self, offset: usize) -> Result<()> {
        if !self.config.validate_error_domains {
            return Ok(());
        }

        let blob = ErrorDomainBlob::read(self.data, offset)?;

        if blob.blob_type != BlobType::ErrorDomain as u16 {
            return Err(invalid_blob!("Wrong blob type"));
        }

        self.require_name(blob.name, "error domain name")?;
        self.require_name(blob.get_quark, "error domain quark function")?;

        self.resolve_kind(
            blob.error_codes,
            &[BlobType::Enum],
            &format!("Invalid directory index {}", blob.error_codes),
            "Error codes not an enum",
        )
    }

    /// Unions are only inspected when [`crate::ValidationConfig::validate_unions`] is set.
    pub(super) fn validate_union(&self, offset: usize) -> Result<()> {
        if !self.config.validate_unions {
            return Ok(());
        }

        let blob = UnionBlob::read(self.data, offset)?;

        if blob.head.blob_type != BlobType::Union as u16 {
            return Err(invalid_blob!("Wrong blob type"));
        }

        self.validate_registration(&blob.head, "union")?;
        self.require_name(blob.head.name, "union name")?;

        if blob.discriminated {
            self.validate_type(blob.discriminator_type, None, 0)?;
        }

        ensure_room(
            self.data,
            offset,
            union::SIZE
                + usize::from(blob.n_fields) * field::SIZE
                + usize::from(blob.n_functions) * function::SIZE,
        )?;

        let mut cursor = offset + union::SIZE;
        walk(&mut cursor, blob.n_fields, field::SIZE, |at| {
            self.validate_field(at)
        })?;
        walk(&mut cursor, blob.n_functions, function::SIZE, |at| {
            self.validate_function(at, Some(BlobType::Union))
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        metadata::{
            blobs::FunctionFlags,
            directory::BlobType,
            typeinfo::{TypeDescriptor, TypeTag},
        },
        test::{InterfaceSpec, ObjectSpec, TypelibBuilder},
        validate, validate_with_config, ErrorKind, ValidationConfig,
    };

    fn blob_error(data: &[u8], config: &ValidationConfig) -> String {
        let error = validate_with_config(data, config).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidBlob, "{:?}", error);
        error.message().unwrap_or_default().to_string()
    }

    fn default_error(data: &[u8]) -> String {
        blob_error(data, &ValidationConfig::default())
    }

    #[test]
    fn struct_and_boxed() {
        let int = TypeDescriptor::simple(TypeTag::Double, false);

        let mut builder = TypelibBuilder::new("Shapes");
        let x = builder.field("x", int);
        let y = builder.field("y", int);
        let offset = builder.method("offset", "shapes_point_offset", 0);
        builder.structure("Point", BlobType::Struct, &[x, y], &[offset]);
        let copy = builder.method("copy", "shapes_rect_copy", 0);
        builder.structure("Rect", BlobType::Boxed, &[], &[copy]);
        validate(&builder.build()).unwrap();
    }

    #[test]
    fn struct_registration() {
        let mut builder = TypelibBuilder::new("Shapes");
        let point = builder.structure("Point", BlobType::Struct, &[], &[]);
        let data = builder.build();

        let mut bad = data.clone();
        bad[point + 2] &= !0x02;
        assert_eq!(default_error(&bad), "Registration/blob type mismatch");

        let mut bad = data.clone();
        bad[point + 8] = 4;
        assert_eq!(default_error(&bad), "Gtype data in struct");

        let mut bad = data;
        bad[point + 4..point + 8].copy_from_slice(&u32::MAX.to_le_bytes());
        assert_eq!(default_error(&bad), "Invalid struct name");

        let mut builder = TypelibBuilder::new("Shapes");
        let rect = builder.structure("Rect", BlobType::Boxed, &[], &[]);
        let data = builder.build();

        let mut bad = data.clone();
        bad[rect + 2] |= 0x02;
        assert_eq!(default_error(&bad), "Registration/blob type mismatch");

        let mut bad = data;
        bad[rect + 12..rect + 16].copy_from_slice(&u32::MAX.to_le_bytes());
        assert_eq!(default_error(&bad), "Invalid boxed type init");
    }

    #[test]
    fn struct_members_past_end() {
        let mut builder = TypelibBuilder::new("Shapes");
        let point = builder.structure("Point", BlobType::Struct, &[], &[]);
        let mut data = builder.build();

        data[point + 16..point + 18].copy_from_slice(&0x1000_u16.to_le_bytes());
        assert_eq!(validate(&data).unwrap_err().kind(), ErrorKind::BufferTooShort);
    }

    #[test]
    fn enum_values() {
        let mut builder = TypelibBuilder::new("Modes");
        builder.enumeration("Mode", BlobType::Enum, false, &[("read", 0), ("write", 1)]);
        builder.enumeration("Access", BlobType::Flags, true, &[("none", 0), ("all", 7)]);
        validate(&builder.build()).unwrap();

        let mut builder = TypelibBuilder::new("Modes");
        builder.enumeration("Mode", BlobType::Enum, false, &[("read", 1), ("write", 1)]);
        let data = builder.build();
        assert_eq!(default_error(&data), "Duplicate enum value");
        assert_eq!(blob_error(&data, &ValidationConfig::strict()), "Duplicate enum value");
        validate_with_config(&data, &ValidationConfig::permissive()).unwrap();

        let mut builder = TypelibBuilder::new("Modes");
        builder.enumeration("Mode", BlobType::Enum, false, &[("read", 0), ("bad value", 1)]);
        assert_eq!(default_error(&builder.build()), "Invalid value name");
    }

    #[test]
    fn enum_registration() {
        let mut builder = TypelibBuilder::new("Modes");
        let registered = builder.enumeration("Mode", BlobType::Enum, true, &[]);
        let data = builder.build();

        let mut bad = data.clone();
        bad[registered + 8..registered + 12].copy_from_slice(&u32::MAX.to_le_bytes());
        assert_eq!(default_error(&bad), "Invalid enum type name");

        let mut bad = data;
        bad[registered + 12..registered + 16].copy_from_slice(&u32::MAX.to_le_bytes());
        assert_eq!(default_error(&bad), "Invalid enum type init");

        let mut builder = TypelibBuilder::new("Modes");
        let unregistered = builder.enumeration("Mode", BlobType::Enum, false, &[]);
        let mut data = builder.build();
        data[unregistered + 12] = 4;
        assert_eq!(default_error(&data), "Gtype data in unregistered enum");
    }

    #[test]
    fn object_parents() {
        let mut builder = TypelibBuilder::new("Widgets");
        builder.object("Widget", &ObjectSpec::default());
        builder.object("Button", &ObjectSpec { parent: 1, ..ObjectSpec::default() });
        builder.object("Label", &ObjectSpec { parent: 4, ..ObjectSpec::default() });
        builder.import("InitiallyUnowned", "GObject", BlobType::Invalid);
        validate(&builder.build()).unwrap();

        let mut builder = TypelibBuilder::new("Widgets");
        builder.structure("Point", BlobType::Struct, &[], &[]);
        builder.object("Button", &ObjectSpec { parent: 1, ..ObjectSpec::default() });
        assert_eq!(default_error(&builder.build()), "Parent not object");

        let mut builder = TypelibBuilder::new("Widgets");
        builder.object("Button", &ObjectSpec { parent: 2, ..ObjectSpec::default() });
        builder.import("Widget", "Gtk", BlobType::Struct);
        assert_eq!(default_error(&builder.build()), "Parent not object");

        let mut builder = TypelibBuilder::new("Widgets");
        builder.object("Button", &ObjectSpec { parent: 2, ..ObjectSpec::default() });
        assert_eq!(default_error(&builder.build()), "Invalid parent index");
    }

    #[test]
    fn object_interfaces() {
        let with_interfaces = |interfaces: Vec<u16>| {
            let mut builder = TypelibBuilder::new("Widgets");
            builder.interface("Buildable", &InterfaceSpec::default());
            builder.enumeration("Mode", BlobType::Enum, false, &[]);
            let title = builder.property("title", TypeDescriptor::simple(TypeTag::Utf8, true));
            let spec = ObjectSpec {
                interfaces,
                properties: vec![title],
                ..ObjectSpec::default()
            };
            builder.object("Window", &spec);
            builder.import("Actionable", "Gtk", BlobType::Invalid);
            builder.build()
        };

        validate(&with_interfaces(vec![1])).unwrap();
        validate(&with_interfaces(vec![1, 4])).unwrap();
        validate(&with_interfaces(vec![4, 1, 1])).unwrap();
        assert_eq!(default_error(&with_interfaces(vec![0])), "Invalid interface index");
        assert_eq!(default_error(&with_interfaces(vec![1, 5])), "Invalid interface index");
        assert_eq!(default_error(&with_interfaces(vec![2])), "Not an interface");
    }

    #[test]
    fn object_members_in_order() {
        let int = TypeDescriptor::simple(TypeTag::Int32, false);

        let mut builder = TypelibBuilder::new("Widgets");
        let field = builder.field("parent_instance", int);
        let property = builder.property("visible", TypeDescriptor::simple(TypeTag::Boolean, false));
        let method = builder.method("show", "widgets_widget_show", 0);
        let setter = builder.method(
            "set_visible",
            "widgets_widget_set_visible",
            FunctionFlags::SETTER.bits() | (1 << 6),
        );
        let signal = builder.signal("destroy", 0x0008, 0);
        let vfunc = builder.vfunc("realize", 0, 0);
        let constant = builder.constant_record("PRIORITY", int, &10_i32.to_le_bytes());
        let spec = ObjectSpec {
            interfaces: vec![2],
            fields: vec![field],
            properties: vec![property],
            methods: vec![method, setter],
            signals: vec![signal],
            vfuncs: vec![vfunc],
            constants: vec![constant],
            ..ObjectSpec::default()
        };
        builder.object("Widget", &spec);
        builder.interface("Accessible", &InterfaceSpec::default());
        validate(&builder.build()).unwrap();

        let mut builder = TypelibBuilder::new("Widgets");
        let constant = builder.constant_record("PRIORITY", int, &10_i64.to_le_bytes());
        let spec = ObjectSpec {
            constants: vec![constant],
            ..ObjectSpec::default()
        };
        builder.object("Widget", &spec);
        assert_eq!(default_error(&builder.build()), "Constant value size mismatch");
    }

    #[test]
    fn object_names() {
        let mut builder = TypelibBuilder::new("Widgets");
        let widget = builder.object("Widget", &ObjectSpec::default());
        let data = builder.build();

        let mut bad = data.clone();
        bad[widget + 8..widget + 12].copy_from_slice(&u32::MAX.to_le_bytes());
        assert_eq!(default_error(&bad), "Invalid object type name");

        let mut bad = data.clone();
        bad[widget + 12..widget + 16].copy_from_slice(&u32::MAX.to_le_bytes());
        assert_eq!(default_error(&bad), "Invalid object type init");

        let mut bad = data;
        bad[widget + 4..widget + 8].copy_from_slice(&u32::MAX.to_le_bytes());
        assert_eq!(default_error(&bad), "Invalid object name");
    }

    #[test]
    fn interface_prerequisites() {
        let with_prerequisites = |prerequisites: Vec<u16>| {
            let mut builder = TypelibBuilder::new("Widgets");
            builder.object("Widget", &ObjectSpec::default());
            builder.structure("Point", BlobType::Struct, &[], &[]);
            let method = builder.method("new", "widgets_editable_new", FunctionFlags::CONSTRUCTOR.bits());
            let spec = InterfaceSpec {
                prerequisites,
                methods: vec![method],
                ..InterfaceSpec::default()
            };
            builder.interface("Editable", &spec);
            builder.build()
        };

        validate(&with_prerequisites(vec![1])).unwrap();
        validate(&with_prerequisites(vec![1, 3])).unwrap();
        assert_eq!(
            default_error(&with_prerequisites(vec![4])),
            "Invalid prerequisite index"
        );
        assert_eq!(
            default_error(&with_prerequisites(vec![2])),
            "Not an interface or object"
        );
    }

    #[test]
    fn interface_signals() {
        let mut builder = TypelibBuilder::new("Widgets");
        let changed = builder.signal("changed", 0x0104, 1);
        let inserted = builder.signal("inserted", 0x0002, 0);
        let spec = InterfaceSpec {
            signals: vec![changed, inserted],
            ..InterfaceSpec::default()
        };
        builder.interface("Editable", &spec);
        validate(&builder.build()).unwrap();

        let mut builder = TypelibBuilder::new("Widgets");
        let changed = builder.signal("changed", 0x0104, 1);
        let spec = InterfaceSpec {
            signals: vec![changed],
            ..InterfaceSpec::default()
        };
        builder.interface("Editable", &spec);
        assert_eq!(default_error(&builder.build()), "Invalid class closure index");
    }

    #[test]
    fn error_domains() {
        let strict = ValidationConfig::strict();

        let mut builder = TypelibBuilder::new("Errors");
        builder.error_domain("ParseError", "errors_parse_error_quark", 2);
        builder.enumeration("ParseErrorCode", BlobType::Enum, false, &[("failed", 0)]);
        validate_with_config(&builder.build(), &strict).unwrap();

        let mut builder = TypelibBuilder::new("Errors");
        builder.error_domain("ParseError", "errors_parse_error_quark", 2);
        builder.import("IOErrorEnum", "Gio", BlobType::Invalid);
        validate_with_config(&builder.build(), &strict).unwrap();

        let mut builder = TypelibBuilder::new("Errors");
        builder.error_domain("ParseError", "errors_parse_error_quark", 1);
        let data = builder.build();
        validate(&data).unwrap();
        assert_eq!(blob_error(&data, &strict), "Error codes not an enum");

        let mut builder = TypelibBuilder::new("Errors");
        builder.error_domain("ParseError", "errors_parse_error_quark", 3);
        let data = builder.build();
        validate(&data).unwrap();
        assert_eq!(blob_error(&data, &strict), "Invalid directory index 3");

        let mut builder = TypelibBuilder::new("Errors");
        builder.error_domain("ParseError", "errors.quark", 1);
        assert_eq!(
            blob_error(&builder.build(), &strict),
            "Invalid error domain quark function"
        );
    }

    #[test]
    fn unions() {
        let strict = ValidationConfig::strict();
        let int = TypeDescriptor::simple(TypeTag::Int32, false);

        let mut builder = TypelibBuilder::new("Values");
        let number = builder.field("number", int);
        let text = builder.field("text", TypeDescriptor::simple(TypeTag::Utf8, true));
        let copy = builder.method("copy", "values_value_copy", 0);
        builder.union("Value", Some(int), &[number, text], &[copy]);
        validate_with_config(&builder.build(), &strict).unwrap();

        let mut builder = TypelibBuilder::new("Values");
        let bad = builder.field("bad field", int);
        builder.union("Value", None, &[bad], &[]);
        let data = builder.build();
        validate(&data).unwrap();
        assert_eq!(blob_error(&data, &strict), "Invalid field name");

        let mut builder = TypelibBuilder::new("Values");
        builder.union("Value", Some(TypeDescriptor::simple(TypeTag::Glist, true)), &[], &[]);
        assert_eq!(blob_error(&builder.build(), &strict), "Wrong tag in simple type");

        let mut builder = TypelibBuilder::new("Values");
        let constructor = builder.method("new", "values_value_new", FunctionFlags::CONSTRUCTOR.bits());
        builder.union("Value", None, &[], &[constructor]);
        assert_eq!(blob_error(&builder.build(), &strict), "Constructor not allowed");
    }
}
