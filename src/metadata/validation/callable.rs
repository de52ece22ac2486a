use crate::{
    metadata::{
        blobs::{
            read_at, CallbackBlob, FunctionBlob, FunctionFlags, InterfaceBlob, ObjectBlob,
            SignalBlob, SignalFlags, VFuncBlob, VFuncFlags,
        },
        directory::BlobType,
        layout::common,
        validation::Validator,
    },
    Result,
};

/// Declared member counts of the object or interface owning a signal or vfunc.
struct OwnerCounts {
    n_signals: u16,
    n_vfuncs: u16,
}

impl Validator<'_> {
    /// Validate a function record.
    ///
    /// `container` is the kind of the record owning the function, `None` for top-level
    /// functions. Constructors and accessors are only legal in certain containers.
    pub(super) fn validate_function(
        &self,
        offset: usize,
        container: Option<BlobType>,
    ) -> Result<()> {
        let function = FunctionBlob::read(self.data, offset)?;

        if function.blob_type != BlobType::Function as u16 {
            return Err(invalid_blob!("Wrong blob type"));
        }

        self.require_name(function.name, "function name")?;
        self.require_name(function.symbol, "function symbol")?;

        if function.flags.contains(FunctionFlags::CONSTRUCTOR)
            && !matches!(
                container,
                Some(BlobType::Boxed | BlobType::Object | BlobType::Interface)
            )
        {
            return Err(invalid_blob!("Constructor not allowed"));
        }

        if function.is_accessor()
            && !matches!(container, Some(BlobType::Object | BlobType::Interface))
        {
            return Err(invalid_blob!("Setter, getter or wrapper not allowed"));
        }

        if function.index != 0 && !function.is_accessor() {
            return Err(invalid_blob!("Must be setter, getter or wrapper"));
        }

        self.validate_signature(function.signature)
    }

    pub(super) fn validate_callback(&self, offset: usize) -> Result<()> {
        let callback = CallbackBlob::read(self.data, offset)?;

        if callback.blob_type != BlobType::Callback as u16 {
            return Err(invalid_blob!("Wrong blob type"));
        }

        self.require_name(callback.name, "callback name")?;
        self.validate_signature(callback.signature)
    }

    /// Validate a signal of the object or interface at `container`.
    pub(super) fn validate_signal(&self, offset: usize, container: usize) -> Result<()> {
        let signal = SignalBlob::read(self.data, offset)?;

        self.require_name(signal.name, "signal name")?;

        if signal.run_stages() != 1 {
            return Err(invalid_blob!("Invalid signal run flags"));
        }

        if signal.flags.contains(SignalFlags::HAS_CLASS_CLOSURE)
            && signal.class_closure >= self.owner_counts(container)?.n_signals
        {
            return Err(invalid_blob!("Invalid class closure index"));
        }

        self.validate_signature(signal.signature)
    }

    /// Validate a virtual function of the object or interface at `container`.
    pub(super) fn validate_vfunc(&self, offset: usize, container: usize) -> Result<()> {
        let vfunc = VFuncBlob::read(self.data, offset)?;

        self.require_name(vfunc.name, "vfunc name")?;

        if vfunc.flags.contains(VFuncFlags::CLASS_CLOSURE)
            && vfunc.class_closure >= self.owner_counts(container)?.n_vfuncs
        {
            return Err(invalid_blob!("Invalid class closure index"));
        }

        self.validate_signature(vfunc.signature)
    }

    /// Re-read the owner head; anything that is not an object is read as an interface.
    fn owner_counts(&self, container: usize) -> Result<OwnerCounts> {
        let blob_type = read_at::<u16>(self.data, container, common::BLOB_TYPE)?;

        if blob_type == BlobType::Object as u16 {
            let object = ObjectBlob::read(self.data, container)?;
            Ok(OwnerCounts {
                n_signals: object.n_signals,
                n_vfuncs: object.n_vfuncs,
            })
        } else {
            let iface = InterfaceBlob::read(self.data, container)?;
            Ok(OwnerCounts {
                n_signals: iface.n_signals,
                n_vfuncs: iface.n_vfuncs,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        metadata::{blobs::FunctionFlags, directory::BlobType},
        test::{InterfaceSpec, ObjectSpec, TypelibBuilder},
        validate, ErrorKind,
    };

    fn blob_error(data: &[u8]) -> String {
        let error = validate(data).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidBlob, "{:?}", error);
        error.message().unwrap_or_default().to_string()
    }

    #[test]
    fn function_names() {
        let mut builder = TypelibBuilder::new("Calls");
        builder.function("run", "calls_run", &[]);
        validate(&builder.build()).unwrap();

        let mut builder = TypelibBuilder::new("Calls");
        builder.function("run now", "calls_run", &[]);
        assert_eq!(blob_error(&builder.build()), "Invalid function name");

        let mut builder = TypelibBuilder::new("Calls");
        builder.function("run", "calls.run", &[]);
        assert_eq!(blob_error(&builder.build()), "Invalid function symbol");
    }

    #[test]
    fn unterminated_symbol() {
        let mut builder = TypelibBuilder::new("Calls");
        let function = builder.function("run", "calls_run", &[]);
        let symbol = builder.raw(&[b'x'; 210]);
        let mut data = builder.build();

        data[function + 8..function + 12].copy_from_slice(&(symbol as u32).to_le_bytes());
        assert_eq!(blob_error(&data), "Invalid function symbol");
    }

    #[test]
    fn flags_outside_containers() {
        let mut builder = TypelibBuilder::new("Calls");
        let signature = builder.signature(0, &[]);
        builder.function_with_signature(
            "new",
            "calls_new",
            FunctionFlags::CONSTRUCTOR.bits(),
            signature,
        );
        assert_eq!(blob_error(&builder.build()), "Constructor not allowed");

        let mut builder = TypelibBuilder::new("Calls");
        let signature = builder.signature(0, &[]);
        builder.function_with_signature(
            "get_size",
            "calls_get_size",
            FunctionFlags::GETTER.bits() | (1 << 6),
            signature,
        );
        assert_eq!(blob_error(&builder.build()), "Setter, getter or wrapper not allowed");

        let mut builder = TypelibBuilder::new("Calls");
        let signature = builder.signature(0, &[]);
        builder.function_with_signature("slot", "calls_slot", 3 << 6, signature);
        assert_eq!(blob_error(&builder.build()), "Must be setter, getter or wrapper");
    }

    #[test]
    fn flags_inside_containers() {
        let mut builder = TypelibBuilder::new("Calls");
        let constructor = builder.method("new", "calls_box_new", FunctionFlags::CONSTRUCTOR.bits());
        builder.structure("Box", BlobType::Boxed, &[], &[constructor]);
        validate(&builder.build()).unwrap();

        let mut builder = TypelibBuilder::new("Calls");
        let getter = builder.method("get_x", "calls_point_get_x", FunctionFlags::GETTER.bits());
        builder.structure("Point", BlobType::Struct, &[], &[getter]);
        assert_eq!(blob_error(&builder.build()), "Setter, getter or wrapper not allowed");

        let mut builder = TypelibBuilder::new("Calls");
        let getter = builder.method(
            "get_title",
            "calls_window_get_title",
            FunctionFlags::GETTER.bits() | (1 << 6),
        );
        let constructor = builder.method("new", "calls_window_new", FunctionFlags::CONSTRUCTOR.bits());
        let spec = ObjectSpec {
            methods: vec![constructor, getter],
            ..ObjectSpec::default()
        };
        builder.object("Window", &spec);
        validate(&builder.build()).unwrap();
    }

    #[test]
    fn callbacks() {
        let mut builder = TypelibBuilder::new("Calls");
        let signature = builder.signature(0, &[]);
        builder.callback("Notify", signature);
        validate(&builder.build()).unwrap();

        let mut builder = TypelibBuilder::new("Calls");
        let signature = builder.signature(0, &[]);
        builder.callback("Notify me", signature);
        assert_eq!(blob_error(&builder.build()), "Invalid callback name");
    }

    #[test]
    fn signal_run_flags() {
        for flags in [0x0000, 0x0006, 0x000E] {
            let mut builder = TypelibBuilder::new("Calls");
            let signal = builder.signal("clicked", flags, 0);
            let spec = ObjectSpec {
                signals: vec![signal],
                ..ObjectSpec::default()
            };
            builder.object("Button", &spec);
            assert_eq!(blob_error(&builder.build()), "Invalid signal run flags");
        }
    }

    #[test]
    fn signal_class_closures() {
        let with_closure = |index: u16| {
            let mut builder = TypelibBuilder::new("Calls");
            let first = builder.signal("clicked", 0x0104, index);
            let second = builder.signal("released", 0x0002, 0);
            let spec = ObjectSpec {
                signals: vec![first, second],
                ..ObjectSpec::default()
            };
            builder.object("Button", &spec);
            builder.build()
        };

        validate(&with_closure(0)).unwrap();
        validate(&with_closure(1)).unwrap();
        assert_eq!(blob_error(&with_closure(2)), "Invalid class closure index");
        assert_eq!(blob_error(&with_closure(9)), "Invalid class closure index");
    }

    #[test]
    fn vfunc_class_closures() {
        let with_closure = |flags: u16, index: u16| {
            let mut builder = TypelibBuilder::new("Calls");
            let vfunc = builder.vfunc("activate", flags, index);
            let spec = InterfaceSpec {
                vfuncs: vec![vfunc],
                ..InterfaceSpec::default()
            };
            builder.interface("Activatable", &spec);
            builder.build()
        };

        validate(&with_closure(0x0008, 0)).unwrap();
        validate(&with_closure(0x0000, 5)).unwrap();
        assert_eq!(blob_error(&with_closure(0x0008, 1)), "Invalid class closure index");
    }

    #[test]
    fn member_names() {
        let mut builder = TypelibBuilder::new("Calls");
        let signal = builder.signal("bad signal", 0x0002, 0);
        let spec = ObjectSpec {
            signals: vec![signal],
            ..ObjectSpec::default()
        };
        builder.object("Button", &spec);
        assert_eq!(blob_error(&builder.build()), "Invalid signal name");

        let mut builder = TypelibBuilder::new("Calls");
        let vfunc = builder.vfunc("bad vfunc", 0, 0);
        let spec = InterfaceSpec {
            vfuncs: vec![vfunc],
            ..InterfaceSpec::default()
        };
        builder.interface("Activatable", &spec);
        assert_eq!(blob_error(&builder.build()), "Invalid vfunc name");
    }
}
