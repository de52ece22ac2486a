//! Minimal typelib writer for the integration tests.
//!
//! Lays out a header, a heap of strings and records directly behind it, and the directory at the
//! end. Offsets are known as soon as something is added, so tests can corrupt single fields.

#![allow(dead_code)]

use girscope::{BlobType, TypeDescriptor, TypeTag};

pub const MAGIC: &[u8; 16] = b"GOBJ\nMETADATA\r\n\x1a";
pub const HEADER_SIZE: usize = 100;

#[rustfmt::skip]
pub const BLOB_SIZES: [u16; 18] = [
    12, 16, 12, 12, 16, 12, 12, 12, 12,     // entry .. value
    12, 20, 16,  8, 20, 20, 32, 28, 28,     // annotation .. union
];

/// Little-endian record encoder.
#[derive(Default)]
pub struct Bytes(pub Vec<u8>);

impl Bytes {
    pub fn u16(mut self, value: u16) -> Self {
        self.0.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub fn u32(mut self, value: u32) -> Self {
        self.0.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.0.extend_from_slice(bytes);
        self
    }
}

/// A 100-byte header without annotations, dependencies, version or library.
pub fn header(
    n_entries: u16,
    n_local_entries: u16,
    directory: u32,
    size: u32,
    namespace: u32,
) -> Vec<u8> {
    let mut head = Bytes::default()
        .raw(MAGIC)
        .raw(&[1, 0])
        .u16(0)
        .u16(n_entries)
        .u16(n_local_entries)
        .u32(directory)
        .u32(0)
        .u32(0)
        .u32(0)
        .u32(size)
        .u32(namespace)
        .u32(0)
        .u32(0);
    for declared in BLOB_SIZES {
        head = head.u16(declared);
    }
    head.raw(&[0; 8]).0
}

pub struct Image {
    heap: Vec<u8>,
    locals: Vec<[u32; 3]>,
    imports: Vec<[u32; 3]>,
    namespace: u32,
}

impl Image {
    pub fn new(namespace: &str) -> Image {
        let mut image = Image {
            heap: Vec::new(),
            locals: Vec::new(),
            imports: Vec::new(),
            namespace: 0,
        };
        image.namespace = image.string(namespace);
        image
    }

    fn position(&self) -> usize {
        HEADER_SIZE + self.heap.len()
    }

    pub fn string(&mut self, value: &str) -> u32 {
        let offset = self.position() as u32;
        self.heap.extend_from_slice(value.as_bytes());
        self.heap.push(0);
        offset
    }

    /// Append `record` at the next 4-byte aligned offset.
    pub fn record(&mut self, record: Bytes) -> usize {
        while self.position() % 4 != 0 {
            self.heap.push(0);
        }
        let offset = self.position();
        self.heap.extend_from_slice(&record.0);
        offset
    }

    /// Register a local entry; returns its 1-based index.
    pub fn local(&mut self, kind: BlobType, name: &str, offset: usize) -> u16 {
        assert!(self.imports.is_empty(), "locals must precede imports");
        let name = self.string(name);
        self.locals.push([kind as u32, name, offset as u32]);
        self.locals.len() as u16
    }

    pub fn import(&mut self, kind: BlobType, name: &str, namespace: &str) -> u16 {
        let name = self.string(name);
        let namespace = self.string(namespace);
        self.imports.push([kind as u32, name, namespace]);
        (self.locals.len() + self.imports.len()) as u16
    }

    pub fn finish(&self) -> Vec<u8> {
        let directory = (self.position() + 3) & !3;
        let n_entries = self.locals.len() + self.imports.len();
        let size = directory + n_entries * 12;

        let mut data = header(
            n_entries as u16,
            self.locals.len() as u16,
            directory as u32,
            size as u32,
            self.namespace,
        );
        data.extend_from_slice(&self.heap);
        data.resize(directory, 0);

        let entries = self
            .locals
            .iter()
            .map(|entry| (entry, true))
            .chain(self.imports.iter().map(|entry| (entry, false)));
        for (entry, local) in entries {
            let record = Bytes::default()
                .u16(entry[0] as u16)
                .u16(u16::from(local))
                .u32(entry[1])
                .u32(entry[2]);
            data.extend_from_slice(&record.0);
        }

        data
    }

    // Records

    /// Signature with a void return and the given `(name, type)` arguments.
    pub fn signature(&mut self, args: &[(&str, u32)]) -> u32 {
        let names: Vec<u32> = args.iter().map(|(name, _)| self.string(name)).collect();
        let mut record = Bytes::default().u32(0).u16(0).u16(args.len() as u16);
        for (name, (_, type_raw)) in names.iter().zip(args) {
            record = record.u32(*name).u32(0).u32(*type_raw);
        }
        self.record(record) as u32
    }

    /// Function taking a single `int32` argument.
    pub fn function(&mut self, name: &str, symbol: &str) -> usize {
        let symbol = self.string(symbol);
        self.function_at(name, symbol)
    }

    /// Function whose symbol is the string at `symbol`.
    pub fn function_at(&mut self, name: &str, symbol: u32) -> usize {
        let signature = self.signature(&[("value", int32())]);
        let name_offset = self.string(name);
        let record = Bytes::default()
            .u16(BlobType::Function as u16)
            .u16(0)
            .u32(name_offset)
            .u32(symbol)
            .u32(signature);
        let offset = self.record(record);
        self.local(BlobType::Function, name, offset);
        offset
    }

    pub fn constant(&mut self, name: &str, type_raw: u32, value: &[u8]) -> usize {
        let value_offset = self.record(Bytes::default().raw(value));
        let name_offset = self.string(name);
        let record = Bytes::default()
            .u16(BlobType::Constant as u16)
            .u16(0)
            .u32(name_offset)
            .u32(type_raw)
            .u32(value.len() as u32)
            .u32(value_offset as u32);
        let offset = self.record(record);
        self.local(BlobType::Constant, name, offset);
        offset
    }

    /// Unregistered plain struct without members.
    pub fn structure(&mut self, name: &str) -> usize {
        let name_offset = self.string(name);
        let record = Bytes::default()
            .u16(BlobType::Struct as u16)
            .u16(0x0002)
            .u32(name_offset)
            .u32(0)
            .u32(0)
            .u16(0)
            .u16(0);
        let offset = self.record(record);
        self.local(BlobType::Struct, name, offset);
        offset
    }

    /// Unregistered enum with the given `(name, value)` members.
    pub fn enumeration(&mut self, name: &str, values: &[(&str, i32)]) -> usize {
        let names: Vec<u32> = values.iter().map(|(name, _)| self.string(name)).collect();
        let name_offset = self.string(name);
        let mut record = Bytes::default()
            .u16(BlobType::Enum as u16)
            .u16(0x0002)
            .u32(name_offset)
            .u32(0)
            .u32(0)
            .u16(values.len() as u16)
            .u16(0);
        for (name, (_, value)) in names.iter().zip(values) {
            record = record.u32(0).u32(*name).u32(*value as u32);
        }
        let offset = self.record(record);
        self.local(BlobType::Enum, name, offset);
        offset
    }

    /// Registered object with `parent` and the given `(name, flags, class_closure)` signals.
    pub fn object(&mut self, name: &str, parent: u16, signals: &[(&str, u16, u16)]) -> usize {
        let name_offset = self.string(name);
        let gtype_name = self.string(&format!("Test{}", name));
        let gtype_init = self.string(&format!("test_{}_get_type", name.to_lowercase()));

        let mut encoded = Vec::new();
        for (signal, flags, closure) in signals {
            let signature = self.signature(&[]);
            let signal = self.string(signal);
            encoded.push((signal, *flags, *closure, signature));
        }

        let mut record = Bytes::default()
            .u16(BlobType::Object as u16)
            .u16(0)
            .u32(name_offset)
            .u32(gtype_name)
            .u32(gtype_init)
            .u16(parent)
            .u16(0)
            .u16(0)
            .u16(0)
            .u16(0)
            .u16(signals.len() as u16)
            .u16(0)
            .u16(0);
        for (name, flags, closure, signature) in encoded {
            record = record.u16(flags).u16(closure).u32(name).u32(signature);
        }
        let offset = self.record(record);
        self.local(BlobType::Object, name, offset);
        offset
    }
}

pub fn int32() -> u32 {
    TypeDescriptor::simple(TypeTag::Int32, false)
}
