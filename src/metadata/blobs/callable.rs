//! Callable records: signatures, arguments, functions, callbacks, signals and virtual functions.

use bitflags::bitflags;

use crate::{
    metadata::{
        blobs::{ensure_room, read_at},
        layout::{arg, callback, function, signal, signature, vfunc},
    },
    Result,
};

bitflags! {
    #[derive(PartialEq, Debug, Clone, Copy)]
    /// Direction and ownership flags of an argument
    pub struct ArgFlags : u32 {
        /// Caller passes a value in
        const IN = 0x0001;
        /// Callee passes a value out
        const OUT = 0x0002;
        /// Out argument whose storage the caller allocates
        const DIPPER = 0x0004;
        /// The value may be NULL
        const ALLOW_NONE = 0x0008;
        /// The argument may be omitted
        const OPTIONAL = 0x0010;
        /// Ownership of the value is transferred
        const TRANSFER_OWNERSHIP = 0x0020;
        /// Ownership of the container is transferred
        const TRANSFER_CONTAINER_OWNERSHIP = 0x0040;
        /// The argument is the return value of the callable
        const RETURN_VALUE = 0x0080;
    }
}

bitflags! {
    #[derive(PartialEq, Debug, Clone, Copy)]
    /// Return value flags of a signature
    pub struct SignatureFlags : u16 {
        /// The return value may be NULL
        const MAY_RETURN_NULL = 0x0001;
        /// The caller owns the returned value
        const CALLER_OWNS_RETURN_VALUE = 0x0002;
        /// The caller owns the returned container
        const CALLER_OWNS_RETURN_CONTAINER = 0x0004;
    }
}

bitflags! {
    #[derive(PartialEq, Debug, Clone, Copy)]
    /// Flags of a function record
    pub struct FunctionFlags : u16 {
        /// The function is deprecated
        const DEPRECATED = 0x0001;
        /// The function sets a property
        const SETTER = 0x0002;
        /// The function gets a property
        const GETTER = 0x0004;
        /// The function constructs an instance of its container
        const CONSTRUCTOR = 0x0008;
        /// The function invokes a virtual function
        const WRAPS_VFUNC = 0x0010;
        /// The function can fail with an error
        const THROWS = 0x0020;
    }
}

bitflags! {
    #[derive(PartialEq, Debug, Clone, Copy)]
    /// Flags of a signal record
    pub struct SignalFlags : u16 {
        /// The signal is deprecated
        const DEPRECATED = 0x0001;
        /// The class closure runs before user handlers
        const RUN_FIRST = 0x0002;
        /// The class closure runs after user handlers
        const RUN_LAST = 0x0004;
        /// The class closure runs in the cleanup stage
        const RUN_CLEANUP = 0x0008;
        /// Recursive emission restarts instead of nesting
        const NO_RECURSE = 0x0010;
        /// The signal supports details
        const DETAILED = 0x0020;
        /// The signal may be emitted as an action
        const ACTION = 0x0040;
        /// Emission hooks are not supported
        const NO_HOOKS = 0x0080;
        /// `class_closure` indexes the default handler
        const HAS_CLASS_CLOSURE = 0x0100;
        /// A `true` handler return stops the emission
        const TRUE_STOPS_EMIT = 0x0200;
    }
}

bitflags! {
    #[derive(PartialEq, Debug, Clone, Copy)]
    /// Flags of a virtual function record
    pub struct VFuncFlags : u16 {
        /// Overrides must chain up to the parent implementation
        const MUST_CHAIN_UP = 0x0001;
        /// Derived types must implement the function
        const MUST_BE_IMPLEMENTED = 0x0002;
        /// Derived types must not implement the function
        const MUST_NOT_BE_IMPLEMENTED = 0x0004;
        /// `class_closure` indexes the default handler
        const CLASS_CLOSURE = 0x0008;
    }
}

/// One argument of a signature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArgBlob {
    /// Name string offset
    pub name: u32,
    /// Direction and ownership flags
    pub flags: ArgFlags,
    /// Scope of a callback argument
    pub scope: u8,
    /// Index of the user data argument of a callback, 255 for none
    pub closure: u8,
    /// Index of the destroy notify argument of a callback, 255 for none
    pub destroy: u8,
    /// Offset of the argument's type descriptor
    pub arg_type: usize,
}

impl ArgBlob {
    /// Read an argument record at `offset`
    ///
    /// # Errors
    /// Returns [`crate::Error::BufferTooShort`] if the record does not fit.
    pub fn read(data: &[u8], offset: usize) -> Result<ArgBlob> {
        let base = ensure_room(data, offset, arg::SIZE)?;
        let raw = read_at::<u32>(data, base, arg::FLAGS)?;

        Ok(ArgBlob {
            name: read_at(data, base, arg::NAME)?,
            flags: ArgFlags::from_bits_truncate(raw),
            scope: ((raw >> 8) & 0x07) as u8,
            closure: ((raw >> 11) & 0xFF) as u8,
            destroy: ((raw >> 19) & 0xFF) as u8,
            arg_type: base + arg::ARG_TYPE,
        })
    }
}

/// A return type and the argument list that follows it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignatureBlob {
    /// Raw return type descriptor; 0 means void
    pub return_type: u32,
    /// Offset of the return type descriptor
    pub return_type_offset: usize,
    /// Return value flags
    pub flags: SignatureFlags,
    /// Number of arguments following the head
    pub n_arguments: u16,
    /// Offset of the first argument
    pub arguments: usize,
}

impl SignatureBlob {
    /// Read a signature head at `offset`
    ///
    /// # Errors
    /// Returns [`crate::Error::BufferTooShort`] if the head does not fit.
    pub fn read(data: &[u8], offset: usize) -> Result<SignatureBlob> {
        let base = ensure_room(data, offset, signature::SIZE)?;

        Ok(SignatureBlob {
            return_type: read_at(data, base, signature::RETURN_TYPE)?,
            return_type_offset: base + signature::RETURN_TYPE,
            flags: SignatureFlags::from_bits_truncate(read_at(data, base, signature::FLAGS)?),
            n_arguments: read_at(data, base, signature::N_ARGUMENTS)?,
            arguments: base + signature::SIZE,
        })
    }

    /// Offset of the `index`-th argument record
    #[must_use]
    pub fn argument(&self, index: u16) -> usize {
        self.arguments + usize::from(index) * arg::SIZE
    }
}

/// A function, free-standing or as method of a container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FunctionBlob {
    /// Raw blob type of the head
    pub blob_type: u16,
    /// Function flags
    pub flags: FunctionFlags,
    /// Property or vfunc index for setters, getters and vfunc wrappers
    pub index: u16,
    /// Name string offset
    pub name: u32,
    /// Symbol string offset
    pub symbol: u32,
    /// Signature offset
    pub signature: u32,
}

impl FunctionBlob {
    /// Read a function record at `offset`
    ///
    /// # Errors
    /// Returns [`crate::Error::BufferTooShort`] if the record does not fit.
    pub fn read(data: &[u8], offset: usize) -> Result<FunctionBlob> {
        let base = ensure_room(data, offset, function::SIZE)?;
        let raw = read_at::<u16>(data, base, function::FLAGS)?;

        Ok(FunctionBlob {
            blob_type: read_at(data, base, function::BLOB_TYPE)?,
            flags: FunctionFlags::from_bits_truncate(raw),
            index: raw >> 6,
            name: read_at(data, base, function::NAME)?,
            symbol: read_at(data, base, function::SYMBOL)?,
            signature: read_at(data, base, function::SIGNATURE)?,
        })
    }

    /// Whether the function is a setter, getter or vfunc wrapper
    #[must_use]
    pub fn is_accessor(&self) -> bool {
        self.flags
            .intersects(FunctionFlags::SETTER | FunctionFlags::GETTER | FunctionFlags::WRAPS_VFUNC)
    }
}

/// A callback type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallbackBlob {
    /// Raw blob type of the head
    pub blob_type: u16,
    /// Deprecation flag
    pub deprecated: bool,
    /// Name string offset
    pub name: u32,
    /// Signature offset
    pub signature: u32,
}

impl CallbackBlob {
    /// Read a callback record at `offset`
    ///
    /// # Errors
    /// Returns [`crate::Error::BufferTooShort`] if the record does not fit.
    pub fn read(data: &[u8], offset: usize) -> Result<CallbackBlob> {
        let base = ensure_room(data, offset, callback::SIZE)?;

        Ok(CallbackBlob {
            blob_type: read_at(data, base, callback::BLOB_TYPE)?,
            deprecated: read_at::<u16>(data, base, callback::FLAGS)? & 0x0001 != 0,
            name: read_at(data, base, callback::NAME)?,
            signature: read_at(data, base, callback::SIGNATURE)?,
        })
    }
}

/// A signal of an object or interface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalBlob {
    /// Signal flags
    pub flags: SignalFlags,
    /// Index of the class closure among the owner's signals
    pub class_closure: u16,
    /// Name string offset
    pub name: u32,
    /// Signature offset
    pub signature: u32,
}

impl SignalBlob {
    /// Read a signal record at `offset`
    ///
    /// # Errors
    /// Returns [`crate::Error::BufferTooShort`] if the record does not fit.
    pub fn read(data: &[u8], offset: usize) -> Result<SignalBlob> {
        let base = ensure_room(data, offset, signal::SIZE)?;

        Ok(SignalBlob {
            flags: SignalFlags::from_bits_truncate(read_at(data, base, signal::FLAGS)?),
            class_closure: read_at(data, base, signal::CLASS_CLOSURE)?,
            name: read_at(data, base, signal::NAME)?,
            signature: read_at(data, base, signal::SIGNATURE)?,
        })
    }

    /// Number of run stage flags set; a valid signal has exactly one
    #[must_use]
    pub fn run_stages(&self) -> u32 {
        (self.flags & (SignalFlags::RUN_FIRST | SignalFlags::RUN_LAST | SignalFlags::RUN_CLEANUP))
            .bits()
            .count_ones()
    }
}

/// A virtual function slot of an object or interface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VFuncBlob {
    /// Name string offset
    pub name: u32,
    /// Virtual function flags
    pub flags: VFuncFlags,
    /// Index of the signal this slot is the class closure of
    pub signal: u16,
    /// Offset of the slot in the class structure
    pub struct_offset: u16,
    /// Index of the class closure among the owner's vfuncs
    pub class_closure: u16,
    /// Signature offset
    pub signature: u32,
}

impl VFuncBlob {
    /// Read a virtual function record at `offset`
    ///
    /// # Errors
    /// Returns [`crate::Error::BufferTooShort`] if the record does not fit.
    pub fn read(data: &[u8], offset: usize) -> Result<VFuncBlob> {
        let base = ensure_room(data, offset, vfunc::SIZE)?;

        Ok(VFuncBlob {
            name: read_at(data, base, vfunc::NAME)?,
            flags: VFuncFlags::from_bits_truncate(read_at(data, base, vfunc::FLAGS)?),
            signal: read_at(data, base, vfunc::SIGNAL)?,
            struct_offset: read_at(data, base, vfunc::STRUCT_OFFSET)?,
            class_closure: read_at(data, base, vfunc::CLASS_CLOSURE)?,
            signature: read_at(data, base, vfunc::SIGNATURE)?,
        })
    }
}
