//! Validation configuration for typelib loading
//!
//! The defaults reproduce the reference acceptance behaviour of the typelib format. The extra
//! switches harden the places where that behaviour is known to be incomplete (array length
//! pairs, error domains, unions) without changing what a default validation accepts.

/// Configuration for typelib validation
///
/// Every check that is always part of the format (magic, version, record sizes, alignment,
/// names, cross-reference ranges) runs regardless of this configuration. The switches below only
/// cover policies and hardening extensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct ValidationConfig {
    /// Reject enums and flags whose values repeat a numeric value
    pub reject_duplicate_enum_values: bool,

    /// Structurally validate error domain records (head, name, quark symbol, error code enum)
    pub validate_error_domains: bool,

    /// Structurally validate union records (registration, name, discriminator, fields, functions)
    pub validate_unions: bool,

    /// Cross-check array length and size annotations against the enclosing signature
    pub validate_array_lengths: bool,

    /// Require the value region of every constant to lie inside the buffer
    pub check_constant_values: bool,

    /// Maximum nesting depth of type descriptors (default: 64)
    pub max_type_depth: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            reject_duplicate_enum_values: true,
            validate_error_domains: false,
            validate_unions: false,
            validate_array_lengths: false,
            check_constant_values: true,
            max_type_depth: 64,
        }
    }
}

impl ValidationConfig {
    /// Creates the configuration matching the reference acceptance behaviour
    ///
    /// Same as [`ValidationConfig::default`].
    #[must_use]
    pub fn compatible() -> Self {
        Self::default()
    }

    /// Creates a validation configuration with all checks enabled
    ///
    /// **Warning**: typelibs produced by older compilers may leave unions or error domains
    /// incomplete and are rejected under this preset.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            reject_duplicate_enum_values: true,
            validate_error_domains: true,
            validate_unions: true,
            validate_array_lengths: true,
            check_constant_values: true,
            max_type_depth: 64,
        }
    }

    /// Creates a lenient configuration
    ///
    /// Accepts enums with aliased values and skips every hardening extension. Structural
    /// format checks still run.
    #[must_use]
    pub fn permissive() -> Self {
        Self {
            reject_duplicate_enum_values: false,
            validate_error_domains: false,
            validate_unions: false,
            validate_array_lengths: false,
            check_constant_values: false,
            max_type_depth: 64,
        }
    }
}
