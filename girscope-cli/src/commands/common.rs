use std::path::Path;

use anyhow::{bail, Context};
use girscope::{Typelib, ValidationConfig};

/// Load and validate a typelib with the default configuration.
pub fn load_typelib(path: &Path) -> anyhow::Result<Typelib<'static>> {
    Typelib::from_file(path).with_context(|| format!("failed to load typelib: {}", path.display()))
}

/// Map a `--level` argument to its configuration preset.
pub fn validation_level(level: &str) -> anyhow::Result<ValidationConfig> {
    Ok(match level {
        "compatible" => ValidationConfig::compatible(),
        "strict" => ValidationConfig::strict(),
        "permissive" => ValidationConfig::permissive(),
        other => bail!(
            "unknown validation level: {other} (expected compatible, strict, or permissive)"
        ),
    })
}
