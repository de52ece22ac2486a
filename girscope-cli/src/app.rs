use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// girscope - GObject-Introspection typelib inspection and validation
#[derive(Debug, Parser)]
#[command(name = "girscope", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared across all subcommands.
#[derive(Debug, Parser)]
pub struct GlobalOptions {
    /// Emit output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose (debug-level) logging output.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Display typelib overview: namespace, version, library, dependencies, and counts.
    Info {
        /// Path to the typelib file.
        #[arg(value_name = "FILE")]
        path: PathBuf,
    },

    /// Validate one or more typelibs at a chosen strictness level.
    Validate {
        /// Paths to the typelib files.
        #[arg(value_name = "FILE", required = true)]
        paths: Vec<PathBuf>,

        /// Validation level: compatible, strict, or permissive.
        #[arg(short, long, default_value = "compatible")]
        level: String,
    },

    /// List directory entries.
    Entries {
        /// Path to the typelib file.
        #[arg(value_name = "FILE")]
        path: PathBuf,

        /// Show only entries of one kind (e.g., object, function, enum).
        #[arg(long)]
        kind: Option<String>,

        /// Show only entries defined in this typelib.
        #[arg(long)]
        local: bool,
    },
}
