//! CLI argument parsing for the mapping generator.
//!
//! The CLI is intentionally thin: it locates the repository root and
//! tunes logging; the registry and the append-only policy live in the
//! core modules.
use clap::Parser;
use std::path::PathBuf;

/// Root CLI entrypoint for the mapping generator.
#[derive(Parser, Debug)]
#[command(
    name = "mapgen",
    version,
    about = "Generate versioned JSON mapping files from source CSV tables",
    after_help = "Each mapping lives under mapping/<name>/ as one or more CSV files.\nAll *.csv files in the directory are read (sorted by filename) and\nconcatenated into a single key list. The generated JSON is written to\nmapping/<name>.json.\n\nID assignment is append-only: existing entries keep their ids and order;\nnew keys are appended with the next available id. Removing or reordering\nexisting keys is an error."
)]
pub struct RootArgs {
    /// Repository root containing the mapping/ tree
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub root: PathBuf,

    /// Emit debug-level tracing for the run
    #[arg(long)]
    pub verbose: bool,
}
