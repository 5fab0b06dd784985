//! Error taxonomy for the generation pipeline.
//!
//! Every variant is fatal to the run. The orchestrator attaches the
//! mapping name before errors reach the user.
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures raised while reading sources, validating evolution, or
/// persisting a mapping document.
#[derive(Debug, Error)]
pub enum MappingError {
    /// The source directory holds no CSV tables at all.
    #[error("no CSV files found in {}", .dir.display())]
    NoInput { dir: PathBuf },

    /// A table file's header row lacks the required `key` column.
    #[error("{file} is missing the required 'key' column header")]
    MissingKeyColumn { file: String },

    /// The same key appeared twice across one mapping's tables.
    #[error("duplicate key '{key}' found in {file}")]
    DuplicateKey { key: String, file: String },

    /// Parsing succeeded but produced zero usable entries.
    #[error("source CSV files contain no entries")]
    EmptySource,

    /// Keys present in the generated output vanished from the source.
    #[error("keys removed from the source CSV still exist in the generated JSON (removal is not allowed): {keys:?}")]
    RemovedKeys { keys: Vec<String> },

    /// The relative order of previously generated keys changed.
    #[error("order of existing keys changed in the source CSV (reordering is not allowed); expected the first {expected} keys to match the generated JSON")]
    ReorderedKeys { expected: usize },

    /// The previously generated output exists but is not a valid document.
    #[error("failed to read existing mapping {}: {message}", .path.display())]
    Read { path: PathBuf, message: String },

    /// Underlying filesystem failure.
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    /// Underlying CSV parse failure.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}
