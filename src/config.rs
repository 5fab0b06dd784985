//! Mapping registry.
//!
//! The set of generated mappings is fixed at build time. The registry is
//! constructed once at startup and handed to the orchestrator; nothing
//! mutates it afterwards.
use std::path::{Path, PathBuf};

/// One named CSV-to-JSON conversion unit.
#[derive(Debug, Clone)]
pub struct MappingSpec {
    /// Short name used in reports and diagnostics.
    pub name: String,
    /// Directory holding the mapping's source CSV tables.
    pub source_dir: PathBuf,
    /// Path of the generated JSON document.
    pub output_path: PathBuf,
    /// Value written to the document's `$schema` field.
    pub schema_ref: String,
}

impl MappingSpec {
    fn new(mapping_dir: &Path, name: &str) -> Self {
        Self {
            name: name.to_string(),
            source_dir: mapping_dir.join(name),
            output_path: mapping_dir.join(format!("{name}.json")),
            schema_ref: format!("./{name}.schema.json"),
        }
    }
}

/// The fixed registry of generated mappings under `<root>/mapping/`.
pub fn default_registry(root: &Path) -> Vec<MappingSpec> {
    let mapping_dir = root.join("mapping");
    vec![
        MappingSpec::new(&mapping_dir, "identification"),
        MappingSpec::new(&mapping_dir, "shiny"),
    ]
}
