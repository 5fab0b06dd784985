//! Mapping document persistence.
//!
//! Reads are strict: an existing document that fails to parse is a fatal
//! error, never treated as absent. Writes land in a temp sibling first
//! and are renamed into place so a crash mid-write leaves the previous
//! output intact.
use crate::error::MappingError;
use crate::model::MappingDocument;
use std::fs;
use std::io;
use std::path::Path;

/// Load a previously generated document, or `None` if it was never
/// written.
pub fn load_document(path: &Path) -> Result<Option<MappingDocument>, MappingError> {
    if !path.exists() {
        return Ok(None);
    }
    let bytes = fs::read(path)?;
    let document: MappingDocument =
        serde_json::from_slice(&bytes).map_err(|err| MappingError::Read {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
    for (position, record) in document.data.iter().enumerate() {
        if record.key().is_none() {
            return Err(MappingError::Read {
                path: path.to_path_buf(),
                message: format!("record {position} has no key attribute"),
            });
        }
    }
    Ok(Some(document))
}

/// Serialize `document` and atomically publish it to `path`.
///
/// Output is pretty-printed UTF-8 with a trailing newline; non-ASCII
/// characters pass through unescaped.
pub fn write_document(path: &Path, document: &MappingDocument) -> Result<(), MappingError> {
    let mut bytes = serde_json::to_vec_pretty(document).map_err(io::Error::from)?;
    bytes.push(b'\n');

    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("mapping");
    let tmp_path = path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(format!(".{file_name}.tmp"));
    fs::write(&tmp_path, &bytes)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}
