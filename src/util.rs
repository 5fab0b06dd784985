use std::path::Path;

/// File name of `path` for reports and diagnostics, falling back to the
/// full path when there is none.
pub fn display_name(path: &Path) -> String {
    match path.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None => path.display().to_string(),
    }
}
