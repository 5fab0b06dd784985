//! CSV source reading for one mapping.
//!
//! All `*.csv` files in a mapping's source directory are read in
//! filename order and concatenated into a single entry list. The header
//! row names the output columns; a `comment` column is for human
//! documentation only and never reaches the output.
use crate::error::MappingError;
use crate::model::Entry;
use crate::util::display_name;
use csv::{ReaderBuilder, Trim};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Columns that are never included in the generated output.
const IGNORED_COLUMNS: &[&str] = &["comment"];

/// Read and concatenate all CSV tables under `source_dir`.
///
/// Row order is preserved within a file and files are visited in
/// filename order, so the combined list is deterministic regardless of
/// directory listing order. Keys must be unique across the whole set.
pub fn read_entries(source_dir: &Path) -> Result<Vec<Entry>, MappingError> {
    let csv_files = csv_files_sorted(source_dir)?;
    if csv_files.is_empty() {
        return Err(MappingError::NoInput {
            dir: source_dir.to_path_buf(),
        });
    }

    let mut entries = Vec::new();
    let mut seen_keys: HashSet<String> = HashSet::new();
    for file in &csv_files {
        read_file(file, &mut entries, &mut seen_keys)?;
    }
    Ok(entries)
}

fn csv_files_sorted(source_dir: &Path) -> Result<Vec<PathBuf>, MappingError> {
    if !source_dir.is_dir() {
        return Err(MappingError::NoInput {
            dir: source_dir.to_path_buf(),
        });
    }
    let mut files = Vec::new();
    for entry in fs::read_dir(source_dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "csv") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn read_file(
    path: &Path,
    entries: &mut Vec<Entry>,
    seen_keys: &mut HashSet<String>,
) -> Result<(), MappingError> {
    let file_name = display_name(path);
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_path(path)?;
    let headers = reader.headers()?.clone();
    let Some(key_index) = headers.iter().position(|column| column == "key") else {
        return Err(MappingError::MissingKeyColumn { file: file_name });
    };

    // Output columns keep header order; ignored ones are dropped.
    let output_columns: Vec<(usize, String)> = headers
        .iter()
        .enumerate()
        .filter(|(_, column)| !IGNORED_COLUMNS.contains(column))
        .map(|(index, column)| (index, column.to_string()))
        .collect();

    for record in reader.records() {
        let record = record?;
        let key = record.get(key_index).unwrap_or("").trim();
        if key.is_empty() {
            continue;
        }
        if !seen_keys.insert(key.to_string()) {
            return Err(MappingError::DuplicateKey {
                key: key.to_string(),
                file: file_name.clone(),
            });
        }
        let mut entry = Entry::with_capacity(output_columns.len());
        for (index, column) in &output_columns {
            let value = record.get(*index).unwrap_or("");
            entry.insert(column.clone(), value.to_string());
        }
        entries.push(entry);
    }
    Ok(())
}
